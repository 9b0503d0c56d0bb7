//! Mapping request paths onto files under the document root.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use tokio::fs::File;

use crate::server::error::Error;
use crate::server::mime::content_type_for;

/// File served for paths that end in `/`.
pub const INDEX_FILE: &str = "index.html";

/// A request path mapped into the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Location of the file on disk.
    pub filesystem_path: PathBuf,
    /// The request path, with the index file appended where it applied.
    pub uri_path: String,
    /// Whether [`INDEX_FILE`] was appended.
    pub used_index_fallback: bool,
}

/// Type and size of the content about to be served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDescriptor {
    pub content_type: Cow<'static, str>,
    pub length: u64,
}

/// A file opened for serving, positioned at its start.
#[derive(Debug)]
pub struct OpenedFile {
    pub file: File,
    pub descriptor: ContentDescriptor,
}

/// Resolves request paths against a fixed document root.
#[derive(Debug, Clone)]
pub struct PathResolver {
    document_root: PathBuf,
}

impl PathResolver {
    /// Create a resolver rooted at `document_root`.
    pub fn new(document_root: impl Into<PathBuf>) -> Self {
        Self {
            document_root: document_root.into(),
        }
    }

    /// The directory request paths are appended to.
    pub fn document_root(&self) -> &Path {
        &self.document_root
    }

    /// Map a decoded request path to a location under the document root.
    ///
    /// Any path containing `/..` is refused. This is a plain substring test
    /// and does not normalise the path, so it is not a complete traversal
    /// guard on its own. A path ending in `/` gets [`INDEX_FILE`] appended.
    /// The document root and the path are joined by concatenation.
    pub fn resolve(&self, uri_path: &str) -> Result<ResolvedPath, Error> {
        if uri_path.contains("/..") {
            return Err(Error::Forbidden(uri_path.to_string()));
        }

        let mut uri_path = uri_path.to_string();
        let used_index_fallback = uri_path.ends_with('/');
        if used_index_fallback {
            uri_path.push_str(INDEX_FILE);
        }

        let mut filesystem_path = self.document_root.clone().into_os_string();
        filesystem_path.push(&uri_path);

        Ok(ResolvedPath {
            filesystem_path: PathBuf::from(filesystem_path),
            uri_path,
            used_index_fallback,
        })
    }
}

impl ResolvedPath {
    /// Open the file for reading.
    ///
    /// A missing file, or anything that is not a regular file, is
    /// [`Error::NotFound`]. A file that exists but cannot be opened is
    /// [`Error::FileOpen`].
    pub async fn open(&self) -> Result<OpenedFile, Error> {
        let is_file = tokio::fs::metadata(&self.filesystem_path)
            .await
            .is_ok_and(|metadata| metadata.is_file());
        if !is_file {
            return Err(Error::NotFound {
                path: self.filesystem_path.clone(),
                index_fallback: self.used_index_fallback,
            });
        }

        let open_error = |source| Error::FileOpen {
            path: self.filesystem_path.clone(),
            source,
        };
        let file = File::open(&self.filesystem_path).await.map_err(open_error)?;
        let length = file.metadata().await.map_err(open_error)?.len();

        Ok(OpenedFile {
            file,
            descriptor: ContentDescriptor {
                content_type: content_type_for(&self.uri_path),
                length,
            },
        })
    }
}
