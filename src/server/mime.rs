//! Content-type detection from file extensions.

use std::borrow::Cow;

/// Content type for the file at `path`, derived from its extension.
///
/// Only the last path segment is considered. Unknown extensions map to
/// `application/<ext>`, and a name without one maps to `application/unknown`.
pub fn content_type_for(path: &str) -> Cow<'static, str> {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty());

    match extension {
        Some("html") => Cow::Borrowed("text/html"),
        Some("css") => Cow::Borrowed("text/css"),
        Some("js") => Cow::Borrowed("text/javascript"),
        Some("jpg") => Cow::Borrowed("image/jpeg"),
        Some(ext @ ("jpeg" | "png" | "gif")) => Cow::Owned(format!("image/{ext}")),
        Some("swf") => Cow::Borrowed("application/x-shockwave-flash"),
        Some(ext) => Cow::Owned(format!("application/{ext}")),
        None => Cow::Borrowed("application/unknown"),
    }
}
