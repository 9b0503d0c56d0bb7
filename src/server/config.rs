//! Server configuration.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use log::debug;

use crate::server::error::ConfigError;

/// The port the server listens on.
pub const DEFAULT_PORT: u16 = 9018;

/// Workers started per configured CPU, before `thread_limit` applies.
pub const WORKERS_PER_CPU: usize = 4;

/// HTTP server configuration.
///
/// Read once at startup and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// The number of CPUs the server may use.
    pub cpu_limit: usize,
    /// Hard upper bound on the number of workers.
    pub thread_limit: usize,
    /// Directory that request paths are appended to.
    pub document_root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            cpu_limit: 1,
            thread_limit: WORKERS_PER_CPU,
            document_root: PathBuf::from("."),
        }
    }
}

impl ServerConfig {
    /// Parse a configuration from whitespace-separated `key value` tokens.
    ///
    /// `cpu_limit`, `thread_limit` and `document_root` are all required.
    /// Unknown keys are skipped together with their value.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let mut cpu_limit = None;
        let mut thread_limit = None;
        let mut document_root = None;

        let mut tokens = input.split_whitespace();
        while let Some(key) = tokens.next() {
            let value = tokens
                .next()
                .ok_or_else(|| ConfigError::MissingValue(key.to_string()))?;

            match key {
                "cpu_limit" => cpu_limit = Some(parse_limit("cpu_limit", value)?),
                "thread_limit" => thread_limit = Some(parse_limit("thread_limit", value)?),
                "document_root" => document_root = Some(PathBuf::from(value)),
                other => debug!("Ignoring unknown config key {other}"),
            }
        }

        Ok(Self {
            cpu_limit: cpu_limit.ok_or(ConfigError::MissingKey("cpu_limit"))?,
            thread_limit: thread_limit.ok_or(ConfigError::MissingKey("thread_limit"))?,
            document_root: document_root.ok_or(ConfigError::MissingKey("document_root"))?,
            ..Self::default()
        })
    }

    /// Read and parse the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// The number of workers to start: `min(cpu_limit * 4, thread_limit)`.
    pub fn worker_count(&self) -> usize {
        self.cpu_limit
            .saturating_mul(WORKERS_PER_CPU)
            .min(self.thread_limit)
    }
}

fn parse_limit(key: &'static str, value: &str) -> Result<usize, ConfigError> {
    match value.parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}
