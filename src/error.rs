//! Error types for the resource generator.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while scanning, rendering, writing or refreshing.
#[derive(Debug, Error)]
pub enum GenError {
    /// Filesystem failure at a specific path
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Watch error: {0}")]
    WatchError(String),

    /// The host refresh command failed or could not be spawned
    #[error("Host refresh failed: {0}")]
    RefreshError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),
}

impl GenError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for GenError {
    fn from(err: config::ConfigError) -> Self {
        GenError::ConfigError(err.to_string())
    }
}

impl From<walkdir::Error> for GenError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
        match err.into_io_error() {
            Some(source) => GenError::Io { path, source },
            None => GenError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop detected"),
            ),
        }
    }
}
