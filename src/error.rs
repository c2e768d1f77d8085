//! Global error handling for codemap
//!
//! Errors that abort a run. Per-file failures while dumping never reach this
//! type; they are rendered into the report as placeholders instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Global error type for codemap operations
#[derive(Error, Debug)]
pub enum CodemapError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A file could not be rewritten and the batch was halted
    #[error("Failed to rewrite {}: {}", .path.display(), .reason)]
    Rewrite { path: PathBuf, reason: String },

    /// One or more files failed while the batch kept going
    #[error("{0} file(s) could not be rewritten")]
    RewriteBatch(usize),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// Unexpected error
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Specialized Result type for codemap operations
pub type Result<T> = std::result::Result<T, CodemapError>;

/// Creates a CodemapError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::CodemapError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

/// Extension trait for adding context to errors
pub trait ResultExt<T, E> {
    /// Add additional context to an error
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E: std::error::Error + 'static> ResultExt<T, E> for std::result::Result<T, E> {
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|e| {
            let context = f();
            CodemapError::Unexpected(format!("{}: {}", context, e))
        })
    }
}

// Binaries return io::Result from main
impl From<CodemapError> for io::Error {
    fn from(err: CodemapError) -> Self {
        match err {
            CodemapError::Io(e) => e,
            CodemapError::PathNotFound(path) => io::Error::new(
                io::ErrorKind::NotFound,
                format!("Path not found: {}", path),
            ),
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}
