use std::path::PathBuf;

use thiserror::Error;

/// A single store line that could not be turned back into a mark.
///
/// These never fail a command: the repository skips the line and keeps going.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineError {
    #[error("invalid format of line: {0}")]
    Malformed(String),

    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

#[derive(Debug, Error)]
pub enum MarkError {
    #[error("error reading hpoon marks file '{}'", .path.display())]
    StoreUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error writing hpoon marks file '{}'", .path.display())]
    StoreWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("mark '{0}' does not exist")]
    MarkNotFound(String),

    #[error("'{0}' is reserved for the last unnamed mark and cannot be used as a name")]
    ReservedName(String),

    #[error("invalid mark name '{0}' (must be non-empty, without '/' or line breaks)")]
    InvalidName(String),

    #[error("Filepath doesn't exist: '{}'", .0.display())]
    PathNotFound(PathBuf),
}
