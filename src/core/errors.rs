use std::path::PathBuf;

/// All domain errors for Papertrail.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum TrailError {
    #[error(
        "Audit store unavailable: {path}\n\n  \
         The backing file could not be read or written: {detail}\n  \
         Check permissions and free space on the containing volume."
    )]
    Storage { path: PathBuf, detail: String },

    #[error(
        "Audit store corrupt: {path}\n\n  \
         The file exists but does not hold a valid record sequence: {detail}\n  \
         Move the file aside to start a fresh trail; do not edit it in place."
    )]
    Serialization { path: PathBuf, detail: String },

    #[error("Interrupted while waiting for exclusive access to the audit store")]
    Interrupted,

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TrailError>;
