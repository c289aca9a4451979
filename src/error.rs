//! Top-level error type for `rn` commands.
//!
//! Every failure is fatal: it is reported once on stderr and the process exits.

use crate::config::ConfigError;
use crate::file_ops::FilesystemError;

/// Any error that aborts a rename or move run.
#[derive(Debug)]
pub enum RnError {
    /// Invalid glob pattern.
    Glob(String),
    /// More files were matched than sequence numbers remain after `start`.
    SequenceOverflow { start: u64 },
    /// The move rules file could not be read, parsed or compiled.
    Config(ConfigError),
    /// A rename, move or directory listing failed.
    Filesystem(FilesystemError),
}

impl std::fmt::Display for RnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RnError::Glob(msg) => write!(f, "Invalid glob pattern: {}", msg),
            RnError::SequenceOverflow { start } => write!(
                f,
                "Sequence number overflow: too many files to number from {} (maximum is {})",
                start,
                u64::MAX
            ),
            RnError::Config(e) => write!(f, "{}", e),
            RnError::Filesystem(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RnError {}

impl From<glob::PatternError> for RnError {
    fn from(err: glob::PatternError) -> Self {
        RnError::Glob(err.to_string())
    }
}

impl From<ConfigError> for RnError {
    fn from(err: ConfigError) -> Self {
        RnError::Config(err)
    }
}

impl From<FilesystemError> for RnError {
    fn from(err: FilesystemError) -> Self {
        RnError::Filesystem(err)
    }
}

/// Result type for `rn` commands.
pub type RnResult<T> = Result<T, RnError>;
