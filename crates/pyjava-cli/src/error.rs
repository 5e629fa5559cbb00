use std::io;
use std::path::PathBuf;

/// Errors that stop the whole run before any file is processed.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("the system cannot find the path specified: {0}")]
    NotFound(String),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("not a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("invalid config file: {0}")]
    InvalidConfig(String),

    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("cannot access {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }
}
