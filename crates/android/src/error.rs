//! Errors raised while loading and resolving property sources

use market_core::error::{Error, ErrorCode};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for build configuration resolution
pub type Result<T> = std::result::Result<T, BuildConfigError>;

/// Fatal resolution failures. Any of them aborts with no partial result.
#[derive(Error, Debug)]
pub enum BuildConfigError {
    /// A property file exists but cannot be parsed
    #[error("Malformed property source {} at line {line}: {reason}", .path.display())]
    MalformedSource {
        /// File that failed to parse
        path: PathBuf,
        /// 1-based line where the bad entry starts
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// A version property is not an integer
    #[error(
        "Invalid version format for {key} in {}: {value:?} is not a valid integer",
        .path.display()
    )]
    InvalidVersionFormat {
        /// Property key
        key: String,
        /// Raw value as found in the file
        value: String,
        /// File the value came from
        path: PathBuf,
    },

    /// The directory sources are loaded from does not exist
    #[error("Property source root is not a directory: {}", .path.display())]
    RootNotDirectory {
        /// Offending root
        path: PathBuf,
    },

    /// A property file exists but could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl From<BuildConfigError> for Error {
    fn from(err: BuildConfigError) -> Self {
        match err {
            BuildConfigError::MalformedSource { ref path, line, .. } => {
                let suggestion = format!(
                    "Fix line {} of {} so it reads key=value, or comment it out with #",
                    line,
                    path.display()
                );
                Error::new(ErrorCode::ConfigParseError, err.to_string()).with_suggestion(suggestion)
            }
            BuildConfigError::InvalidVersionFormat { ref key, ref path, .. } => {
                let suggestion = format!(
                    "Set {} in {} to a whole number, e.g. run `flutter build` with --build-number",
                    key,
                    path.display()
                );
                Error::new(ErrorCode::InvalidConfigValue, err.to_string())
                    .with_suggestion(suggestion)
            }
            BuildConfigError::RootNotDirectory { path } => Error::directory_not_found(path),
            BuildConfigError::Io { path, source } => Error::from(source)
                .with_context(format!("While reading property source {}", path.display())),
        }
    }
}
