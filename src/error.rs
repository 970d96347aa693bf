use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the check pipeline.
///
/// Config and format errors abort the run before any bag access; pattern
/// errors are isolated to their requirement entry and reported inside the
/// final report instead of aborting the remaining entries.
#[derive(Debug, Error)]
pub enum CheckerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unsupported bag format for {}: expected a .db3 or .mcap file", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("invalid topic pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("bag has zero duration, message rates are undefined")]
    ZeroDuration,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sqlite3 storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("mcap storage error: {0}")]
    Mcap(#[from] mcap::McapError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_names_path() {
        let err = CheckerError::UnsupportedFormat(PathBuf::from("/tmp/capture.bin"));
        let msg = err.to_string();
        assert!(msg.contains("/tmp/capture.bin"));
        assert!(msg.contains(".db3"));
        assert!(msg.contains(".mcap"));
    }

    #[test]
    fn test_pattern_error_names_pattern() {
        let source = regex::Regex::new("([").unwrap_err();
        let err = CheckerError::Pattern {
            pattern: "([".to_string(),
            source,
        };
        assert!(err.to_string().contains("invalid topic pattern '(['"));
    }
}
