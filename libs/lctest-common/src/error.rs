//! Error taxonomy for test-input acquisition

use std::path::PathBuf;
use thiserror::Error;

/// Problems with the user's test input or solution file
#[derive(Debug, Error)]
pub enum InputError {
    /// Direct input was empty or whitespace only
    #[error("Test case must not be empty.")]
    EmptyTestCase,

    /// Selected test file had no content after trimming
    #[error("The selected test file must not be empty.")]
    EmptyTestFile {
        /// The file that was read
        path: PathBuf,
    },

    /// Selected test file could not be read as UTF-8 text
    #[error("Failed to read test file {}: {source}", .path.display())]
    ReadTestFile {
        /// The file that failed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// No solution file to test
    #[error("Please open a LeetCode solution file first.")]
    MissingSolution {
        /// The path that was given
        path: PathBuf,
    },
}

/// Blank after trimming whitespace and byte-order marks
pub fn is_blank(text: &str) -> bool {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
        .is_empty()
}

/// Check direct test input
pub fn validate_test_case(input: &str) -> Result<(), InputError> {
    if is_blank(input) {
        return Err(InputError::EmptyTestCase);
    }
    Ok(())
}
