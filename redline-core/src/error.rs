//! Error taxonomy for the review engine.
//!
//! Every fallible engine operation returns [`ReviewError`]. All variants are
//! fatal to the invocation except `MalformedOperatorInput`, whose handling is
//! chosen by [`crate::MalformedPolicy`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by scanning, substitution, and commit.
#[derive(Error, Debug)]
pub enum ReviewError {
    /// The pattern is not valid regex syntax.
    #[error("invalid pattern: {0}")]
    PatternCompile(#[from] regex::Error),

    /// A requested file could not be opened read/write or decoded as UTF-8.
    #[error("cannot open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `++`/`--` was applied to a capture that is not an integer, or the result
    /// overflowed.
    #[error("operator {operator} cannot be applied to {capture:?}")]
    MalformedOperatorInput { capture: String, operator: &'static str },

    /// Truncating or rewriting a file failed mid-commit. Files written earlier in
    /// the same commit stay written.
    #[error("failed to write {}: {source}", path.display())]
    CommitWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ReviewError {
    /// True for errors the malformed-input policy is allowed to swallow.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, ReviewError::MalformedOperatorInput { .. })
    }
}
