//! Compiled pattern and per-line match extraction.
//!
//! The regex crate does the matching; this module only narrows its output to
//! what the engine needs: the first match of a line and the span of the
//! operator capture group.

use std::ops::Range;

use regex::{Captures, Regex};

use crate::error::ReviewError;

/// Name of the capture group rewritten by the programmatic operators.
pub const OPERATOR_CAPTURE: &str = "m";

/// A compiled search pattern shared by every scan of a session.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compiles `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::PatternCompile`] when `source` is not valid regex syntax.
    pub fn new(source: &str) -> Result<Self, ReviewError> {
        Ok(Self {
            regex: Regex::new(source)?,
        })
    }

    /// The pattern source as given on the command line.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Returns the first match on `line`, if any.
    ///
    /// Later matches on the same line are not reported; the line is reviewed as
    /// a single unit.
    pub fn find(&self, line: &str) -> Option<Match> {
        self.regex
            .captures(line)
            .map(|caps| Match::from_captures(&caps))
    }
}

/// One located occurrence of the pattern within a line.
///
/// Offsets are byte offsets into the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub offset: usize,
    pub len: usize,
    pub text: String,
    /// Span of the `m` group when it participated in the match.
    pub capture: Option<Range<usize>>,
}

impl Match {
    pub(crate) fn from_captures(caps: &Captures<'_>) -> Self {
        let whole = caps.get_match();
        Self {
            offset: whole.start(),
            len: whole.len(),
            text: whole.as_str().to_owned(),
            capture: caps.name(OPERATOR_CAPTURE).map(|m| m.range()),
        }
    }

    /// Byte range of the match within its line.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }

    /// The span rewritten by an operator: the `m` group, or the whole match
    /// when the pattern has no such group.
    pub fn operator_range(&self) -> Range<usize> {
        self.capture.clone().unwrap_or_else(|| self.range())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_first_match_only() {
        let pattern = Pattern::new(r"\d+").unwrap();
        let found = pattern.find("a 12 b 345").unwrap();
        assert_eq!(found.offset, 2);
        assert_eq!(found.len, 2);
        assert_eq!(found.text, "12");
        assert_eq!(found.capture, None);
        assert_eq!(found.operator_range(), 2..4);
    }

    #[test]
    fn named_capture_narrows_operator_range() {
        let pattern = Pattern::new(r"v(?<m>\d+)\.").unwrap();
        let found = pattern.find("release v7.2").unwrap();
        assert_eq!(found.text, "v7.");
        assert_eq!(found.operator_range(), 9..10);
    }

    #[test]
    fn invalid_pattern_is_a_compile_error() {
        let err = Pattern::new("(unclosed").unwrap_err();
        assert!(matches!(err, ReviewError::PatternCompile(_)));
    }
}
