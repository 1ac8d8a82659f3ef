//! Substitution evaluator: turns a matched line into its replacement.
//!
//! A substitution is either a regex replacement template (`$1`, `${name}`) or
//! one of four programmatic operators that rewrite the operator capture
//! (see [`crate::matcher::OPERATOR_CAPTURE`]) and leave the rest of the match
//! as it was.

use std::fmt;
use std::str::FromStr;

use crate::error::ReviewError;
use crate::matcher::{Match, Pattern};

/// Built-in operators selected by an exact template string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `++`: add one to an integer capture.
    Increment,
    /// `--`: subtract one from an integer capture.
    Decrement,
    /// `~U`: upper-case the capture.
    Upper,
    /// `~L`: lower-case the capture.
    Lower,
}

impl Operator {
    /// Recognizes `++`, `--`, `~U`, `~L`, with or without a leading `$$`.
    fn from_template(template: &str) -> Option<Self> {
        match template.strip_prefix("$$").unwrap_or(template) {
            "++" => Some(Operator::Increment),
            "--" => Some(Operator::Decrement),
            "~U" => Some(Operator::Upper),
            "~L" => Some(Operator::Lower),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Increment => "++",
            Operator::Decrement => "--",
            Operator::Upper => "~U",
            Operator::Lower => "~L",
        }
    }

    /// Evaluates the operator against the captured text alone.
    ///
    /// # Errors
    ///
    /// [`ReviewError::MalformedOperatorInput`] when `++`/`--` meets a capture that
    /// is not a 64-bit integer, or when the result would overflow.
    pub fn evaluate(self, capture: &str) -> Result<String, ReviewError> {
        let step = match self {
            Operator::Upper => return Ok(capture.to_uppercase()),
            Operator::Lower => return Ok(capture.to_lowercase()),
            Operator::Increment => 1,
            Operator::Decrement => -1,
        };
        capture
            .parse::<i64>()
            .ok()
            .and_then(|n| n.checked_add(step))
            .map(|n| n.to_string())
            .ok_or_else(|| ReviewError::MalformedOperatorInput {
                capture: capture.to_owned(),
                operator: self.symbol(),
            })
    }

    /// Rewrites the operator span of `found`, keeping the surrounding matched text.
    fn rewrite(self, found: &Match) -> Result<String, ReviewError> {
        let span = found.operator_range();
        let start = span.start - found.offset;
        let end = span.end - found.offset;
        let replaced = self.evaluate(&found.text[start..end])?;

        let mut out = String::with_capacity(found.text.len() + replaced.len());
        out.push_str(&found.text[..start]);
        out.push_str(&replaced);
        out.push_str(&found.text[end..]);
        Ok(out)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The substitution supplied on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution {
    /// Regex replacement template, expanded by the regex crate.
    Template(String),
    Operator(Operator),
}

impl Substitution {
    pub fn parse(template: &str) -> Self {
        match Operator::from_template(template) {
            Some(op) => Substitution::Operator(op),
            None => Substitution::Template(template.to_owned()),
        }
    }

    /// Replaces every match of `pattern` in `line`.
    ///
    /// Pure: the same inputs always produce the same output and nothing outside
    /// the returned string is touched, so a failure leaves the caller's line
    /// buffer intact.
    ///
    /// # Errors
    ///
    /// Propagates [`ReviewError::MalformedOperatorInput`] from the operators.
    pub fn apply(&self, pattern: &Pattern, line: &str) -> Result<String, ReviewError> {
        let mut out = String::with_capacity(line.len());
        let mut last = 0;

        for caps in pattern.regex().captures_iter(line) {
            let whole = caps.get_match();
            out.push_str(&line[last..whole.start()]);
            match self {
                Substitution::Template(template) => caps.expand(template, &mut out),
                Substitution::Operator(op) => {
                    out.push_str(&op.rewrite(&Match::from_captures(&caps))?);
                }
            }
            last = whole.end();
        }

        out.push_str(&line[last..]);
        Ok(out)
    }
}

/// What a scan does when an operator rejects a line's capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Fail the whole scan.
    #[default]
    Abort,
    /// Log the failure and treat the line as unmatched.
    Skip,
}

impl FromStr for MalformedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort" => Ok(MalformedPolicy::Abort),
            "skip" => Ok(MalformedPolicy::Skip),
            other => Err(format!("unknown malformed-input policy '{other}' (expected abort or skip)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(pattern: &str, subst: &str, line: &str) -> Result<String, ReviewError> {
        Substitution::parse(subst).apply(&Pattern::new(pattern).unwrap(), line)
    }

    #[test]
    fn increments_whole_match_without_named_group() {
        assert_eq!(apply(r"\d+", "$$++", "count = 5").unwrap(), "count = 6");
    }

    #[test]
    fn bare_operator_spelling_is_recognized() {
        assert_eq!(
            Substitution::parse("--"),
            Substitution::Operator(Operator::Decrement)
        );
        assert_eq!(apply(r"\d+", "--", "n=0").unwrap(), "n=-1");
    }

    #[test]
    fn operator_rewrites_only_the_named_capture() {
        assert_eq!(
            apply(r"ver(?<m>\d+)x", "$$++", "ver9x and ver41x").unwrap(),
            "ver10x and ver42x"
        );
        assert_eq!(
            apply(r"let (?<m>\w+) =", "$$~U", "let total = 3;").unwrap(),
            "let TOTAL = 3;"
        );
        assert_eq!(apply(r"(?<m>[A-Z]+)!", "$$~L", "STOP!").unwrap(), "stop!");
    }

    #[test]
    fn template_expands_backreferences_for_every_match() {
        assert_eq!(
            apply(r"(\w+)@(\w+)", "$2 at $1", "a@b, c@d").unwrap(),
            "b at a, d at c"
        );
    }

    #[test]
    fn non_integer_capture_is_malformed() {
        let err = apply(r"\w+", "$$++", "abc").unwrap_err();
        assert!(err.is_malformed_input());
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn overflow_is_malformed() {
        let err = apply(r"\d+", "++", "9223372036854775807").unwrap_err();
        assert!(err.is_malformed_input());
    }

    #[test]
    fn policy_parses_from_config_strings() {
        assert_eq!("skip".parse::<MalformedPolicy>(), Ok(MalformedPolicy::Skip));
        assert!("ignore".parse::<MalformedPolicy>().is_err());
    }
}
