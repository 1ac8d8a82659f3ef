//! Before/after spans for a single line.

use similar::{Algorithm, ChangeTag, TextDiff};

use crate::matcher::Match;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Equal,
    Insert,
    Delete,
}

/// A run of text sharing one [`SpanKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSpan {
    pub kind: SpanKind,
    pub text: String,
}

impl DiffSpan {
    pub fn new(kind: SpanKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Character-level diff between an original line and its replacement.
///
/// Adjacent changes of the same kind are coalesced, so a full rewrite comes out
/// as one delete span followed by one insert span.
pub fn line_diff(old: &str, new: &str) -> Vec<DiffSpan> {
    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_chars(old, new);

    let mut spans: Vec<DiffSpan> = Vec::new();
    for change in diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Equal => SpanKind::Equal,
            ChangeTag::Insert => SpanKind::Insert,
            ChangeTag::Delete => SpanKind::Delete,
        };
        match spans.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(change.value()),
            _ => spans.push(DiffSpan::new(kind, change.value())),
        }
    }
    spans
}

/// Preview-only spans: the match is marked as an insert between two equal runs.
///
/// Empty surrounding runs are left out.
pub fn match_spans(line: &str, found: &Match) -> Vec<DiffSpan> {
    let range = found.range();
    [
        DiffSpan::new(SpanKind::Equal, &line[..range.start]),
        DiffSpan::new(SpanKind::Insert, &line[range.clone()]),
        DiffSpan::new(SpanKind::Equal, &line[range.end..]),
    ]
    .into_iter()
    .filter(|span| !span.text.is_empty())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Pattern;

    #[test]
    fn full_rewrite_is_delete_then_insert() {
        assert_eq!(
            line_diff("foo", "BAR"),
            vec![
                DiffSpan::new(SpanKind::Delete, "foo"),
                DiffSpan::new(SpanKind::Insert, "BAR"),
            ]
        );
    }

    #[test]
    fn shared_prefix_stays_equal() {
        let spans = line_diff("count = 5", "count = 6");
        assert_eq!(spans[0], DiffSpan::new(SpanKind::Equal, "count = "));
        let deleted: String = spans
            .iter()
            .filter(|s| s.kind != SpanKind::Insert)
            .map(|s| s.text.as_str())
            .collect();
        let inserted: String = spans
            .iter()
            .filter(|s| s.kind != SpanKind::Delete)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(deleted, "count = 5");
        assert_eq!(inserted, "count = 6");
    }

    #[test]
    fn match_spans_drop_empty_context() {
        let pattern = Pattern::new("x").unwrap();
        let found = pattern.find("x=1").unwrap();
        assert_eq!(
            match_spans("x=1", &found),
            vec![
                DiffSpan::new(SpanKind::Insert, "x"),
                DiffSpan::new(SpanKind::Equal, "=1"),
            ]
        );
    }
}
