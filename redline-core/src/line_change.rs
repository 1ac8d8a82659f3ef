//! One matched line awaiting review.

use crate::diff::DiffSpan;

/// A proposed edit for a single line.
///
/// `original` is never mutated; toggling only flips `enabled`, so a disabled
/// change is fully reversible until its file is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineChange {
    /// 1-based line number in the file.
    pub line_number: usize,
    pub original: String,
    /// `None` in preview mode, where there is nothing to write.
    pub replacement: Option<String>,
    pub spans: Vec<DiffSpan>,
    /// Index of this change's first row in the file's preview.
    pub preview_row: usize,
    pub enabled: bool,
}

impl LineChange {
    /// True when committing this change would write something.
    pub fn is_committable(&self) -> bool {
        self.enabled && self.replacement.is_some()
    }

    pub fn is_preview_only(&self) -> bool {
        self.replacement.is_none()
    }
}
