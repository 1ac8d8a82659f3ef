//! Scan result for one file: its lines, its changes, and its preview.
//!
//! A `FileChange` exists only for files with at least one change. It owns the
//! local cursor (0 is the file header, `1..=N` are its changes) and writes its
//! accepted replacements back to disk.

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::diff::{line_diff, match_spans, DiffSpan};
use crate::error::ReviewError;
use crate::line_change::LineChange;
use crate::matcher::Pattern;
use crate::substitution::{MalformedPolicy, Substitution};

/// Everything a scan needs besides the file itself.
#[derive(Debug, Clone, Copy)]
pub struct Scan<'a> {
    pub pattern: &'a Pattern,
    /// `None` scans in preview mode.
    pub substitution: Option<&'a Substitution>,
    pub policy: MalformedPolicy,
}

/// One row of the flattened whole-file preview.
///
/// Rows tied to a change carry its index so the renderer can look up its
/// enabled state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewRow {
    /// A line with no change.
    Context(String),
    /// A preview-mode match.
    Matched { change: usize, spans: Vec<DiffSpan> },
    /// The original text of a replaced line.
    Removed { change: usize, text: String },
    /// The replacement text of a replaced line.
    Added { change: usize, text: String },
}

impl PreviewRow {
    pub fn change(&self) -> Option<usize> {
        match self {
            PreviewRow::Context(_) => None,
            PreviewRow::Matched { change, .. }
            | PreviewRow::Removed { change, .. }
            | PreviewRow::Added { change, .. } => Some(*change),
        }
    }
}

/// Result of moving a file's local cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    /// The cursor stayed inside the file.
    Moved,
    /// The move ran past the header; the payload is the rows still to travel upward.
    PastHead(usize),
    /// The move ran past the last change; the payload is the rows still to travel downward.
    PastTail(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// No enabled replacement; the file was not touched.
    Unchanged,
    Written { lines: usize },
}

#[derive(Debug, Clone)]
pub struct FileChange {
    path: PathBuf,
    /// Line text with any `\r` before the `\n` removed.
    lines: Vec<String>,
    /// Per line: whether it ended in `\r\n`.
    crlf: Vec<bool>,
    changes: Vec<LineChange>,
    preview: Vec<PreviewRow>,
    cursor: usize,
}

impl FileChange {
    /// Opens `path` read/write and scans it.
    ///
    /// Returns `Ok(None)` when no line produced a change.
    ///
    /// # Errors
    ///
    /// - [`ReviewError::FileOpen`] if the file cannot be opened for reading and
    ///   writing or is not valid UTF-8.
    /// - [`ReviewError::MalformedOperatorInput`] under [`MalformedPolicy::Abort`].
    pub fn scan(path: &Path, scan: &Scan<'_>) -> Result<Option<Self>, ReviewError> {
        let content = read_for_review(path)?;
        Self::from_content(path, &content, scan)
    }

    /// Scans in-memory `content` as if it were the contents of `path`.
    pub fn from_content(
        path: impl Into<PathBuf>,
        content: &str,
        scan: &Scan<'_>,
    ) -> Result<Option<Self>, ReviewError> {
        let path = path.into();
        let (lines, crlf) = split_lines(content);

        // The empty element after a trailing newline is not a line of the file.
        let scanned = match lines.last() {
            Some(last) if last.is_empty() => lines.len() - 1,
            _ => lines.len(),
        };

        let mut changes = Vec::new();
        let mut preview = Vec::with_capacity(scanned);

        for (idx, line) in lines[..scanned].iter().enumerate() {
            let Some(found) = scan.pattern.find(line) else {
                preview.push(PreviewRow::Context(line.clone()));
                continue;
            };

            let change = changes.len();
            let preview_row = preview.len();

            let Some(substitution) = scan.substitution else {
                let spans = match_spans(line, &found);
                preview.push(PreviewRow::Matched {
                    change,
                    spans: spans.clone(),
                });
                changes.push(LineChange {
                    line_number: idx + 1,
                    original: line.clone(),
                    replacement: None,
                    spans,
                    preview_row,
                    enabled: true,
                });
                continue;
            };

            let replaced = match substitution.apply(scan.pattern, line) {
                Ok(replaced) => replaced,
                Err(err) if err.is_malformed_input() && scan.policy == MalformedPolicy::Skip => {
                    warn!(path = %path.display(), line = idx + 1, %err, "skipping line");
                    preview.push(PreviewRow::Context(line.clone()));
                    continue;
                }
                Err(err) => return Err(err),
            };

            // A no-op substitution is invisible: no change and no preview row.
            if replaced == *line {
                continue;
            }

            preview.push(PreviewRow::Removed {
                change,
                text: line.clone(),
            });
            preview.push(PreviewRow::Added {
                change,
                text: replaced.clone(),
            });
            changes.push(LineChange {
                line_number: idx + 1,
                original: line.clone(),
                spans: line_diff(line, &replaced),
                replacement: Some(replaced),
                preview_row,
                enabled: true,
            });
        }

        debug!(path = %path.display(), changes = changes.len(), "scanned file");

        if changes.is_empty() {
            return Ok(None);
        }

        Ok(Some(Self {
            path,
            lines,
            crlf,
            changes,
            preview,
            cursor: 0,
        }))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn changes(&self) -> &[LineChange] {
        &self.changes
    }

    pub fn preview(&self) -> &[PreviewRow] {
        &self.preview
    }

    /// The file contents as they would be written now.
    pub fn contents(&self) -> String {
        let mut out = String::new();
        for (idx, line) in self.lines.iter().enumerate() {
            if idx > 0 {
                out.push_str(if self.crlf[idx - 1] { "\r\n" } else { "\n" });
            }
            out.push_str(line);
        }
        out
    }

    /// Rows this file occupies in the change list: the header plus one per change.
    pub fn height(&self) -> usize {
        1 + self.changes.len()
    }

    /// Local cursor: 0 is the header, `k` is the `k`-th change.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor by `delta` rows, stopping at the file's bounds.
    ///
    /// When the move leaves the file, the cursor rests on the boundary item and
    /// the rows not yet travelled are returned so the caller can carry them into
    /// the neighbouring file.
    pub fn move_cursor(&mut self, delta: isize) -> CursorMove {
        let last = self.changes.len() as isize;
        let target = self.cursor as isize + delta;

        if target < 0 {
            self.cursor = 0;
            CursorMove::PastHead(target.unsigned_abs())
        } else if target > last {
            self.cursor = self.changes.len();
            CursorMove::PastTail((target - last) as usize)
        } else {
            self.cursor = target as usize;
            CursorMove::Moved
        }
    }

    /// Enters the file from above with `rows` left to travel; the first row lands
    /// on the header.
    pub fn enter_from_head(&mut self, rows: usize) -> CursorMove {
        self.cursor = 0;
        self.move_cursor(rows as isize - 1)
    }

    /// Enters the file from below with `rows` left to travel; the first row lands
    /// on the last change.
    pub fn enter_from_tail(&mut self, rows: usize) -> CursorMove {
        self.cursor = self.changes.len();
        self.move_cursor(1 - rows as isize)
    }

    pub fn move_cursor_to_head(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_to_tail(&mut self) {
        self.cursor = self.changes.len();
    }

    /// Index into [`Self::changes`] of the focused change, `None` on the header.
    pub fn focused_index(&self) -> Option<usize> {
        self.cursor.checked_sub(1)
    }

    pub fn focused_change(&self) -> Option<&LineChange> {
        self.focused_index().and_then(|idx| self.changes.get(idx))
    }

    /// Enabled state of a list item; the header counts as enabled while any of
    /// its changes is.
    pub fn is_item_enabled(&self, item: usize) -> bool {
        match item {
            0 => self.changes.iter().any(|c| c.enabled),
            k => self.changes.get(k - 1).is_some_and(|c| c.enabled),
        }
    }

    pub fn all_enabled(&self) -> bool {
        self.changes.iter().all(|c| c.enabled)
    }

    pub fn enabled_count(&self) -> usize {
        self.changes.iter().filter(|c| c.enabled).count()
    }

    pub fn set_all_enabled(&mut self, enabled: bool) {
        for change in &mut self.changes {
            change.enabled = enabled;
        }
    }

    /// Toggles a list item. The header disables every change when all are
    /// enabled and enables every change otherwise.
    ///
    /// In a mixed state the header is drawn checked (see
    /// [`Self::is_item_enabled`]) and stays checked after the press, since the
    /// press enables the rest.
    pub fn toggle(&mut self, item: usize) {
        match item {
            0 => {
                let enable = !self.all_enabled();
                self.set_all_enabled(enable);
            }
            k => {
                if let Some(change) = self.changes.get_mut(k - 1) {
                    change.enabled = !change.enabled;
                }
            }
        }
    }

    pub fn toggle_focused(&mut self) {
        self.toggle(self.cursor);
    }

    /// Writes enabled replacements back to disk.
    ///
    /// The file is left untouched when no enabled change carries a replacement.
    /// Otherwise it is truncated and rewritten in full; a failure part way through
    /// can leave it partially written.
    ///
    /// # Errors
    ///
    /// [`ReviewError::CommitWrite`] if the file cannot be opened, truncated, or written.
    pub fn commit(&mut self) -> Result<CommitOutcome, ReviewError> {
        let mut replaced = 0;
        for change in self.changes.iter().filter(|c| c.is_committable()) {
            if let Some(replacement) = &change.replacement {
                self.lines[change.line_number - 1] = replacement.clone();
                replaced += 1;
            }
        }

        if replaced == 0 {
            return Ok(CommitOutcome::Unchanged);
        }

        let write_err = |source| ReviewError::CommitWrite {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map_err(write_err)?;
        file.write_all(self.contents().as_bytes())
            .and_then(|()| file.flush())
            .map_err(write_err)?;

        info!(path = %self.path.display(), lines = replaced, "committed file");
        Ok(CommitOutcome::Written { lines: replaced })
    }
}

/// Splits on `\n`, stripping the `\r` of a `\r\n` ending and recording it per
/// line. The text after the last `\n` is kept as is.
fn split_lines(content: &str) -> (Vec<String>, Vec<bool>) {
    let mut lines = Vec::new();
    let mut crlf = Vec::new();
    let mut rest = content;
    while let Some(end) = rest.find('\n') {
        let line = &rest[..end];
        match line.strip_suffix('\r') {
            Some(stripped) => {
                lines.push(stripped.to_owned());
                crlf.push(true);
            }
            None => {
                lines.push(line.to_owned());
                crlf.push(false);
            }
        }
        rest = &rest[end + 1..];
    }
    lines.push(rest.to_owned());
    crlf.push(false);
    (lines, crlf)
}

fn read_for_review(path: &Path) -> Result<String, ReviewError> {
    let open_err = |source| ReviewError::FileOpen {
        path: path.to_path_buf(),
        source,
    };
    let mut file: File = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(open_err)?;
    let mut content = String::new();
    file.read_to_string(&mut content).map_err(open_err)?;
    Ok(content)
}
