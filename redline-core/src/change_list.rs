//! Cross-file change list: unified cursor, list viewport, and preview pane state.
//!
//! The list is a two-level address space. Each file contributes its header row
//! and one row per change, and the renderer puts one blank row between files.
//! Cursor motion is delegated to the selected [`FileChange`]; rows that run past
//! its bounds are carried into the neighbouring file until they are used up or
//! the list ends.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::ReviewError;
use crate::file_change::{CommitOutcome, CursorMove, FileChange, Scan};
use crate::line_change::LineChange;

/// Position of the cursor: which file, and which item inside it (0 is the header).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemAddress {
    pub file_index: usize,
    pub local_index: usize,
}

/// Files written by a commit, with the number of lines replaced in each.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReport {
    pub written: Vec<(PathBuf, usize)>,
    pub unchanged: usize,
}

impl CommitReport {
    pub fn lines_written(&self) -> usize {
        self.written.iter().map(|(_, lines)| lines).sum()
    }
}

#[derive(Debug, Clone)]
pub struct ChangeList {
    files: Vec<FileChange>,
    selected: usize,
    /// First visible row of the change list.
    list_scroll: usize,
    /// First visible row of the preview pane.
    preview_scroll: usize,
    list_height: usize,
    preview_height: usize,
    /// When set, vertical motion scrolls the preview instead of moving the cursor.
    pager_focused: bool,
}

impl ChangeList {
    /// Scans every path in order and keeps the files that produced changes.
    ///
    /// Returns `Ok(None)` when no file has a change.
    ///
    /// # Errors
    ///
    /// The first [`ReviewError`] from [`FileChange::scan`]; a missing or unreadable
    /// file fails the whole scan rather than being skipped.
    pub fn scan<P: AsRef<Path>>(scan: &Scan<'_>, paths: &[P]) -> Result<Option<Self>, ReviewError> {
        info!(
            pattern = scan.pattern.as_str(),
            files = paths.len(),
            apply = scan.substitution.is_some(),
            "scanning"
        );

        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            match FileChange::scan(path, scan)? {
                Some(file) => files.push(file),
                None => debug!(path = %path.display(), "no changes, dropped from list"),
            }
        }

        Ok(Self::from_files(files))
    }

    /// Builds a list from already scanned files; `None` when `files` is empty.
    pub fn from_files(files: Vec<FileChange>) -> Option<Self> {
        if files.is_empty() {
            return None;
        }
        Some(Self {
            files,
            selected: 0,
            list_scroll: 0,
            preview_scroll: 0,
            list_height: 0,
            preview_height: 0,
            pager_focused: false,
        })
    }

    pub fn files(&self) -> &[FileChange] {
        &self.files
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_file(&self) -> &FileChange {
        &self.files[self.selected]
    }

    pub fn address(&self) -> ItemAddress {
        ItemAddress {
            file_index: self.selected,
            local_index: self.selected_file().cursor(),
        }
    }

    /// The change under the cursor, `None` when a file header is focused.
    pub fn focused_change(&self) -> Option<&LineChange> {
        self.selected_file().focused_change()
    }

    pub fn change_count(&self) -> usize {
        self.files.iter().map(|f| f.changes().len()).sum()
    }

    pub fn enabled_count(&self) -> usize {
        self.files.iter().map(FileChange::enabled_count).sum()
    }

    pub fn pager_focused(&self) -> bool {
        self.pager_focused
    }

    pub fn set_pager_focused(&mut self, focused: bool) {
        self.pager_focused = focused;
    }

    pub fn list_scroll(&self) -> usize {
        self.list_scroll
    }

    pub fn preview_scroll(&self) -> usize {
        self.preview_scroll
    }

    pub fn list_height(&self) -> usize {
        self.list_height
    }

    pub fn preview_height(&self) -> usize {
        self.preview_height
    }

    /// Records the visible heights of both panes and reconciles the list scroll.
    pub fn set_viewport(&mut self, list_height: usize, preview_height: usize) {
        self.list_height = list_height;
        self.preview_height = preview_height;
        self.update_viewport();
    }

    /// Row of the cursor in the flattened list, counting one separator row
    /// between files.
    pub fn cursor_row(&self) -> usize {
        let before: usize = self.files[..self.selected]
            .iter()
            .map(|f| f.height() + 1)
            .sum();
        before + self.selected_file().cursor()
    }

    /// Total rows of the flattened list.
    pub fn total_rows(&self) -> usize {
        let rows: usize = self.files.iter().map(FileChange::height).sum();
        rows + self.files.len() - 1
    }

    /// Moves the cursor by `delta` rows across file boundaries.
    ///
    /// With the preview pane focused only the preview scrolls. Otherwise the
    /// cursor stops at the head of the first file or the tail of the last one,
    /// resetting the preview scroll; when it settles on a change the preview is
    /// centred on that change.
    pub fn move_cursor(&mut self, delta: isize) {
        if self.pager_focused {
            self.scroll_preview(delta);
            return;
        }

        let mut step = self.files[self.selected].move_cursor(delta);
        loop {
            match step {
                CursorMove::Moved => break,
                CursorMove::PastHead(rows) => {
                    if self.selected == 0 {
                        self.files[0].move_cursor_to_head();
                        self.preview_scroll = 0;
                        self.update_viewport();
                        return;
                    }
                    self.selected -= 1;
                    debug!(file = self.selected, rows, "cursor entered file from below");
                    step = self.files[self.selected].enter_from_tail(rows);
                }
                CursorMove::PastTail(rows) => {
                    if self.selected + 1 == self.files.len() {
                        self.files[self.selected].move_cursor_to_tail();
                        self.preview_scroll = 0;
                        self.update_viewport();
                        return;
                    }
                    self.selected += 1;
                    debug!(file = self.selected, rows, "cursor entered file from above");
                    step = self.files[self.selected].enter_from_head(rows);
                }
            }
        }

        if let Some(change) = self.focused_change() {
            self.preview_scroll = change.preview_row.saturating_sub(self.preview_height / 2);
        }
        self.update_viewport();
    }

    /// Jumps to the header of the previous (`up`) or next file.
    ///
    /// Does nothing at the ends of the list or while the preview is focused.
    pub fn move_one_file(&mut self, up: bool) {
        if self.pager_focused {
            return;
        }
        let target = if up {
            self.selected.checked_sub(1)
        } else {
            Some(self.selected + 1).filter(|&idx| idx < self.files.len())
        };
        let Some(target) = target else {
            return;
        };

        self.selected = target;
        self.files[target].move_cursor_to_head();
        self.preview_scroll = 0;
        self.update_viewport();
    }

    /// Scrolls the preview pane by `delta` rows, clamped to the selected file's rows.
    pub fn scroll_preview(&mut self, delta: isize) {
        let max = self.selected_file().preview().len().saturating_sub(1);
        let target = self.preview_scroll as isize + delta;
        self.preview_scroll = target.clamp(0, max as isize) as usize;
    }

    /// Scrolls the list by the least amount that keeps the cursor row visible.
    pub fn update_viewport(&mut self) {
        let height = self.list_height.max(1);
        let row = self.cursor_row();

        if row >= self.list_scroll + height {
            self.list_scroll = row + 1 - height;
        } else if row < self.list_scroll {
            self.list_scroll = row;
        }
    }

    /// Toggles the focused item (a file header toggles the whole file).
    pub fn toggle_focused(&mut self) {
        self.files[self.selected].toggle_focused();
    }

    /// Enables or disables the item at `address`; out-of-range addresses are ignored.
    pub fn toggle_at(&mut self, address: ItemAddress) {
        if let Some(file) = self.files.get_mut(address.file_index) {
            file.toggle(address.local_index);
        }
    }

    /// Commits every file in list order.
    ///
    /// Not atomic across files: on failure the files before the failing one stay
    /// written.
    ///
    /// # Errors
    ///
    /// The first [`ReviewError::CommitWrite`].
    pub fn commit(&mut self) -> Result<CommitReport, ReviewError> {
        let mut report = CommitReport::default();
        for file in &mut self.files {
            match file.commit()? {
                CommitOutcome::Unchanged => report.unchanged += 1,
                CommitOutcome::Written { lines } => {
                    report.written.push((file.path().to_path_buf(), lines));
                }
            }
        }
        info!(
            files = report.written.len(),
            lines = report.lines_written(),
            "commit finished"
        );
        Ok(report)
    }
}
