//! Top-level review session: the Preview/Apply state machine.
//!
//! A session starts in Apply mode when a substitution was supplied and in
//! Preview mode otherwise. The change list is rebuilt from disk at every mode
//! transition and after every commit, carrying the viewport geometry across.

use std::path::PathBuf;

use tracing::info;

use crate::change_list::{ChangeList, CommitReport};
use crate::error::ReviewError;
use crate::file_change::Scan;
use crate::matcher::Pattern;
use crate::substitution::{MalformedPolicy, Substitution};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Changes are informational; nothing can be committed.
    Preview,
    /// Changes carry replacement text and can be committed.
    Apply,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    fn signed(self, rows: usize) -> isize {
        match self {
            Direction::Up => -(rows as isize),
            Direction::Down => rows as isize,
        }
    }
}

/// Logical operator inputs, independent of key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Move the cursor (or scroll the focused preview) by a number of rows.
    Move(isize),
    HalfPage(Direction),
    Page(Direction),
    /// Jump to the header of the adjacent file.
    File(Direction),
    Top,
    Bottom,
    FocusList,
    FocusPreview,
    ToggleFocus,
    ToggleItem,
    Commit,
    ToggleMode,
    ToggleBanner,
    OpenEditor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The operator quit; nothing was written by this action.
    Quit,
    /// A rescan found no remaining changes.
    NothingLeft,
    /// Commit pressed in Preview mode.
    PreviewCommitted,
    /// Commit in Apply mode with review of the result skipped.
    Committed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// The change list was rebuilt; the front end should redraw everything.
    Rebuilt,
    /// Open this file in the external editor, then redraw.
    OpenEditor(PathBuf),
    Exit(ExitReason),
}

/// Inputs fixed for the lifetime of a session.
#[derive(Debug, Clone)]
pub struct SessionArgs {
    pub pattern: Pattern,
    pub substitution: Option<Substitution>,
    pub filenames: Vec<PathBuf>,
    pub banner_title: String,
    pub banner_message: String,
    pub policy: MalformedPolicy,
    /// Exit after an Apply-mode commit instead of reviewing the result.
    pub skip_review: bool,
}

#[derive(Debug)]
pub struct Session {
    args: SessionArgs,
    mode: Mode,
    changes: ChangeList,
    show_banner: bool,
    last_commit: Option<CommitReport>,
}

impl Session {
    /// Scans the files for the first time.
    ///
    /// Returns `Ok(None)` when nothing matched, in which case there is nothing to
    /// review.
    ///
    /// # Errors
    ///
    /// Any [`ReviewError`] from the scan; all of them are fatal at startup.
    pub fn start(args: SessionArgs) -> Result<Option<Self>, ReviewError> {
        let mode = if args.substitution.is_some() {
            Mode::Apply
        } else {
            Mode::Preview
        };
        let Some(changes) = scan(&args, mode)? else {
            return Ok(None);
        };
        Ok(Some(Self {
            args,
            mode,
            changes,
            show_banner: false,
            last_commit: None,
        }))
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn changes(&self) -> &ChangeList {
        &self.changes
    }

    pub fn changes_mut(&mut self) -> &mut ChangeList {
        &mut self.changes
    }

    pub fn substitution(&self) -> Option<&Substitution> {
        self.args.substitution.as_ref()
    }

    pub fn has_banner(&self) -> bool {
        !self.args.banner_message.is_empty()
    }

    pub fn show_banner(&self) -> bool {
        self.show_banner
    }

    pub fn banner_title(&self) -> &str {
        &self.args.banner_title
    }

    pub fn banner_message(&self) -> &str {
        &self.args.banner_message
    }

    /// Report of the most recent Apply-mode commit.
    pub fn last_commit(&self) -> Option<&CommitReport> {
        self.last_commit.as_ref()
    }

    /// Applies one operator input.
    ///
    /// Quit, banner, commit and mode toggles act even while the banner is shown;
    /// everything else is ignored until it is dismissed.
    ///
    /// # Errors
    ///
    /// Commit and rescan failures. They are fatal; the caller should end the session.
    pub fn handle(&mut self, action: Action) -> Result<Outcome, ReviewError> {
        let list = &mut self.changes;
        match action {
            Action::Quit => return Ok(Outcome::Exit(ExitReason::Quit)),
            Action::ToggleBanner => {
                if self.has_banner() {
                    self.show_banner = !self.show_banner;
                }
            }
            Action::Commit => return self.commit(),
            Action::ToggleMode => return self.toggle_mode(),
            _ if self.show_banner => {}
            Action::OpenEditor => {
                return Ok(Outcome::OpenEditor(list.selected_file().path().to_path_buf()));
            }
            Action::Move(rows) => list.move_cursor(rows),
            Action::HalfPage(dir) => {
                let rows = (active_height(list) / 2).max(1);
                list.move_cursor(dir.signed(rows));
            }
            Action::Page(dir) => {
                let rows = active_height(list).max(1);
                list.move_cursor(dir.signed(rows));
            }
            Action::File(dir) => list.move_one_file(dir == Direction::Up),
            Action::Top => {
                let rows = list.total_rows();
                list.move_cursor(Direction::Up.signed(rows));
            }
            Action::Bottom => {
                let rows = list.total_rows();
                list.move_cursor(Direction::Down.signed(rows));
            }
            Action::FocusList => list.set_pager_focused(false),
            Action::FocusPreview => list.set_pager_focused(true),
            Action::ToggleFocus => {
                let focused = list.pager_focused();
                list.set_pager_focused(!focused);
            }
            Action::ToggleItem => list.toggle_focused(),
        }
        Ok(Outcome::Continue)
    }

    /// Rescans the files in the current mode, for example after they were edited
    /// outside the session. Enabled state and cursor position are reset.
    ///
    /// # Errors
    ///
    /// Any [`ReviewError`] from the rescan.
    pub fn refresh(&mut self) -> Result<Outcome, ReviewError> {
        self.rebuild(self.mode)
    }

    fn commit(&mut self) -> Result<Outcome, ReviewError> {
        if self.mode == Mode::Preview {
            return Ok(Outcome::Exit(ExitReason::PreviewCommitted));
        }

        let report = self.changes.commit()?;
        self.last_commit = Some(report);

        if self.args.skip_review {
            return Ok(Outcome::Exit(ExitReason::Committed));
        }
        self.rebuild(Mode::Preview)
    }

    fn toggle_mode(&mut self) -> Result<Outcome, ReviewError> {
        let target = match self.mode {
            Mode::Apply => Mode::Preview,
            Mode::Preview if self.args.substitution.is_some() => Mode::Apply,
            Mode::Preview => Mode::Preview,
        };
        self.rebuild(target)
    }

    /// Rescans every file in `mode`, replacing the change list in place.
    fn rebuild(&mut self, mode: Mode) -> Result<Outcome, ReviewError> {
        let Some(mut rebuilt) = scan(&self.args, mode)? else {
            info!(?mode, "no changes left after rescan");
            return Ok(Outcome::Exit(ExitReason::NothingLeft));
        };
        rebuilt.set_viewport(self.changes.list_height(), self.changes.preview_height());

        info!(from = ?self.mode, to = ?mode, changes = rebuilt.change_count(), "rebuilt change list");
        self.changes = rebuilt;
        self.mode = mode;
        Ok(Outcome::Rebuilt)
    }
}

/// Height of whichever pane receives vertical motion.
fn active_height(list: &ChangeList) -> usize {
    if list.pager_focused() {
        list.preview_height()
    } else {
        list.list_height()
    }
}

/// The rebuild function: a fresh change list for `mode` from the files on disk.
fn scan(args: &SessionArgs, mode: Mode) -> Result<Option<ChangeList>, ReviewError> {
    let substitution = match mode {
        Mode::Apply => args.substitution.as_ref(),
        Mode::Preview => None,
    };
    let scan = Scan {
        pattern: &args.pattern,
        substitution,
        policy: args.policy,
    };
    ChangeList::scan(&scan, &args.filenames)
}
