//! Central application state for redline.
//!
//! The review engine lives in [`Session`]; this module adds the state that only
//! the terminal front end cares about: the help overlay, the status notice, the
//! panel rects of the last frame, and rendering preferences. No ratatui
//! rendering logic lives here.

use ratatui::layout::Rect;
use redline_core::{Action, CommitReport, Outcome, ReviewError, Session};

use crate::ui::keybindings::Command;

pub struct AppState {
    pub session: Session,

    /// Full-screen help overlay is shown above all panels.
    pub help_open: bool,
    /// Vertical scroll offset of the help overlay; clamped by the renderer.
    pub help_scroll: u16,

    /// One-line message shown in the status bar until the next session action.
    pub notice: Option<String>,

    /// Outer rects of the change list and preview panels, cached after each
    /// render for mouse hit-testing.
    pub panel_rects: [Rect; 2],

    /// Highlight preview context rows with syntect.
    pub syntax_highlight: bool,
}

impl AppState {
    pub fn new(session: Session, syntax_highlight: bool) -> Self {
        Self {
            session,
            help_open: false,
            help_scroll: 0,
            notice: None,
            panel_rects: [Rect::default(); 2],
            syntax_highlight,
        }
    }

    /// Applies one command from the keybinding layer.
    ///
    /// # Errors
    ///
    /// Propagates fatal session errors (commit or rescan failures).
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome, ReviewError> {
        match command {
            Command::ToggleHelp => {
                self.help_open = !self.help_open;
                self.help_scroll = 0;
                Ok(Outcome::Continue)
            }
            Command::ScrollHelp(delta) => {
                self.scroll_help(delta);
                Ok(Outcome::Continue)
            }
            Command::Session(action) => {
                self.notice = None;
                let outcome = self.session.handle(action)?;
                if action == Action::Commit && outcome == Outcome::Rebuilt {
                    self.notice = self.session.last_commit().map(commit_summary);
                }
                Ok(outcome)
            }
        }
    }

    fn scroll_help(&mut self, delta: isize) {
        let rows = u16::try_from(delta.unsigned_abs()).unwrap_or(u16::MAX);
        self.help_scroll = if delta < 0 {
            self.help_scroll.saturating_sub(rows)
        } else {
            self.help_scroll.saturating_add(rows)
        };
    }
}

/// Human summary of a commit, used for the status notice and the exit line.
pub fn commit_summary(report: &CommitReport) -> String {
    let files = report.written.len();
    let lines = report.lines_written();
    let summary = match (lines, files) {
        (0, _) => "Nothing written".to_owned(),
        (1, _) => "Replaced 1 line in 1 file".to_owned(),
        (_, 1) => format!("Replaced {lines} lines in 1 file"),
        _ => format!("Replaced {lines} lines in {files} files"),
    };
    match report.unchanged {
        0 => summary,
        1 => format!("{summary}, 1 file left as is"),
        n => format!("{summary}, {n} files left as is"),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use redline_core::{MalformedPolicy, Pattern, SessionArgs, Substitution};

    use super::*;

    fn app(dir: &tempfile::TempDir, content: &str) -> AppState {
        let path = dir.path().join("a.txt");
        std::fs::write(&path, content).unwrap();
        let args = SessionArgs {
            pattern: Pattern::new(r"\d+").unwrap(),
            substitution: Some(Substitution::parse("$$++")),
            filenames: vec![path],
            banner_title: String::new(),
            banner_message: String::new(),
            policy: MalformedPolicy::Abort,
            skip_review: false,
        };
        AppState::new(Session::start(args).unwrap().unwrap(), false)
    }

    #[test]
    fn help_scroll_saturates_and_resets() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = app(&dir, "1\n");

        state.dispatch(Command::ToggleHelp).unwrap();
        assert!(state.help_open);
        state.dispatch(Command::ScrollHelp(-5)).unwrap();
        assert_eq!(state.help_scroll, 0);
        state.dispatch(Command::ScrollHelp(isize::MAX)).unwrap();
        assert_eq!(state.help_scroll, u16::MAX);

        state.dispatch(Command::ToggleHelp).unwrap();
        assert!(!state.help_open);
        assert_eq!(state.help_scroll, 0);
    }

    #[test]
    fn commit_leaves_a_notice_until_the_next_action() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = app(&dir, "1\n2\n");

        let outcome = state.dispatch(Command::Session(Action::Commit)).unwrap();
        assert_eq!(outcome, Outcome::Rebuilt);
        assert_eq!(state.notice.as_deref(), Some("Replaced 2 lines in 1 file"));

        state.dispatch(Command::Session(Action::Move(1))).unwrap();
        assert_eq!(state.notice, None);
    }

    #[test]
    fn summary_wording() {
        let report = CommitReport {
            written: vec![(PathBuf::from("a"), 3), (PathBuf::from("b"), 1)],
            unchanged: 0,
        };
        assert_eq!(commit_summary(&report), "Replaced 4 lines in 2 files");
        assert_eq!(commit_summary(&CommitReport::default()), "Nothing written");

        let report = CommitReport {
            written: vec![(PathBuf::from("a"), 1)],
            unchanged: 2,
        };
        assert_eq!(
            commit_summary(&report),
            "Replaced 1 line in 1 file, 2 files left as is"
        );
    }

    #[test]
    fn commit_notice_counts_files_with_everything_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, "1\n").unwrap();
        std::fs::write(&b, "2\n").unwrap();
        let args = SessionArgs {
            pattern: Pattern::new(r"\d+").unwrap(),
            substitution: Some(Substitution::parse("$$++")),
            filenames: vec![a, b.clone()],
            banner_title: String::new(),
            banner_message: String::new(),
            policy: MalformedPolicy::Abort,
            skip_review: false,
        };
        let mut state = AppState::new(Session::start(args).unwrap().unwrap(), false);

        // Past a's only change onto b's header.
        state.dispatch(Command::Session(Action::Move(2))).unwrap();
        state.dispatch(Command::Session(Action::ToggleItem)).unwrap();
        state.dispatch(Command::Session(Action::Commit)).unwrap();

        assert_eq!(
            state.notice.as_deref(),
            Some("Replaced 1 line in 1 file, 1 file left as is")
        );
        assert_eq!(std::fs::read_to_string(&b).unwrap(), "2\n");
    }
}
