//! UI rendering module for redline.
//!
//! `render()` is the single entry point called by the event loop's
//! `terminal.draw()` closure. Layout arithmetic lives in `layout.rs`, the two
//! panels in `change_list_view.rs` and `preview.rs`, the modals in `overlay.rs`.

mod change_list_view;
mod highlight;
mod layout;
mod overlay;
mod preview;
pub mod keybindings;

use ratatui::Frame;

use crate::app::AppState;
use crate::theme::Theme;
use layout::{compute_layout, inner_rect, render_status_bar};

/// Renders one complete frame.
///
/// Panel heights are written back into the change list before anything is
/// drawn, so the engine's scroll offsets match this frame's geometry and the
/// next keypress pages by the right distance.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let [list, preview, status_bar] = compute_layout(frame.area());

    state.session.changes_mut().set_viewport(
        usize::from(inner_rect(list).height),
        usize::from(inner_rect(preview).height),
    );
    state.panel_rects = [list, preview];

    change_list_view::render_change_list(frame, list, state, theme);
    preview::render_preview(frame, preview, state, theme);
    render_status_bar(frame, status_bar, state, theme);

    if state.session.show_banner() {
        overlay::render_banner(
            frame,
            theme,
            state.session.banner_title(),
            state.session.banner_message(),
        );
    }
    if state.help_open {
        overlay::render_help_overlay(frame, theme, &mut state.help_scroll);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use redline_core::{Action, MalformedPolicy, Pattern, Session, SessionArgs, Substitution};

    use super::*;

    fn state(dir: &tempfile::TempDir, subst: Option<&str>) -> AppState {
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, "one foo\ntwo\nthree foo\n").unwrap();
        std::fs::write(&b, "foo\n").unwrap();
        let args = SessionArgs {
            pattern: Pattern::new("foo").unwrap(),
            substitution: subst.map(Substitution::parse),
            filenames: vec![a, b],
            banner_title: "Note".into(),
            banner_message: "Renaming foo".into(),
            policy: MalformedPolicy::Abort,
            skip_review: false,
        };
        AppState::new(Session::start(args).unwrap().unwrap(), false)
    }

    fn draw(state: &mut AppState, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let theme = Theme::dark();
        terminal.draw(|frame| render(frame, state, &theme)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    fn screen(buffer: &Buffer) -> String {
        (0..buffer.area.height)
            .map(|y| row_text(buffer, y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn render_caches_panel_geometry() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state(&dir, Some("bar"));
        draw(&mut state, 100, 20);

        let changes = state.session.changes();
        // 19 rows above the status bar, minus two border rows.
        assert_eq!(changes.list_height(), 17);
        assert_eq!(changes.preview_height(), 17);
        assert!(state.panel_rects[0].width > 0);
        assert!(state.panel_rects[1].x > state.panel_rects[0].x);
    }

    #[test]
    fn apply_mode_shows_toggles_and_both_sides_of_a_change() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state(&dir, Some("bar"));
        state.session.handle(Action::Move(1)).unwrap();
        state.session.handle(Action::ToggleItem).unwrap();
        let screen = screen(&draw(&mut state, 100, 20));

        assert!(screen.contains("[ ] 1 one foobar"), "{screen}");
        assert!(screen.contains("[x] 3 three foobar"), "{screen}");
        assert!(screen.contains("- one foo"), "{screen}");
        assert!(screen.contains("+ one bar"), "{screen}");
        assert!(screen.contains("APPLY"), "{screen}");
        assert!(screen.contains("2/3 changes in 2 files"), "{screen}");
    }

    #[test]
    fn preview_mode_marks_matches_without_toggles() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state(&dir, None);
        let screen = screen(&draw(&mut state, 100, 20));

        assert!(screen.contains("> one foo"), "{screen}");
        assert!(screen.contains("  two"), "{screen}");
        assert!(!screen.contains("[x]"), "{screen}");
        assert!(screen.contains("PREVIEW"), "{screen}");
    }

    #[test]
    fn overlays_draw_on_top() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state(&dir, None);
        state.session.handle(Action::ToggleBanner).unwrap();
        let screen = screen(&draw(&mut state, 100, 24));
        assert!(screen.contains("Renaming foo"), "{screen}");

        state.help_open = true;
        state.help_scroll = u16::MAX;
        let screen = self::screen(&draw(&mut state, 100, 24));
        assert!(screen.contains("Help"), "{screen}");
        assert!(state.help_scroll < u16::MAX, "scroll is clamped to the text");
    }
}
