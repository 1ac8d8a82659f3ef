//! Keybinding dispatcher for redline.
//!
//! Translates raw crossterm key and mouse events into [`Command`]s. Most keys map
//! onto a session [`Action`]; the help overlay is purely a front-end concern and
//! has its own commands. The mapping is pure so it can be tested without a
//! terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use redline_core::{Action, Direction};

/// Rows moved per mouse-wheel notch.
const WHEEL_STEP: isize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Forward to [`redline_core::Session::handle`].
    Session(Action),
    /// Open or close the help overlay.
    ToggleHelp,
    /// Scroll the help overlay by a number of rows.
    ScrollHelp(isize),
}

/// Maps a key press to a command, or `None` for unbound keys.
///
/// While the help overlay is open only its own keys (and Ctrl-c) act.
pub fn map_key(key: KeyEvent, help_open: bool) -> Option<Command> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
        return Some(Command::Session(Action::Quit));
    }
    if help_open {
        return map_help_key(key);
    }

    let action = match key.code {
        KeyCode::Char('d') if ctrl => Action::HalfPage(Direction::Down),
        KeyCode::Char('u') if ctrl => Action::HalfPage(Direction::Up),
        KeyCode::Char('f') if ctrl => Action::Page(Direction::Down),
        KeyCode::Char('b') if ctrl => Action::Page(Direction::Up),
        _ if ctrl => return None,

        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::Move(1),
        KeyCode::Char('k') | KeyCode::Up => Action::Move(-1),
        KeyCode::Char('g') | KeyCode::Home => Action::Top,
        KeyCode::Char('G') | KeyCode::End => Action::Bottom,
        KeyCode::PageDown | KeyCode::Char('}') => Action::File(Direction::Down),
        KeyCode::PageUp | KeyCode::Char('{') => Action::File(Direction::Up),
        KeyCode::Char('h') | KeyCode::Left => Action::FocusList,
        KeyCode::Char('l') | KeyCode::Right => Action::FocusPreview,
        KeyCode::Tab => Action::ToggleFocus,
        KeyCode::Enter | KeyCode::Char(' ') => Action::ToggleItem,
        KeyCode::Char('r') => Action::Commit,
        KeyCode::Char('v') => Action::ToggleMode,
        KeyCode::Char('i') => Action::ToggleBanner,
        KeyCode::Char('e') => Action::OpenEditor,

        KeyCode::Char('?') => return Some(Command::ToggleHelp),
        _ => return None,
    };
    Some(Command::Session(action))
}

fn map_help_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(Command::ScrollHelp(1)),
        KeyCode::Char('k') | KeyCode::Up => Some(Command::ScrollHelp(-1)),
        KeyCode::Char('g') => Some(Command::ScrollHelp(isize::MIN)),
        KeyCode::Char('G') => Some(Command::ScrollHelp(isize::MAX)),
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => Some(Command::ToggleHelp),
        _ => None,
    }
}

/// Maps a mouse event: the wheel moves by [`WHEEL_STEP`] rows, a left click
/// focuses the pane under the pointer.
///
/// `panes` holds the outer rects of the change list and the preview from the
/// last frame.
pub fn map_mouse(mouse: MouseEvent, help_open: bool, panes: [Rect; 2]) -> Option<Command> {
    let step = match mouse.kind {
        MouseEventKind::ScrollUp => -WHEEL_STEP,
        MouseEventKind::ScrollDown => WHEEL_STEP,
        MouseEventKind::Down(MouseButton::Left) if !help_open => {
            let pos = Position { x: mouse.column, y: mouse.row };
            let [list, preview] = panes;
            return if list.contains(pos) {
                Some(Command::Session(Action::FocusList))
            } else if preview.contains(pos) {
                Some(Command::Session(Action::FocusPreview))
            } else {
                None
            };
        }
        _ => return None,
    };

    if help_open {
        Some(Command::ScrollHelp(step))
    } else {
        Some(Command::Session(Action::Move(step)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn navigation_keys_map_to_session_actions() {
        let cases = [
            (key(KeyCode::Char('j')), Action::Move(1)),
            (key(KeyCode::Up), Action::Move(-1)),
            (ctrl('d'), Action::HalfPage(Direction::Down)),
            (ctrl('b'), Action::Page(Direction::Up)),
            (key(KeyCode::PageDown), Action::File(Direction::Down)),
            (key(KeyCode::Char('{')), Action::File(Direction::Up)),
            (key(KeyCode::Char('G')), Action::Bottom),
            (key(KeyCode::Enter), Action::ToggleItem),
            (key(KeyCode::Char('r')), Action::Commit),
            (key(KeyCode::Char('v')), Action::ToggleMode),
        ];
        for (event, action) in cases {
            assert_eq!(map_key(event, false), Some(Command::Session(action)), "{event:?}");
        }
    }

    #[test]
    fn quit_keys() {
        for event in [key(KeyCode::Char('q')), key(KeyCode::Esc), ctrl('c'), ctrl('q')] {
            assert_eq!(map_key(event, false), Some(Command::Session(Action::Quit)));
        }
    }

    #[test]
    fn control_chords_do_not_fall_through_to_plain_keys() {
        assert_eq!(map_key(ctrl('r'), false), None);
        assert_eq!(map_key(ctrl('j'), false), None);
    }

    #[test]
    fn help_overlay_captures_keys() {
        assert_eq!(map_key(key(KeyCode::Char('?')), false), Some(Command::ToggleHelp));
        assert_eq!(map_key(key(KeyCode::Char('j')), true), Some(Command::ScrollHelp(1)));
        assert_eq!(map_key(key(KeyCode::Char('q')), true), Some(Command::ToggleHelp));
        assert_eq!(map_key(key(KeyCode::Char('r')), true), None);
        assert_eq!(map_key(ctrl('c'), true), Some(Command::Session(Action::Quit)));
    }

    #[test]
    fn mouse_wheel_and_click() {
        let panes = [Rect::new(0, 0, 40, 20), Rect::new(40, 0, 40, 20)];

        assert_eq!(
            map_mouse(mouse(MouseEventKind::ScrollDown, 5, 5), false, panes),
            Some(Command::Session(Action::Move(3)))
        );
        assert_eq!(
            map_mouse(mouse(MouseEventKind::ScrollUp, 5, 5), true, panes),
            Some(Command::ScrollHelp(-3))
        );
        assert_eq!(
            map_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 50, 3), false, panes),
            Some(Command::Session(Action::FocusPreview))
        );
        assert_eq!(
            map_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 2, 3), false, panes),
            Some(Command::Session(Action::FocusList))
        );
        assert_eq!(
            map_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 2, 25), false, panes),
            None
        );
    }
}
