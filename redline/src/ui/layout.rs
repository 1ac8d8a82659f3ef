//! Two-panel layout for redline.
//!
//! Pure layout arithmetic plus the shared panel chrome (bordered blocks and the
//! status bar). Called inside `terminal.draw()` on every render so every frame
//! reflects the current terminal size.
//!
//! `Spacing::Overlap(1)` combined with `Block::merge_borders(MergeStrategy::Fuzzy)`
//! makes the two panel borders share a single column.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect, Spacing},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};
use redline_core::Mode;

use crate::app::AppState;
use crate::theme::Theme;

/// Below this width the panels are stacked instead of side by side.
const SIDE_BY_SIDE_MIN_WIDTH: u16 = 80;

/// Returns `[change_list, preview, status_bar]` for the current frame.
pub fn compute_layout(area: Rect) -> [Rect; 3] {
    let [main_area, status_bar] =
        area.layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]));

    let split = if area.width >= SIDE_BY_SIDE_MIN_WIDTH {
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
    } else {
        Layout::vertical([Constraint::Percentage(40), Constraint::Percentage(60)])
    };
    let [list, preview] = main_area.layout(&split.spacing(Spacing::Overlap(1)));

    [list, preview, status_bar]
}

/// The inner `Rect` of a panel after removing the 1-cell border on each side.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Builds a bordered `Block` for a panel; thick and highlighted when focused.
///
/// `MergeStrategy::Fuzzy` because `Exact` draws wrong junctions between `Thick`
/// and `Plain` borders.
pub fn panel_block<'a>(title: Line<'a>, is_focused: bool, theme: &Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Renders the 1-row status bar: mode badge, counts, notice, key hints.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let session = &state.session;
    let changes = session.changes();

    let (mode_text, mode_fg) = match session.mode() {
        Mode::Preview => (" PREVIEW ", theme.status_mode_preview),
        Mode::Apply => (" APPLY ", theme.status_mode_apply),
    };

    let counts = match session.mode() {
        Mode::Apply => format!(
            " {}/{} changes in {} files ",
            changes.enabled_count(),
            changes.change_count(),
            changes.files().len()
        ),
        Mode::Preview => format!(
            " {} matches in {} files ",
            changes.change_count(),
            changes.files().len()
        ),
    };

    let mut spans = vec![
        Span::styled(mode_text, Style::default().fg(mode_fg).add_modifier(Modifier::BOLD)),
        Span::raw(counts),
    ];
    if let Some(notice) = &state.notice {
        spans.push(Span::styled(
            format!(" {notice} "),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }

    let hints = match session.mode() {
        Mode::Apply => "enter toggle  r commit  v preview  ? help ",
        Mode::Preview if session.substitution().is_some() => "r done  v apply  ? help ",
        Mode::Preview => "r done  v refresh  ? help ",
    };

    let bar_style = Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg);
    let [left, right] = area.layout(&Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(hints.len() as u16),
    ]));
    frame.render_widget(Paragraph::new(Line::from(spans)).style(bar_style), left);
    frame.render_widget(Paragraph::new(hints).style(bar_style), right);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_terminals_split_side_by_side() {
        let [list, preview, status] = compute_layout(Rect::new(0, 0, 120, 40));
        assert_eq!(status, Rect::new(0, 39, 120, 1));
        assert_eq!(list.y, preview.y);
        assert_eq!(list.height, 39);
        assert!(preview.x > list.x);
        // Shared border column.
        assert_eq!(list.right(), preview.x + 1);
    }

    #[test]
    fn narrow_terminals_stack_panels() {
        let [list, preview, _] = compute_layout(Rect::new(0, 0, 60, 30));
        assert_eq!(list.x, preview.x);
        assert_eq!(list.width, 60);
        assert!(preview.y > list.y);
    }
}
