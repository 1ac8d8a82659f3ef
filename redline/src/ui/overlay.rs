//! Help and banner overlays.
//!
//! Both are centred modals drawn inside the same `terminal.draw()` closure as
//! the panels: `Clear` erases the area first, then a bordered `Paragraph` is
//! drawn on top.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the help overlay, clamping `help_scroll` to the text length.
///
/// Skipped on terminals narrower than 40 columns, where the modal would not fit.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: &mut u16) {
    if frame.area().width < 40 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(80), Constraint::Percentage(80));
    frame.render_widget(Clear, overlay_area);

    let help_text = build_help_text();
    let visible = overlay_area.height.saturating_sub(2);
    let max_scroll = u16::try_from(help_text.lines.len())
        .unwrap_or(u16::MAX)
        .saturating_sub(visible);
    *help_scroll = (*help_scroll).min(max_scroll);

    let block = Block::bordered()
        .title(" Help  j/k scroll, ? or Esc to dismiss ")
        .border_style(Style::default().fg(theme.overlay_border));

    frame.render_widget(
        Paragraph::new(help_text)
            .block(block)
            .scroll((*help_scroll, 0)),
        overlay_area,
    );
}

/// Renders the info banner given with `--info-title` / `--info-message`.
pub fn render_banner(frame: &mut Frame, theme: &Theme, title: &str, message: &str) {
    let area = banner_area(frame.area());
    if area.width < 4 || area.height < 3 {
        return;
    }
    frame.render_widget(Clear, area);

    let block = Block::bordered()
        .title(Line::styled(
            format!(" {title} "),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(" i to dismiss ").right_aligned())
        .border_style(Style::default().fg(theme.overlay_border));

    frame.render_widget(
        Paragraph::new(message.to_owned())
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn banner_area(area: Rect) -> Rect {
    area.centered(Constraint::Percentage(60), Constraint::Percentage(40))
}

fn build_help_text() -> Text<'static> {
    Text::from(vec![
        Line::from("Navigation"),
        Line::from("  j / k         Move down / up one row"),
        Line::from("  g / G         Jump to top / bottom"),
        Line::from("  Ctrl-d / u    Half page down / up"),
        Line::from("  Ctrl-f / b    Full page down / up"),
        Line::from("  PgDn / PgUp   Next / previous file  (also } / {)"),
        Line::from("  h / l         Focus change list / preview"),
        Line::from("  Tab           Switch focus"),
        Line::from(""),
        Line::from("Review"),
        Line::from("  Enter / Space Toggle the change under the cursor"),
        Line::from("                (on a file header: toggle every change in it)"),
        Line::from("  r             Commit enabled changes, then review what is left"),
        Line::from("                In preview mode: finish"),
        Line::from("  v             Switch between apply and preview mode"),
        Line::from("  e             Open the selected file in $EDITOR"),
        Line::from(""),
        Line::from("General"),
        Line::from("  i             Show / hide the info banner"),
        Line::from("  ?             Open / close this help overlay"),
        Line::from("  q / Esc       Quit without writing"),
        Line::from(""),
        Line::from("Commits write files one at a time. If a write fails, files"),
        Line::from("written before it keep their changes."),
    ])
}
