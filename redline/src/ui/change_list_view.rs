//! Change list panel renderer.
//!
//! One header row per file, one row per change, and a blank row between files.
//! The visible window comes from the engine's list scroll, so the renderer never
//! decides what is on screen by itself.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use redline_core::{ChangeList, DiffSpan, FileChange, LineChange, Mode, SpanKind};

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

pub fn render_change_list(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let session = &state.session;
    let changes = session.changes();
    let title = Line::from(format!(" Changes ({}) ", changes.change_count()));
    let block = panel_block(title, !changes.pager_focused(), theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let show_toggles = session.mode() == Mode::Apply;
    let cursor = changes.cursor_row();
    let cursor_style = Style::default().bg(theme.cursor_bg);

    let lines: Vec<Line<'_>> = list_rows(changes, show_toggles, theme)
        .into_iter()
        .enumerate()
        .skip(changes.list_scroll())
        .take(usize::from(inner.height))
        .map(|(row, line)| {
            if row == cursor {
                line.patch_style(cursor_style)
            } else {
                line
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Every row of the flattened list, separators included.
fn list_rows<'a>(changes: &'a ChangeList, show_toggles: bool, theme: &Theme) -> Vec<Line<'a>> {
    let mut rows = Vec::with_capacity(changes.total_rows());
    for (idx, file) in changes.files().iter().enumerate() {
        if idx > 0 {
            rows.push(Line::default());
        }
        rows.push(header_row(file, show_toggles, theme));

        let width = file
            .changes()
            .last()
            .map_or(1, |c| c.line_number.to_string().len());
        for change in file.changes() {
            rows.push(change_row(change, width, show_toggles, theme));
        }
    }
    rows
}

fn header_row<'a>(file: &'a FileChange, show_toggles: bool, theme: &Theme) -> Line<'a> {
    let mut spans = Vec::with_capacity(3);
    if show_toggles {
        spans.push(checkbox(file.is_item_enabled(0)));
    }
    spans.push(Span::styled(
        file.path().to_string_lossy(),
        Style::default().fg(theme.file_header).add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled(
        format!("  {}", file.changes().len()),
        Style::default().fg(theme.line_number),
    ));
    Line::from(spans)
}

fn change_row<'a>(
    change: &'a LineChange,
    width: usize,
    show_toggles: bool,
    theme: &Theme,
) -> Line<'a> {
    let mut spans = vec![Span::raw("  ")];
    if show_toggles {
        spans.push(checkbox(change.enabled));
    }
    spans.push(Span::styled(
        format!("{:>width$} ", change.line_number),
        Style::default().fg(theme.line_number),
    ));

    let mut leading = true;
    for span in &change.spans {
        // Indentation is noise in the list; the preview shows it.
        let text = if leading && span.kind == SpanKind::Equal {
            span.text.trim_start()
        } else {
            span.text.as_str()
        };
        leading = false;
        spans.push(Span::styled(text, span_style(span, change, theme)));
    }
    Line::from(spans)
}

fn checkbox(enabled: bool) -> Span<'static> {
    Span::raw(if enabled { "[x] " } else { "[ ] " })
}

/// Style of one diff span, taking the change's mode and enabled state into account.
pub fn span_style(span: &DiffSpan, change: &LineChange, theme: &Theme) -> Style {
    let style = match span.kind {
        SpanKind::Equal => Style::default().fg(theme.diff_context),
        SpanKind::Delete => Style::default()
            .fg(theme.diff_removed)
            .add_modifier(Modifier::CROSSED_OUT),
        SpanKind::Insert if change.is_preview_only() => Style::default()
            .fg(theme.diff_match)
            .add_modifier(Modifier::BOLD),
        SpanKind::Insert => Style::default()
            .fg(theme.diff_added)
            .add_modifier(Modifier::BOLD),
    };
    if change.enabled || change.is_preview_only() {
        style
    } else {
        style.fg(theme.disabled)
    }
}
