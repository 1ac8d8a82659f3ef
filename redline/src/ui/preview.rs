//! Preview panel renderer: the selected file with its changes inline.
//!
//! Gutter marks: `>` for a match in Preview mode, `-` and `+` for the original
//! and replacement of a change in Apply mode. Rows of the focused change get the
//! cursor background; rows of a disabled change are dimmed and the `+` row is
//! struck through, since it will not be written.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use redline_core::{FileChange, PreviewRow};
use syntect::easy::HighlightLines;

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::change_list_view::span_style;
use crate::ui::highlight::{highlight_line, highlighter_for};
use crate::ui::layout::{inner_rect, panel_block};

const TAB: &str = "    ";

pub fn render_preview(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let changes = state.session.changes();
    let file = changes.selected_file();
    let title = Line::from(format!(" {} ", file.path().display()));
    let block = panel_block(title, changes.pager_focused(), theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let mut highlighter = if state.syntax_highlight {
        highlighter_for(file.path(), theme.syntax_theme)
    } else {
        None
    };
    let focused = file.focused_index();
    let cursor_style = Style::default().bg(theme.cursor_bg);

    let lines: Vec<Line<'static>> = file
        .preview()
        .iter()
        .skip(changes.preview_scroll())
        .take(usize::from(inner.height))
        .map(|row| {
            let line = preview_line(row, file, highlighter.as_mut(), theme);
            if row.change().is_some() && row.change() == focused {
                line.patch_style(cursor_style)
            } else {
                line
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn preview_line(
    row: &PreviewRow,
    file: &FileChange,
    highlighter: Option<&mut HighlightLines<'static>>,
    theme: &Theme,
) -> Line<'static> {
    let enabled = |idx: usize| file.changes().get(idx).is_some_and(|c| c.enabled);

    match row {
        PreviewRow::Context(text) => {
            let text = expand_tabs(text);
            let mut spans = vec![Span::raw("  ")];
            match highlighter {
                Some(h) => spans.extend(highlight_line(&text, h)),
                None => spans.push(Span::styled(text, Style::default().fg(theme.diff_context))),
            }
            Line::from(spans)
        }
        PreviewRow::Matched { change, spans } => {
            let mut line = vec![Span::styled("> ", Style::default().fg(theme.diff_match))];
            if let Some(lc) = file.changes().get(*change) {
                line.extend(
                    spans
                        .iter()
                        .map(|s| Span::styled(expand_tabs(&s.text), span_style(s, lc, theme))),
                );
            }
            Line::from(line)
        }
        PreviewRow::Removed { change, text } => {
            let style = if enabled(*change) {
                Style::default().fg(theme.diff_removed)
            } else {
                Style::default().fg(theme.diff_context)
            };
            Line::from(vec![
                Span::styled("- ", style),
                Span::styled(expand_tabs(text), style),
            ])
        }
        PreviewRow::Added { change, text } => {
            let style = if enabled(*change) {
                Style::default().fg(theme.diff_added)
            } else {
                Style::default()
                    .fg(theme.disabled)
                    .add_modifier(Modifier::CROSSED_OUT)
            };
            Line::from(vec![
                Span::styled("+ ", style),
                Span::styled(expand_tabs(text), style),
            ])
        }
    }
}

fn expand_tabs(text: &str) -> String {
    text.replace('\t', TAB)
}
