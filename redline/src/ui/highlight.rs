//! syntect highlighting for preview context rows.

use std::path::Path;
use std::sync::LazyLock;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, ThemeSet};
use syntect::parsing::SyntaxSet;

// Lines reach the highlighter with their separator already stripped.
static PS: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_nonewlines);
static TS: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Builds a highlighter for `path`, chosen by file extension.
///
/// Unknown extensions get the plain-text syntax; an unknown theme name falls
/// back to the first bundled theme. Returns `None` only if syntect ships no
/// themes at all.
pub fn highlighter_for(path: &Path, theme_name: &str) -> Option<HighlightLines<'static>> {
    let theme = TS
        .themes
        .get(theme_name)
        .or_else(|| TS.themes.values().next())?;
    let syntax = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| PS.find_syntax_by_extension(ext))
        .unwrap_or_else(|| PS.find_syntax_plain_text());
    Some(HighlightLines::new(syntax, theme))
}

/// Highlights one line of code. Falls back to a single unstyled span on error.
pub fn highlight_line(code: &str, h: &mut HighlightLines<'static>) -> Vec<Span<'static>> {
    let ranges = h.highlight_line(code, &PS).unwrap_or_default();
    let spans: Vec<Span<'static>> = ranges
        .into_iter()
        .map(|(style, text)| syntect_to_span(style, text))
        .collect();
    if spans.is_empty() {
        vec![Span::raw(code.to_owned())]
    } else {
        spans
    }
}

/// Converts a syntect (Style, &str) pair to an owned ratatui Span.
///
/// Only the foreground and font style are carried over; the panel background
/// belongs to the ratatui theme.
fn syntect_to_span(style: syntect::highlighting::Style, content: &str) -> Span<'static> {
    let mut ratatui_style = Style::default();
    let fg = style.foreground;
    if fg.a > 0 {
        ratatui_style = ratatui_style.fg(Color::Rgb(fg.r, fg.g, fg.b));
    }
    if style.font_style.contains(FontStyle::BOLD) {
        ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        ratatui_style = ratatui_style.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        ratatui_style = ratatui_style.add_modifier(Modifier::UNDERLINED);
    }
    Span::styled(content.to_owned(), ratatui_style)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(spans: &[Span<'_>]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn rust_source_is_split_into_styled_tokens() {
        let mut h = highlighter_for(Path::new("src/lib.rs"), "base16-ocean.dark").unwrap();
        let code = "let answer: u32 = 42;";
        let spans = highlight_line(code, &mut h);
        assert!(spans.len() > 1);
        assert_eq!(text_of(&spans), code);
        assert!(spans.iter().any(|s| s.style.fg.is_some()));
    }

    #[test]
    fn unknown_extension_and_theme_still_highlight() {
        let mut h = highlighter_for(Path::new("notes.unknown-ext"), "no-such-theme").unwrap();
        let spans = highlight_line("plain words", &mut h);
        assert_eq!(text_of(&spans), "plain words");
    }
}
