//! Color theme system for redline.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every UI surface
//! redline renders. Two built-in themes are provided:
//!
//! - `dark` uses ANSI 16 colors so it works on any terminal, including
//!   256-color SSH sessions with no truecolor support.
//! - `catppuccin_mocha` is the Catppuccin Mocha palette in RGB; requires truecolor.

use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    pub border_active: Color,
    pub border_inactive: Color,

    // Change list
    /// File header rows.
    pub file_header: Color,
    /// Background of the row under the cursor.
    pub cursor_bg: Color,
    /// Foreground of disabled changes.
    pub disabled: Color,
    /// Line-number gutter.
    pub line_number: Color,

    // Diff spans
    pub diff_added: Color,
    pub diff_removed: Color,
    pub diff_context: Color,
    /// Matched text in Preview mode.
    pub diff_match: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub status_mode_preview: Color,
    pub status_mode_apply: Color,

    /// Border of the help and banner overlays.
    pub overlay_border: Color,

    /// syntect theme used for preview context rows.
    pub syntax_theme: &'static str,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            file_header: Color::Blue,
            cursor_bg: Color::DarkGray,
            disabled: Color::DarkGray,
            line_number: Color::DarkGray,

            diff_added: Color::Green,
            diff_removed: Color::Red,
            diff_context: Color::Reset,
            diff_match: Color::Yellow,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_preview: Color::Cyan,
            status_mode_apply: Color::Green,

            overlay_border: Color::Cyan,

            syntax_theme: "base16-ocean.dark",
        }
    }

    /// Returns the Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161); // #a6e3a1
        let red = Color::Rgb(243, 139, 168); // #f38ba8
        let yellow = Color::Rgb(249, 226, 175); // #f9e2af
        let blue = Color::Rgb(137, 180, 250); // #89b4fa
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface0 = Color::Rgb(49, 50, 68); // #313244
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let text = Color::Rgb(205, 214, 244); // #cdd6f4
        let peach = Color::Rgb(250, 179, 135); // #fab387

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            file_header: blue,
            cursor_bg: surface0,
            disabled: overlay1,
            line_number: overlay1,

            diff_added: green,
            diff_removed: red,
            diff_context: text,
            diff_match: peach,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode_preview: lavender,
            status_mode_apply: yellow,

            overlay_border: lavender,

            syntax_theme: "base16-mocha.dark",
        }
    }

    /// Resolves a theme name to the corresponding built-in theme.
    ///
    /// Unknown names fall back to `dark()` with a note on stderr.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                eprintln!("redline: unknown theme '{}', falling back to 'dark'", other);
                Self::dark()
            }
        }
    }
}
