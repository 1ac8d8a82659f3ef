//! Command-line interface.
//!
//! Flags override the matching keys in the config file; see [`crate::config`].

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

/// Review regex replacements across files, one line at a time.
#[derive(Debug, Parser)]
#[command(name = "redline", version, about)]
pub struct Cli {
    /// Regex pattern. A group named `m` narrows the span that `++`, `--`, `~U`
    /// and `~L` operate on.
    #[arg(short = 'r', long = "regex", value_name = "PATTERN")]
    pub regex: String,

    /// Substitution template (`$1`, `${name}`) or operator (`$$++`, `$$--`,
    /// `$$~U`, `$$~L`). Without it the session only previews matches.
    #[arg(short = 's', long = "subst", value_name = "SUBST", allow_hyphen_values = true)]
    pub subst: Option<String>,

    /// File to match against; repeat for more files.
    #[arg(
        short = 'F',
        long = "file",
        value_name = "PATH",
        required = true,
        action = ArgAction::Append,
        value_hint = ValueHint::FilePath
    )]
    pub files: Vec<PathBuf>,

    /// Title of the info banner toggled with `i`.
    #[arg(long = "info-title", value_name = "TEXT", default_value = "")]
    pub info_title: String,

    /// Body of the info banner; the banner is unavailable when empty.
    #[arg(long = "info-message", value_name = "TEXT", default_value = "")]
    pub info_message: String,

    /// Exit after committing instead of reviewing what is left.
    #[arg(long = "skip-review")]
    pub skip_review: bool,

    /// Apply every replacement immediately, without the review UI.
    #[arg(long, requires = "subst")]
    pub force: bool,

    /// Write logs to this file (level from `REDLINE_LOG`, default `warn`).
    #[arg(long = "log-file", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Color theme: `dark` or `catppuccin-mocha`.
    #[arg(long, value_name = "NAME")]
    pub theme: Option<String>,
}
