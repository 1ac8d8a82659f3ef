//! User configuration loaded from `$XDG_CONFIG_HOME/redline/config.toml`.
//!
//! Every key is optional. A missing file yields the defaults; a file that does
//! not parse is reported on stderr and the defaults are used, so a typo never
//! prevents startup.

use std::path::{Path, PathBuf};

use redline_core::MalformedPolicy;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Built-in theme name, see [`crate::theme::Theme::from_name`].
    pub theme: String,
    /// Highlight preview context rows with syntect.
    pub syntax_highlight: bool,
    /// What to do when `++`/`--` meet a capture that is not an integer.
    #[serde(deserialize_with = "deserialize_policy")]
    pub on_malformed: MalformedPolicy,
    pub skip_review: bool,
    /// Command used by `e`; falls back to `$VISUAL`, `$EDITOR`, then `vi`.
    pub editor: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_owned(),
            syntax_highlight: true,
            on_malformed: MalformedPolicy::default(),
            skip_review: false,
            editor: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Parses a config document.
    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Reads the config file at `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(_) => return Self::default(),
        };
        match Self::parse(&raw) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("redline: config parse error in {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Reads the config file from its standard location.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }
}

fn deserialize_policy<'de, D>(deserializer: D) -> Result<MalformedPolicy, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

/// Returns the path to the redline config file.
///
/// Prefers `$XDG_CONFIG_HOME/redline/config.toml`; falls back to
/// `~/.config/redline/config.toml` when the env var is absent.
pub fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("redline").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_all_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn every_key_is_read() {
        let config = Config::parse(
            r#"
            theme = "catppuccin-mocha"
            syntax_highlight = false
            on_malformed = "skip"
            skip_review = true
            editor = "hx"
            log_file = "/tmp/redline.log"
            "#,
        )
        .unwrap();

        assert_eq!(config.theme, "catppuccin-mocha");
        assert!(!config.syntax_highlight);
        assert_eq!(config.on_malformed, MalformedPolicy::Skip);
        assert!(config.skip_review);
        assert_eq!(config.editor.as_deref(), Some("hx"));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/redline.log")));
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let err = Config::parse(r#"on_malformed = "retry""#).unwrap_err();
        assert!(err.to_string().contains("retry"), "{err}");
    }

    #[test]
    fn bad_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "theme = [").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
        assert_eq!(Config::load_from(&dir.path().join("absent.toml")), Config::default());
    }
}
