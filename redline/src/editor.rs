//! External editor launch for the focused file.

use std::path::Path;
use std::process::{Command, ExitStatus};

use anyhow::{bail, Context, Result};

const FALLBACK_EDITOR: &str = "vi";

/// Picks the editor command: config, then `$VISUAL`, then `$EDITOR`, then `vi`.
/// Blank values are skipped.
pub fn resolve_editor(
    configured: Option<&str>,
    visual: Option<String>,
    editor: Option<String>,
) -> String {
    configured
        .map(str::to_owned)
        .into_iter()
        .chain(visual)
        .chain(editor)
        .find(|cmd| !cmd.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_EDITOR.to_owned())
}

/// Builds the process for `command` (split on whitespace, so `"code --wait"`
/// works) with `path` as its last argument.
pub fn editor_command(command: &str, path: &Path) -> Result<Command> {
    let mut parts = command.split_whitespace();
    let Some(program) = parts.next() else {
        bail!("editor command is empty");
    };
    let mut cmd = Command::new(program);
    cmd.args(parts).arg(path);
    Ok(cmd)
}

/// Runs the editor on `path` and waits for it to exit.
///
/// The caller must have released the terminal first.
pub fn open(configured: Option<&str>, path: &Path) -> Result<ExitStatus> {
    let command = resolve_editor(
        configured,
        std::env::var("VISUAL").ok(),
        std::env::var("EDITOR").ok(),
    );
    tracing::info!(editor = %command, path = %path.display(), "opening editor");
    editor_command(&command, path)?
        .status()
        .with_context(|| format!("failed to run editor `{command}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_editor_wins() {
        let picked = resolve_editor(Some("hx"), Some("code".into()), Some("nano".into()));
        assert_eq!(picked, "hx");
    }

    #[test]
    fn environment_order_is_visual_then_editor() {
        assert_eq!(resolve_editor(None, Some("code".into()), Some("nano".into())), "code");
        assert_eq!(resolve_editor(None, Some("  ".into()), Some("nano".into())), "nano");
        assert_eq!(resolve_editor(Some(""), None, None), "vi");
    }

    #[test]
    fn command_arguments_precede_the_path() {
        let cmd = editor_command("code --wait", Path::new("src/lib.rs")).unwrap();
        assert_eq!(cmd.get_program(), "code");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, ["--wait", "src/lib.rs"]);
    }
}
