//! redline: review regex replacements across files before they are written.
//!
//! Entry point for the `redline` binary. Wires together the CLI and config
//! (`cli`, `config`), logging, the review session from `redline-core`, the
//! terminal lifecycle (`tui`), the event bus (`event`) and rendering (`ui`).
//!
//! # Startup sequence
//!
//! 1. Parse flags, load config, install the tracing subscriber.
//! 2. `--force` runs the batch replacement and exits without a terminal.
//! 3. Scan the files. Nothing to review prints a message and exits before the
//!    terminal is touched.
//! 4. `install_panic_hook()`, `register_sigterm()`, `init_tui()`, then the
//!    event loop.
//!
//! `restore_tui()` runs after the event loop returns, whether it returned an
//! exit reason or an error; the panic hook covers panics.

mod app;
mod cli;
mod config;
mod editor;
mod event;
mod logging;
mod theme;
mod tui;
mod ui;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use redline_core::{batch, ExitReason, Outcome, Pattern, Session, SessionArgs, Substitution};
use tracing::{info, warn};

use crate::app::{commit_summary, AppState};
use crate::cli::Cli;
use crate::config::Config;
use crate::event::{AppEvent, EventHandler};
use crate::theme::Theme;
use crate::ui::keybindings;

/// Upper bound on how long a SIGTERM can go unnoticed.
const HEARTBEAT: Duration = Duration::from_millis(50);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load();

    let log_file = cli.log_file.clone().or_else(|| config.log_file.clone());
    logging::init_tracing(log_file.as_deref())?;

    let pattern = Pattern::new(&cli.regex)
        .with_context(|| format!("invalid regex {:?}", cli.regex))?;
    let substitution = cli.subst.as_deref().map(Substitution::parse);

    if cli.force {
        let substitution = substitution.context("--force requires --subst")?;
        let report =
            batch::replace_all(&pattern, &substitution, cli.files.as_slice(), config.on_malformed)?;
        println!("{}", commit_summary(&report));
        return Ok(());
    }

    let args = SessionArgs {
        pattern,
        substitution,
        filenames: cli.files,
        banner_title: cli.info_title,
        banner_message: cli.info_message,
        policy: config.on_malformed,
        skip_review: cli.skip_review || config.skip_review,
    };
    let Some(session) = Session::start(args)? else {
        println!("No matches found");
        return Ok(());
    };

    let theme = Theme::from_name(cli.theme.as_deref().unwrap_or(&config.theme));
    let mut state = AppState::new(session, config.syntax_highlight);

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;
    let mut terminal = tui::init_tui()?;

    let result = run(&mut terminal, &mut state, &theme, &term_flag, config.editor.as_deref()).await;
    let restored = tui::restore_tui();
    let reason = result?;
    restored?;

    info!(?reason, "session finished");
    match (reason, state.session.last_commit()) {
        (ExitReason::NothingLeft | ExitReason::Committed, Some(report)) => {
            println!("{}", commit_summary(report));
        }
        (ExitReason::NothingLeft, None) => println!("No matches left"),
        _ => {}
    }
    Ok(())
}

/// The event loop. Returns how the session ended.
///
/// Exactly one `terminal.draw()` per `Render` event; input events only mutate
/// state.
async fn run(
    terminal: &mut tui::Tui,
    state: &mut AppState,
    theme: &Theme,
    term_flag: &AtomicBool,
    editor_cmd: Option<&str>,
) -> Result<ExitReason> {
    let EventHandler { tx, mut rx } = EventHandler::new();
    let mut events = event::spawn_event_task(tx.clone());

    loop {
        tokio::select! {
            // A quiet terminal would otherwise block in rx.recv() and never
            // look at the SIGTERM flag.
            _ = tokio::time::sleep(HEARTBEAT) => {
                if term_flag.load(Ordering::Relaxed) {
                    return Ok(ExitReason::Quit);
                }
            }
            maybe_event = rx.recv() => {
                let command = match maybe_event {
                    Some(AppEvent::Render) => {
                        terminal.draw(|frame| ui::render(frame, state, theme))?;
                        None
                    }
                    Some(AppEvent::Key(key)) => keybindings::map_key(key, state.help_open),
                    Some(AppEvent::Mouse(mouse)) => {
                        keybindings::map_mouse(mouse, state.help_open, state.panel_rects)
                    }
                    // The next Render picks up the new size.
                    Some(AppEvent::Resize) => None,
                    None => return Ok(ExitReason::Quit),
                };

                if let Some(command) = command {
                    match state.dispatch(command)? {
                        Outcome::Continue | Outcome::Rebuilt => {}
                        Outcome::Exit(reason) => return Ok(reason),
                        Outcome::OpenEditor(path) => {
                            // The event task reads stdin; it must be gone while the
                            // editor owns the terminal.
                            events.abort();
                            let _ = events.await;

                            let status = tui::suspend(terminal, || editor::open(editor_cmd, &path))?;
                            match status {
                                Ok(status) if !status.success() => {
                                    state.notice = Some(format!("Editor exited with {status}"));
                                }
                                Ok(_) => {}
                                Err(e) => {
                                    warn!(error = %format!("{e:#}"), "editor failed");
                                    state.notice = Some(format!("{e:#}"));
                                }
                            }

                            events = event::spawn_event_task(tx.clone());
                            if let Outcome::Exit(reason) = state.session.refresh()? {
                                return Ok(reason);
                            }
                        }
                    }
                }

                if term_flag.load(Ordering::Relaxed) {
                    return Ok(ExitReason::Quit);
                }
            }
        }
    }
}
