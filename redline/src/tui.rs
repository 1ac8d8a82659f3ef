//! Terminal lifecycle management for redline.
//!
//! The TUI renders to stderr so stdout stays free for the final summary line
//! and for shell pipelines around the command.

use std::io::{stderr, BufWriter, Stderr};
use std::panic;
use std::sync::{atomic::AtomicBool, Arc};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use signal_hook::consts::SIGTERM;
use signal_hook::flag::register;

/// CrosstermBackend over a buffered stderr writer.
pub type Tui = Terminal<CrosstermBackend<BufWriter<Stderr>>>;

/// Enables raw mode, enters the alternate screen and turns on mouse capture.
/// Call [`restore_tui`] at every exit path.
///
/// # Errors
///
/// Returns `Err` if `enable_raw_mode`, `execute!`, or `Terminal::new` fails.
pub fn init_tui() -> std::io::Result<Tui> {
    let mut out = BufWriter::new(stderr());
    enable_raw_mode()?;
    execute!(out, EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(out))
}

/// Restore the terminal to its pre-TUI state.
///
/// Idempotent. ratatui 0.30 does not restore the terminal on `Drop`, so this
/// runs at every exit path and from the panic hook.
pub fn restore_tui() -> std::io::Result<()> {
    disable_raw_mode()?;
    execute!(stderr(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// Hands the terminal to a child process and takes it back afterwards.
///
/// Leaves raw mode and the alternate screen, runs `f`, then re-enters both and
/// clears the ratatui buffer so the next draw repaints everything.
pub fn suspend<T>(terminal: &mut Tui, f: impl FnOnce() -> T) -> std::io::Result<T> {
    restore_tui()?;
    let result = f();
    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen, EnableMouseCapture)?;
    terminal.clear()?;
    Ok(result)
}

/// Install a panic hook that restores the terminal before printing the panic message.
///
/// Must be called before [`init_tui`]. Chains onto the previously installed hook.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Best effort; we're already panicking.
        let _ = restore_tui();
        original_hook(panic_info);
    }));
}

/// Register a SIGTERM handler that sets an `AtomicBool` flag polled by the main loop.
///
/// # Errors
///
/// Returns `Err` if the OS refuses to register the handler.
pub fn register_sigterm() -> std::io::Result<Arc<AtomicBool>> {
    let term = Arc::new(AtomicBool::new(false));
    register(SIGTERM, Arc::clone(&term))?;
    Ok(term)
}
