//! Event bus for redline.
//!
//! Terminal input and the render timer are normalised into a single `AppEvent`
//! enum and sent over a tokio unbounded MPSC channel. The main loop receives
//! from this channel and dispatches accordingly.
//!
//! The producing task owns the crossterm `EventStream`. While an external
//! editor runs it must not be reading stdin, so the task is aborted before the
//! editor starts and spawned again afterwards.

use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::interval;

/// Render cadence (about 30 FPS).
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

#[derive(Debug)]
pub enum AppEvent {
    /// A key press (`KeyEventKind::Press` only).
    ///
    /// Release and repeat events are filtered in [`spawn_event_task`] to avoid
    /// double-firing on Windows.
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Terminal was resized.
    Resize,
    /// Triggers a `terminal.draw()` call.
    Render,
}

/// Holds the sender and receiver ends of the unified event channel.
pub struct EventHandler {
    pub tx: mpsc::UnboundedSender<AppEvent>,
    pub rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the task that feeds terminal input and render ticks into `tx`.
///
/// The task ends when the receiver is dropped or when the returned handle is
/// aborted.
///
/// `reader.next().fuse()` keeps `select!` from polling a finished stream if the
/// crossterm reader ever terminates.
pub fn spawn_event_task(tx: mpsc::UnboundedSender<AppEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut render_interval = interval(RENDER_INTERVAL);
        let mut reader = EventStream::new();

        loop {
            let render_tick = render_interval.tick();
            let crossterm_event = reader.next().fuse();

            let event = tokio::select! {
                _ = render_tick => Some(AppEvent::Render),
                maybe_event = crossterm_event => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        Some(AppEvent::Key(key))
                    }
                    Some(Ok(Event::Resize(..))) => Some(AppEvent::Resize),
                    Some(Ok(Event::Mouse(mouse))) => Some(AppEvent::Mouse(mouse)),
                    None => break,
                    _ => None,
                },
            };

            if let Some(event) = event {
                if tx.send(event).is_err() {
                    break;
                }
            }
        }
    })
}
