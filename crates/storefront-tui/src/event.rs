//! Terminal input feed.
//!
//! A background task merges crossterm's event stream with the tick and
//! render timers and forwards everything over one channel, so the app loop
//! has a single await point for input.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    /// Terminal resized to (cols, rows).
    Resize(u16, u16),
    /// Housekeeping tick (throbber animation).
    Tick,
    /// Frame pacing tick.
    Render,
}

/// Handle to the input feed task.
pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventReader {
    /// Spawn the feed with the given tick and render cadences.
    pub fn new(tick_rate: Duration, render_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        tokio::spawn(feed(tx, tick_rate, render_rate, cancel.clone()));
        Self { rx, cancel }
    }

    /// Receive the next event. `None` once the feed has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Pump terminal events and timer ticks into the channel until cancelled
/// or the receiver goes away.
async fn feed(
    tx: mpsc::UnboundedSender<Event>,
    tick_rate: Duration,
    render_rate: Duration,
    cancel: CancellationToken,
) {
    let mut stream = EventStream::new();
    let mut ticks = tokio::time::interval(tick_rate);
    let mut frames = tokio::time::interval(render_rate);

    // Skip, don't burst, when the loop falls behind.
    ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,

            _ = ticks.tick() => Event::Tick,

            _ = frames.tick() => Event::Render,

            Some(Ok(raw)) = stream.next() => match raw {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
                CrosstermEvent::Resize(w, h) => Event::Resize(w, h),
                // Key release/repeat, mouse, focus, and paste are ignored.
                _ => continue,
            },
        };

        if tx.send(event).is_err() {
            break;
        }
    }
}
