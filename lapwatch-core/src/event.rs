//! Terminal events and the background poller that reads them

use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// What the poller thread forwards from crossterm
#[derive(Debug)]
pub enum RawEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Input as screens see it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Presses and repeats; releases never get this far
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Upper bound on events read per wake-up, so a paste cannot starve ticks.
const MAX_BATCH: usize = 20;

/// Poll crossterm every `loop_sleep` until `cancel` fires or `tx` closes.
///
/// On cancellation the terminal's input buffer is drained so keys typed
/// during shutdown do not leak into the shell.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    poll_timeout: Duration,
    loop_sleep: Duration,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Event poller stopping");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    return;
                }
                _ = tokio::time::sleep(loop_sleep) => {
                    if !forward_batch(&tx, poll_timeout) {
                        debug!("Event receiver dropped, poller exiting");
                        return;
                    }
                }
            }
        }
    })
}

/// Returns false once the receiver is gone.
fn forward_batch(tx: &mpsc::UnboundedSender<RawEvent>, poll_timeout: Duration) -> bool {
    for _ in 0..MAX_BATCH {
        if !event::poll(poll_timeout).unwrap_or(false) {
            break;
        }
        let raw = match event::read() {
            Ok(event::Event::Key(key)) => RawEvent::Key(key),
            Ok(event::Event::Resize(w, h)) => RawEvent::Resize(w, h),
            _ => continue,
        };
        if tx.send(raw).is_err() {
            return false;
        }
    }
    true
}

/// Drop key releases: terminals that report both edges would otherwise
/// start and stop the clock on one press.
pub fn process_raw_event(raw: RawEvent) -> Option<EventKind> {
    match raw {
        RawEvent::Key(key) if key.kind == KeyEventKind::Release => None,
        RawEvent::Key(key) => Some(EventKind::Key(key)),
        RawEvent::Resize(w, h) => Some(EventKind::Resize(w, h)),
    }
}
