//! Terminal input
//!
//! A background task polls crossterm and forwards key and resize events over
//! a channel, so the main loop can `select!` on input alongside task results.

use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Input the UI reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Key(KeyEvent),
    Resize(u16, u16),
}

impl EventKind {
    /// Convert a crossterm event; mouse, focus and paste input is dropped.
    pub fn from_crossterm(evt: event::Event) -> Option<Self> {
        match evt {
            // Windows reports releases too
            event::Event::Key(key) if key.kind != KeyEventKind::Release => Some(Self::Key(key)),
            event::Event::Resize(w, h) => Some(Self::Resize(w, h)),
            _ => None,
        }
    }
}

/// Poller timing
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Timeout passed to each `crossterm::event::poll` call
    pub poll_timeout: Duration,
    /// Sleep between poll cycles
    pub loop_sleep: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
        }
    }
}

/// Spawn the input polling task. It stops when `cancel_token` fires or the
/// receiver is dropped.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<EventKind>,
    config: PollerConfig,
    cancel_token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    tracing::debug!("event poller cancelled, draining buffer");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(config.loop_sleep) => {
                    let mut processed = 0;
                    while processed < MAX_EVENTS_PER_BATCH
                        && event::poll(config.poll_timeout).unwrap_or(false)
                    {
                        processed += 1;
                        let Ok(evt) = event::read() else {
                            continue;
                        };
                        if let Some(kind) = EventKind::from_crossterm(evt) {
                            if tx.send(kind).is_err() {
                                tracing::debug!("event channel closed, stopping poller");
                                return;
                            }
                        }
                    }
                }
            }
        }
    })
}
