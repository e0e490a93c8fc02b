//! Lifecycle reporting toward the presentation layer.
//!
//! The engine never talks to a UI directly; it calls a `ProgressObserver`,
//! always from the single worker task, so a conforming adapter receives
//! events in order and never overlapping. One adapter per presentation
//! layer: `ChannelObserver` for a UI consuming a receiver, `TracingObserver`
//! for headless runs, a recording double in the test suite.

use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Callbacks for one migration run, delivered in this order only:
/// `started` once, zero or more `update`s, then exactly one of `failed`
/// (nothing was processed), `finished` (pending set drained), or `stopped`
/// (cancellation honored).
pub trait ProgressObserver: Send + Sync {
    fn started(&self);
    fn update(&self, current_work: &str);
    fn failed(&self);
    fn finished(&self, errors: &[String]);
    fn stopped(&self, errors: &[String]);
}

/// Lifecycle events in value form, for consumers that poll a receiver
/// instead of implementing the trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationEvent {
    Started,
    Update { current_work: String },
    Failed,
    Finished { errors: Vec<String> },
    Stopped { errors: Vec<String> },
}

/// Observer adapter that forwards every callback onto an unbounded channel.
///
/// A UI drains the receiver on its own thread; because all sends originate
/// from the worker, delivery order matches callback order.
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<MigrationEvent>,
}

impl ChannelObserver {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<MigrationEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelObserver { tx }, rx)
    }
}

impl ProgressObserver for ChannelObserver {
    fn started(&self) {
        let _ = self.tx.send(MigrationEvent::Started);
    }

    fn update(&self, current_work: &str) {
        let _ = self.tx.send(MigrationEvent::Update {
            current_work: current_work.to_string(),
        });
    }

    fn failed(&self) {
        let _ = self.tx.send(MigrationEvent::Failed);
    }

    fn finished(&self, errors: &[String]) {
        let _ = self.tx.send(MigrationEvent::Finished {
            errors: errors.to_vec(),
        });
    }

    fn stopped(&self, errors: &[String]) {
        let _ = self.tx.send(MigrationEvent::Stopped {
            errors: errors.to_vec(),
        });
    }
}

/// Headless adapter that logs every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ProgressObserver for TracingObserver {
    fn started(&self) {
        info!("Migration started");
    }

    fn update(&self, current_work: &str) {
        info!("{}", current_work);
    }

    fn failed(&self) {
        error!("Migration failed before any media was processed");
    }

    fn finished(&self, errors: &[String]) {
        if errors.is_empty() {
            info!("Migration finished with no errors");
        } else {
            info!("Migration finished with {} error(s)", errors.len());
            for line in errors {
                warn!("{}", line);
            }
        }
    }

    fn stopped(&self, errors: &[String]) {
        info!("Migration stopped on request, {} error(s) so far", errors.len());
    }
}
