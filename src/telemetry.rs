//! Hand-off of event snapshots to a consumer thread.
//!
//! The control loop publishes an [`EventSnapshot`] per cycle through a
//! bounded crossbeam channel with non-blocking `try_send`, so a slow
//! consumer never stalls the loop. Snapshots that do not fit are dropped
//! and counted.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError, TrySendError};
use log::warn;

use crate::config::ArbiterConfig;
use crate::error::TelemetryError;
use crate::records::EventSnapshot;

/// Creates a publisher/receiver pair holding at most `capacity` snapshots.
#[must_use]
pub fn channel(capacity: usize) -> (TelemetryPublisher, TelemetryReceiver) {
    let (tx, rx) = bounded::<EventSnapshot>(capacity.max(1));
    let dropped = Arc::new(AtomicU64::new(0));
    (
        TelemetryPublisher {
            tx,
            dropped: Arc::clone(&dropped),
        },
        TelemetryReceiver { rx, dropped },
    )
}

/// Creates a pair sized by `config.telemetry_queue_capacity`.
#[must_use]
pub fn channel_for(config: &ArbiterConfig) -> (TelemetryPublisher, TelemetryReceiver) {
    channel(config.telemetry_queue_capacity)
}

/// Control-loop side of the channel.
#[derive(Debug, Clone)]
pub struct TelemetryPublisher {
    tx: Sender<EventSnapshot>,
    dropped: Arc<AtomicU64>,
}

impl TelemetryPublisher {
    /// Queues `snapshot` without blocking.
    ///
    /// Returns `Ok(false)` if the queue was full and the snapshot dropped.
    pub fn publish(&self, snapshot: EventSnapshot) -> Result<bool, TelemetryError> {
        match self.tx.try_send(snapshot) {
            Ok(()) => Ok(true),
            Err(TrySendError::Full(snapshot)) => {
                let total = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                warn!(
                    "telemetry queue full, dropped snapshot for cycle {} ({total} dropped so far)",
                    snapshot.cycle
                );
                Ok(false)
            }
            Err(TrySendError::Disconnected(_)) => Err(TelemetryError::Disconnected),
        }
    }

    /// Snapshots dropped because the queue was full.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Consumer side of the channel.
#[derive(Debug)]
pub struct TelemetryReceiver {
    rx: Receiver<EventSnapshot>,
    dropped: Arc<AtomicU64>,
}

impl TelemetryReceiver {
    /// Next snapshot if one is queued.
    pub fn try_recv(&self) -> Result<Option<EventSnapshot>, TelemetryError> {
        match self.rx.try_recv() {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(TelemetryError::Disconnected),
        }
    }

    /// Waits up to `timeout` for the next snapshot.
    #[allow(clippy::cast_possible_truncation)]
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EventSnapshot, TelemetryError> {
        self.rx.recv_timeout(timeout).map_err(|err| match err {
            RecvTimeoutError::Timeout => TelemetryError::Timeout {
                duration_ms: timeout.as_millis().min(u128::from(u64::MAX)) as u64,
            },
            RecvTimeoutError::Disconnected => TelemetryError::Disconnected,
        })
    }

    /// Takes everything currently queued.
    #[must_use]
    pub fn drain(&self) -> Vec<EventSnapshot> {
        self.rx.try_iter().collect()
    }

    /// Snapshots the publisher has dropped so far.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
