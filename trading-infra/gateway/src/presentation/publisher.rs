//! Snapshot Publisher
//!
//! Publishes fully built market snapshots to downstream consumers. Consumers
//! either drain every snapshot from a bounded channel or read only the latest
//! one through a lock-free cell.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tokio::sync::mpsc;
use trading_core::MarketSnapshot;

use crate::error::PublishError;

/// Create a publisher and its subscriber over a channel of `capacity`
pub fn snapshot_channel(capacity: usize) -> (SnapshotPublisher, SnapshotSubscriber) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let latest = Arc::new(ArcSwapOption::empty());
    (
        SnapshotPublisher {
            tx,
            latest: Arc::clone(&latest),
            published: 0,
        },
        SnapshotSubscriber {
            rx,
            reader: SnapshotReader { latest },
        },
    )
}

/// Publisher for market snapshots
pub struct SnapshotPublisher {
    tx: mpsc::Sender<Arc<MarketSnapshot>>,
    latest: Arc<ArcSwapOption<MarketSnapshot>>,
    published: u64,
}

impl SnapshotPublisher {
    /// Publish a snapshot; waits while the channel is full
    pub async fn publish(&mut self, snapshot: MarketSnapshot) -> Result<(), PublishError> {
        let snapshot = Arc::new(snapshot);
        self.latest.store(Some(Arc::clone(&snapshot)));
        self.tx
            .send(snapshot)
            .await
            .map_err(|_| PublishError::Closed)?;
        self.published += 1;
        Ok(())
    }

    /// Number of snapshots delivered to the channel
    pub fn published(&self) -> u64 {
        self.published
    }

    pub fn reader(&self) -> SnapshotReader {
        SnapshotReader {
            latest: Arc::clone(&self.latest),
        }
    }
}

/// Receiving end of the snapshot channel
pub struct SnapshotSubscriber {
    rx: mpsc::Receiver<Arc<MarketSnapshot>>,
    reader: SnapshotReader,
}

impl SnapshotSubscriber {
    /// Next snapshot in publication order; `None` once the publisher is gone
    pub async fn recv(&mut self) -> Option<Arc<MarketSnapshot>> {
        self.rx.recv().await
    }

    pub fn reader(&self) -> SnapshotReader {
        self.reader.clone()
    }
}

/// Latest-value view of the published snapshots
#[derive(Clone)]
pub struct SnapshotReader {
    latest: Arc<ArcSwapOption<MarketSnapshot>>,
}

impl SnapshotReader {
    /// Most recent snapshot, if any was published
    pub fn latest(&self) -> Option<Arc<MarketSnapshot>> {
        self.latest.load_full()
    }
}
