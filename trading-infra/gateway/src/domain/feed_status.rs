use thiserror::Error;

use crate::error::TransportError;

/// Terminal state of a feed connection
/// Domain concept reported once the producer stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedTermination {
    /// Consumer went away, nothing left to deliver to
    Closed,
    /// Shutdown handle fired
    Cancelled,
    /// Retry ceiling reached without an intervening stability window
    Exhausted { attempts: u32 },
    /// A feed or ingestion task panicked or was aborted
    Failed,
}

impl FeedTermination {
    /// Check if the feed gave up on its own
    pub fn is_exhausted(&self) -> bool {
        matches!(self, FeedTermination::Exhausted { .. })
    }

    /// Check if a task died instead of returning
    pub fn is_failed(&self) -> bool {
        matches!(self, FeedTermination::Failed)
    }

    /// Check if the feed stopped because somebody asked it to
    pub fn is_clean(&self) -> bool {
        matches!(self, FeedTermination::Closed | FeedTermination::Cancelled)
    }
}

/// Why a session ended and a reconnect is needed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionLoss {
    #[error("connect failed: {0}")]
    Connect(TransportError),

    #[error("subscription send failed: {0}")]
    Subscribe(TransportError),

    #[error("receive failed: {0}")]
    Receive(TransportError),

    #[error("closed by remote")]
    ClosedByRemote,

    #[error("remote error event: {0}")]
    RemoteError(String),
}
