//! Resilient feed connection
//!
//! One `FeedConnection` owns one logical subscription. It connects, sends the
//! subscription, forwards parsed messages in arrival order, and reconnects
//! with backoff whenever the session is lost.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::domain::{
    ConnectionLoss, ControlKind, FeedEvent, FeedMessage, FeedSession, FeedTermination,
    FeedTransport,
};
use crate::error::TransportError;
use crate::infrastructure::parse_feed_message;

use super::config::FeedConfig;
use super::reconnect::{ReconnectPolicy, RetryDecision};
use super::shutdown::ShutdownListener;

/// How a single session ended
enum SessionEnd {
    /// Receiver dropped, stop for good
    ConsumerGone,
    /// Lost the session, go through backoff
    Lost(ConnectionLoss),
}

/// Producer side of a feed subscription
///
/// Generic over:
/// - `T`: FeedTransport - real WebSocket or a scripted test transport
pub struct FeedConnection<T: FeedTransport> {
    transport: T,
    config: FeedConfig,
}

impl<T: FeedTransport> FeedConnection<T> {
    pub fn new(transport: T, config: FeedConfig) -> Self {
        FeedConnection { transport, config }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Spawn the producer and return the consuming end
    pub fn connect_and_stream(self, shutdown: ShutdownListener) -> FeedStream {
        let (tx, rx) = mpsc::channel(self.config.buffer.max(1));
        let handle = tokio::spawn(self.run(tx, shutdown));
        FeedStream { events: rx, handle }
    }

    /// Run the connection loop until closed, cancelled or exhausted
    pub async fn run(
        self,
        tx: mpsc::Sender<FeedEvent>,
        mut shutdown: ShutdownListener,
    ) -> FeedTermination {
        let subscription = match serde_json::to_string(&self.config.subscription) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "Failed to serialize subscription request");
                return FeedTermination::Closed;
            }
        };

        let mut policy = ReconnectPolicy::new(self.config.reconnect, Instant::now());
        let mut sessions: u64 = 0;

        loop {
            let end = tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    info!(endpoint = %self.config.endpoint, "Feed cancelled");
                    return FeedTermination::Cancelled;
                }
                end = self.run_session(&subscription, &tx, &mut sessions) => end,
            };

            let loss = match end {
                SessionEnd::ConsumerGone => {
                    info!(endpoint = %self.config.endpoint, "Feed consumer dropped, closing");
                    return FeedTermination::Closed;
                }
                SessionEnd::Lost(loss) => loss,
            };

            match policy.record_failure(Instant::now()) {
                RetryDecision::Retry { delay, retry_count } => {
                    warn!(
                        endpoint = %self.config.endpoint,
                        reason = %loss,
                        retry_count,
                        delay_ms = delay.as_millis() as u64,
                        "Feed connection lost, reconnecting"
                    );
                    tokio::select! {
                        biased;
                        _ = shutdown.cancelled() => {
                            info!(endpoint = %self.config.endpoint, "Feed cancelled during backoff");
                            return FeedTermination::Cancelled;
                        }
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
                RetryDecision::Exhausted { retry_count } => {
                    error!(
                        endpoint = %self.config.endpoint,
                        reason = %loss,
                        retry_count,
                        "Feed retries exhausted"
                    );
                    return FeedTermination::Exhausted {
                        attempts: retry_count,
                    };
                }
            }
        }
    }

    async fn run_session(
        &self,
        subscription: &str,
        tx: &mpsc::Sender<FeedEvent>,
        sessions: &mut u64,
    ) -> SessionEnd {
        let timeout = self.config.reconnect.connect_timeout;
        let connect = tokio::time::timeout(timeout, self.transport.connect(&self.config.endpoint));
        let mut session = match connect.await {
            Ok(Ok(session)) => session,
            Ok(Err(e)) => return SessionEnd::Lost(ConnectionLoss::Connect(e)),
            Err(_) => {
                let e = TransportError::Connect(format!("handshake timed out after {timeout:?}"));
                return SessionEnd::Lost(ConnectionLoss::Connect(e));
            }
        };

        if let Err(e) = session.send_text(subscription.to_string()).await {
            return SessionEnd::Lost(ConnectionLoss::Subscribe(e));
        }

        *sessions += 1;
        info!(endpoint = %self.config.endpoint, session = *sessions, "Feed connected");
        if tx
            .send(FeedEvent::Connected { session: *sessions })
            .await
            .is_err()
        {
            return SessionEnd::ConsumerGone;
        }

        loop {
            let next = tokio::select! {
                _ = tx.closed() => return SessionEnd::ConsumerGone,
                next = session.next_text() => next,
            };

            let text = match next {
                Some(Ok(text)) => text,
                Some(Err(e)) => return SessionEnd::Lost(ConnectionLoss::Receive(e)),
                None => return SessionEnd::Lost(ConnectionLoss::ClosedByRemote),
            };

            let message = match parse_feed_message(&text) {
                Ok(message) => message,
                Err(e) => {
                    warn!(error = %e, "Skipping malformed feed message");
                    continue;
                }
            };

            if let FeedMessage::Control(event) = &message {
                match &event.kind {
                    ControlKind::Error => {
                        return SessionEnd::Lost(ConnectionLoss::RemoteError(event.describe()));
                    }
                    ControlKind::Subscribed => info!(event = %event.describe(), "Subscription confirmed"),
                    _ => debug!(event = %event.describe(), "Feed control event"),
                }
            }

            if tx.send(FeedEvent::Message(message)).await.is_err() {
                return SessionEnd::ConsumerGone;
            }
        }
    }
}

/// Consuming end of a feed connection
pub struct FeedStream {
    events: mpsc::Receiver<FeedEvent>,
    handle: JoinHandle<FeedTermination>,
}

impl FeedStream {
    /// Next event; `None` once the producer has stopped
    pub async fn next(&mut self) -> Option<FeedEvent> {
        self.events.recv().await
    }

    /// Stop consuming and wait for the producer's terminal state
    pub async fn termination(self) -> FeedTermination {
        let FeedStream { events, handle } = self;
        drop(events);
        match handle.await {
            Ok(termination) => termination,
            Err(e) => {
                error!(error = %e, panicked = e.is_panic(), "Feed task failed");
                FeedTermination::Failed
            }
        }
    }
}
