//! Ingestion pipeline: feed messages in, market snapshots out

use chrono::Utc;
use tracing::{debug, info, trace, warn};
use trading_core::{LatencyWindow, MarketSnapshot, ProcessingTimer, Side, Timestamp};

use crate::domain::{
    BookAction, BookStore, BookUpdate, DepthReader, FeedEvent, FeedMessage, FeedTermination,
    OrderBook, OrderBookWriter,
};
use crate::infrastructure::{parse_book_update, parse_feed_message};
use crate::presentation::SnapshotPublisher;

use super::config::IngestionConfig;
use super::feed_connection::FeedStream;

/// Applies feed messages to a book and emits one snapshot per applied update
///
/// The pipeline is the only writer of its book. Generic over:
/// - `B`: BookStore - the ordered book implementation
pub struct IngestionPipeline<B = OrderBook> {
    book: B,
    latency: LatencyWindow,
    depth_levels: usize,
    sequence: u64,
}

impl IngestionPipeline<OrderBook> {
    pub fn new(config: IngestionConfig) -> Self {
        Self::with_book(OrderBook::new(), config)
    }
}

impl Default for IngestionPipeline<OrderBook> {
    fn default() -> Self {
        Self::new(IngestionConfig::default())
    }
}

impl<B: BookStore> IngestionPipeline<B> {
    pub fn with_book(book: B, config: IngestionConfig) -> Self {
        IngestionPipeline {
            book,
            latency: LatencyWindow::new(config.latency_samples),
            depth_levels: config.depth_levels,
            sequence: 0,
        }
    }

    /// Parse and apply a raw text message
    pub fn process(&mut self, raw: &str) -> Option<MarketSnapshot> {
        match parse_feed_message(raw) {
            Ok(message) => self.handle(message),
            Err(e) => {
                warn!(error = %e, "Skipping malformed feed message");
                None
            }
        }
    }

    /// Apply an already classified message
    pub fn handle(&mut self, message: FeedMessage) -> Option<MarketSnapshot> {
        match message {
            FeedMessage::Control(event) => {
                debug!(event = %event.describe(), "Feed control event");
                None
            }
            FeedMessage::Ignored => {
                trace!("Ignoring feed message without book data");
                None
            }
            FeedMessage::Book(message) => match parse_book_update(&message) {
                Ok(update) => Some(self.apply(update)),
                Err(e) => {
                    warn!(error = %e, "Skipping invalid book message");
                    None
                }
            },
        }
    }

    /// Apply a validated update and build the resulting snapshot
    pub fn apply(&mut self, update: BookUpdate) -> MarketSnapshot {
        let timer = ProcessingTimer::start();

        if update.action == BookAction::Snapshot {
            self.book.clear();
        }
        for (price, size) in &update.bids {
            self.book.apply_delta(Side::Bid, *price, *size);
        }
        for (price, size) in &update.asks {
            self.book.apply_delta(Side::Ask, *price, *size);
        }

        let processing_time = timer.record_into(&mut self.latency);
        let timestamp = update.timestamp.unwrap_or_else(Utc::now);
        self.snapshot(timestamp, processing_time)
    }

    fn snapshot(
        &mut self,
        timestamp: Timestamp,
        processing_time: std::time::Duration,
    ) -> MarketSnapshot {
        self.sequence += 1;
        let snapshot = MarketSnapshot {
            sequence: self.sequence,
            timestamp,
            bids: self.book.top_of_book(Side::Bid, self.depth_levels),
            asks: self.book.top_of_book(Side::Ask, self.depth_levels),
            bid_depth: self.book.aggregate_depth(Side::Bid, self.depth_levels),
            ask_depth: self.book.aggregate_depth(Side::Ask, self.depth_levels),
            processing_time,
            avg_latency: self.latency.average(),
        };

        trace!(
            sequence = snapshot.sequence,
            bid_depth = %snapshot.bid_depth,
            ask_depth = %snapshot.ask_depth,
            "Built snapshot"
        );
        snapshot
    }

    /// Empty the book, used when a new session starts
    pub fn reset_book(&mut self) {
        self.book.clear();
    }

    pub fn book(&self) -> &B {
        &self.book
    }

    pub fn latency(&self) -> &LatencyWindow {
        &self.latency
    }
}

/// Drive a pipeline from a feed until the feed terminates
///
/// The book is rebuilt at every new session. Stops early, closing the feed,
/// when the snapshot subscriber is gone.
pub async fn run_ingestion<B: BookStore>(
    mut feed: FeedStream,
    mut pipeline: IngestionPipeline<B>,
    mut publisher: SnapshotPublisher,
) -> FeedTermination {
    while let Some(event) = feed.next().await {
        match event {
            FeedEvent::Connected { session } => {
                debug!(session, "New feed session, resetting book");
                pipeline.reset_book();
            }
            FeedEvent::Message(message) => {
                if let Some(snapshot) = pipeline.handle(message)
                    && publisher.publish(snapshot).await.is_err()
                {
                    info!("Snapshot subscriber dropped, stopping ingestion");
                    break;
                }
            }
        }
    }

    feed.termination().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
    use trading_core::PriceLevel;

    /// Collects the messages of events at INFO and above
    #[derive(Clone, Default)]
    struct InfoEvents(Arc<Mutex<Vec<String>>>);

    impl<S: Subscriber> Layer<S> for InfoEvents {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() <= Level::INFO {
                self.0.lock().unwrap().push(event.metadata().name().to_string());
            }
        }
    }

    #[test]
    fn test_control_event_yields_none() {
        let mut pipeline = IngestionPipeline::new(IngestionConfig::default());
        assert!(pipeline.process(r#"{"event":"subscribe"}"#).is_none());
        assert!(pipeline.latency().is_empty());
    }

    #[test]
    fn test_control_event_not_logged_at_info() {
        let events = InfoEvents::default();
        let subscriber = tracing_subscriber::registry().with(events.clone());

        tracing::subscriber::with_default(subscriber, || {
            let mut pipeline = IngestionPipeline::new(IngestionConfig::default());
            pipeline.process(r#"{"event":"subscribe","arg":{"channel":"books"}}"#);
            pipeline.process(r#"{"event":"notice","msg":"reconnect soon"}"#);
        });

        assert!(events.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_action_replaces_book() {
        let mut pipeline = IngestionPipeline::new(IngestionConfig::default());
        pipeline.process(r#"{"data":[{"bids":[["99","1"]],"asks":[["102","1"]]}]}"#);

        let snapshot = pipeline
            .process(r#"{"action":"snapshot","data":[{"bids":[["100","2"]],"asks":[["101","3"]]}]}"#)
            .unwrap();

        assert_eq!(snapshot.bids, vec![PriceLevel::new(dec!(100), dec!(2))]);
        assert_eq!(snapshot.asks, vec![PriceLevel::new(dec!(101), dec!(3))]);
    }

    #[test]
    fn test_invalid_level_does_not_half_apply() {
        let mut pipeline = IngestionPipeline::new(IngestionConfig::default());
        pipeline.process(r#"{"data":[{"bids":[["100","1"]],"asks":[]}]}"#);

        let result =
            pipeline.process(r#"{"data":[{"bids":[["100","5"],["oops","1"]],"asks":[]}]}"#);

        assert!(result.is_none());
        assert_eq!(
            pipeline.book().best_bid(),
            Some(PriceLevel::new(dec!(100), dec!(1)))
        );
    }

    #[test]
    fn test_out_of_range_sizes_are_skipped() {
        let mut pipeline = IngestionPipeline::new(IngestionConfig::default());
        pipeline.process(r#"{"data":[{"bids":[["100","1"]],"asks":[]}]}"#);

        let result = pipeline.process(
            r#"{"data":[{"bids":[["99","79228162514264337593543950335"],["98","79228162514264337593543950335"]],"asks":[]}]}"#,
        );

        assert!(result.is_none());
        assert_eq!(pipeline.book().len(Side::Bid), 1);

        let next = pipeline
            .process(r#"{"data":[{"bids":[["99","2"]],"asks":[]}]}"#)
            .unwrap();
        assert_eq!(next.bid_depth, dec!(3));
    }

    #[test]
    fn test_depth_and_levels_limited() {
        let config = IngestionConfig::default().with_depth_levels(2);
        let mut pipeline = IngestionPipeline::new(config);
        let snapshot = pipeline
            .process(r#"{"data":[{"bids":[["100","1"],["99","2"],["98","4"]],"asks":[]}]}"#)
            .unwrap();

        assert_eq!(snapshot.bids.len(), 2);
        assert_eq!(snapshot.bid_depth, dec!(3));
        assert_eq!(snapshot.ask_depth, dec!(0));
    }

    #[test]
    fn test_sequence_and_timestamp() {
        let mut pipeline = IngestionPipeline::new(IngestionConfig::default());
        let first = pipeline
            .process(r#"{"data":[{"bids":[],"asks":[],"ts":"1700000000000"}]}"#)
            .unwrap();
        let second = pipeline
            .process(r#"{"data":[{"bids":[],"asks":[]}]}"#)
            .unwrap();

        assert_eq!(first.sequence, 1);
        assert_eq!(second.sequence, 2);
        assert_eq!(first.timestamp.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_latency_window_bounded() {
        let config = IngestionConfig::default().with_latency_samples(5);
        let mut pipeline = IngestionPipeline::new(config);
        for _ in 0..20 {
            pipeline.process(r#"{"data":[{"bids":[["100","1"]],"asks":[]}]}"#);
        }
        assert_eq!(pipeline.latency().len(), 5);
        assert!(pipeline.latency().average() < Duration::from_secs(1));
    }
}
