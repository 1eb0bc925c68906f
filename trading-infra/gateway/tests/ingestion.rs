//! Ingestion integration tests
//!
//! Drives the full feed → pipeline → publisher path over a scripted
//! transport and checks the snapshots that come out the other end.

mod common;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use common::{Frame, ScriptedTransport, Step, text};
use gateway::{
    FeedConfig, FeedConnection, FeedTermination, IngestionConfig, IngestionPipeline,
    ReconnectConfig, SubscriptionRequest, run_ingestion, shutdown_channel, snapshot_channel,
};
use trading_core::PriceLevel;

fn config(max_retries: u32) -> FeedConfig {
    FeedConfig::new(
        "wss://example.invalid/ws",
        SubscriptionRequest::books("BTC-USDT-SWAP", None),
    )
    .with_reconnect(ReconnectConfig::default().with_max_retries(max_retries))
}

// ============================================================================
// Pipeline scenarios
// ============================================================================

#[test]
fn test_first_levels_produce_best_bid_ask_and_spread() {
    let mut pipeline = IngestionPipeline::new(IngestionConfig::default());
    let snapshot = pipeline
        .process(r#"{"data":[{"bids":[["100.0","2.0"]],"asks":[["101.0","3.0"]]}]}"#)
        .unwrap();

    assert_eq!(snapshot.best_bid(), Some(&PriceLevel::new(dec!(100.0), dec!(2.0))));
    assert_eq!(snapshot.best_ask(), Some(&PriceLevel::new(dec!(101.0), dec!(3.0))));
    assert_eq!(snapshot.spread(), Some(dec!(1.0)));
}

#[test]
fn test_snapshot_emitted_with_empty_side() {
    let mut pipeline = IngestionPipeline::new(IngestionConfig::default());
    pipeline.process(r#"{"data":[{"bids":[["100.0","2.0"]],"asks":[["101.0","3.0"]]}]}"#);

    let snapshot = pipeline
        .process(r#"{"data":[{"bids":[],"asks":[["101.0","0"]]}]}"#)
        .unwrap();

    assert_eq!(snapshot.best_ask(), None);
    assert_eq!(snapshot.ask_depth, Decimal::ZERO);
    assert_eq!(snapshot.bid_depth, dec!(2.0));
    assert_eq!(snapshot.mid_price(), None);
}

#[test]
fn test_invalid_shapes_are_skipped() {
    let mut pipeline = IngestionPipeline::new(IngestionConfig::default());

    assert!(pipeline.process("garbage").is_none());
    assert!(pipeline.process(r#"{"data":[{"bids":[]}]}"#).is_none());
    assert!(pipeline.process(r#"{"data":[{"bids":"x","asks":[]}]}"#).is_none());
    assert!(pipeline.process(r#"{"data":[42]}"#).is_none());
    assert!(pipeline.latency().is_empty());
}

#[test]
fn test_latency_window_caps_at_thousand() {
    let mut pipeline = IngestionPipeline::new(IngestionConfig::default());
    for i in 0..1_200 {
        let raw = format!(r#"{{"data":[{{"bids":[["{}","1"]],"asks":[]}}]}}"#, 100 + i % 7);
        pipeline.process(&raw).unwrap();
    }
    assert_eq!(pipeline.latency().len(), 1_000);
}

// ============================================================================
// End to end
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_run_ingestion_publishes_in_order_and_resets_per_session() {
    let transport = ScriptedTransport::new(vec![
        Step::Session(vec![
            text(r#"{"event":"subscribe","arg":{"channel":"books"}}"#),
            text(r#"{"action":"snapshot","data":[{"bids":[["100","1"]],"asks":[["101","1"]]}]}"#),
            text(r#"{"action":"update","data":[{"bids":[["99","2"]],"asks":[]}]}"#),
            Frame::Close,
        ]),
        // Second session only sends an update; the old levels must be gone
        Step::Session(vec![
            text(r#"{"action":"update","data":[{"bids":[["98","5"]],"asks":[]}]}"#),
            Frame::Close,
        ]),
    ]);
    let (_handle, listener) = shutdown_channel();
    let feed = FeedConnection::new(transport, config(3)).connect_and_stream(listener);
    let (publisher, mut subscriber) = snapshot_channel(16);
    let reader = subscriber.reader();

    let pipeline = IngestionPipeline::new(IngestionConfig::default());
    let task = tokio::spawn(run_ingestion(feed, pipeline, publisher));

    let mut snapshots = Vec::new();
    while let Some(snapshot) = subscriber.recv().await {
        snapshots.push(snapshot);
    }

    assert_eq!(
        task.await.unwrap(),
        FeedTermination::Exhausted { attempts: 3 }
    );
    assert_eq!(snapshots.len(), 3);
    assert_eq!(
        snapshots.iter().map(|s| s.sequence).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(snapshots[1].bid_depth, dec!(3));
    assert_eq!(snapshots[2].bids, vec![PriceLevel::new(dec!(98), dec!(5))]);
    assert!(snapshots[2].asks.is_empty());
    assert_eq!(reader.latest().map(|s| s.sequence), Some(3));
}

#[tokio::test(start_paused = true)]
async fn test_run_ingestion_stops_when_subscriber_drops() {
    let transport = ScriptedTransport::new(vec![Step::Session(vec![
        text(r#"{"data":[{"bids":[["100","1"]],"asks":[]}]}"#),
        Frame::Hang,
    ])]);
    let (_handle, listener) = shutdown_channel();
    let feed = FeedConnection::new(transport, config(10)).connect_and_stream(listener);
    let (publisher, subscriber) = snapshot_channel(1);
    drop(subscriber);

    let pipeline = IngestionPipeline::new(IngestionConfig::default());
    let termination = run_ingestion(feed, pipeline, publisher).await;

    assert_eq!(termination, FeedTermination::Closed);
}
