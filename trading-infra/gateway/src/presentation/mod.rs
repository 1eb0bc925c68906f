//! Presentation Layer - Outbound interfaces to downstream consumers
//!
//! This layer contains adapters for systems that consume from us:
//! - SnapshotPublisher: Publishes market snapshots to the cost model
//!
//! Follows Hexagonal Architecture:
//! - Infrastructure = inbound (exchange → gateway)
//! - Presentation = outbound (gateway → consumers)

mod publisher;

pub use publisher::{SnapshotPublisher, SnapshotReader, SnapshotSubscriber, snapshot_channel};
