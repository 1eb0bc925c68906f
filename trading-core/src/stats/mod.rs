//! Processing-latency bookkeeping
//!
//! # Design
//!
//! - A bounded window keeps the most recent samples, oldest evicted
//! - A running sum keeps the rolling mean O(1) per sample
//! - Timing is an explicit value: start, run the operation, record

mod rolling;
mod timer;

pub use rolling::{DEFAULT_SAMPLE_CAPACITY, LatencyStats, LatencyWindow};
pub use timer::ProcessingTimer;
