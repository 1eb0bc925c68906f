//! Bounded rolling window of processing-time samples

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default number of samples retained
pub const DEFAULT_SAMPLE_CAPACITY: usize = 1000;

/// Summary statistics over the samples currently in the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyStats {
    pub min: Duration,
    pub max: Duration,
    pub avg: Duration,
    pub count: usize,
}

/// Rolling window of durations, oldest evicted once full
#[derive(Debug, Clone)]
pub struct LatencyWindow {
    samples: VecDeque<Duration>,
    capacity: usize,
    /// Running sum in nanoseconds for O(1) mean updates
    sum_nanos: u128,
}

impl LatencyWindow {
    /// Create a window retaining at most `capacity` samples
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            sum_nanos: 0,
        }
    }

    /// Add a sample, evicting the oldest when the window is full
    #[inline]
    pub fn record(&mut self, sample: Duration) {
        if self.samples.len() >= self.capacity
            && let Some(removed) = self.samples.pop_front()
        {
            self.sum_nanos -= removed.as_nanos();
        }
        self.samples.push_back(sample);
        self.sum_nanos += sample.as_nanos();
    }

    /// Mean of the retained samples, zero when empty
    pub fn average(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        let mean = self.sum_nanos / self.samples.len() as u128;
        duration_from_nanos(mean)
    }

    /// Min/max/avg over the retained samples
    pub fn stats(&self) -> Option<LatencyStats> {
        let min = self.samples.iter().min().copied()?;
        let max = self.samples.iter().max().copied()?;
        Some(LatencyStats {
            min,
            max,
            avg: self.average(),
            count: self.samples.len(),
        })
    }

    /// Get the most recent sample
    #[inline]
    pub fn last(&self) -> Option<Duration> {
        self.samples.back().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all samples
    pub fn reset(&mut self) {
        self.samples.clear();
        self.sum_nanos = 0;
    }
}

impl Default for LatencyWindow {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_CAPACITY)
    }
}

fn duration_from_nanos(nanos: u128) -> Duration {
    let secs = (nanos / 1_000_000_000) as u64;
    let subsec = (nanos % 1_000_000_000) as u32;
    Duration::new(secs, subsec)
}
