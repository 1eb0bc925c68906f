//! Scoped timer for measuring a single operation

use std::time::{Duration, Instant};

use super::LatencyWindow;

/// Started before an operation, stopped after it
///
/// ```
/// use trading_core::{LatencyWindow, ProcessingTimer};
///
/// let mut window = LatencyWindow::new(10);
/// let timer = ProcessingTimer::start();
/// let _sum: u64 = (0..100).sum();
/// let elapsed = timer.record_into(&mut window);
/// assert_eq!(window.last(), Some(elapsed));
/// ```
#[derive(Debug, Clone, Copy)]
#[must_use = "a timer measures nothing unless it is stopped"]
pub struct ProcessingTimer {
    started: Instant,
}

impl ProcessingTimer {
    #[inline]
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Elapsed time without consuming the timer
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Stop the timer and append the elapsed time to `window`
    #[inline]
    pub fn record_into(self, window: &mut LatencyWindow) -> Duration {
        let elapsed = self.started.elapsed();
        window.record(elapsed);
        elapsed
    }
}
