//! Impact Model Protocol
//!
//! Core trait for impact estimation (SOLID: OCP)

use crate::domain::ImpactEstimate;

/// Impact estimation interface (Open for extension, closed for modification)
///
/// Implementations estimate the market impact of executing a trade size.
/// All implementations must be thread-safe (Send + Sync).
pub trait ImpactModel: Send + Sync {
    /// Estimate impact for a trade
    ///
    /// # Arguments
    /// * `trade_size` - Quantity to execute (X)
    /// * `volatility` - Volatility for this call (σ)
    /// * `liquidity` - Visible depth on both sides of the book
    /// * `reference_price` - Current price of the instrument
    ///
    /// The result may contain non-finite values; callers decide how to
    /// recover.
    fn estimate(
        &self,
        trade_size: f64,
        volatility: f64,
        liquidity: f64,
        reference_price: f64,
    ) -> ImpactEstimate;

    /// Get the model name for logging/debugging
    fn name(&self) -> &str;
}
