//! Impact Models
//!
//! Implementations of market impact estimation models.
//!
//! - Almgren-Chriss: optimal liquidation trajectory and expected shortfall
//! - Linear: closed-form fallback, Impact = γX + ησ√(X/L)

mod almgren_chriss;
mod linear;
mod protocol;

pub use almgren_chriss::{AlmgrenChriss, SINH_EPSILON};
pub use linear::LinearImpact;
pub use protocol::ImpactModel;
