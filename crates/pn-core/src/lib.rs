//! pn-core: stable foundation for pumpnet.
//!
//! Contains:
//! - units (uom SI types + constructors for the engineering units pumpnet speaks)
//! - numeric (Real + validation helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::PnError;
pub use numeric::*;
pub use units::*;
