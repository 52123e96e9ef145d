//! pn-fluids: incompressible fluid properties for pumpnet.
//!
//! Provides a small fixed table of liquids at reference temperature, each with
//! the two properties the head-loss and pump-power relations need: density and
//! kinematic viscosity.
//!
//! # Example
//!
//! ```
//! use pn_fluids::FluidTable;
//!
//! let water = FluidTable::lookup("water").unwrap();
//! assert!((water.density.value - 998.2).abs() < 1e-9);
//! ```

pub mod error;
pub mod table;

// Re-exports for ergonomics
pub use error::{FluidError, FluidResult};
pub use table::{FluidEntry, FluidProperties, FluidTable};
