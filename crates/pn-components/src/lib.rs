//! pn-components: pipe elements and their head-loss models.
//!
//! Provides:
//! - `PipeSegment` with Darcy-Weisbach friction loss (Swamee-Jain for turbulent flow)
//! - A catalog of fitting loss coefficients carried on each segment
//! - Series accumulation of friction head over an ordered run of segments
//!
//! Loss functions never fail: degenerate geometry maps to a very large head
//! (`DEGENERATE_HEAD_M`) so an ill-formed run is simply the worst option
//! available to a flow-split solver.
//!
//! # Example
//!
//! ```
//! use pn_components::{PipeSegment, series_head_loss};
//! use pn_core::units::{m, m3ph, mm};
//! use pn_fluids::FluidTable;
//!
//! let water = FluidTable::lookup("water").unwrap();
//! let run = vec![PipeSegment::new(m(100.0), mm(100.0), mm(0.15))];
//! let head = series_head_loss(&run, m3ph(100.0), &water);
//! assert!((head - 14.35).abs() < 0.15);
//! ```

pub mod fitting;
pub mod pipe;
pub mod series;

// Re-exports
pub use fitting::Fitting;
pub use pipe::{DEGENERATE_HEAD_M, FlowRegime, PipeSegment, SegmentLoss, friction_factor};
pub use series::{SeriesLoss, series_head_loss, series_losses};
