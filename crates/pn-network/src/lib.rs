//! pn-network: series-parallel-series topology for pumpnet.
//!
//! Provides:
//! - Immutable `Network` snapshots (pre run, named parallel branches, post run)
//! - A caller-owned `NetworkBuilder` with the add/remove editing operations
//!   a form front end needs
//!
//! # Example
//!
//! ```
//! use pn_network::NetworkBuilder;
//!
//! let mut builder = NetworkBuilder::new();
//! builder.push_pre_default();
//! builder.add_branch_default();
//! builder.add_branch_default();
//! let network = builder.build().unwrap();
//!
//! assert_eq!(network.pre().len(), 1);
//! assert_eq!(network.branches().len(), 2);
//! assert_eq!(network.branches()[1].name(), "Branch 2");
//! ```

pub mod builder;
pub mod error;
pub mod network;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::NetworkBuilder;
pub use error::{NetworkError, NetworkResult};
pub use network::{Branch, Network, SegmentLocation};
