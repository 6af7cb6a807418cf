//! Oriented lattices for celllab continuous-time cellular automata.
//!
//! This crate defines the [`Lattice`] trait, the topology through which the
//! transition engine enumerates links and their endpoints, along with
//! concrete backends, node selection and per-node state storage.
//!
//! # Backends
//!
//! - [`OrientedRaster`]: rows × columns, 4-connected, row 0 at the bottom
//! - [`LinkGraph`]: an explicit adjacency description
//!
//! # Link convention
//!
//! Every link has a fixed tail and head. Horizontal links run left to right
//! and vertical links run bottom to top, so a rule keyed on `(tail, head)`
//! is unambiguous. See [`Link`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod error;
pub mod graph;
pub mod lattice;
pub mod raster;
pub mod region;
pub mod states;

#[cfg(test)]
pub(crate) mod compliance;

pub use boundary::ClosedEdges;
pub use error::RegionError;
pub use graph::LinkGraph;
pub use lattice::{Lattice, Link};
pub use raster::OrientedRaster;
pub use region::Region;
pub use states::NodeStates;
