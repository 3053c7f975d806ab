//! stellar_mapper - Jump-network generator for nearby star systems
//!
//! This library turns a catalog of nearby stellar objects into a navigable
//! network: objects are filtered by category, grouped into star systems,
//! placed in 3-D Cartesian space from RA/Dec/parallax, and connected along
//! the edges of a Delaunay tetrahedralization that are no longer than a
//! maximum jump distance. It is designed to be consumed by:
//! - The CLI binary (src/bin/stellar_mapper.rs)
//! - Tools that read or post-process the generated network JSON
//!
//! # Architecture
//!
//! This crate follows the "Library-First" pattern:
//! - **core**: Pipeline stages, data models, configuration and errors
//! - **formats**: Catalog CSV reader and network JSON persistence
//! - **bin/stellar_mapper.rs**: Thin wrapper that calls the library
//!
//! The tetrahedralization itself lives in the `mapper-delaunay` workspace
//! crate behind the `Tetrahedralizer` trait.
//!
//! # Example
//!
//! ```rust
//! use stellar_mapper::{generate_network, GenerationParams, RawObservation};
//!
//! let rows = vec![
//!     RawObservation::new(1, "*", "alf Cen A").at(219.9, -60.8, 747.1),
//!     RawObservation::new(1, "*", "alf Cen B").at(219.9, -60.8, 747.1),
//! ];
//! let network = generate_network(&rows, &GenerationParams::new(10.0)).unwrap();
//! assert_eq!(network.systems.len(), 1);
//! assert!(network.is_connected());
//! ```

pub mod core;
pub mod formats;

pub use crate::core::{
    aggregate, build_edges, connected_components, count_components, filter_categories,
    generate_network, is_connected, prune_candidates, Component, ConnectivityReport, Edge,
    GenerationParams, InclusionFlags, MapperConfig, MapperError, Network, NetworkGenerator,
    NetworkStatistics, RawObservation, Result, StellarSystem,
};
pub use formats::{read_catalog, read_network, write_network};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the version of the stellar_mapper library
pub fn version() -> &'static str {
    VERSION
}
