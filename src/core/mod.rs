//! Core module for stellar-mapper
//!
//! This module provides the data models and pipeline stages that turn
//! catalog rows into a star network.
//!
//! # Architecture
//!
//! - `models`: Core data structures (RawObservation, StellarSystem, Edge, Network)
//! - `error`: Error types using thiserror
//! - `config`: `.stellar_mapper.json` configuration
//! - `coordinates`: RA/Dec/parallax to Cartesian parsecs
//! - `filter`: Category filter with inclusion flags
//! - `aggregator`: Grouping rows into star systems
//! - `graph_builder`: Candidate edges from tetrahedral cells, pruned by jump distance
//! - `connectivity`: Connected-component analysis
//! - `generator`: End-to-end pipeline orchestration
//! - `stats`: Summary statistics for reporting

pub mod models;
pub mod error;
pub mod config;
pub mod coordinates;
pub mod filter;
pub mod aggregator;
pub mod graph_builder;
pub mod connectivity;
pub mod generator;
pub mod stats;

// Re-export commonly used types
pub use models::{
    canonical_pair, Component, Edge, GenerationParams, InclusionFlags, Network, RawObservation,
    StellarSystem,
};
pub use error::{MapperError, Result, ResultExt};
pub use config::{MapperConfig, DEFAULT_CONFIG_FILE};
pub use coordinates::{convert, parallax_to_distance, to_point};
pub use filter::{filter_categories, is_retained, CategoryFamily};
pub use aggregator::aggregate;
pub use graph_builder::{build_edges, build_edges_with, prune_candidates};
pub use connectivity::{connected_components, count_components, is_connected, ConnectivityReport};
pub use generator::{generate_network, NetworkGenerator};
pub use stats::{DistanceSummary, NetworkStatistics};
