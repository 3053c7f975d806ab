//! File formats for stellar-mapper
//!
//! Catalog CSV in, network JSON out (and back in for `--check`).

pub mod catalog;
pub mod network_json;

pub use catalog::{normalize_spectral_type, read_catalog, read_catalog_from};
pub use network_json::{
    network_to_json, read_network, read_network_from, write_network, write_network_to,
};
