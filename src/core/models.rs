//! Core data models for stellar-mapper
//!
//! This module contains the fundamental data structures shared by the
//! pipeline stages: catalog rows in, systems and edges out.
//!
//! The serde field names on [`Network`], [`StellarSystem`], [`Component`]
//! and [`Edge`] are the persisted JSON contract and must not change.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::core::connectivity::{self, ConnectivityReport};

/// One catalog row, as handed over by a reader
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawObservation {
    /// System-group identifier; rows sharing it form one system
    pub system_group: i64,
    /// Category token, e.g. `*`, `WD`, `LM?`, `Planet`
    pub category: String,
    /// Object name
    pub object_name: String,
    /// System name (may be empty)
    pub system_name: String,
    /// Right ascension in degrees
    pub ra: f64,
    /// Declination in degrees
    pub dec: f64,
    /// Parallax in milliarcseconds (may be <= 0)
    pub parallax: f64,
    /// Normalized spectral type letters
    pub spectral_type: String,
}

impl RawObservation {
    /// Create a row with the given group, category and object name
    pub fn new(
        system_group: i64,
        category: impl Into<String>,
        object_name: impl Into<String>,
    ) -> Self {
        Self {
            system_group,
            category: category.into(),
            object_name: object_name.into(),
            ..Default::default()
        }
    }

    /// Set the sky position and parallax
    pub fn at(mut self, ra: f64, dec: f64, parallax: f64) -> Self {
        self.ra = ra;
        self.dec = dec;
        self.parallax = parallax;
        self
    }

    pub fn with_system_name(mut self, system_name: impl Into<String>) -> Self {
        self.system_name = system_name.into();
        self
    }

    pub fn with_spectral_type(mut self, spectral_type: impl Into<String>) -> Self {
        self.spectral_type = spectral_type.into();
        self
    }
}

/// A body inside a multi-star system; shares its parent's position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    #[serde(rename = "sp_type")]
    pub spectral_type: String,
}

impl Component {
    pub fn new(name: impl Into<String>, spectral_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spectral_type: spectral_type.into(),
        }
    }
}

/// An aggregated star system placed in the Cartesian frame (parsecs)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StellarSystem {
    /// Dense 0-based id in order of first appearance
    pub id: usize,
    /// Display name
    pub name: String,
    /// Category of the primary (first) row
    #[serde(rename = "obj_type")]
    pub category: String,
    /// Spectral type of the primary (first) row
    #[serde(rename = "sp_type")]
    pub spectral_type: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Components in input order; empty for single-body systems
    #[serde(rename = "stars", default)]
    pub components: Vec<Component>,
}

impl StellarSystem {
    /// Create a single-body system at the given position
    pub fn new(id: usize, name: impl Into<String>, position: Point3<f64>) -> Self {
        Self {
            id,
            name: name.into(),
            category: String::new(),
            spectral_type: String::new(),
            x: position.x,
            y: position.y,
            z: position.z,
            components: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_spectral_type(mut self, spectral_type: impl Into<String>) -> Self {
        self.spectral_type = spectral_type.into();
        self
    }

    pub fn with_components(mut self, components: Vec<Component>) -> Self {
        self.components = components;
        self
    }

    pub fn position(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    /// Euclidean distance to another system in parsecs
    pub fn distance_to(&self, other: &StellarSystem) -> f64 {
        nalgebra::distance(&self.position(), &other.position())
    }

    /// Whether this system was aggregated from more than one row
    pub fn is_multiple(&self) -> bool {
        !self.components.is_empty()
    }
}

/// An undirected connection between two systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub system1_id: usize,
    pub system2_id: usize,
    /// Euclidean distance in parsecs
    pub distance: f64,
}

impl Edge {
    pub fn new(system1_id: usize, system2_id: usize, distance: f64) -> Self {
        Self {
            system1_id,
            system2_id,
            distance,
        }
    }

    /// Canonical (min, max) id pair identifying this edge regardless of direction
    pub fn key(&self) -> (usize, usize) {
        canonical_pair(self.system1_id, self.system2_id)
    }

    /// Whether this edge joins `a` and `b`, in either direction
    pub fn connects(&self, a: usize, b: usize) -> bool {
        self.key() == canonical_pair(a, b)
    }
}

/// Order an unordered id pair as (min, max)
pub fn canonical_pair(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// The generated star map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    /// Maximum edge length in parsecs
    pub jump_distance: f64,
    pub systems: Vec<StellarSystem>,
    #[serde(rename = "connections")]
    pub edges: Vec<Edge>,
}

impl Network {
    /// Create an empty network for the given jump distance
    pub fn new(jump_distance: f64) -> Self {
        Self {
            jump_distance,
            systems: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Look up a system by id
    pub fn system(&self, id: usize) -> Option<&StellarSystem> {
        self.systems
            .get(id)
            .filter(|s| s.id == id)
            .or_else(|| self.systems.iter().find(|s| s.id == id))
    }

    pub fn component_count(&self) -> usize {
        connectivity::count_components(&self.systems, &self.edges)
    }

    pub fn is_connected(&self) -> bool {
        connectivity::is_connected(&self.systems, &self.edges)
    }

    /// Compute the connectivity report for this network
    pub fn connectivity(&self) -> ConnectivityReport {
        ConnectivityReport::from_component_count(self.component_count())
    }

    /// Number of systems built from more than one row
    pub fn multi_star_count(&self) -> usize {
        self.systems.iter().filter(|s| s.is_multiple()).count()
    }
}

/// Which optional category families survive filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InclusionFlags {
    /// Keep `LM` / `LM?` rows
    pub include_low_mass: bool,
    /// Keep `WD` / `WD?` rows
    pub include_white_dwarf: bool,
    /// Keep `BD` / `BD?` rows
    pub include_brown_dwarf: bool,
}

impl InclusionFlags {
    /// Include every optional family
    pub fn all() -> Self {
        Self {
            include_low_mass: true,
            include_white_dwarf: true,
            include_brown_dwarf: true,
        }
    }
}

/// Parameters for one generation pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    /// Maximum edge length in parsecs
    pub max_jump_distance: f64,
    pub inclusion: InclusionFlags,
}

impl GenerationParams {
    pub fn new(max_jump_distance: f64) -> Self {
        Self {
            max_jump_distance,
            inclusion: InclusionFlags::default(),
        }
    }

    pub fn with_inclusion(mut self, inclusion: InclusionFlags) -> Self {
        self.inclusion = inclusion;
        self
    }
}
