//! Network generation pipeline
//!
//! Category filter → system aggregation → candidate graph. Each stage
//! consumes its input fully before the next starts; the generator holds no
//! state between calls besides its tetrahedralizer.

use mapper_delaunay::{BowyerWatson, Tetrahedralizer};
use tracing::{debug, info};

use crate::core::aggregator::aggregate;
use crate::core::error::Result;
use crate::core::filter::filter_categories;
use crate::core::graph_builder::build_edges_with;
use crate::core::models::{GenerationParams, Network, RawObservation};

/// Builds [`Network`]s from catalog rows
#[derive(Debug, Clone, Default)]
pub struct NetworkGenerator<T = BowyerWatson> {
    tetrahedralizer: T,
}

impl NetworkGenerator<BowyerWatson> {
    /// Create a generator using Bowyer-Watson with the default tolerance
    pub fn new() -> Self {
        Self::with_tetrahedralizer(BowyerWatson::new())
    }

    /// Create a generator with a custom coincident-point tolerance (parsecs)
    pub fn with_tolerance(tolerance: f64) -> Result<Self> {
        Ok(Self::with_tetrahedralizer(BowyerWatson::with_tolerance(
            tolerance,
        )?))
    }
}

impl<T: Tetrahedralizer> NetworkGenerator<T> {
    pub fn with_tetrahedralizer(tetrahedralizer: T) -> Self {
        Self { tetrahedralizer }
    }

    /// Run the full pipeline over `rows`
    pub fn generate(&self, rows: &[RawObservation], params: &GenerationParams) -> Result<Network> {
        let retained: Vec<&RawObservation> = filter_categories(rows, &params.inclusion).collect();
        debug!(
            rows = rows.len(),
            retained = retained.len(),
            "filtered catalog categories"
        );

        let systems = aggregate(retained);
        let edges = build_edges_with(&self.tetrahedralizer, &systems, params.max_jump_distance)?;

        info!(
            systems = systems.len(),
            edges = edges.len(),
            jump_distance = params.max_jump_distance,
            "network generated"
        );

        Ok(Network {
            jump_distance: params.max_jump_distance,
            systems,
            edges,
        })
    }
}

/// Generate a network with the default generator
pub fn generate_network(rows: &[RawObservation], params: &GenerationParams) -> Result<Network> {
    NetworkGenerator::new().generate(rows, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::InclusionFlags;
    use std::collections::HashSet;

    fn star(group: i64, name: &str, ra: f64, dec: f64, parallax: f64) -> RawObservation {
        RawObservation::new(group, "*", name).at(ra, dec, parallax)
    }

    /// Five systems within a few parsecs of each other
    fn neighbourhood() -> Vec<RawObservation> {
        vec![
            star(1, "A", 0.0, 0.0, 500.0),
            star(2, "B", 60.0, 10.0, 400.0),
            star(3, "C", 120.0, -15.0, 450.0),
            star(4, "D", 200.0, 40.0, 350.0),
            star(5, "E", 300.0, -50.0, 420.0),
        ]
    }

    #[test]
    fn test_empty_input() {
        let network = generate_network(&[], &GenerationParams::new(10.0)).unwrap();

        assert!(network.systems.is_empty());
        assert!(network.edges.is_empty());
        assert_eq!(network.component_count(), 0);
        assert!(!network.is_connected());
        assert_eq!(network.jump_distance, 10.0);
    }

    #[test]
    fn test_multi_star_group_becomes_one_system() {
        let rows = vec![
            RawObservation::new(1, "*", "Proxima Cen").with_spectral_type("M"),
            RawObservation::new(1, "*", "alf Cen A").with_spectral_type("G"),
            RawObservation::new(1, "*", "alf Cen B").with_spectral_type("K"),
        ];
        let network = generate_network(&rows, &GenerationParams::new(10.0)).unwrap();

        assert_eq!(network.systems.len(), 1);
        assert_eq!(network.systems[0].components.len(), 3);
        assert_eq!(network.multi_star_count(), 1);
        assert!(network.is_connected());
    }

    #[test]
    fn test_low_mass_uncertain_row_toggle() {
        let mut rows = neighbourhood();
        rows.push(RawObservation::new(9, "LM?", "faint").at(10.0, 10.0, 480.0));

        let excluded = generate_network(&rows, &GenerationParams::new(10.0)).unwrap();
        assert_eq!(excluded.systems.len(), 5);
        assert!(excluded.systems.iter().all(|s| s.name != "faint"));

        let params = GenerationParams::new(10.0).with_inclusion(InclusionFlags {
            include_low_mass: true,
            ..Default::default()
        });
        let included = generate_network(&rows, &params).unwrap();
        assert_eq!(included.systems.len(), 6);
        assert_eq!(included.systems[5].name, "faint");
    }

    #[test]
    fn test_planets_are_not_systems() {
        let mut rows = neighbourhood();
        rows.push(RawObservation::new(1, "Planet", "A b").at(0.0, 0.0, 500.0));

        let network = generate_network(&rows, &GenerationParams::new(10.0)).unwrap();
        assert_eq!(network.systems.len(), 5);
        assert!(network.systems[0].components.is_empty());
    }

    #[test]
    fn test_neighbourhood_is_connected() {
        let network = generate_network(&neighbourhood(), &GenerationParams::new(10.0)).unwrap();

        assert_eq!(network.systems.len(), 5);
        assert!(!network.edges.is_empty());
        assert!(network.is_connected());
        assert_eq!(network.connectivity().component_count, 1);
    }

    #[test]
    fn test_tight_jump_distance_splits_network() {
        let network = generate_network(&neighbourhood(), &GenerationParams::new(0.5)).unwrap();

        assert!(network.edges.is_empty());
        assert_eq!(network.component_count(), 5);
    }

    #[test]
    fn test_edges_respect_invariants() {
        let network = generate_network(&neighbourhood(), &GenerationParams::new(3.0)).unwrap();

        let mut seen = HashSet::new();
        for edge in &network.edges {
            assert_ne!(edge.system1_id, edge.system2_id);
            assert!(seen.insert(edge.key()), "duplicate edge {:?}", edge);
            assert!(edge.distance <= 3.0);

            let a = &network.systems[edge.system1_id];
            let b = &network.systems[edge.system2_id];
            assert_eq!(edge.distance, a.distance_to(b));
        }
    }

    #[test]
    fn test_non_finite_position_is_invalid_geometry() {
        let rows = vec![star(1, "bad", f64::NAN, 0.0, 100.0)];
        let err = generate_network(&rows, &GenerationParams::new(10.0)).unwrap_err();
        assert!(err.is_invalid_geometry());
    }

    #[test]
    fn test_custom_tolerance() {
        assert!(NetworkGenerator::with_tolerance(1e-6).is_ok());
        assert!(NetworkGenerator::with_tolerance(-1.0).is_err());
    }
}
