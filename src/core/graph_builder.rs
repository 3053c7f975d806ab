//! Candidate edge extraction and pruning
//!
//! Every tetrahedral cell of the system positions proposes its six vertex
//! pairs as candidate edges. A candidate is accepted when its endpoints are
//! different systems, its length is within the jump distance, and its
//! unordered id pair has not been accepted before. Acceptance follows cell
//! order, then pair order within the cell; the first proposal of a pair
//! wins.

use std::collections::HashSet;

use mapper_delaunay::{BowyerWatson, Tetrahedralizer};
use nalgebra::Point3;
use tracing::debug;

use crate::core::error::Result;
use crate::core::models::{canonical_pair, Edge, StellarSystem};

/// Build pruned edges using the default Bowyer-Watson tetrahedralizer
pub fn build_edges(systems: &[StellarSystem], max_jump_distance: f64) -> Result<Vec<Edge>> {
    build_edges_with(&BowyerWatson::new(), systems, max_jump_distance)
}

/// Build pruned edges using the given tetrahedralizer
pub fn build_edges_with<T>(
    tetrahedralizer: &T,
    systems: &[StellarSystem],
    max_jump_distance: f64,
) -> Result<Vec<Edge>>
where
    T: Tetrahedralizer + ?Sized,
{
    let points: Vec<Point3<f64>> = systems.iter().map(StellarSystem::position).collect();
    let cells = tetrahedralizer.tetrahedralize(&points)?;

    let candidates = cells.iter().flat_map(|cell| cell.edges());
    let edges = prune_candidates(systems, candidates, max_jump_distance);

    debug!(
        cells = cells.len(),
        edges = edges.len(),
        max_jump_distance,
        "built candidate graph"
    );
    Ok(edges)
}

/// Accept candidate pairs (indices into `systems`) under the pruning rules.
///
/// Pairs referring to an index outside `systems` are ignored.
pub fn prune_candidates<I>(
    systems: &[StellarSystem],
    candidates: I,
    max_jump_distance: f64,
) -> Vec<Edge>
where
    I: IntoIterator<Item = (usize, usize)>,
{
    let mut accepted: HashSet<(usize, usize)> = HashSet::new();
    let mut edges = Vec::new();

    for (i, j) in candidates {
        let (Some(a), Some(b)) = (systems.get(i), systems.get(j)) else {
            continue;
        };
        if a.id == b.id {
            continue;
        }

        let distance = a.distance_to(b);
        if distance <= max_jump_distance && accepted.insert(canonical_pair(a.id, b.id)) {
            edges.push(Edge::new(a.id, b.id, distance));
        }
    }

    edges
}
