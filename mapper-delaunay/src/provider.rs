//! Tetrahedralizer trait and the cell model
//!
//! Consumers depend on this trait only. The contract: given at least four
//! non-degenerate points, return tetrahedral cells covering their convex
//! hull; degenerate input yields no cells.

use crate::error::Result;
use nalgebra::Point3;

/// The six vertex pairs of a tetrahedron, in enumeration order
pub const CELL_EDGES: [(usize, usize); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];

/// A tetrahedral cell referencing four input points by index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub vertices: [usize; 4],
}

impl Cell {
    pub fn new(vertices: [usize; 4]) -> Self {
        Self { vertices }
    }

    /// The six vertex-index pairs of this cell, in `CELL_EDGES` order
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        CELL_EDGES
            .iter()
            .map(move |&(i, j)| (self.vertices[i], self.vertices[j]))
    }

    pub fn contains_vertex(&self, index: usize) -> bool {
        self.vertices.contains(&index)
    }
}

/// A 3-D Delaunay tetrahedralization routine
pub trait Tetrahedralizer {
    /// Tetrahedralize `points`, returning cells in a deterministic order.
    ///
    /// Fails only for input no tetrahedralization can handle, such as
    /// non-finite coordinates.
    fn tetrahedralize(&self, points: &[Point3<f64>]) -> Result<Vec<Cell>>;
}
