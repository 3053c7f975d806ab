//! Incremental Bowyer-Watson tetrahedralization
//!
//! The mesh starts from one tetrahedron spanned by input points, closed off
//! by four ghost cells. A ghost cell pairs a hull face with a vertex at
//! infinity, so the mesh always covers all of space and hull cells are
//! never lost. A point lying beyond a hull face conflicts with that face's
//! ghost cell.
//!
//! Each insertion walks from the last created cell to the one containing
//! the new point. The cavity of conflicting cells is then grown by a flood
//! fill over face neighbours. Cavities whose boundary would produce a flat
//! or inverted cell under rounding are repaired before the mesh is touched.
//!
//! Insertion order, cavity order and slot reuse are all fixed, so the
//! returned cell order is reproducible for a given input.

use std::collections::{HashMap, HashSet};

use nalgebra::Point3;
use tracing::debug;

use crate::error::{DelaunayError, Result};
use crate::geometry::{
    distinct_indices, initial_simplex, insphere, is_degenerate_triangle, orientation, Sign,
};
use crate::provider::{Cell, Tetrahedralizer};

/// Default distance under which two points count as coincident
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Vertex index standing for the point at infinity
const GHOST: usize = usize::MAX;

/// Neighbour slot not yet linked
const UNLINKED: usize = usize::MAX;

/// Attempts at shrinking or growing a cavity before the point is skipped
const MAX_CAVITY_REPAIRS: usize = 64;

/// Bowyer-Watson tetrahedralizer with a coincident-point tolerance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BowyerWatson {
    tolerance: f64,
}

impl BowyerWatson {
    /// Create a tetrahedralizer with the default tolerance
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Create a tetrahedralizer with a custom coincident-point tolerance
    pub fn with_tolerance(tolerance: f64) -> Result<Self> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(DelaunayError::InvalidTolerance(tolerance));
        }
        Ok(Self { tolerance })
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl Default for BowyerWatson {
    fn default() -> Self {
        Self::new()
    }
}

impl Tetrahedralizer for BowyerWatson {
    fn tetrahedralize(&self, points: &[Point3<f64>]) -> Result<Vec<Cell>> {
        if let Some(index) = points
            .iter()
            .position(|p| !p.coords.iter().all(|c| c.is_finite()))
        {
            return Err(DelaunayError::NonFiniteCoordinate { index });
        }

        if points.len() < 4 {
            debug!(points = points.len(), "too few points to tetrahedralize");
            return Ok(Vec::new());
        }

        let indices = distinct_indices(points, self.tolerance);
        let simplex = if indices.len() < 4 {
            None
        } else {
            initial_simplex(points, &indices, self.tolerance).filter(|&[a, b, c, d]| {
                orientation(&points[a], &points[b], &points[c], &points[d]) != Sign::Zero
            })
        };
        let Some(simplex) = simplex else {
            debug!(
                points = points.len(),
                distinct = indices.len(),
                "degenerate point set, no cells"
            );
            return Ok(Vec::new());
        };

        let mut mesh = Mesh::new(points, simplex);
        let unplaced = indices
            .iter()
            .filter(|&&i| !simplex.contains(&i))
            .filter(|&&i| !mesh.insert(i))
            .count();
        if unplaced > 0 {
            debug!(unplaced, "points could not be inserted into the mesh");
        }

        let cells = mesh.into_cells();
        debug!(
            points = points.len(),
            distinct = indices.len(),
            cells = cells.len(),
            "tetrahedralization complete"
        );
        Ok(cells)
    }
}

/// Mesh cell. `neighbors[i]` is the cell across the face opposite
/// `vertices[i]`.
#[derive(Debug, Clone)]
struct Tetrahedron {
    vertices: [usize; 4],
    neighbors: [usize; 4],
    alive: bool,
}

impl Tetrahedron {
    fn ghost_index(&self) -> Option<usize> {
        self.vertices.iter().position(|&v| v == GHOST)
    }

    fn face_key(&self, opposite: usize) -> [usize; 3] {
        let mut key = [0; 3];
        let others = (0..4).filter(|&j| j != opposite).map(|j| self.vertices[j]);
        for (slot, v) in key.iter_mut().zip(others) {
            *slot = v;
        }
        key.sort_unstable();
        key
    }
}

/// A cavity face kept when the cavity is re-triangulated
#[derive(Debug, Clone, Copy)]
struct BoundaryFace {
    cell: usize,
    face: usize,
    neighbor: usize,
    /// Slot of `cell` in `neighbor.neighbors`
    back: usize,
}

enum Boundary {
    Valid(Vec<BoundaryFace>),
    /// `cell` would yield a bad cell through its face shared with `neighbor`
    Invalid { cell: usize, neighbor: usize },
}

/// Working mesh over the input points. Every finite cell is positively
/// oriented.
struct Mesh<'a> {
    points: &'a [Point3<f64>],
    tetrahedra: Vec<Tetrahedron>,
    free: Vec<usize>,
    last: usize,
}

impl<'a> Mesh<'a> {
    fn new(points: &'a [Point3<f64>], simplex: [usize; 4]) -> Self {
        let [mut a, mut b, c, d] = simplex;
        if orientation(&points[a], &points[b], &points[c], &points[d]) == Sign::Negative {
            std::mem::swap(&mut a, &mut b);
        }

        let mut mesh = Self {
            points,
            tetrahedra: Vec::new(),
            free: Vec::new(),
            last: 0,
        };
        let first = mesh.alloc([a, b, c, d]);

        // Ghost i sits beyond the face opposite vertex i; two finite
        // vertices swap so the ghost keeps positive orientation.
        let mut created = vec![first];
        for i in 0..4 {
            let mut vertices = [a, b, c, d];
            vertices[i] = GHOST;
            let (j, k) = match i {
                0 => (1, 2),
                1 => (0, 2),
                _ => (0, 1),
            };
            vertices.swap(j, k);
            created.push(mesh.alloc(vertices));
        }
        mesh.link(&created);
        mesh.last = first;
        mesh
    }

    fn alloc(&mut self, vertices: [usize; 4]) -> usize {
        let tetrahedron = Tetrahedron {
            vertices,
            neighbors: [UNLINKED; 4],
            alive: true,
        };
        match self.free.pop() {
            Some(slot) => {
                self.tetrahedra[slot] = tetrahedron;
                slot
            }
            None => {
                self.tetrahedra.push(tetrahedron);
                self.tetrahedra.len() - 1
            }
        }
    }

    /// Pair up the unlinked faces of `cells` with each other
    fn link(&mut self, cells: &[usize]) {
        let mut open: HashMap<[usize; 3], (usize, usize)> = HashMap::new();
        for &t in cells {
            for i in 0..4 {
                if self.tetrahedra[t].neighbors[i] != UNLINKED {
                    continue;
                }
                let key = self.tetrahedra[t].face_key(i);
                match open.remove(&key) {
                    Some((u, k)) => {
                        self.tetrahedra[t].neighbors[i] = u;
                        self.tetrahedra[u].neighbors[k] = t;
                    }
                    None => {
                        open.insert(key, (t, i));
                    }
                }
            }
        }
        debug_assert!(open.is_empty(), "unmatched faces: {:?}", open);
    }

    /// Orientation of cell `t` with vertex `i` replaced by `q`. The other
    /// three vertices must be finite.
    fn orientation_with(&self, t: usize, i: usize, q: &Point3<f64>) -> Sign {
        let vertices = self.tetrahedra[t].vertices;
        let p = |j: usize| {
            if j == i {
                *q
            } else {
                self.points[vertices[j]]
            }
        };
        orientation(&p(0), &p(1), &p(2), &p(3))
    }

    fn in_conflict(&self, t: usize, q: &Point3<f64>) -> bool {
        let tetrahedron = &self.tetrahedra[t];
        match tetrahedron.ghost_index() {
            None => {
                let [a, b, c, d] = tetrahedron.vertices.map(|v| self.points[v]);
                insphere(&a, &b, &c, &d, q) == Sign::Positive
            }
            Some(g) => match self.orientation_with(t, g, q) {
                Sign::Positive => true,
                Sign::Negative => false,
                // On the hull plane: conflicts when inside the finite
                // neighbour's circumsphere
                Sign::Zero => {
                    let inner = &self.tetrahedra[tetrahedron.neighbors[g]];
                    let [a, b, c, d] = inner.vertices.map(|v| self.points[v]);
                    insphere(&a, &b, &c, &d, q) == Sign::Positive
                }
            },
        }
    }

    /// Walk from the last created cell towards `q`. Stops at the first
    /// ghost cell reached or at a finite cell no face of which separates
    /// it from `q`.
    fn locate(&self, q: &Point3<f64>) -> Option<usize> {
        let mut current = self.last;
        if let Some(g) = self.tetrahedra[current].ghost_index() {
            current = self.tetrahedra[current].neighbors[g];
        }

        let mut previous = None;
        for step in 0..self.tetrahedra.len() + 16 {
            let tetrahedron = &self.tetrahedra[current];
            if tetrahedron.ghost_index().is_some() {
                return Some(current);
            }
            // rotating the first face tried keeps the walk from cycling
            let exit = (0..4).map(|k| (k + step) % 4).find(|&i| {
                Some(tetrahedron.neighbors[i]) != previous
                    && self.orientation_with(current, i, q) == Sign::Negative
            });
            match exit {
                Some(i) => {
                    previous = Some(current);
                    current = tetrahedron.neighbors[i];
                }
                None => return Some(current),
            }
        }
        None
    }

    /// Flood fill from `seed` over conflicting neighbours, in discovery order
    fn cavity(
        &self,
        seed: usize,
        q: &Point3<f64>,
        excluded: &HashSet<usize>,
        forced: &HashSet<usize>,
    ) -> (Vec<usize>, HashSet<usize>) {
        let mut order = vec![seed];
        let mut members = HashSet::from([seed]);
        let mut stack = vec![seed];

        while let Some(t) = stack.pop() {
            for neighbor in self.tetrahedra[t].neighbors {
                if members.contains(&neighbor) || excluded.contains(&neighbor) {
                    continue;
                }
                if forced.contains(&neighbor) || self.in_conflict(neighbor, q) {
                    members.insert(neighbor);
                    order.push(neighbor);
                    stack.push(neighbor);
                }
            }
        }
        (order, members)
    }

    /// Whether joining face `face` of cavity cell `t` to point `index`
    /// yields a properly oriented, non-flat cell
    fn face_is_valid(&self, t: usize, face: usize, index: usize) -> bool {
        let q = self.points[index];
        let tetrahedron = &self.tetrahedra[t];
        match tetrahedron.ghost_index() {
            Some(g) if g != face => {
                // New ghost cell: its hull face must be a real triangle
                // with the replaced vertex not beyond it
                let mut vertices = tetrahedron.vertices;
                let old = vertices[face];
                vertices[face] = index;

                let mut finite = [q; 3];
                let others = vertices.iter().filter(|&&v| v != GHOST);
                for (slot, &v) in finite.iter_mut().zip(others) {
                    *slot = self.points[v];
                }
                if is_degenerate_triangle(&finite[0], &finite[1], &finite[2]) {
                    return false;
                }

                let p = |j: usize| {
                    if j == g {
                        self.points[old]
                    } else {
                        self.points[vertices[j]]
                    }
                };
                orientation(&p(0), &p(1), &p(2), &p(3)) != Sign::Positive
            }
            _ => self.orientation_with(t, face, &q) == Sign::Positive,
        }
    }

    /// Boundary faces of the cavity, or the first face that fails
    /// [`Mesh::face_is_valid`]. `None` only if adjacency is broken.
    fn boundary(
        &self,
        cavity: &[usize],
        members: &HashSet<usize>,
        index: usize,
    ) -> Option<Boundary> {
        let mut cells = cavity.to_vec();
        cells.sort_unstable();

        let mut faces = Vec::new();
        for t in cells {
            for face in 0..4 {
                let neighbor = self.tetrahedra[t].neighbors[face];
                if members.contains(&neighbor) {
                    continue;
                }
                if !self.face_is_valid(t, face, index) {
                    return Some(Boundary::Invalid { cell: t, neighbor });
                }
                let back = self.tetrahedra[neighbor]
                    .neighbors
                    .iter()
                    .position(|&n| n == t)?;
                faces.push(BoundaryFace {
                    cell: t,
                    face,
                    neighbor,
                    back,
                });
            }
        }
        Some(Boundary::Valid(faces))
    }

    /// Insert input point `index`; false when no valid cavity was found
    fn insert(&mut self, index: usize) -> bool {
        let q = self.points[index];
        let located = self.locate(&q).filter(|&t| self.in_conflict(t, &q));
        let seed = match located {
            Some(t) => t,
            None => {
                let scan = (0..self.tetrahedra.len())
                    .find(|&t| self.tetrahedra[t].alive && self.in_conflict(t, &q));
                match scan {
                    Some(t) => t,
                    None => return false,
                }
            }
        };

        let mut excluded = HashSet::new();
        let mut forced = HashSet::new();
        for _ in 0..MAX_CAVITY_REPAIRS {
            let (cavity, members) = self.cavity(seed, &q, &excluded, &forced);
            match self.boundary(&cavity, &members, index) {
                Some(Boundary::Valid(faces)) => {
                    self.retriangulate(index, cavity, &faces);
                    return true;
                }
                Some(Boundary::Invalid { cell, neighbor }) => {
                    if cell == seed {
                        forced.insert(neighbor);
                    } else {
                        excluded.insert(cell);
                    }
                }
                None => return false,
            }
        }
        debug!(index, "cavity repair limit reached");
        false
    }

    /// Replace the cavity cells with one cell per boundary face, each
    /// joining that face to point `index`
    fn retriangulate(&mut self, index: usize, mut cavity: Vec<usize>, faces: &[BoundaryFace]) {
        let shells: Vec<[usize; 4]> = faces
            .iter()
            .map(|f| {
                let mut vertices = self.tetrahedra[f.cell].vertices;
                vertices[f.face] = index;
                vertices
            })
            .collect();

        cavity.sort_unstable_by(|a, b| b.cmp(a));
        for &t in &cavity {
            self.tetrahedra[t].alive = false;
            self.free.push(t);
        }

        let mut created = Vec::with_capacity(faces.len());
        for (vertices, f) in shells.into_iter().zip(faces) {
            let t = self.alloc(vertices);
            self.tetrahedra[t].neighbors[f.face] = f.neighbor;
            self.tetrahedra[f.neighbor].neighbors[f.back] = t;
            created.push(t);
        }
        self.link(&created);

        if let Some(&t) = created.last() {
            self.last = t;
        }
    }

    fn into_cells(self) -> Vec<Cell> {
        self.tetrahedra
            .into_iter()
            .filter(|t| t.alive && t.ghost_index().is_none())
            .map(|t| Cell::new(t.vertices))
            .collect()
    }
}
