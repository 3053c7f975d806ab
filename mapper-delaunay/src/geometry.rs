//! Geometric predicates used by the tetrahedralizer
//!
//! Orientation and in-sphere tests return a [`Sign`]. A determinant whose
//! magnitude is within a relative bound of its permanent (the same
//! expansion over absolute values) is reported as [`Sign::Zero`], so
//! near-degenerate configurations are classified consistently instead of
//! by rounding noise. Coincidence and span tolerances are absolute
//! distances in the units of the input points.

use nalgebra::{Point3, Vector3};

/// Relative bound under which a determinant counts as zero
const PREDICATE_EPSILON: f64 = 1e-12;

/// Sign of a filtered determinant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    fn filtered(determinant: f64, permanent: f64) -> Self {
        let bound = PREDICATE_EPSILON * permanent;
        if determinant > bound {
            Sign::Positive
        } else if determinant < -bound {
            Sign::Negative
        } else {
            Sign::Zero
        }
    }
}

fn permanent(u: &Vector3<f64>, v: &Vector3<f64>, w: &Vector3<f64>) -> f64 {
    let (u, v, w) = (u.abs(), v.abs(), w.abs());
    u.x * (v.y * w.z + v.z * w.y) + u.y * (v.x * w.z + v.z * w.x) + u.z * (v.x * w.y + v.y * w.x)
}

fn determinant(u: &Vector3<f64>, v: &Vector3<f64>, w: &Vector3<f64>) -> f64 {
    u.dot(&v.cross(w))
}

/// Six times the signed volume of `abcd`; positive when `d` lies on the
/// side of plane `abc` that `(b - a) x (c - a)` points to.
pub fn signed_volume(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>, d: &Point3<f64>) -> f64 {
    determinant(&(b - a), &(c - a), &(d - a))
}

/// Orientation of the tetrahedron `abcd` (sign of [`signed_volume`])
pub fn orientation(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>, d: &Point3<f64>) -> Sign {
    let (u, v, w) = (b - a, c - a, d - a);
    Sign::filtered(determinant(&u, &v, &w), permanent(&u, &v, &w))
}

/// Position of `e` relative to the circumsphere of `abcd`.
///
/// `abcd` must be positively oriented. [`Sign::Positive`] means strictly
/// inside, [`Sign::Zero`] on the sphere within rounding.
pub fn insphere(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
    d: &Point3<f64>,
    e: &Point3<f64>,
) -> Sign {
    let (ae, be, ce, de) = (a - e, b - e, c - e, d - e);
    let (al, bl, cl, dl) = (
        ae.norm_squared(),
        be.norm_squared(),
        ce.norm_squared(),
        de.norm_squared(),
    );

    let det = al * determinant(&be, &ce, &de) - bl * determinant(&ae, &ce, &de)
        + cl * determinant(&ae, &be, &de)
        - dl * determinant(&ae, &be, &ce);
    let perm = al * permanent(&be, &ce, &de)
        + bl * permanent(&ae, &ce, &de)
        + cl * permanent(&ae, &be, &de)
        + dl * permanent(&ae, &be, &ce);

    Sign::filtered(det, perm)
}

/// Whether the triangle `abc` is too thin to span a plane
pub fn is_degenerate_triangle(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> bool {
    let (u, v) = (b - a, c - a);
    let scale = u.norm_squared() * v.norm_squared();
    u.cross(&v).norm_squared() <= PREDICATE_EPSILON * PREDICATE_EPSILON * scale
}

/// Indices of the points that survive coincidence merging, in input order.
///
/// A point within `tolerance` of an earlier surviving point is dropped.
pub fn distinct_indices(points: &[Point3<f64>], tolerance: f64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&i, &j| points[i].x.total_cmp(&points[j].x).then(i.cmp(&j)));

    let mut rank = vec![0usize; points.len()];
    for (position, &index) in order.iter().enumerate() {
        rank[index] = position;
    }

    let tolerance_sq = tolerance * tolerance;
    let mut dropped = vec![false; points.len()];

    for i in 0..points.len() {
        if dropped[i] {
            continue;
        }
        let p = &points[i];

        // Scan the x-window on both sides of `i` in sorted order
        for &j in order[rank[i] + 1..].iter() {
            if points[j].x - p.x > tolerance {
                break;
            }
            if j > i && (points[j] - p).norm_squared() <= tolerance_sq {
                dropped[j] = true;
            }
        }
        for &j in order[..rank[i]].iter().rev() {
            if p.x - points[j].x > tolerance {
                break;
            }
            if j > i && (points[j] - p).norm_squared() <= tolerance_sq {
                dropped[j] = true;
            }
        }
    }

    (0..points.len()).filter(|&i| !dropped[i]).collect()
}

/// Four of the selected points spanning a tetrahedron, or `None` when the
/// selection is collinear or coplanar.
///
/// Starting from the first index, picks the point farthest from it, then
/// the point farthest from that line, then the point farthest from that
/// plane. Each distance must exceed `tolerance`.
pub fn initial_simplex(
    points: &[Point3<f64>],
    indices: &[usize],
    tolerance: f64,
) -> Option<[usize; 4]> {
    let first = *indices.first()?;
    let origin = points[first];

    let farthest = |measure: &dyn Fn(&Vector3<f64>) -> f64| {
        indices
            .iter()
            .map(|&i| (measure(&(points[i] - origin)), i))
            .max_by(|a, b| a.0.total_cmp(&b.0))
    };

    let (span, second) = farthest(&|v| v.norm())?;
    if span <= tolerance {
        return None;
    }
    let axis = (points[second] - origin) / span;

    let (line_distance, third) = farthest(&|v| v.cross(&axis).norm())?;
    if line_distance <= tolerance {
        return None;
    }
    let normal = axis.cross(&(points[third] - origin)).normalize();

    let (plane_distance, fourth) = farthest(&|v| v.dot(&normal).abs())?;
    if plane_distance <= tolerance {
        return None;
    }

    Some([first, second, third, fourth])
}

/// Whether the selected points span all three dimensions
pub fn spans_three_dimensions(points: &[Point3<f64>], indices: &[usize], tolerance: f64) -> bool {
    initial_simplex(points, indices, tolerance).is_some()
}
