//! mapper-delaunay: 3-D Delaunay tetrahedralization
//!
//! This crate is the geometric primitive behind stellar-mapper's candidate
//! graph. It exposes one seam, the [`Tetrahedralizer`] trait, and one
//! implementation, [`BowyerWatson`].
//!
//! # Contract
//!
//! - Four or more points in general position produce cells covering their
//!   convex hull. No input point lies strictly inside a cell's
//!   circumsphere.
//! - Fewer than four distinct points, or a coplanar/collinear set, produce
//!   no cells. This is not an error.
//! - Points closer than the coincidence tolerance to an earlier point are
//!   merged into it and never appear in a cell.
//! - NaN or infinite coordinates are rejected with
//!   [`DelaunayError::NonFiniteCoordinate`].
//!
//! # Example
//!
//! ```rust
//! use mapper_delaunay::{BowyerWatson, Tetrahedralizer};
//! use nalgebra::Point3;
//!
//! let points = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.0, 0.0, 1.0),
//! ];
//! let cells = BowyerWatson::new().tetrahedralize(&points).unwrap();
//! assert_eq!(cells.len(), 1);
//! ```

pub mod bowyer_watson;
pub mod error;
pub mod geometry;
pub mod provider;

pub use bowyer_watson::{BowyerWatson, DEFAULT_TOLERANCE};
pub use error::DelaunayError;
pub use provider::{Cell, Tetrahedralizer, CELL_EDGES};
