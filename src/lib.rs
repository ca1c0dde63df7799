//! Constrained Delaunay triangulations of planar straight-line graphs.
//!
//! Given a finite point set and a set of non-crossing segments between those
//! points, [ConstrainedDelaunayTriangulation] builds a triangulation of the
//! points' convex hull in which every input segment appears as an edge and
//! every other edge satisfies the local Delaunay empty-circumcircle
//! property.
//!
//! # Features
//!
//!  * Sign-exact geometric decisions via adaptive-precision predicates
//!    (Shewchuk's method) - degenerate and near-degenerate inputs such as
//!    cocircular or almost-collinear points are handled correctly.
//!  * Incremental construction on a quad-edge data structure with an
//!    enclosing-triangle scaffold that is removed once construction ends.
//!  * Segments may share endpoints and may pass through other input points
//!    (they are split into sub-segments); crossing segments are rejected
//!    before construction starts.
//!  * Triangles enclosed by constrained polygonal chains can be told apart
//!    from those outside of them and enumeration can be restricted to the
//!    enclosed set (see [RegionFilter]).
//!
//! # Example
//!
//! ```
//! use quadedge_cdt::{ConstrainedDelaunayTriangulation, Point2, RegionFilter};
//!
//! # fn main() -> Result<(), quadedge_cdt::CdtError> {
//! let points = [
//!     Point2::new(0.0, 0.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(5.0, 10.0),
//!     Point2::new(5.0, 3.0),
//! ];
//! let mut cdt = ConstrainedDelaunayTriangulation::new(&points, &[[0, 3]])?;
//! let data = cdt.triangulation_data(RegionFilter::AllBounded);
//! assert_eq!(data.vertices.len(), 4);
//! assert_eq!(data.triangles.len(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! The output arrays are plain `Vec`s of points and index tuples; writing
//! them to a mesh file format is left to the caller.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cdt;
mod cdt_core;
mod point;
mod predicates;

#[cfg(test)]
mod test_utilities;

pub use cdt::{CdtError, ConstrainedDelaunayTriangulation};
pub use cdt_core::enumeration::{EdgeTag, RegionFilter, TriangulationData};
pub use point::{CdtNum, Point2};
pub use predicates::{validate_coordinate, MAX_ALLOWED_VALUE, MIN_ALLOWED_VALUE};
