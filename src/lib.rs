//! # Akl-Quickhull
//!
//! A Rust implementation of a planar convex hull built in two phases:
//!
//! 1. Akl-Toussaint elimination seeds a quadrilateral from the points extreme in
//!    the `x + y` and `x - y` directions, and discards every point inside it.
//!    An axis-aligned box inscribed in the quadrilateral rejects most of them cheaply.
//! 2. Quickhull refines the quadrilateral, kept as a ring of edges with outside sets,
//!    until no point lies outside any edge.
//!
//! Every input point is classified along the way, so callers can tell the hull vertices
//! from the points that were eliminated.
//!
//! ```
//! use akl_quickhull::build_hull;
//! use glam::DVec2;
//!
//! let points = [
//!     DVec2::new(0.0, 0.0),
//!     DVec2::new(1.0, 0.0),
//!     DVec2::new(2.0, 0.0),
//!     DVec2::new(1.0, 1.0),
//! ];
//!
//! let hull = build_hull(&points, None).unwrap();
//! assert_eq!(hull.boundary_indices(), &[0, 2, 3]);
//! assert!(hull.classify(1).unwrap().is_eliminated());
//! ```
//!
//! ## References
//!
//! - S. G. Akl and G. T. Toussaint. 1978. A Fast Convex Hull Algorithm. Information Processing Letters 7(5).
//! - C. Bradford Barber et al. 1996. [The Quickhull Algorithm for Convex Hulls](https://www.cise.ufl.edu/~ungor/courses/fall06/papers/QuickHull.pdf)
//! - Dirk Gregorius. GDC 2014. [Physics for Game Programmers: Implementing Quickhull](https://archive.org/details/GDC2014Gregorius)

#![warn(missing_docs)]

mod dim2;

pub use dim2::{
    is_left_of, is_right_of, orientation, tolerance, ConvexHull2d, ConvexHull2dError, EdgeState,
    HullConfig, HullEdge, VertexState, MIN_POINTS,
};

use glam::DVec2;

/// Computes the convex hull of `points`.
///
/// `epsilon_override` replaces the tolerance derived from the extent of the point set.
/// This is a shorthand for [`ConvexHull2d::try_from_points`].
///
/// # Errors
///
/// Returns a [`ConvexHull2dError`] for fewer than [`MIN_POINTS`] points,
/// non-finite coordinates, or an invalid tolerance.
#[inline]
pub fn build_hull(
    points: &[DVec2],
    epsilon_override: Option<f64>,
) -> Result<ConvexHull2d, ConvexHull2dError> {
    ConvexHull2d::try_from_points(points, epsilon_override)
}
