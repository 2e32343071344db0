mod aabb;
mod edge_ring;
mod elimination;
mod initial_hull;
mod predicates;
#[cfg(any(test, debug_assertions))]
mod validation;
mod vertex;

pub use edge_ring::{EdgeState, HullEdge};
pub use predicates::{is_left_of, is_right_of, orientation, tolerance};
pub use vertex::VertexState;

use crate::dim2::{
    aabb::Aabb2d,
    edge_ring::{EdgeId, EdgeRing},
    elimination::Elimination,
    initial_hull::{init_quadrilateral, InitialConvexHull2d},
    vertex::{VertexId, VertexStore},
};
use glam::DVec2;
use thiserror::Error;

/// The minimum number of input points needed to seed the initial quadrilateral.
pub const MIN_POINTS: usize = 4;

/// An error returned during [`ConvexHull2d`] construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvexHull2dError {
    /// Fewer than [`MIN_POINTS`] points were given.
    #[error("At least 4 input points are required, got {found}.")]
    InsufficientInput {
        /// The number of points that were given.
        found: usize,
    },
    /// An input point has a NaN or infinite coordinate.
    #[error("Input points contain NaN or infinite coordinates.")]
    InvalidInput,
    /// The tolerance override is negative, NaN or infinite.
    #[error("Invalid tolerance: {0}")]
    InvalidEpsilon(f64),
    /// An error in the algorithm itself. Please report it as a bug
    /// with a minimal reproducible example.
    #[error("Internal error: {0}")]
    InternalError(&'static str),
}

/// Configuration for [`ConvexHull2d`] construction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HullConfig {
    /// The tolerance below which orientations count as collinear.
    /// If `None`, it is derived from the extent of the point set with [`tolerance`].
    pub epsilon: Option<f64>,
    /// The maximum number of refinement steps.
    /// If `None`, the algorithm will run until completion.
    pub max_iter: Option<usize>,
}

impl HullConfig {
    /// Sets a fixed tolerance instead of deriving one from the input.
    #[inline]
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }

    /// Limits the number of refinement steps.
    #[inline]
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = Some(max_iter);
        self
    }

    fn resolve_epsilon(&self, points: &[DVec2]) -> Result<f64, ConvexHull2dError> {
        match self.epsilon {
            None => Ok(tolerance(points)),
            Some(epsilon) if epsilon.is_finite() && epsilon >= 0.0 => Ok(epsilon),
            Some(epsilon) => Err(ConvexHull2dError::InvalidEpsilon(epsilon)),
        }
    }
}

/// A 2D [convex hull] representing the smallest convex set containing
/// all input points in a given point set.
///
/// Construction runs in two phases. An Akl-Toussaint elimination pass seeds a
/// quadrilateral from the points extreme in the `x + y` and `x - y` directions
/// and discards everything inside it. Quickhull then grows the quadrilateral
/// until no point lies outside any of its edges.
///
/// Besides the boundary, the hull keeps the final [`VertexState`] of every input point.
///
/// [convex hull]: https://en.wikipedia.org/wiki/Convex_hull
///
/// # Example
///
/// ```
/// use akl_quickhull::{ConvexHull2d, VertexState};
/// use glam::DVec2;
///
/// let points = vec![
///     DVec2::new(0.0, 0.0),
///     DVec2::new(1.0, 0.0),
///     DVec2::new(1.0, 1.0),
///     DVec2::new(0.0, 1.0),
///     DVec2::new(0.5, 0.5),
/// ];
///
/// // Create the convex hull, deriving the tolerance from the input.
/// let hull = ConvexHull2d::try_from_points(&points, None).unwrap();
///
/// // The points of the convex hull in counterclockwise order.
/// assert_eq!(
///     hull.boundary(),
///     &[
///         DVec2::new(0.0, 0.0),
///         DVec2::new(1.0, 0.0),
///         DVec2::new(1.0, 1.0),
///         DVec2::new(0.0, 1.0),
///     ],
/// );
///
/// // The center point was discarded.
/// assert!(hull.classify(4).unwrap().is_eliminated());
/// assert_eq!(hull.eliminated_count(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct ConvexHull2d {
    store: VertexStore,
    ring: EdgeRing,
    /// The hull points in ring order.
    boundary: Vec<DVec2>,
    /// The input indices of the hull points.
    boundary_indices: Vec<usize>,
    /// Whether the hull has no area (a point or a line).
    degenerate: bool,
    epsilon: f64,
    survivor_count: usize,
}

impl ConvexHull2d {
    /// Attempts to compute a [`ConvexHull2d`] for the given set of 2D points.
    ///
    /// `epsilon` overrides the tolerance for orientation tests.
    /// If `None`, it is derived from the extent of the point set.
    ///
    /// Coincident or collinear input produces a degenerate hull: a single point,
    /// or every distinct input point sorted along the line.
    ///
    /// # Errors
    ///
    /// Returns a [`ConvexHull2dError`] if hull construction fails.
    /// Possible errors include:
    ///
    /// - [`InsufficientInput`](ConvexHull2dError::InsufficientInput) for fewer than 4 points
    /// - [`InvalidInput`](ConvexHull2dError::InvalidInput) for NaN or infinite coordinates
    /// - [`InvalidEpsilon`](ConvexHull2dError::InvalidEpsilon) for a negative or non-finite override
    #[inline]
    pub fn try_from_points(
        points: &[DVec2],
        epsilon: Option<f64>,
    ) -> Result<Self, ConvexHull2dError> {
        Self::try_with_config(
            points,
            HullConfig {
                epsilon,
                ..Default::default()
            },
        )
    }

    /// Attempts to compute a [`ConvexHull2d`] with the given [`HullConfig`].
    ///
    /// If `config.max_iter` stops refinement early, the boundary is a convex
    /// polygon that may not contain every input point, and the points still
    /// awaiting refinement keep the [`VertexState::Processed`] state.
    ///
    /// # Errors
    ///
    /// See [`try_from_points`](Self::try_from_points).
    pub fn try_with_config(points: &[DVec2], config: HullConfig) -> Result<Self, ConvexHull2dError> {
        if points.len() < MIN_POINTS {
            return Err(ConvexHull2dError::InsufficientInput {
                found: points.len(),
            });
        }

        if !points.iter().all(|point| point.is_finite()) {
            return Err(ConvexHull2dError::InvalidInput);
        }

        let epsilon = config.resolve_epsilon(points)?;
        let mut store = VertexStore::new(points);

        let (ring, degenerate, survivor_count) = match init_quadrilateral(&mut store, epsilon) {
            InitialConvexHull2d::Point(id) => {
                (EdgeRing::from_cycle(&[id], store.points()), true, 0)
            }
            InitialConvexHull2d::Segment(ids) => {
                (EdgeRing::from_cycle(&ids, store.points()), true, 0)
            }
            InitialConvexHull2d::Polygon(Elimination {
                mut ring,
                survivors,
            }) => {
                Self::update(&mut store, &mut ring, &survivors, epsilon, config.max_iter)?;
                (ring, false, survivors.len())
            }
        };

        let start = ring.first_live().ok_or(ConvexHull2dError::InternalError(
            "No live edges remain after refinement.",
        ))?;
        let heads: Vec<VertexId> = ring.traverse(start).map(|id| ring.edge(id).head).collect();

        Ok(ConvexHull2d {
            boundary: heads.iter().map(|id| store.point(*id)).collect(),
            boundary_indices: heads.iter().map(|id| id.index()).collect(),
            store,
            ring,
            degenerate,
            epsilon,
            survivor_count,
        })
    }

    /// Returns the points of the convex hull in counterclockwise order.
    #[inline]
    pub fn boundary(&self) -> &[DVec2] {
        &self.boundary
    }

    /// Returns the indices of the input points on the convex hull, in the same order as
    /// [`boundary`](Self::boundary).
    #[inline]
    pub fn boundary_indices(&self) -> &[usize] {
        &self.boundary_indices
    }

    /// Returns the points of the convex hull in counterclockwise order.
    ///
    /// This consumes the convex hull.
    #[inline]
    pub fn into_boundary(self) -> Vec<DVec2> {
        self.boundary
    }

    /// Returns the classification of the input point at `index`,
    /// or `None` if the index is out of range.
    #[inline]
    pub fn classify(&self, index: usize) -> Option<VertexState> {
        self.store.states().get(index).copied()
    }

    /// Returns the classification of every input point, in input order.
    #[inline]
    pub fn states(&self) -> &[VertexState] {
        self.store.states()
    }

    /// Returns the number of input points classified as
    /// [`Deleted`](VertexState::Deleted) or [`PreDeleted`](VertexState::PreDeleted).
    #[inline]
    pub fn eliminated_count(&self) -> usize {
        self.store.count(VertexState::is_eliminated)
    }

    /// Returns the number of non-extreme points that survived the elimination
    /// phase and were handed to refinement.
    #[inline]
    pub fn survivor_count(&self) -> usize {
        self.survivor_count
    }

    /// Returns the tolerance used for orientation tests.
    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Returns `true` if the hull has no area, meaning that all input
    /// points are coincident or collinear.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Returns the edges of the convex hull in ring order.
    pub fn edges(&self) -> impl Iterator<Item = HullEdge> + '_ {
        let points = self.store.points();
        self.ring
            .first_live()
            .into_iter()
            .flat_map(move |start| self.ring.traverse(start))
            .map(move |id| self.ring.view(id, points))
    }

    /// Computes the area of the convex hull.
    #[inline]
    pub fn area(&self) -> f64 {
        let n = self.boundary.len();
        let twice_area: f64 = (0..n)
            .map(|i| self.boundary[i].perp_dot(self.boundary[(i + 1) % n]))
            .sum();
        0.5 * twice_area
    }

    /// Computes the point on the convex hull that is furthest in the given direction.
    #[inline]
    pub fn support_point(&self, direction: DVec2) -> DVec2 {
        let mut max = self.boundary[0].dot(direction);
        let mut index = 0;

        for (i, point) in self.boundary.iter().enumerate().skip(1) {
            let dot_product = point.dot(direction);
            if dot_product > max {
                max = dot_product;
                index = i;
            }
        }

        self.boundary[index]
    }

    /// Returns `true` if `point` lies inside the convex hull or on its boundary,
    /// up to the hull's tolerance.
    pub fn contains_point(&self, point: DVec2) -> bool {
        let points = self.store.points();
        let Some(start) = self.ring.first_live() else {
            return false;
        };

        let outside = self
            .ring
            .traverse(start)
            .any(|id| self.ring.is_right_of(id, point, points, self.epsilon));
        if outside {
            return false;
        }

        // A point or line hull has no interior to bound the point along the line.
        !self.degenerate
            || Aabb2d::from_points(&self.boundary).is_some_and(|aabb| aabb.contains(point))
    }

    /// The main quickhull algorithm.
    ///
    /// Returns the number of refinement steps performed.
    fn update(
        store: &mut VertexStore,
        ring: &mut EdgeRing,
        survivors: &[VertexId],
        epsilon: f64,
        max_iter: Option<usize>,
    ) -> Result<usize, ConvexHull2dError> {
        assign_outside_points(store, ring, survivors, epsilon);

        let max_iter = max_iter.unwrap_or(usize::MAX);
        let mut orphans: Vec<VertexId> = Vec::new();
        let mut iterations = 0;

        // For each edge that has outside points:
        //
        // 1. Find the outside point that is furthest from the edge, the "eye point".
        // 2. Walk backwards and forwards from the edge while the neighbors can
        //    also be seen from the eye point. These edges are removed.
        // 3. Replace the removed span with two edges through the eye point.
        // 4. Reassign the outside points of the removed edges to the new edges.
        //
        // New edges are appended, so the scan reaches them later.
        let mut i = 0;
        while i != ring.len() {
            let edge_id = EdgeId(i as u32);
            let edge = ring.edge(edge_id);

            if !edge.is_live() || edge.outside_points.is_empty() {
                i += 1;
                continue;
            }

            if iterations >= max_iter {
                break;
            }

            let eye = ring
                .furthest_outside_point(edge_id, store.points())
                .ok_or(ConvexHull2dError::InternalError(
                    "Outside set of the edge is empty.",
                ))?;
            store.set_state(eye, VertexState::OnHull);

            // Mark the edge as removed and collect its orphans.
            let edge = ring.edge_mut(edge_id);
            edge.state = EdgeState::Deleted;
            orphans.clear();
            orphans.extend(edge.outside_points.drain(..).filter(|id| *id != eye));

            let (lower, upper) =
                find_visible_span(ring, edge_id, store.point(eye), store.points(), epsilon, &mut orphans);

            if !ring.edge(ring.edge(lower).prev).is_live() || !ring.edge(ring.edge(upper).next).is_live() {
                return Err(ConvexHull2dError::InternalError(
                    "Every edge is visible from the eye point.",
                ));
            }

            let [e1, e2] = ring.splice(lower, upper, eye, store.points());

            #[cfg(debug_assertions)]
            {
                validation::validate_edge_connectivity(e1, ring);
                validation::validate_edge_connectivity(e2, ring);
            }

            // If neither new edge can see a point, it is inside the hull.
            for orphan in orphans.iter().copied() {
                let point = store.point(orphan);
                if ring.is_right_of(e1, point, store.points(), epsilon) {
                    ring.edge_mut(e1).outside_points.push(orphan);
                } else if ring.is_right_of(e2, point, store.points(), epsilon) {
                    ring.edge_mut(e2).outside_points.push(orphan);
                } else {
                    store.set_state(orphan, VertexState::Deleted);
                }
            }

            tracing::trace!(
                "[update] edge={} eye={} removed={}..={} orphans={} outside={}+{}",
                i,
                eye.index(),
                lower.index(),
                upper.index(),
                orphans.len(),
                ring.edge(e1).outside_points.len(),
                ring.edge(e2).outside_points.len(),
            );

            iterations += 1;
            i += 1;
        }

        tracing::debug!(
            "[update] done: iterations={} edges={} epsilon={:e}",
            iterations,
            ring.len(),
            epsilon,
        );

        Ok(iterations)
    }
}

/// Assigns each unprocessed survivor to the outside set of the first edge that can see it.
///
/// Points that no edge can see are inside the initial hull.
fn assign_outside_points(
    store: &mut VertexStore,
    ring: &mut EdgeRing,
    survivors: &[VertexId],
    epsilon: f64,
) {
    for id in survivors.iter().copied() {
        if store.state(id) != VertexState::Unprocessed {
            continue;
        }

        match ring.first_right_of(EdgeId(0), store.point(id), store.points(), epsilon) {
            Some(edge_id) => {
                store.set_state(id, VertexState::Processed);
                ring.edge_mut(edge_id).outside_points.push(id);
            }
            None => store.set_state(id, VertexState::Deleted),
        }
    }
}

/// Finds the contiguous span of edges around `start` that can be seen from `eye`,
/// marking them as deleted and moving their outside points into `orphans`.
///
/// Returns the first and last edge of the span in ring order.
fn find_visible_span(
    ring: &mut EdgeRing,
    start: EdgeId,
    eye: DVec2,
    points: &[DVec2],
    epsilon: f64,
    orphans: &mut Vec<VertexId>,
) -> (EdgeId, EdgeId) {
    let mut lower = start;
    loop {
        let prev = ring.edge(lower).prev;
        if !ring.edge(prev).is_live() || !ring.is_right_of(prev, eye, points, epsilon) {
            break;
        }
        let edge = ring.edge_mut(prev);
        edge.state = EdgeState::Deleted;
        orphans.append(&mut edge.outside_points);
        lower = prev;
    }

    let mut upper = start;
    loop {
        let next = ring.edge(upper).next;
        if !ring.edge(next).is_live() || !ring.is_right_of(next, eye, points, epsilon) {
            break;
        }
        let edge = ring.edge_mut(next);
        edge.state = EdgeState::Deleted;
        orphans.append(&mut edge.outside_points);
        upper = next;
    }

    (lower, upper)
}
