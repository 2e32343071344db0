//! Akl-Toussaint interior point elimination.
//!
//! The points extreme in the `x + y` and `x - y` directions span a quadrilateral
//! that is contained in the hull. Everything strictly inside it can be discarded
//! before the more expensive refinement phase runs. A cheap axis-aligned box
//! inscribed in the quadrilateral catches most of those points first.

use glam::DVec2;

use crate::dim2::{
    aabb::Aabb2d,
    edge_ring::{EdgeId, EdgeRing},
    vertex::{VertexId, VertexState, VertexStore},
};

/// The points minimizing and maximizing `x + y` and `x - y`.
///
/// Ties keep the first point in input order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Extremes {
    pub min_sum: VertexId,
    pub max_diff: VertexId,
    pub max_sum: VertexId,
    pub min_diff: VertexId,
}

impl Extremes {
    /// Finds the extreme points in a single pass. `points` must not be empty.
    pub fn find(points: &[DVec2]) -> Self {
        let mut extremes = Self {
            min_sum: VertexId(0),
            max_diff: VertexId(0),
            max_sum: VertexId(0),
            min_diff: VertexId(0),
        };

        let first = points[0];
        let (mut min_sum, mut max_sum) = (first.x + first.y, first.x + first.y);
        let (mut min_diff, mut max_diff) = (first.x - first.y, first.x - first.y);

        for (i, point) in points.iter().enumerate().skip(1) {
            let id = VertexId(i as u32);
            let sum = point.x + point.y;
            let diff = point.x - point.y;

            if sum < min_sum {
                min_sum = sum;
                extremes.min_sum = id;
            }
            if sum > max_sum {
                max_sum = sum;
                extremes.max_sum = id;
            }
            if diff < min_diff {
                min_diff = diff;
                extremes.min_diff = id;
            }
            if diff > max_diff {
                max_diff = diff;
                extremes.max_diff = id;
            }
        }

        extremes
    }

    /// The extreme points in ring order, possibly with repeats.
    #[inline]
    pub fn cycle(&self) -> [VertexId; 4] {
        [self.min_sum, self.max_diff, self.max_sum, self.min_diff]
    }

    /// The extreme points in ring order, keeping only the first occurrence of each.
    pub fn distinct_cycle(&self) -> Vec<VertexId> {
        let mut cycle = Vec::with_capacity(4);
        for id in self.cycle() {
            if !cycle.contains(&id) {
                cycle.push(id);
            }
        }
        cycle
    }

    /// The largest axis-aligned box guaranteed to lie inside the quadrilateral.
    pub fn interior_box(&self, points: &[DVec2]) -> Aabb2d {
        let [min_sum, max_diff, max_sum, min_diff] = self.cycle().map(|id| points[id.index()]);
        Aabb2d::new(
            DVec2::new(min_sum.x.max(min_diff.x), min_sum.y.max(max_diff.y)),
            DVec2::new(max_diff.x.min(max_sum.x), max_sum.y.min(min_diff.y)),
        )
    }
}

/// The outcome of the elimination phase.
#[derive(Clone, Debug)]
pub(crate) struct Elimination {
    /// The initial ring through the distinct extreme points.
    pub ring: EdgeRing,
    /// Non-extreme points that survived both filters.
    pub survivors: Vec<VertexId>,
}

/// Marks the extreme points, builds the initial ring through them,
/// and discards the points inside it.
pub(crate) fn eliminate(store: &mut VertexStore, extremes: &Extremes, eps: f64) -> Elimination {
    let cycle = extremes.distinct_cycle();
    let ring = EdgeRing::from_cycle(&cycle, store.points());

    for id in cycle.iter() {
        store.set_state(*id, VertexState::Extreme);
    }

    let interior = extremes.interior_box(store.points());

    let mut survivors: Vec<VertexId> = store
        .ids()
        .filter(|id| store.state(*id) != VertexState::Extreme)
        .collect();

    if !interior.is_empty() {
        pre_filter(store, &mut survivors, &interior);
    }
    let kept = survivors.len();

    // Exact test against the quadrilateral itself.
    survivors.retain(|id| {
        let inside = ring.encloses(EdgeId(0), store.point(*id), store.points(), eps);
        if inside {
            store.set_state(*id, VertexState::Deleted);
        }
        !inside
    });

    tracing::debug!(
        "[eliminate] points={} extremes={} after_box={} after_quad={}",
        store.len(),
        cycle.len(),
        kept,
        survivors.len(),
    );

    Elimination { ring, survivors }
}

/// Marks the points strictly inside `interior` as pre-deleted and removes them from `survivors`.
///
/// Partitions in place with a single reverse scan: kept points are swapped to the front.
fn pre_filter(store: &mut VertexStore, survivors: &mut Vec<VertexId>, interior: &Aabb2d) {
    let mut kept = 0;
    let mut end = survivors.len();
    while end > kept {
        let id = survivors[end - 1];
        if interior.contains_strict(store.point(id)) {
            store.set_state(id, VertexState::PreDeleted);
            end -= 1;
        } else {
            survivors.swap(kept, end - 1);
            kept += 1;
        }
    }
    survivors.truncate(kept);
}
