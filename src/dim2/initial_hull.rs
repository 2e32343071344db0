use glam::DVec2;

use crate::dim2::{
    elimination::{eliminate, Elimination, Extremes},
    predicates::orientation,
    vertex::{VertexId, VertexState, VertexStore},
};

/// The initial hull structure built from the input points.
///
/// If the input points are degenerate, the hull may be a point or a line.
#[derive(Debug)]
pub(crate) enum InitialConvexHull2d {
    /// All points coincide.
    Point(VertexId),
    /// All points are collinear. Distinct points sorted along the line.
    Segment(Vec<VertexId>),
    /// A ring through the extreme points, with the points inside it eliminated.
    Polygon(Elimination),
}

/// Finds the extreme points and decides whether the input spans an area.
///
/// For degenerate input every vertex is classified here, and the points are
/// on the hull. Otherwise the elimination phase runs.
pub(crate) fn init_quadrilateral(store: &mut VertexStore, eps: f64) -> InitialConvexHull2d {
    let extremes = Extremes::find(store.points());
    let cycle = extremes.distinct_cycle();
    let origin = store.point(cycle[0]);

    if cycle.len() == 1 {
        // `x + y` and `x - y` are both constant, so every point is the same.
        mark_degenerate(store, &cycle);
        return InitialConvexHull2d::Point(cycle[0]);
    }

    // The extreme point furthest from the origin spans the candidate line.
    let far = cycle[1..]
        .iter()
        .map(|id| store.point(*id))
        .max_by(|a, b| {
            a.distance_squared(origin)
                .total_cmp(&b.distance_squared(origin))
        })
        .unwrap_or(origin);

    let collinear = store
        .points()
        .iter()
        .all(|point| orientation(origin, far, *point).abs() <= eps);

    if collinear {
        mark_degenerate(store, &cycle);
        return InitialConvexHull2d::Segment(sorted_along_line(store.points(), far - origin));
    }

    InitialConvexHull2d::Polygon(eliminate(store, &extremes, eps))
}

fn mark_degenerate(store: &mut VertexStore, extremes: &[VertexId]) {
    for id in store.ids().collect::<Vec<_>>() {
        let state = if extremes.contains(&id) {
            VertexState::Extreme
        } else {
            VertexState::OnHull
        };
        store.set_state(id, state);
    }
}

/// Sorts the points along `direction`, keeping the first of any coincident points.
fn sorted_along_line(points: &[DVec2], direction: DVec2) -> Vec<VertexId> {
    let mut order: Vec<VertexId> = (0..points.len() as u32).map(VertexId).collect();

    // Stable sort, so coincident points stay in input order.
    order.sort_by(|a, b| {
        let (a, b) = (points[a.index()], points[b.index()]);
        direction
            .dot(a)
            .total_cmp(&direction.dot(b))
            .then(a.x.total_cmp(&b.x))
            .then(a.y.total_cmp(&b.y))
    });
    order.dedup_by(|a, b| points[a.index()] == points[b.index()]);

    order
}
