use glam::DVec2;

use crate::dim2::{predicates::orientation, vertex::VertexId};

/// The index of an [`Edge`] in an [`EdgeRing`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeId(pub u32);

impl EdgeId {
    /// Returns the underlying index of the edge as a `usize`.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for EdgeId {
    #[inline]
    fn from(value: u32) -> Self {
        EdgeId(value)
    }
}

/// Whether an edge is part of the current boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeState {
    /// The edge belongs to the current boundary polygon.
    #[default]
    Live,
    /// The edge was replaced during refinement and is kept as a tombstone.
    Deleted,
}

/// A directed boundary segment from `head` to the head of `next`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Edge {
    /// The start vertex of the edge.
    pub(crate) head: VertexId,
    /// The following edge in the ring.
    pub(crate) next: EdgeId,
    /// The preceding edge in the ring.
    pub(crate) prev: EdgeId,
    /// The points strictly to the right of the edge that are not assigned elsewhere.
    pub(crate) outside_points: Vec<VertexId>,
    /// The midpoint of the edge.
    pub(crate) center: DVec2,
    /// The outward unit normal, `cross(-Z, direction)`. Zero for degenerate edges.
    pub(crate) normal: DVec2,
    pub(crate) state: EdgeState,
}

impl Edge {
    #[inline]
    fn new(head: VertexId, next: EdgeId, prev: EdgeId) -> Self {
        Self {
            head,
            next,
            prev,
            outside_points: Vec::new(),
            center: DVec2::ZERO,
            normal: DVec2::ZERO,
            state: EdgeState::Live,
        }
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.state == EdgeState::Live
    }

    /// Recomputes the cached center and normal from the edge's endpoints.
    #[inline]
    fn compute_center_and_normal(&mut self, head: DVec2, tail: DVec2) {
        let direction = (tail - head).normalize_or_zero();
        self.center = (head + tail) * 0.5;
        self.normal = -direction.perp();
    }
}

/// A read-only view of a live boundary edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HullEdge {
    /// The start point of the edge.
    pub start: DVec2,
    /// The end point of the edge.
    pub end: DVec2,
    /// The midpoint of the edge.
    pub center: DVec2,
    /// The outward unit normal of the edge.
    pub normal: DVec2,
}

/// A circular doubly-linked list of edges stored in a growable arena.
///
/// Links are indices into the arena, so edges never own their neighbors.
/// Replaced edges stay in the arena, marked [`EdgeState::Deleted`].
#[derive(Clone, Debug, Default)]
pub(crate) struct EdgeRing {
    edges: Vec<Edge>,
}

impl EdgeRing {
    /// Builds a closed ring visiting `heads` in order.
    ///
    /// A single head produces a self-loop edge.
    pub fn from_cycle(heads: &[VertexId], points: &[DVec2]) -> Self {
        debug_assert!(!heads.is_empty());

        let n = heads.len() as u32;
        let mut ring = Self {
            edges: Vec::with_capacity(2 * points.len().max(heads.len())),
        };

        for (i, head) in heads.iter().enumerate() {
            let i = i as u32;
            ring.edges
                .push(Edge::new(*head, EdgeId((i + 1) % n), EdgeId((i + n - 1) % n)));
        }

        for i in 0..n {
            ring.update_geometry(EdgeId(i), points);
        }

        ring
    }

    /// The number of edges ever created, including deleted ones.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    #[inline]
    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.index()]
    }

    /// Returns the end vertex of the edge, the head of its successor.
    #[inline]
    pub fn tail(&self, id: EdgeId) -> VertexId {
        self.edge(self.edge(id).next).head
    }

    /// Returns the start and end points of the edge.
    #[inline]
    pub fn endpoints(&self, id: EdgeId, points: &[DVec2]) -> (DVec2, DVec2) {
        (
            points[self.edge(id).head.index()],
            points[self.tail(id).index()],
        )
    }

    /// Twice the signed area of the triangle formed by the edge and `point`.
    #[inline]
    pub fn orientation(&self, id: EdgeId, point: DVec2, points: &[DVec2]) -> f64 {
        let (head, tail) = self.endpoints(id, points);
        orientation(head, tail, point)
    }

    #[inline]
    pub fn is_left_of(&self, id: EdgeId, point: DVec2, points: &[DVec2], eps: f64) -> bool {
        self.orientation(id, point, points) > eps
    }

    #[inline]
    pub fn is_right_of(&self, id: EdgeId, point: DVec2, points: &[DVec2], eps: f64) -> bool {
        self.orientation(id, point, points) < -eps
    }

    /// Returns `true` if `point` is to the left of every edge of the ring containing `start`.
    pub fn encloses(&self, start: EdgeId, point: DVec2, points: &[DVec2], eps: f64) -> bool {
        self.traverse(start)
            .all(|id| self.is_left_of(id, point, points, eps))
    }

    /// Finds the first edge, walking from `start`, that has `point` strictly to its right.
    pub fn first_right_of(
        &self,
        start: EdgeId,
        point: DVec2,
        points: &[DVec2],
        eps: f64,
    ) -> Option<EdgeId> {
        self.traverse(start)
            .find(|id| self.is_right_of(*id, point, points, eps))
    }

    /// Returns the outside point with the largest distance from the edge line.
    ///
    /// Ties keep the point found first. Returns `None` for an empty outside set.
    pub fn furthest_outside_point(&self, id: EdgeId, points: &[DVec2]) -> Option<VertexId> {
        let mut furthest: Option<(VertexId, f64)> = None;

        for point_id in self.edge(id).outside_points.iter() {
            let distance = self
                .orientation(id, points[point_id.index()], points)
                .abs();
            if furthest.is_none_or(|(_, d)| distance > d) {
                furthest = Some((*point_id, distance));
            }
        }

        furthest.map(|(point_id, _)| point_id)
    }

    /// Recomputes the cached center and normal of the edge.
    #[inline]
    pub fn update_geometry(&mut self, id: EdgeId, points: &[DVec2]) {
        let (head, tail) = self.endpoints(id, points);
        self.edge_mut(id).compute_center_and_normal(head, tail);
    }

    /// Replaces the span of edges `lower..=upper` with two new edges
    /// `lower.head -> apex` and `apex -> upper.next.head`.
    ///
    /// The span must already be marked deleted and must not cover the whole ring.
    pub fn splice(
        &mut self,
        lower: EdgeId,
        upper: EdgeId,
        apex: VertexId,
        points: &[DVec2],
    ) -> [EdgeId; 2] {
        let before = self.edge(lower).prev;
        let after = self.edge(upper).next;
        debug_assert!(self.edge(before).is_live() && self.edge(after).is_live());

        let head = self.edge(lower).head;
        let e1 = EdgeId(self.edges.len() as u32);
        let e2 = EdgeId(e1.0 + 1);

        self.edges.push(Edge::new(head, e2, before));
        self.edges.push(Edge::new(apex, after, e1));

        self.edge_mut(before).next = e1;
        self.edge_mut(after).prev = e2;

        self.update_geometry(e1, points);
        self.update_geometry(e2, points);

        [e1, e2]
    }

    /// Returns the first live edge in creation order.
    #[inline]
    pub fn first_live(&self) -> Option<EdgeId> {
        self.edges
            .iter()
            .position(Edge::is_live)
            .map(|i| EdgeId(i as u32))
    }

    /// Walks the ring via `next`, starting at `start` and stopping before it comes around again.
    pub fn traverse(&self, start: EdgeId) -> impl Iterator<Item = EdgeId> + '_ {
        let mut current = Some(start);
        core::iter::from_fn(move || {
            let id = current?;
            let next = self.edge(id).next;
            current = (next != start).then_some(next);
            Some(id)
        })
        // A corrupted ring must not loop forever.
        .take(self.edges.len())
    }

    /// Returns a read-only view of the edge.
    #[inline]
    pub fn view(&self, id: EdgeId, points: &[DVec2]) -> HullEdge {
        let (start, end) = self.endpoints(id, points);
        let edge = self.edge(id);
        HullEdge {
            start,
            end,
            center: edge.center,
            normal: edge.normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::dvec2;

    use crate::dim2::validation::validate_ring;

    use super::*;

    fn square() -> Vec<DVec2> {
        vec![
            dvec2(0.0, 0.0),
            dvec2(1.0, 0.0),
            dvec2(1.0, 1.0),
            dvec2(0.0, 1.0),
        ]
    }

    fn ids(indices: &[u32]) -> Vec<VertexId> {
        indices.iter().copied().map(VertexId).collect()
    }

    #[test]
    fn cycle_links() {
        let points = square();
        let ring = EdgeRing::from_cycle(&ids(&[0, 1, 2, 3]), &points);

        assert_eq!(ring.len(), 4);
        assert_eq!(ring.edge(EdgeId(0)).prev, EdgeId(3));
        assert_eq!(ring.edge(EdgeId(3)).next, EdgeId(0));
        assert_eq!(ring.tail(EdgeId(3)), VertexId(0));
        assert_eq!(
            ring.traverse(EdgeId(2)).collect::<Vec<_>>(),
            vec![EdgeId(2), EdgeId(3), EdgeId(0), EdgeId(1)]
        );
        validate_ring(&ring);
    }

    #[test]
    fn cached_geometry_points_outward() {
        let points = square();
        let ring = EdgeRing::from_cycle(&ids(&[0, 1, 2, 3]), &points);

        let bottom = ring.edge(EdgeId(0));
        assert_eq!(bottom.center, dvec2(0.5, 0.0));
        assert_relative_eq!(bottom.normal.x, 0.0);
        assert_relative_eq!(bottom.normal.y, -1.0);

        let right = ring.edge(EdgeId(1));
        assert_eq!(right.center, dvec2(1.0, 0.5));
        assert_relative_eq!(right.normal.x, 1.0);
        assert_relative_eq!(right.normal.y, 0.0);
    }

    #[test]
    fn self_loop() {
        let points = [dvec2(2.0, 3.0)];
        let ring = EdgeRing::from_cycle(&ids(&[0]), &points);

        assert_eq!(ring.edge(EdgeId(0)).next, EdgeId(0));
        assert_eq!(ring.traverse(EdgeId(0)).count(), 1);
        assert_eq!(ring.edge(EdgeId(0)).normal, DVec2::ZERO);
        assert_eq!(ring.edge(EdgeId(0)).center, dvec2(2.0, 3.0));
    }

    #[test]
    fn side_tests_and_enclosure() {
        let points = square();
        let ring = EdgeRing::from_cycle(&ids(&[0, 1, 2, 3]), &points);

        let inside = dvec2(0.5, 0.5);
        let below = dvec2(0.5, -1.0);
        let on_edge = dvec2(0.5, 0.0);

        assert!(ring.is_left_of(EdgeId(0), inside, &points, 0.0));
        assert!(ring.is_right_of(EdgeId(0), below, &points, 0.0));
        assert!(ring.encloses(EdgeId(2), inside, &points, 0.0));
        assert!(!ring.encloses(EdgeId(0), below, &points, 0.0));
        assert!(!ring.encloses(EdgeId(0), on_edge, &points, 0.0));

        assert_eq!(ring.first_right_of(EdgeId(1), below, &points, 0.0), Some(EdgeId(0)));
        assert_eq!(ring.first_right_of(EdgeId(0), inside, &points, 0.0), None);
    }

    #[test]
    fn splice_replaces_span() {
        let mut points = square();
        points.push(dvec2(2.0, -1.0));
        let mut ring = EdgeRing::from_cycle(&ids(&[0, 1, 2, 3]), &points);

        // The new point sees the bottom and right edges.
        ring.edge_mut(EdgeId(0)).state = EdgeState::Deleted;
        ring.edge_mut(EdgeId(1)).state = EdgeState::Deleted;
        let [e1, e2] = ring.splice(EdgeId(0), EdgeId(1), VertexId(4), &points);

        assert_eq!((e1, e2), (EdgeId(4), EdgeId(5)));
        assert_eq!(ring.edge(e1).head, VertexId(0));
        assert_eq!(ring.tail(e1), VertexId(4));
        assert_eq!(ring.tail(e2), VertexId(2));
        assert_eq!(ring.edge(EdgeId(3)).next, e1);
        assert_eq!(ring.edge(EdgeId(2)).prev, e2);
        assert_eq!(ring.first_live(), Some(EdgeId(2)));
        assert_eq!(ring.traverse(EdgeId(2)).count(), 4);
        assert_eq!(ring.edge(e1).center, dvec2(1.0, -0.5));
        validate_ring(&ring);
    }

    #[test]
    fn splice_closes_a_digon() {
        let points = vec![dvec2(0.0, 0.0), dvec2(2.0, 0.0), dvec2(1.0, 1.0)];
        let mut ring = EdgeRing::from_cycle(&ids(&[0, 1]), &points);

        ring.edge_mut(EdgeId(1)).state = EdgeState::Deleted;
        let [e1, e2] = ring.splice(EdgeId(1), EdgeId(1), VertexId(2), &points);

        assert_eq!(ring.edge(EdgeId(0)).next, e1);
        assert_eq!(ring.edge(EdgeId(0)).prev, e2);
        let heads: Vec<VertexId> = ring
            .traverse(EdgeId(0))
            .map(|id| ring.edge(id).head)
            .collect();
        assert_eq!(heads, ids(&[0, 1, 2]));
        validate_ring(&ring);
    }

    #[test]
    fn furthest_outside_point_keeps_first_on_ties() {
        let mut points = square();
        points.extend([dvec2(0.2, -1.0), dvec2(0.5, -2.0), dvec2(0.8, -2.0)]);
        let mut ring = EdgeRing::from_cycle(&ids(&[0, 1, 2, 3]), &points);

        assert_eq!(ring.furthest_outside_point(EdgeId(0), &points), None);

        ring.edge_mut(EdgeId(0))
            .outside_points
            .extend(ids(&[4, 5, 6]));
        assert_eq!(
            ring.furthest_outside_point(EdgeId(0), &points),
            Some(VertexId(5))
        );
    }

    #[test]
    fn view_of_edge() {
        let points = square();
        let ring = EdgeRing::from_cycle(&ids(&[0, 1, 2, 3]), &points);
        let view = ring.view(EdgeId(2), &points);
        assert_eq!(view.start, dvec2(1.0, 1.0));
        assert_eq!(view.end, dvec2(0.0, 1.0));
        assert_eq!(view.center, dvec2(0.5, 1.0));
    }
}
