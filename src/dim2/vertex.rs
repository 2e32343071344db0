use glam::DVec2;

/// The index of a point in the input point set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

impl VertexId {
    /// Returns the underlying index of the vertex as a `usize`.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for VertexId {
    #[inline]
    fn from(value: u32) -> Self {
        VertexId(value)
    }
}

/// The classification of an input point during and after hull construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VertexState {
    /// Not yet looked at by the refinement phase.
    #[default]
    Unprocessed,
    /// Assigned to the outside set of an edge, awaiting resolution.
    Processed,
    /// A vertex of the hull found during refinement.
    OnHull,
    /// One of the extreme points seeding the initial hull.
    Extreme,
    /// Discarded by the rectangular pre-filter of the elimination phase.
    PreDeleted,
    /// Proven to lie inside (or on the boundary of) the hull.
    Deleted,
}

impl VertexState {
    /// Returns `true` for [`OnHull`](Self::OnHull) and [`Extreme`](Self::Extreme).
    #[inline]
    pub const fn is_on_hull(self) -> bool {
        matches!(self, Self::OnHull | Self::Extreme)
    }

    /// Returns `true` for [`Deleted`](Self::Deleted) and [`PreDeleted`](Self::PreDeleted).
    #[inline]
    pub const fn is_eliminated(self) -> bool {
        matches!(self, Self::Deleted | Self::PreDeleted)
    }

    /// Returns `true` while the vertex has not reached a terminal state.
    #[inline]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Unprocessed | Self::Processed)
    }

    /// Whether moving from `self` to `next` keeps the classification monotonic.
    ///
    /// Terminal states never change. `Processed` may be re-entered when a point
    /// moves from a removed edge's outside set to a new edge.
    #[inline]
    pub(crate) const fn can_become(self, next: Self) -> bool {
        match self {
            Self::Unprocessed => true,
            Self::Processed => !matches!(next, Self::Unprocessed | Self::PreDeleted),
            _ => false,
        }
    }
}

/// Owner of the input coordinates and their classification.
///
/// Every other structure refers to vertices by [`VertexId`].
#[derive(Clone, Debug, Default)]
pub(crate) struct VertexStore {
    points: Vec<DVec2>,
    states: Vec<VertexState>,
}

impl VertexStore {
    pub fn new(points: &[DVec2]) -> Self {
        Self {
            points: points.to_vec(),
            states: vec![VertexState::Unprocessed; points.len()],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    #[inline]
    pub fn point(&self, id: VertexId) -> DVec2 {
        self.points[id.index()]
    }

    #[inline]
    pub fn states(&self) -> &[VertexState] {
        &self.states
    }

    #[inline]
    pub fn state(&self, id: VertexId) -> VertexState {
        self.states[id.index()]
    }

    /// Moves the vertex to a new state.
    #[inline]
    pub fn set_state(&mut self, id: VertexId, state: VertexState) {
        let current = &mut self.states[id.index()];
        debug_assert!(
            current.can_become(state),
            "non-monotonic vertex transition {:?} -> {:?} for {:?}",
            current,
            state,
            id
        );
        *current = state;
    }

    /// Iterates over all vertex ids in input order.
    #[inline]
    pub fn ids(&self) -> impl Iterator<Item = VertexId> {
        (0..self.points.len() as u32).map(VertexId)
    }

    /// Counts the vertices in the given state class.
    pub fn count(&self, predicate: impl Fn(VertexState) -> bool) -> usize {
        self.states.iter().filter(|state| predicate(**state)).count()
    }
}

#[cfg(test)]
mod tests {
    use glam::dvec2;

    use super::*;

    #[test]
    fn new_store_is_unprocessed() {
        let store = VertexStore::new(&[dvec2(0.0, 0.0), dvec2(1.0, 2.0)]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.point(VertexId(1)), dvec2(1.0, 2.0));
        assert!(store.states().iter().all(|s| *s == VertexState::Unprocessed));
    }

    #[test]
    fn state_classes() {
        assert!(VertexState::Extreme.is_on_hull());
        assert!(VertexState::OnHull.is_on_hull());
        assert!(!VertexState::Processed.is_on_hull());
        assert!(VertexState::PreDeleted.is_eliminated());
        assert!(VertexState::Deleted.is_eliminated());
        assert!(VertexState::Processed.is_pending());
        assert!(!VertexState::Deleted.is_pending());
    }

    #[test]
    fn transitions_are_monotonic() {
        use VertexState::*;

        assert!(Unprocessed.can_become(Processed));
        assert!(Unprocessed.can_become(PreDeleted));
        assert!(Processed.can_become(Processed));
        assert!(Processed.can_become(OnHull));
        assert!(Processed.can_become(Deleted));
        assert!(!Processed.can_become(Unprocessed));
        assert!(!Processed.can_become(PreDeleted));
        assert!(!OnHull.can_become(Deleted));
        assert!(!Extreme.can_become(OnHull));
        assert!(!Deleted.can_become(Processed));
    }

    #[test]
    fn count_by_class() {
        let mut store = VertexStore::new(&[DVec2::ZERO; 5]);
        store.set_state(VertexId(0), VertexState::Extreme);
        store.set_state(VertexId(1), VertexState::PreDeleted);
        store.set_state(VertexId(2), VertexState::Processed);
        store.set_state(VertexId(2), VertexState::Deleted);

        assert_eq!(store.count(VertexState::is_eliminated), 2);
        assert_eq!(store.count(VertexState::is_on_hull), 1);
        assert_eq!(store.count(VertexState::is_pending), 2);
    }

    #[test]
    #[should_panic(expected = "non-monotonic")]
    #[cfg(debug_assertions)]
    fn terminal_states_are_final() {
        let mut store = VertexStore::new(&[DVec2::ZERO]);
        store.set_state(VertexId(0), VertexState::Deleted);
        store.set_state(VertexId(0), VertexState::Processed);
    }
}
