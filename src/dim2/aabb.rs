use glam::DVec2;

/// An Axis-Aligned Bounding Box (AABB) in 2D space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb2d {
    /// The minimum corner of the AABB.
    pub min: DVec2,
    /// The maximum corner of the AABB.
    pub max: DVec2,
}

impl Aabb2d {
    /// Creates a new AABB with the given minimum and maximum points.
    #[inline]
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// Creates an AABB that bounds the given set of points.
    ///
    /// Returns `None` if `points` is empty.
    #[inline]
    pub fn from_points(points: &[DVec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Self::new(*first, *first), |aabb, point| {
            Self::new(aabb.min.min(*point), aabb.max.max(*point))
        }))
    }

    /// Returns `true` if the point lies inside the AABB or on its boundary.
    #[inline]
    pub fn contains(&self, point: DVec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Returns `true` if the AABB has no interior,
    /// meaning that no point can be strictly inside it.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Returns `true` if the point lies strictly inside the AABB.
    /// Points on the boundary are not contained.
    #[inline]
    pub fn contains_strict(&self, point: DVec2) -> bool {
        self.min.x < point.x && point.x < self.max.x && self.min.y < point.y && point.y < self.max.y
    }
}
