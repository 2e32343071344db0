//! Orientation tests and tolerance derivation.

use glam::DVec2;

/// Returns twice the signed area of the triangle `a`, `b`, `c`.
///
/// - `orientation > 0`: `c` lies to the left of the directed line `a -> b`
/// - `orientation < 0`: `c` lies to the right
/// - `orientation == 0`: collinear
///
/// The sign is exact thanks to adaptive precision arithmetic.
#[inline]
pub fn orientation(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    use robust::Coord;
    robust::orient2d(
        Coord { x: a.x, y: a.y },
        Coord { x: b.x, y: b.y },
        Coord { x: c.x, y: c.y },
    )
}

/// Returns `true` if `c` lies strictly to the left of `a -> b`, beyond the tolerance `eps`.
#[inline]
pub fn is_left_of(a: DVec2, b: DVec2, c: DVec2, eps: f64) -> bool {
    orientation(a, b, c) > eps
}

/// Returns `true` if `c` lies strictly to the right of `a -> b`, beyond the tolerance `eps`.
#[inline]
pub fn is_right_of(a: DVec2, b: DVec2, c: DVec2, eps: f64) -> bool {
    orientation(a, b, c) < -eps
}

/// Derives a tolerance scaled to the extent of the point set.
///
/// `eps = 2 * (max |x| + max |y|) * f64::EPSILON`
pub fn tolerance(points: &[DVec2]) -> f64 {
    let max_abs = points
        .iter()
        .fold(DVec2::ZERO, |max, point| max.max(point.abs()));
    2.0 * (max_abs.x + max_abs.y) * f64::EPSILON
}
