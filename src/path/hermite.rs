//! Cubic Hermite spline math.
//!
//! Pure Vec3 → Vec3 transforms with no pose or rotation dependencies.

use glam::Vec3;

/// Hermite basis weights `(h00, h10, h01, h11)` at parameter `t`.
#[inline]
pub(crate) fn basis(t: f32) -> [f32; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        2.0 * t3 - 3.0 * t2 + 1.0,
        t3 - 2.0 * t2 + t,
        -2.0 * t3 + 3.0 * t2,
        t3 - t2,
    ]
}

/// Point on the Hermite curve from `p0` (tangent `m0`) to `p1` (tangent
/// `m1`).
#[inline]
pub(crate) fn point(p0: Vec3, m0: Vec3, p1: Vec3, m1: Vec3, t: f32) -> Vec3 {
    let [h00, h10, h01, h11] = basis(t);
    h00 * p0 + h10 * m0 + h01 * p1 + h11 * m1
}

/// Tangents `(m0, m1)` for the segment starting at `points[segment]`.
///
/// Interior tangents use central differences; the outer ends of the first
/// and last segments fall back to the segment chord.
pub(crate) fn segment_tangents(points: &[Vec3], segment: usize) -> (Vec3, Vec3) {
    let n = points.len();
    let p0 = points[segment];
    let p1 = points[segment + 1];
    let chord = p1 - p0;

    let m0 = if segment > 0 {
        0.5 * (p1 - points[segment - 1])
    } else {
        chord
    };
    let m1 = if segment + 2 < n {
        0.5 * (points[segment + 2] - p0)
    } else {
        chord
    };
    (m0, m1)
}
