//! Signed distance primitives the arrow shapes are built from.
//!
//! None of these functions validate their input. Degenerate geometry (equal
//! endpoints, a radius too small to span two points) produces NaN, which the
//! compositing stage treats as "no coverage".

use vek::Vec2;

/// Signed distance from `p` to the infinite line through `p1` and `p2`.
///
/// Positive on the side of the normal `(dir.y, -dir.x)`, i.e. to the right
/// when walking from `p1` to `p2`.
#[inline(always)]
pub fn line_distance(p: Vec2<f32>, p1: Vec2<f32>, p2: Vec2<f32>) -> f32 {
    let center = (p1 + p2) * 0.5;
    let len = (p2 - p1).magnitude();
    let dir = (p2 - p1) / len;
    let rel_p = p - center;
    rel_p.dot(Vec2::new(dir.y, -dir.x))
}

/// Distance from `p` to the segment `p1..p2`.
///
/// This is the maximum of the perpendicular and the along-axis distance, a
/// flat capped slab rather than a round capsule. It never goes below zero.
#[inline(always)]
pub fn segment_distance(p: Vec2<f32>, p1: Vec2<f32>, p2: Vec2<f32>) -> f32 {
    let center = (p1 + p2) * 0.5;
    let len = (p2 - p1).magnitude();
    let dir = (p2 - p1) / len;
    let rel_p = p - center;
    let dist1 = rel_p.dot(Vec2::new(dir.y, -dir.x)).abs();
    let dist2 = rel_p.dot(dir).abs() - 0.5 * len;
    dist1.max(dist2)
}

/// The two centers of the circles of the given `radius` passing through both
/// `p1` and `p2`, returned as `(m + d, m - d)`.
///
/// Swapping `p1` and `p2` swaps the two solutions. Requires
/// `radius >= |p2 - p1| / 2`.
#[inline(always)]
pub fn circle_from_2_points(
    p1: Vec2<f32>,
    p2: Vec2<f32>,
    radius: f32,
) -> (Vec2<f32>, Vec2<f32>) {
    let q = (p2 - p1).magnitude();
    let m = (p1 + p2) / 2.0;
    let h = (radius * radius - (q * q / 4.0)).sqrt();
    let d = Vec2::new(h * (p1.y - p2.y) / q, h * (p2.x - p1.x) / q);
    (m + d, m - d)
}
