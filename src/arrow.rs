use crate::{Error, circle_from_2_points, line_distance, segment_distance};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use vek::Vec2;

/// Distance returned by the curved arrow for points outside its extent.
pub const OUTSIDE: f32 = 1000.0;

/// The supported arrow shapes. The numeric suffix is the opening angle of
/// the head.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrowKind {
    #[default]
    #[serde(rename = "curved")]
    Curved,
    #[serde(rename = "triangle-90")]
    Triangle90,
    #[serde(rename = "triangle-60")]
    Triangle60,
    #[serde(rename = "triangle-30")]
    Triangle30,
    #[serde(rename = "angle-90")]
    Angle90,
    #[serde(rename = "angle-60")]
    Angle60,
    #[serde(rename = "angle-30")]
    Angle30,
}

use ArrowKind::*;

impl fmt::Display for ArrowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Curved => "curved",
            Triangle90 => "triangle-90",
            Triangle60 => "triangle-60",
            Triangle30 => "triangle-30",
            Angle90 => "angle-90",
            Angle60 => "angle-60",
            Angle30 => "angle-30",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ArrowKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase().replace('_', "-");
        ArrowKind::iterator()
            .find(|kind| kind.to_string() == name)
            .ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}

impl ArrowKind {
    pub const ALL: [ArrowKind; 7] = [
        Curved, Triangle90, Triangle60, Triangle30, Angle90, Angle60, Angle30,
    ];

    pub fn iterator() -> impl Iterator<Item = ArrowKind> {
        ArrowKind::ALL.iter().copied()
    }

    /// Height of the head corners relative to the head length, `None` for
    /// the curved arrow which uses a fixed ratio of 0.5.
    pub fn height(&self) -> Option<f32> {
        match self {
            Curved => None,
            Triangle90 | Angle90 => Some(1.0),
            Triangle60 | Angle60 => Some(0.5),
            Triangle30 | Angle30 => Some(0.25),
        }
    }

    /// Head length as a fraction of the body length that gives a balanced glyph.
    pub fn head_ratio(&self) -> f32 {
        match self {
            Curved => 0.25,
            Triangle90 | Angle90 => 0.15,
            Triangle60 | Angle60 => 0.20,
            Triangle30 | Angle30 => 0.25,
        }
    }

    /// Signed distance from `p` (in the arrow's local frame) to this arrow.
    pub fn distance(&self, p: Vec2<f32>, params: &ArrowParams) -> f32 {
        let ArrowParams {
            body,
            head,
            linewidth,
            antialias,
        } = *params;
        match self {
            Curved => arrow_curved(p, body, head, linewidth, antialias),
            Triangle90 => arrow_triangle_90(p, body, head, linewidth, antialias),
            Triangle60 => arrow_triangle_60(p, body, head, linewidth, antialias),
            Triangle30 => arrow_triangle_30(p, body, head, linewidth, antialias),
            Angle90 => arrow_angle_90(p, body, head, linewidth, antialias),
            Angle60 => arrow_angle_60(p, body, head, linewidth, antialias),
            Angle30 => arrow_angle_30(p, body, head, linewidth, antialias),
        }
    }
}

/// Size and style of an arrow, in local frame units (usually pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowParams {
    /// Length of the shaft, centered on the origin.
    pub body: f32,
    /// Length of the head, measured back from the tip.
    pub head: f32,
    pub linewidth: f32,
    /// Width of the antialiasing falloff band.
    pub antialias: f32,
}

impl Default for ArrowParams {
    fn default() -> Self {
        Self::for_kind(ArrowKind::Curved, 20.0, 1.0)
    }
}

impl ArrowParams {
    pub fn new(body: f32, head: f32, linewidth: f32, antialias: f32) -> Self {
        Self {
            body,
            head,
            linewidth,
            antialias,
        }
    }

    /// Default proportions: a body of 15 line widths and the
    /// kind's head ratio.
    pub fn for_kind(kind: ArrowKind, linewidth: f32, antialias: f32) -> Self {
        let body = 15.0 * linewidth;
        Self::new(body, kind.head_ratio() * body, linewidth, antialias)
    }

    /// Checks the invariants the distance functions silently rely on.
    pub fn validate(&self) -> Result<(), Error> {
        let invalid = |reason: &str| Err(Error::InvalidParams(reason.to_string()));
        if !(self.body > 0.0) {
            return invalid("body must be greater than zero");
        }
        if !(self.head >= 0.0) {
            return invalid("head must not be negative");
        }
        if !(self.linewidth > 0.0) {
            return invalid("linewidth must be greater than zero");
        }
        if !(self.antialias > 0.0) {
            return invalid("antialias must be greater than zero");
        }
        if self.antialias >= self.linewidth {
            return invalid("antialias must be smaller than linewidth");
        }
        Ok(())
    }
}

/// Arrow with a head carved out of three large circles.
pub fn arrow_curved(
    p: Vec2<f32>,
    body: f32,
    head: f32,
    linewidth: f32,
    antialias: f32,
) -> f32 {
    let start = -Vec2::new(body / 2.0, 0.0);
    let end = Vec2::new(body / 2.0, 0.0);
    let height = 0.5;

    let p1 = end - Vec2::new(1.0, height) * head;
    let p2 = end - Vec2::new(1.0, -height) * head;
    let p3 = end;

    // Head
    let outer = 1.25 * body;
    let inner = (body - head).max(body);
    let c1 = circle_from_2_points(p1, p3, outer).1;
    let d1 = (p - c1).magnitude() - outer;
    let c2 = circle_from_2_points(p2, p3, outer).0;
    let d2 = (p - c2).magnitude() - outer;
    let c3 = circle_from_2_points(p1, p2, inner).0;
    let d3 = (p - c3).magnitude() - inner;

    // Body
    let d4 = segment_distance(p, start, end - Vec2::new(linewidth, 0.0));

    // The head is the outside of all three circles, so clip it to its extent
    if p.y > 2.0 * head + antialias {
        return OUTSIDE;
    }
    if p.y < -(2.0 * head + antialias) {
        return OUTSIDE;
    }
    if p.x < -(body / 2.0 + antialias) {
        return OUTSIDE;
    }
    if p.x > c1.x {
        return OUTSIDE;
    }

    d4.min(-d3.min(d1.min(d2)))
}

/// Arrow with a filled triangular head. `height` sets the head corners
/// relative to the head length.
pub fn arrow_triangle(
    p: Vec2<f32>,
    body: f32,
    head: f32,
    height: f32,
    linewidth: f32,
    _antialias: f32,
) -> f32 {
    let start = -Vec2::new(body / 2.0, 0.0);
    let end = Vec2::new(body / 2.0, 0.0);

    // Head
    let d1 = line_distance(p, end, end - Vec2::new(1.0, -height) * head);
    let d2 = line_distance(p, end - Vec2::new(1.0, height) * head, end);
    let d3 = p.x - end.x + head;

    // Body
    let d4 = segment_distance(p, start, end - Vec2::new(linewidth, 0.0));

    d1.max(d2).max(-d3).min(d4)
}

pub fn arrow_triangle_90(
    p: Vec2<f32>,
    body: f32,
    head: f32,
    linewidth: f32,
    antialias: f32,
) -> f32 {
    arrow_triangle(p, body, head, 1.0, linewidth, antialias)
}

pub fn arrow_triangle_60(
    p: Vec2<f32>,
    body: f32,
    head: f32,
    linewidth: f32,
    antialias: f32,
) -> f32 {
    arrow_triangle(p, body, head, 0.5, linewidth, antialias)
}

pub fn arrow_triangle_30(
    p: Vec2<f32>,
    body: f32,
    head: f32,
    linewidth: f32,
    antialias: f32,
) -> f32 {
    arrow_triangle(p, body, head, 0.25, linewidth, antialias)
}

/// Arrow with an open chevron head.
pub fn arrow_angle(
    p: Vec2<f32>,
    body: f32,
    head: f32,
    height: f32,
    linewidth: f32,
    _antialias: f32,
) -> f32 {
    let start = -Vec2::new(body / 2.0, 0.0);
    let end = Vec2::new(body / 2.0, 0.0);

    if p.x > body / 2.0 {
        // Past the tip: wedge bounded by both head lines
        let d1 = line_distance(p, end, end - Vec2::new(1.0, -height) * head);
        let d2 = line_distance(p, end - Vec2::new(1.0, height) * head, end);
        let d3 = end.x - p.x;
        d1.max(d2).max(d3)
    } else {
        let d1 = segment_distance(p, end - Vec2::new(1.0, -height) * head, end);
        let d2 = segment_distance(p, end - Vec2::new(1.0, height) * head, end);
        let d3 = segment_distance(p, start, end - Vec2::new(linewidth, 0.0));
        d1.min(d2).min(d3)
    }
}

pub fn arrow_angle_90(
    p: Vec2<f32>,
    body: f32,
    head: f32,
    linewidth: f32,
    antialias: f32,
) -> f32 {
    arrow_angle(p, body, head, 1.0, linewidth, antialias)
}

pub fn arrow_angle_60(
    p: Vec2<f32>,
    body: f32,
    head: f32,
    linewidth: f32,
    antialias: f32,
) -> f32 {
    arrow_angle(p, body, head, 0.5, linewidth, antialias)
}

pub fn arrow_angle_30(
    p: Vec2<f32>,
    body: f32,
    head: f32,
    linewidth: f32,
    antialias: f32,
) -> f32 {
    arrow_angle(p, body, head, 0.25, linewidth, antialias)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{filled, stroke};
    use vek::Vec4;

    const BLACK: Vec4<f32> = Vec4 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    fn params() -> ArrowParams {
        ArrowParams::new(300.0, 75.0, 20.0, 1.0)
    }

    #[test]
    fn test_curved_shaft_center_is_filled() {
        let params = params();
        let d = Curved.distance(Vec2::new(0.0, 0.0), &params);

        // The shaft is a zero-width slab widened by the stroke band
        assert!(d <= 0.0, "expected shaft center inside, got {}", d);
        assert_eq!(
            filled(d, params.linewidth, params.antialias, BLACK),
            Some(BLACK)
        );
    }

    #[test]
    fn test_curved_beyond_tip_is_empty() {
        let params = params();
        let p = Vec2::new(params.body / 2.0 + params.head + 10.0, 0.0);
        let d = Curved.distance(p, &params);

        assert!(d > params.linewidth / 2.0, "expected far outside, got {}", d);
        assert_eq!(filled(d, params.linewidth, params.antialias, BLACK), None);
        assert_eq!(stroke(d, params.linewidth, params.antialias, BLACK), None);
    }

    #[test]
    fn test_curved_bounding_checks() {
        let params = params();
        let above = Vec2::new(0.0, 2.0 * params.head + params.antialias + 0.5);
        let behind = Vec2::new(-(params.body / 2.0 + params.antialias + 0.5), 0.0);

        assert_eq!(Curved.distance(above, &params), OUTSIDE);
        assert_eq!(Curved.distance(-above, &params), OUTSIDE);
        assert_eq!(Curved.distance(behind, &params), OUTSIDE);
        assert_eq!(Curved.distance(Vec2::new(10_000.0, 0.0), &params), OUTSIDE);
    }

    #[test]
    fn test_curved_head_corner_continuity() {
        let ArrowParams {
            body,
            head,
            linewidth,
            antialias,
        } = params();
        let end = Vec2::new(body / 2.0, 0.0);
        let p1 = end - Vec2::new(1.0, 0.5) * head;
        let p2 = end - Vec2::new(1.0, -0.5) * head;

        let outer = 1.25 * body;
        let inner = (body - head).max(body);
        let c1 = circle_from_2_points(p1, end, outer).1;
        let c2 = circle_from_2_points(p2, end, outer).0;
        let c3 = circle_from_2_points(p1, p2, inner).0;

        for corner in [p1, p2] {
            let d = arrow_curved(corner, body, head, linewidth, antialias);
            let terms = [
                -((corner - c1).magnitude() - outer),
                -((corner - c2).magnitude() - outer),
                -((corner - c3).magnitude() - inner),
            ];
            assert!(
                terms.iter().any(|t| (d - t).abs() < 1e-2),
                "corner {:?} distance {} matches no arc {:?}",
                corner,
                d,
                terms
            );
            assert!(d.abs() < 1e-2);
        }
    }

    #[test]
    fn test_curved_head_is_inside() {
        let params = params();
        // Just behind the tip on the axis
        let d = Curved.distance(Vec2::new(140.0, 0.0), &params);
        assert!(d < 0.0, "got {}", d);
    }

    #[test]
    fn test_triangle_edge_is_stroked() {
        let params = params();
        let end = Vec2::new(params.body / 2.0, 0.0);
        let corner = end - Vec2::new(1.0, -1.0) * params.head;
        let on_edge = (end + corner) * 0.5;

        let d = Triangle90.distance(on_edge, &params);
        assert!(d.abs() < 1e-3, "got {}", d);
        assert_eq!(
            stroke(d, params.linewidth, params.antialias, BLACK),
            Some(BLACK)
        );
    }

    #[test]
    fn test_triangle_head_interior() {
        let params = params();
        let d = Triangle90.distance(Vec2::new(100.0, 20.0), &params);
        assert!(d < -10.0, "got {}", d);

        // Behind the head base the triangle is cut off
        let d = Triangle90.distance(Vec2::new(60.0, 40.0), &params);
        assert!(d > 0.0, "got {}", d);
    }

    #[test]
    fn test_angle_is_open_chevron() {
        let params = params();
        // Inside a filled triangle, but between the chevron strokes
        let p = Vec2::new(140.0, 0.0);
        assert!(Triangle90.distance(p, &params) < 0.0);
        assert!(Angle90.distance(p, &params) > 0.0);

        // Past the tip the wedge still reports a distance
        let d = Angle90.distance(Vec2::new(160.0, 0.0), &params);
        assert!(d > 0.0, "got {}", d);
    }

    #[test]
    fn test_kinds_disagree_near_head() {
        let params = params();
        let near_tip = Vec2::new(140.0, 0.0);
        let near_corner = Vec2::new(90.0, 40.0);

        assert!(Curved.distance(near_tip, &params) < 0.0);
        assert!(Triangle90.distance(near_tip, &params) < 0.0);
        assert!(Angle90.distance(near_tip, &params) > 0.0);

        assert!(Curved.distance(near_corner, &params) > 0.0);
        assert!(Triangle90.distance(near_corner, &params) < 0.0);
    }

    #[test]
    fn test_presets_are_mirror_symmetric() {
        let params = params();
        for kind in ArrowKind::iterator().filter(|k| *k != Curved) {
            for (x, y) in [(100.0, 12.0), (130.0, 40.0), (-20.0, 7.0), (160.0, 3.0)] {
                let a = kind.distance(Vec2::new(x, y), &params);
                let b = kind.distance(Vec2::new(x, -y), &params);
                assert!((a - b).abs() < 1e-3, "{} at ({}, {})", kind, x, y);
            }
        }
    }

    #[test]
    fn test_narrower_heads() {
        let body = 300.0;
        let head = 75.0;
        // At the head base the corners sit at head * height
        let p = Vec2::new(body / 2.0 - head + 1.0, 30.0);
        assert!(arrow_triangle_90(p, body, head, 20.0, 1.0) < 0.0);
        assert!(arrow_triangle_60(p, body, head, 20.0, 1.0) < 0.0);
        assert!(arrow_triangle_30(p, body, head, 20.0, 1.0) > 0.0);
    }

    #[test]
    fn test_kind_names() {
        for kind in ArrowKind::iterator() {
            assert_eq!(kind.to_string().parse::<ArrowKind>().unwrap(), kind);
        }
        assert_eq!("Triangle_60".parse::<ArrowKind>().unwrap(), Triangle60);
        assert!("arrow".parse::<ArrowKind>().is_err());
    }

    #[test]
    fn test_params_for_kind() {
        let p = ArrowParams::for_kind(Triangle90, 20.0, 1.0);
        assert_eq!(p.body, 300.0);
        assert!((p.head - 45.0).abs() < 1e-4);
        assert!(p.validate().is_ok());

        assert!(ArrowParams::new(0.0, 10.0, 20.0, 1.0).validate().is_err());
        assert!(ArrowParams::new(100.0, -1.0, 20.0, 1.0).validate().is_err());
        assert!(ArrowParams::new(100.0, 10.0, 2.0, 3.0).validate().is_err());
        assert!(ArrowParams::new(f32::NAN, 10.0, 20.0, 1.0).validate().is_err());
    }
}
