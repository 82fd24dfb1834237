use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use vek::Vec4;

/// How a distance is turned into a color.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintMode {
    #[default]
    Filled,
    Stroke,
}

impl fmt::Display for PaintMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaintMode::Filled => "filled",
            PaintMode::Stroke => "stroke",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for PaintMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "filled" | "fill" => Ok(PaintMode::Filled),
            "stroke" | "outline" => Ok(PaintMode::Stroke),
            _ => Err(Error::UnknownMode(s.to_string())),
        }
    }
}

impl PaintMode {
    #[inline(always)]
    pub fn paint(
        &self,
        distance: f32,
        linewidth: f32,
        antialias: f32,
        color: Vec4<f32>,
    ) -> Option<Vec4<f32>> {
        match self {
            PaintMode::Filled => filled(distance, linewidth, antialias, color),
            PaintMode::Stroke => stroke(distance, linewidth, antialias, color),
        }
    }
}

/// Half of the fully opaque band and the Gaussian falloff outside of it.
#[inline(always)]
fn border(distance: f32, linewidth: f32, antialias: f32) -> (f32, f32) {
    let t = linewidth / 2.0 - antialias;
    let border_distance = distance.abs() - t;
    let alpha = border_distance / antialias;
    (border_distance, (-alpha * alpha).exp())
}

/// An outline of width `linewidth` centered on the zero contour.
///
/// Returns `None` where nothing should be drawn.
#[inline(always)]
pub fn stroke(
    distance: f32,
    linewidth: f32,
    antialias: f32,
    color: Vec4<f32>,
) -> Option<Vec4<f32>> {
    let (border_distance, alpha) = border(distance, linewidth, antialias);

    if border_distance > linewidth / 2.0 + antialias {
        None
    } else if border_distance < 0.0 {
        Some(color)
    } else {
        Some(Vec4::new(color.x, color.y, color.z, color.w * alpha))
    }
}

/// The interior plus half the stroke band, antialiased on the outside only.
#[inline(always)]
pub fn filled(
    distance: f32,
    linewidth: f32,
    antialias: f32,
    color: Vec4<f32>,
) -> Option<Vec4<f32>> {
    let (border_distance, alpha) = border(distance, linewidth, antialias);

    if border_distance < 0.0 || distance < 0.0 {
        Some(color)
    } else if border_distance > linewidth / 2.0 + antialias {
        None
    } else {
        Some(Vec4::new(color.x, color.y, color.z, color.w * alpha))
    }
}
