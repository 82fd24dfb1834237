use crate::{ArrowKind, ArrowParams, PaintMode, Shader};
use vek::{Vec2, Vec4};

/// Shades a single arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowShader {
    pub kind: ArrowKind,
    pub params: ArrowParams,
    pub mode: PaintMode,
    pub color: Vec4<f32>,
}

impl Default for ArrowShader {
    fn default() -> Self {
        Self::new(ArrowKind::Curved, ArrowParams::default())
    }
}

impl ArrowShader {
    /// A filled black arrow.
    pub fn new(kind: ArrowKind, params: ArrowParams) -> Self {
        Self {
            kind,
            params,
            mode: PaintMode::Filled,
            color: Vec4::new(0.0, 0.0, 0.0, 1.0),
        }
    }

    /// Sets the paint mode using the builder pattern.
    pub fn mode(mut self, mode: PaintMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the color using the builder pattern.
    pub fn color(mut self, color: Vec4<f32>) -> Self {
        self.color = color;
        self
    }

    #[inline(always)]
    pub fn distance(&self, local: Vec2<f32>) -> f32 {
        self.kind.distance(local, &self.params)
    }
}

impl Shader for ArrowShader {
    #[inline(always)]
    fn shade(&self, local: Vec2<f32>) -> Option<Vec4<f32>> {
        let d = self.distance(local);
        self.mode
            .paint(d, self.params.linewidth, self.params.antialias, self.color)
    }
}
