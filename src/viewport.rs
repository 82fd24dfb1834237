use vek::Vec2;

/// Maps output pixels into the local frame of the shape.
///
/// The shape is drawn onto a quad centered on the screen. `quad` holds the
/// quad's half extents in normalized device coordinates (1.0 spans the whole
/// axis), pixels outside of it are not covered. Inside, the local coordinate
/// is the pixel's offset from the screen center in pixels, multiplied by
/// `scale`, with y pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
    pub quad: Vec2<f32>,
    pub scale: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 800)
    }
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            quad: Vec2::new(1.0, 0.5),
            scale: 1.0,
        }
    }

    /// Sets the quad half extents using the builder pattern.
    pub fn quad(mut self, quad: Vec2<f32>) -> Self {
        self.quad = quad;
        self
    }

    /// Sets the resolution scale using the builder pattern.
    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Normalized device coordinate of the center of pixel (`x`, `y`), row 0 on top.
    #[inline(always)]
    pub fn ndc(&self, x: usize, y: usize) -> Vec2<f32> {
        Vec2::new(
            (x as f32 + 0.5) / self.width as f32 * 2.0 - 1.0,
            1.0 - (y as f32 + 0.5) / self.height as f32 * 2.0,
        )
    }

    /// Local frame coordinate of pixel (`x`, `y`), `None` if the quad does not cover it.
    #[inline(always)]
    pub fn local(&self, x: usize, y: usize) -> Option<Vec2<f32>> {
        let ndc = self.ndc(x, y);
        if ndc.x.abs() > self.quad.x || ndc.y.abs() > self.quad.y {
            return None;
        }
        let resolution = Vec2::new(self.width as f32, self.height as f32);
        Some(ndc * 0.5 * resolution * self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_maps_to_origin() {
        let viewport = Viewport::new(800, 800);
        let left = viewport.local(399, 399).unwrap();
        let right = viewport.local(400, 400).unwrap();

        assert!((left - Vec2::new(-0.5, 0.5)).magnitude() < 1e-3);
        assert!((right - Vec2::new(0.5, -0.5)).magnitude() < 1e-3);
    }

    #[test]
    fn test_local_is_pixel_offset() {
        let viewport = Viewport::new(800, 600);
        let p = viewport.local(0, 300).unwrap();
        assert!((p.x + 399.5).abs() < 1e-3);
        assert!((p.y + 0.5).abs() < 1e-3);

        let scaled = viewport.scale(2.0).local(0, 300).unwrap();
        assert!((scaled.x + 799.0).abs() < 1e-3);
    }

    #[test]
    fn test_default_quad_covers_middle_half() {
        let viewport = Viewport::new(800, 800);
        assert!(viewport.local(400, 0).is_none());
        assert!(viewport.local(400, 199).is_none());
        assert!(viewport.local(400, 200).is_some());
        assert!(viewport.local(400, 599).is_some());
        assert!(viewport.local(400, 600).is_none());
        assert!(viewport.local(0, 400).is_some());
        assert!(viewport.local(799, 400).is_some());
    }

    #[test]
    fn test_full_quad() {
        let viewport = Viewport::new(64, 64).quad(Vec2::new(1.0, 1.0));
        for y in 0..64 {
            for x in 0..64 {
                assert!(viewport.local(x, y).is_some());
            }
        }
    }
}
