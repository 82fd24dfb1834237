use crate::{Pixel, Shader, TRANSPARENT, Texture, Viewport, pixel_to_vec4, vec4_to_pixel};
use log::debug;
use rayon::prelude::*;

/// A rectangular block of the framebuffer shaded as one parallel job.
#[derive(Debug, Clone, Copy)]
struct TileRect {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

/// Evaluates a shader for every covered pixel of a texture, in parallel tiles.
pub struct Rasterizer {
    pub viewport: Viewport,

    /// Background color, `None` keeps the buffer fully transparent.
    pub background_color: Option<Pixel>,

    /// Edge length of the square tiles, 0 is treated as 1.
    pub tile_size: usize,
}

impl Rasterizer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            background_color: None,
            tile_size: 64,
        }
    }

    /// Sets the background color using the builder pattern.
    pub fn background(mut self, background: Pixel) -> Self {
        self.background_color = Some(background);
        self
    }

    /// Sets the tile size using the builder pattern.
    pub fn tile_size(mut self, tile_size: usize) -> Self {
        self.tile_size = tile_size.max(1);
        self
    }

    /// Allocates a texture of the viewport size and rasterizes the shader into it.
    pub fn render(&self, shader: &dyn Shader) -> Texture {
        let mut texture = Texture::alloc(self.viewport.width, self.viewport.height);
        self.rasterize(shader, &mut texture.data, texture.width, texture.height);
        texture
    }

    /// Rasterize the shader into `pixels`, an RGBA8 buffer of `width` x `height`.
    ///
    /// Every pixel is reset to the background first, shader colors are then
    /// blended on top with their alpha.
    pub fn rasterize(&self, shader: &dyn Shader, pixels: &mut [u8], width: usize, height: usize) {
        assert_eq!(pixels.len(), width * height * 4, "Invalid framebuffer size.");

        let viewport = Viewport {
            width,
            height,
            ..self.viewport
        };

        let tile_size = self.tile_size.max(1);

        // Divide the screen into tiles
        let mut tiles = Vec::new();
        for y in (0..height).step_by(tile_size) {
            for x in (0..width).step_by(tile_size) {
                tiles.push(TileRect {
                    x,
                    y,
                    width: tile_size.min(width - x),
                    height: tile_size.min(height - y),
                });
            }
        }

        debug!(
            "rasterizing {}x{} in {} tiles of {}px",
            width,
            height,
            tiles.len(),
            tile_size
        );

        let background = self.background_color.unwrap_or(TRANSPARENT);

        // Parallel process each tile
        let tile_buffers: Vec<Vec<u8>> = tiles
            .par_iter()
            .map(|tile| {
                let mut buffer = vec![0; tile.width * tile.height * 4];
                for chunk in buffer.chunks_exact_mut(4) {
                    chunk.copy_from_slice(&background);
                }

                for ty in 0..tile.height {
                    for tx in 0..tile.width {
                        let Some(local) = viewport.local(tile.x + tx, tile.y + ty) else {
                            continue;
                        };
                        let Some(color) = shader.shade(local) else {
                            continue;
                        };
                        let alpha = color.w.clamp(0.0, 1.0);
                        if alpha.is_nan() || alpha == 0.0 {
                            continue;
                        }

                        let idx = (ty * tile.width + tx) * 4;
                        let mut dst = [0; 4];
                        dst.copy_from_slice(&buffer[idx..idx + 4]);
                        let dst = pixel_to_vec4(&dst);
                        let blended = dst * (1.0 - alpha) + color * alpha;
                        buffer[idx..idx + 4].copy_from_slice(&vec4_to_pixel(&blended));
                    }
                }

                buffer
            })
            .collect();

        // Combine tile buffers into the main framebuffer
        for (tile, tile_buffer) in tiles.iter().zip(tile_buffers.iter()) {
            let tile_row_bytes = tile.width * 4;
            let framebuffer_row_bytes = width * 4;

            let mut src_offset = 0;
            let mut dst_offset = (tile.y * width + tile.x) * 4;

            for _ in 0..tile.height {
                pixels[dst_offset..dst_offset + tile_row_bytes]
                    .copy_from_slice(&tile_buffer[src_offset..src_offset + tile_row_bytes]);

                src_offset += tile_row_bytes;
                dst_offset += framebuffer_row_bytes;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArrowKind, ArrowParams, ArrowShader, BLACK, PaintMode, WHITE};
    use vek::{Vec2, Vec4};

    struct Solid(Vec4<f32>);

    impl Shader for Solid {
        fn shade(&self, _local: Vec2<f32>) -> Option<Vec4<f32>> {
            Some(self.0)
        }
    }

    #[test]
    fn test_background_outside_quad() {
        let rasterizer = Rasterizer::new(Viewport::new(40, 40)).background(WHITE);
        let texture = rasterizer.render(&Solid(Vec4::new(0.0, 0.0, 0.0, 1.0)));

        assert_eq!(texture.get_pixel(20, 0), Some(WHITE));
        assert_eq!(texture.get_pixel(20, 39), Some(WHITE));
        assert_eq!(texture.get_pixel(0, 20), Some(BLACK));
        assert_eq!(texture.get_pixel(39, 20), Some(BLACK));
    }

    #[test]
    fn test_half_alpha_blend() {
        let rasterizer = Rasterizer::new(Viewport::new(8, 8).quad(Vec2::new(1.0, 1.0)))
            .background(WHITE);
        let texture = rasterizer.render(&Solid(Vec4::new(0.0, 0.0, 0.0, 0.5)));

        let pixel = texture.get_pixel(4, 4).unwrap();
        assert!((pixel[0] as i32 - 127).abs() <= 1);
        assert!((pixel[3] as i32 - 191).abs() <= 1);
    }

    #[test]
    fn test_transparent_without_background() {
        let shader = ArrowShader::new(ArrowKind::Curved, ArrowParams::default());
        let texture = Rasterizer::new(Viewport::new(800, 800)).render(&shader);

        assert_eq!(texture.get_pixel(0, 0), Some(TRANSPARENT));
        // Shaft center line
        assert_eq!(texture.get_pixel(300, 399), Some(BLACK));
    }

    #[test]
    fn test_arrow_frame() {
        let params = ArrowParams::new(300.0, 75.0, 20.0, 1.0);
        let shader = ArrowShader::new(ArrowKind::Curved, params);
        let texture = Rasterizer::new(Viewport::new(800, 800))
            .background(WHITE)
            .render(&shader);

        // Origin is at (400, 400), local y points up
        assert_eq!(texture.get_pixel(400, 400), Some(BLACK));
        assert_eq!(texture.get_pixel(400, 370), Some(WHITE));
        // Head just behind the tip
        assert_eq!(texture.get_pixel(540, 400), Some(BLACK));
        // Beyond the tip
        assert_eq!(texture.get_pixel(640, 400), Some(WHITE));
    }

    #[test]
    fn test_tile_size_does_not_change_output() {
        let params = ArrowParams::for_kind(ArrowKind::Angle60, 20.0, 1.0);
        let shader = ArrowShader::new(ArrowKind::Angle60, params).mode(PaintMode::Stroke);
        let viewport = Viewport::new(400, 300).scale(1.5);

        let a = Rasterizer::new(viewport).tile_size(7).render(&shader);
        let b = Rasterizer::new(viewport).tile_size(128).render(&shader);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_tile_size_is_clamped() {
        let shader = ArrowShader::default();
        let viewport = Viewport::new(60, 40);

        let mut rasterizer = Rasterizer::new(viewport).background(WHITE);
        rasterizer.tile_size = 0;
        let a = rasterizer.render(&shader);
        let b = Rasterizer::new(viewport)
            .background(WHITE)
            .tile_size(1)
            .render(&shader);
        assert_eq!(a, b);
    }
}
