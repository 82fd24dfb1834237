//! Arrowsdf renders antialiased arrow glyphs from analytic signed distance fields.
//! Shapes are evaluated per pixel on the CPU and composited into RGBA buffers.

pub mod arrow;
pub mod composite;
pub mod error;
pub mod rasterizer;
pub mod sdf;
pub mod settings;
pub mod shader;
pub mod texture;
pub mod viewport;

pub type Pixel = [u8; 4];

/// Convert from Pixel to Vec4<f32>
#[inline(always)]
pub fn pixel_to_vec4(pixel: &Pixel) -> vek::Vec4<f32> {
    vek::Vec4::new(
        pixel[0] as f32 / 255.0,
        pixel[1] as f32 / 255.0,
        pixel[2] as f32 / 255.0,
        pixel[3] as f32 / 255.0,
    )
}

/// Convert from Vec4<f32> to Pixel
#[inline(always)]
pub fn vec4_to_pixel(vec: &vek::Vec4<f32>) -> Pixel {
    [
        (vec.x * 255.0) as u8,
        (vec.y * 255.0) as u8,
        (vec.z * 255.0) as u8,
        (vec.w * 255.0) as u8,
    ]
}

pub const TRANSPARENT: Pixel = [0, 0, 0, 0];
pub const BLACK: Pixel = [0, 0, 0, 255];
pub const WHITE: Pixel = [255, 255, 255, 255];

// Re-exports
pub use crate::{
    arrow::{ArrowKind, ArrowParams, OUTSIDE},
    composite::{PaintMode, filled, stroke},
    error::Error,
    rasterizer::Rasterizer,
    sdf::{circle_from_2_points, line_distance, segment_distance},
    settings::Settings,
    shader::{Shader, arrow::ArrowShader},
    texture::Texture,
    viewport::Viewport,
};

// Prelude
pub mod prelude {
    pub use crate::Rasterizer;
    pub use crate::Texture;
    pub use crate::Viewport;
    pub use crate::{ArrowKind, ArrowParams};
    pub use crate::{ArrowShader, Shader};
    pub use crate::{BLACK, TRANSPARENT, WHITE};
    pub use crate::{PaintMode, filled, stroke};
    pub use crate::{Settings, pixel_to_vec4, vec4_to_pixel};
}
