pub mod arrow;

use vek::{Vec2, Vec4};

/// Produces the color of a single pixel from its local frame coordinate.
///
/// Returning `None` leaves the pixel untouched.
pub trait Shader: Send + Sync {
    fn shade(&self, local: Vec2<f32>) -> Option<Vec4<f32>>;
}
