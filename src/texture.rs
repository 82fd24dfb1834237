use crate::{Error, Pixel};
use image::RgbaImage;
use std::path::Path;

/// Textures contain RGBA [u8;4] pixels, row 0 on top.
#[derive(PartialEq, Clone, Debug)]
pub struct Texture {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl Texture {
    /// Creates a new fully transparent texture with the given width and height.
    pub fn alloc(width: usize, height: usize) -> Self {
        Texture {
            data: vec![0; width * height * 4],
            width,
            height,
        }
    }

    /// Creates a texture of the given size filled with a single color.
    pub fn from_color(width: usize, height: usize, color: Pixel) -> Self {
        let mut texture = Self::alloc(width, height);
        texture.fill(color);
        texture
    }

    pub fn fill(&mut self, color: Pixel) {
        for chunk in self.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }

    /// Returns the pixel at (`x`, `y`), `None` when out of bounds.
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let mut pixel = [0; 4];
        pixel.copy_from_slice(&self.data[idx..idx + 4]);
        Some(pixel)
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Pixel) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            self.data[idx..idx + 4].copy_from_slice(&color);
        }
    }

    /// Loads a texture from an image file, converting it to RGBA8.
    pub fn load_png(path: impl AsRef<Path>) -> Result<Self, Error> {
        let rgba_img = image::open(path)?.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        Ok(Texture {
            data: rgba_img.into_raw(),
            width: width as usize,
            height: height as usize,
        })
    }

    /// Saves the texture as a 4 channel (RGBA) PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let img = RgbaImage::from_raw(self.width as u32, self.height as u32, self.data.clone())
            .ok_or_else(|| Error::InvalidParams("texture data does not match its size".into()))?;
        img.save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TRANSPARENT, WHITE};

    #[test]
    fn test_pixel_access() {
        let mut texture = Texture::from_color(4, 3, WHITE);
        assert_eq!(texture.get_pixel(3, 2), Some(WHITE));
        assert_eq!(texture.get_pixel(4, 0), None);

        texture.set_pixel(1, 1, [10, 20, 30, 40]);
        assert_eq!(texture.get_pixel(1, 1), Some([10, 20, 30, 40]));
        assert_eq!(&texture.data[(4 + 1) * 4..(4 + 1) * 4 + 4], &[10, 20, 30, 40]);

        // Writes outside the texture are ignored
        texture.set_pixel(9, 9, [1, 1, 1, 1]);
        assert_eq!(Texture::alloc(2, 2).get_pixel(1, 1), Some(TRANSPARENT));
    }

    #[test]
    fn test_save_png() {
        let mut texture = Texture::from_color(8, 4, WHITE);
        texture.set_pixel(7, 0, [255, 0, 0, 128]);

        let path = std::env::temp_dir().join(format!("arrowsdf-texture-{}.png", std::process::id()));
        texture.save_png(&path).unwrap();

        let loaded = Texture::load_png(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, texture);
    }
}
