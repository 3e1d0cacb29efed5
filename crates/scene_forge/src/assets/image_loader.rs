//! Image loading utilities for texture data
//!
//! Provides PNG loading for sprite textures, plus solid-color images used as
//! placeholders.

use std::path::Path;
use crate::assets::AssetError;

/// Loaded image data in RGBA8 layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of color channels (always 4 for RGBA)
    pub channels: u8,
}

impl ImageData {
    /// Load a texture file, converting it to RGBA8
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let decoded = image::open(path)
            .map_err(|e| AssetError::LoadFailed(format!("{}: {}", path.display(), e)))?;

        let texture = Self::from_rgba(decoded.into_rgba8());
        log::debug!("Decoded {}x{} texture from {}", texture.width, texture.height, path.display());
        Ok(texture)
    }

    /// Wrap an RGBA8 buffer
    pub fn from_rgba(rgba: image::RgbaImage) -> Self {
        let (width, height) = rgba.dimensions();
        Self {
            data: rgba.into_raw(),
            width,
            height,
            channels: 4,
        }
    }

    /// Image of a single color
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self::from_rgba(image::RgbaImage::from_pixel(width, height, image::Rgba(color)))
    }

    /// RGBA value of the pixel at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y * self.width + x) * 4) as usize;
        let px = self.data.get(offset..offset + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Whether every pixel has full alpha
    pub fn is_opaque(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == u8::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color_image() {
        let img = ImageData::solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(img.width, 4);
        assert_eq!(img.height, 4);
        assert_eq!(img.channels, 4);
        assert_eq!(img.data.len(), 4 * 4 * 4);
        assert_eq!(img.pixel(3, 3), Some([255, 0, 0, 255]));
        assert_eq!(img.pixel(4, 0), None);
        assert!(img.is_opaque());
    }

    #[test]
    fn test_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        image::RgbaImage::from_pixel(2, 3, image::Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();

        let img = ImageData::from_file(&path).unwrap();
        assert_eq!((img.width, img.height), (2, 3));
        assert_eq!(img.pixel(1, 2), Some([1, 2, 3, 255]));
    }

    #[test]
    fn test_garbage_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(matches!(ImageData::from_file(&path), Err(AssetError::LoadFailed(_))));
    }
}
