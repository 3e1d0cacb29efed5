//! Synthesized stand-ins for assets that cannot be resolved
//!
//! Placeholders are deterministic and independent of any file on disk, so a
//! missing reference degrades visually instead of breaking construction.

use super::{image_loader::ImageData, mesh::Mesh};

/// Width and height of the placeholder texture in pixels
pub const PLACEHOLDER_TEXTURE_SIZE: u32 = 64;

/// Opaque magenta, the placeholder texture color
pub const PLACEHOLDER_COLOR: [u8; 4] = [255, 0, 255, 255];

/// 64x64 single-color opaque texture
pub fn placeholder_texture() -> ImageData {
    ImageData::solid_color(PLACEHOLDER_TEXTURE_SIZE, PLACEHOLDER_TEXTURE_SIZE, PLACEHOLDER_COLOR)
}

/// Unit-size box mesh
pub fn placeholder_mesh() -> Mesh {
    Mesh::unit_cube()
}
