//! Asset management system
//!
//! Assets are addressed by logical `res://` paths and loaded through the
//! [`AssetSource`] trait, which is the seam to the hosting runtime. The
//! [`AssetResolver`] applies the per-category default directories and turns
//! every failure into `None`; deciding on a placeholder is left to callers.

pub mod filesystem;
pub mod image_loader;
pub mod mesh;
pub mod obj_loader;
pub mod placeholder;
pub mod resolver;

pub use filesystem::FileSystemSource;
pub use image_loader::ImageData;
pub use mesh::{Mesh, Vertex};
pub use obj_loader::{ObjError, ObjLoader};
pub use placeholder::{placeholder_mesh, placeholder_texture, PLACEHOLDER_COLOR, PLACEHOLDER_TEXTURE_SIZE};
pub use resolver::AssetResolver;

use crate::scene::packed::PackedScene;
use std::sync::Arc;
use thiserror::Error;

/// Asset category, selecting the default directory for relative references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    /// Behavior scripts (`scripts/`)
    Behavior,
    /// Sprite textures (`assets/sprites/`)
    Sprite,
    /// 3D models (`assets/models/`)
    Model,
}

impl std::fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Behavior => write!(f, "behavior"),
            Self::Sprite => write!(f, "sprite"),
            Self::Model => write!(f, "model"),
        }
    }
}

/// Executable behavior attached to a node
///
/// Only the source is carried; running it is the host's business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Behavior {
    /// Resolved logical path
    pub path: String,
    /// Script source text
    pub source: String,
}

/// A loaded asset
#[derive(Debug, Clone)]
pub enum Asset {
    /// Sprite texture
    Texture(Arc<ImageData>),
    /// Model geometry
    Mesh(Arc<Mesh>),
    /// Behavior script
    Behavior(Arc<Behavior>),
}

/// Source of raw assets, implemented by the hosting runtime
///
/// Paths passed in are always rooted logical paths (`res://...`).
pub trait AssetSource {
    /// Load a texture
    fn load_texture(&self, path: &str) -> Result<ImageData, AssetError>;

    /// Load a mesh
    fn load_mesh(&self, path: &str) -> Result<Mesh, AssetError>;

    /// Load a behavior script
    fn load_behavior(&self, path: &str) -> Result<Behavior, AssetError>;

    /// Load a prebuilt scene artifact
    fn load_packed_scene(&self, path: &str) -> Result<PackedScene, AssetError>;
}

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Unsupported asset format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<ObjError> for AssetError {
    fn from(err: ObjError) -> Self {
        match err {
            ObjError::Io(io) => Self::IoError(io),
            other => Self::InvalidData(other.to_string()),
        }
    }
}
