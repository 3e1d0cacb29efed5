//! Reference resolution with per-category default directories

use super::{Asset, AssetCategory, AssetError, AssetSource, Behavior, ImageData, Mesh};
use crate::core::{AssetDirectories, CONTENT_ROOT_PREFIX};
use crate::scene::packed::PackedScene;
use std::sync::Arc;

/// Resolves asset references to loaded assets
///
/// Resolution never fails loudly: any load error is logged at debug level
/// and reported as `None`.
pub struct AssetResolver {
    source: Box<dyn AssetSource>,
    directories: AssetDirectories,
}

impl AssetResolver {
    /// Create a resolver over the given source
    pub fn new(source: impl AssetSource + 'static, directories: AssetDirectories) -> Self {
        Self {
            source: Box::new(source),
            directories,
        }
    }

    /// Default directory for a category
    pub fn directory(&self, category: AssetCategory) -> &str {
        match category {
            AssetCategory::Behavior => &self.directories.scripts,
            AssetCategory::Sprite => &self.directories.sprites,
            AssetCategory::Model => &self.directories.models,
        }
    }

    /// Logical path a reference resolves to
    ///
    /// References already rooted at `res://` are kept; anything else is
    /// placed under the category's default directory.
    pub fn resolved_path(&self, reference: &str, category: AssetCategory) -> String {
        if reference.starts_with(CONTENT_ROOT_PREFIX) {
            return reference.to_string();
        }
        let directory = self.directory(category).trim_matches('/');
        let reference = reference.trim_start_matches('/');
        if directory.is_empty() {
            format!("{CONTENT_ROOT_PREFIX}{reference}")
        } else {
            format!("{CONTENT_ROOT_PREFIX}{directory}/{reference}")
        }
    }

    /// Resolve a reference in the given category
    pub fn resolve(&self, reference: &str, category: AssetCategory) -> Option<Asset> {
        let path = self.resolved_path(reference, category);
        let loaded = match category {
            AssetCategory::Sprite => self.source.load_texture(&path).map(|t| Asset::Texture(Arc::new(t))),
            AssetCategory::Model => self.source.load_mesh(&path).map(|m| Asset::Mesh(Arc::new(m))),
            AssetCategory::Behavior => self.source.load_behavior(&path).map(|b| Asset::Behavior(Arc::new(b))),
        };

        match loaded {
            Ok(asset) => {
                log::debug!("Resolved {} '{}' -> {}", category, reference, path);
                Some(asset)
            }
            Err(e) => {
                log::debug!("Could not resolve {} '{}' ({}): {}", category, reference, path, e);
                None
            }
        }
    }

    /// Resolve a sprite texture
    pub fn resolve_texture(&self, reference: &str) -> Option<Arc<ImageData>> {
        match self.resolve(reference, AssetCategory::Sprite)? {
            Asset::Texture(texture) => Some(texture),
            _ => None,
        }
    }

    /// Resolve a model mesh
    pub fn resolve_mesh(&self, reference: &str) -> Option<Arc<Mesh>> {
        match self.resolve(reference, AssetCategory::Model)? {
            Asset::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    /// Resolve a behavior script
    pub fn resolve_behavior(&self, reference: &str) -> Option<Arc<Behavior>> {
        match self.resolve(reference, AssetCategory::Behavior)? {
            Asset::Behavior(behavior) => Some(behavior),
            _ => None,
        }
    }

    /// Load a prebuilt scene artifact
    ///
    /// Artifact paths have no category directory; relative paths are taken
    /// relative to the content root.
    pub fn load_packed_scene(&self, path: &str) -> Result<PackedScene, AssetError> {
        let rooted = if path.starts_with(CONTENT_ROOT_PREFIX) {
            path.to_string()
        } else {
            format!("{CONTENT_ROOT_PREFIX}{}", path.trim_start_matches('/'))
        };
        self.source.load_packed_scene(&rooted)
    }
}
