//! # Unified Configuration
//!
//! Concrete configuration for the scene construction pipeline: where the
//! content root lives on disk, where the specification document is found
//! inside it, and which default directory each asset category resolves
//! against.
//!
//! All paths inside the content root are written as logical `res://` paths.
//! [`ContentConfig::to_filesystem_path`] is the single place that maps
//! them onto the host file system.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use crate::config::{Config, ConfigError};

/// Prefix marking a reference as rooted in the content root
pub const CONTENT_ROOT_PREFIX: &str = "res://";

/// # Content Configuration
///
/// Location of the content root and of the specification document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory on disk that `res://` maps to
    pub content_root: String,
    /// Logical path of the specification document
    pub spec_path: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            content_root: ".".to_string(),
            spec_path: format!("{CONTENT_ROOT_PREFIX}game_spec.json"),
        }
    }
}

impl ContentConfig {
    /// Map a logical path onto the file system
    ///
    /// `res://` paths are joined onto the content root; anything else is
    /// treated as a plain file-system path.
    pub fn to_filesystem_path(&self, logical: &str) -> PathBuf {
        match logical.strip_prefix(CONTENT_ROOT_PREFIX) {
            Some(relative) => PathBuf::from(&self.content_root).join(relative),
            None => PathBuf::from(logical),
        }
    }
}

/// # Asset Directories
///
/// Default directory per asset category, relative to the content root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetDirectories {
    /// Behavior scripts
    pub scripts: String,
    /// Sprite textures
    pub sprites: String,
    /// 3D models
    pub models: String,
}

impl Default for AssetDirectories {
    fn default() -> Self {
        Self {
            scripts: "scripts/".to_string(),
            sprites: "assets/sprites/".to_string(),
            models: "assets/models/".to_string(),
        }
    }
}

/// # Forge Configuration
///
/// Top-level configuration consumed by [`crate::game::GameConstructor`].
/// Loadable from TOML or RON through the [`Config`] trait.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    /// Content root and document location
    pub content: ContentConfig,
    /// Default asset directories
    pub assets: AssetDirectories,
}

impl Config for ForgeConfig {}

impl ForgeConfig {
    /// Configuration rooted at the given content directory
    pub fn with_content_root(root: impl Into<String>) -> Self {
        Self {
            content: ContentConfig {
                content_root: root.into(),
                ..ContentConfig::default()
            },
            ..Self::default()
        }
    }

    /// File-system location of the specification document
    pub fn spec_file(&self) -> PathBuf {
        self.content.to_filesystem_path(&self.content.spec_path)
    }
}
