//! File-system backed asset source

use super::{AssetError, AssetSource, Behavior, ImageData, Mesh, ObjLoader};
use crate::core::ContentConfig;
use crate::scene::packed::PackedScene;
use std::path::{Path, PathBuf};

/// Loads assets from the content root on disk
#[derive(Debug, Clone)]
pub struct FileSystemSource {
    content: ContentConfig,
}

impl FileSystemSource {
    /// Create a source for the given content configuration
    pub fn new(content: ContentConfig) -> Self {
        Self { content }
    }

    fn existing_file(&self, path: &str) -> Result<PathBuf, AssetError> {
        let file = self.content.to_filesystem_path(path);
        if file.is_file() {
            Ok(file)
        } else {
            Err(AssetError::NotFound(path.to_string()))
        }
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

impl AssetSource for FileSystemSource {
    fn load_texture(&self, path: &str) -> Result<ImageData, AssetError> {
        let file = self.existing_file(path)?;
        ImageData::from_file(file)
    }

    fn load_mesh(&self, path: &str) -> Result<Mesh, AssetError> {
        let file = self.existing_file(path)?;
        match extension(&file).as_str() {
            "obj" => Ok(ObjLoader::load_obj(&file)?),
            other => Err(AssetError::UnsupportedFormat(format!("mesh format '{other}' ({path})"))),
        }
    }

    fn load_behavior(&self, path: &str) -> Result<Behavior, AssetError> {
        let file = self.existing_file(path)?;
        let source = std::fs::read_to_string(file)?;
        Ok(Behavior {
            path: path.to_string(),
            source,
        })
    }

    fn load_packed_scene(&self, path: &str) -> Result<PackedScene, AssetError> {
        let file = self.existing_file(path)?;
        let text = std::fs::read_to_string(file)?;
        ron::from_str(&text).map_err(|e| AssetError::InvalidData(format!("{path}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_in(dir: &Path) -> FileSystemSource {
        FileSystemSource::new(ContentConfig {
            content_root: dir.to_string_lossy().into_owned(),
            ..ContentConfig::default()
        })
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = source_in(dir.path());
        assert!(matches!(
            source.load_texture("res://assets/sprites/none.png"),
            Err(AssetError::NotFound(_))
        ));
    }

    #[test]
    fn test_behavior_source_is_read() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("scripts")).unwrap();
        std::fs::write(dir.path().join("scripts/player.gd"), "extends Node").unwrap();

        let behavior = source_in(dir.path()).load_behavior("res://scripts/player.gd").unwrap();
        assert_eq!(behavior.path, "res://scripts/player.gd");
        assert_eq!(behavior.source, "extends Node");
    }

    #[test]
    fn test_unsupported_mesh_format() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ship.fbx"), b"binary").unwrap();
        assert!(matches!(
            source_in(dir.path()).load_mesh("res://ship.fbx"),
            Err(AssetError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_corrupt_packed_scene_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("main.ron"), "(not a scene").unwrap();
        assert!(matches!(
            source_in(dir.path()).load_packed_scene("res://main.ron"),
            Err(AssetError::InvalidData(_))
        ));
    }
}
