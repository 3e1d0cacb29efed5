//! Prebuilt scene artifacts
//!
//! A [`PackedScene`] is a RON snapshot of a built subtree. Asset bindings
//! are stored as logical paths and re-resolved on instantiation; any
//! inconsistency rejects the whole artifact so the caller can fall back to
//! building from the descriptor.

use super::configurators::{placeholder_mesh_binding, placeholder_texture_binding};
use super::kind::NodeKind;
use super::node::{
    AssetOrigin, BodyParams, CameraParams, LightParams, MeshBinding, MeshState, NodeState, RuntimeNode, SpriteState,
    TextureBinding,
};
use super::tree::{SceneTree, TreeError};
use crate::assets::{AssetCategory, AssetResolver};
use crate::foundation::collections::NodeId;
use crate::foundation::math::{Dimension, Spatial};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Artifact format version written by [`PackedScene::pack`]
pub const PACKED_FORMAT_VERSION: u32 = 1;

/// Packed scene errors
#[derive(Error, Debug)]
pub enum PackedSceneError {
    /// Artifact written by an incompatible version
    #[error("Unsupported packed scene version {0} (expected {})", PACKED_FORMAT_VERSION)]
    UnsupportedVersion(u32),

    /// Artifact root does not match the scene's dimensionality
    #[error("Artifact root is {found:?}, scene expects {expected}")]
    DimensionMismatch {
        /// Dimensionality the scene declares
        expected: Dimension,
        /// Dimensionality of the artifact root kind
        found: Option<Dimension>,
    },

    /// A node's kind, transform or state disagree with each other
    #[error("Node '{node}' ({kind}) is inconsistent: {reason}")]
    InconsistentNode {
        /// Node name
        node: String,
        /// Node kind
        kind: NodeKind,
        /// What disagrees
        reason: String,
    },

    /// A stored asset path no longer resolves
    #[error("Node '{node}': {category} asset '{path}' no longer resolves")]
    UnresolvedAsset {
        /// Node name
        node: String,
        /// Asset category
        category: AssetCategory,
        /// Stored logical path
        path: String,
    },

    /// Tree operation failed
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    /// Serialization failed
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Writing the artifact failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Kind-specific state as stored in an artifact
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum PackedState {
    /// Nothing kind-specific
    #[default]
    None,
    /// Sprite; `texture` is `None` for a placeholder
    Sprite {
        /// Logical texture path
        texture: Option<String>,
        /// Centered on the node origin
        centered: bool,
    },
    /// Mesh instance; `mesh` is `None` for a placeholder
    Mesh {
        /// Logical mesh path
        mesh: Option<String>,
    },
    /// 3D camera
    Camera(CameraParams),
    /// Light
    Light(LightParams),
    /// Rigid body
    Body(BodyParams),
}

impl PackedState {
    fn pack(state: &NodeState) -> Self {
        let path = |origin: &AssetOrigin| origin.path().map(str::to_string);
        match state {
            NodeState::None => Self::None,
            NodeState::Sprite(sprite) => Self::Sprite {
                texture: sprite.texture.as_ref().and_then(|t| path(&t.origin)),
                centered: sprite.centered,
            },
            NodeState::Mesh(mesh) => Self::Mesh {
                mesh: mesh.mesh.as_ref().and_then(|m| path(&m.origin)),
            },
            NodeState::Camera(camera) => Self::Camera(*camera),
            NodeState::Light(light) => Self::Light(*light),
            NodeState::Body(body) => Self::Body(*body),
        }
    }

    fn unpack(&self, node: &PackedNode, resolver: &AssetResolver) -> Result<NodeState, PackedSceneError> {
        let unresolved = |category, path: &str| PackedSceneError::UnresolvedAsset {
            node: node.name.clone(),
            category,
            path: path.to_string(),
        };

        let state = match (self, NodeState::for_kind(node.kind)) {
            (Self::None, NodeState::None) => NodeState::None,
            (Self::Sprite { texture, centered }, NodeState::Sprite(_)) => {
                let binding = match texture {
                    Some(path) => TextureBinding {
                        texture: resolver
                            .resolve_texture(path)
                            .ok_or_else(|| unresolved(AssetCategory::Sprite, path))?,
                        origin: AssetOrigin::Resolved(path.clone()),
                    },
                    None => placeholder_texture_binding(),
                };
                NodeState::Sprite(SpriteState {
                    texture: Some(binding),
                    centered: *centered,
                })
            }
            (Self::Mesh { mesh }, NodeState::Mesh(_)) => {
                let binding = match mesh {
                    Some(path) => MeshBinding {
                        mesh: resolver
                            .resolve_mesh(path)
                            .ok_or_else(|| unresolved(AssetCategory::Model, path))?,
                        origin: AssetOrigin::Resolved(path.clone()),
                    },
                    None => placeholder_mesh_binding(),
                };
                NodeState::Mesh(MeshState { mesh: Some(binding) })
            }
            (Self::Camera(camera), NodeState::Camera(_)) => NodeState::Camera(*camera),
            (Self::Light(light), NodeState::Light(_)) => NodeState::Light(*light),
            (Self::Body(body), NodeState::Body(_)) => NodeState::Body(*body),
            (stored, _) => {
                return Err(PackedSceneError::InconsistentNode {
                    node: node.name.clone(),
                    kind: node.kind,
                    reason: format!("stored state {stored:?} does not fit the kind"),
                })
            }
        };
        Ok(state)
    }
}

/// One node of a packed scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackedNode {
    /// Node name
    pub name: String,
    /// Node kind
    pub kind: NodeKind,
    /// Transform as applied
    #[serde(default)]
    pub transform: Spatial,
    /// Group memberships
    #[serde(default)]
    pub groups: Vec<String>,
    /// Logical path of the attached behavior
    #[serde(default)]
    pub script: Option<String>,
    /// Kind-specific state
    #[serde(default)]
    pub state: PackedState,
    /// Children in order
    #[serde(default)]
    pub children: Vec<PackedNode>,
}

impl PackedNode {
    fn pack(tree: &SceneTree, id: NodeId) -> Result<Self, TreeError> {
        let node = tree.get(id).ok_or(TreeError::MissingNode(id))?;
        Ok(Self {
            name: node.name.clone(),
            kind: node.kind(),
            transform: node.transform,
            groups: node.groups().map(str::to_string).collect(),
            script: node.behavior.as_ref().map(|b| b.path.clone()),
            state: PackedState::pack(&node.state),
            children: tree
                .children(id)
                .iter()
                .map(|&child| Self::pack(tree, child))
                .collect::<Result<_, _>>()?,
        })
    }

    fn to_runtime(&self, resolver: &AssetResolver, dimension: Dimension) -> Result<RuntimeNode, PackedSceneError> {
        let inconsistent = |reason: String| PackedSceneError::InconsistentNode {
            node: self.name.clone(),
            kind: self.kind,
            reason,
        };

        if let Some(kind_dimension) = self.kind.dimension() {
            if kind_dimension != dimension {
                return Err(inconsistent(format!("{kind_dimension} kind in a {dimension} scene")));
            }
        }
        if self.transform.dimension() != self.kind.dimension() {
            return Err(inconsistent(format!("transform {:?} does not fit the kind", self.transform.dimension())));
        }

        let mut node = RuntimeNode::new(self.kind);
        node.name = self.name.clone();
        node.transform = self.transform;
        for group in &self.groups {
            node.add_to_group(group.as_str());
        }
        if let Some(script) = &self.script {
            let behavior = resolver
                .resolve_behavior(script)
                .ok_or_else(|| PackedSceneError::UnresolvedAsset {
                    node: self.name.clone(),
                    category: AssetCategory::Behavior,
                    path: script.clone(),
                })?;
            node.behavior = Some(behavior);
        }
        node.state = self.state.unpack(self, resolver)?;
        Ok(node)
    }

    /// Number of nodes in this subtree
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Self::subtree_len).sum::<usize>()
    }
}

/// Serialized snapshot of a scene subtree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackedScene {
    /// Format version
    pub format_version: u32,
    /// Scene root
    pub root: PackedNode,
}

impl PackedScene {
    /// Snapshot the subtree rooted at `root`
    pub fn pack(tree: &SceneTree, root: NodeId) -> Result<Self, PackedSceneError> {
        Ok(Self {
            format_version: PACKED_FORMAT_VERSION,
            root: PackedNode::pack(tree, root)?,
        })
    }

    /// Number of packed nodes, including the root
    pub fn node_count(&self) -> usize {
        self.root.subtree_len()
    }

    /// Instantiate into `tree` and attach the result under the live root
    ///
    /// Either the whole subtree is attached or nothing is left behind.
    pub fn instantiate(
        &self,
        tree: &mut SceneTree,
        resolver: &AssetResolver,
        dimension: Dimension,
    ) -> Result<NodeId, PackedSceneError> {
        if self.format_version != PACKED_FORMAT_VERSION {
            return Err(PackedSceneError::UnsupportedVersion(self.format_version));
        }
        let found = self.root.kind.dimension();
        if found != Some(dimension) {
            return Err(PackedSceneError::DimensionMismatch {
                expected: dimension,
                found,
            });
        }

        let scene_root = tree.insert(self.root.to_runtime(resolver, dimension)?);
        if let Err(e) = populate(&self.root, scene_root, tree, resolver, dimension) {
            tree.destroy(scene_root);
            return Err(e);
        }

        let live_root = tree.root();
        if let Err(e) = tree.add_child(live_root, scene_root) {
            tree.destroy(scene_root);
            return Err(e.into());
        }
        log::info!("Instantiated packed scene '{}' ({} nodes)", self.root.name, self.node_count());
        Ok(scene_root)
    }

    /// Serialize to pretty RON
    pub fn to_ron(&self) -> Result<String, PackedSceneError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| PackedSceneError::Serialize(e.to_string()))
    }

    /// Write the artifact to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PackedSceneError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_ron()?)?;
        log::info!("Saved packed scene to {}", path.display());
        Ok(())
    }
}

fn populate(
    packed: &PackedNode,
    parent: NodeId,
    tree: &mut SceneTree,
    resolver: &AssetResolver,
    dimension: Dimension,
) -> Result<(), PackedSceneError> {
    for child in &packed.children {
        let id = tree.insert(child.to_runtime(resolver, dimension)?);
        tree.add_child(parent, id)?;
        populate(child, id, tree, resolver, dimension)?;
    }
    Ok(())
}
