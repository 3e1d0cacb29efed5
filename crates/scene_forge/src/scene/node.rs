//! Runtime nodes and their kind-specific state

use super::kind::NodeKind;
use crate::assets::{Behavior, ImageData, Mesh};
use crate::foundation::collections::NodeId;
use crate::foundation::math::Spatial;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Where a bound asset came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetOrigin {
    /// Loaded from this logical path
    Resolved(String),
    /// Synthesized because the reference was missing or unresolvable
    Placeholder,
}

impl AssetOrigin {
    /// Logical path of a resolved asset
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Resolved(path) => Some(path),
            Self::Placeholder => None,
        }
    }
}

/// Texture bound to a sprite
#[derive(Debug, Clone)]
pub struct TextureBinding {
    /// Origin of the texture
    pub origin: AssetOrigin,
    /// Texture data
    pub texture: Arc<ImageData>,
}

/// Mesh bound to a mesh instance
#[derive(Debug, Clone)]
pub struct MeshBinding {
    /// Origin of the mesh
    pub origin: AssetOrigin,
    /// Mesh data
    pub mesh: Arc<Mesh>,
}

/// Sprite configuration
#[derive(Debug, Clone)]
pub struct SpriteState {
    /// Bound texture
    pub texture: Option<TextureBinding>,
    /// Whether the texture is centered on the node origin
    pub centered: bool,
}

impl Default for SpriteState {
    fn default() -> Self {
        Self {
            texture: None,
            centered: true,
        }
    }
}

/// Mesh-instance configuration
#[derive(Debug, Clone, Default)]
pub struct MeshState {
    /// Bound mesh
    pub mesh: Option<MeshBinding>,
}

/// Camera projection mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Projection {
    /// Perspective projection
    #[default]
    Perspective,
    /// Orthogonal projection
    Orthogonal,
}

/// 3D camera parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraParams {
    /// Projection mode
    pub projection: Projection,
    /// Vertical field of view in degrees (perspective)
    pub fov: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
    /// View volume size (orthogonal)
    pub size: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            projection: Projection::Perspective,
            fov: 75.0,
            near: 0.05,
            far: 4000.0,
            size: 1.0,
        }
    }
}

/// Light parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightParams {
    /// Linear RGB color
    pub color: [f32; 3],
    /// Intensity multiplier
    pub energy: f32,
    /// Reach of omni and spot lights
    pub range: Option<f32>,
    /// Cone half-angle of spot lights in degrees
    pub spot_angle: Option<f32>,
}

impl LightParams {
    /// Intrinsic defaults for a light kind
    pub fn for_kind(kind: NodeKind) -> Self {
        let (range, spot_angle) = match kind {
            NodeKind::OmniLight3D => (Some(5.0), None),
            NodeKind::SpotLight3D => (Some(5.0), Some(45.0)),
            _ => (None, None),
        };
        Self {
            color: [1.0, 1.0, 1.0],
            energy: 1.0,
            range,
            spot_angle,
        }
    }
}

/// Rigid-body parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyParams {
    /// Mass in kilograms
    pub mass: f32,
    /// Multiplier applied to ambient gravity
    pub gravity_scale: f32,
}

impl Default for BodyParams {
    fn default() -> Self {
        Self {
            mass: 1.0,
            gravity_scale: 1.0,
        }
    }
}

/// Kind-specific configured state
#[derive(Debug, Clone, Default)]
pub enum NodeState {
    /// Nothing kind-specific
    #[default]
    None,
    /// Sprite texture binding
    Sprite(SpriteState),
    /// Mesh binding
    Mesh(MeshState),
    /// 3D camera parameters
    Camera(CameraParams),
    /// Light parameters
    Light(LightParams),
    /// Rigid-body parameters
    Body(BodyParams),
}

impl NodeState {
    /// Intrinsic state of a freshly created node of `kind`
    pub fn for_kind(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Sprite2D => Self::Sprite(SpriteState::default()),
            NodeKind::MeshInstance3D => Self::Mesh(MeshState::default()),
            NodeKind::Camera3D => Self::Camera(CameraParams::default()),
            NodeKind::RigidBody2D | NodeKind::RigidBody3D => Self::Body(BodyParams::default()),
            k if k.is_light() => Self::Light(LightParams::for_kind(k)),
            _ => Self::None,
        }
    }
}

/// A constructed node living in a [`super::SceneTree`]
#[derive(Debug, Clone)]
pub struct RuntimeNode {
    /// Node name (not required to be unique)
    pub name: String,

    kind: NodeKind,

    /// Applied transform
    pub transform: Spatial,

    /// Attached behavior, if any
    pub behavior: Option<Arc<Behavior>>,

    /// Kind-specific configured state
    pub state: NodeState,

    groups: BTreeSet<String>,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
}

impl RuntimeNode {
    /// Create a node of `kind` with the kind's intrinsic defaults
    ///
    /// The node is named after its kind until renamed.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            name: kind.name().to_string(),
            kind,
            transform: kind.dimension().map_or(Spatial::None, Spatial::for_dimension),
            behavior: None,
            state: NodeState::for_kind(kind),
            groups: BTreeSet::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Kind tag
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Parent node, `None` for detached nodes and the live root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Register the node in a group; returns false if it already was
    pub fn add_to_group(&mut self, group: impl Into<String>) -> bool {
        self.groups.insert(group.into())
    }

    /// Whether the node belongs to `group`
    pub fn is_in_group(&self, group: &str) -> bool {
        self.groups.contains(group)
    }

    /// Group memberships in sorted order
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(String::as_str)
    }

    /// Bound sprite texture
    pub fn texture(&self) -> Option<&TextureBinding> {
        match &self.state {
            NodeState::Sprite(sprite) => sprite.texture.as_ref(),
            _ => None,
        }
    }

    /// Bound mesh
    pub fn mesh(&self) -> Option<&MeshBinding> {
        match &self.state {
            NodeState::Mesh(mesh) => mesh.mesh.as_ref(),
            _ => None,
        }
    }

    /// Camera parameters
    pub fn camera(&self) -> Option<&CameraParams> {
        match &self.state {
            NodeState::Camera(camera) => Some(camera),
            _ => None,
        }
    }
}
