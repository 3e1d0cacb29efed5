//! Specification document model
//!
//! Typed mirror of the JSON game specification. Every field the document
//! may omit is either an `Option` or carries a serde default, so absence is
//! always distinguishable from an explicit value where construction cares
//! about the difference (for example `nodes` missing vs. empty).
//!
//! Node descriptors are decoded one at a time: a node whose fields have the
//! wrong shape becomes a [`NodeEntry::Malformed`] instead of failing the
//! whole document, so the builder can skip it and keep its siblings.

use crate::foundation::math::Dimension;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Decode an optional collection, treating `null` like an absent key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Root of a specification document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecDocument {
    /// Game metadata
    #[serde(default)]
    pub game: Option<GameInfo>,

    /// Scene descriptors; the first one is the main scene
    #[serde(default)]
    pub scenes: Option<Vec<SceneDescriptor>>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

impl SpecDocument {
    /// Declared dimensionality of the game (2D when unspecified)
    pub fn dimension(&self) -> Dimension {
        self.game.as_ref().map(|g| g.dimension).unwrap_or_default()
    }

    /// Declared game name, if any
    pub fn game_name(&self) -> Option<&str> {
        self.game.as_ref().map(|g| g.name.as_str())
    }

    /// The main scene descriptor
    pub fn main_scene(&self) -> Option<&SceneDescriptor> {
        self.scenes.as_ref().and_then(|scenes| scenes.first())
    }
}

/// Game metadata block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    /// Display name
    #[serde(default)]
    pub name: String,

    /// Dimensionality of the whole game
    #[serde(default, rename = "type")]
    pub dimension: Dimension,
}

/// One scene of the game
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    /// Name given to the scene root
    #[serde(default)]
    pub name: String,

    /// Scene dimensionality; inherits the game's when absent
    #[serde(default, rename = "type")]
    pub dimension: Option<Dimension>,

    /// Prebuilt artifact path for the fast loading path
    #[serde(default)]
    pub path: Option<String>,

    /// Top-level node descriptors
    #[serde(default)]
    pub nodes: Option<Vec<NodeEntry>>,
}

impl SceneDescriptor {
    /// Artifact path, treating an empty string as absent
    pub fn artifact_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.trim().is_empty())
    }

    /// Top-level nodes (empty when the key is missing)
    pub fn nodes(&self) -> &[NodeEntry] {
        self.nodes.as_deref().unwrap_or_default()
    }

    /// Total number of node entries in every subtree
    pub fn node_count(&self) -> usize {
        self.nodes().iter().map(NodeEntry::subtree_size).sum()
    }
}

fn default_kind() -> String {
    "Node".to_string()
}

/// Declarative description of one node and its children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    /// Node name (not required to be unique)
    #[serde(default)]
    pub name: Option<String>,

    /// Kind tag selecting constructor and configurator
    #[serde(default = "default_kind", rename = "type")]
    pub kind: String,

    /// Position
    #[serde(default)]
    pub position: Option<VectorSpec>,

    /// Rotation in degrees
    #[serde(default)]
    pub rotation: Option<RotationSpec>,

    /// Scale
    #[serde(default)]
    pub scale: Option<VectorSpec>,

    /// Behavior script reference
    #[serde(default)]
    pub script: Option<String>,

    /// Group memberships
    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: Vec<String>,

    /// Kind-specific property bag
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: Map<String, Value>,

    /// Child entries in declaration order
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<NodeEntry>,
}

impl Default for NodeDescriptor {
    fn default() -> Self {
        Self {
            name: None,
            kind: default_kind(),
            position: None,
            rotation: None,
            scale: None,
            script: None,
            groups: Vec::new(),
            properties: Map::new(),
            children: Vec::new(),
        }
    }
}

/// One node slot of a scene
#[derive(Debug, Clone, PartialEq)]
pub enum NodeEntry {
    /// A node whose fields decoded cleanly
    Node(NodeDescriptor),
    /// A node with well-formed JSON but the wrong field shapes
    Malformed {
        /// The undecoded JSON value
        raw: Value,
        /// Why decoding failed
        reason: String,
    },
}

impl NodeEntry {
    /// The decoded descriptor, unless the entry is malformed
    pub fn descriptor(&self) -> Option<&NodeDescriptor> {
        match self {
            Self::Node(descriptor) => Some(descriptor),
            Self::Malformed { .. } => None,
        }
    }

    /// Best-effort name, read straight from the JSON for malformed entries
    pub fn display_name(&self) -> &str {
        match self {
            Self::Node(d) => d.name.as_deref().unwrap_or(&d.kind),
            Self::Malformed { raw, .. } => raw
                .get("name")
                .and_then(Value::as_str)
                .or_else(|| raw.get("type").and_then(Value::as_str))
                .unwrap_or("<malformed>"),
        }
    }

    /// Declared kind tag, read straight from the JSON for malformed entries
    pub fn kind_name(&self) -> &str {
        match self {
            Self::Node(d) => &d.kind,
            Self::Malformed { raw, .. } => raw.get("type").and_then(Value::as_str).unwrap_or("Node"),
        }
    }

    /// Number of entries in this subtree, including itself
    ///
    /// A malformed entry counts as one; its children are never decoded.
    pub fn subtree_size(&self) -> usize {
        match self {
            Self::Node(d) => 1 + d.children.iter().map(Self::subtree_size).sum::<usize>(),
            Self::Malformed { .. } => 1,
        }
    }

    /// Depth of this subtree (a leaf has depth 1)
    pub fn depth(&self) -> usize {
        match self {
            Self::Node(d) => 1 + d.children.iter().map(Self::depth).max().unwrap_or(0),
            Self::Malformed { .. } => 1,
        }
    }
}

impl From<NodeDescriptor> for NodeEntry {
    fn from(descriptor: NodeDescriptor) -> Self {
        Self::Node(descriptor)
    }
}

impl<'de> Deserialize<'de> for NodeEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(match NodeDescriptor::deserialize(&raw) {
            Ok(descriptor) => Self::Node(descriptor),
            Err(e) => Self::Malformed {
                reason: e.to_string(),
                raw,
            },
        })
    }
}

impl Serialize for NodeEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Node(descriptor) => descriptor.serialize(serializer),
            Self::Malformed { raw, .. } => raw.serialize(serializer),
        }
    }
}

/// Vector with individually optional components
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorSpec {
    /// X component
    #[serde(default)]
    pub x: Option<f32>,
    /// Y component
    #[serde(default)]
    pub y: Option<f32>,
    /// Z component
    #[serde(default)]
    pub z: Option<f32>,
}

/// Rotation as either a bare angle or a per-axis object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RotationSpec {
    /// Single angle in degrees (2D)
    Angle(f32),
    /// Per-axis angles in degrees
    Euler(VectorSpec),
}

/// Global settings block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Window settings
    #[serde(default)]
    pub window: Option<WindowSettings>,

    /// Physics settings
    #[serde(default)]
    pub physics: Option<PhysicsSettings>,
}

/// Declared window size
///
/// Stored as declared; `1280.0` is as valid as `1280`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowSettings {
    /// Width in pixels
    #[serde(default)]
    pub width: Option<f64>,
    /// Height in pixels
    #[serde(default)]
    pub height: Option<f64>,
}

impl WindowSettings {
    /// Window size in whole pixels
    ///
    /// `None` unless both dimensions are present, finite and within `u32`.
    pub fn pixel_size(&self) -> Option<(u32, u32)> {
        Some((to_pixels(self.width?)?, to_pixels(self.height?)?))
    }
}

fn to_pixels(value: f64) -> Option<u32> {
    let rounded = value.round();
    (rounded.is_finite() && (0.0..=f64::from(u32::MAX)).contains(&rounded)).then_some(rounded as u32)
}

/// Declared physics parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysicsSettings {
    /// Ambient gravity vector
    #[serde(default)]
    pub gravity: Option<VectorSpec>,
}
