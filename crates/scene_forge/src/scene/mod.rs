//! Runtime scene tree and its construction
//!
//! The [`SceneTree`] arena holds every constructed node. Scenes enter it
//! either through the [`SceneBuilder`], which walks descriptors node by
//! node, or by instantiating a [`PackedScene`] artifact.

pub mod builder;
pub mod configurators;
pub mod diagnostics;
pub mod factory;
pub mod kind;
pub mod node;
pub mod packed;
pub mod properties;
pub mod tree;

pub use builder::{BuildContext, SceneBuilder, DEFAULT_SCENE_NAME};
pub use configurators::{Configurator, ConfiguratorRegistry};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use factory::{NodeConstructor, NodeFactory};
pub use kind::NodeKind;
pub use node::{
    AssetOrigin, BodyParams, CameraParams, LightParams, MeshBinding, MeshState, NodeState, Projection, RuntimeNode,
    SpriteState, TextureBinding,
};
pub use packed::{PackedNode, PackedScene, PackedSceneError, PackedState, PACKED_FORMAT_VERSION};
pub use properties::ConfigureContext;
pub use tree::{SceneTree, TreeError};
