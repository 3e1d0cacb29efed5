//! Game specification documents
//!
//! The spec loader turns JSON text into a [`SpecDocument`]; it carries no
//! construction logic of its own.

pub mod document;
pub mod loader;

pub use document::{
    GameInfo, NodeDescriptor, NodeEntry, PhysicsSettings, RotationSpec, SceneDescriptor, Settings,
    SpecDocument, VectorSpec, WindowSettings,
};
pub use loader::{load_spec, parse_spec, SpecError};
