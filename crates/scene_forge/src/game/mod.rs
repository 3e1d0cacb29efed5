//! Game construction
//!
//! Ties the spec loader, asset resolver and scene builder together into
//! the public load / construct / reload operations.

pub mod constructor;
pub mod current_scene;
pub mod host;
pub mod settings;

#[cfg(test)]
mod tests;

pub use constructor::{ConstructError, GameConstructor};
pub use current_scene::CurrentScene;
pub use host::{HeadlessHost, HostCall, HostServices, WindowMode};
pub use settings::{apply_settings, gravity_2d, gravity_3d, DEFAULT_GRAVITY_2D, DEFAULT_GRAVITY_3D};
