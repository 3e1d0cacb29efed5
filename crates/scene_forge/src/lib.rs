//! # Scene Forge
//!
//! Builds a live game scene tree from a declarative JSON game document.
//!
//! ## Features
//!
//! - **Data-Driven Scenes**: Node hierarchies, transforms, groups and scripts from JSON
//! - **Graceful Degradation**: Unknown kinds and missing assets never abort construction
//! - **Packed Scenes**: RON artifacts for a fast loading path with automatic fallback
//! - **Hot Reloading**: Tear down and rebuild the current scene from disk
//! - **Extensible**: Register new node kinds and kind-specific configurators
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_forge::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ForgeConfig::with_content_root("./my_game");
//!     let mut game = GameConstructor::new(config, HeadlessHost::new());
//!     game.load_spec()?;
//!     let scene = game.construct_game()?;
//!     println!("{} nodes", game.tree().subtree_len(scene));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod core;

pub mod assets;
pub mod config;
pub mod foundation;
pub mod game;
pub mod scene;
pub mod spec;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        assets::{AssetCategory, AssetResolver, AssetSource, FileSystemSource},
        core::ForgeConfig,
        foundation::math::{Dimension, Spatial, Vec2, Vec3},
        game::{ConstructError, GameConstructor, HeadlessHost, HostServices},
        scene::{Diagnostic, NodeKind, RuntimeNode, SceneTree},
        spec::{load_spec, SpecDocument},
    };
    pub use crate::config::Config;
    pub use crate::foundation::collections::NodeId;
}
