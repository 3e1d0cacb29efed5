//! Core configuration shared by every subsystem

pub mod config;

pub use config::{AssetDirectories, ContentConfig, ForgeConfig, CONTENT_ROOT_PREFIX};
