//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and transforms
//! - Collections and handle types
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod logging;
