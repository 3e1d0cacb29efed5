//! Global window and physics settings

use super::host::{HostServices, WindowMode};
use crate::foundation::math::{Dimension, Vec2, Vec3};
use crate::spec::{Settings, VectorSpec};

/// Default 2D gravity, pointing down the screen
pub const DEFAULT_GRAVITY_2D: Vec2 = Vec2::new(0.0, 980.0);

/// Default 3D gravity
pub const DEFAULT_GRAVITY_3D: Vec3 = Vec3::new(0.0, -9.8, 0.0);

/// 2D gravity from an optional declared vector
///
/// Missing components fall back to the default's component.
pub fn gravity_2d(declared: Option<&VectorSpec>) -> Vec2 {
    match declared {
        Some(v) => Vec2::new(
            v.x.unwrap_or(DEFAULT_GRAVITY_2D.x),
            v.y.unwrap_or(DEFAULT_GRAVITY_2D.y),
        ),
        None => DEFAULT_GRAVITY_2D,
    }
}

/// 3D gravity from an optional declared vector
pub fn gravity_3d(declared: Option<&VectorSpec>) -> Vec3 {
    match declared {
        Some(v) => Vec3::new(
            v.x.unwrap_or(DEFAULT_GRAVITY_3D.x),
            v.y.unwrap_or(DEFAULT_GRAVITY_3D.y),
            v.z.unwrap_or(DEFAULT_GRAVITY_3D.z),
        ),
        None => DEFAULT_GRAVITY_3D,
    }
}

/// Push window and gravity settings to the host
pub fn apply_settings<H: HostServices + ?Sized>(settings: &Settings, dimension: Dimension, host: &mut H) {
    if let Some(window) = &settings.window {
        match (window.width, window.height) {
            (Some(_), Some(_)) => match window.pixel_size() {
                Some((width, height)) => {
                    log::info!("Window: {}x{}", width, height);
                    host.set_window_size(width, height);
                    host.set_window_mode(WindowMode::Windowed);
                }
                None => log::warn!(
                    "Unusable window size {:?}x{:?}; ignoring",
                    window.width,
                    window.height
                ),
            },
            (None, None) => {}
            _ => log::warn!("Window settings need both width and height; ignoring"),
        }
    }

    let declared = settings.physics.as_ref().and_then(|p| p.gravity.as_ref());
    match dimension {
        Dimension::TwoD => host.set_gravity_2d(gravity_2d(declared)),
        Dimension::ThreeD => host.set_gravity_3d(gravity_3d(declared)),
    }
}
