//! Host runtime services
//!
//! The constructor never talks to a window or physics server directly.
//! Everything outside the scene tree goes through [`HostServices`].

use crate::foundation::math::{Vec2, Vec3};

/// Window presentation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    /// Regular decorated window
    Windowed,
    /// Borderless fullscreen
    Fullscreen,
}

/// Services the hosting runtime provides to the constructor
pub trait HostServices {
    /// Resize the main window
    fn set_window_size(&mut self, width: u32, height: u32);

    /// Change the main window mode
    fn set_window_mode(&mut self, mode: WindowMode);

    /// Set gravity of the default 2D physics space
    fn set_gravity_2d(&mut self, gravity: Vec2);

    /// Set gravity of the default 3D physics space
    fn set_gravity_3d(&mut self, gravity: Vec3);
}

/// A host call, as recorded by [`HeadlessHost`]
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    /// `set_window_size`
    WindowSize(u32, u32),
    /// `set_window_mode`
    WindowMode(WindowMode),
    /// `set_gravity_2d`
    Gravity2D(Vec2),
    /// `set_gravity_3d`
    Gravity3D(Vec3),
}

/// Host without a window or physics server
///
/// Keeps the last value of every setting and the full call log.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    /// Current window size
    pub window_size: Option<(u32, u32)>,
    /// Current window mode
    pub window_mode: Option<WindowMode>,
    /// Current 2D gravity
    pub gravity_2d: Option<Vec2>,
    /// Current 3D gravity
    pub gravity_3d: Option<Vec3>,
    calls: Vec<HostCall>,
}

impl HeadlessHost {
    /// Create a host with nothing set
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call received, oldest first
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }
}

impl HostServices for HeadlessHost {
    fn set_window_size(&mut self, width: u32, height: u32) {
        log::debug!("Window size -> {}x{}", width, height);
        self.window_size = Some((width, height));
        self.calls.push(HostCall::WindowSize(width, height));
    }

    fn set_window_mode(&mut self, mode: WindowMode) {
        log::debug!("Window mode -> {:?}", mode);
        self.window_mode = Some(mode);
        self.calls.push(HostCall::WindowMode(mode));
    }

    fn set_gravity_2d(&mut self, gravity: Vec2) {
        log::debug!("2D gravity -> ({}, {})", gravity.x, gravity.y);
        self.gravity_2d = Some(gravity);
        self.calls.push(HostCall::Gravity2D(gravity));
    }

    fn set_gravity_3d(&mut self, gravity: Vec3) {
        log::debug!("3D gravity -> ({}, {}, {})", gravity.x, gravity.y, gravity.z);
        self.gravity_3d = Some(gravity);
        self.calls.push(HostCall::Gravity3D(gravity));
    }
}
