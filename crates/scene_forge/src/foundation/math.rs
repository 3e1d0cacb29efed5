//! Math utilities and types
//!
//! Provides the vector aliases and node transforms used by the scene tree.
//! Rotations are stored in degrees exactly as declared.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Spatial dimensionality of a game, scene or node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Dimension {
    /// Planar space, 2-component vectors and a single rotation angle
    #[default]
    #[serde(rename = "2D", alias = "2d")]
    TwoD,
    /// Volumetric space, 3-component vectors
    #[serde(rename = "3D", alias = "3d")]
    ThreeD,
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TwoD => write!(f, "2D"),
            Self::ThreeD => write!(f, "3D"),
        }
    }
}

/// Transform of a 2D node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Position in the parent's space
    pub position: Vec2,

    /// Rotation angle in degrees
    pub rotation_degrees: f32,

    /// Scale factors
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation_degrees: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

/// Transform of a 3D node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    /// Position in the parent's space
    pub position: Vec3,

    /// Euler rotation in degrees (x, y, z)
    pub rotation_degrees: Vec3,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation_degrees: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

/// Transform slot of a runtime node
///
/// The variant is fixed when the node is created and never changes, so a
/// node stays in one dimensionality regime for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Spatial {
    /// Node has no spatial transform
    #[default]
    None,
    /// 2D transform
    TwoD(Transform2D),
    /// 3D transform
    ThreeD(Transform3D),
}

impl Spatial {
    /// Default transform for the given dimensionality
    pub fn for_dimension(dimension: Dimension) -> Self {
        match dimension {
            Dimension::TwoD => Self::TwoD(Transform2D::default()),
            Dimension::ThreeD => Self::ThreeD(Transform3D::default()),
        }
    }

    /// Dimensionality of the transform, if any
    pub fn dimension(&self) -> Option<Dimension> {
        match self {
            Self::None => None,
            Self::TwoD(_) => Some(Dimension::TwoD),
            Self::ThreeD(_) => Some(Dimension::ThreeD),
        }
    }

    /// Borrow the 2D transform
    pub fn as_2d(&self) -> Option<&Transform2D> {
        match self {
            Self::TwoD(t) => Some(t),
            _ => None,
        }
    }

    /// Borrow the 3D transform
    pub fn as_3d(&self) -> Option<&Transform3D> {
        match self {
            Self::ThreeD(t) => Some(t),
            _ => None,
        }
    }
}
