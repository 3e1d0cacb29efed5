//! Node kinds
//!
//! The closed set of node kinds the factory can construct. `Node` is the
//! designated fallback for unrecognized kind names.

use crate::foundation::math::Dimension;
use serde::{Deserialize, Serialize};

/// Kind tag of a runtime node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Generic node without a transform; the fallback kind
    Node,
    /// Generic 2D container
    Node2D,
    /// Textured 2D sprite
    Sprite2D,
    /// Kinematic 2D body
    CharacterBody2D,
    /// Simulated 2D body
    RigidBody2D,
    /// Immovable 2D body
    StaticBody2D,
    /// 2D camera
    Camera2D,
    /// Generic 3D container
    Node3D,
    /// Kinematic 3D body
    CharacterBody3D,
    /// Simulated 3D body
    RigidBody3D,
    /// Immovable 3D body
    StaticBody3D,
    /// 3D camera
    Camera3D,
    /// Instance of a 3D mesh
    MeshInstance3D,
    /// Sun-like light with parallel rays
    DirectionalLight3D,
    /// Point light radiating in all directions
    OmniLight3D,
    /// Cone-shaped light
    SpotLight3D,
}

impl NodeKind {
    /// Every supported kind
    pub const ALL: [Self; 16] = [
        Self::Node,
        Self::Node2D,
        Self::Sprite2D,
        Self::CharacterBody2D,
        Self::RigidBody2D,
        Self::StaticBody2D,
        Self::Camera2D,
        Self::Node3D,
        Self::CharacterBody3D,
        Self::RigidBody3D,
        Self::StaticBody3D,
        Self::Camera3D,
        Self::MeshInstance3D,
        Self::DirectionalLight3D,
        Self::OmniLight3D,
        Self::SpotLight3D,
    ];

    /// Kind name as written in documents
    pub const fn name(self) -> &'static str {
        match self {
            Self::Node => "Node",
            Self::Node2D => "Node2D",
            Self::Sprite2D => "Sprite2D",
            Self::CharacterBody2D => "CharacterBody2D",
            Self::RigidBody2D => "RigidBody2D",
            Self::StaticBody2D => "StaticBody2D",
            Self::Camera2D => "Camera2D",
            Self::Node3D => "Node3D",
            Self::CharacterBody3D => "CharacterBody3D",
            Self::RigidBody3D => "RigidBody3D",
            Self::StaticBody3D => "StaticBody3D",
            Self::Camera3D => "Camera3D",
            Self::MeshInstance3D => "MeshInstance3D",
            Self::DirectionalLight3D => "DirectionalLight3D",
            Self::OmniLight3D => "OmniLight3D",
            Self::SpotLight3D => "SpotLight3D",
        }
    }

    /// Dimensionality the kind lives in; `None` for the generic node
    pub const fn dimension(self) -> Option<Dimension> {
        match self {
            Self::Node => None,
            Self::Node2D
            | Self::Sprite2D
            | Self::CharacterBody2D
            | Self::RigidBody2D
            | Self::StaticBody2D
            | Self::Camera2D => Some(Dimension::TwoD),
            _ => Some(Dimension::ThreeD),
        }
    }

    /// Kind used for a scene root of the given dimensionality
    pub const fn root_for(dimension: Dimension) -> Self {
        match dimension {
            Dimension::TwoD => Self::Node2D,
            Dimension::ThreeD => Self::Node3D,
        }
    }

    /// Whether the kind is one of the light variants
    pub const fn is_light(self) -> bool {
        matches!(self, Self::DirectionalLight3D | Self::OmniLight3D | Self::SpotLight3D)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = NodeKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), NodeKind::ALL.len());
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(NodeKind::Node.dimension(), None);
        assert_eq!(NodeKind::Sprite2D.dimension(), Some(Dimension::TwoD));
        assert_eq!(NodeKind::SpotLight3D.dimension(), Some(Dimension::ThreeD));
        assert_eq!(NodeKind::root_for(Dimension::ThreeD), NodeKind::Node3D);
    }
}
