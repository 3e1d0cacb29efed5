//! Kind-specific configurators
//!
//! A second dispatch table keyed by [`NodeKind`], independent of the
//! factory. Kinds without an entry skip kind-specific configuration.

use super::diagnostics::Diagnostic;
use super::kind::NodeKind;
use super::node::{
    AssetOrigin, MeshBinding, NodeState, Projection, RuntimeNode, TextureBinding,
};
use super::properties::ConfigureContext;
use crate::assets::{placeholder_mesh, placeholder_texture, AssetCategory};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Configurator signature
pub type Configurator = fn(&mut RuntimeNode, &Map<String, Value>, &mut ConfigureContext<'_>);

/// Kind-keyed configurator table
pub struct ConfiguratorRegistry {
    table: HashMap<NodeKind, Configurator>,
}

impl Default for ConfiguratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfiguratorRegistry {
    /// Registry with the built-in configurators
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(NodeKind::Sprite2D, configure_sprite);
        registry.register(NodeKind::MeshInstance3D, configure_mesh_instance);
        registry.register(NodeKind::Camera3D, configure_camera_3d);
        registry.register(NodeKind::Camera2D, configure_camera_2d);
        registry.register(NodeKind::DirectionalLight3D, configure_light);
        registry.register(NodeKind::OmniLight3D, configure_light);
        registry.register(NodeKind::SpotLight3D, configure_light);
        registry.register(NodeKind::RigidBody2D, configure_rigid_body);
        registry.register(NodeKind::RigidBody3D, configure_rigid_body);
        registry
    }

    /// Registry with no configurators
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Register or replace the configurator for a kind
    pub fn register(&mut self, kind: NodeKind, configurator: Configurator) {
        self.table.insert(kind, configurator);
    }

    /// Whether a kind has a configurator
    pub fn has(&self, kind: NodeKind) -> bool {
        self.table.contains_key(&kind)
    }

    /// Run the configurator for the node's kind; returns false if none exists
    pub fn configure(
        &self,
        node: &mut RuntimeNode,
        properties: &Map<String, Value>,
        ctx: &mut ConfigureContext<'_>,
    ) -> bool {
        match self.table.get(&node.kind()) {
            Some(configurator) => {
                configurator(node, properties, ctx);
                true
            }
            None => false,
        }
    }
}

fn number(properties: &Map<String, Value>, key: &str) -> Option<f32> {
    properties.get(key).and_then(Value::as_f64).map(|v| v as f32)
}

fn text<'a>(properties: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    properties.get(key).and_then(Value::as_str)
}

fn color(value: &Value) -> Option<[f32; 3]> {
    let channel = |v: Option<&Value>| v.and_then(Value::as_f64).map(|c| c as f32);
    match value {
        Value::Object(map) => Some([
            channel(map.get("r")).unwrap_or(1.0),
            channel(map.get("g")).unwrap_or(1.0),
            channel(map.get("b")).unwrap_or(1.0),
        ]),
        Value::Array(items) if items.len() >= 3 => {
            Some([channel(items.first())?, channel(items.get(1))?, channel(items.get(2))?])
        }
        _ => None,
    }
}

/// Sprite: bind `texture`, falling back to the placeholder texture
pub fn configure_sprite(node: &mut RuntimeNode, properties: &Map<String, Value>, ctx: &mut ConfigureContext<'_>) {
    let binding = match text(properties, "texture") {
        Some(reference) => match ctx.resolver.resolve_texture(reference) {
            Some(texture) => TextureBinding {
                origin: AssetOrigin::Resolved(ctx.resolver.resolved_path(reference, AssetCategory::Sprite)),
                texture,
            },
            None => {
                ctx.diagnostics.report(Diagnostic::UnresolvedAsset {
                    node: node.name.clone(),
                    category: AssetCategory::Sprite,
                    reference: reference.to_string(),
                });
                placeholder_texture_binding()
            }
        },
        None => {
            log::debug!("Sprite '{}' declares no texture; using placeholder", node.name);
            placeholder_texture_binding()
        }
    };
    let centered = properties.get("centered").and_then(Value::as_bool);

    if let NodeState::Sprite(sprite) = &mut node.state {
        sprite.texture = Some(binding);
        sprite.centered = centered.unwrap_or(sprite.centered);
    }
}

pub(crate) fn placeholder_texture_binding() -> TextureBinding {
    TextureBinding {
        origin: AssetOrigin::Placeholder,
        texture: Arc::new(placeholder_texture()),
    }
}

pub(crate) fn placeholder_mesh_binding() -> MeshBinding {
    MeshBinding {
        origin: AssetOrigin::Placeholder,
        mesh: Arc::new(placeholder_mesh()),
    }
}

/// Mesh instance: bind `mesh`, falling back to the unit cube
pub fn configure_mesh_instance(
    node: &mut RuntimeNode,
    properties: &Map<String, Value>,
    ctx: &mut ConfigureContext<'_>,
) {
    let binding = match text(properties, "mesh") {
        Some(reference) => match ctx.resolver.resolve_mesh(reference) {
            Some(mesh) => MeshBinding {
                origin: AssetOrigin::Resolved(ctx.resolver.resolved_path(reference, AssetCategory::Model)),
                mesh,
            },
            None => {
                ctx.diagnostics.report(Diagnostic::UnresolvedAsset {
                    node: node.name.clone(),
                    category: AssetCategory::Model,
                    reference: reference.to_string(),
                });
                placeholder_mesh_binding()
            }
        },
        None => {
            log::debug!("Mesh instance '{}' declares no mesh; using placeholder", node.name);
            placeholder_mesh_binding()
        }
    };

    if let NodeState::Mesh(state) = &mut node.state {
        state.mesh = Some(binding);
    }
}

/// 3D camera: projection, field of view and clip planes
pub fn configure_camera_3d(node: &mut RuntimeNode, properties: &Map<String, Value>, _ctx: &mut ConfigureContext<'_>) {
    let name = node.name.clone();
    let NodeState::Camera(camera) = &mut node.state else {
        return;
    };

    match text(properties, "projection").map(str::to_ascii_lowercase).as_deref() {
        Some("perspective") => camera.projection = Projection::Perspective,
        Some("orthogonal" | "orthographic") => camera.projection = Projection::Orthogonal,
        Some(other) => log::warn!("Camera '{}': unknown projection '{}', keeping {:?}", name, other, camera.projection),
        None => {}
    }
    camera.fov = number(properties, "fov").unwrap_or(camera.fov);
    camera.near = number(properties, "near").unwrap_or(camera.near);
    camera.far = number(properties, "far").unwrap_or(camera.far);
    camera.size = number(properties, "size").unwrap_or(camera.size);
}

/// 2D camera: nothing configurable
pub fn configure_camera_2d(node: &mut RuntimeNode, properties: &Map<String, Value>, _ctx: &mut ConfigureContext<'_>) {
    if !properties.is_empty() {
        log::debug!("Camera2D '{}' has no configurable properties; ignoring {} key(s)", node.name, properties.len());
    }
}

/// Lights: color, energy, range and spot angle
pub fn configure_light(node: &mut RuntimeNode, properties: &Map<String, Value>, _ctx: &mut ConfigureContext<'_>) {
    let NodeState::Light(light) = &mut node.state else {
        return;
    };

    if let Some(c) = properties.get("color").and_then(color) {
        light.color = c;
    }
    light.energy = number(properties, "energy").unwrap_or(light.energy);
    if light.range.is_some() {
        light.range = number(properties, "range").or(light.range);
    }
    if light.spot_angle.is_some() {
        light.spot_angle = number(properties, "spot_angle").or(light.spot_angle);
    }
}

/// Rigid bodies: mass and gravity scale
pub fn configure_rigid_body(node: &mut RuntimeNode, properties: &Map<String, Value>, _ctx: &mut ConfigureContext<'_>) {
    let NodeState::Body(body) = &mut node.state else {
        return;
    };
    body.mass = number(properties, "mass").unwrap_or(body.mass);
    body.gravity_scale = number(properties, "gravity_scale").unwrap_or(body.gravity_scale);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetResolver, FileSystemSource, PLACEHOLDER_COLOR};
    use crate::core::{AssetDirectories, ContentConfig};
    use crate::foundation::math::{Dimension, Vec3};
    use crate::scene::diagnostics::Diagnostics;
    use crate::scene::node::{BodyParams, LightParams};
    use serde_json::json;

    struct Fixture {
        dir: tempfile::TempDir,
        resolver: AssetResolver,
        diagnostics: Diagnostics,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let content = ContentConfig {
                content_root: dir.path().to_string_lossy().into_owned(),
                ..ContentConfig::default()
            };
            Self {
                resolver: AssetResolver::new(FileSystemSource::new(content), AssetDirectories::default()),
                diagnostics: Diagnostics::new(),
                dir,
            }
        }

        fn root(&self) -> &std::path::Path {
            self.dir.path()
        }

        fn configure(&mut self, node: &mut RuntimeNode, properties: Value) -> bool {
            let registry = ConfiguratorRegistry::new();
            let Value::Object(map) = properties else {
                panic!("properties must be an object");
            };
            let mut ctx = ConfigureContext {
                resolver: &self.resolver,
                diagnostics: &mut self.diagnostics,
                dimension: Dimension::ThreeD,
            };
            registry.configure(node, &map, &mut ctx)
        }
    }

    #[test]
    fn test_unresolved_texture_binds_placeholder() {
        let mut fixture = Fixture::new();
        let mut node = RuntimeNode::new(NodeKind::Sprite2D);
        assert!(fixture.configure(&mut node, json!({"texture": "missing.png"})));

        let binding = node.texture().unwrap();
        assert_eq!(binding.origin, AssetOrigin::Placeholder);
        assert_eq!((binding.texture.width, binding.texture.height), (64, 64));
        assert_eq!(binding.texture.pixel(10, 10), Some(PLACEHOLDER_COLOR));
        assert_eq!(fixture.diagnostics.len(), 1);
    }

    #[test]
    fn test_resolved_texture_is_bound() {
        let mut fixture = Fixture::new();
        let sprites = fixture.root().join("assets/sprites");
        std::fs::create_dir_all(&sprites).unwrap();
        image::RgbaImage::from_pixel(8, 8, image::Rgba([0, 128, 0, 255]))
            .save(sprites.join("leaf.png"))
            .unwrap();

        let mut node = RuntimeNode::new(NodeKind::Sprite2D);
        fixture.configure(&mut node, json!({"texture": "leaf.png", "centered": false}));

        let binding = node.texture().unwrap();
        assert_eq!(binding.origin.path(), Some("res://assets/sprites/leaf.png"));
        assert_eq!(binding.texture.width, 8);
        assert!(matches!(&node.state, NodeState::Sprite(s) if !s.centered));
        assert!(fixture.diagnostics.is_empty());
    }

    #[test]
    fn test_unresolved_mesh_binds_unit_cube() {
        let mut fixture = Fixture::new();
        let mut node = RuntimeNode::new(NodeKind::MeshInstance3D);
        fixture.configure(&mut node, json!({"mesh": "ghost.obj"}));

        let binding = node.mesh().unwrap();
        assert_eq!(binding.origin, AssetOrigin::Placeholder);
        assert_eq!(binding.mesh.size(), Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_camera_defaults_and_overrides() {
        let mut fixture = Fixture::new();

        let mut plain = RuntimeNode::new(NodeKind::Camera3D);
        fixture.configure(&mut plain, json!({}));
        let camera = plain.camera().unwrap();
        assert_eq!(camera.projection, Projection::Perspective);
        assert_eq!(camera.fov, 75.0);

        let mut ortho = RuntimeNode::new(NodeKind::Camera3D);
        fixture.configure(&mut ortho, json!({"projection": "orthogonal", "fov": 60, "size": 12.5}));
        let camera = ortho.camera().unwrap();
        assert_eq!(camera.projection, Projection::Orthogonal);
        assert_eq!(camera.fov, 60.0);
        assert_eq!(camera.size, 12.5);
    }

    #[test]
    fn test_camera_2d_accepts_dispatch() {
        let mut fixture = Fixture::new();
        let mut node = RuntimeNode::new(NodeKind::Camera2D);
        assert!(fixture.configure(&mut node, json!({"fov": 90})));
        assert!(matches!(node.state, NodeState::None));
    }

    #[test]
    fn test_light_parameters() {
        let mut fixture = Fixture::new();

        let mut spot = RuntimeNode::new(NodeKind::SpotLight3D);
        fixture.configure(&mut spot, json!({"color": {"r": 1.0, "g": 0.5, "b": 0.0}, "energy": 2, "spot_angle": 30}));
        let NodeState::Light(light) = spot.state else {
            panic!("spot light lost its light state");
        };
        assert_eq!(
            light,
            LightParams {
                color: [1.0, 0.5, 0.0],
                energy: 2.0,
                range: Some(5.0),
                spot_angle: Some(30.0),
            }
        );

        let mut sun = RuntimeNode::new(NodeKind::DirectionalLight3D);
        fixture.configure(&mut sun, json!({"color": [0.2, 0.2, 0.3], "range": 100}));
        let NodeState::Light(light) = sun.state else {
            panic!("directional light lost its light state");
        };
        assert_eq!(light.color, [0.2, 0.2, 0.3]);
        assert_eq!(light.range, None);
    }

    #[test]
    fn test_rigid_body_parameters() {
        let mut fixture = Fixture::new();
        let mut body = RuntimeNode::new(NodeKind::RigidBody2D);
        fixture.configure(&mut body, json!({"mass": 3.5}));
        assert!(matches!(
            body.state,
            NodeState::Body(BodyParams { mass, gravity_scale }) if mass == 3.5 && gravity_scale == 1.0
        ));
    }

    #[test]
    fn test_unconfigured_kind_is_skipped() {
        let mut fixture = Fixture::new();
        let mut node = RuntimeNode::new(NodeKind::StaticBody3D);
        assert!(!fixture.configure(&mut node, json!({"mass": 2})));
    }
}
