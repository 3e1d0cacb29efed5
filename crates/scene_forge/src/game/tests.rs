//! End-to-end construction tests against an on-disk content root

use super::*;
use crate::assets::PLACEHOLDER_COLOR;
use crate::core::ForgeConfig;
use crate::foundation::math::{Vec2, Vec3};
use crate::scene::{AssetOrigin, Diagnostic, NodeKind, NodeState, Projection};
use crate::spec::{parse_spec, SpecError};
use approx::assert_relative_eq;
use std::path::Path;

fn content_root() -> tempfile::TempDir {
    crate::foundation::logging::init_for_tests();
    tempfile::tempdir().unwrap()
}

fn write_spec(root: &Path, json: &str) {
    std::fs::write(root.join("game_spec.json"), json).unwrap();
}

fn constructor(root: &Path) -> GameConstructor {
    GameConstructor::new(ForgeConfig::with_content_root(root.to_string_lossy()), HeadlessHost::new())
}

const PLATFORMER: &str = r#"{
    "game": {"name": "Platformer", "type": "2D"},
    "settings": {"window": {"width": 1280, "height": 720}},
    "scenes": [{
        "name": "Level1",
        "nodes": [
            {"name": "Player", "type": "CharacterBody2D", "position": {"x": 100, "y": 200},
             "script": "player.gd", "groups": ["players"],
             "children": [
                {"name": "Sprite", "type": "Sprite2D", "properties": {"texture": "hero.png"}},
                {"name": "Camera", "type": "Camera2D"}
             ]},
            {"name": "Ground", "type": "StaticBody2D", "position": {"y": 600}, "scale": {"x": 20, "y": 1}}
        ]
    }]
}"#;

#[test]
fn test_construct_platformer() {
    let dir = content_root();
    write_spec(dir.path(), PLATFORMER);
    std::fs::create_dir_all(dir.path().join("scripts")).unwrap();
    std::fs::write(dir.path().join("scripts/player.gd"), "extends CharacterBody2D").unwrap();

    let mut game = constructor(dir.path());
    game.load_spec().unwrap();
    let root = game.construct_game().unwrap();

    let tree = game.tree();
    assert_eq!(game.current_scene(), Some(root));
    assert_eq!(tree[root].name, "Level1");
    assert_eq!(tree[root].kind(), NodeKind::Node2D);
    assert_eq!(tree.subtree_len(root), 5);

    let player = tree.find_path(root, "Player").unwrap();
    assert_eq!(tree[player].transform.as_2d().unwrap().position, Vec2::new(100.0, 200.0));
    assert_eq!(tree[player].behavior.as_ref().unwrap().source, "extends CharacterBody2D");
    assert_eq!(tree.nodes_in_group("players"), vec![player]);

    let ground = tree.find_path(root, "Ground").unwrap();
    let t = tree[ground].transform.as_2d().unwrap();
    assert_eq!(t.position, Vec2::new(0.0, 600.0));
    assert_eq!(t.scale, Vec2::new(20.0, 1.0));

    assert_eq!(game.host().window_size, Some((1280, 720)));
    assert_eq!(game.host().window_mode, Some(WindowMode::Windowed));
    assert_eq!(game.host().gravity_2d, Some(DEFAULT_GRAVITY_2D));
}

#[test]
fn test_reload_keeps_exactly_one_scene() {
    let dir = content_root();
    write_spec(dir.path(), PLATFORMER);
    let mut game = constructor(dir.path());

    let mut previous = None;
    for _ in 0..5 {
        let root = game.reload_game().unwrap();
        let tree = game.tree();
        assert_eq!(tree.children(tree.root()), &[root]);
        if let Some(old) = previous {
            assert!(!tree.contains(old));
        }
        previous = Some(root);
    }
    let scene_len = game.tree().subtree_len(game.current_scene().unwrap());
    assert_eq!(game.tree().len(), 1 + scene_len);
}

#[test]
fn test_reload_picks_up_document_changes() {
    let dir = content_root();
    write_spec(dir.path(), r#"{"scenes": [{"name": "A", "nodes": []}]}"#);
    let mut game = constructor(dir.path());
    let first = game.reload_game().unwrap();
    assert_eq!(game.tree()[first].name, "A");

    write_spec(dir.path(), r#"{"scenes": [{"name": "B", "nodes": [{"name": "X", "type": "Node2D"}]}]}"#);
    let second = game.reload_game().unwrap();
    assert_eq!(game.tree()[second].name, "B");
    assert_eq!(game.tree().subtree_len(second), 2);
}

#[test]
fn test_unknown_kind_becomes_generic_node_with_children() {
    let mut game = constructor(Path::new("."));
    let doc = parse_spec(
        r#"{"scenes": [{"nodes": [
            {"name": "Gizmo", "type": "Teleporter", "children": [
                {"name": "A", "type": "Node2D"}, {"name": "B", "type": "Node2D"}
            ]}
        ]}]}"#,
    )
    .unwrap();
    let root = game.construct(doc).unwrap();

    let tree = game.tree();
    let gizmo = tree.find_path(root, "Gizmo").unwrap();
    assert_eq!(tree[gizmo].kind(), NodeKind::Node);
    assert_eq!(tree.children(gizmo).len(), 2);
    assert!(game
        .diagnostics()
        .entries()
        .iter()
        .any(|d| matches!(d, Diagnostic::UnknownNodeKind { kind, .. } if kind == "Teleporter")));
}

#[test]
fn test_malformed_node_does_not_abort_reload() {
    let dir = content_root();
    write_spec(
        dir.path(),
        r#"{"scenes": [{"name": "Arena", "nodes": [
            {"name": "Good", "type": "Node2D"},
            {"name": "Tagged", "type": "Node2D", "groups": "enemies"},
            {"name": "Hollow", "type": "Node2D", "children": null}
        ]}]}"#,
    );

    let mut game = constructor(dir.path());
    let root = game.reload_game().unwrap();
    let tree = game.tree();
    assert!(tree.find_path(root, "Good").is_some());
    assert!(tree.find_path(root, "Hollow").is_some());
    assert!(tree.find_path(root, "Tagged").is_none());
    assert!(matches!(
        &game.diagnostics().entries()[..],
        [Diagnostic::NodeCreationFailure { node, .. }] if node == "Tagged"
    ));
}

#[test]
fn test_missing_assets_get_placeholders() {
    let dir = content_root();
    let mut game = constructor(dir.path());
    let doc = parse_spec(
        r#"{"game": {"type": "3D"}, "scenes": [{"nodes": [
            {"name": "Ship", "type": "MeshInstance3D", "properties": {"mesh": "missing.obj"}},
            {"name": "Hull", "type": "MeshInstance3D"}
        ]}]}"#,
    )
    .unwrap();
    let root = game.construct(doc).unwrap();
    let tree = game.tree();

    for name in ["Ship", "Hull"] {
        let binding = tree[tree.find_path(root, name).unwrap()].mesh().unwrap();
        assert_eq!(binding.origin, AssetOrigin::Placeholder);
        assert_eq!(binding.mesh.size(), Vec3::new(1.0, 1.0, 1.0));
    }
    assert_eq!(game.diagnostics().len(), 1);

    let doc = parse_spec(r#"{"scenes": [{"nodes": [{"name": "S", "type": "Sprite2D", "properties": {"texture": "no.png"}}]}]}"#)
        .unwrap();
    let root = game.construct(doc).unwrap();
    let sprite = game.tree().find_path(root, "S").unwrap();
    let texture = &game.tree()[sprite].texture().unwrap().texture;
    assert_eq!((texture.width, texture.height), (64, 64));
    assert!(texture.is_opaque());
    assert_eq!(texture.pixel(0, 63), Some(PLACEHOLDER_COLOR));
}

#[test]
fn test_declared_values_round_trip() {
    let mut game = constructor(Path::new("."));
    let doc = parse_spec(
        r#"{"game": {"type": "3D"}, "scenes": [{"nodes": [
            {"name": "Cam", "type": "Camera3D", "position": {"x": 1.5, "y": 2, "z": -3},
             "rotation": {"x": -30, "y": 405, "z": 0}, "scale": {"x": 2, "y": 2, "z": 2},
             "groups": ["cameras"], "properties": {"projection": "orthographic", "fov": 50}}
        ]}]}"#,
    )
    .unwrap();
    let root = game.construct(doc).unwrap();

    let tree = game.tree();
    let cam = &tree[tree.find_path(root, "Cam").unwrap()];
    let t = cam.transform.as_3d().unwrap();
    assert_relative_eq!(t.position, Vec3::new(1.5, 2.0, -3.0));
    assert_relative_eq!(t.rotation_degrees, Vec3::new(-30.0, 405.0, 0.0));
    assert_relative_eq!(t.scale, Vec3::new(2.0, 2.0, 2.0));
    assert!(cam.is_in_group("cameras"));
    assert_eq!(cam.camera().unwrap().projection, Projection::Orthogonal);
    assert_eq!(cam.camera().unwrap().fov, 50.0);
    assert_eq!(game.host().gravity_3d, Some(DEFAULT_GRAVITY_3D));
}

#[test]
fn test_declared_gravity() {
    let mut game = constructor(Path::new("."));
    let doc = parse_spec(r#"{"settings": {"physics": {"gravity": {"x": 0, "y": 500}}}, "scenes": [{"nodes": []}]}"#)
        .unwrap();
    game.construct(doc).unwrap();
    assert_eq!(game.host().gravity_2d, Some(Vec2::new(0.0, 500.0)));
}

#[test]
fn test_structural_errors() {
    let mut game = constructor(Path::new("."));

    assert!(matches!(game.construct_game(), Err(ConstructError::NoDocument)));
    assert!(matches!(game.construct(parse_spec("{}").unwrap()), Err(ConstructError::EmptySpec)));
    assert!(matches!(
        game.construct(parse_spec(r#"{"game": {"name": "G"}}"#).unwrap()),
        Err(ConstructError::NoScenes)
    ));
    assert!(matches!(
        game.construct(parse_spec(r#"{"scenes": []}"#).unwrap()),
        Err(ConstructError::NoScenes)
    ));
    assert!(matches!(
        game.construct(parse_spec(r#"{"scenes": [{"name": "Main", "path": ""}]}"#).unwrap()),
        Err(ConstructError::EmptyScenePath(_))
    ));
}

#[test]
fn test_failed_construction_unsets_current_scene() {
    let mut game = constructor(Path::new("."));
    game.construct(parse_spec(r#"{"scenes": [{"nodes": []}]}"#).unwrap()).unwrap();
    assert!(game.current_scene().is_some());

    assert!(game.construct(parse_spec(r#"{"scenes": []}"#).unwrap()).is_err());
    assert!(game.current_scene().is_none());
    assert!(game.tree().children(game.tree().root()).is_empty());
}

#[test]
fn test_missing_spec_file() {
    let dir = content_root();
    let mut game = constructor(dir.path());
    assert!(matches!(game.reload_game(), Err(ConstructError::Spec(SpecError::NotFound { .. }))));
    assert!(game.current_scene().is_none());
}

#[test]
fn test_missing_artifact_falls_back_to_descriptor() {
    let dir = content_root();
    let mut game = constructor(dir.path());
    let doc = parse_spec(
        r#"{"scenes": [{"name": "Main", "path": "scenes/main.ron", "nodes": [
            {"name": "A", "type": "Node2D", "children": [{"name": "B", "type": "Node2D", "children": [{"name": "C", "type": "Sprite2D"}]}]},
            {"name": "D", "type": "Node2D"}
        ]}]}"#,
    )
    .unwrap();
    let descriptor_depth = doc.main_scene().unwrap().nodes().iter().map(|n| n.depth()).max().unwrap();
    let descriptor_count = doc.main_scene().unwrap().node_count();

    let root = game.construct(doc).unwrap();
    let tree = game.tree();
    assert_eq!(tree.depth(root), 1 + descriptor_depth);
    assert_eq!(tree.subtree_len(root), 1 + descriptor_count);
    assert!(matches!(game.diagnostics().entries()[0], Diagnostic::ArtifactFallback { .. }));
}

#[test]
fn test_saved_artifact_takes_the_fast_path() {
    let dir = content_root();
    let mut game = constructor(dir.path());
    let spec_with_nodes = r#"{"scenes": [{"name": "Arena", "path": "scenes/arena.ron", "nodes": [
        {"name": "Boss", "type": "RigidBody2D", "rotation": 90, "groups": ["enemies"], "properties": {"mass": 40}}
    ]}]}"#;
    let root = game.construct(parse_spec(spec_with_nodes).unwrap()).unwrap();
    assert_eq!(game.diagnostics().len(), 1);

    let packed = game.save_current_scene(dir.path().join("scenes/arena.ron")).unwrap();
    assert_eq!(packed.node_count(), game.tree().subtree_len(root));

    let spec_without_nodes = r#"{"scenes": [{"name": "Arena", "path": "scenes/arena.ron"}]}"#;
    let root = game.construct(parse_spec(spec_without_nodes).unwrap()).unwrap();
    assert!(game.diagnostics().is_empty());

    let tree = game.tree();
    let boss = &tree[tree.find_path(root, "Boss").unwrap()];
    assert_eq!(boss.transform.as_2d().unwrap().rotation_degrees, 90.0);
    assert!(boss.is_in_group("enemies"));
    assert!(matches!(boss.state, NodeState::Body(b) if b.mass == 40.0));
}

#[test]
fn test_artifact_of_wrong_dimension_falls_back() {
    let dir = content_root();
    let mut game = constructor(dir.path());
    game.construct(parse_spec(r#"{"game": {"type": "3D"}, "scenes": [{"nodes": [{"type": "Node3D"}]}]}"#).unwrap())
        .unwrap();
    game.save_current_scene(dir.path().join("world.ron")).unwrap();

    let root = game
        .construct(parse_spec(r#"{"scenes": [{"path": "world.ron", "nodes": [{"name": "Flat", "type": "Node2D"}]}]}"#).unwrap())
        .unwrap();
    assert_eq!(game.tree()[root].kind(), NodeKind::Node2D);
    assert!(game.tree().find_path(root, "Flat").is_some());
    assert!(matches!(game.diagnostics().entries()[0], Diagnostic::ArtifactFallback { .. }));
}

#[test]
fn test_save_without_scene() {
    let dir = content_root();
    let game = constructor(dir.path());
    assert!(matches!(
        game.save_current_scene(dir.path().join("x.ron")),
        Err(ConstructError::NoCurrentScene)
    ));
}
