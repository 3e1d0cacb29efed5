//! Headless scene forge runner
//!
//! Loads a content root, constructs the game it describes and prints the
//! resulting scene tree.
//!
//! Usage: `forge_app [content_root] [--reload N] [--pack PATH]`

use scene_forge::config::{Config, ConfigError};
use scene_forge::core::ForgeConfig;
use scene_forge::foundation::collections::NodeId;
use scene_forge::foundation::math::Spatial;
use scene_forge::game::{ConstructError, GameConstructor, HeadlessHost};
use scene_forge::scene::SceneTree;
use thiserror::Error;

const CONFIG_FILE: &str = "forge.toml";

/// Runner errors
#[derive(Error, Debug)]
enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Construction failed: {0}")]
    Construct(#[from] ConstructError),

    #[error("Invalid arguments: {0}")]
    Usage(String),
}

#[derive(Debug, Default)]
struct Options {
    content_root: Option<String>,
    reloads: usize,
    pack: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, AppError> {
    let mut options = Options::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--reload" => {
                let count = args.next().ok_or_else(|| AppError::Usage("--reload needs a count".to_string()))?;
                options.reloads = count
                    .parse()
                    .map_err(|_| AppError::Usage(format!("bad reload count '{count}'")))?;
            }
            "--pack" => {
                options.pack = Some(args.next().ok_or_else(|| AppError::Usage("--pack needs a path".to_string()))?);
            }
            flag if flag.starts_with("--") => return Err(AppError::Usage(format!("unknown flag '{flag}'"))),
            _ => options.content_root = Some(arg),
        }
    }
    Ok(options)
}

fn print_tree(tree: &SceneTree, id: NodeId, indent: usize) {
    let node = &tree[id];
    let transform = match node.transform {
        Spatial::TwoD(t) => format!(" pos=({}, {}) rot={}", t.position.x, t.position.y, t.rotation_degrees),
        Spatial::ThreeD(t) => format!(
            " pos=({}, {}, {}) rot=({}, {}, {})",
            t.position.x, t.position.y, t.position.z, t.rotation_degrees.x, t.rotation_degrees.y, t.rotation_degrees.z
        ),
        Spatial::None => String::new(),
    };
    let groups: Vec<_> = node.groups().collect();
    let groups = if groups.is_empty() {
        String::new()
    } else {
        format!(" groups=[{}]", groups.join(", "))
    };
    println!("{:indent$}{} ({}){}{}", "", node.name, node.kind(), transform, groups, indent = indent * 2);

    for &child in tree.children(id) {
        print_tree(tree, child, indent + 1);
    }
}

fn run(options: Options) -> Result<(), AppError> {
    let mut config = ForgeConfig::load_or_default(CONFIG_FILE)?;
    if let Some(root) = options.content_root {
        config.content.content_root = root;
    }
    log::info!("Content root: {}", config.content.content_root);

    let mut game = GameConstructor::new(config, HeadlessHost::new());
    let mut scene = game.reload_game()?;
    for i in 0..options.reloads {
        log::info!("Reload {}/{}", i + 1, options.reloads);
        scene = game.reload_game()?;
    }

    print_tree(game.tree(), scene, 0);
    for diagnostic in game.diagnostics().entries() {
        println!("warning: {diagnostic}");
    }

    if let Some(path) = options.pack {
        let packed = game.save_current_scene(&path)?;
        log::info!("Packed {} node(s) into {}", packed.node_count(), path);
    }
    Ok(())
}

fn main() {
    scene_forge::foundation::logging::init();

    log::info!("Starting scene forge");

    let result = parse_args(std::env::args().skip(1)).and_then(run);
    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(args(&["games/demo", "--reload", "3", "--pack", "out.ron"])).unwrap();
        assert_eq!(options.content_root.as_deref(), Some("games/demo"));
        assert_eq!(options.reloads, 3);
        assert_eq!(options.pack.as_deref(), Some("out.ron"));
    }

    #[test]
    fn test_bad_args() {
        assert!(matches!(parse_args(args(&["--reload"])), Err(AppError::Usage(_))));
        assert!(matches!(parse_args(args(&["--reload", "x"])), Err(AppError::Usage(_))));
        assert!(matches!(parse_args(args(&["--verbose"])), Err(AppError::Usage(_))));
    }
}
