//! Game construction and reload
//!
//! [`GameConstructor`] owns the tree and every construction collaborator.
//! Construction is synchronous and takes `&mut self`, so a reload can never
//! interleave with another construction.

use super::current_scene::CurrentScene;
use super::host::{HeadlessHost, HostServices};
use super::settings::apply_settings;
use crate::assets::{AssetResolver, AssetSource, FileSystemSource};
use crate::core::ForgeConfig;
use crate::foundation::collections::NodeId;
use crate::foundation::math::Dimension;
use crate::scene::{
    ConfiguratorRegistry, Diagnostic, Diagnostics, NodeFactory, PackedScene, PackedSceneError, SceneBuilder,
    SceneTree, TreeError,
};
use crate::spec::{self, SceneDescriptor, SpecDocument, SpecError};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Structural construction errors
#[derive(Error, Debug)]
pub enum ConstructError {
    /// The document declares neither a game nor scenes
    #[error("Spec document is empty")]
    EmptySpec,

    /// The scene list is absent or empty
    #[error("Spec document declares no scenes")]
    NoScenes,

    /// The main scene has neither an artifact path nor node descriptors
    #[error("Main scene '{0}' has no artifact path and no nodes")]
    EmptyScenePath(String),

    /// Construction was requested before any document was loaded
    #[error("No spec document loaded")]
    NoDocument,

    /// There is no current scene to operate on
    #[error("No current scene")]
    NoCurrentScene,

    /// Loading the document failed
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// Attaching the scene failed
    #[error("Scene tree error: {0}")]
    Tree(#[from] TreeError),

    /// Packing the current scene failed
    #[error("Packed scene error: {0}")]
    Packed(#[from] PackedSceneError),
}

/// Builds the game described by a spec document into a live scene tree
pub struct GameConstructor<H: HostServices = HeadlessHost> {
    config: ForgeConfig,
    resolver: AssetResolver,
    factory: NodeFactory,
    configurators: ConfiguratorRegistry,
    host: H,
    tree: SceneTree,
    current: CurrentScene,
    document: Option<Arc<SpecDocument>>,
    diagnostics: Diagnostics,
}

impl<H: HostServices> GameConstructor<H> {
    /// Create a constructor loading assets from the configured content root
    pub fn new(config: ForgeConfig, host: H) -> Self {
        let source = FileSystemSource::new(config.content.clone());
        Self::with_source(config, source, host)
    }

    /// Create a constructor loading assets through a custom source
    pub fn with_source(config: ForgeConfig, source: impl AssetSource + 'static, host: H) -> Self {
        let resolver = AssetResolver::new(source, config.assets.clone());
        Self {
            config,
            resolver,
            factory: NodeFactory::new(),
            configurators: ConfiguratorRegistry::new(),
            host,
            tree: SceneTree::new(),
            current: CurrentScene::new(),
            document: None,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    /// Node factory, for registering additional kinds
    pub fn factory_mut(&mut self) -> &mut NodeFactory {
        &mut self.factory
    }

    /// Configurator table, for registering additional configurators
    pub fn configurators_mut(&mut self) -> &mut ConfiguratorRegistry {
        &mut self.configurators
    }

    /// The scene tree
    pub fn tree(&self) -> &SceneTree {
        &self.tree
    }

    /// Root of the current scene
    pub fn current_scene(&self) -> Option<NodeId> {
        self.current.get()
    }

    /// Diagnostics recorded by the last construction
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// The loaded document
    pub fn document(&self) -> Option<&Arc<SpecDocument>> {
        self.document.as_ref()
    }

    /// The host services
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Load the document at the configured spec location
    ///
    /// On failure the previously loaded document is kept.
    pub fn load_spec(&mut self) -> Result<Arc<SpecDocument>, ConstructError> {
        let document = Arc::new(spec::load_spec(self.config.spec_file())?);
        self.document = Some(Arc::clone(&document));
        Ok(document)
    }

    /// Construct from an in-memory document
    pub fn construct(&mut self, document: SpecDocument) -> Result<NodeId, ConstructError> {
        self.document = Some(Arc::new(document));
        self.construct_game()
    }

    /// Construct the game from the loaded document
    ///
    /// Any current scene is destroyed first. On error nothing new is
    /// attached and no scene is current.
    pub fn construct_game(&mut self) -> Result<NodeId, ConstructError> {
        let document = self.document.clone().ok_or(ConstructError::NoDocument)?;

        self.diagnostics.clear();
        self.current.clear(&mut self.tree);
        self.tree.flush_deferred();

        let scene = main_scene(&document)?;
        let dimension = scene.dimension.unwrap_or_else(|| document.dimension());

        let root = match scene.artifact_path() {
            Some(path) => match self.instantiate_artifact(path, dimension) {
                Ok(root) => root,
                Err(reason) => {
                    self.diagnostics.report(Diagnostic::ArtifactFallback {
                        path: path.to_string(),
                        reason,
                    });
                    self.build_dynamic(scene, dimension)?
                }
            },
            None => self.build_dynamic(scene, dimension)?,
        };

        if let Err(e) = self.current.replace(&mut self.tree, root) {
            self.tree.destroy(root);
            return Err(e.into());
        }
        apply_settings(&document.settings, document.dimension(), &mut self.host);

        log::info!(
            "Constructed '{}': scene '{}' with {} node(s), {} diagnostic(s)",
            document.game_name().unwrap_or("<unnamed>"),
            self.tree[root].name,
            self.tree.subtree_len(root),
            self.diagnostics.len()
        );
        Ok(root)
    }

    /// Tear down the current scene, reload the document and construct again
    pub fn reload_game(&mut self) -> Result<NodeId, ConstructError> {
        log::info!("Reloading game");
        self.current.clear(&mut self.tree);
        self.tree.flush_deferred();
        self.load_spec()?;
        self.construct_game()
    }

    /// Pack the current scene and write it as an artifact
    pub fn save_current_scene(&self, path: impl AsRef<Path>) -> Result<PackedScene, ConstructError> {
        let root = self.current.get().ok_or(ConstructError::NoCurrentScene)?;
        let packed = PackedScene::pack(&self.tree, root)?;
        packed.save_to_file(path)?;
        Ok(packed)
    }

    fn instantiate_artifact(&mut self, path: &str, dimension: Dimension) -> Result<NodeId, String> {
        let packed = self.resolver.load_packed_scene(path).map_err(|e| e.to_string())?;
        let root = packed
            .instantiate(&mut self.tree, &self.resolver, dimension)
            .map_err(|e| e.to_string())?;
        log::debug!("Main scene loaded from artifact {}", path);
        Ok(root)
    }

    fn build_dynamic(&mut self, scene: &SceneDescriptor, dimension: Dimension) -> Result<NodeId, ConstructError> {
        let mut builder = SceneBuilder::new(
            &mut self.tree,
            &self.factory,
            &self.configurators,
            &self.resolver,
            &mut self.diagnostics,
        );
        Ok(builder.build_scene(scene, dimension)?)
    }
}

/// Validate the document structure and pick the main scene
fn main_scene(document: &SpecDocument) -> Result<&SceneDescriptor, ConstructError> {
    if document.game.is_none() && document.scenes.is_none() {
        return Err(ConstructError::EmptySpec);
    }
    let scene = document.main_scene().ok_or(ConstructError::NoScenes)?;
    if scene.artifact_path().is_none() && scene.nodes.is_none() {
        return Err(ConstructError::EmptyScenePath(scene.name.clone()));
    }
    Ok(scene)
}
