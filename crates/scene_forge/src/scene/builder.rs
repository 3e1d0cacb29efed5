//! Dynamic scene construction from descriptors
//!
//! Walks a scene descriptor depth-first in declaration order, creating each
//! node through the factory, attaching it to its parent and configuring it.
//! A node the factory cannot produce is skipped together with its subtree;
//! every other problem degrades the node instead of failing the scene.

use super::configurators::ConfiguratorRegistry;
use super::diagnostics::{Diagnostic, Diagnostics};
use super::factory::NodeFactory;
use super::kind::NodeKind;
use super::node::RuntimeNode;
use super::properties::{apply_common, ConfigureContext};
use super::tree::{SceneTree, TreeError};
use crate::assets::AssetResolver;
use crate::foundation::collections::NodeId;
use crate::foundation::math::Dimension;
use crate::spec::{NodeDescriptor, NodeEntry, SceneDescriptor};

/// Name given to a scene root when the descriptor has none
pub const DEFAULT_SCENE_NAME: &str = "Main";

/// Immutable per-scene build parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildContext {
    /// Dimensionality of the scene being built
    pub dimension: Dimension,
}

/// Builds scene subtrees into a [`SceneTree`]
pub struct SceneBuilder<'a> {
    tree: &'a mut SceneTree,
    factory: &'a NodeFactory,
    configurators: &'a ConfiguratorRegistry,
    resolver: &'a AssetResolver,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> SceneBuilder<'a> {
    /// Create a builder writing into `tree`
    pub fn new(
        tree: &'a mut SceneTree,
        factory: &'a NodeFactory,
        configurators: &'a ConfiguratorRegistry,
        resolver: &'a AssetResolver,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            tree,
            factory,
            configurators,
            resolver,
            diagnostics,
        }
    }

    /// Build a whole scene and attach its root under the live root
    ///
    /// The scene's own dimensionality wins over `default_dimension`.
    pub fn build_scene(
        &mut self,
        descriptor: &SceneDescriptor,
        default_dimension: Dimension,
    ) -> Result<NodeId, TreeError> {
        let ctx = BuildContext {
            dimension: descriptor.dimension.unwrap_or(default_dimension),
        };

        let mut root_node = RuntimeNode::new(NodeKind::root_for(ctx.dimension));
        root_node.name = if descriptor.name.trim().is_empty() {
            DEFAULT_SCENE_NAME.to_string()
        } else {
            descriptor.name.clone()
        };

        let live_root = self.tree.root();
        let scene_root = self.tree.insert(root_node);
        if let Err(e) = self.tree.add_child(live_root, scene_root) {
            self.tree.destroy(scene_root);
            return Err(e);
        }

        log::info!(
            "Building {} scene '{}' ({} node descriptor(s))",
            ctx.dimension,
            self.tree[scene_root].name,
            descriptor.node_count()
        );

        for node in descriptor.nodes() {
            self.build_node(scene_root, node, &ctx);
        }
        Ok(scene_root)
    }

    /// Build one entry and its children under `parent`
    ///
    /// Returns `None` when the node was skipped. A malformed entry is
    /// skipped with its whole subtree.
    pub fn build_node(&mut self, parent: NodeId, entry: &NodeEntry, ctx: &BuildContext) -> Option<NodeId> {
        match entry {
            NodeEntry::Node(descriptor) => self.build_descriptor(parent, descriptor, ctx),
            NodeEntry::Malformed { reason, .. } => {
                self.diagnostics.report(Diagnostic::NodeCreationFailure {
                    node: entry.display_name().to_string(),
                    kind: entry.kind_name().to_string(),
                    reason: format!("malformed descriptor: {reason}"),
                });
                None
            }
        }
    }

    fn build_descriptor(&mut self, parent: NodeId, descriptor: &NodeDescriptor, ctx: &BuildContext) -> Option<NodeId> {
        let display_name = descriptor.name.as_deref().unwrap_or(&descriptor.kind);
        let mut node = self
            .factory
            .create(&descriptor.kind, ctx.dimension, display_name, self.diagnostics)?;

        if let Some(name) = &descriptor.name {
            node.name = name.clone();
        }

        let id = self.tree.insert(node);
        if let Err(e) = self.tree.add_child(parent, id) {
            self.tree.destroy(id);
            self.diagnostics.report(Diagnostic::NodeCreationFailure {
                node: display_name.to_string(),
                kind: descriptor.kind.clone(),
                reason: e.to_string(),
            });
            return None;
        }

        let node = self.tree.get_mut(id)?;
        let mut configure = ConfigureContext {
            resolver: self.resolver,
            diagnostics: &mut *self.diagnostics,
            dimension: ctx.dimension,
        };
        apply_common(node, descriptor, &mut configure);
        self.configurators.configure(node, &descriptor.properties, &mut configure);
        log::debug!("Built '{}' ({}) under {:?}", node.name, node.kind(), parent);

        for child in &descriptor.children {
            self.build_node(id, child, ctx);
        }
        Some(id)
    }
}
