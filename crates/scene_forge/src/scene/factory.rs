//! Node factory
//!
//! Maps kind names to constructor functions. Unknown names never fail: they
//! produce the generic `Node` kind together with an `UnknownNodeKind`
//! diagnostic. A known kind that belongs to the other dimensionality than
//! the scene being built produces nothing.

use super::diagnostics::{Diagnostic, Diagnostics};
use super::kind::NodeKind;
use super::node::RuntimeNode;
use crate::foundation::math::Dimension;
use std::collections::HashMap;

/// Constructor for one kind name
pub type NodeConstructor = Box<dyn Fn() -> RuntimeNode>;

/// Kind-name dispatch table
pub struct NodeFactory {
    constructors: HashMap<String, NodeConstructor>,
}

impl Default for NodeFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeFactory {
    /// Factory with every built-in kind registered
    pub fn new() -> Self {
        let mut factory = Self::empty();
        for kind in NodeKind::ALL {
            factory.register(kind.name(), move || RuntimeNode::new(kind));
        }
        factory.register("PointLight3D", || RuntimeNode::new(NodeKind::OmniLight3D));
        factory
    }

    /// Factory with no registered kinds
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Register or replace the constructor for a kind name
    pub fn register(&mut self, name: impl Into<String>, constructor: impl Fn() -> RuntimeNode + 'static) {
        self.constructors.insert(name.into(), Box::new(constructor));
    }

    /// Whether a kind name is registered
    pub fn is_registered(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Create a node for `kind_name` in a scene of `dimension`
    ///
    /// `node_name` is only used for diagnostics.
    pub fn create(
        &self,
        kind_name: &str,
        dimension: Dimension,
        node_name: &str,
        diagnostics: &mut Diagnostics,
    ) -> Option<RuntimeNode> {
        let Some(constructor) = self.constructors.get(kind_name) else {
            diagnostics.report(Diagnostic::UnknownNodeKind {
                node: node_name.to_string(),
                kind: kind_name.to_string(),
            });
            return Some(RuntimeNode::new(NodeKind::Node));
        };

        let node = constructor();
        match node.kind().dimension() {
            Some(kind_dimension) if kind_dimension != dimension => {
                diagnostics.report(Diagnostic::NodeCreationFailure {
                    node: node_name.to_string(),
                    kind: kind_name.to_string(),
                    reason: format!("{kind_dimension} kind in a {dimension} scene"),
                });
                None
            }
            _ => Some(node),
        }
    }
}
