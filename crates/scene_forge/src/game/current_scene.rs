//! The current scene handle

use crate::foundation::collections::NodeId;
use crate::scene::{SceneTree, TreeError};

/// Handle to the scene currently attached under the live root
///
/// At most one scene is current. Replacing tears the old one down before
/// the new one is attached, so two scene trees never coexist under the
/// live root.
#[derive(Debug, Default)]
pub struct CurrentScene {
    root: Option<NodeId>,
}

impl CurrentScene {
    /// Create an unset handle
    pub fn new() -> Self {
        Self::default()
    }

    /// Root of the current scene
    pub fn get(&self) -> Option<NodeId> {
        self.root
    }

    /// Whether a scene is current
    pub fn is_set(&self) -> bool {
        self.root.is_some()
    }

    /// Destroy the current scene, if any
    ///
    /// The subtree is detached immediately and released at the tree's next
    /// deferred flush.
    pub fn clear(&mut self, tree: &mut SceneTree) {
        if let Some(old) = self.root.take() {
            log::debug!("Releasing current scene '{}'", tree.get(old).map_or("?", |n| n.name.as_str()));
            tree.queue_free(old);
        }
    }

    /// Make `new_root` the current scene
    ///
    /// The previous scene is destroyed first. `new_root` is attached under
    /// the live root if it is not already.
    pub fn replace(&mut self, tree: &mut SceneTree, new_root: NodeId) -> Result<(), TreeError> {
        if self.root == Some(new_root) {
            return Ok(());
        }
        self.clear(tree);

        let live_root = tree.root();
        if tree.parent(new_root) != Some(live_root) {
            tree.detach(new_root);
            tree.add_child(live_root, new_root)?;
        }
        self.root = Some(new_root);
        Ok(())
    }
}
