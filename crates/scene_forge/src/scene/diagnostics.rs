//! Non-fatal construction diagnostics
//!
//! Conditions that degrade the built tree without aborting construction are
//! reported here instead of being returned as errors. Every report is also
//! logged at warn level.

use crate::assets::AssetCategory;

/// A non-fatal condition met during construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An asset reference could not be resolved
    UnresolvedAsset {
        /// Node that referenced the asset
        node: String,
        /// Asset category
        category: AssetCategory,
        /// Reference as written in the document
        reference: String,
    },

    /// A kind name is not in the factory table; a generic node was used
    UnknownNodeKind {
        /// Node name
        node: String,
        /// Unrecognized kind name
        kind: String,
    },

    /// A node could not be created; it and its subtree were skipped
    NodeCreationFailure {
        /// Node name
        node: String,
        /// Kind name
        kind: String,
        /// Why creation failed
        reason: String,
    },

    /// The prebuilt artifact could not be used; the scene was built dynamically
    ArtifactFallback {
        /// Artifact path
        path: String,
        /// Why the artifact was rejected
        reason: String,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnresolvedAsset { node, category, reference } => {
                write!(f, "node '{node}': unresolved {category} asset '{reference}'")
            }
            Self::UnknownNodeKind { node, kind } => {
                write!(f, "node '{node}': unknown kind '{kind}', using generic Node")
            }
            Self::NodeCreationFailure { node, kind, reason } => {
                write!(f, "node '{node}' ({kind}) skipped: {reason}")
            }
            Self::ArtifactFallback { path, reason } => {
                write!(f, "artifact '{path}' unusable ({reason}), building scene from descriptor")
            }
        }
    }
}

/// Collected diagnostics for one construction
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Record and log a diagnostic
    pub fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    /// Recorded diagnostics in report order
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Number of recorded diagnostics
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_keeps_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(Diagnostic::UnknownNodeKind {
            node: "Thing".to_string(),
            kind: "Gizmo".to_string(),
        });
        diagnostics.report(Diagnostic::ArtifactFallback {
            path: "res://main.ron".to_string(),
            reason: "missing".to_string(),
        });

        assert_eq!(diagnostics.len(), 2);
        assert!(matches!(diagnostics.entries()[0], Diagnostic::UnknownNodeKind { .. }));
        assert!(diagnostics.entries()[1].to_string().contains("res://main.ron"));

        diagnostics.clear();
        assert!(diagnostics.is_empty());
    }
}
