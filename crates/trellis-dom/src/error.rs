//! Construction-time errors.
//!
//! Every failure is raised while an element is being created or a scope is
//! being opened; a tree that composed successfully always renders.

use thiserror::Error;

/// Error raised when a tag cannot be used the way the caller asked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// The tag is in the deprecated set and is always rejected.
    #[error("{tag} is deprecated")]
    Deprecated {
        /// The rejected tag name.
        tag: String,
    },
    /// The tag is not in the permitted set.
    #[error("{tag} is not a valid HTML tag")]
    Invalid {
        /// The rejected tag name.
        tag: String,
    },
    /// A void element was used to open a scoped block.
    #[error("{tag} is a void tag")]
    VoidScope {
        /// The void tag name.
        tag: String,
    },
    /// A scope was requested on a node that is not an element of the tree.
    #[error("node {id} is not an element")]
    NotAnElement {
        /// Arena index of the offending node.
        id: usize,
    },
}

impl TagError {
    /// The tag name that caused the error, when there is one.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Deprecated { tag } | Self::Invalid { tag } | Self::VoidScope { tag } => Some(tag),
            Self::NotAnElement { .. } => None,
        }
    }
}
