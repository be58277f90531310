//! Lineage tree construction
//!
//! Turns the flat parent pointers of a [`Lineage`](crate::model::Lineage)
//! into a rooted tree around one branch.

mod roles;
mod tree;

pub use roles::BranchRoles;
pub use tree::{LineageTree, LineageTreeNode, Nodes};

use thiserror::Error;

use crate::model::BranchName;

/// Errors that can occur while building a lineage tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineageError {
    #[error("malformed lineage: parent of branch {branch} is not part of the tree")]
    Malformed { branch: BranchName },
}
