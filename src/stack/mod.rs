//! Stacked proposal annotation
//!
//! Resolves the proposal of every branch in a [`LineageTree`](crate::lineage::LineageTree),
//! renders the stack as text and splices it into proposal descriptions.

mod builder;
mod render;
mod splice;
mod sync;
mod update;

pub use builder::ProposalStackBuilder;
pub use render::{RenderLocation, RenderOptions};
pub use splice::{STACK_END_MARKER, STACK_START_MARKER, splice_stack_into_body};
pub use sync::plan_body_updates;
pub use update::ProposalUpdateBody;

use thiserror::Error;

use crate::forge::ForgeError;
use crate::model::BranchName;

/// Errors that can occur while resolving the proposals of a stack
#[derive(Error, Debug)]
pub enum StackError {
    #[error("failed to find proposal for branch {branch}: {source}")]
    FindProposal {
        branch: BranchName,
        source: ForgeError,
    },

    #[error("no proposal found for branch \"{branch}\"")]
    ProposalNotFound { branch: BranchName },
}
