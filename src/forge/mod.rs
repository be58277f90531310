//! Forge connectors
//!
//! A connector talks to a code-hosting service. Not every connector can do
//! everything, so each operation is exposed as an optional capability:
//! callers ask for the capability and degrade when it is missing.

mod github;

pub use github::GhConnector;

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::command::CommandError;
use crate::model::{BranchName, ProposalData, ProposalLocation};

/// Errors that can occur when talking to a forge
#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("no forge connector is configured for this repository")]
    UnsupportedService,

    #[error("the {forge} connector does not support {operation}")]
    Unsupported {
        forge: &'static str,
        operation: &'static str,
    },

    #[error("found {count} open proposals for branch {branch}, expected at most one")]
    AmbiguousProposal { branch: BranchName, count: usize },

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("Failed to parse forge response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Looks up the open proposal for a branch
pub trait FindProposal {
    /// Proposal from `branch` into `target`, `None` if there is none
    fn find_proposal(
        &self,
        branch: &BranchName,
        target: &BranchName,
    ) -> Result<Option<ProposalData>, ForgeError>;
}

/// Replaces the description of a proposal
pub trait UpdateProposalBody {
    fn update_proposal_body(
        &self,
        proposal: &ProposalLocation,
        body: &str,
    ) -> Result<(), ForgeError>;
}

/// A code-hosting service
pub trait Connector {
    /// Human readable forge name (e.g., "GitHub")
    fn name(&self) -> &'static str;

    fn proposal_finder(&self) -> Option<&dyn FindProposal> {
        None
    }

    fn proposal_body_updater(&self) -> Option<&dyn UpdateProposalBody> {
        None
    }
}

/// Which connector to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForgeKind {
    /// GitHub through the `gh` CLI
    #[default]
    Github,
    /// No forge access
    None,
}

/// Create the connector for `kind`, `None` when forge access is disabled
pub fn new_connector(kind: ForgeKind, repo_path: Option<PathBuf>) -> Option<Box<dyn Connector>> {
    match kind {
        ForgeKind::Github => Some(Box::new(GhConnector::new(repo_path))),
        ForgeKind::None => None,
    }
}
