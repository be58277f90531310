//! GitHub connector backed by the `gh` CLI
//!
//! Authentication and host selection are left to `gh` itself.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::{Connector, FindProposal, ForgeError, UpdateProposalBody};
use crate::command;
use crate::model::{BranchName, ProposalData, ProposalLocation};

const GH_COMMAND: &str = "gh";

/// Fields requested from `gh pr list --json`
const PR_FIELDS: &str = "number,title,url,body,headRefName,baseRefName";

/// Pull request as printed by `gh pr list --json`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GhPullRequest {
    number: u64,
    title: String,
    url: String,
    #[serde(default)]
    body: Option<String>,
    head_ref_name: String,
    base_ref_name: String,
}

impl From<GhPullRequest> for ProposalData {
    fn from(pr: GhPullRequest) -> Self {
        ProposalData {
            number: pr.number,
            title: pr.title,
            url: pr.url,
            source: BranchName::from(pr.head_ref_name),
            target: BranchName::from(pr.base_ref_name),
            body: pr.body,
        }
    }
}

/// Connector for GitHub repositories
#[derive(Debug, Clone, Default)]
pub struct GhConnector {
    /// Repository working directory (None = current directory)
    repo_path: Option<PathBuf>,
}

impl GhConnector {
    pub fn new(repo_path: Option<PathBuf>) -> Self {
        Self { repo_path }
    }

    fn repo_path(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}

impl Connector for GhConnector {
    fn name(&self) -> &'static str {
        "GitHub"
    }

    fn proposal_finder(&self) -> Option<&dyn FindProposal> {
        Some(self)
    }

    fn proposal_body_updater(&self) -> Option<&dyn UpdateProposalBody> {
        Some(self)
    }
}

impl FindProposal for GhConnector {
    fn find_proposal(
        &self,
        branch: &BranchName,
        target: &BranchName,
    ) -> Result<Option<ProposalData>, ForgeError> {
        let output = command::run(
            GH_COMMAND,
            self.repo_path(),
            &[
                "pr",
                "list",
                "--head",
                branch.as_str(),
                "--base",
                target.as_str(),
                "--state",
                "open",
                "--json",
                PR_FIELDS,
                "--limit",
                "2",
            ],
            None,
        )?;
        let mut proposals = parse_pull_requests(&output)?;
        debug!(%branch, %target, found = proposals.len(), "queried GitHub pull requests");
        match proposals.len() {
            0 => Ok(None),
            1 => Ok(proposals.pop()),
            count => Err(ForgeError::AmbiguousProposal {
                branch: branch.clone(),
                count,
            }),
        }
    }
}

impl UpdateProposalBody for GhConnector {
    fn update_proposal_body(
        &self,
        proposal: &ProposalLocation,
        body: &str,
    ) -> Result<(), ForgeError> {
        let number = proposal.number.to_string();
        command::run(
            GH_COMMAND,
            self.repo_path(),
            &["pr", "edit", &number, "--body-file", "-"],
            Some(body),
        )?;
        debug!(number = proposal.number, url = %proposal.url, "updated pull request body");
        Ok(())
    }
}

/// Parse `gh pr list --json ...` output
fn parse_pull_requests(json: &str) -> Result<Vec<ProposalData>, ForgeError> {
    let prs: Vec<GhPullRequest> = serde_json::from_str(json)?;
    Ok(prs.into_iter().map(ProposalData::from).collect())
}
