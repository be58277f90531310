//! Stack sync planning
//!
//! Every proposal of a stack carries the stack in its description, with its
//! own branch marked as current.

use tracing::{debug, info, warn};

use super::builder::ProposalStackBuilder;
use super::render::RenderOptions;
use super::splice::splice_stack_into_body;
use super::update::ProposalUpdateBody;
use crate::lineage::LineageTree;

/// Body updates needed to bring every proposal of `tree` up to date
///
/// Branches are visited in tree discovery order. Proposals whose body already
/// contains the current stack produce no update, and neither do proposals the
/// stack cannot reach because an ancestor has no proposal.
pub fn plan_body_updates(
    tree: &LineageTree,
    builder: &ProposalStackBuilder<'_>,
    options: &RenderOptions,
) -> Vec<ProposalUpdateBody> {
    let mut updates = Vec::new();
    for branch in tree.branches() {
        let Some(proposal) = builder.proposal(branch) else {
            continue;
        };
        if !builder.is_rendered(tree, branch) {
            warn!(
                %branch,
                number = proposal.number,
                "an ancestor has no proposal, so the stack would not list this branch; skipping"
            );
            continue;
        }
        let branch_options = options.clone().with_current_branch(branch.clone());
        let Some(rendered) = builder.build(tree, &branch_options) else {
            continue;
        };

        let current_body = proposal.body.as_deref().unwrap_or_default();
        let new_body = splice_stack_into_body(current_body, rendered.trim_end());
        if new_body == current_body {
            debug!(%branch, number = proposal.number, "proposal body already up to date");
            continue;
        }

        let Some(location) = proposal.location() else {
            warn!(%branch, number = proposal.number, "proposal has no usable location, skipping");
            continue;
        };
        info!(%branch, number = proposal.number, "planned proposal body update");
        updates.push(ProposalUpdateBody {
            proposal: location,
            updated_body: Some(new_body),
        });
    }
    updates
}
