//! Branch roles
//!
//! Main and perennial branches are long-lived: they are listed by name in a
//! rendered stack and never looked up as proposals.

use tracing::warn;

use crate::model::{BranchName, LineageQuery};

/// Main and perennial branches of a repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchRoles {
    pub main: Option<BranchName>,
    pub perennials: Vec<BranchName>,
}

impl BranchRoles {
    pub fn new(main: Option<BranchName>, perennials: impl IntoIterator<Item = BranchName>) -> Self {
        let mut roles = Self {
            main,
            perennials: Vec::new(),
        };
        for branch in perennials {
            if !roles.perennials.contains(&branch) {
                roles.perennials.push(branch);
            }
        }
        roles
    }

    /// Exempt branches for the stack of `target`, main first
    ///
    /// Without a configured main branch the root of `target`'s lineage (or
    /// `target` itself when it has no parent) takes its place.
    pub fn exempt_for<L>(&self, target: &BranchName, lineage: &L) -> Vec<BranchName>
    where
        L: LineageQuery + ?Sized,
    {
        let main = match &self.main {
            Some(main) => main.clone(),
            None => {
                let root = lineage
                    .ancestors(target)
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| target.clone());
                warn!(%root, "main branch is not configured, using the stack root");
                root
            }
        };

        let mut exempt = vec![main];
        for branch in &self.perennials {
            if !exempt.contains(branch) {
                exempt.push(branch.clone());
            }
        }
        exempt
    }
}
