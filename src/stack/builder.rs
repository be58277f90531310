//! Proposal stack builder
//!
//! Collects the proposal of each branch of a stack, one connector call per
//! branch, and renders the result by walking the lineage tree.

use std::collections::HashMap;

use tracing::debug;

use super::StackError;
use super::render::{RenderOptions, render_stack};
use crate::forge::{Connector, FindProposal};
use crate::lineage::LineageTree;
use crate::model::{BranchName, LineageQuery, ProposalData};

/// Builder for the proposal information of a branch stack
///
/// Created with [`ProposalStackBuilder::new`]. When the connector cannot look
/// up proposals the builder is [`ProposalStackBuilder::Disabled`]: adding
/// branches succeeds, lookups find nothing and [`build`](Self::build)
/// returns `None`.
pub enum ProposalStackBuilder<'a> {
    Connected(ConnectedStack<'a>),
    Disabled,
}

/// State of a builder whose connector can find proposals
pub struct ConnectedStack<'a> {
    lineage: &'a dyn LineageQuery,
    finder: &'a dyn FindProposal,
    exempt: Vec<BranchName>,
    /// `None` = exempt or parentless; missing key = never added
    proposals: HashMap<BranchName, Option<ProposalData>>,
}

impl<'a> ProposalStackBuilder<'a> {
    /// `exempt` branches are listed by name and never looked up
    pub fn new(
        connector: Option<&'a dyn Connector>,
        lineage: &'a dyn LineageQuery,
        exempt: Vec<BranchName>,
    ) -> Self {
        match connector.and_then(|connector| connector.proposal_finder()) {
            Some(finder) => Self::Connected(ConnectedStack {
                lineage,
                finder,
                exempt,
                proposals: HashMap::new(),
            }),
            None => {
                debug!("connector cannot find proposals, stack display disabled");
                Self::Disabled
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Connected(_))
    }

    /// Resolve and record the proposal of `branch`
    ///
    /// Exempt and parentless branches are recorded without asking the
    /// connector. Adding a branch again replaces its previous entry. On error
    /// the table is left unchanged.
    pub fn add_branch(&mut self, branch: &BranchName) -> Result<(), StackError> {
        let Self::Connected(stack) = self else {
            return Ok(());
        };

        let parent = match stack.lineage.parent(branch) {
            Some(parent) if !stack.exempt.contains(branch) => parent,
            _ => {
                stack.proposals.insert(branch.clone(), None);
                return Ok(());
            }
        };

        let proposal = stack
            .finder
            .find_proposal(branch, &parent)
            .map_err(|source| StackError::FindProposal {
                branch: branch.clone(),
                source,
            })?
            .ok_or_else(|| StackError::ProposalNotFound {
                branch: branch.clone(),
            })?;

        debug!(%branch, %parent, number = proposal.number, "found proposal");
        stack.proposals.insert(branch.clone(), Some(proposal));
        Ok(())
    }

    /// Recorded proposal of `branch`
    ///
    /// `None` both for branches recorded without a proposal and for branches
    /// never added; use [`is_resolved`](Self::is_resolved) to tell them apart.
    pub fn proposal(&self, branch: &BranchName) -> Option<&ProposalData> {
        match self {
            Self::Connected(stack) => stack.proposals.get(branch).and_then(Option::as_ref),
            Self::Disabled => None,
        }
    }

    /// Whether `branch` has been added (with or without a proposal)
    pub fn is_resolved(&self, branch: &BranchName) -> bool {
        match self {
            Self::Connected(stack) => stack.proposals.contains_key(branch),
            Self::Disabled => false,
        }
    }

    pub fn is_exempt(&self, branch: &BranchName) -> bool {
        match self {
            Self::Connected(stack) => stack.exempt.contains(branch),
            Self::Disabled => false,
        }
    }

    /// Whether rendering `tree` lists `branch`
    ///
    /// Rendering stops below a non-exempt branch without a recorded proposal,
    /// so every branch from the root down to `branch` must be exempt or have one.
    pub fn is_rendered(&self, tree: &LineageTree, branch: &BranchName) -> bool {
        let Self::Connected(stack) = self else {
            return false;
        };
        tree.path_to(branch).is_some_and(|path| {
            path.into_iter().all(|step| {
                stack.exempt.contains(step)
                    || matches!(stack.proposals.get(step), Some(Some(_)))
            })
        })
    }

    /// Render `tree` with the recorded proposals, `None` when disabled
    pub fn build(&self, tree: &LineageTree, options: &RenderOptions) -> Option<String> {
        match self {
            Self::Connected(stack) => Some(render_stack(
                tree,
                &stack.exempt,
                &stack.proposals,
                options,
            )),
            Self::Disabled => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::forge::ForgeError;
    use crate::model::Lineage;
    use crate::stack::RenderLocation;

    fn b(name: &str) -> BranchName {
        BranchName::from(name)
    }

    fn proposal(number: u64, branch: &str, target: &str) -> ProposalData {
        ProposalData {
            number,
            title: format!("Change {branch}"),
            url: format!("https://github.com/acme/app/pull/{number}"),
            source: b(branch),
            target: b(target),
            body: None,
        }
    }

    /// Connector answering from a fixed table and recording every call
    #[derive(Default)]
    struct FakeForge {
        proposals: Vec<ProposalData>,
        failing: Vec<BranchName>,
        calls: RefCell<Vec<(BranchName, BranchName)>>,
    }

    impl FindProposal for FakeForge {
        fn find_proposal(
            &self,
            branch: &BranchName,
            target: &BranchName,
        ) -> Result<Option<ProposalData>, ForgeError> {
            self.calls
                .borrow_mut()
                .push((branch.clone(), target.clone()));
            if self.failing.contains(branch) {
                return Err(ForgeError::UnsupportedService);
            }
            Ok(self
                .proposals
                .iter()
                .find(|p| &p.source == branch && &p.target == target)
                .cloned())
        }
    }

    impl Connector for FakeForge {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn proposal_finder(&self) -> Option<&dyn FindProposal> {
            Some(self)
        }
    }

    /// Connector without any capability
    struct BareForge;

    impl Connector for BareForge {
        fn name(&self) -> &'static str {
            "bare"
        }
    }

    fn lineage() -> Lineage {
        Lineage::from_iter([("a", "main"), ("b", "a"), ("c", "b")])
    }

    fn forge() -> FakeForge {
        FakeForge {
            proposals: vec![
                proposal(1, "a", "main"),
                proposal(2, "b", "a"),
                proposal(3, "c", "b"),
            ],
            ..FakeForge::default()
        }
    }

    #[test]
    fn test_exempt_branch_skips_connector() {
        let lineage = lineage();
        let forge = forge();
        let mut builder = ProposalStackBuilder::new(Some(&forge), &lineage, vec![b("a")]);

        builder.add_branch(&b("a")).unwrap();

        assert!(forge.calls.borrow().is_empty());
        assert!(builder.is_resolved(&b("a")));
        assert!(builder.proposal(&b("a")).is_none());
    }

    #[test]
    fn test_parentless_branch_skips_connector() {
        let lineage = lineage();
        let forge = forge();
        let mut builder = ProposalStackBuilder::new(Some(&forge), &lineage, Vec::new());

        builder.add_branch(&b("main")).unwrap();

        assert!(forge.calls.borrow().is_empty());
        assert!(builder.is_resolved(&b("main")));
        assert!(builder.proposal(&b("main")).is_none());
    }

    #[test]
    fn test_add_branch_records_proposal() {
        let lineage = lineage();
        let forge = forge();
        let mut builder = ProposalStackBuilder::new(Some(&forge), &lineage, vec![b("main")]);

        builder.add_branch(&b("b")).unwrap();

        assert_eq!(forge.calls.borrow().as_slice(), &[(b("b"), b("a"))]);
        assert_eq!(builder.proposal(&b("b")).unwrap().number, 2);
        assert!(!builder.is_resolved(&b("c")));
    }

    #[test]
    fn test_connector_failure_is_wrapped() {
        let lineage = lineage();
        let forge = FakeForge {
            failing: vec![b("b")],
            ..forge()
        };
        let mut builder = ProposalStackBuilder::new(Some(&forge), &lineage, Vec::new());
        builder.add_branch(&b("a")).unwrap();

        let err = builder.add_branch(&b("b")).unwrap_err();

        assert!(matches!(err, StackError::FindProposal { ref branch, .. } if branch == "b"));
        assert!(err.to_string().starts_with("failed to find proposal for branch b:"));
        assert!(!builder.is_resolved(&b("b")));
        assert_eq!(builder.proposal(&b("a")).unwrap().number, 1);
    }

    #[test]
    fn test_missing_proposal_is_an_error() {
        let lineage = Lineage::from_iter([("orphan", "main")]);
        let forge = forge();
        let mut builder = ProposalStackBuilder::new(Some(&forge), &lineage, Vec::new());

        let err = builder.add_branch(&b("orphan")).unwrap_err();

        assert!(matches!(err, StackError::ProposalNotFound { ref branch } if branch == "orphan"));
        assert_eq!(err.to_string(), "no proposal found for branch \"orphan\"");
        assert!(!builder.is_resolved(&b("orphan")));
    }

    #[test]
    fn test_readding_replaces_entry() {
        let mut lineage = lineage();
        let forge = FakeForge {
            proposals: vec![proposal(2, "b", "a"), proposal(7, "b", "main")],
            ..FakeForge::default()
        };
        {
            let mut builder = ProposalStackBuilder::new(Some(&forge), &lineage, Vec::new());
            builder.add_branch(&b("b")).unwrap();
            builder.add_branch(&b("b")).unwrap();
            assert_eq!(builder.proposal(&b("b")).unwrap().number, 2);
        }

        lineage.set_parent("b", "main");
        let mut builder = ProposalStackBuilder::new(Some(&forge), &lineage, Vec::new());
        builder.add_branch(&b("b")).unwrap();
        assert_eq!(builder.proposal(&b("b")).unwrap().number, 7);
        builder.add_branch(&b("b")).unwrap();
        assert_eq!(builder.proposal(&b("b")).unwrap().number, 7);
    }

    #[test]
    fn test_exemption_checked_before_lookup() {
        let lineage = lineage();
        let forge = forge();
        let mut builder = ProposalStackBuilder::new(Some(&forge), &lineage, vec![b("b")]);

        builder.add_branch(&b("b")).unwrap();

        assert!(forge.calls.borrow().is_empty());
        assert!(builder.is_exempt(&b("b")));
        assert!(builder.proposal(&b("b")).is_none());
    }

    #[test]
    fn test_disabled_without_finder() {
        let lineage = lineage();
        let tree = LineageTree::new(&b("c"), &lineage).unwrap();
        let mut builder = ProposalStackBuilder::new(Some(&BareForge), &lineage, Vec::new());

        assert!(!builder.is_enabled());
        builder.add_branch(&b("c")).unwrap();
        assert!(builder.proposal(&b("c")).is_none());
        assert!(!builder.is_resolved(&b("c")));
        assert_eq!(builder.build(&tree, &RenderOptions::default()), None);
    }

    #[test]
    fn test_disabled_without_connector() {
        let lineage = lineage();
        let builder = ProposalStackBuilder::new(None, &lineage, Vec::new());
        assert!(!builder.is_enabled());
    }

    #[test]
    fn test_build_walks_tree() {
        let lineage = lineage();
        let forge = forge();
        let tree = LineageTree::new(&b("b"), &lineage).unwrap();
        let mut builder = ProposalStackBuilder::new(Some(&forge), &lineage, vec![b("main")]);
        for branch in tree.branches() {
            builder.add_branch(branch).unwrap();
        }

        let rendered = builder
            .build(
                &tree,
                &RenderOptions::default().with_location(RenderLocation::ProposalBody),
            )
            .unwrap();

        assert_eq!(
            rendered,
            " - main\n   - PR https://github.com/acme/app/pull/1\n     - PR https://github.com/acme/app/pull/2\n       - PR https://github.com/acme/app/pull/3\n"
        );
    }

    #[test]
    fn test_is_rendered_follows_tree_path() {
        let lineage = lineage();
        let forge = FakeForge {
            proposals: vec![proposal(1, "a", "main"), proposal(3, "c", "b")],
            ..FakeForge::default()
        };
        let tree = LineageTree::new(&b("a"), &lineage).unwrap();
        let mut builder = ProposalStackBuilder::new(Some(&forge), &lineage, vec![b("main")]);
        for branch in tree.branches() {
            let _ = builder.add_branch(branch);
        }

        assert!(builder.is_rendered(&tree, &b("main")));
        assert!(builder.is_rendered(&tree, &b("a")));
        assert!(!builder.is_rendered(&tree, &b("b")));
        assert!(
            !builder.is_rendered(&tree, &b("c")),
            "c sits below b, which has no proposal"
        );
        assert!(!builder.is_rendered(&tree, &b("unknown")));
    }
}
