//! Stack rendering

use std::collections::HashMap;

use crossterm::style::Stylize;

use crate::lineage::{LineageTree, LineageTreeNode};
use crate::model::{BranchName, ProposalData};
use crate::ui::{symbols, theme};

/// Where the rendered stack is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderLocation {
    /// Command output; shows number and title, highlights the current branch
    Terminal,
    /// Proposal description (plain markdown)
    #[default]
    ProposalBody,
}

/// Display options for [`ProposalStackBuilder::build`](super::ProposalStackBuilder::build)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    location: RenderLocation,
    indent_marker: String,
    current_branch_indicator: String,
    before_text: Vec<String>,
    after_text: Vec<String>,
    current_branch: Option<BranchName>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            location: RenderLocation::default(),
            indent_marker: symbols::INDENT_MARKER.to_string(),
            current_branch_indicator: symbols::POINT_LEFT.to_string(),
            before_text: Vec::new(),
            after_text: Vec::new(),
            current_branch: None,
        }
    }
}

impl RenderOptions {
    pub fn with_location(mut self, location: RenderLocation) -> Self {
        self.location = location;
        self
    }

    pub fn with_indent_marker(mut self, marker: impl Into<String>) -> Self {
        self.indent_marker = marker.into();
        self
    }

    pub fn with_current_branch_indicator(mut self, indicator: impl Into<String>) -> Self {
        self.current_branch_indicator = indicator.into();
        self
    }

    /// Text emitted before the stack; repeated calls append in order
    pub fn with_before_text(mut self, text: impl Into<String>) -> Self {
        self.before_text.push(text.into());
        self
    }

    /// Text emitted after the stack; repeated calls append in order
    pub fn with_after_text(mut self, text: impl Into<String>) -> Self {
        self.after_text.push(text.into());
        self
    }

    pub fn with_current_branch(mut self, branch: BranchName) -> Self {
        self.current_branch = Some(branch);
        self
    }

    pub fn location(&self) -> RenderLocation {
        self.location
    }

    pub fn current_branch(&self) -> Option<&BranchName> {
        self.current_branch.as_ref()
    }

    fn is_current(&self, branch: &BranchName) -> bool {
        self.current_branch.as_ref() == Some(branch)
    }
}

/// Render `tree` parent before children
///
/// Exempt branches are listed by name. A non-exempt branch without a recorded
/// proposal ends its subtree: nothing below it is rendered.
pub(super) fn render_stack(
    tree: &LineageTree,
    exempt: &[BranchName],
    proposals: &HashMap<BranchName, Option<ProposalData>>,
    options: &RenderOptions,
) -> String {
    let mut out = String::new();
    for text in &options.before_text {
        out.push_str(text);
    }
    render_node(&mut out, tree.root(), exempt, proposals, options);
    for text in &options.after_text {
        out.push_str(text);
    }
    out
}

fn render_node(
    out: &mut String,
    node: &LineageTreeNode,
    exempt: &[BranchName],
    proposals: &HashMap<BranchName, Option<ProposalData>>,
    options: &RenderOptions,
) {
    let indent = " ".repeat(node.depth() * 2);
    if exempt.contains(node.branch()) {
        out.push_str(&format!(
            "{indent} {} {}\n",
            options.indent_marker,
            node.branch()
        ));
    } else {
        let Some(proposal) = proposals.get(node.branch()).and_then(Option::as_ref) else {
            return;
        };
        out.push_str(&format_proposal(options, &indent, node.branch(), proposal));
    }

    for child in node.children() {
        render_node(out, child, exempt, proposals, options);
    }
}

fn format_proposal(
    options: &RenderOptions,
    indent: &str,
    branch: &BranchName,
    proposal: &ProposalData,
) -> String {
    let marker = &options.indent_marker;
    let is_current = options.is_current(branch);
    match options.location {
        RenderLocation::Terminal => {
            let line = format!(
                "{indent} {marker} PR #{} {} ({})",
                proposal.number, proposal.title, proposal.url
            );
            if is_current {
                let line = format!("{}{line}", options.current_branch_indicator);
                format!("{}\n", line.with(theme::CURRENT_BRANCH))
            } else {
                format!("{line}\n")
            }
        }
        RenderLocation::ProposalBody => {
            if is_current {
                format!(
                    "{indent} {marker} PR {} {}\n",
                    proposal.url, options.current_branch_indicator
                )
            } else {
                format!("{indent} {marker} PR {}\n", proposal.url)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Lineage;

    fn b(name: &str) -> BranchName {
        BranchName::from(name)
    }

    fn proposal(number: u64, branch: &str) -> ProposalData {
        ProposalData {
            number,
            title: format!("Change {branch}"),
            url: format!("https://example.com/pull/{number}"),
            source: b(branch),
            target: b("main"),
            body: None,
        }
    }

    fn table(entries: &[(&str, Option<u64>)]) -> HashMap<BranchName, Option<ProposalData>> {
        entries
            .iter()
            .map(|(branch, number)| (b(branch), number.map(|n| proposal(n, branch))))
            .collect()
    }

    /// main <- a <- b <- c
    fn tree() -> LineageTree {
        let lineage = Lineage::from_iter([("a", "main"), ("b", "a"), ("c", "b")]);
        LineageTree::new(&b("b"), &lineage).unwrap()
    }

    #[test]
    fn test_proposal_body_lines() {
        let proposals = table(&[("main", None), ("a", Some(1)), ("b", Some(2)), ("c", Some(3))]);
        let out = render_stack(&tree(), &[b("main")], &proposals, &RenderOptions::default());
        assert_eq!(
            out,
            " - main\n   - PR https://example.com/pull/1\n     - PR https://example.com/pull/2\n       - PR https://example.com/pull/3\n"
        );
    }

    #[test]
    fn test_proposal_body_current_branch_indicator() {
        let proposals = table(&[("main", None), ("a", Some(1)), ("b", Some(2))]);
        let options = RenderOptions::default()
            .with_current_branch(b("b"))
            .with_current_branch_indicator(":point_left:");
        let out = render_stack(&tree(), &[b("main")], &proposals, &options);
        assert!(out.contains("     - PR https://example.com/pull/2 :point_left:\n"));
        assert!(out.contains("   - PR https://example.com/pull/1\n"));
    }

    #[test]
    fn test_terminal_lines() {
        let proposals = table(&[("main", None), ("a", Some(1))]);
        let options = RenderOptions::default().with_location(RenderLocation::Terminal);
        let out = render_stack(&tree(), &[b("main")], &proposals, &options);
        assert_eq!(
            out,
            " - main\n   - PR #1 Change a (https://example.com/pull/1)\n"
        );
    }

    #[test]
    fn test_terminal_current_branch_prefixed_and_highlighted() {
        let proposals = table(&[("main", None), ("a", Some(1))]);
        let options = RenderOptions::default()
            .with_location(RenderLocation::Terminal)
            .with_current_branch(b("a"))
            .with_current_branch_indicator("*");
        let out = render_stack(&tree(), &[b("main")], &proposals, &options);
        let line = out.lines().nth(1).unwrap();
        assert!(line.contains("*   - PR #1 Change a (https://example.com/pull/1)"));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_missing_proposal_truncates_subtree() {
        // "b" was never resolved, so "c" is hidden even though it has a proposal
        let proposals = table(&[("main", None), ("a", Some(1)), ("c", Some(3))]);
        let out = render_stack(&tree(), &[b("main")], &proposals, &RenderOptions::default());
        assert_eq!(out, " - main\n   - PR https://example.com/pull/1\n");
    }

    #[test]
    fn test_recorded_none_truncates_subtree() {
        let proposals = table(&[("main", None), ("a", None), ("b", Some(2))]);
        let out = render_stack(&tree(), &[b("main")], &proposals, &RenderOptions::default());
        assert_eq!(out, " - main\n");
    }

    #[test]
    fn test_exempt_branch_continues_into_children() {
        let proposals = table(&[("b", Some(2))]);
        let out = render_stack(
            &tree(),
            &[b("main"), b("a")],
            &proposals,
            &RenderOptions::default(),
        );
        assert_eq!(out, " - main\n   - a\n     - PR https://example.com/pull/2\n");
    }

    #[test]
    fn test_before_and_after_text_in_call_order() {
        let options = RenderOptions::default()
            .with_before_text("### Stack\n")
            .with_before_text("\n")
            .with_after_text("\n")
            .with_after_text("_end_");
        let out = render_stack(&tree(), &[], &HashMap::new(), &options);
        assert_eq!(out, "### Stack\n\n\n_end_");
    }

    #[test]
    fn test_custom_indent_marker() {
        let proposals = table(&[("a", Some(1))]);
        let options = RenderOptions::default().with_indent_marker("*");
        let out = render_stack(&tree(), &[b("main")], &proposals, &options);
        assert_eq!(out, " * main\n   * PR https://example.com/pull/1\n");
    }
}
