//! Lineage tree around a target branch
//!
//! The tree holds the target branch, its ancestor chain and the branches
//! stacked on top of it. [`LineageTree::for_stack`] additionally pulls in
//! parallel stacks that hang off one of the ancestors, so the rendered
//! stack shows siblings and not just the direct line.

use std::collections::HashMap;

use tracing::trace;

use super::LineageError;
use crate::model::{BranchName, LineageQuery};

/// A branch in a [`LineageTree`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineageTreeNode {
    branch: BranchName,
    depth: usize,
    children: Vec<LineageTreeNode>,
}

impl LineageTreeNode {
    pub fn branch(&self) -> &BranchName {
        &self.branch
    }

    /// Distance from the tree root (root = 0)
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Child nodes in discovery order
    pub fn children(&self) -> &[LineageTreeNode] {
        &self.children
    }

    pub fn child_branches(&self) -> Vec<&BranchName> {
        self.children.iter().map(|child| &child.branch).collect()
    }
}

/// Rooted tree of the stack a branch belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineageTree {
    root: LineageTreeNode,
    branches: Vec<BranchName>,
}

impl LineageTree {
    /// Tree of the direct line: ancestors, `target` and everything stacked on `target`
    pub fn new<L>(target: &BranchName, lineage: &L) -> Result<Self, LineageError>
    where
        L: LineageQuery + ?Sized,
    {
        Self::build(target, lineage, None)
    }

    /// Like [`LineageTree::new`], but also includes the other children of every
    /// ancestor (and their descendants) unless they are listed in
    /// `main_and_perennials`
    pub fn for_stack<L>(
        target: &BranchName,
        lineage: &L,
        main_and_perennials: &[BranchName],
    ) -> Result<Self, LineageError>
    where
        L: LineageQuery + ?Sized,
    {
        Self::build(target, lineage, Some(main_and_perennials))
    }

    fn build<L>(
        target: &BranchName,
        lineage: &L,
        excluded: Option<&[BranchName]>,
    ) -> Result<Self, LineageError>
    where
        L: LineageQuery + ?Sized,
    {
        let mut arena = Arena::default();
        let ancestors = lineage.ancestors(target);

        let mut previous = None;
        for ancestor in &ancestors {
            previous = Some(arena.push(ancestor.clone(), previous));
        }
        arena.push(target.clone(), previous);

        let mut candidates = Vec::new();
        if let Some(excluded) = excluded {
            for ancestor in &ancestors {
                for child in lineage.children(ancestor) {
                    if !excluded.contains(&child) && !ancestors.contains(&child) {
                        candidates.push(child);
                    }
                }
            }
        }

        arena.add_children(target, lineage)?;
        for candidate in &candidates {
            arena.add_descendants(candidate, lineage)?;
        }

        trace!(branch = %target, branches = arena.nodes.len(), "built lineage tree");
        Ok(arena.into_tree())
    }

    pub fn root(&self) -> &LineageTreeNode {
        &self.root
    }

    /// All branches in the tree, in discovery order
    pub fn branches(&self) -> &[BranchName] {
        &self.branches
    }

    pub fn contains(&self, branch: &BranchName) -> bool {
        self.branches.contains(branch)
    }

    /// Find the node of `branch`
    pub fn find(&self, branch: &BranchName) -> Option<&LineageTreeNode> {
        self.iter().find(|node| &node.branch == branch)
    }

    /// Nodes in pre-order (parent before children, children in discovery order)
    pub fn iter(&self) -> Nodes<'_> {
        Nodes {
            pending: vec![&self.root],
        }
    }

    /// Branches from the root down to `branch`, both included
    pub fn path_to(&self, branch: &BranchName) -> Option<Vec<&BranchName>> {
        let mut path = Vec::new();
        collect_path(&self.root, branch, &mut path).then_some(path)
    }
}

fn collect_path<'a>(
    node: &'a LineageTreeNode,
    branch: &BranchName,
    path: &mut Vec<&'a BranchName>,
) -> bool {
    path.push(&node.branch);
    if &node.branch == branch
        || node
            .children
            .iter()
            .any(|child| collect_path(child, branch, path))
    {
        return true;
    }
    path.pop();
    false
}

/// Pre-order iterator over the nodes of a [`LineageTree`]
pub struct Nodes<'a> {
    pending: Vec<&'a LineageTreeNode>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a LineageTreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.pending.pop()?;
        self.pending.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Index-based node storage used while the tree is assembled
#[derive(Default)]
struct Arena {
    nodes: Vec<ArenaNode>,
    visited: HashMap<BranchName, usize>,
}

struct ArenaNode {
    branch: BranchName,
    depth: usize,
    children: Vec<usize>,
}

impl Arena {
    fn push(&mut self, branch: BranchName, parent: Option<usize>) -> usize {
        let depth = parent.map_or(0, |index| self.nodes[index].depth + 1);
        let index = self.nodes.len();
        self.visited.insert(branch.clone(), index);
        self.nodes.push(ArenaNode {
            branch,
            depth,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(index);
        }
        index
    }

    /// Attach `branch` under its lineage parent, then walk its children
    fn add_descendants<L>(&mut self, branch: &BranchName, lineage: &L) -> Result<(), LineageError>
    where
        L: LineageQuery + ?Sized,
    {
        if self.visited.contains_key(branch) {
            return Ok(());
        }
        let parent = lineage
            .parent(branch)
            .and_then(|parent| self.visited.get(&parent).copied())
            .ok_or_else(|| LineageError::Malformed {
                branch: branch.clone(),
            })?;
        self.push(branch.clone(), Some(parent));
        self.add_children(branch, lineage)
    }

    fn add_children<L>(&mut self, branch: &BranchName, lineage: &L) -> Result<(), LineageError>
    where
        L: LineageQuery + ?Sized,
    {
        for child in lineage.children(branch) {
            self.add_descendants(&child, lineage)?;
        }
        Ok(())
    }

    fn into_tree(self) -> LineageTree {
        let branches = self.nodes.iter().map(|node| node.branch.clone()).collect();
        LineageTree {
            root: self.node(0),
            branches,
        }
    }

    fn node(&self, index: usize) -> LineageTreeNode {
        let node = &self.nodes[index];
        LineageTreeNode {
            branch: node.branch.clone(),
            depth: node.depth,
            children: node.children.iter().map(|&child| self.node(child)).collect(),
        }
    }
}
