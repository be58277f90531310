//! Branch lineage (parent pointers)

use std::collections::{BTreeMap, HashSet};

use super::BranchName;

/// Parent pointers of all known branches
///
/// A forest: every branch has at most one parent. Branches that only appear
/// as a parent (e.g., `main`) are roots and have no entry of their own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lineage {
    parents: BTreeMap<BranchName, BranchName>,
}

impl Lineage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `parent` as the parent of `child`, replacing any previous entry
    pub fn set_parent(&mut self, child: impl Into<BranchName>, parent: impl Into<BranchName>) {
        self.parents.insert(child.into(), parent.into());
    }

    /// Forget the parent of `branch`
    pub fn remove(&mut self, branch: &BranchName) -> Option<BranchName> {
        self.parents.remove(branch)
    }

    pub fn parent(&self, branch: &BranchName) -> Option<&BranchName> {
        self.parents.get(branch)
    }

    /// Direct children of `branch`, sorted by name
    pub fn children(&self, branch: &BranchName) -> Vec<BranchName> {
        self.parents
            .iter()
            .filter(|(_, parent)| *parent == branch)
            .map(|(child, _)| child.clone())
            .collect()
    }

    /// Ancestors of `branch`, root first and direct parent last
    ///
    /// Stops at the first repeated branch so a cyclic entry cannot loop forever.
    pub fn ancestors(&self, branch: &BranchName) -> Vec<BranchName> {
        let mut seen = HashSet::from([branch.clone()]);
        let mut ancestors = Vec::new();
        let mut current = branch;
        while let Some(parent) = self.parent(current) {
            if !seen.insert(parent.clone()) {
                break;
            }
            ancestors.push(parent.clone());
            current = parent;
        }
        ancestors.reverse();
        ancestors
    }

    /// All transitive children of `branch` (depth-first, children sorted by name)
    pub fn descendants(&self, branch: &BranchName) -> Vec<BranchName> {
        LineageQuery::descendants(self, branch)
    }

    /// Branches that are a parent but have no parent themselves
    pub fn roots(&self) -> Vec<BranchName> {
        let mut roots: Vec<BranchName> = self
            .parents
            .values()
            .filter(|parent| !self.parents.contains_key(*parent))
            .cloned()
            .collect();
        roots.sort();
        roots.dedup();
        roots
    }

    /// Every branch mentioned by the lineage, as child or as parent
    pub fn branches(&self) -> Vec<BranchName> {
        let mut branches: Vec<BranchName> = self
            .parents
            .keys()
            .chain(self.parents.values())
            .cloned()
            .collect();
        branches.sort();
        branches.dedup();
        branches
    }

    /// Number of parent entries
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Read-only lineage queries consumed by the tree builder and the proposal builder
pub trait LineageQuery {
    fn parent(&self, branch: &BranchName) -> Option<BranchName>;
    fn children(&self, branch: &BranchName) -> Vec<BranchName>;
    fn ancestors(&self, branch: &BranchName) -> Vec<BranchName>;

    /// All transitive children of `branch`, depth-first
    ///
    /// Walks [`children`](Self::children); a branch reached twice is visited once.
    fn descendants(&self, branch: &BranchName) -> Vec<BranchName> {
        let mut seen = HashSet::from([branch.clone()]);
        let mut result = Vec::new();
        let mut pending = self.children(branch);
        pending.reverse();
        while let Some(next) = pending.pop() {
            if !seen.insert(next.clone()) {
                continue;
            }
            let mut children = self.children(&next);
            children.reverse();
            pending.extend(children);
            result.push(next);
        }
        result
    }
}

impl LineageQuery for Lineage {
    fn parent(&self, branch: &BranchName) -> Option<BranchName> {
        Lineage::parent(self, branch).cloned()
    }

    fn children(&self, branch: &BranchName) -> Vec<BranchName> {
        Lineage::children(self, branch)
    }

    fn ancestors(&self, branch: &BranchName) -> Vec<BranchName> {
        Lineage::ancestors(self, branch)
    }
}

impl<C, P> FromIterator<(C, P)> for Lineage
where
    C: Into<BranchName>,
    P: Into<BranchName>,
{
    fn from_iter<I: IntoIterator<Item = (C, P)>>(iter: I) -> Self {
        let mut lineage = Lineage::new();
        for (child, parent) in iter {
            lineage.set_parent(child, parent);
        }
        lineage
    }
}
