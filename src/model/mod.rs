//! Data models for stackline
//!
//! UI-independent data structures: branch names, the parent-pointer
//! lineage, and proposals as reported by a forge.

mod branch;
mod lineage;
mod proposal;

pub use branch::BranchName;
pub use lineage::{Lineage, LineageQuery};
pub use proposal::{ProposalData, ProposalLocation};
