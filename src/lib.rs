//! stackline - stacked pull request lineage for git branch stacks
//!
//! This library provides:
//! - [`model`]: Branch names, lineage and proposals
//! - [`lineage`]: Lineage tree construction
//! - [`stack`]: Proposal resolution, stack rendering and body splicing
//! - [`forge`]: Forge connectors
//! - [`git`]: git command execution and parsing
//! - [`config`]: `.stackline.toml` configuration
//! - [`logging`]: Tracing setup
//! - [`ui`]: Terminal symbols and colors

pub mod command;
pub mod config;
pub mod forge;
pub mod git;
pub mod lineage;
pub mod logging;
pub mod model;
pub mod stack;
pub mod ui;
