//! git command execution layer
//!
//! Reads the branch lineage and branch roles from git config.

pub mod constants;
mod executor;
/// Parser module (public for integration testing)
pub mod parser;

pub use executor::GitExecutor;

use thiserror::Error;

use crate::command::CommandError;

/// Errors that can occur when executing git commands
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("HEAD is detached; check out a branch first")]
    DetachedHead,

    #[error(transparent)]
    Command(#[from] CommandError),
}
