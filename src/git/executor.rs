//! git command executor
//!
//! Reads branch lineage and branch configuration from a repository.

use std::path::{Path, PathBuf};

use super::GitError;
use super::constants::{self, commands, errors, flags, keys};
use super::parser::{lineage_key_pattern, parse_branch_list, parse_lineage};
use crate::command::{self, CommandError};
use crate::model::{BranchName, Lineage};

/// Executor for git commands
#[derive(Debug, Clone)]
pub struct GitExecutor {
    /// Path to the repository (None = current directory)
    repo_path: Option<PathBuf>,
}

impl Default for GitExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl GitExecutor {
    /// Create a new executor for the current directory
    pub fn new() -> Self {
        Self { repo_path: None }
    }

    /// Create a new executor for a specific repository path
    pub fn with_repo_path(path: PathBuf) -> Self {
        Self {
            repo_path: Some(path),
        }
    }

    pub fn repo_path(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }

    /// Run a git command with the given arguments
    pub fn run(&self, args: &[&str]) -> Result<String, GitError> {
        command::run(constants::GIT_COMMAND, self.repo_path(), args, None).map_err(|e| match e {
            CommandError::Failed { ref stderr, .. } if stderr.contains(errors::NOT_A_REPO) => {
                GitError::NotARepository
            }
            e => GitError::Command(e),
        })
    }

    /// Name of the checked out branch
    pub fn current_branch(&self) -> Result<BranchName, GitError> {
        match self.run(&[commands::SYMBOLIC_REF, flags::SHORT, flags::HEAD]) {
            Ok(output) => Ok(BranchName::from(output.trim())),
            Err(GitError::Command(CommandError::Failed { stderr, .. }))
                if stderr.contains(errors::NOT_A_SYMBOLIC_REF) =>
            {
                Err(GitError::DetachedHead)
            }
            Err(e) => Err(e),
        }
    }

    /// Root directory of the working tree
    pub fn toplevel(&self) -> Result<PathBuf, GitError> {
        let output = self.run(&[commands::REV_PARSE, flags::SHOW_TOPLEVEL])?;
        Ok(PathBuf::from(output.trim_end_matches(['\n', '\r'])))
    }

    /// Single config value, `None` if the key is not set
    pub fn config_get(&self, key: &str) -> Result<Option<String>, GitError> {
        self.config_query(&[commands::CONFIG, flags::GET, key])
            .map(|value| value.map(|v| v.trim().to_string()))
    }

    /// Parent pointers stored below `prefix` (`<prefix>.<branch>.parent`)
    pub fn lineage(&self, prefix: &str) -> Result<Lineage, GitError> {
        let pattern = lineage_key_pattern(prefix);
        let output = self.config_query(&[commands::CONFIG, flags::GET_REGEXP, &pattern])?;
        Ok(output
            .map(|output| parse_lineage(&output, prefix))
            .unwrap_or_default())
    }

    /// Main branch configured for git-town, if any
    pub fn main_branch(&self) -> Result<Option<BranchName>, GitError> {
        Ok(self
            .config_get(keys::MAIN_BRANCH)?
            .filter(|value| !value.is_empty())
            .map(BranchName::from))
    }

    /// Perennial branches configured for git-town
    pub fn perennial_branches(&self) -> Result<Vec<BranchName>, GitError> {
        Ok(self
            .config_get(keys::PERENNIAL_BRANCHES)?
            .map(|value| parse_branch_list(&value))
            .unwrap_or_default())
    }

    /// `git config` lookups exit with 1 when nothing matches
    fn config_query(&self, args: &[&str]) -> Result<Option<String>, GitError> {
        match self.run(args) {
            Ok(output) => Ok(Some(output)),
            Err(GitError::Command(CommandError::Failed { exit_code, .. }))
                if exit_code == constants::CONFIG_NOT_FOUND_EXIT_CODE =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
