//! Configuration stored in `.stackline.toml`
//!
//! Every field is optional; a missing file means defaults everywhere.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::forge::ForgeKind;
use crate::git::constants::keys;
use crate::git::{GitError, GitExecutor};
use crate::model::BranchName;
use crate::stack::{RenderLocation, RenderOptions};
use crate::ui::symbols;

/// File name looked up at the repository root
pub const CONFIG_FILE_NAME: &str = ".stackline.toml";

/// Errors that can occur while loading the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to locate the repository root: {0}")]
    RepositoryRoot(#[from] GitError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub lineage: LineageConfig,
    pub render: RenderConfig,
    pub forge: ForgeConfig,
}

/// Where branch roles and parents come from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LineageConfig {
    /// git config section holding `<prefix>.<branch>.parent` entries
    pub config_prefix: String,
    /// Overrides `git-town.main-branch`
    pub main_branch: Option<String>,
    /// Added to `git-town.perennial-branches`
    pub perennial_branches: Vec<String>,
}

impl Default for LineageConfig {
    fn default() -> Self {
        Self {
            config_prefix: keys::DEFAULT_LINEAGE_PREFIX.to_string(),
            main_branch: None,
            perennial_branches: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub indent_marker: String,
    /// Current branch indicator in proposal bodies
    pub current_branch_indicator: String,
    /// Current branch indicator in terminal output
    pub terminal_indicator: String,
    /// Heading placed above the stack in proposal bodies
    pub heading: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent_marker: symbols::INDENT_MARKER.to_string(),
            current_branch_indicator: symbols::POINT_LEFT.to_string(),
            terminal_indicator: symbols::TERMINAL_INDICATOR.to_string(),
            heading: "### This proposal is part of a stack".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForgeConfig {
    pub kind: ForgeKind,
}

impl Config {
    /// Load `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load [`CONFIG_FILE_NAME`] from the root of the repository `git` runs in
    pub fn discover(git: &GitExecutor) -> Result<Self, ConfigError> {
        let root = git.toplevel()?;
        Self::load(&root.join(CONFIG_FILE_NAME))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render.indent_marker.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "render.indent_marker must not be empty".to_string(),
            ));
        }
        if self.lineage.config_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "lineage.config_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Perennial branches from this file, as branch names
    pub fn perennial_branches(&self) -> Vec<BranchName> {
        self.lineage
            .perennial_branches
            .iter()
            .map(|name| BranchName::from(name.as_str()))
            .collect()
    }

    /// Options for printing a stack in the terminal
    pub fn terminal_options(&self) -> RenderOptions {
        RenderOptions::default()
            .with_location(RenderLocation::Terminal)
            .with_indent_marker(self.render.indent_marker.as_str())
            .with_current_branch_indicator(self.render.terminal_indicator.as_str())
    }

    /// Options for the stack written into proposal descriptions
    pub fn proposal_body_options(&self) -> RenderOptions {
        let options = RenderOptions::default()
            .with_location(RenderLocation::ProposalBody)
            .with_indent_marker(self.render.indent_marker.as_str())
            .with_current_branch_indicator(self.render.current_branch_indicator.as_str());
        if self.render.heading.is_empty() {
            options
        } else {
            options.with_before_text(format!("{}\n\n", self.render.heading))
        }
    }
}
