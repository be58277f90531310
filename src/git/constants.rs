//! git-specific constants
//!
//! Centralized definitions for git command names, flags, and config keys.

/// git command binary name
pub const GIT_COMMAND: &str = "git";

/// git subcommands
pub mod commands {
    pub const CONFIG: &str = "config";
    pub const SYMBOLIC_REF: &str = "symbolic-ref";
    pub const REV_PARSE: &str = "rev-parse";
}

/// git command flags
pub mod flags {
    /// List config entries whose key matches a regex
    pub const GET_REGEXP: &str = "--get-regexp";
    /// Read a single config value
    pub const GET: &str = "--get";
    /// Short ref name (`main` instead of `refs/heads/main`)
    pub const SHORT: &str = "--short";
    /// Symbolic ref read by `current_branch`
    pub const HEAD: &str = "HEAD";
    /// Absolute path of the working tree root
    pub const SHOW_TOPLEVEL: &str = "--show-toplevel";
}

/// git config keys written by git-town
pub mod keys {
    /// Default section holding `<section>.<branch>.parent` entries
    pub const DEFAULT_LINEAGE_PREFIX: &str = "git-town-branch";
    /// Variable name of a parent entry
    pub const PARENT_SUFFIX: &str = "parent";
    /// Configured main branch
    pub const MAIN_BRANCH: &str = "git-town.main-branch";
    /// Space separated perennial branches
    pub const PERENNIAL_BRANCHES: &str = "git-town.perennial-branches";
}

/// Error detection patterns in git output
pub mod errors {
    /// Pattern indicating not a git repository
    pub const NOT_A_REPO: &str = "not a git repository";
    /// Pattern indicating HEAD is detached
    pub const NOT_A_SYMBOLIC_REF: &str = "is not a symbolic ref";
}

/// Exit code of `git config --get*` when no entry matches
pub const CONFIG_NOT_FOUND_EXIT_CODE: i32 = 1;
