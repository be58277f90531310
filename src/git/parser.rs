//! Parsers for `git config` output

use std::sync::LazyLock;

use regex::Regex;

use super::constants::keys;
use crate::model::{BranchName, Lineage};

/// Regex for one line of `git config --get-regexp` output
/// Format: `<key> <value>`
/// Example: `git-town-branch.feature-x.parent main`
///
/// Groups:
/// 1. key (no whitespace)
/// 2. value (rest of the line)
static CONFIG_ENTRY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+)\s+(.+?)\s*$").expect("Invalid config entry regex"));

/// POSIX regex matching the parent keys below `prefix`, for `git config --get-regexp`
pub fn lineage_key_pattern(prefix: &str) -> String {
    format!(
        r"^{}\..*\.{}$",
        prefix.replace('.', r"\."),
        keys::PARENT_SUFFIX
    )
}

/// Parse `git config --get-regexp '^<prefix>\..*\.parent$'` output into a lineage
///
/// Lines that do not belong to `prefix` or have an empty branch name are skipped.
/// Keys may contain dots inside the branch name (`<prefix>.release.v1.2.parent`).
pub fn parse_lineage(output: &str, prefix: &str) -> Lineage {
    let key_start = format!("{prefix}.");
    let key_end = format!(".{}", keys::PARENT_SUFFIX);

    output
        .lines()
        .filter_map(|line| {
            let caps = CONFIG_ENTRY_REGEX.captures(line)?;
            let key = caps.get(1)?.as_str();
            let parent = caps.get(2)?.as_str();
            let child = key.strip_prefix(&key_start)?.strip_suffix(&key_end)?;
            if child.is_empty() {
                return None;
            }
            Some((BranchName::from(child), BranchName::from(parent)))
        })
        .collect()
}

/// Parse a whitespace separated branch list (e.g., `git-town.perennial-branches`)
pub fn parse_branch_list(value: &str) -> Vec<BranchName> {
    value.split_whitespace().map(BranchName::from).collect()
}
