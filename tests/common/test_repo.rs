//! TestRepo helper for integration tests.
//!
//! Provides a temporary git repository with git-town style branch lineage.

use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Whether a `git` binary can be executed
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// A temporary git repository for testing.
///
/// The repository is automatically cleaned up when the TestRepo is dropped.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new git repository with one commit on `main`.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let repo = Self { dir };
        repo.git(&["init", "--quiet", "--initial-branch=main"]);
        repo.git(&["config", "user.name", "Test"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["commit", "--quiet", "--allow-empty", "-m", "initial"]);
        repo
    }

    /// Get the path to the repository root.
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Execute a git command in this repository.
    ///
    /// # Panics
    ///
    /// Panics if the command fails to execute or returns a non-zero exit code.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .output()
            .expect("Failed to execute git command");

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!(
                "git {:?} failed with exit code {:?}:\n{}",
                args,
                output.status.code(),
                stderr
            );
        }

        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Mark `branch` as the main branch
    pub fn set_main_branch(&self, branch: &str) {
        self.git(&["config", "git-town.main-branch", branch]);
    }

    /// Set the perennial branches (space separated)
    pub fn set_perennial_branches(&self, branches: &str) {
        self.git(&["config", "git-town.perennial-branches", branches]);
    }

    /// Create `branch` on top of `parent` and record the parent
    pub fn create_child_branch(&self, branch: &str, parent: &str) {
        self.git(&["branch", branch, parent]);
        self.set_parent(branch, parent);
    }

    /// Record `parent` as the parent of `branch`
    pub fn set_parent(&self, branch: &str, parent: &str) {
        let key = format!("git-town-branch.{branch}.parent");
        self.git(&["config", &key, parent]);
    }

    pub fn checkout(&self, branch: &str) {
        self.git(&["checkout", "--quiet", branch]);
    }

    /// Write a file in the repository.
    pub fn write_file(&self, name: &str, content: &str) {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }
}
