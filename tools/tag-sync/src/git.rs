//! Thin git wrapper.
//!
//! Shells out to the `git` binary; failures surface the command's stderr
//! instead of an opaque exit status.

use std::path::{Path, PathBuf};
use std::process::Command;

use maskwork_common::{MaskworkError, MaskworkResult};

/// A git repository rooted at a local directory.
#[derive(Debug)]
pub struct GitRepo {
    repo_path: PathBuf,
}

impl GitRepo {
    /// Open an existing repository.
    pub fn open(repo_path: impl AsRef<Path>) -> MaskworkResult<Self> {
        let path = repo_path.as_ref().to_path_buf();
        if !path.join(".git").exists() {
            return Err(MaskworkError::tag(format!(
                "{} is not a git repository",
                path.display()
            )));
        }
        Ok(Self { repo_path: path })
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Run a git command in the repository, returning stdout.
    pub fn run(&self, args: &[&str]) -> MaskworkResult<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .map_err(|e| MaskworkError::tag(format!("failed to invoke git: {e}")))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            Err(MaskworkError::tag(format!(
                "git {} failed: {}",
                args.first().unwrap_or(&""),
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }

    /// Whether a tag with this exact name exists.
    pub fn tag_exists(&self, name: &str) -> MaskworkResult<bool> {
        let listing = self.run(&["tag", "--list", name])?;
        Ok(listing.lines().any(|line| line.trim() == name))
    }

    /// The commit `HEAD` points at.
    pub fn head_commit(&self) -> MaskworkResult<String> {
        Ok(self.run(&["rev-parse", "HEAD"])?.trim().to_string())
    }

    /// Resolve an arbitrary revision to a commit hash.
    pub fn resolve_commit(&self, rev: &str) -> MaskworkResult<String> {
        Ok(self
            .run(&["rev-parse", "--verify", &format!("{rev}^{{commit}}")])?
            .trim()
            .to_string())
    }

    /// Create an annotated tag pointing at `commit`.
    pub fn create_tag(&self, name: &str, message: &str, commit: &str) -> MaskworkResult<()> {
        self.run(&["tag", "-a", name, "-m", message, commit])?;
        Ok(())
    }

    /// Push one tag to `origin`.
    pub fn push_tag(&self, name: &str) -> MaskworkResult<()> {
        self.run(&["push", "origin", name])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_rejects_non_repositories() {
        let dir = tempfile::tempdir().unwrap();
        let err = GitRepo::open(dir.path()).unwrap_err();
        assert!(err.to_string().contains("not a git repository"));
    }
}
