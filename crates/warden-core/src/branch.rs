//! Resolving the branch a command would run on.
//!
//! The command policy never shells out itself; it asks a [`BranchResolver`].
//! [`GitBranchResolver`] asks git, [`FixedBranch`] answers with a known name
//! (CLI overrides, tests), and any `Fn() -> Result<String>` closure works too.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{Result, WardenError};

/// Source of the current branch name.
pub trait BranchResolver: Send + Sync {
    /// Name of the checked out branch, or an error when it cannot be known.
    fn current_branch(&self) -> Result<String>;
}

impl<F> BranchResolver for F
where
    F: Fn() -> Result<String> + Send + Sync,
{
    fn current_branch(&self) -> Result<String> {
        self()
    }
}

/// Resolves the branch with `git rev-parse --abbrev-ref HEAD`.
///
/// A detached HEAD resolves to the literal name `HEAD`, which is never the
/// trunk branch.
#[derive(Debug, Clone, Default)]
pub struct GitBranchResolver {
    workdir: Option<PathBuf>,
}

impl GitBranchResolver {
    /// Resolver running git in the current working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver running git in `workdir`.
    pub fn in_dir(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(workdir.into()),
        }
    }
}

impl BranchResolver for GitBranchResolver {
    fn current_branch(&self) -> Result<String> {
        let mut cmd = Command::new("git");
        cmd.args(["rev-parse", "--abbrev-ref", "HEAD"])
            .stdin(Stdio::null())
            .stderr(Stdio::null());
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        let output = cmd
            .output()
            .map_err(|e| WardenError::branch(format!("failed to run git: {e}")))?;
        if !output.status.success() {
            return Err(WardenError::branch(format!(
                "git rev-parse exited with {}",
                output.status
            )));
        }

        let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if branch.is_empty() {
            return Err(WardenError::branch("git rev-parse printed no branch"));
        }
        debug!("Current branch: {branch}");
        Ok(branch)
    }
}

/// Resolver that always answers with the same branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedBranch(pub String);

impl FixedBranch {
    pub fn new(branch: impl Into<String>) -> Self {
        Self(branch.into())
    }
}

impl BranchResolver for FixedBranch {
    fn current_branch(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_branch() {
        assert_eq!(FixedBranch::new("main").current_branch().unwrap(), "main");
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = || -> Result<String> { Err(WardenError::branch("not a repository")) };
        let err = resolver.current_branch().unwrap_err();
        assert!(err.to_string().contains("not a repository"));
    }

    #[test]
    fn test_git_resolver_outside_repository_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        // Without a repository (or without git) resolution must fail, never panic.
        assert!(GitBranchResolver::in_dir(dir.path()).current_branch().is_err());
    }
}
