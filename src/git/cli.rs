use crate::errors::{MergeError, MergeResult};
use std::path::{Path, PathBuf};
use std::process::Command;

use super::status::parse_branch_list;

/// The git operations the merge workflow relies on.
pub trait GitCli {
    fn repository_path(&self) -> &Path;
    fn is_repository(&self) -> MergeResult<bool>;
    fn current_branch(&self) -> MergeResult<String>;
    fn list_branches(&self, remote: &str) -> MergeResult<Vec<String>>;
    fn is_clean(&self) -> MergeResult<bool>;
    fn pull(&self, remote: &str, branch: &str) -> MergeResult<()>;
    fn checkout(&self, branch: &str) -> MergeResult<()>;
    fn commit_all(&self, message: &str, skip_hooks: bool) -> MergeResult<()>;
    fn merge(&self, branch: &str) -> MergeResult<()>;
    fn push(&self, remote: &str, branch: &str) -> MergeResult<()>;
    fn status_porcelain(&self) -> MergeResult<String>;
}

/// Runs the `git` binary inside the repository directory.
pub struct GitCliImpl {
    path: PathBuf,
}

impl GitCliImpl {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn run_command(&self, args: &[&str]) -> MergeResult<String> {
        let command = format!("git {}", args.join(" "));
        log::debug!("Running `{}` in {}", command, self.path.display());

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.path)
            .output()
            .map_err(|e| MergeError::CommandFailed {
                command: command.clone(),
                cause: format!("Failed to execute git command: {}", e),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // merge reports conflicts on stdout
            let cause = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(MergeError::CommandFailed { command, cause });
        }

        Ok(stdout)
    }
}

impl GitCli for GitCliImpl {
    fn repository_path(&self) -> &Path {
        &self.path
    }

    fn is_repository(&self) -> MergeResult<bool> {
        if !self.path.is_dir() {
            return Ok(false);
        }

        match self.run_command(&["rev-parse", "--is-inside-work-tree"]) {
            Ok(stdout) => Ok(stdout.trim() == "true"),
            Err(MergeError::CommandFailed { ref cause, .. })
                if cause.contains("not a git repository") =>
            {
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    fn current_branch(&self) -> MergeResult<String> {
        let stdout = self.run_command(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        Ok(stdout.trim().to_string())
    }

    fn list_branches(&self, remote: &str) -> MergeResult<Vec<String>> {
        let stdout = self.run_command(&["branch", "-a"])?;
        Ok(parse_branch_list(&stdout, remote))
    }

    fn is_clean(&self) -> MergeResult<bool> {
        Ok(self.status_porcelain()?.trim().is_empty())
    }

    fn pull(&self, remote: &str, branch: &str) -> MergeResult<()> {
        self.run_command(&["pull", remote, branch]).map(|_| ())
    }

    fn checkout(&self, branch: &str) -> MergeResult<()> {
        self.run_command(&["checkout", branch]).map(|_| ())
    }

    fn commit_all(&self, message: &str, skip_hooks: bool) -> MergeResult<()> {
        self.run_command(&["add", "-A"])?;
        let mut args = vec!["commit"];
        if skip_hooks {
            args.push("--no-verify");
        }
        args.extend(["-m", message]);
        self.run_command(&args).map(|_| ())
    }

    fn merge(&self, branch: &str) -> MergeResult<()> {
        self.run_command(&["merge", branch]).map(|_| ())
    }

    fn push(&self, remote: &str, branch: &str) -> MergeResult<()> {
        let refspec = format!("{}:{}", branch, branch);
        self.run_command(&["push", remote, &refspec]).map(|_| ())
    }

    fn status_porcelain(&self) -> MergeResult<String> {
        self.run_command(&["status", "--porcelain"])
    }
}

#[cfg(test)]
pub use mock::MockGitCli;
