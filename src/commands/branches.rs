use crate::{
    config::Config,
    errors::{MergeError, Result},
    git::{GitCli, GitCliImpl},
};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct Branches {
    /// Repository to inspect
    #[arg(short = 'C', long, default_value = ".")]
    pub repo: PathBuf,

    /// Remote whose branches are folded into the local names
    #[arg(long)]
    pub remote: Option<String>,
}

impl Branches {
    pub fn execute(&self) -> Result<()> {
        let config = Config::load(&self.repo)?.with_overrides(None, self.remote.as_deref());
        let git = GitCliImpl::new(&self.repo);

        if !git.is_repository()? {
            return Err(MergeError::NotAGitRepository(self.repo.clone()).into());
        }

        let current = git.current_branch()?;
        let branches = git.list_branches(&config.remote).unwrap_or_else(|e| {
            log::warn!("Cannot list branches: {}", e);
            Vec::new()
        });

        println!("Current branch: {}", current);
        println!("Integration chain: {}", config.merge_branches.join(" -> "));
        println!("All branches:");
        for branch in branches {
            if branch == current {
                println!("  - {} (current)", branch);
            } else {
                println!("  - {}", branch);
            }
        }

        Ok(())
    }
}
