use crate::{
    cancel::CancellationToken,
    config::Config,
    errors::{MergeError, Result},
    git::{GitCli, GitCliImpl},
    merge::{MergeOrchestrator, MergeRequest},
    store::JsonFileStore,
};
use clap::Args;
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct Merge {
    /// Repository to operate on
    #[arg(short = 'C', long, default_value = ".")]
    pub repo: PathBuf,

    /// Branch to merge through the integration chain, defaults to the current branch
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Comma separated integration branches, overrides `branchkit.mergeBranches`
    #[arg(long)]
    pub merge_branches: Option<String>,

    /// Remote to pull from and push to, overrides `branchkit.remote`
    #[arg(long)]
    pub remote: Option<String>,

    /// Commit message prefix, defaults to the last prefix used
    #[arg(long)]
    pub prefix: Option<String>,

    /// Commit pending changes with this message before merging
    #[arg(short, long)]
    pub message: Option<String>,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

impl Merge {
    pub fn execute(&self) -> Result<()> {
        let config = Config::load(&self.repo)?
            .with_overrides(self.merge_branches.as_deref(), self.remote.as_deref());

        let orchestrator = MergeOrchestrator::new(
            GitCliImpl::new(&self.repo),
            JsonFileStore::default_location(),
            config.remote.clone(),
        );

        let starting_branch = match &self.branch {
            Some(branch) => branch.clone(),
            None => {
                if !orchestrator.git.is_repository()? {
                    return Err(MergeError::NotAGitRepository(self.repo.clone()).into());
                }
                orchestrator.git.current_branch()?
            }
        };

        let prefix = match (&self.prefix, &self.message) {
            (Some(prefix), _) => Some(prefix.clone()),
            (None, Some(_)) => orchestrator.last_commit_prefix(),
            (None, None) => None,
        };

        let request = MergeRequest::new(&self.repo, starting_branch, config.merge_branches)
            .with_commit(prefix, self.message.clone());

        if request.is_self_merge() {
            return Err(MergeError::SelfMergeRejected(request.starting_branch).into());
        }
        if request.starting_branch == "HEAD" {
            return Err(MergeError::DetachedHead.into());
        }

        if !self.yes && !confirm(&describe(&request, &config.remote))? {
            log::info!("❌ Merge cancelled by user");
            println!("Merge cancelled");
            return Ok(());
        }

        let cancel = CancellationToken::new();
        match orchestrator.run_auto_merge(&request, &cancel) {
            Ok(()) => {
                println!("🎉 {} merged into {}", request.starting_branch, request.branch_chain.join(", "));
                Ok(())
            }
            Err(MergeError::Cancelled) => {
                println!("Merge cancelled");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Plan shown before anything touches the repository.
fn describe(request: &MergeRequest, remote: &str) -> String {
    let starting = &request.starting_branch;
    let mut plan = format!(
        "Merge '{}' into {}?\n  1. pull {} from {}\n",
        starting,
        request.branch_chain.join(" and "),
        starting,
        remote
    );

    let mut index = 2;
    if let Some(message) = request.full_commit_message() {
        plan.push_str(&format!("  {}. commit \"{}\" and push {}\n", index, message, starting));
        index += 1;
    }
    for step in request.steps() {
        plan.push_str(&format!(
            "  {}. merge {} into {} and push {}\n",
            index, step.source_branch, step.target_branch, step.target_branch
        ));
        index += 1;
    }
    plan.push_str(&format!("  {}. switch back to {}", index, starting));
    plan
}

fn confirm(question: &str) -> Result<bool> {
    print!("{}\nContinue? [y/N] ", question);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
