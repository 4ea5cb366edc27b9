use crate::{
    cancel::CancellationToken,
    errors::{MergeError, MergeResult},
    git::{conflicted_paths, GitCli},
    store::{KeyValueStore, LAST_COMMIT_PREFIX},
};
use std::path::PathBuf;


/// One invocation of the merge workflow.
#[derive(Debug, Clone)]
pub struct MergeRequest {
    pub repository_path: PathBuf,
    pub starting_branch: String,
    pub commit_prefix: Option<String>,
    pub commit_message: Option<String>,
    pub branch_chain: Vec<String>,
}

/// A single `source -> target` link of the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeStep {
    pub source_branch: String,
    pub target_branch: String,
}

impl MergeRequest {
    pub fn new(
        repository_path: impl Into<PathBuf>,
        starting_branch: impl Into<String>,
        branch_chain: Vec<String>,
    ) -> Self {
        Self {
            repository_path: repository_path.into(),
            starting_branch: starting_branch.into(),
            commit_prefix: None,
            commit_message: None,
            branch_chain,
        }
    }

    pub fn with_commit(mut self, prefix: Option<String>, message: Option<String>) -> Self {
        self.commit_prefix = prefix.filter(|p| !p.trim().is_empty());
        self.commit_message = message.filter(|m| !m.trim().is_empty());
        self
    }

    /// Full commit message, `<prefix> <message>` when a prefix is set.
    pub fn full_commit_message(&self) -> Option<String> {
        let message = self.commit_message.as_deref()?;
        Some(match self.commit_prefix.as_deref() {
            Some(prefix) => format!("{} {}", prefix, message),
            None => message.to_string(),
        })
    }

    /// Pairs the starting branch with each integration branch in order.
    pub fn steps(&self) -> Vec<MergeStep> {
        let mut source = &self.starting_branch;
        self.branch_chain
            .iter()
            .map(|target| {
                let step = MergeStep {
                    source_branch: source.clone(),
                    target_branch: target.clone(),
                };
                source = target;
                step
            })
            .collect()
    }

    pub fn is_self_merge(&self) -> bool {
        self.branch_chain
            .iter()
            .any(|branch| *branch == self.starting_branch)
    }
}

/// Drives the pull, commit, merge and push sequence through the branch chain.
pub struct MergeOrchestrator<G: GitCli, S: KeyValueStore> {
    pub git: G,
    pub store: S,
    remote: String,
}

impl<G: GitCli, S: KeyValueStore> MergeOrchestrator<G, S> {
    pub fn new(git: G, store: S, remote: impl Into<String>) -> Self {
        Self {
            git,
            store,
            remote: remote.into(),
        }
    }

    pub fn last_commit_prefix(&self) -> Option<String> {
        self.store.get(LAST_COMMIT_PREFIX)
    }

    pub fn run_auto_merge(
        &self,
        request: &MergeRequest,
        cancel: &CancellationToken,
    ) -> MergeResult<()> {
        if request.is_self_merge() {
            log::error!(
                "❌ '{}' is part of the integration chain {:?}",
                request.starting_branch,
                request.branch_chain
            );
            return Err(MergeError::SelfMergeRejected(request.starting_branch.clone()));
        }

        // `rev-parse --abbrev-ref HEAD` answers "HEAD" when detached
        if request.starting_branch == "HEAD" {
            return Err(MergeError::DetachedHead);
        }

        if request.repository_path != self.git.repository_path() {
            return Err(MergeError::RepositoryMismatch {
                requested: request.repository_path.clone(),
                actual: self.git.repository_path().to_path_buf(),
            });
        }

        cancel.check()?;

        if !self.git.is_repository()? {
            return Err(MergeError::NotAGitRepository(request.repository_path.clone()));
        }

        cancel.check()?;

        log::info!("🚀 Starting auto merge of {}", request.starting_branch);
        let result = self.merge_chain(request, cancel);

        // git refuses to switch branches with an unmerged index
        if matches!(result, Err(MergeError::MergeConflict { .. })) {
            log::warn!("⚠️  Repository left mid-merge, resolve the conflict and push manually");
        } else {
            self.return_to(&request.starting_branch);
        }

        match result {
            Ok(()) => {
                log::info!("✅ Auto merge completed");
                Ok(())
            }
            Err(MergeError::Cancelled) => {
                log::info!("⏹️  Auto merge cancelled");
                Err(MergeError::Cancelled)
            }
            Err(e) if cancel.is_cancelled() && !matches!(e, MergeError::MergeConflict { .. }) => {
                log::info!("⏹️  Auto merge cancelled ({})", e);
                Err(MergeError::Cancelled)
            }
            Err(e) => {
                log::error!("❌ Auto merge failed: {}", e);
                Err(e)
            }
        }
    }

    fn merge_chain(&self, request: &MergeRequest, cancel: &CancellationToken) -> MergeResult<()> {
        let starting = &request.starting_branch;

        let current = self.git.current_branch()?;
        log::info!("📍 Current branch: {}", current);
        if current != *starting {
            log::info!("🔄 Switching to {}...", starting);
            self.git.checkout(starting)?;
        }

        log::info!("⬇️  Pulling {}...", starting);
        self.git.pull(&self.remote, starting)?;

        if let Some(message) = request.full_commit_message() {
            cancel.check()?;
            self.commit_and_push(starting, &message)?;
            if let Some(prefix) = &request.commit_prefix {
                self.remember_prefix(prefix);
            }
        }

        for step in request.steps() {
            cancel.check()?;
            self.merge_step(&step)?;
        }

        Ok(())
    }

    fn commit_and_push(&self, branch: &str, message: &str) -> MergeResult<()> {
        if self.git.is_clean()? {
            log::info!("ℹ️  Nothing to commit on {}", branch);
            return Ok(());
        }

        log::info!("📝 Committing on {}: {}", branch, message);
        self.git.commit_all(message, true)?;

        log::info!("⬆️  Pushing {}...", branch);
        self.git.push(&self.remote, branch)
    }

    fn merge_step(&self, step: &MergeStep) -> MergeResult<()> {
        let MergeStep {
            source_branch,
            target_branch,
        } = step;

        log::info!("🔄 Switching to {}...", target_branch);
        self.git.checkout(target_branch)?;

        log::info!("⬇️  Pulling {}...", target_branch);
        self.git.pull(&self.remote, target_branch)?;

        log::info!("🔀 Merging {} into {}...", source_branch, target_branch);
        let merged = self.git.merge(source_branch);

        let paths = self.conflicts();
        if !paths.is_empty() {
            log::error!(
                "❌ Conflict merging {} into {}: {}",
                source_branch,
                target_branch,
                paths.join(", ")
            );
            return Err(MergeError::MergeConflict {
                source_branch: source_branch.clone(),
                target_branch: target_branch.clone(),
                paths,
            });
        }
        merged?;

        log::info!("⬆️  Pushing {}...", target_branch);
        self.git.push(&self.remote, target_branch)?;

        log::info!("✅ Merged {} into {}", source_branch, target_branch);
        Ok(())
    }

    /// Conflicted paths of the working tree, empty when status is unavailable.
    fn conflicts(&self) -> Vec<String> {
        match self.git.status_porcelain() {
            Ok(porcelain) => conflicted_paths(&porcelain),
            Err(e) => {
                log::warn!("Cannot inspect working tree status: {}", e);
                Vec::new()
            }
        }
    }

    fn return_to(&self, branch: &str) {
        log::info!("🔄 Switching back to {}...", branch);
        if let Err(e) = self.git.checkout(branch) {
            log::warn!("⚠️  Could not switch back to {}: {}", branch, e);
        }
    }

    fn remember_prefix(&self, prefix: &str) {
        if let Err(e) = self.store.set(LAST_COMMIT_PREFIX, prefix) {
            log::warn!("Cannot remember commit prefix: {}", e);
        }
    }
}
