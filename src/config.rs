use crate::errors::Result;
use git2::Repository;
use std::path::Path;

const MERGE_BRANCHES_KEY: &str = "branchkit.mergeBranches";
const REMOTE_KEY: &str = "branchkit.remote";

pub const DEFAULT_MERGE_BRANCHES: &str = "dev,sit";
pub const DEFAULT_REMOTE: &str = "origin";

/// Settings read once per run and handed to the merge workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub merge_branches: Vec<String>,
    pub remote: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            merge_branches: parse_merge_branches(DEFAULT_MERGE_BRANCHES),
            remote: DEFAULT_REMOTE.to_string(),
        }
    }
}

impl Config {
    /// Read the repository's git config, or the user's one outside a repository.
    pub fn load(path: &Path) -> Result<Self> {
        let git_config = match Repository::discover(path) {
            Ok(repo) => repo.config()?,
            Err(e) => {
                log::debug!("No repository at {}: {}", path.display(), e);
                git2::Config::open_default()?
            }
        };
        Ok(Self::from_git_config(&git_config))
    }

    pub fn from_git_config(git_config: &git2::Config) -> Self {
        let defaults = Self::default();

        let merge_branches = git_config
            .get_string(MERGE_BRANCHES_KEY)
            .ok()
            .map(|value| parse_merge_branches(&value))
            .filter(|branches| !branches.is_empty())
            .unwrap_or(defaults.merge_branches);

        let remote = git_config
            .get_string(REMOTE_KEY)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|remote| !remote.is_empty())
            .unwrap_or(defaults.remote);

        Self {
            merge_branches,
            remote,
        }
    }

    /// Apply command line overrides on top of the configured values.
    pub fn with_overrides(mut self, merge_branches: Option<&str>, remote: Option<&str>) -> Self {
        if let Some(branches) = merge_branches.map(parse_merge_branches) {
            if !branches.is_empty() {
                self.merge_branches = branches;
            }
        }
        if let Some(remote) = remote.map(str::trim).filter(|r| !r.is_empty()) {
            self.remote = remote.to_string();
        }
        self
    }
}

/// Split a comma separated chain such as `dev, sit` into branch names.
pub fn parse_merge_branches(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|branch| !branch.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_file(dir: &tempfile::TempDir, entries: &[(&str, &str)]) -> git2::Config {
        let path = dir.path().join("gitconfig");
        std::fs::write(&path, "").unwrap();
        let mut config = git2::Config::open(&path).unwrap();
        for (key, value) in entries {
            config.set_str(key, value).unwrap();
        }
        git2::Config::open(&path).unwrap()
    }

    #[test]
    fn test_parse_merge_branches() {
        assert_eq!(parse_merge_branches("dev,sit"), vec!["dev", "sit"]);
        assert_eq!(parse_merge_branches(" dev , ,uat,"), vec!["dev", "uat"]);
        assert!(parse_merge_branches(" , ").is_empty());
    }

    #[test]
    fn test_defaults_without_entries() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_git_config(&config_file(&dir, &[]));
        assert_eq!(config, Config::default());
        assert_eq!(config.merge_branches, vec!["dev", "sit"]);
        assert_eq!(config.remote, "origin");
    }

    #[test]
    fn test_reads_git_config_entries() {
        let dir = tempfile::tempdir().unwrap();
        let git_config = config_file(
            &dir,
            &[(MERGE_BRANCHES_KEY, "develop, staging, uat"), (REMOTE_KEY, "upstream")],
        );

        let config = Config::from_git_config(&git_config);

        assert_eq!(config.merge_branches, vec!["develop", "staging", "uat"]);
        assert_eq!(config.remote, "upstream");
    }

    #[test]
    fn test_blank_chain_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_git_config(&config_file(&dir, &[(MERGE_BRANCHES_KEY, " , ")]));
        assert_eq!(config.merge_branches, vec!["dev", "sit"]);
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(Some("qa"), Some("fork"));
        assert_eq!(config.merge_branches, vec!["qa"]);
        assert_eq!(config.remote, "fork");

        let untouched = Config::default().with_overrides(Some(""), None);
        assert_eq!(untouched, Config::default());
    }
}
