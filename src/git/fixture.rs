// Throwaway repositories driven by the real git binary

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A working clone at `work/` whose `origin` is a bare repository at `remote.git/`.
///
/// `base`, `dev`, `sit` and `feature-x` all start at the commit adding
/// `a.txt` and are pushed; `feature-x` is checked out.
pub struct TestRepo {
    _dir: TempDir,
    pub work: PathBuf,
}

pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

impl TestRepo {
    pub fn with_remote() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let remote = dir.path().join("remote.git");
        let work = dir.path().join("work");

        git(dir.path(), &["init", "--bare", remote.to_str().unwrap()]);
        std::fs::create_dir(&work).unwrap();
        git(&work, &["init"]);
        for (key, value) in [
            ("user.name", "Branchkit Test"),
            ("user.email", "test@example.com"),
            ("commit.gpgsign", "false"),
            ("pull.rebase", "false"),
        ] {
            git(&work, &["config", key, value]);
        }
        git(&work, &["remote", "add", "origin", remote.to_str().unwrap()]);

        let repo = Self { _dir: dir, work };
        repo.git(&["checkout", "-b", "base"]);
        repo.write("a.txt", "one\n");
        repo.commit("initial");
        repo.git(&["branch", "dev"]);
        repo.git(&["branch", "sit"]);
        repo.git(&["checkout", "-b", "feature-x"]);
        repo.git(&["push", "origin", "base", "dev", "sit", "feature-x"]);
        repo
    }

    pub fn git(&self, args: &[&str]) -> String {
        git(&self.work, args)
    }

    pub fn write(&self, name: &str, content: &str) {
        std::fs::write(self.work.join(name), content).unwrap();
    }

    pub fn commit(&self, message: &str) {
        self.git(&["add", "-A"]);
        self.git(&["commit", "-m", message]);
    }

    pub fn last_subject(&self, rev: &str) -> String {
        self.git(&["log", "-1", "--format=%s", rev]).trim().to_string()
    }
}
