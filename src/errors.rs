use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("'{}' is not a git repository", .0.display())]
    NotAGitRepository(PathBuf),

    #[error("Branch '{0}' is an integration branch and cannot be merged into itself")]
    SelfMergeRejected(String),

    #[error("HEAD is detached, pass the branch to merge with --branch")]
    DetachedHead,

    #[error(
        "Merge requested for '{}' but git runs in '{}'",
        .requested.display(),
        .actual.display()
    )]
    RepositoryMismatch { requested: PathBuf, actual: PathBuf },

    #[error(
        "Conflict while merging '{source_branch}' into '{target_branch}' ({}), resolve it manually",
        .paths.join(", ")
    )]
    MergeConflict {
        source_branch: String,
        target_branch: String,
        paths: Vec<String>,
    },

    #[error("`{command}` failed: {cause}")]
    CommandFailed { command: String, cause: String },

    #[error("Operation cancelled")]
    Cancelled,
}

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Invalid component name: {0}")]
    InvalidName(String),

    #[error("Folder already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("File operation failed on {}: {source}", .path.display())]
    IoFailure {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error(transparent)]
    Scaffold(#[from] ScaffoldError),

    #[error("Git configuration error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
pub type MergeResult<T> = std::result::Result<T, MergeError>;
