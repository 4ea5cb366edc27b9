pub mod cli;
pub mod status;

pub use cli::{GitCli, GitCliImpl};
pub use status::conflicted_paths;

#[cfg(test)]
pub mod fixture;
