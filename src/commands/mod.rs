pub mod branches;
pub mod component;
pub mod merge;
