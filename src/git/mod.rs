//! Local git operations: commit listing, diff retrieval, cloning, identity.

pub mod clone;
pub mod commits;
pub mod identity;

pub use clone::{clone_repository, repo_name_from_url};
pub use commits::{Commit, commit_diff, list_recent_commits, short_hash};
pub use identity::{configure_identity, infer_username};
