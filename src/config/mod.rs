pub mod config;

pub use config::{Config, DEFAULT_COMMIT_COUNT, DEFAULT_MAX_DIFF_SIZE};
