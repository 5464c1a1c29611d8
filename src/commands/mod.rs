mod review;

pub use review::{ReviewArgs, run_review};
