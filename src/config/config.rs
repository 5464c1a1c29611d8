//! Run configuration sourced from the process environment.

use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use directories::BaseDirs;
use ohno::IntoAppError;
use std::env;
use std::fs;

const LOG_TARGET: &str = "    config";

/// Maximum number of diff characters forwarded to the review service.
pub const DEFAULT_MAX_DIFF_SIZE: usize = 3000;

/// Number of recent commits reviewed per repository.
pub const DEFAULT_COMMIT_COUNT: usize = 5;

const DEFAULT_LOG_FILE: &str = "app.log";
const DEFAULT_GIT_USER_NAME: &str = "GitHub PR Reviewer";
const DEFAULT_GIT_USER_EMAIL: &str = "reviewer@localhost";

/// Directory name used when no explicit output directory is configured.
const DEFAULT_OUTPUT_SUBDIR: &str = "commit-rank-reports";

/// Marker path whose presence indicates a containerized run.
const CONTAINER_MARKER: &str = "/app";

/// Settings read once at startup from the environment (after `.env` loading).
///
/// Credentials (`GEMINI_API_KEY`, `GITHUB_TOKEN`) are not held here; they flow
/// through the CLI layer, which falls back to the same environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// `MAX_DIFF_SIZE`
    pub max_diff_size: usize,

    /// `DEFAULT_COMMIT_COUNT`
    pub default_commit_count: usize,

    /// `LOG_LEVEL`, unparsed; the CLI flag takes precedence
    pub log_level: Option<String>,

    /// `LOG_FILE`
    pub log_file: Utf8PathBuf,

    /// `GIT_USER_NAME`
    pub git_user_name: String,

    /// `GIT_USER_EMAIL`
    pub git_user_email: String,

    /// `DEFAULT_GITHUB_USERNAME`
    pub default_username: Option<String>,

    /// `OUTPUT_DIR`
    pub output_dir: Option<Utf8PathBuf>,

    /// `CONTAINER_OUTPUT_DIR`, honored only when running in a container
    pub container_output_dir: Option<Utf8PathBuf>,
}

impl Config {
    /// Read the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            max_diff_size: numeric_var("MAX_DIFF_SIZE", DEFAULT_MAX_DIFF_SIZE),
            default_commit_count: numeric_var("DEFAULT_COMMIT_COUNT", DEFAULT_COMMIT_COUNT),
            log_level: non_empty_var("LOG_LEVEL"),
            log_file: non_empty_var("LOG_FILE").map_or_else(|| Utf8PathBuf::from(DEFAULT_LOG_FILE), Utf8PathBuf::from),
            git_user_name: non_empty_var("GIT_USER_NAME").unwrap_or_else(|| DEFAULT_GIT_USER_NAME.to_owned()),
            git_user_email: non_empty_var("GIT_USER_EMAIL").unwrap_or_else(|| DEFAULT_GIT_USER_EMAIL.to_owned()),
            default_username: non_empty_var("DEFAULT_GITHUB_USERNAME"),
            output_dir: non_empty_var("OUTPUT_DIR").map(Utf8PathBuf::from),
            container_output_dir: non_empty_var("CONTAINER_OUTPUT_DIR").map(Utf8PathBuf::from),
        }
    }

    /// Determine and create the directory report artifacts are written to.
    ///
    /// Preference order: `CONTAINER_OUTPUT_DIR` (when running in a container),
    /// `OUTPUT_DIR`, then a fixed subdirectory of the user's home. If the
    /// preferred directory cannot be created, falls back to a subdirectory of
    /// the current working directory.
    pub fn resolve_output_dir(&self) -> Result<Utf8PathBuf> {
        let preferred = self.preferred_output_dir();

        match fs::create_dir_all(&preferred) {
            Ok(()) => {
                log::info!(target: LOG_TARGET, "Using output directory: {preferred}");
                Ok(preferred)
            }
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Cannot create directory '{preferred}': {e}");

                let fallback = Utf8PathBuf::from(DEFAULT_OUTPUT_SUBDIR);
                fs::create_dir_all(&fallback).into_app_err_with(|| format!("unable to create fallback output directory '{fallback}'"))?;

                log::info!(target: LOG_TARGET, "Using fallback directory: {fallback}");
                Ok(fallback)
            }
        }
    }

    fn preferred_output_dir(&self) -> Utf8PathBuf {
        if let Some(dir) = &self.container_output_dir
            && Utf8Path::new(CONTAINER_MARKER).exists()
        {
            return dir.clone();
        }

        if let Some(dir) = &self.output_dir {
            return dir.clone();
        }

        BaseDirs::new()
            .and_then(|dirs| Utf8PathBuf::from_path_buf(dirs.home_dir().join(DEFAULT_OUTPUT_SUBDIR)).ok())
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT_SUBDIR))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

fn numeric_var(name: &str, default: usize) -> usize {
    parse_numeric(name, env::var(name).ok().as_deref(), default)
}

fn parse_numeric(name: &str, raw: Option<&str>, default: usize) -> usize {
    let Some(raw) = raw else {
        return default;
    };

    match raw.parse() {
        Ok(value) => value,
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Ignoring malformed {name} value '{raw}': {e}");
            default
        }
    }
}
