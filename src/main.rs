//! A tool that reviews the quality of a GitHub user's recent commits with AI assistance.
//!
//! # Overview
//!
//! `commit-rank` fetches a GitHub user's repositories, pulls the most recent
//! commits from each, sends every commit's diff to the Gemini review endpoint,
//! and compiles the reviews into a text report and (optionally) a styled PDF.
//!
//! # Quick Start
//!
//! ```bash
//! export GEMINI_API_KEY=...
//! commit-rank --github-username octocat
//! ```
//!
//! Without an API key the tool still runs, producing a report in which every
//! commit is marked `N/A` instead of carrying a numeric score.
//!
//! # Basic Usage
//!
//! **Review another user's public repositories:**
//! ```bash
//! commit-rank --github-username octocat --commits 10
//! ```
//!
//! **Include private repositories:**
//! ```bash
//! export GITHUB_TOKEN=ghp_xxxxxxxxxxxxxxxxxxxx
//! commit-rank --github-username octocat
//! ```
//!
//! **Pick the report file name and skip the PDF:**
//! ```bash
//! commit-rank --github-username octocat --output review.txt --no-pdf
//! ```
//!
//! When no username is given, it is inferred from `DEFAULT_GITHUB_USERNAME`,
//! the current checkout's `origin` remote, or the global `github.user` git
//! setting, in that order.
//!
//! # Configuration
//!
//! Settings come from the environment (a `.env` file in the working directory
//! is honored):
//!
//! - `GEMINI_API_KEY`: review service credential
//! - `GITHUB_TOKEN`: GitHub access token
//! - `DEFAULT_GITHUB_USERNAME`: fallback target user
//! - `MAX_DIFF_SIZE`: diff characters sent per commit (default 3000)
//! - `DEFAULT_COMMIT_COUNT`: commits reviewed per repository (default 5)
//! - `LOG_LEVEL`, `LOG_FILE`: diagnostics (default INFO, `app.log`)
//! - `GIT_USER_NAME`, `GIT_USER_EMAIL`: git identity used during the run
//! - `OUTPUT_DIR`, `CONTAINER_OUTPUT_DIR`: where report files land
//!
//! # Reports
//!
//! Each run produces a UTF-8 text report and, unless `--no-pdf` is given, a
//! PDF. File names embed the username and a timestamp. PDF rendering tries
//! the markdown renderer first (needs a Liberation TTF family on disk) and
//! falls back to the built-in-font document renderer; both are optional cargo
//! features (`markdown-pdf`, `document-pdf`, on by default).
//!
//! # Exit Codes
//!
//! - `0`: success, or the run was interrupted with Ctrl-C
//! - `1`: no username could be resolved, the user has no repositories, no
//!   commits could be analyzed, or an unexpected error occurred

use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use std::process::ExitCode;

mod commands;

use crate::commands::{ReviewArgs, run_review};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "commit-rank", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(flatten)]
    args: ReviewArgs,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    tokio::select! {
        result = run_review(&cli.args) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("{e:#}");
                eprintln!("Error: {e}");
                eprintln!("Check the log file for detailed error information.");
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            println!("Analysis interrupted by user");
            log::info!("Application interrupted by user");
            ExitCode::SUCCESS
        }
    }
}
