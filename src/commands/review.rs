//! The top-level review flow: resolve the target user, list and clone their
//! repositories, review recent commits, and emit the reports.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::Local;
use clap::ValueEnum;
use commit_rank::Result;
use commit_rank::config::Config;
use commit_rank::git;
use commit_rank::hosting;
use commit_rank::logging;
use commit_rank::reports;
use commit_rank::review::{Analyzer, Review, review_repository};
use indicatif::ProgressBar;
use ohno::{IntoAppError, bail};

const LOG_TARGET: &str = "    driver";

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Debug and above messages
    Debug,
    /// Info, warning, and error messages
    Info,
    /// Warning and error messages
    Warning,
    /// Only error messages
    Error,
}

impl LogLevel {
    const fn filter(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error => "error",
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

/// Command-line arguments for a review run
#[derive(clap::Args, Debug)]
pub struct ReviewArgs {
    /// GitHub username to fetch repositories from [default: inferred from the current checkout]
    #[arg(long, value_name = "NAME")]
    pub github_username: Option<String>,

    /// GitHub personal access token (needed for private repositories)
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Number of recent commits to review per repository
    #[arg(long, short = 'c', value_name = "COUNT")]
    pub commits: Option<usize>,

    /// Output file for the text report [default: auto-generated name in the output directory]
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Gemini API key
    #[arg(long, value_name = "KEY", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Skip PDF generation
    #[arg(long)]
    pub no_pdf: bool,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", ignore_case = true)]
    pub log_level: Option<LogLevel>,

    /// Show what would be done without running any analysis
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the full review flow. Any error returned here is fatal and turns into
/// a non-zero exit.
pub async fn run_review(args: &ReviewArgs) -> Result<()> {
    let config = Config::from_env();
    let level = effective_log_level(args, &config);

    logging::init(level.filter(), &config.log_file, level == LogLevel::Debug)?;

    let Some(username) = resolve_username(args, &config).await else {
        bail!("no GitHub username specified; set DEFAULT_GITHUB_USERNAME in .env or use --github-username");
    };

    git::configure_identity(&config.git_user_name, &config.git_user_email).await;

    let commit_count = args.commits.unwrap_or(config.default_commit_count);

    if args.dry_run {
        println!("DRY RUN MODE - No actual analysis will be performed");
        println!("Would review {commit_count} commits per repository for GitHub user {username}");
        return Ok(());
    }

    let analyzer = Analyzer::new(args.api_key.clone(), config.max_diff_size)?;
    let hosting = hosting::Provider::new(args.github_token.as_deref())?;

    let repos = hosting.list_repos(&username).await;
    if repos.is_empty() {
        bail!("no repositories found on GitHub for user '{username}'");
    }

    let all_reviews = review_all(args, &analyzer, &repos, commit_count, level).await?;
    if all_reviews.is_empty() {
        bail!("no commits were analyzed for user '{username}'");
    }

    reports::print_summary(&all_reviews);

    let output_dir = config.resolve_output_dir()?;
    let output_file = text_report_path(args, &output_dir, &username);

    let mut report = String::new();
    reports::text::generate(&all_reviews, &config, level.name(), &mut report)?;

    if let Err(e) = reports::text::persist(&report, &output_file) {
        log::error!(target: LOG_TARGET, "Error saving report to {output_file}: {e:#}");
    }

    if !args.no_pdf {
        log::info!(target: LOG_TARGET, "Starting PDF generation");

        if let Some(pdf_path) = reports::pdf::generate(&all_reviews, &report, &output_dir, &username, &config) {
            println!("Enhanced PDF saved to: {pdf_path}");
        }
    }

    println!("Analysis complete!");
    println!("All files saved to: {output_dir}");
    println!("Text report: {}", output_file.file_name().unwrap_or(output_file.as_str()));
    println!("Log file: {}", config.log_file);

    log::info!(target: LOG_TARGET, "Application completed successfully");
    Ok(())
}

/// Clone each repository into a fresh subdirectory of one shared scratch
/// directory and review it. Clone failures skip that repository; the scratch
/// directory is removed at the end of the run no matter what.
async fn review_all(args: &ReviewArgs, analyzer: &Analyzer, repos: &[url::Url], commit_count: usize, level: LogLevel) -> Result<Vec<Review>> {
    let scratch = tempfile::tempdir().into_app_err("unable to create scratch directory")?;
    let scratch_path = Utf8Path::from_path(scratch.path())
        .into_app_err("scratch directory path is not valid UTF-8")?
        .to_owned();

    log::info!(target: LOG_TARGET, "Created temporary directory: {scratch_path}");

    let progress = if matches!(level, LogLevel::Warning | LogLevel::Error) {
        ProgressBar::new(repos.len().try_into().unwrap_or(u64::MAX))
    } else {
        ProgressBar::hidden()
    };

    let mut all_reviews = Vec::new();

    for (index, clone_url) in repos.iter().enumerate() {
        let repo_name = git::repo_name_from_url(clone_url);
        let dest = scratch_path.join(&repo_name);

        log::info!(target: LOG_TARGET, "Processing repository {}/{}: {repo_name}", index + 1, repos.len());
        progress.set_message(repo_name);

        if git::clone_repository(clone_url, &dest, args.github_token.as_deref()).await {
            all_reviews.extend(review_repository(analyzer, &dest, commit_count).await);
        }

        progress.inc(1);
    }

    progress.finish_and_clear();

    match scratch.close() {
        Ok(()) => log::info!(target: LOG_TARGET, "Cleaned up temporary directory: {scratch_path}"),
        Err(e) => log::warn!(target: LOG_TARGET, "Could not clean up temporary directory {scratch_path}: {e}"),
    }

    Ok(all_reviews)
}

fn effective_log_level(args: &ReviewArgs, config: &Config) -> LogLevel {
    if let Some(level) = args.log_level {
        return level;
    }

    config
        .log_level
        .as_deref()
        .and_then(|raw| LogLevel::from_str(raw, true).ok())
        .unwrap_or(LogLevel::Info)
}

async fn resolve_username(args: &ReviewArgs, config: &Config) -> Option<String> {
    if let Some(username) = &args.github_username {
        return Some(username.clone());
    }

    if let Some(username) = &config.default_username {
        return Some(username.clone());
    }

    git::infer_username().await
}

fn text_report_path(args: &ReviewArgs, output_dir: &Utf8Path, username: &str) -> Utf8PathBuf {
    match &args.output {
        Some(path) if path.is_absolute() => path.clone(),
        Some(path) => output_dir.join(path),
        None => output_dir.join(format!("commit_review_{username}_{}.txt", reports::file_stamp(&Local::now()))),
    }
}
