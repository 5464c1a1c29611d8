//! Logger initialization: every record goes to stderr and to the log file.

use crate::Result;
use camino::Utf8Path;
use ohno::IntoAppError;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};

/// Initialize the global logger.
///
/// `filter` is an `env_logger` level filter string (`RUST_LOG` still wins when
/// set). Records are mirrored to `log_file`, which is opened in append mode so
/// consecutive runs accumulate in one place.
pub fn init(filter: &str, log_file: &Utf8Path, show_target: bool) -> Result<()> {
    if let Some(parent) = log_file.parent()
        && !parent.as_str().is_empty()
    {
        fs::create_dir_all(parent).into_app_err_with(|| format!("unable to create log directory '{parent}'"))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .into_app_err_with(|| format!("unable to open log file '{log_file}'"))?;

    let env = env_logger::Env::default().filter_or("RUST_LOG", filter);

    env_logger::Builder::from_env(env)
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(show_target)
        .target(env_logger::Target::Pipe(Box::new(Tee { file })))
        .try_init()
        .into_app_err("unable to initialize logger")?;

    log::info!("Logging initialized - Level: {filter}, File: {log_file}");
    Ok(())
}

/// Mirrors writes to stderr and the log file.
struct Tee {
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}
