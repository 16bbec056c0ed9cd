mod baseline;
mod checksum;
mod cli;
mod collect;
mod ops;
mod reconcile;
mod report;

use baseline::Baseline;
use cli::{Cli, Command, LogLevel};
use std::fmt as stdfmt;
use std::io::{IsTerminal, stderr};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{Event, Level, Subscriber, error, info};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt as tracing_fmt;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;

struct BasewardExitCode;

impl BasewardExitCode {
    /// Exit code used by `check --exit-code` when a file is not intact.
    fn changes_found() -> ExitCode {
        ExitCode::from(1)
    }

    /// Exit code used for missing arguments and unknown commands.
    fn usage_error() -> ExitCode {
        ExitCode::from(1)
    }

    /// Exit code used for other errors (failing to save the baseline, etc.).
    fn any_error() -> ExitCode {
        ExitCode::from(255)
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are not errors and go to stdout.
            let is_error = err.use_stderr();
            let _ = err.print();
            return if is_error {
                BasewardExitCode::usage_error()
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.verbose, cli.log_level);

    if let Some(directory) = cli.directory
        && let Err(e) = std::env::set_current_dir(&directory)
    {
        error!(
            "Failed to change directory to {}: {}",
            directory.display(),
            e
        );
        return BasewardExitCode::any_error();
    }

    let db = cli.db;

    let result: anyhow::Result<ExitCode> = match cli.command {
        Command::Add { paths } => handle_add(&db, &paths),
        Command::Check { all, exit_code } => handle_check(&db, all, exit_code),
        Command::List => handle_list(&db),
        Command::Remove { paths } => handle_remove(&db, &paths),
        Command::Update { paths } => handle_update(&db, &paths),
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(err) => {
            error!("{err}");
            BasewardExitCode::any_error()
        }
    }
}

fn save(baseline: &Baseline) -> anyhow::Result<()> {
    baseline.save()?;
    info!(
        "Saved {} record(s) to {}",
        baseline.len(),
        baseline.path().display()
    );
    Ok(())
}

fn handle_add(db: &Path, paths: &[PathBuf]) -> anyhow::Result<ExitCode> {
    let mut baseline = Baseline::load(db);
    let result = ops::add_paths(&mut baseline, paths)?;
    save(&baseline)?;

    if !result.missing.is_empty() || !result.failed.is_empty() {
        info!(
            "Skipped {} missing input(s) and {} unreadable file(s)",
            result.missing.len(),
            result.failed.len()
        );
    }

    report::print_lines(&report::format_add_result(&result));

    Ok(ExitCode::SUCCESS)
}

fn handle_check(db: &Path, all: bool, exit_code: bool) -> anyhow::Result<ExitCode> {
    let baseline = Baseline::load(db);
    let check = reconcile::check_baseline(&baseline);

    report::print_lines(&report::format_check_report(&check, all));

    if exit_code && !check.counts().all_intact() {
        return Ok(BasewardExitCode::changes_found());
    }

    Ok(ExitCode::SUCCESS)
}

fn handle_list(db: &Path) -> anyhow::Result<ExitCode> {
    let baseline = Baseline::load(db);

    report::print_lines(&report::format_listing(&baseline));

    Ok(ExitCode::SUCCESS)
}

fn handle_remove(db: &Path, paths: &[PathBuf]) -> anyhow::Result<ExitCode> {
    let mut baseline = Baseline::load(db);
    let result = ops::remove_paths(&mut baseline, paths)?;
    save(&baseline)?;

    report::print_lines(&report::format_remove_result(&result));

    Ok(ExitCode::SUCCESS)
}

fn handle_update(db: &Path, paths: &[PathBuf]) -> anyhow::Result<ExitCode> {
    let explicit = !paths.is_empty();

    let mut baseline = Baseline::load(db);
    let result = ops::update_paths(&mut baseline, explicit.then_some(paths))?;
    save(&baseline)?;

    if !result.failed.is_empty() {
        info!(
            "{} file(s) could not be read and kept their previous baseline",
            result.failed.len()
        );
    }

    report::print_lines(&report::format_update_result(&result, explicit));

    Ok(ExitCode::SUCCESS)
}

/// Pick the log filter: an explicit `--log-level` wins, then `-v`, then
/// `RUST_LOG`, then the default of `warn`.
fn log_filter(verbose: u8, log_level: Option<LogLevel>) -> Option<&'static str> {
    match (log_level, verbose) {
        (Some(level), _) => Some(level.as_filter()),
        (None, 0) => None,
        (None, 1) => Some("info"),
        (None, _) => Some("debug"),
    }
}

fn init_tracing(verbose: u8, log_level: Option<LogLevel>) {
    let stderr_is_terminal = stderr().is_terminal();
    let formatter = EmojiFormatter { stderr_is_terminal };

    let filter = match log_filter(verbose, log_level) {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let fmt_layer = tracing_fmt::layer()
        .event_format(formatter)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

struct EmojiFormatter {
    stderr_is_terminal: bool,
}

impl<S, N> FormatEvent<S, N> for EmojiFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> stdfmt::Result {
        if self.stderr_is_terminal {
            match *event.metadata().level() {
                Level::INFO => write!(writer, "ℹ️ ")?,
                Level::WARN => write!(writer, "⚠️  ")?,
                Level::ERROR => write!(writer, "❌️ ")?,
                _ => write!(writer, "🔍 ")?,
            }
        } else {
            match *event.metadata().level() {
                Level::DEBUG => writer.write_str("DEBUG: ")?,
                Level::INFO => writer.write_str("INFO: ")?,
                Level::WARN => writer.write_str("WARN: ")?,
                Level::ERROR => writer.write_str("ERROR: ")?,
                _ => writer.write_str("TRACE: ")?,
            }
        }

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
