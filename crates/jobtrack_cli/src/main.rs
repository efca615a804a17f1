//! `jobtrack` entry point.
//!
//! # Responsibility
//! - Parse arguments, start logging and open the database.
//! - Print command errors on stderr as one `Error: ...` line and exit non-zero.
//!
//! Without `--log-dir` or `--log-level` no logger is started, so stderr
//! carries nothing but that error line.

use clap::Parser;
use jobtrack_cli::error::{CliError, CliResult};
use jobtrack_cli::{execute_command, exitcode, Cli};
use jobtrack_core::db::open_db;
use jobtrack_core::{core_version, default_log_level, init_logging, init_stderr_logging};
use log::{info, warn};
use std::io::{self, Write};
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = setup_logging(&cli) {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }

    let code = match run(&cli) {
        Ok(()) => exitcode::OK,
        Err(err) => {
            warn!(
                "event=command_finish module=cli status=error exit_code={} error={err}",
                err.exit_code()
            );
            eprintln!("Error: {err}");
            err.exit_code()
        }
    };
    process::exit(code);
}

/// Opens the database for one command and releases it before returning.
fn run(cli: &Cli) -> CliResult<()> {
    let conn = open_db(&cli.db)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute_command(cli, &conn, &mut out)?;
    out.flush()?;
    info!("event=command_finish module=cli status=ok");
    Ok(())
}

fn setup_logging(cli: &Cli) -> CliResult<()> {
    match &cli.log_dir {
        Some(dir) => {
            let level = cli.log_level.as_deref().unwrap_or(default_log_level());
            let dir = dir.to_str().ok_or_else(|| {
                CliError::Logging(format!("log dir `{}` is not valid UTF-8", dir.display()))
            })?;
            init_logging(level, dir).map_err(CliError::Logging)?;
        }
        None => match &cli.log_level {
            Some(level) => init_stderr_logging(level).map_err(CliError::Logging)?,
            None => return Ok(()),
        },
    }

    info!(
        "event=cli_start module=cli status=ok core_version={} db={}",
        core_version(),
        cli.db.display()
    );
    Ok(())
}
