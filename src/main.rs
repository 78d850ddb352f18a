//! Command driver for the vecta containers.
//!
//! Reads commands from stdin, one per line, executes them against a dynamic array and prints the results to stdout.
//!
//! ```bash
//! vecta [--guarded] [--capacity <N>] [--log-level <level>] [--log-file <path>] [--quiet-console] < commands.txt
//! ```

use std::{
    fs::File,
    io::{self, BufWriter},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use vecta_common::{collections::{DynArr, Sequence}, sync::GuardedDynArr};
use vecta_logging::{get_logger, log_info, log_severe, set_logger, LogCategory, LogLevel, Logger};

mod commands;

use commands::{run, RunSummary, Value};

pub const LOG_CAT: LogCategory = LogCategory::new("Main");

/// Drive a dynamic array with commands read from stdin
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Run the commands against the mutex guarded container
    #[arg(long)]
    guarded: bool,

    /// Initial capacity of the container
    #[arg(short, long, default_value_t = 0)]
    capacity: usize,

    /// Most detailed level that gets logged (severe, error, warning, info, verbose, debug)
    #[arg(long, default_value = "warning")]
    log_level: LogLevel,

    /// Additionally write the log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Don't echo log lines to stderr
    #[arg(long)]
    quiet_console: bool,
}

fn create_logger(args: &Args) -> io::Result<Logger> {
    let logger = Logger::new();
    logger.set_max_level(args.log_level);
    logger.set_log_to_console(!args.quiet_console);

    if let Some(path) = &args.log_file {
        let file = File::create(path)?;
        // Color codes only make sense on a terminal
        logger.set_use_color(false);
        if logger.add_writer(Box::new(BufWriter::new(file))).is_err() {
            return Err(io::Error::new(io::ErrorKind::Other, "no free log writer slot"));
        }
    }
    Ok(logger)
}

fn setup_logger(args: &Args) -> io::Result<()> {
    let logger = create_logger(args)?;
    if set_logger(logger).is_err() {
        return Err(io::Error::new(io::ErrorKind::AlreadyExists, "a logger was already installed"));
    }
    Ok(())
}

fn run_with<S: Sequence<Value>>(mut seq: S) -> io::Result<RunSummary> {
    let stdin = io::stdin().lock();
    let mut stdout = BufWriter::new(io::stdout().lock());
    let mut stderr = io::stderr().lock();
    run(&mut seq, stdin, &mut stdout, &mut stderr)
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = setup_logger(&args) {
        eprintln!("error: failed to set up logging: {err}");
        return ExitCode::FAILURE;
    }

    log_info!(LOG_CAT, "running commands against a {} container with capacity {}", if args.guarded { "guarded" } else { "unsynchronized" }, args.capacity);

    let res = if args.guarded {
        run_with(GuardedDynArr::<Value>::with_capacity(args.capacity))
    } else {
        run_with(DynArr::<Value>::with_capacity(args.capacity))
    };

    let code = match res {
        Ok(summary) => {
            log_info!(LOG_CAT, "executed {} commands, {} failed", summary.executed, summary.failed);
            ExitCode::SUCCESS
        },
        Err(err) => {
            log_severe!(LOG_CAT, "i/o failure: {err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        },
    };

    if let Some(logger) = get_logger() {
        logger.flush();
    }
    code
}
