//! Library console entry point.
//!
//! Startup sequence:
//!   1. Parse command-line arguments
//!   2. Load config (file, then env overrides, then `--log-level`)
//!   3. Init logger
//!   4. Run the menu loop on stdin/stdout

use std::{io, process::ExitCode};

use clap::Parser;
use library_circulation::{
    AppError, CirculationService, cli::Args, clock::SystemClock, config, console::Console, logger,
    observers::EventLogger,
};
use tracing::info;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Wire the ambient stack together and hand control to the console
fn run() -> Result<(), AppError> {
    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let mut config = config::load(args.config.as_deref())?;
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    logger::init(&config.log_level)?;

    info!(
        max_books = config.max_books,
        grace_period_days = config.grace_period_days,
        fine_per_day = %config.fine_per_day(),
        "config loaded"
    );

    let mut library = CirculationService::new(&config, Box::new(SystemClock));
    library.register_observer(Box::new(EventLogger));

    let mut console = Console::new(library, io::stdin().lock(), io::stdout(), args.format);
    console.run()
}
