//! Copilot CLI Binary
//!
//! Command-line front end for the manufacturing copilot.

use clap::Parser;
use mfg_copilot::config::sources::dotenv;
use mfg_copilot::logging::init_logging;
use mfg_copilot::tooling::cli::{Cli, CliContext, DEMO_MODE_HINT};
use std::process;

fn main() {
    let cli = Cli::parse();

    // Credentials may live in .env; load before config so env sources see them.
    dotenv::load(&cli.workdir);

    let context = match CliContext::new(cli.workdir.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    let logging = cli.logging_config(&context.config().logging);
    if let Err(e) = init_logging(Some(&logging)) {
        eprintln!("Warning: {}", e);
    }

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_quota_or_rate_limit() {
                eprintln!("{}", DEMO_MODE_HINT);
            }
            process::exit(1);
        }
    }
}
