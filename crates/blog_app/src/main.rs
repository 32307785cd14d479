mod cli;
mod commands;
mod config;

use std::process::ExitCode;

use blog_logging::{blog_error, LogDestination};
use clap::Parser;
use log::LevelFilter;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let destination = match cli.log_file.clone() {
        Some(path) => LogDestination::Both(path),
        None => LogDestination::Terminal,
    };
    blog_logging::initialize(destination, level);

    let result = config::load_site_config(&cli.config)
        .and_then(|site| commands::run(cli.command, &site, &mut std::io::stdout()));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            blog_error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
