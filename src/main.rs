use clap::Parser;
use std::{io, process::ExitCode};

use crate::{config::Config, shell::Shell};

mod config;
mod data;
mod error;
mod filter;
mod loader;
mod report;
mod shell;
mod stats;
mod trips;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::from(config::Args::parse());
    log::debug!("Using {config:?}");

    let stdin = io::stdin();
    let mut shell = Shell::new(&config, stdin.lock(), io::stdout());

    match shell.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
