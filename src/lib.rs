pub mod cli;
pub mod collect;
mod commands;
pub mod config;
pub mod palette;
pub mod pdf;
pub mod report;

use anyhow::Result;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt;

use crate::{
    cli::Cli,
    commands::{CommandContext, run_command},
};

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let max = match cli.global.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    fmt().with_max_level(max).without_time().try_init().ok();

    let context = CommandContext {
        config_path: cli.global.config.clone(),
    };

    run_command(cli.command, context)
}
