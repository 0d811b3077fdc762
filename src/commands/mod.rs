use std::path::PathBuf;

use anyhow::Result;

use crate::cli::Command;

pub mod extract;
pub mod inspect;

#[derive(Clone)]
pub struct CommandContext {
    pub config_path: PathBuf,
}

pub fn run_command(command: Command, ctx: CommandContext) -> Result<()> {
    match command {
        Command::Extract(args) => extract::handle(args, &ctx),
        Command::Inspect(args) => inspect::handle(args, &ctx),
    }
}
