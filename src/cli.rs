use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "marginalia",
    version,
    about = "Sort colored PDF annotations into per-color markdown note files"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
pub struct GlobalOpts {
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[arg(
        long,
        value_name = "PATH",
        default_value = "./config.json",
        help = "JSON configuration file with the MainFolder output directory"
    )]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(about = "Extract annotations and write one markdown file per color")]
    Extract(ExtractArgs),
    #[command(about = "List annotations and their classified colors without writing files")]
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    #[arg(value_name = "PDF", help = "PDF document to scan for annotations")]
    pub file_path: PathBuf,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[arg(value_name = "PDF", help = "PDF document to scan for annotations")]
    pub file_path: PathBuf,
}
