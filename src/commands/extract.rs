use anyhow::{Context, Result};
use tracing::info;

use crate::{
    cli::ExtractArgs, collect::collect, config::Config, pdf::PdfFile, report::write_reports,
};

use super::CommandContext;

pub fn handle(args: ExtractArgs, ctx: &CommandContext) -> Result<()> {
    let source = PdfFile::open(&args.file_path)
        .with_context(|| format!("Failed to open PDF {}", args.file_path.display()))?;

    let buckets = collect(&source)
        .with_context(|| format!("Failed to scan annotations in {}", args.file_path.display()))?;

    let config = Config::load(&ctx.config_path)?;
    println!("{}", config.main_folder);

    let written = write_reports(&config.main_folder, &buckets)?;

    info!(
        source = %args.file_path.display(),
        annotation_count = buckets.len(),
        file_count = written.len(),
        "wrote color notes"
    );
    Ok(())
}
