use anyhow::{Context, Result};

use crate::{
    cli::InspectArgs,
    palette::nearest_color,
    pdf::{Annotation, AnnotationSource, PdfFile},
};

use super::CommandContext;

/// Print every annotation with its classified color, without writing files.
pub fn handle(args: InspectArgs, _ctx: &CommandContext) -> Result<()> {
    let source = PdfFile::open(&args.file_path)
        .with_context(|| format!("Failed to open PDF {}", args.file_path.display()))?;

    let mut total = 0usize;
    for index in 0..source.page_count() {
        let annotations = source.annotations(index)?;
        if annotations.is_empty() {
            continue;
        }

        println!("Page {} ({} annotations):", index + 1, annotations.len());
        for annotation in annotations {
            total += 1;
            match annotation {
                Annotation::Highlight { color, quads } => {
                    println!(
                        "- Highlight rgb({}, {}, {}) -> {} ({} quads)",
                        color[0],
                        color[1],
                        color[2],
                        nearest_color(color).name,
                        quads.len()
                    );
                }
                Annotation::Text { color, contents } => {
                    println!(
                        "- Text rgb({}, {}, {}) -> {}: {}",
                        color[0],
                        color[1],
                        color[2],
                        nearest_color(color).name,
                        preview(&contents)
                    );
                }
                Annotation::Other { subtype } => {
                    println!("- {subtype} (unsupported, would be skipped)");
                }
            }
        }
    }

    if total == 0 {
        println!("No annotations found.");
    }
    Ok(())
}

fn preview(contents: &str) -> String {
    let flat = contents.replace('\n', " ");
    if flat.chars().count() > 60 {
        let mut cut: String = flat.chars().take(60).collect();
        cut.push('…');
        cut
    } else {
        flat
    }
}
