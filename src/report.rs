//! Write one markdown notes file per non-empty color bucket.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::collect::{AnnotationRecord, ColorBuckets};

/// Emit `{base_dir}{color}-notes.md` for every non-empty bucket, in catalog
/// order. `base_dir` is prepended as-is, so it should end with a path
/// separator. Stops at the first write failure; later colors stay unwritten.
pub fn write_reports(base_dir: &str, buckets: &ColorBuckets) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for (color, records) in buckets.iter() {
        if records.is_empty() {
            continue;
        }

        let path = PathBuf::from(format!("{base_dir}{color}-notes.md"));
        let document = render_notes(color, records);
        fs::write(&path, document)
            .with_context(|| format!("Failed to write notes file {}", path.display()))?;
        debug!(color, path = %path.display(), records = records.len(), "wrote notes file");
        written.push(path);
    }

    Ok(written)
}

fn render_notes(color: &str, records: &[AnnotationRecord]) -> String {
    let title = format!("{color}-notes");
    let mut out = String::new();

    // Setext title block, then one section per record.
    out.push_str(&title);
    out.push('\n');
    out.push_str(&"=".repeat(title.len()));
    out.push_str("\n\n");
    out.push_str(&format!("# {color} notes\n\n"));

    for record in records {
        out.push_str(&format!("## Page {}: {}\n\n", record.page, record.kind));
        out.push_str(&record.content);
        out.push_str("\n\n");
    }

    out
}
