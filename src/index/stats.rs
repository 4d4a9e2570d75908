use crate::index::reader::IndexReader;
use crate::index::types::HTML_FIELD;
use crate::utils::SiteConfig;
use anyhow::{Context, Result};
use std::collections::HashMap;

/// Summary figures for a lookup index
#[derive(Debug, Default, PartialEq)]
pub struct IndexStats {
    pub entries: usize,
    pub empty_bodies: usize,
    pub size_bytes: u64,
    /// Metadata field → number of entries carrying it, most common first
    pub fields: Vec<(String, usize)>,
}

impl IndexStats {
    pub fn collect(reader: &IndexReader) -> Self {
        let mut field_counts: HashMap<&str, usize> = HashMap::new();
        let mut empty_bodies = 0;

        for (_, projection) in reader.entries() {
            for key in projection.keys() {
                *field_counts.entry(key.as_str()).or_insert(0) += 1;
            }
            let body = projection
                .get(HTML_FIELD)
                .and_then(|v| v.as_str())
                .unwrap_or("");
            if body.trim().is_empty() {
                empty_bodies += 1;
            }
        }

        let mut fields: Vec<(String, usize)> = field_counts
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        fields.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let size_bytes = std::fs::metadata(reader.path())
            .map(|m| m.len())
            .unwrap_or(0);

        Self {
            entries: reader.len(),
            empty_bodies,
            size_bytes,
            fields,
        }
    }
}

/// Display lookup index statistics
pub fn show_stats(config: &SiteConfig) -> Result<()> {
    let path = config.artifact_path();
    let reader = IndexReader::open(&path)
        .with_context(|| format!("No lookup index at {}. Run 'lexis build' first.", path.display()))?;
    let stats = IndexStats::collect(&reader);

    println!("Index Statistics");
    println!("================");
    println!();
    println!("Index location:   {}", reader.path().display());
    println!("Entries:          {}", stats.entries);
    println!("Empty bodies:     {}", stats.empty_bodies);
    println!("Index size:       {}", format_size(stats.size_bytes));

    if let Some(modified) = reader.modified() {
        println!("Updated:          {:?}", modified);
    }

    println!();
    println!("Fields:");
    for (field, count) in stats.fields.iter().take(15) {
        println!("  {:24} {}", field, count);
    }
    if stats.fields.len() > 15 {
        println!("  ... and {} more", stats.fields.len() - 15);
    }

    Ok(())
}

/// Format byte size to human readable
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
