//! Terminal output for the table of contents and build summaries

use crate::filters::link_target;
use crate::index::IndexOutcome;
use crate::toc::Bucket;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn stdout(color: bool) -> StandardStream {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Print the buckets with their entries and anchors
pub fn print_table_of_contents(buckets: &[Bucket], color: bool) -> io::Result<()> {
    let mut out = stdout(color);
    write_table_of_contents(&mut out, buckets)
}

/// Write the table of contents to any color-capable writer
pub fn write_table_of_contents<W: WriteColor>(out: &mut W, buckets: &[Bucket]) -> io::Result<()> {
    for (i, bucket) in buckets.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }

        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
        write!(out, "{}", bucket.title)?;
        out.reset()?;
        writeln!(out, " ({})", bucket.definitions.len())?;

        for entry in &bucket.definitions {
            write!(out, "  {}", entry.title)?;
            out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
            writeln!(out, "  {}", link_target(&entry.slug))?;
            out.reset()?;
        }
    }

    Ok(())
}

/// Print the result of `lexis build`
pub fn print_build_summary(
    loaded: usize,
    buckets: &[Bucket],
    outcome: &IndexOutcome,
    artifact_path: &std::path::Path,
    color: bool,
) -> io::Result<()> {
    let mut out = stdout(color);
    let listed: usize = buckets.iter().map(|b| b.definitions.len()).sum();

    writeln!(out, "Loaded {} definitions", loaded)?;
    writeln!(out, "Table of contents: {} listed", listed)?;
    for bucket in buckets {
        writeln!(out, "  {:4} {}", bucket.title, bucket.definitions.len())?;
    }
    writeln!(out, "Lookup index: {} defined", outcome.artifact.len())?;

    if !outcome.duplicates.is_empty() {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        writeln!(
            out,
            "Duplicate slugs (last entry kept): {}",
            outcome.duplicates.join(", ")
        )?;
        out.reset()?;
    }

    if outcome.persisted {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        writeln!(out, "Index stored at: {}", artifact_path.display())?;
    } else {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        writeln!(out, "Index could not be written to {}", artifact_path.display())?;
    }
    out.reset()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{Entry, Metadata};
    use crate::toc::categorize;
    use std::path::PathBuf;
    use termcolor::NoColor;

    #[test]
    fn test_write_table_of_contents() {
        let entries: Vec<Entry> = [("Ally", "ally"), ("-ish", "ish")]
            .iter()
            .map(|(title, slug)| Entry {
                title: title.to_string(),
                slug: slug.to_string(),
                defined: true,
                skip_in_table_of_content: false,
                metadata: Metadata::new(),
                content: String::new(),
                source: PathBuf::new(),
            })
            .collect();
        let buckets = categorize(&entries);

        let mut out = NoColor::new(Vec::new());
        write_table_of_contents(&mut out, &buckets).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();

        assert!(text.starts_with("# (0)\n\nA–E (1)\n  Ally  #ally\n"));
        assert!(text.contains("F–L (1)\n  -ish  #ish\n"));
        assert!(text.ends_with("T–Z (0)\n"));
    }
}
