use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::index::types::{HTML_FIELD, IndexArtifact, IndexOutcome, Projection};
use crate::index::writer::write_artifact;
use crate::render::Renderer;
use crate::utils::{CollationKey, SiteConfig};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use tracing::{error, info, warn};

/// Defined entries, ordered by title (case-insensitive, hyphen kept)
pub fn defined_entries(entries: &[Entry]) -> Vec<&Entry> {
    let mut defined: Vec<&Entry> = entries.iter().filter(|entry| entry.defined).collect();
    defined.sort_by_cached_key(|entry| CollationKey::new(&entry.title));
    defined
}

/// Public record for one entry: metadata without excluded fields, plus rendered HTML
pub fn project(entry: &Entry, renderer: &dyn Renderer, excluded: &[String]) -> Projection {
    let mut projection: Projection = entry
        .metadata
        .iter()
        .filter(|(key, _)| !excluded.iter().any(|field| field == *key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    projection.insert(
        HTML_FIELD.to_string(),
        renderer.render(&entry.content).into(),
    );
    projection
}

/// Build the slug map from already-ordered entries
///
/// Rendering runs in parallel; insertion follows `entries` order so a
/// duplicate slug keeps the position of its first entry and the value of its
/// last. With `strict` set, a duplicate is an error instead.
pub fn assemble(
    entries: &[&Entry],
    renderer: &dyn Renderer,
    excluded: &[String],
    strict: bool,
) -> Result<(IndexArtifact, Vec<String>)> {
    if strict {
        check_unique_slugs(entries)?;
    }

    let projections: Vec<Projection> = entries
        .par_iter()
        .map(|entry| project(entry, renderer, excluded))
        .collect();

    let mut artifact = IndexArtifact::with_capacity(entries.len());
    let mut duplicates = Vec::new();

    for (entry, projection) in entries.iter().zip(projections) {
        if artifact.insert(entry.slug.clone(), projection).is_some() {
            warn!(
                slug = %entry.slug,
                source = %entry.source.display(),
                "duplicate slug, later entry wins"
            );
            duplicates.push(entry.slug.clone());
        }
    }

    Ok((artifact, duplicates))
}

fn check_unique_slugs(entries: &[&Entry]) -> Result<()> {
    let mut seen: HashMap<&str, &Path> = HashMap::new();

    for entry in entries {
        if let Some(first) = seen.insert(&entry.slug, &entry.source) {
            return Err(Error::DuplicateSlug {
                slug: entry.slug.clone(),
                first: first.to_path_buf(),
                second: entry.source.clone(),
            });
        }
    }

    Ok(())
}

/// Filter, sort, project and persist the lookup index
///
/// A failed write is logged and reported through `persisted`; the sorted
/// entries and the in-memory artifact are returned either way.
pub fn build_index<'a>(
    entries: &'a [Entry],
    renderer: &dyn Renderer,
    config: &SiteConfig,
) -> Result<IndexOutcome<'a>> {
    let defined = defined_entries(entries);
    let (artifact, duplicates) = assemble(
        &defined,
        renderer,
        &config.excluded_fields,
        config.strict_slugs,
    )?;

    let path = config.artifact_path();
    let persisted = match write_artifact(&artifact, &path) {
        Ok(()) => {
            info!(
                entries = artifact.len(),
                path = %path.display(),
                "wrote lookup index"
            );
            true
        }
        Err(e) => {
            error!(error = %e, "failed to write lookup index");
            false
        }
    };

    Ok(IndexOutcome {
        entries: defined,
        artifact,
        persisted,
        duplicates,
    })
}
