use crate::error::{Error, Result};
use crate::index::types::{IndexArtifact, Projection};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Read-only view of a persisted lookup index
#[derive(Debug)]
pub struct IndexReader {
    path: PathBuf,
    artifact: IndexArtifact,
    modified: Option<SystemTime>,
}

impl IndexReader {
    /// Load an artifact written by [`crate::index::write_artifact`]
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let modified = file.metadata().and_then(|m| m.modified()).ok();

        let artifact: IndexArtifact =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| Error::Json {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            artifact,
            modified,
        })
    }

    /// Wrap an artifact that is already in memory
    pub fn from_artifact(path: PathBuf, artifact: IndexArtifact) -> Self {
        Self {
            path,
            artifact,
            modified: None,
        }
    }

    pub fn get(&self, slug: &str) -> Option<&Projection> {
        self.artifact.get(slug)
    }

    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.artifact.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Projection)> {
        self.artifact.iter().map(|(slug, p)| (slug.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.artifact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifact.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }
}
