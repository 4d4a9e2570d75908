use crate::entry::Entry;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Field holding the rendered body in a projection
pub const HTML_FIELD: &str = "html";

/// Public JSON record for one defined entry
pub type Projection = Map<String, Value>;

/// Slug → projection, in indexing order
pub type IndexArtifact = IndexMap<String, Projection>;

/// Result of an indexing pass
#[derive(Debug)]
pub struct IndexOutcome<'a> {
    /// Defined entries in index order
    pub entries: Vec<&'a Entry>,
    pub artifact: IndexArtifact,
    /// Whether the artifact reached disk
    pub persisted: bool,
    /// Slugs that were overwritten by a later entry
    pub duplicates: Vec<String>,
}
