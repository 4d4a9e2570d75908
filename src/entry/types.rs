use serde::Serialize;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Metadata attached to an entry: global data overlaid by front matter
pub type Metadata = Map<String, Value>;

/// One glossary word
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub title: String,
    pub slug: String,
    /// Eligible for the public lookup index
    pub defined: bool,
    pub skip_in_table_of_content: bool,
    pub metadata: Metadata,
    /// Raw markdown body
    #[serde(skip)]
    pub content: String,
    #[serde(skip)]
    pub source: PathBuf,
}

impl Entry {
    /// Title with a single leading hyphen removed, used for the table of contents
    pub fn sortable_title(&self) -> &str {
        self.title.strip_prefix('-').unwrap_or(&self.title)
    }

    /// Look up a metadata field
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }
}
