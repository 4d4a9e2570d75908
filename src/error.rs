//! Error type shared by the library modules

use std::path::PathBuf;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading, indexing or serving glossary entries
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid front matter in {}: {source}", path.display())]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{}: missing required field `{field}`", path.display())]
    MissingField { path: PathBuf, field: &'static str },

    #[error("{}: field `{field}` must be {expected}", path.display())]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        expected: &'static str,
    },

    #[error("duplicate slug `{slug}` in {} and {}", first.display(), second.display())]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid definitions glob: {0}")]
    Glob(#[from] globset::Error),

    #[error("unknown definition flag level `{0}`")]
    UnknownFlagLevel(String),

    #[error("lookup server error: {0}")]
    Server(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
