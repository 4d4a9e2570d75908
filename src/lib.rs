//! # lexis - glossary site indexer
//!
//! lexis prepares the data behind a glossary website: it loads definition
//! entries (markdown with YAML front matter), groups them into alphabetic
//! buckets for the table of contents, writes a JSON lookup index keyed by
//! slug, and serves that index over HTTP.
//!
//! ## Architecture
//!
//! - [`entry`] - Definition loading and validation
//! - [`toc`] - Table-of-contents buckets
//! - [`index`] - Lookup index building, writing and reading
//! - [`server`] - Lookup service (`?name=<slug>`)
//! - [`render`] - Markdown rendering
//! - [`filters`] - Template helpers for links and definition flags
//! - [`output`] - Terminal output
//! - [`utils`] - Collation and site configuration
//!
//! ## Quick Start
//!
//! ```no_run
//! use lexis::entry::load_entries;
//! use lexis::index::build_index;
//! use lexis::render::MarkdownRenderer;
//! use lexis::toc::categorize;
//! use lexis::utils::SiteConfig;
//! use std::path::Path;
//!
//! let config = SiteConfig::load(Path::new("."))?;
//! let entries = load_entries(&config)?;
//!
//! for bucket in categorize(&entries) {
//!     println!("{}: {}", bucket.title, bucket.definitions.len());
//! }
//!
//! let renderer = MarkdownRenderer::new(config.api_markdown);
//! let outcome = build_index(&entries, &renderer, &config)?;
//! println!("{} defined words", outcome.artifact.len());
//! # Ok::<(), lexis::Error>(())
//! ```

pub mod entry;
pub mod error;
pub mod filters;
pub mod index;
pub mod output;
pub mod render;
pub mod server;
pub mod toc;
pub mod utils;

pub use error::{Error, Result};
