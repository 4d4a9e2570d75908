pub mod frontmatter;
pub mod loader;
pub mod types;

pub use loader::{load_entries, parse_entry};
pub use types::*;
