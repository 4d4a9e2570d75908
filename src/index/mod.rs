pub mod build;
pub mod reader;
pub mod stats;
pub mod types;
pub mod writer;

pub use build::build_index;
pub use reader::IndexReader;
pub use types::*;
pub use writer::write_artifact;
