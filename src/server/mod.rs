//! Lookup service for the persisted index
//!
//! - [`protocol`]: the lookup operation itself (`name` → projection or `null`)
//! - `daemon`: HTTP front end serving lookups from worker threads (feature `server`)

#[cfg(feature = "server")]
pub mod daemon;
pub mod protocol;

#[cfg(feature = "server")]
pub use daemon::{LookupServer, ServerHandle};
pub use protocol::{LookupResponse, lookup};
