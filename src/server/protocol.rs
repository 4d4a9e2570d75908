//! Lookup request/response shapes
//!
//! A lookup always succeeds at the transport level: an unknown or missing
//! name yields status 200 with the JSON body `null`.

use crate::index::{IndexReader, Projection};
use serde::{Deserialize, Serialize};

/// Status code of every lookup response
pub const STATUS_OK: u16 = 200;

/// Status code for paths the server does not serve
pub const STATUS_NOT_FOUND: u16 = 404;

/// Query parameter carrying the slug
pub const NAME_PARAM: &str = "name";

/// Response to a lookup, or to any other request the server answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResponse {
    pub status: u16,
    /// JSON text: the projection, or `null`
    pub body: String,
}

impl LookupResponse {
    pub fn new(status: u16, body: String) -> Self {
        Self { status, body }
    }

    /// True when the body signals "not found"
    pub fn is_null(&self) -> bool {
        self.body == "null"
    }
}

/// Look up a slug in the index
pub fn lookup(reader: &IndexReader, name: Option<&str>) -> LookupResponse {
    let projection = name.and_then(|slug| reader.get(slug));
    LookupResponse::new(STATUS_OK, serialize_projection(projection))
}

/// Serialize a projection, or `null` when absent
pub fn serialize_projection(projection: Option<&Projection>) -> String {
    // A JSON object with string keys always serializes
    serde_json::to_string(&projection).unwrap_or_else(|_| "null".to_string())
}

/// Server status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server uptime in seconds
    pub uptime_secs: u64,
    /// Entries in the loaded index
    pub entries: usize,
    /// Total lookups served
    pub queries_served: u64,
    /// Cache hit rate (0.0 - 1.0)
    pub cache_hit_rate: f32,
}
