#![no_main]

use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &str| {
    // Malformed definition files must be rejected, never panic
    let _ = lexis::entry::frontmatter::split(data);
    let _ = lexis::entry::parse_entry(Path::new("fuzz.md"), data, &serde_json::Map::new());
});
