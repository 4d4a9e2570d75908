use crate::entry::frontmatter;
use crate::entry::types::{Entry, Metadata};
use crate::error::{Error, Result};
use crate::utils::SiteConfig;
use globset::GlobBuilder;
use ignore::WalkBuilder;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Load every definition entry of a site
pub fn load_entries(config: &SiteConfig) -> Result<Vec<Entry>> {
    let input = config.input_path();
    let global = load_global_data(&config.data_path())?;
    let files = find_definition_files(&input, &config.definitions_glob)?;

    info!(
        count = files.len(),
        input = %input.display(),
        "loading definitions"
    );

    files
        .iter()
        .map(|path| {
            let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
            parse_entry(path, &text, &global)
        })
        .collect()
}

/// Definition files under `input` matching `pattern`, sorted by path
pub fn find_definition_files(input: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()?
        .compile_matcher();

    if !input.is_dir() {
        return Err(Error::io(
            input,
            std::io::Error::new(std::io::ErrorKind::NotFound, "input directory not found"),
        ));
    }

    let walker = WalkBuilder::new(input)
        .hidden(true)
        .git_ignore(false)
        .parents(false)
        .build();

    let mut files: Vec<PathBuf> = walker
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| {
            let rel_path = entry.path().strip_prefix(input).ok()?;
            matcher
                .is_match(rel_path)
                .then(|| entry.path().to_path_buf())
        })
        .collect();

    files.sort();
    Ok(files)
}

/// Load `*.json` files from the global data directory, keyed by file stem
pub fn load_global_data(data_dir: &Path) -> Result<Metadata> {
    let mut global = Metadata::new();

    if !data_dir.is_dir() {
        return Ok(global);
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(data_dir)
        .map_err(|e| Error::io(data_dir, e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();
    paths.sort();

    for path in paths {
        let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let content = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let value: Value = serde_json::from_str(&content).map_err(|source| Error::Json {
            path: path.clone(),
            source,
        })?;
        debug!(key, "loaded global data");
        global.insert(key.to_string(), value);
    }

    Ok(global)
}

/// Build an entry from one definition file
pub fn parse_entry(path: &Path, text: &str, global: &Metadata) -> Result<Entry> {
    let (yaml, body) = frontmatter::split(text);

    let front: Metadata = match yaml {
        Some(yaml) if !yaml.trim().is_empty() => {
            let value: Value = serde_yaml::from_str(yaml).map_err(|source| Error::FrontMatter {
                path: path.to_path_buf(),
                source,
            })?;
            match value {
                Value::Object(map) => map,
                Value::Null => Metadata::new(),
                _ => {
                    return Err(Error::InvalidField {
                        path: path.to_path_buf(),
                        field: "front matter",
                        expected: "a mapping",
                    });
                }
            }
        }
        _ => Metadata::new(),
    };

    let mut metadata = global.clone();
    for (key, value) in front {
        metadata.insert(key, value);
    }

    let title = required_string(path, &metadata, "title")?;
    let slug = required_string(path, &metadata, "slug")?;
    let defined = optional_bool(&metadata, "defined");
    let skip_in_table_of_content = optional_bool(&metadata, "skip_in_table_of_content");

    Ok(Entry {
        title,
        slug,
        defined,
        skip_in_table_of_content,
        metadata,
        content: body.to_string(),
        source: path.to_path_buf(),
    })
}

fn required_string(path: &Path, metadata: &Metadata, field: &'static str) -> Result<String> {
    match metadata.get(field) {
        None | Some(Value::Null) => Err(Error::MissingField {
            path: path.to_path_buf(),
            field,
        }),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        // YAML happily reads `title: 404` as a number
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(_) => Err(Error::InvalidField {
            path: path.to_path_buf(),
            field,
            expected: "a non-empty string",
        }),
    }
}

/// Flags follow template truthiness: `1`, `"yes"` and `[x]` count as set,
/// `0`, `""` and a missing key do not
fn optional_bool(metadata: &Metadata, field: &str) -> bool {
    match metadata.get(field) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
