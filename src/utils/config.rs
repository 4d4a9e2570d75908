use crate::error::{Error, Result};
use crate::render::MarkdownOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the optional config file at the site root
pub const CONFIG_FILE: &str = "lexis.json";

/// Site configuration, built once at startup and passed to every stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site root; relative directories below resolve against it
    #[serde(skip)]
    pub root: PathBuf,

    /// Template input directory
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Build output directory
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Glob selecting definition files, relative to the input directory
    #[serde(default = "default_definitions_glob")]
    pub definitions_glob: String,

    /// Global data directory, relative to the input directory
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// File name of the lookup index inside the output directory
    #[serde(default = "default_api_file")]
    pub api_file: String,

    /// Metadata fields never copied into the lookup index
    #[serde(default = "default_excluded_fields")]
    pub excluded_fields: Vec<String>,

    /// Markdown options used when rendering bodies for the lookup index
    #[serde(default)]
    pub api_markdown: MarkdownOptions,

    /// Reject duplicate slugs instead of letting the last entry win
    #[serde(default)]
    pub strict_slugs: bool,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Lookup server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,

    /// Path answering `?name=<slug>` lookups
    #[serde(default = "default_route")]
    pub route: String,

    /// Worker threads; 0 means one per CPU
    #[serde(default)]
    pub workers: usize,

    /// Serialized bodies kept in the LRU cache
    #[serde(default = "default_cache_size")]
    pub cache_size: usize,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("11ty")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_definitions_glob() -> String {
    "definitions/*.md".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("_data")
}

fn default_api_file() -> String {
    "api.json".to_string()
}

fn default_excluded_fields() -> Vec<String> {
    vec!["pkg".to_string()]
}

fn default_addr() -> String {
    "127.0.0.1:9000".to_string()
}

fn default_route() -> String {
    "/api".to_string()
}

fn default_cache_size() -> usize {
    256
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            route: default_route(),
            workers: 0,
            cache_size: default_cache_size(),
        }
    }
}

impl ServerConfig {
    /// Get the effective worker count (resolves 0 to CPU count)
    pub fn effective_workers(&self) -> usize {
        if self.workers == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        } else {
            self.workers
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            definitions_glob: default_definitions_glob(),
            data_dir: default_data_dir(),
            api_file: default_api_file(),
            excluded_fields: default_excluded_fields(),
            api_markdown: MarkdownOptions::default(),
            strict_slugs: false,
            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load `lexis.json` from the site root, or defaults if it does not exist
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            let content =
                fs::read_to_string(&config_path).map_err(|e| Error::io(&config_path, e))?;
            serde_json::from_str::<SiteConfig>(&content).map_err(|source| Error::Json {
                path: config_path.clone(),
                source,
            })?
        } else {
            Self::default()
        };

        config.root = root.to_path_buf();
        Ok(config)
    }

    /// Absolute-or-root-relative input directory
    pub fn input_path(&self) -> PathBuf {
        self.root.join(&self.input_dir)
    }

    pub fn data_path(&self) -> PathBuf {
        self.input_path().join(&self.data_dir)
    }

    /// Where the lookup index is written and read
    pub fn artifact_path(&self) -> PathBuf {
        self.root.join(&self.output_dir).join(&self.api_file)
    }
}
