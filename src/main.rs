use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lexis::entry::load_entries;
use lexis::index::{IndexReader, build_index, stats};
use lexis::output::{print_build_summary, print_table_of_contents};
use lexis::render::MarkdownRenderer;
use lexis::server;
use lexis::toc::categorize;
use lexis::utils::SiteConfig;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lexis")]
#[command(about = "Glossary site indexer: table of contents, lookup index and lookup server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load definitions, build the table of contents and write the lookup index
    Build {
        /// Site root (holds lexis.json)
        #[arg(short, long, default_value = ".")]
        site: PathBuf,

        /// Fail on duplicate slugs instead of keeping the last entry
        #[arg(long)]
        strict: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Print the table of contents
    Toc {
        #[arg(short, long, default_value = ".")]
        site: PathBuf,

        #[arg(long)]
        no_color: bool,
    },
    /// Print the lookup response for a slug
    Lookup {
        /// Slug to look up
        name: String,

        #[arg(short, long, default_value = ".")]
        site: PathBuf,
    },
    /// Serve the lookup index over HTTP
    Serve {
        #[arg(short, long, default_value = ".")]
        site: PathBuf,

        /// Listen address (defaults to the config value)
        #[arg(short, long)]
        addr: Option<String>,

        /// Worker threads (0 = one per CPU)
        #[arg(short, long)]
        workers: Option<usize>,
    },
    /// Show lookup index statistics
    Stats {
        #[arg(short, long, default_value = ".")]
        site: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            site,
            strict,
            no_color,
        } => {
            let mut config = load_config(&site)?;
            config.strict_slugs |= strict;

            let entries = load_entries(&config).context("Failed to load definitions")?;
            let buckets = categorize(&entries);
            let renderer = MarkdownRenderer::new(config.api_markdown);
            let outcome =
                build_index(&entries, &renderer, &config).context("Failed to build lookup index")?;

            print_build_summary(
                entries.len(),
                &buckets,
                &outcome,
                &config.artifact_path(),
                !no_color,
            )?;
        }
        Commands::Toc { site, no_color } => {
            let config = load_config(&site)?;
            let entries = load_entries(&config).context("Failed to load definitions")?;
            print_table_of_contents(&categorize(&entries), !no_color)?;
        }
        Commands::Lookup { name, site } => {
            let reader = open_index(&load_config(&site)?)?;
            let response = server::lookup(&reader, Some(name.as_str()));
            println!("{}", response.body);
        }
        Commands::Serve {
            site,
            addr,
            workers,
        } => {
            let mut config = load_config(&site)?;
            if let Some(addr) = addr {
                config.server.addr = addr;
            }
            if let Some(workers) = workers {
                config.server.workers = workers;
            }
            serve(&config)?;
        }
        Commands::Stats { site } => {
            stats::show_stats(&load_config(&site)?)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "lexis=debug" } else { "lexis=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "server")]
fn serve(config: &SiteConfig) -> Result<()> {
    let reader = open_index(config)?;
    println!(
        "Serving {} definitions on http://{}{}?name=<slug> (Ctrl+C to stop)",
        reader.len(),
        config.server.addr,
        config.server.route
    );
    server::daemon::run_foreground(reader, &config.server)?;
    Ok(())
}

#[cfg(not(feature = "server"))]
fn serve(_config: &SiteConfig) -> Result<()> {
    anyhow::bail!("lexis was built without the `server` feature")
}

fn load_config(site: &Path) -> Result<SiteConfig> {
    SiteConfig::load(site).with_context(|| format!("Failed to load config from {}", site.display()))
}

fn open_index(config: &SiteConfig) -> Result<IndexReader> {
    let path = config.artifact_path();
    IndexReader::open(&path)
        .with_context(|| format!("No lookup index at {}. Run 'lexis build' first.", path.display()))
}
