use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{debug, info};

use completion_cache::cache::split_qualified_name;
use completion_cache::logging::init_logger;
use completion_cache::lsp::to_completion_item;
use completion_cache::{AccessFilter, Cache, CacheConfig, ResultView, SyntaxTree, version_string};

#[derive(Parser)]
#[command(name = "completion-cache")]
#[command(about = "Query a symbol completion index built from a syntax tree dump")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Syntax tree in JSON form
    #[arg(short, long, global = true)]
    tree: Option<PathBuf>,

    /// Cache configuration (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level for stderr (otherwise RUST_LOG, default "info")
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Disable ANSI colors in log output
    #[arg(long, global = true)]
    no_color: bool,

    /// Also write a DEBUG-level session log to the user cache directory
    #[arg(long, global = true)]
    log_file: bool,

    /// Print results as LSP completion items
    #[arg(long, global = true)]
    lsp: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Query(Query),
    /// Print the crate version
    Version,
}

#[derive(Subcommand)]
enum Query {
    /// Entries whose label starts with a prefix
    StartsWith {
        prefix: String,
    },
    /// All members of a namespace, e.g. `std::chrono` (empty for the global scope)
    Namespace {
        #[arg(default_value = "")]
        path: String,
    },
    /// Members of a class, including inherited ones
    Members {
        /// Qualified type name, e.g. `ns::Widget`
        name: String,

        /// all, public, non-private or same-scope (defaults to the configured filter)
        #[arg(short, long)]
        filter: Option<AccessFilter>,
    },
    /// Resolve a qualified type name to its declaration node
    FindType {
        name: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logger(cli.no_color, cli.log_level.as_deref(), cli.log_file)
        .context("Failed to initialize logging")?;

    match cli.command {
        Commands::Version => println!("{}", version_string()),
        Commands::Query(query) => {
            let config = match &cli.config {
                Some(path) => CacheConfig::load(path)
                    .with_context(|| format!("Failed to load config from {}", path.display()))?,
                None => CacheConfig::default(),
            };
            let cache = load_cache(cli.tree.as_ref(), config)?;
            run_query(&cache, query, cli.lsp)?;
        }
    }
    Ok(())
}

fn run_query(cache: &Cache, query: Query, lsp: bool) -> Result<()> {
    match query {
        Query::StartsWith { prefix } => print_view(&cache.complete_starts_with(&prefix), lsp),
        Query::Namespace { path } => print_view(&cache.complete_namespace(&path_components(&path)), lsp),
        Query::Members { name, filter } => {
            let (path, type_name) = split_qualified_name(&name);
            let filter = filter.unwrap_or(cache.config().member_filter);
            let view = match cache.find_type(&path, type_name) {
                Some(node) => cache.complete_cursor(node, filter),
                None => {
                    info!(name = %name, "Type not found");
                    ResultView::empty()
                }
            };
            print_view(&view, lsp)
        }
        Query::FindType { name } => {
            let (path, type_name) = split_qualified_name(&name);
            let node = cache.find_type(&path, type_name);
            println!("{}", json!({ "name": name, "node": node }));
            Ok(())
        }
    }
}

fn load_cache(tree: Option<&PathBuf>, config: CacheConfig) -> Result<Cache> {
    let path = tree.context("--tree is required for queries")?;
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let tree = Arc::new(
        SyntaxTree::from_json_str(&text).with_context(|| format!("Failed to parse syntax tree {}", path.display()))?,
    );
    debug!(path = %path.display(), nodes = tree.len(), "Loaded syntax tree");

    let root = tree.root();
    Cache::with_config(tree, root, config).context("Failed to build completion index")
}

fn path_components(path: &str) -> Vec<&str> {
    let path = path.strip_prefix("::").unwrap_or(path);
    if path.is_empty() {
        Vec::new()
    } else {
        path.split("::").collect()
    }
}

fn print_view(view: &ResultView, lsp: bool) -> Result<()> {
    let output = if lsp {
        let items: Vec<_> = view
            .iter()
            .enumerate()
            .map(|(i, entry)| to_completion_item(entry, i))
            .collect();
        serde_json::to_string_pretty(&items)?
    } else {
        serde_json::to_string_pretty(view)?
    };
    println!("{}", output);
    Ok(())
}
