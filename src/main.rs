//! route-tree CLI
//!
//! Compiles a configured route tree against the handler names listed in the
//! config file and prints the result, or generates URLs from handler names.
//!
//! ```text
//! route-tree --config router.toml check
//! route-tree --config router.toml paths
//! route-tree --config router.toml url social.profile username=ann
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use route_tree::config::{load_config, load_route_tree, routes_path};
use route_tree::observability::logging::init_logging;
use route_tree::{HandlerNamespace, RecordingDispatcher, Router};

#[derive(Parser)]
#[command(name = "route-tree")]
#[command(about = "Compile route trees and generate URLs from handler names", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "router.toml")]
    config: PathBuf,

    /// Route tree file, overriding routing.routes_file
    #[arg(short, long)]
    routes: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the route tree and list every binding
    Check,
    /// List handler names with their path templates
    Paths,
    /// Generate the URL for a handler name
    Url {
        name: String,
        /// Parameters as key=value
        #[arg(value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {:?}", raw))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    init_logging(&config.observability);

    tracing::info!(
        config = %cli.config.display(),
        default_method = %config.routing.default_method,
        handlers = config.handlers.len(),
        "Configuration loaded"
    );

    let routes = cli
        .routes
        .clone()
        .or_else(|| routes_path(&cli.config, &config))
        .ok_or("no route tree given: set routing.routes_file or pass --routes")?;
    let tree = load_route_tree(&routes)?;

    let mut namespace = HandlerNamespace::new();
    for name in &config.handlers {
        namespace.insert(name, name.clone())?;
    }
    if namespace.is_empty() {
        tracing::warn!("No handlers configured; every route will fail to resolve");
    } else {
        tracing::debug!(handlers = namespace.len(), "Handler namespace built");
    }

    let mut router = Router::new();
    router.set_default_method(&config.routing.default_method)?;

    let mut dispatcher = RecordingDispatcher::new();
    router.register_routes(&mut dispatcher, &tree, &namespace)?;

    match cli.command {
        Commands::Check => {
            for binding in dispatcher.bindings() {
                println!("{}", binding);
            }
        }
        Commands::Paths => {
            for (name, path) in router.paths().iter() {
                println!("{:<32} {}", name, path);
            }
        }
        Commands::Url { name, params } => {
            println!("{}", router.url_for(&name, params)?);
        }
    }

    Ok(())
}
