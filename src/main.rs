//! route-decision CLI.
//!
//! # Architecture Overview
//!
//! ```text
//!   endpoints.toml ──▶ config ──▶ routing::ActionSelector ──▶ tree::generate_tree
//!                        ▲               │
//!                        │               ▼
//!                  watcher/SIGHUP   select_candidates(route values)
//!                                        │
//!                                        ▼
//!                              matching endpoint names
//! ```
//!
//! # Commands
//! - `resolve controller=Home action=Index` prints matching endpoints
//! - `tree` prints the built decision tree as JSON
//! - `watch` rebuilds the tree whenever the endpoint file changes

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tokio::sync::mpsc;

use route_decision::config::ConfigWatcher;
use route_decision::lifecycle::{startup, LifecycleSignal, Shutdown, SignalListener};
use route_decision::routing::{ActionSelector, RouteValues};

#[derive(Parser)]
#[command(name = "route-decision")]
#[command(about = "Select endpoints for route values with a decision tree", long_about = None)]
struct Cli {
    /// Endpoint definitions (TOML)
    #[arg(short, long, default_value = "endpoints.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the endpoints matching the given route values
    Resolve {
        #[arg(value_name = "KEY=VALUE")]
        values: Vec<String>,

        /// Keep only endpoints allowing this HTTP method
        #[arg(short, long)]
        method: Option<String>,
    },
    /// Print the decision tree as JSON
    Tree {
        #[arg(long)]
        compact: bool,
    },
    /// Rebuild the tree whenever the endpoint file changes
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let (_, selector) = startup::bootstrap(&cli.config)?;

    match cli.command {
        Commands::Resolve { values, method } => resolve(&selector, &values, method.as_deref())?,
        Commands::Tree { compact } => print_tree(&selector, compact)?,
        Commands::Watch => watch(&cli.config, selector).await?,
    }

    Ok(())
}

fn resolve(selector: &ActionSelector, values: &[String], method: Option<&str>) -> Result<(), Box<dyn Error>> {
    let route_values = RouteValues::parse_pairs(values)?;
    for (key, value) in route_values.iter() {
        tracing::debug!(%key, value, "Route value");
    }
    let candidates: Vec<_> = selector
        .select_candidates(&route_values)
        .into_iter()
        .filter(|action| method.map_or(true, |m| action.allows_method(m)))
        .collect();

    if candidates.is_empty() {
        return Err("no endpoint matched the given route values".into());
    }

    for action in candidates {
        if action.http_methods.is_empty() {
            println!("{}", action.name);
        } else {
            println!("{}\t{}", action.name, action.http_methods.join(","));
        }
    }
    Ok(())
}

fn print_tree(selector: &ActionSelector, compact: bool) -> Result<(), serde_json::Error> {
    let snapshot = selector.snapshot();
    let json = if compact {
        serde_json::to_string(snapshot.root())?
    } else {
        serde_json::to_string_pretty(snapshot.root())?
    };
    println!("{json}");
    Ok(())
}

async fn watch(path: &Path, selector: ActionSelector) -> Result<(), Box<dyn Error>> {
    let (watcher, mut updates) = ConfigWatcher::new(path);
    let _watcher = watcher.run()?;

    let shutdown = Shutdown::new();
    let mut shutdown_rx = shutdown.subscribe();
    let mut signals = SignalListener::new()?;
    let (reload_tx, mut reload_rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            match signals.recv().await {
                Ok(LifecycleSignal::Reload) => {
                    tracing::info!("SIGHUP received, reloading endpoints");
                    let _ = reload_tx.send(());
                }
                Ok(LifecycleSignal::Shutdown) => {
                    tracing::info!("Shutdown signal received");
                    break;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Signal handling failed");
                    break;
                }
            }
        }
        shutdown.trigger();
    });

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            Some(config) = updates.recv() => {
                let version = selector.update(config.actions());
                tracing::info!(version, endpoints = config.endpoints.len(), "Endpoints reloaded");
            }
            Some(()) = reload_rx.recv() => {
                if let Ok(version) = startup::reload(path, &selector) {
                    tracing::info!(version, "Endpoints reloaded");
                }
            }
        }
    }

    tracing::info!("Watcher stopped");
    Ok(())
}
