//! nested-router CLI
//!
//! Loads a route file, finalizes the nested groups it declares and either
//! prints the resulting route table or looks up the route a request would hit.
//!
//! # Architecture Overview
//!
//! ```text
//!   routes.toml ──▶ config::loader ──▶ config::apply ──▶ routing::Router
//!                                                             │
//!                                                        finalize()
//!                                                             │
//!                         ┌───────────────────────────────────┴──────┐
//!                         ▼                                          ▼
//!                   `routes` (table / JSON)               `match` (RouteTable)
//! ```

use std::path::PathBuf;

use axum::body::Body;
use axum::http::Request;
use clap::{Parser, Subcommand};

use nested_router::config::{self, validation::parse_method};
use nested_router::observability;
use nested_router::routing::{Route, RouteCollection};

#[derive(Parser)]
#[command(name = "nested-router")]
#[command(about = "Inspect routes declared in nested groups", long_about = None)]
struct Cli {
    /// Route file to load.
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    /// Log level, overriding the route file's `[logging]` section.
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every route with its resolved filters
    Routes {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show which route a request would match
    Match {
        #[arg(short, long, default_value = "GET")]
        method: String,

        #[arg(long)]
        host: Option<String>,

        path: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let file = config::load_config(&cli.config)?;

    let level = cli.log_level.as_deref().unwrap_or(&file.logging.level);
    if let Err(e) = observability::init_logging(level) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    tracing::info!(
        path = %cli.config.display(),
        routes = file.routes.len(),
        groups = file.groups.len(),
        "Route file loaded"
    );

    let mut router = config::build_router(&file);

    match cli.command {
        Commands::Routes { json } => {
            let routes = router.routes()?;
            if json {
                println!("{}", serde_json::to_string_pretty(routes)?);
            } else {
                print_table(routes);
            }
        }
        Commands::Match { method, host, path } => {
            let method = parse_method(&method).ok_or_else(|| format!("Unknown method `{}`", method))?;
            let table = router.route_table()?;

            let mut request = Request::builder().method(method).uri(&path);
            if let Some(host) = &host {
                request = request.header("host", host);
            }
            let request = request.body(Body::default())?;

            match table.find(&request) {
                Some(found) => {
                    println!("{}", found.key);
                    print_route(found.route);
                    for (name, value) in &found.parameters {
                        println!("    param  {} = {}", name, value);
                    }
                }
                None => {
                    eprintln!("No route matches {} {}", request.method(), path);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn print_table(routes: &RouteCollection) {
    for (key, route) in routes.iter() {
        println!("{}", key);
        print_route(route);
    }
}

fn print_route(route: &Route) {
    if let Some(action) = route.action() {
        println!("    action {}", action);
    }
    if !route.before().is_empty() {
        println!("    before {}", route.before());
    }
    if !route.after().is_empty() {
        println!("    after  {}", route.after());
    }
    for (name, pattern) in route.requirements() {
        println!("    where  {} = {}", name, pattern);
    }
}
