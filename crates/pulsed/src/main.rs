//! pulsed - Pulse Server Daemon
//!
//! REST API backend for APM dashboards (logs, traces, metrics, SLOs).
//!
//! Usage:
//!   pulsed [OPTIONS] [config.toml]
//!
//! Options:
//!   --port <port>  Override the listen port
//!
//! If no config file is provided, serves a set of seeded demo services.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use pulse_api::{create_router, AppState};
use pulse_core::TelemetryBackend;
use pulse_store::{seed_demo, MemoryBackend, StoreConfig};
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parsed command-line arguments
struct Args {
    /// Server config file (TOML)
    config_path: Option<String>,
    /// Listen port override
    port: Option<u16>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut result = Args {
        config_path: None,
        port: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse() {
                        Ok(port) => result.port = Some(port),
                        Err(_) => tracing::error!("Invalid port: {}", args[i + 1]),
                    }
                    i += 2;
                } else {
                    tracing::error!("Missing argument for --port");
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            arg if !arg.starts_with('-') => {
                // Positional argument = config file
                result.config_path = Some(arg.to_string());
                i += 1;
            }
            _ => {
                tracing::warn!("Unknown argument: {}", args[i]);
                i += 1;
            }
        }
    }

    result
}

fn print_help() {
    eprintln!(
        r#"pulsed - Pulse Server Daemon

Usage: pulsed [OPTIONS] [config.toml]

Options:
  -p, --port <port>  Override the listen port
  -h, --help         Print this help message

Examples:
  # Run with seeded demo services
  pulsed

  # Run with config file
  pulsed config.toml

  # Demo services on another port
  pulsed --port 9300
"#
    );
}

/// Server configuration file
#[derive(Debug, Deserialize)]
struct ServerConfig {
    /// Listen address, e.g. "0.0.0.0:9200"
    #[serde(default = "default_listen")]
    listen: String,
    /// Monitored services
    #[serde(default)]
    services: Vec<StoreConfig>,
}

fn default_listen() -> String {
    "0.0.0.0:9200".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            services: Vec::new(),
        }
    }
}

fn load_config(path: &str) -> anyhow::Result<ServerConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path, e))?;
    let config: ServerConfig = toml::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path, e))?;
    Ok(config)
}

/// Demo services used when no config file is given
fn demo_services() -> Vec<StoreConfig> {
    vec![
        StoreConfig::demo("checkout", "Checkout API", "api"),
        StoreConfig::demo("payments", "Payments Worker", "worker"),
        StoreConfig::demo("storefront", "Storefront", "frontend"),
    ]
}

fn build_backends(configs: &[StoreConfig]) -> HashMap<String, Arc<dyn TelemetryBackend>> {
    let mut backends: HashMap<String, Arc<dyn TelemetryBackend>> = HashMap::new();
    for config in configs {
        let backend = MemoryBackend::new(config);
        seed_demo(&backend, config);
        backends.insert(config.id.clone(), Arc::new(backend));
    }
    backends
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulsed=info,pulse_api=info,pulse_store=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting pulsed (Pulse Server Daemon)");

    let args = parse_args();

    let mut config = match &args.config_path {
        Some(path) => {
            tracing::info!("Loading config from {}", path);
            load_config(path)?
        }
        None => {
            tracing::info!("No config file given, serving demo services");
            ServerConfig::default()
        }
    };
    if config.services.is_empty() {
        config.services = demo_services();
    }

    let backends = build_backends(&config.services);
    tracing::info!("Serving {} services", backends.len());

    let state = AppState::new(backends);
    let router = create_router(state);

    let mut addr: SocketAddr = config
        .listen
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid listen address {}: {}", config.listen, e))?;
    if let Some(port) = args.port {
        addr.set_port(port);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, router).await?;

    Ok(())
}
