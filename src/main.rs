//! AI agent service entry point.

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use agent_service::config::Config;
use agent_service::metrics;
use agent_service::server;

/// AI agent HTTP service.
#[derive(Parser, Debug)]
#[command(name = "agent-service")]
#[command(about = "HTTP service exposing an AI agent's health and registry")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// Override APP_HOST.
        #[arg(long)]
        host: Option<String>,

        /// Override APP_PORT.
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Configuration drives the log filter, so load it first and report
    // failures once logging is up.
    let loaded = Config::load();

    // Initialize logging
    let (filter, json) = match &loaded {
        _ if args.verbose => (EnvFilter::new("agent_service=debug,tower_http=debug,info"), false),
        Ok(config) => (
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
            config.log_json,
        ),
        Err(_) => (
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            false,
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(|| fmt::layer()))
        .init();

    let config = loaded.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Serve { host, port }) => cmd_serve(config, host, port).await,
        None => cmd_serve(config, None, None).await,
    }
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("AI AGENT SERVICE - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Bind Address: {}:{}", config.app_host, config.app_port);
    println!("  Debug: {}", config.debug);
    println!("  LLM Endpoint: {}", config.api_base_trimmed());
    println!("  Model: {}", config.model_name);
    println!("  API Key: present");
    println!("  Health Check Timeout: {}ms", config.health_check_timeout_ms);
    println!("  Log Format: {}", if config.log_json { "JSON" } else { "Text" });
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server.
async fn cmd_serve(
    mut config: Config,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    // Override with CLI args if provided
    if let Some(host) = host {
        config.app_host = host;
    }
    if let Some(port) = port {
        config.app_port = port;
    }

    let handle = match metrics::init_metrics() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Metrics disabled: {}", e);
            None
        }
    };

    info!(
        "Mode: {}",
        if config.debug { "DEBUG" } else { "PRODUCTION" }
    );

    server::run(config, handle).await.map_err(|e| {
        error!("Service terminated: {}", e);
        anyhow::Error::from(e)
    })
}
