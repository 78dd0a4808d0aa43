//! stay-booking: CLI server
//!
//! ```sh
//! # Run with default config (~/.config/stay-booking/config.toml)
//! stay-booking
//!
//! # Custom config path
//! stay-booking --config /etc/stay-booking/config.toml
//!
//! # Override port
//! stay-booking --api-port 9090
//!
//! # Validate config without starting
//! stay-booking --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use stay_booking::config::AppConfig;
use stay_booking::server::{init_tracing, ServerHandle, ServerOptions};

/// Property booking admission and pricing service.
#[derive(Parser, Debug)]
#[command(
    name = "stay-booking",
    version,
    about = "Property booking admission and pricing service",
    long_about = "REST API server for properties, rooms and bookings.\n\n\
                  Default config: ~/.config/stay-booking/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "STAY_BOOKING_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(stay_booking::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) if cli.check => {
            eprintln!("❌ Invalid configuration in {}: {}", config_path.display(), e);
            std::process::exit(1);
        }
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.api_port {
        config.server.api_port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!(
            "   Default UTC offset : {} min",
            config.booking.default_utc_offset_minutes
        );
        return Ok(());
    }

    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
