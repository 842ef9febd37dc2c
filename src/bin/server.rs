//! Projector Panel Server Binary
//!
//! Serves the web control panel.

use std::path::PathBuf;

use clap::Parser;
use projector_panel::network::Server;
use projector_panel::{Config, Controller};
use tracing_subscriber::{fmt, EnvFilter};

/// Projector Panel Server
#[derive(Parser, Debug)]
#[command(name = "projector-panel-server")]
#[command(about = "Local web control panel for an RS232-over-Ethernet projector")]
#[command(version)]
struct Args {
    /// HTTP listen address (host:port)
    #[arg(short, long, env = "PANEL_LISTEN", default_value = "0.0.0.0:5000")]
    listen: String,

    /// Default projector host
    #[arg(long, env = "PROJECTOR_IP", default_value = "192.168.1.5")]
    projector_host: String,

    /// Default projector control port
    #[arg(long, env = "PROJECTOR_PORT", default_value = "8000")]
    projector_port: u16,

    /// Wrap commands with carriage returns by default
    #[arg(long, env = "PROJECTOR_WRAP_CR")]
    wrap_cr: bool,

    /// Connect timeout and reply idle timeout in milliseconds
    #[arg(short, long, default_value = "2000")]
    timeout_ms: u64,

    /// Extra milliseconds before a trickling reply is cut off
    #[arg(long, default_value = "1000")]
    safety_margin_ms: u64,

    /// Number of HTTP worker threads
    #[arg(short, long, default_value = "4")]
    workers: usize,

    /// RS232 control guide served at /manual.pdf
    #[arg(long, env = "PANEL_MANUAL")]
    manual: Option<PathBuf>,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,projector_panel=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("Projector Panel v{}", projector_panel::VERSION);
    tracing::info!(
        "Default projector: {}:{} (wrap={})",
        args.projector_host,
        args.projector_port,
        args.wrap_cr
    );

    // Build config from args
    let mut builder = Config::builder()
        .listen_addr(&args.listen)
        .projector_host(&args.projector_host)
        .projector_port(args.projector_port)
        .wrap_cr(args.wrap_cr)
        .timeout_ms(args.timeout_ms)
        .safety_margin(std::time::Duration::from_millis(args.safety_margin_ms))
        .workers(args.workers);
    if let Some(manual) = &args.manual {
        builder = builder.manual_path(manual);
    }
    let config = builder.build();

    if config.timeout.is_zero() {
        tracing::error!("--timeout-ms must be greater than zero");
        std::process::exit(2);
    }

    let server = match Server::new(Controller::new(config)) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
