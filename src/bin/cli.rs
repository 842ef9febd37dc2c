//! Projector Panel CLI Client
//!
//! Sends a single command to the projector from the terminal.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use projector_panel::controller::{Action, TargetOverrides};
use projector_panel::{Config, Controller};
use tracing_subscriber::{fmt, EnvFilter};

/// Projector Panel CLI
#[derive(Parser, Debug)]
#[command(name = "projector-panel-cli")]
#[command(about = "Send RS232-over-Ethernet commands to a projector")]
struct Args {
    /// Projector host
    #[arg(long, env = "PROJECTOR_IP", default_value = "192.168.1.5")]
    host: String,

    /// Projector control port
    #[arg(short, long, env = "PROJECTOR_PORT", default_value = "8000")]
    port: u16,

    /// Wrap the command with carriage returns
    #[arg(long)]
    wrap_cr: bool,

    /// Connect timeout and reply idle timeout in milliseconds
    #[arg(short, long, default_value = "2000")]
    timeout_ms: u64,

    /// Extra milliseconds before a trickling reply is cut off
    #[arg(long, default_value = "1000")]
    safety_margin_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Send a command table entry by key
    Send {
        /// Action key, e.g. pow_on
        key: String,
    },

    /// Send a literal command (the trailing # is optional)
    Raw {
        /// Command text, e.g. *pow=?#
        command: String,
    },

    /// List the command table
    List,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args = Args::parse();

    let config = Config::builder()
        .projector_host(&args.host)
        .projector_port(args.port)
        .wrap_cr(args.wrap_cr)
        .timeout_ms(args.timeout_ms)
        .safety_margin(Duration::from_millis(args.safety_margin_ms))
        .build();
    let controller = Controller::new(config);

    let action = match args.command {
        Commands::List => {
            for (key, command) in controller.table().entries() {
                println!("{:<14} {}", key, command);
            }
            return ExitCode::SUCCESS;
        }
        Commands::Send { key } => Action::Preset(key),
        Commands::Raw { command } => Action::Raw(command),
    };

    let exchange = match controller.execute(&action, &TargetOverrides::default()) {
        Ok(exchange) => exchange,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };

    println!("> {}", exchange.command);
    match exchange.result {
        Ok(reply) if reply.is_empty() => {
            println!("< (no response)");
            ExitCode::SUCCESS
        }
        Ok(reply) => {
            println!("< {}", reply.text.trim_end_matches(['\r', '\n']));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e.legacy_message());
            ExitCode::FAILURE
        }
    }
}
