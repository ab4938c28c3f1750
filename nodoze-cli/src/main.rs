use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use nodoze_cli::{available_ports, connect, describe_port, run_monitor, LinkConfig, LinkError};
use nodoze_protocol::Command;

#[derive(Parser)]
#[command(
    name = "nodoze",
    about = "Control a NoDoze keep-awake device over USB serial",
    version
)]
struct Cli {
    /// Serial port of the device (default: probe USB serial ports)
    #[arg(long, short = 'p', global = true, env = "NODOZE_PORT")]
    port: Option<String>,

    /// How long to wait for a response (ms)
    #[arg(long, global = true, env = "NODOZE_TIMEOUT_MS", default_value_t = 1000)]
    timeout_ms: u64,

    /// Log link traffic to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn keep-awake on
    On,
    /// Turn keep-awake off
    Off,
    /// Flip keep-awake on/off
    Toggle,
    /// Show whether keep-awake is running
    Status,
    /// Set the action interval
    Interval {
        /// Seconds between keep-awake actions (the device accepts 5-300)
        seconds: u16,
    },
    /// Turn the status LEDs off (on) or back on (off)
    Quiet {
        #[arg(value_enum)]
        state: Switch,
    },
    /// Interactive monitor (default)
    Monitor,
}

#[derive(Clone, Copy, ValueEnum)]
enum Switch {
    On,
    Off,
}

impl Commands {
    fn to_command(&self) -> Option<Command> {
        let command = match self {
            Commands::On => Command::On,
            Commands::Off => Command::Off,
            Commands::Toggle => Command::Toggle,
            Commands::Status => Command::Status,
            Commands::Interval { seconds } => Command::Interval(*seconds),
            Commands::Quiet { state } => Command::Quiet(matches!(state, Switch::On)),
            Commands::Monitor => return None,
        };
        Some(command)
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli) {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = LinkConfig {
        read_timeout: Duration::from_millis(cli.timeout_ms),
        ..LinkConfig::default()
    };

    let (port, mut link) = match connect(cli.port.as_deref(), &config) {
        Ok(found) => found,
        Err(LinkError::TransportUnavailable) => {
            print_available_ports();
            return Err(LinkError::TransportUnavailable.into());
        }
        Err(e) => return Err(e).context("cannot reach the device"),
    };

    match cli.command.as_ref().and_then(Commands::to_command) {
        Some(command) => {
            let response = link
                .send(command)
                .with_context(|| format!("sending '{command}' to {port}"))?;
            match response {
                Some(response) => println!("{response}"),
                None => println!("Command sent"),
            }
        }
        None => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            run_monitor(&mut link, stdin.lock(), &mut stdout)
                .with_context(|| format!("monitor session on {port}"))?;
        }
    }

    Ok(())
}

fn print_available_ports() {
    eprintln!("Available ports:");
    match available_ports() {
        Ok(ports) if ports.is_empty() => eprintln!("  (none)"),
        Ok(ports) => {
            for info in &ports {
                eprintln!("  {}: {}", info.port_name, describe_port(info));
            }
        }
        Err(e) => eprintln!("  {e}"),
    }
}
