//! pathpricer - Command Line Front End for Option Pricing
//!
//! # Commands
//!
//! - `pathpricer price` - Monte Carlo price of a European, Asian, lookback or barrier option
//! - `pathpricer american` - Binomial lattice price of an American option
//! - `pathpricer simulate` - Simulate an ensemble and summarise its terminal distribution
//! - `pathpricer check` - Show the resolved configuration
//!
//! # Configuration
//!
//! Defaults come from an optional TOML file and `PATHPRICER_*` environment
//! variables; see [`config::CliConfig`]. `RUST_LOG` takes precedence over
//! the configured log level.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::american::AmericanArgs;
use commands::price::PriceArgs;
use commands::simulate::SimulateArgs;
use config::{CliConfig, LogLevel, OutputFormat};

/// Path-dependent and American option pricer
#[derive(Parser)]
#[command(name = "pathpricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (optional)
    #[arg(short, long, global = true, default_value = "pathpricer.toml")]
    config: PathBuf,

    /// Log level when RUST_LOG is unset
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a path-dependent or European option by Monte Carlo
    Price(PriceArgs),

    /// Price an American option on a binomial lattice
    American(AmericanArgs),

    /// Simulate paths and summarise the terminal distribution
    Simulate(SimulateArgs),

    /// Check configuration and thread pool
    Check,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::load(&cli.config)?;
    config.merge_with_cli(cli.log_level, cli.format);

    init_tracing(config.log_level.as_filter_str());
    info!(
        config_file = %cli.config.display(),
        n_paths = config.n_paths,
        n_steps = config.n_steps,
        "pathpricer v{}",
        env!("CARGO_PKG_VERSION")
    );

    match cli.command {
        Commands::Price(args) => commands::price::run(&args, &config),
        Commands::American(args) => commands::american::run(&args, &config),
        Commands::Simulate(args) => commands::simulate::run(&args, &config),
        Commands::Check => commands::check::run(&config, &cli.config.display().to_string()),
    }
}
