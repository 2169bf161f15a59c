//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Commands build a report
//! value first and render it afterwards, so the numbers can be tested
//! without capturing stdout.

pub mod american;
pub mod check;
pub mod price;
pub mod simulate;

use std::io::Write;

use clap::Args;
use pricer_core::types::MarketParameters;
use pricer_pricing::mc::SimulationConfig;
use serde::Serialize;

use crate::config::{CliConfig, OutputFormat};
use crate::Result;

/// Market inputs shared by every pricing command.
#[derive(Debug, Clone, Args)]
pub struct MarketArgs {
    /// Initial price of the underlying
    #[arg(long)]
    pub spot: f64,

    /// Time to maturity in years
    #[arg(long)]
    pub maturity: f64,

    /// Continuously compounded risk-free rate
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub rate: f64,

    /// Annualised volatility
    #[arg(long)]
    pub volatility: f64,
}

impl MarketArgs {
    /// Validates the flags into market parameters, attaching `strike` when given.
    pub fn to_params(&self, strike: Option<f64>) -> Result<MarketParameters> {
        let params = MarketParameters::new(self.spot, self.maturity, self.rate, self.volatility)?;
        Ok(match strike {
            Some(strike) => params.with_strike(strike)?,
            None => params,
        })
    }
}

/// Monte Carlo sizing flags; unset values fall back to the configuration.
#[derive(Debug, Clone, Default, Args)]
pub struct SimulationArgs {
    /// Number of simulated paths
    #[arg(long)]
    pub paths: Option<usize>,

    /// Number of time steps per path
    #[arg(long)]
    pub steps: Option<usize>,

    /// RNG seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Replace the process drift target (rate or long-run mean)
    #[arg(long, allow_negative_numbers = true)]
    pub drift: Option<f64>,
}

impl SimulationArgs {
    /// Builds the validated simulation configuration.
    pub fn to_config(&self, config: &CliConfig) -> Result<SimulationConfig> {
        Ok(SimulationConfig::builder()
            .n_paths(self.paths.unwrap_or(config.n_paths))
            .n_steps(self.steps.unwrap_or(config.n_steps))
            .maybe_drift_override(self.drift)
            .build()?)
    }

    /// Seed from the flag, else from the configuration.
    pub fn seed(&self, config: &CliConfig) -> Option<u64> {
        self.seed.or(config.seed)
    }
}

/// Label/value rows for table output.
pub trait TableRows {
    /// Table title.
    fn title(&self) -> String;

    /// Rows in display order.
    fn rows(&self) -> Vec<(String, String)>;
}

/// Renders a report in the requested format.
pub fn emit<R, W>(report: &R, format: OutputFormat, out: &mut W) -> Result<()>
where
    R: Serialize + TableRows,
    W: Write,
{
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Table => render_table(&report.title(), &report.rows(), out)?,
    }
    Ok(())
}

fn render_table<W: Write>(title: &str, rows: &[(String, String)], out: &mut W) -> Result<()> {
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, v)| v.chars().count()).max().unwrap_or(0);
    let inner = (label_width + value_width + 3).max(title.chars().count());
    let value_width = inner - label_width - 3;

    writeln!(out, "┌─{}─┐", "─".repeat(inner))?;
    writeln!(out, "│ {:<inner$} │", title)?;
    writeln!(out, "├─{}─┬─{}─┤", "─".repeat(label_width), "─".repeat(value_width))?;
    for (label, value) in rows {
        writeln!(out, "│ {:<label_width$} │ {:>value_width$} │", label, value)?;
    }
    writeln!(out, "└─{}─┴─{}─┘", "─".repeat(label_width), "─".repeat(value_width))?;
    Ok(())
}

/// Formats a price-like number for table output.
pub(crate) fn fmt_value(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.6}", value)
    }
}
