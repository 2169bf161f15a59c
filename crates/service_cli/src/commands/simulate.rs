//! Simulate command implementation
//!
//! Generates an ensemble and summarises its terminal distribution, including
//! the tail statistics of the horizon return `S_T / S_0 - 1`.

use clap::Args;
use pricer_models::models::{ProcessKind, StochasticProcess};
use pricer_pricing::mc::{simulate, simulate_deterministic};
use pricer_pricing::rng::PricerRng;
use pricer_risk::metrics::{conditional_value_at_risk, value_at_risk};
use serde::Serialize;
use tracing::info;

use super::{emit, fmt_value, MarketArgs, SimulationArgs, TableRows};
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Confidence level for the reported tail statistics.
const TAIL_CONFIDENCE: f64 = 0.95;

/// Flags for `pathpricer simulate`.
#[derive(Debug, Clone, Args)]
pub struct SimulateArgs {
    /// Process family: geometric or mean-reverting
    #[arg(long, default_value = "geometric")]
    pub process: ProcessKind,

    /// Reversion speed (mean-reverting only)
    #[arg(long)]
    pub speed: Option<f64>,

    /// Long-run level (mean-reverting only)
    #[arg(long, allow_negative_numbers = true)]
    pub long_run_mean: Option<f64>,

    #[command(flatten)]
    pub market: MarketArgs,

    #[command(flatten)]
    pub simulation: SimulationArgs,
}

/// Output of `pathpricer simulate`.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub process: StochasticProcess,
    pub n_paths: usize,
    pub n_steps: usize,
    pub dt: f64,
    pub seed: Option<u64>,
    pub terminal_mean: f64,
    pub terminal_std_dev: f64,
    pub terminal_min: f64,
    pub terminal_max: f64,
    pub return_var_95: f64,
    pub return_cvar_95: f64,
}

impl TableRows for SimulationReport {
    fn title(&self) -> String {
        format!("Simulation: {}", self.process.kind())
    }

    fn rows(&self) -> Vec<(String, String)> {
        vec![
            ("paths".to_string(), self.n_paths.to_string()),
            ("steps".to_string(), self.n_steps.to_string()),
            ("dt".to_string(), fmt_value(self.dt)),
            (
                "seed".to_string(),
                self.seed.map_or("none (deterministic)".to_string(), |s| s.to_string()),
            ),
            ("terminal mean".to_string(), fmt_value(self.terminal_mean)),
            ("terminal std dev".to_string(), fmt_value(self.terminal_std_dev)),
            ("terminal min".to_string(), fmt_value(self.terminal_min)),
            ("terminal max".to_string(), fmt_value(self.terminal_max)),
            ("return VaR 95%".to_string(), fmt_value(self.return_var_95)),
            ("return CVaR 95%".to_string(), fmt_value(self.return_cvar_95)),
        ]
    }
}

fn build_process(args: &SimulateArgs) -> Result<StochasticProcess> {
    match args.process {
        ProcessKind::Geometric => {
            if args.speed.is_some() || args.long_run_mean.is_some() {
                return Err(CliError::InvalidArgument(
                    "--speed and --long-run-mean only apply to the mean-reverting process"
                        .to_string(),
                ));
            }
            Ok(StochasticProcess::Geometric)
        }
        ProcessKind::MeanReverting => {
            let speed = args.speed.ok_or_else(|| {
                CliError::InvalidArgument("mean-reverting process needs --speed".to_string())
            })?;
            let long_run_mean = args.long_run_mean.ok_or_else(|| {
                CliError::InvalidArgument("mean-reverting process needs --long-run-mean".to_string())
            })?;
            Ok(StochasticProcess::mean_reverting(speed, long_run_mean)?)
        }
    }
}

/// Simulates the ensemble and summarises it.
pub fn evaluate(args: &SimulateArgs, config: &CliConfig) -> Result<SimulationReport> {
    let process = build_process(args)?;
    let params = args.market.to_params(None)?;
    let simulation = args.simulation.to_config(config)?;

    let (ensemble, seed) = if process.is_deterministic(&params) {
        (simulate_deterministic(&process, &params, &simulation)?, None)
    } else {
        let mut rng = PricerRng::from_optional_seed(args.simulation.seed(config));
        (simulate(&process, &params, &simulation, &mut rng)?, Some(rng.seed()))
    };

    info!(
        process = %process.kind(),
        n_paths = ensemble.n_paths(),
        n_steps = ensemble.n_steps(),
        "Simulation complete"
    );

    let terminal = ensemble.terminal_values();
    let n = terminal.len() as f64;
    let mean = terminal.iter().sum::<f64>() / n;
    let std_dev = if terminal.len() < 2 {
        0.0
    } else {
        (terminal.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
    };
    let returns: Vec<f64> = terminal.iter().map(|x| x / params.spot() - 1.0).collect();

    Ok(SimulationReport {
        process,
        n_paths: ensemble.n_paths(),
        n_steps: ensemble.n_steps(),
        dt: ensemble.time_grid().dt(),
        seed,
        terminal_mean: mean,
        terminal_std_dev: std_dev,
        terminal_min: terminal.iter().copied().fold(f64::INFINITY, f64::min),
        terminal_max: terminal.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        return_var_95: value_at_risk(&returns, TAIL_CONFIDENCE)?,
        return_cvar_95: conditional_value_at_risk(&returns, TAIL_CONFIDENCE)?,
    })
}

/// Run the simulate command
pub fn run(args: &SimulateArgs, config: &CliConfig) -> Result<()> {
    let report = evaluate(args, config)?;
    emit(&report, config.output_format, &mut std::io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn args(process: ProcessKind, volatility: f64) -> SimulateArgs {
        SimulateArgs {
            process,
            speed: None,
            long_run_mean: None,
            market: MarketArgs {
                spot: 100.0,
                maturity: 1.0,
                rate: 0.05,
                volatility,
            },
            simulation: SimulationArgs {
                paths: Some(20_000),
                steps: Some(50),
                seed: Some(5),
                drift: None,
            },
        }
    }

    #[test]
    fn test_geometric_terminal_mean_is_forward() {
        let report = evaluate(&args(ProcessKind::Geometric, 0.2), &CliConfig::default()).unwrap();
        let forward = 100.0 * 0.05_f64.exp();
        // Standard error of the mean is about 0.15
        assert!((report.terminal_mean - forward).abs() < 0.6);
        assert!(report.terminal_min > 0.0);
        assert!(report.return_cvar_95 <= report.return_var_95);
        assert_eq!(report.seed, Some(5));
    }

    #[test]
    fn test_zero_volatility_is_deterministic() {
        let report = evaluate(&args(ProcessKind::Geometric, 0.0), &CliConfig::default()).unwrap();
        assert_eq!(report.seed, None);
        assert_eq!(report.n_paths, 1);
        assert_eq!(report.terminal_std_dev, 0.0);
        assert_relative_eq!(report.terminal_mean, 100.0 * 0.05_f64.exp(), max_relative = 1e-9);
    }

    #[test]
    fn test_mean_reverting_needs_parameters() {
        let mut ou = args(ProcessKind::MeanReverting, 0.2);
        assert!(matches!(
            evaluate(&ou, &CliConfig::default()),
            Err(CliError::InvalidArgument(_))
        ));

        ou.speed = Some(2.0);
        ou.long_run_mean = Some(90.0);
        let report = evaluate(&ou, &CliConfig::default()).unwrap();
        // Each Euler step keeps (1 - θ dt) of the gap to the long-run level
        let expected = 90.0 + 10.0 * (1.0 - 2.0 * 0.02_f64).powi(50);
        assert!((report.terminal_mean - expected).abs() < 0.01);
    }

    #[test]
    fn test_ou_flags_rejected_for_geometric() {
        let mut gbm = args(ProcessKind::Geometric, 0.2);
        gbm.speed = Some(1.0);
        assert!(evaluate(&gbm, &CliConfig::default()).is_err());
    }
}
