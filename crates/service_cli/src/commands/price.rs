//! Price command implementation
//!
//! Prices one payoff by Monte Carlo under the geometric process. European
//! payoffs are also priced in closed form for comparison.

use clap::Args;
use pricer_models::analytical::{BlackScholes, Greeks};
use pricer_models::instruments::{BarrierType, OptionType, PayoffKind, PayoffSpec};
use pricer_models::models::StochasticProcess;
use pricer_pricing::mc::{MonteCarloPricer, PricingResult};
use pricer_pricing::rng::PricerRng;
use serde::Serialize;
use tracing::info;

use super::{emit, fmt_value, MarketArgs, SimulationArgs, TableRows};
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Flags for `pathpricer price`.
#[derive(Debug, Clone, Args)]
pub struct PriceArgs {
    /// Payoff family: european, asian, lookback or barrier
    #[arg(long, default_value = "european")]
    pub payoff: PayoffKind,

    /// Call or put
    #[arg(long)]
    pub option_type: OptionType,

    /// Strike (not used by lookbacks)
    #[arg(long)]
    pub strike: Option<f64>,

    /// Barrier level (barrier payoffs only)
    #[arg(long)]
    pub barrier: Option<f64>,

    /// Barrier type, e.g. up-and-out (barrier payoffs only)
    #[arg(long)]
    pub barrier_type: Option<BarrierType>,

    #[command(flatten)]
    pub market: MarketArgs,

    #[command(flatten)]
    pub simulation: SimulationArgs,
}

/// Closed-form benchmark for European payoffs.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ClosedForm {
    pub price: f64,
    pub greeks: Greeks,
}

/// Output of `pathpricer price`.
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    pub payoff: String,
    pub result: PricingResult,
    pub confidence_95: f64,
    pub n_steps: usize,
    pub seed: u64,
    pub black_scholes: Option<ClosedForm>,
}

impl TableRows for PriceReport {
    fn title(&self) -> String {
        format!("Monte Carlo: {}", self.payoff)
    }

    fn rows(&self) -> Vec<(String, String)> {
        let mut rows = vec![
            ("estimate".to_string(), fmt_value(self.result.estimate)),
            ("std error".to_string(), fmt_value(self.result.std_error)),
            ("95% half-width".to_string(), fmt_value(self.confidence_95)),
            ("paths".to_string(), self.result.n_paths.to_string()),
            ("steps".to_string(), self.n_steps.to_string()),
            ("seed".to_string(), self.seed.to_string()),
        ];
        if let Some(bs) = &self.black_scholes {
            rows.push(("black-scholes".to_string(), fmt_value(bs.price)));
            rows.push(("delta".to_string(), fmt_value(bs.greeks.delta)));
            rows.push(("gamma".to_string(), fmt_value(bs.greeks.gamma)));
            rows.push(("vega".to_string(), fmt_value(bs.greeks.vega)));
            rows.push(("theta".to_string(), fmt_value(bs.greeks.theta)));
            rows.push(("rho".to_string(), fmt_value(bs.greeks.rho)));
        }
        rows
    }
}

fn build_spec(args: &PriceArgs) -> Result<PayoffSpec> {
    let option_type = args.option_type;
    if args.payoff != PayoffKind::Barrier && (args.barrier.is_some() || args.barrier_type.is_some()) {
        return Err(CliError::InvalidArgument(format!(
            "--barrier and --barrier-type only apply to barrier payoffs, not {}",
            args.payoff
        )));
    }

    Ok(match args.payoff {
        PayoffKind::European => PayoffSpec::european(option_type),
        PayoffKind::Asian => PayoffSpec::asian(option_type),
        PayoffKind::Lookback => PayoffSpec::lookback(option_type),
        PayoffKind::Barrier => {
            let level = args.barrier.ok_or_else(|| {
                CliError::InvalidArgument("barrier payoffs need --barrier".to_string())
            })?;
            let barrier_type = args.barrier_type.ok_or_else(|| {
                CliError::InvalidArgument("barrier payoffs need --barrier-type".to_string())
            })?;
            PayoffSpec::barrier(option_type, level, barrier_type)
        }
    })
}

/// Prices the payoff described by `args`.
pub fn evaluate(args: &PriceArgs, config: &CliConfig) -> Result<PriceReport> {
    let spec = build_spec(args)?;
    let params = args.market.to_params(args.strike)?;
    let simulation = args.simulation.to_config(config)?;
    let mut rng = PricerRng::from_optional_seed(args.simulation.seed(config));

    info!(
        payoff = %spec,
        n_paths = simulation.n_paths(),
        n_steps = simulation.n_steps(),
        seed = rng.seed(),
        "Starting Monte Carlo pricing"
    );

    let pricer = MonteCarloPricer::new(StochasticProcess::Geometric, simulation)?;
    let result = pricer.price(&params, &spec, &mut rng)?;

    // Risk-neutral drift and positive volatility are needed for the benchmark
    let black_scholes = match (spec, params.strike()) {
        (PayoffSpec::European { option_type }, Some(strike))
            if params.volatility() > 0.0 && simulation.drift_override().is_none() =>
        {
            let bs = BlackScholes::from_market(&params)?;
            Some(ClosedForm {
                price: bs.price(option_type, strike, params.maturity()),
                greeks: bs.greeks(option_type, strike, params.maturity()),
            })
        }
        _ => None,
    };

    info!(estimate = result.estimate, std_error = result.std_error, "Pricing complete");

    Ok(PriceReport {
        payoff: spec.to_string(),
        result,
        confidence_95: result.confidence_95(),
        n_steps: simulation.n_steps(),
        seed: rng.seed(),
        black_scholes,
    })
}

/// Run the price command
pub fn run(args: &PriceArgs, config: &CliConfig) -> Result<()> {
    let report = evaluate(args, config)?;
    emit(&report, config.output_format, &mut std::io::stdout().lock())
}
