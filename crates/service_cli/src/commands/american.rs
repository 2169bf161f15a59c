//! American command implementation
//!
//! Prices an early-exercise option on the binomial lattice and reports the
//! European lattice value alongside it.

use clap::Args;
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::{ExerciseStyle, OptionType};
use pricer_pricing::lattice::BinomialLattice;
use serde::Serialize;
use tracing::info;

use super::{emit, fmt_value, MarketArgs, TableRows};
use crate::config::CliConfig;
use crate::Result;

/// Flags for `pathpricer american`.
#[derive(Debug, Clone, Args)]
pub struct AmericanArgs {
    /// Call or put
    #[arg(long)]
    pub option_type: OptionType,

    /// Strike
    #[arg(long)]
    pub strike: f64,

    /// Lattice depth
    #[arg(long, default_value_t = 500)]
    pub steps: usize,

    #[command(flatten)]
    pub market: MarketArgs,
}

/// Output of `pathpricer american`.
#[derive(Debug, Clone, Serialize)]
pub struct AmericanReport {
    pub option_type: OptionType,
    pub american: f64,
    pub european_lattice: f64,
    pub early_exercise_premium: f64,
    pub black_scholes: f64,
    pub n_steps: usize,
    pub up: f64,
    pub down: f64,
    pub probability: f64,
}

impl TableRows for AmericanReport {
    fn title(&self) -> String {
        format!("Binomial lattice: American {}", self.option_type)
    }

    fn rows(&self) -> Vec<(String, String)> {
        vec![
            ("american".to_string(), fmt_value(self.american)),
            ("european (lattice)".to_string(), fmt_value(self.european_lattice)),
            ("early-exercise premium".to_string(), fmt_value(self.early_exercise_premium)),
            ("black-scholes".to_string(), fmt_value(self.black_scholes)),
            ("steps".to_string(), self.n_steps.to_string()),
            ("up factor".to_string(), fmt_value(self.up)),
            ("down factor".to_string(), fmt_value(self.down)),
            ("probability".to_string(), fmt_value(self.probability)),
        ]
    }
}

/// Builds the lattice and prices both exercise styles.
pub fn evaluate(args: &AmericanArgs) -> Result<AmericanReport> {
    let params = args.market.to_params(Some(args.strike))?;
    let lattice = BinomialLattice::new(&params, args.steps)?;

    info!(
        option_type = %args.option_type,
        n_steps = args.steps,
        "Starting lattice pricing"
    );

    let american = lattice.price(args.option_type, ExerciseStyle::American);
    let european_lattice = lattice.price(args.option_type, ExerciseStyle::European);
    let black_scholes = BlackScholes::from_market(&params)?.price(
        args.option_type,
        args.strike,
        params.maturity(),
    );

    Ok(AmericanReport {
        option_type: args.option_type,
        american,
        european_lattice,
        early_exercise_premium: american - european_lattice,
        black_scholes,
        n_steps: lattice.n_steps(),
        up: lattice.up(),
        down: lattice.down(),
        probability: lattice.probability(),
    })
}

/// Run the american command
pub fn run(args: &AmericanArgs, config: &CliConfig) -> Result<()> {
    let report = evaluate(args)?;
    emit(&report, config.output_format, &mut std::io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    fn args(option_type: OptionType, steps: usize) -> AmericanArgs {
        AmericanArgs {
            option_type,
            strike: 100.0,
            steps,
            market: MarketArgs {
                spot: 100.0,
                maturity: 1.0,
                rate: 0.05,
                volatility: 0.2,
            },
        }
    }

    #[test]
    fn test_put_premium_positive() {
        let report = evaluate(&args(OptionType::Put, 500)).unwrap();
        assert!(report.early_exercise_premium > 0.0);
        assert!(report.american > report.black_scholes);
        assert!((report.american - 6.09).abs() < 0.02);
    }

    #[test]
    fn test_call_premium_vanishes_without_dividends() {
        let report = evaluate(&args(OptionType::Call, 500)).unwrap();
        assert!(report.early_exercise_premium.abs() < 1e-9);
        assert!((report.american - report.black_scholes).abs() < 0.01);
    }

    #[test]
    fn test_zero_volatility_rejected() {
        let mut flat = args(OptionType::Put, 100);
        flat.market.volatility = 0.0;
        assert!(matches!(evaluate(&flat), Err(CliError::Pricing(_))));
    }
}
