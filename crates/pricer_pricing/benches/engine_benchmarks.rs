//! Criterion benchmarks for path generation, payoff evaluation and the lattice.
//!
//! Path counts and step counts are swept independently to show how the
//! simulation scales along each axis.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::types::MarketParameters;
use pricer_models::instruments::{BarrierType, OptionType, PayoffSpec};
use pricer_models::models::StochasticProcess;
use pricer_pricing::lattice::price_american;
use pricer_pricing::mc::{simulate, MonteCarloPricer, SimulationConfig};
use pricer_pricing::rng::PricerRng;

fn params() -> MarketParameters {
    MarketParameters::with_contract(100.0, 100.0, 1.0, 0.05, 0.2).unwrap()
}

/// Benchmark ensemble generation across path counts.
fn bench_simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");
    let params = params();

    for n_paths in [1_000, 10_000, 100_000] {
        let config = SimulationConfig::new(n_paths, 50).unwrap();
        group.bench_with_input(BenchmarkId::new("gbm", n_paths), &config, |b, config| {
            b.iter(|| {
                let mut rng = PricerRng::from_seed(42);
                simulate(
                    &StochasticProcess::Geometric,
                    black_box(&params),
                    config,
                    &mut rng,
                )
                .unwrap()
            });
        });
    }

    let ou = StochasticProcess::mean_reverting(2.0, 100.0).unwrap();
    for n_steps in [10, 100, 1_000] {
        let config = SimulationConfig::new(10_000, n_steps).unwrap();
        group.bench_with_input(BenchmarkId::new("ou_steps", n_steps), &config, |b, config| {
            b.iter(|| {
                let mut rng = PricerRng::from_seed(42);
                simulate(&ou, black_box(&params), config, &mut rng).unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark end-to-end pricing per payoff kind.
fn bench_price(c: &mut Criterion) {
    let mut group = c.benchmark_group("price");
    let params = params();
    let pricer = MonteCarloPricer::new(
        StochasticProcess::Geometric,
        SimulationConfig::new(20_000, 52).unwrap(),
    )
    .unwrap();

    let specs = [
        ("european", PayoffSpec::european(OptionType::Call)),
        ("asian", PayoffSpec::asian(OptionType::Call)),
        ("lookback", PayoffSpec::lookback(OptionType::Call)),
        (
            "barrier",
            PayoffSpec::barrier(OptionType::Call, 120.0, BarrierType::UpOut),
        ),
    ];

    for (name, spec) in specs {
        group.bench_with_input(BenchmarkId::new("call", name), &spec, |b, spec| {
            b.iter(|| {
                let mut rng = PricerRng::from_seed(7);
                pricer.price(black_box(&params), spec, &mut rng).unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark backward induction across lattice depths.
fn bench_lattice(c: &mut Criterion) {
    let mut group = c.benchmark_group("lattice");
    let params = params();

    for n_steps in [100, 500, 2_000] {
        group.bench_with_input(
            BenchmarkId::new("american_put", n_steps),
            &n_steps,
            |b, &n_steps| {
                b.iter(|| price_american(black_box(&params), OptionType::Put, n_steps).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_simulate, bench_price, bench_lattice);
criterion_main!(benches);
