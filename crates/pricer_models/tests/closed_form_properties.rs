//! Property tests for the closed-form reference model.

use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::OptionType;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_put_call_parity(
        spot in 20.0f64..300.0,
        strike in 20.0f64..300.0,
        rate in -0.02f64..0.10,
        vol in 0.05f64..0.80,
        expiry in 0.05f64..5.0,
    ) {
        let bs = BlackScholes::new(spot, rate, vol).unwrap();
        let call = bs.price_call(strike, expiry);
        let put = bs.price_put(strike, expiry);
        let forward = spot - strike * (-rate * expiry).exp();
        prop_assert!((call - put - forward).abs() < 1e-5 * spot.max(strike));
    }

    #[test]
    fn prop_price_bounded_below_by_discounted_intrinsic(
        spot in 20.0f64..300.0,
        strike in 20.0f64..300.0,
        rate in 0.0f64..0.10,
        vol in 0.05f64..0.80,
        expiry in 0.05f64..5.0,
        is_call in any::<bool>(),
    ) {
        let option_type = if is_call { OptionType::Call } else { OptionType::Put };
        let bs = BlackScholes::new(spot, rate, vol).unwrap();
        let price = bs.price(option_type, strike, expiry);
        let forward_intrinsic =
            option_type.intrinsic(spot, strike * (-rate * expiry).exp());
        prop_assert!(price >= forward_intrinsic - 1e-5 * spot.max(strike));
    }

    #[test]
    fn prop_intrinsic_non_negative(spot in 0.01f64..1e4, strike in 0.01f64..1e4) {
        prop_assert!(OptionType::Call.intrinsic(spot, strike) >= 0.0);
        prop_assert!(OptionType::Put.intrinsic(spot, strike) >= 0.0);
    }
}
