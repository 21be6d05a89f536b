//! Decimal rounding for reported estimates.

/// Decimals kept for odds ratios and interval bounds.
pub const RATIO_DECIMALS: i32 = 2;
/// Decimals kept for p-values.
pub const P_VALUE_DECIMALS: i32 = 4;

/// Rounds to `decimals` places, resolving ties to the even neighbour.
///
/// The tie test is applied to the scaled binary value, so `2.675` (stored as
/// `2.67499…`) rounds to `2.67`. Non-finite values pass through.
pub fn round_half_even(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(decimals);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round_ties_even() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ties_go_to_even() {
        assert_eq!(round_half_even(0.125, 2), 0.12);
        assert_eq!(round_half_even(0.375, 2), 0.38);
        assert_eq!(round_half_even(2.5, 0), 2.0);
        assert_eq!(round_half_even(3.5, 0), 4.0);
        assert_eq!(round_half_even(-0.125, 2), -0.12);
    }

    #[test]
    fn ordinary_values() {
        assert_eq!(round_half_even(2.732_050_8, RATIO_DECIMALS), 2.73);
        assert_eq!(round_half_even(0.046_72, P_VALUE_DECIMALS), 0.0467);
        assert_eq!(round_half_even(0.000_04, P_VALUE_DECIMALS), 0.0);
        assert!(round_half_even(f64::NAN, 2).is_nan());
        assert_eq!(round_half_even(f64::INFINITY, 2), f64::INFINITY);
    }

    proptest! {
        #[test]
        fn rounding_is_idempotent(value in -1.0e6f64..1.0e6, decimals in 0i32..6) {
            let once = round_half_even(value, decimals);
            prop_assert_eq!(round_half_even(once, decimals), once);
            prop_assert!((once - value).abs() <= 0.5 / 10f64.powi(decimals) + 1e-9);
        }
    }
}
