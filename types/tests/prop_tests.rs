use proptest::prelude::*;

use reserve_types::{bps_of, mul_div_floor, mul_div_floor_wide, Address, Tick, BPS_DENOMINATOR};

proptest! {
    /// Tick ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn tick_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Tick::new(a);
        let tb = Tick::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// elapsed_since never exceeds the raw difference and never underflows.
    #[test]
    fn tick_elapsed_saturating(start in 0u64..u64::MAX, now in 0u64..u64::MAX) {
        let elapsed = Tick::new(start).elapsed_since(Tick::new(now));
        prop_assert_eq!(elapsed, now.saturating_sub(start));
    }

    /// mul_div_floor agrees with the naive formula whenever the naive product fits.
    #[test]
    fn mul_div_matches_naive(
        amount in 0u128..(1u128 << 64),
        den in 1u64..1_000_000,
        num_frac in 0u64..1_000_000,
    ) {
        let num = num_frac % (den + 1);
        let naive = amount * num as u128 / den as u128;
        prop_assert_eq!(mul_div_floor(amount, num, den), Some(naive));
    }

    /// Reward rate in bps truncates exactly like principal * rate / 10_000.
    #[test]
    fn bps_matches_naive(amount in 0u128..(1u128 << 100), bps in 0u32..100_000) {
        let naive = amount * bps as u128 / BPS_DENOMINATOR;
        prop_assert_eq!(bps_of(amount, bps), Some(naive));
    }

    /// Cumulative floors are monotonic in the numerator.
    #[test]
    fn cumulative_floor_monotonic(amount in 0u128..u128::MAX / 2, n in 1u64..10_000, k in 0u64..10_000) {
        let k = k % n;
        let lo = mul_div_floor(amount, k, n).unwrap();
        let hi = mul_div_floor(amount, k + 1, n).unwrap();
        prop_assert!(lo <= hi);
        prop_assert_eq!(mul_div_floor(amount, n, n), Some(amount));
    }

    /// Address equality follows the raw string.
    #[test]
    fn address_equality(a in "[a-z0-9_]{1,16}", b in "[a-z0-9_]{1,16}") {
        prop_assert_eq!(Address::new(a.clone()) == Address::new(b.clone()), a == b);
    }
}

proptest! {
    /// The wide mul-div agrees with the narrow one on u64-sized operands.
    #[test]
    fn wide_mul_div_matches_u64_products(a in 0u128..(1u128 << 64), b in 0u64..u64::MAX, d in 1u64..u64::MAX) {
        let naive = a * b as u128 / d as u128;
        prop_assert_eq!(mul_div_floor_wide(a, b as u128, d as u128), Some(naive));
    }

    /// With b <= d the quotient never exceeds a.
    #[test]
    fn wide_mul_div_bounded_by_a(a in 0u128..u128::MAX, d in 1u128..u128::MAX, b_frac in 0u128..u128::MAX) {
        let b = b_frac % (d + 1);
        let q = mul_div_floor_wide(a, b, d).unwrap();
        prop_assert!(q <= a);
    }
}
