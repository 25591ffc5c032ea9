#![no_main]

use libfuzzer_sys::fuzz_target;

use reserve_types::{mul_div_floor, mul_div_floor_wide};

// Fuzz the overflow-checked proportional helpers.
// Results must agree with each other wherever both are defined.
fuzz_target!(|data: &[u8]| {
    if data.len() < 48 {
        return;
    }

    let a = u128::from_le_bytes(data[0..16].try_into().unwrap());
    let b = u128::from_le_bytes(data[16..32].try_into().unwrap());
    let d = u128::from_le_bytes(data[32..48].try_into().unwrap());

    // These must never panic
    let wide = mul_div_floor_wide(a, b, d);
    if d == 0 {
        assert!(wide.is_none());
        return;
    }
    if b <= d {
        assert!(wide.is_some_and(|q| q <= a));
    }

    let (num, den) = (b as u64, d as u64);
    if den != 0 && u128::from(num) == b && u128::from(den) == d {
        assert_eq!(mul_div_floor(a, num, den), wide);
    }
});
