#![no_main]

use libfuzzer_sys::fuzz_target;

use reserve_staking::vesting::cumulative_release;

// Fuzz tranche arithmetic with arbitrary amounts and tranche counts.
// Cumulative releases must never panic, never go backwards, and must end
// at exactly the principal and reward.
fuzz_target!(|data: &[u8]| {
    if data.len() < 34 {
        return;
    }

    let principal = u128::from_le_bytes(data[0..16].try_into().unwrap());
    let reward = u128::from_le_bytes(data[16..32].try_into().unwrap());
    if principal.checked_add(reward).is_none() {
        return;
    }
    let tranches = u16::from_le_bytes([data[32], data[33]]).max(1) as u64;

    let mut last = (0u128, 0u128);
    let mut k = 0u64;
    for &step in &data[34..] {
        k = (k + step as u64).min(tranches);
        let next = cumulative_release(principal, reward, k, tranches);
        assert!(next.0 >= last.0 && next.1 >= last.1);
        assert!(next.0 <= principal && next.1 <= reward);
        last = next;
    }

    assert_eq!(
        cumulative_release(principal, reward, tranches, tranches),
        (principal, reward)
    );
});
