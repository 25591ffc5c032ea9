use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

use reserve_asset::FungibleAsset;
use reserve_nullables::NullLedger;
use reserve_staking::vesting::cumulative_release;
use reserve_staking::{Plan, Position, StakingEngine, VestingEngine};
use reserve_types::{Address, Tick};

fn bench_compute_release(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_release");

    for tranches in [1u64, 12, 365, 10_000] {
        let plan = Plan::new("bench", 1234, tranches * 10, 0, 10).unwrap();
        let principal = u64::MAX as u128 - 7;
        let reward = plan.reward_for(principal).unwrap();
        let position = Position::open(Address::new("alice"), &plan, principal, reward, Tick::ZERO);
        let now = Tick::new(tranches * 5 + 3);

        group.bench_with_input(BenchmarkId::new("tranches", tranches), &tranches, |b, _| {
            b.iter(|| {
                black_box(VestingEngine::compute_release(
                    black_box(&position),
                    black_box(&plan),
                    black_box(now),
                ))
            });
        });
    }

    group.finish();
}

fn bench_cumulative_release(c: &mut Criterion) {
    c.bench_function("cumulative_release_wide", |b| {
        b.iter(|| {
            black_box(cumulative_release(
                black_box(u128::MAX / 3),
                black_box(u128::MAX / 7),
                black_box(4999),
                black_box(10_000),
            ))
        });
    });
}

fn bench_enter_and_withdraw(c: &mut Criterion) {
    c.bench_function("engine_enter_then_withdraw", |b| {
        b.iter_batched(
            || {
                let ledger = Arc::new(NullLedger::new());
                let vault = Address::new("vault");
                for who in ["treasury", "alice"] {
                    ledger.mint(&Address::new(who), 1 << 80);
                    ledger.approve(&Address::new(who), &vault, 1 << 80).unwrap();
                }
                let mut engine = StakingEngine::new(
                    ledger,
                    vault,
                    Address::new("treasury"),
                    Address::new("ops"),
                );
                engine
                    .create_plan(&Address::new("ops"), "monthly", 1200, 120, 0, 10)
                    .unwrap();
                engine
            },
            |mut engine| {
                let alice = Address::new("alice");
                for i in 0..10u64 {
                    engine
                        .enter_staking(&alice, black_box(10_000 + i as u128), "monthly", Tick::new(i))
                        .unwrap();
                }
                for i in 0..10usize {
                    engine.withdraw_staking(&alice, i, Tick::new(200)).unwrap();
                }
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_compute_release,
    bench_cumulative_release,
    bench_enter_and_withdraw,
);
criterion_main!(benches);
