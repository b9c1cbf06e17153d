//! # Shift-Exchange Benchmarks
//!
//! | Path | Work |
//! |------|------|
//! | signature recovery | secp256k1 public-key recovery + low-s check |
//! | mint digest | five-word keccak256 |
//! | add liquidity | recover, consume nonce, mint, deposit, commit |
//! | relayed sell | recover, consume nonce, mint, swap, fee split, commit |

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use shared_types::U256;
use std::time::Duration;
use sx_01_mint_authority::{hash_for_signature, recover_signer, DevSigner};
use sx_tests::integration::fixtures::{
    nonce, Scenario, AMOUNT, PROVIDER, RELAYER, RELAY_FEE, TRADE, TRADER,
};

fn bench_signature_recovery(c: &mut Criterion) {
    let mut group = c.benchmark_group("mint-authority");
    group.measurement_time(Duration::from_secs(10));

    let signer = DevSigner::random();
    let digest = hash_for_signature(
        &[0xA0; 20],
        &[0x01; 20],
        U256::from(AMOUNT),
        &nonce(1),
        &nonce(2),
    );
    let signature = signer.sign_digest(&digest).expect("signature");

    group.bench_function("recover_signer", |b| {
        b.iter(|| black_box(recover_signer(black_box(&digest), black_box(&signature))))
    });

    group.bench_function("hash_for_signature", |b| {
        b.iter(|| {
            black_box(hash_for_signature(
                black_box(&[0xA0; 20]),
                black_box(&[0x01; 20]),
                black_box(U256::from(AMOUNT)),
                black_box(&nonce(1)),
                black_box(&nonce(2)),
            ))
        })
    });

    group.finish();
}

fn bench_adapter_calls(c: &mut Criterion) {
    let mut group = c.benchmark_group("adapters");

    group.bench_function("add_liquidity", |b| {
        b.iter_batched(
            Scenario::new,
            |scenario| {
                black_box(
                    scenario
                        .add_liquidity(PROVIDER, AMOUNT, AMOUNT, nonce(1))
                        .is_ok(),
                )
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("relayed_sell", |b| {
        b.iter_batched(
            || {
                let scenario = Scenario::seeded();
                let payload = scenario.sell_payload(TRADER, RELAY_FEE, U256::one());
                (scenario, payload)
            },
            |(scenario, payload)| {
                black_box(scenario.sell(RELAYER, &payload, TRADE, nonce(1)).is_ok())
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_signature_recovery, bench_adapter_calls);
criterion_main!(benches);
