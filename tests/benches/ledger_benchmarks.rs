//! # Restricted Ledger Benchmarks
//!
//! | Path | Measures |
//! |------|----------|
//! | `can_transfer` | Coordinator verdict over both policy modules |
//! | `transfer` | Full validate, apply, notify cycle |
//! | `authorize` | EIP-712 digest plus secp256k1 recovery |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rt_04_ledger::prelude::PermitMessage;
use rt_tests::fixtures::{ctx, investor, Deployment, AGENT, CHAIN_ID, COORDINATOR, GENESIS, OWNER};
use shared_crypto::Secp256k1KeyPair;
use shared_types::{Address, U256};

fn deployment_with_holders(count: u64) -> Deployment {
    let mut d = Deployment::new().expect("deployment wires");
    for i in 0..count {
        d.accredit(investor(i));
        d.ledger
            .mint(&ctx(AGENT), investor(i), U256::from(1_000_000u64))
            .expect("mint");
    }
    d
}

fn bench_can_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("rt-02-can-transfer");
    let d = deployment_with_holders(2);

    for schedules in [0u64, 10, 100] {
        for n in 0..schedules {
            d.vesting
                .add_schedule(&ctx(OWNER), COORDINATOR, investor(0), U256::one(), &format!("s{schedules}-{n}"))
                .expect("schedule");
        }
        group.bench_with_input(BenchmarkId::new("schedules", schedules), &schedules, |b, _| {
            b.iter(|| {
                d.coordinator
                    .can_transfer(investor(0), investor(1), black_box(U256::from(10u64)), &d.ledger, GENESIS)
            })
        });
    }
    group.finish();
}

fn bench_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("rt-04-transfer");
    let mut d = deployment_with_holders(2);
    group.throughput(Throughput::Elements(1));
    group.bench_function("transfer_round_trip", |b| {
        b.iter(|| {
            d.ledger
                .transfer(&ctx(investor(0)), investor(1), U256::one())
                .expect("transfer");
            d.ledger
                .transfer(&ctx(investor(1)), investor(0), U256::one())
                .expect("transfer back");
            d.ledger.drain_events();
        })
    });
    group.finish();
}

fn bench_authorize(c: &mut Criterion) {
    let mut group = c.benchmark_group("rt-04-permit");
    let mut d = Deployment::new().expect("deployment wires");
    let key = Secp256k1KeyPair::generate();
    let owner = Address::new(key.address());
    let spender = investor(1);

    group.bench_function("authorize", |b| {
        b.iter(|| {
            let message = PermitMessage {
                owner,
                spender,
                value: U256::from(100u64),
                nonce: d.ledger.nonce_of(owner),
                deadline: GENESIS,
            };
            let digest = message.digest(&d.ledger.domain_separator(CHAIN_ID));
            let signature = key.sign_prehash(digest.as_bytes()).expect("sign").to_bytes();
            d.ledger
                .authorize(&ctx(spender), owner, spender, U256::from(100u64), GENESIS, &signature)
                .expect("authorize");
            d.ledger.drain_events();
        })
    });
    group.finish();
}

criterion_group!(benches, bench_can_transfer, bench_transfer, bench_authorize);
criterion_main!(benches);
