//! # Codec and Signer Benchmarks
//!
//! | Stage | Input |
//! |-------|-------|
//! | Encode | Reference transfer transaction |
//! | Digest | sha256(chain_id ‖ bytes) |
//! | Sign | 1, 2 and 4 WIF keys |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ol_01_encoding::{encode_to_vec, Encoder, MoneyFormat};
use ol_02_signing::SignedTransaction;
use shared_types::{AssetAmount, ObjectId, Operation, Time, Transaction, TransferOperation};
use std::sync::Arc;
use std::time::Duration;

const CHAIN_ID: &str = "4018d7844c78f6a6c41c6a552b898022310fc5dec06da467ee7905a8dad512c8";
const WIFS: [&str; 4] = [
    "5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ",
    "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3",
    "5JiTY3m9u1iPfoKsZdn18pnf26XvX2WnXFJckSiSaiUniNVzxLn",
    "5KYZdUEo39z3FPrtuX2QbbwGnNP5zTd7yyr2SC1j299sBCnWjss",
];

fn reference_transaction(operations: usize) -> Transaction {
    let core = |amount| AssetAmount::new(amount, ObjectId::CORE_ASSET);
    let ops: Vec<Operation> = (0..operations)
        .map(|i| {
            TransferOperation::new(
                ObjectId::new(1, 2, 974337),
                ObjectId::new(1, 2, 22805 + i as u64),
                core(1_000_000),
                core(10420),
            )
            .into()
        })
        .collect();
    Transaction::new(
        47376,
        1434635172,
        Time::from_unix(1528118217).expect("valid timestamp"),
        ops,
    )
}

// ============================================================================
// ENCODING
// ============================================================================

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");

    for operations in [1, 10, 100] {
        let tx = reference_transaction(operations);
        group.throughput(Throughput::Elements(operations as u64));
        group.bench_with_input(
            BenchmarkId::new("transaction", operations),
            &tx,
            |b, tx| b.iter(|| black_box(encode_to_vec(tx).expect("encodable"))),
        );
    }

    let money = Arc::new(MoneyFormat::new().with_symbol("BTS", 5));
    group.bench_function("money_literal", |b| {
        b.iter(|| {
            let mut encoder = Encoder::with_money_format(Arc::clone(&money));
            encoder.encode_money(black_box("1.5 BTS")).expect("valid literal");
            black_box(encoder.into_bytes())
        })
    });

    group.finish();
}

// ============================================================================
// SIGNING
// ============================================================================

fn bench_signing(c: &mut Criterion) {
    let mut group = c.benchmark_group("signing");
    group.measurement_time(Duration::from_secs(10));

    let signed = SignedTransaction::new(reference_transaction(1));
    group.bench_function("digest", |b| {
        b.iter(|| black_box(signed.digest(CHAIN_ID).expect("valid chain id")))
    });

    for keys in [1, 2, 4] {
        group.throughput(Throughput::Elements(keys as u64));
        group.bench_with_input(BenchmarkId::new("sign", keys), &keys, |b, &keys| {
            b.iter(|| {
                let mut tx = SignedTransaction::new(reference_transaction(1));
                tx.sign(&WIFS[..keys], CHAIN_ID).expect("valid keys");
                black_box(tx)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encoding, bench_signing);
criterion_main!(benches);
