//! Benchmarks for the SOLMAE signature
//!
//! Key generation, signing and verification for both parameter sets, with
//! signing and verification measured over several message sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use solmae_params::pqc::solmae::{Solmae256Params, Solmae512Params};
use solmae_sign::{keygen, sign, verify};

/// Message sizes to benchmark (in bytes)
const MESSAGE_SIZES: &[usize] = &[32, 1024, 16384];

fn bench_keygen(c: &mut Criterion) {
    let mut group = c.benchmark_group("solmae_keygen");
    let mut rng = ChaCha20Rng::from_seed([42u8; 32]);

    group.bench_function("solmae256", |b| {
        b.iter(|| black_box(keygen::<Solmae256Params, _>(&mut rng).unwrap()))
    });
    group.bench_function("solmae512", |b| {
        b.iter(|| black_box(keygen::<Solmae512Params, _>(&mut rng).unwrap()))
    });

    group.finish();
}

fn bench_sign_verify(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
    let (pk, sk) = keygen::<Solmae256Params, _>(&mut rng).unwrap();

    let mut group = c.benchmark_group("solmae256");
    for &size in MESSAGE_SIZES {
        let message = vec![0xA5u8; size];
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("sign", size), &message, |b, msg| {
            b.iter(|| black_box(sign::<Solmae256Params, _>(&sk, msg, &mut rng).unwrap()))
        });

        let sig = sign::<Solmae256Params, _>(&sk, &message, &mut rng).unwrap();
        group.bench_with_input(BenchmarkId::new("verify", size), &message, |b, msg| {
            b.iter(|| black_box(verify::<Solmae256Params>(&pk, msg, &sig).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_keygen, bench_sign_verify);
criterion_main!(benches);
