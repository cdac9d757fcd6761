use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use qrl_xmss_lib::xmss::{verify, XmssBasic, XmssFast, XmssSigner};
use qrl_xmss_lib::{AddrFormatType, HashFunction};
use rand::{rngs::StdRng, RngCore, SeedableRng};

fn seed(rng: &mut StdRng) -> Vec<u8> {
    let mut seed = vec![0u8; 48];
    rng.fill_bytes(&mut seed);
    seed
}

fn message(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(7)).collect()
}

fn bench_keygen(c: &mut Criterion) {
    let mut group = c.benchmark_group("xmss_keygen");
    group.sample_size(10);
    let mut rng = StdRng::seed_from_u64(42);
    for &h in &[4u8, 8, 10] {
        group.bench_function(format!("keygen_h{h}"), |b| {
            b.iter_batched(
                || seed(&mut rng),
                |seed| XmssFast::new(&seed, h, HashFunction::SHAKE_128, AddrFormatType::SHA256_2X).unwrap(),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_sign(c: &mut Criterion) {
    let mut group = c.benchmark_group("xmss_sign");
    let msg_sizes = [32usize, 1024, 64 * 1024];

    for &h in &[8u8, 10] {
        // 2^h leaves; re-key once exhausted so every iteration signs
        let mut xmss = XmssFast::new(&[1u8; 48], h, HashFunction::SHAKE_128, AddrFormatType::SHA256_2X).unwrap();
        for &m in &msg_sizes {
            let msg = message(m);
            group.throughput(Throughput::Elements(1));
            group.bench_function(format!("sign_h{h}_m{m}"), |b| {
                b.iter(|| {
                    if xmss.remaining_signatures() == 0 {
                        xmss = XmssFast::new(&[1u8; 48], h, HashFunction::SHAKE_128, AddrFormatType::SHA256_2X)
                            .unwrap();
                    }
                    xmss.sign(&msg).unwrap()
                });
            });
        }
    }
    group.finish();
}

fn bench_sign_basic(c: &mut Criterion) {
    let mut group = c.benchmark_group("xmss_sign_basic");
    group.sample_size(10);
    let h = 6u8;
    let msg = message(32);
    group.bench_function(format!("sign_basic_h{h}"), |b| {
        b.iter_batched(
            || XmssBasic::new(&[2u8; 48], h, HashFunction::SHAKE_128, AddrFormatType::SHA256_2X).unwrap(),
            |mut xmss| xmss.sign(&msg).unwrap(),
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("xmss_verify");
    let msg_sizes = [32usize, 1024];

    for &h in &[8u8, 10] {
        let mut xmss = XmssFast::new(&[3u8; 48], h, HashFunction::SHAKE_128, AddrFormatType::SHA256_2X).unwrap();
        let pk = xmss.pk();
        for &m in &msg_sizes {
            let msg = message(m);
            let sig = xmss.sign(&msg).unwrap();
            group.throughput(Throughput::Elements(1));
            group.bench_function(format!("verify_h{h}_m{m}"), |b| {
                b.iter(|| {
                    let ok = verify(&msg, &sig, &pk).unwrap();
                    assert!(ok);
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_keygen, bench_sign, bench_sign_basic, bench_verify);
criterion_main!(benches);
