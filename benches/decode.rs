use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qr_ecc::{berlekamp_massey, encode::encode, euclidean, syndrome, Polynomial};

/// A QR version-5-sized block: 62 data codewords, 24 parity codewords.
fn corrupted_block(errors: usize) -> Polynomial {
    let data: Vec<u8> = (0..62u32).map(|i| (i * 37 % 251) as u8 + 1).collect();
    let codeword = encode(&data, 24).expect("block fits GF(256)");
    let mut bytes = codeword.to_bytes();
    let len = bytes.len();
    for e in 0..errors {
        bytes[e * 7 % len] ^= (0x11 * (e as u8 + 1)) | 1;
    }
    Polynomial::new(&bytes)
}

fn bench_syndrome(c: &mut Criterion) {
    let received = corrupted_block(6);
    c.bench_function("syndrome_86_bytes", |b| {
        b.iter(|| syndrome(black_box(&received), black_box(24)))
    });
}

fn bench_berlekamp_massey(c: &mut Criterion) {
    let received = corrupted_block(6);
    c.bench_function("berlekamp_massey_6_errors", |b| {
        b.iter(|| berlekamp_massey::decode(black_box(&received), black_box(24)).unwrap())
    });
}

fn bench_euclidean(c: &mut Criterion) {
    let received = corrupted_block(6);
    c.bench_function("euclidean_6_errors", |b| {
        b.iter(|| euclidean::decode(black_box(&received), black_box(24)).unwrap())
    });
}

fn bench_clean_word(c: &mut Criterion) {
    let received = corrupted_block(0);
    c.bench_function("decode_clean_word", |b| {
        b.iter(|| berlekamp_massey::decode(black_box(&received), black_box(24)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_syndrome,
    bench_berlekamp_massey,
    bench_euclidean,
    bench_clean_word
);
criterion_main!(benches);
