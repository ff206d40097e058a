use criterion::{Criterion, black_box, criterion_group, criterion_main};
use modring::mod_mat::ModMatrix;
use modring::mod_poly::ModPoly;
use modring::mpoly::MPoly;

use num_bigint::BigInt;

use rand::SeedableRng;
use rand::rngs::StdRng;

fn bench_mod_mat(c: &mut Criterion) {
    // 1) one-time setup: two random 32x32 matrices over a 127-bit prime
    let modulus: BigInt = "170141183460469231731687303715884105727"
        .parse()
        .expect("parse modulus");
    let mut rng = StdRng::seed_from_u64(12345);
    let mut a = ModMatrix::new(32, 32, modulus.clone()).expect("allocate A");
    let mut b = ModMatrix::new(32, 32, modulus).expect("allocate B");
    a.randtest(&mut rng);
    b.randtest(&mut rng);

    c.bench_function("mod_mat_add", |bench| {
        bench.iter(|| black_box(a.add(&b).expect("add")))
    });

    c.bench_function("mod_mat_mul", |bench| {
        bench.iter(|| black_box(a.mul(&b).expect("mul")))
    });

    c.bench_function("mod_mat_scalar_mul_si", |bench| {
        bench.iter(|| black_box(a.scalar_mul_si(-12345)))
    });
}

fn bench_polys(c: &mut Criterion) {
    let coeffs: Vec<i64> = (1..=512).collect();
    let poly = ModPoly::from_coeffs(coeffs, 65_537).expect("build poly");

    c.bench_function("mod_poly_make_monic", |bench| {
        bench.iter(|| black_box(poly.make_monic().expect("make monic")))
    });

    let terms = (0..512u64)
        .map(|i| (i as i64 - 256, vec![i, 511 - i, i % 7]))
        .collect();
    let mpoly = MPoly::from_terms(3, terms).expect("build mpoly");
    let scalar = BigInt::from(-987_654_321i64);

    c.bench_function("mpoly_scalar_mul", |bench| {
        bench.iter(|| black_box(mpoly.scalar_mul(&scalar)))
    });
}

criterion_group!(benches, bench_mod_mat, bench_polys);
criterion_main!(benches);
