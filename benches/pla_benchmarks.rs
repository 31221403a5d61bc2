//! Benchmark suite for Espresso minimization
//!
//! Benchmarks the full minimization pipeline on built-in covers of
//! increasing size, plus PLA parsing and the core passes in isolation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use espresso_min::espresso::{
    complement_cover, espresso, expand, irredundant, CubeContext, EspressoConfig, Family,
};
use espresso_min::{Cover, CoverType, Minimizable, PLAReader};

/// An n-input parity-like cover: every minterm with an odd popcount.
fn parity_cover(n: usize) -> Cover {
    let mut cover = Cover::new(CoverType::F);
    for m in 0u32..(1 << n) {
        if m.count_ones() % 2 == 1 {
            let inputs: Vec<Option<bool>> =
                (0..n).map(|v| Some(m & (1 << v) != 0)).collect();
            cover.add_cube(&inputs, &[Some(true)]);
        }
    }
    cover
}

/// An n-input threshold cover: minterms with at least n/2 ones. Collapses
/// well, so it exercises expand and irredundant rather than raw copying.
fn threshold_cover(n: usize) -> Cover {
    let mut cover = Cover::new(CoverType::F);
    for m in 0u32..(1 << n) {
        if m.count_ones() as usize >= n / 2 {
            let inputs: Vec<Option<bool>> =
                (0..n).map(|v| Some(m & (1 << v) != 0)).collect();
            cover.add_cube(&inputs, &[Some(true)]);
        }
    }
    cover
}

fn packed_sets(cover: &Cover) -> (CubeContext, Family, Family, Family) {
    let ctx = CubeContext::new_binary(cover.num_inputs(), cover.num_outputs()).unwrap();
    let mut f = Family::new(&ctx);
    for (inputs, outputs) in cover.cubes_iter() {
        let mut packed = ctx.new_cube();
        for (v, value) in inputs.iter().enumerate() {
            match value {
                Some(false) => espresso_min::espresso::cube::set_insert(&mut packed, ctx.first_part(v)),
                Some(true) => {
                    espresso_min::espresso::cube::set_insert(&mut packed, ctx.first_part(v) + 1)
                }
                None => {
                    espresso_min::espresso::cube::set_insert(&mut packed, ctx.first_part(v));
                    espresso_min::espresso::cube::set_insert(&mut packed, ctx.first_part(v) + 1);
                }
            }
        }
        if outputs[0] == Some(true) {
            espresso_min::espresso::cube::set_insert(
                &mut packed,
                ctx.first_part(ctx.output_var()),
            );
        }
        f.push(&packed);
    }
    let d = Family::new(&ctx);
    let r = complement_cover(&ctx, &f, None);
    (ctx, f, d, r)
}

fn bench_minimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimize");
    for n in [4usize, 6, 8] {
        let cover = threshold_cover(n);
        group.throughput(Throughput::Elements(cover.num_cubes() as u64));
        group.bench_with_input(BenchmarkId::new("threshold", n), &cover, |b, cover| {
            b.iter(|| black_box(cover.minimize().unwrap()))
        });

        let cover = parity_cover(n);
        group.bench_with_input(BenchmarkId::new("parity", n), &cover, |b, cover| {
            b.iter(|| black_box(cover.minimize().unwrap()))
        });
    }
    group.finish();
}

fn bench_passes(c: &mut Criterion) {
    let mut group = c.benchmark_group("passes");
    let cover = threshold_cover(8);
    let (ctx, f, d, r) = packed_sets(&cover);

    group.bench_function("complement", |b| {
        b.iter(|| black_box(complement_cover(&ctx, &f, None)))
    });
    group.bench_function("expand", |b| {
        b.iter(|| black_box(expand(&ctx, f.clone(), &r, false)))
    });
    let expanded = expand(&ctx, f.clone(), &r, false);
    group.bench_function("irredundant", |b| {
        b.iter(|| black_box(irredundant(&ctx, expanded.clone(), &d)))
    });
    group.bench_function("full_driver", |b| {
        b.iter(|| {
            black_box(
                espresso(&ctx, f.clone(), &d, &r, &EspressoConfig::default()).unwrap(),
            )
        })
    });
    group.finish();
}

fn bench_pla_parse(c: &mut Criterion) {
    let cover = threshold_cover(8);
    let text = {
        use espresso_min::PLAWriter;
        cover.to_pla_string(CoverType::F).unwrap()
    };
    c.bench_function("pla_parse", |b| {
        b.iter(|| black_box(Cover::from_pla_string(&text).unwrap()))
    });
}

criterion_group!(benches, bench_minimize, bench_passes, bench_pla_parse);
criterion_main!(benches);
