use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use strata_world::{NoiseField, OceanIndex, World, WorldGenParams, build_chunk_column_plan};

fn bench_fbm(c: &mut Criterion) {
    let mut group = c.benchmark_group("noise_fbm");
    let field = NoiseField::new(1337);
    group.bench_function("sample2_5oct_32x32", |b| {
        b.iter(|| {
            let mut acc = 0.0f32;
            for y in 0..32 {
                for x in 0..32 {
                    acc += field.sample2(x as f32, y as f32, 900.0, 5);
                }
            }
            black_box(acc)
        })
    });
    group.bench_function("sample3_2oct_32x32x8", |b| {
        b.iter(|| {
            let mut acc = 0.0f32;
            for z in 0..8 {
                for y in 0..32 {
                    for x in 0..32 {
                        acc += field.sample3(x as f32, y as f32, z as f32 * 2.2, 40.0, 2);
                    }
                }
            }
            black_box(acc)
        })
    });
    group.finish();
}

fn bench_small_world(c: &mut Criterion) {
    let mut group = c.benchmark_group("small_world");
    let world = World::new(WorldGenParams::small());
    let ctx = world.make_gen_ctx();
    group.bench_function("ocean_index_r64", |b| {
        b.iter(|| black_box(OceanIndex::build(&ctx).stats()))
    });
    let ocean = OceanIndex::build(&ctx);
    group.bench_function("column_plan_32x32", |b| {
        b.iter(|| black_box(build_chunk_column_plan(&ctx, &ocean, -16, -16, 32).columns.len()))
    });
    group.finish();
}

criterion_group!(benches, bench_fbm, bench_small_world);
criterion_main!(benches);
