use voxtrace_core::prelude::*;
use voxtrace_search::prelude::*;
use voxtrace_storage::prelude::*;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn svo_march(c: &mut Criterion) {
    let mut group = c.benchmark_group("svo_march");
    for min_voxel_size in [0.1f32, 0.02].iter() {
        let mut svo = Svo::new(SvoConfig::default().with_min_voxel_size(*min_voxel_size)).unwrap();
        svo.construct_octree().unwrap();
        let ray = Ray::new(PointN([0.3, 0.2, 5.0]), PointN([-0.1, 0.05, -1.0]))
            .normalized()
            .unwrap();

        group.bench_with_input(
            BenchmarkId::new("index_order", min_voxel_size),
            &svo,
            |b, svo| b.iter(|| black_box(svo.march(&ray, 10.0))),
        );
        group.bench_with_input(
            BenchmarkId::new("nearest", min_voxel_size),
            &svo,
            |b, svo| b.iter(|| black_box(svo.march_nearest(&ray, 10.0))),
        );
    }
    group.finish();
}

criterion_group!(benches, svo_march);
criterion_main!(benches);
