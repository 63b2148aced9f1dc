use voxtrace_core::prelude::*;
use voxtrace_mesh::VoxelCubeMesh;

use utilities::data_sets::sphere_grid;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn cube_mesh_of_sphere(c: &mut Criterion) {
    let (grid, _radius) = sphere_grid::<32>(Point3f::ONES);
    let voxels = grid.collect_voxels();

    c.bench_function("cube_mesh_of_sphere", |b| {
        let mut mesh = VoxelCubeMesh::default();
        b.iter(|| {
            mesh.rebuild(voxels.iter());
            black_box(mesh.positions_bytes().len());
        });
    });
}

criterion_group!(benches, cube_mesh_of_sphere);
criterion_main!(benches);
