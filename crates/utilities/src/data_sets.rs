use voxtrace_core::prelude::*;
use voxtrace_storage::{GridConfig, VoxelGrid};

use rand::{rngs::StdRng, Rng, SeedableRng};

// TODO: it would be nice if all crates could share this module, but it causes this issue:
// https://github.com/rust-lang/cargo/issues/6765

/// An `N^3` grid holding a solid ball of voxels around the grid's center. Returns the grid and the ball's radius.
pub fn sphere_grid<const N: usize>(color: Point3f) -> (VoxelGrid<N, N, N>, f32) {
    let mut grid = VoxelGrid::<N, N, N>::new(GridConfig::default()).unwrap();
    let center = Point3f::fill((N as f32 - 1.0) / 2.0);
    let radius = N as f32 / 2.0 - 1.0;

    for p in grid.extent().iter_points() {
        let p = Point3f::from(p);
        if (p - center).norm() < radius {
            grid.set_voxel_at(p, color).unwrap();
        }
    }

    (grid, radius)
}

/// An `N^3` grid with a voxel at every `(i, i, i)`, colored by `i / N`.
pub fn diagonal_grid<const N: usize>() -> VoxelGrid<N, N, N> {
    let mut grid = VoxelGrid::<N, N, N>::new(GridConfig::default()).unwrap();
    for i in 0..N {
        let p = Point3f::fill(i as f32);
        grid.set_voxel_at(p, p / N as f32).unwrap();
    }

    grid
}

/// Random grid-local points inside of an `N^3` grid.
pub fn random_cells<const N: usize>(seed: u64, count: usize) -> Vec<Point3f> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|_| {
            PointN([
                rng.gen_range(0..N) as f32,
                rng.gen_range(0..N) as f32,
                rng.gen_range(0..N) as f32,
            ])
        })
        .collect()
}
