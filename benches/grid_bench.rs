//! Benchmarks for grid generation

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ijk_grid::prelude::*;
use nalgebra::Vector3;

fn axis(n: usize, spacing: f64) -> Vec<f64> {
    (0..n).map(|i| i as f64 * spacing).collect()
}

/// Multi-storey building: slabs at every level, walls along the grid edges
fn build_storeys(nx: usize, ny: usize, storeys: usize) -> CadModel {
    let mut grid = IjkGrid::new(axis(nx, 6.0), axis(ny, 6.0), axis(storeys + 1, 3.5)).unwrap();
    let mut model = CadModel::new();
    grid.generate(&mut model).unwrap();

    let (li, lj, lk) = (grid.last_x_index(), grid.last_y_index(), grid.last_z_index());
    let mut surfaces = SurfaceDict::new();
    for k in 1..=lk {
        let slab = IjkRange::new([0, 0, k], [li, lj, k]).unwrap();
        grid.generate_surfaces_in_range(&slab, &mut surfaces, &mut model).unwrap();
    }
    for j in [0, lj] {
        let wall = IjkRange::new([0, j, 0], [li, j, lk]).unwrap();
        grid.generate_surfaces_in_range(&wall, &mut surfaces, &mut model).unwrap();
    }
    model.mesh();

    let roof = IjkRange::new([0, 0, lk], [li, lj, lk]).unwrap();
    grid.apply_uniform_load_in_range(
        &roof,
        &surfaces,
        "roof",
        &Vector3::new(0.0, 0.0, -5.0),
        &mut model,
    )
    .unwrap();
    model
}

fn benchmark_points(c: &mut Criterion) {
    c.bench_function("generate_points_50x50x20", |b| {
        b.iter(|| {
            let mut grid = IjkGrid::new(axis(50, 1.0), axis(50, 1.0), axis(20, 1.0)).unwrap();
            let mut model = CadModel::new();
            grid.generate(&mut model).unwrap();
            black_box(model.summary())
        })
    });
}

fn benchmark_storeys(c: &mut Criterion) {
    let mut group = c.benchmark_group("storeys");
    for storeys in [2, 5, 10] {
        group.bench_function(format!("{}_storeys_10x10", storeys), |b| {
            b.iter(|| black_box(build_storeys(10, 10, storeys).summary()))
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_points, benchmark_storeys);
criterion_main!(benches);
