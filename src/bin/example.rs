//! IJK Grid Example - Slab and Retaining Wall

use ijk_grid::grid::{points_near_polyline, POLYLINE_TOLERANCE};
use ijk_grid::prelude::*;
use nalgebra::Vector3;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== IJK Grid Example: Slab ===\n");

    // 3 x 2 x 1 grid, last column raised by 5
    //
    //   4 ---- 5 ---- 6
    //   |      |      |
    //   1 ---- 2 ---- 3
    //
    let mut grid = IjkGrid::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0], vec![0.0])?;
    grid.queue_displacement(
        IjkRange::new([2, 0, 0], [2, 1, 0])?,
        Vector3::new(0.0, 0.0, 5.0),
    )?;

    let mut model = CadModel::new();
    grid.generate(&mut model)?;

    for p in model.points() {
        println!("  Point {}: ({:.2}, {:.2}, {:.2})", p.tag, p.pos.x, p.pos.y, p.pos.z);
    }

    let slab = IjkRange::new([0, 0, 0], [2, 1, 0])?;
    let mut surfaces = SurfaceDict::new();
    let created = grid.generate_surfaces_in_range(&slab, &mut surfaces, &mut model)?;
    println!("\n  Surfaces created: {}", created.len());
    for (key, tag) in &surfaces {
        println!("    {} -> surface {}", key, tag);
    }

    // Same range again creates nothing
    let again = grid.generate_surfaces_in_range(&slab, &mut surfaces, &mut model)?;
    println!("  Surfaces created on second pass: {}", again.len());

    println!("\n=== IJK Grid Example: Retaining Wall ===\n");

    // Wall in the XZ plane, 4 m long and 3 m high, soil on the -Y side up to z = 2.5
    let xs: Vec<f64> = (0..=4).map(|n| n as f64).collect();
    let zs: Vec<f64> = (0..=6).map(|n| n as f64 * 0.5).collect();
    let mut wall_grid = IjkGrid::new(xs, vec![0.0], zs)?;

    let mut wall_model = CadModel::with_options(CadModelOptions::default().with_default_ndiv(2));
    wall_grid.generate(&mut wall_model)?;

    let wall = IjkRange::new(
        [0, 0, 0],
        [wall_grid.last_x_index(), 0, wall_grid.last_z_index()],
    )?;
    let mut wall_surfaces = SurfaceDict::new();
    wall_grid.generate_surfaces_in_range(&wall, &mut wall_surfaces, &mut wall_model)?;
    let elements = wall_model.mesh();
    println!("  Elements meshed: {}", elements);

    let earth = EarthPressure::dry(0.5, 2.5, 20.0, Vector3::y()).with_water_table(1.0, 10.0);
    let loaded =
        wall_grid.apply_depth_varying_pressure(&wall, &wall_surfaces, "wall", &earth, &mut wall_model)?;
    println!("  Elements loaded by earth pressure: {}", loaded);

    let resultant: Vector3<f64> = wall_model
        .elements()
        .map(|e| e.total_load() * e.area())
        .sum();
    println!(
        "  Resultant thrust: ({:.2}, {:.2}, {:.2}) kN",
        resultant.x, resultant.y, resultant.z
    );

    let base = wall_grid.collect_point_set(
        &IjkRange::new([0, 0, 0], [wall_grid.last_x_index(), 0, 0])?,
        "base",
        &mut wall_model,
    )?;
    println!("  Base points: {:?}", base.points);

    // Crest of the wall, picked from the loaded set by position
    let (li, lk) = (wall_grid.last_x_index(), wall_grid.last_z_index());
    let crest = [
        wall_grid.point_tag_at(0, 0, lk)?,
        wall_grid.point_tag_at(li, 0, lk)?,
    ];
    let loaded_set = wall_model.get_set("wall")?.clone();
    let on_crest = points_near_polyline(&loaded_set, &crest, POLYLINE_TOLERANCE, &wall_model)?;
    println!("  Crest points: {:?}", on_crest);

    let summary = wall_model.summary();
    println!(
        "\n  Model: {} points, {} lines, {} surfaces, {} elements, {} sets",
        summary.num_points,
        summary.num_lines,
        summary.num_surfaces,
        summary.num_elements,
        summary.num_sets
    );

    Ok(())
}
