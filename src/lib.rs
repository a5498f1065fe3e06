//! IJK Grid - model generation from a grid of 3D positions
//!
//! Structural models are often laid out on a grid: a list of allowed X,
//! Y and Z coordinates. This library addresses that grid by index triples
//! `(i, j, k)` and turns index ranges into geometry:
//! - Points at every grid position, with range displacements
//! - Lines along axis ranges and quad surfaces on plane ranges
//! - Named sets of the entities in a range
//! - Uniform and height-dependent pressure loads on the elements of a range
//!
//! Geometry is created through the [`cad::Preprocessor`] trait; [`cad::CadModel`]
//! is an in-memory implementation.
//!
//! ## Example
//! ```rust
//! use ijk_grid::prelude::*;
//! use nalgebra::Vector3;
//!
//! let mut grid = IjkGrid::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0], vec![0.0]).unwrap();
//!
//! // Raise the last column of points
//! let edge = IjkRange::new([2, 0, 0], [2, 1, 0]).unwrap();
//! grid.queue_displacement(edge, Vector3::new(0.0, 0.0, 5.0)).unwrap();
//!
//! let mut model = CadModel::new();
//! grid.generate(&mut model).unwrap();
//!
//! // Two quads in the XY plane
//! let slab = IjkRange::new([0, 0, 0], [2, 1, 0]).unwrap();
//! let mut surfaces = SurfaceDict::new();
//! let created = grid.generate_surfaces_in_range(&slab, &mut surfaces, &mut model).unwrap();
//! assert_eq!(created.len(), 2);
//!
//! // Mesh and load
//! model.mesh();
//! let load = Vector3::new(0.0, 0.0, -10.0);
//! grid.apply_uniform_load_in_range(&slab, &surfaces, "slab", &load, &mut model).unwrap();
//! ```

pub mod cad;
pub mod config;
pub mod error;
pub mod grid;
pub mod loads;

// Re-export common types
pub mod prelude {
    pub use crate::cad::{CadModel, EntitySet, MeshSummary, Preprocessor};
    pub use crate::config::{CadModelOptions, GeneratedModel, GridConfig};
    pub use crate::error::{GridError, GridResult};
    pub use crate::grid::{
        Axis, IjkGrid, IjkRange, LineDict, LineKey, MoveRange, RangeKind, SurfaceDict,
        SurfaceKey,
    };
    pub use crate::loads::{
        EarthPressure, HydrostaticPressure, PressureProvider, UniformPressure,
    };
}
