//! Geometry registry interface and the in-memory model implementing it
//!
//! The grid builder never owns geometric entities. It creates and queries
//! them through [`Preprocessor`], so any finite-element engine exposing
//! point/line/surface registries, named sets and element loads can sit
//! behind it. [`CadModel`] is the in-memory implementation.

mod element;
mod entities;
mod model;
mod set;

pub use element::Element;
pub use entities::{joins, Line, Point, Surface};
pub use model::{CadModel, MeshSummary};
pub use set::EntitySet;

use nalgebra::Vector3;

use crate::error::GridResult;

pub type PointTag = usize;
pub type LineTag = usize;
pub type SurfaceTag = usize;
pub type ElementTag = usize;

/// Call interface into the geometry registries of a finite-element engine
pub trait Preprocessor {
    /// Create a point with an explicit tag
    fn new_point(&mut self, tag: PointTag, pos: Vector3<f64>) -> GridResult<PointTag>;

    fn point_position(&self, tag: PointTag) -> GridResult<Vector3<f64>>;

    /// Translate an existing point in place
    fn move_point(&mut self, tag: PointTag, displacement: &Vector3<f64>) -> GridResult<()>;

    /// Create a line between two existing points
    fn new_line(&mut self, p1: PointTag, p2: PointTag) -> GridResult<LineTag>;

    fn line_endpoints(&self, line: LineTag) -> GridResult<[PointTag; 2]>;

    fn set_line_ndiv(&mut self, line: LineTag, ndiv: usize) -> GridResult<()>;

    /// Create a quadrilateral surface from four points in winding order
    fn new_quad_surface(&mut self, points: [PointTag; 4]) -> GridResult<SurfaceTag>;

    fn set_surface_ndiv(&mut self, surface: SurfaceTag, ndiv_i: usize, ndiv_j: usize)
        -> GridResult<()>;

    /// Get the named set, creating it empty when it does not exist
    fn define_set(&mut self, name: &str) -> &mut EntitySet;

    fn get_set(&self, name: &str) -> GridResult<&EntitySet>;

    /// Add to the set the lines, points and elements of its surfaces
    fn fill_downwards(&mut self, name: &str) -> GridResult<()>;

    fn element_centroid(&self, element: ElementTag) -> GridResult<Vector3<f64>>;

    /// Apply a uniform load given in global axes to an element
    fn apply_uniform_load_global(&mut self, element: ElementTag, load: &Vector3<f64>)
        -> GridResult<()>;
}
