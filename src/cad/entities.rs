//! Geometric entities: points, lines and quad surfaces

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::{ElementTag, LineTag, PointTag, SurfaceTag};

/// A point in 3D space
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Point {
    pub tag: PointTag,
    pub pos: Vector3<f64>,
}

impl Point {
    pub fn new(tag: PointTag, pos: Vector3<f64>) -> Self {
        Self { tag, pos }
    }
}

/// True if `ends` are `a` and `b`, in either order
pub fn joins(ends: [PointTag; 2], a: PointTag, b: PointTag) -> bool {
    ends == [a, b] || ends == [b, a]
}

/// A straight line between two points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub tag: LineTag,
    pub points: [PointTag; 2],
    /// Number of divisions used when meshing
    pub ndiv: usize,
}

/// A quadrilateral surface bounded by four lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Surface {
    pub tag: SurfaceTag,
    /// Corner points in winding order
    pub points: [PointTag; 4],
    /// Edges: corner 1-2, 2-3, 3-4, 4-1
    pub edges: [LineTag; 4],
    /// Divisions along edge 1-2 (and 3-4)
    pub ndiv_i: usize,
    /// Divisions along edge 2-3 (and 4-1)
    pub ndiv_j: usize,

    /// Elements created when meshing
    #[serde(skip)]
    pub(crate) elements: Vec<ElementTag>,
}

impl Surface {
    pub fn elements(&self) -> &[ElementTag] {
        &self.elements
    }

    pub fn is_meshed(&self) -> bool {
        !self.elements.is_empty()
    }
}
