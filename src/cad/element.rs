//! Quad element produced by meshing a surface

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::{ElementTag, SurfaceTag};

/// A 4-node shell element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    pub tag: ElementTag,
    /// Surface the element was meshed from
    pub surface: SurfaceTag,
    /// Corner positions in the winding order of the parent surface
    pub corners: [Vector3<f64>; 4],

    /// Uniform loads applied, global axes
    #[serde(skip)]
    pub(crate) loads: Vec<Vector3<f64>>,
}

impl Element {
    pub fn new(tag: ElementTag, surface: SurfaceTag, corners: [Vector3<f64>; 4]) -> Self {
        Self {
            tag,
            surface,
            corners,
            loads: Vec::new(),
        }
    }

    /// Average of the corner positions
    pub fn centroid(&self) -> Vector3<f64> {
        self.corners.iter().sum::<Vector3<f64>>() / 4.0
    }

    /// Area of the (possibly warped) quad, from its two diagonals
    pub fn area(&self) -> f64 {
        let d1 = self.corners[2] - self.corners[0];
        let d2 = self.corners[3] - self.corners[1];
        0.5 * d1.cross(&d2).norm()
    }

    pub fn loads(&self) -> &[Vector3<f64>] {
        &self.loads
    }

    /// Sum of all uniform loads applied to the element
    pub fn total_load(&self) -> Vector3<f64> {
        self.loads.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Element {
        Element::new(
            1,
            1,
            [
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(2.0, 0.0, 0.0),
                Vector3::new(2.0, 1.0, 0.0),
                Vector3::new(0.0, 1.0, 0.0),
            ],
        )
    }

    #[test]
    fn test_centroid_and_area() {
        let e = unit_square();
        assert_relative_eq!(e.centroid(), Vector3::new(1.0, 0.5, 0.0));
        assert_relative_eq!(e.area(), 2.0);
    }

    #[test]
    fn test_total_load() {
        let mut e = unit_square();
        assert_relative_eq!(e.total_load(), Vector3::zeros());
        e.loads.push(Vector3::new(0.0, 0.0, -1.0));
        e.loads.push(Vector3::new(1.0, 0.0, -2.0));
        assert_relative_eq!(e.total_load(), Vector3::new(1.0, 0.0, -3.0));
    }
}
