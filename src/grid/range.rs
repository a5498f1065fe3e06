//! Index ranges over the grid

use std::fmt;
use std::ops::RangeInclusive;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};

/// Global axis of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Position of the axis in an (i, j, k) triple
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn label(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        }
    }

    /// Unit step along this axis in index space
    pub(crate) fn step(self) -> [usize; 3] {
        match self {
            Axis::X => [1, 0, 0],
            Axis::Y => [0, 1, 0],
            Axis::Z => [0, 0, 1],
        }
    }
}

/// Coordinate plane containing the surfaces of a range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    Xy,
    Xz,
    Yz,
}

impl Plane {
    /// The two free axes, outer scan axis first
    pub fn axes(self) -> (Axis, Axis) {
        match self {
            Plane::Xy => (Axis::X, Axis::Y),
            Plane::Xz => (Axis::X, Axis::Z),
            Plane::Yz => (Axis::Y, Axis::Z),
        }
    }

    /// Corner offsets of a unit cell in winding order
    pub(crate) fn corner_offsets(self) -> [[usize; 3]; 4] {
        match self {
            Plane::Xy => [[0, 0, 0], [1, 0, 0], [1, 1, 0], [0, 1, 0]],
            Plane::Xz => [[0, 0, 0], [0, 0, 1], [1, 0, 1], [1, 0, 0]],
            Plane::Yz => [[0, 0, 0], [0, 1, 0], [0, 1, 1], [0, 0, 1]],
        }
    }
}

/// Shape of a range in index space, computed from its degenerate dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKind {
    XyPlane,
    XzPlane,
    YzPlane,
    XAxis,
    YAxis,
    ZAxis,
    /// Degenerate in all three dimensions
    Point,
    /// Degenerate in none
    Volume,
}

impl RangeKind {
    pub fn plane(self) -> Option<Plane> {
        match self {
            RangeKind::XyPlane => Some(Plane::Xy),
            RangeKind::XzPlane => Some(Plane::Xz),
            RangeKind::YzPlane => Some(Plane::Yz),
            _ => None,
        }
    }

    pub fn axis(self) -> Option<Axis> {
        match self {
            RangeKind::XAxis => Some(Axis::X),
            RangeKind::YAxis => Some(Axis::Y),
            RangeKind::ZAxis => Some(Axis::Z),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct IjkRangeData {
    min: [usize; 3],
    max: [usize; 3],
}

impl TryFrom<IjkRangeData> for IjkRange {
    type Error = GridError;

    fn try_from(data: IjkRangeData) -> GridResult<Self> {
        IjkRange::new(data.min, data.max)
    }
}

/// Axis-aligned box of grid indices `[min, max]`, both ends included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IjkRangeData")]
pub struct IjkRange {
    min: [usize; 3],
    max: [usize; 3],
}

impl IjkRange {
    /// Create a range, checking `min[d] <= max[d]` on every dimension
    pub fn new(min: [usize; 3], max: [usize; 3]) -> GridResult<Self> {
        if (0..3).any(|d| min[d] > max[d]) {
            return Err(GridError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Range holding a single grid position
    pub fn single(ijk: [usize; 3]) -> Self {
        Self { min: ijk, max: ijk }
    }

    /// Range from the grid origin up to `max`
    pub fn up_to(max: [usize; 3]) -> Self {
        Self { min: [0; 3], max }
    }

    pub fn min(&self) -> [usize; 3] {
        self.min
    }

    pub fn max(&self) -> [usize; 3] {
        self.max
    }

    /// Inclusive index range along one axis
    pub fn axis_range(&self, axis: Axis) -> RangeInclusive<usize> {
        let d = axis.index();
        self.min[d]..=self.max[d]
    }

    pub fn i_range(&self) -> RangeInclusive<usize> {
        self.axis_range(Axis::X)
    }

    pub fn j_range(&self) -> RangeInclusive<usize> {
        self.axis_range(Axis::Y)
    }

    pub fn k_range(&self) -> RangeInclusive<usize> {
        self.axis_range(Axis::Z)
    }

    /// Number of unit cells along an axis
    pub fn extent(&self, axis: Axis) -> usize {
        let d = axis.index();
        self.max[d] - self.min[d]
    }

    pub fn kind(&self) -> RangeKind {
        let flat = [
            self.min[0] == self.max[0],
            self.min[1] == self.max[1],
            self.min[2] == self.max[2],
        ];
        match flat {
            [false, false, true] => RangeKind::XyPlane,
            [false, true, false] => RangeKind::XzPlane,
            [true, false, false] => RangeKind::YzPlane,
            [false, true, true] => RangeKind::XAxis,
            [true, false, true] => RangeKind::YAxis,
            [true, true, false] => RangeKind::ZAxis,
            [true, true, true] => RangeKind::Point,
            [false, false, false] => RangeKind::Volume,
        }
    }

    /// Plane of the range, or `NotAPlane`
    pub fn require_plane(&self) -> GridResult<Plane> {
        self.kind()
            .plane()
            .ok_or_else(|| GridError::NotAPlane(self.to_string()))
    }

    /// Free axis of the range, or `NotAnAxis`
    pub fn require_axis(&self) -> GridResult<Axis> {
        self.kind()
            .axis()
            .ok_or_else(|| GridError::NotAnAxis(self.to_string()))
    }

    /// Every index triple in the range, i outermost and k innermost
    pub fn positions(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.i_range().flat_map(move |i| {
            self.j_range()
                .flat_map(move |j| self.k_range().map(move |k| [i, j, k]))
        })
    }

    /// Lower corner of every unit cell of a plane range, in scan order
    pub(crate) fn cells(&self, plane: Plane) -> Vec<[usize; 3]> {
        let (outer, inner) = plane.axes();
        let (o, n) = (outer.index(), inner.index());
        let mut cells = Vec::with_capacity(self.extent(outer) * self.extent(inner));
        for a in self.min[o]..self.max[o] {
            for b in self.min[n]..self.max[n] {
                let mut ijk = self.min;
                ijk[o] = a;
                ijk[n] = b;
                cells.push(ijk);
            }
        }
        cells
    }
}

impl fmt::Display for IjkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IRange: {:?} JRange: {:?} KRange: {:?}",
            self.i_range(),
            self.j_range(),
            self.k_range()
        )
    }
}

/// Displacement applied to every point of a range right after generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRange {
    pub range: IjkRange,
    pub displacement: Vector3<f64>,
}

impl MoveRange {
    pub fn new(range: IjkRange, displacement: Vector3<f64>) -> Self {
        Self {
            range,
            displacement,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_above_max_rejected() {
        let err = IjkRange::new([0, 2, 0], [1, 1, 0]).unwrap_err();
        assert!(matches!(err, GridError::InvalidRange { .. }));
    }

    #[test]
    fn test_kind_detection() {
        let r = |min, max| IjkRange::new(min, max).unwrap().kind();
        assert_eq!(r([0, 0, 0], [2, 1, 0]), RangeKind::XyPlane);
        assert_eq!(r([0, 1, 0], [2, 1, 3]), RangeKind::XzPlane);
        assert_eq!(r([1, 0, 0], [1, 1, 3]), RangeKind::YzPlane);
        assert_eq!(r([0, 0, 0], [2, 0, 0]), RangeKind::XAxis);
        assert_eq!(r([0, 0, 0], [0, 4, 0]), RangeKind::YAxis);
        assert_eq!(r([0, 0, 0], [0, 0, 1]), RangeKind::ZAxis);
        assert_eq!(r([1, 1, 1], [1, 1, 1]), RangeKind::Point);
        assert_eq!(r([0, 0, 0], [1, 1, 1]), RangeKind::Volume);
    }

    #[test]
    fn test_cells_scan_order() {
        let range = IjkRange::new([0, 0, 2], [2, 1, 2]).unwrap();
        let cells = range.cells(Plane::Xy);
        assert_eq!(cells, vec![[0, 0, 2], [1, 0, 2]]);

        let range = IjkRange::new([1, 0, 0], [1, 2, 1]).unwrap();
        assert_eq!(range.cells(Plane::Yz), vec![[1, 0, 0], [1, 1, 0]]);
    }

    #[test]
    fn test_positions_inclusive() {
        let range = IjkRange::new([0, 0, 0], [1, 1, 0]).unwrap();
        let all: Vec<_> = range.positions().collect();
        assert_eq!(all, vec![[0, 0, 0], [0, 1, 0], [1, 0, 0], [1, 1, 0]]);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: IjkRange = serde_json::from_str(r#"{"min":[0,0,0],"max":[1,1,0]}"#).unwrap();
        assert_eq!(ok.max(), [1, 1, 0]);
        let bad = serde_json::from_str::<IjkRange>(r#"{"min":[2,0,0],"max":[1,1,0]}"#);
        assert!(bad.is_err());
    }
}
