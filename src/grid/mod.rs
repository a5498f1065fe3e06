//! Model generation from a grid of 3D positions
//!
//! An [`IjkGrid`] holds the allowed X, Y and Z coordinates of a model and
//! addresses them by index triples `(i, j, k)`. Points are generated once
//! for every grid position; lines and quad surfaces are then generated on
//! demand from index ranges, and ranges select sets to load.

mod keys;
mod range;
mod selection;

pub use keys::{LineDict, LineKey, SurfaceDict, SurfaceKey};
pub use range::{Axis, IjkRange, MoveRange, Plane, RangeKind};
pub use selection::{
    points_near_polyline, set_from_surfaces, surface_tag_union, POLYLINE_TOLERANCE,
};

use log::debug;
use nalgebra::Vector3;

use crate::cad::{LineTag, PointTag, Preprocessor, SurfaceTag};
use crate::error::{GridError, GridResult};

/// Possible X, Y, Z positions of the model and the points generated on them
#[derive(Debug, Clone)]
pub struct IjkGrid {
    axes: [Vec<f64>; 3],
    moves: Vec<MoveRange>,
    /// Point tag of every position, `i + nx * (j + ny * k)`; empty until generated
    tags: Vec<PointTag>,
}

impl IjkGrid {
    /// Create a grid from the coordinate lists of the three axes
    pub fn new(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> GridResult<Self> {
        for (axis, coords) in [(Axis::X, &x), (Axis::Y, &y), (Axis::Z, &z)] {
            if coords.is_empty() {
                return Err(GridError::EmptyAxis(axis.label()));
            }
        }
        Ok(Self {
            axes: [x, y, z],
            moves: Vec::new(),
            tags: Vec::new(),
        })
    }

    /// Number of positions along each axis
    pub fn dims(&self) -> [usize; 3] {
        [self.axes[0].len(), self.axes[1].len(), self.axes[2].len()]
    }

    pub fn axis_coordinates(&self, axis: Axis) -> &[f64] {
        &self.axes[axis.index()]
    }

    pub fn last_index(&self, axis: Axis) -> usize {
        self.axes[axis.index()].len() - 1
    }

    pub fn last_x_index(&self) -> usize {
        self.last_index(Axis::X)
    }

    pub fn last_y_index(&self) -> usize {
        self.last_index(Axis::Y)
    }

    pub fn last_z_index(&self) -> usize {
        self.last_index(Axis::Z)
    }

    /// Range covering the whole grid
    pub fn full_range(&self) -> IjkRange {
        IjkRange::up_to([
            self.last_x_index(),
            self.last_y_index(),
            self.last_z_index(),
        ])
    }

    pub fn is_generated(&self) -> bool {
        !self.tags.is_empty()
    }

    /// Displacements waiting to be applied by [`IjkGrid::generate`]
    pub fn moves(&self) -> &[MoveRange] {
        &self.moves
    }

    /// Grid coordinates of a position, before any displacement
    pub fn nominal_position(&self, i: usize, j: usize, k: usize) -> GridResult<Vector3<f64>> {
        self.check_index([i, j, k])?;
        Ok(Vector3::new(self.axes[0][i], self.axes[1][j], self.axes[2][k]))
    }

    fn check_index(&self, [i, j, k]: [usize; 3]) -> GridResult<()> {
        let dims = self.dims();
        if i >= dims[0] || j >= dims[1] || k >= dims[2] {
            return Err(GridError::IndexOutOfBounds { i, j, k, dims });
        }
        Ok(())
    }

    fn check_range(&self, range: &IjkRange) -> GridResult<()> {
        self.check_index(range.max())
    }

    fn flat_index(&self, [i, j, k]: [usize; 3]) -> usize {
        let [nx, ny, _] = self.dims();
        i + nx * (j + ny * k)
    }

    /// Queue a displacement of the points in `range`, applied right after generation
    pub fn queue_displacement(
        &mut self,
        range: IjkRange,
        displacement: Vector3<f64>,
    ) -> GridResult<()> {
        if self.is_generated() {
            return Err(GridError::AlreadyGenerated);
        }
        self.check_range(&range)?;
        self.moves.push(MoveRange::new(range, displacement));
        Ok(())
    }

    /// Create one point per grid position, then apply the queued displacements
    ///
    /// Points are tagged from 1 upwards with Z as the outer loop, Y in the
    /// middle and X inner.
    pub fn generate<P: Preprocessor>(&mut self, prep: &mut P) -> GridResult<()> {
        if self.is_generated() {
            return Err(GridError::AlreadyGenerated);
        }
        let [nx, ny, nz] = self.dims();
        let mut tags = Vec::with_capacity(nx * ny * nz);
        let mut counter: PointTag = 1;
        for z in &self.axes[2] {
            for y in &self.axes[1] {
                for x in &self.axes[0] {
                    tags.push(prep.new_point(counter, Vector3::new(*x, *y, *z))?);
                    counter += 1;
                }
            }
        }
        debug!("Generated {} grid points ({}x{}x{})", tags.len(), nx, ny, nz);

        for mv in &self.moves {
            for ijk in mv.range.positions() {
                let tag = tags[self.flat_index(ijk)];
                prep.move_point(tag, &mv.displacement)?;
            }
            debug!("Moved {} by {:?}", mv.range, mv.displacement.as_slice());
        }
        // Only a grid whose moves all went through counts as generated
        self.tags = tags;
        Ok(())
    }

    /// Tag of the point generated at `(i, j, k)`
    pub fn point_tag_at(&self, i: usize, j: usize, k: usize) -> GridResult<PointTag> {
        self.tag_at([i, j, k])
    }

    fn tag_at(&self, ijk: [usize; 3]) -> GridResult<PointTag> {
        if !self.is_generated() {
            return Err(GridError::NotGenerated);
        }
        self.check_index(ijk)?;
        Ok(self.tags[self.flat_index(ijk)])
    }

    /// Labels of the unit cells of a plane range, in scan order
    pub fn surface_keys(&self, range: &IjkRange) -> GridResult<Vec<SurfaceKey>> {
        let plane = range.require_plane()?;
        if !self.is_generated() {
            return Err(GridError::NotGenerated);
        }
        self.check_range(range)?;
        let offsets = plane.corner_offsets();
        range
            .cells(plane)
            .into_iter()
            .map(|cell| {
                let mut corners = [0; 4];
                for (corner, off) in corners.iter_mut().zip(offsets) {
                    let ijk = [0, 1, 2].map(|d| cell[d] + off[d]);
                    *corner = self.tag_at(ijk)?;
                }
                Ok(SurfaceKey(corners))
            })
            .collect()
    }

    /// Labels of the unit segments of an axis range, in axis order
    pub fn line_keys(&self, range: &IjkRange) -> GridResult<Vec<LineKey>> {
        let axis = range.require_axis()?;
        if !self.is_generated() {
            return Err(GridError::NotGenerated);
        }
        self.check_range(range)?;
        let step = axis.step();
        let start = range.min();
        (0..range.extent(axis))
            .map(|n| {
                let a = [0, 1, 2].map(|d| start[d] + step[d] * n);
                let b = [0, 1, 2].map(|d| a[d] + step[d]);
                Ok(LineKey([self.tag_at(a)?, self.tag_at(b)?]))
            })
            .collect()
    }

    /// Generate the quad surfaces of a plane range
    ///
    /// Surfaces whose label is already in `dict` are skipped. New surfaces
    /// get one division in each direction and are added to `dict`. Returns
    /// the new surfaces in scan order.
    pub fn generate_surfaces_in_range<P: Preprocessor>(
        &self,
        range: &IjkRange,
        dict: &mut SurfaceDict,
        prep: &mut P,
    ) -> GridResult<Vec<SurfaceTag>> {
        let keys = self.surface_keys(range)?;
        let mut created = Vec::new();
        for key in keys {
            if dict.contains_key(&key) {
                continue;
            }
            let surface = prep.new_quad_surface(key.0)?;
            prep.set_surface_ndiv(surface, 1, 1)?;
            dict.insert(key, surface);
            created.push(surface);
        }
        debug!("Generated {} surfaces in {}", created.len(), range);
        Ok(created)
    }

    /// Generate the lines of an axis range
    ///
    /// Lines whose label is already in `dict` are skipped. New lines get one
    /// division and are added to `dict`. Returns the new lines in axis order.
    pub fn generate_lines_in_range<P: Preprocessor>(
        &self,
        range: &IjkRange,
        dict: &mut LineDict,
        prep: &mut P,
    ) -> GridResult<Vec<LineTag>> {
        let keys = self.line_keys(range)?;
        let mut created = Vec::new();
        for key in keys {
            if dict.contains_key(&key) {
                continue;
            }
            let [p1, p2] = key.0;
            let line = prep.new_line(p1, p2)?;
            prep.set_line_ndiv(line, 1)?;
            dict.insert(key, line);
            created.push(line);
        }
        debug!("Generated {} lines in {}", created.len(), range);
        Ok(created)
    }
}
