//! CAD Model - in-memory geometry registry

use std::collections::{BTreeMap, HashMap, HashSet};

use log::debug;
use nalgebra::Vector3;
use serde::Serialize;

use super::{
    Element, ElementTag, EntitySet, Line, LineTag, Point, PointTag, Preprocessor, Surface,
    SurfaceTag,
};
use crate::config::CadModelOptions;
use crate::error::{GridError, GridResult};

/// Entity counts of a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MeshSummary {
    pub num_points: usize,
    pub num_lines: usize,
    pub num_surfaces: usize,
    pub num_elements: usize,
    pub num_sets: usize,
}

/// Points, lines, surfaces, elements and named sets of a model
#[derive(Debug, Clone, Serialize)]
pub struct CadModel {
    pub options: CadModelOptions,
    points: BTreeMap<PointTag, Point>,
    lines: BTreeMap<LineTag, Line>,
    surfaces: BTreeMap<SurfaceTag, Surface>,
    elements: BTreeMap<ElementTag, Element>,
    sets: BTreeMap<String, EntitySet>,

    /// Line lookup by sorted end points
    #[serde(skip)]
    line_index: HashMap<[PointTag; 2], LineTag>,
    #[serde(skip)]
    next_line: LineTag,
    #[serde(skip)]
    next_surface: SurfaceTag,
    #[serde(skip)]
    next_element: ElementTag,
}

impl Default for CadModel {
    fn default() -> Self {
        Self::new()
    }
}

fn line_index_key(a: PointTag, b: PointTag) -> [PointTag; 2] {
    if a <= b {
        [a, b]
    } else {
        [b, a]
    }
}

impl CadModel {
    /// Create a new empty model
    pub fn new() -> Self {
        Self::with_options(CadModelOptions::default())
    }

    pub fn with_options(options: CadModelOptions) -> Self {
        Self {
            options,
            points: BTreeMap::new(),
            lines: BTreeMap::new(),
            surfaces: BTreeMap::new(),
            elements: BTreeMap::new(),
            sets: BTreeMap::new(),
            line_index: HashMap::new(),
            next_line: 1,
            next_surface: 1,
            next_element: 1,
        }
    }

    // ========================
    // Queries
    // ========================

    pub fn point(&self, tag: PointTag) -> GridResult<&Point> {
        self.points.get(&tag).ok_or(GridError::PointNotFound(tag))
    }

    pub fn line(&self, tag: LineTag) -> GridResult<&Line> {
        self.lines.get(&tag).ok_or(GridError::LineNotFound(tag))
    }

    pub fn surface(&self, tag: SurfaceTag) -> GridResult<&Surface> {
        self.surfaces
            .get(&tag)
            .ok_or_else(|| GridError::SurfaceNotFound(tag.to_string()))
    }

    pub fn element(&self, tag: ElementTag) -> GridResult<&Element> {
        self.elements.get(&tag).ok_or(GridError::ElementNotFound(tag))
    }

    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.points.values()
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    pub fn surfaces(&self) -> impl Iterator<Item = &Surface> {
        self.surfaces.values()
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Tags of every line in the model
    pub fn line_tags(&self) -> Vec<LineTag> {
        self.lines.keys().copied().collect()
    }

    /// Line joining two points, in either direction
    pub fn find_line(&self, a: PointTag, b: PointTag) -> Option<LineTag> {
        self.line_index.get(&line_index_key(a, b)).copied()
    }

    pub fn summary(&self) -> MeshSummary {
        MeshSummary {
            num_points: self.points.len(),
            num_lines: self.lines.len(),
            num_surfaces: self.surfaces.len(),
            num_elements: self.elements.len(),
            num_sets: self.sets.len(),
        }
    }

    // ========================
    // Meshing
    // ========================

    /// Mesh every surface not yet meshed into `ndiv_i x ndiv_j` quads
    ///
    /// Returns the number of elements created.
    pub fn mesh(&mut self) -> usize {
        let mut created = 0;
        for surface in self.surfaces.values_mut() {
            if surface.is_meshed() {
                continue;
            }
            let corners = surface.points.map(|p| self.points[&p].pos);
            let (ni, nj) = (surface.ndiv_i.max(1), surface.ndiv_j.max(1));
            let at = |a: usize, b: usize| {
                let u = a as f64 / ni as f64;
                let v = b as f64 / nj as f64;
                corners[0] * ((1.0 - u) * (1.0 - v))
                    + corners[1] * (u * (1.0 - v))
                    + corners[2] * (u * v)
                    + corners[3] * ((1.0 - u) * v)
            };
            for a in 0..ni {
                for b in 0..nj {
                    let tag = self.next_element;
                    self.next_element += 1;
                    let quad = [at(a, b), at(a + 1, b), at(a + 1, b + 1), at(a, b + 1)];
                    self.elements
                        .insert(tag, Element::new(tag, surface.tag, quad));
                    surface.elements.push(tag);
                    created += 1;
                }
            }
        }
        debug!("Meshed {} elements", created);
        created
    }
}

impl Preprocessor for CadModel {
    fn new_point(&mut self, tag: PointTag, pos: Vector3<f64>) -> GridResult<PointTag> {
        if self.points.contains_key(&tag) {
            return Err(GridError::DuplicateTag(tag));
        }
        self.points.insert(tag, Point::new(tag, pos));
        Ok(tag)
    }

    fn point_position(&self, tag: PointTag) -> GridResult<Vector3<f64>> {
        Ok(self.point(tag)?.pos)
    }

    fn move_point(&mut self, tag: PointTag, displacement: &Vector3<f64>) -> GridResult<()> {
        let point = self
            .points
            .get_mut(&tag)
            .ok_or(GridError::PointNotFound(tag))?;
        point.pos += displacement;
        Ok(())
    }

    fn new_line(&mut self, p1: PointTag, p2: PointTag) -> GridResult<LineTag> {
        for p in [p1, p2] {
            if !self.points.contains_key(&p) {
                return Err(GridError::PointNotFound(p));
            }
        }
        if p1 == p2 {
            return Err(GridError::InvalidInput(format!(
                "line end points coincide ({p1})"
            )));
        }
        if let Some(existing) = self.find_line(p1, p2) {
            debug!("Reusing line {} between points {} and {}", existing, p1, p2);
            return Ok(existing);
        }
        let tag = self.next_line;
        self.next_line += 1;
        self.lines.insert(
            tag,
            Line {
                tag,
                points: [p1, p2],
                ndiv: self.options.default_ndiv,
            },
        );
        self.line_index.insert(line_index_key(p1, p2), tag);
        Ok(tag)
    }

    fn line_endpoints(&self, line: LineTag) -> GridResult<[PointTag; 2]> {
        Ok(self.line(line)?.points)
    }

    fn set_line_ndiv(&mut self, line: LineTag, ndiv: usize) -> GridResult<()> {
        if ndiv == 0 {
            return Err(GridError::InvalidInput("ndiv must be positive".to_string()));
        }
        let line = self
            .lines
            .get_mut(&line)
            .ok_or(GridError::LineNotFound(line))?;
        line.ndiv = ndiv;
        Ok(())
    }

    fn new_quad_surface(&mut self, points: [PointTag; 4]) -> GridResult<SurfaceTag> {
        let mut edges = [0; 4];
        for (n, edge) in edges.iter_mut().enumerate() {
            *edge = self.new_line(points[n], points[(n + 1) % 4])?;
        }
        let tag = self.next_surface;
        self.next_surface += 1;
        let ndiv_i = self.lines[&edges[0]].ndiv;
        let ndiv_j = self.lines[&edges[1]].ndiv;
        self.surfaces.insert(
            tag,
            Surface {
                tag,
                points,
                edges,
                ndiv_i,
                ndiv_j,
                elements: Vec::new(),
            },
        );
        Ok(tag)
    }

    fn set_surface_ndiv(
        &mut self,
        surface: SurfaceTag,
        ndiv_i: usize,
        ndiv_j: usize,
    ) -> GridResult<()> {
        if ndiv_i == 0 || ndiv_j == 0 {
            return Err(GridError::InvalidInput("ndiv must be positive".to_string()));
        }
        let s = self
            .surfaces
            .get_mut(&surface)
            .ok_or_else(|| GridError::SurfaceNotFound(surface.to_string()))?;
        let edges = s.edges;
        let mut pending: Vec<(LineTag, usize)> = edges
            .into_iter()
            .enumerate()
            .map(|(n, edge)| (edge, if n % 2 == 0 { ndiv_i } else { ndiv_j }))
            .collect();

        // A surface sharing an edge takes its division in that direction,
        // which moves on to its opposite edge and so across the strip
        let mut done = HashSet::new();
        while let Some((edge, ndiv)) = pending.pop() {
            if !done.insert(edge) {
                continue;
            }
            self.set_line_ndiv(edge, ndiv)?;
            for other in self.surfaces.values_mut() {
                let Some(n) = other.edges.iter().position(|e| *e == edge) else {
                    continue;
                };
                if n % 2 == 0 {
                    other.ndiv_i = ndiv;
                } else {
                    other.ndiv_j = ndiv;
                }
                pending.push((other.edges[(n + 2) % 4], ndiv));
            }
        }
        Ok(())
    }

    fn define_set(&mut self, name: &str) -> &mut EntitySet {
        self.sets
            .entry(name.to_string())
            .or_insert_with(|| EntitySet::new(name))
    }

    fn get_set(&self, name: &str) -> GridResult<&EntitySet> {
        self.sets
            .get(name)
            .ok_or_else(|| GridError::SetNotFound(name.to_string()))
    }

    fn fill_downwards(&mut self, name: &str) -> GridResult<()> {
        let set = self
            .sets
            .get_mut(name)
            .ok_or_else(|| GridError::SetNotFound(name.to_string()))?;
        for tag in set.surfaces.clone() {
            let surface = self
                .surfaces
                .get(&tag)
                .ok_or_else(|| GridError::SurfaceNotFound(tag.to_string()))?;
            set.lines.extend(surface.edges);
            set.points.extend(surface.points);
            set.elements.extend(surface.elements.iter().copied());
        }
        for tag in set.lines.clone() {
            let line = self.lines.get(&tag).ok_or(GridError::LineNotFound(tag))?;
            set.points.extend(line.points);
        }
        Ok(())
    }

    fn element_centroid(&self, element: ElementTag) -> GridResult<Vector3<f64>> {
        Ok(self.element(element)?.centroid())
    }

    fn apply_uniform_load_global(
        &mut self,
        element: ElementTag,
        load: &Vector3<f64>,
    ) -> GridResult<()> {
        let e = self
            .elements
            .get_mut(&element)
            .ok_or(GridError::ElementNotFound(element))?;
        e.loads.push(*load);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_model() -> CadModel {
        let mut model = CadModel::new();
        let coords = [(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)];
        for (n, (x, y)) in coords.iter().enumerate() {
            model.new_point(n + 1, Vector3::new(*x, *y, 0.0)).unwrap();
        }
        model
    }

    #[test]
    fn test_duplicate_point_rejected() {
        let mut model = square_model();
        let err = model.new_point(1, Vector3::zeros()).unwrap_err();
        assert!(matches!(err, GridError::DuplicateTag(1)));
    }

    #[test]
    fn test_line_reused_in_either_order() {
        let mut model = square_model();
        let l1 = model.new_line(1, 2).unwrap();
        let l2 = model.new_line(2, 1).unwrap();
        assert_eq!(l1, l2);
        assert_eq!(model.summary().num_lines, 1);
        assert_eq!(model.line(l1).unwrap().ndiv, model.options.default_ndiv);
    }

    #[test]
    fn test_surface_creates_edges() {
        let mut model = square_model();
        let s = model.new_quad_surface([1, 2, 3, 4]).unwrap();
        let surface = model.surface(s).unwrap();
        assert_eq!(model.summary().num_lines, 4);
        assert_eq!(model.line(surface.edges[3]).unwrap().points, [4, 1]);
    }

    #[test]
    fn test_surface_ndiv_propagates_to_edges() {
        let mut model = square_model();
        let s = model.new_quad_surface([1, 2, 3, 4]).unwrap();
        model.set_surface_ndiv(s, 2, 3).unwrap();
        let edges = model.surface(s).unwrap().edges;
        let ndivs: Vec<_> = edges.iter().map(|l| model.line(*l).unwrap().ndiv).collect();
        assert_eq!(ndivs, vec![2, 3, 2, 3]);
    }

    #[test]
    fn test_surface_ndiv_carries_across_shared_edge() {
        let mut model = square_model();
        model.new_point(5, Vector3::new(4.0, 0.0, 0.0)).unwrap();
        model.new_point(6, Vector3::new(4.0, 2.0, 0.0)).unwrap();
        let left = model.new_quad_surface([1, 2, 3, 4]).unwrap();
        // Edge 2-3 is shared: second edge of `left`, fourth of `right`
        let right = model.new_quad_surface([2, 5, 6, 3]).unwrap();

        model.set_surface_ndiv(left, 4, 3).unwrap();
        let r = model.surface(right).unwrap();
        assert_eq!((r.ndiv_i, r.ndiv_j), (4, 3));

        model.set_surface_ndiv(right, 1, 1).unwrap();
        let l = model.surface(left).unwrap();
        assert_eq!((l.ndiv_i, l.ndiv_j), (4, 1));
        for edge in l.edges {
            let line = model.line(edge).unwrap();
            let along_i = line.points == [1, 2] || line.points == [3, 4];
            let expected = if along_i {
                4
            } else {
                1
            };
            assert_eq!(line.ndiv, expected, "edge {:?}", line.points);
        }

        // Conforming divisions along the shared edge
        model.mesh();
        assert_eq!(model.surface(left).unwrap().elements().len(), 4);
        assert_eq!(model.surface(right).unwrap().elements().len(), 1);
    }

    #[test]
    fn test_mesh_bilinear() {
        let mut model = square_model();
        let s = model.new_quad_surface([1, 2, 3, 4]).unwrap();
        model.set_surface_ndiv(s, 2, 2).unwrap();
        assert_eq!(model.mesh(), 4);
        // Already meshed surfaces are skipped
        assert_eq!(model.mesh(), 0);

        let first = model.element(1).unwrap();
        assert_relative_eq!(first.centroid(), Vector3::new(0.5, 0.5, 0.0));
        let total: f64 = model.elements().map(|e| e.area()).sum();
        assert_relative_eq!(total, 4.0);
    }

    #[test]
    fn test_fill_downwards() {
        let mut model = square_model();
        let s = model.new_quad_surface([1, 2, 3, 4]).unwrap();
        model.set_surface_ndiv(s, 1, 1).unwrap();
        model.mesh();
        model.define_set("slab").surfaces.insert(s);
        model.fill_downwards("slab").unwrap();

        let set = model.get_set("slab").unwrap();
        assert_eq!(set.lines.len(), 4);
        assert_eq!(set.points.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(set.elements.len(), 1);
    }

    #[test]
    fn test_fill_downwards_missing_set() {
        let mut model = square_model();
        assert!(matches!(
            model.fill_downwards("nope"),
            Err(GridError::SetNotFound(_))
        ));
    }

    #[test]
    fn test_uniform_load_accumulates() {
        let mut model = square_model();
        model.new_quad_surface([1, 2, 3, 4]).unwrap();
        model.mesh();
        let load = Vector3::new(0.0, 0.0, -10.0);
        let tags: Vec<_> = model.elements().map(|e| e.tag).collect();
        for tag in &tags {
            model.apply_uniform_load_global(*tag, &load).unwrap();
            model.apply_uniform_load_global(*tag, &load).unwrap();
        }
        for e in model.elements() {
            assert_relative_eq!(e.total_load(), Vector3::new(0.0, 0.0, -20.0));
        }
    }
}
