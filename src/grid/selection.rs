//! Sets, line searches and loads over grid ranges

use std::collections::BTreeSet;

use log::{debug, warn};
use nalgebra::Vector3;

use super::{IjkGrid, IjkRange, SurfaceDict};
use crate::cad::{joins, EntitySet, LineTag, PointTag, Preprocessor, SurfaceTag};
use crate::error::{GridError, GridResult};
use crate::loads::PressureProvider;

/// Named set emptied of anything a previous definition left in it
fn fresh_set<'a, P: Preprocessor>(prep: &'a mut P, name: &str) -> &'a mut EntitySet {
    let set = prep.define_set(name);
    if !set.is_empty() {
        warn!("Redefining set '{}'", name);
        set.clear();
    }
    set
}

/// Named set holding `surfaces` and everything below them
pub fn set_from_surfaces<P: Preprocessor>(
    surfaces: &[SurfaceTag],
    name: &str,
    prep: &mut P,
) -> GridResult<EntitySet> {
    fresh_set(prep, name).surfaces.extend(surfaces.iter().copied());
    prep.fill_downwards(name)?;
    Ok(prep.get_set(name)?.clone())
}

/// Sorted tags of the surfaces in either set
pub fn surface_tag_union(a: &EntitySet, b: &EntitySet) -> Vec<SurfaceTag> {
    a.surfaces.union(&b.surfaces).copied().collect()
}

/// Distance under which a point counts as lying on a polyline
pub const POLYLINE_TOLERANCE: f64 = 0.01;

fn distance_to_segment(p: &Vector3<f64>, a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

/// Points of `set` closer than `tol` to the polyline through `polyline`
///
/// The polyline vertices are point tags, taken in order. Returns sorted tags
/// without repeats; a polyline of fewer than two vertices selects nothing.
pub fn points_near_polyline<P: Preprocessor>(
    set: &EntitySet,
    polyline: &[PointTag],
    tol: f64,
    prep: &P,
) -> GridResult<Vec<PointTag>> {
    let vertices = polyline
        .iter()
        .map(|&tag| prep.point_position(tag))
        .collect::<GridResult<Vec<_>>>()?;
    let mut found = BTreeSet::new();
    for &tag in &set.points {
        let pos = prep.point_position(tag)?;
        if vertices
            .windows(2)
            .any(|seg| distance_to_segment(&pos, &seg[0], &seg[1]) < tol)
        {
            found.insert(tag);
        }
    }
    debug!("{} points of set '{}' on polyline", found.len(), set.name);
    Ok(found.into_iter().collect())
}

impl IjkGrid {
    /// Named set of the surfaces of a plane range, filled downwards
    ///
    /// Every surface of the range must already be in `dict`.
    pub fn collect_entity_set<P: Preprocessor>(
        &self,
        range: &IjkRange,
        dict: &SurfaceDict,
        name: &str,
        prep: &mut P,
    ) -> GridResult<EntitySet> {
        let surfaces = self
            .surface_keys(range)?
            .into_iter()
            .map(|key| {
                dict.get(&key)
                    .copied()
                    .ok_or_else(|| GridError::SurfaceNotFound(key.to_string()))
            })
            .collect::<GridResult<Vec<_>>>()?;
        set_from_surfaces(&surfaces, name, prep)
    }

    /// Named set of every point in the range, both ends included
    pub fn collect_point_set<P: Preprocessor>(
        &self,
        range: &IjkRange,
        name: &str,
        prep: &mut P,
    ) -> GridResult<EntitySet> {
        let points = range
            .positions()
            .map(|ijk| self.tag_at(ijk))
            .collect::<GridResult<Vec<_>>>()?;
        fresh_set(prep, name).points.extend(points);
        Ok(prep.get_set(name)?.clone())
    }

    /// Lines joining consecutive points of an axis range
    ///
    /// Each pair is searched among `candidates` in either direction. A pair
    /// with no matching line is logged and leaves `None` in its slot.
    pub fn collect_line_range<P: Preprocessor>(
        &self,
        range: &IjkRange,
        candidates: &[LineTag],
        prep: &P,
    ) -> GridResult<Vec<Option<LineTag>>> {
        let mut found = Vec::new();
        for key in self.line_keys(range)? {
            let [a, b] = key.0;
            let mut hit = None;
            for &line in candidates {
                if joins(prep.line_endpoints(line)?, a, b) {
                    hit = Some(line);
                    break;
                }
            }
            if hit.is_none() {
                warn!("Line between points {} and {} not found", a, b);
            }
            found.push(hit);
        }
        Ok(found)
    }

    /// Apply a global uniform load to every element of the range's surfaces
    ///
    /// Returns the number of loaded elements.
    pub fn apply_uniform_load_in_range<P: Preprocessor>(
        &self,
        range: &IjkRange,
        dict: &SurfaceDict,
        name: &str,
        load: &Vector3<f64>,
        prep: &mut P,
    ) -> GridResult<usize> {
        let set = self.collect_entity_set(range, dict, name, prep)?;
        for &element in &set.elements {
            prep.apply_uniform_load_global(element, load)?;
        }
        debug!("Uniform load on {} elements of set '{}'", set.elements.len(), name);
        Ok(set.elements.len())
    }

    /// Apply a pressure that varies with the height of each element centroid
    ///
    /// Elements where the pressure is exactly zero are left unloaded.
    /// Returns the number of loaded elements.
    pub fn apply_depth_varying_pressure<P: Preprocessor, L: PressureProvider + ?Sized>(
        &self,
        range: &IjkRange,
        dict: &SurfaceDict,
        name: &str,
        pressure: &L,
        prep: &mut P,
    ) -> GridResult<usize> {
        let set = self.collect_entity_set(range, dict, name, prep)?;
        let mut loaded = 0;
        for &element in &set.elements {
            let z = prep.element_centroid(element)?.z;
            let Some(load) = pressure.load_at(z) else {
                continue;
            };
            prep.apply_uniform_load_global(element, &load)?;
            loaded += 1;
        }
        debug!("Pressure on {} elements of set '{}'", loaded, name);
        Ok(loaded)
    }
}
