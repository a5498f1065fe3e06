//! Named sets of geometric entities

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{ElementTag, LineTag, PointTag, SurfaceTag};

/// A named group of points, lines, surfaces and elements
///
/// Each collection is ordered by tag and holds every entity at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySet {
    pub name: String,
    pub points: BTreeSet<PointTag>,
    pub lines: BTreeSet<LineTag>,
    pub surfaces: BTreeSet<SurfaceTag>,
    pub elements: BTreeSet<ElementTag>,
}

impl EntitySet {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
            && self.lines.is_empty()
            && self.surfaces.is_empty()
            && self.elements.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.lines.clear();
        self.surfaces.clear();
        self.elements.clear();
    }
}
