//! Entity labels used to deduplicate generated lines and surfaces

use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::cad::{LineTag, PointTag, SurfaceTag};

/// Label of a quad surface: its four corner point tags in winding order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceKey(pub [PointTag; 4]);

/// Label of a line: its two end point tags in axis order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineKey(pub [PointTag; 2]);

/// Surfaces generated from the grid, keyed by label
pub type SurfaceDict = HashMap<SurfaceKey, SurfaceTag>;

/// Lines generated from the grid, keyed by label
pub type LineDict = HashMap<LineKey, LineTag>;

impl fmt::Display for SurfaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "s{a:04}{b:04}{c:04}{d:04}")
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b] = self.0;
        write!(f, "l{a:04}{b:04}")
    }
}

impl Serialize for SurfaceKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Serialize for LineKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_zero_padded() {
        assert_eq!(SurfaceKey([1, 2, 5, 4]).to_string(), "s0001000200050004");
        assert_eq!(LineKey([12, 345]).to_string(), "l00120345");
    }
}
