//! Model options and JSON grid descriptions

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::cad::{CadModel, Preprocessor};
use crate::error::{GridError, GridResult};
use crate::grid::{IjkGrid, IjkRange, LineDict, MoveRange, SurfaceDict};

const DEFAULT_NDIV: usize = 4;

fn default_ndiv() -> usize {
    DEFAULT_NDIV
}

#[derive(Deserialize)]
struct CadModelOptionsData {
    #[serde(default = "default_ndiv")]
    default_ndiv: usize,
}

impl TryFrom<CadModelOptionsData> for CadModelOptions {
    type Error = GridError;

    fn try_from(data: CadModelOptionsData) -> GridResult<Self> {
        if data.default_ndiv == 0 {
            return Err(GridError::InvalidInput(
                "default_ndiv must be positive".to_string(),
            ));
        }
        Ok(Self {
            default_ndiv: data.default_ndiv,
        })
    }
}

/// Options for the in-memory CAD model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CadModelOptionsData")]
pub struct CadModelOptions {
    /// Divisions given to new lines, and to surfaces through their edges
    pub default_ndiv: usize,
}

impl Default for CadModelOptions {
    fn default() -> Self {
        Self {
            default_ndiv: DEFAULT_NDIV,
        }
    }
}

impl CadModelOptions {
    /// Set the default number of divisions of new lines
    pub fn with_default_ndiv(mut self, ndiv: usize) -> Self {
        self.default_ndiv = ndiv.max(1);
        self
    }
}

/// Declarative description of a grid model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// X coordinates of the grid
    pub x: Vec<f64>,
    /// Y coordinates of the grid
    pub y: Vec<f64>,
    /// Z coordinates of the grid
    pub z: Vec<f64>,
    /// Displacements applied right after point generation
    #[serde(default)]
    pub moves: Vec<MoveRange>,
    /// Plane ranges to generate surfaces in
    #[serde(default)]
    pub surfaces: Vec<IjkRange>,
    /// Axis ranges to generate lines in
    #[serde(default)]
    pub lines: Vec<IjkRange>,
    /// Mesh the surfaces once generated
    #[serde(default)]
    pub mesh: bool,
    #[serde(default)]
    pub model: CadModelOptions,
}

/// Grid, model and entity dictionaries built from a [`GridConfig`]
#[derive(Debug, Clone)]
pub struct GeneratedModel {
    pub grid: IjkGrid,
    pub model: CadModel,
    pub surfaces: SurfaceDict,
    pub lines: LineDict,
}

impl GridConfig {
    pub fn from_json_str(json: &str) -> GridResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> GridResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Generate points, apply moves, then generate the listed surfaces and lines
    pub fn build(&self) -> GridResult<GeneratedModel> {
        let mut grid = IjkGrid::new(self.x.clone(), self.y.clone(), self.z.clone())?;
        for mv in &self.moves {
            grid.queue_displacement(mv.range, mv.displacement)?;
        }
        let mut model = CadModel::with_options(self.model.clone());
        grid.generate(&mut model)?;

        let mut surfaces = SurfaceDict::new();
        for range in &self.surfaces {
            grid.generate_surfaces_in_range(range, &mut surfaces, &mut model)?;
        }
        let mut lines = LineDict::new();
        for range in &self.lines {
            grid.generate_lines_in_range(range, &mut lines, &mut model)?;
        }
        if self.mesh {
            model.mesh();
        }
        // Every generated entity ends up in the "total" set
        let total = model.define_set("total");
        total.surfaces.extend(surfaces.values().copied());
        total.lines.extend(lines.values().copied());
        model.fill_downwards("total")?;

        let summary = model.summary();
        info!(
            "Built grid model: {} points, {} lines, {} surfaces, {} elements",
            summary.num_points, summary.num_lines, summary.num_surfaces, summary.num_elements
        );
        Ok(GeneratedModel {
            grid,
            model,
            surfaces,
            lines,
        })
    }
}
