//! Axis-aligned 2-D slice extraction from assembled cubes

use std::fmt;
use std::str::FromStr;

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cube::SeismicCube;
use crate::error::{CubeError, Result};
use crate::stats::SliceStats;

/// The three axes a cube can be sliced along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceAxis {
    Inline,
    Crossline,
    Sample,
}

impl SliceAxis {
    /// Volume dimension this axis occupies.
    pub fn dimension(&self) -> usize {
        match self {
            SliceAxis::Inline => 0,
            SliceAxis::Crossline => 1,
            SliceAxis::Sample => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SliceAxis::Inline => "inline",
            SliceAxis::Crossline => "crossline",
            SliceAxis::Sample => "sample",
        }
    }
}

impl fmt::Display for SliceAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SliceAxis {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inline" => Ok(SliceAxis::Inline),
            "crossline" | "xline" => Ok(SliceAxis::Crossline),
            "sample" => Ok(SliceAxis::Sample),
            _ => Err(CubeError::UnknownAxis(s.to_string())),
        }
    }
}

/// Coordinate labels for the two axes of an extracted plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabels {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// One extracted 2-D plane plus its labels and statistics.
///
/// Inline and crossline slices are transposed so samples run down the
/// rows, matching how vertical sections are displayed. Sample slices
/// keep the (inline, crossline) map orientation.
#[derive(Debug, Clone, Serialize)]
pub struct SliceView {
    pub axis: SliceAxis,
    pub index: usize,
    pub data: Array2<f32>,
    pub labels: AxisLabels,
    pub stats: SliceStats,
}

impl SliceView {
    /// (rows, cols) of the extracted plane.
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// The plane as row vectors.
    pub fn rows(&self) -> Vec<Vec<f32>> {
        self.data.outer_iter().map(|row| row.to_vec()).collect()
    }
}

/// Extract one plane perpendicular to `axis` at `index`.
///
/// `index` is validated as a signed value so negative offsets report the
/// same out-of-range error as overruns.
pub fn extract(cube: &SeismicCube, axis: SliceAxis, index: i64) -> Result<SliceView> {
    let len = cube.axis_len(axis);
    if index < 0 || index as usize >= len {
        return Err(CubeError::IndexOutOfRange { axis, index, len });
    }
    let idx = index as usize;

    let plane = cube.amplitudes().index_axis(Axis(axis.dimension()), idx);
    let data = match axis {
        SliceAxis::Inline | SliceAxis::Crossline => plane.reversed_axes().to_owned(),
        SliceAxis::Sample => plane.to_owned(),
    };
    let labels = match axis {
        SliceAxis::Inline => AxisLabels {
            x: to_f64(cube.crossline_axis()),
            y: cube.sample_axis().to_vec(),
        },
        SliceAxis::Crossline => AxisLabels {
            x: to_f64(cube.inline_axis()),
            y: cube.sample_axis().to_vec(),
        },
        SliceAxis::Sample => AxisLabels {
            x: to_f64(cube.inline_axis()),
            y: to_f64(cube.crossline_axis()),
        },
    };
    let stats = SliceStats::compute(&data.view());
    debug!(
        %axis,
        index = idx,
        rows = data.nrows(),
        cols = data.ncols(),
        "slice extracted"
    );

    Ok(SliceView {
        axis,
        index: idx,
        data,
        labels,
        stats,
    })
}

fn to_f64(ids: &[i32]) -> Vec<f64> {
    ids.iter().map(|&v| v as f64).collect()
}
