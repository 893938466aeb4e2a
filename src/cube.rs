//! Assembled seismic cube and its read surface

use ndarray::Array3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::assemble::{self, CollisionPolicy, IngestReport};
use crate::error::{CubeError, Result};
use crate::geometry::{self, SurveyGeometry};
use crate::grid::GridIndex;
use crate::slice::{self, SliceAxis, SliceView};
use crate::stats::AmplitudeStats;
use crate::summary::CubeSummary;
use crate::trace::{Trace, TraceLocation};

/// Knobs for one assembly run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestOptions {
    pub collision_policy: CollisionPolicy,
}

impl IngestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }
}

/// A dense amplitude volume with its axes, statistics, geometry and the
/// accounting of the run that built it.
///
/// Dimension order is (inline, crossline, sample). The cube is immutable
/// once assembled; re-ingesting builds a new cube.
#[derive(Debug, Clone)]
pub struct SeismicCube {
    amplitudes: Array3<f32>,
    inline_axis: Vec<i32>,
    crossline_axis: Vec<i32>,
    sample_axis: Vec<f64>,
    stats: AmplitudeStats,
    geometry: SurveyGeometry,
    report: IngestReport,
}

impl SeismicCube {
    /// Assemble a cube from a batch of decoded traces.
    ///
    /// `sample_axis` labels the third dimension (time or depth per
    /// sample); pass an empty vector to label samples by ordinal. When
    /// the axis is non-empty its length fixes the batch sample count, and
    /// traces of any other length are skipped.
    pub fn assemble(
        traces: &[Trace],
        sample_axis: Vec<f64>,
        options: &IngestOptions,
    ) -> Result<Self> {
        if traces.is_empty() {
            return Err(CubeError::EmptyGrid("no traces in batch".to_string()));
        }
        let total_traces = traces.len();
        let sample_count = if sample_axis.is_empty() {
            traces[0].samples.len()
        } else {
            sample_axis.len()
        };
        let sample_axis = if sample_axis.is_empty() {
            (0..sample_count).map(|i| i as f64).collect()
        } else {
            sample_axis
        };

        info!(total_traces, sample_count, "resolving trace placements");
        let locations: Vec<TraceLocation> = traces
            .par_iter()
            .map(|trace| trace.locate(total_traces))
            .collect();
        let grid = GridIndex::from_locations(&locations)?;
        let (n_inlines, n_crosslines) = grid.grid_shape();
        info!(inlines = n_inlines, crosslines = n_crosslines, "survey grid indexed");
        debug!(
            volume_cells = n_inlines * n_crosslines * sample_count,
            "allocating dense volume"
        );

        let (amplitudes, report) = assemble::scatter(
            traces,
            &locations,
            &grid,
            sample_count,
            options.collision_policy,
        )?;
        let geometry = geometry::estimate(&locations, &grid);
        let stats = AmplitudeStats::compute(&amplitudes);
        info!(
            placed = report.placed,
            skipped = report.skipped_total(),
            actual_min = stats.actual_min,
            actual_max = stats.actual_max,
            memory_bytes = amplitudes.len() * std::mem::size_of::<f32>(),
            "cube assembled"
        );

        let (inline_axis, crossline_axis) = grid.into_axes();
        Ok(Self {
            amplitudes,
            inline_axis,
            crossline_axis,
            sample_axis,
            stats,
            geometry,
            report,
        })
    }

    /// (inlines, crosslines, samples).
    pub fn shape(&self) -> (usize, usize, usize) {
        self.amplitudes.dim()
    }

    /// The dense amplitude volume.
    pub fn amplitudes(&self) -> &Array3<f32> {
        &self.amplitudes
    }

    /// Ascending unique inline ids.
    pub fn inline_axis(&self) -> &[i32] {
        &self.inline_axis
    }

    /// Ascending unique crossline ids.
    pub fn crossline_axis(&self) -> &[i32] {
        &self.crossline_axis
    }

    /// Per-sample axis labels (time or depth).
    pub fn sample_axis(&self) -> &[f64] {
        &self.sample_axis
    }

    /// Volume-wide amplitude statistics.
    pub fn stats(&self) -> &AmplitudeStats {
        &self.stats
    }

    /// Estimated survey orientation.
    pub fn geometry(&self) -> &SurveyGeometry {
        &self.geometry
    }

    /// Accounting for the assembly run.
    pub fn report(&self) -> &IngestReport {
        &self.report
    }

    /// Length of one axis.
    pub fn axis_len(&self, axis: SliceAxis) -> usize {
        let (n_inlines, n_crosslines, n_samples) = self.amplitudes.dim();
        match axis {
            SliceAxis::Inline => n_inlines,
            SliceAxis::Crossline => n_crosslines,
            SliceAxis::Sample => n_samples,
        }
    }

    /// Midpoint index, the natural first slice to look at.
    pub fn default_slice_index(&self, axis: SliceAxis) -> usize {
        self.axis_len(axis) / 2
    }

    /// Approximate in-memory footprint of the amplitude volume.
    pub fn memory_estimate_bytes(&self) -> usize {
        self.amplitudes.len() * std::mem::size_of::<f32>()
    }

    /// Extract one plane perpendicular to `axis` at `index`.
    pub fn slice(&self, axis: SliceAxis, index: i64) -> Result<SliceView> {
        slice::extract(self, axis, index)
    }

    /// Snapshot of shape, axes, statistics, geometry and ingest
    /// accounting.
    pub fn summary(&self) -> CubeSummary {
        CubeSummary::from_cube(self)
    }
}
