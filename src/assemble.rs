//! Dense volume assembly from located traces

use ndarray::{s, Array2, Array3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CubeError, Result};
use crate::grid::GridIndex;
use crate::trace::{Trace, TraceLocation};
use crate::utils::sanitize;

/// What happens when two traces resolve to the same grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Later traces overwrite earlier ones.
    #[default]
    LastWins,
    /// The first trace keeps the cell, later arrivals are skipped.
    FirstWins,
    /// Any collision aborts the whole assembly.
    Reject,
}

/// Why a trace was left out of the volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Placement ids not present on the grid axes.
    OutsideGrid,
    /// Cell already taken under [`CollisionPolicy::FirstWins`].
    DuplicateCell,
    /// Sample vector length differs from the batch sample count.
    SampleCountMismatch,
}

/// Per-trace assembly outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceOutcome {
    Placed { cell: (usize, usize), overwrote: bool },
    Skipped(SkipReason),
}

/// Accounting for one assembly run.
///
/// `placed + skipped_total()` always equals `total_traces`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    pub total_traces: usize,
    pub placed: usize,
    /// Traces placed at grid positions synthesized from their ordinal.
    pub synthesized_placements: usize,
    /// Cells written more than once under [`CollisionPolicy::LastWins`].
    pub overwrites: usize,
    pub skipped_outside_grid: usize,
    pub skipped_duplicate: usize,
    pub skipped_sample_mismatch: usize,
}

impl IngestReport {
    /// Traces skipped for any reason.
    pub fn skipped_total(&self) -> usize {
        self.skipped_outside_grid + self.skipped_duplicate + self.skipped_sample_mismatch
    }

    fn record(&mut self, outcome: &TraceOutcome) {
        match outcome {
            TraceOutcome::Placed { overwrote, .. } => {
                self.placed += 1;
                if *overwrote {
                    self.overwrites += 1;
                }
            }
            TraceOutcome::Skipped(SkipReason::OutsideGrid) => self.skipped_outside_grid += 1,
            TraceOutcome::Skipped(SkipReason::DuplicateCell) => self.skipped_duplicate += 1,
            TraceOutcome::Skipped(SkipReason::SampleCountMismatch) => {
                self.skipped_sample_mismatch += 1
            }
        }
    }
}

/// Scatter located traces into a dense zero-filled volume.
///
/// Traces are visited in source order, which is what makes the collision
/// policies deterministic. Sample values pass through [`sanitize`] on the
/// way in, so the volume never holds NaN or infinity. `traces` and
/// `locations` run in lockstep.
pub(crate) fn scatter(
    traces: &[Trace],
    locations: &[TraceLocation],
    grid: &GridIndex,
    sample_count: usize,
    policy: CollisionPolicy,
) -> Result<(Array3<f32>, IngestReport)> {
    let (n_inlines, n_crosslines) = grid.grid_shape();
    let mut volume = Array3::<f32>::zeros((n_inlines, n_crosslines, sample_count));
    let mut occupied = Array2::from_elem((n_inlines, n_crosslines), false);
    let mut report = IngestReport {
        total_traces: traces.len(),
        ..Default::default()
    };

    for (trace, location) in traces.iter().zip(locations) {
        if location.synthesized {
            report.synthesized_placements += 1;
        }

        let Some((il_idx, xl_idx)) = grid
            .inline_index_of(location.inline)
            .zip(grid.crossline_index_of(location.crossline))
        else {
            debug!(
                source_index = trace.source_index,
                inline = location.inline,
                crossline = location.crossline,
                "trace outside grid, skipped"
            );
            report.record(&TraceOutcome::Skipped(SkipReason::OutsideGrid));
            continue;
        };

        if trace.samples.len() != sample_count {
            debug!(
                source_index = trace.source_index,
                samples = trace.samples.len(),
                expected = sample_count,
                "sample count mismatch, skipped"
            );
            report.record(&TraceOutcome::Skipped(SkipReason::SampleCountMismatch));
            continue;
        }

        let mut overwrote = false;
        if occupied[(il_idx, xl_idx)] {
            match policy {
                CollisionPolicy::LastWins => overwrote = true,
                CollisionPolicy::FirstWins => {
                    debug!(
                        source_index = trace.source_index,
                        inline = location.inline,
                        crossline = location.crossline,
                        "duplicate cell, first trace kept"
                    );
                    report.record(&TraceOutcome::Skipped(SkipReason::DuplicateCell));
                    continue;
                }
                CollisionPolicy::Reject => {
                    return Err(CubeError::DuplicatePlacement {
                        inline: location.inline,
                        crossline: location.crossline,
                    });
                }
            }
        }

        let mut cell = volume.slice_mut(s![il_idx, xl_idx, ..]);
        for (dst, &src) in cell.iter_mut().zip(&trace.samples) {
            *dst = sanitize(src);
        }
        occupied[(il_idx, xl_idx)] = true;
        report.record(&TraceOutcome::Placed {
            cell: (il_idx, xl_idx),
            overwrote,
        });
    }

    Ok((volume, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::TraceHeader;

    fn batch(headers: &[(i32, i32)], samples: usize) -> (Vec<Trace>, Vec<TraceLocation>) {
        let traces: Vec<Trace> = headers
            .iter()
            .enumerate()
            .map(|(i, &(il, xl))| {
                Trace::new(
                    i,
                    TraceHeader::new(il, xl),
                    vec![(i + 1) as f32; samples],
                )
            })
            .collect();
        let total = traces.len();
        let locations: Vec<TraceLocation> = traces.iter().map(|t| t.locate(total)).collect();
        (traces, locations)
    }

    #[test]
    fn test_scatter_places_all() {
        let (traces, locations) = batch(&[(1, 10), (1, 20), (2, 10), (2, 20)], 3);
        let grid = GridIndex::from_locations(&locations).unwrap();
        let (volume, report) =
            scatter(&traces, &locations, &grid, 3, CollisionPolicy::LastWins).unwrap();

        assert_eq!(volume.dim(), (2, 2, 3));
        assert_eq!(volume[(0, 0, 0)], 1.0);
        assert_eq!(volume[(0, 1, 0)], 2.0);
        assert_eq!(volume[(1, 0, 0)], 3.0);
        assert_eq!(volume[(1, 1, 2)], 4.0);
        assert_eq!(report.placed, 4);
        assert_eq!(report.skipped_total(), 0);
        assert_eq!(report.synthesized_placements, 0);
    }

    #[test]
    fn test_scatter_sanitizes_non_finite() {
        let (mut traces, locations) = batch(&[(1, 10), (1, 20)], 4);
        traces[0].samples = vec![f32::NAN, f32::INFINITY, f32::NEG_INFINITY, 2.5];
        let grid = GridIndex::from_locations(&locations).unwrap();
        let (volume, report) =
            scatter(&traces, &locations, &grid, 4, CollisionPolicy::LastWins).unwrap();

        assert_eq!(volume[(0, 0, 0)], 0.0);
        assert_eq!(volume[(0, 0, 1)], 0.0);
        assert_eq!(volume[(0, 0, 2)], 0.0);
        assert_eq!(volume[(0, 0, 3)], 2.5);
        assert_eq!(report.placed, 2);
    }

    #[test]
    fn test_scatter_skips_sample_mismatch() {
        let (mut traces, locations) = batch(&[(1, 10), (1, 20), (2, 10)], 3);
        traces[1].samples = vec![9.0; 7];
        let grid = GridIndex::from_locations(&locations).unwrap();
        let (volume, report) =
            scatter(&traces, &locations, &grid, 3, CollisionPolicy::LastWins).unwrap();

        // The mismatched trace's cell stays zero-filled.
        assert_eq!(volume[(0, 1, 0)], 0.0);
        assert_eq!(report.placed, 2);
        assert_eq!(report.skipped_sample_mismatch, 1);
        assert_eq!(report.placed + report.skipped_total(), report.total_traces);
    }

    #[test]
    fn test_scatter_skips_outside_grid() {
        // Grid built from a narrower survey than the batch covers.
        let (traces, locations) = batch(&[(1, 10), (1, 20), (5, 50)], 2);
        let grid = GridIndex::from_locations(&locations[..2]).unwrap();
        let (volume, report) =
            scatter(&traces, &locations, &grid, 2, CollisionPolicy::LastWins).unwrap();

        assert_eq!(volume.dim(), (1, 2, 2));
        assert_eq!(report.placed, 2);
        assert_eq!(report.skipped_outside_grid, 1);
    }

    #[test]
    fn test_collision_last_wins() {
        let (traces, locations) = batch(&[(1, 10), (1, 10)], 2);
        let grid = GridIndex::from_locations(&locations).unwrap();
        let (volume, report) =
            scatter(&traces, &locations, &grid, 2, CollisionPolicy::LastWins).unwrap();

        assert_eq!(volume[(0, 0, 0)], 2.0);
        assert_eq!(report.placed, 2);
        assert_eq!(report.overwrites, 1);
        assert_eq!(report.skipped_duplicate, 0);
    }

    #[test]
    fn test_collision_first_wins() {
        let (traces, locations) = batch(&[(1, 10), (1, 10)], 2);
        let grid = GridIndex::from_locations(&locations).unwrap();
        let (volume, report) =
            scatter(&traces, &locations, &grid, 2, CollisionPolicy::FirstWins).unwrap();

        assert_eq!(volume[(0, 0, 0)], 1.0);
        assert_eq!(report.placed, 1);
        assert_eq!(report.skipped_duplicate, 1);
        assert_eq!(report.overwrites, 0);
        assert_eq!(report.placed + report.skipped_total(), report.total_traces);
    }

    #[test]
    fn test_collision_reject() {
        let (traces, locations) = batch(&[(1, 10), (1, 10)], 2);
        let grid = GridIndex::from_locations(&locations).unwrap();
        let err = scatter(&traces, &locations, &grid, 2, CollisionPolicy::Reject).unwrap_err();
        assert!(matches!(
            err,
            CubeError::DuplicatePlacement {
                inline: 1,
                crossline: 10
            }
        ));
    }

    #[test]
    fn test_scatter_counts_synthesized_placements() {
        // Headerless traces land on the synthetic grid.
        let traces: Vec<Trace> = (0..4)
            .map(|i| Trace::new(i, TraceHeader::default(), vec![1.0, 2.0]))
            .collect();
        let locations: Vec<TraceLocation> = traces.iter().map(|t| t.locate(4)).collect();
        let grid = GridIndex::from_locations(&locations).unwrap();
        let (_, report) =
            scatter(&traces, &locations, &grid, 2, CollisionPolicy::LastWins).unwrap();
        assert_eq!(report.synthesized_placements, 4);
        assert_eq!(report.placed, 4);
    }
}
