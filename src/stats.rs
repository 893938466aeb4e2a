//! Amplitude statistics over assembled volumes and extracted slices

use ndarray::{Array3, ArrayView2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::quantile_sorted;

/// Summary statistics over every cell of an assembled volume.
///
/// `display_min`/`display_max` are the p5/p95 percentiles: clipping the
/// color scale there keeps a handful of amplitude spikes from washing out
/// the rest of the volume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeStats {
    pub actual_min: f64,
    pub actual_max: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    pub p1: f64,
    pub p5: f64,
    pub p95: f64,
    pub p99: f64,
    /// Suggested lower display bound (p5).
    pub display_min: f64,
    /// Suggested upper display bound (p95).
    pub display_max: f64,
}

impl AmplitudeStats {
    /// Compute statistics over a full volume.
    ///
    /// Every cell participates, zero-filled and overwritten alike. An
    /// empty volume yields all-zero statistics.
    pub fn compute(volume: &Array3<f32>) -> Self {
        let mut values: Vec<f32> = volume.iter().copied().collect();
        let n = values.len();
        if n == 0 {
            return Self::default();
        }

        let (min, max, sum) = values
            .par_iter()
            .fold(
                || (f32::INFINITY, f32::NEG_INFINITY, 0.0f64),
                |(min, max, sum), &v| (min.min(v), max.max(v), sum + v as f64),
            )
            .reduce(
                || (f32::INFINITY, f32::NEG_INFINITY, 0.0f64),
                |a, b| (a.0.min(b.0), a.1.max(b.1), a.2 + b.2),
            );
        let mean = sum / n as f64;
        let sq_dev: f64 = values
            .par_iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum();
        let std = (sq_dev / n as f64).sqrt();

        values.par_sort_unstable_by(f32::total_cmp);
        let p1 = quantile_sorted(&values, 0.01);
        let p5 = quantile_sorted(&values, 0.05);
        let p95 = quantile_sorted(&values, 0.95);
        let p99 = quantile_sorted(&values, 0.99);

        Self {
            actual_min: min as f64,
            actual_max: max as f64,
            mean,
            std,
            p1,
            p5,
            p95,
            p99,
            display_min: p5,
            display_max: p95,
        }
    }
}

/// Min/max/mean/std over a single extracted slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SliceStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
}

impl SliceStats {
    /// Compute statistics over a 2-D plane. Slices are small next to the
    /// volume, so this stays serial.
    pub fn compute(plane: &ArrayView2<'_, f32>) -> Self {
        let n = plane.len();
        if n == 0 {
            return Self::default();
        }
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0f64;
        for &v in plane.iter() {
            min = min.min(v);
            max = max.max(v);
            sum += v as f64;
        }
        let mean = sum / n as f64;
        let sq_dev: f64 = plane
            .iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum();
        Self {
            min: min as f64,
            max: max as f64,
            mean,
            std: (sq_dev / n as f64).sqrt(),
        }
    }
}
