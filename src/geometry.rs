//! Survey geometry estimation from trace world coordinates

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::grid::GridIndex;
use crate::trace::TraceLocation;

/// Minimum number of coordinate-bearing traces before estimation is
/// attempted.
pub const MIN_COORDINATE_TRACES: usize = 4;

/// Estimated orientation of the survey grid in world coordinates.
///
/// Azimuths are compass bearings in degrees, measured clockwise from
/// grid north (+Y), in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurveyGeometry {
    /// Bearing of increasing inline numbers.
    pub inline_azimuth: f64,
    /// Bearing of increasing crossline numbers.
    pub crossline_azimuth: f64,
    /// At least one azimuth was derived from real coordinates.
    pub has_coordinates: bool,
}

impl Default for SurveyGeometry {
    fn default() -> Self {
        Self {
            inline_azimuth: 0.0,
            crossline_azimuth: 90.0,
            has_coordinates: false,
        }
    }
}

/// Estimate survey orientation from coordinate-bearing placements.
///
/// Each azimuth wants two world points on the same fixed line as far
/// apart along the varying axis as possible. When fewer than
/// [`MIN_COORDINATE_TRACES`] placements carry coordinates, or no usable
/// point pair exists for either axis, the default geometry is returned.
pub fn estimate(locations: &[TraceLocation], grid: &GridIndex) -> SurveyGeometry {
    let coords: HashMap<(i32, i32), (f64, f64)> = locations
        .iter()
        .filter(|loc| loc.has_coordinates())
        .map(|loc| ((loc.inline, loc.crossline), (loc.x, loc.y)))
        .collect();

    if coords.len() < MIN_COORDINATE_TRACES {
        warn!(
            coordinate_traces = coords.len(),
            "too few coordinate-bearing traces, using default geometry"
        );
        return SurveyGeometry::default();
    }

    let inline_pair = pair_along(&coords, grid.inline_axis(), grid.crossline_axis(), |il, xl| {
        (il, xl)
    });
    let crossline_pair =
        pair_along(&coords, grid.crossline_axis(), grid.inline_axis(), |xl, il| (il, xl));

    let has_coordinates = inline_pair.is_some() || crossline_pair.is_some();
    if !has_coordinates {
        warn!("no coordinate pair spans either axis, using default azimuths");
    }

    SurveyGeometry {
        inline_azimuth: inline_pair.map_or(0.0, |(a, b)| bearing(a, b)),
        crossline_azimuth: crossline_pair.map_or(90.0, |(a, b)| bearing(a, b)),
        has_coordinates,
    }
}

/// Find two coordinate-bearing points on one fixed line, separated along
/// the varying axis.
///
/// `key` maps (varying id, fixed id) to the (inline, crossline) lookup
/// key. Preference order: the varying axis extremes on any shared fixed
/// line, then the widest available span on any fixed line.
fn pair_along(
    coords: &HashMap<(i32, i32), (f64, f64)>,
    varying_axis: &[i32],
    fixed_axis: &[i32],
    key: impl Fn(i32, i32) -> (i32, i32),
) -> Option<((f64, f64), (f64, f64))> {
    let (&min_v, &max_v) = (varying_axis.first()?, varying_axis.last()?);
    if min_v == max_v {
        return None;
    }

    for &f in fixed_axis {
        if let (Some(&a), Some(&b)) = (coords.get(&key(min_v, f)), coords.get(&key(max_v, f))) {
            return Some((a, b));
        }
    }

    for &f in fixed_axis {
        let lo = varying_axis
            .iter()
            .find_map(|&v| coords.get(&key(v, f)).map(|&c| (v, c)));
        let hi = varying_axis
            .iter()
            .rev()
            .find_map(|&v| coords.get(&key(v, f)).map(|&c| (v, c)));
        if let (Some((lo_v, lo_c)), Some((hi_v, hi_c))) = (lo, hi) {
            if lo_v != hi_v {
                return Some((lo_c, hi_c));
            }
        }
    }
    None
}

/// Compass bearing from one world point to another.
fn bearing(from: (f64, f64), to: (f64, f64)) -> f64 {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    (dx.atan2(dy).to_degrees() + 360.0) % 360.0
}
