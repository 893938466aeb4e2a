//! Serializable snapshots of assembled cubes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assemble::IngestReport;
use crate::cube::SeismicCube;
use crate::error::Result;
use crate::geometry::SurveyGeometry;
use crate::stats::AmplitudeStats;

/// Inclusive endpoint range and length of one sorted axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange<T> {
    pub min: T,
    pub max: T,
    pub count: usize,
}

impl<T: Copy + Default> AxisRange<T> {
    /// Range of a sorted axis. An empty axis yields default endpoints
    /// and a zero count.
    pub fn of_axis(axis: &[T]) -> Self {
        match (axis.first(), axis.last()) {
            (Some(&min), Some(&max)) => Self {
                min,
                max,
                count: axis.len(),
            },
            _ => Self {
                min: T::default(),
                max: T::default(),
                count: 0,
            },
        }
    }
}

/// Everything worth keeping about an assembled cube, minus the volume
/// itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubeSummary {
    /// (inlines, crosslines, samples).
    pub shape: [usize; 3],
    pub inline_range: AxisRange<i32>,
    pub crossline_range: AxisRange<i32>,
    pub sample_range: AxisRange<f64>,
    pub amplitude_stats: AmplitudeStats,
    pub geometry: SurveyGeometry,
    pub memory_estimate_bytes: usize,
    pub ingest: IngestReport,
}

impl CubeSummary {
    pub(crate) fn from_cube(cube: &SeismicCube) -> Self {
        let (n_inlines, n_crosslines, n_samples) = cube.shape();
        Self {
            shape: [n_inlines, n_crosslines, n_samples],
            inline_range: AxisRange::of_axis(cube.inline_axis()),
            crossline_range: AxisRange::of_axis(cube.crossline_axis()),
            sample_range: AxisRange::of_axis(cube.sample_axis()),
            amplitude_stats: *cube.stats(),
            geometry: *cube.geometry(),
            memory_estimate_bytes: cube.memory_estimate_bytes(),
            ingest: *cube.report(),
        }
    }
}

/// A cube summary tied to the session that built it and the source it
/// came from, ready for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub id: Uuid,
    pub session_id: Uuid,
    /// Name of the input the traces were decoded from.
    pub source_name: String,
    pub summary: CubeSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SummaryRecord {
    pub fn new(session_id: Uuid, source_name: impl Into<String>, summary: CubeSummary) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            session_id,
            source_name: source_name.into(),
            summary,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh the update timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a record back from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::IngestOptions;
    use crate::trace::{Trace, TraceHeader};

    fn test_cube() -> SeismicCube {
        let traces: Vec<Trace> = [(1, 10), (1, 20), (3, 10), (3, 20)]
            .into_iter()
            .enumerate()
            .map(|(i, (il, xl))| {
                Trace::new(i, TraceHeader::new(il, xl), vec![i as f32; 5])
            })
            .collect();
        SeismicCube::assemble(&traces, Vec::new(), &IngestOptions::default()).unwrap()
    }

    #[test]
    fn test_axis_range_of_axis() {
        let range = AxisRange::of_axis(&[1, 2, 5]);
        assert_eq!((range.min, range.max, range.count), (1, 5, 3));

        let empty: AxisRange<i32> = AxisRange::of_axis(&[]);
        assert_eq!((empty.min, empty.max, empty.count), (0, 0, 0));

        let samples = AxisRange::of_axis(&[0.0, 2.0, 4.0]);
        assert_eq!((samples.min, samples.max, samples.count), (0.0, 4.0, 3));
    }

    #[test]
    fn test_summary_from_cube() {
        let cube = test_cube();
        let summary = cube.summary();
        assert_eq!(summary.shape, [2, 2, 5]);
        assert_eq!(summary.inline_range.min, 1);
        assert_eq!(summary.inline_range.max, 3);
        assert_eq!(summary.crossline_range.count, 2);
        assert_eq!(summary.sample_range.max, 4.0);
        assert_eq!(summary.memory_estimate_bytes, 2 * 2 * 5 * 4);
        assert_eq!(summary.ingest.total_traces, 4);
        assert_eq!(summary.amplitude_stats.actual_max, 3.0);
    }

    #[test]
    fn test_record_json_round_trip() {
        let record = SummaryRecord::new(Uuid::new_v4(), "survey_2024.sgy", test_cube().summary());
        let json = record.to_json().unwrap();
        let parsed = SummaryRecord::from_json(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_record_touch_advances_updated_at() {
        let mut record =
            SummaryRecord::new(Uuid::new_v4(), "survey_2024.sgy", test_cube().summary());
        std::thread::sleep(std::time::Duration::from_millis(10));
        record.touch();
        assert!(record.updated_at > record.created_at);
        assert_eq!(record.source_name, "survey_2024.sgy");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(SummaryRecord::from_json("not json").is_err());
    }
}
