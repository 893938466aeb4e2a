//! SeisCube - Seismic Trace-to-Volume Assembly
//!
//! Turns batches of decoded seismic traces into dense, queryable
//! amplitude cubes: grid indexing, fallback placement for headerless
//! traces, survey geometry estimation, volume statistics and
//! axis-aligned slice extraction.
//!
//! # Features
//!
//! - Guaranteed placement: traces without usable headers land on a
//!   synthetic square grid derived from their ordinal
//! - Dense (inline, crossline, sample) volumes with NaN/infinity
//!   sanitization on the way in
//! - Configurable policy for traces colliding on one grid cell
//! - Volume statistics with percentile-based display bounds
//! - Transposed vertical sections and map-view sample slices
//! - Sessions swap cubes atomically under concurrent readers
//!
//! # Example
//!
//! ```rust
//! use seiscube::{CubeSession, SliceAxis, Trace, TraceHeader};
//!
//! # fn main() -> seiscube::Result<()> {
//! let traces: Vec<Trace> = (0..9)
//!     .map(|i| {
//!         let header = TraceHeader::new((i / 3 + 1) as i32, ((i % 3 + 1) * 10) as i32);
//!         Trace::new(i, header, vec![0.0, 1.0, -1.0, 0.5])
//!     })
//!     .collect();
//!
//! let session = CubeSession::new();
//! session.ingest(&traces, vec![0.0, 2.0, 4.0, 6.0])?;
//!
//! let slice = session.extract_slice(SliceAxis::Sample, 0)?;
//! assert_eq!(slice.shape(), (3, 3));
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod cube;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod session;
pub mod slice;
pub mod stats;
pub mod summary;
pub mod trace;
pub mod utils;

// Re-exports
pub use assemble::{CollisionPolicy, IngestReport, SkipReason, TraceOutcome};
pub use cube::{IngestOptions, SeismicCube};
pub use error::{CubeError, Result};
pub use geometry::{SurveyGeometry, MIN_COORDINATE_TRACES};
pub use grid::GridIndex;
pub use session::CubeSession;
pub use slice::{AxisLabels, SliceAxis, SliceView};
pub use stats::{AmplitudeStats, SliceStats};
pub use summary::{AxisRange, CubeSummary, SummaryRecord};
pub use trace::{Trace, TraceHeader, TraceLocation};

/// Version of the seiscube implementation
pub const SEISCUBE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!SEISCUBE_VERSION.is_empty());
    }
}
