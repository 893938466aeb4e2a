//! Session state holding the current cube behind a reader/writer lock

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::cube::{IngestOptions, SeismicCube};
use crate::error::{CubeError, Result};
use crate::slice::{SliceAxis, SliceView};
use crate::summary::{CubeSummary, SummaryRecord};
use crate::trace::Trace;

/// Holds the current cube for one consumer session.
///
/// Readers clone an [`Arc`] out of the lock and work on that snapshot,
/// so a concurrent re-ingest never blocks or invalidates a read in
/// flight. The replaced cube is dropped when its last reader finishes
/// with it.
#[derive(Debug)]
pub struct CubeSession {
    session_id: Uuid,
    options: IngestOptions,
    current: RwLock<Option<Arc<SeismicCube>>>,
}

impl CubeSession {
    /// Create a session with default assembly options.
    pub fn new() -> Self {
        Self::with_options(IngestOptions::default())
    }

    /// Create a session with explicit assembly options.
    pub fn with_options(options: IngestOptions) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            options,
            current: RwLock::new(None),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Whether a cube has been ingested into this session.
    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }

    /// Assemble a cube from `traces` and swap it in as current.
    ///
    /// Assembly runs outside the lock; the write lock is held only for
    /// the pointer swap. On error the previously loaded cube stays
    /// current.
    pub fn ingest(&self, traces: &[Trace], sample_axis: Vec<f64>) -> Result<Arc<SeismicCube>> {
        let cube = Arc::new(SeismicCube::assemble(traces, sample_axis, &self.options)?);
        *self.current.write() = Some(Arc::clone(&cube));
        info!(
            session_id = %self.session_id,
            shape = ?cube.shape(),
            "cube swapped in"
        );
        Ok(cube)
    }

    /// Snapshot of the current cube.
    pub fn cube(&self) -> Result<Arc<SeismicCube>> {
        self.current.read().clone().ok_or(CubeError::NotLoaded)
    }

    /// Summary of the current cube.
    pub fn summary(&self) -> Result<CubeSummary> {
        Ok(self.cube()?.summary())
    }

    /// Extract a slice from the current cube.
    pub fn extract_slice(&self, axis: SliceAxis, index: i64) -> Result<SliceView> {
        self.cube()?.slice(axis, index)
    }

    /// Build a persistable record for the current cube.
    pub fn record_summary(&self, source_name: impl Into<String>) -> Result<SummaryRecord> {
        Ok(SummaryRecord::new(
            self.session_id,
            source_name,
            self.summary()?,
        ))
    }
}

impl Default for CubeSession {
    fn default() -> Self {
        Self::new()
    }
}
