//! Trace model and grid placement resolution
//!
//! Traces arrive from the format-decoding collaborator already parsed into
//! numeric sample vectors plus the named header fields the survey grid
//! needs. Header fields follow the SEG-Y convention that 0 means
//! absent/unreadable; the locator turns whatever survives decoding into a
//! guaranteed grid placement.

use serde::{Deserialize, Serialize};

/// Named trace header fields, as decoded. Zero means "absent".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceHeader {
    /// Inline number (3-D survey row id).
    pub inline: i32,
    /// Crossline number (3-D survey column id).
    pub crossline: i32,
    /// Primary world coordinate pair (CDP X/Y).
    pub cdp_x: f64,
    pub cdp_y: f64,
    /// Secondary coordinate pair (source X/Y), used when the CDP pair is
    /// absent.
    pub source_x: f64,
    pub source_y: f64,
}

impl TraceHeader {
    /// Create a header carrying only grid ids.
    pub fn new(inline: i32, crossline: i32) -> Self {
        Self {
            inline,
            crossline,
            ..Default::default()
        }
    }

    /// Set the primary (CDP) coordinate pair.
    pub fn with_cdp(mut self, x: f64, y: f64) -> Self {
        self.cdp_x = x;
        self.cdp_y = y;
        self
    }

    /// Set the secondary (source) coordinate pair.
    pub fn with_source(mut self, x: f64, y: f64) -> Self {
        self.source_x = x;
        self.source_y = y;
        self
    }

    /// Both grid ids are present.
    pub fn has_grid_ids(&self) -> bool {
        self.inline != 0 && self.crossline != 0
    }

    /// Resolved world coordinates: the CDP pair, or the source pair when
    /// the CDP pair is exactly (0, 0).
    pub fn world_coordinates(&self) -> (f64, f64) {
        if self.cdp_x == 0.0 && self.cdp_y == 0.0 {
            (self.source_x, self.source_y)
        } else {
            (self.cdp_x, self.cdp_y)
        }
    }
}

/// One decoded seismic trace.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// Ordinal position in the input sequence; drives fallback placement.
    pub source_index: usize,
    /// Decoded header fields.
    pub header: TraceHeader,
    /// Amplitude samples. Fixed length across one batch.
    pub samples: Vec<f32>,
}

impl Trace {
    /// Create a trace from its decoded parts.
    pub fn new(source_index: usize, header: TraceHeader, samples: Vec<f32>) -> Self {
        Self {
            source_index,
            header,
            samples,
        }
    }

    /// Resolve this trace's grid placement within a batch of
    /// `total_traces`.
    pub fn locate(&self, total_traces: usize) -> TraceLocation {
        locate(&self.header, self.source_index, total_traces)
    }
}

/// Resolved grid placement for one trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceLocation {
    pub inline: i32,
    pub crossline: i32,
    /// Resolved world X, 0.0 when absent.
    pub x: f64,
    /// Resolved world Y, 0.0 when absent.
    pub y: f64,
    /// Grid position was synthesized from the trace ordinal.
    pub synthesized: bool,
}

impl TraceLocation {
    /// Both world coordinates are present (non-zero).
    pub fn has_coordinates(&self) -> bool {
        self.x != 0.0 && self.y != 0.0
    }
}

/// Edge length of the synthetic placement grid for a batch of
/// `total_traces` traces.
pub(crate) fn fallback_grid_size(total_traces: usize) -> usize {
    ((total_traces as f64).sqrt() as usize).max(1)
}

/// Resolve a grid placement for one trace header.
///
/// Headers carrying both inline and crossline ids keep them unchanged.
/// Anything else is placed on a synthetic square grid derived from the
/// trace ordinal, so that every trace lands somewhere even when survey
/// metadata is absent. The synthetic path zeroes the world coordinates: a
/// made-up grid position carries no survey geometry.
pub fn locate(header: &TraceHeader, source_index: usize, total_traces: usize) -> TraceLocation {
    if header.has_grid_ids() {
        let (x, y) = header.world_coordinates();
        TraceLocation {
            inline: header.inline,
            crossline: header.crossline,
            x,
            y,
            synthesized: false,
        }
    } else {
        let grid_size = fallback_grid_size(total_traces);
        TraceLocation {
            inline: (source_index / grid_size) as i32 + 1,
            crossline: (source_index % grid_size) as i32 + 1,
            x: 0.0,
            y: 0.0,
            synthesized: true,
        }
    }
}
