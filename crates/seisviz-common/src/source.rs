//! Data source seams between format readers and transforms.
//!
//! Format readers (SEG-Y, raster images) implement these traits; transforms
//! and service operations only ever see the traits, so tests can substitute
//! in-memory sources.

use serde::{Deserialize, Serialize};

use crate::{GatherRange, TraceGather, VizError, VizResult};

/// Basic dimensions of a seismic source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    pub trace_count: usize,
    pub sample_count: usize,
    /// Sample interval in microseconds, 0 when unknown.
    pub dt_microseconds: u32,
}

impl SourceInfo {
    /// Sample interval in milliseconds, falling back to 1 ms when unknown.
    pub fn dt_ms(&self) -> f64 {
        if self.dt_microseconds > 0 {
            self.dt_microseconds as f64 / 1000.0
        } else {
            1.0
        }
    }
}

/// Read access to a trace-organized seismic dataset.
///
/// Implementations must be safe to call from several requests at once;
/// each call is expected to use its own file handle.
pub trait TraceSource: Send + Sync {
    fn info(&self) -> VizResult<SourceInfo>;

    /// Read `count` adjacent traces starting at `start`, clamped with
    /// [`GatherRange::clamp`].
    fn trace_gather(&self, start: i64, count: i64) -> VizResult<TraceGather>;
}

/// Read access to a raster (elevation) dataset.
pub trait RasterSource: Send + Sync {
    fn raster_grid(&self) -> VizResult<crate::RasterGrid>;
}

/// A trace source backed by a gather held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryTraceSource {
    gather: Option<TraceGather>,
    dt_microseconds: u32,
}

impl InMemoryTraceSource {
    pub fn new(gather: TraceGather, dt_microseconds: u32) -> Self {
        Self {
            gather: Some(gather),
            dt_microseconds,
        }
    }

    /// A source reporting zero traces.
    pub fn empty() -> Self {
        Self {
            gather: None,
            dt_microseconds: 0,
        }
    }
}

impl TraceSource for InMemoryTraceSource {
    fn info(&self) -> VizResult<SourceInfo> {
        let (trace_count, sample_count) = self.gather.as_ref().map(|g| g.shape()).unwrap_or((0, 0));
        Ok(SourceInfo {
            trace_count,
            sample_count,
            dt_microseconds: self.dt_microseconds,
        })
    }

    fn trace_gather(&self, start: i64, count: i64) -> VizResult<TraceGather> {
        let gather = self
            .gather
            .as_ref()
            .ok_or_else(|| VizError::EmptySource("source has no traces".to_string()))?;
        let range = GatherRange::clamp(start, count, gather.trace_count())?;
        let samples = gather.sample_count();
        let data = gather.as_slice()[range.start * samples..range.end * samples].to_vec();
        TraceGather::new(range.len(), samples, data)
    }
}

impl RasterSource for crate::RasterGrid {
    fn raster_grid(&self) -> VizResult<crate::RasterGrid> {
        Ok(self.clone())
    }
}
