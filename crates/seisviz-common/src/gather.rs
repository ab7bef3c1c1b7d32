//! Trace gathers: contiguous groups of traces held as one 2D array.

use crate::{VizError, VizResult};

/// A 2D block of amplitude samples, shape (traces, samples).
///
/// Samples are stored trace-major: all samples of trace 0, then trace 1, ...
#[derive(Debug, Clone, PartialEq)]
pub struct TraceGather {
    traces: usize,
    samples: usize,
    data: Vec<f32>,
}

impl TraceGather {
    /// Create a gather from trace-major data.
    ///
    /// Fails with a shape error when either dimension is zero or the data
    /// length does not match `traces * samples`.
    pub fn new(traces: usize, samples: usize, data: Vec<f32>) -> VizResult<Self> {
        if traces == 0 || samples == 0 {
            return Err(VizError::shape("Gather", &[traces, samples]));
        }
        if data.len() != traces * samples {
            return Err(VizError::shape("Gather", &[data.len()]));
        }
        Ok(Self {
            traces,
            samples,
            data,
        })
    }

    /// Create a gather from one vector per trace.
    ///
    /// Ragged input (traces of different lengths) is rejected.
    pub fn from_traces(rows: Vec<Vec<f32>>) -> VizResult<Self> {
        let traces = rows.len();
        let samples = rows.first().map(|r| r.len()).unwrap_or(0);
        if let Some(bad) = rows.iter().find(|r| r.len() != samples) {
            return Err(VizError::shape("Gather", &[traces, samples, bad.len()]));
        }
        let data: Vec<f32> = rows.into_iter().flatten().collect();
        Self::new(traces, samples, data)
    }

    /// A gather filled with zeros.
    pub fn zeros(traces: usize, samples: usize) -> VizResult<Self> {
        Self::new(traces, samples, vec![0.0; traces * samples])
    }

    pub fn trace_count(&self) -> usize {
        self.traces
    }

    pub fn sample_count(&self) -> usize {
        self.samples
    }

    /// (traces, samples)
    pub fn shape(&self) -> (usize, usize) {
        (self.traces, self.samples)
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Samples of a single trace.
    pub fn trace(&self, i: usize) -> &[f32] {
        let start = i * self.samples;
        &self.data[start..start + self.samples]
    }

    /// Iterate over traces in order.
    pub fn traces(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.samples)
    }

    pub fn get(&self, trace: usize, sample: usize) -> Option<f32> {
        if trace >= self.traces || sample >= self.samples {
            return None;
        }
        Some(self.data[trace * self.samples + sample])
    }

    /// Keep every `step`-th sample of each trace, starting at sample 0.
    pub fn decimate_samples(&self, step: usize) -> TraceGather {
        let step = step.max(1);
        if step == 1 {
            return self.clone();
        }
        let kept = self.samples.div_ceil(step);
        let mut data = Vec::with_capacity(self.traces * kept);
        for trace in self.traces() {
            data.extend(trace.iter().step_by(step).copied());
        }
        TraceGather {
            traces: self.traces,
            samples: kept,
            data,
        }
    }
}

/// A clamped, non-empty range of trace indices `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatherRange {
    pub start: usize,
    pub end: usize,
}

impl GatherRange {
    /// Clamp a requested `(start, count)` against a source with `total` traces.
    ///
    /// `start' = clamp(start, 0, total-1)` and
    /// `end' = clamp(start'+count, start'+1, total)`, so at least one trace
    /// is always selected. Only an empty source is an error.
    pub fn clamp(start: i64, count: i64, total: usize) -> VizResult<Self> {
        if total == 0 {
            return Err(VizError::EmptySource("source has no traces".to_string()));
        }
        let last = (total - 1) as i64;
        let start = start.clamp(0, last);
        let end = start
            .saturating_add(count)
            .min(total as i64)
            .max(start + 1);
        Ok(Self {
            start: start as usize,
            end: end as usize,
        })
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}
