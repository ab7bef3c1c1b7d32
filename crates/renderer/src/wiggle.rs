//! Wiggle-trace polylines.
//!
//! Each trace becomes one polyline drawn around its own trace index: x is
//! the trace index plus the scaled amplitude, y is the sample index.
//! Long traces are thinned to at most `max_points` vertices.

use rayon::prelude::*;
use seisviz_common::{TraceGather, VizError, VizResult};
use serde::Serialize;

use crate::normalize::{clean_non_finite, CLIP_EPSILON};

/// Minimum trace count before polylines are built in parallel
const PARALLEL_THRESHOLD: usize = 64;

/// A vertex as `[x, y]`.
pub type Point = [f32; 2];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WiggleOptions {
    /// Peak deflection in trace spacings
    pub scale: f32,
    /// Upper bound on vertices per polyline
    pub max_points: usize,
}

impl Default for WiggleOptions {
    fn default() -> Self {
        Self {
            scale: 0.7,
            max_points: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WiggleResult {
    pub trace_count: usize,
    pub sample_count: usize,
    pub step: usize,
    pub polylines: Vec<Vec<Point>>,
}

/// Sample step that keeps at most `max_points` vertices per trace.
pub fn sample_step(sample_count: usize, max_points: usize) -> usize {
    sample_count.div_ceil(max_points.max(1)).max(1)
}

/// Build one polyline per trace.
pub fn build_wiggles(gather: &TraceGather, options: &WiggleOptions) -> VizResult<WiggleResult> {
    if options.max_points == 0 {
        return Err(VizError::invalid("maxPoints", "must be at least 1"));
    }
    if !options.scale.is_finite() {
        return Err(VizError::invalid("scale", "must be a finite number"));
    }
    let (traces, samples) = gather.shape();

    let mut values = gather.as_slice().to_vec();
    clean_non_finite(&mut values, 0.0);
    let peak = values.iter().fold(0.0f32, |m, v| m.max(v.abs()));
    let gain = options.scale as f64 / (peak as f64 + CLIP_EPSILON);

    let step = sample_step(samples, options.max_points);

    let polyline = |(i, trace): (usize, &[f32])| -> Vec<Point> {
        (0..samples)
            .step_by(step)
            .map(|j| [(i as f64 + trace[j] as f64 * gain) as f32, j as f32])
            .collect()
    };

    let polylines: Vec<Vec<Point>> = if traces >= PARALLEL_THRESHOLD {
        values
            .par_chunks_exact(samples)
            .enumerate()
            .map(polyline)
            .collect()
    } else {
        values.chunks_exact(samples).enumerate().map(polyline).collect()
    };

    tracing::debug!(traces, samples, step, "Built wiggle polylines");

    Ok(WiggleResult {
        trace_count: traces,
        sample_count: samples,
        step,
        polylines,
    })
}
