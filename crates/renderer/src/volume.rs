//! Volume stacks assembled from several trace gathers.
//!
//! Slice `k` is the gather starting at `start + k * stride`. The stack is
//! laid out (slice, time sample, trace) with the trace index varying
//! fastest, the order volume renderers expect for a C-order float32 array.

use rayon::prelude::*;
use seisviz_common::{TraceGather, TraceSource, VizResult};

use crate::normalize::{min_max, SymmetricClip};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeRequest {
    pub start: i64,
    pub count: i64,
    pub slices: i64,
    pub stride: i64,
    pub sample_decim: i64,
}

impl Default for VolumeRequest {
    fn default() -> Self {
        Self {
            start: 0,
            count: 128,
            slices: 32,
            stride: 20,
            sample_decim: 2,
        }
    }
}

impl VolumeRequest {
    pub fn slice_count(&self) -> usize {
        self.slices.max(1) as usize
    }

    pub fn slice_stride(&self) -> i64 {
        self.stride.max(1)
    }

    pub fn sample_step(&self) -> usize {
        self.sample_decim.max(1) as usize
    }

    /// First trace requested for slice `k`.
    pub fn slice_start(&self, k: usize) -> i64 {
        self.start
            .saturating_add((k as i64).saturating_mul(self.slice_stride()))
    }
}

/// A clipped float32 volume, `data[z][y][x]` in C order.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeStack {
    /// Traces per slice
    pub nx: usize,
    /// Decimated samples per trace
    pub ny: usize,
    /// Slices
    pub nz: usize,
    pub data: Vec<f32>,
    /// Voxel spacing along (x, y, z)
    pub spacing: [f64; 3],
    /// Realized (min, max) after clipping
    pub range: (f32, f32),
    /// Magnitude bound the data was clipped to
    pub clip: f64,
}

impl VolumeStack {
    /// Shape as (slices, samples, traces).
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.nz, self.ny, self.nx)
    }

    pub fn get(&self, z: usize, y: usize, x: usize) -> Option<f32> {
        if z >= self.nz || y >= self.ny || x >= self.nx {
            return None;
        }
        Some(self.data[(z * self.ny + y) * self.nx + x])
    }

    /// Raw little-endian float32 bytes in C order.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() * 4);
        for v in &self.data {
            out.extend_from_slice(&v.to_le_bytes());
        }
        out
    }
}

/// Fetch every slice and assemble the clipped volume.
pub fn assemble_volume(source: &dyn TraceSource, request: &VolumeRequest) -> VizResult<VolumeStack> {
    let info = source.info()?;
    let step = request.sample_step();

    let gathers: Vec<TraceGather> = (0..request.slice_count())
        .into_par_iter()
        .map(|k| {
            let gather = source.trace_gather(request.slice_start(k), request.count)?;
            Ok(gather.decimate_samples(step))
        })
        .collect::<VizResult<_>>()?;

    let mut stack = stack_slices(&gathers);
    stack.spacing = [1.0, info.dt_ms() * step as f64, 1.0];
    clip_stack(&mut stack);

    tracing::debug!(
        nx = stack.nx,
        ny = stack.ny,
        nz = stack.nz,
        clip = stack.clip,
        "Assembled volume stack"
    );
    Ok(stack)
}

/// Reorder (slice, trace, sample) gathers into (slice, sample, trace).
///
/// Slices shorter than the first are zero-padded; longer ones are cut.
fn stack_slices(gathers: &[TraceGather]) -> VolumeStack {
    let nz = gathers.len();
    let (nx, ny) = gathers.first().map(|g| g.shape()).unwrap_or((0, 0));
    let mut data = vec![0.0f32; nz * ny * nx];

    data.par_chunks_mut((ny * nx).max(1))
        .zip(gathers.par_iter())
        .for_each(|(slab, gather)| {
            let traces = gather.trace_count().min(nx);
            let samples = gather.sample_count().min(ny);
            for x in 0..traces {
                let trace = gather.trace(x);
                for y in 0..samples {
                    slab[y * nx + x] = trace[y];
                }
            }
        });

    VolumeStack {
        nx,
        ny,
        nz,
        data,
        spacing: [1.0; 3],
        range: (0.0, 0.0),
        clip: 0.0,
    }
}

fn clip_stack(stack: &mut VolumeStack) {
    stack.clip = SymmetricClip::VOLUME.clip(&mut stack.data);
    stack.range = min_max(&stack.data).unwrap_or((0.0, 0.0));
}
