//! The service's logical operations.
//!
//! Each is a synchronous function of the application state and its
//! parameters; handlers run them on the blocking pool. Missing sources are
//! reported as [`VizError::SourceNotFound`].

use std::sync::Arc;
use std::time::Instant;

use renderer::{
    assemble_volume, build_heightfield, build_wiggles, rasterize, DensityImage, DensityMode,
    HeightfieldGrid, VolumeRequest, VolumeStack, WiggleOptions, WiggleResult,
};
use seisviz_common::{RasterSource, SourceInfo, TraceGather, TraceSource, VizError, VizResult};

use crate::limits;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemParams {
    pub decimate: i64,
    pub z_scale: f64,
}

impl Default for DemParams {
    fn default() -> Self {
        Self {
            decimate: 3,
            z_scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DensityParams {
    pub start: i64,
    pub count: i64,
    pub mode: DensityMode,
}

impl Default for DensityParams {
    fn default() -> Self {
        Self {
            start: 0,
            count: 200,
            mode: DensityMode::Symmetric,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WiggleParams {
    pub start: i64,
    pub count: i64,
    pub max_points: i64,
    pub scale: f32,
}

impl Default for WiggleParams {
    fn default() -> Self {
        Self {
            start: 0,
            count: 60,
            max_points: 600,
            scale: 0.7,
        }
    }
}

fn segy_source(state: &AppState) -> VizResult<&Arc<dyn TraceSource>> {
    state.segy.as_ref().ok_or_else(|| {
        VizError::SourceNotFound(format!(
            "SEG-Y file not found in {} (seismic.sgy or seismic.segy)",
            state.data.data_dir.display()
        ))
    })
}

fn dem_source(state: &AppState) -> VizResult<&Arc<dyn RasterSource>> {
    state.dem.as_ref().ok_or_else(|| {
        VizError::SourceNotFound(format!(
            "DEM file not found in {} (dem.tif or dem.tiff)",
            state.data.data_dir.display()
        ))
    })
}

/// Heightfield grid for the configured DEM.
pub fn dem_grid(state: &AppState, params: DemParams) -> VizResult<HeightfieldGrid> {
    let raster = dem_source(state)?.raster_grid()?;
    let step = params.decimate.max(1) as usize;
    limits::check_dem_points(
        raster.width.div_ceil(step),
        raster.height.div_ceil(step),
        &state.limits,
    )?;
    build_heightfield(&raster, params.decimate, params.z_scale)
}

/// Trace count, sample count and sample interval of the SEG-Y file.
pub fn segy_info(state: &AppState) -> VizResult<SourceInfo> {
    segy_source(state)?.info()
}

fn gather(state: &AppState, start: i64, count: i64) -> VizResult<TraceGather> {
    limits::check_trace_count(count, &state.limits)?;
    let started = Instant::now();
    let gather = segy_source(state)?.trace_gather(start, count)?;
    tracing::debug!(
        start,
        count,
        traces = gather.trace_count(),
        samples = gather.sample_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Read trace gather"
    );
    Ok(gather)
}

/// Density image of a gather, ready for PNG encoding.
pub fn density_image(state: &AppState, params: DensityParams) -> VizResult<DensityImage> {
    let gather = gather(state, params.start, params.count)?;
    rasterize(&gather, params.mode)
}

/// Wiggle polylines of a gather.
pub fn wiggle(state: &AppState, params: WiggleParams) -> VizResult<WiggleResult> {
    let max_points = limits::check_wiggle_points(params.max_points, &state.limits)?;
    let gather = gather(state, params.start, params.count)?;
    build_wiggles(
        &gather,
        &WiggleOptions {
            scale: params.scale,
            max_points,
        },
    )
}

/// Clipped volume stack.
pub fn volume(state: &AppState, request: VolumeRequest) -> VizResult<VolumeStack> {
    let source = segy_source(state)?;
    let info = source.info()?;
    limits::check_volume(&request, &info, &state.limits)?;
    assemble_volume(source.as_ref(), &request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LimitsConfig;
    use seisviz_common::{InMemoryTraceSource, RasterGrid};

    fn state_with_zeros(traces: usize, samples: usize) -> AppState {
        let source = InMemoryTraceSource::new(TraceGather::zeros(traces, samples).unwrap(), 4000);
        AppState::default().with_trace_source(Arc::new(source))
    }

    #[test]
    fn test_missing_sources_are_not_found() {
        let state = AppState::default();
        assert!(matches!(segy_info(&state), Err(VizError::SourceNotFound(_))));
        assert!(matches!(
            dem_grid(&state, DemParams::default()),
            Err(VizError::SourceNotFound(_))
        ));
        assert!(matches!(
            volume(&state, VolumeRequest::default()),
            Err(VizError::SourceNotFound(_))
        ));
    }

    #[test]
    fn test_density_of_zero_gather() {
        let state = state_with_zeros(4, 8);
        let img = density_image(
            &state,
            DensityParams {
                count: 4,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!((img.traces, img.samples), (4, 8));
        assert!(img.pixels.iter().all(|&p| p == 127));
    }

    #[test]
    fn test_wiggle_defaults_clamp_to_source() {
        let state = state_with_zeros(4, 8);
        let result = wiggle(&state, WiggleParams::default()).unwrap();
        assert_eq!(result.trace_count, 4);
        assert_eq!(result.polylines[2][0][0], 2.0);
    }

    #[test]
    fn test_wiggle_rejects_non_positive_points() {
        let state = state_with_zeros(4, 8);
        let params = WiggleParams {
            max_points: -1,
            ..Default::default()
        };
        assert_eq!(wiggle(&state, params).unwrap_err().http_status_code(), 400);
    }

    #[test]
    fn test_volume_limit() {
        let state = state_with_zeros(100, 100).with_limits(LimitsConfig {
            max_volume_voxels: 10,
            ..Default::default()
        });
        assert_eq!(
            volume(&state, VolumeRequest::default())
                .unwrap_err()
                .http_status_code(),
            413
        );
    }

    #[test]
    fn test_dem_grid_from_raster() {
        let raster = RasterGrid::new(6, 6, (0..36).map(|v| v as f64).collect()).unwrap();
        let state = AppState::default().with_raster_source(Arc::new(raster));
        let grid = dem_grid(&state, DemParams::default()).unwrap();
        assert_eq!((grid.width, grid.height), (2, 2));
        assert_eq!(grid.z.len(), 4);
    }
}
