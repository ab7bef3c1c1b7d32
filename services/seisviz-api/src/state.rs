//! Application state shared by all handlers.

use std::sync::Arc;

use dem_reader::DemFile;
use metrics_exporter_prometheus::PrometheusHandle;
use segy_parser::SegyFile;
use seisviz_common::{RasterSource, TraceSource};

use crate::config::{DataConfig, LimitsConfig};

/// Shared application state.
///
/// Holds no per-request data; sources open their files on every call.
#[derive(Clone, Default)]
pub struct AppState {
    /// Resolved dataset locations.
    pub data: DataConfig,

    /// Request size limits.
    pub limits: LimitsConfig,

    /// Seismic source, `None` when no SEG-Y file was found.
    pub segy: Option<Arc<dyn TraceSource>>,

    /// Elevation source, `None` when no DEM file was found.
    pub dem: Option<Arc<dyn RasterSource>>,

    /// Renders `/metrics`; absent when no recorder is installed.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Build file-backed sources for the resolved paths.
    pub fn new(data: DataConfig, limits: LimitsConfig) -> Self {
        let segy = data
            .segy_path
            .clone()
            .map(|p| Arc::new(SegyFile::new(p)) as Arc<dyn TraceSource>);
        let dem = data
            .dem_path
            .clone()
            .map(|p| Arc::new(DemFile::new(p)) as Arc<dyn RasterSource>);
        Self {
            data,
            limits,
            segy,
            dem,
            prometheus: None,
        }
    }

    pub fn with_trace_source(mut self, source: Arc<dyn TraceSource>) -> Self {
        self.segy = Some(source);
        self
    }

    pub fn with_raster_source(mut self, source: Arc<dyn RasterSource>) -> Self {
        self.dem = Some(source);
        self
    }

    pub fn with_limits(mut self, limits: LimitsConfig) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("data", &self.data)
            .field("limits", &self.limits)
            .field("segy", &self.segy.is_some())
            .field("dem", &self.dem.is_some())
            .finish()
    }
}
