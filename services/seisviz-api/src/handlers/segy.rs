//! SEG-Y info, density, wiggle and volume handlers.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    response::Response,
};
use renderer::{DensityMode, VolumeRequest};
use seisviz_common::VizResult;
use serde::Deserialize;

use super::{parse_param, run_blocking};
use crate::encode;
use crate::error::{ApiError, ErrorFormat};
use crate::operations::{self, DensityParams, WiggleParams};
use crate::state::AppState;

/// GET /api/segy/info
pub async fn info_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let info = run_blocking("info", ErrorFormat::Json, move || {
        operations::segy_info(&state)
    })
    .await?;
    Ok(encode::json(&info))
}

/// Query parameters for `/api/segy/density`.
#[derive(Debug, Default, Deserialize)]
pub struct DensityQuery {
    pub start: Option<String>,
    pub count: Option<String>,
    /// `symmetric` (default) or `percentile`
    pub mode: Option<String>,
}

impl DensityQuery {
    fn parse(&self) -> VizResult<DensityParams> {
        let d = DensityParams::default();
        Ok(DensityParams {
            start: parse_param(self.start.as_deref(), "start", d.start)?,
            count: parse_param(self.count.as_deref(), "count", d.count)?,
            mode: parse_param::<DensityMode>(self.mode.as_deref(), "mode", d.mode)?,
        })
    }
}

/// GET /api/segy/density
pub async fn density_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<DensityQuery>,
) -> Result<Response, ApiError> {
    const OP: &str = "density";
    let params = query
        .parse()
        .map_err(|e| ApiError::new(OP, ErrorFormat::Text, e))?;
    let image = run_blocking(OP, ErrorFormat::Text, move || {
        operations::density_image(&state, params)
    })
    .await?;
    encode::png(&image).map_err(|e| ApiError::new(OP, ErrorFormat::Text, e))
}

/// Query parameters for `/api/segy/wiggle`.
#[derive(Debug, Default, Deserialize)]
pub struct WiggleQuery {
    pub start: Option<String>,
    pub count: Option<String>,
    #[serde(rename = "maxPoints")]
    pub max_points: Option<String>,
    /// Peak deflection in trace spacings
    pub scale: Option<String>,
}

impl WiggleQuery {
    fn parse(&self) -> VizResult<WiggleParams> {
        let d = WiggleParams::default();
        Ok(WiggleParams {
            start: parse_param(self.start.as_deref(), "start", d.start)?,
            count: parse_param(self.count.as_deref(), "count", d.count)?,
            max_points: parse_param(self.max_points.as_deref(), "maxPoints", d.max_points)?,
            scale: parse_param(self.scale.as_deref(), "scale", d.scale)?,
        })
    }
}

/// GET /api/segy/wiggle
pub async fn wiggle_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<WiggleQuery>,
) -> Result<Response, ApiError> {
    const OP: &str = "wiggle";
    let params = query
        .parse()
        .map_err(|e| ApiError::new(OP, ErrorFormat::Json, e))?;
    let result = run_blocking(OP, ErrorFormat::Json, move || {
        operations::wiggle(&state, params)
    })
    .await?;
    Ok(encode::json(&result))
}

/// Query parameters for `/api/segy/volume`.
#[derive(Debug, Default, Deserialize)]
pub struct VolumeQuery {
    pub start: Option<String>,
    pub count: Option<String>,
    pub slices: Option<String>,
    pub stride: Option<String>,
    #[serde(rename = "sampleDecim")]
    pub sample_decim: Option<String>,
}

impl VolumeQuery {
    fn parse(&self) -> VizResult<VolumeRequest> {
        let d = VolumeRequest::default();
        Ok(VolumeRequest {
            start: parse_param(self.start.as_deref(), "start", d.start)?,
            count: parse_param(self.count.as_deref(), "count", d.count)?,
            slices: parse_param(self.slices.as_deref(), "slices", d.slices)?,
            stride: parse_param(self.stride.as_deref(), "stride", d.stride)?,
            sample_decim: parse_param(self.sample_decim.as_deref(), "sampleDecim", d.sample_decim)?,
        })
    }
}

/// GET /api/segy/volume
pub async fn volume_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<VolumeQuery>,
) -> Result<Response, ApiError> {
    const OP: &str = "volume";
    let request = query
        .parse()
        .map_err(|e| ApiError::new(OP, ErrorFormat::Text, e))?;
    let stack = run_blocking(OP, ErrorFormat::Text, move || {
        operations::volume(&state, request)
    })
    .await?;
    encode::volume(&stack).map_err(|e| ApiError::new(OP, ErrorFormat::Text, e))
}
