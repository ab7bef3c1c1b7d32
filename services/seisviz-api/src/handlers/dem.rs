//! DEM heightfield handler.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    response::Response,
};
use seisviz_common::VizResult;
use serde::Deserialize;

use super::{parse_param, run_blocking};
use crate::encode;
use crate::error::{ApiError, ErrorFormat};
use crate::operations::{self, DemParams};
use crate::state::AppState;

/// Query parameters for `/api/dem`.
#[derive(Debug, Default, Deserialize)]
pub struct DemQuery {
    /// Keep every n-th row and column.
    pub decimate: Option<String>,

    /// Multiplier applied after normalizing heights to [0, 1].
    #[serde(rename = "zScale")]
    pub z_scale: Option<String>,
}

impl DemQuery {
    fn parse(&self) -> VizResult<DemParams> {
        let d = DemParams::default();
        Ok(DemParams {
            decimate: parse_param(self.decimate.as_deref(), "decimate", d.decimate)?,
            z_scale: parse_param(self.z_scale.as_deref(), "zScale", d.z_scale)?,
        })
    }
}

/// GET /api/dem
pub async fn dem_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<DemQuery>,
) -> Result<Response, ApiError> {
    let params = query
        .parse()
        .map_err(|e| ApiError::new("dem", ErrorFormat::Json, e))?;
    let grid = run_blocking("dem", ErrorFormat::Json, move || {
        operations::dem_grid(&state, params)
    })
    .await?;
    Ok(encode::json(&grid))
}
