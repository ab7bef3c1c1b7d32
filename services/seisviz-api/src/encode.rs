//! Response encoding for operation results.

use axum::{
    http::{header, HeaderMap, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use renderer::{DensityImage, VolumeStack};
use seisviz_common::{VizError, VizResult};
use serde::Serialize;

pub const X_DIMENSIONS: HeaderName = HeaderName::from_static("x-dimensions");
pub const X_SPACING: HeaderName = HeaderName::from_static("x-spacing");
pub const X_RANGE: HeaderName = HeaderName::from_static("x-range");
pub const X_DTYPE: HeaderName = HeaderName::from_static("x-dtype");

/// Headers a browser client must be allowed to read on volume responses.
pub const EXPOSED_HEADERS: [HeaderName; 4] = [X_DIMENSIONS, X_SPACING, X_RANGE, X_DTYPE];

pub fn json<T: Serialize>(value: &T) -> Response {
    Json(value).into_response()
}

/// Density image as a grayscale PNG, time running down the image.
pub fn png(image: &DensityImage) -> VizResult<Response> {
    let bytes = image.to_png()?;
    Ok(([(header::CONTENT_TYPE, "image/png")], Bytes::from(bytes)).into_response())
}

/// Volume as raw little-endian float32 with its shape in headers.
pub fn volume(stack: &VolumeStack) -> VizResult<Response> {
    let [sx, sy, sz] = stack.spacing;
    let (vmin, vmax) = stack.range;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    headers.insert(
        X_DIMENSIONS,
        header_value(format!("{},{},{}", stack.nx, stack.ny, stack.nz))?,
    );
    headers.insert(X_SPACING, header_value(format!("{:?},{:?},{:?}", sx, sy, sz))?);
    headers.insert(
        X_RANGE,
        header_value(format!("{:?},{:?}", vmin as f64, vmax as f64))?,
    );
    headers.insert(X_DTYPE, HeaderValue::from_static("float32"));

    Ok((headers, Bytes::from(stack.to_le_bytes())).into_response())
}

fn header_value(s: String) -> VizResult<HeaderValue> {
    HeaderValue::from_str(&s).map_err(|e| VizError::InternalError(format!("bad header {:?}: {}", s, e)))
}
