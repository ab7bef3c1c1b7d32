//! Raster elevation model reader.
//!
//! DEMs are read as ordinary images through the `image` crate (PNG, TIFF
//! and the other formats it decodes). TIFFs whose sample format `image`
//! does not handle (single-band float, signed integer) are decoded with
//! `tiff` directly. Multi-channel images contribute only their first
//! channel; no georeferencing is interpreted.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageError};
use tiff::decoder::{Decoder, DecodingResult};
use tiff::ColorType;
use seisviz_common::{RasterGrid, RasterSource, VizError, VizResult};
use thiserror::Error;

/// Result type for DEM reader operations.
pub type DemResult<T> = Result<T, DemError>;

/// Error types for DEM reading.
#[derive(Error, Debug)]
pub enum DemError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The image decoder rejected the file
    #[error("Failed to decode raster: {0}")]
    Decode(#[from] image::ImageError),

    /// The TIFF decoder rejected the file
    #[error("Failed to decode TIFF: {0}")]
    Tiff(#[from] tiff::TiffError),

    /// Decoded image has an unusable shape
    #[error("Invalid raster: {0}")]
    InvalidRaster(String),
}

impl From<DemError> for VizError {
    fn from(err: DemError) -> Self {
        match err {
            DemError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                VizError::SourceNotFound(e.to_string())
            }
            DemError::Decode(image::ImageError::IoError(e))
                if e.kind() == std::io::ErrorKind::NotFound =>
            {
                VizError::SourceNotFound(e.to_string())
            }
            other => VizError::DataReadError(other.to_string()),
        }
    }
}

/// Read a raster file into a single-channel grid.
pub fn read_raster(path: impl AsRef<Path>) -> DemResult<RasterGrid> {
    let path = path.as_ref();
    let img = match image::open(path) {
        Ok(img) => img,
        Err(ImageError::Unsupported(e)) if is_tiff(path) => {
            tracing::debug!(path = %path.display(), reason = %e, "Falling back to TIFF decoder");
            return read_tiff(path);
        }
        Err(e) => return Err(e.into()),
    };
    let grid = raster_from_image(&img)?;
    tracing::debug!(
        path = %path.display(),
        width = grid.width,
        height = grid.height,
        color = ?img.color(),
        "Read DEM raster"
    );
    Ok(grid)
}

fn is_tiff(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("tif") || e.eq_ignore_ascii_case("tiff"))
        .unwrap_or(false)
}

/// Decode the first image of a TIFF file with the `tiff` crate.
pub fn read_tiff(path: impl AsRef<Path>) -> DemResult<RasterGrid> {
    let path = path.as_ref();
    let mut decoder = Decoder::new(BufReader::new(File::open(path)?))?;
    let (w, h) = decoder.dimensions()?;
    let color = decoder.colortype()?;
    let channels = tiff_channels(color);
    let (w, h) = (w as usize, h as usize);

    let grid = match decoder.read_image()? {
        DecodingResult::U8(buf) => RasterGrid::from_first_channel(w, h, channels, &buf),
        DecodingResult::U16(buf) => RasterGrid::from_first_channel(w, h, channels, &buf),
        DecodingResult::U32(buf) => RasterGrid::from_first_channel(w, h, channels, &buf),
        DecodingResult::I8(buf) => RasterGrid::from_first_channel(w, h, channels, &buf),
        DecodingResult::I16(buf) => RasterGrid::from_first_channel(w, h, channels, &buf),
        DecodingResult::I32(buf) => RasterGrid::from_first_channel(w, h, channels, &buf),
        DecodingResult::F32(buf) => RasterGrid::from_first_channel(w, h, channels, &buf),
        DecodingResult::F64(buf) => RasterGrid::from_first_channel(w, h, channels, &buf),
        DecodingResult::U64(buf) => {
            let wide: Vec<f64> = buf.into_iter().map(|v| v as f64).collect();
            RasterGrid::from_first_channel(w, h, channels, &wide)
        }
        DecodingResult::I64(buf) => {
            let wide: Vec<f64> = buf.into_iter().map(|v| v as f64).collect();
            RasterGrid::from_first_channel(w, h, channels, &wide)
        }
    }
    .map_err(|e| DemError::InvalidRaster(e.to_string()))?;

    tracing::debug!(
        path = %path.display(),
        width = grid.width,
        height = grid.height,
        color = ?color,
        "Read DEM raster via TIFF decoder"
    );
    Ok(grid)
}

/// Interleaved samples per pixel for a TIFF color type.
fn tiff_channels(color: ColorType) -> usize {
    match color {
        ColorType::GrayA(_) => 2,
        ColorType::RGB(_) => 3,
        ColorType::RGBA(_) | ColorType::CMYK(_) => 4,
        _ => 1,
    }
}

/// Convert a decoded image into a grid of its first channel.
pub fn raster_from_image(img: &DynamicImage) -> DemResult<RasterGrid> {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let grid = match img {
        DynamicImage::ImageLuma8(buf) => RasterGrid::from_first_channel(w, h, 1, buf.as_raw()),
        DynamicImage::ImageLumaA8(buf) => RasterGrid::from_first_channel(w, h, 2, buf.as_raw()),
        DynamicImage::ImageRgb8(buf) => RasterGrid::from_first_channel(w, h, 3, buf.as_raw()),
        DynamicImage::ImageRgba8(buf) => RasterGrid::from_first_channel(w, h, 4, buf.as_raw()),
        DynamicImage::ImageLuma16(buf) => RasterGrid::from_first_channel(w, h, 1, buf.as_raw()),
        DynamicImage::ImageLumaA16(buf) => RasterGrid::from_first_channel(w, h, 2, buf.as_raw()),
        DynamicImage::ImageRgb16(buf) => RasterGrid::from_first_channel(w, h, 3, buf.as_raw()),
        DynamicImage::ImageRgba16(buf) => RasterGrid::from_first_channel(w, h, 4, buf.as_raw()),
        DynamicImage::ImageRgb32F(buf) => RasterGrid::from_first_channel(w, h, 3, buf.as_raw()),
        DynamicImage::ImageRgba32F(buf) => RasterGrid::from_first_channel(w, h, 4, buf.as_raw()),
        other => {
            let buf = other.to_rgb32f();
            RasterGrid::from_first_channel(w, h, 3, buf.as_raw())
        }
    };
    grid.map_err(|e| DemError::InvalidRaster(e.to_string()))
}

/// A raster file on disk exposed as a [`RasterSource`].
#[derive(Debug, Clone)]
pub struct DemFile {
    path: PathBuf,
}

impl DemFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RasterSource for DemFile {
    fn raster_grid(&self) -> VizResult<RasterGrid> {
        Ok(read_raster(&self.path)?)
    }
}
