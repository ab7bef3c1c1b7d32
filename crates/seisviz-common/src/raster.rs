//! Single-channel raster grids (elevation models and similar).

use crate::{VizError, VizResult};

/// A row-major single-channel raster.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterGrid {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Values in row-major order (row 0 first)
    pub values: Vec<f64>,
}

impl RasterGrid {
    /// Create a raster, validating that the data matches the dimensions.
    pub fn new(width: usize, height: usize, values: Vec<f64>) -> VizResult<Self> {
        if width == 0 || height == 0 || values.len() != width * height {
            return Err(VizError::shape("Raster", &[height, width]));
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Build a raster from interleaved multi-channel samples, keeping only
    /// the first channel.
    pub fn from_first_channel<T: Copy + Into<f64>>(
        width: usize,
        height: usize,
        channels: usize,
        samples: &[T],
    ) -> VizResult<Self> {
        let channels = channels.max(1);
        if samples.len() != width * height * channels {
            return Err(VizError::shape("Raster", &[height, width, channels]));
        }
        let values = samples
            .chunks_exact(channels)
            .map(|px| px[0].into())
            .collect();
        Self::new(width, height, values)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.values[row * self.width + col])
    }

    /// Keep every `step`-th row and column, starting at (0, 0).
    pub fn decimate(&self, step: usize) -> RasterGrid {
        let step = step.max(1);
        if step == 1 {
            return self.clone();
        }
        let width = self.width.div_ceil(step);
        let height = self.height.div_ceil(step);
        let mut values = Vec::with_capacity(width * height);
        for row in (0..self.height).step_by(step) {
            let start = row * self.width;
            values.extend(
                self.values[start..start + self.width]
                    .iter()
                    .step_by(step)
                    .copied(),
            );
        }
        RasterGrid {
            width,
            height,
            values,
        }
    }
}
