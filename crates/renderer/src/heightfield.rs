//! Heightfield point grids built from elevation rasters.

use seisviz_common::{RasterGrid, VizError, VizResult};
use serde::Serialize;

use crate::normalize::{min_max, PercentileClip};

/// Flattened (x, y, z) vertices of a decimated raster, row-major.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeightfieldGrid {
    pub width: usize,
    pub height: usize,
    /// Column index of each vertex
    pub x: Vec<f32>,
    /// Row index of each vertex
    pub y: Vec<f32>,
    pub z: Vec<f32>,
    /// Realized (min, max) of `z`
    pub z_range: [f32; 2],
}

/// Decimate, normalize to [0, 1] and scale by `z_scale`.
///
/// `decimate` below 1 is treated as 1.
pub fn build_heightfield(
    raster: &RasterGrid,
    decimate: i64,
    z_scale: f64,
) -> VizResult<HeightfieldGrid> {
    if !z_scale.is_finite() {
        return Err(VizError::invalid("zScale", "must be a finite number"));
    }
    let grid = raster.decimate(decimate.max(1) as usize);
    let (width, height) = (grid.width, grid.height);
    if width == 0 || height == 0 {
        return Err(VizError::shape("Raster", &[height, width]));
    }

    let mut z = grid.values;
    PercentileClip::terrain().apply(&mut z);
    let z: Vec<f32> = z.into_iter().map(|v| (v * z_scale) as f32).collect();

    let mut x = Vec::with_capacity(z.len());
    let mut y = Vec::with_capacity(z.len());
    for row in 0..height {
        for col in 0..width {
            x.push(col as f32);
            y.push(row as f32);
        }
    }

    let (lo, hi) = min_max(&z).unwrap_or((0.0, 0.0));

    tracing::debug!(width, height, z_min = lo, z_max = hi, "Built heightfield grid");

    Ok(HeightfieldGrid {
        width,
        height,
        x,
        y,
        z,
        z_range: [lo, hi],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: usize, height: usize) -> RasterGrid {
        let values = (0..width * height).map(|i| i as f64).collect();
        RasterGrid::new(width, height, values).unwrap()
    }

    #[test]
    fn test_lengths_and_coordinates() {
        let grid = build_heightfield(&ramp(5, 4), 2, 1.0).unwrap();
        assert_eq!((grid.width, grid.height), (3, 2));
        assert_eq!(grid.x, vec![0.0, 1.0, 2.0, 0.0, 1.0, 2.0]);
        assert_eq!(grid.y, vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert_eq!(grid.z.len(), 6);
    }

    #[test]
    fn test_z_within_range_and_scaled() {
        let grid = build_heightfield(&ramp(20, 20), 1, 3.0).unwrap();
        let [lo, hi] = grid.z_range;
        assert_eq!(lo, 0.0);
        assert_eq!(hi, 3.0);
        assert!(grid.z.iter().all(|&z| z >= lo && z <= hi));
    }

    #[test]
    fn test_constant_raster_is_flat() {
        let raster = RasterGrid::new(3, 3, vec![250.0; 9]).unwrap();
        let grid = build_heightfield(&raster, 1, 2.0).unwrap();
        assert_eq!(grid.z_range, [0.0, 0.0]);
        assert!(grid.z.iter().all(|&z| z == 0.0));
    }

    #[test]
    fn test_nan_cells_cleaned() {
        let mut values = vec![10.0; 16];
        values[5] = f64::NAN;
        values[6] = f64::INFINITY;
        let raster = RasterGrid::new(4, 4, values).unwrap();
        let grid = build_heightfield(&raster, 1, 1.0).unwrap();
        assert!(grid.z.iter().all(|z| z.is_finite()));
    }

    #[test]
    fn test_rejects_non_finite_scale() {
        let err = build_heightfield(&ramp(2, 2), 1, f64::NAN).unwrap_err();
        assert!(matches!(err, VizError::InvalidParameter { .. }));
    }

    #[test]
    fn test_serializes_z_range() {
        let grid = build_heightfield(&ramp(2, 1), 1, 1.0).unwrap();
        let json = serde_json::to_value(&grid).unwrap();
        assert!(json.get("zRange").is_some());
        assert_eq!(json["width"], 2);
    }
}
