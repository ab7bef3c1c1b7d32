//! Tests for heightfield grids built from in-memory and PNG rasters.

use dem_reader::read_raster;
use renderer::heightfield::build_heightfield;
use seisviz_common::RasterGrid;
use test_utils::{assert_approx_eq, create_hill_elevation, write_dem_png, FixtureDir};

#[test]
fn test_lengths_equal_width_times_height() {
    for (w, h, d) in [(10, 7, 3), (1, 1, 1), (9, 9, 4), (5, 3, 0)] {
        let raster = RasterGrid::new(w, h, create_hill_elevation(w, h)).unwrap();
        let grid = build_heightfield(&raster, d, 1.0).unwrap();
        let step = d.max(1) as usize;
        assert_eq!(grid.width, w.div_ceil(step));
        assert_eq!(grid.height, h.div_ceil(step));
        let n = grid.width * grid.height;
        assert_eq!(grid.x.len(), n);
        assert_eq!(grid.y.len(), n);
        assert_eq!(grid.z.len(), n);
    }
}

#[test]
fn test_z_range_reports_final_values() {
    let raster = RasterGrid::new(40, 30, create_hill_elevation(40, 30)).unwrap();
    let grid = build_heightfield(&raster, 1, 0.25).unwrap();
    let [lo, hi] = grid.z_range;
    assert_approx_eq!(lo, 0.0, 1e-6);
    assert_approx_eq!(hi, 0.25, 1e-6);
    assert!(grid.z.iter().all(|&z| z >= lo && z <= hi));
}

#[test]
fn test_negative_scale_flips_relief() {
    let raster = RasterGrid::new(10, 10, create_hill_elevation(10, 10)).unwrap();
    let grid = build_heightfield(&raster, 1, -2.0).unwrap();
    assert_approx_eq!(grid.z_range[0], -2.0, 1e-6);
    assert_approx_eq!(grid.z_range[1], 0.0, 1e-6);
}

#[test]
fn test_heightfield_from_png_dem() {
    let dir = FixtureDir::new().unwrap();
    let path = dir.join("dem.png");
    write_dem_png(&path, 32, 24, &create_hill_elevation(32, 24)).unwrap();

    let raster = read_raster(&path).unwrap();
    let grid = build_heightfield(&raster, 3, 1.0).unwrap();
    assert_eq!((grid.width, grid.height), (11, 8));
    assert_eq!(grid.x[12], 1.0);
    assert_eq!(grid.y[12], 1.0);
}
