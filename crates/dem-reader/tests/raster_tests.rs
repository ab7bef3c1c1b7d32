//! Integration tests for reading DEM rasters from image files.

use dem_reader::{read_raster, DemError, DemFile};
use seisviz_common::{RasterSource, VizError};
use test_utils::{
    create_hill_elevation, write_dem_png, write_dem_tiff_f32, write_dem_tiff_i16,
    write_rgb_dem_png, FixtureDir,
};

#[test]
fn test_luma16_png_preserves_elevation() {
    let dir = FixtureDir::new().unwrap();
    let path = dir.join("dem.png");
    let elevation = create_hill_elevation(16, 12);
    write_dem_png(&path, 16, 12, &elevation).unwrap();

    let grid = read_raster(&path).unwrap();
    assert_eq!((grid.width, grid.height), (16, 12));
    for (got, want) in grid.values.iter().zip(&elevation) {
        assert_eq!(*got, want.round());
    }
}

#[test]
fn test_rgb_png_keeps_first_channel() {
    let dir = FixtureDir::new().unwrap();
    let path = dir.join("dem.png");
    write_rgb_dem_png(&path, 3, 2, &[0, 10, 20, 30, 40, 50]).unwrap();

    let grid = DemFile::new(&path).raster_grid().unwrap();
    assert_eq!(grid.values, vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0]);
    assert_eq!(grid.get(1, 2), Some(50.0));
}

#[test]
fn test_tiff_dem() {
    let dir = FixtureDir::new().unwrap();
    let path = dir.join("dem.tif");
    write_dem_png(&path, 4, 4, &[100.0; 16]).unwrap();

    let grid = read_raster(&path).unwrap();
    assert!(grid.values.iter().all(|&v| v == 100.0));
}

#[test]
fn test_float32_tiff_dem() {
    let dir = FixtureDir::new().unwrap();
    let path = dir.join("dem.tif");
    write_dem_tiff_f32(&path, 2, 2, &[-12.5, 0.0, 1500.25, 8848.0]).unwrap();

    let grid = read_raster(&path).unwrap();
    assert_eq!((grid.width, grid.height), (2, 2));
    assert_eq!(grid.values, vec![-12.5, 0.0, 1500.25, 8848.0]);
}

#[test]
fn test_signed_int16_tiff_dem() {
    let dir = FixtureDir::new().unwrap();
    let path = dir.join("dem.tiff");
    write_dem_tiff_i16(&path, 3, 2, &[-400, -1, 0, 1, 250, 3000]).unwrap();

    let grid = DemFile::new(&path).raster_grid().unwrap();
    assert_eq!((grid.width, grid.height), (3, 2));
    assert_eq!(grid.values, vec![-400.0, -1.0, 0.0, 1.0, 250.0, 3000.0]);
    assert_eq!(grid.get(1, 0), Some(1.0));
}

#[test]
fn test_garbage_file_is_decode_error() {
    let dir = FixtureDir::new().unwrap();
    let path = dir.join("dem.png");
    std::fs::write(&path, b"not an image").unwrap();

    assert!(matches!(read_raster(&path), Err(DemError::Decode(_))));
    let err = DemFile::new(&path).raster_grid().unwrap_err();
    assert!(matches!(err, VizError::DataReadError(_)));
    assert_eq!(err.http_status_code(), 500);
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = FixtureDir::new().unwrap();
    let err = DemFile::new(dir.join("nope.tif")).raster_grid().unwrap_err();
    assert_eq!(err.http_status_code(), 404);
}
