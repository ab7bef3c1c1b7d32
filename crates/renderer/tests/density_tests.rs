//! Tests for density rasterization and grayscale PNG output.

use renderer::density::{rasterize, DensityMode};
use seisviz_common::TraceGather;
use std::io::Read;
use test_utils::{create_constant_traces, create_indexed_traces, create_reflector_traces};

// ============================================================================
// Helper functions
// ============================================================================

fn gather(rows: Vec<Vec<f32>>) -> TraceGather {
    TraceGather::from_traces(rows).unwrap()
}

/// Inflate the single IDAT chunk of a PNG produced by the renderer.
fn idat_rows(png: &[u8], width: usize) -> Vec<Vec<u8>> {
    let mut pos = 8;
    let mut raw = Vec::new();
    while pos + 8 <= png.len() {
        let len = u32::from_be_bytes([png[pos], png[pos + 1], png[pos + 2], png[pos + 3]]) as usize;
        if &png[pos + 4..pos + 8] == b"IDAT" {
            flate2::read::ZlibDecoder::new(&png[pos + 8..pos + 8 + len])
                .read_to_end(&mut raw)
                .unwrap();
        }
        pos += 12 + len;
    }
    raw.chunks_exact(width + 1)
        .map(|row| {
            assert_eq!(row[0], 0, "scanlines are unfiltered");
            row[1..].to_vec()
        })
        .collect()
}

// ============================================================================
// Value mapping
// ============================================================================

#[test]
fn test_zero_gather_4x8_uniform_127() {
    let img = rasterize(&gather(create_constant_traces(4, 8, 0.0)), DensityMode::Symmetric).unwrap();
    assert_eq!(img.pixels.len(), 32);
    assert!(img.pixels.iter().all(|&p| p == 127));
}

#[test]
fn test_constant_gather_is_uniform() {
    for value in [-3.5f32, 0.25, 1000.0] {
        let img =
            rasterize(&gather(create_constant_traces(6, 5, value)), DensityMode::Symmetric).unwrap();
        let first = img.pixels[0];
        assert!(img.pixels.iter().all(|&p| p == first), "value {}", value);
    }
}

#[test]
fn test_polarity_preserved() {
    let img = rasterize(&gather(create_reflector_traces(16, 64, 0.004)), DensityMode::Symmetric)
        .unwrap();
    // Positive reflector on trace 0, negative on trace 8
    let bright = (0..64).map(|s| img.get(0, s).unwrap()).max().unwrap();
    let dark = (0..64).map(|s| img.get(8, s).unwrap()).min().unwrap();
    assert!(bright > 200);
    assert!(dark < 55);
}

#[test]
fn test_non_finite_samples_render_mid_gray() {
    let rows = vec![vec![f32::NAN, 1.0], vec![f32::NEG_INFINITY, -1.0]];
    let img = rasterize(&gather(rows), DensityMode::Symmetric).unwrap();
    assert_eq!(img.get(0, 0), Some(127));
    assert_eq!(img.get(1, 0), Some(127));
}

#[test]
fn test_percentile_mode_spans_full_range() {
    let img = rasterize(&gather(create_indexed_traces(10, 10)), DensityMode::Percentile).unwrap();
    assert_eq!(*img.pixels.iter().min().unwrap(), 0);
    assert_eq!(*img.pixels.iter().max().unwrap(), 255);
}

// ============================================================================
// PNG output
// ============================================================================

#[test]
fn test_png_is_traces_wide_samples_tall() {
    let img = rasterize(&gather(create_indexed_traces(3, 5)), DensityMode::Symmetric).unwrap();
    let png = img.to_png().unwrap();
    assert_eq!(&png[16..20], &3u32.to_be_bytes());
    assert_eq!(&png[20..24], &5u32.to_be_bytes());

    let rows = idat_rows(&png, 3);
    assert_eq!(rows.len(), 5);
    for (s, row) in rows.iter().enumerate() {
        for (t, &p) in row.iter().enumerate() {
            assert_eq!(Some(p), img.get(t, s));
        }
    }
}
