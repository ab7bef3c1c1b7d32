//! Tests for volume stack assembly against in-memory and SEG-Y sources.

use renderer::volume::{assemble_volume, VolumeRequest};
use segy_parser::SegyFile;
use seisviz_common::{InMemoryTraceSource, TraceGather};
use test_utils::{create_indexed_traces, create_reflector_traces, FixtureDir, SegyBuilder};

fn source(rows: Vec<Vec<f32>>, dt_us: u32) -> InMemoryTraceSource {
    InMemoryTraceSource::new(TraceGather::from_traces(rows).unwrap(), dt_us)
}

// ============================================================================
// Shape and layout
// ============================================================================

#[test]
fn test_shape_is_slices_samples_count() {
    let src = source(create_reflector_traces(300, 101, 0.004), 4000);
    let request = VolumeRequest {
        start: 0,
        count: 16,
        slices: 4,
        stride: 20,
        sample_decim: 4,
    };
    let stack = assemble_volume(&src, &request).unwrap();
    assert_eq!(stack.shape(), (4, 26, 16));
    assert_eq!(stack.spacing, [1.0, 16.0, 1.0]);
}

#[test]
fn test_slice_k_starts_at_stride_offset() {
    // Values are trace * 1000 + sample; keep them below the clip
    let src = source(create_indexed_traces(10, 3), 1000);
    let request = VolumeRequest {
        start: 1,
        count: 2,
        slices: 3,
        stride: 2,
        sample_decim: 1,
    };
    let stack = assemble_volume(&src, &request).unwrap();
    assert_eq!(stack.shape(), (3, 3, 2));
    // Slice 1 begins at trace 3; voxel (z=1, y=0, x=0) is its sample 0
    // unless it was clipped.
    let v = stack.get(1, 0, 0).unwrap();
    assert!(v == 3000.0 || v == stack.clip as f32);
    assert_eq!(stack.get(0, 2, 1), Some(2002.0));
}

#[test]
fn test_tail_slices_clamp_inside_file() {
    let src = source(create_indexed_traces(5, 2), 1000);
    let request = VolumeRequest {
        start: 0,
        count: 3,
        slices: 4,
        stride: 10,
        sample_decim: 1,
    };
    let stack = assemble_volume(&src, &request).unwrap();
    // Slices past the end clamp to the last trace and are zero-padded
    assert_eq!(stack.shape(), (4, 2, 3));
    assert_eq!(stack.get(3, 0, 1), Some(0.0));
}

// ============================================================================
// Clipping
// ============================================================================

#[test]
fn test_outlier_clipped() {
    let mut rows = create_reflector_traces(64, 64, 0.004);
    rows[10][20] = 1.0e9;
    rows[11][20] = f32::NAN;
    let src = source(rows, 4000);
    let request = VolumeRequest {
        start: 0,
        count: 64,
        slices: 1,
        stride: 1,
        sample_decim: 1,
    };
    let stack = assemble_volume(&src, &request).unwrap();
    let bound = stack.clip as f32;
    assert!(bound < 2000.0);
    assert!(stack.data.iter().all(|v| v.is_finite() && v.abs() <= bound));
    assert!(stack.range.0 <= stack.range.1);
}

// ============================================================================
// SEG-Y backed
// ============================================================================

#[test]
fn test_volume_from_segy_file() {
    let dir = FixtureDir::new().unwrap();
    let path = dir
        .segy(
            "seismic.sgy",
            &SegyBuilder::new(create_reflector_traces(40, 50, 0.002)).sample_interval_us(2000),
        )
        .unwrap();

    let stack = assemble_volume(&SegyFile::new(path), &VolumeRequest::default()).unwrap();
    assert_eq!(stack.shape(), (32, 25, 40));
    assert_eq!(stack.spacing, [1.0, 4.0, 1.0]);
    assert_eq!(stack.to_le_bytes().len(), 32 * 25 * 40 * 4);
}
