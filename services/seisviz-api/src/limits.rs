//! Request size checks against [`LimitsConfig`].

use renderer::VolumeRequest;
use seisviz_common::{SourceInfo, VizError};
use thiserror::Error;

use crate::config::LimitsConfig;

/// Limit exceeded error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimitExceeded {
    #[error("Too many traces: {requested} requested, limit is {limit}")]
    TooManyTraces { requested: usize, limit: usize },

    #[error("Too many slices: {requested} requested, limit is {limit}")]
    TooManySlices { requested: usize, limit: usize },

    #[error("Too many wiggle points: {requested} requested, limit is {limit}")]
    TooManyWigglePoints { requested: usize, limit: usize },

    #[error("Volume too large: {voxels} voxels, limit is {limit}")]
    VolumeTooLarge { voxels: usize, limit: usize },

    #[error("Heightfield too large: {points} points, limit is {limit}")]
    HeightfieldTooLarge { points: usize, limit: usize },
}

impl From<LimitExceeded> for VizError {
    fn from(err: LimitExceeded) -> Self {
        VizError::LimitExceeded(err.to_string())
    }
}

/// Validate a trace count. Counts must be at least 1.
pub fn check_trace_count(count: i64, limits: &LimitsConfig) -> Result<(), VizError> {
    if count < 1 {
        return Err(VizError::invalid("count", "must be at least 1"));
    }
    if count as u64 > limits.max_traces_per_gather as u64 {
        return Err(LimitExceeded::TooManyTraces {
            requested: count as usize,
            limit: limits.max_traces_per_gather,
        }
        .into());
    }
    Ok(())
}

/// Validate the `maxPoints` of a wiggle request.
pub fn check_wiggle_points(max_points: i64, limits: &LimitsConfig) -> Result<usize, VizError> {
    if max_points < 1 {
        return Err(VizError::invalid("maxPoints", "must be at least 1"));
    }
    let requested = max_points as usize;
    if requested > limits.max_wiggle_points {
        return Err(LimitExceeded::TooManyWigglePoints {
            requested,
            limit: limits.max_wiggle_points,
        }
        .into());
    }
    Ok(requested)
}

/// Validate a volume request against the source it will read.
///
/// The voxel estimate uses the clamped first-slice trace count, which is
/// what the assembled stack will have.
pub fn check_volume(
    request: &VolumeRequest,
    info: &SourceInfo,
    limits: &LimitsConfig,
) -> Result<(), VizError> {
    check_trace_count(request.count, limits)?;

    let slices = request.slice_count();
    if slices > limits.max_slices {
        return Err(LimitExceeded::TooManySlices {
            requested: slices,
            limit: limits.max_slices,
        }
        .into());
    }

    let traces = (request.count as usize).min(info.trace_count);
    let samples = info.sample_count.div_ceil(request.sample_step());
    let voxels = slices.saturating_mul(traces).saturating_mul(samples);
    if voxels > limits.max_volume_voxels {
        return Err(LimitExceeded::VolumeTooLarge {
            voxels,
            limit: limits.max_volume_voxels,
        }
        .into());
    }
    Ok(())
}

/// Validate the size of a decimated heightfield.
pub fn check_dem_points(width: usize, height: usize, limits: &LimitsConfig) -> Result<(), VizError> {
    let points = width.saturating_mul(height);
    if points > limits.max_dem_points {
        return Err(LimitExceeded::HeightfieldTooLarge {
            points,
            limit: limits.max_dem_points,
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(traces: usize, samples: usize) -> SourceInfo {
        SourceInfo {
            trace_count: traces,
            sample_count: samples,
            dt_microseconds: 4000,
        }
    }

    #[test]
    fn test_trace_count() {
        let limits = LimitsConfig::default();
        assert!(check_trace_count(200, &limits).is_ok());
        assert!(matches!(
            check_trace_count(0, &limits),
            Err(VizError::InvalidParameter { .. })
        ));
        let err = check_trace_count(10_001, &limits).unwrap_err();
        assert_eq!(err.http_status_code(), 413);
        assert!(err.to_string().contains("limit is 10000"));
    }

    #[test]
    fn test_wiggle_points() {
        let limits = LimitsConfig::default();
        assert_eq!(check_wiggle_points(600, &limits).unwrap(), 600);
        assert_eq!(check_wiggle_points(0, &limits).unwrap_err().http_status_code(), 400);
        assert_eq!(
            check_wiggle_points(20_001, &limits).unwrap_err().http_status_code(),
            413
        );
    }

    #[test]
    fn test_volume_estimate_uses_clamped_traces() {
        let limits = LimitsConfig {
            max_volume_voxels: 1000,
            ..Default::default()
        };
        let request = VolumeRequest {
            start: 0,
            count: 5000,
            slices: 10,
            stride: 1,
            sample_decim: 2,
        };
        // 10 slices * 10 traces * ceil(19 / 2) samples = 1000
        assert!(check_volume(&request, &info(10, 19), &limits).is_ok());
        assert!(matches!(
            check_volume(&request, &info(11, 19), &limits),
            Err(VizError::LimitExceeded(_))
        ));
    }

    #[test]
    fn test_volume_slice_limit() {
        let request = VolumeRequest {
            slices: 513,
            ..Default::default()
        };
        let err = check_volume(&request, &info(10, 10), &LimitsConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Too many slices"));
    }

    #[test]
    fn test_dem_points() {
        let limits = LimitsConfig {
            max_dem_points: 100,
            ..Default::default()
        };
        assert!(check_dem_points(10, 10, &limits).is_ok());
        assert!(check_dem_points(10, 11, &limits).is_err());
    }
}
