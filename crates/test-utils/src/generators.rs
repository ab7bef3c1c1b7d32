//! Test data generators for creating synthetic seismic and terrain data.
//!
//! These generators create predictable, verifiable test data patterns
//! that can be used across the test suite.

/// Creates a test gather with predictable values.
///
/// Each sample value is calculated as: `trace * 1000 + sample`
///
/// This makes it easy to verify trace order and sample order survive a
/// read or a transform, by checking gather[trace][sample].
///
/// # Example
///
/// ```
/// use test_utils::create_indexed_traces;
///
/// let traces = create_indexed_traces(3, 4);
/// assert_eq!(traces.len(), 3);
/// assert_eq!(traces[1][2], 1002.0);
/// ```
pub fn create_indexed_traces(traces: usize, samples: usize) -> Vec<Vec<f32>> {
    (0..traces)
        .map(|t| (0..samples).map(|s| (t * 1000 + s) as f32).collect())
        .collect()
}

/// Creates traces that all carry the same constant value.
pub fn create_constant_traces(traces: usize, samples: usize, value: f32) -> Vec<Vec<f32>> {
    vec![vec![value; samples]; traces]
}

/// Ricker wavelet with peak frequency `freq_hz`, centered at `t0` seconds.
pub fn ricker(t: f32, t0: f32, freq_hz: f32) -> f32 {
    let a = (std::f32::consts::PI * freq_hz * (t - t0)).powi(2);
    (1.0 - 2.0 * a) * (-a).exp()
}

/// Creates seismic-looking traces: a dipping Ricker reflector per trace.
///
/// The reflector arrives one sample later on each successive trace and
/// its amplitude alternates sign every 8 traces, so both polarity and
/// moveout are visible in a rendered section.
///
/// # Arguments
///
/// * `traces` - Number of traces
/// * `samples` - Samples per trace
/// * `dt_s` - Sample interval in seconds
pub fn create_reflector_traces(traces: usize, samples: usize, dt_s: f32) -> Vec<Vec<f32>> {
    (0..traces)
        .map(|t| {
            let t0 = (samples as f32 / 3.0 + t as f32) * dt_s;
            let polarity = if (t / 8) % 2 == 0 { 1.0 } else { -1.0 };
            (0..samples)
                .map(|s| polarity * 1000.0 * ricker(s as f32 * dt_s, t0, 25.0))
                .collect()
        })
        .collect()
}

/// Creates an elevation grid in meters: a smooth hill on a sloping plain.
///
/// Values are in row-major order and range from about 100 m to 600 m.
pub fn create_hill_elevation(width: usize, height: usize) -> Vec<f64> {
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;
    let sigma = (width.min(height) as f64 / 4.0).max(1.0);
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let dx = col as f64 - cx;
            let dy = row as f64 - cy;
            let hill = 400.0 * (-(dx * dx + dy * dy) / (2.0 * sigma * sigma)).exp();
            let slope = 100.0 * row as f64 / height.max(1) as f64;
            data.push(100.0 + slope + hill);
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_traces() {
        let traces = create_indexed_traces(2, 3);
        assert_eq!(traces, vec![vec![0.0, 1.0, 2.0], vec![1000.0, 1001.0, 1002.0]]);
    }

    #[test]
    fn test_ricker_peak() {
        assert_eq!(ricker(0.1, 0.1, 25.0), 1.0);
        assert!(ricker(0.2, 0.1, 25.0).abs() < 1e-3);
    }

    #[test]
    fn test_reflector_traces_have_both_polarities() {
        let traces = create_reflector_traces(16, 64, 0.004);
        let max = traces[0].iter().cloned().fold(f32::MIN, f32::max);
        let min = traces[8].iter().cloned().fold(f32::MAX, f32::min);
        assert!(max > 500.0);
        assert!(min < -500.0);
    }

    #[test]
    fn test_hill_elevation_range() {
        let dem = create_hill_elevation(32, 32);
        assert_eq!(dem.len(), 32 * 32);
        assert!(dem.iter().all(|&z| (100.0..=600.0).contains(&z)));
    }
}
