//! Variable-density rendering of trace gathers.
//!
//! A gather is mapped to one gray byte per sample. The image keeps the
//! gather's (traces, samples) shape; it is only turned on its side when
//! encoded, so that time runs down the picture.

use seisviz_common::{TraceGather, VizError, VizResult};
use serde::{Deserialize, Serialize};

use crate::normalize::{PercentileClip, SymmetricClip};
use crate::png::create_png_gray;

/// How amplitudes are mapped to gray levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DensityMode {
    /// Clip at the 98th percentile of |amplitude|; zero maps to mid gray.
    #[default]
    Symmetric,
    /// Clip to the 2nd..98th percentile window; the window maps to black..white.
    Percentile,
}

impl std::str::FromStr for DensityMode {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "symmetric" => Ok(DensityMode::Symmetric),
            "percentile" => Ok(DensityMode::Percentile),
            other => Err(VizError::invalid(
                "mode",
                format!("expected 'symmetric' or 'percentile', got '{}'", other),
            )),
        }
    }
}

/// An 8-bit image with the same (traces, samples) shape as its gather.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DensityImage {
    pub traces: usize,
    pub samples: usize,
    /// Trace-major gray levels
    pub pixels: Vec<u8>,
}

impl DensityImage {
    pub fn get(&self, trace: usize, sample: usize) -> Option<u8> {
        if trace >= self.traces || sample >= self.samples {
            return None;
        }
        Some(self.pixels[trace * self.samples + sample])
    }

    /// Pixels reordered sample-major: one row per sample, one column per trace.
    pub fn transposed_for_display(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.pixels.len()];
        for (t, trace) in self.pixels.chunks_exact(self.samples).enumerate() {
            for (s, &v) in trace.iter().enumerate() {
                out[s * self.traces + t] = v;
            }
        }
        out
    }

    /// Encode as a grayscale PNG, `traces` pixels wide and `samples` tall.
    pub fn to_png(&self) -> VizResult<Vec<u8>> {
        create_png_gray(&self.transposed_for_display(), self.traces, self.samples)
            .map_err(VizError::Processing)
    }
}

/// Render a gather as a density image.
pub fn rasterize(gather: &TraceGather, mode: DensityMode) -> VizResult<DensityImage> {
    let (traces, samples) = gather.shape();
    if traces == 0 || samples == 0 {
        return Err(VizError::shape("Gather", &[traces, samples]));
    }

    let mut values = gather.as_slice().to_vec();
    let pixels = match mode {
        DensityMode::Symmetric => {
            SymmetricClip::DENSITY.scale_to_unit(&mut values);
            // Truncating cast: 0.0 lands on 127
            values
                .iter()
                .map(|&x| ((x as f64 + 1.0) * 127.5) as u8)
                .collect()
        }
        DensityMode::Percentile => {
            PercentileClip::default().apply(&mut values);
            values.iter().map(|&x| (x as f64 * 255.0) as u8).collect()
        }
    };

    tracing::debug!(traces, samples, ?mode, "Rasterized density image");

    Ok(DensityImage {
        traces,
        samples,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_gather_is_mid_gray() {
        let gather = TraceGather::zeros(4, 8).unwrap();
        let img = rasterize(&gather, DensityMode::Symmetric).unwrap();
        assert_eq!((img.traces, img.samples), (4, 8));
        assert!(img.pixels.iter().all(|&p| p == 127));
    }

    #[test]
    fn test_extremes_map_to_black_and_white() {
        let mut data = vec![0.0f32; 100];
        data[0] = -1000.0;
        data[99] = 1000.0;
        let gather = TraceGather::new(10, 10, data).unwrap();
        let img = rasterize(&gather, DensityMode::Symmetric).unwrap();
        assert_eq!(img.get(0, 0), Some(0));
        assert_eq!(img.get(9, 9), Some(255));
        assert_eq!(img.get(5, 5), Some(127));
    }

    #[test]
    fn test_transpose_puts_samples_on_rows() {
        let img = DensityImage {
            traces: 2,
            samples: 3,
            pixels: vec![1, 2, 3, 4, 5, 6],
        };
        assert_eq!(img.transposed_for_display(), vec![1, 4, 2, 5, 3, 6]);
    }

    #[test]
    fn test_percentile_mode_constant_is_mid_gray() {
        let gather = TraceGather::new(2, 2, vec![3.0; 4]).unwrap();
        let img = rasterize(&gather, DensityMode::Percentile).unwrap();
        assert!(img.pixels.iter().all(|&p| p == 127));
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("symmetric".parse::<DensityMode>().unwrap(), DensityMode::Symmetric);
        assert_eq!("Percentile".parse::<DensityMode>().unwrap(), DensityMode::Percentile);
        assert!("gamma".parse::<DensityMode>().is_err());
    }
}
