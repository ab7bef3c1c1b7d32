//! On-disk fixtures for seisviz tests.
//!
//! Tests never depend on real survey files: SEG-Y and DEM files are
//! written on the fly into temporary directories.

use std::io;
use std::path::{Path, PathBuf};

/// Sample encodings the fixture writer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureFormat {
    /// Format code 1
    Ibm,
    /// Format code 3
    Int16,
    /// Format code 5
    Ieee,
}

impl FixtureFormat {
    fn code(self) -> i16 {
        match self {
            FixtureFormat::Ibm => 1,
            FixtureFormat::Int16 => 3,
            FixtureFormat::Ieee => 5,
        }
    }

    fn encode(self, value: f32, out: &mut Vec<u8>) {
        match self {
            FixtureFormat::Ibm => out.extend_from_slice(&f32_to_ibm(value).to_be_bytes()),
            FixtureFormat::Int16 => out.extend_from_slice(&(value as i16).to_be_bytes()),
            FixtureFormat::Ieee => out.extend_from_slice(&value.to_be_bytes()),
        }
    }
}

/// Builder for small SEG-Y files.
///
/// # Example
///
/// ```
/// use test_utils::{create_indexed_traces, SegyBuilder};
///
/// let bytes = SegyBuilder::new(create_indexed_traces(2, 4)).to_bytes();
/// assert_eq!(bytes.len(), 3600 + 2 * (240 + 4 * 4));
/// ```
#[derive(Debug, Clone)]
pub struct SegyBuilder {
    traces: Vec<Vec<f32>>,
    sample_interval_us: u16,
    format: FixtureFormat,
    interval_in_binary_header: bool,
    ebcdic: bool,
}

impl SegyBuilder {
    /// All traces must have the same length.
    pub fn new(traces: Vec<Vec<f32>>) -> Self {
        Self {
            traces,
            sample_interval_us: 4000,
            format: FixtureFormat::Ieee,
            interval_in_binary_header: true,
            ebcdic: false,
        }
    }

    pub fn sample_interval_us(mut self, us: u16) -> Self {
        self.sample_interval_us = us;
        self
    }

    pub fn format(mut self, format: FixtureFormat) -> Self {
        self.format = format;
        self
    }

    /// Leave the binary header interval at zero so readers must use the
    /// trace headers.
    pub fn interval_in_trace_headers_only(mut self) -> Self {
        self.interval_in_binary_header = false;
        self
    }

    /// Write the textual header in EBCDIC.
    pub fn ebcdic(mut self) -> Self {
        self.ebcdic = true;
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let samples = self.traces.first().map(|t| t.len()).unwrap_or(0);
        let mut out = Vec::new();

        // Textual header: "C 1 SEISVIZ TEST" then spaces
        let mut text = vec![b' '; 3200];
        text[..16].copy_from_slice(b"C 1 SEISVIZ TEST");
        if self.ebcdic {
            text = text.into_iter().map(ascii_to_ebcdic).collect();
        }
        out.extend_from_slice(&text);

        // Binary header
        let mut binary = vec![0u8; 400];
        if self.interval_in_binary_header {
            binary[16..18].copy_from_slice(&self.sample_interval_us.to_be_bytes());
        }
        binary[20..22].copy_from_slice(&(samples as u16).to_be_bytes());
        binary[24..26].copy_from_slice(&self.format.code().to_be_bytes());
        binary[300..302].copy_from_slice(&0x0100u16.to_be_bytes());
        out.extend_from_slice(&binary);

        for (i, trace) in self.traces.iter().enumerate() {
            let mut header = vec![0u8; 240];
            header[0..4].copy_from_slice(&(i as u32 + 1).to_be_bytes());
            header[114..116].copy_from_slice(&(trace.len() as u16).to_be_bytes());
            header[116..118].copy_from_slice(&self.sample_interval_us.to_be_bytes());
            out.extend_from_slice(&header);
            for &value in trace {
                self.format.encode(value, &mut out);
            }
        }
        out
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> io::Result<()> {
        std::fs::write(path, self.to_bytes())
    }
}

/// Encode an f32 as IBM System/360 single precision.
pub fn f32_to_ibm(value: f32) -> u32 {
    if value == 0.0 || !value.is_finite() {
        return 0;
    }
    let sign = if value < 0.0 { 0x8000_0000 } else { 0 };
    let mut fraction = value.abs() as f64;
    let mut exponent = 64i32;
    while fraction >= 1.0 {
        fraction /= 16.0;
        exponent += 1;
    }
    while fraction < 0.0625 {
        fraction *= 16.0;
        exponent -= 1;
    }
    let mantissa = ((fraction * 16_777_216.0).round() as u32).min(0x00ff_ffff);
    sign | ((exponent as u32 & 0x7f) << 24) | mantissa
}

fn ascii_to_ebcdic(b: u8) -> u8 {
    match b {
        b'a'..=b'i' => 0x81 + (b - b'a'),
        b'j'..=b'r' => 0x91 + (b - b'j'),
        b's'..=b'z' => 0xA2 + (b - b's'),
        b'A'..=b'I' => 0xC1 + (b - b'A'),
        b'J'..=b'R' => 0xD1 + (b - b'J'),
        b'S'..=b'Z' => 0xE2 + (b - b'S'),
        b'0'..=b'9' => 0xF0 + (b - b'0'),
        _ => 0x40,
    }
}

/// Write a 16-bit grayscale PNG elevation model.
///
/// Values are rounded and clamped to the u16 range.
pub fn write_dem_png(
    path: impl AsRef<Path>,
    width: usize,
    height: usize,
    elevation: &[f64],
) -> image::ImageResult<()> {
    let pixels: Vec<u16> = elevation
        .iter()
        .map(|&z| z.round().clamp(0.0, u16::MAX as f64) as u16)
        .collect();
    let img = image::ImageBuffer::<image::Luma<u16>, Vec<u16>>::from_raw(
        width as u32,
        height as u32,
        pixels,
    )
    .ok_or_else(|| {
        image::ImageError::Parameter(image::error::ParameterError::from_kind(
            image::error::ParameterErrorKind::DimensionMismatch,
        ))
    })?;
    img.save(path)
}

/// Write an 8-bit RGB PNG where only the red channel carries elevation.
pub fn write_rgb_dem_png(
    path: impl AsRef<Path>,
    width: usize,
    height: usize,
    red: &[u8],
) -> image::ImageResult<()> {
    let mut img = image::RgbImage::new(width as u32, height as u32);
    for (i, px) in img.pixels_mut().enumerate() {
        *px = image::Rgb([red[i], 255 - red[i], 7]);
    }
    img.save(path)
}

/// Write a single-band float32 TIFF elevation model.
pub fn write_dem_tiff_f32(
    path: impl AsRef<Path>,
    width: usize,
    height: usize,
    elevation: &[f32],
) -> tiff::TiffResult<()> {
    let file = std::fs::File::create(path)?;
    let mut encoder = tiff::encoder::TiffEncoder::new(file)?;
    encoder.write_image::<tiff::encoder::colortype::Gray32Float>(
        width as u32,
        height as u32,
        elevation,
    )
}

/// Write a single-band signed 16-bit TIFF elevation model.
pub fn write_dem_tiff_i16(
    path: impl AsRef<Path>,
    width: usize,
    height: usize,
    elevation: &[i16],
) -> tiff::TiffResult<()> {
    let file = std::fs::File::create(path)?;
    let mut encoder = tiff::encoder::TiffEncoder::new(file)?;
    encoder.write_image::<tiff::encoder::colortype::GrayI16>(
        width as u32,
        height as u32,
        elevation,
    )
}

/// A temporary directory holding fixture files; removed on drop.
pub struct FixtureDir {
    dir: tempfile::TempDir,
}

impl FixtureDir {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a SEG-Y file and return its path.
    pub fn segy(&self, name: &str, builder: &SegyBuilder) -> io::Result<PathBuf> {
        let path = self.join(name);
        builder.write_to(&path)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_to_ibm_known_values() {
        assert_eq!(f32_to_ibm(1.0), 0x4110_0000);
        assert_eq!(f32_to_ibm(-118.625), 0xC276_A000);
        assert_eq!(f32_to_ibm(0.5), 0x4080_0000);
        assert_eq!(f32_to_ibm(0.0), 0);
    }

    #[test]
    fn test_segy_layout() {
        let bytes = SegyBuilder::new(vec![vec![1.0; 10]; 3])
            .format(FixtureFormat::Int16)
            .to_bytes();
        assert_eq!(bytes.len(), 3600 + 3 * (240 + 10 * 2));
        assert_eq!(&bytes[3224..3226], &3i16.to_be_bytes());
    }

    #[test]
    fn test_ebcdic_text_header() {
        let bytes = SegyBuilder::new(vec![vec![0.0; 1]]).ebcdic().to_bytes();
        assert_eq!(bytes[0], 0xC3);
        assert_eq!(bytes[1], 0x40);
    }
}
