//! Trace sample decoding.

use crate::{SegyError, SegyResult};

/// Data sample format (binary header bytes 3225-3226).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    /// Code 1: 4-byte IBM hexadecimal floating point
    IbmFloat32,
    /// Code 2: 4-byte two's complement integer
    Int32,
    /// Code 3: 2-byte two's complement integer
    Int16,
    /// Code 5: 4-byte IEEE floating point
    IeeeFloat32,
    /// Code 8: 1-byte two's complement integer
    Int8,
}

impl SampleFormat {
    pub fn from_code(code: i16) -> SegyResult<Self> {
        match code {
            1 => Ok(SampleFormat::IbmFloat32),
            2 => Ok(SampleFormat::Int32),
            3 => Ok(SampleFormat::Int16),
            5 => Ok(SampleFormat::IeeeFloat32),
            8 => Ok(SampleFormat::Int8),
            other => Err(SegyError::UnsupportedFormat(other)),
        }
    }

    pub fn code(&self) -> i16 {
        match self {
            SampleFormat::IbmFloat32 => 1,
            SampleFormat::Int32 => 2,
            SampleFormat::Int16 => 3,
            SampleFormat::IeeeFloat32 => 5,
            SampleFormat::Int8 => 8,
        }
    }

    /// Bytes per sample.
    pub fn sample_size(&self) -> usize {
        match self {
            SampleFormat::IbmFloat32 | SampleFormat::Int32 | SampleFormat::IeeeFloat32 => 4,
            SampleFormat::Int16 => 2,
            SampleFormat::Int8 => 1,
        }
    }

    /// Decode big-endian samples into `out`.
    ///
    /// `raw` must hold exactly `out.len() * sample_size()` bytes.
    pub fn decode_into(&self, raw: &[u8], out: &mut [f32]) {
        let size = self.sample_size();
        debug_assert_eq!(raw.len(), out.len() * size);
        for (value, bytes) in out.iter_mut().zip(raw.chunks_exact(size)) {
            *value = match self {
                SampleFormat::IbmFloat32 => {
                    ibm_to_f32(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
                }
                SampleFormat::Int32 => {
                    i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f32
                }
                SampleFormat::Int16 => i16::from_be_bytes([bytes[0], bytes[1]]) as f32,
                SampleFormat::IeeeFloat32 => {
                    f32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
                }
                SampleFormat::Int8 => bytes[0] as i8 as f32,
            };
        }
    }
}

/// Convert an IBM System/360 single precision float to IEEE f32.
///
/// Layout: 1 sign bit, 7-bit base-16 exponent biased by 64, 24-bit
/// fraction. Values outside the f32 range saturate to infinity, which the
/// normalizers later clean.
#[inline]
pub fn ibm_to_f32(bits: u32) -> f32 {
    let fraction = bits & 0x00ff_ffff;
    if fraction == 0 {
        return 0.0;
    }
    let sign = if bits & 0x8000_0000 != 0 { -1.0 } else { 1.0 };
    let exponent = ((bits >> 24) & 0x7f) as i32 - 64;
    let mantissa = fraction as f64 / 16_777_216.0;
    (sign * mantissa * 16f64.powi(exponent)) as f32
}
