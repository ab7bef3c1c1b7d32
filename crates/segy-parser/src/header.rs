//! SEG-Y file and trace header parsing.
//!
//! A SEG-Y file starts with a 3200-byte textual header followed by a
//! 400-byte binary header, optional 3200-byte extended textual headers,
//! and then the traces. Each trace is a 240-byte header plus samples.
//! All binary fields are big-endian.

use crate::samples::SampleFormat;
use crate::{SegyError, SegyResult};

/// Size of the textual file header in bytes.
pub const TEXT_HEADER_LEN: usize = 3200;
/// Size of the binary file header in bytes.
pub const BINARY_HEADER_LEN: usize = 400;
/// Size of each trace header in bytes.
pub const TRACE_HEADER_LEN: usize = 240;

// Offsets within the binary header (file offset minus 3200)
const BIN_SAMPLE_INTERVAL: usize = 16;
const BIN_SAMPLES_PER_TRACE: usize = 20;
const BIN_FORMAT_CODE: usize = 24;
const BIN_REVISION: usize = 300;
const BIN_EXTENDED_HEADERS: usize = 304;

// Offsets within a trace header
const TRACE_SAMPLE_COUNT: usize = 114;
const TRACE_SAMPLE_INTERVAL: usize = 116;

/// Fields of the binary file header this reader uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryHeader {
    /// Sample interval in microseconds (0 if not recorded)
    pub sample_interval_us: u16,
    /// Samples per data trace (0 if not recorded)
    pub samples_per_trace: u16,
    /// Data sample format
    pub format: SampleFormat,
    /// SEG-Y format revision number (0x0100 for rev 1)
    pub revision: u16,
    /// Number of 3200-byte extended textual headers
    pub extended_headers: usize,
}

/// Fields of a trace header this reader uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceHeader {
    pub sample_count: u16,
    pub sample_interval_us: u16,
}

fn be_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([data[offset], data[offset + 1]])
}

fn be_i16(data: &[u8], offset: usize) -> i16 {
    i16::from_be_bytes([data[offset], data[offset + 1]])
}

/// Parse the 400-byte binary file header.
pub fn parse_binary_header(data: &[u8]) -> SegyResult<BinaryHeader> {
    if data.len() < BINARY_HEADER_LEN {
        return Err(SegyError::InvalidFormat(format!(
            "binary header needs {} bytes, got {}",
            BINARY_HEADER_LEN,
            data.len()
        )));
    }

    let format = SampleFormat::from_code(be_i16(data, BIN_FORMAT_CODE))?;

    // -1 announces a variable number of extended headers closed by an
    // end stanza, which this reader does not scan for.
    let extended = be_i16(data, BIN_EXTENDED_HEADERS);
    if extended < 0 {
        return Err(SegyError::InvalidFormat(
            "variable number of extended textual headers is not supported".to_string(),
        ));
    }

    Ok(BinaryHeader {
        sample_interval_us: be_u16(data, BIN_SAMPLE_INTERVAL),
        samples_per_trace: be_u16(data, BIN_SAMPLES_PER_TRACE),
        format,
        revision: be_u16(data, BIN_REVISION),
        extended_headers: extended as usize,
    })
}

/// Parse the fields used from a 240-byte trace header.
pub fn parse_trace_header(data: &[u8]) -> SegyResult<TraceHeader> {
    if data.len() < TRACE_HEADER_LEN {
        return Err(SegyError::InvalidFormat(format!(
            "trace header needs {} bytes, got {}",
            TRACE_HEADER_LEN,
            data.len()
        )));
    }
    Ok(TraceHeader {
        sample_count: be_u16(data, TRACE_SAMPLE_COUNT),
        sample_interval_us: be_u16(data, TRACE_SAMPLE_INTERVAL),
    })
}

/// Decode the textual header to ASCII.
///
/// Rev 0 files use EBCDIC, rev 1 files may use ASCII. A header starting
/// with EBCDIC 'C' (0xC3) is treated as EBCDIC.
pub fn decode_text_header(data: &[u8]) -> String {
    let ebcdic = data.first() == Some(&0xC3);
    data.iter()
        .map(|&b| if ebcdic { ebcdic_to_ascii(b) } else { ascii_printable(b) })
        .collect()
}

fn ascii_printable(b: u8) -> char {
    if b.is_ascii_graphic() || b == b' ' {
        b as char
    } else {
        ' '
    }
}

fn ebcdic_to_ascii(b: u8) -> char {
    match b {
        0x81..=0x89 => (b'a' + (b - 0x81)) as char,
        0x91..=0x99 => (b'j' + (b - 0x91)) as char,
        0xA2..=0xA9 => (b's' + (b - 0xA2)) as char,
        0xC1..=0xC9 => (b'A' + (b - 0xC1)) as char,
        0xD1..=0xD9 => (b'J' + (b - 0xD1)) as char,
        0xE2..=0xE9 => (b'S' + (b - 0xE2)) as char,
        0xF0..=0xF9 => (b'0' + (b - 0xF0)) as char,
        0x4B => '.',
        0x4C => '<',
        0x4D => '(',
        0x4E => '+',
        0x4F => '|',
        0x50 => '&',
        0x5A => '!',
        0x5B => '$',
        0x5C => '*',
        0x5D => ')',
        0x5E => ';',
        0x60 => '-',
        0x61 => '/',
        0x6B => ',',
        0x6C => '%',
        0x6D => '_',
        0x6E => '>',
        0x6F => '?',
        0x7A => ':',
        0x7B => '#',
        0x7C => '@',
        0x7D => '\'',
        0x7E => '=',
        0x7F => '"',
        _ => ' ',
    }
}
