//! SEG-Y reader for post-stack seismic files.
//!
//! Reads traces by index without interpreting survey geometry: the file is
//! treated as a flat sequence of fixed-length traces. Supports rev 0 and
//! rev 1 files with IBM float, IEEE float and integer sample formats.

pub mod error;
pub mod header;
pub mod samples;

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use seisviz_common::{GatherRange, SourceInfo, TraceGather, TraceSource, VizResult};

pub use error::{SegyError, SegyResult};
pub use header::{BinaryHeader, TraceHeader};
pub use samples::SampleFormat;

use header::{BINARY_HEADER_LEN, TEXT_HEADER_LEN, TRACE_HEADER_LEN};

/// An open SEG-Y file.
///
/// Owns its file handle; create one per request rather than sharing.
pub struct SegyReader {
    file: File,
    text_header: String,
    binary_header: BinaryHeader,
    samples_per_trace: usize,
    sample_interval_us: u32,
    data_offset: u64,
    trace_count: usize,
}

impl SegyReader {
    /// Open a file and parse its headers.
    pub fn open(path: impl AsRef<Path>) -> SegyResult<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        let file_len = file.metadata()?.len();

        let head_len = TEXT_HEADER_LEN + BINARY_HEADER_LEN;
        let mut head = vec![0u8; head_len];
        file.read_exact(&mut head).map_err(|e| match e.kind() {
            std::io::ErrorKind::UnexpectedEof => SegyError::InvalidFormat(format!(
                "file is {} bytes, shorter than the {}-byte file headers",
                file_len, head_len
            )),
            _ => SegyError::IoError(e),
        })?;

        let text_header = header::decode_text_header(&head[..TEXT_HEADER_LEN]);
        let binary_header = header::parse_binary_header(&head[TEXT_HEADER_LEN..])?;
        let data_offset = (TEXT_HEADER_LEN
            + BINARY_HEADER_LEN
            + binary_header.extended_headers * TEXT_HEADER_LEN) as u64;

        // Fall back to the first trace header for fields the binary
        // header leaves at zero.
        let first_trace = if file_len >= data_offset + TRACE_HEADER_LEN as u64 {
            let mut buf = [0u8; TRACE_HEADER_LEN];
            file.seek(SeekFrom::Start(data_offset))?;
            file.read_exact(&mut buf)?;
            Some(header::parse_trace_header(&buf)?)
        } else {
            None
        };

        let samples_per_trace = match binary_header.samples_per_trace {
            0 => first_trace.map(|t| t.sample_count).unwrap_or(0),
            n => n,
        } as usize;

        let sample_interval_us = match binary_header.sample_interval_us {
            0 => first_trace.map(|t| t.sample_interval_us).unwrap_or(0),
            dt => dt,
        } as u32;

        let trace_len =
            (TRACE_HEADER_LEN + samples_per_trace * binary_header.format.sample_size()) as u64;
        let data_len = file_len.saturating_sub(data_offset);
        if data_len % trace_len != 0 {
            return Err(SegyError::InvalidFormat(format!(
                "{} bytes of trace data is not a multiple of the {}-byte trace length",
                data_len, trace_len
            )));
        }
        let trace_count = (data_len / trace_len) as usize;

        tracing::debug!(
            path = %path.display(),
            trace_count,
            samples_per_trace,
            sample_interval_us,
            format = binary_header.format.code(),
            "Opened SEG-Y file"
        );

        Ok(Self {
            file,
            text_header,
            binary_header,
            samples_per_trace,
            sample_interval_us,
            data_offset,
            trace_count,
        })
    }

    pub fn trace_count(&self) -> usize {
        self.trace_count
    }

    pub fn samples_per_trace(&self) -> usize {
        self.samples_per_trace
    }

    /// Sample interval in microseconds, 0 when neither header records it.
    pub fn sample_interval_us(&self) -> u32 {
        self.sample_interval_us
    }

    pub fn binary_header(&self) -> &BinaryHeader {
        &self.binary_header
    }

    /// The textual file header decoded to ASCII (3200 characters).
    pub fn text_header(&self) -> &str {
        &self.text_header
    }

    pub fn info(&self) -> SourceInfo {
        SourceInfo {
            trace_count: self.trace_count,
            sample_count: self.samples_per_trace,
            dt_microseconds: self.sample_interval_us,
        }
    }

    fn trace_len(&self) -> usize {
        TRACE_HEADER_LEN + self.samples_per_trace * self.binary_header.format.sample_size()
    }

    /// Read the samples of a single trace.
    pub fn read_trace(&mut self, index: usize) -> SegyResult<Vec<f32>> {
        if index >= self.trace_count {
            return Err(SegyError::TraceOutOfRange {
                index,
                count: self.trace_count,
            });
        }
        self.read_range(index, index + 1)
    }

    /// Read `count` adjacent traces from `start`, clamped to the file.
    ///
    /// Negative starts and counts running past the end are clamped; at
    /// least one trace is returned unless the file has none.
    pub fn read_gather(&mut self, start: i64, count: i64) -> VizResult<TraceGather> {
        let range = GatherRange::clamp(start, count, self.trace_count)?;
        if self.samples_per_trace == 0 {
            return Err(seisviz_common::VizError::EmptySource(
                "traces have no samples".to_string(),
            ));
        }
        let data = self.read_range(range.start, range.end)?;
        TraceGather::new(range.len(), self.samples_per_trace, data)
    }

    /// Read traces `[start, end)` as trace-major samples.
    fn read_range(&mut self, start: usize, end: usize) -> SegyResult<Vec<f32>> {
        let trace_len = self.trace_len();
        let ns = self.samples_per_trace;
        let format = self.binary_header.format;

        let mut raw = vec![0u8; (end - start) * trace_len];
        self.file
            .seek(SeekFrom::Start(self.data_offset + (start * trace_len) as u64))?;
        self.file.read_exact(&mut raw)?;

        let mut samples = vec![0.0f32; (end - start) * ns];
        for (trace_raw, out) in raw.chunks_exact(trace_len).zip(samples.chunks_exact_mut(ns.max(1))) {
            format.decode_into(&trace_raw[TRACE_HEADER_LEN..], out);
        }
        Ok(samples)
    }
}

/// A SEG-Y file on disk exposed as a [`TraceSource`].
///
/// Every call opens its own [`SegyReader`], so concurrent requests never
/// share a file handle.
#[derive(Debug, Clone)]
pub struct SegyFile {
    path: PathBuf,
}

impl SegyFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn open(&self) -> SegyResult<SegyReader> {
        SegyReader::open(&self.path)
    }
}

impl TraceSource for SegyFile {
    fn info(&self) -> VizResult<SourceInfo> {
        Ok(self.open()?.info())
    }

    fn trace_gather(&self, start: i64, count: i64) -> VizResult<TraceGather> {
        self.open()?.read_gather(start, count)
    }
}
