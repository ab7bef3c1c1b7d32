//! Common types shared by the seismic/terrain visualization crates.

pub mod error;
pub mod gather;
pub mod raster;
pub mod source;

pub use error::{VizError, VizResult};
pub use gather::{GatherRange, TraceGather};
pub use raster::RasterGrid;
pub use source::{InMemoryTraceSource, RasterSource, SourceInfo, TraceSource};
