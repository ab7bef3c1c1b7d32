//! Visual transforms for seismic trace gathers and elevation rasters.
//!
//! - [`density`]: gather to 8-bit grayscale image
//! - [`wiggle`]: gather to per-trace polylines
//! - [`volume`]: several gathers to a clipped float32 stack
//! - [`heightfield`]: raster to a flattened (x, y, z) grid
//!
//! All of them share the clipping primitives in [`normalize`]. Transforms
//! are pure functions of their inputs and keep no state between calls.

pub mod density;
pub mod heightfield;
pub mod normalize;
pub mod png;
pub mod volume;
pub mod wiggle;

pub use density::{rasterize, DensityImage, DensityMode};
pub use heightfield::{build_heightfield, HeightfieldGrid};
pub use volume::{assemble_volume, VolumeRequest, VolumeStack};
pub use wiggle::{build_wiggles, WiggleOptions, WiggleResult};
