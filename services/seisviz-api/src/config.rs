//! Service configuration: data file locations and request limits.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// DEM file names tried, in order, inside the data directory.
pub const DEM_CANDIDATES: &[&str] = &["dem.tif", "dem.tiff"];

/// SEG-Y file names tried, in order, inside the data directory.
pub const SEGY_CANDIDATES: &[&str] = &["seismic.sgy", "seismic.segy"];

/// Where the service finds its datasets.
///
/// Resolved once at startup and passed to every operation through the
/// application state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataConfig {
    pub data_dir: PathBuf,
    /// Resolved DEM path, `None` when no file was found.
    pub dem_path: Option<PathBuf>,
    /// Resolved SEG-Y path, `None` when no file was found.
    pub segy_path: Option<PathBuf>,
}

impl DataConfig {
    /// Resolve dataset paths.
    ///
    /// An explicit path wins (and is kept even if it does not exist yet, so
    /// requests report it as missing). Otherwise the first existing
    /// candidate under `data_dir` is used.
    pub fn resolve(
        data_dir: impl Into<PathBuf>,
        dem_override: Option<PathBuf>,
        segy_override: Option<PathBuf>,
    ) -> Self {
        let data_dir = data_dir.into();
        let dem_path = dem_override.or_else(|| pick_existing(&data_dir, DEM_CANDIDATES));
        let segy_path = segy_override.or_else(|| pick_existing(&data_dir, SEGY_CANDIDATES));
        Self {
            data_dir,
            dem_path,
            segy_path,
        }
    }
}

fn pick_existing(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    names.iter().map(|name| dir.join(name)).find(|p| p.exists())
}

/// Upper bounds on request sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum traces in one gather (density, wiggle, each volume slice).
    #[serde(default = "default_max_traces")]
    pub max_traces_per_gather: usize,

    /// Maximum slices in a volume stack.
    #[serde(default = "default_max_slices")]
    pub max_slices: usize,

    /// Maximum `maxPoints` for wiggle polylines.
    #[serde(default = "default_max_wiggle_points")]
    pub max_wiggle_points: usize,

    /// Maximum voxels in a volume stack.
    #[serde(default = "default_max_volume_voxels")]
    pub max_volume_voxels: usize,

    /// Maximum vertices in a heightfield grid.
    #[serde(default = "default_max_dem_points")]
    pub max_dem_points: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_traces_per_gather: default_max_traces(),
            max_slices: default_max_slices(),
            max_wiggle_points: default_max_wiggle_points(),
            max_volume_voxels: default_max_volume_voxels(),
            max_dem_points: default_max_dem_points(),
        }
    }
}

fn default_max_traces() -> usize {
    10_000
}

fn default_max_slices() -> usize {
    512
}

fn default_max_wiggle_points() -> usize {
    20_000
}

fn default_max_volume_voxels() -> usize {
    // 256 MiB of float32
    64 * 1024 * 1024
}

fn default_max_dem_points() -> usize {
    16 * 1024 * 1024
}

/// Contents of the optional YAML config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl FileConfig {
    /// Load from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse config: {:?}", path))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
