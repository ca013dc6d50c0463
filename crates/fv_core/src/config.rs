//! # Value Configuration
//!
//! Sector granularity, sweep budget and update mode for a computation run.
//!
//! ## Usage
//! ```rust
//! use fv_core::config::ValueConfig;
//!
//! let config = ValueConfig::default();
//! assert!(config.validate().is_ok());
//! let coarse = ValueConfig::coarse();
//! assert_eq!(coarse.cell_width, 10.0);
//! ```

use std::path::Path;
use std::{env, fs};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CoreError, Result};
use crate::field::DEFAULT_CELL_WIDTH;
use crate::relax::{UpdateMode, DEFAULT_ITERATIONS};

/// Names a JSON or YAML file that overrides the default configuration.
pub const CONFIG_PATH_ENV: &str = "FV_CONFIG_PATH";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueConfig {
    /// Sector side length in field units (default: 5.0)
    pub cell_width: f64,
    /// Number of relaxation sweeps (default: 10)
    pub iteration_count: u32,
    /// Relaxation update order (default: in-place)
    pub update_mode: UpdateMode,
}

impl Default for ValueConfig {
    fn default() -> Self {
        Self {
            cell_width: DEFAULT_CELL_WIDTH,
            iteration_count: DEFAULT_ITERATIONS,
            update_mode: UpdateMode::GaussSeidel,
        }
    }
}

impl ValueConfig {
    /// 10-unit sectors for sparse data (a single game).
    pub fn coarse() -> Self {
        Self { cell_width: 10.0, ..Self::default() }
    }

    /// 2.5-unit sectors with a longer sweep budget for season-sized data.
    pub fn fine() -> Self {
        Self { cell_width: 2.5, iteration_count: 25, ..Self::default() }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.cell_width.is_finite() || self.cell_width <= 0.0 {
            return Err(CoreError::InvalidCellWidth(self.cell_width));
        }
        if self.iteration_count == 0 {
            return Err(CoreError::InvalidIterationCount(self.iteration_count));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.yaml`/`.yml` file as YAML, anything else as JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Configuration from `FV_CONFIG_PATH` when set and non-empty, else `default`.
    pub fn from_env_or(default: Self) -> Result<Self> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(default);
        };
        let path = path.trim();
        if path.is_empty() {
            return Ok(default);
        }
        let config = Self::from_file(Path::new(path))?;
        info!(path, ?config, "loaded value config from {CONFIG_PATH_ENV}");
        Ok(config)
    }
}
