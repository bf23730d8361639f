//! Configuration file support for the `meshquant` binary.
//!
//! A config file is plain JSON; every field is optional and falls back to its
//! default. Command-line flags are applied on top by each subcommand.
//!
//! ```json
//! {
//!   "pipeline": { "levels": 2048, "selector": { "ratio_threshold": 3.0 } },
//!   "report": { "title": "Scan quantization", "author": "Lab 3" },
//!   "output_dir": "outputs"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use meshquant_quantization::PipelineConfig;
use serde::{Deserialize, Serialize};

/// Metadata printed at the top of the summary document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportMetadata {
    pub title: String,
    pub author: Option<String>,
}

impl Default for ReportMetadata {
    fn default() -> Self {
        Self {
            title: "Adaptive 3D Mesh Quantization".to_string(),
            author: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pipeline: PipelineConfig,
    pub report: ReportMetadata,
    /// Where reconstructed meshes and the summary go
    pub output_dir: PathBuf,
    /// Where plot data goes
    pub figures_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            report: ReportMetadata::default(),
            output_dir: PathBuf::from("outputs"),
            figures_dir: PathBuf::from("figures"),
        }
    }
}

impl Config {
    /// Load from `path`, or the defaults when no file was given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config
            .pipeline
            .validate()
            .with_context(|| format!("Invalid pipeline settings in {:?}", path))?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}
