//! Pipeline configuration
//!
//! Every tunable of the pipeline lives here and is handed to
//! [`QuantizationPipeline`](crate::QuantizationPipeline) explicitly. The structs
//! deserialize with defaults for missing fields, so a configuration file only has to
//! name what it changes.

use crate::selector::NormalizationMethod;
use meshquant_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default number of quantization levels per coordinate
pub const DEFAULT_LEVELS: u32 = 1024;

/// Default spread ratio above which Unit-Sphere normalization is chosen
pub const DEFAULT_RATIO_THRESHOLD: f64 = 2.0;

/// Default guard added to the smallest spread before dividing
pub const DEFAULT_EPSILON: f64 = 1e-8;

/// Configuration of the normalization strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Ratio `max(std) / (min(std) + epsilon)` must exceed this to pick Unit-Sphere
    pub ratio_threshold: f64,
    /// Division guard for zero spread
    pub epsilon: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            ratio_threshold: DEFAULT_RATIO_THRESHOLD,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

/// Overall-MSE bounds of the qualitative reconstruction buckets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// Overall MSE strictly below this is "excellent"
    pub excellent: f64,
    /// Overall MSE strictly below this (and not excellent) is "good"
    pub good: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            excellent: 1e-5,
            good: 1e-3,
        }
    }
}

/// Configuration for the quantization pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of integer levels per coordinate
    pub levels: u32,
    /// Selector tuning
    pub selector: SelectorConfig,
    /// Force a normalization method instead of letting the selector decide
    pub method_override: Option<NormalizationMethod>,
    /// Buckets used to label the reconstruction error
    pub quality: QualityThresholds,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            levels: DEFAULT_LEVELS,
            selector: SelectorConfig::default(),
            method_override: None,
            quality: QualityThresholds::default(),
        }
    }
}

impl PipelineConfig {
    /// Create a configuration with a specific level count
    pub fn with_levels(levels: u32) -> Self {
        Self {
            levels,
            ..Self::default()
        }
    }

    /// Check the configuration before running anything
    pub fn validate(&self) -> Result<()> {
        if self.levels < 2 {
            return Err(Error::InvalidLevels {
                levels: self.levels,
            });
        }
        if !(self.selector.ratio_threshold.is_finite() && self.selector.ratio_threshold > 0.0) {
            return Err(Error::InvalidData(format!(
                "ratio_threshold must be a positive finite number, got {}",
                self.selector.ratio_threshold
            )));
        }
        if !(self.selector.epsilon.is_finite() && self.selector.epsilon >= 0.0) {
            return Err(Error::InvalidData(format!(
                "epsilon must be a non-negative finite number, got {}",
                self.selector.epsilon
            )));
        }
        if self.quality.excellent > self.quality.good {
            return Err(Error::InvalidData(format!(
                "quality thresholds out of order: excellent {} > good {}",
                self.quality.excellent, self.quality.good
            )));
        }
        Ok(())
    }
}
