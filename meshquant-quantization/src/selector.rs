//! Normalization strategy selection from per-axis spread

use crate::config::SelectorConfig;
use meshquant_core::Vector3d;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Normalization strategies available to the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationMethod {
    /// Per-axis rescale to [0, 1]
    MinMax,
    /// Center on the centroid and scale into the unit ball
    UnitSphere,
}

impl NormalizationMethod {
    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            NormalizationMethod::MinMax => "Min-Max",
            NormalizationMethod::UnitSphere => "Unit-Sphere",
        }
    }

    /// Identifier used in output file names, e.g. `reconstructed_min_max.ply`
    pub fn file_stem(self) -> &'static str {
        match self {
            NormalizationMethod::MinMax => "min_max",
            NormalizationMethod::UnitSphere => "unit_sphere",
        }
    }
}

impl fmt::Display for NormalizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for NormalizationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "min_max" | "minmax" => Ok(NormalizationMethod::MinMax),
            "unit_sphere" | "unitsphere" | "sphere" => Ok(NormalizationMethod::UnitSphere),
            other => Err(format!(
                "unknown normalization method '{}' (expected min-max or unit-sphere)",
                other
            )),
        }
    }
}

/// Outcome of the selector: the chosen method and the ratio that drove it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub method: NormalizationMethod,
    pub ratio: f64,
}

/// Spread ratio `max(std) / (min(std) + epsilon)`
pub fn spread_ratio(std: &Vector3d, epsilon: f64) -> f64 {
    std.max() / (std.min() + epsilon)
}

/// Pick a normalization method from the per-axis standard deviation
///
/// Strongly anisotropic data (ratio strictly above the threshold) goes to
/// Unit-Sphere so the long axis does not dominate; everything else uses Min-Max.
///
/// # Example
/// ```rust
/// use meshquant_core::Vector3d;
/// use meshquant_quantization::{select_method, NormalizationMethod, SelectorConfig};
///
/// let selection = select_method(&Vector3d::new(1.0, 1.0, 10.0), &SelectorConfig::default());
/// assert_eq!(selection.method, NormalizationMethod::UnitSphere);
/// ```
pub fn select_method(std: &Vector3d, config: &SelectorConfig) -> Selection {
    let ratio = spread_ratio(std, config.epsilon);
    let method = if ratio > config.ratio_threshold {
        NormalizationMethod::UnitSphere
    } else {
        NormalizationMethod::MinMax
    };
    Selection { method, ratio }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_equal_spread_selects_min_max() {
        let selection = select_method(&Vector3d::new(0.5, 0.5, 0.5), &SelectorConfig::default());
        assert_eq!(selection.method, NormalizationMethod::MinMax);
        assert_relative_eq!(selection.ratio, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_elongated_spread_selects_unit_sphere() {
        let selection = select_method(&Vector3d::new(1.0, 1.0, 10.0), &SelectorConfig::default());
        assert_eq!(selection.method, NormalizationMethod::UnitSphere);
        assert_relative_eq!(selection.ratio, 10.0, epsilon = 1e-6);
    }

    #[test]
    fn test_ratio_exactly_at_threshold_selects_min_max() {
        let config = SelectorConfig {
            ratio_threshold: 2.0,
            epsilon: 0.0,
        };
        let selection = select_method(&Vector3d::new(1.0, 2.0, 1.5), &config);
        assert_eq!(selection.ratio, 2.0);
        assert_eq!(selection.method, NormalizationMethod::MinMax);
    }

    #[test]
    fn test_zero_spread_is_guarded() {
        let selection = select_method(&Vector3d::zeros(), &SelectorConfig::default());
        assert!(selection.ratio.is_finite());
        assert_eq!(selection.method, NormalizationMethod::MinMax);
    }

    #[test]
    fn test_flat_axis_selects_unit_sphere() {
        // A planar shape has zero spread on one axis, so the ratio explodes
        let selection = select_method(&Vector3d::new(1.0, 1.0, 0.0), &SelectorConfig::default());
        assert_eq!(selection.method, NormalizationMethod::UnitSphere);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let config = SelectorConfig {
            ratio_threshold: 20.0,
            ..SelectorConfig::default()
        };
        let selection = select_method(&Vector3d::new(1.0, 1.0, 10.0), &config);
        assert_eq!(selection.method, NormalizationMethod::MinMax);
    }

    #[test]
    fn test_method_parsing_and_labels() {
        assert_eq!("min-max".parse::<NormalizationMethod>(), Ok(NormalizationMethod::MinMax));
        assert_eq!("Unit-Sphere".parse::<NormalizationMethod>(), Ok(NormalizationMethod::UnitSphere));
        assert_eq!("unit_sphere".parse::<NormalizationMethod>(), Ok(NormalizationMethod::UnitSphere));
        assert!("cube".parse::<NormalizationMethod>().is_err());

        assert_eq!(NormalizationMethod::MinMax.file_stem(), "min_max");
        assert_eq!(NormalizationMethod::UnitSphere.to_string(), "Unit-Sphere");
    }
}
