//! Reconstruction error metrics
//!
//! Original and reconstructed vertices are aligned by index, never by nearest
//! point. That is only meaningful when the reconstruction preserves vertex order,
//! which the quantization pipeline guarantees for its own output.

use crate::config::QualityThresholds;
use meshquant_core::{Axis, Error, Point3d, Result, Vector3d};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Default number of histogram bins for per-vertex errors
pub const DEFAULT_HISTOGRAM_BINS: usize = 50;

/// Qualitative label for an overall MSE value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconstructionQuality {
    /// Minimal quantization loss
    Excellent,
    /// Minor quantization error
    Good,
    /// Noticeable geometric error
    NotableError,
}

impl ReconstructionQuality {
    /// Bucket an overall MSE value
    pub fn classify(overall_mse: f64, thresholds: &QualityThresholds) -> Self {
        if overall_mse < thresholds.excellent {
            ReconstructionQuality::Excellent
        } else if overall_mse < thresholds.good {
            ReconstructionQuality::Good
        } else {
            ReconstructionQuality::NotableError
        }
    }

    /// One-sentence interpretation for reports
    pub fn description(self) -> &'static str {
        match self {
            ReconstructionQuality::Excellent => {
                "Excellent reconstruction fidelity, minimal quantization loss."
            }
            ReconstructionQuality::Good => {
                "Good reconstruction quality with minor quantization error."
            }
            ReconstructionQuality::NotableError => {
                "Notable geometric error detected; consider more quantization levels or the other normalization."
            }
        }
    }
}

impl fmt::Display for ReconstructionQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReconstructionQuality::Excellent => "excellent",
            ReconstructionQuality::Good => "good",
            ReconstructionQuality::NotableError => "notable error",
        };
        f.write_str(label)
    }
}

/// Vertex counts of the two inputs when they did not match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Truncation {
    pub original: usize,
    pub reconstructed: usize,
}

/// Error metrics between an original and a reconstructed vertex set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Mean squared difference per axis
    pub mse_per_axis: Vector3d,
    /// Mean absolute difference per axis
    pub mae_per_axis: Vector3d,
    /// Mean over vertices of the full 3D squared distance
    pub overall_mse: f64,
    /// Euclidean distance at each aligned vertex
    pub per_vertex_error: Vec<f64>,
    /// Set when the inputs had different lengths and were truncated
    pub truncated: Option<Truncation>,
    pub quality: ReconstructionQuality,
}

/// One histogram bin over `[lower, upper)` (the last bin is closed)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl ErrorReport {
    /// Number of vertex pairs that were compared
    pub fn aligned_count(&self) -> usize {
        self.per_vertex_error.len()
    }

    /// Axis with the highest MSE
    pub fn dominant_axis(&self) -> Axis {
        Axis::of_max(&self.mse_per_axis)
    }

    /// Largest per-vertex error
    pub fn max_vertex_error(&self) -> f64 {
        self.per_vertex_error.iter().copied().fold(0.0, f64::max)
    }

    /// Equal-width histogram of per-vertex errors
    pub fn histogram(&self, bins: usize) -> Vec<HistogramBin> {
        histogram(&self.per_vertex_error, bins)
    }
}

/// Equal-width histogram over `[min, max]` of the values
///
/// When every value is identical the range is widened to `[v - 0.5, v + 0.5]`
/// so the bins still have a width.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + width * i as f64,
            upper: lo + width * (i + 1) as f64,
            count,
        })
        .collect()
}

/// Compare two vertex sets position by position
///
/// Sets of different length are truncated to the shorter one and a warning is
/// logged; this is never an error. Only an empty overlap is rejected.
pub fn evaluate(
    original: &[Point3d],
    reconstructed: &[Point3d],
    thresholds: &QualityThresholds,
) -> Result<ErrorReport> {
    let truncated = if original.len() != reconstructed.len() {
        warn!(
            original = original.len(),
            reconstructed = reconstructed.len(),
            "vertex counts differ, truncating to the smaller set"
        );
        Some(Truncation {
            original: original.len(),
            reconstructed: reconstructed.len(),
        })
    } else {
        None
    };

    let n = original.len().min(reconstructed.len());
    if n == 0 {
        return Err(Error::EmptyInput(
            "no aligned vertices to compare".to_string(),
        ));
    }

    let mut sq_sum = Vector3d::zeros();
    let mut abs_sum = Vector3d::zeros();
    let mut per_vertex_error = Vec::with_capacity(n);

    for (a, b) in original[..n].iter().zip(&reconstructed[..n]) {
        let diff = a - b;
        sq_sum += diff.component_mul(&diff);
        abs_sum += diff.abs();
        per_vertex_error.push(diff.norm());
    }

    let count = n as f64;
    let mse_per_axis = sq_sum / count;
    let mae_per_axis = abs_sum / count;
    // Summed over axes, not averaged: this is the mean squared 3D distance
    let overall_mse = sq_sum.sum() / count;
    let quality = ReconstructionQuality::classify(overall_mse, thresholds);

    debug!(aligned = n, overall_mse, %quality, "evaluated reconstruction error");

    Ok(ErrorReport {
        mse_per_axis,
        mae_per_axis,
        overall_mse,
        per_vertex_error,
        truncated,
        quality,
    })
}
