//! Uniform scalar quantization to a fixed number of integer levels
//!
//! Quantization rescales the batch by its own global min/max (a second min-max
//! pass, independent of the normalizer's bounds), then floors onto
//! `[0, levels - 1]`. Dequantization maps a level back into [0, 1]. The round trip
//! is lossy: for a batch spanning [0, 1] every value comes back within
//! `1 / (levels - 1)` of where it started.

use meshquant_core::{Error, Point3d, Result};
use serde::{Deserialize, Serialize};

/// Vertex coordinates stored as integer levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantizedVertexSet {
    pub levels: u32,
    pub coords: Vec<[u32; 3]>,
}

impl QuantizedVertexSet {
    /// Number of vertices
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Check if no vertices are stored
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

fn check_levels(levels: u32) -> Result<()> {
    if levels < 2 {
        return Err(Error::InvalidLevels { levels });
    }
    Ok(())
}

/// Quantize a batch of values onto `levels` integer levels
///
/// # Example
/// ```rust
/// use meshquant_quantization::{dequantize, quantize};
///
/// fn main() -> meshquant_core::Result<()> {
///     let q = quantize(&[0.0, 0.5, 1.0], 1024)?;
///     assert_eq!(q, vec![0, 511, 1023]);
///     let dq = dequantize(&q, 1024)?;
///     assert!((dq[1] - 0.5).abs() < 1.0 / 1023.0);
///     Ok(())
/// }
/// ```
pub fn quantize(values: &[f64], levels: u32) -> Result<Vec<u32>> {
    check_levels(levels)?;
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if !(lo.is_finite() && hi.is_finite()) {
        return Err(Error::InvalidData(
            "cannot quantize non-finite values".to_string(),
        ));
    }

    // A constant batch would divide by zero; every value then maps to level 0
    let range = if hi > lo { hi - lo } else { 1.0 };
    let top = f64::from(levels - 1);

    Ok(values
        .iter()
        .map(|&v| {
            let scaled = (v - lo) / range;
            (scaled * top).floor().clamp(0.0, top) as u32
        })
        .collect())
}

/// Map integer levels back into [0, 1]
pub fn dequantize(quantized: &[u32], levels: u32) -> Result<Vec<f64>> {
    check_levels(levels)?;
    let top = f64::from(levels - 1);
    Ok(quantized.iter().map(|&q| f64::from(q) / top).collect())
}

/// Quantize a whole normalized vertex set as one batch (x, y, z per vertex)
pub fn quantize_vertices(vertices: &[Point3d], levels: u32) -> Result<QuantizedVertexSet> {
    let flat: Vec<f64> = vertices
        .iter()
        .flat_map(|v| [v.x, v.y, v.z])
        .collect();
    let q = quantize(&flat, levels)?;

    let coords = q
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();

    Ok(QuantizedVertexSet { levels, coords })
}

/// Dequantize a vertex set back to coordinates in [0, 1]
pub fn dequantize_vertices(quantized: &QuantizedVertexSet) -> Result<Vec<Point3d>> {
    check_levels(quantized.levels)?;
    let top = f64::from(quantized.levels - 1);

    Ok(quantized
        .coords
        .iter()
        .map(|&[x, y, z]| {
            Point3d::new(f64::from(x) / top, f64::from(y) / top, f64::from(z) / top)
        })
        .collect())
}
