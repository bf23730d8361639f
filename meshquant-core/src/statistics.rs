//! Per-axis geometry statistics of a vertex set

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};

/// Relative tolerance used when deciding whether a shape spreads evenly across axes
pub const DEFAULT_SYMMETRY_RTOL: f64 = 0.2;

/// Absolute tolerance paired with [`DEFAULT_SYMMETRY_RTOL`]
const SYMMETRY_ATOL: f64 = 1e-8;

/// Per-axis statistics of a vertex set
///
/// All vectors are indexed by axis (x, y, z). `std` is the population
/// standard deviation (divided by N, not N - 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryStatistics {
    pub vertex_count: usize,
    pub min: Vector3d,
    pub max: Vector3d,
    pub mean: Vector3d,
    pub std: Vector3d,
    pub bbox_size: Vector3d,
}

impl GeometryStatistics {
    /// Compute statistics for a non-empty vertex set
    ///
    /// # Example
    /// ```rust
    /// use meshquant_core::{GeometryStatistics, Point3d};
    ///
    /// fn main() -> meshquant_core::Result<()> {
    ///     let stats = GeometryStatistics::compute(&[
    ///         Point3d::new(0.0, 0.0, 0.0),
    ///         Point3d::new(2.0, 4.0, 6.0),
    ///     ])?;
    ///     assert_eq!(stats.bbox_size.z, 6.0);
    ///     Ok(())
    /// }
    /// ```
    pub fn compute(vertices: &[Point3d]) -> Result<Self> {
        let first = vertices.first().ok_or_else(|| {
            Error::EmptyInput("cannot compute statistics of an empty vertex set".to_string())
        })?;

        let mut min = first.coords;
        let mut max = first.coords;
        let mut sum = Vector3d::zeros();

        for vertex in vertices {
            min = min.inf(&vertex.coords);
            max = max.sup(&vertex.coords);
            sum += vertex.coords;
        }

        let n = vertices.len() as f64;
        let mean = sum / n;

        let variance = vertices
            .iter()
            .map(|v| (v.coords - mean).component_mul(&(v.coords - mean)))
            .fold(Vector3d::zeros(), |acc, sq| acc + sq)
            / n;
        let std = variance.map(f64::sqrt);

        Ok(Self {
            vertex_count: vertices.len(),
            min,
            max,
            mean,
            std,
            bbox_size: max - min,
        })
    }

    /// Centroid of the vertex set (the per-axis mean)
    pub fn centroid(&self) -> Point3d {
        Point3d::from(self.mean)
    }

    /// Largest bounding-box extent
    pub fn max_extent(&self) -> f64 {
        self.bbox_size.max()
    }

    /// Axis with the largest bounding-box extent
    pub fn dominant_axis(&self) -> Axis {
        Axis::of_max(&self.bbox_size)
    }

    /// Whether every axis' spread lies within `rtol` of the mean spread
    pub fn is_roughly_symmetric(&self, rtol: f64) -> bool {
        let mean_std = self.std.mean();
        self.std
            .iter()
            .all(|s| (s - mean_std).abs() <= SYMMETRY_ATOL + rtol * mean_std.abs())
    }
}
