//! Min-Max and Unit-Sphere vertex normalization
//!
//! Both normalizers return the normalized vertices together with the
//! [`NormalizationParams`] needed to undo the transform. The params are a closed
//! enum, so the inverse formula is always picked by the variant that produced them.

use crate::selector::NormalizationMethod;
use meshquant_core::{Error, GeometryStatistics, Point3d, Result, Vector3d};
use serde::{Deserialize, Serialize};

/// Parameters required to invert a normalization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum NormalizationParams {
    /// Per-axis bounds of the original vertex set
    MinMax { min: Vector3d, max: Vector3d },
    /// Centroid and largest distance from it
    UnitSphere { centroid: Vector3d, scale: f64 },
}

impl NormalizationParams {
    /// The method these params belong to
    pub fn method(&self) -> NormalizationMethod {
        match self {
            NormalizationParams::MinMax { .. } => NormalizationMethod::MinMax,
            NormalizationParams::UnitSphere { .. } => NormalizationMethod::UnitSphere,
        }
    }

    /// Exact inverse of the normalization step
    pub fn denormalize(&self, normalized: &[Point3d]) -> Vec<Point3d> {
        match *self {
            NormalizationParams::MinMax { min, max } => {
                let range = max - min;
                normalized
                    .iter()
                    .map(|n| Point3d::from(n.coords.component_mul(&range) + min))
                    .collect()
            }
            NormalizationParams::UnitSphere { centroid, scale } => normalized
                .iter()
                .map(|n| Point3d::from(n.coords * scale + centroid))
                .collect(),
        }
    }

    /// Rebuild original-space vertices from dequantized values in [0, 1]
    ///
    /// Min-Max data already lives in [0, 1], so this is plain denormalization.
    /// Unit-Sphere data lives in [-1, 1] and is remapped with `dq * 2 - 1` first.
    pub fn reconstruct(&self, dequantized: &[Point3d]) -> Vec<Point3d> {
        match self {
            NormalizationParams::MinMax { .. } => self.denormalize(dequantized),
            NormalizationParams::UnitSphere { .. } => {
                let remapped: Vec<Point3d> = dequantized
                    .iter()
                    .map(|dq| Point3d::from(dq.coords.map(|c| c * 2.0 - 1.0)))
                    .collect();
                self.denormalize(&remapped)
            }
        }
    }
}

/// A vertex normalization strategy
pub trait Normalizer {
    /// Map vertices into a bounded frame and return the inverse-transform params
    fn normalize(&self, vertices: &[Point3d]) -> Result<(Vec<Point3d>, NormalizationParams)>;
}

/// Per-axis rescale of each coordinate to [0, 1]
#[derive(Debug, Clone, Copy, Default)]
pub struct MinMaxNormalizer;

/// Translate to the centroid and scale so every point lies in the unit ball
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitSphereNormalizer;

impl Normalizer for MinMaxNormalizer {
    fn normalize(&self, vertices: &[Point3d]) -> Result<(Vec<Point3d>, NormalizationParams)> {
        let stats = GeometryStatistics::compute(vertices)?;
        let (min, max) = (stats.min, stats.max);

        // A constant axis divides by 1 and lands on 0
        let denom = (max - min).map(|d| if d == 0.0 { 1.0 } else { d });

        let normalized = vertices
            .iter()
            .map(|v| Point3d::from((v.coords - min).component_div(&denom)))
            .collect();

        Ok((normalized, NormalizationParams::MinMax { min, max }))
    }
}

impl Normalizer for UnitSphereNormalizer {
    fn normalize(&self, vertices: &[Point3d]) -> Result<(Vec<Point3d>, NormalizationParams)> {
        if vertices.is_empty() {
            return Err(Error::EmptyInput(
                "cannot normalize an empty vertex set".to_string(),
            ));
        }

        let centroid = vertices
            .iter()
            .fold(Vector3d::zeros(), |acc, v| acc + v.coords)
            / vertices.len() as f64;

        let max_radius = vertices
            .iter()
            .map(|v| (v.coords - centroid).norm())
            .fold(0.0_f64, f64::max);
        let scale = if max_radius == 0.0 { 1.0 } else { max_radius };

        let normalized = vertices
            .iter()
            .map(|v| Point3d::from((v.coords - centroid) / scale))
            .collect();

        Ok((normalized, NormalizationParams::UnitSphere { centroid, scale }))
    }
}

/// Normalize with the strategy matching `method`
pub fn normalize_with(
    method: NormalizationMethod,
    vertices: &[Point3d],
) -> Result<(Vec<Point3d>, NormalizationParams)> {
    match method {
        NormalizationMethod::MinMax => MinMaxNormalizer.normalize(vertices),
        NormalizationMethod::UnitSphere => UnitSphereNormalizer.normalize(vertices),
    }
}
