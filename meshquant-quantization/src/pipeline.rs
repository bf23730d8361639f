//! Adaptive normalization, quantization and reconstruction pipeline
//!
//! The pipeline is a single linear pass over one mesh:
//! statistics → selection → normalize → quantize → dequantize → denormalize →
//! error evaluation. Every stage returns a fresh value and nothing is mutated in
//! place, so the same input always produces the same output.

use crate::config::PipelineConfig;
use crate::evaluate::{evaluate, ErrorReport};
use crate::normalize::{normalize_with, NormalizationParams};
use crate::quantize::{dequantize_vertices, quantize_vertices, QuantizedVertexSet};
use crate::selector::{select_method, spread_ratio, Selection};
use meshquant_core::{Error, GeometryStatistics, Result, TriangleMesh};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

/// Lossy mesh payload: quantized vertices, the params to undo normalization, and
/// the untouched faces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedMesh {
    pub quantized: QuantizedVertexSet,
    pub params: NormalizationParams,
    pub faces: Vec<[usize; 3]>,
}

/// Everything produced by one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Statistics of the input vertices
    pub statistics: GeometryStatistics,
    /// Method that was used and the spread ratio behind it
    pub selection: Selection,
    /// The quantized payload
    pub encoded: EncodedMesh,
    /// Mesh rebuilt from the payload
    pub reconstructed: TriangleMesh,
    /// Error between input and reconstruction
    pub error: ErrorReport,
    /// Processing time in seconds
    pub processing_time: f64,
}

/// The quantization pipeline
#[derive(Debug, Clone, Default)]
pub struct QuantizationPipeline {
    config: PipelineConfig,
}

impl QuantizationPipeline {
    /// Create a new pipeline with configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// The configuration this pipeline runs with
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Choose the normalization method for a vertex set described by `statistics`
    pub fn select(&self, statistics: &GeometryStatistics) -> Selection {
        match self.config.method_override {
            Some(method) => Selection {
                method,
                ratio: spread_ratio(&statistics.std, self.config.selector.epsilon),
            },
            None => select_method(&statistics.std, &self.config.selector),
        }
    }

    /// Normalize and quantize a mesh
    pub fn encode(
        &self,
        mesh: &TriangleMesh,
    ) -> Result<(GeometryStatistics, Selection, EncodedMesh)> {
        self.config.validate()?;
        if mesh.is_empty() {
            return Err(Error::EmptyInput("mesh has no vertices".to_string()));
        }

        let statistics = GeometryStatistics::compute(&mesh.vertices)?;
        debug!(
            vertices = statistics.vertex_count,
            std = ?statistics.std.as_slice(),
            "computed geometry statistics"
        );

        let selection = self.select(&statistics);
        debug!(
            method = %selection.method,
            ratio = selection.ratio,
            overridden = self.config.method_override.is_some(),
            "selected normalization"
        );

        let (normalized, params) = normalize_with(selection.method, &mesh.vertices)?;
        let quantized = quantize_vertices(&normalized, self.config.levels)?;
        debug!(levels = quantized.levels, "quantized vertices");

        let encoded = EncodedMesh {
            quantized,
            params,
            faces: mesh.faces.clone(),
        };
        Ok((statistics, selection, encoded))
    }

    /// Rebuild a mesh from its quantized payload
    pub fn decode(&self, encoded: &EncodedMesh) -> Result<TriangleMesh> {
        let dequantized = dequantize_vertices(&encoded.quantized)?;
        let vertices = encoded.params.reconstruct(&dequantized);
        debug!(
            method = %encoded.params.method(),
            vertices = vertices.len(),
            "reconstructed vertices"
        );
        Ok(TriangleMesh::from_vertices_and_faces(
            vertices,
            encoded.faces.clone(),
        ))
    }

    /// Run encode, decode and error evaluation on a mesh
    pub fn run(&self, mesh: &TriangleMesh) -> Result<PipelineOutput> {
        let start = Instant::now();

        let (statistics, selection, encoded) = self.encode(mesh)?;
        let reconstructed = self.decode(&encoded)?;
        let error = evaluate(
            &mesh.vertices,
            &reconstructed.vertices,
            &self.config.quality,
        )?;

        let processing_time = start.elapsed().as_secs_f64();
        info!(
            method = %selection.method,
            levels = self.config.levels,
            vertices = statistics.vertex_count,
            overall_mse = error.overall_mse,
            quality = %error.quality,
            "quantization pipeline finished in {:.3}s",
            processing_time
        );

        Ok(PipelineOutput {
            statistics,
            selection,
            encoded,
            reconstructed,
            error,
            processing_time,
        })
    }
}

/// Run the pipeline with the default configuration
pub fn quantize_mesh(mesh: &TriangleMesh) -> Result<PipelineOutput> {
    QuantizationPipeline::default().run(mesh)
}

/// Run the pipeline with a specific number of levels
pub fn quantize_mesh_with_levels(mesh: &TriangleMesh, levels: u32) -> Result<PipelineOutput> {
    QuantizationPipeline::new(PipelineConfig::with_levels(levels)).run(mesh)
}
