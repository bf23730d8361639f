//! Integration tests for meshquant-quantization
//!
//! These tests drive the full pipeline end to end on small, hand-checkable meshes.

use approx::assert_relative_eq;
use meshquant_core::{GeometryStatistics, Point3d, TriangleMesh, Vector3d};
use meshquant_quantization::*;

/// Create the 8 corners of the unit cube with its 12 triangles
fn create_unit_cube() -> TriangleMesh {
    let vertices = vec![
        Point3d::new(0.0, 0.0, 0.0),
        Point3d::new(1.0, 0.0, 0.0),
        Point3d::new(1.0, 1.0, 0.0),
        Point3d::new(0.0, 1.0, 0.0),
        Point3d::new(0.0, 0.0, 1.0),
        Point3d::new(1.0, 0.0, 1.0),
        Point3d::new(1.0, 1.0, 1.0),
        Point3d::new(0.0, 1.0, 1.0),
    ];
    let faces = vec![
        [0, 2, 1], [0, 3, 2],
        [4, 5, 6], [4, 6, 7],
        [0, 1, 5], [0, 5, 4],
        [2, 3, 7], [2, 7, 6],
        [1, 2, 6], [1, 6, 5],
        [0, 4, 7], [0, 7, 3],
    ];
    TriangleMesh::from_vertices_and_faces(vertices, faces)
}

/// Create a point cloud whose per-axis standard deviation is exactly (1, 1, 10)
///
/// Each axis takes the values ±s in a pattern that keeps the mean at zero,
/// so the population std on that axis is s.
fn create_elongated_cloud() -> TriangleMesh {
    let mut vertices = Vec::new();
    for sx in [-1.0, 1.0] {
        for sy in [-1.0, 1.0] {
            for sz in [-1.0, 1.0] {
                vertices.push(Point3d::new(sx, sy, sz * 10.0));
            }
        }
    }
    TriangleMesh::from_vertices(vertices)
}

#[test]
fn test_unit_cube_end_to_end() {
    let mesh = create_unit_cube();

    let stats = GeometryStatistics::compute(&mesh.vertices).unwrap();
    assert_eq!(stats.min, Vector3d::new(0.0, 0.0, 0.0));
    assert_eq!(stats.max, Vector3d::new(1.0, 1.0, 1.0));
    assert_eq!(stats.bbox_size, Vector3d::new(1.0, 1.0, 1.0));

    let output = quantize_mesh(&mesh).unwrap();

    assert_eq!(output.selection.method, NormalizationMethod::MinMax);
    assert_relative_eq!(output.selection.ratio, 1.0, epsilon = 1e-6);
    assert_eq!(output.encoded.quantized.levels, 1024);

    for mse in output.error.mse_per_axis.iter() {
        assert!(*mse < 1e-6, "per-axis MSE too large: {}", mse);
    }
    assert!(output.error.overall_mse < 1e-5);
    assert_eq!(output.error.quality, ReconstructionQuality::Excellent);
    assert!(output.error.truncated.is_none());
    assert_eq!(output.reconstructed.faces, mesh.faces);
}

#[test]
fn test_elongated_cloud_uses_unit_sphere() {
    let mesh = create_elongated_cloud();

    let stats = GeometryStatistics::compute(&mesh.vertices).unwrap();
    assert_relative_eq!(stats.std, Vector3d::new(1.0, 1.0, 10.0), epsilon = 1e-12);

    let pipeline = QuantizationPipeline::default();
    let (_, selection, encoded) = pipeline.encode(&mesh).unwrap();
    assert_eq!(selection.method, NormalizationMethod::UnitSphere);
    assert_relative_eq!(selection.ratio, 10.0, epsilon = 1e-6);

    let (centroid, scale) = match encoded.params {
        NormalizationParams::UnitSphere { centroid, scale } => (centroid, scale),
        other => panic!("expected Unit-Sphere params, got {:?}", other),
    };

    // Reconstruction must remap [0, 1] to [-1, 1] before rescaling
    let dequantized = dequantize_vertices(&encoded.quantized).unwrap();
    let decoded = pipeline.decode(&encoded).unwrap();
    for (dq, rebuilt) in dequantized.iter().zip(&decoded.vertices) {
        let expected = (dq.coords * 2.0).add_scalar(-1.0) * scale + centroid;
        assert_relative_eq!(rebuilt.coords, expected, epsilon = 1e-12);
    }

    // The Min-Max inverse applied to the same payload gives different vertices
    let min_max_style = NormalizationParams::MinMax {
        min: stats.min,
        max: stats.max,
    }
    .reconstruct(&dequantized);
    assert_ne!(min_max_style, decoded.vertices);
}

#[test]
fn test_mismatched_lengths_are_truncated() {
    let original: Vec<Point3d> = (0..10)
        .map(|i| Point3d::new(i as f64, (i * i) as f64, 1.0))
        .collect();
    let reconstructed: Vec<Point3d> = original
        .iter()
        .take(7)
        .map(|p| Point3d::new(p.x + 0.1, p.y, p.z))
        .collect();

    let report = evaluate(&original, &reconstructed, &QualityThresholds::default()).unwrap();

    assert_eq!(report.aligned_count(), 7);
    assert_eq!(
        report.truncated,
        Some(Truncation {
            original: 10,
            reconstructed: 7
        })
    );
    assert_relative_eq!(report.mse_per_axis.x, 0.01, epsilon = 1e-12);
    assert_relative_eq!(report.overall_mse, 0.01, epsilon = 1e-12);
}

#[test]
fn test_constant_axis_survives_pipeline() {
    let mesh = TriangleMesh::from_vertices(vec![
        Point3d::new(0.0, 0.0, 5.0),
        Point3d::new(1.0, 0.0, 5.0),
        Point3d::new(1.0, 1.0, 5.0),
        Point3d::new(0.0, 1.0, 5.0),
    ]);

    let (normalized, _) = MinMaxNormalizer.normalize(&mesh.vertices).unwrap();
    assert!(normalized.iter().all(|p| p.z == 0.0));

    // A flat square is strongly anisotropic, so force Min-Max to exercise the guard
    let mut config = PipelineConfig::default();
    config.method_override = Some(NormalizationMethod::MinMax);
    let output = QuantizationPipeline::new(config).run(&mesh).unwrap();

    for p in &output.reconstructed.vertices {
        assert!(p.coords.iter().all(|c| c.is_finite()));
        assert_eq!(p.z, 5.0);
    }
    assert_eq!(output.error.quality, ReconstructionQuality::Excellent);
}

#[test]
fn test_selection_is_deterministic() {
    let mesh = create_elongated_cloud();
    let pipeline = QuantizationPipeline::default();

    let first = pipeline.run(&mesh).unwrap();
    let second = pipeline.run(&mesh).unwrap();

    assert_eq!(first.selection, second.selection);
    assert_eq!(first.encoded, second.encoded);
    assert_eq!(first.reconstructed, second.reconstructed);
}

#[test]
fn test_vertex_order_is_preserved() {
    let vertices: Vec<Point3d> = (0..32)
        .map(|i| {
            let t = i as f64;
            Point3d::new(t, 31.0 - t, (t * 0.5).sin())
        })
        .collect();
    let mesh = TriangleMesh::from_vertices(vertices);
    let output = QuantizationPipeline::new(PipelineConfig {
        method_override: Some(NormalizationMethod::MinMax),
        ..PipelineConfig::default()
    })
    .run(&mesh)
    .unwrap();

    for (orig, rebuilt) in mesh.vertices.iter().zip(&output.reconstructed.vertices) {
        assert!((orig - rebuilt).norm() < 0.1);
    }
}
