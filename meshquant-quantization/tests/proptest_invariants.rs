//! Property-based tests for the normalization and quantization invariants.
//!
//! Run with: cargo test -p meshquant-quantization -- proptest

use meshquant_core::{GeometryStatistics, Point3d, Vector3d};
use meshquant_quantization::*;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Generate a random vertex position in a bounded range.
fn arb_point() -> impl Strategy<Value = Point3d> {
    prop::array::uniform3(-100.0..100.0f64).prop_map(|[x, y, z]| Point3d::new(x, y, z))
}

/// Generate a vertex set with at least two points.
fn arb_vertices() -> impl Strategy<Value = Vec<Point3d>> {
    prop::collection::vec(arb_point(), 2..64)
}

/// Generate a batch of values in [0, 1] that contains both endpoints.
fn arb_unit_batch() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0..=1.0f64, 0..64).prop_map(|mut values| {
        values.push(0.0);
        values.push(1.0);
        values
    })
}

fn has_spread(points: &[Point3d]) -> bool {
    GeometryStatistics::compute(points)
        .map(|s| s.bbox_size.min() > 1e-6)
        .unwrap_or(false)
}

// =============================================================================
// Statistics
// =============================================================================

proptest! {
    #[test]
    fn proptest_bbox_is_max_minus_min(points in arb_vertices()) {
        let stats = GeometryStatistics::compute(&points).unwrap();
        prop_assert_eq!(stats.bbox_size, stats.max - stats.min);
        prop_assert!(stats.std.iter().all(|s| *s >= 0.0));
    }
}

// =============================================================================
// Normalization round trip
// =============================================================================

proptest! {
    #[test]
    fn proptest_min_max_round_trip(points in arb_vertices()) {
        prop_assume!(has_spread(&points));
        let (normalized, params) = MinMaxNormalizer.normalize(&points).unwrap();
        let restored = params.denormalize(&normalized);
        for (p, q) in points.iter().zip(&restored) {
            prop_assert!((p - q).amax() < 1e-9, "{:?} vs {:?}", p, q);
        }
    }

    #[test]
    fn proptest_unit_sphere_round_trip(points in arb_vertices()) {
        prop_assume!(has_spread(&points));
        let (normalized, params) = UnitSphereNormalizer.normalize(&points).unwrap();
        let restored = params.denormalize(&normalized);
        for (p, q) in points.iter().zip(&restored) {
            prop_assert!((p - q).amax() < 1e-9, "{:?} vs {:?}", p, q);
        }
        for n in &normalized {
            prop_assert!(n.coords.norm() <= 1.0 + 1e-12);
        }
    }

    #[test]
    fn proptest_min_max_stays_in_unit_cube(points in arb_vertices()) {
        let (normalized, _) = MinMaxNormalizer.normalize(&points).unwrap();
        for n in &normalized {
            for c in n.coords.iter() {
                prop_assert!(c.is_finite());
                prop_assert!((0.0..=1.0).contains(c));
            }
        }
    }
}

// =============================================================================
// Quantization
// =============================================================================

proptest! {
    #[test]
    fn proptest_quantization_error_bound(values in arb_unit_batch(), levels in 2u32..5000) {
        let q = quantize(&values, levels).unwrap();
        let dq = dequantize(&q, levels).unwrap();
        let bound = 1.0 / f64::from(levels - 1);
        for (x, y) in values.iter().zip(&dq) {
            prop_assert!((x - y).abs() < bound, "levels {}: {} -> {}", levels, x, y);
        }
    }

    #[test]
    fn proptest_levels_in_range(values in prop::collection::vec(-10.0..10.0f64, 1..64), levels in 2u32..5000) {
        let q = quantize(&values, levels).unwrap();
        prop_assert!(q.iter().all(|&level| level < levels));
    }
}

// =============================================================================
// Selector
// =============================================================================

proptest! {
    #[test]
    fn proptest_selection_is_deterministic(points in arb_vertices()) {
        let stats = GeometryStatistics::compute(&points).unwrap();
        let config = SelectorConfig::default();
        let first = select_method(&stats.std, &config);
        let second = select_method(&stats.std, &config);
        prop_assert_eq!(first, second);

        let expected = if first.ratio > config.ratio_threshold {
            NormalizationMethod::UnitSphere
        } else {
            NormalizationMethod::MinMax
        };
        prop_assert_eq!(first.method, expected);
    }

    #[test]
    fn proptest_uniform_spread_selects_min_max(s in 0.0..50.0f64) {
        let selection = select_method(&Vector3d::new(s, s, s), &SelectorConfig::default());
        prop_assert_eq!(selection.method, NormalizationMethod::MinMax);
    }
}

// =============================================================================
// Evaluation
// =============================================================================

proptest! {
    #[test]
    fn proptest_truncates_to_shorter(a in arb_vertices(), b in arb_vertices()) {
        let report = evaluate(&a, &b, &QualityThresholds::default()).unwrap();
        prop_assert_eq!(report.aligned_count(), a.len().min(b.len()));
        prop_assert_eq!(report.truncated.is_some(), a.len() != b.len());

        let summed: f64 = report.mse_per_axis.sum();
        prop_assert!((summed - report.overall_mse).abs() <= 1e-9 * summed.max(1.0));
    }
}
