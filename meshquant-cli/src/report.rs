//! Text reports and the Markdown summary document.
//!
//! Everything here renders to a `String` so the commands decide whether to print
//! or write it, and so the layout can be checked in tests.

use std::path::Path;

use chrono::Local;
use meshquant_core::{GeometryStatistics, Vector3d, DEFAULT_SYMMETRY_RTOL};
use meshquant_quantization::{ErrorReport, PipelineOutput};

use crate::config::ReportMetadata;

const RULE: &str = "──────────────────────────────────────────────";

/// Local time as printed in reports
pub fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Local date as printed in the summary document
pub fn summary_date() -> String {
    Local::now().format("%d %B %Y").to_string()
}

fn fmt_vector(v: &Vector3d) -> String {
    format!("[{:.4}, {:.4}, {:.4}]", v.x, v.y, v.z)
}

fn fmt_axes(v: &Vector3d, precision: usize) -> String {
    format!(
        "X={:.p$}, Y={:.p$}, Z={:.p$}",
        v.x,
        v.y,
        v.z,
        p = precision
    )
}

/// Thousands separators for counts
fn fmt_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Plain-language reading of the statistics
pub fn interpret_shape(stats: &GeometryStatistics) -> Vec<String> {
    let axis = stats.dominant_axis();
    let mut lines = vec![format!(
        "The model spans roughly {:.3} units, with its largest dimension along the {}-axis.",
        stats.max_extent(),
        axis
    )];
    if stats.is_roughly_symmetric(DEFAULT_SYMMETRY_RTOL) {
        lines.push("The shape appears roughly symmetric across axes.".to_string());
    } else {
        lines.push(format!(
            "The geometry seems elongated or irregular along the {}-axis.",
            axis
        ));
    }
    lines
}

/// Statistics report for `meshquant inspect`
pub fn inspection_report(
    name: &str,
    stats: &GeometryStatistics,
    face_count: usize,
    timestamp: &str,
) -> String {
    let mut lines = vec![
        "Mesh Analysis Report".to_string(),
        RULE.to_string(),
        format!("Mesh Name       : {}", name),
        format!("Timestamp       : {}", timestamp),
        format!("Vertex Count    : {}", fmt_count(stats.vertex_count)),
        format!("Face Count      : {}", fmt_count(face_count)),
        format!("Min             : {}", fmt_vector(&stats.min)),
        format!("Max             : {}", fmt_vector(&stats.max)),
        format!("Bounding Box    : {} (x, y, z)", fmt_vector(&stats.bbox_size)),
        format!("Centroid (mean) : {}", fmt_vector(&stats.mean)),
        format!("Spread (std dev): {}", fmt_vector(&stats.std)),
        String::new(),
        "Interpretation:".to_string(),
    ];
    lines.extend(interpret_shape(stats).into_iter().map(|l| format!(" - {}", l)));
    lines.push(RULE.to_string());
    lines.join("\n")
}

/// Normalization and quantization report for `meshquant quantize`
pub fn quantization_report(
    input: &Path,
    output: &PipelineOutput,
    saved_to: &Path,
    timestamp: &str,
) -> String {
    let selection = &output.selection;
    let lines = vec![
        "Adaptive Normalization & Quantization Report".to_string(),
        RULE.to_string(),
        format!("Model Path     : {}", input.display()),
        format!("Chosen Method  : {}", selection.method),
        format!("Spread Ratio   : {:.4}", selection.ratio),
        format!("Vertices       : {}", fmt_count(output.statistics.vertex_count)),
        format!("Quantization   : {} levels per axis", output.encoded.quantized.levels),
        format!("Output Saved   : {}", saved_to.display()),
        format!("Processing Time: {:.3} s", output.processing_time),
        format!("Timestamp      : {}", timestamp),
        RULE.to_string(),
    ];
    lines.join("\n")
}

/// Error report for a pair of meshes
pub fn error_report(original: &str, reconstructed: &str, report: &ErrorReport, timestamp: &str) -> String {
    let mut lines = vec![
        "Error Analysis Report".to_string(),
        RULE.to_string(),
        format!("Original Mesh    : {}", original),
        format!("Reconstructed    : {}", reconstructed),
        format!("Compared Vertices: {}", fmt_count(report.aligned_count())),
    ];
    if let Some(t) = report.truncated {
        lines.push(format!(
            "Warning          : vertex counts differ ({} vs {}), compared the first {}",
            t.original,
            t.reconstructed,
            report.aligned_count()
        ));
    }
    lines.extend([
        format!("MSE per axis     : {}", fmt_axes(&report.mse_per_axis, 6)),
        format!("MAE per axis     : {}", fmt_axes(&report.mae_per_axis, 6)),
        format!("Overall MSE      : {:.8}", report.overall_mse),
        format!("Max Vertex Error : {:.8}", report.max_vertex_error()),
        format!("Timestamp        : {}", timestamp),
        RULE.to_string(),
        "Interpretation:".to_string(),
        format!(" - {}", report.quality.description()),
        format!(" - Highest error observed along {}-axis.", report.dominant_axis()),
    ]);
    lines.join("\n")
}

/// Markdown summary of one pipeline run
pub fn summary_markdown(
    meta: &ReportMetadata,
    input: &Path,
    output: &PipelineOutput,
    saved_to: &Path,
    figures_dir: &Path,
    date: &str,
) -> String {
    let error = &output.error;
    let mut doc = vec![format!("# {}", meta.title), String::new()];
    if let Some(author) = &meta.author {
        doc.push(format!("**Author:** {}", author));
        doc.push(String::new());
    }
    doc.extend([
        format!("**Date:** {}", date),
        String::new(),
        "### Project Summary".to_string(),
        String::new(),
        "This run processed a 3D mesh through the adaptive quantization pipeline:".to_string(),
        String::new(),
        "1. **Mesh Inspection**: geometric statistics and shape interpretation.".to_string(),
        "2. **Adaptive Normalization & Quantization**: Min-Max or Unit-Sphere normalization chosen from the per-axis spread.".to_string(),
        "3. **Reconstruction & Error Analysis**: fidelity measured through MSE and MAE.".to_string(),
        String::new(),
        "---".to_string(),
        String::new(),
        "### Results Summary".to_string(),
        format!("- Input Mesh: `{}`", input.display()),
        format!("- Vertices: {}", fmt_count(output.statistics.vertex_count)),
        format!("- Normalization Method: {}", output.selection.method),
        format!("- Spread Ratio: {:.4}", output.selection.ratio),
        format!("- Quantization Levels: {}", output.encoded.quantized.levels),
        format!("- MSE per Axis: {}", fmt_axes(&error.mse_per_axis, 6)),
        format!("- Overall MSE: {:.8}", error.overall_mse),
        format!("- Observation: {}", error.quality.description()),
        format!("- Reconstructed Mesh: `{}`", saved_to.display()),
    ]);
    for line in interpret_shape(&output.statistics) {
        doc.push(format!("- Shape: {}", line));
    }
    doc.extend([
        String::new(),
        "---".to_string(),
        String::new(),
        "### Visual Outputs".to_string(),
        "Figures written by `meshquant evaluate`:".to_string(),
        format!("- `{}`", figures_dir.join(crate::plot::MSE_PER_AXIS_IMAGE).display()),
        format!("- `{}`", figures_dir.join(crate::plot::ERROR_HISTOGRAM_IMAGE).display()),
        format!(
            "- `{}` and `{}` (data series)",
            figures_dir.join(crate::plot::MSE_PER_AXIS_FILE).display(),
            figures_dir.join(crate::plot::ERROR_HISTOGRAM_FILE).display()
        ),
        String::new(),
    ]);
    doc.join("\n")
}
