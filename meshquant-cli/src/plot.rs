//! Per-axis MSE bar chart and per-vertex error histogram.
//!
//! Each figure is written twice: the data series as JSON, and a PNG rendering
//! of the bars. The PNGs carry no text; titles and labels live in the JSON.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use meshquant_core::Axis;
use meshquant_quantization::{ErrorReport, HistogramBin, DEFAULT_HISTOGRAM_BINS};
use serde::Serialize;

pub const MSE_PER_AXIS_FILE: &str = "mse_per_axis.json";
pub const ERROR_HISTOGRAM_FILE: &str = "error_histogram.json";
pub const MSE_PER_AXIS_IMAGE: &str = "mse_per_axis.png";
pub const ERROR_HISTOGRAM_IMAGE: &str = "error_histogram.png";

const WIDTH: u32 = 600;
const HEIGHT: u32 = 400;
const MARGIN: u32 = 40;
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
const BAR_COLOR: Rgb<u8> = Rgb([31, 119, 180]);

/// Bar chart series
#[derive(Debug, Serialize)]
pub struct BarChart {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Histogram series
#[derive(Debug, Serialize)]
pub struct Histogram {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub bins: Vec<HistogramBin>,
}

pub fn mse_per_axis(report: &ErrorReport) -> BarChart {
    BarChart {
        title: "MSE per Axis",
        x_label: "Axis",
        y_label: "MSE",
        labels: Axis::ALL.iter().map(|a| a.to_string()).collect(),
        values: Axis::ALL
            .iter()
            .map(|a| report.mse_per_axis[a.index()])
            .collect(),
    }
}

pub fn error_histogram(report: &ErrorReport) -> Histogram {
    Histogram {
        title: "Per-Vertex Euclidean Error",
        x_label: "Error magnitude",
        y_label: "Frequency",
        bins: report.histogram(DEFAULT_HISTOGRAM_BINS),
    }
}

/// Draw one bar per value, scaled so the largest touches the top of the plot area
pub fn render_bars(values: &[f64]) -> RgbImage {
    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);
    let plot_width = WIDTH - 2 * MARGIN;
    let plot_height = HEIGHT - 2 * MARGIN;
    let baseline = HEIGHT - MARGIN;

    for x in MARGIN..=(WIDTH - MARGIN) {
        img.put_pixel(x, baseline, AXIS_COLOR);
    }
    for y in MARGIN..=baseline {
        img.put_pixel(MARGIN, y, AXIS_COLOR);
    }
    if values.is_empty() {
        return img;
    }

    let max = values.iter().copied().fold(0.0, f64::max);
    let slot = f64::from(plot_width) / values.len() as f64;
    for (i, &value) in values.iter().enumerate() {
        let frac = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
        let bar_height = (frac * f64::from(plot_height)).round() as u32;

        // 10% gap on each side of a bar
        let x0 = MARGIN + 1 + (i as f64 * slot + slot * 0.1) as u32;
        let x1 = (MARGIN + ((i + 1) as f64 * slot - slot * 0.1) as u32).max(x0 + 1);
        for x in x0..x1 {
            for y in (baseline - bar_height)..baseline {
                img.put_pixel(x, y, BAR_COLOR);
            }
        }
    }
    img
}

fn write_png(img: &RgbImage, path: &Path) -> Result<()> {
    img.save(path)
        .with_context(|| format!("Failed to write {:?}", path))
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write {:?}", path))?;
    writer.flush()?;
    Ok(())
}

/// Write both figures (JSON data and PNG) into `dir`, returning their paths
pub fn write_figures(report: &ErrorReport, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create directory {:?}", dir))?;

    let chart = mse_per_axis(report);
    let mse_path = dir.join(MSE_PER_AXIS_FILE);
    write_json(&chart, &mse_path)?;
    let mse_image = dir.join(MSE_PER_AXIS_IMAGE);
    write_png(&render_bars(&chart.values), &mse_image)?;

    let hist = error_histogram(report);
    let hist_path = dir.join(ERROR_HISTOGRAM_FILE);
    write_json(&hist, &hist_path)?;
    let counts: Vec<f64> = hist.bins.iter().map(|b| b.count as f64).collect();
    let hist_image = dir.join(ERROR_HISTOGRAM_IMAGE);
    write_png(&render_bars(&counts), &hist_image)?;

    tracing::debug!(dir = %dir.display(), "figures written");
    Ok(vec![mse_path, mse_image, hist_path, hist_image])
}
