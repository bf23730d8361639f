//! meshquant quantize command - run the pipeline and write the reconstruction.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use meshquant_io::MeshFormat;
use meshquant_quantization::{NormalizationMethod, QuantizationPipeline};

use crate::config::Config;
use crate::{report, Cli};

/// Flags that override the configuration file
#[derive(Debug, Clone, Default)]
pub struct QuantizeOptions {
    pub levels: Option<u32>,
    pub threshold: Option<f64>,
    pub method: Option<NormalizationMethod>,
    pub output_dir: Option<PathBuf>,
    pub summary: bool,
}

impl QuantizeOptions {
    /// Fold the flags into the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(levels) = self.levels {
            config.pipeline.levels = levels;
        }
        if let Some(threshold) = self.threshold {
            config.pipeline.selector.ratio_threshold = threshold;
        }
        if self.method.is_some() {
            config.pipeline.method_override = self.method;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
    }
}

/// Path of the reconstructed mesh for a method
pub fn reconstruction_path(dir: &Path, method: NormalizationMethod) -> PathBuf {
    dir.join(format!(
        "reconstructed_{}.{}",
        method.file_stem(),
        MeshFormat::Ply.extension()
    ))
}

pub fn run(input: &Path, options: &QuantizeOptions, cli: &Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    options.apply(&mut config);

    let mesh = meshquant_io::read_mesh(input)
        .with_context(|| format!("Failed to load mesh from {:?}", input))?;

    let pipeline = QuantizationPipeline::new(config.pipeline.clone());
    let output = pipeline
        .run(&mesh)
        .with_context(|| format!("Quantization pipeline failed for {:?}", input))?;

    // Nothing is written unless the whole pipeline succeeded
    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create directory {:?}", config.output_dir))?;
    let saved_to = reconstruction_path(&config.output_dir, output.selection.method);
    meshquant_io::write_mesh(&output.reconstructed, &saved_to)
        .with_context(|| format!("Failed to write reconstructed mesh to {:?}", saved_to))?;

    let timestamp = report::timestamp();
    if !cli.quiet {
        println!(
            "{}",
            report::quantization_report(input, &output, &saved_to, &timestamp)
        );
        println!();
        println!(
            "{}",
            report::error_report(
                &super::display_name(input),
                &super::display_name(&saved_to),
                &output.error,
                &timestamp
            )
        );
    }

    if options.summary {
        let summary_path = config.output_dir.join("README.md");
        let doc = report::summary_markdown(
            &config.report,
            input,
            &output,
            &saved_to,
            &config.figures_dir,
            &report::summary_date(),
        );
        fs::write(&summary_path, doc)
            .with_context(|| format!("Failed to write summary to {:?}", summary_path))?;
        if !cli.quiet {
            println!("Summary written to {}", summary_path.display());
        }
    }

    Ok(())
}
