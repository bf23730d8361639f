//! meshquant evaluate command - compare an original mesh with its reconstruction.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use meshquant_quantization::evaluate;

use crate::config::Config;
use crate::{plot, report, Cli};

pub fn run(
    original: &Path,
    reconstructed: &Path,
    figures_dir: Option<&PathBuf>,
    cli: &Cli,
) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let original_mesh = meshquant_io::read_mesh(original)
        .with_context(|| format!("Failed to load mesh from {:?}", original))?;
    let reconstructed_mesh = meshquant_io::read_mesh(reconstructed)
        .with_context(|| format!("Failed to load mesh from {:?}", reconstructed))?;

    let error = evaluate(
        &original_mesh.vertices,
        &reconstructed_mesh.vertices,
        &config.pipeline.quality,
    )
    .context("Failed to compare meshes")?;

    let figures_dir = figures_dir.cloned().unwrap_or(config.figures_dir);
    let written = plot::write_figures(&error, &figures_dir)?;

    if !cli.quiet {
        println!(
            "{}",
            report::error_report(
                &super::display_name(original),
                &super::display_name(reconstructed),
                &error,
                &report::timestamp()
            )
        );
        let names: Vec<String> = written.iter().map(|p| super::display_name(p)).collect();
        println!(
            "Figures saved in {} ({})",
            figures_dir.display(),
            names.join(", ")
        );
    }

    Ok(())
}
