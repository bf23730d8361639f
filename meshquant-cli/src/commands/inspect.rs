//! meshquant inspect command - statistics and shape interpretation.

use std::path::Path;

use anyhow::{Context, Result};
use meshquant_core::GeometryStatistics;

use crate::{report, Cli};

pub fn run(input: &Path, cli: &Cli) -> Result<()> {
    let mesh = meshquant_io::read_mesh(input)
        .with_context(|| format!("Failed to load mesh from {:?}", input))?;
    let stats = GeometryStatistics::compute(&mesh.vertices)
        .with_context(|| format!("Failed to compute statistics for {:?}", input))?;

    if !cli.quiet {
        println!(
            "{}",
            report::inspection_report(
                &input.display().to_string(),
                &stats,
                mesh.face_count(),
                &report::timestamp()
            )
        );
    }

    Ok(())
}
