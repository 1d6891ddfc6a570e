//! Synthesis entry points that hide the LP and strategy wiring.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use potforge_config::HeuristicConfig;
use potforge_core::{FdrTask, Result};
use potforge_solver::{generate_heuristic, write_potentials, PotentialHeuristic};
use tracing::info;

/// Configuration file read by [`synthesize`].
pub const CONFIG_FILE: &str = "potentials.toml";

/// Synthesizes a heuristic with the settings of [`CONFIG_FILE`] in the
/// working directory, or defaults if the file is missing or invalid.
pub fn synthesize(task: &FdrTask) -> Result<PotentialHeuristic> {
    let config = HeuristicConfig::load(CONFIG_FILE).unwrap_or_default();
    synthesize_with_config(task, &config)
}

/// Synthesizes a heuristic with an explicit configuration.
pub fn synthesize_with_config(
    task: &FdrTask,
    config: &HeuristicConfig,
) -> Result<PotentialHeuristic> {
    #[cfg(feature = "console")]
    potforge_console::init();

    generate_heuristic(task, config)
}

/// Synthesizes a heuristic and writes its potentials artifact to `path`.
pub fn synthesize_to_file(
    task: &FdrTask,
    config: &HeuristicConfig,
    path: impl AsRef<Path>,
) -> Result<PotentialHeuristic> {
    let heuristic = synthesize_with_config(task, config)?;
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    write_potentials(&mut out, &task.vars, &heuristic)?;
    out.flush()?;
    info!(
        event = "artifact_written",
        path = %path.display(),
        functions = heuristic.len()
    );
    Ok(heuristic)
}
