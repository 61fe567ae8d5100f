use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use icspipe_core::ics::{generate_calendar, read_calendar};
use icspipe_core::{PluginRegistry, execute};

use crate::render::render_outcome;

/// Load the plugin's chain, run it over `input` and write the result.
///
/// Nothing is written unless every event went through the chain; the output
/// file is replaced in one rename. `output: None` is a dry run.
pub fn run(
    registry: &PluginRegistry,
    input: &Path,
    plugin: &str,
    output: Option<&Path>,
) -> Result<()> {
    let chain = registry
        .load_chain(plugin)
        .with_context(|| format!("Could not load plugin '{}'", plugin))?;

    let calendar = read_calendar(input)
        .with_context(|| format!("Could not read calendar {}", input.display()))?;

    let (calendar, report) = execute(&chain, calendar);
    tracing::info!("done");

    if let Some(path) = output {
        write_atomically(path, &generate_calendar(&calendar))
            .with_context(|| format!("Could not write {}", path.display()))?;
    }

    println!("{}", render_outcome(&chain, &report, output));

    Ok(())
}

fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(content.as_bytes())?;
    file.persist(path)?;

    Ok(())
}
