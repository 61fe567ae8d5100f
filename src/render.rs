//! Colored terminal rendering of run results.

use std::path::Path;

use icspipe_core::{Chain, RunReport};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for RunReport {
    fn render(&self) -> String {
        let mut line = format!(
            "{} included, {} rejected",
            self.included.green(),
            self.rejected.red()
        );
        if self.passthrough > 0 {
            line.push_str(&format!(
                " {}",
                format!("({} other components kept)", self.passthrough).dimmed()
            ));
        }
        line
    }
}

impl Render for Chain {
    fn render(&self) -> String {
        if self.is_empty() {
            return "(empty chain, events pass through unchanged)".dimmed().to_string();
        }
        self.stages()
            .iter()
            .map(|stage| stage.name().to_string())
            .collect::<Vec<_>>()
            .join(" → ")
    }
}

/// Final status line after a run.
pub fn render_outcome(chain: &Chain, report: &RunReport, written: Option<&Path>) -> String {
    let destination = match written {
        Some(path) => format!("Wrote {}", path.display().bold()),
        None => "Dry run, nothing written".yellow().to_string(),
    };

    format!("{}\n{}\n{}", chain.render(), report.render(), destination)
}
