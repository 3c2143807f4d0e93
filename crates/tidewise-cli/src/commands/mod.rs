//! CLI command implementations.

pub mod export;
pub mod ingest;
pub mod inspect;

use colored::Colorize;
use tidewise::{CsvIngestionPipeline, DiagnosticTrail, PipelineConfig, StepStatus};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Build a pipeline from the shared CLI flags.
pub fn build_pipeline(
    standalone: bool,
    max_size_mb: Option<u64>,
) -> Result<CsvIngestionPipeline, Box<dyn std::error::Error>> {
    let mut config = if standalone {
        PipelineConfig::standalone()
    } else {
        PipelineConfig::plot_instance()
    };
    if let Some(mb) = max_size_mb {
        config = config.with_max_file_bytes(Some(mb.saturating_mul(BYTES_PER_MB)));
    }
    config.validate()?;
    Ok(CsvIngestionPipeline::with_config(config))
}

/// Print the diagnostic checklist, one line per step.
pub fn print_trail(trail: &DiagnosticTrail) {
    for step in trail.steps() {
        let (icon, label) = match step.status {
            StepStatus::Success => ("✓".green().bold(), step.label.green()),
            StepStatus::Warning => ("!".yellow().bold(), step.label.yellow()),
            StepStatus::Error => ("✗".red().bold(), step.label.red()),
            StepStatus::Pending => ("·".dimmed(), step.label.dimmed()),
        };
        println!("  {} {}", icon, label);
        if let Some(ref message) = step.message {
            println!("      {}", message);
        }
    }
}
