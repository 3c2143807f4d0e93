//! Export command - write a normalized CSV from a data or session file.

use std::io;
use std::path::{Path, PathBuf};

use colored::Colorize;
use tidewise::{CsvExport, Session, TimeSeriesDataset};

use super::build_pipeline;
use crate::cli::Delimiter;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    delimiter: Delimiter,
    standalone: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let dataset = load_dataset(&file, standalone)?;
    let export = CsvExport::new().with_delimiter(delimiter.byte());

    match output {
        Some(path) => {
            export.export(&dataset, &path)?;
            eprintln!(
                "{} {} row(s) to {}",
                "Exported".green().bold(),
                dataset.row_count(),
                path.display().to_string().white()
            );
        }
        None => export.write(&dataset, io::stdout().lock())?,
    }

    if verbose {
        eprintln!(
            "Series: {} ({} delimiter)",
            dataset.series_keys.to_vec().join(", "),
            delimiter
        );
    }

    Ok(())
}

/// A `.json` file is read as a session; anything else goes through the pipeline.
fn load_dataset(
    file: &Path,
    standalone: bool,
) -> Result<TimeSeriesDataset, Box<dyn std::error::Error>> {
    if file.extension().is_some_and(|e| e == "json") {
        return Ok(Session::load(file)?.dataset);
    }

    let outcome = build_pipeline(standalone, None)?.ingest_file(file)?;
    match outcome.result {
        Ok(report) => Ok(report.dataset),
        Err(failure) => Err(format!(
            "Ingestion stopped at '{}': {}",
            failure.step.label(),
            failure.error
        )
        .into()),
    }
}
