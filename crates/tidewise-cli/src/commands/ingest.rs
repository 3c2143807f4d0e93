//! Ingest command - run the pipeline over a file and show the checklist.

use std::path::PathBuf;

use colored::Colorize;
use tidewise::Session;

use super::{build_pipeline, print_trail};

pub fn run(
    file: PathBuf,
    standalone: bool,
    max_size_mb: Option<u64>,
    save_session: Option<PathBuf>,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let pipeline = build_pipeline(standalone, max_size_mb)?;
    let outcome = pipeline.ingest_file(&file)?;

    if json_output {
        let report = serde_json::json!({
            "file": file.display().to_string(),
            "success": outcome.is_success(),
            "steps": outcome.trail,
            "failure": outcome.failure(),
            "source": outcome.report().map(|r| &r.source),
            "stats": outcome.report().map(|r| &r.stats),
            "seriesKeys": outcome.dataset().map(|d| &d.series_keys),
            "timeHeaderLabel": outcome.dataset().map(|d| &d.time_header_label),
            "rows": outcome.dataset().map(|d| d.to_records()),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} {}",
            "Ingesting".cyan().bold(),
            file.display().to_string().white()
        );
        if standalone {
            println!("{}", "(standalone rules: whitespace delimiters, raw times)".dimmed());
        }
        println!();
        print_trail(&outcome.trail);
        println!();
    }

    let report = match &outcome.result {
        Ok(report) => report,
        Err(failure) => {
            return Err(format!(
                "Ingestion stopped at '{}': {}",
                failure.step.label(),
                failure.error
            )
            .into());
        }
    };
    let dataset = &report.dataset;

    if !json_output {
        println!(
            "{} {} row(s), {} series ({})",
            "Ready:".green().bold(),
            dataset.row_count().to_string().white().bold(),
            dataset.series_count().to_string().white().bold(),
            dataset.series_keys.to_vec().join(", ")
        );
        println!(
            "Time axis: {}   Complete rows: {}",
            dataset.time_header_label.white(),
            dataset.complete_row_count()
        );

        if verbose {
            println!();
            println!("{}", "Source:".yellow().bold());
            println!("  Format:    {}", report.source.format);
            println!("  Delimiter: {}", report.source.delimiter_rule.label());
            println!("  Size:      {} bytes", report.source.size_bytes);
            println!("  Hash:      {}", report.source.hash);
            println!();
            println!("{}", "Preview:".yellow().bold());
            for record in dataset.to_records().iter().take(5) {
                println!("  {}", record);
            }
        }
    }

    if let Some(path) = save_session {
        let session = Session::new(report.source.file_name.clone(), dataset.clone());
        session.save(&path)?;
        if !json_output {
            println!();
            println!(
                "{} {}",
                "Saved session to".green().bold(),
                path.display().to_string().white()
            );
        }
    }

    Ok(())
}
