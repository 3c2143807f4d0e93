//! Inspect command - summarize a saved session.

use std::path::PathBuf;

use colored::Colorize;
use tidewise::Session;

pub fn run(
    file: PathBuf,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("Session file not found: {}", file.display()).into());
    }

    let session = Session::load(&file)?;
    let dataset = &session.dataset;
    let normalized = dataset.rows.iter().filter(|r| r.time.is_normalized()).count();

    if json_output {
        let summary = serde_json::json!({
            "version": session.version,
            "savedAt": session.saved_at,
            "sourceFile": session.source_file,
            "timeHeaderLabel": dataset.time_header_label,
            "seriesKeys": dataset.series_keys,
            "rows": dataset.row_count(),
            "completeRows": dataset.complete_row_count(),
            "normalizedTimes": normalized,
            "view": session.view,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Session for".cyan().bold(),
        session.source_file.white()
    );
    println!(
        "Saved {}",
        session.saved_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let Some(ref title) = session.view.title {
        println!("Title: {}", title.white().bold());
    }
    println!();

    println!("{}", "Dataset:".yellow().bold());
    println!("  Time axis:      {}", dataset.time_header_label);
    println!("  Rows:           {}", dataset.row_count());
    println!("  Complete rows:  {}", dataset.complete_row_count());
    println!("  Parsed times:   {}/{}", normalized, dataset.row_count());
    println!();

    println!("{}", "Series:".yellow().bold());
    for key in dataset.series_keys.iter() {
        let selected = session.view.selected_series.iter().any(|s| s == key);
        let marker = if selected { "●".green() } else { "○".dimmed() };
        let values = dataset.series_values(key).unwrap_or_default();
        let present = values.iter().filter(|v| v.is_some()).count();
        println!("  {} {:24} {}/{} values", marker, key, present, values.len());
    }

    if verbose {
        println!();
        println!("{}", "First rows:".yellow().bold());
        for record in dataset.to_records().iter().take(5) {
            println!("  {}", record);
        }
    }

    Ok(())
}
