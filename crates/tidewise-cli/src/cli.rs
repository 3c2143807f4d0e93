//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tidewise: CSV time-series ingestion with a diagnostic checklist
#[derive(Parser)]
#[command(name = "tidewise")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest a CSV file and show the diagnostic checklist
    Ingest {
        /// Path to the data file (.csv)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Use the standalone-upload rules (whitespace delimiters, raw times)
        #[arg(long)]
        standalone: bool,

        /// Maximum file size in megabytes
        #[arg(long, value_name = "N")]
        max_size_mb: Option<u64>,

        /// Save the ingested dataset as a session file
        #[arg(long, value_name = "PATH")]
        save_session: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export a normalized CSV from a data file or a session file
    Export {
        /// Path to a data file (.csv) or a session file (.json)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Field delimiter for the exported file
        #[arg(short, long, default_value = "comma")]
        delimiter: Delimiter,

        /// Use the standalone-upload rules when reading a data file
        #[arg(long)]
        standalone: bool,
    },

    /// Show a summary of a saved session
    Inspect {
        /// Path to the session file
        #[arg(value_name = "SESSION")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Semicolon,
    Tab,
}

impl Delimiter {
    pub fn byte(&self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Semicolon => b';',
            Delimiter::Tab => b'\t',
        }
    }
}

impl std::str::FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "comma" | "," => Ok(Delimiter::Comma),
            "semicolon" | ";" => Ok(Delimiter::Semicolon),
            "tab" | "\\t" => Ok(Delimiter::Tab),
            _ => Err(format!(
                "Unknown delimiter: {}. Use comma, semicolon, or tab.",
                s
            )),
        }
    }
}

impl std::fmt::Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Delimiter::Comma => write!(f, "comma"),
            Delimiter::Semicolon => write!(f, "semicolon"),
            Delimiter::Tab => write!(f, "tab"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ingest() {
        let cli = Cli::parse_from([
            "tidewise",
            "ingest",
            "gauge.csv",
            "--standalone",
            "--max-size-mb",
            "5",
            "-v",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Ingest {
                standalone,
                max_size_mb,
                json,
                ..
            } => {
                assert!(standalone);
                assert_eq!(max_size_mb, Some(5));
                assert!(!json);
            }
            _ => panic!("expected ingest"),
        }
    }

    #[test]
    fn test_delimiter_names() {
        assert_eq!("tab".parse::<Delimiter>().unwrap().byte(), b'\t');
        assert_eq!(";".parse::<Delimiter>().unwrap().byte(), b';');
        assert!("pipe".parse::<Delimiter>().is_err());
    }
}
