//! Saved sessions: an ingested dataset plus the chart view built on it.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::TimeSeriesDataset;
use crate::error::{Result, TidewiseError};

/// Current session file format version.
pub const SESSION_VERSION: u32 = 1;

/// What the chart shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// Series keys currently plotted, in display order.
    pub selected_series: Vec<String>,
    /// Chart title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A dataset saved together with its view state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    /// Name of the file the dataset was ingested from.
    pub source_file: String,
    pub dataset: TimeSeriesDataset,
    #[serde(default)]
    pub view: ViewState,
}

impl Session {
    /// Create a session that plots every series.
    pub fn new(source_file: impl Into<String>, dataset: TimeSeriesDataset) -> Self {
        let selected_series = dataset.series_keys.to_vec();
        Self {
            version: SESSION_VERSION,
            saved_at: Utc::now(),
            source_file: source_file.into(),
            dataset,
            view: ViewState {
                selected_series,
                title: None,
            },
        }
    }

    /// Set the chart title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.view.title = Some(title.into());
        self
    }

    /// Replace the plotted series.
    ///
    /// Fails if a key is not in the dataset's catalog.
    pub fn select_series<I, S>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        if let Some(unknown) = keys.iter().find(|k| !self.dataset.series_keys.contains(k)) {
            return Err(TidewiseError::Session(format!(
                "Unknown series '{}'",
                unknown
            )));
        }
        self.view.selected_series = keys;
        Ok(())
    }

    /// Save the session as pretty-printed JSON.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use tidewise::session::Session;
    /// # fn example(session: &Session) -> tidewise::Result<()> {
    /// session.save("gauge.session.json")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| TidewiseError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let file = File::create(path).map_err(|e| TidewiseError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;

        debug!(path = %path.display(), rows = self.dataset.row_count(), "session saved");
        Ok(())
    }

    /// Load and validate a session file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| TidewiseError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let session: Session = serde_json::from_reader(BufReader::new(file))?;
        session.validate()?;

        debug!(path = %path.display(), rows = session.dataset.row_count(), "session loaded");
        Ok(session)
    }

    /// Check version, row alignment and selected series.
    pub fn validate(&self) -> Result<()> {
        if self.version != SESSION_VERSION {
            return Err(TidewiseError::Session(format!(
                "Unsupported session version {} (expected {})",
                self.version, SESSION_VERSION
            )));
        }

        self.dataset
            .check_alignment()
            .map_err(TidewiseError::Session)?;

        if let Some(unknown) = self
            .view
            .selected_series
            .iter()
            .find(|k| !self.dataset.series_keys.contains(k))
        {
            return Err(TidewiseError::Session(format!(
                "Selected series '{}' is not in the dataset",
                unknown
            )));
        }

        Ok(())
    }
}
