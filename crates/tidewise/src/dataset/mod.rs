//! Normalized time-series dataset produced by an ingestion run.

mod catalog;
mod point;
mod series;

pub use catalog::{series_base_name, SeriesCatalog, RESERVED_TIME_KEY};
pub use point::{DataPoint, TimeValue, ISO_OUTPUT_FORMAT};
pub use series::TimeSeriesDataset;
