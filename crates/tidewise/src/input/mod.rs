//! Input tokenization and source metadata.

mod source;
mod tokenizer;

pub use source::SourceInfo;
pub(crate) use tokenizer::is_field_separator;
pub use tokenizer::{dominant_separator, split_fields, split_lines, DelimiterRule};
