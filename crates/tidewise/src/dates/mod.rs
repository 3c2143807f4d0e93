//! Multi-format date normalization.
//!
//! Tokens are tried as ISO-8601 first, then against an ordered list of
//! explicit patterns where day-first beats month-first. The first pattern
//! producing a valid date wins, so `03/04/2024` reads as 3 April.
//! [`DateConsistency`] flags files whose rows ended up under different
//! interpretations; it never re-parses them.

mod consistency;
mod formats;

pub use consistency::DateConsistency;
pub use formats::{is_ambiguous, normalize_date, DateFormat, DateMatch, DateOrder, EXPLICIT_FORMATS};
