//! Numeric coercion for data cells.

/// Outcome of reading one data cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Number(f64),
    /// Empty or absent token.
    Missing,
    /// Present but not a finite number.
    NonNumeric,
}

impl Cell {
    pub fn value(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Missing | Cell::NonNumeric => None,
        }
    }
}

/// Read a cell: strip thousands separators and parse as a finite float.
pub fn parse_cell(token: &str) -> Cell {
    let token = token.trim();
    if token.is_empty() {
        return Cell::Missing;
    }

    let cleaned: String = token.chars().filter(|&c| c != ',').collect();
    match cleaned.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Cell::Number(v),
        _ => Cell::NonNumeric,
    }
}
