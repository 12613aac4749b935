use std::str::FromStr;

use crate::cell::{Cell, CellValue};
use crate::error::SpanError;

/// Number of logical columns a cell covers. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span(u32);

impl Span {
    pub const ONE: Span = Span(1);

    pub fn new(width: u32) -> Option<Self> {
        (width > 0).then_some(Span(width))
    }

    pub fn width(self) -> usize {
        self.0 as usize
    }

    /// Parse a `colspan` attribute, falling back to 1 when it is absent or malformed.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        raw.and_then(|raw| raw.parse().ok()).unwrap_or_default()
    }
}

impl Default for Span {
    fn default() -> Self {
        Span::ONE
    }
}

impl FromStr for Span {
    type Err = SpanError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(SpanError::Empty);
        }
        let value: i64 = raw
            .parse()
            .map_err(|_| SpanError::NotNumeric(raw.to_string()))?;
        u32::try_from(value)
            .ok()
            .and_then(Span::new)
            .ok_or(SpanError::NotPositive(value))
    }
}

/// Logical column of the header cell at `position` within its row.
///
/// Positions past the end resolve to the total width of the row.
pub fn resolve_column(spans: &[Span], position: usize) -> usize {
    spans
        .iter()
        .take(position)
        .map(|span| span.width())
        .sum()
}

/// The cell whose span range covers `column`, if any.
pub fn cell_at(cells: &[Cell], column: usize) -> Option<&Cell> {
    let mut start = 0;
    for cell in cells {
        let end = start + cell.span.width();
        if column >= start && column < end {
            return Some(cell);
        }
        start = end;
    }
    None
}

/// Sort value of `column`. Rows too short to cover it yield [`CellValue::Empty`].
pub fn cell_value(cells: &[Cell], column: usize) -> CellValue {
    cell_at(cells, column)
        .map(Cell::value)
        .unwrap_or(CellValue::Empty)
}
