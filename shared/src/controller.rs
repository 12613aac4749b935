use crate::column::{Span, resolve_column};
use crate::compare::Direction;

/// What a header activation asks the table to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortRequest {
    pub column: usize,
    pub direction: Direction,
}

/// Sort state of one clickable header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortHeader {
    pub column: usize,
    pub direction: Direction,
}

impl SortHeader {
    /// Headers start ascending, so the first activation sorts descending.
    pub fn new(column: usize) -> Self {
        Self {
            column,
            direction: Direction::Ascending,
        }
    }

    /// Header at `position` within a header row whose cells have `spans`.
    pub fn from_row(spans: &[Span], position: usize) -> Self {
        Self::new(resolve_column(spans, position))
    }
}

/// Sort headers of one table. At most one is active at a time.
#[derive(Debug, Clone, Default)]
pub struct SortController {
    headers: Vec<SortHeader>,
    active: Option<usize>,
}

impl SortController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a header, returning its handle.
    pub fn register(&mut self, header: SortHeader) -> usize {
        self.headers.push(header);
        self.headers.len() - 1
    }

    pub fn headers(&self) -> &[SortHeader] {
        &self.headers
    }

    /// Flip the header's direction and make it the active one.
    pub fn activate(&mut self, handle: usize) -> Option<SortRequest> {
        let header = self.headers.get_mut(handle)?;
        header.direction = header.direction.toggled();
        self.active = Some(handle);
        Some(SortRequest {
            column: header.column,
            direction: header.direction,
        })
    }

    /// Direction shown on `handle`, if it is the active header.
    pub fn indicator(&self, handle: usize) -> Option<Direction> {
        (self.active == Some(handle))
            .then(|| self.headers.get(handle).map(|h| h.direction))
            .flatten()
    }
}
