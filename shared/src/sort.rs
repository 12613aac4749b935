//! Group-aware table sorting.
//!
//! Rows are sorted by one column, fixed rows keep their slot, and every
//! owner row is immediately followed by its dependents, which are sorted by
//! the same column one level down.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::column::cell_value;
use crate::compare::{Collate, Direction, compare_values};
use crate::row::{Body, GroupIndex, Row, RowId};

/// Where a row is moved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// To the end of the body.
    Append,
    /// Directly behind the given row.
    After(RowId),
}

/// Receives row moves in the order the sorter decides them.
pub trait RowSink {
    fn place(&mut self, row: RowId, placement: Placement);
}

impl<F: FnMut(RowId, Placement)> RowSink for F {
    fn place(&mut self, row: RowId, placement: Placement) {
        self(row, placement)
    }
}

/// In-memory sink that applies moves to a row order the way the DOM would.
#[derive(Debug, Clone, Default)]
pub struct OrderSink {
    order: Vec<RowId>,
    moves: usize,
}

impl OrderSink {
    pub fn new(initial: impl IntoIterator<Item = RowId>) -> Self {
        Self {
            order: initial.into_iter().collect(),
            moves: 0,
        }
    }

    pub fn for_body(body: &Body) -> Self {
        Self::new(body.ids())
    }

    pub fn order(&self) -> &[RowId] {
        &self.order
    }

    pub fn into_order(self) -> Vec<RowId> {
        self.order
    }

    pub fn moves(&self) -> usize {
        self.moves
    }
}

impl RowSink for OrderSink {
    fn place(&mut self, row: RowId, placement: Placement) {
        self.moves += 1;
        if let Some(pos) = self.order.iter().position(|r| *r == row) {
            self.order.remove(pos);
        }
        let at = match placement {
            Placement::Append => self.order.len(),
            Placement::After(anchor) => self
                .order
                .iter()
                .position(|r| *r == anchor)
                .map_or(self.order.len(), |pos| pos + 1),
        };
        self.order.insert(at, row);
    }
}

/// Sorts one body by one column.
pub struct RowSorter<'a, C: Collate + ?Sized> {
    body: &'a Body,
    groups: GroupIndex,
    column: usize,
    direction: Direction,
    collator: &'a C,
}

impl<'a, C: Collate + ?Sized> RowSorter<'a, C> {
    pub fn new(body: &'a Body, column: usize, direction: Direction, collator: &'a C) -> Self {
        Self {
            body,
            groups: body.group_index(),
            column,
            direction,
            collator,
        }
    }

    /// Sort every non-dependent row of the body, appending each to the end in
    /// final order. Returns how many rows were placed.
    pub fn sort<S: RowSink + ?Sized>(&self, sink: &mut S) -> usize {
        let candidates = self.body.candidates();
        let mut placed = HashSet::with_capacity(self.body.len());
        self.sort_rows(&candidates, Placement::Append, false, sink, &mut placed);
        debug!(
            column = self.column,
            direction = ?self.direction,
            candidates = candidates.len(),
            placed = placed.len(),
            "sorted table body"
        );
        placed.len()
    }

    /// Sort `rows` and place them with `placement`, recursing into each row's
    /// dependents.
    ///
    /// With `reverse` set the sorted list is placed back to front, which is
    /// what [`Placement::After`] needs to end up in sorted order. Rows already
    /// in `placed` are skipped.
    pub fn sort_rows<S: RowSink + ?Sized>(
        &self,
        rows: &[RowId],
        placement: Placement,
        reverse: bool,
        sink: &mut S,
        placed: &mut HashSet<RowId>,
    ) {
        let mut fixed = Vec::new();
        let mut sortable = Vec::with_capacity(rows.len());
        for (index, &id) in rows.iter().enumerate() {
            let Some(row) = self.body.row(id) else {
                continue;
            };
            if row.kind.fixed {
                fixed.push((index, id));
            } else {
                sortable.push((id, cell_value(&row.cells, self.column)));
            }
        }

        sortable.sort_by(|(_, a), (_, b)| compare_values(a, b, self.direction, self.collator));
        let mut ordered: Vec<RowId> = sortable.into_iter().map(|(id, _)| id).collect();

        // `fixed` is already in ascending index order.
        for (index, id) in fixed {
            let at = index.min(ordered.len());
            ordered.insert(at, id);
        }

        if reverse {
            ordered.reverse();
        }

        for id in ordered {
            if !placed.insert(id) {
                trace!(row = id.0, "row already placed, skipping");
                continue;
            }
            sink.place(id, placement);

            let Some(owner) = self.body.row(id).and_then(Row::id) else {
                continue;
            };
            let dependents = self.groups.dependents(owner);
            if !dependents.is_empty() {
                self.sort_rows(dependents, Placement::After(id), true, sink, placed);
            }
        }
    }
}

/// Final row order of `body` after sorting it by `column`.
pub fn sorted_order<C: Collate + ?Sized>(
    body: &Body,
    column: usize,
    direction: Direction,
    collator: &C,
) -> Vec<RowId> {
    let mut sink = OrderSink::for_body(body);
    RowSorter::new(body, column, direction, collator).sort(&mut sink);
    sink.into_order()
}
