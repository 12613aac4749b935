pub mod cell;
pub mod column;
pub mod compare;
pub mod config;
pub mod controller;
pub mod error;
pub mod row;
pub mod sort;
pub mod visibility;

pub use cell::{Cell, CellValue, ValueOverride};
pub use column::{Span, cell_at, cell_value, resolve_column};
#[cfg(feature = "icu")]
pub use compare::IcuCollation;
pub use compare::{Collate, CodepointCollation, Direction, compare_values};
pub use config::TableClasses;
pub use controller::{SortController, SortHeader, SortRequest};
pub use error::{ConfigError, SpanError};
pub use row::{Body, GroupIndex, Row, RowId, RowKind, RowTags};
pub use sort::{OrderSink, Placement, RowSink, RowSorter, sorted_order};
pub use visibility::{ClassChange, Flag, Reveal, Visibility};
