use std::collections::{HashMap, HashSet};

use crate::cell::Cell;
use crate::config::TableClasses;

/// Position of a row within the collection it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(pub usize);

/// The identifier and class tokens of a row.
///
/// A row belongs to the group of every owner whose identifier appears among
/// its classes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowTags {
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl RowTags {
    pub fn new(id: Option<&str>, classes: &[&str]) -> Self {
        Self {
            id: id.filter(|id| !id.is_empty()).map(str::to_string),
            classes: classes.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// How a row takes part in sorting. Both flags can be set: a sub-heading
/// inside a group keeps its slot within that group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowKind {
    /// Separators and sub-headings. Never permuted within their list.
    pub fixed: bool,
    /// Dependent rows, only placed through their owner.
    pub hidable: bool,
}

impl RowKind {
    pub const NORMAL: Self = Self {
        fixed: false,
        hidable: false,
    };
    pub const FIXED: Self = Self {
        fixed: true,
        hidable: false,
    };
    pub const HIDABLE: Self = Self {
        fixed: false,
        hidable: true,
    };

    pub fn classify(tags: &RowTags, classes: &TableClasses) -> Self {
        Self {
            fixed: tags.classes.iter().any(|c| classes.is_fixed(c)),
            hidable: tags.classes.iter().any(|c| classes.is_hidable(c)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub tags: RowTags,
    pub kind: RowKind,
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(tags: RowTags, kind: RowKind, cells: Vec<Cell>) -> Self {
        Self { tags, kind, cells }
    }

    pub fn id(&self) -> Option<&str> {
        self.tags.id.as_deref()
    }
}

/// Rows of one table body, in document order.
#[derive(Debug, Clone, Default)]
pub struct Body {
    rows: Vec<Row>,
}

impl Body {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.get(id.0)
    }

    pub fn ids(&self) -> impl Iterator<Item = RowId> + '_ {
        (0..self.rows.len()).map(RowId)
    }

    /// Rows that take part in a top-level sort: everything but dependents.
    ///
    /// A row is a dependent when it is hidable or when one of its classes
    /// names another row of this body. Dependents are only placed through
    /// their owner.
    pub fn candidates(&self) -> Vec<RowId> {
        let owners: HashSet<&str> = self.rows.iter().filter_map(Row::id).collect();
        self.ids()
            .filter(|id| {
                let row = &self.rows[id.0];
                !row.kind.hidable
                    && !row
                        .tags
                        .classes
                        .iter()
                        .any(|c| row.id() != Some(c.as_str()) && owners.contains(c.as_str()))
            })
            .collect()
    }

    pub fn group_index(&self) -> GroupIndex {
        GroupIndex::build(self.rows.iter().map(|row| &row.tags))
    }
}

/// Class token to the rows carrying it, in document order.
#[derive(Debug, Clone, Default)]
pub struct GroupIndex {
    by_class: HashMap<String, Vec<RowId>>,
}

impl GroupIndex {
    pub fn build<'a>(rows: impl IntoIterator<Item = &'a RowTags>) -> Self {
        let mut by_class: HashMap<String, Vec<RowId>> = HashMap::new();
        for (index, tags) in rows.into_iter().enumerate() {
            for class in &tags.classes {
                let members = by_class.entry(class.clone()).or_default();
                if members.last() != Some(&RowId(index)) {
                    members.push(RowId(index));
                }
            }
        }
        Self { by_class }
    }

    /// Rows grouped under the owner identified by `owner_id`.
    pub fn dependents(&self, owner_id: &str) -> &[RowId] {
        self.by_class
            .get(owner_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_rows() {
        let classes = TableClasses::default();
        let kind = |cls: &[&str]| RowKind::classify(&RowTags::new(None, cls), &classes);
        assert_eq!(kind(&[]), RowKind::NORMAL);
        assert_eq!(kind(&["subhead"]), RowKind::FIXED);
        assert_eq!(kind(&["padding-row"]), RowKind::FIXED);
        assert_eq!(kind(&["hidable", "p-12"]), RowKind::HIDABLE);
        assert_eq!(kind(&["hidable2"]), RowKind::HIDABLE);
        assert_eq!(
            kind(&["hidable", "subhead"]),
            RowKind {
                fixed: true,
                hidable: true
            }
        );
    }

    #[test]
    fn empty_id_is_none() {
        assert_eq!(RowTags::new(Some(""), &[]).id, None);
        assert_eq!(RowTags::new(Some("r1"), &[]).id.as_deref(), Some("r1"));
    }

    #[test]
    fn group_index_follows_document_order() {
        let tags = [
            RowTags::new(Some("owner"), &["hider"]),
            RowTags::new(None, &["owner", "hidable", "owner"]),
            RowTags::new(None, &["other"]),
            RowTags::new(None, &["hidable", "owner"]),
        ];
        let index = GroupIndex::build(&tags);
        assert_eq!(index.dependents("owner"), &[RowId(1), RowId(3)]);
        assert_eq!(index.dependents("missing"), &[] as &[RowId]);
    }

    fn plain_row(id: Option<&str>, cls: &[&str]) -> Row {
        let tags = RowTags::new(id, cls);
        let kind = RowKind::classify(&tags, &TableClasses::default());
        Row::new(tags, kind, Vec::new())
    }

    #[test]
    fn candidates_skip_dependents() {
        let body = Body::new(vec![
            plain_row(None, &[]),
            plain_row(None, &["hidable"]),
            plain_row(None, &["subhead"]),
            plain_row(None, &[]),
        ]);
        assert_eq!(body.candidates(), vec![RowId(0), RowId(2), RowId(3)]);
    }

    #[test]
    fn grouped_subheads_are_not_candidates() {
        let body = Body::new(vec![
            plain_row(Some("r"), &["hider"]),
            plain_row(Some("sh"), &["subhead", "hidable", "r"]),
            plain_row(Some("x"), &["r"]),
            plain_row(Some("self"), &["self"]),
            plain_row(None, &["absent-owner"]),
        ]);
        assert_eq!(body.candidates(), vec![RowId(0), RowId(3), RowId(4)]);
    }
}
