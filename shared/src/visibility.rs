//! Show/hide cascade for rows grouped under hider rows.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::config::TableClasses;
use crate::row::{GroupIndex, RowId, RowTags};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// The row itself is not displayed.
    Hidden,
    /// The row is a hider whose dependents are collapsed.
    Hiding,
}

/// A class that has to be set or cleared on a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassChange {
    pub row: RowId,
    pub flag: Flag,
    pub on: bool,
}

/// Result of revealing a direct-link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    pub target: RowId,
    pub changes: Vec<ClassChange>,
}

#[derive(Debug, Clone)]
struct RowState {
    id: Option<String>,
    hider: bool,
    hidden: bool,
    hiding: bool,
}

/// Visibility state of every row on a page.
#[derive(Debug, Clone)]
pub struct Visibility {
    rows: Vec<RowState>,
    groups: GroupIndex,
    by_id: HashMap<String, RowId>,
    owners: Vec<Option<RowId>>,
}

impl Visibility {
    pub fn new(tags: &[RowTags], classes: &TableClasses) -> Self {
        let rows: Vec<RowState> = tags
            .iter()
            .map(|t| RowState {
                id: t.id.clone(),
                hider: t.has_class(&classes.hider),
                hidden: t.has_class(&classes.hidden),
                hiding: t.has_class(&classes.hiding),
            })
            .collect();

        let mut by_id = HashMap::new();
        for (index, row) in rows.iter().enumerate() {
            if let Some(id) = &row.id {
                by_id.entry(id.clone()).or_insert(RowId(index));
            }
        }

        let owners = tags
            .iter()
            .map(|t| t.classes.iter().find_map(|class| by_id.get(class).copied()))
            .collect();

        Self {
            rows,
            groups: GroupIndex::build(tags),
            by_id,
            owners,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<RowId> {
        self.by_id.get(id).copied()
    }

    pub fn is_hider(&self, row: RowId) -> bool {
        self.rows.get(row.0).is_some_and(|r| r.hider)
    }

    pub fn is_hidden(&self, row: RowId) -> bool {
        self.rows.get(row.0).is_some_and(|r| r.hidden)
    }

    pub fn is_hiding(&self, row: RowId) -> bool {
        self.rows.get(row.0).is_some_and(|r| r.hiding)
    }

    pub fn hiders(&self) -> impl Iterator<Item = RowId> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.hider)
            .map(|(i, _)| RowId(i))
    }

    /// Handle a click on `hider`: toggle each dependent, and fully collapse
    /// any dependent hider that ends up hidden.
    pub fn toggle(&mut self, hider: RowId) -> Vec<ClassChange> {
        let mut changes = Vec::new();
        if self.is_hider(hider) {
            self.update_hidden(hider, false, false, &mut changes, &mut HashSet::new());
            debug!(row = hider.0, changes = changes.len(), "toggled hider");
        }
        changes
    }

    /// Make the hider named `id` visible and expanded.
    ///
    /// Every collapsed ancestor on its owner chain is expanded, then the
    /// target is toggled with the cascade applied to its dependent hiders
    /// whatever their new state. Returns `None` unless `id` names a hider.
    pub fn reveal(&mut self, id: &str) -> Option<Reveal> {
        let target = self.find(id)?;
        if !self.is_hider(target) {
            return None;
        }

        let mut chain = Vec::new();
        let mut seen = HashSet::from([target]);
        let mut child = target;
        while let Some(owner) = self.owners[child.0] {
            if !seen.insert(owner) {
                break;
            }
            chain.push((owner, child));
            child = owner;
        }

        let mut changes = Vec::new();
        for (owner, child) in chain.into_iter().rev() {
            if self.is_hidden(child) {
                self.expand(owner, &mut changes);
            }
        }
        self.update_hidden(target, false, true, &mut changes, &mut HashSet::new());
        debug!(id, row = target.0, changes = changes.len(), "revealed hider");
        Some(Reveal { target, changes })
    }

    /// `hide` forces rows hidden instead of toggling them; `recursive`
    /// cascades into dependent hiders even when they end up shown.
    fn update_hidden(
        &mut self,
        hider: RowId,
        hide: bool,
        recursive: bool,
        changes: &mut Vec<ClassChange>,
        visited: &mut HashSet<RowId>,
    ) {
        if !visited.insert(hider) {
            return;
        }
        let hiding = hide || !self.rows[hider.0].hiding;
        self.set(hider, Flag::Hiding, hiding, changes);

        let Some(id) = self.rows[hider.0].id.as_deref() else {
            return;
        };
        let dependents = self.groups.dependents(id).to_vec();
        for dep in dependents {
            let hidden = hide || !self.rows[dep.0].hidden;
            self.set(dep, Flag::Hidden, hidden, changes);
            if (hidden || recursive) && self.rows[dep.0].hider {
                self.update_hidden(dep, hidden, false, changes, visited);
            }
        }
    }

    fn expand(&mut self, owner: RowId, changes: &mut Vec<ClassChange>) {
        self.set(owner, Flag::Hiding, false, changes);
        let Some(id) = self.rows[owner.0].id.as_deref() else {
            return;
        };
        let dependents = self.groups.dependents(id).to_vec();
        for dep in dependents {
            self.set(dep, Flag::Hidden, false, changes);
        }
    }

    fn set(&mut self, row: RowId, flag: Flag, on: bool, changes: &mut Vec<ClassChange>) {
        let state = &mut self.rows[row.0];
        let slot = match flag {
            Flag::Hidden => &mut state.hidden,
            Flag::Hiding => &mut state.hiding,
        };
        if *slot != on {
            *slot = on;
            changes.push(ClassChange { row, flag, on });
        }
    }
}
