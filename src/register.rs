//! The register: the in-memory ordered ticket being built for one order.
//!
//! Entry order is the single source of truth. Rows (what the operator
//! navigates) are computed on demand: a row is either a standalone entry or
//! a whole customer-group block. Group members are kept contiguous by
//! construction — groups are only ever formed from contiguous row ranges and
//! move as blocks — so the row scan never sees a group twice.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::catalog::Dish;
use crate::error::ValidationError;

/// Unique id of one registered entry, monotone within a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u64);

/// Customer group id, assigned ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u32);

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reorder / range-extension direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// One registered dish instance.
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: EntryId,
    pub dish: &'static Dish,
    /// Attached notes, id → label. Ordered so the exact note set compares
    /// deterministically when the composer keys entries by it.
    pub notes: BTreeMap<String, String>,
    pub takeaway: bool,
    pub group: Option<GroupId>,
}

/// A visible ticket row: a standalone entry or a group header covering the
/// whole block of its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Single(EntryId),
    Group(GroupId),
}

/// The mutable ticket: ordered entries, a row selection cursor, an optional
/// view range for bulk operations, and the id counters.
#[derive(Debug, Clone)]
pub struct Register {
    entries: Vec<Entry>,
    selected: usize,
    /// Active view range as (anchor, cursor) row indices.
    view: Option<(usize, usize)>,
    next_entry: u64,
    next_group: u32,
}

impl Default for Register {
    fn default() -> Self {
        Self::new()
    }
}

impl Register {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            selected: 0,
            view: None,
            next_entry: 0,
            next_group: 1,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entry_mut(&mut self, id: EntryId) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// Rows with the entry-index span each one covers, in ticket order.
    pub fn row_spans(&self) -> Vec<(Row, Range<usize>)> {
        let mut spans = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            match self.entries[i].group {
                Some(g) => {
                    let start = i;
                    while i < self.entries.len() && self.entries[i].group == Some(g) {
                        i += 1;
                    }
                    spans.push((Row::Group(g), start..i));
                }
                None => {
                    spans.push((Row::Single(self.entries[i].id), i..i + 1));
                    i += 1;
                }
            }
        }
        spans
    }

    pub fn rows(&self) -> Vec<Row> {
        self.row_spans().into_iter().map(|(row, _)| row).collect()
    }

    pub fn row_count(&self) -> usize {
        self.row_spans().len()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<Row> {
        self.row_spans().get(self.selected).map(|(row, _)| *row)
    }

    /// Normalized `[min, max]` row range of the active view, if any.
    pub fn view_range(&self) -> Option<(usize, usize)> {
        self.view
            .map(|(anchor, cursor)| (anchor.min(cursor), anchor.max(cursor)))
    }

    pub fn view_active(&self) -> bool {
        self.view.is_some()
    }

    // --- navigation -------------------------------------------------------

    pub fn select_next(&mut self) {
        let rows = self.row_count();
        if rows > 0 {
            self.selected = (self.selected + 1) % rows;
        }
    }

    pub fn select_previous(&mut self) {
        let rows = self.row_count();
        if rows > 0 {
            self.selected = (self.selected + rows - 1) % rows;
        }
    }

    // --- entry lifecycle --------------------------------------------------

    /// Append a new entry for `dish` at the end of the ticket and select it.
    pub fn register_dish(&mut self, dish: &'static Dish) -> EntryId {
        let id = EntryId(self.next_entry);
        self.next_entry += 1;
        self.entries.push(Entry {
            id,
            dish,
            notes: BTreeMap::new(),
            takeaway: false,
            group: None,
        });
        self.view = None;
        self.selected = self.row_count() - 1;
        id
    }

    /// Remove the selected row: one entry, or a whole group block when a
    /// group row is selected. Selection stays at the same row index, clamped.
    pub fn delete_selected(&mut self) {
        let spans = self.row_spans();
        let Some((_, span)) = spans.get(self.selected) else {
            return;
        };
        self.entries.drain(span.clone());
        self.view = None;
        let rows = self.row_count();
        if rows == 0 {
            self.selected = 0;
        } else if self.selected >= rows {
            self.selected = rows - 1;
        }
    }

    /// Clear the whole ticket. Called only after a successful submit.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.selected = 0;
        self.view = None;
        self.next_entry = 0;
        self.next_group = 1;
    }

    // --- reorder ----------------------------------------------------------

    /// Row range the bulk operations act on: the active view range, or the
    /// selected row alone.
    fn target_rows(&self) -> (usize, usize) {
        self.view_range().unwrap_or((self.selected, self.selected))
    }

    /// Swap the selected row (or the whole view-range block) with its
    /// neighbor row. No wrap at the ends; internal order is preserved.
    pub fn reorder(&mut self, direction: Direction) {
        let spans = self.row_spans();
        if spans.is_empty() {
            return;
        }
        let (first, last) = self.target_rows();
        match direction {
            Direction::Up => {
                if first == 0 {
                    return;
                }
                let neighbor = spans[first - 1].1.clone();
                let end = spans[last].1.end;
                self.entries[neighbor.start..end].rotate_left(neighbor.len());
                self.selected -= 1;
                if let Some((a, c)) = self.view {
                    self.view = Some((a - 1, c - 1));
                }
            }
            Direction::Down => {
                if last + 1 >= spans.len() {
                    return;
                }
                let neighbor = spans[last + 1].1.clone();
                let start = spans[first].1.start;
                self.entries[start..neighbor.end].rotate_right(neighbor.len());
                self.selected += 1;
                if let Some((a, c)) = self.view {
                    self.view = Some((a + 1, c + 1));
                }
            }
        }
    }

    // --- view mode --------------------------------------------------------

    pub fn enter_view(&mut self) {
        if !self.entries.is_empty() {
            self.view = Some((self.selected, self.selected));
        }
    }

    pub fn extend_view(&mut self, direction: Direction) {
        let rows = self.row_count();
        if let Some((anchor, cursor)) = self.view {
            let cursor = match direction {
                Direction::Up => cursor.saturating_sub(1),
                Direction::Down => (cursor + 1).min(rows.saturating_sub(1)),
            };
            self.view = Some((anchor, cursor));
            self.selected = cursor;
        }
    }

    pub fn jump_first(&mut self) {
        if let Some((anchor, _)) = self.view {
            self.view = Some((anchor, 0));
            self.selected = 0;
        }
    }

    pub fn jump_last(&mut self) {
        let rows = self.row_count();
        if let Some((anchor, _)) = self.view {
            if rows > 0 {
                self.view = Some((anchor, rows - 1));
                self.selected = rows - 1;
            }
        }
    }

    pub fn exit_view(&mut self) {
        self.view = None;
    }

    // --- grouping ---------------------------------------------------------

    /// Group the current row or the active view range into a new customer
    /// group. Rejects selections of fewer than two entries without mutating
    /// anything. Groups wholly inside the range are absorbed into the new
    /// one (row ranges can never split an existing group).
    pub fn group(&mut self) -> Result<GroupId, ValidationError> {
        let spans = self.row_spans();
        if spans.is_empty() {
            return Err(ValidationError::GroupTooSmall);
        }
        let (first, last) = self.target_rows();
        let range = spans[first].1.start..spans[last].1.end;
        if range.len() < 2 {
            return Err(ValidationError::GroupTooSmall);
        }
        let gid = GroupId(self.next_group);
        self.next_group += 1;
        for entry in &mut self.entries[range] {
            entry.group = Some(gid);
        }
        self.view = None;
        self.selected = self
            .rows()
            .iter()
            .position(|row| *row == Row::Group(gid))
            .unwrap_or(0);
        Ok(gid)
    }

    /// Dissolve the selected group row back into standalone entries.
    pub fn ungroup(&mut self) -> Result<(), ValidationError> {
        let Some(Row::Group(gid)) = self.selected_row() else {
            return Err(ValidationError::NotAGroup);
        };
        for entry in &mut self.entries {
            if entry.group == Some(gid) {
                entry.group = None;
            }
        }
        self.view = None;
        Ok(())
    }

    /// Ids of every entry a group currently owns, in ticket order.
    pub fn group_members(&self, gid: GroupId) -> Vec<EntryId> {
        self.entries
            .iter()
            .filter(|e| e.group == Some(gid))
            .map(|e| e.id)
            .collect()
    }

    // --- takeaway ---------------------------------------------------------

    fn toggle_takeaway_range(&mut self, range: Range<usize>) {
        let targets = &mut self.entries[range];
        if targets.is_empty() {
            return;
        }
        // All-or-none convergence: clear only when every target is already
        // takeaway, otherwise set the whole selection.
        let all_set = targets.iter().all(|e| e.takeaway);
        for entry in targets {
            entry.takeaway = !all_set;
        }
    }

    /// Toggle takeaway over the selected entry, the selected group's
    /// members, or the active view range.
    pub fn toggle_takeaway(&mut self) {
        let spans = self.row_spans();
        if spans.is_empty() {
            return;
        }
        let (first, last) = self.target_rows();
        let range = spans[first].1.start..spans[last].1.end;
        self.toggle_takeaway_range(range);
    }

    /// The same all-or-none rule applied to the entire ticket.
    pub fn toggle_takeaway_all(&mut self) {
        self.toggle_takeaway_range(0..self.entries.len());
    }
}
