//! Print composition: register snapshot → deduplicated print groups and
//! takeaway bags.
//!
//! Pure derivation; nothing here mutates the register or is persisted. The
//! renderer consumes the output verbatim and never reorders it.

use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::catalog::Dish;
use crate::register::{Entry, EntryId, GroupId, Register};

/// A deduplicated, quantity-collapsed rendering unit: every member shares
/// the same dish and the exact same note set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintGroup {
    pub dish: &'static Dish,
    /// Shared note set, (id, label), in entry note order.
    pub notes: Vec<(String, String)>,
    pub members: Vec<EntryId>,
    /// Per-customer-group member counts, ascending by group id with an
    /// ungrouped bucket trailing. Present only when members span more than
    /// one owner (or mix grouped and ungrouped).
    pub allocation: Option<Vec<(Option<GroupId>, u32)>>,
}

impl PrintGroup {
    pub fn quantity(&self) -> u32 {
        self.members.len() as u32
    }
}

/// One takeaway packaging unit: a customer group's bag, or the default bag
/// collecting ungrouped takeaway entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bag {
    pub group: Option<GroupId>,
    /// Bagged dishes with quantities, first-seen order.
    pub items: Vec<(&'static Dish, u32)>,
}

/// Composer output: main item groups, side-dish groups (always rendered
/// after the main list), and the takeaway bag partition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
    pub main: Vec<PrintGroup>,
    pub sides: Vec<PrintGroup>,
    pub bags: Vec<Bag>,
}

fn note_set(entry: &Entry) -> Vec<(String, String)> {
    entry
        .notes
        .iter()
        .map(|(id, label)| (id.clone(), label.clone()))
        .collect()
}

/// Collapse one bucket of entries into print groups, keyed by dish and the
/// exact note set (custom note text included, so two entries differing by
/// one note never merge). First-seen key order is preserved.
fn collapse(entries: &[&Entry]) -> Vec<PrintGroup> {
    let mut groups: Vec<PrintGroup> = Vec::new();
    let mut index: HashMap<(&'static str, Vec<(String, String)>), usize> = HashMap::new();
    for entry in entries {
        let notes = note_set(entry);
        let key = (entry.dish.id, notes.clone());
        match index.get(&key) {
            Some(&i) => groups[i].members.push(entry.id),
            None => {
                index.insert(key, groups.len());
                groups.push(PrintGroup {
                    dish: entry.dish,
                    notes,
                    members: vec![entry.id],
                    allocation: None,
                });
            }
        }
    }
    groups
}

/// Fill in allocations where a print group's members span owners.
fn annotate_allocations(groups: &mut [PrintGroup], register: &Register) {
    for group in groups.iter_mut() {
        let mut grouped: BTreeMap<GroupId, u32> = BTreeMap::new();
        let mut ungrouped = 0u32;
        for id in &group.members {
            match register.entry(*id).and_then(|e| e.group) {
                Some(gid) => *grouped.entry(gid).or_default() += 1,
                None => ungrouped += 1,
            }
        }
        let owners = grouped.len() + usize::from(ungrouped > 0);
        if owners > 1 {
            let mut allocation: Vec<(Option<GroupId>, u32)> = grouped
                .into_iter()
                .map(|(gid, count)| (Some(gid), count))
                .collect();
            if ungrouped > 0 {
                // Ungrouped members form a distinct trailing bucket.
                allocation.push((None, ungrouped));
            }
            group.allocation = Some(allocation);
        }
    }
}

/// Takeaway bags: one per customer group with takeaway members, ascending
/// by group id, then one default bag for ungrouped takeaway entries. Bag
/// membership never removes an entry from its print group.
fn bags(register: &Register) -> Vec<Bag> {
    let mut by_group: BTreeMap<GroupId, Vec<&Entry>> = BTreeMap::new();
    let mut ungrouped: Vec<&Entry> = Vec::new();
    for entry in register.entries().iter().filter(|e| e.takeaway) {
        match entry.group {
            Some(gid) => by_group.entry(gid).or_default().push(entry),
            None => ungrouped.push(entry),
        }
    }
    let mut out: Vec<Bag> = by_group
        .into_iter()
        .map(|(gid, entries)| Bag {
            group: Some(gid),
            items: summarize(&entries),
        })
        .collect();
    if !ungrouped.is_empty() {
        out.push(Bag {
            group: None,
            items: summarize(&ungrouped),
        });
    }
    out
}

fn summarize(entries: &[&Entry]) -> Vec<(&'static Dish, u32)> {
    let mut items: Vec<(&'static Dish, u32)> = Vec::new();
    for entry in entries {
        match items.iter_mut().find(|(dish, _)| dish.id == entry.dish.id) {
            Some((_, count)) => *count += 1,
            None => items.push((entry.dish, 1)),
        }
    }
    items
}

/// Derive the full composition from a register snapshot.
pub fn compose(register: &Register) -> Composition {
    let (side, main): (Vec<&Entry>, Vec<&Entry>) = register
        .entries()
        .iter()
        .partition(|e| e.dish.category.is_side());

    let mut main_groups = collapse(&main);
    let mut side_groups = collapse(&side);
    annotate_allocations(&mut main_groups, register);
    annotate_allocations(&mut side_groups, register);

    Composition {
        main: main_groups,
        sides: side_groups,
        bags: bags(register),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::register::Direction;

    fn dish(id: &str) -> &'static Dish {
        catalog::dish(id).unwrap()
    }

    fn note(entry_id: EntryId, reg: &mut Register, note_id: &str) {
        let def = catalog::note(note_id).unwrap();
        reg.entry_mut(entry_id)
            .unwrap()
            .notes
            .insert(def.id.to_string(), def.label.to_string());
    }

    #[test]
    fn test_identical_entries_collapse() {
        let mut reg = Register::new();
        reg.register_dish(dish("pork_ramyun"));
        reg.register_dish(dish("tuna_gimbap"));
        reg.register_dish(dish("pork_ramyun"));
        let comp = compose(&reg);
        assert_eq!(comp.main.len(), 2);
        assert_eq!(comp.main[0].dish.id, "pork_ramyun");
        assert_eq!(comp.main[0].quantity(), 2);
        assert_eq!(comp.main[1].quantity(), 1);
    }

    #[test]
    fn test_one_differing_note_prevents_collapse() {
        let mut reg = Register::new();
        let a = reg.register_dish(dish("pork_ramyun"));
        reg.register_dish(dish("pork_ramyun"));
        note(a, &mut reg, "less_spicy");
        let comp = compose(&reg);
        assert_eq!(comp.main.len(), 2);
        assert!(comp.main.iter().all(|g| g.quantity() == 1));
    }

    #[test]
    fn test_same_note_set_collapses() {
        let mut reg = Register::new();
        let a = reg.register_dish(dish("pork_ramyun"));
        let b = reg.register_dish(dish("pork_ramyun"));
        note(a, &mut reg, "less_spicy");
        note(b, &mut reg, "less_spicy");
        let comp = compose(&reg);
        assert_eq!(comp.main.len(), 1);
        assert_eq!(comp.main[0].quantity(), 2);
        assert_eq!(comp.main[0].notes[0].0, "less_spicy");
    }

    #[test]
    fn test_quantity_matches_key_population() {
        let mut reg = Register::new();
        for _ in 0..3 {
            reg.register_dish(dish("cheese_ramyun"));
        }
        let a = reg.register_dish(dish("cheese_ramyun"));
        note(a, &mut reg, "vegan");
        let comp = compose(&reg);
        let total: u32 = comp.main.iter().map(|g| g.quantity()).sum();
        assert_eq!(total, 4);
        assert_eq!(comp.main[0].quantity(), 3);
        assert_eq!(comp.main[1].quantity(), 1);
    }

    #[test]
    fn test_sides_split_out_regardless_of_position() {
        let mut reg = Register::new();
        reg.register_dish(dish("rice_side"));
        reg.register_dish(dish("pork_ramyun"));
        reg.register_dish(dish("kimchi_side"));
        let comp = compose(&reg);
        assert_eq!(comp.main.len(), 1);
        assert_eq!(comp.sides.len(), 2);
        assert_eq!(comp.sides[0].dish.id, "rice_side");
    }

    #[test]
    fn test_allocation_spans_groups_with_trailing_ungrouped() {
        let mut reg = Register::new();
        reg.register_dish(dish("pork_ramyun"));
        reg.register_dish(dish("pork_ramyun"));
        reg.register_dish(dish("pork_ramyun"));
        // Group the first two rows.
        reg.select_next(); // wrap to row 0
        reg.enter_view();
        reg.extend_view(Direction::Down);
        let gid = reg.group().unwrap();
        let comp = compose(&reg);
        assert_eq!(comp.main.len(), 1);
        assert_eq!(
            comp.main[0].allocation,
            Some(vec![(Some(gid), 2), (None, 1)])
        );
    }

    #[test]
    fn test_no_allocation_for_single_owner() {
        let mut reg = Register::new();
        reg.register_dish(dish("pork_ramyun"));
        reg.register_dish(dish("pork_ramyun"));
        let comp = compose(&reg);
        assert_eq!(comp.main[0].allocation, None);
    }

    #[test]
    fn test_bags_per_group_then_default() {
        let mut reg = Register::new();
        reg.register_dish(dish("pork_ramyun"));
        reg.register_dish(dish("tuna_gimbap"));
        reg.register_dish(dish("rice_side"));
        reg.select_next(); // wrap to row 0
        reg.enter_view();
        reg.extend_view(Direction::Down);
        let gid = reg.group().unwrap();
        reg.toggle_takeaway_all();
        let comp = compose(&reg);
        assert_eq!(comp.bags.len(), 2);
        assert_eq!(comp.bags[0].group, Some(gid));
        assert_eq!(comp.bags[0].items.len(), 2);
        assert_eq!(comp.bags[1].group, None);
        assert_eq!(comp.bags[1].items, vec![(dish("rice_side"), 1)]);
    }

    #[test]
    fn test_bag_membership_keeps_print_group() {
        let mut reg = Register::new();
        reg.register_dish(dish("pork_ramyun"));
        reg.toggle_takeaway_all();
        let comp = compose(&reg);
        // The entry appears both in the item list and in a bag.
        assert_eq!(comp.main.len(), 1);
        assert_eq!(comp.bags.len(), 1);
    }

    #[test]
    fn test_no_takeaway_means_no_bags() {
        let mut reg = Register::new();
        reg.register_dish(dish("pork_ramyun"));
        let comp = compose(&reg);
        assert!(comp.bags.is_empty());
    }
}
