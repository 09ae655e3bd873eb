//! Receipt text rendering.
//!
//! A purely formatting pass over the composer output: never reorders or
//! regroups anything, and is a pure function of its inputs. Layout:
//!
//! ```text
//!                           #7     right-aligned order number (if > 0)
//! * NOT PAID *                     only when flagged
//! R-Origi │2                       item line, quantity suffix when > 1
//!   #1x1 -x1                       allocation line (when members span owners)
//!   ☆                              one indented line per note
//! ────────────────────────────     separator, only before a side section
//! Ssam
//! === BAG ===                      one block per takeaway bag
//! (group 1)                        group bags name their group
//! R-Origi │2
//! ```

use crate::catalog::{Dish, NOTE_PRINT_PREFIX_SYMBOLS, NOTE_PRINT_SPICY_SYMBOLS};
use crate::compose::{Composition, PrintGroup};
use crate::notes;
use crate::session::OrderMeta;

/// Receipt column width used when the config does not override it.
pub const DEFAULT_RECEIPT_WIDTH: usize = 32;

const NOT_PAID_MARKER: &str = "* NOT PAID *";
const BAG_HEADER: &str = "=== BAG ===";
const NOTE_INDENT: &str = "  ";

/// Item-line label: the dish's print override verbatim, else the category
/// prefix joined to the base name with its menu suffix stripped.
fn item_label(dish: &Dish) -> String {
    if let Some(label) = dish.print_label {
        return label.to_string();
    }
    let mut base = dish.base_name;
    for suffix in [" Ramyun", " Gimbap"] {
        if let Some(stripped) = base.strip_suffix(suffix) {
            base = stripped;
            break;
        }
    }
    match dish.category.prefix() {
        Some(prefix) => format!("{prefix}-{base}"),
        None => base.to_string(),
    }
}

fn with_quantity(label: String, quantity: u32) -> String {
    if quantity > 1 {
        format!("{label} │{quantity}")
    } else {
        label
    }
}

/// Receipt form of one note: spice-level symbol, prefix symbol fused to the
/// label remainder, or the label verbatim (vegan, custom text).
fn note_text(id: &str, label: &str) -> String {
    if let Some((_, symbol)) = NOTE_PRINT_SPICY_SYMBOLS.iter().find(|(nid, _)| *nid == id) {
        return (*symbol).to_string();
    }
    if notes::is_custom_id(id) {
        return label.to_string();
    }
    for (prefix, symbol) in NOTE_PRINT_PREFIX_SYMBOLS {
        if id.starts_with(prefix) {
            if let Some((_, rest)) = label.split_once(' ') {
                return format!("{symbol}{rest}");
            }
        }
    }
    label.to_string()
}

fn allocation_text(allocation: &[(Option<crate::register::GroupId>, u32)]) -> String {
    allocation
        .iter()
        .map(|(owner, count)| match owner {
            Some(gid) => format!("#{gid}x{count}"),
            None => format!("-x{count}"),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn push_group(lines: &mut Vec<String>, group: &PrintGroup) {
    lines.push(with_quantity(item_label(group.dish), group.quantity()));
    if let Some(allocation) = &group.allocation {
        lines.push(format!("{NOTE_INDENT}{}", allocation_text(allocation)));
    }
    for (id, label) in &group.notes {
        lines.push(format!("{NOTE_INDENT}{}", note_text(id, label)));
    }
}

/// Render the final receipt text. Deterministic: identical inputs yield
/// identical text.
pub fn render(composition: &Composition, meta: &OrderMeta, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();

    // Header only when there is something to say: a paid order with the
    // number-0 sentinel prints no header at all.
    if meta.order_number > 0 {
        lines.push(format!("{:>width$}", format!("#{}", meta.order_number)));
    }
    if meta.not_paid {
        lines.push(NOT_PAID_MARKER.to_string());
    }

    for group in &composition.main {
        push_group(&mut lines, group);
    }

    if !composition.sides.is_empty() {
        lines.push("─".repeat(width));
        for group in &composition.sides {
            push_group(&mut lines, group);
        }
    }

    for bag in &composition.bags {
        lines.push(BAG_HEADER.to_string());
        if let Some(gid) = bag.group {
            lines.push(format!("(group {gid})"));
        }
        for (dish, count) in &bag.items {
            lines.push(with_quantity(item_label(dish), *count));
        }
    }

    if lines.is_empty() {
        return String::new();
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::compose::compose;
    use crate::register::{Direction, Register};

    fn dish(id: &str) -> &'static Dish {
        catalog::dish(id).unwrap()
    }

    fn add_note(reg: &mut Register, entry: crate::register::EntryId, note_id: &str) {
        let def = catalog::note(note_id).unwrap();
        reg.entry_mut(entry)
            .unwrap()
            .notes
            .insert(def.id.to_string(), def.label.to_string());
    }

    #[test]
    fn test_item_labels() {
        assert_eq!(item_label(dish("pork_ramyun")), "R-Pork");
        assert_eq!(item_label(dish("tuna_gimbap")), "G-Tuna");
        // Overrides are complete labels.
        assert_eq!(item_label(dish("spicy_tuna_gimbap")), "G-S.T.");
        assert_eq!(item_label(dish("tteokbokki")), "T.T.");
        // Sides never carry a prefix.
        assert_eq!(item_label(dish("rice_side")), "Rice");
        assert_eq!(item_label(dish("ssamjang_side")), "Ssam");
    }

    #[test]
    fn test_note_symbols() {
        assert_eq!(note_text("less_spicy", "Less Spicy"), "☆");
        assert_eq!(note_text("more_more_spicy", "More More Spicy"), "♥♥");
        assert_eq!(note_text("no_mushroom", "No Mush"), "xMush");
        assert_eq!(note_text("more_meat", "More Meat"), "+Meat");
        assert_eq!(note_text("add_pok_choi", "Add pok choi"), "^pok choi");
        assert_eq!(note_text("vegan", "Vegan"), "Vegan");
        assert_eq!(note_text("custom:0", "no lid please"), "no lid please");
    }

    #[test]
    fn test_header_rules() {
        let comp = Composition::default();
        let paid_zero = OrderMeta { order_number: 0, not_paid: false };
        assert_eq!(render(&comp, &paid_zero, 32), "");

        let unpaid = OrderMeta { order_number: 0, not_paid: true };
        assert_eq!(render(&comp, &unpaid, 32), "* NOT PAID *\n");

        let numbered = OrderMeta { order_number: 7, not_paid: false };
        let text = render(&comp, &numbered, 32);
        assert!(text.ends_with("#7\n"));
        assert_eq!(text.trim_end_matches('\n').len(), 32);
    }

    #[test]
    fn test_scenario_two_ramyun_one_gimbap() {
        // Two identical originals (same note set) collapse with one note
        // line; no sides, so no separator.
        let mut reg = Register::new();
        let a = reg.register_dish(dish("original_ramyun"));
        let b = reg.register_dish(dish("original_ramyun"));
        reg.register_dish(dish("beef_gimbap"));
        add_note(&mut reg, a, "less_spicy");
        add_note(&mut reg, b, "less_spicy");
        let meta = OrderMeta { order_number: 7, not_paid: false };
        let text = render(&compose(&reg), &meta, 32);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].trim_start(), "#7");
        assert_eq!(lines[1], "R-Origi │2");
        assert_eq!(lines[2], "  ☆");
        assert_eq!(lines[3], "G-Beef");
        assert_eq!(lines.len(), 4);
        assert!(!text.contains('─'));
    }

    #[test]
    fn test_separator_only_with_sides() {
        let mut reg = Register::new();
        reg.register_dish(dish("pork_ramyun"));
        reg.register_dish(dish("ssamjang_side"));
        let meta = OrderMeta::default();
        let text = render(&compose(&reg), &meta, 32);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "R-Pork");
        assert_eq!(lines[1], "─".repeat(32));
        assert_eq!(lines[2], "Ssam");
    }

    #[test]
    fn test_allocation_line() {
        let mut reg = Register::new();
        reg.register_dish(dish("pork_ramyun"));
        reg.register_dish(dish("pork_ramyun"));
        reg.register_dish(dish("pork_ramyun"));
        reg.select_next(); // wrap to row 0
        reg.enter_view();
        reg.extend_view(Direction::Down);
        reg.group().unwrap();
        let text = render(&compose(&reg), &OrderMeta::default(), 32);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "R-Pork │3");
        assert_eq!(lines[1], "  #1x2 -x1");
    }

    #[test]
    fn test_bag_blocks() {
        let mut reg = Register::new();
        reg.register_dish(dish("pork_ramyun"));
        reg.register_dish(dish("tuna_gimbap"));
        reg.select_next(); // wrap to row 0
        reg.enter_view();
        reg.extend_view(Direction::Down);
        reg.group().unwrap();
        reg.register_dish(dish("rice_side"));
        reg.toggle_takeaway_all();
        let text = render(&compose(&reg), &OrderMeta::default(), 32);
        let bag_at = text.find(BAG_HEADER).unwrap();
        let tail = &text[bag_at..];
        assert!(tail.contains("(group 1)"));
        // Default bag comes after the group bag.
        let default_bag = tail.rfind(BAG_HEADER).unwrap();
        assert!(tail[default_bag..].contains("Rice"));
        assert!(!tail[default_bag..].contains("(group"));
    }

    #[test]
    fn test_render_is_pure() {
        let mut reg = Register::new();
        reg.register_dish(dish("cheese_ramyun"));
        reg.register_dish(dish("rice_side"));
        reg.toggle_takeaway_all();
        let comp = compose(&reg);
        let meta = OrderMeta { order_number: 42, not_paid: true };
        assert_eq!(render(&comp, &meta, 32), render(&comp, &meta, 32));
    }
}
