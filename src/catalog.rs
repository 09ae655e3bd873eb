//! Static dish and note catalog.
//!
//! The menu is fixed for the lifetime of the process: three category menus
//! (ramyun, gimbap, side dishes) plus tteokbokki, which is registered
//! directly without a search. Each dish carries search aliases and an
//! optional print-label override used verbatim on the receipt.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Menu category of a dish. `Untagged` covers dishes registered outside the
/// category menus (tteokbokki) and prints without a category prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Ramyun,
    Gimbap,
    SideDish,
    Untagged,
}

impl Category {
    /// Single-letter prefix used on receipt item lines. Side dishes and
    /// untagged dishes print bare.
    pub fn prefix(self) -> Option<char> {
        match self {
            Category::Ramyun => Some('R'),
            Category::Gimbap => Some('G'),
            Category::SideDish | Category::Untagged => None,
        }
    }

    /// Side dishes are rendered in their own receipt section.
    pub fn is_side(self) -> bool {
        matches!(self, Category::SideDish)
    }

    /// Stable tag used in the persistence layer.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Ramyun => "R",
            Category::Gimbap => "G",
            Category::SideDish => "S",
            Category::Untagged => "-",
        }
    }
}

/// One searchable menu item.
#[derive(Debug, PartialEq, Eq)]
pub struct Dish {
    pub id: &'static str,
    pub category: Category,
    pub base_name: &'static str,
    /// Shorthand aliases accepted by the search matcher.
    pub aliases: &'static [&'static str],
    /// Complete receipt label, replacing prefix + base name when set.
    pub print_label: Option<&'static str>,
}

/// Every dish, in menu declaration order within each category. Search
/// results and tie-breaks follow this order.
pub static DISHES: &[Dish] = &[
    Dish { id: "beef_gimbap", category: Category::Gimbap, base_name: "Beef Gimbap", aliases: &["bf", "bef", "bfe"], print_label: None },
    Dish { id: "tuna_gimbap", category: Category::Gimbap, base_name: "Tuna Gimbap", aliases: &[], print_label: None },
    Dish { id: "spicy_tuna_gimbap", category: Category::Gimbap, base_name: "S.Tuna Gimbap", aliases: &["st", "stuna", "s-tuna"], print_label: Some("G-S.T.") },
    Dish { id: "sausage_gimbap", category: Category::Gimbap, base_name: "Sausage Gimbap", aliases: &[], print_label: Some("G-Saus") },
    Dish { id: "mushroom_gimbap", category: Category::Gimbap, base_name: "Mushroom Gimbap", aliases: &[], print_label: Some("G-Mush") },
    Dish { id: "salad_gimbap", category: Category::Gimbap, base_name: "Salad Gimbap", aliases: &["sl"], print_label: None },
    Dish { id: "tofu_gimbap", category: Category::Gimbap, base_name: "Tofu Gimbap", aliases: &["tofu", "tf"], print_label: None },
    Dish { id: "pork_ramyun", category: Category::Ramyun, base_name: "Pork Ramyun", aliases: &[], print_label: None },
    Dish { id: "chicken_ramyun", category: Category::Ramyun, base_name: "Chicken Ramyun", aliases: &["chix", "chicken", "ci"], print_label: Some("R-Chix") },
    Dish { id: "original_ramyun", category: Category::Ramyun, base_name: "Original Ramyun", aliases: &[], print_label: Some("R-Origi") },
    Dish { id: "cheese_ramyun", category: Category::Ramyun, base_name: "Cheese Ramyun", aliases: &["ches"], print_label: None },
    Dish { id: "kimchi_ramyun", category: Category::Ramyun, base_name: "Kimchi Ramyun", aliases: &[], print_label: None },
    Dish { id: "seafood_ramyun", category: Category::Ramyun, base_name: "Seafood Ramyun", aliases: &["sae"], print_label: Some("R-Sea") },
    Dish { id: "tofu_ramyun", category: Category::Ramyun, base_name: "Tofu Ramyun", aliases: &["tofu", "tf"], print_label: None },
    Dish { id: "kimchi_side", category: Category::SideDish, base_name: "Kimchi", aliases: &[], print_label: None },
    Dish { id: "ssamjang_side", category: Category::SideDish, base_name: "Ssamjang", aliases: &[], print_label: Some("Ssam") },
    Dish { id: "namu_side", category: Category::SideDish, base_name: "Namu", aliases: &[], print_label: None },
    Dish { id: "hot_side", category: Category::SideDish, base_name: "Hot", aliases: &[], print_label: None },
    Dish { id: "rice_side", category: Category::SideDish, base_name: "Rice", aliases: &[], print_label: None },
    Dish { id: "chili_side", category: Category::SideDish, base_name: "Extra chili aside", aliases: &["chil"], print_label: Some("Chili side") },
    Dish { id: "hot_water_side", category: Category::SideDish, base_name: "Hot water", aliases: &["wt"], print_label: Some("hot water") },
    Dish { id: "other_side", category: Category::SideDish, base_name: "Other item", aliases: &["other"], print_label: None },
    Dish { id: "tteokbokki", category: Category::Untagged, base_name: "Tteokbokki", aliases: &[], print_label: Some("T.T.") },
];

static DISH_INDEX: Lazy<HashMap<&'static str, &'static Dish>> =
    Lazy::new(|| DISHES.iter().map(|d| (d.id, d)).collect());

/// All dishes of one category, in menu order.
pub fn dishes(category: Category) -> impl Iterator<Item = &'static Dish> {
    DISHES.iter().filter(move |d| d.category == category)
}

/// Look up a dish by its stable id.
pub fn dish(id: &str) -> Option<&'static Dish> {
    DISH_INDEX.get(id).copied()
}

/// The dish registered by the "add directly" action.
pub fn direct_dish() -> &'static Dish {
    dish("tteokbokki").unwrap_or(&DISHES[DISHES.len() - 1])
}

/// A predefined note the operator can attach to an entry.
#[derive(Debug)]
pub struct NoteDef {
    pub id: &'static str,
    pub label: &'static str,
}

/// Predefined note catalog; declaration order is display order.
pub static NOTE_CATALOG: &[NoteDef] = &[
    NoteDef { id: "less_spicy", label: "Less Spicy" },
    NoteDef { id: "less_less_spicy", label: "Less Less Spicy" },
    NoteDef { id: "more_spicy", label: "More Spicy" },
    NoteDef { id: "more_more_spicy", label: "More More Spicy" },
    NoteDef { id: "no_mushroom", label: "No Mush" },
    NoteDef { id: "no_onions", label: "No Onions" },
    NoteDef { id: "more_cheese", label: "More Cheese" },
    NoteDef { id: "more_cream", label: "More Cream" },
    NoteDef { id: "no_spring_onion", label: "No Spring" },
    NoteDef { id: "no_carrots", label: "No Carrots" },
    NoteDef { id: "more_meat", label: "More Meat" },
    NoteDef { id: "vegan", label: "Vegan" },
    NoteDef { id: "more_veggies", label: "More Veg" },
    NoteDef { id: "add_pok_choi", label: "Add pok choi" },
    NoteDef { id: "no_zucchini", label: "No Zucc" },
    NoteDef { id: "more_zucchini", label: "More Zucc" },
    NoteDef { id: "add_cheese", label: "Add Cheese" },
    NoteDef { id: "no_egg", label: "No Egg" },
    NoteDef { id: "less_rice", label: "Less Rice" },
    NoteDef { id: "no_cuccumber", label: "No Cuccumber" },
    NoteDef { id: "no_spinach", label: "No Spinach" },
    NoteDef { id: "no_pepper", label: "No Pepper" },
    NoteDef { id: "no_squid", label: "No Squid" },
    NoteDef { id: "no_octopus", label: "No Octopus" },
    NoteDef { id: "no_clams", label: "No Clams" },
];

static NOTE_INDEX: Lazy<HashMap<&'static str, &'static NoteDef>> =
    Lazy::new(|| NOTE_CATALOG.iter().map(|n| (n.id, n)).collect());

/// Look up a predefined note by id.
pub fn note(id: &str) -> Option<&'static NoteDef> {
    NOTE_INDEX.get(id).copied()
}

const RAMYUN_DEFAULT_NOTES: &[&str] = &[
    "less_spicy",
    "less_less_spicy",
    "more_spicy",
    "more_more_spicy",
    "no_spring_onion",
    "no_mushroom",
    "add_cheese",
];

const GIMBAP_DEFAULT_NOTES: &[&str] = &["no_cuccumber", "no_carrots", "no_spinach"];

/// Per-dish adjustments on top of the category defaults.
const DISH_NOTE_OVERRIDES: &[(&str, &[&str], &[&str])] = &[
    // (dish id, add, remove)
    ("pork_ramyun", &["no_onions", "no_carrots", "more_meat"], &[]),
    ("chicken_ramyun", &["no_pepper", "more_meat"], &[]),
    ("original_ramyun", &[], &[]),
    ("cheese_ramyun", &["vegan"], &[]),
    ("seafood_ramyun", &["no_squid", "no_octopus", "no_clams"], &[]),
    ("kimchi_ramyun", &["vegan"], &[]),
    (
        "tofu_ramyun",
        &["vegan", "add_pok_choi", "no_zucchini", "more_zucchini", "more_veggies"],
        &[],
    ),
    ("beef_gimbap", &["no_carrots", "no_onions", "more_meat"], &[]),
    ("tuna_gimbap", &["no_onions"], &[]),
    ("spicy_tuna_gimbap", &["less_spicy", "more_spicy", "no_onions"], &[]),
    ("sausage_gimbap", &["more_meat", "no_onions", "no_carrots"], &[]),
    ("mushroom_gimbap", &["no_onions", "no_carrots"], &[]),
    ("salad_gimbap", &[], &[]),
    ("tteokbokki", &["more_cream", "more_cheese", "no_spring_onion"], &[]),
    ("tofu_gimbap", &[], &[]),
];

/// Resolve which predefined notes apply to a dish: category defaults, minus
/// per-dish removals, plus per-dish additions, duplicates dropped.
pub fn available_notes(dish: &Dish) -> Vec<&'static NoteDef> {
    let defaults: &[&str] = match dish.category {
        Category::Ramyun => RAMYUN_DEFAULT_NOTES,
        Category::Gimbap => GIMBAP_DEFAULT_NOTES,
        Category::SideDish | Category::Untagged => &[],
    };
    let mut ids: Vec<&str> = defaults.to_vec();
    if let Some((_, add, remove)) = DISH_NOTE_OVERRIDES.iter().find(|(id, _, _)| *id == dish.id) {
        ids.retain(|id| !remove.contains(id));
        for id in *add {
            if !ids.contains(id) {
                ids.push(id);
            }
        }
    }
    ids.iter().filter_map(|id| note(id)).collect()
}

/// Receipt symbol overrides for the spice-level notes.
pub static NOTE_PRINT_SPICY_SYMBOLS: &[(&str, &str)] = &[
    ("less_spicy", "☆"),
    ("less_less_spicy", "☆☆"),
    ("more_spicy", "♥"),
    ("more_more_spicy", "♥♥"),
];

/// Note-id prefix to receipt symbol, applied when no spicy override matches.
pub static NOTE_PRINT_PREFIX_SYMBOLS: &[(&str, &str)] =
    &[("no_", "x"), ("less_", "-"), ("more_", "+"), ("add_", "^")];
