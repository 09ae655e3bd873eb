//! Catalog search matching.
//!
//! Matching is case- and punctuation-insensitive: both the query and every
//! candidate (base name plus declared aliases) are normalized by lowercasing
//! and dropping non-alphanumeric characters before a contiguous-substring
//! check. `"st"`, `"stuna"` and `"s-tuna"` all resolve S.Tuna Gimbap.

use crate::catalog::{self, Category, Dish};

/// Lowercase and strip everything that is not alphanumeric.
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn matches(query_norm: &str, dish: &Dish) -> bool {
    if normalize(dish.base_name).contains(query_norm) {
        return true;
    }
    dish.aliases
        .iter()
        .any(|alias| normalize(alias).contains(query_norm))
}

/// Resolve a free-text query against one category menu.
///
/// Results keep catalog declaration order (stable tie-break). An empty or
/// all-punctuation query yields the full category list. Restartable per
/// keystroke; never mutates the catalog.
pub fn search(category: Category, query: &str) -> Vec<&'static Dish> {
    let query_norm = normalize(query);
    if query_norm.is_empty() {
        return catalog::dishes(category).collect();
    }
    catalog::dishes(category)
        .filter(|dish| matches(&query_norm, dish))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(results: &[&Dish]) -> Vec<&'static str> {
        results.iter().map(|d| d.id).collect()
    }

    #[test]
    fn test_empty_query_lists_whole_category() {
        let results = search(Category::Gimbap, "");
        assert_eq!(results.len(), 7);
        assert_eq!(results[0].id, "beef_gimbap");
    }

    #[test]
    fn test_literal_substring_match() {
        let results = search(Category::Gimbap, "tuna");
        assert_eq!(ids(&results), vec!["tuna_gimbap", "spicy_tuna_gimbap"]);
    }

    #[test]
    fn test_shorthand_alias_resolution() {
        // "st" resolves via the declared shorthand, independent of the
        // punctuation in "S.Tuna Gimbap".
        for query in ["st", "stuna", "s-tuna", "ST", "s.t"] {
            let results = search(Category::Gimbap, query);
            assert!(
                results.iter().any(|d| d.id == "spicy_tuna_gimbap"),
                "query {query:?} should match spicy tuna"
            );
        }
    }

    #[test]
    fn test_case_insensitive() {
        let results = search(Category::Ramyun, "CHIX");
        assert_eq!(ids(&results), vec!["chicken_ramyun"]);
    }

    #[test]
    fn test_no_cross_category_results() {
        // tofu exists in both menus; each search stays within its category.
        assert_eq!(ids(&search(Category::Gimbap, "tofu")), vec!["tofu_gimbap"]);
        assert_eq!(ids(&search(Category::Ramyun, "tofu")), vec!["tofu_ramyun"]);
    }

    #[test]
    fn test_unmatched_query_is_empty() {
        assert!(search(Category::SideDish, "zzz").is_empty());
    }

    #[test]
    fn test_declaration_order_is_stable() {
        let results = search(Category::SideDish, "i");
        let all: Vec<&str> = catalog::dishes(Category::SideDish).map(|d| d.id).collect();
        let mut last = 0;
        for dish in results {
            let pos = all.iter().position(|id| *id == dish.id).unwrap();
            assert!(pos >= last);
            last = pos;
        }
    }
}
