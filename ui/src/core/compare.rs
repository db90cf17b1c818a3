//! Loose state lookup for the side-by-side comparison radar.

use crate::core::classify::normalize;
use crate::core::table::{Indicator, MetricTable};

/// Tuple returned when a comparison selection does not resolve to a row.
pub const NEUTRAL: [f64; 4] = [0.5, 0.5, 0.5, 0.5];

/// Selector keys offered in the comparison dropdowns, with display labels.
/// Not every choice exists in the table (Maharashtra renders as neutral).
pub const COMPARE_CHOICES: [(&str, &str); 7] = [
    ("kerala", "Kerala"),
    ("tamil-nadu", "Tamil Nadu"),
    ("maharashtra", "Maharashtra"),
    ("uttar-pradesh", "Uttar Pradesh"),
    ("meghalaya", "Meghalaya"),
    ("assam", "Assam"),
    ("bihar", "Bihar"),
];

/// Case-folded name with hyphens and runs of whitespace collapsed to one space.
pub fn loose_key(name: &str) -> String {
    name.split(|c: char| c == '-' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalised `(ifi, clcr, taes, composite)` for `name`, or [`NEUTRAL`].
pub fn lookup(table: &MetricTable, name: &str) -> [f64; 4] {
    match table.find(name) {
        Some(row) => Indicator::ALL.map(|indicator| normalize(row.value(indicator), indicator)),
        None => {
            tracing::debug!(name, "comparison lookup did not resolve; using neutral tuple");
            NEUTRAL
        }
    }
}

/// Label for a selector key: fixed choice label, then row name, then the key.
pub fn display_label(table: &MetricTable, key: &str) -> String {
    COMPARE_CHOICES
        .iter()
        .find(|(choice, _)| *choice == key)
        .map(|(_, label)| (*label).to_string())
        .or_else(|| table.find(key).map(|row| row.name.clone()))
        .unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loose_keys_ignore_case_and_separators() {
        assert_eq!(loose_key("Tamil Nadu"), "tamil nadu");
        assert_eq!(loose_key("tamil-nadu"), "tamil nadu");
        assert_eq!(loose_key("  JAMMU-And  Kashmir "), "jammu and kashmir");
    }

    #[test]
    fn resolves_hyphenated_keys() {
        let table = MetricTable::sample();
        let tuple = lookup(table, "tamil-nadu");
        assert_eq!(tuple, [31.3 / 35.0, 0.16, 0.49, 0.93]);
        assert_eq!(lookup(table, "TAMIL NADU"), tuple);
    }

    #[test]
    fn unknown_names_are_neutral() {
        let table = MetricTable::sample();
        assert_eq!(lookup(table, "unknown-place"), NEUTRAL);
        assert_eq!(lookup(table, "maharashtra"), NEUTRAL);
        assert_eq!(lookup(&MetricTable::default(), "kerala"), NEUTRAL);
    }

    #[test]
    fn labels_fall_back_in_order() {
        let table = MetricTable::sample();
        assert_eq!(display_label(table, "maharashtra"), "Maharashtra");
        assert_eq!(display_label(table, "west-bengal"), "West Bengal");
        assert_eq!(display_label(table, "unknown-place"), "unknown-place");
    }
}
