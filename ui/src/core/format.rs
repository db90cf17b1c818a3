//! Number formatting for KPI tiles, axis ticks and tooltips.

/// Digit grouping convention for whole numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Grouping {
    /// `1,234,567`
    #[default]
    Western,
    /// `12,34,567` (lakh / crore)
    Indian,
}

/// Round to the nearest integer (half away from zero) and group digits.
pub fn format_grouped(value: f64, grouping: Grouping) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let grouped = match grouping {
        Grouping::Western => group_digits(&digits, 3, 3),
        Grouping::Indian => group_digits(&digits, 3, 2),
    };
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Insert commas: the last `first` digits form one group, the rest `rest`.
fn group_digits(digits: &str, first: usize, rest: usize) -> String {
    if digits.len() <= first {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - first);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(rest);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}

pub fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// `0.35` → `35%`
pub fn format_percent(value: f64) -> String {
    if value.is_finite() {
        format!("{:.0}%", value * 100.0)
    } else {
        "—".to_string()
    }
}

/// Axis tick for the volume chart.
pub fn format_millions(value: f64) -> String {
    format!("{value}M")
}
