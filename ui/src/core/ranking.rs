//! Filtering and "lowest N" ranking over the metric table.

use crate::core::table::{Indicator, MetricTable, Region, RiskBucket, StateMetrics};

/// Conjunction of equality constraints over the categorical columns.
/// `None` means the column is unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowFilter {
    pub region: Option<Region>,
    pub risk: Option<RiskBucket>,
}

impl RowFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn region(region: Region) -> Self {
        Self {
            region: Some(region),
            risk: None,
        }
    }

    /// Build from selector keys; `"all"` or an unknown key leaves the column open.
    pub fn from_keys(region_key: &str, risk_key: &str) -> Self {
        Self {
            region: Region::from_key(region_key),
            risk: RiskBucket::from_key(risk_key),
        }
    }

    /// Matches against the *stored* risk label, never the derived one.
    pub fn matches(&self, row: &StateMetrics) -> bool {
        self.region.map_or(true, |region| row.region == region)
            && self.risk.map_or(true, |risk| row.risk == risk)
    }
}

/// Indices of every matching row, in table order.
pub fn matching(table: &MetricTable, filter: &RowFilter) -> Vec<usize> {
    table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| filter.matches(row))
        .map(|(idx, _)| idx)
        .collect()
}

/// Matching row indices sorted ascending by `indicator`, truncated to `limit`.
///
/// The sort is stable, so rows with equal values keep table order. Fewer
/// matches than `limit` returns all of them; zero matches returns an empty vec.
pub fn rank(
    table: &MetricTable,
    filter: &RowFilter,
    indicator: Indicator,
    limit: usize,
) -> Vec<usize> {
    let mut indices = matching(table, filter);
    sort_ascending(table, &mut indices, indicator);
    indices.truncate(limit);
    indices
}

/// Stable ascending sort of `indices` by the given column.
pub fn sort_ascending(table: &MetricTable, indices: &mut [usize], indicator: Indicator) {
    let value = |idx: usize| {
        table
            .row(idx)
            .map(|row| row.value(indicator))
            .unwrap_or(f64::INFINITY)
    };
    indices.sort_by(|&a, &b| value(a).total_cmp(&value(b)));
}
