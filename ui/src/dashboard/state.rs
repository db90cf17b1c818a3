//! The dashboard context: table, configuration, selections and chart models.
//!
//! One [`Dashboard`] lives in a `Signal` provided at the page root. Every
//! operation that changes a chart goes through it, so there are no free-floating
//! chart handles and each chart model has exactly one owner.

use crate::charts::{
    comparison_chart, equity_chart, gap_chart, ranked_chart, volume_chart, BarChart, RadarChart,
};
use crate::core::config::DashboardConfig;
use crate::core::ranking::{self, RowFilter};
use crate::core::table::{Indicator, MetricTable};

use super::export::{self, ExportError};

/// The five chart slots on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartId {
    Freshness,
    Volume,
    Gap,
    Equity,
    Comparison,
}

impl ChartId {
    pub const ALL: [ChartId; 5] = [
        ChartId::Freshness,
        ChartId::Volume,
        ChartId::Gap,
        ChartId::Equity,
        ChartId::Comparison,
    ];

    /// Element id of the chart body; also the stem of the PNG file name.
    pub fn dom_id(self) -> &'static str {
        match self {
            ChartId::Freshness => "ifiChart",
            ChartId::Volume => "volumeChart",
            ChartId::Gap => "clcrChart",
            ChartId::Equity => "taesChart",
            ChartId::Comparison => "comparisonChart",
        }
    }

    pub fn png_filename(self) -> String {
        format!("{}_chart.png", self.dom_id())
    }
}

/// Current state of the region / risk / metric selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub filter: RowFilter,
    pub indicator: Indicator,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            filter: RowFilter::all(),
            indicator: Indicator::Ifi,
        }
    }
}

impl FilterSelection {
    /// Parse selector keys. An unknown metric key falls back to IFI.
    pub fn from_keys(region: &str, risk: &str, metric: &str) -> Self {
        Self {
            filter: RowFilter::from_keys(region, risk),
            indicator: Indicator::from_key(metric).unwrap_or(Indicator::Ifi),
        }
    }
}

/// The two states on the comparison radar, as selector keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonSelection {
    pub left: String,
    pub right: String,
}

impl Default for ComparisonSelection {
    fn default() -> Self {
        Self {
            left: "kerala".to_string(),
            right: "meghalaya".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    table: MetricTable,
    config: DashboardConfig,
    selection: FilterSelection,
    comparison: ComparisonSelection,
    match_count: usize,
    freshness: BarChart,
    volume: BarChart,
    gap: BarChart,
    equity: BarChart,
    radar: RadarChart,
}

impl Dashboard {
    pub fn new(table: MetricTable, config: DashboardConfig) -> Self {
        let selection = FilterSelection::default();
        let comparison = ComparisonSelection::default();

        let freshness_rows = ranking::rank(
            &table,
            &selection.filter,
            selection.indicator,
            config.ranking.freshness_limit,
        );
        let match_count = ranking::matching(&table, &selection.filter).len();
        let freshness = ranked_chart(
            &table,
            &freshness_rows,
            selection.indicator,
            config.reference.national_average_ifi,
        );

        let gap_rows = ranking::rank(
            &table,
            &RowFilter::all(),
            Indicator::Clcr,
            config.ranking.gap_limit,
        );
        let gap = gap_chart(&table, &gap_rows);

        let equity_rows = ranking::rank(
            &table,
            &RowFilter::all(),
            Indicator::Taes,
            config.ranking.equity_limit,
        );
        let equity = equity_chart(&table, &equity_rows, config.reference.equity_target);

        let radar = comparison_chart(&table, &comparison.left, &comparison.right);

        tracing::debug!(rows = table.len(), "dashboard initialised");

        Self {
            table,
            config,
            selection,
            comparison,
            match_count,
            freshness,
            volume: volume_chart(),
            gap,
            equity,
            radar,
        }
    }

    /// Dashboard over the embedded table and configuration.
    pub fn embedded() -> Self {
        Self::new(MetricTable::sample().clone(), DashboardConfig::embedded())
    }

    /// Re-rank the freshness chart. Returns how many rows matched the filter
    /// before truncation; zero leaves an empty chart.
    pub fn apply_filters(&mut self, selection: FilterSelection) -> usize {
        let matches = ranking::matching(&self.table, &selection.filter).len();
        let rows = ranking::rank(
            &self.table,
            &selection.filter,
            selection.indicator,
            self.config.ranking.freshness_limit,
        );
        self.freshness = ranked_chart(
            &self.table,
            &rows,
            selection.indicator,
            self.config.reference.national_average_ifi,
        );
        self.selection = selection;
        self.match_count = matches;
        tracing::info!(
            matches,
            shown = rows.len(),
            metric = selection.indicator.key(),
            "filters applied"
        );
        matches
    }

    pub fn compare(&mut self, left_key: &str, right_key: &str) {
        self.radar = comparison_chart(&self.table, left_key, right_key);
        self.comparison = ComparisonSelection {
            left: left_key.to_string(),
            right: right_key.to_string(),
        };
    }

    pub fn export_csv(&self) -> Result<String, ExportError> {
        export::build_csv(&self.table)
    }

    pub fn svg_for(&self, chart: ChartId) -> String {
        match chart {
            ChartId::Freshness => self.freshness.to_svg(),
            ChartId::Volume => self.volume.to_svg(),
            ChartId::Gap => self.gap.to_svg(),
            ChartId::Equity => self.equity.to_svg(),
            ChartId::Comparison => self.radar.to_svg(),
        }
    }

    pub fn bar_chart(&self, chart: ChartId) -> Option<&BarChart> {
        match chart {
            ChartId::Freshness => Some(&self.freshness),
            ChartId::Volume => Some(&self.volume),
            ChartId::Gap => Some(&self.gap),
            ChartId::Equity => Some(&self.equity),
            ChartId::Comparison => None,
        }
    }

    pub fn radar(&self) -> &RadarChart {
        &self.radar
    }

    pub fn table(&self) -> &MetricTable {
        &self.table
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn selection(&self) -> FilterSelection {
        self.selection
    }

    pub fn comparison(&self) -> &ComparisonSelection {
        &self.comparison
    }

    pub fn match_count(&self) -> usize {
        self.match_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compare::NEUTRAL;
    use crate::core::table::Region;

    fn dashboard() -> Dashboard {
        Dashboard::new(MetricTable::sample().clone(), DashboardConfig::default())
    }

    #[test]
    fn initial_charts_follow_config_limits() {
        let dash = dashboard();
        assert_eq!(dash.bar_chart(ChartId::Freshness).unwrap().series.len(), 15);
        assert_eq!(dash.bar_chart(ChartId::Gap).unwrap().series.len(), 12);
        assert_eq!(dash.bar_chart(ChartId::Equity).unwrap().series.len(), 12);
        assert_eq!(dash.bar_chart(ChartId::Volume).unwrap().series.len(), 3);
        assert_eq!(dash.match_count(), 22);
        assert_eq!(dash.radar().datasets[0].label, "Kerala");
        assert_eq!(dash.radar().datasets[1].label, "Meghalaya");
    }

    #[test]
    fn apply_filters_reranks_freshness_only() {
        let mut dash = dashboard();
        let gap_before = dash.bar_chart(ChartId::Gap).cloned();
        let count = dash.apply_filters(FilterSelection::from_keys("northeast", "all", "ifi"));
        assert_eq!(count, 6);
        let freshness = dash.bar_chart(ChartId::Freshness).unwrap();
        assert_eq!(freshness.series.labels[0], "Meghalaya");
        assert_eq!(freshness.series.labels[5], "Mizoram");
        assert_eq!(dash.bar_chart(ChartId::Gap).cloned(), gap_before);
        assert_eq!(dash.selection().filter, RowFilter::region(Region::Northeast));
    }

    #[test]
    fn zero_matches_leave_an_empty_chart() {
        let mut dash = dashboard();
        let count = dash.apply_filters(FilterSelection::from_keys("west", "optimal", "composite"));
        assert_eq!(count, 0);
        assert!(dash.bar_chart(ChartId::Freshness).unwrap().series.is_empty());
        assert!(dash.svg_for(ChartId::Freshness).starts_with("<svg"));
    }

    #[test]
    fn unknown_metric_key_ranks_by_ifi() {
        let selection = FilterSelection::from_keys("all", "all", "velocity");
        assert_eq!(selection.indicator, Indicator::Ifi);
    }

    #[test]
    fn compare_updates_radar_and_selection() {
        let mut dash = dashboard();
        dash.compare("tamil-nadu", "unknown-place");
        assert_eq!(dash.radar().datasets[0].label, "Tamil Nadu");
        assert_eq!(dash.radar().datasets[1].values, NEUTRAL);
        assert_eq!(dash.comparison().right, "unknown-place");
    }

    #[test]
    fn every_chart_renders() {
        let dash = dashboard();
        for chart in ChartId::ALL {
            let svg = dash.svg_for(chart);
            assert!(svg.starts_with("<svg") && svg.ends_with("</svg>"), "{chart:?}");
        }
        assert_eq!(ChartId::Freshness.png_filename(), "ifiChart_chart.png");
    }
}
