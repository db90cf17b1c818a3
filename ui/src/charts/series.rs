//! Presentation adapter: ranked, classified rows → chart models.
//!
//! Nothing here keeps state. Each builder takes the table plus an ordered list
//! of row indices (from [`crate::core::ranking`]) and produces labels, values
//! and colours together with the static style for one chart.

use crate::core::classify::{
    self, bucket_color, classify_display, display_value, equity_color, gap_color, palette,
    risk_label,
};
use crate::core::compare;
use crate::core::format::{format_millions, format_percent};
use crate::core::table::{Indicator, MetricTable, ACTIVITY_VOLUMES};

use super::svg::ThresholdMarker;

/// Parallel label / value / colour arrays for one dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<String>,
}

impl ChartSeries {
    pub fn push(&mut self, label: impl Into<String>, value: f64, color: &str) {
        self.labels.push(label.into());
        self.values.push(value);
        self.colors.push(color.to_string());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Categories down the left edge, values along x.
    Horizontal,
    /// Categories along the bottom, values up y.
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFormat {
    Plain,
    Millions,
    Percent,
}

impl TickFormat {
    pub fn format(self, value: f64) -> String {
        let rounded = (value * 100.0).round() / 100.0;
        match self {
            TickFormat::Plain => format!("{rounded}"),
            TickFormat::Millions => format_millions(rounded),
            TickFormat::Percent => format_percent(rounded),
        }
    }
}

/// Per-bar hover text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipTemplate {
    /// `IFI: 17.8` plus the risk line.
    Ranked(Indicator),
    /// `23.2M records`
    Volume,
    /// `{dataset}: 0.57`
    Plain,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarStyle {
    pub orientation: Orientation,
    /// Upper end of the value axis; `None` picks a round number above the data.
    pub value_max: Option<f64>,
    pub tick_format: TickFormat,
    pub tooltip: TooltipTemplate,
    pub rotate_labels: bool,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub dataset_label: String,
    pub series: ChartSeries,
    pub style: BarStyle,
    /// Reference line painted after the bars.
    pub marker: Option<ThresholdMarker>,
}

impl BarChart {
    pub fn tooltip(&self, index: usize) -> String {
        let value = self.series.values.get(index).copied().unwrap_or_default();
        match self.style.tooltip {
            TooltipTemplate::Ranked(indicator) => format!(
                "{}: {value:.1}\n{}",
                indicator.short_label(),
                risk_label(classify_display(value, indicator))
            ),
            TooltipTemplate::Volume => format!("{value:.1}M records"),
            TooltipTemplate::Plain => format!("{}: {value:.2}", self.dataset_label),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarDataset {
    pub label: String,
    pub values: [f64; 4],
    pub stroke: &'static str,
    pub fill: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarChart {
    pub axes: [&'static str; 4],
    pub datasets: Vec<RadarDataset>,
}

/// Ranked freshness bars for `indices` measured by `indicator`.
///
/// Unit-scale metrics are plotted ×100 on a 0–100 axis; the IFI reference
/// marker only applies when ranking by IFI itself.
pub fn ranked_chart(
    table: &MetricTable,
    indices: &[usize],
    indicator: Indicator,
    national_average: f64,
) -> BarChart {
    let mut series = ChartSeries::default();
    for row in indices.iter().filter_map(|&idx| table.row(idx)) {
        let shown = display_value(row.value(indicator), indicator);
        series.push(
            row.name.clone(),
            shown,
            bucket_color(classify_display(shown, indicator)),
        );
    }

    let (value_max, marker) = if indicator.is_primary() {
        (
            classify::IFI_MAX,
            Some(ThresholdMarker {
                value: national_average,
                label: format!("National Avg: {national_average}"),
                color: palette::CRITICAL,
            }),
        )
    } else {
        (classify::DISPLAY_PERCENT, None)
    };

    BarChart {
        dataset_label: format!("{} Score", indicator.key().to_uppercase()),
        series,
        style: BarStyle {
            orientation: Orientation::Horizontal,
            value_max: Some(value_max),
            tick_format: TickFormat::Plain,
            tooltip: TooltipTemplate::Ranked(indicator),
            rotate_labels: false,
            title: None,
        },
        marker,
    }
}

/// Static enrolment / update volumes.
pub fn volume_chart() -> BarChart {
    let mut series = ChartSeries::default();
    for volume in ACTIVITY_VOLUMES {
        series.push(volume.label, volume.millions, volume.color);
    }
    BarChart {
        dataset_label: "Volume (Millions)".to_string(),
        series,
        style: BarStyle {
            orientation: Orientation::Vertical,
            value_max: None,
            tick_format: TickFormat::Millions,
            tooltip: TooltipTemplate::Volume,
            rotate_labels: false,
            title: None,
        },
        marker: None,
    }
}

/// Distance from full child capture (`1 - clcr`) for the lowest-capture states.
pub fn gap_chart(table: &MetricTable, indices: &[usize]) -> BarChart {
    let mut series = ChartSeries::default();
    for row in indices.iter().filter_map(|&idx| table.row(idx)) {
        let gap = 1.0 - row.clcr;
        series.push(row.name.clone(), gap, gap_color(gap));
    }
    BarChart {
        dataset_label: "Gap from Target".to_string(),
        series,
        style: BarStyle {
            orientation: Orientation::Vertical,
            value_max: Some(1.1),
            tick_format: TickFormat::Percent,
            tooltip: TooltipTemplate::Plain,
            rotate_labels: true,
            title: Some("Gap from 1.0 CLCR Target (Lower = Better)".to_string()),
        },
        marker: None,
    }
}

/// Weekend access equity for the least equitable states, with a target line.
pub fn equity_chart(table: &MetricTable, indices: &[usize], target: f64) -> BarChart {
    let mut series = ChartSeries::default();
    for row in indices.iter().filter_map(|&idx| table.row(idx)) {
        series.push(row.name.clone(), row.taes, equity_color(row.taes));
    }
    BarChart {
        dataset_label: "TAES Score".to_string(),
        series,
        style: BarStyle {
            orientation: Orientation::Vertical,
            value_max: Some(1.0),
            tick_format: TickFormat::Plain,
            tooltip: TooltipTemplate::Plain,
            rotate_labels: true,
            title: None,
        },
        marker: Some(ThresholdMarker {
            value: target,
            label: format!("Target: {target:.2}"),
            color: palette::OPTIMAL,
        }),
    }
}

/// Two-state radar on normalised metrics.
pub fn comparison_chart(table: &MetricTable, left_key: &str, right_key: &str) -> RadarChart {
    let dataset = |key: &str, stroke: &'static str, fill: &'static str| RadarDataset {
        label: compare::display_label(table, key),
        values: compare::lookup(table, key),
        stroke,
        fill,
    };
    RadarChart {
        axes: Indicator::ALL.map(Indicator::short_label),
        datasets: vec![
            dataset(left_key, palette::HEALTHY, "rgba(67, 160, 71, 0.2)"),
            dataset(right_key, palette::CRITICAL, "rgba(229, 57, 53, 0.2)"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ranking::{rank, RowFilter};
    use crate::core::table::Region;

    #[test]
    fn ranked_chart_colours_by_derived_bucket() {
        let table = MetricTable::sample();
        let indices = rank(table, &RowFilter::all(), Indicator::Ifi, 15);
        let chart = ranked_chart(table, &indices, Indicator::Ifi, 28.2);
        assert_eq!(chart.series.len(), 15);
        assert_eq!(chart.series.labels[0], "Meghalaya");
        assert_eq!(chart.series.colors[0], palette::CRITICAL);
        // Jammu And Kashmir is stored Healthy but 24.4 colours as AtRisk.
        let jk = chart
            .series
            .labels
            .iter()
            .position(|label| label == "Jammu And Kashmir")
            .unwrap();
        assert_eq!(chart.series.colors[jk], palette::AT_RISK);
        assert_eq!(chart.dataset_label, "IFI Score");
        assert!(chart.marker.is_some());
    }

    #[test]
    fn unit_metrics_are_scaled_and_lose_the_ifi_marker() {
        let table = MetricTable::sample();
        let indices = rank(table, &RowFilter::region(Region::South), Indicator::Taes, 15);
        let chart = ranked_chart(table, &indices, Indicator::Taes, 28.2);
        assert_eq!(chart.dataset_label, "TAES Score");
        assert_eq!(chart.series.labels, vec!["Tamil Nadu", "Telangana", "Kerala", "Lakshadweep"]);
        assert!((chart.series.values[0] - 49.0).abs() < 1e-9);
        assert_eq!(chart.style.value_max, Some(100.0));
        assert!(chart.marker.is_none());
        // 0.49 * 35 = 17.15 → AtRisk; 0.62 * 35 = 21.7 → AtRisk
        assert!(chart.series.colors.iter().all(|c| c == palette::AT_RISK));
    }

    #[test]
    fn ranked_tooltip_carries_risk_line() {
        let table = MetricTable::sample();
        let indices = rank(table, &RowFilter::all(), Indicator::Ifi, 1);
        let chart = ranked_chart(table, &indices, Indicator::Ifi, 28.2);
        assert_eq!(chart.tooltip(0), "IFI: 1.6\nRisk: 🔴 Critical");
    }

    #[test]
    fn gap_values_invert_capture() {
        let table = MetricTable::sample();
        let indices = rank(table, &RowFilter::all(), Indicator::Clcr, 12);
        let chart = gap_chart(table, &indices);
        assert_eq!(chart.series.len(), 12);
        assert_eq!(chart.series.values[0], 1.0);
        assert_eq!(chart.series.colors[0], palette::CRITICAL);
        assert_eq!(chart.style.tick_format.format(0.5), "50%");
    }

    #[test]
    fn equity_chart_has_target_line() {
        let table = MetricTable::sample();
        let indices = rank(table, &RowFilter::all(), Indicator::Taes, 12);
        let chart = equity_chart(table, &indices, 0.7);
        let marker = chart.marker.as_ref().unwrap();
        assert_eq!(marker.label, "Target: 0.70");
        assert_eq!(chart.series.labels[0], "Meghalaya");
        assert_eq!(chart.series.colors[0], palette::CRITICAL);
    }

    #[test]
    fn volume_chart_is_static() {
        let chart = volume_chart();
        assert_eq!(chart.series.labels, vec!["Enrolments", "Demo Updates", "Bio Updates"]);
        assert_eq!(chart.tooltip(2), "35.6M records");
        assert_eq!(chart.style.tick_format.format(10.0), "10M");
    }

    #[test]
    fn comparison_uses_loose_lookup() {
        let table = MetricTable::sample();
        let radar = comparison_chart(table, "kerala", "maharashtra");
        assert_eq!(radar.axes, ["IFI", "CLCR", "TAES", "Composite"]);
        assert_eq!(radar.datasets[0].label, "Kerala");
        assert_eq!(radar.datasets[0].values, [31.4 / 35.0, 0.09, 0.58, 0.95]);
        assert_eq!(radar.datasets[1].label, "Maharashtra");
        assert_eq!(radar.datasets[1].values, compare::NEUTRAL);
    }
}
