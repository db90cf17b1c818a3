//! End-to-end scenarios over the embedded data set.

use ui::charts::svg::render_bar_chart;
use ui::core::classify::{self, palette};
use ui::core::compare::{self, NEUTRAL};
use ui::core::config::DashboardConfig;
use ui::core::ranking::{rank, RowFilter};
use ui::core::table::{Indicator, MetricTable, Region};
use ui::dashboard::{ChartId, Dashboard, FilterSelection};
use ui::kpi::KpiAnimation;

fn names(table: &MetricTable, indices: &[usize]) -> Vec<String> {
    indices
        .iter()
        .map(|&idx| table.row(idx).unwrap().name.clone())
        .collect()
}

#[test]
fn northeast_ranking_keeps_the_four_named_states_in_order() {
    let table = MetricTable::sample();
    let ranked = names(
        table,
        &rank(table, &RowFilter::region(Region::Northeast), Indicator::Ifi, 15),
    );
    let position = |name: &str| ranked.iter().position(|n| n == name).unwrap();
    assert!(position("Meghalaya") < position("Assam"));
    assert!(position("Assam") < position("Nagaland"));
    assert!(position("Nagaland") < position("Mizoram"));
    assert_eq!(ranked.len(), 6);
}

#[test]
fn comparison_lookup_scenarios() {
    let table = MetricTable::sample();
    let tn = compare::lookup(table, "tamil-nadu");
    assert!((tn[0] - 31.3 / classify::IFI_MAX).abs() < 1e-12);
    assert_eq!(&tn[1..], &[0.16, 0.49, 0.93]);
    assert_eq!(compare::lookup(table, "unknown-place"), NEUTRAL);
}

#[test]
fn filtering_by_stored_critical_label() {
    let mut dash = Dashboard::new(MetricTable::sample().clone(), DashboardConfig::default());
    let count = dash.apply_filters(FilterSelection::from_keys("all", "critical", "ifi"));
    assert_eq!(count, 3);
    let chart = dash.bar_chart(ChartId::Freshness).unwrap();
    assert_eq!(chart.series.labels, vec!["Meghalaya", "Assam", "Nagaland"]);
    assert!(chart.series.colors.iter().all(|c| c == palette::CRITICAL));
}

#[test]
fn freshness_svg_carries_the_reference_line_after_the_bars() {
    let dash = Dashboard::new(MetricTable::sample().clone(), DashboardConfig::default());
    let svg = dash.svg_for(ChartId::Freshness);
    let bars = svg.find("chart-bars").unwrap();
    let marker = svg.find("chart-marker").unwrap();
    assert!(marker > bars);
    assert!(svg.contains("National Avg: 28.2"));

    let chart = dash.bar_chart(ChartId::Freshness).unwrap();
    assert!(!render_bar_chart(chart, None).contains("chart-marker"));
}

#[test]
fn configured_kpis_end_on_their_exact_values() {
    let config = DashboardConfig::default();
    let expected = [
        ("kpi-records", "5M+"),
        ("kpi-dbt", "₹6,000 Cr"),
        ("kpi-critical", "8"),
        ("kpi-ifi", "28.2"),
    ];
    for (id, text) in expected {
        let kpi = config.kpi(id).unwrap();
        let animation = KpiAnimation::from_config(kpi, Default::default());
        let last = animation.frame(kpi.duration_ms);
        assert!(last.done);
        assert_eq!(last.text, text, "{id}");
        assert_eq!(animation.value_at(kpi.duration_ms + 1.0), kpi.end);
    }
}
