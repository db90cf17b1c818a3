use dioxus::prelude::*;

use crate::dashboard::{
    use_dashboard_events, ChartCard, ChartId, ComparePanel, Dashboard, ExportPanel,
    ExportStatus, FilterPanel,
};
use crate::kpi::KpiStrip;
use crate::t;

#[component]
pub fn DashboardPage() -> Element {
    // Subscribe to the global language code so labels re-render on change.
    let _lang = try_use_context::<Signal<String>>().map(|code| code());

    let dashboard = use_context_provider(|| Signal::new(Dashboard::embedded()));
    let status = use_signal(|| ExportStatus::Idle);
    use_dashboard_events(dashboard, status);

    let (gap_title, national_average) = {
        let dash = dashboard.read();
        let gap_title = dash
            .bar_chart(ChartId::Gap)
            .and_then(|chart| chart.style.title.clone())
            .unwrap_or_default();
        (gap_title, dash.config().reference.national_average_ifi)
    };

    rsx! {
        section { class: "page page-dashboard",
            div { class: "page-dashboard__header",
                h1 { {t!("dashboard-title")} }
                p { {t!("dashboard-intro")} }
            }

            KpiStrip {}
            FilterPanel {}

            div { class: "chart-grid",
                ChartCard {
                    chart: ChartId::Freshness,
                    title: t!("chart-freshness-title"),
                    subtitle: t!("chart-freshness-subtitle", average = national_average),
                }
                ChartCard {
                    chart: ChartId::Volume,
                    title: t!("chart-volume-title"),
                }
                ChartCard {
                    chart: ChartId::Gap,
                    title: t!("chart-gap-title"),
                    subtitle: gap_title,
                }
                ChartCard {
                    chart: ChartId::Equity,
                    title: t!("chart-equity-title"),
                }
                div { class: "chart-grid__compare",
                    ComparePanel {}
                    ChartCard {
                        chart: ChartId::Comparison,
                        title: t!("chart-compare-title"),
                    }
                }
            }

            ExportPanel { status }
        }
    }
}
