use dioxus::prelude::*;

use crate::core::compare::COMPARE_CHOICES;
use crate::core::table::{Indicator, Region, RiskBucket};
use crate::t;

use super::events::DashboardEvent;
use super::export::ExportStatus;
use super::state::{Dashboard, FilterSelection};

/// Region / risk / metric selectors feeding the freshness ranking.
#[component]
pub fn FilterPanel() -> Element {
    let dashboard = use_context::<Signal<Dashboard>>();
    let events = use_coroutine_handle::<DashboardEvent>();

    let mut region = use_signal(|| "all".to_string());
    let mut risk = use_signal(|| "all".to_string());
    let mut metric = use_signal(|| Indicator::Ifi.key().to_string());

    let matches = dashboard.read().match_count();

    rsx! {
        section { class: "panel filter-panel",
            div { class: "filter-panel__group",
                label { r#for: "region-filter", {t!("filter-region")} }
                select {
                    id: "region-filter",
                    value: "{region}",
                    onchange: move |evt| region.set(evt.value()),
                    option { value: "all", {t!("filter-all-regions")} }
                    for r in Region::ALL {
                        option { key: "{r.key()}", value: r.key(), "{r}" }
                    }
                }
            }
            div { class: "filter-panel__group",
                label { r#for: "risk-filter", {t!("filter-risk")} }
                select {
                    id: "risk-filter",
                    value: "{risk}",
                    onchange: move |evt| risk.set(evt.value()),
                    option { value: "all", {t!("filter-all-levels")} }
                    for bucket in RiskBucket::ALL {
                        option { key: "{bucket.key()}", value: bucket.key(), "{bucket}" }
                    }
                }
            }
            div { class: "filter-panel__group",
                label { r#for: "metric-filter", {t!("filter-metric")} }
                select {
                    id: "metric-filter",
                    value: "{metric}",
                    onchange: move |evt| metric.set(evt.value()),
                    for indicator in Indicator::ALL {
                        option {
                            key: "{indicator.key()}",
                            value: indicator.key(),
                            "{indicator.short_label()}"
                        }
                    }
                }
            }
            button {
                r#type: "button",
                class: "button button--primary",
                onclick: move |_| {
                    let selection = FilterSelection::from_keys(&region(), &risk(), &metric());
                    events.send(DashboardEvent::ApplyFilters(selection));
                },
                {t!("filter-apply")}
            }
            p { class: "filter-panel__feedback", {t!("filter-matches", count = matches)} }
        }
    }
}

/// Two state selectors and a Compare button for the radar.
#[component]
pub fn ComparePanel() -> Element {
    let dashboard = use_context::<Signal<Dashboard>>();
    let events = use_coroutine_handle::<DashboardEvent>();

    let initial = dashboard.peek().comparison().clone();
    let mut left = use_signal(|| initial.left.clone());
    let mut right = use_signal(|| initial.right.clone());

    rsx! {
        div { class: "compare-panel",
            select {
                id: "state1-select",
                value: "{left}",
                onchange: move |evt| left.set(evt.value()),
                for (key, label) in COMPARE_CHOICES {
                    option { key: "{key}", value: key, "{label}" }
                }
            }
            span { class: "compare-panel__vs", "vs" }
            select {
                id: "state2-select",
                value: "{right}",
                onchange: move |evt| right.set(evt.value()),
                for (key, label) in COMPARE_CHOICES {
                    option { key: "{key}", value: key, "{label}" }
                }
            }
            button {
                r#type: "button",
                class: "button button--accent",
                onclick: move |_| {
                    events.send(DashboardEvent::Compare {
                        left: left(),
                        right: right(),
                    });
                },
                {t!("compare-button")}
            }
        }
    }
}

#[component]
pub fn ExportPanel(status: Signal<ExportStatus>) -> Element {
    let events = use_coroutine_handle::<DashboardEvent>();
    let busy = matches!(status(), ExportStatus::Working(_));

    let feedback = match status() {
        ExportStatus::Idle => None,
        ExportStatus::Working(label) => Some(("export-panel__status".to_string(), format!("{label}…"))),
        ExportStatus::Done(message) => Some((
            "export-panel__status export-panel__status--success".to_string(),
            format!("✅ {message}"),
        )),
        ExportStatus::Error(err) => Some((
            "export-panel__status export-panel__status--error".to_string(),
            format!("⚠️ {err}"),
        )),
    };

    rsx! {
        section { class: "panel export-panel",
            h2 { {t!("export-title")} }
            p { {t!("export-description")} }
            div { class: "export-panel__actions",
                button {
                    r#type: "button",
                    class: "button button--primary",
                    disabled: busy,
                    onclick: move |_| events.send(DashboardEvent::ExportCsv),
                    {t!("export-csv")}
                }
                button {
                    r#type: "button",
                    class: "button",
                    disabled: busy,
                    onclick: move |_| events.send(DashboardEvent::CopyCsv),
                    {t!("export-copy")}
                }
            }
            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", "{message}" }
            }
        }
    }
}
