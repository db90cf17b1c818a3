use dioxus::prelude::*;

use crate::core::platform::Platform;
use crate::t;

use super::events::DashboardEvent;
use super::state::{ChartId, Dashboard};

/// A titled chart with PNG download and fullscreen actions.
#[component]
pub fn ChartCard(chart: ChartId, title: String, #[props(default)] subtitle: String) -> Element {
    let dashboard = use_context::<Signal<Dashboard>>();
    let events = use_coroutine_handle::<DashboardEvent>();

    let svg = dashboard.read().svg_for(chart);
    let wide = matches!(chart, ChartId::Freshness);
    let card_class = if wide {
        "chart-card chart-card--wide"
    } else {
        "chart-card"
    };
    let fullscreen = Platform::current().supports_fullscreen();

    rsx! {
        article { class: "{card_class}",
            div { class: "chart-card__header",
                div {
                    h3 { class: "chart-card__title", "{title}" }
                    if !subtitle.is_empty() {
                        p { class: "chart-card__subtitle", "{subtitle}" }
                    }
                }
                div { class: "chart-card__actions",
                    button {
                        r#type: "button",
                        class: "button button--ghost",
                        title: t!("chart-download"),
                        onclick: move |_| events.send(DashboardEvent::DownloadChart(chart)),
                        "⬇"
                    }
                    if fullscreen {
                        button {
                            r#type: "button",
                            class: "button button--ghost",
                            title: t!("chart-fullscreen"),
                            onclick: move |_| events.send(DashboardEvent::ToggleFullscreen(chart)),
                            "⛶"
                        }
                    }
                }
            }
            div {
                id: chart.dom_id(),
                class: "chart-card__body",
                dangerous_inner_html: "{svg}",
            }
        }
    }
}
