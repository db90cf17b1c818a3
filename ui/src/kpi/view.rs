use dioxus::prelude::*;

use crate::core::config::DashboardConfig;
use crate::core::format::Grouping;
use crate::core::platform;
use crate::dashboard::Dashboard;
use crate::i18n;
use crate::t;

use super::{animate, KpiAnimation, KpiTarget};

impl KpiTarget for Signal<String> {
    fn set_text(&mut self, text: String) {
        self.set(text);
    }
}

/// Card label for a configured KPI id. Ids without a card have no target.
fn kpi_label(id: &str) -> Option<String> {
    match id {
        "kpi-records" => Some(t!("kpi-records")),
        "kpi-dbt" => Some(t!("kpi-dbt")),
        "kpi-critical" => Some(t!("kpi-critical")),
        "kpi-ifi" => Some(t!("kpi-ifi")),
        _ => None,
    }
}

/// `(id, label, animation)` for every configured KPI that has a card.
/// Ids without a label are skipped.
fn card_specs(
    config: &DashboardConfig,
    grouping: Grouping,
) -> Vec<(String, String, KpiAnimation)> {
    config
        .kpis
        .iter()
        .filter_map(|kpi| {
            let label = kpi_label(&kpi.id)?;
            Some((kpi.id.clone(), label, KpiAnimation::from_config(kpi, grouping)))
        })
        .collect()
}

#[component]
pub fn KpiStrip() -> Element {
    let dashboard = use_context::<Signal<Dashboard>>();
    // Re-render on language change so labels and grouping follow it.
    let _lang = try_use_context::<Signal<String>>().map(|code| code());
    let grouping = i18n::number_grouping();

    let cards = card_specs(dashboard.peek().config(), grouping);

    rsx! {
        section { class: "kpi-strip",
            for (id, label, animation) in cards {
                KpiCard { key: "{id}", id: id.clone(), label, animation }
            }
        }
    }
}

#[component]
fn KpiCard(id: String, label: String, animation: KpiAnimation) -> Element {
    let text = use_signal(|| animation.render(animation.start));

    use_hook(move || {
        platform::spawn_future(animate(animation, Some(text)));
    });

    rsx! {
        div { class: "kpi-card",
            span { id: "{id}", class: "kpi-card__value", "{text}" }
            span { class: "kpi-card__label", "{label}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_known_ids_get_cards() {
        i18n::init();
        assert!(kpi_label("kpi-records").is_some());
        assert!(kpi_label("kpi-ifi").is_some());
        assert!(kpi_label("kpi-unknown").is_none());
    }

    #[test]
    fn unlabelled_kpis_get_no_card() {
        i18n::init();
        let mut config = DashboardConfig::default();
        let mut extra = config.kpis[0].clone();
        extra.id = "kpi-unknown".into();
        config.kpis.push(extra);

        let ids: Vec<_> = card_specs(&config, Grouping::Western)
            .into_iter()
            .map(|(id, _, _)| id)
            .collect();
        assert_eq!(ids, ["kpi-records", "kpi-dbt", "kpi-critical", "kpi-ifi"]);
    }
}
