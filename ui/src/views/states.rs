use dioxus::prelude::*;

use crate::core::classify::bucket_color;
use crate::core::table::MetricTable;
use crate::t;

/// Full table, with the stored risk label next to the threshold-derived one.
#[component]
pub fn StatesPage() -> Element {
    let _lang = try_use_context::<Signal<String>>().map(|code| code());

    let table = MetricTable::sample();
    let mismatches = table.discrepancies().len();

    rsx! {
        section { class: "page page-states",
            h1 { {t!("states-title")} }
            p { {t!("states-intro")} }
            if mismatches > 0 {
                p { class: "states-table__note", {t!("states-mismatch-note", count = mismatches)} }
            }

            table { class: "states-table",
                thead {
                    tr {
                        th { {t!("states-col-state")} }
                        th { "IFI" }
                        th { "CLCR" }
                        th { "TAES" }
                        th { "Composite" }
                        th { {t!("states-col-region")} }
                        th { {t!("states-col-stored")} }
                        th { {t!("states-col-derived")} }
                    }
                }
                tbody {
                    for row in table.rows() {
                        {
                            let derived = row.derived_risk();
                            let mismatch = derived != row.risk;
                            let swatch = format!("background:{}", bucket_color(derived));
                            let row_class = if mismatch {
                                "states-table__row states-table__row--mismatch"
                            } else {
                                "states-table__row"
                            };
                            rsx! {
                                tr { key: "{row.name}", class: row_class,
                                    td { "{row.name}" }
                                    td { "{row.ifi:.1}" }
                                    td { "{row.clcr:.2}" }
                                    td { "{row.taes:.2}" }
                                    td { "{row.composite:.2}" }
                                    td { "{row.region}" }
                                    td { "{row.risk}" }
                                    td {
                                        span {
                                            class: "states-table__swatch",
                                            style: "{swatch}",
                                        }
                                        "{derived}"
                                        if mismatch {
                                            span { class: "states-table__flag", title: t!("states-mismatch-flag"), " ⚑" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
