use dioxus::prelude::*;
use dioxus_logger::tracing::Level;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::views::{DashboardPage, StatesPage};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    DashboardPage {},
    #[route("/states")]
    StatesPage {},
}

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn nav_dashboard(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::DashboardPage {},
        "{label}"
    })
}
fn nav_states(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::StatesPage {},
        "{label}"
    })
}

fn main() {
    if let Err(err) = dioxus_logger::init(Level::INFO) {
        eprintln!("logger already initialised: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();
    register_nav(NavBuilder {
        dashboard: nav_dashboard,
        states: nav_states,
    });

    let lang_code = use_signal(|| ui::i18n::current_language().to_string());
    use_context_provider(|| lang_code);

    rsx! {
        document::Title { "Pulseboard" }
        document::Style { "{MAIN_CSS_INLINE}" }

        div {
            key: "{lang_code()}",
            Router::<Route> {}
        }
    }
}

/// Web router layout around the shared navbar.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar { }
        Outlet::<Route> {}
    }
}
