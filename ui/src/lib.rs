//! Shared UI crate for Pulseboard: data pipeline, charts and views used by
//! the web and desktop launchers.

pub mod charts;
pub mod core;
pub mod dashboard;
pub mod i18n;
pub mod kpi;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}
