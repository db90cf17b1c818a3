//! Routed pages.

mod dashboard;
mod states;

pub use dashboard::DashboardPage;
pub use states::StatesPage;
