//! The interactive dashboard: shared state, event loop, export and panels.

mod card;
mod events;
pub mod export;
mod panels;
mod state;

pub use card::ChartCard;
pub use events::{use_dashboard_events, DashboardEvent};
pub use export::{ExportError, ExportStatus};
pub use panels::{ComparePanel, ExportPanel, FilterPanel};
pub use state::{ChartId, ComparisonSelection, Dashboard, FilterSelection};
