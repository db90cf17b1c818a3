use dioxus::prelude::*;
use futures_util::StreamExt;

use super::export::{self, ExportStatus};
use super::state::{ChartId, Dashboard, FilterSelection};

/// Everything the dashboard page reacts to. Sent through one coroutine so
/// events are processed one at a time in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    ApplyFilters(FilterSelection),
    Compare { left: String, right: String },
    ExportCsv,
    CopyCsv,
    DownloadChart(ChartId),
    ToggleFullscreen(ChartId),
}

/// Start the page's event loop. Child components reach it with
/// `use_coroutine_handle::<DashboardEvent>()`.
pub fn use_dashboard_events(
    dashboard: Signal<Dashboard>,
    status: Signal<ExportStatus>,
) -> Coroutine<DashboardEvent> {
    use_coroutine(move |mut rx: UnboundedReceiver<DashboardEvent>| {
        let mut dashboard_signal = dashboard;
        let mut status_signal = status;

        async move {
            while let Some(event) = rx.next().await {
                #[cfg(debug_assertions)]
                tracing::trace!(?event, "dashboard event");

                match event {
                    DashboardEvent::ApplyFilters(selection) => {
                        dashboard_signal.with_mut(|dash| dash.apply_filters(selection));
                    }
                    DashboardEvent::Compare { left, right } => {
                        dashboard_signal.with_mut(|dash| dash.compare(&left, &right));
                    }
                    DashboardEvent::ExportCsv => {
                        status_signal.set(ExportStatus::Working("Preparing CSV"));
                        let (csv, filename) = dashboard_signal.with(|dash| {
                            (dash.export_csv(), dash.config().export.csv_filename.clone())
                        });
                        let outcome = match csv {
                            Ok(csv) => export::export_csv(csv, &filename).await,
                            Err(err) => Err(err),
                        };
                        status_signal.set(ExportStatus::from_outcome(outcome));
                    }
                    DashboardEvent::CopyCsv => {
                        status_signal.set(ExportStatus::Working("Copying CSV"));
                        let csv = dashboard_signal.with(|dash| dash.export_csv());
                        let outcome = match csv {
                            Ok(csv) => export::copy_csv(csv).await,
                            Err(err) => Err(err),
                        };
                        status_signal.set(ExportStatus::from_outcome(outcome));
                    }
                    DashboardEvent::DownloadChart(chart) => {
                        status_signal.set(ExportStatus::Working("Rendering PNG"));
                        let svg = dashboard_signal.with(|dash| dash.svg_for(chart));
                        let outcome =
                            export::export_chart_png(svg, &chart.png_filename()).await;
                        status_signal.set(ExportStatus::from_outcome(outcome));
                    }
                    DashboardEvent::ToggleFullscreen(chart) => {
                        export::toggle_fullscreen(chart.dom_id());
                    }
                }
            }
        }
    })
}
