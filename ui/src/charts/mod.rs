//! Chart models and their SVG rendering.

pub mod series;
pub mod svg;

pub use series::{
    comparison_chart, equity_chart, gap_chart, ranked_chart, volume_chart, BarChart, BarStyle,
    ChartSeries, Orientation, RadarChart, RadarDataset, TickFormat, TooltipTemplate,
};
pub use svg::{render_bar_chart, render_radar_chart, PlotArea, PostRender, ThresholdMarker};
