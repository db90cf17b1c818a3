//! Standalone SVG rendering for bar and radar charts.
//!
//! The output is a complete `<svg>` document, so the same markup is injected
//! into the page and rasterised for PNG export. Overlays are drawn through an
//! explicit [`PostRender`] hook that runs after the bars are painted.

use std::f64::consts::PI;

use super::series::{BarChart, Orientation, RadarChart, TickFormat};
use crate::core::classify::palette;

pub const BAR_WIDTH: f64 = 640.0;
pub const BAR_HEIGHT: f64 = 400.0;
pub const RADAR_SIZE: f64 = 420.0;

const FONT: &str = "Inter, 'Segoe UI', sans-serif";
const TICK_COUNT: f64 = 5.0;

/// Pixel rectangle holding the bars, plus the value→pixel mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub orientation: Orientation,
    pub value_max: f64,
}

impl PlotArea {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Pixel coordinate of `value` along the value axis (clamped to the plot).
    pub fn value_px(&self, value: f64) -> f64 {
        let ratio = if self.value_max > 0.0 {
            (value / self.value_max).clamp(0.0, 1.0)
        } else {
            0.0
        };
        match self.orientation {
            Orientation::Horizontal => self.left + self.width * ratio,
            Orientation::Vertical => self.bottom() - self.height * ratio,
        }
    }

    /// Start and thickness of category band `index` out of `count`.
    pub fn band(&self, index: usize, count: usize) -> (f64, f64) {
        let extent = match self.orientation {
            Orientation::Horizontal => self.height,
            Orientation::Vertical => self.width,
        };
        let origin = match self.orientation {
            Orientation::Horizontal => self.top,
            Orientation::Vertical => self.left,
        };
        let band = extent / count.max(1) as f64;
        (origin + band * index as f64, band)
    }
}

/// Drawing pass that runs after the renderer's normal paint.
pub trait PostRender {
    fn paint(&self, area: &PlotArea, out: &mut String);
}

/// Dashed reference line crossing the value axis at `value`, with a label.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdMarker {
    pub value: f64,
    pub label: String,
    pub color: &'static str,
}

impl PostRender for ThresholdMarker {
    fn paint(&self, area: &PlotArea, out: &mut String) {
        let at = area.value_px(self.value);
        let label = escape(&self.label);
        let color = self.color;
        match area.orientation {
            Orientation::Horizontal => {
                out.push_str(&format!(
                    r#"<g class="chart-marker"><line x1="{at:.1}" y1="{top:.1}" x2="{at:.1}" y2="{bottom:.1}" stroke="{color}" stroke-width="2" stroke-dasharray="5 5"/><text x="{tx:.1}" y="{ty:.1}" fill="{color}" font-size="11" text-anchor="start">{label}</text></g>"#,
                    top = area.top,
                    bottom = area.bottom(),
                    tx = at + 5.0,
                    ty = area.top + 15.0,
                ));
            }
            Orientation::Vertical => {
                out.push_str(&format!(
                    r#"<g class="chart-marker"><line x1="{left:.1}" y1="{at:.1}" x2="{right:.1}" y2="{at:.1}" stroke="{color}" stroke-width="2" stroke-dasharray="5 5"/><text x="{tx:.1}" y="{ty:.1}" fill="{color}" font-size="11" text-anchor="end">{label}</text></g>"#,
                    left = area.left,
                    right = area.right(),
                    tx = area.right() - 4.0,
                    ty = at - 6.0,
                ));
            }
        }
    }
}

impl BarChart {
    /// Render with this chart's own marker as the post-render hook.
    pub fn to_svg(&self) -> String {
        render_bar_chart(self, self.marker.as_ref().map(|m| m as &dyn PostRender))
    }
}

impl RadarChart {
    pub fn to_svg(&self) -> String {
        render_radar_chart(self)
    }
}

/// Smallest 1/2/5×10ⁿ at or above `value`.
pub fn nice_ceiling(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|step| step * magnitude)
        .find(|candidate| *candidate >= value)
        .unwrap_or(10.0 * magnitude)
}

pub fn render_bar_chart(chart: &BarChart, post_render: Option<&dyn PostRender>) -> String {
    let style = &chart.style;
    let series = &chart.series;
    let data_max = series.values.iter().copied().fold(0.0_f64, f64::max);
    // A degenerate upper bound would leave no room between ticks.
    let value_max = style
        .value_max
        .filter(|max| max.is_finite() && *max > 0.0)
        .unwrap_or_else(|| nice_ceiling(data_max));

    let title_space = if style.title.is_some() { 28.0 } else { 10.0 };
    let (left, bottom_gutter) = match style.orientation {
        Orientation::Horizontal => (140.0, 30.0),
        Orientation::Vertical if style.rotate_labels => (52.0, 96.0),
        Orientation::Vertical => (52.0, 36.0),
    };
    let area = PlotArea {
        left,
        top: title_space,
        width: BAR_WIDTH - left - 16.0,
        height: BAR_HEIGHT - title_space - bottom_gutter,
        orientation: style.orientation,
        value_max,
    };

    let mut out = open_svg(BAR_WIDTH, BAR_HEIGHT, &chart.dataset_label);

    if let Some(title) = &style.title {
        out.push_str(&format!(
            r#"<text class="chart-title" x="{x:.1}" y="18" fill="{color}" font-size="11" text-anchor="middle">{title}</text>"#,
            x = BAR_WIDTH / 2.0,
            color = palette::MUTED_TEXT,
            title = escape(title),
        ));
    }

    paint_value_axis(&area, style.tick_format, &mut out);
    paint_bars(chart, &area, &mut out);
    paint_category_labels(chart, &area, &mut out);

    if let Some(hook) = post_render {
        hook.paint(&area, &mut out);
    }

    out.push_str("</svg>");
    out
}

fn open_svg(width: f64, height: f64, label: &str) -> String {
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="{FONT}" role="img" aria-label="{label}"><rect width="{width}" height="{height}" fill="#FFFFFF"/>"##,
        label = escape(label),
    )
}

fn paint_value_axis(area: &PlotArea, format: TickFormat, out: &mut String) {
    let step = area.value_max / TICK_COUNT;
    let mut tick = 0.0;
    let mut k = 0u32;
    out.push_str(r#"<g class="chart-grid">"#);
    while tick <= area.value_max + step * 1e-6 {
        let at = area.value_px(tick);
        let text = escape(&format.format(tick));
        let grid = palette::GRID;
        match area.orientation {
            Orientation::Horizontal => out.push_str(&format!(
                r#"<line x1="{at:.1}" y1="{top:.1}" x2="{at:.1}" y2="{bottom:.1}" stroke="{grid}"/><text x="{at:.1}" y="{ty:.1}" font-size="11" fill="{muted}" text-anchor="middle">{text}</text>"#,
                top = area.top,
                bottom = area.bottom(),
                ty = area.bottom() + 16.0,
                muted = palette::MUTED_TEXT,
            )),
            Orientation::Vertical => out.push_str(&format!(
                r#"<line x1="{left:.1}" y1="{at:.1}" x2="{right:.1}" y2="{at:.1}" stroke="{grid}"/><text x="{tx:.1}" y="{ty:.1}" font-size="10" fill="{muted}" text-anchor="end">{text}</text>"#,
                left = area.left,
                right = area.right(),
                tx = area.left - 6.0,
                ty = at + 3.5,
                muted = palette::MUTED_TEXT,
            )),
        }
        k += 1;
        tick = step * f64::from(k);
    }
    out.push_str("</g>");
}

fn paint_bars(chart: &BarChart, area: &PlotArea, out: &mut String) {
    let count = chart.series.len();
    out.push_str(r#"<g class="chart-bars">"#);
    for (idx, (&value, color)) in chart
        .series
        .values
        .iter()
        .zip(&chart.series.colors)
        .enumerate()
    {
        let (start, band) = area.band(idx, count);
        let thickness = (band * 0.7).min(match area.orientation {
            Orientation::Horizontal => 20.0,
            Orientation::Vertical => 80.0,
        });
        let offset = start + (band - thickness) / 2.0;
        let end = area.value_px(value);
        let tooltip = escape(&chart.tooltip(idx));
        let color = escape(color);
        let rect = match area.orientation {
            Orientation::Horizontal => format!(
                r#"<rect x="{x:.1}" y="{offset:.1}" width="{w:.1}" height="{thickness:.1}" rx="6" fill="{color}">"#,
                x = area.left,
                w = (end - area.left).max(0.0),
            ),
            Orientation::Vertical => format!(
                r#"<rect x="{offset:.1}" y="{end:.1}" width="{thickness:.1}" height="{h:.1}" rx="4" fill="{color}">"#,
                h = (area.bottom() - end).max(0.0),
            ),
        };
        out.push_str(&rect);
        out.push_str(&format!("<title>{tooltip}</title></rect>"));
    }
    out.push_str("</g>");
}

fn paint_category_labels(chart: &BarChart, area: &PlotArea, out: &mut String) {
    let count = chart.series.len();
    out.push_str(r#"<g class="chart-labels">"#);
    for (idx, label) in chart.series.labels.iter().enumerate() {
        let (start, band) = area.band(idx, count);
        let center = start + band / 2.0;
        let label = escape(label);
        match area.orientation {
            Orientation::Horizontal => out.push_str(&format!(
                r##"<text x="{x:.1}" y="{y:.1}" font-size="10" font-weight="500" fill="#424242" text-anchor="end">{label}</text>"##,
                x = area.left - 8.0,
                y = center + 3.5,
            )),
            Orientation::Vertical if chart.style.rotate_labels => out.push_str(&format!(
                r##"<text x="{center:.1}" y="{y:.1}" font-size="9" fill="#424242" text-anchor="end" transform="rotate(-45 {center:.1} {y:.1})">{label}</text>"##,
                y = area.bottom() + 12.0,
            )),
            Orientation::Vertical => out.push_str(&format!(
                r##"<text x="{center:.1}" y="{y:.1}" font-size="12" font-weight="600" fill="#424242" text-anchor="middle">{label}</text>"##,
                y = area.bottom() + 18.0,
            )),
        }
    }
    out.push_str("</g>");
}

pub fn render_radar_chart(chart: &RadarChart) -> String {
    let size = RADAR_SIZE;
    let cx = size / 2.0;
    let cy = size / 2.0 - 20.0;
    let radius = size / 2.0 - 80.0;
    let spokes = chart.axes.len();

    let point = |axis: usize, ratio: f64| {
        let angle = -PI / 2.0 + 2.0 * PI * axis as f64 / spokes as f64;
        let r = radius * ratio.clamp(0.0, 1.0);
        (cx + r * angle.cos(), cy + r * angle.sin())
    };
    let polygon = |ratios: &[f64]| {
        ratios
            .iter()
            .enumerate()
            .map(|(axis, &ratio)| {
                let (x, y) = point(axis, ratio);
                format!("{x:.1},{y:.1}")
            })
            .collect::<Vec<_>>()
            .join(" ")
    };

    let mut out = open_svg(size, size, "State comparison");

    out.push_str(r#"<g class="chart-grid">"#);
    for ring in [0.25, 0.5, 0.75, 1.0] {
        out.push_str(&format!(
            r#"<polygon points="{points}" fill="none" stroke="{grid}"/>"#,
            points = polygon(&vec![ring; spokes]),
            grid = palette::GRID,
        ));
        let (tx, ty) = point(0, ring);
        out.push_str(&format!(
            r#"<text x="{x:.1}" y="{ty:.1}" font-size="9" fill="{muted}">{ring}</text>"#,
            x = tx + 4.0,
            muted = palette::MUTED_TEXT,
        ));
    }
    for (axis, name) in chart.axes.iter().enumerate() {
        let (x, y) = point(axis, 1.0);
        let (lx, ly) = point(axis, 1.18);
        out.push_str(&format!(
            r##"<line x1="{cx:.1}" y1="{cy:.1}" x2="{x:.1}" y2="{y:.1}" stroke="{grid}"/><text x="{lx:.1}" y="{ly:.1}" font-size="12" font-weight="600" fill="#424242" text-anchor="middle">{name}</text>"##,
            grid = palette::GRID,
            ly = ly + 4.0,
            name = escape(name),
        ));
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="chart-datasets">"#);
    for dataset in &chart.datasets {
        out.push_str(&format!(
            r#"<polygon points="{points}" fill="{fill}" stroke="{stroke}" stroke-width="2"><title>{label}</title></polygon>"#,
            points = polygon(&dataset.values),
            fill = dataset.fill,
            stroke = dataset.stroke,
            label = escape(&dataset.label),
        ));
        for (axis, &value) in dataset.values.iter().enumerate() {
            let (x, y) = point(axis, value);
            out.push_str(&format!(
                r#"<circle cx="{x:.1}" cy="{y:.1}" r="3" fill="{stroke}"><title>{axis_name}: {value:.2}</title></circle>"#,
                stroke = dataset.stroke,
                axis_name = escape(chart.axes[axis]),
            ));
        }
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="chart-legend">"#);
    let legend_y = size - 28.0;
    let slot = size / chart.datasets.len().max(1) as f64;
    for (idx, dataset) in chart.datasets.iter().enumerate() {
        let x = slot * idx as f64 + slot / 2.0 - 50.0;
        out.push_str(&format!(
            r##"<rect x="{x:.1}" y="{ry:.1}" width="14" height="10" fill="{fill}" stroke="{stroke}" stroke-width="2"/><text x="{tx:.1}" y="{ty:.1}" font-size="12" fill="#424242">{label}</text>"##,
            ry = legend_y - 9.0,
            fill = dataset.fill,
            stroke = dataset.stroke,
            tx = x + 20.0,
            ty = legend_y,
            label = escape(&dataset.label),
        ));
    }
    out.push_str("</g></svg>");
    out
}

/// XML text/attribute escaping.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::series::{
        comparison_chart, ranked_chart, volume_chart, BarStyle, ChartSeries, TooltipTemplate,
    };
    use crate::core::ranking::{rank, RowFilter};
    use crate::core::table::{Indicator, MetricTable};

    struct EdgeComment;

    impl PostRender for EdgeComment {
        fn paint(&self, area: &PlotArea, out: &mut String) {
            out.push_str(&format!("<!--edge {:.0}-->", area.value_px(area.value_max)));
        }
    }

    fn empty_chart() -> BarChart {
        BarChart {
            dataset_label: "Empty".into(),
            series: ChartSeries::default(),
            style: BarStyle {
                orientation: Orientation::Horizontal,
                value_max: Some(35.0),
                tick_format: TickFormat::Plain,
                tooltip: TooltipTemplate::Plain,
                rotate_labels: false,
                title: None,
            },
            marker: None,
        }
    }

    #[test]
    fn empty_series_renders_axes_only() {
        let svg = render_bar_chart(&empty_chart(), None);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"<g class="chart-bars"></g>"#));
        assert!(!svg.contains("<rect x=\"140.0\""));
    }

    #[test]
    fn post_render_hook_runs_after_bars() {
        let table = MetricTable::sample();
        let indices = rank(table, &RowFilter::all(), Indicator::Ifi, 5);
        let chart = ranked_chart(table, &indices, Indicator::Ifi, 28.2);
        let svg = render_bar_chart(&chart, Some(&EdgeComment));
        let bars = svg.find("chart-bars").unwrap();
        let edge = svg.find("<!--edge").unwrap();
        assert!(edge > bars);
        // Horizontal plot: value_max maps to the right edge.
        assert!(svg.contains("<!--edge 624-->"));
    }

    #[test]
    fn threshold_marker_is_drawn_with_label() {
        let table = MetricTable::sample();
        let indices = rank(table, &RowFilter::all(), Indicator::Ifi, 15);
        let svg = ranked_chart(table, &indices, Indicator::Ifi, 28.2).to_svg();
        assert!(svg.contains("National Avg: 28.2"));
        assert!(svg.contains("stroke-dasharray=\"5 5\""));
        assert_eq!(svg.matches("<title>").count(), 15);
    }

    #[test]
    fn value_mapping_is_clamped() {
        let area = PlotArea {
            left: 10.0,
            top: 0.0,
            width: 100.0,
            height: 50.0,
            orientation: Orientation::Vertical,
            value_max: 1.0,
        };
        assert_eq!(area.value_px(0.0), 50.0);
        assert_eq!(area.value_px(1.0), 0.0);
        assert_eq!(area.value_px(2.0), 0.0);
        assert_eq!(area.band(1, 4), (35.0, 25.0));
    }

    #[test]
    fn labels_are_escaped() {
        let mut chart = empty_chart();
        chart.series.push("A & <B>", 1.0, "#000000");
        let svg = render_bar_chart(&chart, None);
        assert!(svg.contains("A &amp; &lt;B&gt;"));
        assert!(!svg.contains("A & <B>"));
    }

    #[test]
    fn degenerate_axis_bound_falls_back_to_data() {
        for bound in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let mut chart = empty_chart();
            chart.style.value_max = Some(bound);
            let svg = render_bar_chart(&chart, None);
            assert!(svg.ends_with("</svg>"));
            // Empty data rounds up to a 0..1 axis.
            assert!(svg.contains(">1</text>"), "{bound}");
        }

        let mut chart = empty_chart();
        chart.style.value_max = Some(0.0);
        chart.series.push("Only", 3.2, "#000000");
        let svg = chart.to_svg();
        assert!(svg.contains(">5</text>"));
    }

    #[test]
    fn auto_axis_rounds_up() {
        assert_eq!(nice_ceiling(35.6), 50.0);
        assert_eq!(nice_ceiling(0.62), 1.0);
        assert_eq!(nice_ceiling(0.0), 1.0);
        let svg = volume_chart().to_svg();
        assert!(svg.contains(">50M<"));
    }

    #[test]
    fn radar_has_two_datasets_and_legend() {
        let radar = comparison_chart(MetricTable::sample(), "kerala", "meghalaya");
        let svg = radar.to_svg();
        assert_eq!(svg.matches("<polygon points=").count(), 4 + 2);
        assert!(svg.contains(">Kerala</text>"));
        assert!(svg.contains(">Meghalaya</text>"));
    }
}
