//! Fixed-threshold risk classification, normalisation and the colour palette.
//!
//! Every chart that colours a value goes through [`classify`], so two charts
//! showing the same underlying number always agree on its colour.

use crate::core::table::{Indicator, RiskBucket};

/// Upper bound of the primary indicator's scale.
pub const IFI_MAX: f64 = 35.0;

/// Lower cutpoints for `AtRisk`, `Healthy` and `Optimal` on the IFI scale.
pub const AT_RISK_FROM: f64 = 15.0;
pub const HEALTHY_FROM: f64 = 25.0;
pub const OPTIMAL_FROM: f64 = 30.0;

/// Multiplier applied to unit-scale metrics on the ranked chart.
pub const DISPLAY_PERCENT: f64 = 100.0;

pub mod palette {
    pub const CRITICAL: &str = "#E53935";
    pub const AT_RISK: &str = "#FFB300";
    pub const HEALTHY: &str = "#43A047";
    pub const OPTIMAL: &str = "#1E88E5";
    pub const PRIMARY: &str = "#1565C0";
    pub const SECONDARY: &str = "#7B1FA2";
    pub const GRID: &str = "#E0E0E0";
    pub const MUTED_TEXT: &str = "#616161";
}

/// Bucket for a value already expressed on the IFI scale.
///
/// NaN compares false against every cutpoint and lands in `Critical`.
pub fn bucket_on_ifi_scale(value: f64) -> RiskBucket {
    if value >= OPTIMAL_FROM {
        RiskBucket::Optimal
    } else if value >= HEALTHY_FROM {
        RiskBucket::Healthy
    } else if value >= AT_RISK_FROM {
        RiskBucket::AtRisk
    } else {
        RiskBucket::Critical
    }
}

/// Map a raw metric value onto the IFI scale used by the thresholds.
pub fn to_ifi_scale(value: f64, indicator: Indicator) -> f64 {
    if indicator.is_primary() {
        value
    } else {
        value * IFI_MAX
    }
}

/// Classify a raw metric value.
pub fn classify(value: f64, indicator: Indicator) -> RiskBucket {
    bucket_on_ifi_scale(to_ifi_scale(value, indicator))
}

/// Rescale a raw metric value onto `[0, 1]`.
pub fn normalize(value: f64, indicator: Indicator) -> f64 {
    let scaled = if indicator.is_primary() {
        value / IFI_MAX
    } else {
        value
    };
    if scaled.is_nan() {
        0.0
    } else {
        scaled.clamp(0.0, 1.0)
    }
}

/// Value as plotted on the ranked chart: IFI as-is, unit metrics ×100.
pub fn display_value(value: f64, indicator: Indicator) -> f64 {
    if indicator.is_primary() {
        value
    } else {
        value * DISPLAY_PERCENT
    }
}

/// Classify a value that has already gone through [`display_value`].
pub fn classify_display(display: f64, indicator: Indicator) -> RiskBucket {
    if indicator.is_primary() {
        bucket_on_ifi_scale(display)
    } else {
        bucket_on_ifi_scale(display / DISPLAY_PERCENT * IFI_MAX)
    }
}

pub fn bucket_color(bucket: RiskBucket) -> &'static str {
    match bucket {
        RiskBucket::Critical => palette::CRITICAL,
        RiskBucket::AtRisk => palette::AT_RISK,
        RiskBucket::Healthy => palette::HEALTHY,
        RiskBucket::Optimal => palette::OPTIMAL,
    }
}

/// Tooltip line shown under a freshness bar.
pub fn risk_label(bucket: RiskBucket) -> &'static str {
    match bucket {
        RiskBucket::Critical => "Risk: 🔴 Critical",
        RiskBucket::AtRisk => "Risk: 🟡 At Risk",
        RiskBucket::Healthy => "Risk: 🟢 Healthy",
        RiskBucket::Optimal => "Risk: 🔵 Optimal",
    }
}

/// Colour for a child-capture gap (`1 - clcr`); larger gaps are worse.
pub fn gap_color(gap: f64) -> &'static str {
    if gap > 0.8 {
        palette::CRITICAL
    } else if gap > 0.5 {
        palette::AT_RISK
    } else {
        palette::HEALTHY
    }
}

/// Colour for an access-equity score.
pub fn equity_color(taes: f64) -> &'static str {
    if taes < 0.3 {
        palette::CRITICAL
    } else if taes < 0.5 {
        palette::AT_RISK
    } else {
        palette::HEALTHY
    }
}
