//! Dashboard configuration embedded from `dashboard.toml`.
//!
//! Thresholds and scales are fixed in [`crate::core::classify`]; this file only
//! carries presentation choices: ranking limits, reference lines, the export
//! file name and the headline KPIs.

use serde::Deserialize;
use thiserror::Error;

const EMBEDDED: &str = include_str!("../../dashboard.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid dashboard configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("ranking limit `{0}` must be at least 1")]
    ZeroLimit(&'static str),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub ranking: RankingConfig,
    pub reference: ReferenceConfig,
    pub export: ExportConfig,
    #[serde(rename = "kpi")]
    pub kpis: Vec<KpiConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Bars on the freshness ranking.
    pub freshness_limit: usize,
    /// Bars on the child-capture gap chart.
    pub gap_limit: usize,
    /// Bars on the access-equity chart.
    pub equity_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    pub national_average_ifi: f64,
    pub equity_target: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub csv_filename: String,
}

/// A headline number and how to animate it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KpiConfig {
    pub id: String,
    #[serde(default)]
    pub start: f64,
    pub end: f64,
    pub duration_ms: f64,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default)]
    pub postfix: String,
    #[serde(default)]
    pub decimals: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            ranking: RankingConfig::default(),
            reference: ReferenceConfig::default(),
            export: ExportConfig::default(),
            kpis: vec![
                KpiConfig::counter("kpi-records", 4.8, 1500.0).with_suffix("M+"),
                KpiConfig::counter("kpi-dbt", 6000.0, 1500.0)
                    .with_prefix("₹")
                    .with_postfix(" Cr"),
                KpiConfig::counter("kpi-critical", 8.0, 1000.0),
                KpiConfig::counter("kpi-ifi", 28.2, 1200.0).with_decimals(1),
            ],
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            freshness_limit: 15,
            gap_limit: 12,
            equity_limit: 12,
        }
    }
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            national_average_ifi: 28.2,
            equity_target: 0.7,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            csv_filename: "uidai_state_metrics.csv".to_string(),
        }
    }
}

impl KpiConfig {
    fn counter(id: &str, end: f64, duration_ms: f64) -> Self {
        Self {
            id: id.to_string(),
            start: 0.0,
            end,
            duration_ms,
            prefix: String::new(),
            suffix: String::new(),
            postfix: String::new(),
            decimals: 0,
        }
    }

    fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.to_string();
        self
    }

    fn with_postfix(mut self, postfix: &str) -> Self {
        self.postfix = postfix.to_string();
        self
    }

    fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }
}

impl DashboardConfig {
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// The configuration compiled into the binary, or defaults if it is broken.
    pub fn embedded() -> Self {
        Self::from_toml(EMBEDDED).unwrap_or_else(|err| {
            tracing::warn!("{err}; falling back to default dashboard configuration");
            Self::default()
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("freshness_limit", self.ranking.freshness_limit),
            ("gap_limit", self.ranking.gap_limit),
            ("equity_limit", self.ranking.equity_limit),
        ];
        for (name, limit) in limits {
            if limit == 0 {
                return Err(ConfigError::ZeroLimit(name));
            }
        }
        Ok(())
    }

    pub fn kpi(&self, id: &str) -> Option<&KpiConfig> {
        self.kpis.iter().find(|kpi| kpi.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_matches_defaults() {
        assert_eq!(DashboardConfig::from_toml(EMBEDDED).unwrap(), DashboardConfig::default());
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config = DashboardConfig::from_toml("[ranking]\nfreshness_limit = 10\n").unwrap();
        assert_eq!(config.ranking.freshness_limit, 10);
        assert_eq!(config.ranking.gap_limit, 12);
        assert_eq!(config.export.csv_filename, "uidai_state_metrics.csv");
        assert_eq!(config.kpis.len(), 4);
    }

    #[test]
    fn zero_limit_is_rejected() {
        let err = DashboardConfig::from_toml("[ranking]\ngap_limit = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroLimit("gap_limit")));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            DashboardConfig::from_toml("[ranking\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn kpi_lookup_by_id() {
        let config = DashboardConfig::default();
        let dbt = config.kpi("kpi-dbt").unwrap();
        assert_eq!(dbt.prefix, "₹");
        assert_eq!(dbt.postfix, " Cr");
        assert!(config.kpi("kpi-missing").is_none());
    }
}
