//! The static per-state metric table.
//!
//! Rows are embedded at compile time as CSV (`data/state_metrics.csv`, same
//! layout as the CSV export) and parsed into typed records once. The table
//! never changes after construction.
//!
//! Every row carries a *stored* [`RiskBucket`] label next to its raw
//! indicators. The stored label is what filters match against; colouring
//! always re-derives a bucket from the value (see [`crate::core::classify`]).
//! The sample data contains rows where the two disagree and that is kept as-is.

use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use serde::Deserialize;
use thiserror::Error;

use crate::core::classify;
use crate::core::compare::loose_key;

/// Embedded sample definition.
const SAMPLE_CSV: &str = include_str!("../../data/state_metrics.csv");

/// Column header shared by the embedded definition and the CSV export.
pub const CSV_HEADER: [&str; 7] = ["State", "IFI", "CLCR", "TAES", "Composite", "Region", "Risk"];

/// Geographic grouping of a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Region {
    North,
    South,
    East,
    West,
    Northeast,
    Central,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::North,
        Region::South,
        Region::East,
        Region::West,
        Region::Northeast,
        Region::Central,
    ];

    /// Label used in the CSV definition and export.
    pub fn label(self) -> &'static str {
        match self {
            Region::North => "North",
            Region::South => "South",
            Region::East => "East",
            Region::West => "West",
            Region::Northeast => "Northeast",
            Region::Central => "Central",
        }
    }

    /// Lower-case selector key (`"northeast"`).
    pub fn key(self) -> &'static str {
        match self {
            Region::North => "north",
            Region::South => "south",
            Region::East => "east",
            Region::West => "west",
            Region::Northeast => "northeast",
            Region::Central => "central",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|region| region.key() == key)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered risk classification. `Critical < AtRisk < Healthy < Optimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum RiskBucket {
    Critical,
    #[serde(rename = "At Risk")]
    AtRisk,
    Healthy,
    Optimal,
}

impl RiskBucket {
    pub const ALL: [RiskBucket; 4] = [
        RiskBucket::Critical,
        RiskBucket::AtRisk,
        RiskBucket::Healthy,
        RiskBucket::Optimal,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RiskBucket::Critical => "Critical",
            RiskBucket::AtRisk => "At Risk",
            RiskBucket::Healthy => "Healthy",
            RiskBucket::Optimal => "Optimal",
        }
    }

    /// Selector key (`"at-risk"`).
    pub fn key(self) -> &'static str {
        match self {
            RiskBucket::Critical => "critical",
            RiskBucket::AtRisk => "at-risk",
            RiskBucket::Healthy => "healthy",
            RiskBucket::Optimal => "optimal",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|bucket| bucket.key() == key)
    }
}

impl fmt::Display for RiskBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the four numeric columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// Identity Freshness Index, roughly 0–35.
    Ifi,
    /// Child Lifecycle Capture Rate, 0–1.
    Clcr,
    /// Temporal Access Equity Score, 0–1.
    Taes,
    /// Composite health score, 0–1.
    Composite,
}

impl Indicator {
    pub const ALL: [Indicator; 4] = [
        Indicator::Ifi,
        Indicator::Clcr,
        Indicator::Taes,
        Indicator::Composite,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Indicator::Ifi => "ifi",
            Indicator::Clcr => "clcr",
            Indicator::Taes => "taes",
            Indicator::Composite => "composite",
        }
    }

    /// Short axis label (`"IFI"`, `"Composite"`).
    pub fn short_label(self) -> &'static str {
        match self {
            Indicator::Ifi => "IFI",
            Indicator::Clcr => "CLCR",
            Indicator::Taes => "TAES",
            Indicator::Composite => "Composite",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|indicator| indicator.key() == key)
    }

    /// True for the primary indicator, which lives on its own 0–35 scale.
    pub fn is_primary(self) -> bool {
        matches!(self, Indicator::Ifi)
    }
}

/// A single row of the table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StateMetrics {
    #[serde(rename = "State")]
    pub name: String,
    #[serde(rename = "IFI")]
    pub ifi: f64,
    #[serde(rename = "CLCR")]
    pub clcr: f64,
    #[serde(rename = "TAES")]
    pub taes: f64,
    #[serde(rename = "Composite")]
    pub composite: f64,
    #[serde(rename = "Region")]
    pub region: Region,
    #[serde(rename = "Risk")]
    pub risk: RiskBucket,
}

impl StateMetrics {
    pub fn value(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::Ifi => self.ifi,
            Indicator::Clcr => self.clcr,
            Indicator::Taes => self.taes,
            Indicator::Composite => self.composite,
        }
    }

    /// Bucket re-derived from `ifi`; may differ from the stored `risk`.
    pub fn derived_risk(&self) -> RiskBucket {
        classify::classify(self.ifi, Indicator::Ifi)
    }
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("malformed table definition: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: state name is empty")]
    EmptyName { row: usize },
    #[error("row {row}: duplicate state name `{name}`")]
    DuplicateName { row: usize, name: String },
    #[error("row {row} ({name}): {indicator} is not a finite number")]
    NonFinite {
        row: usize,
        name: String,
        indicator: &'static str,
    },
}

/// Read-only, row-oriented metric table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricTable {
    rows: Vec<StateMetrics>,
}

static SAMPLE: Lazy<MetricTable> = Lazy::new(|| {
    MetricTable::from_csv(SAMPLE_CSV).unwrap_or_else(|err| {
        tracing::error!("embedded state metrics failed to load: {err}");
        MetricTable::default()
    })
});

impl MetricTable {
    /// The embedded sample data set.
    pub fn sample() -> &'static MetricTable {
        &SAMPLE
    }

    /// Validate and wrap a set of rows.
    pub fn new(rows: Vec<StateMetrics>) -> Result<Self, TableError> {
        let mut seen = HashSet::with_capacity(rows.len());
        for (idx, row) in rows.iter().enumerate() {
            if row.name.trim().is_empty() {
                return Err(TableError::EmptyName { row: idx });
            }
            if !seen.insert(loose_key(&row.name)) {
                return Err(TableError::DuplicateName {
                    row: idx,
                    name: row.name.clone(),
                });
            }
            for indicator in Indicator::ALL {
                if !row.value(indicator).is_finite() {
                    return Err(TableError::NonFinite {
                        row: idx,
                        name: row.name.clone(),
                        indicator: indicator.short_label(),
                    });
                }
            }
        }
        Ok(Self { rows })
    }

    /// Parse a definition in the export layout (header row required).
    pub fn from_csv(source: &str) -> Result<Self, TableError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(source.as_bytes());
        let rows = reader
            .deserialize::<StateMetrics>()
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[StateMetrics] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&StateMetrics> {
        self.rows.get(index)
    }

    /// Index of the row whose name matches loosely (case, hyphen/space).
    pub fn position(&self, name: &str) -> Option<usize> {
        let wanted = loose_key(name);
        self.rows.iter().position(|row| loose_key(&row.name) == wanted)
    }

    pub fn find(&self, name: &str) -> Option<&StateMetrics> {
        self.position(name).and_then(|idx| self.row(idx))
    }

    /// Rows whose stored label disagrees with the threshold-derived bucket.
    pub fn discrepancies(&self) -> Vec<&StateMetrics> {
        self.rows
            .iter()
            .filter(|row| row.risk != row.derived_risk())
            .collect()
    }

    /// Number of rows carrying the given stored label.
    pub fn count_stored(&self, bucket: RiskBucket) -> usize {
        self.rows.iter().filter(|row| row.risk == bucket).count()
    }
}

/// A labelled total on the activity volume chart (millions of records).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityVolume {
    pub label: &'static str,
    pub millions: f64,
    pub color: &'static str,
}

pub const ACTIVITY_VOLUMES: [ActivityVolume; 3] = [
    ActivityVolume {
        label: "Enrolments",
        millions: 4.8,
        color: "#1565C0",
    },
    ActivityVolume {
        label: "Demo Updates",
        millions: 23.2,
        color: "#FFB300",
    },
    ActivityVolume {
        label: "Bio Updates",
        millions: 35.6,
        color: "#43A047",
    },
];
