// ABOUTME: Weekly summary, comparison and trend alert models
// ABOUTME: Week-over-week metric changes with significance flags and tendency classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::alert::Severity;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Session intensity for a week: average on a 0-10 scale and distribution in percent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IntensityProfile {
    /// Average intensity (0-10)
    #[serde(rename = "promedio")]
    pub average: f64,
    /// Share of low-intensity sessions (%)
    #[serde(rename = "baja", default)]
    pub low_pct: f64,
    /// Share of medium-intensity sessions (%)
    #[serde(rename = "media", default)]
    pub medium_pct: f64,
    /// Share of high-intensity sessions (%)
    #[serde(rename = "alta", default)]
    pub high_pct: f64,
}

/// Aggregated training and nutrition metrics for one closed week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    /// Week label (e.g. `2025-W14`)
    #[serde(rename = "semana")]
    pub week: String,
    /// First day of the week
    #[serde(rename = "fechaInicio")]
    pub start_date: NaiveDate,
    /// Last day of the week
    #[serde(rename = "fechaFin")]
    pub end_date: NaiveDate,
    /// Training volume
    #[serde(rename = "volumen")]
    pub volume: f64,
    /// Session intensity
    #[serde(rename = "intensidad")]
    pub intensity: IntensityProfile,
    /// Plan adherence (%)
    #[serde(rename = "adherencia")]
    pub adherence_pct: f64,
    /// Calories consumed
    #[serde(rename = "calorias")]
    pub calories: f64,
    /// Sessions completed
    #[serde(rename = "sesionesCompletadas", default)]
    pub sessions_completed: u32,
    /// Sessions scheduled
    #[serde(rename = "sesionesProgramadas", default)]
    pub sessions_scheduled: u32,
}

/// Change of one metric between two adjacent weeks
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricChange {
    /// Absolute difference (current - previous)
    #[serde(rename = "valor")]
    pub delta: f64,
    /// Change relative to the previous week, in percent; 0 when previous is 0
    #[serde(rename = "porcentaje")]
    pub percent_change: f64,
    /// Whether the change crosses the metric's significance threshold
    #[serde(rename = "significativo")]
    pub significant: bool,
}

/// Per-metric changes of a comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricChanges {
    /// Training volume
    #[serde(rename = "volumen")]
    pub volume: MetricChange,
    /// Average intensity
    #[serde(rename = "intensidad")]
    pub intensity: MetricChange,
    /// Adherence
    #[serde(rename = "adherencia")]
    pub adherence: MetricChange,
    /// Calories
    #[serde(rename = "calorias")]
    pub calories: MetricChange,
}

/// Overall direction of a week-over-week change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tendency {
    /// More metrics improved than regressed
    #[serde(rename = "mejorando")]
    Improving,
    /// More metrics regressed than improved
    #[serde(rename = "empeorando")]
    Worsening,
    /// Tie
    #[serde(rename = "estable")]
    Stable,
}

/// Comparison of two adjacent weekly summaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyComparison {
    /// Earlier week
    #[serde(rename = "semanaAnterior")]
    pub previous: WeeklySummary,
    /// Later week
    #[serde(rename = "semanaActual")]
    pub current: WeeklySummary,
    /// Per-metric changes
    #[serde(rename = "cambios")]
    pub changes: MetricChanges,
    /// Overall tendency
    #[serde(rename = "tendencia")]
    pub tendency: Tendency,
}

/// Kind of trend alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendAlertType {
    /// Training volume dropped
    #[serde(rename = "caida-volumen")]
    VolumeDrop,
    /// Adherence dropped
    #[serde(rename = "caida-adherencia")]
    AdherenceDrop,
    /// Average intensity spiked
    #[serde(rename = "pico-intensidad")]
    IntensitySpike,
}

impl TrendAlertType {
    /// Wire identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VolumeDrop => "caida-volumen",
            Self::AdherenceDrop => "caida-adherencia",
            Self::IntensitySpike => "pico-intensidad",
        }
    }
}

/// Alert raised from the most recent week-over-week comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAlert {
    /// Alert identifier (client + week + type)
    pub id: String,
    /// Client the history belongs to
    #[serde(rename = "clienteId")]
    pub client_id: String,
    /// Alert kind
    #[serde(rename = "tipo")]
    pub alert_type: TrendAlertType,
    /// Severity
    #[serde(rename = "severidad")]
    pub severity: Severity,
    /// Short title
    #[serde(rename = "titulo")]
    pub title: String,
    /// Message embedding the exact figures
    #[serde(rename = "mensaje")]
    pub message: String,
    /// Week the change was observed in
    #[serde(rename = "semana")]
    pub week: String,
    /// Percentage or point change that triggered the alert
    #[serde(rename = "valor")]
    pub value: f64,
    /// Creation timestamp
    #[serde(rename = "creadoEn")]
    pub created_at: DateTime<Utc>,
}

/// Comparisons and trend alerts for one client's history window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    /// Client
    #[serde(rename = "clienteId")]
    pub client_id: String,
    /// One comparison per adjacent pair, oldest first
    #[serde(rename = "comparaciones")]
    pub comparisons: Vec<WeeklyComparison>,
    /// Alerts derived from the latest comparison
    #[serde(rename = "alertas")]
    pub alerts: Vec<TrendAlert>,
    /// Analysis timestamp
    #[serde(rename = "analizadoEn")]
    pub analyzed_at: DateTime<Utc>,
}

impl TrendReport {
    /// Report with no comparisons
    pub fn empty(client_id: impl Into<String>, analyzed_at: DateTime<Utc>) -> Self {
        Self {
            client_id: client_id.into(),
            comparisons: Vec::new(),
            alerts: Vec::new(),
            analyzed_at,
        }
    }

    /// Tendency of the latest comparison
    #[must_use]
    pub fn latest_tendency(&self) -> Option<Tendency> {
        self.comparisons.last().map(|comparison| comparison.tendency)
    }
}
