// ABOUTME: Week-over-week trend comparison with per-metric significance thresholds
// ABOUTME: Classifies tendency by majority vote and raises alerts from the latest comparison
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::{MonitorConfig, TrendConfig};
use chrono::{DateTime, Utc};
use nutrition_core::models::{
    MetricChange, MetricChanges, Severity, Tendency, TrendAlert, TrendAlertType, TrendReport,
    WeeklyComparison, WeeklySummary,
};
use std::cmp::Ordering;
use tracing::debug;

/// How a metric's significance is measured
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Significance {
    /// `|Δ / previous| > ratio`; never significant when previous is 0
    Ratio(f64),
    /// `|Δ| > points`
    Points(f64),
}

/// Compares adjacent weekly summaries
#[derive(Debug, Clone, Default)]
pub struct TrendComparator {
    config: TrendConfig,
}

impl TrendComparator {
    /// Comparator using the trend section of the engine configuration
    #[must_use]
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            config: config.trend.clone(),
        }
    }

    /// Comparator with explicit thresholds
    #[must_use]
    pub const fn with_config(config: TrendConfig) -> Self {
        Self { config }
    }

    /// Thresholds in use
    #[must_use]
    pub const fn config(&self) -> &TrendConfig {
        &self.config
    }

    /// One comparison per adjacent pair, oldest first
    ///
    /// `history` must be in chronological order; `n` summaries produce
    /// `n - 1` comparisons and fewer than two produce none.
    #[must_use]
    pub fn compare(&self, history: &[WeeklySummary]) -> Vec<WeeklyComparison> {
        history
            .windows(2)
            .map(|pair| self.compare_pair(&pair[0], &pair[1]))
            .collect()
    }

    /// Compare two adjacent weeks
    #[must_use]
    pub fn compare_pair(
        &self,
        previous: &WeeklySummary,
        current: &WeeklySummary,
    ) -> WeeklyComparison {
        let config = &self.config;
        let changes = MetricChanges {
            volume: metric_change(
                previous.volume,
                current.volume,
                Significance::Ratio(config.volume_significance_ratio),
            ),
            intensity: metric_change(
                previous.intensity.average,
                current.intensity.average,
                Significance::Points(config.intensity_significance_points),
            ),
            adherence: metric_change(
                previous.adherence_pct,
                current.adherence_pct,
                Significance::Points(config.adherence_significance_points),
            ),
            calories: metric_change(
                previous.calories,
                current.calories,
                Significance::Ratio(config.calories_significance_ratio),
            ),
        };

        WeeklyComparison {
            previous: previous.clone(),
            current: current.clone(),
            tendency: classify_tendency(&changes),
            changes,
        }
    }

    /// Comparisons plus alerts for the most recent comparison
    #[must_use]
    pub fn analyze(
        &self,
        client_id: &str,
        history: &[WeeklySummary],
        analyzed_at: DateTime<Utc>,
    ) -> TrendReport {
        let comparisons = self.compare(history);
        let alerts = comparisons
            .last()
            .map(|latest| self.trend_alerts(client_id, latest, analyzed_at))
            .unwrap_or_default();

        debug!(
            client_id,
            weeks = history.len(),
            comparisons = comparisons.len(),
            alerts = alerts.len(),
            "Weekly trends compared"
        );

        TrendReport {
            client_id: client_id.to_owned(),
            comparisons,
            alerts,
            analyzed_at,
        }
    }

    /// Alerts raised by one comparison
    #[must_use]
    pub fn trend_alerts(
        &self,
        client_id: &str,
        comparison: &WeeklyComparison,
        analyzed_at: DateTime<Utc>,
    ) -> Vec<TrendAlert> {
        let config = &self.config;
        let week = comparison.current.week.as_str();
        let changes = &comparison.changes;
        let mut alerts = Vec::new();

        let volume_pct = changes.volume.percent_change;
        if volume_pct < -config.volume_drop_alert_percent {
            alerts.push(trend_alert(
                client_id,
                week,
                TrendAlertType::VolumeDrop,
                Severity::High,
                "Caída de volumen de entrenamiento",
                format!(
                    "El volumen bajó un {:.1}% respecto a la semana {} ({:.0} → {:.0})",
                    volume_pct.abs(),
                    comparison.previous.week,
                    comparison.previous.volume,
                    comparison.current.volume
                ),
                volume_pct,
                analyzed_at,
            ));
        }

        let adherence_delta = changes.adherence.delta;
        if adherence_delta < -config.adherence_drop_alert_points {
            alerts.push(trend_alert(
                client_id,
                week,
                TrendAlertType::AdherenceDrop,
                Severity::High,
                "Caída de adherencia",
                format!(
                    "La adherencia bajó {:.1} puntos ({:.1}% → {:.1}%)",
                    adherence_delta.abs(),
                    comparison.previous.adherence_pct,
                    comparison.current.adherence_pct
                ),
                adherence_delta,
                analyzed_at,
            ));
        }

        let intensity_delta = changes.intensity.delta;
        if intensity_delta > config.intensity_rise_alert_points {
            alerts.push(trend_alert(
                client_id,
                week,
                TrendAlertType::IntensitySpike,
                Severity::Medium,
                "Pico de intensidad",
                format!(
                    "La intensidad media subió {intensity_delta:.1} puntos ({:.1} → {:.1}) en una semana",
                    comparison.previous.intensity.average,
                    comparison.current.intensity.average
                ),
                intensity_delta,
                analyzed_at,
            ));
        }

        alerts
    }
}

#[allow(clippy::too_many_arguments)]
fn trend_alert(
    client_id: &str,
    week: &str,
    alert_type: TrendAlertType,
    severity: Severity,
    title: &str,
    message: String,
    value: f64,
    analyzed_at: DateTime<Utc>,
) -> TrendAlert {
    TrendAlert {
        id: format!("tendencia_{client_id}_{week}_{}", alert_type.as_str()),
        client_id: client_id.to_owned(),
        alert_type,
        severity,
        title: title.to_owned(),
        message,
        week: week.to_owned(),
        value,
        created_at: analyzed_at,
    }
}

/// Change from `previous` to `current`
///
/// `percent_change` is in percent and is 0 when `previous` is 0, so it is
/// always finite for finite inputs.
#[must_use]
pub fn metric_change(previous: f64, current: f64, significance: Significance) -> MetricChange {
    let delta = current - previous;
    let ratio = if previous == 0.0 { 0.0 } else { delta / previous };
    let significant = match significance {
        Significance::Ratio(threshold) => ratio.abs() > threshold,
        Significance::Points(threshold) => delta.abs() > threshold,
    };
    MetricChange {
        delta,
        percent_change: ratio * 100.0,
        significant,
    }
}

/// Majority vote over volume, intensity and adherence; calories do not vote
#[must_use]
pub fn classify_tendency(changes: &MetricChanges) -> Tendency {
    let votes = [
        changes.volume.percent_change,
        changes.intensity.delta,
        changes.adherence.delta,
    ];
    let improvements = votes.iter().filter(|v| **v > 0.0).count();
    let regressions = votes.iter().filter(|v| **v < 0.0).count();
    match improvements.cmp(&regressions) {
        Ordering::Greater => Tendency::Improving,
        Ordering::Less => Tendency::Worsening,
        Ordering::Equal => Tendency::Stable,
    }
}
