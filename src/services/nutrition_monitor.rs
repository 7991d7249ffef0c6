// ABOUTME: Nutrition monitor service running overload and trend analyses against the storage ports
// ABOUTME: Persists results, applies preventive blocks and emits notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::notifications::{NotificationEvent, NotificationKind, Notifier};
use crate::storage::{AlertStore, MealPlanStore, WeeklyHistoryStore};
use chrono::{DateTime, Utc};
use nutrition_core::constants::trend::DEFAULT_HISTORY_WEEKS;
use nutrition_core::errors::{AppError, AppResult};
use nutrition_core::models::{OverloadAlert, RemediationBlock, TrendAlert, TrendReport};
use nutrition_intelligence::{MonitorConfig, OverloadRuleEngine, TrendComparator};
use serde_json::json;
use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument, warn, Span};

/// Fewest weeks a trend analysis may request
pub const MIN_HISTORY_WEEKS: usize = 2;
/// Most weeks a trend analysis may request
pub const MAX_HISTORY_WEEKS: usize = 52;

/// Source of the analysis timestamp
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Orchestrates the engine around the storage and notification ports
#[derive(Clone)]
pub struct NutritionMonitorService {
    plans: Arc<dyn MealPlanStore>,
    history: Arc<dyn WeeklyHistoryStore>,
    alerts: Arc<dyn AlertStore>,
    notifier: Arc<dyn Notifier>,
    engine: Arc<OverloadRuleEngine>,
    comparator: Arc<TrendComparator>,
    clock: Clock,
    default_weeks: usize,
}

impl fmt::Debug for NutritionMonitorService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NutritionMonitorService")
            .field("engine", &self.engine)
            .field("comparator", &self.comparator)
            .field("default_weeks", &self.default_weeks)
            .finish_non_exhaustive()
    }
}

impl NutritionMonitorService {
    /// Service using the wall clock and the default history length
    #[must_use]
    pub fn new(
        plans: Arc<dyn MealPlanStore>,
        history: Arc<dyn WeeklyHistoryStore>,
        alerts: Arc<dyn AlertStore>,
        notifier: Arc<dyn Notifier>,
        config: &MonitorConfig,
    ) -> Self {
        Self {
            plans,
            history,
            alerts,
            notifier,
            engine: Arc::new(OverloadRuleEngine::new(config)),
            comparator: Arc::new(TrendComparator::new(config)),
            clock: Arc::new(Utc::now),
            default_weeks: DEFAULT_HISTORY_WEEKS,
        }
    }

    /// Replace the clock, e.g. with a fixed instant in tests
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Weeks loaded when a trend analysis does not specify a count
    #[must_use]
    pub fn with_default_weeks(mut self, weeks: usize) -> Self {
        self.default_weeks = weeks.clamp(MIN_HISTORY_WEEKS, MAX_HISTORY_WEEKS);
        self
    }

    /// Engine in use
    #[must_use]
    pub fn engine(&self) -> &OverloadRuleEngine {
        &self.engine
    }

    /// Analyse a diet and persist the resulting alerts
    ///
    /// Returns the alerts of this pass as stored, so flags set by earlier
    /// user actions are carried over.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown diet or a storage error
    #[instrument(skip(self), fields(alerts))]
    pub async fn run_overload_analysis(&self, diet_id: &str) -> AppResult<Vec<OverloadAlert>> {
        let plan = self.plans.load_meal_plan(diet_id).await?;
        let analyzed_at = (self.clock)();
        let detected = self.engine.analyze(&plan, analyzed_at);
        let saved = self.alerts.save_alerts(diet_id, detected).await?;
        Span::current().record("alerts", saved.len());

        for alert in &saved {
            self.emit(
                NotificationKind::OverloadDetected {
                    diet_id: alert.diet_id.clone(),
                    client_id: alert.client_id.clone(),
                    alert_id: alert.id.clone(),
                    alert_type: alert.alert_type,
                    severity: alert.severity,
                },
                analyzed_at,
            )
            .await;
        }

        info!(diet_id, client_id = %plan.client_id, alerts = saved.len(), "Overload analysis complete");
        Ok(saved)
    }

    /// Compare a client's recent weeks and persist the resulting trend alerts
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `weeks` is outside
    /// `MIN_HISTORY_WEEKS..=MAX_HISTORY_WEEKS`, `ResourceNotFound` when the
    /// client has no history, or a storage error
    #[instrument(skip(self), fields(comparisons, alerts))]
    pub async fn run_trend_analysis(
        &self,
        client_id: &str,
        weeks: Option<usize>,
    ) -> AppResult<TrendReport> {
        let weeks = weeks.unwrap_or(self.default_weeks);
        if !(MIN_HISTORY_WEEKS..=MAX_HISTORY_WEEKS).contains(&weeks) {
            return Err(AppError::invalid_input(format!(
                "weeks must be between {MIN_HISTORY_WEEKS} and {MAX_HISTORY_WEEKS}"
            ))
            .with_details(json!({ "weeks": weeks })));
        }

        let history = self.history.load_weekly_history(client_id, weeks).await?;
        let analyzed_at = (self.clock)();
        let report = self.comparator.analyze(client_id, &history, analyzed_at);

        let span = Span::current();
        span.record("comparisons", report.comparisons.len());
        span.record("alerts", report.alerts.len());

        self.alerts
            .save_trend_alerts(client_id, report.alerts.clone())
            .await?;
        for alert in &report.alerts {
            self.emit(
                NotificationKind::TrendAlertRaised {
                    client_id: alert.client_id.clone(),
                    alert_id: alert.id.clone(),
                    alert_type: alert.alert_type,
                    severity: alert.severity,
                },
                analyzed_at,
            )
            .await;
        }

        Ok(report)
    }

    /// Stored alerts of a diet
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown diet or a storage error
    #[instrument(skip(self))]
    pub async fn list_alerts(&self, diet_id: &str) -> AppResult<Vec<OverloadAlert>> {
        self.plans.load_meal_plan(diet_id).await?;
        self.alerts.list_alerts(diet_id).await
    }

    /// Flag an alert as seen
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown alert or a storage error
    #[instrument(skip(self))]
    pub async fn mark_alert_seen(&self, alert_id: &str) -> AppResult<()> {
        self.alerts.mark_alert_seen(alert_id).await
    }

    /// Apply an alert's preventive block to its diet
    ///
    /// Applying a block twice succeeds; only the first application is
    /// recorded against the plan and notified.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown diet or block, or a storage
    /// error
    #[instrument(skip(self))]
    pub async fn apply_block(&self, block_id: &str, diet_id: &str) -> AppResult<RemediationBlock> {
        self.plans.load_meal_plan(diet_id).await?;
        let block = self.alerts.find_block(block_id, diet_id).await?;

        if !self.alerts.mark_block_applied(block_id, diet_id).await? {
            info!(block_id, diet_id, "Block already applied");
            return Ok(block);
        }

        self.plans.record_applied_block(diet_id, &block).await?;
        self.emit(
            NotificationKind::BlockApplied {
                diet_id: diet_id.to_owned(),
                block_id: block.id.clone(),
                alert_id: block.alert_id.clone(),
            },
            (self.clock)(),
        )
        .await;

        info!(block_id, diet_id, kind = ?block.kind, "Block applied");
        Ok(block)
    }

    /// Stored trend alerts of a client
    ///
    /// # Errors
    ///
    /// Returns a storage error if the read fails
    #[instrument(skip(self))]
    pub async fn list_trend_alerts(&self, client_id: &str) -> AppResult<Vec<TrendAlert>> {
        self.alerts.list_trend_alerts(client_id).await
    }

    async fn emit(&self, kind: NotificationKind, at: DateTime<Utc>) {
        let event = NotificationEvent::new(kind, at);
        let event_id = event.id;
        if let Err(e) = self.notifier.notify(event).await {
            warn!(%event_id, error = %e, "Notification dispatch failed");
        }
    }
}
