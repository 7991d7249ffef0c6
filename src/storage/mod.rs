// ABOUTME: Storage ports for meal plans, weekly history and alerts
// ABOUTME: Pluggable async traits with an in-memory DashMap implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Storage ports.
//!
//! The analysis engine never touches storage. The service loads fully
//! resolved plans and histories through these traits, hands them to the
//! engine and persists what comes back.

/// In-memory storage implementation
pub mod memory;

pub use memory::{InMemoryStore, SeedData};

use nutrition_core::errors::AppResult;
use nutrition_core::models::{MealPlan, OverloadAlert, RemediationBlock, TrendAlert, WeeklySummary};

/// Meal plan persistence and plan-mutation collaborator
#[async_trait::async_trait]
pub trait MealPlanStore: Send + Sync {
    /// Load a plan by diet id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the diet does not exist
    async fn load_meal_plan(&self, diet_id: &str) -> AppResult<MealPlan>;

    /// Insert or replace a plan
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write
    async fn save_meal_plan(&self, plan: MealPlan) -> AppResult<()>;

    /// Record that a preventive block was applied to a plan
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the diet does not exist
    async fn record_applied_block(&self, diet_id: &str, block: &RemediationBlock) -> AppResult<()>;

    /// Blocks applied to a plan, oldest first
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the diet does not exist
    async fn applied_blocks(&self, diet_id: &str) -> AppResult<Vec<RemediationBlock>>;
}

/// Weekly summary history per client
#[async_trait::async_trait]
pub trait WeeklyHistoryStore: Send + Sync {
    /// The most recent `weeks` summaries for a client, oldest first
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no history exists for the client
    async fn load_weekly_history(&self, client_id: &str, weeks: usize)
        -> AppResult<Vec<WeeklySummary>>;

    /// Insert a closed week, replacing any summary with the same week label
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write
    async fn save_weekly_summary(&self, client_id: &str, summary: WeeklySummary) -> AppResult<()>;
}

/// Alert persistence with user-action flags
#[async_trait::async_trait]
pub trait AlertStore: Send + Sync {
    /// Persist an analysis pass and return the stored versions, in pass order
    ///
    /// An alert whose id is already stored keeps its `seen` and
    /// `block_applied` flags and its creation timestamp. Alerts missing from
    /// the pass are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write
    async fn save_alerts(
        &self,
        diet_id: &str,
        alerts: Vec<OverloadAlert>,
    ) -> AppResult<Vec<OverloadAlert>>;

    /// All stored alerts for a diet, in first-seen order
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails
    async fn list_alerts(&self, diet_id: &str) -> AppResult<Vec<OverloadAlert>>;

    /// Flag an alert as seen
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the alert does not exist
    async fn mark_alert_seen(&self, alert_id: &str) -> AppResult<()>;

    /// Find a preventive block among a diet's alerts
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no alert of the diet carries the block
    async fn find_block(&self, block_id: &str, diet_id: &str) -> AppResult<RemediationBlock>;

    /// Flag the alert owning a block as applied
    ///
    /// Returns `false` when the block was already applied.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no alert of the diet carries the block
    async fn mark_block_applied(&self, block_id: &str, diet_id: &str) -> AppResult<bool>;

    /// Persist trend alerts, replacing alerts with the same id
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write
    async fn save_trend_alerts(&self, client_id: &str, alerts: Vec<TrendAlert>) -> AppResult<()>;

    /// All stored trend alerts for a client
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails
    async fn list_trend_alerts(&self, client_id: &str) -> AppResult<Vec<TrendAlert>>;
}
