// ABOUTME: In-memory storage backend implementing every storage port on DashMap
// ABOUTME: Used by the server binary, the tests and JSON seed loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AlertStore, MealPlanStore, WeeklyHistoryStore};
use dashmap::DashMap;
use nutrition_core::errors::{AppError, AppResult};
use nutrition_core::models::{
    MealPlan, OverloadAlert, RemediationBlock, TrendAlert, WeeklySummary,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

/// Initial data for an [`InMemoryStore`], read from JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    /// Meal plans
    #[serde(default, rename = "dietas")]
    pub meal_plans: Vec<MealPlan>,
    /// Weekly summaries keyed by client id
    #[serde(default, rename = "historial")]
    pub history: HashMap<String, Vec<WeeklySummary>>,
}

/// Concurrent in-memory store
///
/// Every map is guarded per shard. No method holds a reference into one map
/// while writing to another entry of the same map.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    plans: DashMap<String, MealPlan>,
    applied: DashMap<String, Vec<RemediationBlock>>,
    history: DashMap<String, Vec<WeeklySummary>>,
    alerts: DashMap<String, Vec<OverloadAlert>>,
    alert_index: DashMap<String, String>,
    trend_alerts: DashMap<String, Vec<TrendAlert>>,
}

impl InMemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with seed data
    #[must_use]
    pub fn from_seed(seed: SeedData) -> Self {
        let store = Self::new();
        for plan in seed.meal_plans {
            store.plans.insert(plan.id.clone(), plan);
        }
        for (client_id, mut weeks) in seed.history {
            weeks.sort_by_key(|week| week.start_date);
            store.history.insert(client_id, weeks);
        }
        store
    }

    /// Read seed data from a JSON file
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file cannot be read and a
    /// serialization error if it is not valid seed JSON
    pub async fn load_seed(path: &Path) -> AppResult<Self> {
        let raw = fs::read_to_string(path).await.map_err(|e| {
            AppError::storage(format!("Cannot read seed file {}", path.display())).with_source(e)
        })?;
        let seed: SeedData = serde_json::from_str(&raw)?;
        info!(
            path = %path.display(),
            meal_plans = seed.meal_plans.len(),
            clients = seed.history.len(),
            "Seed data loaded"
        );
        Ok(Self::from_seed(seed))
    }

    fn ensure_plan(&self, diet_id: &str) -> AppResult<()> {
        if self.plans.contains_key(diet_id) {
            Ok(())
        } else {
            Err(diet_not_found(diet_id))
        }
    }
}

fn diet_not_found(diet_id: &str) -> AppError {
    AppError::not_found(format!("Diet {diet_id}")).with_resource_id(diet_id)
}

fn block_not_found(block_id: &str) -> AppError {
    AppError::not_found(format!("Block {block_id}")).with_resource_id(block_id)
}

#[async_trait::async_trait]
impl MealPlanStore for InMemoryStore {
    async fn load_meal_plan(&self, diet_id: &str) -> AppResult<MealPlan> {
        self.plans
            .get(diet_id)
            .map(|plan| plan.value().clone())
            .ok_or_else(|| diet_not_found(diet_id))
    }

    async fn save_meal_plan(&self, plan: MealPlan) -> AppResult<()> {
        debug!(diet_id = %plan.id, meals = plan.meals.len(), "Saving meal plan");
        self.plans.insert(plan.id.clone(), plan);
        Ok(())
    }

    async fn record_applied_block(&self, diet_id: &str, block: &RemediationBlock) -> AppResult<()> {
        self.ensure_plan(diet_id)?;
        self.applied
            .entry(diet_id.to_owned())
            .or_default()
            .push(block.clone());
        Ok(())
    }

    async fn applied_blocks(&self, diet_id: &str) -> AppResult<Vec<RemediationBlock>> {
        self.ensure_plan(diet_id)?;
        Ok(self
            .applied
            .get(diet_id)
            .map(|blocks| blocks.value().clone())
            .unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl WeeklyHistoryStore for InMemoryStore {
    async fn load_weekly_history(
        &self,
        client_id: &str,
        weeks: usize,
    ) -> AppResult<Vec<WeeklySummary>> {
        let history = self
            .history
            .get(client_id)
            .map(|entry| entry.value().clone())
            .filter(|summaries| !summaries.is_empty())
            .ok_or_else(|| {
                AppError::not_found(format!("Weekly history for client {client_id}"))
                    .with_resource_id(client_id)
            })?;

        let skip = history.len().saturating_sub(weeks);
        Ok(history.into_iter().skip(skip).collect())
    }

    async fn save_weekly_summary(&self, client_id: &str, summary: WeeklySummary) -> AppResult<()> {
        let mut entry = self.history.entry(client_id.to_owned()).or_default();
        entry.retain(|existing| existing.week != summary.week);
        entry.push(summary);
        entry.sort_by_key(|week| week.start_date);
        Ok(())
    }
}

#[async_trait::async_trait]
impl AlertStore for InMemoryStore {
    async fn save_alerts(
        &self,
        diet_id: &str,
        alerts: Vec<OverloadAlert>,
    ) -> AppResult<Vec<OverloadAlert>> {
        let mut saved = Vec::with_capacity(alerts.len());
        {
            let mut stored = self.alerts.entry(diet_id.to_owned()).or_default();
            for mut alert in alerts {
                if let Some(existing) = stored.iter_mut().find(|a| a.id == alert.id) {
                    alert.seen = existing.seen;
                    alert.block_applied = existing.block_applied;
                    alert.created_at = existing.created_at;
                    if let (Some(block), Some(previous)) = (alert.block.as_mut(), &existing.block) {
                        block.created_at = previous.created_at;
                    }
                    *existing = alert.clone();
                } else {
                    stored.push(alert.clone());
                }
                saved.push(alert);
            }
        }
        for alert in &saved {
            self.alert_index.insert(alert.id.clone(), diet_id.to_owned());
        }
        Ok(saved)
    }

    async fn list_alerts(&self, diet_id: &str) -> AppResult<Vec<OverloadAlert>> {
        Ok(self
            .alerts
            .get(diet_id)
            .map(|alerts| alerts.value().clone())
            .unwrap_or_default())
    }

    async fn mark_alert_seen(&self, alert_id: &str) -> AppResult<()> {
        let not_found =
            || AppError::not_found(format!("Alert {alert_id}")).with_resource_id(alert_id);
        let diet_id = self
            .alert_index
            .get(alert_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(not_found)?;

        let mut stored = self.alerts.get_mut(&diet_id).ok_or_else(not_found)?;
        let alert = stored
            .iter_mut()
            .find(|a| a.id == alert_id)
            .ok_or_else(not_found)?;
        alert.seen = true;
        Ok(())
    }

    async fn find_block(&self, block_id: &str, diet_id: &str) -> AppResult<RemediationBlock> {
        self.alerts
            .get(diet_id)
            .and_then(|alerts| {
                alerts
                    .iter()
                    .filter_map(|a| a.block.as_ref())
                    .find(|block| block.id == block_id)
                    .cloned()
            })
            .ok_or_else(|| block_not_found(block_id))
    }

    async fn mark_block_applied(&self, block_id: &str, diet_id: &str) -> AppResult<bool> {
        let mut stored = self
            .alerts
            .get_mut(diet_id)
            .ok_or_else(|| block_not_found(block_id))?;
        let alert = stored
            .iter_mut()
            .find(|a| a.block.as_ref().is_some_and(|block| block.id == block_id))
            .ok_or_else(|| block_not_found(block_id))?;

        let newly_applied = !alert.block_applied;
        alert.block_applied = true;
        Ok(newly_applied)
    }

    async fn save_trend_alerts(&self, client_id: &str, alerts: Vec<TrendAlert>) -> AppResult<()> {
        let mut stored = self.trend_alerts.entry(client_id.to_owned()).or_default();
        for alert in alerts {
            if let Some(existing) = stored.iter_mut().find(|a| a.id == alert.id) {
                *existing = alert;
            } else {
                stored.push(alert);
            }
        }
        Ok(())
    }

    async fn list_trend_alerts(&self, client_id: &str) -> AppResult<Vec<TrendAlert>> {
        Ok(self
            .trend_alerts
            .get(client_id)
            .map(|alerts| alerts.value().clone())
            .unwrap_or_default())
    }
}
