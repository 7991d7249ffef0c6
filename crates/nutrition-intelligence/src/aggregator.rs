// ABOUTME: Nutrient aggregation reducing a weekly meal plan to per-day totals
// ABOUTME: Groups meals by weekday and sums macros, estimated fiber, implied hydration and processed foods
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::AggregationConfig;
use crate::food_classifier::{FoodClassifier, KeywordFoodClassifier};
use nutrition_core::models::{MacroTotals, MealPlan, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Derived per-day totals; regenerated on every analysis, never persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyTotals {
    /// Estimated fiber (g)
    pub fiber_g: f64,
    /// Implied water intake (ml)
    pub hydration_ml: f64,
    /// Number of processed foods
    pub processed_count: u32,
    /// Number of meals scheduled on the day
    pub meal_count: u32,
    /// Summed calories and macros
    pub macros: MacroTotals,
}

impl DailyTotals {
    /// Whether no meal is scheduled on the day
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.meal_count == 0
    }
}

/// Per-day totals for all seven weekdays, Monday first
pub type WeeklyTotals = BTreeMap<Weekday, DailyTotals>;

/// Reduces meal plans to [`WeeklyTotals`]
#[derive(Clone)]
pub struct NutrientAggregator {
    config: AggregationConfig,
    classifier: Arc<dyn FoodClassifier>,
}

impl fmt::Debug for NutrientAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NutrientAggregator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for NutrientAggregator {
    fn default() -> Self {
        Self::new(AggregationConfig::default())
    }
}

impl NutrientAggregator {
    /// Aggregator using the keyword classifier
    #[must_use]
    pub fn new(config: AggregationConfig) -> Self {
        Self::with_classifier(config, Arc::new(KeywordFoodClassifier))
    }

    /// Aggregator using a custom classifier
    #[must_use]
    pub fn with_classifier(config: AggregationConfig, classifier: Arc<dyn FoodClassifier>) -> Self {
        Self { config, classifier }
    }

    /// Aggregation parameters in use
    #[must_use]
    pub const fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Day a meal is counted on, applying the configured fallback
    #[must_use]
    pub fn resolve_day(&self, day: Option<Weekday>) -> Weekday {
        day.unwrap_or(self.config.default_day)
    }

    /// Sum a plan into per-day totals
    ///
    /// All seven days are present in the result; days without meals are
    /// zero-filled.
    #[must_use]
    pub fn aggregate(&self, plan: &MealPlan) -> WeeklyTotals {
        let mut totals: WeeklyTotals = Weekday::ALL
            .iter()
            .map(|day| (*day, DailyTotals::default()))
            .collect();

        for meal in &plan.meals {
            if meal.day.is_none() {
                debug!(
                    diet_id = %plan.id,
                    meal_id = %meal.id,
                    default_day = %self.config.default_day,
                    "Meal has no day, counting it on the default day"
                );
            }
            let day = self.resolve_day(meal.day);
            let entry = totals.entry(day).or_default();

            entry.meal_count += 1;
            entry.macros += meal.totals();
            if meal.meal_type.is_main_meal() {
                entry.hydration_ml += self.config.ml_per_main_meal;
            }

            for food in meal.foods() {
                let classification = self.classifier.classify(food);
                entry.fiber_g += classification.fiber_g;
                if classification.is_processed {
                    entry.processed_count += 1;
                }
            }
        }

        totals
    }
}
