// ABOUTME: Nutrition monitoring engine crate
// ABOUTME: Food classification, nutrient aggregation, overload rules, preventive blocks and weekly trends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nutrition Intelligence
//!
//! Pure computation over [`nutrition_core`] models. Nothing in this crate
//! performs I/O or reads the clock: callers pass fully loaded plans and
//! histories plus the analysis timestamp, and get fresh results back.
//!
//! Data flow:
//!
//! ```text
//! MealPlan -> NutrientAggregator -> WeeklyTotals -> OverloadRuleEngine -> OverloadAlert (+ RemediationBlock)
//! [WeeklySummary] -> TrendComparator -> WeeklyComparison + TrendAlert
//! ```

use nutrition_core::models::Weekday;

/// Engine configuration and validation
pub mod config;

/// Food classifier trait and keyword heuristic
pub mod food_classifier;

/// Per-day nutrient aggregation
pub mod aggregator;

/// Overload and deficiency rules
pub mod overload_rules;

/// Preventive block builder
pub mod remediation;

/// Week-over-week comparison
pub mod trend_comparator;

pub use aggregator::{DailyTotals, NutrientAggregator, WeeklyTotals};
pub use config::{AggregationConfig, ConfigError, MonitorConfig, OverloadConfig, TrendConfig};
pub use food_classifier::{FoodCategory, FoodClassification, FoodClassifier, KeywordFoodClassifier};
pub use overload_rules::OverloadRuleEngine;
pub use remediation::RemediationBlockBuilder;
pub use trend_comparator::{Significance, TrendComparator};

/// Comma-separated weekday list for alert and block descriptions
pub(crate) fn format_days(days: &[Weekday]) -> String {
    days.iter()
        .copied()
        .map(Weekday::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
