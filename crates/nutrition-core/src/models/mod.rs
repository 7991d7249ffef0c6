// ABOUTME: Core data models for meal plans, overload alerts and weekly trends
// ABOUTME: Spanish wire names via serde renames, English identifiers in Rust
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Wire field names follow the documents the dashboard stores (`dietaId`,
//! `diasAfectados`, `semanaActual`, ...). Rust code only ever sees the
//! English identifiers.

mod alert;
mod meal_plan;
mod weekly;

pub use alert::{
    AlertDetails, AlertType, AlertValues, BlockKind, MacroAdjustment, MacroNutrient,
    OverloadAlert, RemediationBlock, Severity,
};
pub use meal_plan::{
    Food, MacroTotals, Meal, MealPlan, MealType, NutritionTargets, ParseWeekdayError, Weekday,
};
pub use weekly::{
    IntensityProfile, MetricChange, MetricChanges, Tendency, TrendAlert, TrendAlertType,
    TrendReport, WeeklyComparison, WeeklySummary,
};
