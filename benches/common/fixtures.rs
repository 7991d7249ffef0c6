// ABOUTME: Deterministic meal plan and weekly summary generators for benchmarks
// ABOUTME: Builds realistic week-long plans with mixed meal types and foods
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{Duration, NaiveDate};
use nutrition_monitor::models::{
    Food, IntensityProfile, MacroTotals, Meal, MealPlan, MealType, Weekday, WeeklySummary,
};

/// Food names cycled through generated meals
const FOODS: &[&str] = &[
    "Avena con leche",
    "Pechuga de pollo",
    "Arroz integral",
    "Ensalada verde",
    "Salmón",
    "Pan blanco",
    "Manzana",
    "Lentejas",
    "Yogur natural",
    "Galletas",
];

const MEAL_TYPES: [MealType; 6] = [
    MealType::Breakfast,
    MealType::MidMorning,
    MealType::Lunch,
    MealType::AfternoonSnack,
    MealType::Dinner,
    MealType::PostWorkout,
];

/// Number of meal plans in a batch
#[derive(Debug, Clone, Copy)]
pub enum PlanBatchSize {
    Small,
    Medium,
    Large,
}

impl PlanBatchSize {
    pub const fn count(self) -> usize {
        match self {
            Self::Small => 10,
            Self::Medium => 100,
            Self::Large => 1000,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "10",
            Self::Medium => "100",
            Self::Large => "1000",
        }
    }
}

/// A week-long plan with `meals_per_day` meals of three foods each
#[allow(clippy::cast_precision_loss)]
pub fn generate_plan(index: usize, meals_per_day: usize) -> MealPlan {
    let mut plan = MealPlan::new(format!("dieta_{index}"), format!("cliente_{index}"));
    plan.fiber_goal_g = Some(30.0);
    plan.water_glasses = Some(8);
    plan.macros = Some(MacroTotals {
        calories: 2400.0,
        protein_g: 150.0,
        carbs_g: 280.0,
        fat_g: 75.0,
    });

    for (day_index, day) in Weekday::ALL.iter().enumerate() {
        for slot in 0..meals_per_day {
            let seed = index + day_index * 7 + slot * 13;
            let foods = (0..3)
                .map(|n| {
                    let name = FOODS[(seed + n) % FOODS.len()];
                    Food::new(format!("f_{seed}_{n}"), name, 20.0 + (seed % 40) as f64)
                        .with_macros(MacroTotals {
                            calories: 120.0 + (seed % 90) as f64,
                            protein_g: 8.0 + (seed % 12) as f64,
                            carbs_g: 15.0 + (seed % 20) as f64,
                            fat_g: 4.0 + (seed % 6) as f64,
                        })
                })
                .collect();
            plan.meals.push(Meal::new(
                format!("m_{index}_{day_index}_{slot}"),
                format!("Comida {slot}"),
                MEAL_TYPES[slot % MEAL_TYPES.len()],
                Some(*day),
                foods,
            ));
        }
    }
    plan
}

/// `count` plans with five meals per day
pub fn generate_plans(size: PlanBatchSize) -> Vec<MealPlan> {
    (0..size.count()).map(|index| generate_plan(index, 5)).collect()
}

/// `weeks` consecutive summaries with oscillating metrics
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]
pub fn generate_history(weeks: usize) -> Vec<WeeklySummary> {
    let first_monday = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap_or_default();
    (0..weeks)
        .map(|index| {
            let start = first_monday + Duration::weeks(index as i64);
            let wave = (index % 5) as f64;
            WeeklySummary {
                week: format!("2025-W{:02}", index + 2),
                start_date: start,
                end_date: start + Duration::days(6),
                volume: 9_000.0 + wave * 600.0,
                intensity: IntensityProfile {
                    average: 5.5 + wave * 0.4,
                    low_pct: 30.0,
                    medium_pct: 50.0,
                    high_pct: 20.0,
                },
                adherence_pct: 95.0 - wave * 4.0,
                calories: 15_000.0 + wave * 300.0,
                sessions_completed: 4,
                sessions_scheduled: 5,
            }
        })
        .collect()
}
