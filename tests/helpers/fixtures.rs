// ABOUTME: Meal plan and weekly summary builders for integration tests
// ABOUTME: Fiber-controlled plans via baseline foods and deterministic timestamps

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc, Weekday as ChronoWeekday};
use nutrition_monitor::models::{
    Food, IntensityProfile, MacroTotals, Meal, MealPlan, MealType, Weekday, WeeklySummary,
};

/// Fixed analysis instant
pub fn analyzed_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap()
}

/// A baseline food (0.5 g fiber per unit of quantity) yielding `fiber_g`
pub fn baseline_food(id: &str, fiber_g: f64) -> Food {
    Food::new(id, "Pollo", fiber_g * 2.0)
}

/// A food with macros and no fiber keyword
pub fn macro_food(id: &str, name: &str, macros: MacroTotals) -> Food {
    Food::new(id, name, 0.0).with_macros(macros)
}

/// Macro totals shorthand
pub const fn macros(calories: f64, protein_g: f64, carbs_g: f64, fat_g: f64) -> MacroTotals {
    MacroTotals {
        calories,
        protein_g,
        carbs_g,
        fat_g,
    }
}

/// A meal on `day` with the given foods
pub fn meal(id: &str, day: Option<Weekday>, meal_type: MealType, foods: Vec<Food>) -> Meal {
    Meal::new(id, format!("Comida {id}"), meal_type, day, foods)
}

/// Plan with one snack per day whose estimated fiber is given per weekday
///
/// Snacks are not main meals, so they add no implied hydration.
pub fn fiber_plan(id: &str, fiber_goal_g: f64, fiber_by_day: [f64; 7]) -> MealPlan {
    let mut plan = MealPlan::new(id, "cliente_1");
    plan.name = "Plan de fibra".to_owned();
    plan.fiber_goal_g = Some(fiber_goal_g);
    plan.meals = Weekday::ALL
        .iter()
        .zip(fiber_by_day)
        .map(|(day, fiber_g)| {
            let meal_id = format!("{id}_{}", day.as_str());
            meal(
                &meal_id,
                Some(*day),
                MealType::AfternoonSnack,
                vec![baseline_food(&format!("{meal_id}_a"), fiber_g)],
            )
        })
        .collect();
    plan
}

/// Plan with one lunch per day carrying the given macro totals
pub fn calorie_plan(id: &str, target: MacroTotals, by_day: [MacroTotals; 7]) -> MealPlan {
    let mut plan = MealPlan::new(id, "cliente_1");
    plan.macros = Some(target);
    plan.meals = Weekday::ALL
        .iter()
        .zip(by_day)
        .map(|(day, totals)| {
            let meal_id = format!("{id}_{}", day.as_str());
            meal(
                &meal_id,
                Some(*day),
                MealType::Lunch,
                vec![macro_food(&format!("{meal_id}_a"), "Arroz", totals)],
            )
        })
        .collect();
    plan
}

/// The end-to-end plan: 40 g fiber Monday and Tuesday, 30 g the rest, goal 30 g
pub fn fiber_excess_plan(id: &str) -> MealPlan {
    fiber_plan(id, 30.0, [40.0, 40.0, 30.0, 30.0, 30.0, 30.0, 30.0])
}

/// A weekly summary starting on `start`
pub fn week(
    label: &str,
    start: NaiveDate,
    volume: f64,
    intensity: f64,
    adherence_pct: f64,
    calories: f64,
) -> WeeklySummary {
    WeeklySummary {
        week: label.to_owned(),
        start_date: start,
        end_date: start + Duration::days(6),
        volume,
        intensity: IntensityProfile {
            average: intensity,
            low_pct: 30.0,
            medium_pct: 50.0,
            high_pct: 20.0,
        },
        adherence_pct,
        calories,
        sessions_completed: 4,
        sessions_scheduled: 5,
    }
}

/// Monday of ISO week `n` of 2025
pub fn week_start(n: u32) -> NaiveDate {
    NaiveDate::from_isoywd_opt(2025, n, ChronoWeekday::Mon).unwrap()
}

/// Two weeks where volume drops 20%, adherence drops 15 points and intensity rises 2 points
pub fn declining_history() -> Vec<WeeklySummary> {
    vec![
        week("2025-W09", week_start(9), 10_000.0, 6.0, 90.0, 14_000.0),
        week("2025-W10", week_start(10), 8_000.0, 8.0, 75.0, 14_000.0),
    ]
}
