// ABOUTME: Meal plan models for weekly nutrition planning
// ABOUTME: MealPlan, Meal, Food, MealType, Weekday, MacroTotals and resolved NutritionTargets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::hydration::ML_PER_GLASS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;
use thiserror::Error;

/// Day of the week a meal is scheduled on
///
/// Ordering is Monday through Sunday and adjacency never wraps around the
/// week: Sunday has no successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    /// Lunes
    #[serde(rename = "lunes")]
    Monday,
    /// Martes
    #[serde(rename = "martes")]
    Tuesday,
    /// Miércoles
    #[serde(rename = "miercoles", alias = "miércoles")]
    Wednesday,
    /// Jueves
    #[serde(rename = "jueves")]
    Thursday,
    /// Viernes
    #[serde(rename = "viernes")]
    Friday,
    /// Sábado
    #[serde(rename = "sabado", alias = "sábado")]
    Saturday,
    /// Domingo
    #[serde(rename = "domingo")]
    Sunday,
}

impl Weekday {
    /// All seven days in calendar order
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// The following day, or `None` for Sunday
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Monday => Some(Self::Tuesday),
            Self::Tuesday => Some(Self::Wednesday),
            Self::Wednesday => Some(Self::Thursday),
            Self::Thursday => Some(Self::Friday),
            Self::Friday => Some(Self::Saturday),
            Self::Saturday => Some(Self::Sunday),
            Self::Sunday => None,
        }
    }

    /// Wire identifier (`lunes`, `martes`, ...)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "lunes",
            Self::Tuesday => "martes",
            Self::Wednesday => "miercoles",
            Self::Thursday => "jueves",
            Self::Friday => "viernes",
            Self::Saturday => "sabado",
            Self::Sunday => "domingo",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a weekday identifier cannot be parsed
#[derive(Debug, Clone, Error)]
#[error("unknown weekday: {0}")]
pub struct ParseWeekdayError(pub String);

impl FromStr for Weekday {
    type Err = ParseWeekdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lunes" | "monday" | "mon" => Ok(Self::Monday),
            "martes" | "tuesday" | "tue" => Ok(Self::Tuesday),
            "miercoles" | "miércoles" | "wednesday" | "wed" => Ok(Self::Wednesday),
            "jueves" | "thursday" | "thu" => Ok(Self::Thursday),
            "viernes" | "friday" | "fri" => Ok(Self::Friday),
            "sabado" | "sábado" | "saturday" | "sat" => Ok(Self::Saturday),
            "domingo" | "sunday" | "sun" => Ok(Self::Sunday),
            other => Err(ParseWeekdayError(other.to_owned())),
        }
    }
}

/// Type of meal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MealType {
    /// Breakfast
    #[serde(rename = "desayuno")]
    Breakfast,
    /// Mid-morning snack
    #[serde(rename = "media-manana")]
    MidMorning,
    /// Lunch
    #[serde(rename = "almuerzo")]
    Lunch,
    /// Afternoon snack
    #[serde(rename = "merienda")]
    AfternoonSnack,
    /// Dinner
    #[serde(rename = "cena")]
    Dinner,
    /// Post-workout snack
    #[serde(rename = "post-entreno")]
    PostWorkout,
}

impl MealType {
    /// Breakfast, lunch and dinner; everything else is a snack
    #[must_use]
    pub const fn is_main_meal(self) -> bool {
        matches!(self, Self::Breakfast | Self::Lunch | Self::Dinner)
    }
}

/// Calories and macronutrients, either contributed by a food or totalled
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTotals {
    /// Energy (kcal)
    #[serde(rename = "calorias", default)]
    pub calories: f64,
    /// Protein (g)
    #[serde(rename = "proteinas", default)]
    pub protein_g: f64,
    /// Carbohydrates (g)
    #[serde(rename = "carbohidratos", default)]
    pub carbs_g: f64,
    /// Fat (g)
    #[serde(rename = "grasas", default)]
    pub fat_g: f64,
}

impl Add for MacroTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein_g: self.protein_g + rhs.protein_g,
            carbs_g: self.carbs_g + rhs.carbs_g,
            fat_g: self.fat_g + rhs.fat_g,
        }
    }
}

impl AddAssign for MacroTotals {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// A single food inside a meal, with absolute macro contributions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    /// Food identifier
    pub id: String,
    /// Display name; also the input of name-based classification
    #[serde(rename = "nombre")]
    pub name: String,
    /// Quantity in `unit`
    #[serde(rename = "cantidad", default)]
    pub quantity: f64,
    /// Unit of `quantity` (g, ml, unidad, ...)
    #[serde(rename = "unidad", default)]
    pub unit: String,
    /// Macro contribution of this food at `quantity`
    #[serde(flatten)]
    pub macros: MacroTotals,
}

impl Food {
    /// Create a food with zero macro contribution
    pub fn new(id: impl Into<String>, name: impl Into<String>, quantity: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            unit: String::new(),
            macros: MacroTotals::default(),
        }
    }

    /// Set the macro contribution
    #[must_use]
    pub const fn with_macros(mut self, macros: MacroTotals) -> Self {
        self.macros = macros;
        self
    }
}

/// A meal within a plan
///
/// The macro totals are derived from the foods and recomputed on every
/// mutation, including deserialization; totals present in an incoming
/// document are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MealDocument", into = "MealDocument")]
pub struct Meal {
    /// Meal identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Breakfast, lunch, snack, ...
    pub meal_type: MealType,
    /// Scheduled weekday; `None` falls back to the aggregator's default day
    pub day: Option<Weekday>,
    /// Optional time of day (`"08:00"`)
    pub schedule: Option<String>,
    foods: Vec<Food>,
    totals: MacroTotals,
}

impl Meal {
    /// Create a meal and compute its totals
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        meal_type: MealType,
        day: Option<Weekday>,
        foods: Vec<Food>,
    ) -> Self {
        let mut meal = Self {
            id: id.into(),
            name: name.into(),
            meal_type,
            day,
            schedule: None,
            foods: Vec::new(),
            totals: MacroTotals::default(),
        };
        meal.set_foods(foods);
        meal
    }

    /// Foods in serving order
    #[must_use]
    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    /// Derived macro totals
    #[must_use]
    pub const fn totals(&self) -> MacroTotals {
        self.totals
    }

    /// Replace all foods
    pub fn set_foods(&mut self, foods: Vec<Food>) {
        self.foods = foods;
        self.recompute_totals();
    }

    /// Append a food
    pub fn add_food(&mut self, food: Food) {
        self.foods.push(food);
        self.recompute_totals();
    }

    /// Remove a food by id, returning it if present
    pub fn remove_food(&mut self, food_id: &str) -> Option<Food> {
        let position = self.foods.iter().position(|food| food.id == food_id)?;
        let removed = self.foods.remove(position);
        self.recompute_totals();
        Some(removed)
    }

    fn recompute_totals(&mut self) {
        self.totals = self
            .foods
            .iter()
            .fold(MacroTotals::default(), |acc, food| acc + food.macros);
    }
}

/// Wire shape of a [`Meal`]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MealDocument {
    id: String,
    #[serde(rename = "nombre", default)]
    name: String,
    #[serde(rename = "tipo")]
    meal_type: MealType,
    #[serde(rename = "dia", default, skip_serializing_if = "Option::is_none")]
    day: Option<Weekday>,
    #[serde(rename = "horario", default, skip_serializing_if = "Option::is_none")]
    schedule: Option<String>,
    #[serde(rename = "alimentos", default)]
    foods: Vec<Food>,
    #[serde(flatten)]
    totals: MacroTotals,
}

impl From<MealDocument> for Meal {
    fn from(doc: MealDocument) -> Self {
        let mut meal = Self::new(doc.id, doc.name, doc.meal_type, doc.day, doc.foods);
        meal.schedule = doc.schedule;
        meal
    }
}

impl From<Meal> for MealDocument {
    fn from(meal: Meal) -> Self {
        Self {
            id: meal.id,
            name: meal.name,
            meal_type: meal.meal_type,
            day: meal.day,
            schedule: meal.schedule,
            totals: meal.totals,
            foods: meal.foods,
        }
    }
}

/// A client's weekly meal plan ("dieta")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    /// Diet identifier
    pub id: String,
    /// Owning client
    #[serde(rename = "clienteId")]
    pub client_id: String,
    /// Display name
    #[serde(rename = "nombre", default)]
    pub name: String,
    /// Meals across the week
    #[serde(rename = "comidas", default)]
    pub meals: Vec<Meal>,
    /// Daily calorie and macro targets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macros: Option<MacroTotals>,
    /// Daily fiber goal (g)
    #[serde(rename = "fibra", default, skip_serializing_if = "Option::is_none")]
    pub fiber_goal_g: Option<f64>,
    /// Daily water goal in glasses
    #[serde(rename = "vasosAgua", default, skip_serializing_if = "Option::is_none")]
    pub water_glasses: Option<u32>,
}

impl MealPlan {
    /// Create an empty plan with no targets
    pub fn new(id: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            client_id: client_id.into(),
            name: String::new(),
            meals: Vec::new(),
            macros: None,
            fiber_goal_g: None,
            water_glasses: None,
        }
    }

    /// Targets resolved with the standard 250 ml glass
    #[must_use]
    pub fn targets(&self) -> NutritionTargets {
        NutritionTargets::from_plan(self, ML_PER_GLASS)
    }
}

/// Daily goals the overload rules compare against
///
/// A `None` goal disables every rule that depends on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionTargets {
    /// Fiber goal (g/day)
    pub fiber_goal_g: Option<f64>,
    /// Hydration goal (ml/day)
    pub hydration_goal_ml: Option<f64>,
    /// Calorie and macro goals per day
    pub macros: Option<MacroTotals>,
}

impl NutritionTargets {
    /// Resolve targets from a plan, converting glasses to millilitres
    #[must_use]
    pub fn from_plan(plan: &MealPlan, ml_per_glass: f64) -> Self {
        Self {
            fiber_goal_g: plan.fiber_goal_g,
            hydration_goal_ml: plan
                .water_glasses
                .map(|glasses| f64::from(glasses) * ml_per_glass),
            macros: plan.macros,
        }
    }
}
