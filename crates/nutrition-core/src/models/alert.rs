// ABOUTME: Overload alert and preventive block models emitted by the rule engine
// ABOUTME: Typed alert details replace free-form value maps with one variant per measured metric
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::meal_plan::Weekday;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of overload or deficiency pattern an alert reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertType {
    /// Fiber above goal on adjacent days
    #[serde(rename = "exceso-fibra")]
    FiberExcess,
    /// Fiber below goal on several days
    #[serde(rename = "deficiencia-fibra")]
    FiberDeficiency,
    /// Implied water intake below goal
    #[serde(rename = "baja-hidratacion")]
    LowHydration,
    /// Protein above target
    #[serde(rename = "exceso-proteina")]
    ProteinExcess,
    /// Carbohydrates above target
    #[serde(rename = "exceso-carbohidratos")]
    CarbsExcess,
    /// Fat above target
    #[serde(rename = "exceso-grasas")]
    FatExcess,
    /// Too many processed foods
    #[serde(rename = "exceso-procesados")]
    ProcessedExcess,
    /// Calories under target beyond tolerance
    #[serde(rename = "deficit-calorico")]
    CaloricDeficit,
    /// Calories over target beyond tolerance
    #[serde(rename = "exceso-calorico")]
    CaloricExcess,
    /// Same food repeated across most of the week
    #[serde(rename = "patron-repetitivo")]
    RepetitivePattern,
}

impl AlertType {
    /// Wire identifier, also used to build deterministic ids
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FiberExcess => "exceso-fibra",
            Self::FiberDeficiency => "deficiencia-fibra",
            Self::LowHydration => "baja-hidratacion",
            Self::ProteinExcess => "exceso-proteina",
            Self::CarbsExcess => "exceso-carbohidratos",
            Self::FatExcess => "exceso-grasas",
            Self::ProcessedExcess => "exceso-procesados",
            Self::CaloricDeficit => "deficit-calorico",
            Self::CaloricExcess => "exceso-calorico",
            Self::RepetitivePattern => "patron-repetitivo",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Alta
    #[serde(rename = "alta")]
    High,
    /// Media
    #[serde(rename = "media")]
    Medium,
    /// Baja
    #[serde(rename = "baja")]
    Low,
}

/// Macronutrient tracked by the macro-excess rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MacroNutrient {
    /// Protein
    #[serde(rename = "proteinas")]
    Protein,
    /// Carbohydrates
    #[serde(rename = "carbohidratos")]
    Carbs,
    /// Fat
    #[serde(rename = "grasas")]
    Fat,
}

impl MacroNutrient {
    /// All tracked nutrients in rule evaluation order
    pub const ALL: [Self; 3] = [Self::Protein, Self::Carbs, Self::Fat];

    /// Alert type raised when this nutrient is in excess
    #[must_use]
    pub const fn excess_alert(self) -> AlertType {
        match self {
            Self::Protein => AlertType::ProteinExcess,
            Self::Carbs => AlertType::CarbsExcess,
            Self::Fat => AlertType::FatExcess,
        }
    }

    /// Spanish display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Protein => "proteína",
            Self::Carbs => "carbohidratos",
            Self::Fat => "grasas",
        }
    }
}

/// Measured values behind an alert, one variant per metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "metrica")]
pub enum AlertValues {
    /// Estimated fiber per day against the goal
    #[serde(rename = "fibra")]
    Fiber {
        /// Daily fiber goal (g)
        #[serde(rename = "objetivo")]
        goal_g: f64,
        /// Threshold crossed (g)
        #[serde(rename = "umbral")]
        threshold_g: f64,
        /// Estimated fiber per day (g)
        #[serde(rename = "porDia")]
        per_day: BTreeMap<Weekday, f64>,
    },
    /// Implied water intake per day against the goal
    #[serde(rename = "hidratacion")]
    Hydration {
        /// Daily water goal (ml)
        #[serde(rename = "objetivo")]
        goal_ml: f64,
        /// Threshold crossed (ml)
        #[serde(rename = "umbral")]
        threshold_ml: f64,
        /// Implied intake per day (ml)
        #[serde(rename = "porDia")]
        per_day: BTreeMap<Weekday, f64>,
    },
    /// Processed food counts per day
    #[serde(rename = "procesados")]
    Processed {
        /// Maximum tolerated processed foods per day
        #[serde(rename = "limite")]
        limit: u32,
        /// Processed foods per day
        #[serde(rename = "porDia")]
        per_day: BTreeMap<Weekday, u32>,
    },
    /// A macronutrient against its daily target
    #[serde(rename = "macro")]
    Macro {
        /// Which nutrient
        #[serde(rename = "nutriente")]
        nutrient: MacroNutrient,
        /// Daily target (g)
        #[serde(rename = "objetivo")]
        target_g: f64,
        /// Threshold crossed (g)
        #[serde(rename = "umbral")]
        threshold_g: f64,
        /// Grams per day
        #[serde(rename = "porDia")]
        per_day: BTreeMap<Weekday, f64>,
        /// Mean excess over target on the affected days (g)
        #[serde(rename = "desviacionMedia")]
        mean_deviation_g: f64,
    },
    /// Calories against the daily target
    #[serde(rename = "calorias")]
    Calories {
        /// Daily target (kcal)
        #[serde(rename = "objetivo")]
        target_kcal: f64,
        /// Tolerated deviation (kcal)
        #[serde(rename = "tolerancia")]
        tolerance_kcal: f64,
        /// Calories per day
        #[serde(rename = "porDia")]
        per_day: BTreeMap<Weekday, f64>,
        /// Signed mean deviation from target on the affected days (kcal)
        #[serde(rename = "desviacionMedia")]
        mean_deviation_kcal: f64,
    },
    /// A food repeated across the week
    #[serde(rename = "repeticion")]
    Repetition {
        /// Repeated food name
        #[serde(rename = "alimento")]
        food: String,
        /// Number of distinct days it appears on
        #[serde(rename = "dias")]
        day_count: usize,
    },
}

/// Structured details of an alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertDetails {
    /// Affected days, Monday first
    #[serde(rename = "diasAfectados")]
    pub affected_days: Vec<Weekday>,
    /// Measured values
    #[serde(rename = "valores")]
    pub values: AlertValues,
    /// Human-readable pattern summary
    #[serde(rename = "patron", default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Kind of preventive block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    /// Numeric macro/fiber/water deltas
    #[serde(rename = "ajuste-macros")]
    MacroAdjustment,
    /// Replace or add a meal
    #[serde(rename = "comida")]
    Meal,
    /// Add a snack
    #[serde(rename = "snack")]
    Snack,
    /// Add a beverage
    #[serde(rename = "bebida")]
    Beverage,
}

/// Per-day deltas a block proposes; unset entries are left untouched
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroAdjustment {
    /// Calories (kcal)
    #[serde(rename = "calorias", default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    /// Protein (g)
    #[serde(rename = "proteinas", default, skip_serializing_if = "Option::is_none")]
    pub protein_g: Option<f64>,
    /// Carbohydrates (g)
    #[serde(rename = "carbohidratos", default, skip_serializing_if = "Option::is_none")]
    pub carbs_g: Option<f64>,
    /// Fat (g)
    #[serde(rename = "grasas", default, skip_serializing_if = "Option::is_none")]
    pub fat_g: Option<f64>,
    /// Fiber (g)
    #[serde(rename = "fibra", default, skip_serializing_if = "Option::is_none")]
    pub fiber_g: Option<f64>,
    /// Water (ml)
    #[serde(rename = "agua", default, skip_serializing_if = "Option::is_none")]
    pub water_ml: Option<f64>,
}

impl MacroAdjustment {
    /// Whether no delta is set
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.calories.is_none()
            && self.protein_g.is_none()
            && self.carbs_g.is_none()
            && self.fat_g.is_none()
            && self.fiber_g.is_none()
            && self.water_ml.is_none()
    }
}

/// A proposed, not-yet-applied plan adjustment addressing one alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemediationBlock {
    /// Block identifier
    pub id: String,
    /// Alert this block addresses
    #[serde(rename = "alertaId")]
    pub alert_id: String,
    /// Block kind
    #[serde(rename = "tipo")]
    pub kind: BlockKind,
    /// Display name
    #[serde(rename = "nombre")]
    pub name: String,
    /// What the block changes
    #[serde(rename = "descripcion")]
    pub description: String,
    /// Numeric deltas, absent for qualitative blocks
    #[serde(rename = "ajusteMacros", default, skip_serializing_if = "Option::is_none")]
    pub macro_adjustment: Option<MacroAdjustment>,
    /// Days the deltas apply to
    #[serde(rename = "diasAplicar")]
    pub days: Vec<Weekday>,
    /// Creation timestamp
    #[serde(rename = "creadoEn")]
    pub created_at: DateTime<Utc>,
}

/// A detected overload/deficiency pattern in a meal plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverloadAlert {
    /// Alert identifier, stable across analysis passes
    pub id: String,
    /// Diet the alert belongs to
    #[serde(rename = "dietaId")]
    pub diet_id: String,
    /// Client owning the diet
    #[serde(rename = "clienteId")]
    pub client_id: String,
    /// Pattern kind
    #[serde(rename = "tipo")]
    pub alert_type: AlertType,
    /// Severity
    #[serde(rename = "severidad")]
    pub severity: Severity,
    /// Short title
    #[serde(rename = "titulo")]
    pub title: String,
    /// Description embedding the measured figures
    #[serde(rename = "descripcion")]
    pub description: String,
    /// Affected days and values
    #[serde(rename = "detalles")]
    pub details: AlertDetails,
    /// Ordered remediation suggestions
    #[serde(rename = "soluciones")]
    pub solutions: Vec<String>,
    /// Preventive block, when one was built
    #[serde(rename = "bloquePreventivo", default, skip_serializing_if = "Option::is_none")]
    pub block: Option<RemediationBlock>,
    /// Set when the user has seen the alert
    #[serde(rename = "vista", default)]
    pub seen: bool,
    /// Set when the preventive block was applied
    #[serde(rename = "bloqueAplicado", default)]
    pub block_applied: bool,
    /// Creation timestamp
    #[serde(rename = "creadoEn")]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    #[serde(rename = "actualizadoEn")]
    pub updated_at: DateTime<Utc>,
}
