// ABOUTME: Engine configuration replacing magic numbers in aggregation, overload rules and trends
// ABOUTME: Defaults mirror the documented heuristics; NUTRITION_* environment variables override them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Engine configuration.
//!
//! Every threshold the rules compare against is a field here. The
//! [`Default`] implementation reproduces the constants in
//! [`nutrition_core::constants`].

mod error;

pub use error::ConfigError;

use nutrition_core::constants::{hydration, overload, trend};
use nutrition_core::models::Weekday;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Nutrient aggregation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Day assigned to meals that carry no `dia`
    pub default_day: Weekday,

    /// Implied water per main meal (ml)
    pub ml_per_main_meal: f64,

    /// Millilitres per glass when resolving the plan's water goal
    pub ml_per_glass: f64,
}

/// Overload rule thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverloadConfig {
    /// Fiber-excess day when fiber > factor × goal
    pub fiber_excess_factor: f64,

    /// Fiber-deficient day when fiber < factor × goal
    pub fiber_deficiency_factor: f64,

    /// Under-hydrated day when water < factor × goal
    pub hydration_deficit_factor: f64,

    /// Processed-heavy day when processed count exceeds this
    pub max_processed_per_day: u32,

    /// Macro-excess day when a nutrient > factor × target
    pub macro_excess_factor: f64,

    /// Calorie deviation tolerated around the daily target (kcal)
    pub calorie_tolerance_kcal: f64,

    /// Adjacent excess days needed for a fiber-excess alert
    pub fiber_excess_min_days: usize,

    /// Deficient days needed for a fiber-deficiency alert
    pub fiber_deficiency_min_days: usize,

    /// Under-hydrated days needed for a hydration alert
    pub hydration_min_days: usize,

    /// Processed-heavy days needed for a processed alert
    pub processed_min_days: usize,

    /// Excess days needed for a macro-excess alert
    pub macro_excess_min_days: usize,

    /// Deviating days needed for a caloric alert
    pub calorie_min_days: usize,

    /// Distinct days a food must appear on to be repetitive
    pub repetition_min_days: usize,

    /// Enables the repetitive-pattern rule
    pub detect_repetition: bool,

    /// Excludes days without meals from deficiency-style rules
    pub skip_empty_days: bool,

    /// Fiber delta of a fiber-excess block (g/day)
    pub fiber_excess_delta_g: f64,

    /// Fiber delta of a fiber-deficiency block (g/day)
    pub fiber_deficiency_delta_g: f64,

    /// Water delta of a hydration block (ml/day)
    pub hydration_delta_ml: f64,
}

/// Week-over-week significance and alert thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Volume is significant when |Δ / previous| exceeds this ratio
    pub volume_significance_ratio: f64,

    /// Intensity is significant when |Δ| exceeds this many points
    pub intensity_significance_points: f64,

    /// Adherence is significant when |Δ| exceeds this many points
    pub adherence_significance_points: f64,

    /// Calories are significant when |Δ / previous| exceeds this ratio
    pub calories_significance_ratio: f64,

    /// Volume drop (percent) raising a high-severity alert
    pub volume_drop_alert_percent: f64,

    /// Adherence drop (points) raising a high-severity alert
    pub adherence_drop_alert_points: f64,

    /// Intensity rise (points) raising a medium-severity alert
    pub intensity_rise_alert_points: f64,
}

/// Main engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Aggregation parameters
    pub aggregation: AggregationConfig,
    /// Overload rule thresholds
    pub overload: OverloadConfig,
    /// Trend thresholds
    pub trend: TrendConfig,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            default_day: Weekday::Monday,
            ml_per_main_meal: hydration::ML_PER_MAIN_MEAL,
            ml_per_glass: hydration::ML_PER_GLASS,
        }
    }
}

impl Default for OverloadConfig {
    fn default() -> Self {
        Self {
            fiber_excess_factor: overload::FIBER_EXCESS_FACTOR,
            fiber_deficiency_factor: overload::FIBER_DEFICIENCY_FACTOR,
            hydration_deficit_factor: overload::HYDRATION_DEFICIT_FACTOR,
            max_processed_per_day: overload::MAX_PROCESSED_PER_DAY,
            macro_excess_factor: overload::MACRO_EXCESS_FACTOR,
            calorie_tolerance_kcal: overload::CALORIE_TOLERANCE_KCAL,
            fiber_excess_min_days: overload::FIBER_EXCESS_MIN_DAYS,
            fiber_deficiency_min_days: overload::FIBER_DEFICIENCY_MIN_DAYS,
            hydration_min_days: overload::HYDRATION_MIN_DAYS,
            processed_min_days: overload::PROCESSED_MIN_DAYS,
            macro_excess_min_days: overload::MACRO_EXCESS_MIN_DAYS,
            calorie_min_days: overload::CALORIE_MIN_DAYS,
            repetition_min_days: overload::REPETITION_MIN_DAYS,
            detect_repetition: false,
            skip_empty_days: false,
            fiber_excess_delta_g: overload::FIBER_EXCESS_DELTA_G,
            fiber_deficiency_delta_g: overload::FIBER_DEFICIENCY_DELTA_G,
            hydration_delta_ml: overload::HYDRATION_DELTA_ML,
        }
    }
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            volume_significance_ratio: trend::VOLUME_SIGNIFICANCE_RATIO,
            intensity_significance_points: trend::INTENSITY_SIGNIFICANCE_POINTS,
            adherence_significance_points: trend::ADHERENCE_SIGNIFICANCE_POINTS,
            calories_significance_ratio: trend::CALORIES_SIGNIFICANCE_RATIO,
            volume_drop_alert_percent: trend::VOLUME_DROP_ALERT_PERCENT,
            adherence_drop_alert_points: trend::ADHERENCE_DROP_ALERT_POINTS,
            intensity_rise_alert_points: trend::INTENSITY_RISE_ALERT_POINTS,
        }
    }
}

/// Parse `variable` into `target` when it is set
fn apply_override<T: FromStr>(variable: &'static str, target: &mut T) -> Result<(), ConfigError> {
    if let Ok(value) = env::var(variable) {
        let parsed = value.trim().parse().ok();
        *target = parsed.ok_or(ConfigError::InvalidValue { variable, value })?;
    }
    Ok(())
}

/// Like [`apply_override`] but also accepts `1`/`0`/`yes`/`no`
fn apply_flag_override(variable: &'static str, target: &mut bool) -> Result<(), ConfigError> {
    if let Ok(value) = env::var(variable) {
        let normalized = value.trim().to_lowercase();
        *target = match normalized.as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => return Err(ConfigError::InvalidValue { variable, value }),
        };
    }
    Ok(())
}

impl MonitorConfig {
    /// Load configuration from environment variables with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be parsed or the resulting
    /// configuration fails [`Self::validate`]
    pub fn from_environment() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let aggregation = &mut config.aggregation;
        apply_override("NUTRITION_DEFAULT_DAY", &mut aggregation.default_day)?;
        apply_override("NUTRITION_ML_PER_MAIN_MEAL", &mut aggregation.ml_per_main_meal)?;
        apply_override("NUTRITION_ML_PER_GLASS", &mut aggregation.ml_per_glass)?;

        let rules = &mut config.overload;
        apply_override("NUTRITION_FIBER_EXCESS_FACTOR", &mut rules.fiber_excess_factor)?;
        apply_override(
            "NUTRITION_FIBER_DEFICIENCY_FACTOR",
            &mut rules.fiber_deficiency_factor,
        )?;
        apply_override(
            "NUTRITION_HYDRATION_DEFICIT_FACTOR",
            &mut rules.hydration_deficit_factor,
        )?;
        apply_override(
            "NUTRITION_MAX_PROCESSED_PER_DAY",
            &mut rules.max_processed_per_day,
        )?;
        apply_override("NUTRITION_MACRO_EXCESS_FACTOR", &mut rules.macro_excess_factor)?;
        apply_override(
            "NUTRITION_CALORIE_TOLERANCE_KCAL",
            &mut rules.calorie_tolerance_kcal,
        )?;
        apply_flag_override("NUTRITION_SKIP_EMPTY_DAYS", &mut rules.skip_empty_days)?;
        apply_flag_override("NUTRITION_DETECT_REPETITION", &mut rules.detect_repetition)?;

        let trends = &mut config.trend;
        apply_override(
            "NUTRITION_TREND_VOLUME_RATIO",
            &mut trends.volume_significance_ratio,
        )?;
        apply_override(
            "NUTRITION_TREND_INTENSITY_POINTS",
            &mut trends.intensity_significance_points,
        )?;
        apply_override(
            "NUTRITION_TREND_ADHERENCE_POINTS",
            &mut trends.adherence_significance_points,
        )?;
        apply_override(
            "NUTRITION_TREND_CALORIES_RATIO",
            &mut trends.calories_significance_ratio,
        )?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if any threshold is non-finite or non-positive, the
    /// excess and deficiency factors overlap, or a minimum day count is
    /// outside `1..=7`
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_finite()?;

        let aggregation = &self.aggregation;
        if aggregation.ml_per_main_meal < 0.0 {
            return Err(ConfigError::InvalidRange("ml_per_main_meal must be >= 0"));
        }
        if aggregation.ml_per_glass <= 0.0 {
            return Err(ConfigError::InvalidRange("ml_per_glass must be > 0"));
        }

        let rules = &self.overload;
        if rules.fiber_excess_factor <= 1.0 {
            return Err(ConfigError::InvalidRange("fiber_excess_factor must be > 1"));
        }
        if rules.fiber_deficiency_factor <= 0.0 || rules.fiber_deficiency_factor >= 1.0 {
            return Err(ConfigError::InvalidRange(
                "fiber_deficiency_factor must be between 0 and 1 (exclusive)",
            ));
        }
        if rules.hydration_deficit_factor <= 0.0 || rules.hydration_deficit_factor >= 1.0 {
            return Err(ConfigError::InvalidRange(
                "hydration_deficit_factor must be between 0 and 1 (exclusive)",
            ));
        }
        if rules.macro_excess_factor <= 1.0 {
            return Err(ConfigError::InvalidRange("macro_excess_factor must be > 1"));
        }
        if rules.calorie_tolerance_kcal < 0.0 {
            return Err(ConfigError::InvalidRange("calorie_tolerance_kcal must be >= 0"));
        }

        let min_days = [
            ("fiber_excess_min_days", rules.fiber_excess_min_days),
            ("fiber_deficiency_min_days", rules.fiber_deficiency_min_days),
            ("hydration_min_days", rules.hydration_min_days),
            ("processed_min_days", rules.processed_min_days),
            ("macro_excess_min_days", rules.macro_excess_min_days),
            ("calorie_min_days", rules.calorie_min_days),
            ("repetition_min_days", rules.repetition_min_days),
        ];
        for (name, days) in min_days {
            if !(1..=Weekday::ALL.len()).contains(&days) {
                return Err(ConfigError::ValidationFailed(format!(
                    "{name} must be between 1 and 7, got {days}"
                )));
            }
        }

        let trends = &self.trend;
        let positive = [
            ("volume_significance_ratio", trends.volume_significance_ratio),
            (
                "intensity_significance_points",
                trends.intensity_significance_points,
            ),
            (
                "adherence_significance_points",
                trends.adherence_significance_points,
            ),
            ("calories_significance_ratio", trends.calories_significance_ratio),
            ("volume_drop_alert_percent", trends.volume_drop_alert_percent),
            ("adherence_drop_alert_points", trends.adherence_drop_alert_points),
            ("intensity_rise_alert_points", trends.intensity_rise_alert_points),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::ValidationFailed(format!(
                    "{name} must be > 0, got {value}"
                )));
            }
        }

        Ok(())
    }

    /// Every float threshold must be finite before the range checks run
    fn validate_finite(&self) -> Result<(), ConfigError> {
        let (aggregation, rules, trends) = (&self.aggregation, &self.overload, &self.trend);
        let values = [
            ("ml_per_main_meal", aggregation.ml_per_main_meal),
            ("ml_per_glass", aggregation.ml_per_glass),
            ("fiber_excess_factor", rules.fiber_excess_factor),
            ("fiber_deficiency_factor", rules.fiber_deficiency_factor),
            ("hydration_deficit_factor", rules.hydration_deficit_factor),
            ("macro_excess_factor", rules.macro_excess_factor),
            ("calorie_tolerance_kcal", rules.calorie_tolerance_kcal),
            ("fiber_excess_delta_g", rules.fiber_excess_delta_g),
            ("fiber_deficiency_delta_g", rules.fiber_deficiency_delta_g),
            ("hydration_delta_ml", rules.hydration_delta_ml),
            ("volume_significance_ratio", trends.volume_significance_ratio),
            (
                "intensity_significance_points",
                trends.intensity_significance_points,
            ),
            (
                "adherence_significance_points",
                trends.adherence_significance_points,
            ),
            ("calories_significance_ratio", trends.calories_significance_ratio),
            ("volume_drop_alert_percent", trends.volume_drop_alert_percent),
            ("adherence_drop_alert_points", trends.adherence_drop_alert_points),
            ("intensity_rise_alert_points", trends.intensity_rise_alert_points),
        ];
        match values.into_iter().find(|(_, value)| !value.is_finite()) {
            Some((name, value)) => Err(ConfigError::ValidationFailed(format!(
                "{name} must be a finite number, got {value}"
            ))),
            None => Ok(()),
        }
    }
}
