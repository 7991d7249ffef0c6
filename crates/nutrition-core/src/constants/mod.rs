// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Nutrition heuristics, trend thresholds and service identifiers shared across crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Default values for every tunable threshold live here so that the engine
//! configuration, the documentation and the tests agree on one number.

/// Hydration accounting
pub mod hydration {
    /// Millilitres in one "glass" of the plan's `vasosAgua` goal
    pub const ML_PER_GLASS: f64 = 250.0;
    /// Implied water intake contributed by each main meal
    pub const ML_PER_MAIN_MEAL: f64 = 250.0;
}

/// Fiber estimation multipliers applied to a food's quantity
pub mod fiber {
    /// Whole grains, oats, legumes and dark leafy greens
    pub const HIGH_FIBER_FACTOR: f64 = 3.0;
    /// Other fruit and vegetables
    pub const PRODUCE_FACTOR: f64 = 2.0;
    /// Everything else
    pub const BASELINE_FACTOR: f64 = 0.5;
}

/// Overload rule defaults
pub mod overload {
    /// A day is fiber-excess above this multiple of the goal
    pub const FIBER_EXCESS_FACTOR: f64 = 1.3;
    /// A day is fiber-deficient below this multiple of the goal
    pub const FIBER_DEFICIENCY_FACTOR: f64 = 0.7;
    /// A day is under-hydrated below this multiple of the goal
    pub const HYDRATION_DEFICIT_FACTOR: f64 = 0.7;
    /// A day is processed-heavy above this many processed foods
    pub const MAX_PROCESSED_PER_DAY: u32 = 3;
    /// A day exceeds a macro target above this multiple of the target
    pub const MACRO_EXCESS_FACTOR: f64 = 1.3;
    /// Calorie deviation from the daily target tolerated before flagging (kcal)
    pub const CALORIE_TOLERANCE_KCAL: f64 = 200.0;

    /// Minimum adjacent excess days for a fiber-excess alert
    pub const FIBER_EXCESS_MIN_DAYS: usize = 2;
    /// Minimum deficient days for a fiber-deficiency alert
    pub const FIBER_DEFICIENCY_MIN_DAYS: usize = 3;
    /// Minimum under-hydrated days for a hydration alert
    pub const HYDRATION_MIN_DAYS: usize = 1;
    /// Minimum processed-heavy days for a processed-excess alert
    pub const PROCESSED_MIN_DAYS: usize = 2;
    /// Minimum days above a macro target for a macro-excess alert
    pub const MACRO_EXCESS_MIN_DAYS: usize = 2;
    /// Minimum deviating days for a caloric excess/deficit alert
    pub const CALORIE_MIN_DAYS: usize = 2;
    /// Minimum distinct days a food must appear on to count as repetitive
    pub const REPETITION_MIN_DAYS: usize = 5;

    /// Fiber removed per day by a fiber-excess block (g)
    pub const FIBER_EXCESS_DELTA_G: f64 = -5.0;
    /// Fiber added per day by a fiber-deficiency block (g)
    pub const FIBER_DEFICIENCY_DELTA_G: f64 = 10.0;
    /// Water added per day by a hydration block (ml)
    pub const HYDRATION_DELTA_ML: f64 = 500.0;
}

/// Week-over-week comparison defaults
pub mod trend {
    /// Volume change ratio above which the change is significant
    pub const VOLUME_SIGNIFICANCE_RATIO: f64 = 0.15;
    /// Intensity change (0-10 points) above which the change is significant
    pub const INTENSITY_SIGNIFICANCE_POINTS: f64 = 1.0;
    /// Adherence change (percentage points) above which the change is significant
    pub const ADHERENCE_SIGNIFICANCE_POINTS: f64 = 10.0;
    /// Calorie change ratio above which the change is significant
    pub const CALORIES_SIGNIFICANCE_RATIO: f64 = 0.15;

    /// Volume drop (percent) that raises a high-severity alert
    pub const VOLUME_DROP_ALERT_PERCENT: f64 = 15.0;
    /// Adherence drop (points) that raises a high-severity alert
    pub const ADHERENCE_DROP_ALERT_POINTS: f64 = 10.0;
    /// Intensity rise (points) that raises a medium-severity alert
    pub const INTENSITY_RISE_ALERT_POINTS: f64 = 1.5;

    /// Weeks of history loaded for a trend analysis when the caller does not say
    pub const DEFAULT_HISTORY_WEEKS: usize = 8;
}

/// Service names used in structured logs
pub mod service_names {
    /// HTTP server
    pub const NUTRITION_MONITOR: &str = "nutrition-monitor";
    /// Command-line tool
    pub const NUTRITION_CLI: &str = "nutrition-cli";
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
}
