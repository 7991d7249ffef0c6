// ABOUTME: Overload rule engine detecting fiber, hydration, processed-food, macro and calorie patterns
// ABOUTME: Evaluates per-day totals against plan targets and emits typed alerts with preventive blocks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Overload rule engine.
//!
//! Rules run independently over the same [`WeeklyTotals`] and may all fire in
//! one pass. Output order is fixed: fiber excess, fiber deficiency, low
//! hydration, processed excess, protein/carbs/fat excess, caloric excess,
//! caloric deficit, repetitive pattern.
//!
//! The engine holds only immutable configuration. Alert ids depend on the
//! diet id and alert type, and every timestamp is the `analyzed_at`
//! argument, so repeated runs over unchanged input are identical.

use crate::aggregator::{DailyTotals, NutrientAggregator, WeeklyTotals};
use crate::config::{MonitorConfig, OverloadConfig};
use crate::food_classifier::{normalize_name, FoodClassifier};
use crate::format_days;
use crate::remediation::RemediationBlockBuilder;
use chrono::{DateTime, Utc};
use nutrition_core::models::{
    AlertDetails, AlertType, AlertValues, MacroNutrient, MacroTotals, MealPlan, NutritionTargets,
    OverloadAlert, Severity, Weekday,
};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::debug;

const FIBER_EXCESS_SOLUTIONS: &[&str] = &[
    "Reducir las porciones de cereales integrales y legumbres en los días afectados",
    "Sustituir parte de la verdura cruda por verdura cocinada",
    "Repartir los alimentos ricos en fibra a lo largo de la semana",
    "Acompañar las comidas ricas en fibra con más agua",
];

const FIBER_DEFICIENCY_SOLUTIONS: &[&str] = &[
    "Añadir más verduras, frutas o cereales integrales a las comidas",
    "Incluir legumbres al menos tres veces por semana",
    "Sustituir el pan blanco por pan integral",
    "Añadir semillas de chía o linaza a desayunos y meriendas",
];

const HYDRATION_SOLUTIONS: &[&str] = &[
    "Añadir un vaso de agua en cada comida",
    "Incluir infusiones o caldos en la merienda",
    "Incorporar frutas y verduras ricas en agua",
    "Programar recordatorios de hidratación durante el día",
];

const PROCESSED_SOLUTIONS: &[&str] = &[
    "Sustituir embutidos por proteína fresca (pollo, pescado, huevo)",
    "Cambiar bollería y galletas por fruta o frutos secos",
    "Preparar comidas caseras en lugar de precocinados",
    "Reemplazar refrescos por agua o infusiones",
];

const PROTEIN_EXCESS_SOLUTIONS: &[&str] = &[
    "Reducir la ración de carne o pescado en las comidas principales",
    "Eliminar suplementos de proteína en los días afectados",
    "Sustituir parte de la proteína por verdura o cereal integral",
];

const CARBS_EXCESS_SOLUTIONS: &[&str] = &[
    "Reducir la ración de pasta, arroz o pan en la cena",
    "Sustituir cereales refinados por verdura",
    "Concentrar los carbohidratos alrededor del entrenamiento",
];

const FAT_EXCESS_SOLUTIONS: &[&str] = &[
    "Medir el aceite de cocinado en lugar de añadirlo a ojo",
    "Moderar las raciones de frutos secos y quesos curados",
    "Preferir cocciones a la plancha, al horno o al vapor",
];

const CALORIC_EXCESS_SOLUTIONS: &[&str] = &[
    "Reducir el tamaño de las raciones en las comidas principales",
    "Sustituir snacks calóricos por fruta o lácteos desnatados",
    "Revisar salsas, aceites y bebidas azucaradas",
];

const CALORIC_DEFICIT_SOLUTIONS: &[&str] = &[
    "Añadir un snack entre comidas principales",
    "Aumentar la ración de carbohidratos complejos en torno al entrenamiento",
    "Incluir grasas saludables como aguacate, aceite de oliva o frutos secos",
];

const REPETITION_SOLUTIONS: &[&str] = &[
    "Alternar el alimento repetido con otro del mismo grupo",
    "Planificar un menú rotativo semanal",
    "Introducir un alimento nuevo cada semana",
];

/// Detects overload and deficiency patterns in meal plans
#[derive(Debug, Clone)]
pub struct OverloadRuleEngine {
    config: OverloadConfig,
    aggregator: NutrientAggregator,
    blocks: RemediationBlockBuilder,
}

impl Default for OverloadRuleEngine {
    fn default() -> Self {
        Self::new(&MonitorConfig::default())
    }
}

/// Inputs shared by every alert a single pass emits
struct AlertDraft<'a> {
    plan: &'a MealPlan,
    analyzed_at: DateTime<Utc>,
}

impl AlertDraft<'_> {
    fn alert(
        &self,
        alert_type: AlertType,
        severity: Severity,
        title: &str,
        description: String,
        details: AlertDetails,
        solutions: &[&str],
    ) -> OverloadAlert {
        OverloadAlert {
            id: format!("alerta_{}_{}", self.plan.id, alert_type.as_str()),
            diet_id: self.plan.id.clone(),
            client_id: self.plan.client_id.clone(),
            alert_type,
            severity,
            title: title.to_owned(),
            description,
            details,
            solutions: solutions.iter().map(|s| (*s).to_owned()).collect(),
            block: None,
            seen: false,
            block_applied: false,
            created_at: self.analyzed_at,
            updated_at: self.analyzed_at,
        }
    }
}

impl OverloadRuleEngine {
    /// Engine using the keyword food classifier
    #[must_use]
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            config: config.overload.clone(),
            aggregator: NutrientAggregator::new(config.aggregation.clone()),
            blocks: RemediationBlockBuilder::new(&config.overload),
        }
    }

    /// Engine using a custom food classifier
    #[must_use]
    pub fn with_classifier(config: &MonitorConfig, classifier: Arc<dyn FoodClassifier>) -> Self {
        Self {
            config: config.overload.clone(),
            aggregator: NutrientAggregator::with_classifier(config.aggregation.clone(), classifier),
            blocks: RemediationBlockBuilder::new(&config.overload),
        }
    }

    /// Rule thresholds in use
    #[must_use]
    pub const fn config(&self) -> &OverloadConfig {
        &self.config
    }

    /// Aggregator in use
    #[must_use]
    pub const fn aggregator(&self) -> &NutrientAggregator {
        &self.aggregator
    }

    /// Block builder in use
    #[must_use]
    pub const fn block_builder(&self) -> &RemediationBlockBuilder {
        &self.blocks
    }

    /// Resolve a plan's targets with the configured glass size
    #[must_use]
    pub fn targets_for(&self, plan: &MealPlan) -> NutritionTargets {
        NutritionTargets::from_plan(plan, self.aggregator.config().ml_per_glass)
    }

    /// Analyze a plan against its own targets
    #[must_use]
    pub fn analyze(&self, plan: &MealPlan, analyzed_at: DateTime<Utc>) -> Vec<OverloadAlert> {
        self.detect_overloads(plan, &self.targets_for(plan), analyzed_at)
    }

    /// Analyze many plans in parallel, each against its own targets
    ///
    /// The result has one alert list per plan, in input order.
    #[must_use]
    pub fn detect_overloads_batch(
        &self,
        plans: &[MealPlan],
        analyzed_at: DateTime<Utc>,
    ) -> Vec<Vec<OverloadAlert>> {
        plans
            .par_iter()
            .map(|plan| self.analyze(plan, analyzed_at))
            .collect()
    }

    /// Run every rule over `plan`
    ///
    /// A plan without meals yields no alerts. Rules whose target is missing
    /// or non-positive are skipped.
    #[must_use]
    pub fn detect_overloads(
        &self,
        plan: &MealPlan,
        targets: &NutritionTargets,
        analyzed_at: DateTime<Utc>,
    ) -> Vec<OverloadAlert> {
        if plan.meals.is_empty() {
            debug!(diet_id = %plan.id, "Meal plan has no meals, skipping overload rules");
            return Vec::new();
        }

        let totals = self.aggregator.aggregate(plan);
        let draft = AlertDraft { plan, analyzed_at };
        let mut alerts = Vec::new();

        let fiber_goal = positive(targets.fiber_goal_g);
        if let Some(goal) = fiber_goal {
            alerts.extend(self.fiber_excess(&draft, &totals, goal));
            alerts.extend(self.fiber_deficiency(&draft, &totals, goal));
        }
        if let Some(goal) = positive(targets.hydration_goal_ml) {
            alerts.extend(self.low_hydration(&draft, &totals, goal));
        }
        alerts.extend(self.processed_excess(&draft, &totals));
        if let Some(macros) = targets.macros {
            for nutrient in MacroNutrient::ALL {
                alerts.extend(self.macro_excess(&draft, &totals, nutrient, &macros));
            }
            if macros.calories > 0.0 {
                alerts.extend(self.caloric_excess(&draft, &totals, macros.calories));
                alerts.extend(self.caloric_deficit(&draft, &totals, macros.calories));
            }
        }
        if self.config.detect_repetition {
            alerts.extend(self.repetitive_pattern(&draft));
        }

        for alert in &mut alerts {
            alert.block = Some(self.blocks.build_block(alert));
        }

        debug!(
            diet_id = %plan.id,
            alert_count = alerts.len(),
            "Overload rules evaluated"
        );
        alerts
    }

    /// Days counted by a deficiency-style rule
    fn scanned_days<'t>(
        &self,
        totals: &'t WeeklyTotals,
    ) -> impl Iterator<Item = (Weekday, &'t DailyTotals)> + 't {
        let skip_empty = self.config.skip_empty_days;
        totals
            .iter()
            .filter(move |(_, day)| !(skip_empty && day.is_empty()))
            .map(|(weekday, day)| (*weekday, day))
    }

    fn fiber_excess(
        &self,
        draft: &AlertDraft<'_>,
        totals: &WeeklyTotals,
        goal: f64,
    ) -> Option<OverloadAlert> {
        let threshold = goal * self.config.fiber_excess_factor;
        let excess: BTreeSet<Weekday> = totals
            .iter()
            .filter(|(_, day)| day.fiber_g > threshold)
            .map(|(weekday, _)| *weekday)
            .collect();

        let run_length = self.config.fiber_excess_min_days.max(2);
        let affected = consecutive_runs(&excess, run_length);
        if affected.is_empty() {
            return None;
        }

        let description = format!(
            "La fibra estimada supera {threshold:.1} g ({:.0}% del objetivo de {goal:.1} g) en días consecutivos: {}",
            self.config.fiber_excess_factor * 100.0,
            format_days(&affected)
        );
        Some(draft.alert(
            AlertType::FiberExcess,
            Severity::Medium,
            "Exceso de fibra en días consecutivos",
            description,
            AlertDetails {
                pattern: Some(format!("{} días consecutivos con exceso de fibra", affected.len())),
                affected_days: affected,
                values: AlertValues::Fiber {
                    goal_g: goal,
                    threshold_g: threshold,
                    per_day: per_day(totals, |day| day.fiber_g),
                },
            },
            FIBER_EXCESS_SOLUTIONS,
        ))
    }

    fn fiber_deficiency(
        &self,
        draft: &AlertDraft<'_>,
        totals: &WeeklyTotals,
        goal: f64,
    ) -> Option<OverloadAlert> {
        let threshold = goal * self.config.fiber_deficiency_factor;
        let affected: Vec<Weekday> = self
            .scanned_days(totals)
            .filter(|(_, day)| day.fiber_g < threshold)
            .map(|(weekday, _)| weekday)
            .collect();
        if affected.len() < self.config.fiber_deficiency_min_days {
            return None;
        }

        let description = format!(
            "La fibra estimada queda por debajo de {threshold:.1} g (objetivo {goal:.1} g) en {} días: {}",
            affected.len(),
            format_days(&affected)
        );
        Some(draft.alert(
            AlertType::FiberDeficiency,
            Severity::High,
            "Deficiencia de fibra",
            description,
            AlertDetails {
                pattern: None,
                affected_days: affected,
                values: AlertValues::Fiber {
                    goal_g: goal,
                    threshold_g: threshold,
                    per_day: per_day(totals, |day| day.fiber_g),
                },
            },
            FIBER_DEFICIENCY_SOLUTIONS,
        ))
    }

    fn low_hydration(
        &self,
        draft: &AlertDraft<'_>,
        totals: &WeeklyTotals,
        goal: f64,
    ) -> Option<OverloadAlert> {
        let threshold = goal * self.config.hydration_deficit_factor;
        let affected: Vec<Weekday> = self
            .scanned_days(totals)
            .filter(|(_, day)| day.hydration_ml < threshold)
            .map(|(weekday, _)| weekday)
            .collect();
        if affected.len() < self.config.hydration_min_days {
            return None;
        }

        let description = format!(
            "La hidratación estimada queda por debajo de {threshold:.0} ml (objetivo {goal:.0} ml) en {} días: {}",
            affected.len(),
            format_days(&affected)
        );
        Some(draft.alert(
            AlertType::LowHydration,
            Severity::High,
            "Baja hidratación",
            description,
            AlertDetails {
                pattern: None,
                affected_days: affected,
                values: AlertValues::Hydration {
                    goal_ml: goal,
                    threshold_ml: threshold,
                    per_day: per_day(totals, |day| day.hydration_ml),
                },
            },
            HYDRATION_SOLUTIONS,
        ))
    }

    fn processed_excess(
        &self,
        draft: &AlertDraft<'_>,
        totals: &WeeklyTotals,
    ) -> Option<OverloadAlert> {
        let limit = self.config.max_processed_per_day;
        let affected: Vec<Weekday> = totals
            .iter()
            .filter(|(_, day)| day.processed_count > limit)
            .map(|(weekday, _)| *weekday)
            .collect();
        if affected.len() < self.config.processed_min_days {
            return None;
        }

        let description = format!(
            "Más de {limit} alimentos procesados al día en {} días: {}",
            affected.len(),
            format_days(&affected)
        );
        Some(draft.alert(
            AlertType::ProcessedExcess,
            Severity::Medium,
            "Exceso de alimentos procesados",
            description,
            AlertDetails {
                pattern: None,
                affected_days: affected,
                values: AlertValues::Processed {
                    limit,
                    per_day: totals
                        .iter()
                        .map(|(weekday, day)| (*weekday, day.processed_count))
                        .collect(),
                },
            },
            PROCESSED_SOLUTIONS,
        ))
    }

    fn macro_excess(
        &self,
        draft: &AlertDraft<'_>,
        totals: &WeeklyTotals,
        nutrient: MacroNutrient,
        targets: &MacroTotals,
    ) -> Option<OverloadAlert> {
        let target = match nutrient {
            MacroNutrient::Protein => targets.protein_g,
            MacroNutrient::Carbs => targets.carbs_g,
            MacroNutrient::Fat => targets.fat_g,
        };
        if target <= 0.0 {
            return None;
        }

        let value_of = |day: &DailyTotals| match nutrient {
            MacroNutrient::Protein => day.macros.protein_g,
            MacroNutrient::Carbs => day.macros.carbs_g,
            MacroNutrient::Fat => day.macros.fat_g,
        };
        let threshold = target * self.config.macro_excess_factor;
        let excess: Vec<(Weekday, f64)> = totals
            .iter()
            .map(|(weekday, day)| (*weekday, value_of(day)))
            .filter(|(_, value)| *value > threshold)
            .collect();
        if excess.len() < self.config.macro_excess_min_days {
            return None;
        }

        let mean_deviation = mean(excess.iter().map(|(_, value)| value - target));
        let affected: Vec<Weekday> = excess.iter().map(|(weekday, _)| *weekday).collect();
        let description = format!(
            "La ingesta de {} supera {threshold:.0} g (objetivo {target:.0} g) en {} días, con un exceso medio de {mean_deviation:.1} g: {}",
            nutrient.label(),
            affected.len(),
            format_days(&affected)
        );
        let (title, solutions) = match nutrient {
            MacroNutrient::Protein => ("Exceso de proteína", PROTEIN_EXCESS_SOLUTIONS),
            MacroNutrient::Carbs => ("Exceso de carbohidratos", CARBS_EXCESS_SOLUTIONS),
            MacroNutrient::Fat => ("Exceso de grasas", FAT_EXCESS_SOLUTIONS),
        };
        Some(draft.alert(
            nutrient.excess_alert(),
            Severity::Medium,
            title,
            description,
            AlertDetails {
                pattern: None,
                affected_days: affected,
                values: AlertValues::Macro {
                    nutrient,
                    target_g: target,
                    threshold_g: threshold,
                    per_day: per_day(totals, value_of),
                    mean_deviation_g: mean_deviation,
                },
            },
            solutions,
        ))
    }

    fn caloric_excess(
        &self,
        draft: &AlertDraft<'_>,
        totals: &WeeklyTotals,
        target: f64,
    ) -> Option<OverloadAlert> {
        let tolerance = self.config.calorie_tolerance_kcal;
        let excess: Vec<(Weekday, f64)> = totals
            .iter()
            .map(|(weekday, day)| (*weekday, day.macros.calories))
            .filter(|(_, calories)| *calories > target + tolerance)
            .collect();
        if excess.len() < self.config.calorie_min_days {
            return None;
        }

        let mean_deviation = mean(excess.iter().map(|(_, calories)| calories - target));
        let affected: Vec<Weekday> = excess.iter().map(|(weekday, _)| *weekday).collect();
        let description = format!(
            "Las calorías superan el objetivo de {target:.0} kcal en más de {tolerance:.0} kcal en {} días (exceso medio {mean_deviation:.0} kcal): {}",
            affected.len(),
            format_days(&affected)
        );
        Some(draft.alert(
            AlertType::CaloricExcess,
            Severity::Medium,
            "Exceso calórico",
            description,
            AlertDetails {
                pattern: None,
                affected_days: affected,
                values: AlertValues::Calories {
                    target_kcal: target,
                    tolerance_kcal: tolerance,
                    per_day: per_day(totals, |day| day.macros.calories),
                    mean_deviation_kcal: mean_deviation,
                },
            },
            CALORIC_EXCESS_SOLUTIONS,
        ))
    }

    fn caloric_deficit(
        &self,
        draft: &AlertDraft<'_>,
        totals: &WeeklyTotals,
        target: f64,
    ) -> Option<OverloadAlert> {
        let tolerance = self.config.calorie_tolerance_kcal;
        let deficit: Vec<(Weekday, f64)> = self
            .scanned_days(totals)
            .map(|(weekday, day)| (weekday, day.macros.calories))
            .filter(|(_, calories)| *calories < target - tolerance)
            .collect();
        if deficit.len() < self.config.calorie_min_days {
            return None;
        }

        let mean_deviation = mean(deficit.iter().map(|(_, calories)| calories - target));
        let affected: Vec<Weekday> = deficit.iter().map(|(weekday, _)| *weekday).collect();
        let description = format!(
            "Las calorías quedan por debajo del objetivo de {target:.0} kcal en más de {tolerance:.0} kcal en {} días (déficit medio {:.0} kcal): {}",
            affected.len(),
            mean_deviation.abs(),
            format_days(&affected)
        );
        Some(draft.alert(
            AlertType::CaloricDeficit,
            Severity::High,
            "Déficit calórico",
            description,
            AlertDetails {
                pattern: None,
                affected_days: affected,
                values: AlertValues::Calories {
                    target_kcal: target,
                    tolerance_kcal: tolerance,
                    per_day: per_day(totals, |day| day.macros.calories),
                    mean_deviation_kcal: mean_deviation,
                },
            },
            CALORIC_DEFICIT_SOLUTIONS,
        ))
    }

    fn repetitive_pattern(&self, draft: &AlertDraft<'_>) -> Option<OverloadAlert> {
        // normalized name -> (first spelling seen, days it appears on)
        let mut occurrences: BTreeMap<String, (String, BTreeSet<Weekday>)> = BTreeMap::new();
        for meal in &draft.plan.meals {
            let day = self.aggregator.resolve_day(meal.day);
            for food in meal.foods() {
                occurrences
                    .entry(normalize_name(&food.name))
                    .or_insert_with(|| (food.name.clone(), BTreeSet::new()))
                    .1
                    .insert(day);
            }
        }

        let min_days = self.config.repetition_min_days;
        let repeated: Vec<&(String, BTreeSet<Weekday>)> = occurrences
            .values()
            .filter(|(_, days)| days.len() >= min_days)
            .collect();
        // Most days first; BTreeMap order breaks ties by name
        let (food, days) = repeated
            .iter()
            .copied()
            .fold(None::<&(String, BTreeSet<Weekday>)>, |best, candidate| {
                match best {
                    Some(current) if current.1.len() >= candidate.1.len() => Some(current),
                    _ => Some(candidate),
                }
            })?;

        let affected: Vec<Weekday> = days.iter().copied().collect();
        let repeated_names: Vec<&str> = repeated.iter().map(|(name, _)| name.as_str()).collect();
        let description = format!(
            "\"{food}\" aparece en {} días distintos de la semana: {}",
            affected.len(),
            format_days(&affected)
        );
        Some(draft.alert(
            AlertType::RepetitivePattern,
            Severity::Low,
            "Patrón repetitivo de alimentos",
            description,
            AlertDetails {
                pattern: Some(format!(
                    "Alimentos repetidos en {min_days} o más días: {}",
                    repeated_names.join(", ")
                )),
                values: AlertValues::Repetition {
                    food: food.clone(),
                    day_count: affected.len(),
                },
                affected_days: affected,
            },
            REPETITION_SOLUTIONS,
        ))
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

fn per_day(totals: &WeeklyTotals, value_of: impl Fn(&DailyTotals) -> f64) -> BTreeMap<Weekday, f64> {
    totals
        .iter()
        .map(|(weekday, day)| (*weekday, value_of(day)))
        .collect()
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Union of all runs of calendar-adjacent days at least `min_run` long
///
/// Adjacency follows Monday to Sunday and never wraps from Sunday to Monday.
#[must_use]
pub fn consecutive_runs(days: &BTreeSet<Weekday>, min_run: usize) -> Vec<Weekday> {
    let mut affected = Vec::new();
    let mut run: Vec<Weekday> = Vec::new();
    for &day in days {
        let extends = run.last().and_then(|last| last.next()) == Some(day);
        if !extends {
            if run.len() >= min_run {
                affected.append(&mut run);
            }
            run.clear();
        }
        run.push(day);
    }
    if run.len() >= min_run {
        affected.append(&mut run);
    }
    affected
}
