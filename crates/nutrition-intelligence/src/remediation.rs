// ABOUTME: Preventive block construction describing how to correct an overload alert
// ABOUTME: Derives kind, deltas and target days from the alert alone; never applies anything
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::OverloadConfig;
use crate::format_days;
use nutrition_core::models::{
    AlertType, AlertValues, BlockKind, MacroAdjustment, MacroNutrient, OverloadAlert,
    RemediationBlock,
};

/// Builds the [`RemediationBlock`] attached to each alert
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemediationBlockBuilder {
    fiber_excess_delta_g: f64,
    fiber_deficiency_delta_g: f64,
    hydration_delta_ml: f64,
}

impl Default for RemediationBlockBuilder {
    fn default() -> Self {
        Self::new(&OverloadConfig::default())
    }
}

impl RemediationBlockBuilder {
    /// Builder using the fixed deltas from the overload configuration
    #[must_use]
    pub const fn new(config: &OverloadConfig) -> Self {
        Self {
            fiber_excess_delta_g: config.fiber_excess_delta_g,
            fiber_deficiency_delta_g: config.fiber_deficiency_delta_g,
            hydration_delta_ml: config.hydration_delta_ml,
        }
    }

    /// Describe the plan change that addresses `alert`
    ///
    /// The block id is derived from the alert id and the block inherits the
    /// alert's timestamp, so rebuilding from the same alert is idempotent.
    #[must_use]
    pub fn build_block(&self, alert: &OverloadAlert) -> RemediationBlock {
        let days = alert.details.affected_days.clone();
        let day_list = format_days(&days);

        let (kind, name, description, adjustment) = match alert.alert_type {
            AlertType::FiberExcess => (
                BlockKind::MacroAdjustment,
                "Reducción de fibra".to_owned(),
                format!(
                    "Reducir {:.0} g de fibra ({day_list})",
                    self.fiber_excess_delta_g.abs()
                ),
                Some(MacroAdjustment {
                    fiber_g: Some(self.fiber_excess_delta_g),
                    ..MacroAdjustment::default()
                }),
            ),
            AlertType::FiberDeficiency => (
                BlockKind::MacroAdjustment,
                "Refuerzo de fibra".to_owned(),
                format!(
                    "Añadir {:.0} g de fibra ({day_list})",
                    self.fiber_deficiency_delta_g
                ),
                Some(MacroAdjustment {
                    fiber_g: Some(self.fiber_deficiency_delta_g),
                    ..MacroAdjustment::default()
                }),
            ),
            AlertType::LowHydration => (
                BlockKind::Beverage,
                "Refuerzo de hidratación".to_owned(),
                format!(
                    "Añadir {:.0} ml de agua ({day_list})",
                    self.hydration_delta_ml
                ),
                Some(MacroAdjustment {
                    water_ml: Some(self.hydration_delta_ml),
                    ..MacroAdjustment::default()
                }),
            ),
            AlertType::ProcessedExcess => (
                BlockKind::Meal,
                "Sustitución de procesados".to_owned(),
                format!("Sustituir alimentos procesados por opciones frescas ({day_list})"),
                None,
            ),
            AlertType::ProteinExcess | AlertType::CarbsExcess | AlertType::FatExcess => {
                Self::macro_block(&alert.details.values, &day_list)
            }
            AlertType::CaloricExcess | AlertType::CaloricDeficit => {
                Self::calorie_block(&alert.details.values, &day_list)
            }
            AlertType::RepetitivePattern => (
                BlockKind::Meal,
                "Rotación de alimentos".to_owned(),
                format!("Sustituir el alimento repetido por una alternativa ({day_list})"),
                None,
            ),
        };

        RemediationBlock {
            id: format!("bloque_{}", alert.id),
            alert_id: alert.id.clone(),
            kind,
            name,
            description,
            macro_adjustment: adjustment,
            days,
            created_at: alert.created_at,
        }
    }

    fn macro_block(
        values: &AlertValues,
        day_list: &str,
    ) -> (BlockKind, String, String, Option<MacroAdjustment>) {
        let AlertValues::Macro {
            nutrient,
            mean_deviation_g,
            ..
        } = values
        else {
            return (
                BlockKind::MacroAdjustment,
                "Ajuste de macronutrientes".to_owned(),
                format!("Revisar el reparto de macronutrientes ({day_list})"),
                None,
            );
        };

        let delta = -mean_deviation_g.round();
        let mut adjustment = MacroAdjustment::default();
        match nutrient {
            MacroNutrient::Protein => adjustment.protein_g = Some(delta),
            MacroNutrient::Carbs => adjustment.carbs_g = Some(delta),
            MacroNutrient::Fat => adjustment.fat_g = Some(delta),
        }

        (
            BlockKind::MacroAdjustment,
            format!("Ajuste de {}", nutrient.label()),
            format!(
                "Reducir {:.0} g de {} ({day_list})",
                delta.abs(),
                nutrient.label()
            ),
            Some(adjustment),
        )
    }

    fn calorie_block(
        values: &AlertValues,
        day_list: &str,
    ) -> (BlockKind, String, String, Option<MacroAdjustment>) {
        let AlertValues::Calories {
            mean_deviation_kcal,
            ..
        } = values
        else {
            return (
                BlockKind::MacroAdjustment,
                "Ajuste calórico".to_owned(),
                format!("Revisar el aporte calórico ({day_list})"),
                None,
            );
        };

        let delta = -mean_deviation_kcal.round();
        let verb = if delta < 0.0 { "Reducir" } else { "Añadir" };
        (
            BlockKind::MacroAdjustment,
            "Ajuste calórico".to_owned(),
            format!("{verb} {:.0} kcal ({day_list})", delta.abs()),
            Some(MacroAdjustment {
                calories: Some(delta),
                ..MacroAdjustment::default()
            }),
        )
    }
}
