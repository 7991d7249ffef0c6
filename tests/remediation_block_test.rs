// ABOUTME: Integration tests for preventive block construction
// ABOUTME: Verifies block kinds, deltas, target days and deterministic ids per alert type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::fixtures::analyzed_at;
use nutrition_intelligence::{OverloadConfig, RemediationBlockBuilder};
use nutrition_monitor::models::{
    AlertDetails, AlertType, AlertValues, BlockKind, MacroNutrient, OverloadAlert, Severity,
    Weekday,
};
use std::collections::BTreeMap;

fn alert(alert_type: AlertType, days: Vec<Weekday>, values: AlertValues) -> OverloadAlert {
    OverloadAlert {
        id: format!("alerta_dieta_1_{}", alert_type.as_str()),
        diet_id: "dieta_1".to_owned(),
        client_id: "cliente_1".to_owned(),
        alert_type,
        severity: Severity::Medium,
        title: "Alerta".to_owned(),
        description: String::new(),
        details: AlertDetails {
            affected_days: days,
            values,
            pattern: None,
        },
        solutions: Vec::new(),
        block: None,
        seen: false,
        block_applied: false,
        created_at: analyzed_at(),
        updated_at: analyzed_at(),
    }
}

fn fiber_values() -> AlertValues {
    AlertValues::Fiber {
        goal_g: 30.0,
        threshold_g: 39.0,
        per_day: BTreeMap::new(),
    }
}

#[test]
fn test_fiber_excess_block() {
    let alert = alert(
        AlertType::FiberExcess,
        vec![Weekday::Monday, Weekday::Tuesday],
        fiber_values(),
    );
    let block = RemediationBlockBuilder::default().build_block(&alert);

    assert_eq!(block.id, "bloque_alerta_dieta_1_exceso-fibra");
    assert_eq!(block.alert_id, alert.id);
    assert_eq!(block.kind, BlockKind::MacroAdjustment);
    assert_eq!(block.days, vec![Weekday::Monday, Weekday::Tuesday]);
    assert_eq!(block.created_at, analyzed_at());
    let adjustment = block.macro_adjustment.expect("fiber delta");
    assert_eq!(adjustment.fiber_g, Some(-5.0));
    assert!(adjustment.water_ml.is_none());
    assert!(block.description.contains("lunes, martes"));
}

#[test]
fn test_fiber_deficiency_block_adds_fiber() {
    let alert = alert(
        AlertType::FiberDeficiency,
        vec![Weekday::Wednesday, Weekday::Thursday, Weekday::Friday],
        fiber_values(),
    );
    let block = RemediationBlockBuilder::default().build_block(&alert);

    assert_eq!(block.kind, BlockKind::MacroAdjustment);
    assert_eq!(block.macro_adjustment.unwrap().fiber_g, Some(10.0));
    assert!(block.description.starts_with("Añadir 10 g"));
}

#[test]
fn test_hydration_block_is_a_beverage() {
    let alert = alert(
        AlertType::LowHydration,
        vec![Weekday::Sunday],
        AlertValues::Hydration {
            goal_ml: 2000.0,
            threshold_ml: 1400.0,
            per_day: BTreeMap::new(),
        },
    );
    let block = RemediationBlockBuilder::default().build_block(&alert);

    assert_eq!(block.kind, BlockKind::Beverage);
    assert_eq!(block.macro_adjustment.unwrap().water_ml, Some(500.0));
    assert_eq!(block.days, vec![Weekday::Sunday]);
}

#[test]
fn test_qualitative_blocks_carry_no_deltas() {
    let processed = alert(
        AlertType::ProcessedExcess,
        vec![Weekday::Friday, Weekday::Saturday],
        AlertValues::Processed {
            limit: 3,
            per_day: BTreeMap::new(),
        },
    );
    let repetition = alert(
        AlertType::RepetitivePattern,
        Weekday::ALL[..5].to_vec(),
        AlertValues::Repetition {
            food: "Tostada".to_owned(),
            day_count: 5,
        },
    );

    let builder = RemediationBlockBuilder::default();
    for alert in [processed, repetition] {
        let block = builder.build_block(&alert);
        assert_eq!(block.kind, BlockKind::Meal);
        assert!(block.macro_adjustment.is_none());
    }
}

#[test]
fn test_macro_block_reverses_rounded_mean_excess() {
    let alert = alert(
        AlertType::ProteinExcess,
        vec![Weekday::Monday, Weekday::Tuesday],
        AlertValues::Macro {
            nutrient: MacroNutrient::Protein,
            target_g: 150.0,
            threshold_g: 195.0,
            per_day: BTreeMap::new(),
            mean_deviation_g: 63.4,
        },
    );
    let adjustment = RemediationBlockBuilder::default()
        .build_block(&alert)
        .macro_adjustment
        .unwrap();

    assert_eq!(adjustment.protein_g, Some(-63.0));
    assert!(adjustment.carbs_g.is_none());
    assert!(adjustment.fat_g.is_none());
}

#[test]
fn test_calorie_block_direction_follows_deviation() {
    let deficit = alert(
        AlertType::CaloricDeficit,
        vec![Weekday::Thursday, Weekday::Friday],
        AlertValues::Calories {
            target_kcal: 2500.0,
            tolerance_kcal: 200.0,
            per_day: BTreeMap::new(),
            mean_deviation_kcal: -480.4,
        },
    );
    let block = RemediationBlockBuilder::default().build_block(&deficit);

    assert_eq!(block.macro_adjustment.unwrap().calories, Some(480.0));
    assert_eq!(block.description, "Añadir 480 kcal (jueves, viernes)");
}

#[test]
fn test_builder_uses_configured_deltas() {
    let config = OverloadConfig {
        fiber_excess_delta_g: -8.0,
        hydration_delta_ml: 750.0,
        ..OverloadConfig::default()
    };
    let builder = RemediationBlockBuilder::new(&config);

    let fiber = builder.build_block(&alert(
        AlertType::FiberExcess,
        vec![Weekday::Monday, Weekday::Tuesday],
        fiber_values(),
    ));
    assert_eq!(fiber.macro_adjustment.unwrap().fiber_g, Some(-8.0));

    let water = builder.build_block(&alert(
        AlertType::LowHydration,
        vec![Weekday::Monday],
        AlertValues::Hydration {
            goal_ml: 2000.0,
            threshold_ml: 1400.0,
            per_day: BTreeMap::new(),
        },
    ));
    assert_eq!(water.macro_adjustment.unwrap().water_ml, Some(750.0));
}

#[test]
fn test_rebuilding_is_idempotent() {
    let alert = alert(
        AlertType::FiberExcess,
        vec![Weekday::Saturday, Weekday::Sunday],
        fiber_values(),
    );
    let builder = RemediationBlockBuilder::default();
    assert_eq!(builder.build_block(&alert), builder.build_block(&alert));
}
