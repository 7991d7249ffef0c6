// ABOUTME: Integration tests for week-over-week trend comparison
// ABOUTME: Covers significance boundaries, zero guards, tendency votes and trend alerts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::fixtures::{analyzed_at, declining_history, week, week_start};
use nutrition_intelligence::trend_comparator::{classify_tendency, metric_change};
use nutrition_intelligence::{MonitorConfig, Significance, TrendComparator, TrendConfig};
use nutrition_monitor::models::{Severity, Tendency, TrendAlertType, WeeklySummary};

#[test]
fn test_declining_week_raises_three_alerts() {
    let report = TrendComparator::default().analyze("cliente_1", &declining_history(), analyzed_at());

    assert_eq!(report.comparisons.len(), 1);
    assert_eq!(report.latest_tendency(), Some(Tendency::Worsening));

    let types: Vec<_> = report.alerts.iter().map(|a| a.alert_type).collect();
    assert_eq!(
        types,
        vec![
            TrendAlertType::VolumeDrop,
            TrendAlertType::AdherenceDrop,
            TrendAlertType::IntensitySpike
        ]
    );

    let volume = &report.alerts[0];
    assert_eq!(volume.id, "tendencia_cliente_1_2025-W10_caida-volumen");
    assert_eq!(volume.severity, Severity::High);
    assert_eq!(volume.week, "2025-W10");
    assert!((volume.value + 20.0).abs() < 1e-9);
    assert!(volume.message.contains("20.0%"));
    assert!(volume.message.contains("10000 → 8000"));

    let adherence = &report.alerts[1];
    assert_eq!(adherence.severity, Severity::High);
    assert!(adherence.message.contains("90.0% → 75.0%"));

    let intensity = &report.alerts[2];
    assert_eq!(intensity.severity, Severity::Medium);
    assert!((intensity.value - 2.0).abs() < 1e-9);
    assert_eq!(intensity.created_at, analyzed_at());
}

#[test]
fn test_fewer_than_two_weeks_produce_nothing() {
    let comparator = TrendComparator::default();
    let single = vec![week("2025-W09", week_start(9), 10_000.0, 6.0, 90.0, 14_000.0)];

    assert!(comparator.compare(&[]).is_empty());
    let report = comparator.analyze("cliente_1", &single, analyzed_at());
    assert!(report.comparisons.is_empty());
    assert!(report.alerts.is_empty());
    assert_eq!(report.latest_tendency(), None);
}

#[test]
fn test_comparisons_cover_each_adjacent_pair() {
    let history = vec![
        week("2025-W08", week_start(8), 9_000.0, 6.0, 85.0, 14_000.0),
        week("2025-W09", week_start(9), 10_000.0, 6.0, 90.0, 14_000.0),
        week("2025-W10", week_start(10), 10_500.0, 6.5, 92.0, 14_200.0),
    ];
    let report = TrendComparator::default().analyze("cliente_1", &history, analyzed_at());

    assert_eq!(report.comparisons.len(), 2);
    assert_eq!(report.comparisons[0].previous.week, "2025-W08");
    assert_eq!(report.comparisons[1].current.week, "2025-W10");
    assert_eq!(report.latest_tendency(), Some(Tendency::Improving));
    // Only the latest comparison raises alerts
    assert!(report.alerts.is_empty());
}

#[test]
fn test_alerts_come_from_latest_comparison_only() {
    let mut history = declining_history();
    history.push(week("2025-W11", week_start(11), 8_100.0, 8.0, 76.0, 14_000.0));

    let report = TrendComparator::default().analyze("cliente_1", &history, analyzed_at());
    assert_eq!(report.comparisons.len(), 2);
    assert!(report.alerts.is_empty());
}

#[test]
fn test_zero_previous_value_yields_zero_percent() {
    let change = metric_change(0.0, 500.0, Significance::Ratio(0.15));
    assert!((change.delta - 500.0).abs() < f64::EPSILON);
    assert!(change.percent_change.abs() < f64::EPSILON);
    assert!(change.percent_change.is_finite());
    assert!(!change.significant);
}

#[test]
fn test_adherence_significance_is_strict() {
    let exactly_ten = metric_change(90.0, 80.0, Significance::Points(10.0));
    assert!(!exactly_ten.significant);

    let just_over = metric_change(90.0, 79.99, Significance::Points(10.0));
    assert!(just_over.significant);
}

#[test]
fn test_adherence_alert_boundary() {
    let comparator = TrendComparator::default();
    let tolerated = vec![
        week("2025-W09", week_start(9), 10_000.0, 6.0, 90.0, 14_000.0),
        week("2025-W10", week_start(10), 10_000.0, 6.0, 80.0, 14_000.0),
    ];
    assert!(comparator
        .analyze("cliente_1", &tolerated, analyzed_at())
        .alerts
        .is_empty());

    let dropped = vec![
        week("2025-W09", week_start(9), 10_000.0, 6.0, 90.0, 14_000.0),
        week("2025-W10", week_start(10), 10_000.0, 6.0, 79.9, 14_000.0),
    ];
    let alerts = comparator.analyze("cliente_1", &dropped, analyzed_at()).alerts;
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].alert_type, TrendAlertType::AdherenceDrop);
}

fn intensity_pair(previous: f64, current: f64) -> Vec<WeeklySummary> {
    vec![
        week("2025-W09", week_start(9), 10_000.0, previous, 90.0, 14_000.0),
        week("2025-W10", week_start(10), 10_000.0, current, 90.0, 14_000.0),
    ]
}

#[test]
fn test_intensity_significance_is_strict() {
    let comparator = TrendComparator::default();

    let one_point = intensity_pair(6.0, 7.0);
    let comparison = comparator.compare_pair(&one_point[0], &one_point[1]);
    assert!((comparison.changes.intensity.delta - 1.0).abs() < 1e-9);
    assert!(!comparison.changes.intensity.significant);

    let just_over = intensity_pair(6.0, 7.01);
    let comparison = comparator.compare_pair(&just_over[0], &just_over[1]);
    assert!(comparison.changes.intensity.significant);
}

#[test]
fn test_intensity_alert_boundary() {
    let comparator = TrendComparator::default();

    let tolerated = comparator.analyze("cliente_1", &intensity_pair(6.0, 7.5), analyzed_at());
    assert!(tolerated.alerts.is_empty());

    let spiked = comparator.analyze("cliente_1", &intensity_pair(6.0, 7.6), analyzed_at());
    assert_eq!(spiked.alerts.len(), 1);
    assert_eq!(spiked.alerts[0].alert_type, TrendAlertType::IntensitySpike);
    assert_eq!(spiked.alerts[0].severity, Severity::Medium);
}

#[test]
fn test_volume_drop_alert_boundary() {
    let history = vec![
        week("2025-W09", week_start(9), 1_000.0, 6.0, 90.0, 14_000.0),
        week("2025-W10", week_start(10), 850.0, 6.0, 90.0, 14_000.0),
    ];
    let report = TrendComparator::default().analyze("cliente_1", &history, analyzed_at());

    let volume = &report.comparisons[0].changes.volume;
    assert!((volume.percent_change + 15.0).abs() < 1e-9);
    assert!(!volume.significant);
    assert!(report.alerts.is_empty());

    let dropped = vec![
        history[0].clone(),
        week("2025-W10", week_start(10), 849.0, 6.0, 90.0, 14_000.0),
    ];
    let alerts = TrendComparator::default()
        .analyze("cliente_1", &dropped, analyzed_at())
        .alerts;
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].alert_type, TrendAlertType::VolumeDrop);
}

#[test]
fn test_volume_significance_uses_ratio() {
    let comparison = TrendComparator::default().compare_pair(
        &week("2025-W09", week_start(9), 10_000.0, 6.0, 90.0, 14_000.0),
        &week("2025-W10", week_start(10), 11_600.0, 6.0, 90.0, 14_000.0),
    );
    assert!(comparison.changes.volume.significant);
    assert!((comparison.changes.volume.percent_change - 16.0).abs() < 1e-9);
    assert!(!comparison.changes.calories.significant);
}

#[test]
fn test_tendency_tie_is_stable() {
    let comparison = TrendComparator::default().compare_pair(
        &week("2025-W09", week_start(9), 10_000.0, 6.0, 90.0, 14_000.0),
        &week("2025-W10", week_start(10), 11_000.0, 5.5, 90.0, 14_000.0),
    );
    assert_eq!(comparison.tendency, Tendency::Stable);
    assert_eq!(classify_tendency(&comparison.changes), Tendency::Stable);
}

#[test]
fn test_calories_do_not_vote() {
    let comparison = TrendComparator::default().compare_pair(
        &week("2025-W09", week_start(9), 10_000.0, 6.0, 90.0, 14_000.0),
        &week("2025-W10", week_start(10), 10_000.0, 6.0, 90.0, 20_000.0),
    );
    assert!(comparison.changes.calories.significant);
    assert_eq!(comparison.tendency, Tendency::Stable);
}

#[test]
fn test_custom_thresholds() {
    let comparator = TrendComparator::with_config(TrendConfig {
        volume_drop_alert_percent: 25.0,
        adherence_drop_alert_points: 20.0,
        intensity_rise_alert_points: 3.0,
        ..TrendConfig::default()
    });
    let report = comparator.analyze("cliente_1", &declining_history(), analyzed_at());
    assert!(report.alerts.is_empty());

    let from_monitor = TrendComparator::new(&MonitorConfig::default());
    assert_eq!(
        from_monitor
            .analyze("cliente_1", &declining_history(), analyzed_at())
            .alerts
            .len(),
        3
    );
}
