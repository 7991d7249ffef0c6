// ABOUTME: Builds a monitor service over a seeded in-memory store with a stepping clock
// ABOUTME: Exposes the broadcast notifier so tests can observe emitted events

use super::fixtures::{analyzed_at, declining_history, fiber_excess_plan};
use chrono::Duration;
use nutrition_monitor::config::MonitorConfig;
use nutrition_monitor::notifications::BroadcastNotifier;
use nutrition_monitor::services::NutritionMonitorService;
use nutrition_monitor::storage::{InMemoryStore, SeedData};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Diet seeded with a Monday/Tuesday fiber excess
pub const DIET_ID: &str = "dieta_1";

/// Client owning the seeded diet and history
pub const CLIENT_ID: &str = "cliente_1";

/// Service wired to its store and notifier
pub struct TestMonitor {
    pub service: Arc<NutritionMonitorService>,
    pub store: Arc<InMemoryStore>,
    pub notifier: Arc<BroadcastNotifier>,
}

/// Seed with one diet and the declining two-week history
pub fn seed() -> SeedData {
    let mut history = HashMap::new();
    history.insert(CLIENT_ID.to_owned(), declining_history());
    SeedData {
        meal_plans: vec![fiber_excess_plan(DIET_ID)],
        history,
    }
}

/// Monitor whose clock starts at [`analyzed_at`] and advances a minute per read
pub fn monitor(seed: SeedData) -> TestMonitor {
    let store = Arc::new(InMemoryStore::from_seed(seed));
    let notifier = Arc::new(BroadcastNotifier::new(64));
    let ticks = Arc::new(AtomicI64::new(0));
    let clock = move || analyzed_at() + Duration::minutes(ticks.fetch_add(1, Ordering::SeqCst));

    let service = NutritionMonitorService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        notifier.clone(),
        &MonitorConfig::default(),
    )
    .with_clock(Arc::new(clock));

    TestMonitor {
        service: Arc::new(service),
        store,
        notifier,
    }
}
