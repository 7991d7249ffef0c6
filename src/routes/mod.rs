// ABOUTME: Route module organization for the nutrition monitor HTTP endpoints
// ABOUTME: Combines health and nutrition routes behind a request tracing layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP routes
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the service layer.

/// Health check and readiness routes
pub mod health;
/// Diet analysis, alert, block and trend routes
pub mod nutrition;

pub use health::HealthRoutes;
pub use nutrition::{ApplyBlockResponse, NutritionRoutes, TrendQuery};

use crate::services::NutritionMonitorService;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Full application router
pub fn router(service: Arc<NutritionMonitorService>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(NutritionRoutes::routes(service))
        .layer(TraceLayer::new_for_http())
}
