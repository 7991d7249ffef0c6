// ABOUTME: Route handlers for diet analysis, alerts, preventive blocks and weekly trends
// ABOUTME: Thin axum handlers delegating to NutritionMonitorService
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::services::NutritionMonitorService;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use nutrition_core::errors::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Query parameters for a trend analysis
#[derive(Debug, Default, Deserialize)]
pub struct TrendQuery {
    /// Number of most recent weeks to compare
    pub weeks: Option<usize>,
}

/// Response for a block application
#[derive(Debug, Serialize, Deserialize)]
pub struct ApplyBlockResponse {
    /// Always true; failures are reported as errors
    pub success: bool,
}

/// Nutrition monitoring routes
pub struct NutritionRoutes;

impl NutritionRoutes {
    /// Create all nutrition routes
    pub fn routes(service: Arc<NutritionMonitorService>) -> Router {
        Router::new()
            .route("/api/diets/:diet_id/analysis", post(Self::handle_analyze))
            .route("/api/diets/:diet_id/alerts", get(Self::handle_list_alerts))
            .route(
                "/api/diets/:diet_id/blocks/:block_id/apply",
                post(Self::handle_apply_block),
            )
            .route("/api/alerts/:alert_id/seen", put(Self::handle_mark_seen))
            .route("/api/clients/:client_id/trends", get(Self::handle_trends))
            .route(
                "/api/clients/:client_id/trend-alerts",
                get(Self::handle_list_trend_alerts),
            )
            .with_state(service)
    }

    /// Handle POST /api/diets/:diet_id/analysis
    async fn handle_analyze(
        State(service): State<Arc<NutritionMonitorService>>,
        Path(diet_id): Path<String>,
    ) -> Result<Response, AppError> {
        let alerts = service.run_overload_analysis(&diet_id).await?;
        Ok((StatusCode::OK, Json(alerts)).into_response())
    }

    /// Handle GET /api/diets/:diet_id/alerts
    async fn handle_list_alerts(
        State(service): State<Arc<NutritionMonitorService>>,
        Path(diet_id): Path<String>,
    ) -> Result<Response, AppError> {
        let alerts = service.list_alerts(&diet_id).await?;
        Ok((StatusCode::OK, Json(alerts)).into_response())
    }

    /// Handle POST /api/diets/:diet_id/blocks/:block_id/apply
    async fn handle_apply_block(
        State(service): State<Arc<NutritionMonitorService>>,
        Path((diet_id, block_id)): Path<(String, String)>,
    ) -> Result<Response, AppError> {
        service.apply_block(&block_id, &diet_id).await?;
        Ok((StatusCode::OK, Json(ApplyBlockResponse { success: true })).into_response())
    }

    /// Handle PUT /api/alerts/:alert_id/seen
    async fn handle_mark_seen(
        State(service): State<Arc<NutritionMonitorService>>,
        Path(alert_id): Path<String>,
    ) -> Result<Response, AppError> {
        service.mark_alert_seen(&alert_id).await?;
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    /// Handle GET /api/clients/:client_id/trends
    async fn handle_trends(
        State(service): State<Arc<NutritionMonitorService>>,
        Path(client_id): Path<String>,
        Query(query): Query<TrendQuery>,
    ) -> Result<Response, AppError> {
        let report = service.run_trend_analysis(&client_id, query.weeks).await?;
        Ok((StatusCode::OK, Json(report)).into_response())
    }

    /// Handle GET /api/clients/:client_id/trend-alerts
    async fn handle_list_trend_alerts(
        State(service): State<Arc<NutritionMonitorService>>,
        Path(client_id): Path<String>,
    ) -> Result<Response, AppError> {
        let alerts = service.list_trend_alerts(&client_id).await?;
        Ok((StatusCode::OK, Json(alerts)).into_response())
    }
}
