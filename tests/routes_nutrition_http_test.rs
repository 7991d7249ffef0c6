// ABOUTME: HTTP tests for the nutrition and health routes
// ABOUTME: Drives the axum router end to end and checks status codes and JSON bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use axum::Router;
use helpers::axum_test::AxumTestRequest;
use helpers::service::{monitor, seed, CLIENT_ID, DIET_ID};
use nutrition_monitor::routes;
use serde_json::Value;

fn app() -> Router {
    routes::router(monitor(seed()).service)
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app();

    let health = AxumTestRequest::get("/health").send(app.clone()).await;
    assert_eq!(health.status(), 200);
    let body: Value = health.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "nutrition-monitor");

    let ready = AxumTestRequest::get("/ready").send(app).await;
    assert_eq!(ready.status(), 200);
    assert_eq!(ready.json::<Value>()["status"], "ready");
}

#[tokio::test]
async fn test_analysis_then_list_alerts() {
    let app = app();

    let response = AxumTestRequest::post(&format!("/api/diets/{DIET_ID}/analysis"))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let alerts: Value = response.json();
    assert_eq!(alerts.as_array().unwrap().len(), 1);
    assert_eq!(alerts[0]["tipo"], "exceso-fibra");
    assert_eq!(
        alerts[0]["detalles"]["diasAfectados"],
        serde_json::json!(["lunes", "martes"])
    );
    assert_eq!(alerts[0]["bloquePreventivo"]["ajusteMacros"]["fibra"], -5.0);

    let listed: Value = AxumTestRequest::get(&format!("/api/diets/{DIET_ID}/alerts"))
        .send(app)
        .await
        .json();
    assert_eq!(listed, alerts);
}

#[tokio::test]
async fn test_mark_seen_and_apply_block() {
    let app = app();
    AxumTestRequest::post(&format!("/api/diets/{DIET_ID}/analysis"))
        .send(app.clone())
        .await;

    let seen = AxumTestRequest::put("/api/alerts/alerta_dieta_1_exceso-fibra/seen")
        .send(app.clone())
        .await;
    assert_eq!(seen.status(), 204);
    assert!(seen.is_empty());

    let uri = format!("/api/diets/{DIET_ID}/blocks/bloque_alerta_dieta_1_exceso-fibra/apply");
    for _ in 0..2 {
        let applied = AxumTestRequest::post(&uri).send(app.clone()).await;
        assert_eq!(applied.status(), 200);
        assert_eq!(applied.json::<Value>(), serde_json::json!({ "success": true }));
    }

    let alerts: Value = AxumTestRequest::get(&format!("/api/diets/{DIET_ID}/alerts"))
        .send(app)
        .await
        .json();
    assert_eq!(alerts[0]["vista"], true);
    assert_eq!(alerts[0]["bloqueAplicado"], true);
}

#[tokio::test]
async fn test_unknown_resources_return_404() {
    let app = app();

    for request in [
        AxumTestRequest::post("/api/diets/nope/analysis"),
        AxumTestRequest::get("/api/diets/nope/alerts"),
        AxumTestRequest::put("/api/alerts/nope/seen"),
        AxumTestRequest::post(&format!("/api/diets/{DIET_ID}/blocks/nope/apply")),
        AxumTestRequest::get("/api/clients/nobody/trends"),
    ] {
        let response = request.send(app.clone()).await;
        assert_eq!(response.status(), 404);
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
    }
}

#[tokio::test]
async fn test_trends_and_trend_alerts() {
    let app = app();

    let response = AxumTestRequest::get(&format!("/api/clients/{CLIENT_ID}/trends?weeks=2"))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let report: Value = response.json();
    assert_eq!(report["clienteId"], CLIENT_ID);
    assert_eq!(report["comparaciones"][0]["tendencia"], "empeorando");
    assert_eq!(report["alertas"].as_array().unwrap().len(), 3);

    let alerts: Value = AxumTestRequest::get(&format!("/api/clients/{CLIENT_ID}/trend-alerts"))
        .send(app)
        .await
        .json();
    assert_eq!(alerts, report["alertas"]);
}

#[tokio::test]
async fn test_invalid_trend_window_returns_400() {
    let response = AxumTestRequest::get(&format!("/api/clients/{CLIENT_ID}/trends?weeks=1"))
        .send(app())
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_trend_alerts_of_unknown_client_are_empty() {
    let alerts: Value = AxumTestRequest::get("/api/clients/nobody/trend-alerts")
        .send(app())
        .await
        .json();
    assert_eq!(alerts, serde_json::json!([]));
}
