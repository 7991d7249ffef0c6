// ABOUTME: Main library entry point for the nutrition monitor service
// ABOUTME: Wires storage, notifications and HTTP routes around the nutrition analysis engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nutrition Monitor
//!
//! Detects overload and deficiency patterns in weekly meal plans and compares
//! training weeks to surface trend alerts. The pure engine lives in
//! [`nutrition_intelligence`]; this crate adds the boundary around it.
//!
//! ## Architecture
//!
//! - **Storage**: async ports for plans, weekly history and alerts, with an
//!   in-memory implementation
//! - **Notifications**: event sink invoked after analyses and block applications
//! - **Services**: orchestration of storage, engine and notifications
//! - **Routes**: axum HTTP surface
//! - **Config**: environment-driven server and engine settings
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use nutrition_monitor::config::ServerConfig;
//! use nutrition_monitor::notifications::LogNotifier;
//! use nutrition_monitor::services::NutritionMonitorService;
//! use nutrition_monitor::storage::InMemoryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let store = Arc::new(InMemoryStore::new());
//!     let service = NutritionMonitorService::new(
//!         store.clone(),
//!         store.clone(),
//!         store,
//!         Arc::new(LogNotifier),
//!         &config.monitor,
//!     );
//!     let alerts = service.run_overload_analysis("dieta_1").await?;
//!     println!("{} alerts", alerts.len());
//!     Ok(())
//! }
//! ```

/// Server configuration from the environment
pub mod config;

/// Structured logging setup
pub mod logging;

/// Notification events and dispatchers
pub mod notifications;

/// HTTP routes
pub mod routes;

/// Analysis orchestration
pub mod services;

/// Storage ports and the in-memory backend
pub mod storage;

pub use nutrition_core::{constants, errors, models};
