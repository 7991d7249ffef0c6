// ABOUTME: Domain service layer wiring storage and notification ports to the analysis engine
// ABOUTME: Protocol-agnostic orchestration shared by the HTTP routes and the binaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Route handlers stay thin: they parse the request, call one service method
//! and render the result. Every lookup failure and storage error surfaces
//! here as an [`AppError`](nutrition_core::errors::AppError).

/// Overload and trend analysis orchestration
pub mod nutrition_monitor;

pub use nutrition_monitor::{Clock, NutritionMonitorService, MAX_HISTORY_WEEKS, MIN_HISTORY_WEEKS};
