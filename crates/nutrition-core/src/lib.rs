// ABOUTME: Core types and constants for the nutrition monitoring platform
// ABOUTME: Foundation crate with error handling, constants, and the meal plan/alert/trend models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nutrition Core
//!
//! Foundation crate providing the shared data model for the nutrition
//! monitoring engine. It holds no analysis logic and performs no I/O, so the
//! intelligence crate and the server crate can both depend on it without
//! pulling in each other.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Nutrition and service constants shared across crates
//! - **models**: Meal plans, overload alerts, remediation blocks, weekly summaries

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`MealPlan`, `OverloadAlert`, `WeeklySummary`, ...)
pub mod models;
