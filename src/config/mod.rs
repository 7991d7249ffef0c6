// ABOUTME: Configuration management module for server and engine settings
// ABOUTME: Environment-only configuration; no configuration files are read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: server settings from environment variables
//! - **Engine**: thresholds re-exported from `nutrition_intelligence::config`

/// Environment and server configuration
pub mod environment;

pub use environment::{LogLevel, ServerConfig};
pub use nutrition_intelligence::config::{
    AggregationConfig, ConfigError, MonitorConfig, OverloadConfig, TrendConfig,
};
