// ABOUTME: Configuration error types for the nutrition engine
// ABOUTME: Defines error variants for unparsable overrides and failed threshold validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutrition_core::errors::{AppError, ErrorCode};
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment override could not be parsed
    #[error("Invalid value for {variable}: {value:?}")]
    InvalidValue {
        /// Environment variable name
        variable: &'static str,
        /// Raw value found
        value: String,
    },

    /// Value outside acceptable range
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Thresholds are individually valid but inconsistent with each other
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let code = match error {
            ConfigError::InvalidValue { .. } => ErrorCode::ConfigError,
            ConfigError::InvalidRange(_) | ConfigError::ValidationFailed(_) => {
                ErrorCode::ConfigInvalid
            }
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}
