// ABOUTME: Environment configuration for the nutrition monitor server
// ABOUTME: Parses network, logging, history and seed settings plus the engine configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based server configuration

use crate::services::{MAX_HISTORY_WEEKS, MIN_HISTORY_WEEKS};
use anyhow::{bail, Context, Result};
use nutrition_core::constants::{ports, trend};
use nutrition_intelligence::MonitorConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tracing::{info, Level};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(self) -> Level {
        match self {
            Self::Error => Level::ERROR,
            Self::Warn => Level::WARN,
            Self::Info => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub host: IpAddr,
    /// HTTP port
    pub http_port: u16,
    /// Application log level
    pub log_level: LogLevel,
    /// Weeks compared when a trend request does not say
    pub history_weeks: usize,
    /// JSON file loaded into the in-memory store at startup
    pub seed_file: Option<PathBuf>,
    /// Engine thresholds
    pub monitor: MonitorConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            http_port: ports::DEFAULT_HTTP_PORT,
            log_level: LogLevel::default(),
            history_weeks: trend::DEFAULT_HISTORY_WEEKS,
            seed_file: None,
            monitor: MonitorConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or the engine
    /// configuration fails validation
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            host: env_var_or("HOST", "0.0.0.0")
                .parse()
                .context("Invalid HOST value")?,
            http_port: env_var_or("HTTP_PORT", &ports::DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            log_level: LogLevel::from_str_or_default(&env_var_or("LOG_LEVEL", "info")),
            history_weeks: env_var_or(
                "NUTRITION_HISTORY_WEEKS",
                &trend::DEFAULT_HISTORY_WEEKS.to_string(),
            )
            .parse()
            .context("Invalid NUTRITION_HISTORY_WEEKS value")?,
            seed_file: env::var("NUTRITION_SEED_FILE").ok().map(PathBuf::from),
            monitor: MonitorConfig::from_environment()
                .context("Invalid nutrition engine configuration")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check settings that the engine configuration does not cover
    ///
    /// # Errors
    ///
    /// Returns an error if the history length is out of range
    pub fn validate(&self) -> Result<()> {
        if !(MIN_HISTORY_WEEKS..=MAX_HISTORY_WEEKS).contains(&self.history_weeks) {
            bail!(
                "NUTRITION_HISTORY_WEEKS must be between {MIN_HISTORY_WEEKS} and {MAX_HISTORY_WEEKS}, got {}",
                self.history_weeks
            );
        }
        Ok(())
    }

    /// Socket address for the HTTP listener
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.http_port)
    }

    /// One-line summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "host={} port={} log_level={} history_weeks={} seed={}",
            self.host,
            self.http_port,
            self.log_level,
            self.history_weeks,
            self.seed_file
                .as_ref()
                .map_or_else(|| "none".to_owned(), |path| path.display().to_string())
        )
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
