// ABOUTME: Logging configuration and structured logging setup for form coaching sessions
// ABOUTME: Configures log levels and formatters, plus structured session event helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging setup
//!
//! Logs go to stderr so that stdout carries only analysis output when the
//! replay tool is piped into other programs.

use std::env;
use std::io;

use anyhow::Result;
use pierre_pose_core::ExerciseKind;
use serde_json::json;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

/// Default service name in structured logs
pub const SERVICE_NAME: &str = "pierre-form-coach";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for log shipping
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for terminals
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_thread: false,
            service_name: SERVICE_NAME.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());

        let format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        };

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let is_production = environment == "production";

        Self {
            level,
            format,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_thread: is_production || env::var("LOG_INCLUDE_THREAD").is_ok(),
            service_name: env::var("SERVICE_NAME").unwrap_or_else(|_| SERVICE_NAME.into()),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment,
        }
    }

    /// Same configuration with the level replaced
    #[must_use]
    pub fn with_level(mut self, level: &str) -> Self {
        level.clone_into(&mut self.level);
        self
    }

    /// Build the filter, keeping our crates at the configured level
    fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::new(&self.level);
        for target in ["pierre_form_coach", "pierre_form_intelligence", "pierre_pose_core"] {
            filter = filter.add_directive(
                format!("{target}={}", self.level)
                    .parse()
                    .unwrap_or_else(|_| Level::INFO.into()),
            );
        }
        filter
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());

        match self.format {
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stderr)
                    .json();
                registry.with(json_layer).try_init()?;
            }
            LogFormat::Pretty => {
                let pretty_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stderr);
                registry.with(pretty_layer).try_init()?;
            }
            LogFormat::Compact => {
                let compact_layer = fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(io::stderr);
                registry.with(compact_layer).try_init()?;
            }
        }

        self.log_startup_info();
        Ok(())
    }

    fn log_startup_info(&self) {
        let summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
                "environment": self.environment
            },
            "logging": {
                "level": self.level,
                "format": format!("{:?}", self.format),
                "location": self.include_location,
                "thread": self.include_thread
            }
        });
        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            config = %summary,
            "Form coach logging initialized"
        );
    }
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Structured session events
pub struct SessionLogger;

impl SessionLogger {
    /// Log an exercise selection
    pub fn log_exercise_switch(session_id: Uuid, exercise: ExerciseKind, timed: bool) {
        info!(
            session.id = %session_id,
            exercise = %exercise,
            timed,
            event_type = "exercise_switch",
            "Exercise selected"
        );
    }

    /// Log a rejected exercise name
    pub fn log_rejected_exercise(session_id: Uuid, name: &str) {
        warn!(
            session.id = %session_id,
            exercise.requested = %name,
            event_type = "exercise_rejected",
            "Unknown exercise requested"
        );
    }

    /// Log a rep counted by the active analyzer
    pub fn log_rep_completed(session_id: Uuid, exercise: ExerciseKind, rep_count: u32) {
        info!(
            session.id = %session_id,
            exercise = %exercise,
            rep.count = rep_count,
            event_type = "rep_completed",
            "Rep counted"
        );
    }

    /// Log the end of a session
    pub fn log_session_end(session_id: Uuid, total_seconds: f64, total_reps: u32) {
        info!(
            session.id = %session_id,
            session.seconds = total_seconds,
            session.reps = total_reps,
            event_type = "session_end",
            "Session ended"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_targets_development() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.service_name, SERVICE_NAME);
    }

    #[test]
    fn test_with_level_overrides_level_only() {
        let config = LoggingConfig::default().with_level("debug");
        assert_eq!(config.level, "debug");
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn test_init_from_env_installs_subscriber_once() {
        assert!(init_from_env().is_ok());
        assert!(init_from_env().is_err());
    }
}
