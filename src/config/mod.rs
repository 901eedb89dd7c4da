use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::analytics::{AnalyzerSettings, PeakHourModel, ReportingZone};
use crate::error::{DeskError, ErrorCode, Result};

pub mod builder;
pub mod env;

pub use builder::{
    global_config_path, load_config, load_config_with, project_config_path, LoadOptions,
};
pub use env::{ConfigEnv, MockEnv, RealEnv};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const MINUTES_PER_DAY: i32 = 24 * 60;

/// Top-level ticketdesk configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    pub log_level: String,
    /// Ticket file to load; the seeded sample set is used when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    pub sample_seed: u64,
    /// Reject tickets whose resolved fields contradict their status
    pub strict_validation: bool,
    pub analytics: AnalyticsSettings,
    pub server: ServerSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    pub top_categories: usize,
    pub peak_weight_amplitude: f64,
    pub peak_probability_cap: f64,
    pub cache_capacity: usize,
    /// Fixed offset for hour bucketing; the host time zone when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            data_file: None,
            sample_seed: 42,
            strict_validation: false,
            analytics: AnalyticsSettings::default(),
            server: ServerSettings::default(),
        }
    }
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        let peak = PeakHourModel::default();
        Self {
            top_categories: 3,
            peak_weight_amplitude: peak.amplitude,
            peak_probability_cap: peak.cap,
            cache_capacity: 16,
            utc_offset_minutes: None,
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl DeskConfig {
    /// Every problem with the configuration, empty when valid
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            problems.push(format!(
                "log_level '{}' must be one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            ));
        }

        let analytics = &self.analytics;
        if analytics.top_categories == 0 {
            problems.push("analytics.top_categories must be at least 1".to_string());
        }
        if !(0.0..1.0).contains(&analytics.peak_weight_amplitude) {
            problems.push(format!(
                "analytics.peak_weight_amplitude {} must be in [0, 1)",
                analytics.peak_weight_amplitude
            ));
        }
        if !(analytics.peak_probability_cap > 0.0 && analytics.peak_probability_cap <= 1.0) {
            problems.push(format!(
                "analytics.peak_probability_cap {} must be in (0, 1]",
                analytics.peak_probability_cap
            ));
        }
        if analytics.cache_capacity == 0 {
            problems.push("analytics.cache_capacity must be at least 1".to_string());
        }
        if let Some(offset) = analytics.utc_offset_minutes {
            if offset.abs() >= MINUTES_PER_DAY {
                problems.push(format!(
                    "analytics.utc_offset_minutes {} must be within a day of UTC",
                    offset
                ));
            }
        }

        if self.server.host.trim().is_empty() {
            problems.push("server.host must not be empty".to_string());
        }

        problems
    }

    /// Fail with every problem at once
    pub fn validate(&self) -> Result<()> {
        let problems = self.problems();
        if problems.is_empty() {
            return Ok(());
        }
        Err(validation_failed(&problems))
    }

    pub fn analyzer_settings(&self) -> AnalyzerSettings {
        AnalyzerSettings {
            top_categories: self.analytics.top_categories,
            peak_model: PeakHourModel {
                amplitude: self.analytics.peak_weight_amplitude,
                cap: self.analytics.peak_probability_cap,
            },
        }
    }

    pub fn reporting_zone(&self) -> ReportingZone {
        self.analytics
            .utc_offset_minutes
            .and_then(ReportingZone::from_offset_minutes)
            .unwrap_or_default()
    }

    pub fn cache_capacity(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.analytics.cache_capacity).unwrap_or(NonZeroUsize::MIN)
    }
}

fn validation_failed(problems: &[String]) -> DeskError {
    DeskError::config_with_code(
        ErrorCode::CONFIG_VALIDATION_FAILED,
        format!(
            "{} invalid setting(s): {}",
            problems.len(),
            problems.join("; ")
        ),
    )
}
