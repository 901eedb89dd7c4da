//! Layered configuration loading
//!
//! Sources, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. Global file: `<config dir>/ticketdesk/config.toml`
//! 3. Project file: `./ticketdesk.toml`, or the path given with `--config`
//! 4. Environment variables (`TICKETDESK_*`, plus `PORT`)
//!
//! Missing global and project files are skipped. An explicit path must exist.

use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::env::{ConfigEnv, RealEnv};
use super::{validation_failed, DeskConfig};
use crate::error::{common, DeskError, ErrorCode, Result};

/// File name of the per-project configuration
pub const PROJECT_CONFIG_FILE: &str = "ticketdesk.toml";

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Use this file instead of `./ticketdesk.toml`
    pub explicit_path: Option<PathBuf>,
    pub skip_global: bool,
}

/// Path of the user-wide configuration file
pub fn global_config_path() -> PathBuf {
    ProjectDirs::from("", "", "ticketdesk")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from(".ticketdesk").join("config.toml"))
}

pub fn project_config_path() -> PathBuf {
    PathBuf::from(PROJECT_CONFIG_FILE)
}

/// Load configuration from the real environment
pub fn load_config(options: &LoadOptions) -> Result<DeskConfig> {
    load_config_with(options, &RealEnv)
}

/// Load configuration through `env`, then validate it
pub fn load_config_with<E: ConfigEnv>(options: &LoadOptions, env: &E) -> Result<DeskConfig> {
    let mut merged = toml::Table::new();

    if !options.skip_global {
        merge_file(&mut merged, &global_config_path(), env, false)?;
    }
    match &options.explicit_path {
        Some(path) => merge_file(&mut merged, path, env, true)?,
        None => merge_file(&mut merged, &project_config_path(), env, false)?,
    }

    let mut config: DeskConfig = toml::Value::Table(merged).try_into().map_err(|e| {
        DeskError::config_with_code(ErrorCode::CONFIG_INVALID_VALUE, "Invalid configuration value")
            .with_source(e)
    })?;

    let mut problems = apply_env_overrides(&mut config, env);
    problems.extend(config.problems());
    if !problems.is_empty() {
        return Err(validation_failed(&problems));
    }

    Ok(config)
}

fn merge_file<E: ConfigEnv>(
    merged: &mut toml::Table,
    path: &Path,
    env: &E,
    required: bool,
) -> Result<()> {
    if !env.file_exists(path) {
        if required {
            return Err(common::config_not_found(path));
        }
        return Ok(());
    }

    let content = env.read_file(path).map_err(|e| {
        DeskError::config_with_code(
            ErrorCode::CONFIG_NOT_FOUND,
            format!("Cannot read {}", path.display()),
        )
        .with_source(e)
    })?;
    let table: toml::Table = toml::from_str(&content)
        .map_err(|e| DeskError::from(e).with_context(path.display()))?;

    debug!("Merging configuration from {}", path.display());
    deep_merge(merged, table);
    Ok(())
}

/// Overlay `overlay` onto `base`, merging nested tables key by key
fn deep_merge(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                deep_merge(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

fn parse_var<E: ConfigEnv, T: std::str::FromStr>(
    env: &E,
    name: &str,
    problems: &mut Vec<String>,
) -> Option<T> {
    let raw = env.var(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            problems.push(format!("{} has invalid value '{}'", name, raw));
            None
        }
    }
}

/// Apply environment overrides, returning unparsable values as problems
fn apply_env_overrides<E: ConfigEnv>(config: &mut DeskConfig, env: &E) -> Vec<String> {
    let mut problems = Vec::new();

    if let Some(level) = env.var("TICKETDESK_LOG_LEVEL") {
        config.log_level = level.trim().to_ascii_lowercase();
    }
    if let Some(path) = env.var("TICKETDESK_DATA_FILE") {
        config.data_file = Some(PathBuf::from(path));
    }
    if let Some(seed) = parse_var(env, "TICKETDESK_SEED", &mut problems) {
        config.sample_seed = seed;
    }
    if let Some(offset) = parse_var(env, "TICKETDESK_UTC_OFFSET_MINUTES", &mut problems) {
        config.analytics.utc_offset_minutes = Some(offset);
    }
    if let Some(host) = env.var("TICKETDESK_HOST") {
        config.server.host = host;
    }
    for name in ["PORT", "TICKETDESK_PORT"] {
        if let Some(port) = parse_var(env, name, &mut problems) {
            config.server.port = port;
        }
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnv;

    fn no_global() -> LoadOptions {
        LoadOptions {
            skip_global: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_load_with_defaults_only() {
        let config = load_config_with(&LoadOptions::default(), &MockEnv::new()).unwrap();
        assert_eq!(config, DeskConfig::default());
    }

    #[test]
    fn test_load_with_global_config() {
        let env = MockEnv::new().with_file(
            global_config_path(),
            r#"
log_level = "debug"

[server]
port = 9000
"#,
        );

        let config = load_config_with(&LoadOptions::default(), &env).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_project_file_overrides_global_per_key() {
        let env = MockEnv::new()
            .with_file(
                global_config_path(),
                "[server]\nhost = \"127.0.0.1\"\nport = 9000\n",
            )
            .with_file(project_config_path(), "[server]\nport = 9100\n");

        let config = load_config_with(&LoadOptions::default(), &env).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9100);
    }

    #[test]
    fn test_skip_global() {
        let env = MockEnv::new().with_file(global_config_path(), "log_level = \"debug\"");
        let config = load_config_with(&no_global(), &env).unwrap();
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let options = LoadOptions {
            explicit_path: Some(PathBuf::from("custom.toml")),
            skip_global: true,
        };

        let err = load_config_with(&options, &MockEnv::new()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_NOT_FOUND);

        let env = MockEnv::new()
            .with_file("custom.toml", "sample_seed = 11")
            .with_file(project_config_path(), "sample_seed = 99");
        let config = load_config_with(&options, &env).unwrap();
        assert_eq!(config.sample_seed, 11);
    }

    #[test]
    fn test_env_overrides_files() {
        let env = MockEnv::new()
            .with_file(project_config_path(), "sample_seed = 5\nlog_level = \"warn\"")
            .with_env("TICKETDESK_SEED", "8")
            .with_env("TICKETDESK_LOG_LEVEL", "DEBUG")
            .with_env("TICKETDESK_DATA_FILE", "data/tickets.yaml")
            .with_env("TICKETDESK_UTC_OFFSET_MINUTES", "-300")
            .with_env("PORT", "3000");

        let config = load_config_with(&no_global(), &env).unwrap();
        assert_eq!(config.sample_seed, 8);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.data_file, Some(PathBuf::from("data/tickets.yaml")));
        assert_eq!(config.analytics.utc_offset_minutes, Some(-300));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_ticketdesk_port_beats_port() {
        let env = MockEnv::new()
            .with_env("PORT", "3000")
            .with_env("TICKETDESK_PORT", "4000");
        let config = load_config_with(&no_global(), &env).unwrap();
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_invalid_values_are_accumulated() {
        let env = MockEnv::new()
            .with_file(project_config_path(), "[analytics]\ntop_categories = 0\n")
            .with_env("TICKETDESK_SEED", "many")
            .with_env("PORT", "70000");

        let err = load_config_with(&no_global(), &env).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_VALIDATION_FAILED);
        let message = err.to_string();
        assert!(message.contains("3 invalid setting(s)"));
        assert!(message.contains("TICKETDESK_SEED"));
        assert!(message.contains("PORT"));
        assert!(message.contains("top_categories"));
    }

    #[test]
    fn test_malformed_toml() {
        let env = MockEnv::new().with_file(project_config_path(), "log_level = ");
        let err = load_config_with(&no_global(), &env).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_TOML);

        let env = MockEnv::new().with_file(project_config_path(), "sample_seed = \"x\"");
        let err = load_config_with(&no_global(), &env).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_VALUE);
    }
}
