// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::{ConfigError, ConfigResult, DialogazeConfig};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "dialogaze.toml";

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "DIALOGAZE_CONFIG_PATH";

/// Find the dialogaze configuration file
///
/// Search order:
/// 1. `DIALOGAZE_CONFIG_PATH` environment variable
/// 2. Current working directory: `./dialogaze.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    let cwd = env::current_dir().ok();
    find_config_file_in(env::var(CONFIG_PATH_ENV).ok(), cwd.as_deref())
}

fn find_config_file_in(explicit: Option<String>, cwd: Option<&Path>) -> ConfigResult<PathBuf> {
    // 1. Check environment variable first
    if let Some(env_path) = explicit {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by {} not found: {}",
            CONFIG_PATH_ENV,
            path.display()
        )));
    }

    // 2. Current directory, then up to 5 levels of parents
    let mut search_paths = Vec::new();
    if let Some(cwd) = cwd {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        for ancestor in cwd.ancestors().skip(1).take(5) {
            search_paths.push(ancestor.join(CONFIG_FILE_NAME));
        }
    }

    if let Some(path) = search_paths.iter().find(|p| p.exists()) {
        return Ok(path.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet {} to specify a custom location.",
        CONFIG_FILE_NAME, search_list, CONFIG_PATH_ENV
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found, contains invalid TOML, or an
/// override value cannot be parsed. Validation is separate, see
/// [`validate_config`](crate::validate_config).
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<DialogazeConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };
    load_config_with(&config_file, cli_args, |key| env::var(key).ok())
}

/// Like [`load_config`], but falls back to built-in defaults when no file is
/// found by discovery. An explicit `config_path` must exist.
pub fn load_config_or_default(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<DialogazeConfig> {
    if config_path.is_some() {
        return load_config(config_path, cli_args);
    }
    match find_config_file() {
        Ok(path) => load_config_with(&path, cli_args, |key| env::var(key).ok()),
        Err(ConfigError::FileNotFound(_)) if env::var(CONFIG_PATH_ENV).is_err() => {
            let mut config = DialogazeConfig::default();
            apply_environment_overrides(&mut config)?;
            if let Some(cli) = cli_args {
                apply_cli_overrides(&mut config, cli)?;
            }
            Ok(config)
        }
        Err(e) => Err(e),
    }
}

/// Loads `config_file`, taking environment values from `lookup` instead of
/// the process environment.
pub fn load_config_with<F>(
    config_file: &Path,
    cli_args: Option<&HashMap<String, String>>,
    lookup: F,
) -> ConfigResult<DialogazeConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let content = fs::read_to_string(config_file)?;
    let mut config: DialogazeConfig = toml::from_str(&content)?;

    // Apply overrides in order
    apply_environment_overrides_from(&mut config, lookup)?;
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli)?;
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `DIALOGAZE_IN_HOST` -> `inbound.host`
/// - `DIALOGAZE_IN_PORT` -> `inbound.port`
/// - `DIALOGAZE_IN_TOPIC` -> `inbound.topic`
/// - `DIALOGAZE_OUT_HOST` -> `outbound.host`
/// - `DIALOGAZE_OUT_PORT` -> `outbound.port`
/// - `DIALOGAZE_OUT_TOPIC` -> `outbound.topic`
/// - `DIALOGAZE_POLL_INTERVAL_MS` -> `runtime.poll_interval_ms`
/// - `DIALOGAZE_LOG_LEVEL` -> `logging.level`
pub fn apply_environment_overrides(config: &mut DialogazeConfig) -> ConfigResult<()> {
    apply_environment_overrides_from(config, |key| env::var(key).ok())
}

pub fn apply_environment_overrides_from<F>(
    config: &mut DialogazeConfig,
    lookup: F,
) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    // Inbound
    if let Some(value) = lookup("DIALOGAZE_IN_HOST") {
        config.inbound.host = value;
    }
    if let Some(value) = lookup("DIALOGAZE_IN_PORT") {
        config.inbound.port = parse_value("DIALOGAZE_IN_PORT", &value)?;
    }
    if let Some(value) = lookup("DIALOGAZE_IN_TOPIC") {
        config.inbound.topic = value;
    }

    // Outbound
    if let Some(value) = lookup("DIALOGAZE_OUT_HOST") {
        config.outbound.host = value;
    }
    if let Some(value) = lookup("DIALOGAZE_OUT_PORT") {
        config.outbound.port = parse_value("DIALOGAZE_OUT_PORT", &value)?;
    }
    if let Some(value) = lookup("DIALOGAZE_OUT_TOPIC") {
        config.outbound.topic = value;
    }

    // Runtime + logging
    if let Some(value) = lookup("DIALOGAZE_POLL_INTERVAL_MS") {
        config.runtime.poll_interval_ms = parse_value("DIALOGAZE_POLL_INTERVAL_MS", &value)?;
    }
    if let Some(value) = lookup("DIALOGAZE_LOG_LEVEL") {
        config.logging.level = value;
    }

    Ok(())
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"in_ip": "192.168.1.1", "in_port": "9000"}`)
pub fn apply_cli_overrides(
    config: &mut DialogazeConfig,
    cli_args: &HashMap<String, String>,
) -> ConfigResult<()> {
    // Inbound
    if let Some(value) = cli_args.get("in_ip") {
        config.inbound.host = value.clone();
    }
    if let Some(value) = cli_args.get("in_port") {
        config.inbound.port = parse_value("in_port", value)?;
    }
    if let Some(value) = cli_args.get("in_topic_name") {
        config.inbound.topic = value.clone();
    }

    // Outbound
    if let Some(value) = cli_args.get("out_ip") {
        config.outbound.host = value.clone();
    }
    if let Some(value) = cli_args.get("out_port") {
        config.outbound.port = parse_value("out_port", value)?;
    }
    if let Some(value) = cli_args.get("out_topic_name") {
        config.outbound.topic = value.clone();
    }

    // Runtime
    if let Some(value) = cli_args.get("poll_interval_ms") {
        config.runtime.poll_interval_ms = parse_value("poll_interval_ms", value)?;
    }
    if let Some(value) = cli_args.get("share_threshold") {
        config.scheduler.share_threshold = parse_value("share_threshold", value)?;
    }
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }

    // Model paths
    if let Some(value) = cli_args.get("addressee_model") {
        config.models.addressee = PathBuf::from(value);
    }
    if let Some(value) = cli_args.get("vfoa_turn_count_model") {
        config.models.vfoa_turn_count = PathBuf::from(value);
    }
    if let Some(value) = cli_args.get("vfoa_duration_share_model") {
        config.models.vfoa_duration_share = PathBuf::from(value);
    }
    if let Some(value) = cli_args.get("vfoa_direction_model") {
        config.models.vfoa_direction = PathBuf::from(value);
    }

    Ok(())
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> ConfigResult<T> {
    raw.trim().parse::<T>().map_err(|_| {
        ConfigError::InvalidValue(format!("{} = '{}' could not be parsed", key, raw))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_find_config_file_explicit_path() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom.toml");
        File::create(&config_path).unwrap();

        let found = find_config_file_in(Some(config_path.display().to_string()), None).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_find_config_file_explicit_path_missing() {
        let result = find_config_file_in(Some("/nonexistent/dialogaze.toml".to_string()), None);
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_find_config_file_in_parent() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        assert_eq!(find_config_file_in(None, Some(&nested)).unwrap(), config_path);
    }

    #[test]
    fn test_load_minimal_config() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[outbound]").unwrap();
        writeln!(file, "port = 9000").unwrap();

        let config = load_config_with(&config_path, None, env_of(&[])).unwrap();
        assert_eq!(config.outbound.port, 9000);
        assert_eq!(config.inbound.port, 5555);
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "[inbound\nport = ").unwrap();
        let result = load_config_with(&config_path, None, env_of(&[]));
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let mut config = DialogazeConfig::default();
        apply_environment_overrides_from(
            &mut config,
            env_of(&[
                ("DIALOGAZE_IN_HOST", "192.168.1.100"),
                ("DIALOGAZE_IN_PORT", "9999"),
                ("DIALOGAZE_OUT_TOPIC", "addr"),
                ("DIALOGAZE_POLL_INTERVAL_MS", "20"),
                ("DIALOGAZE_LOG_LEVEL", "debug"),
            ]),
        )
        .unwrap();

        assert_eq!(config.inbound.host, "192.168.1.100");
        assert_eq!(config.inbound.port, 9999);
        assert_eq!(config.outbound.topic, "addr");
        assert_eq!(config.runtime.poll_interval_ms, 20);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_unparsable_environment_port() {
        let mut config = DialogazeConfig::default();
        let lookup = env_of(&[("DIALOGAZE_OUT_PORT", "http")]);
        let result = apply_environment_overrides_from(&mut config, lookup);
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = DialogazeConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("in_ip".to_string(), "10.0.0.1".to_string());
        cli_args.insert("out_port".to_string(), "7777".to_string());
        cli_args.insert("vfoa_direction_model".to_string(), "/tmp/dir.dgz".to_string());

        apply_cli_overrides(&mut config, &cli_args).unwrap();

        assert_eq!(config.inbound.host, "10.0.0.1");
        assert_eq!(config.outbound.port, 7777);
        assert_eq!(config.models.vfoa_direction, PathBuf::from("/tmp/dir.dgz"));
    }

    #[test]
    fn test_override_precedence() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[inbound]").unwrap();
        writeln!(file, "host = \"file-host\"").unwrap();
        writeln!(file, "port = 8000").unwrap();
        writeln!(file, "topic = \"file-topic\"").unwrap();

        let lookup = env_of(&[("DIALOGAZE_IN_HOST", "env-host"), ("DIALOGAZE_IN_PORT", "9000")]);
        let mut cli_args = HashMap::new();
        cli_args.insert("in_ip".to_string(), "cli-host".to_string());

        let config = load_config_with(&config_path, Some(&cli_args), lookup).unwrap();

        // CLI wins for host, env wins for port, file wins for topic
        assert_eq!(config.inbound.host, "cli-host");
        assert_eq!(config.inbound.port, 9000);
        assert_eq!(config.inbound.topic, "file-topic");
    }
}
