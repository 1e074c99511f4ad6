//! Configuration loading and discovery for `gifcrop.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::GifcropConfig;
use crate::crop::LookupPolicy;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file.
pub const CONFIG_FILE: &str = "gifcrop.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse gifcrop.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override output file
    pub output: Option<PathBuf>,
    /// Override palette lookup policy
    pub lookup: Option<LookupPolicy>,
    /// Override number of worker threads
    pub jobs: Option<usize>,
    /// Enable error collection
    pub collect_errors: Option<bool>,
}

/// Find gifcrop.toml.
///
/// Search order:
/// 1. Walk up from current directory looking for gifcrop.toml
/// 2. Check XDG_CONFIG_HOME/gifcrop/gifcrop.toml (or ~/.config/gifcrop/gifcrop.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find gifcrop.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("gifcrop").join(CONFIG_FILE);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find gifcrop.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration.
///
/// If a path is provided, loads from that file. Otherwise, uses
/// `find_config()` to locate one. Without any config file the defaults are
/// returned.
pub fn load_config(path: Option<&Path>) -> Result<GifcropConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(GifcropConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<GifcropConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: GifcropConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut GifcropConfig, overrides: &CliOverrides) {
    if let Some(ref output) = overrides.output {
        config.output.path = output.clone();
    }

    if let Some(lookup) = overrides.lookup {
        config.crop.lookup = lookup;
    }

    if let Some(jobs) = overrides.jobs {
        config.crop.jobs = jobs;
    }

    if let Some(collect_errors) = overrides.collect_errors {
        config.telemetry.collect_errors = collect_errors;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(contents.as_bytes())
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[crop]\njobs = 2");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "");

        let subdir = temp.path().join("clips").join("raw");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, None);
    }

    #[test]
    #[serial]
    fn test_find_xdg_config() {
        let temp = TempDir::new().expect("should create temp dir");
        let dir = temp.path().join("gifcrop");
        fs::create_dir_all(&dir).expect("should create xdg dir");
        let config_path = write_config(&dir, "");

        let previous = env::var_os("XDG_CONFIG_HOME");
        env::set_var("XDG_CONFIG_HOME", temp.path());
        let found = find_xdg_config();
        match previous {
            Some(value) => env::set_var("XDG_CONFIG_HOME", value),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }

        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            r#"
[crop]
lookup = "nearest"
jobs = 0

[output]
path = "small.gif"
"#,
        );

        let config = load_config(Some(&config_path)).expect("should load config");
        assert_eq!(config.crop.lookup, LookupPolicy::Nearest);
        assert_eq!(config.crop.jobs, 0);
        assert_eq!(config.output.path, PathBuf::from("small.gif"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[crop\njobs = ");

        let err = load_config(Some(&config_path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[crop]\njobs = 100000");

        let err = load_config(Some(&config_path)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert!(err.to_string().contains("'crop.jobs' must be at most"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let err = load_config(Some(&temp.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut config = GifcropConfig::default();
        let overrides = CliOverrides {
            output: Some(PathBuf::from("dist/out.gif")),
            lookup: Some(LookupPolicy::Nearest),
            jobs: Some(8),
            collect_errors: Some(true),
        };

        merge_cli_overrides(&mut config, &overrides);
        assert_eq!(config.output.path, PathBuf::from("dist/out.gif"));
        assert_eq!(config.crop.lookup, LookupPolicy::Nearest);
        assert_eq!(config.crop.jobs, 8);
        assert!(config.telemetry.collect_errors);
    }

    #[test]
    fn test_merge_empty_overrides_keeps_config() {
        let mut config = GifcropConfig::default();
        config.crop.jobs = 3;
        merge_cli_overrides(&mut config, &CliOverrides::default());
        assert_eq!(config.crop.jobs, 3);
        assert_eq!(config.output.path, PathBuf::from("cropped.gif"));
    }
}
