//! Configuration loading and discovery for `stackrot.toml`

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::schema::StackrotConfig;

/// File name searched for during discovery
pub const CONFIG_FILE_NAME: &str = "stackrot.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse stackrot.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// Find `stackrot.toml` by walking up from `start`.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
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
/// With a path, loads that file. Without one, walks up from the current
/// directory looking for `stackrot.toml` and falls back to the defaults when
/// nothing is found.
///
/// # Example
/// ```ignore
/// let config = load_config(Some(Path::new("stackrot.toml")))?;
/// let rotator = Rotator::from_config(&config);
/// ```
pub fn load_config(path: Option<&Path>) -> Result<StackrotConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => env::current_dir().ok().and_then(find_config_from),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(StackrotConfig::default()),
    }
}

fn load_config_file(path: &Path) -> Result<StackrotConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config = StackrotConfig::from_toml_str(&contents)?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

impl StackrotConfig {
    /// Load and validate the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_config_file(path)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: StackrotConfig = toml::from_str(contents)?;

        let errors = config.validate();
        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::RotationDirection;
    use serial_test::serial;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    /// Run `f` with `dir` as the working directory, restoring the old one after.
    fn with_current_dir<R>(dir: &Path, f: impl FnOnce() -> R) -> R {
        let original = env::current_dir().expect("should read current dir");
        env::set_current_dir(dir).expect("should enter temp dir");
        let result = f();
        env::set_current_dir(original).expect("should restore current dir");
        result
    }

    fn write_config(dir: &Path, content: &[u8]) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE_NAME);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(content)
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[rotate]\ndirection = \"cw\"");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"");

        let subdir = temp.path().join("data").join("stacks");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_load_config_explicit_path() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[rotate]\ndirection = \"ccw\"\n");

        let config = load_config(Some(&config_path)).expect("should load config");
        assert_eq!(config.rotate.direction, RotationDirection::CounterClockwise);
    }

    #[test]
    fn test_load_method_reads_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path =
            write_config(temp.path(), b"[rotate]\ndirection = \"ccw\"\n\n[compute]\nparallel = false\n");

        let config = StackrotConfig::load(&config_path).expect("should load config");
        assert_eq!(config.rotate.direction, RotationDirection::CounterClockwise);
        assert!(!config.compute.parallel);
    }

    #[test]
    fn test_load_method_validates() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[compute]\nthreads = 0\n");

        let result = StackrotConfig::load(&config_path);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    #[serial]
    fn test_load_config_discovers_from_cwd() {
        let temp = TempDir::new().expect("should create temp dir");
        write_config(temp.path(), b"[rotate]\ndirection = \"ccw\"\n");
        let subdir = temp.path().join("stacks").join("raw");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let config = with_current_dir(&subdir, || load_config(None)).expect("should load config");
        assert_eq!(config.rotate.direction, RotationDirection::CounterClockwise);
    }

    #[test]
    #[serial]
    fn test_load_config_defaults_without_file() {
        let temp = TempDir::new().expect("should create temp dir");

        let config = with_current_dir(temp.path(), || load_config(None)).expect("should load defaults");
        assert_eq!(config, StackrotConfig::default());
    }

    #[test]
    fn test_load_config_missing_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let result = load_config(Some(&temp.path().join("missing.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_from_toml_str_parse_error() {
        let result = StackrotConfig::from_toml_str("[compute\nparallel = yes");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_toml_str_validation_error() {
        let err = StackrotConfig::from_toml_str("[compute]\nthreads = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("compute.threads must be at least 1"));
    }
}
