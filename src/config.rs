//! Configuration management for the ATS scorer

use crate::error::{AtsError, Result};
use crate::processing::gap::DEFAULT_NEAR_MISS_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub gaps: GapConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub max_file_size_bytes: u64,
    pub enable_cache: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapConfig {
    /// Minimum Jaro-Winkler similarity for a "did you mean" hint
    pub near_miss_threshold: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
    Markdown,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 5 * 1024 * 1024,
            enable_cache: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Default for GapConfig {
    fn default() -> Self {
        Self {
            near_miss_threshold: DEFAULT_NEAR_MISS_THRESHOLD,
        }
    }
}

impl Config {
    /// Load from `config_path`, writing defaults there on first use.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| AtsError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AtsError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("ats-scorer")
            .join("config.toml")
    }

    /// Set one value by its dotted key, e.g. `output.format`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
            value
                .parse()
                .map_err(|_| AtsError::Configuration(format!("Invalid value for {}: {}", key, value)))
        }

        match key {
            "input.max_file_size_bytes" => self.input.max_file_size_bytes = parse(key, value)?,
            "input.enable_cache" => self.input.enable_cache = parse(key, value)?,
            "output.format" => {
                self.output.format = crate::cli::parse_output_format(value).map_err(AtsError::Configuration)?
            }
            "output.detailed" => self.output.detailed = parse(key, value)?,
            "output.color_output" => self.output.color_output = parse(key, value)?,
            "gaps.near_miss_threshold" => self.gaps.near_miss_threshold = parse(key, value)?,
            _ => return Err(AtsError::Configuration(format!("Unknown configuration key: {}", key))),
        }

        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.gaps.near_miss_threshold) {
            return Err(AtsError::Configuration(format!(
                "gaps.near_miss_threshold must be between 0 and 1, got {}",
                self.gaps.near_miss_threshold
            )));
        }
        if self.input.max_file_size_bytes == 0 {
            return Err(AtsError::Configuration(
                "input.max_file_size_bytes must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config, Config::default());
        assert!(path.exists());
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\nformat = \"Json\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.color_output);
        assert_eq!(config.input.max_file_size_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn test_out_of_range_threshold_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[gaps]\nnear_miss_threshold = 1.5\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(AtsError::Configuration(_))));
    }

    #[test]
    fn test_set_by_dotted_key() {
        let mut config = Config::default();

        config.set("output.format", "markdown").unwrap();
        config.set("input.enable_cache", "false").unwrap();
        config.set("gaps.near_miss_threshold", "0.9").unwrap();

        assert_eq!(config.output.format, OutputFormat::Markdown);
        assert!(!config.input.enable_cache);
        assert_eq!(config.gaps.near_miss_threshold, 0.9);

        assert!(config.set("output.colour", "true").is_err());
        assert!(config.set("input.max_file_size_bytes", "lots").is_err());
        assert!(config.set("gaps.near_miss_threshold", "2").is_err());
    }

    #[test]
    fn test_malformed_toml_is_a_configuration_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[input\nmax_file_size_bytes = ").unwrap();

        assert!(matches!(Config::load_from(&path), Err(AtsError::Configuration(_))));
    }
}
