//! Config file handling

use std::path::{Path, PathBuf};

use crate::curl::{CompletionSettings, ValidatorSettings};
use crate::errors::CurlpadError;

/// curlpad configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub config_dir: PathBuf,
    pub validation: ValidatorSettings,
    pub completion: CompletionSettings,
    /// Environments file (`.toml` store or `.env`)
    pub environment_file: Option<PathBuf>,
    /// Environment to activate after loading the file
    pub active_environment: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: Self::default_config_dir(),
            validation: ValidatorSettings::default(),
            completion: CompletionSettings::default(),
            environment_file: None,
            active_environment: None,
        }
    }
}

impl Config {
    /// Load `config.toml` from the config directory (defaults if absent)
    pub fn load() -> Result<Self, CurlpadError> {
        let config_dir = Self::default_config_dir();
        let config_file = config_dir.join("config.toml");

        if !config_file.exists() {
            return Ok(Self {
                config_dir,
                ..Self::default()
            });
        }

        Self::load_file(&config_file)
    }

    /// Load a specific config file; relative paths inside resolve against its directory
    pub fn load_file(path: &Path) -> Result<Self, CurlpadError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CurlpadError::Config(format!("Failed to read config: {}", e)))?;

        let config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_dir);

        Self::parse(&content, config_dir)
    }

    pub fn parse(content: &str, config_dir: PathBuf) -> Result<Self, CurlpadError> {
        let toml_value: toml::Value = toml::from_str(content)
            .map_err(|e| CurlpadError::Config(format!("Invalid config TOML: {}", e)))?;

        let mut validation = ValidatorSettings::default();
        if let Some(threshold) = toml_value
            .get("validation")
            .and_then(|v| v.get("suggestion_threshold"))
        {
            validation.suggestion_threshold = threshold
                .as_float()
                .or_else(|| threshold.as_integer().map(|i| i as f64))
                .filter(|t| (0.0..=1.0).contains(t))
                .ok_or_else(|| {
                    CurlpadError::Config("validation.suggestion_threshold must be a number between 0 and 1".to_string())
                })?;
        }

        let completion_section = toml_value.get("completion");
        let mut completion = CompletionSettings::default();
        if let Some(len) = Self::get_usize(completion_section, "variable_preview_len")? {
            completion.variable_preview_len = len;
        }
        if let Some(count) = Self::get_usize(completion_section, "general_flag_count")? {
            completion.general_flag_count = count;
        }

        let environment = toml_value.get("environment");
        let environment_file = environment
            .and_then(|e| e.get("file"))
            .and_then(|v| v.as_str())
            .map(|p| {
                let path = PathBuf::from(p);
                if path.is_absolute() {
                    path
                } else {
                    config_dir.join(path)
                }
            });
        let active_environment = environment
            .and_then(|e| e.get("active"))
            .and_then(|v| v.as_str())
            .map(String::from);

        Ok(Self {
            config_dir,
            validation,
            completion,
            environment_file,
            active_environment,
        })
    }

    fn get_usize(section: Option<&toml::Value>, key: &str) -> Result<Option<usize>, CurlpadError> {
        let Some(value) = section.and_then(|s| s.get(key)) else {
            return Ok(None);
        };
        value
            .as_integer()
            .and_then(|i| usize::try_from(i).ok())
            .map(Some)
            .ok_or_else(|| CurlpadError::Config(format!("completion.{} must be a non-negative integer", key)))
    }

    /// `$CURLPAD_CONFIG_DIR`, else the platform config dir
    fn default_config_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os("CURLPAD_CONFIG_DIR") {
            return PathBuf::from(dir);
        }
        dirs::config_dir()
            .map(|p| p.join("curlpad"))
            .unwrap_or_else(|| PathBuf::from(".curlpad"))
    }
}
