use crate::estimate::finish::{DEFAULT_FINISH_TIME_FORMAT, is_valid_time_format};
use crate::speedtest::client::{DEFAULT_DOWNLOAD_BYTES, DEFAULT_SPEEDTEST_URL};
use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "DLTIME";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub units: UnitsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub speedtest: SpeedTestConfig,
    #[serde(default)]
    pub state: StateConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DefaultsConfig {
    /// Speed unit used when `calc` is given a speed without one
    #[serde(default = "default_speed_unit")]
    pub speed_unit: String,
}

fn default_speed_unit() -> String {
    "bps".to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            speed_unit: default_speed_unit(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct UnitsConfig {
    /// Reject unknown unit tokens instead of treating them as bytes
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DisplayConfig {
    /// strftime pattern for the projected finish time
    #[serde(default = "default_finish_time_format")]
    pub finish_time_format: String,
}

fn default_finish_time_format() -> String {
    DEFAULT_FINISH_TIME_FORMAT.to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            finish_time_format: default_finish_time_format(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SpeedTestConfig {
    #[serde(default = "default_speedtest_url")]
    pub url: String,
    #[serde(default = "default_download_bytes")]
    pub bytes: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_retries")]
    pub retries: u32,
    #[serde(default = "default_samples")]
    pub samples: u32,
}

fn default_speedtest_url() -> String {
    DEFAULT_SPEEDTEST_URL.to_string()
}

fn default_download_bytes() -> u64 {
    DEFAULT_DOWNLOAD_BYTES
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retries() -> u32 {
    2
}

fn default_samples() -> u32 {
    1
}

impl Default for SpeedTestConfig {
    fn default() -> Self {
        Self {
            url: default_speedtest_url(),
            bytes: default_download_bytes(),
            timeout_secs: default_timeout_secs(),
            retries: default_retries(),
            samples: default_samples(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StateConfig {
    /// Optional override for state directory (for testing)
    pub state_dir_override: Option<PathBuf>,
}

impl DisplayConfig {
    pub fn validate(&self) -> Result<()> {
        if !is_valid_time_format(&self.finish_time_format) {
            anyhow::bail!(
                "Invalid finish_time_format '{}', expected a strftime pattern such as %H:%M:%S",
                self.finish_time_format
            );
        }
        Ok(())
    }
}

impl SpeedTestConfig {
    pub fn validate(&self) -> Result<()> {
        if self.bytes == 0 {
            anyhow::bail!("speedtest.bytes must be greater than 0");
        }
        if self.samples == 0 {
            anyhow::bail!("speedtest.samples must be greater than 0");
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("speedtest.timeout_secs must be greater than 0");
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            anyhow::bail!("speedtest.url must be an http(s) URL, got '{}'", self.url);
        }
        Ok(())
    }
}

impl Config {
    /// Validate all configuration
    pub fn validate(&self) -> Result<()> {
        self.display.validate()?;
        self.speedtest.validate()?;
        Ok(())
    }
}

/// Directory holding `config.toml`: `~/.dltime`
pub fn config_dir() -> Result<PathBuf> {
    Ok(home::home_dir()
        .context("Could not find home directory")?
        .join(".dltime"))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load a config file (which may be absent) layered under `DLTIME_*`
/// environment variables, e.g. `DLTIME_SPEEDTEST__SAMPLES=3`.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
    let loader = ConfigBuilder::builder()
        .add_source(
            File::from(path.as_ref())
                .format(FileFormat::Toml)
                .required(false),
        )
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build config loader")?;

    loader
        .try_deserialize()
        .context("Failed to parse config file")
}

pub fn load() -> Result<Config> {
    let config = load_from_path(config_path()?)?;
    config.validate()?;
    Ok(config)
}

pub fn save_to_path<P: AsRef<Path>>(config: &Config, path: P) -> Result<()> {
    let toml_string = toml::to_string_pretty(config).context("Failed to serialize config")?;

    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml_string).context("Failed to write config file")?;

    Ok(())
}
