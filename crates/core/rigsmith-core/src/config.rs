//! Configuration management for the configurator.
//!
//! Tunables (power headroom, tax, shipping, cooler fallback, logging) are
//! read from any number of [`ConfigSource`]s, merged in order into a
//! [`ConfigValue`] tree and deserialized into [`ConfiguratorConfig`].
//! Every field has a default, so an empty source set yields the stock
//! behavior.

use crate::error::{Result, RigsmithError};
use crate::traits::Validatable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Environment prefix used by [`ConfiguratorConfig::load`]
pub const ENV_PREFIX: &str = "RIGSMITH";

/// Trait for configuration sources
pub trait ConfigSource {
    /// Load configuration from this source
    fn load(&self) -> Result<ConfigValue>;

    /// Get the source name
    fn source_name(&self) -> &str;
}

/// Configuration value that can hold different types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Null value
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Float value
    Float(f64),
    /// String value
    String(String),
    /// Array of values
    Array(Vec<ConfigValue>),
    /// Object/map of values
    Object(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Try to view as object
    pub fn as_object(&self) -> Result<&BTreeMap<String, ConfigValue>> {
        match self {
            ConfigValue::Object(obj) => Ok(obj),
            _ => Err(RigsmithError::config("Value is not an object")),
        }
    }

    /// Get a nested value by dotted path (e.g. `"power.overhead_watts"`)
    pub fn get_path(&self, path: &str) -> Result<&ConfigValue> {
        let mut current = self;
        for part in path.split('.') {
            current = current
                .as_object()
                .map_err(|_| {
                    RigsmithError::config(format!("Cannot navigate path '{path}' on non-object value"))
                })?
                .get(part)
                .ok_or_else(|| RigsmithError::config(format!("Path '{path}' not found")))?;
        }
        Ok(current)
    }

    /// Parse an environment string into the narrowest matching value
    fn from_env_str(raw: &str) -> Self {
        if let Ok(b) = raw.parse::<bool>() {
            ConfigValue::Boolean(b)
        } else if let Ok(i) = raw.parse::<i64>() {
            ConfigValue::Integer(i)
        } else if let Ok(f) = raw.parse::<f64>() {
            ConfigValue::Float(f)
        } else {
            ConfigValue::String(raw.to_string())
        }
    }
}

/// File-based configuration source
pub struct FileConfigSource {
    path: PathBuf,
    format: ConfigFormat,
}

/// Supported configuration formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
}

impl FileConfigSource {
    /// Create a new file config source
    pub fn new<P: AsRef<Path>>(path: P, format: ConfigFormat) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            format,
        }
    }

    /// Auto-detect format from file extension
    pub fn auto_detect<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => ConfigFormat::Toml,
            Some("json") => ConfigFormat::Json,
            _ => {
                return Err(RigsmithError::config(format!(
                    "Cannot detect config format of {}",
                    path.display()
                )))
            }
        };
        Ok(Self::new(path, format))
    }
}

impl ConfigSource for FileConfigSource {
    fn load(&self) -> Result<ConfigValue> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| RigsmithError::config(format!("Failed to read config file: {e}")))?;

        match self.format {
            ConfigFormat::Toml => {
                let value: toml::Value = content.parse()?;
                Ok(toml_value_to_config_value(value))
            }
            ConfigFormat::Json => {
                let value: serde_json::Value = serde_json::from_str(&content)
                    .map_err(|e| RigsmithError::config(format!("Failed to parse JSON: {e}")))?;
                Ok(json_value_to_config_value(value))
            }
        }
    }

    fn source_name(&self) -> &str {
        self.path.to_str().unwrap_or("unknown")
    }
}

/// Environment variable configuration source
///
/// `PREFIX__POWER__OVERHEAD_WATTS=120` becomes `power.overhead_watts = 120`.
pub struct EnvConfigSource {
    prefix: String,
}

impl EnvConfigSource {
    /// Create a new environment config source with prefix
    pub fn new<S: Into<String>>(prefix: S) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl ConfigSource for EnvConfigSource {
    fn load(&self) -> Result<ConfigValue> {
        let marker = format!("{}__", self.prefix);
        let mut root = ConfigValue::Object(BTreeMap::new());

        for (key, value) in std::env::vars() {
            let Some(rest) = key.strip_prefix(&marker) else {
                continue;
            };
            let path: Vec<String> = rest
                .split("__")
                .filter(|part| !part.is_empty())
                .map(str::to_lowercase)
                .collect();
            if path.is_empty() {
                continue;
            }
            let leaf = path.iter().rev().fold(ConfigValue::from_env_str(&value), |acc, part| {
                ConfigValue::Object(BTreeMap::from([(part.clone(), acc)]))
            });
            root = merge_config_values(root, leaf);
        }

        Ok(root)
    }

    fn source_name(&self) -> &str {
        "environment"
    }
}

/// Configuration manager that combines multiple sources
pub struct ConfigManager {
    sources: Vec<Box<dyn ConfigSource>>,
    cache: Option<ConfigValue>,
}

impl ConfigManager {
    /// Create a new config manager
    #[must_use]
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            cache: None,
        }
    }

    /// Add a configuration source; later sources override earlier ones
    #[must_use]
    pub fn add_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Load configuration from all sources
    pub fn load(&mut self) -> Result<&ConfigValue> {
        let mut merged = ConfigValue::Object(BTreeMap::new());

        for source in &self.sources {
            let config = source.load().map_err(|e| {
                RigsmithError::config(format!("Failed to load from {}: {}", source.source_name(), e))
            })?;
            merged = merge_config_values(merged, config);
        }

        Ok(self.cache.insert(merged))
    }

    /// Get a configuration value by path (e.g., "pricing.tax_rate")
    pub fn get(&self, path: &str) -> Result<&ConfigValue> {
        self.cache
            .as_ref()
            .ok_or_else(|| RigsmithError::config("Configuration not loaded"))?
            .get_path(path)
    }

    /// Check if configuration is loaded
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.cache.is_some()
    }

    /// Deserialize the loaded tree into the typed configuration and validate it
    pub fn into_config(self) -> Result<ConfiguratorConfig> {
        let tree = self
            .cache
            .ok_or_else(|| RigsmithError::config("Configuration not loaded"))?;
        let json = serde_json::to_value(tree)?;
        let config: ConfiguratorConfig = serde_json::from_value(json)
            .map_err(|e| RigsmithError::config(format!("Invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Power estimation constants used by the PSU rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerConfig {
    /// Fixed draw for board, drives and fans
    pub overhead_watts: f64,
    /// Multiplier from estimated draw to recommended PSU rating
    pub headroom_factor: f64,
    /// CPU draw assumed when the TDP is unknown
    pub default_cpu_tdp: f64,
    /// GPU draw assumed when the requirement is unknown
    pub default_gpu_power: f64,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            overhead_watts: 100.0,
            headroom_factor: 1.3,
            default_cpu_tdp: 125.0,
            default_gpu_power: 200.0,
        }
    }
}

/// Checkout pricing constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Sales tax applied to the subtotal
    pub tax_rate: f64,
    /// Subtotals strictly above this ship free
    pub free_shipping_threshold: f64,
    /// Shipping charged at or below the threshold
    pub flat_shipping: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: 0.08,
            free_shipping_threshold: 50.0,
            flat_shipping: 10.0,
        }
    }
}

/// Build generator constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Share of the remaining budget given to an unweighted cooler
    pub fallback_cooler_share: f64,
    /// Upper bound of the unweighted cooler budget
    pub fallback_cooler_cap: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            fallback_cooler_share: 0.05,
            fallback_cooler_cap: 70.0,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human output
    #[default]
    Pretty,
    /// Single-line human output
    Compact,
    /// Newline-delimited JSON
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

/// Complete configurator configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfiguratorConfig {
    /// PSU sizing
    pub power: PowerConfig,
    /// Checkout totals
    pub pricing: PricingConfig,
    /// Build generation
    pub generator: GeneratorConfig,
    /// Log output
    pub logging: LoggingConfig,
}

impl ConfiguratorConfig {
    /// Load from an optional file, then `RIGSMITH__*` environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut manager = ConfigManager::new();
        if let Some(path) = path {
            manager = manager.add_source(FileConfigSource::auto_detect(path)?);
        }
        manager = manager.add_source(EnvConfigSource::new(ENV_PREFIX));
        manager.load()?;
        manager.into_config()
    }
}

fn ensure_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RigsmithError::config(format!(
            "{name} must be a non-negative number, got {value}"
        )))
    }
}

impl Validatable for ConfiguratorConfig {
    fn validate(&self) -> Result<()> {
        ensure_non_negative("power.overhead_watts", self.power.overhead_watts)?;
        ensure_non_negative("power.default_cpu_tdp", self.power.default_cpu_tdp)?;
        ensure_non_negative("power.default_gpu_power", self.power.default_gpu_power)?;
        ensure_non_negative("power.headroom_factor", self.power.headroom_factor)?;
        if self.power.headroom_factor < 1.0 {
            return Err(RigsmithError::config("power.headroom_factor must be at least 1.0"));
        }

        ensure_non_negative("pricing.tax_rate", self.pricing.tax_rate)?;
        ensure_non_negative("pricing.free_shipping_threshold", self.pricing.free_shipping_threshold)?;
        ensure_non_negative("pricing.flat_shipping", self.pricing.flat_shipping)?;

        ensure_non_negative("generator.fallback_cooler_share", self.generator.fallback_cooler_share)?;
        if self.generator.fallback_cooler_share > 1.0 {
            return Err(RigsmithError::config(
                "generator.fallback_cooler_share must not exceed 1.0",
            ));
        }
        ensure_non_negative("generator.fallback_cooler_cap", self.generator.fallback_cooler_cap)?;

        if self.logging.level.trim().is_empty() {
            return Err(RigsmithError::config("logging.level must not be empty"));
        }
        Ok(())
    }
}

// Helper functions for value conversion and manipulation

fn toml_value_to_config_value(value: toml::Value) -> ConfigValue {
    match value {
        toml::Value::String(s) => ConfigValue::String(s),
        toml::Value::Integer(i) => ConfigValue::Integer(i),
        toml::Value::Float(f) => ConfigValue::Float(f),
        toml::Value::Boolean(b) => ConfigValue::Boolean(b),
        toml::Value::Array(arr) => {
            ConfigValue::Array(arr.into_iter().map(toml_value_to_config_value).collect())
        }
        toml::Value::Table(table) => ConfigValue::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_value_to_config_value(v)))
                .collect(),
        ),
        toml::Value::Datetime(dt) => ConfigValue::String(dt.to_string()),
    }
}

fn json_value_to_config_value(value: serde_json::Value) -> ConfigValue {
    match value {
        serde_json::Value::String(s) => ConfigValue::String(s),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                ConfigValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                ConfigValue::Float(f)
            } else {
                ConfigValue::String(n.to_string())
            }
        }
        serde_json::Value::Bool(b) => ConfigValue::Boolean(b),
        serde_json::Value::Array(arr) => {
            ConfigValue::Array(arr.into_iter().map(json_value_to_config_value).collect())
        }
        serde_json::Value::Object(obj) => ConfigValue::Object(
            obj.into_iter()
                .map(|(k, v)| (k, json_value_to_config_value(v)))
                .collect(),
        ),
        serde_json::Value::Null => ConfigValue::Null,
    }
}

fn merge_config_values(base: ConfigValue, overlay: ConfigValue) -> ConfigValue {
    match (base, overlay) {
        (ConfigValue::Object(mut base_map), ConfigValue::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(existing) => merge_config_values(existing, value),
                    None => value,
                };
                base_map.insert(key, merged);
            }
            ConfigValue::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_stock_constants() {
        let config = ConfiguratorConfig::default();
        assert_eq!(config.power.overhead_watts, 100.0);
        assert_eq!(config.power.headroom_factor, 1.3);
        assert_eq!(config.pricing.tax_rate, 0.08);
        assert_eq!(config.generator.fallback_cooler_cap, 70.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merge_overrides_leaves() {
        let base = ConfigValue::Object(BTreeMap::from([(
            "power".to_string(),
            ConfigValue::Object(BTreeMap::from([
                ("overhead_watts".to_string(), ConfigValue::Integer(100)),
                ("headroom_factor".to_string(), ConfigValue::Float(1.3)),
            ])),
        )]));
        let overlay = ConfigValue::Object(BTreeMap::from([(
            "power".to_string(),
            ConfigValue::Object(BTreeMap::from([(
                "overhead_watts".to_string(),
                ConfigValue::Integer(150),
            )])),
        )]));

        let merged = merge_config_values(base, overlay);
        assert_eq!(merged.get_path("power.overhead_watts").unwrap(), &ConfigValue::Integer(150));
        assert_eq!(merged.get_path("power.headroom_factor").unwrap(), &ConfigValue::Float(1.3));
        assert!(merged.get_path("power.missing").is_err());
        assert!(merged.get_path("power.overhead_watts.deeper").is_err());
    }

    #[test]
    fn test_env_values_are_typed() {
        assert_eq!(ConfigValue::from_env_str("true"), ConfigValue::Boolean(true));
        assert_eq!(ConfigValue::from_env_str("120"), ConfigValue::Integer(120));
        assert_eq!(ConfigValue::from_env_str("0.1"), ConfigValue::Float(0.1));
        assert_eq!(ConfigValue::from_env_str("json"), ConfigValue::String("json".into()));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = ConfiguratorConfig::default();
        config.power.headroom_factor = 0.9;
        assert!(config.validate().is_err());

        let mut config = ConfiguratorConfig::default();
        config.pricing.tax_rate = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = ConfiguratorConfig::default();
        config.generator.fallback_cooler_share = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_manager_requires_load() {
        let manager = ConfigManager::new();
        assert!(!manager.is_loaded());
        assert!(manager.get("power").is_err());
        assert!(manager.into_config().is_err());
    }

    #[test]
    fn test_auto_detect_rejects_unknown_extension() {
        assert!(FileConfigSource::auto_detect("rigsmith.ini").is_err());
        assert!(FileConfigSource::auto_detect("rigsmith.toml").is_ok());
    }
}
