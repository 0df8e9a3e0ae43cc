//! User configuration store
//!
//! The store is a nested mapping of user values (YAML, TOML or JSON by file
//! extension). It is flattened to dot-notation keys before requirement
//! checks.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::core::{FlatConfig, flatten_config};
use crate::error::{PlanError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFormat {
    Yaml,
    Toml,
    Json,
}

impl StoreFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(PlanError::invalid_input(format!(
                "unsupported config store format: {} (expected .yaml, .yml, .toml or .json)",
                path.display()
            ))),
        }
    }
}

/// Parse store text into a nested value. The root must be a mapping.
pub fn parse_store(raw: &str, format: StoreFormat) -> Result<Value> {
    let parsed: Result<Value> = match format {
        StoreFormat::Yaml => serde_yaml::from_str(raw).map_err(PlanError::from),
        StoreFormat::Toml => toml::from_str::<toml::Table>(raw)
            .map_err(PlanError::from)
            .and_then(|value| serde_json::to_value(value).map_err(PlanError::from)),
        StoreFormat::Json => serde_json::from_str(raw).map_err(PlanError::from),
    };

    let value = parsed.map_err(|err| {
        PlanError::config_corruption("config store could not be parsed").with_cause(err)
    })?;

    match value {
        Value::Object(_) => Ok(value),
        // An empty YAML document
        Value::Null => Ok(Value::Object(serde_json::Map::new())),
        _ => Err(PlanError::config_corruption(
            "config store root must be a mapping",
        )),
    }
}

/// Load and flatten the store at `path`. A missing file is an empty store.
pub fn load_store(path: &Path) -> Result<FlatConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config store not found, using empty store");
        return Ok(FlatConfig::new());
    }
    let format = StoreFormat::from_path(path)?;
    let raw = std::fs::read_to_string(path).map_err(|err| {
        PlanError::file_read(format!("read config store {}: {err}", path.display()))
    })?;
    let value = parse_store(&raw, format)?;
    Ok(flatten_config(&value))
}
