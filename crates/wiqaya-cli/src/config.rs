use std::path::{Path, PathBuf};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use wiqaya_core::models::DataSource;
use wiqaya_scoring::AggregatorConfig;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WiqayaConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default)]
    pub data_source: DataSource,
    /// Pin the date simulated contact windows are anchored to. Defaults to
    /// today when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<Date>,
}

impl Default for WiqayaConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            data_source: DataSource::default(),
            reference_date: None,
        }
    }
}

impl WiqayaConfig {
    /// The aggregator settings for a run on `today`.
    pub fn aggregator_config(&self, today: Date) -> AggregatorConfig {
        AggregatorConfig {
            data_source: self.data_source,
            reference_date: self.reference_date.unwrap_or(today),
        }
    }
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("wiqaya").join("config.json"))
}

/// Load the config at `path`, or the default location when `None`. A missing
/// file is not an error: the defaults apply.
pub fn load_or_default(path: Option<&Path>) -> eyre::Result<WiqayaConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(WiqayaConfig::default());
    }
    load_config(&path)
}

pub fn load_config(path: &Path) -> eyre::Result<WiqayaConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: WiqayaConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION})"
        ));
    }

    // v0 → v1: boolean `use_pilot_data` becomes the `data_source` enum
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        let use_pilot = obj
            .remove("use_pilot_data")
            .and_then(|v| v.as_bool())
            .unwrap_or(true);
        let source = if use_pilot {
            DataSource::Pilot
        } else {
            DataSource::Live
        };
        obj.entry("data_source")
            .or_insert(serde_json::Value::String(source.to_string()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (use_pilot_data → data_source)");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &WiqayaConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
