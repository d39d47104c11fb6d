//! Analysis configuration loader - parses analysis.toml
//!
//! Separates dataset layout (header names, fixed column positions) and the
//! distance exponent from code, so a reshaped export can be analysed without
//! recompiling. Every field has a default matching the standard company
//! dataset, and a missing file simply means "use the defaults".

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "analysis.toml";

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV_VAR: &str = "BIZSTATS_CONFIG";

/// Root configuration structure for TOML parsing
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Exponent `p` of the Minkowski-style group distance.
    pub minkowski_exponent: f64,
    /// Header names used by the distance and significance engines.
    pub columns: ColumnNames,
    /// Fixed positions used by the category ranking engine.
    pub category_layout: CategoryLayout,
}

/// Header names resolved once per table for name-keyed lookups.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub group: String,
    pub employees: String,
    pub median_salary: String,
    pub profit_before: String,
    pub profit_after: String,
}

/// Zero-based field positions read by the category ranking engine.
///
/// These are positional on purpose: the ranking engine never consults the
/// header, so it keeps working on exports whose header text differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CategoryLayout {
    pub entity_id: usize,
    pub category: usize,
    pub employees: usize,
    pub profit_before: usize,
    pub profit_after: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            minkowski_exponent: 3.0,
            columns: ColumnNames::default(),
            category_layout: CategoryLayout::default(),
        }
    }
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            group: "country".to_string(),
            employees: "number of employees".to_string(),
            median_salary: "median Salary".to_string(),
            profit_before: "profits in 2020(million)".to_string(),
            profit_after: "profits in 2021(million)".to_string(),
        }
    }
}

impl Default for CategoryLayout {
    fn default() -> Self {
        Self {
            entity_id: 0,
            category: 5,
            employees: 6,
            profit_before: 8,
            profit_after: 9,
        }
    }
}

/// Configuration loading / validation error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl AnalysisConfig {
    /// Parses a TOML document and validates it.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings no engine can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = self.minkowski_exponent;
        if !p.is_finite() || p <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "minkowski_exponent must be a positive finite number, got {}",
                p
            )));
        }
        let names = [
            &self.columns.group,
            &self.columns.employees,
            &self.columns.median_salary,
            &self.columns.profit_before,
            &self.columns.profit_after,
        ];
        if names.iter().any(|name| name.is_empty()) {
            return Err(ConfigError::Invalid("column names must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Loads and validates the config at `path`.
pub fn load_config(path: &Path) -> Result<AnalysisConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    AnalysisConfig::from_toml_str(&contents)
}

/// Resolves which config file to use, if any.
///
/// Order: explicit path, then `BIZSTATS_CONFIG` (a `.env` file is honoured),
/// then `analysis.toml` in the working directory.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    dotenv::dotenv().ok();
    if let Ok(path) = env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    local.exists().then_some(local)
}

/// Loads the resolved config, falling back to defaults when no file applies.
pub fn load_config_or_default(explicit: Option<&Path>) -> Result<AnalysisConfig, ConfigError> {
    match resolve_config_path(explicit) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading analysis config");
            load_config(&path)
        }
        None => {
            tracing::debug!("no analysis config found, using defaults");
            Ok(AnalysisConfig::default())
        }
    }
}
