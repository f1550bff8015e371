//! TOML-backed engine settings.
//!
//! Every key has a default, so an empty file (or no file) yields the stock
//! settings. [`EngineSettings::search_settings`] converts the file layer into
//! the typed, validated [`SearchSettings`].
//!
//! ```toml
//! house_system = "koch"
//! refine_exact_times = true
//!
//! [hourly]
//! days = 7
//! step_minutes = 60
//!
//! [interval]
//! half_window_days = 365
//! ```
//!
//! Resolution order for the file: explicit path, then `HORO_CONFIG`, then
//! built-in defaults.

use std::path::{Path, PathBuf};

use horo_chart::HouseSystem;
use horo_search::{
    BirthContext, BirthFields, ChartMode, ExactSearchConfig, HourlySweepConfig,
    IntervalSweepConfig, SearchError, SearchSettings,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming a settings file.
pub const CONFIG_ENV_VAR: &str = "HORO_CONFIG";

/// Errors from loading or converting settings.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("cannot read {path}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("cannot parse settings: {0}")]
    Parse(String),
    #[error("invalid settings: {0}")]
    Invalid(#[from] SearchError),
}

/// `[exact]` table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExactSection {
    pub window_minutes: u32,
    pub max_iterations: u32,
    pub convergence_orb_deg: f64,
}

impl Default for ExactSection {
    fn default() -> Self {
        let d = ExactSearchConfig::default();
        Self {
            window_minutes: d.window_minutes,
            max_iterations: d.max_iterations,
            convergence_orb_deg: d.convergence_orb_deg,
        }
    }
}

/// `[hourly]` table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HourlySection {
    pub days: u32,
    pub step_minutes: u32,
}

impl Default for HourlySection {
    fn default() -> Self {
        let d = HourlySweepConfig::default();
        Self {
            days: d.days,
            step_minutes: d.step_minutes,
        }
    }
}

/// `[interval]` table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntervalSection {
    pub half_window_days: u32,
    pub open_orb_deg: f64,
    pub open_tolerance_deg: f64,
    pub close_tolerance_deg: f64,
}

impl Default for IntervalSection {
    fn default() -> Self {
        let d = IntervalSweepConfig::default();
        Self {
            half_window_days: d.half_window_days,
            open_orb_deg: d.open_orb_deg,
            open_tolerance_deg: d.open_tolerance_deg,
            close_tolerance_deg: d.close_tolerance_deg,
        }
    }
}

/// Settings file contents.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
    /// House system for contexts built by [`EngineSettings::context`].
    pub house_system: HouseSystem,
    /// Obliquity override, degrees. Absent means the provider's own value.
    pub obliquity_deg: Option<f64>,
    pub refine_exact_times: bool,
    pub exact: ExactSection,
    pub hourly: HourlySection,
    pub interval: IntervalSection,
}

impl EngineSettings {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read and parse a settings file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let settings = Self::from_toml_str(&content)?;
        info!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Load from `explicit`, else from `HORO_CONFIG`, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Self::load(Path::new(&path));
        }
        debug!("no settings file, using defaults");
        Ok(Self::default())
    }

    /// Typed settings, validated.
    pub fn search_settings(&self) -> Result<SearchSettings, ConfigError> {
        let settings = SearchSettings {
            obliquity_deg: self.obliquity_deg,
            exact: ExactSearchConfig {
                window_minutes: self.exact.window_minutes,
                max_iterations: self.exact.max_iterations,
                convergence_orb_deg: self.exact.convergence_orb_deg,
            },
            hourly: HourlySweepConfig {
                days: self.hourly.days,
                step_minutes: self.hourly.step_minutes,
            },
            interval: IntervalSweepConfig {
                half_window_days: self.interval.half_window_days,
                open_orb_deg: self.interval.open_orb_deg,
                open_tolerance_deg: self.interval.open_tolerance_deg,
                close_tolerance_deg: self.interval.close_tolerance_deg,
            },
            refine_exact_times: self.refine_exact_times,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Birth context using the configured house system.
    pub fn context(&self, primary: BirthFields, mode: ChartMode) -> BirthContext {
        BirthContext::new(primary, mode).with_house_system(self.house_system)
    }
}
