use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Parameters, State};

/// Errors that can occur when loading or validating a simulation config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("`{field}` must be finite")]
    NonFinite { field: &'static str },

    #[error("`{field}` must be strictly positive")]
    NonPositive { field: &'static str },
}

/// Everything a driver needs to run one levitation trajectory.
///
/// Every top-level key and table is optional in TOML and falls back to its
/// default. Inside `[parameters]` any subset of constants may be given. An
/// `[initial]` table needs `position`; `velocity` defaults to zero:
///
/// ```toml
/// dt = 0.0005
/// steps = 2000
///
/// [parameters]
/// mass = 0.05
/// proportional_gain = 120.0
///
/// [initial]
/// position = 0.025
/// velocity = 0.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Step size (s).
    pub dt: f64,
    pub steps: usize,
    pub parameters: Parameters,
    pub initial: State,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: 1e-3,
            steps: 1000,
            parameters: Parameters::default(),
            initial: State::new(0.025, 0.0),
        }
    }
}

impl SimulationConfig {
    /// Parses and validates a TOML config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys, and
    /// a validation error if [`SimulationConfig::validate`] fails.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`SimulationConfig::from_toml_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::debug!("loading simulation config from {}", path.display());

        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Validates parameters, step size, and initial state.
    ///
    /// The initial gap must be strictly positive because the force law is
    /// singular at zero.
    ///
    /// # Errors
    ///
    /// Returns the first offending field as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parameters.validate()?;

        if !self.dt.is_finite() {
            return Err(ConfigError::NonFinite { field: "dt" });
        }
        if self.dt <= 0.0 {
            return Err(ConfigError::NonPositive { field: "dt" });
        }
        if !self.initial.is_finite() {
            return Err(ConfigError::NonFinite { field: "initial" });
        }
        if self.initial.position <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "initial.position",
            });
        }
        Ok(())
    }
}
