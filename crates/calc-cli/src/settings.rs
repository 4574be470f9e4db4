//! Layered CLI settings.
//!
//! Values are resolved in order, later layers winning:
//! 1. Built-in defaults
//! 2. TOML file passed with `--config`
//! 3. `NNCALC_LOG` environment variable
//! 4. Command-line flags (applied by the binary)

#![allow(clippy::module_name_repetitions)]

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use calc_core::{BigNatural, CalcConfig, CalcModel, Register};
use serde::Deserialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter.
pub const LOG_ENV: &str = "NNCALC_LOG";

/// Log filter used when nothing else is configured.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Resolved CLI settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Starting `top` register in decimal.
    pub top: Option<String>,
    /// Starting `bottom` register in decimal.
    pub bottom: Option<String>,
    /// Reject guarded operations whose flag is false.
    pub strict_guards: bool,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            top: None,
            bottom: None,
            strict_guards: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Error loading or applying settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The settings file could not be read.
    Read {
        /// File that failed.
        path: PathBuf,
        /// I/O error text.
        message: String,
    },
    /// The settings file is not valid TOML for [`Settings`].
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Deserializer error text.
        message: String,
    },
    /// A register seed is not a natural number.
    InvalidSeed {
        /// Register being seeded.
        register: Register,
        /// Rejected literal.
        literal: String,
    },
    /// The log filter directive does not parse.
    InvalidLogFilter {
        /// Rejected directive.
        filter: String,
        /// Parser error text.
        message: String,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => {
                write!(f, "failed to read {}: {message}", path.display())
            }
            Self::Parse { path, message } => {
                write!(f, "invalid settings in {}: {message}", path.display())
            }
            Self::InvalidSeed { register, literal } => write!(
                f,
                "{} seed '{literal}' is not a natural number",
                register.name()
            ),
            Self::InvalidLogFilter { filter, message } => {
                write!(f, "invalid log filter '{filter}': {message}")
            }
        }
    }
}

impl std::error::Error for SettingsError {}

impl Settings {
    /// Parses settings from TOML text; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] for malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, SettingsError> {
        toml::from_str(text).map_err(|e| SettingsError::Parse {
            path: origin.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// Loads defaults, the optional file, then the environment.
    ///
    /// # Errors
    ///
    /// Returns a [`SettingsError`] if the file cannot be read or parsed.
    pub fn load(config: Option<&Path>) -> Result<Self, SettingsError> {
        let mut settings = match config {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|e| SettingsError::Read {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                Self::from_toml_str(&text, path)?
            }
            None => Self::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Applies environment overrides read through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(filter) = lookup(LOG_ENV).filter(|v| !v.trim().is_empty()) {
            self.log_filter = filter;
        }
    }

    /// Builds the starting register pair.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidSeed`] for a non-decimal seed.
    pub fn seed_model(&self) -> Result<CalcModel<BigNatural>, SettingsError> {
        let top = parse_seed(Register::Top, self.top.as_deref())?;
        let bottom = parse_seed(Register::Bottom, self.bottom.as_deref())?;
        Ok(CalcModel::with_registers(top, bottom))
    }

    /// Controller configuration derived from these settings.
    #[must_use]
    pub const fn calc_config(&self) -> CalcConfig {
        CalcConfig {
            strict_guards: self.strict_guards,
        }
    }

    /// Installs the stderr `fmt` subscriber with this filter.
    ///
    /// A subscriber that is already installed is left in place.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidLogFilter`] for a bad directive.
    pub fn init_logging(&self) -> Result<(), SettingsError> {
        let filter =
            EnvFilter::try_new(&self.log_filter).map_err(|e| SettingsError::InvalidLogFilter {
                filter: self.log_filter.clone(),
                message: e.to_string(),
            })?;

        if tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_err()
        {
            debug!("tracing subscriber already installed");
        }
        Ok(())
    }
}

fn parse_seed(register: Register, literal: Option<&str>) -> Result<BigNatural, SettingsError> {
    literal.map_or_else(
        || Ok(BigNatural::default()),
        |text| {
            text.parse().map_err(|_| SettingsError::InvalidSeed {
                register,
                literal: text.to_string(),
            })
        },
    )
}
