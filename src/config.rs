use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::form::FormFields;

pub const CONFIG_ENV_VAR: &str = "EMI_CALC_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "emi-calc.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub thousands_separator: char,
    pub decimal_separator: char,
    pub fraction_digits: usize,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            thousands_separator: ',',
            decimal_separator: '.',
            fraction_digits: 2,
        }
    }
}

/// Text the form fields start out with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDefaults {
    pub principal: String,
    pub annual_rate: String,
    pub tenure_months: String,
}

impl FieldDefaults {
    pub fn to_fields(&self) -> FormFields {
        FormFields {
            principal: self.principal.clone(),
            annual_rate: self.annual_rate.clone(),
            tenure_months: self.tenure_months.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency: CurrencyFormat,
    pub log_file: PathBuf,
    pub log_level: String,
    pub defaults: FieldDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: CurrencyFormat::default(),
            log_file: PathBuf::from("emi-calc.log"),
            log_level: "info".to_string(),
            defaults: FieldDefaults::default(),
        }
    }
}

impl Config {
    /// `$EMI_CALC_CONFIG` if set, otherwise `./emi-calc.json`.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Read the config at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        config.level_filter()?;
        Ok(config)
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| anyhow!("invalid log_level '{}'", self.log_level))
    }
}
