use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_CONFIG_FILE: &str = "quickcart.toml";

/// Settings loaded from `quickcart.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub generator: GeneratorSettings,
    pub paths: PathSettings,
    pub logging: LoggingSettings,
}

/// Sizes, ranges and probabilities for synthetic data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub seed: u64,
    pub customers: u32,
    pub products: u32,
    /// Order attempts; weekend downsampling keeps fewer.
    pub orders: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub peak_hours: Vec<u32>,
    pub peak_hour_probability: f64,
    pub weekend_skip_probability: f64,
    /// Subtotals strictly above this ship for free.
    pub free_delivery_threshold: f64,
    pub delivery_fee: f64,
    pub on_time_minutes: i64,
    pub delivery_partners: u32,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            customers: 5000,
            products: 200,
            orders: 20000,
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default(),
            peak_hours: vec![7, 8, 12, 13, 19, 20, 21],
            peak_hour_probability: 0.6,
            weekend_skip_probability: 0.3,
            free_delivery_threshold: 200.0,
            delivery_fee: 20.0,
            on_time_minutes: 15,
            delivery_partners: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub raw_dir: PathBuf,
    pub processed_dir: PathBuf,
    pub runs_dir: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("data/raw"),
            processed_dir: PathBuf::from("data/processed"),
            runs_dir: PathBuf::from("runs"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Console filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Also write JSON logs into the run directory.
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from `quickcart.toml` when present.
    ///
    /// An explicit path must exist; the default file is optional and
    /// built-in defaults apply without it.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::MissingConfig(path.to_path_buf()));
                }
                Self::from_toml(&std::fs::read_to_string(path)?)?
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_toml(&std::fs::read_to_string(default_path)?)?
                } else {
                    Self::default()
                }
            }
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.generator.validate()
    }
}

impl GeneratorSettings {
    pub fn validate(&self) -> Result<()> {
        if self.customers == 0 || self.products == 0 || self.orders == 0 {
            return Err(Error::InvalidConfig(
                "customers, products and orders must be > 0".to_string(),
            ));
        }
        if self.start_date > self.end_date {
            return Err(Error::InvalidConfig(format!(
                "start_date {} is after end_date {}",
                self.start_date, self.end_date
            )));
        }
        if self.peak_hours.is_empty() {
            return Err(Error::InvalidConfig("peak_hours must not be empty".to_string()));
        }
        if let Some(hour) = self.peak_hours.iter().find(|hour| **hour > 23) {
            return Err(Error::InvalidConfig(format!("peak hour {hour} is not in 0..=23")));
        }
        for (key, value) in [
            ("peak_hour_probability", self.peak_hour_probability),
            ("weekend_skip_probability", self.weekend_skip_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!("{key} must be within [0, 1]")));
            }
        }
        if self.free_delivery_threshold < 0.0 || self.delivery_fee < 0.0 {
            return Err(Error::InvalidConfig(
                "delivery fee and threshold must be >= 0".to_string(),
            ));
        }
        if self.on_time_minutes <= 0 {
            return Err(Error::InvalidConfig("on_time_minutes must be > 0".to_string()));
        }
        if self.delivery_partners == 0 || self.delivery_partners > 999 {
            return Err(Error::InvalidConfig(
                "delivery_partners must be within 1..=999".to_string(),
            ));
        }
        Ok(())
    }

    /// Products generated per category for `categories` categories.
    pub fn products_per_category(&self, categories: usize) -> usize {
        self.products as usize / categories.max(1)
    }
}
