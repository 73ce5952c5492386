use anyhow::{Context, Result, anyhow};
use chrono_tz::Tz;
use moneymind_core::{Currency, Locale, MoneyFormat, parse_timezone};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_moneymind_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplaySection,
    #[serde(default)]
    pub data: DataSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplaySection {
    #[serde(default)]
    pub currency: Currency,
    /// Falls back to the currency's home locale when unset.
    pub locale: Option<Locale>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSection {
    /// Default export file for commands that take --file.
    pub file: Option<PathBuf>,
    /// Default user for commands that take --user.
    pub user: Option<String>,
    /// IANA timezone used to turn timestamps into calendar dates.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            file: None,
            user: None,
            timezone: default_timezone(),
        }
    }
}

impl Config {
    /// Money format from config, with optional command-line overrides.
    pub fn money_format(&self, currency: Option<Currency>, locale: Option<Locale>) -> MoneyFormat {
        let currency = currency.unwrap_or(self.display.currency);
        let locale = locale
            .or(self.display.locale)
            .unwrap_or_else(|| currency.home_locale());
        MoneyFormat::new(locale, currency)
    }

    pub fn timezone(&self) -> Result<Tz> {
        parse_timezone(&self.data.timezone)
            .ok_or_else(|| anyhow!("invalid timezone in config: {}", self.data.timezone))
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_moneymind_home()?.join("config.toml"))
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(p: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&p, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
