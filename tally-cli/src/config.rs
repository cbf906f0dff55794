use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::state::config_path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Prefix for rendered amounts
    pub currency_symbol: String,
    /// How far the savings projection looks ahead
    pub projection_months: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "£".to_string(),
            projection_months: 12,
        }
    }
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
