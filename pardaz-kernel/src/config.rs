//! Site configuration.
//!
//! Values are layered: explicit overrides (CLI flags) over a JSON config
//! file over environment variables over built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Environment variable naming the database file.
pub const DB_ENV: &str = "PARDAZ_DB";
/// Environment variable that disables persistence when truthy.
pub const EPHEMERAL_ENV: &str = "PARDAZ_EPHEMERAL";

const DEFAULT_EVENT_CAPACITY: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Database file; `None` means `~/.pardaz/site.db`.
    pub db_path: Option<PathBuf>,
    /// Whether layout changes are written to the database.
    pub persist: bool,
    /// Capacity of the site event broadcast channel.
    pub event_capacity: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            persist: true,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

/// A partial configuration; unset fields leave the base untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    pub persist: Option<bool>,
    pub event_capacity: Option<usize>,
}

impl SiteConfig {
    /// An in-process configuration that never touches disk.
    pub fn ephemeral() -> Self {
        Self {
            persist: false,
            ..Self::default()
        }
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Defaults overlaid with variables looked up through `var`.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = var(DB_ENV).filter(|p| !p.is_empty()) {
            config.db_path = Some(PathBuf::from(path));
        }
        if let Some(flag) = var(EPHEMERAL_ENV) {
            config.persist = !is_truthy(&flag);
        }
        config
    }

    /// Environment, then the JSON file at `path` when given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = Self::from_env();
        if let Some(path) = path {
            let overrides = ConfigOverrides::read(path)?;
            config.apply(&overrides);
        }
        Ok(config)
    }

    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(path) = &overrides.db_path {
            self.db_path = Some(path.clone());
        }
        if let Some(persist) = overrides.persist {
            self.persist = persist;
        }
        if let Some(capacity) = overrides.event_capacity {
            self.event_capacity = capacity;
        }
    }

    /// The database file to open.
    pub fn resolved_db_path(&self) -> anyhow::Result<PathBuf> {
        match &self.db_path {
            Some(path) => Ok(path.clone()),
            None => default_db_path(),
        }
    }
}

impl ConfigOverrides {
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid config file: {:?}", path))
    }
}

fn default_db_path() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".pardaz").join("site.db"))
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
