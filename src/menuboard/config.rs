use crate::engine::PageSize;
use crate::error::{MenuboardError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_API_BASE: &str = "http://localhost:8000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CATEGORIES_PAGE_SIZE: usize = 10;
const DEFAULT_MENUS_PAGE_SIZE: usize = 12;

/// Environment variable overriding `api_base`.
pub const API_ENV: &str = "MENUBOARD_API";

pub const KEYS: [&str; 4] = [
    "api-base",
    "timeout-secs",
    "categories-page-size",
    "menus-page-size",
];

/// Client configuration, stored as config.json in the platform config dir.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuboardConfig {
    /// Root of the menu API, e.g. "http://localhost:8000/api"
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_categories_page_size")]
    pub categories_page_size: usize,

    #[serde(default = "default_menus_page_size")]
    pub menus_page_size: usize,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_categories_page_size() -> usize {
    DEFAULT_CATEGORIES_PAGE_SIZE
}

fn default_menus_page_size() -> usize {
    DEFAULT_MENUS_PAGE_SIZE
}

impl Default for MenuboardConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            categories_page_size: DEFAULT_CATEGORIES_PAGE_SIZE,
            menus_page_size: DEFAULT_MENUS_PAGE_SIZE,
        }
    }
}

impl MenuboardConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: MenuboardConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Applies `MENUBOARD_API` when it is set and not blank.
    pub fn with_env_override(mut self, value: Option<String>) -> Self {
        if let Some(api) = value.filter(|v| !v.trim().is_empty()) {
            self.api_base = api.trim().to_string();
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Page size for the category table; falls back to 10 if stored as 0.
    pub fn categories_page_size(&self) -> PageSize {
        PageSize::new(self.categories_page_size).unwrap_or_default()
    }

    pub fn menus_page_size(&self) -> PageSize {
        PageSize::new(self.menus_page_size)
            .or_else(|| PageSize::new(DEFAULT_MENUS_PAGE_SIZE))
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api-base" => Some(self.api_base.clone()),
            "timeout-secs" => Some(self.timeout_secs.to_string()),
            "categories-page-size" => Some(self.categories_page_size.to_string()),
            "menus-page-size" => Some(self.menus_page_size.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "api-base" => {
                if !value.starts_with("http://") && !value.starts_with("https://") {
                    return Err(MenuboardError::Config(format!(
                        "api-base must be an http(s) URL, got: {}",
                        value
                    )));
                }
                self.api_base = value.trim_end_matches('/').to_string();
            }
            "timeout-secs" => {
                self.timeout_secs = value
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| invalid_number(key, value))?;
            }
            "categories-page-size" => {
                self.categories_page_size = parse_page_size(key, value)?;
            }
            "menus-page-size" => {
                self.menus_page_size = parse_page_size(key, value)?;
            }
            _ => {
                return Err(MenuboardError::Config(format!(
                    "Unknown config key: {}",
                    key
                )))
            }
        }
        Ok(())
    }
}

fn invalid_number(key: &str, value: &str) -> MenuboardError {
    MenuboardError::Config(format!("{} must be a positive number, got: {}", key, value))
}

fn parse_page_size(key: &str, value: &str) -> Result<usize> {
    PageSize::parse(value)
        .map(PageSize::get)
        .ok_or_else(|| invalid_number(key, value))
}
