use anyhow::{bail, Result};
use std::path::PathBuf;

pub const DEFAULT_STORAGE_KEY: &str = "czai_lang";
pub const DEFAULT_ROOT_ATTRIBUTE: &str = "data-lang";

#[derive(Debug, Clone)]
pub struct Config {
    // Preference
    pub storage_key: String,
    pub root_attribute: String,

    // File store (CLI / native hosts)
    pub store_dir: PathBuf,
    pub origin: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            root_attribute: DEFAULT_ROOT_ATTRIBUTE.to_string(),
            store_dir: PathBuf::from(".site-lang"),
            origin: "localhost".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let storage_key = std::env::var("SITE_LANG_STORAGE_KEY")
            .unwrap_or(defaults.storage_key);
        if storage_key.trim().is_empty() {
            bail!("SITE_LANG_STORAGE_KEY must not be empty");
        }

        Ok(Self {
            storage_key,
            root_attribute: defaults.root_attribute,

            store_dir: std::env::var("SITE_LANG_STORE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_dir),
            origin: std::env::var("SITE_LANG_ORIGIN").unwrap_or(defaults.origin),
        })
    }
}
