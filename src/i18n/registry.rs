//! Language registry: Single source of truth for all languages the site toggles between.
//!
//! Each entry ties a language code (the value persisted in the preference
//! store) to the CSS class that tags page elements written in that language.
//! The registry is a lazily initialised `OnceLock` singleton.

use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Code persisted in the preference store and written to `data-lang` (e.g., "en", "cn")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "Chinese")
    pub name: &'static str,

    /// Native name of the language (e.g., "English", "中文")
    pub native_name: &'static str,

    /// Class carried by page elements that should only show in this language
    pub tag_class: &'static str,

    /// Whether this is the fallback language (exactly one should be true)
    pub is_default: bool,

    /// Whether this language is offered on the page
    pub enabled: bool,
}

impl LanguageConfig {
    /// Id of the page button that switches to this language (e.g., "btn-cn").
    pub fn button_id(&self) -> String {
        format!("btn-{}", self.code)
    }
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the language is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all enabled languages, in registry order.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get the default language configuration.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one default language
    /// (this indicates a configuration error).
    pub fn default_language(&self) -> &LanguageConfig {
        let defaults: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default language found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default languages found in registry"),
        }
    }
}

/// Default language configurations: English (default) and Chinese.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            tag_class: "en",
            is_default: true,
            enabled: true,
        },
        LanguageConfig {
            code: "cn",
            name: "Chinese",
            native_name: "中文",
            tag_class: "cn",
            is_default: false,
            enabled: true,
        },
    ]
}
