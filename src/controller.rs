//! Language preference controller.
//!
//! Owns a preference store and a page. Selecting a language persists it
//! (best effort), mirrors it onto the root element and shows exactly the
//! elements tagged for it. Store failures never reach callers: writes
//! degrade to no-ops and reads to the default language.

use crate::config::Config;
use crate::i18n::Language;
use crate::page::{Display, Page};
use crate::storage::{PreferenceStore, StorageError};
use tracing::{debug, info, warn};

/// A page button wired to select a language on click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonBinding {
    pub id: String,
    pub language: Language,
}

/// Result of dispatching a click through the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Click {
    /// Language selected by the click, `None` if the element is not a language button
    pub language: Option<Language>,
    /// Always false: a language button that is also a link keeps navigating
    pub default_prevented: bool,
}

pub struct LanguageController<S, P> {
    store: S,
    page: P,
    storage_key: String,
    root_attribute: String,
    bindings: Vec<ButtonBinding>,
}

impl<S: PreferenceStore, P: Page> LanguageController<S, P> {
    pub fn new(store: S, page: P) -> Self {
        Self::with_config(store, page, &Config::default())
    }

    pub fn with_config(store: S, page: P, config: &Config) -> Self {
        Self {
            store,
            page,
            storage_key: config.storage_key.clone(),
            root_attribute: config.root_attribute.clone(),
            bindings: Vec::new(),
        }
    }

    /// Select `language`: persist it, then update the page.
    ///
    /// Persisting is best effort; the page is updated even when the store
    /// refuses the write. Calling this twice with the same language leaves the
    /// page in the same state.
    pub fn set_language(&mut self, language: Language) {
        if let Err(e) = self.try_persist(language) {
            warn!("Could not persist language '{}': {}", language, e);
        }
        self.apply(language);
    }

    /// The persisted language, or the default when nothing usable is stored.
    pub fn get_language(&self) -> Language {
        match self.try_get_language() {
            Ok(Some(language)) => language,
            Ok(None) => Language::fallback(),
            Err(e) => {
                warn!("Could not read language preference: {}", e);
                Language::fallback()
            }
        }
    }

    /// Write `language` to the store, reporting failure.
    pub fn try_persist(&mut self, language: Language) -> Result<(), StorageError> {
        self.store.write(&self.storage_key, language.code())
    }

    /// Read the stored language, reporting store failure.
    ///
    /// Missing and empty values read as `None`, as do codes that are not
    /// (or no longer) enabled in the registry.
    pub fn try_get_language(&self) -> Result<Option<Language>, StorageError> {
        let stored = match self.store.read(&self.storage_key)? {
            Some(value) if !value.is_empty() => value,
            _ => return Ok(None),
        };

        match Language::from_code(&stored) {
            Ok(language) => Ok(Some(language)),
            Err(e) => {
                warn!("Ignoring stored language preference: {}", e);
                Ok(None)
            }
        }
    }

    /// Apply the stored (or default) language and wire the language buttons
    /// present on the page. Call once, after the page structure is ready.
    pub fn initialize(&mut self) -> &[ButtonBinding] {
        let language = self.get_language();
        self.set_language(language);

        self.bindings = Language::all()
            .into_iter()
            .map(|language| ButtonBinding {
                id: language.config().button_id(),
                language,
            })
            .filter(|binding| self.page.contains_element(&binding.id))
            .collect();

        info!(
            "Language '{}' applied, {} language button(s) wired",
            language,
            self.bindings.len()
        );
        &self.bindings
    }

    /// Dispatch a click on the element with `id`.
    pub fn click(&mut self, id: &str) -> Click {
        let language = self
            .bindings
            .iter()
            .find(|binding| binding.id == id)
            .map(|binding| binding.language);

        if let Some(language) = language {
            debug!("Button '{}' selects '{}'", id, language);
            self.set_language(language);
        }

        Click {
            language,
            default_prevented: false,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    fn apply(&mut self, language: Language) {
        self.page
            .set_root_attribute(&self.root_attribute, language.code());

        for other in Language::all() {
            let display = Display::from_visible(other == language);
            self.page.set_class_display(other.tag_class(), display);
        }
    }
}
