//! Languages the site can be toggled between.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for every language, its display names
//!   and the class that tags its page elements
//! - `language`: Type-safe `Language` value validated against the registry
//!
//! # Example
//!
//! ```rust,ignore
//! use site_lang::i18n::{Language, LanguageRegistry};
//!
//! let fallback = Language::fallback();
//! let chinese = Language::from_code("cn")?;
//! let languages = LanguageRegistry::get().list_enabled();
//! ```

mod language;
mod registry;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
