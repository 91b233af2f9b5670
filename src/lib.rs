//! Persisted language toggle for bilingual (en/cn) static sites.
//!
//! The core is [`controller::LanguageController`], which is handed a
//! [`storage::PreferenceStore`] and a [`page::Page`]. Native hosts and tests
//! use the file or memory stores and [`page::MemoryPage`]; the `web` feature
//! binds the same controller to `localStorage` and the browser DOM.

pub mod cli;
pub mod config;
pub mod controller;
pub mod i18n;
pub mod page;
pub mod storage;

#[cfg(feature = "web")]
pub mod web;

pub use controller::{ButtonBinding, Click, LanguageController};
pub use i18n::Language;
