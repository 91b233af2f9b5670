//! Integration tests for the site language toggle
//!
//! These tests drive the controller the way a page does: load with some
//! stored preference, click the language buttons, reload.

#![cfg(not(target_arch = "wasm32"))]

use site_lang::config::Config;
use site_lang::page::{Element, MemoryPage};
use site_lang::storage::{FileStore, MemoryStore, PreferenceStore};
use site_lang::{Language, LanguageController};
use std::fs;
use tempfile::TempDir;

// ==================== Test Helpers ====================

/// A landing page with tagged headings, paragraphs and both language links
fn landing_page() -> MemoryPage {
    MemoryPage::new()
        .with_element(Element::link("btn-en", "/index.html"))
        .with_element(Element::link("btn-cn", "/index.html"))
        .with_element(Element::tagged("en").with_id("heading-en"))
        .with_element(Element::tagged("cn").with_id("heading-cn"))
        .with_element(Element::tagged("en").with_class("lead"))
        .with_element(Element::tagged("cn").with_class("lead"))
        .with_element(Element::default().with_id("nav"))
}

fn visible(page: &MemoryPage, class: &str) -> Vec<bool> {
    page.tagged(class).map(Element::is_visible).collect()
}

fn assert_language(page: &MemoryPage, language: Language) {
    let show_en = language == Language::ENGLISH;
    assert_eq!(page.root_attribute("data-lang"), Some(language.code()));
    assert_eq!(visible(page, "en"), vec![show_en; 2]);
    assert_eq!(visible(page, "cn"), vec![!show_en; 2]);
}

// ==================== Page Load Scenarios ====================

#[test]
fn test_first_visit_shows_english() {
    let mut controller = LanguageController::new(MemoryStore::new(), landing_page());
    let bindings = controller.initialize();

    assert_eq!(bindings.len(), 2);
    assert_language(controller.page(), Language::ENGLISH);
    assert!(controller.page().element("nav").unwrap().is_visible());
}

#[test]
fn test_returning_visitor_sees_chinese() {
    let store = MemoryStore::new().with_entry("czai_lang", "cn");
    let mut controller = LanguageController::new(store, landing_page());
    controller.initialize();

    assert_language(controller.page(), Language::CHINESE);
}

#[test]
fn test_blocked_storage_shows_english_and_toggles() {
    let mut controller = LanguageController::new(MemoryStore::unavailable(), landing_page());
    controller.initialize();
    assert_language(controller.page(), Language::ENGLISH);

    controller.click("btn-cn");
    assert_language(controller.page(), Language::CHINESE);
    // Nothing persisted, so reads keep returning the default
    assert_eq!(controller.get_language(), Language::ENGLISH);
}

// ==================== Click Scenarios ====================

#[test]
fn test_click_chinese_button_keeps_navigation() {
    let mut controller = LanguageController::new(MemoryStore::new(), landing_page());
    controller.initialize();

    let click = controller.click("btn-cn");

    assert_eq!(click.language, Some(Language::CHINESE));
    assert!(!click.default_prevented);
    assert_eq!(
        controller.page().element("btn-cn").unwrap().href.as_deref(),
        Some("/index.html")
    );
    assert_eq!(controller.store().peek("czai_lang"), Some("cn"));
    assert_language(controller.page(), Language::CHINESE);
}

#[test]
fn test_page_without_buttons() {
    let page = MemoryPage::new()
        .with_element(Element::tagged("en"))
        .with_element(Element::tagged("cn"));
    let mut controller = LanguageController::new(MemoryStore::new(), page);

    assert!(controller.initialize().is_empty());
    assert!(controller.click("btn-en").language.is_none());
}

// ==================== Persistence Across Reloads ====================

#[test]
fn test_preference_survives_reload() {
    let temp_dir = TempDir::new().expect("temp dir");
    let config = Config {
        store_dir: temp_dir.path().to_path_buf(),
        origin: "https://czai.example".to_string(),
        ..Config::default()
    };

    let store = FileStore::new(&config.store_dir, &config.origin);
    let mut first = LanguageController::with_config(store, landing_page(), &config);
    first.initialize();
    first.click("btn-cn");

    // New store instance, new page: a fresh page load
    let store = FileStore::new(&config.store_dir, &config.origin);
    let mut second = LanguageController::with_config(store, landing_page(), &config);
    second.initialize();

    assert_language(second.page(), Language::CHINESE);
}

#[test]
fn test_corrupt_store_file_falls_back() {
    let temp_dir = TempDir::new().expect("temp dir");
    let store = FileStore::new(temp_dir.path(), "localhost");
    fs::write(store.path(), "[1, 2").expect("write corrupt file");

    let mut controller = LanguageController::new(store, landing_page());
    assert!(controller.try_get_language().is_err());

    controller.initialize();
    assert_language(controller.page(), Language::ENGLISH);
}

#[test]
fn test_cli_and_page_share_store() {
    let temp_dir = TempDir::new().expect("temp dir");

    let output = site_lang::cli::Command::parse(&["set", "cn"])
        .unwrap()
        .run(FileStore::new(temp_dir.path(), "localhost"), &Config::default())
        .unwrap();
    assert!(output.contains("cn"));

    let store = FileStore::new(temp_dir.path(), "localhost");
    assert_eq!(store.read("czai_lang").unwrap().as_deref(), Some("cn"));

    let mut controller = LanguageController::new(store, landing_page());
    controller.initialize();
    assert_language(controller.page(), Language::CHINESE);
}
