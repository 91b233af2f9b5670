//! Browser binding: `localStorage`, the live DOM and the `CZAI_I18N` global.
//!
//! The page loads the wasm module and calls `initSiteLang()`. The
//! `window.CZAI_I18N = { setLang, getLang }` global is published right away;
//! applying the stored language and wiring `#btn-en` / `#btn-cn` waits for
//! `DOMContentLoaded` when the document is still loading.

use crate::config::Config;
use crate::controller::{ButtonBinding, LanguageController};
use crate::i18n::Language;
use crate::page::{Display, Page};
use crate::storage::{PreferenceStore, StorageError};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const GLOBAL_API: &str = "CZAI_I18N";

type DomController = LanguageController<LocalStorage, DomPage>;

thread_local! {
    static INSTALLED: Cell<bool> = Cell::new(false);
}

// ==================== Store ====================

/// `window.localStorage`. Every access re-resolves the storage object, since
/// browsers may refuse it at any time.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(js_unavailable)?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))
    }
}

fn js_unavailable(err: JsValue) -> StorageError {
    StorageError::Unavailable(format!("{:?}", err))
}

impl PreferenceStore for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?.get_item(key).map_err(js_unavailable)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?.set_item(key, value).map_err(js_unavailable)
    }
}

// ==================== Page ====================

/// The live document.
#[derive(Debug, Clone)]
pub struct DomPage {
    document: web_sys::Document,
}

impl DomPage {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }
}

impl Page for DomPage {
    fn set_root_attribute(&mut self, name: &str, value: &str) {
        let Some(root) = self.document.document_element() else {
            return;
        };
        if let Err(e) = root.set_attribute(name, value) {
            warn!("Could not set {} on the root element: {:?}", name, e);
        }
    }

    fn set_class_display(&mut self, class: &str, display: Display) {
        let nodes = match self.document.query_selector_all(&format!(".{}", class)) {
            Ok(nodes) => nodes,
            Err(e) => {
                warn!("Could not query .{}: {:?}", class, e);
                return;
            }
        };

        for i in 0..nodes.length() {
            let Some(element) = nodes
                .item(i)
                .and_then(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
            else {
                continue;
            };
            // An empty value removes the inline declaration
            if let Err(e) = element.style().set_property("display", display.as_css()) {
                debug!("Could not set display on .{} element: {:?}", class, e);
            }
        }
    }

    fn contains_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }
}

// ==================== Startup ====================

/// Entry point called by the hosting page once the module has loaded.
///
/// Later calls are no-ops.
#[wasm_bindgen(js_name = initSiteLang)]
pub fn init() -> Result<(), JsValue> {
    if INSTALLED.with(Cell::get) {
        debug!("Language toggle already started");
        return Ok(());
    }

    // Browser console output; fails only if a subscriber is already set
    let _ = tracing_wasm::try_set_as_global_default();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let controller = dom_controller(&document, &Config::default());
    let api = build_api(&controller)?;
    js_sys::Reflect::set(&window, &JsValue::from_str(GLOBAL_API), &api)?;
    INSTALLED.with(|flag| flag.set(true));

    if document.ready_state() != "loading" {
        return start(&controller, &document);
    }

    let ready_document = document.clone();
    let on_ready = Closure::once_into_js(move || {
        if let Err(e) = start(&controller, &ready_document) {
            warn!("Language toggle failed to start: {:?}", e);
        }
    });
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
}

fn dom_controller(document: &web_sys::Document, config: &Config) -> Rc<RefCell<DomController>> {
    Rc::new(RefCell::new(DomController::with_config(
        LocalStorage,
        DomPage::new(document.clone()),
        config,
    )))
}

/// Apply the stored language and wire the language buttons.
fn start(
    controller: &Rc<RefCell<DomController>>,
    document: &web_sys::Document,
) -> Result<(), JsValue> {
    let bindings = controller.borrow_mut().initialize().to_vec();
    wire_buttons(controller, document, &bindings)
}

fn wire_buttons(
    controller: &Rc<RefCell<DomController>>,
    document: &web_sys::Document,
    bindings: &[ButtonBinding],
) -> Result<(), JsValue> {
    for binding in bindings {
        let Some(button) = document.get_element_by_id(&binding.id) else {
            continue;
        };
        let controller = Rc::clone(controller);
        let id = binding.id.clone();
        // No preventDefault: a button that is also a link keeps navigating
        let handler = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
            controller.borrow_mut().click(&id);
        });
        button.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
        handler.forget();
    }
    Ok(())
}

/// Build the `{ setLang(code), getLang() }` object published as `CZAI_I18N`.
fn build_api(controller: &Rc<RefCell<DomController>>) -> Result<js_sys::Object, JsValue> {
    let api = js_sys::Object::new();

    let setter = Rc::clone(controller);
    let set_lang = Closure::<dyn FnMut(String)>::new(move |code: String| {
        match Language::from_code(&code) {
            Ok(language) => setter.borrow_mut().set_language(language),
            Err(e) => warn!("{}.setLang ignored: {}", GLOBAL_API, e),
        }
    });

    let getter = Rc::clone(controller);
    let get_lang = Closure::<dyn FnMut() -> String>::new(move || {
        getter.borrow().get_language().code().to_string()
    });

    js_sys::Reflect::set(&api, &JsValue::from_str("setLang"), set_lang.as_ref())?;
    js_sys::Reflect::set(&api, &JsValue::from_str("getLang"), get_lang.as_ref())?;
    set_lang.forget();
    get_lang.forget();

    Ok(api)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> web_sys::Document {
        web_sys::window().unwrap().document().unwrap()
    }

    /// Config with a per-test storage key, cleared before use.
    fn isolated_config(key: &str) -> Config {
        LocalStorage::storage().unwrap().remove_item(key).unwrap();
        Config {
            storage_key: key.to_string(),
            ..Config::default()
        }
    }

    fn append(tag: &str, id: &str, class: &str) -> web_sys::Element {
        let element = document().create_element(tag).unwrap();
        element.set_id(id);
        if !class.is_empty() {
            element.set_class_name(class);
        }
        document().body().unwrap().append_child(&element).unwrap();
        element
    }

    fn inline_display(element: &web_sys::Element) -> String {
        element
            .dyn_ref::<web_sys::HtmlElement>()
            .unwrap()
            .style()
            .get_property_value("display")
            .unwrap()
    }

    fn root_lang() -> Option<String> {
        document().document_element().unwrap().get_attribute("data-lang")
    }

    fn api_fn(api: &js_sys::Object, name: &str) -> js_sys::Function {
        js_sys::Reflect::get(api, &JsValue::from_str(name))
            .unwrap()
            .dyn_into()
            .unwrap()
    }

    #[wasm_bindgen_test]
    fn test_get_lang_defaults_to_english() {
        let config = isolated_config("site_lang_test_default");
        let api = build_api(&dom_controller(&document(), &config)).unwrap();

        let lang = api_fn(&api, "getLang").call0(&JsValue::NULL).unwrap();
        assert_eq!(lang.as_string().as_deref(), Some("en"));
    }

    #[wasm_bindgen_test]
    fn test_set_lang_toggles_tagged_elements() {
        let config = isolated_config("site_lang_test_toggle");
        let en = append("p", "toggle-en", "en");
        let cn = append("p", "toggle-cn", "cn");
        let api = build_api(&dom_controller(&document(), &config)).unwrap();

        api_fn(&api, "setLang")
            .call1(&JsValue::NULL, &JsValue::from_str("cn"))
            .unwrap();

        assert_eq!(inline_display(&en), "none");
        assert_eq!(inline_display(&cn), "");
        assert_eq!(root_lang().as_deref(), Some("cn"));
        let stored = LocalStorage.read("site_lang_test_toggle").unwrap();
        assert_eq!(stored.as_deref(), Some("cn"));

        api_fn(&api, "setLang")
            .call1(&JsValue::NULL, &JsValue::from_str("en"))
            .unwrap();
        assert_eq!(inline_display(&en), "");
        assert_eq!(inline_display(&cn), "none");

        en.remove();
        cn.remove();
    }

    #[wasm_bindgen_test]
    fn test_set_lang_ignores_unknown_code() {
        let config = isolated_config("site_lang_test_unknown");
        let api = build_api(&dom_controller(&document(), &config)).unwrap();

        api_fn(&api, "setLang")
            .call1(&JsValue::NULL, &JsValue::from_str("xx"))
            .unwrap();

        assert!(LocalStorage.read("site_lang_test_unknown").unwrap().is_none());
        assert_ne!(root_lang().as_deref(), Some("xx"));
    }

    #[wasm_bindgen_test]
    fn test_button_click_keeps_default_action() {
        let config = isolated_config("site_lang_test_click");
        let button = append("a", "btn-cn", "");
        button.set_attribute("href", "#site-lang-test").unwrap();
        let heading = append("h1", "click-en", "en");

        let controller = dom_controller(&document(), &config);
        start(&controller, &document()).unwrap();

        let init = web_sys::EventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        let event = web_sys::Event::new_with_event_init_dict("click", &init).unwrap();
        button.dispatch_event(&event).unwrap();

        assert!(!event.default_prevented());
        assert_eq!(root_lang().as_deref(), Some("cn"));
        assert_eq!(inline_display(&heading), "none");
        let stored = LocalStorage.read("site_lang_test_click").unwrap();
        assert_eq!(stored.as_deref(), Some("cn"));

        button.remove();
        heading.remove();
    }

    #[wasm_bindgen_test]
    fn test_init_publishes_global_once() {
        let window = web_sys::window().unwrap();
        let global = JsValue::from_str(GLOBAL_API);

        init().unwrap();
        let first = js_sys::Reflect::get(&window, &global).unwrap();
        assert!(first.is_object());

        init().unwrap();
        let second = js_sys::Reflect::get(&window, &global).unwrap();
        assert!(js_sys::Object::is(&first, &second));
    }

    #[wasm_bindgen_test]
    fn test_local_storage_round_trip() {
        isolated_config("site_lang_test_store");
        let mut store = LocalStorage;

        assert!(store.read("site_lang_test_store").unwrap().is_none());
        store.write("site_lang_test_store", "cn").unwrap();
        assert_eq!(
            store.read("site_lang_test_store").unwrap().as_deref(),
            Some("cn")
        );
    }
}
