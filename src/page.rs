//! The page surface the controller mutates.
//!
//! `Page` is the small slice of a document the language toggle needs: the
//! root element's attributes, the inline `display` of tagged elements and a
//! lookup of elements by id. `MemoryPage` is a flat element list used by the
//! tests and the CLI; the browser implementation lives in `web`.

use std::collections::HashMap;

/// Inline display state the toggle writes onto tagged elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    /// Inline style cleared, so the stylesheet decides
    Visible,
    /// `display: none`
    Hidden,
}

impl Display {
    pub fn from_visible(visible: bool) -> Self {
        if visible {
            Display::Visible
        } else {
            Display::Hidden
        }
    }

    /// Value written to `element.style.display`.
    pub fn as_css(&self) -> &'static str {
        match self {
            Display::Visible => "",
            Display::Hidden => "none",
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, Display::Visible)
    }
}

/// Document operations used by the language toggle.
pub trait Page {
    /// Set an attribute on the document's root element.
    fn set_root_attribute(&mut self, name: &str, value: &str);

    /// Set the inline display of every element carrying `class`.
    fn set_class_display(&mut self, class: &str, display: Display);

    /// Whether an element with this id exists.
    fn contains_element(&self, id: &str) -> bool;
}

/// One element of a `MemoryPage`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// Inline display, `None` until the toggle touches the element
    pub display: Option<Display>,
    /// Navigation target if the element is a link
    pub href: Option<String>,
}

impl Element {
    /// An element tagged with a single class.
    pub fn tagged(class: &str) -> Self {
        Self {
            classes: vec![class.to_string()],
            ..Default::default()
        }
    }

    /// A link with an id, like the language buttons on a landing page.
    pub fn link(id: &str, href: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            href: Some(href.to_string()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Whether the element renders, ignoring stylesheets.
    pub fn is_visible(&self) -> bool {
        self.display.map_or(true, |d| d.is_visible())
    }
}

/// In-memory document.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    root_attributes: HashMap<String, String>,
    elements: Vec<Element>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    pub fn root_attribute(&self, name: &str) -> Option<&str> {
        self.root_attributes.get(name).map(String::as_str)
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements
            .iter()
            .find(|el| el.id.as_deref() == Some(id))
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Elements carrying `class`, in document order.
    pub fn tagged(&self, class: &str) -> impl Iterator<Item = &Element> {
        let class = class.to_string();
        self.elements.iter().filter(move |el| el.has_class(&class))
    }
}

impl Page for MemoryPage {
    fn set_root_attribute(&mut self, name: &str, value: &str) {
        self.root_attributes
            .insert(name.to_string(), value.to_string());
    }

    fn set_class_display(&mut self, class: &str, display: Display) {
        for el in self.elements.iter_mut().filter(|el| el.has_class(class)) {
            el.display = Some(display);
        }
    }

    fn contains_element(&self, id: &str) -> bool {
        self.element(id).is_some()
    }
}
