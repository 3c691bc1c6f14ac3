//! [`Dom`] over the live document.

use crate::dom::Dom;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

#[derive(Debug, Clone)]
pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    pub const fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    pub const fn window(&self) -> &Window {
        &self.window
    }

    pub const fn document(&self) -> &Document {
        &self.document
    }
}

impl Dom for WebDom {
    type Node = Element;

    fn query(&self, scope: Option<&Element>, selector: &str) -> Option<Element> {
        let found = match scope {
            Some(scope) => scope.query_selector(selector),
            None => self.document.query_selector(selector),
        };
        found.unwrap_or_else(|e| {
            tracing::warn!(selector, error = %super::js_error_message(&e), "invalid selector");
            None
        })
    }

    fn query_all(&self, scope: Option<&Element>, selector: &str) -> Vec<Element> {
        let found = match scope {
            Some(scope) => scope.query_selector_all(selector),
            None => self.document.query_selector_all(selector),
        };
        let Ok(list) = found else {
            tracing::warn!(selector, "invalid selector");
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        if let Err(e) = node.set_attribute(name, value) {
            tracing::debug!(name, error = %super::js_error_message(&e), "set_attribute failed");
        }
    }

    fn remove_attribute(&self, node: &Element, name: &str) {
        let _ = node.remove_attribute(name);
    }

    fn add_classes(&self, node: &Element, classes: &str) {
        let list = node.class_list();
        for class in classes.split_whitespace() {
            let _ = list.add_1(class);
        }
    }

    fn remove_classes(&self, node: &Element, classes: &str) {
        let list = node.class_list();
        for class in classes.split_whitespace() {
            let _ = list.remove_1(class);
        }
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_inner_html(&self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        if let Err(e) = parent.append_child(child) {
            tracing::warn!(error = %super::js_error_message(&e), "append_child failed");
        }
    }

    fn focus(&self, node: &Element) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            let _ = element.focus();
        }
    }

    fn active_element(&self) -> Option<Element> {
        self.document.active_element()
    }

    fn rect_top(&self, node: &Element) -> f64 {
        node.get_bounding_client_rect().top()
    }

    fn offset_height(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map_or(0.0, |element| f64::from(element.offset_height()))
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}
