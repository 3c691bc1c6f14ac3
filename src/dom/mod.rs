//! Document port.
//!
//! Controllers never touch `web_sys` directly. Every element lookup and mutation
//! they need goes through [`Dom`], which the browser shim implements over the live
//! document and [`MemoryDom`] implements over an in-memory tree.
//!
//! Lookups return `Option`/`Vec`: a missing element is never an error, the
//! behaviour that needed it just does nothing.
//!
//! # Modules
//!
//! - `memory`: [`MemoryDom`], an arena-backed tree for native hosts and tests
//! - `selector`: the small CSS selector subset both implementations accept

pub mod memory;
pub mod selector;

pub use memory::{MemoryDom, NodeId};
pub use selector::Selector;

use std::fmt::Debug;

/// Operations the controllers perform on a document.
///
/// Class arguments are whitespace-separated lists, mirroring
/// `classList.add("a", "b")` with a single string. An empty list is a no-op.
pub trait Dom {
    /// Element handle. Cheap to clone and comparable by identity.
    type Node: Clone + PartialEq + Debug;

    /// First element matching `selector` in document order, searched below
    /// `scope` when given and across the whole document otherwise.
    fn query(&self, scope: Option<&Self::Node>, selector: &str) -> Option<Self::Node>;

    /// Every element matching `selector` in document order.
    fn query_all(&self, scope: Option<&Self::Node>, selector: &str) -> Vec<Self::Node>;

    /// `document.getElementById`.
    fn by_id(&self, id: &str) -> Option<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn remove_attribute(&self, node: &Self::Node, name: &str);

    fn add_classes(&self, node: &Self::Node, classes: &str);
    fn remove_classes(&self, node: &Self::Node, classes: &str);
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    /// Replaces the children of `node` with parsed markup.
    fn set_inner_html(&self, node: &Self::Node, html: &str);
    fn set_text(&self, node: &Self::Node, text: &str);

    /// Moves `child` to the end of `parent`, detaching it from its old parent.
    fn append_child(&self, parent: &Self::Node, child: &Self::Node);

    fn focus(&self, node: &Self::Node);
    fn active_element(&self) -> Option<Self::Node>;

    /// Top edge of the element's bounding box, relative to the viewport.
    fn rect_top(&self, node: &Self::Node) -> f64;
    /// Rendered height (`offsetHeight`).
    fn offset_height(&self, node: &Self::Node) -> f64;
    /// Current vertical scroll offset of the window.
    fn scroll_y(&self) -> f64;
    /// Smooth-scrolls the window to an absolute vertical offset.
    fn scroll_to(&self, top: f64);
}

impl<T: Dom + ?Sized> Dom for &T {
    type Node = T::Node;

    fn query(&self, scope: Option<&Self::Node>, selector: &str) -> Option<Self::Node> {
        (**self).query(scope, selector)
    }

    fn query_all(&self, scope: Option<&Self::Node>, selector: &str) -> Vec<Self::Node> {
        (**self).query_all(scope, selector)
    }

    fn by_id(&self, id: &str) -> Option<Self::Node> {
        (**self).by_id(id)
    }

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String> {
        (**self).attribute(node, name)
    }

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) {
        (**self).set_attribute(node, name, value);
    }

    fn remove_attribute(&self, node: &Self::Node, name: &str) {
        (**self).remove_attribute(node, name);
    }

    fn add_classes(&self, node: &Self::Node, classes: &str) {
        (**self).add_classes(node, classes);
    }

    fn remove_classes(&self, node: &Self::Node, classes: &str) {
        (**self).remove_classes(node, classes);
    }

    fn has_class(&self, node: &Self::Node, class: &str) -> bool {
        (**self).has_class(node, class)
    }

    fn set_inner_html(&self, node: &Self::Node, html: &str) {
        (**self).set_inner_html(node, html);
    }

    fn set_text(&self, node: &Self::Node, text: &str) {
        (**self).set_text(node, text);
    }

    fn append_child(&self, parent: &Self::Node, child: &Self::Node) {
        (**self).append_child(parent, child);
    }

    fn focus(&self, node: &Self::Node) {
        (**self).focus(node);
    }

    fn active_element(&self) -> Option<Self::Node> {
        (**self).active_element()
    }

    fn rect_top(&self, node: &Self::Node) -> f64 {
        (**self).rect_top(node)
    }

    fn offset_height(&self, node: &Self::Node) -> f64 {
        (**self).offset_height(node)
    }

    fn scroll_y(&self) -> f64 {
        (**self).scroll_y()
    }

    fn scroll_to(&self, top: f64) {
        (**self).scroll_to(top);
    }
}
