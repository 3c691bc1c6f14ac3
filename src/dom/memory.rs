//! In-memory document.
//!
//! An arena of element nodes with just enough behaviour for the controllers:
//! attributes, class lists, parent/child links, focus, geometry and scrolling.
//! `set_inner_html` stores the markup verbatim rather than parsing it; callers
//! inspect it with [`MemoryDom::inner_html`].

use super::selector::{ElementView, Selector};
use super::Dom;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// Handle to a node in a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct NodeData {
    tag: String,
    attrs: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    markup: String,
    text: String,
    top: f64,
    height: f64,
}

impl ElementView for NodeData {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }
}

/// Arena-backed [`Dom`] implementation.
///
/// # Examples
///
/// ```
/// use blogfront::dom::{Dom, MemoryDom};
///
/// let dom = MemoryDom::new();
/// let toggle = dom.append(dom.root(), "button", &[("id", "nav-toggle")]);
///
/// dom.add_classes(&toggle, "open wide");
/// assert_eq!(dom.by_id("nav-toggle"), Some(toggle));
/// assert!(dom.has_class(&toggle, "wide"));
/// ```
#[derive(Debug)]
pub struct MemoryDom {
    nodes: RefCell<Vec<NodeData>>,
    focused: Cell<Option<NodeId>>,
    scroll_y: Cell<f64>,
    scrolls: RefCell<Vec<f64>>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Creates a document holding only a `body` root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: RefCell::new(vec![NodeData {
                tag: "body".to_string(),
                ..NodeData::default()
            }]),
            focused: Cell::new(None),
            scroll_y: Cell::new(0.0),
            scrolls: RefCell::new(Vec::new()),
        }
    }

    /// The `body` root.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Creates a detached element.
    pub fn create(&self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(NodeData {
            tag: tag.to_ascii_lowercase(),
            attrs: attrs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            ..NodeData::default()
        });
        NodeId(nodes.len() - 1)
    }

    /// Creates an element and appends it to `parent`.
    pub fn append(&self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = self.create(tag, attrs);
        self.append_child(&parent, &id);
        id
    }

    /// Sets the layout box reported by `rect_top` and `offset_height`.
    pub fn set_geometry(&self, node: NodeId, top: f64, height: f64) {
        if let Some(data) = self.nodes.borrow_mut().get_mut(node.0) {
            data.top = top;
            data.height = height;
        }
    }

    pub fn set_scroll_y(&self, y: f64) {
        self.scroll_y.set(y);
    }

    /// Every target passed to `scroll_to`, oldest first.
    #[must_use]
    pub fn scroll_log(&self) -> Vec<f64> {
        self.scrolls.borrow().clone()
    }

    /// Markup last written with `set_inner_html`.
    #[must_use]
    pub fn inner_html(&self, node: NodeId) -> String {
        self.with_node(node, |n| n.markup.clone()).unwrap_or_default()
    }

    /// Text last written with `set_text`.
    #[must_use]
    pub fn text(&self, node: NodeId) -> String {
        self.with_node(node, |n| n.text.clone()).unwrap_or_default()
    }

    /// Element children in order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.with_node(node, |n| n.children.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.with_node(node, |n| n.parent).flatten()
    }

    /// The `class` attribute split into tokens.
    #[must_use]
    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.with_node(node, |n| {
            n.attr("class")
                .map(|list| list.split_whitespace().map(String::from).collect())
                .unwrap_or_default()
        })
        .unwrap_or_default()
    }

    fn with_node<R>(&self, node: NodeId, f: impl FnOnce(&NodeData) -> R) -> Option<R> {
        self.nodes.borrow().get(node.0).map(f)
    }

    fn edit_classes(&self, node: NodeId, edit: impl FnOnce(&mut Vec<String>)) {
        let mut nodes = self.nodes.borrow_mut();
        let Some(data) = nodes.get_mut(node.0) else {
            return;
        };
        let mut list: Vec<String> = data
            .attr("class")
            .map(|l| l.split_whitespace().map(String::from).collect())
            .unwrap_or_default();
        edit(&mut list);
        data.attrs.insert("class".to_string(), list.join(" "));
    }

    fn descendants(nodes: &[NodeData], from: NodeId, out: &mut Vec<NodeId>) {
        let Some(node) = nodes.get(from.0) else {
            return;
        };
        for &child in &node.children {
            out.push(child);
            Self::descendants(nodes, child, out);
        }
    }

    fn matching(&self, scope: Option<&NodeId>, selector: &str) -> Vec<NodeId> {
        let Some(selector) = Selector::parse(selector) else {
            tracing::debug!(selector, "unsupported selector");
            return Vec::new();
        };

        let nodes = self.nodes.borrow();
        let mut candidates = Vec::new();
        Self::descendants(&nodes, scope.copied().unwrap_or(self.root()), &mut candidates);

        candidates
            .into_iter()
            .filter(|id| {
                let mut ancestors = Vec::new();
                let mut cursor = nodes[id.0].parent;
                while let Some(p) = cursor {
                    ancestors.push(&nodes[p.0]);
                    cursor = nodes[p.0].parent;
                }
                selector.matches(&nodes[id.0], &ancestors)
            })
            .collect()
    }

    fn is_ancestor_or_self(nodes: &[NodeData], candidate: NodeId, of: NodeId) -> bool {
        let mut cursor = Some(of);
        while let Some(id) = cursor {
            if id == candidate {
                return true;
            }
            cursor = nodes[id.0].parent;
        }
        false
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn query(&self, scope: Option<&NodeId>, selector: &str) -> Option<NodeId> {
        self.matching(scope, selector).into_iter().next()
    }

    fn query_all(&self, scope: Option<&NodeId>, selector: &str) -> Vec<NodeId> {
        self.matching(scope, selector)
    }

    fn by_id(&self, id: &str) -> Option<NodeId> {
        let nodes = self.nodes.borrow();
        let mut all = Vec::new();
        Self::descendants(&nodes, self.root(), &mut all);
        all.into_iter().find(|n| nodes[n.0].attr("id") == Some(id))
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.with_node(*node, |n| n.attr(name).map(String::from)).flatten()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        if let Some(data) = self.nodes.borrow_mut().get_mut(node.0) {
            data.attrs.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&self, node: &NodeId, name: &str) {
        if let Some(data) = self.nodes.borrow_mut().get_mut(node.0) {
            data.attrs.remove(name);
        }
    }

    fn add_classes(&self, node: &NodeId, classes: &str) {
        if classes.trim().is_empty() {
            return;
        }
        self.edit_classes(*node, |list| {
            for class in classes.split_whitespace() {
                if !list.iter().any(|c| c == class) {
                    list.push(class.to_string());
                }
            }
        });
    }

    fn remove_classes(&self, node: &NodeId, classes: &str) {
        if classes.trim().is_empty() {
            return;
        }
        self.edit_classes(*node, |list| {
            list.retain(|c| !classes.split_whitespace().any(|r| r == c));
        });
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.with_node(*node, |n| n.has_class(class)).unwrap_or(false)
    }

    fn set_inner_html(&self, node: &NodeId, html: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let Some(children) = nodes.get_mut(node.0).map(|n| std::mem::take(&mut n.children)) else {
            return;
        };
        for child in children {
            nodes[child.0].parent = None;
        }
        nodes[node.0].markup = html.to_string();
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        if let Some(data) = self.nodes.borrow_mut().get_mut(node.0) {
            data.text = text.to_string();
        }
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        if parent.0 >= nodes.len() || child.0 >= nodes.len() {
            return;
        }
        if Self::is_ancestor_or_self(&nodes, *child, *parent) {
            tracing::debug!(?parent, ?child, "refusing to append a node into itself");
            return;
        }

        if let Some(old) = nodes[child.0].parent.take() {
            nodes[old.0].children.retain(|c| c != child);
        }
        nodes[parent.0].children.push(*child);
        nodes[child.0].parent = Some(*parent);
    }

    fn focus(&self, node: &NodeId) {
        self.focused.set(Some(*node));
    }

    fn active_element(&self) -> Option<NodeId> {
        self.focused.get()
    }

    fn rect_top(&self, node: &NodeId) -> f64 {
        self.with_node(*node, |n| n.top).unwrap_or(0.0)
    }

    fn offset_height(&self, node: &NodeId) -> f64 {
        self.with_node(*node, |n| n.height).unwrap_or(0.0)
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn scroll_to(&self, top: f64) {
        self.scrolls.borrow_mut().push(top);
        self.scroll_y.set(top);
    }
}
