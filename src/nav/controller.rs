//! Navigation bar controller.
//!
//! Elements, all optional:
//!
//! - `#nav-toggle`: mobile menu button, its `aria-expanded` is the menu state
//! - `#nav-list`: link list, hidden while the mobile menu is closed
//! - `#mobile-menu`: mobile menu panel
//! - `.nav-link`: the links, in document order
//! - `section[id]`: scroll-spy targets
//! - `header`: sticky header, its height offsets scrolling

use super::keys::{cycle, NavKey};
use super::spy::{RootMargin, SectionVisibility};
use crate::dom::Dom;
use crate::ui::Theme;

/// Whether a page has any navigation worth wiring up.
pub fn has_navigation<D: Dom + ?Sized>(dom: &D) -> bool {
    ["#nav-toggle", ".nav-toggle", "#nav-list", ".nav-list"]
        .iter()
        .any(|selector| dom.query(None, selector).is_some())
}

#[derive(Debug)]
pub struct NavController<D: Dom> {
    dom: D,
    toggle: Option<D::Node>,
    nav_list: Option<D::Node>,
    mobile_menu: Option<D::Node>,
    links: Vec<D::Node>,
    sections: Vec<D::Node>,
    header_height: f64,
    header_offset: f64,
    hidden: String,
    active_classes: String,
    open_classes: String,
}

impl<D: Dom> NavController<D> {
    /// Resolves every navigation element and measures the header once.
    pub fn new(dom: D, theme: &Theme, header_offset: f64) -> Self {
        let header_height = dom
            .query(None, "header")
            .map_or(0.0, |header| dom.offset_height(&header));

        let controller = Self {
            toggle: dom.by_id("nav-toggle"),
            nav_list: dom.by_id("nav-list"),
            mobile_menu: dom.by_id("mobile-menu"),
            links: dom.query_all(None, ".nav-link"),
            sections: dom.query_all(None, "section[id]"),
            header_height,
            header_offset,
            hidden: theme.hidden.clone(),
            active_classes: theme.nav.active_link.clone(),
            open_classes: theme.nav.menu_open.clone(),
            dom,
        };

        tracing::debug!(
            links = controller.links.len(),
            sections = controller.sections.len(),
            header_height,
            has_toggle = controller.toggle.is_some(),
            "navigation initialized"
        );
        controller
    }

    #[must_use]
    pub const fn toggle(&self) -> Option<&D::Node> {
        self.toggle.as_ref()
    }

    #[must_use]
    pub fn links(&self) -> &[D::Node] {
        &self.links
    }

    #[must_use]
    pub fn sections(&self) -> &[D::Node] {
        &self.sections
    }

    /// Scroll-spy margin for the measured header.
    #[must_use]
    pub fn root_margin(&self) -> RootMargin {
        RootMargin::for_header(self.header_height, self.header_offset)
    }

    /// Handles a click on a `.nav-link`.
    ///
    /// Only in-page anchors whose target exists are handled: the window
    /// smooth-scrolls to the target minus the header, the link becomes active
    /// and an open mobile menu closes. Returns whether the click was handled.
    pub fn on_link_click(&mut self, link: &D::Node) -> bool {
        let Some(href) = self.dom.attribute(link, "href") else {
            return false;
        };
        let Some(id) = href.strip_prefix('#') else {
            tracing::debug!(href = %href, "external link, ignoring");
            return false;
        };
        let Some(target) = self.dom.by_id(id) else {
            tracing::debug!(id, "anchor target missing");
            return false;
        };

        let top = self.dom.rect_top(&target) + self.dom.scroll_y()
            - self.header_height
            - self.header_offset;
        tracing::debug!(id, top, "scrolling to section");
        self.dom.scroll_to(top);

        self.set_active_link(Some(link));

        if self.is_menu_open() {
            self.set_menu_open(false);
        }
        true
    }

    /// Makes `active` the only highlighted link; `None` clears all.
    pub fn set_active_link(&mut self, active: Option<&D::Node>) {
        for link in &self.links {
            self.dom.remove_classes(link, &self.active_classes);
            self.dom.remove_attribute(link, "aria-current");
        }
        if let Some(link) = active {
            self.dom.add_classes(link, &self.active_classes);
            self.dom.set_attribute(link, "aria-current", "page");
        }
    }

    /// Menu state as recorded on the toggle.
    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.toggle
            .as_ref()
            .and_then(|t| self.dom.attribute(t, "aria-expanded"))
            .is_some_and(|v| v == "true")
    }

    /// Flips the mobile menu.
    pub fn on_toggle(&mut self) {
        let open = !self.is_menu_open();
        self.set_menu_open(open);
    }

    /// Opens or closes the mobile menu. Opening focuses the first link.
    pub fn set_menu_open(&mut self, open: bool) {
        tracing::debug!(open, "mobile menu");

        if let Some(menu) = &self.mobile_menu {
            if open {
                self.dom.remove_classes(menu, &self.hidden);
            } else {
                self.dom.add_classes(menu, &self.hidden);
            }
            self.dom
                .set_attribute(menu, "aria-hidden", if open { "false" } else { "true" });
        }

        if let Some(list) = &self.nav_list {
            if open {
                self.dom.remove_classes(list, &self.hidden);
                self.dom.add_classes(list, &self.open_classes);
            } else {
                self.dom.add_classes(list, &self.hidden);
                self.dom.remove_classes(list, &self.open_classes);
            }
        }

        if let Some(toggle) = &self.toggle {
            self.dom
                .set_attribute(toggle, "aria-expanded", if open { "true" } else { "false" });
        }

        if open {
            if let Some(first) = self.links.first() {
                self.dom.focus(first);
            }
        }
    }

    /// Arrow-key traversal while a link has focus. Returns whether the key
    /// was consumed.
    pub fn on_link_keydown(&mut self, key: &str) -> bool {
        let Some(offset) = NavKey::from_key(key).and_then(NavKey::offset) else {
            return false;
        };

        let current = self
            .dom
            .active_element()
            .and_then(|focused| self.links.iter().position(|l| *l == focused));

        if let Some(next) = cycle(current, offset, self.links.len()) {
            self.dom.focus(&self.links[next]);
        }
        true
    }

    /// Document-level keys. Escape closes an open menu and returns focus to the
    /// toggle. Returns whether the key was consumed.
    pub fn on_document_keydown(&mut self, key: &str) -> bool {
        if NavKey::from_key(key) != Some(NavKey::Escape) || !self.is_menu_open() {
            return false;
        }

        self.set_menu_open(false);
        if let Some(toggle) = &self.toggle {
            self.dom.focus(toggle);
        }
        true
    }

    /// Applies one batch of intersection changes. Each intersecting section
    /// activates its link in turn, so the last one wins.
    pub fn on_visibility_changes(&mut self, batch: &[SectionVisibility]) {
        for entry in batch.iter().filter(|e| e.is_intersecting) {
            let selector = format!(".nav-link[href=\"#{}\"]", entry.id);
            if let Some(link) = self.dom.query(None, &selector) {
                tracing::debug!(section = %entry.id, "section in view");
                self.set_active_link(Some(&link));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDom, NodeId};

    struct Page {
        dom: MemoryDom,
        toggle: NodeId,
        list: NodeId,
        menu: NodeId,
        links: Vec<NodeId>,
    }

    fn page() -> Page {
        let dom = MemoryDom::new();
        let header = dom.append(dom.root(), "header", &[]);
        dom.set_geometry(header, 0.0, 64.0);
        let toggle = dom.append(
            header,
            "button",
            &[("id", "nav-toggle"), ("aria-expanded", "false")],
        );
        let list = dom.append(header, "ul", &[("id", "nav-list"), ("class", "hidden")]);
        let menu = dom.append(dom.root(), "div", &[("id", "mobile-menu"), ("class", "hidden")]);
        let links = ["#intro", "#about", "https://example.com"]
            .iter()
            .map(|href| {
                let item = dom.append(list, "li", &[]);
                dom.append(item, "a", &[("class", "nav-link"), ("href", href)])
            })
            .collect();
        let intro = dom.append(dom.root(), "section", &[("id", "intro")]);
        dom.set_geometry(intro, 300.0, 500.0);
        let about = dom.append(dom.root(), "section", &[("id", "about")]);
        dom.set_geometry(about, 900.0, 500.0);

        Page { dom, toggle, list, menu, links }
    }

    #[test]
    fn new_measures_the_header() {
        let page = page();
        let nav = NavController::new(&page.dom, &Theme::default(), 8.0);

        assert_eq!(nav.links().len(), 3);
        assert_eq!(nav.sections().len(), 2);
        assert_eq!(nav.root_margin().to_css(), "-72px 0px -40% 0px");
    }

    #[test]
    fn anchor_click_scrolls_below_the_header() {
        let page = page();
        page.dom.set_scroll_y(100.0);
        let mut nav = NavController::new(&page.dom, &Theme::default(), 8.0);

        assert!(nav.on_link_click(&page.links[1]));
        assert_eq!(page.dom.scroll_log(), vec![900.0 + 100.0 - 64.0 - 8.0]);
        assert!(page.dom.has_class(&page.links[1], "bg-blue-600"));
        assert_eq!(
            page.dom.attribute(&page.links[1], "aria-current").as_deref(),
            Some("page")
        );
    }

    #[test]
    fn external_and_dangling_links_are_ignored() {
        let page = page();
        let dangling = page
            .dom
            .append(page.list, "a", &[("class", "nav-link"), ("href", "#missing")]);
        let mut nav = NavController::new(&page.dom, &Theme::default(), 8.0);

        assert!(!nav.on_link_click(&page.links[2]));
        assert!(!nav.on_link_click(&dangling));
        assert!(page.dom.scroll_log().is_empty());
    }

    #[test]
    fn only_one_link_is_active() {
        let page = page();
        let mut nav = NavController::new(&page.dom, &Theme::default(), 8.0);

        nav.set_active_link(Some(&page.links[0]));
        nav.set_active_link(Some(&page.links[1]));
        assert!(!page.dom.has_class(&page.links[0], "bg-blue-600"));
        assert_eq!(page.dom.attribute(&page.links[0], "aria-current"), None);

        nav.set_active_link(None);
        assert!(!page.dom.has_class(&page.links[1], "text-white"));
    }

    #[test]
    fn toggle_opens_and_closes_the_menu() {
        let page = page();
        let mut nav = NavController::new(&page.dom, &Theme::default(), 8.0);

        nav.on_toggle();
        assert!(nav.is_menu_open());
        assert!(!page.dom.has_class(&page.menu, "hidden"));
        assert_eq!(page.dom.attribute(&page.menu, "aria-hidden").as_deref(), Some("false"));
        assert!(!page.dom.has_class(&page.list, "hidden"));
        assert!(page.dom.has_class(&page.list, "flex-col"));
        assert_eq!(page.dom.active_element(), Some(page.links[0]));

        nav.on_toggle();
        assert!(!nav.is_menu_open());
        assert!(page.dom.has_class(&page.menu, "hidden"));
        assert!(page.dom.has_class(&page.list, "hidden"));
        assert!(!page.dom.has_class(&page.list, "flex-col"));
    }

    #[test]
    fn clicking_a_link_closes_an_open_menu() {
        let page = page();
        let mut nav = NavController::new(&page.dom, &Theme::default(), 8.0);

        nav.set_menu_open(true);
        nav.on_link_click(&page.links[0]);
        assert!(!nav.is_menu_open());
    }

    #[test]
    fn arrows_cycle_focus_through_links() {
        let page = page();
        let mut nav = NavController::new(&page.dom, &Theme::default(), 8.0);

        page.dom.focus(&page.links[2]);
        assert!(nav.on_link_keydown("ArrowRight"));
        assert_eq!(page.dom.active_element(), Some(page.links[0]));

        assert!(nav.on_link_keydown("ArrowUp"));
        assert_eq!(page.dom.active_element(), Some(page.links[2]));

        assert!(!nav.on_link_keydown("Enter"));
        assert_eq!(page.dom.active_element(), Some(page.links[2]));
    }

    #[test]
    fn escape_closes_an_open_menu_and_refocuses_the_toggle() {
        let page = page();
        let mut nav = NavController::new(&page.dom, &Theme::default(), 8.0);

        assert!(!nav.on_document_keydown("Escape"));

        nav.set_menu_open(true);
        assert!(nav.on_document_keydown("Escape"));
        assert!(!nav.is_menu_open());
        assert_eq!(page.dom.active_element(), Some(page.toggle));
    }

    #[test]
    fn visibility_batch_activates_the_last_intersecting_section() {
        let page = page();
        let mut nav = NavController::new(&page.dom, &Theme::default(), 8.0);

        nav.on_visibility_changes(&[
            SectionVisibility { id: "intro".to_string(), is_intersecting: true },
            SectionVisibility { id: "about".to_string(), is_intersecting: true },
        ]);
        assert!(page.dom.has_class(&page.links[1], "bg-blue-600"));
        assert!(!page.dom.has_class(&page.links[0], "bg-blue-600"));

        nav.on_visibility_changes(&[SectionVisibility {
            id: "about".to_string(),
            is_intersecting: false,
        }]);
        assert!(page.dom.has_class(&page.links[1], "bg-blue-600"));
    }

    #[test]
    fn navigation_gate() {
        let empty = MemoryDom::new();
        assert!(!has_navigation(&empty));

        let page = page();
        assert!(has_navigation(&page.dom));
    }
}
