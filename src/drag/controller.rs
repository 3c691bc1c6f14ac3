//! Drag-rearrange controller.

use super::pointer::{DragPhase, PointerInteraction, PointerKind, ZoneEvent};
use crate::dom::Dom;
use crate::ui::theme::DragClasses;

/// Moves `.draggable-item` elements into `.drop-zone` elements.
///
/// Holds at most one current item. Dropping appends the current item to the
/// zone that received the drop; no hit-testing happens for touch.
#[derive(Debug)]
pub struct DragController<D: Dom> {
    dom: D,
    classes: DragClasses,
    items: Vec<D::Node>,
    zones: Vec<D::Node>,
    current: Option<D::Node>,
    dragging: bool,
}

impl<D: Dom> DragController<D> {
    pub const fn new(dom: D, classes: DragClasses) -> Self {
        Self {
            dom,
            classes,
            items: Vec::new(),
            zones: Vec::new(),
            current: None,
            dragging: false,
        }
    }

    /// Collects the items and zones present in the document.
    ///
    /// Returns `(items, zones)` counts.
    pub fn bind(&mut self) -> (usize, usize) {
        self.items = self.dom.query_all(None, ".draggable-item");
        self.zones = self.dom.query_all(None, ".drop-zone");
        tracing::debug!(items = self.items.len(), zones = self.zones.len(), "drag targets bound");
        (self.items.len(), self.zones.len())
    }

    #[must_use]
    pub fn items(&self) -> &[D::Node] {
        &self.items
    }

    #[must_use]
    pub fn zones(&self) -> &[D::Node] {
        &self.zones
    }

    /// The item being dragged, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&D::Node> {
        self.current.as_ref()
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Handles a start or end on a draggable item.
    pub fn on_item(&mut self, item: &D::Node, interaction: PointerInteraction) {
        match interaction.phase {
            DragPhase::Start => {
                if let Some(previous) = self.current.take() {
                    if &previous != item {
                        tracing::debug!("abandoning previous drag");
                        self.dom.remove_classes(&previous, &self.classes.dragging);
                    }
                }
                self.dom.add_classes(item, &self.classes.dragging);
                self.current = Some(item.clone());
                self.dragging = true;
                tracing::debug!(kind = ?interaction.kind, "drag started");
            }
            DragPhase::End => {
                self.dom.remove_classes(item, &self.classes.dragging);
                self.current = None;
                self.dragging = false;
                tracing::debug!(kind = ?interaction.kind, "drag ended");
            }
        }
    }

    /// Handles hover and drop on a drop zone.
    pub fn on_zone(&mut self, zone: &D::Node, event: ZoneEvent) {
        match event {
            ZoneEvent::Over => self.dom.add_classes(zone, &self.classes.zone_hover),
            ZoneEvent::Leave => self.dom.remove_classes(zone, &self.classes.zone_hover),
            ZoneEvent::Drop(kind) => {
                if let Some(item) = &self.current {
                    self.dom.append_child(zone, item);
                    tracing::debug!(?kind, "item dropped");
                } else {
                    tracing::debug!(?kind, "drop with nothing dragged");
                }
                self.dom.remove_classes(zone, &self.classes.zone_hover);
                // Mouse drops end the gesture here; the item's own end event
                // releases it. Touch drops leave both to the item's touchend.
                if kind == PointerKind::Mouse {
                    self.dragging = false;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDom, NodeId};
    use crate::ui::Theme;

    fn setup() -> (MemoryDom, NodeId, NodeId, NodeId) {
        let dom = MemoryDom::new();
        let home = dom.append(dom.root(), "ul", &[("class", "drop-zone")]);
        let a = dom.append(home, "li", &[("class", "draggable-item")]);
        let b = dom.append(home, "li", &[("class", "draggable-item")]);
        (dom, home, a, b)
    }

    const START: PointerInteraction = PointerInteraction::new(PointerKind::Mouse, DragPhase::Start);
    const END: PointerInteraction = PointerInteraction::new(PointerKind::Mouse, DragPhase::End);

    #[test]
    fn start_marks_and_end_releases() {
        let (dom, _, a, _) = setup();
        let mut drag = DragController::new(&dom, Theme::default().drag);

        drag.on_item(&a, START);
        assert!(drag.is_dragging());
        assert_eq!(drag.current(), Some(&a));
        assert!(dom.has_class(&a, "opacity-50"));
        assert!(dom.has_class(&a, "scale-95"));

        drag.on_item(&a, END);
        assert!(!drag.is_dragging());
        assert_eq!(drag.current(), None);
        assert!(!dom.has_class(&a, "opacity-50"));
    }

    #[test]
    fn new_start_abandons_the_previous_item() {
        let (dom, _, a, b) = setup();
        let mut drag = DragController::new(&dom, Theme::default().drag);

        drag.on_item(&a, START);
        drag.on_item(&b, PointerInteraction::new(PointerKind::Touch, DragPhase::Start));

        assert_eq!(drag.current(), Some(&b));
        assert!(!dom.has_class(&a, "opacity-50"));
        assert!(dom.has_class(&b, "opacity-50"));
    }

    #[test]
    fn hover_affordance_follows_over_and_leave() {
        let (dom, zone, _, _) = setup();
        let mut drag = DragController::new(&dom, Theme::default().drag);

        drag.on_zone(&zone, ZoneEvent::Over);
        assert!(dom.has_class(&zone, "border-blue-400"));
        assert!(dom.has_class(&zone, "bg-blue-50"));

        drag.on_zone(&zone, ZoneEvent::Leave);
        assert!(!dom.has_class(&zone, "border-blue-400"));
    }

    #[test]
    fn drop_without_a_current_item_only_clears_hover() {
        let (dom, zone, a, b) = setup();
        let target = dom.append(dom.root(), "ul", &[("class", "drop-zone")]);
        let mut drag = DragController::new(&dom, Theme::default().drag);

        drag.on_zone(&target, ZoneEvent::Over);
        drag.on_zone(&target, ZoneEvent::Drop(PointerKind::Mouse));

        assert!(dom.children(target).is_empty());
        assert_eq!(dom.children(zone), vec![a, b]);
        assert!(!dom.has_class(&target, "bg-blue-50"));
    }

    #[test]
    fn mouse_drop_stops_dragging_but_keeps_the_item_until_end() {
        let (dom, _, a, _) = setup();
        let target = dom.append(dom.root(), "ul", &[("class", "drop-zone")]);
        let mut drag = DragController::new(&dom, Theme::default().drag);

        drag.on_item(&a, START);
        drag.on_zone(&target, ZoneEvent::Drop(PointerKind::Mouse));

        assert!(!drag.is_dragging());
        assert_eq!(drag.current(), Some(&a));
        assert_eq!(dom.children(target), vec![a]);
    }

    #[test]
    fn bind_counts_items_and_zones() {
        let (dom, _, _, _) = setup();
        dom.append(dom.root(), "div", &[("class", "drop-zone")]);
        let mut drag = DragController::new(&dom, Theme::default().drag);

        assert_eq!(drag.bind(), (2, 2));
    }
}
