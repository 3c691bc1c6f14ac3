//! Pointer events unified across mouse and touch.
//!
//! The page reacts identically to `dragstart`/`touchstart` and to
//! `dragend`/`touchend`; only the input kind differs. Zones receive hover
//! events from the mouse alone, and drops from either kind.

/// Input device behind an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Start,
    End,
}

/// A drag lifecycle event on a draggable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerInteraction {
    pub kind: PointerKind,
    pub phase: DragPhase,
}

impl PointerInteraction {
    #[must_use]
    pub const fn new(kind: PointerKind, phase: DragPhase) -> Self {
        Self { kind, phase }
    }

    /// Maps a DOM event type on a draggable item.
    ///
    /// ```rust
    /// use blogfront::drag::{DragPhase, PointerInteraction, PointerKind};
    ///
    /// let ev = PointerInteraction::from_item_event("touchend").unwrap();
    /// assert_eq!(ev, PointerInteraction::new(PointerKind::Touch, DragPhase::End));
    /// assert!(PointerInteraction::from_item_event("click").is_none());
    /// ```
    #[must_use]
    pub fn from_item_event(event_type: &str) -> Option<Self> {
        let (kind, phase) = match event_type {
            "dragstart" => (PointerKind::Mouse, DragPhase::Start),
            "dragend" => (PointerKind::Mouse, DragPhase::End),
            "touchstart" => (PointerKind::Touch, DragPhase::Start),
            "touchend" => (PointerKind::Touch, DragPhase::End),
            _ => return None,
        };
        Some(Self::new(kind, phase))
    }
}

/// Events a drop zone reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneEvent {
    /// `dragover`
    Over,
    /// `dragleave`
    Leave,
    /// `drop` (mouse) or `touchend` received by the zone (touch).
    Drop(PointerKind),
}

impl ZoneEvent {
    /// Maps a DOM event type on a drop zone.
    #[must_use]
    pub fn from_zone_event(event_type: &str) -> Option<Self> {
        match event_type {
            "dragover" => Some(Self::Over),
            "dragleave" => Some(Self::Leave),
            "drop" => Some(Self::Drop(PointerKind::Mouse)),
            "touchend" => Some(Self::Drop(PointerKind::Touch)),
            _ => None,
        }
    }
}
