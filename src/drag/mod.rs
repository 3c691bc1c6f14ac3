//! Drag-and-drop rearrangement of `.draggable-item` elements between
//! `.drop-zone` containers, with mouse and touch unified.
//!
//! - `pointer`: [`PointerInteraction`] and [`ZoneEvent`]
//! - `controller`: [`DragController`]

pub mod controller;
pub mod pointer;

pub use controller::DragController;
pub use pointer::{DragPhase, PointerInteraction, PointerKind, ZoneEvent};
