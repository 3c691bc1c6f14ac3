//! Application layer for the list region.
//!
//! # Architecture
//!
//! ```text
//! DOM event → Event → handle_event → ListState mutation → Actions → Dom effects
//!                                           ↓
//!                                    compute_viewmodel → render_list
//! ```
//!
//! # Modules
//!
//! - [`actions`]: document effects emitted by the handler
//! - [`handler`]: event processing and state transitions
//! - [`modes`]: the view-transform slot and sort keys
//! - [`state`]: list state and view model computation
//! - [`controller`]: binds the state machine to a [`Dom`](crate::dom::Dom)

pub mod actions;
pub mod controller;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use controller::{ListControls, ListController, ListElements};
pub use handler::{handle_event, Event};
pub use modes::{SortKey, ViewTransform};
pub use state::{ListState, ViewOptions};
