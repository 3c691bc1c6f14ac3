//! Event handling and state transitions for the list region.
//!
//! # Architecture
//!
//! ```text
//! DOM event / load result → Event → handle_event → ListState mutation
//!                                        ↓
//!                          (should_render, Vec<Action>) → controller
//! ```
//!
//! # Example
//!
//! ```rust
//! use blogfront::app::{handle_event, Action, Event, ListState, ViewOptions};
//!
//! let mut state = ListState::new(ViewOptions::default());
//! let (render, actions) = handle_event(&mut state, &Event::LoadStarted)?;
//! assert!(!render);
//! assert_eq!(actions, vec![Action::ShowLoading]);
//! # Ok::<(), blogfront::BlogfrontError>(())
//! ```

use super::modes::{SortKey, ViewTransform};
use super::state::ListState;
use super::Action;
use crate::domain::error::Result;
use crate::domain::Record;

/// Inputs to the list state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Initialization began.
    LoadStarted,
    /// The collection arrived, from the cache or the network.
    LoadSucceeded(Vec<Record>),
    /// Every attempt failed; carries the display message of the final error.
    LoadFailed(String),
    /// `change` on `.sort-select`.
    SortChanged(String),
    /// `change` on `.filter-select`.
    FilterChanged(String),
    /// Debounced `input` on `.search-input`.
    SearchChanged(String),
}

impl Event {
    const fn name(&self) -> &'static str {
        match self {
            Self::LoadStarted => "load_started",
            Self::LoadSucceeded(_) => "load_succeeded",
            Self::LoadFailed(_) => "load_failed",
            Self::SortChanged(_) => "sort_changed",
            Self::FilterChanged(_) => "filter_changed",
            Self::SearchChanged(_) => "search_changed",
        }
    }
}

/// Processes an event, mutates state, and returns whether to re-render plus the
/// actions to execute.
///
/// View operations (sort, filter, search) always reset to page 1 and always
/// request a render. A sort value outside `date`, `reading_time` and `category`
/// leaves the slot as it was but still resets the page and re-renders.
///
/// # Errors
///
/// No event currently fails.
#[allow(clippy::unnecessary_wraps)]
pub fn handle_event(state: &mut ListState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    match event {
        Event::LoadStarted => Ok((false, vec![Action::ShowLoading])),
        Event::LoadSucceeded(records) => {
            tracing::debug!(count = records.len(), "collection replaced");
            state.set_items(records.clone());
            Ok((true, vec![Action::BindControls, Action::HideLoading]))
        }
        Event::LoadFailed(message) => Ok((
            false,
            vec![Action::ShowError(message.clone()), Action::HideLoading],
        )),
        Event::SortChanged(value) => {
            if let Some(key) = SortKey::from_value(value) {
                state.apply_transform(ViewTransform::Sorted(key));
            } else {
                tracing::debug!(value = %value, "unknown sort value, keeping current order");
                state.reset_page();
            }
            Ok((true, vec![]))
        }
        Event::FilterChanged(value) => {
            state.apply_transform(ViewTransform::Filtered(value.clone()));
            Ok((true, vec![]))
        }
        Event::SearchChanged(query) => {
            state.apply_transform(ViewTransform::Searched(query.clone()));
            Ok((true, vec![]))
        }
    }
}
