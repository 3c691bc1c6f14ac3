//! View model types for the list region.
//!
//! Computed by `ListState::compute_viewmodel` and consumed by
//! [`render_list`](crate::ui::render_list). Everything in here is display-ready
//! text: dates are formatted, reading times stringified and excerpts truncated,
//! but nothing is escaped yet.
//!
//! # Example
//!
//! ```rust
//! use blogfront::ui::viewmodel::{ItemCard, ListViewModel};
//!
//! let vm = ListViewModel {
//!     items: vec![ItemCard {
//!         title: "Hello".to_string(),
//!         tags: vec!["intro".to_string()],
//!         ..ItemCard::default()
//!     }],
//!     empty_state: None,
//! };
//! assert_eq!(vm.items.len(), 1);
//! ```

/// Everything the list region shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListViewModel {
    /// Cards for the visible slice of the working collection.
    pub items: Vec<ItemCard>,

    /// Set instead of `items` when the working collection is empty.
    pub empty_state: Option<EmptyState>,
}

/// One rendered record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemCard {
    /// Image URL. The `<img>` is omitted when `None`.
    pub image: Option<String>,
    pub title: String,
    pub author: String,
    /// Formatted publication date, or the raw value when it does not parse.
    pub date: Option<String>,
    /// Reading time as sent by the feed, without the unit.
    pub reading_time: Option<String>,
    /// Content, possibly truncated.
    pub excerpt: String,
    pub tags: Vec<String>,
}

/// Placeholder for an empty working collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            message: "No blogs found".to_string(),
        }
    }
}
