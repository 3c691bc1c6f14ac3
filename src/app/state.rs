//! List state and view model computation.
//!
//! [`ListState`] is the single source of truth for the list region: the full
//! collection, the view-transform slot, the page counter and the working
//! collection derived from them.
//!
//! # Example
//!
//! ```rust
//! use blogfront::app::{ListState, ViewOptions};
//! use blogfront::app::modes::ViewTransform;
//! use blogfront::Record;
//!
//! let mut state = ListState::new(ViewOptions::default());
//! state.set_items(vec![Record::default().with_field("title", "Hello")]);
//! state.apply_transform(ViewTransform::Searched("zzz".into()));
//!
//! let vm = state.compute_viewmodel();
//! assert!(vm.items.is_empty());
//! assert!(vm.empty_state.is_some());
//! ```

use super::modes::ViewTransform;
use crate::domain::Record;
use crate::ui::helpers::{excerpt, format_date};
use crate::ui::viewmodel::{EmptyState, ItemCard, ListViewModel};

/// Presentation settings that shape the view model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    /// Items revealed per page.
    pub per_page: usize,
    /// `chrono` format string for publication dates.
    pub date_format: String,
    /// Character budget for the content excerpt; `None` shows it in full.
    pub excerpt_chars: Option<usize>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            per_page: 10,
            date_format: "%-m/%-d/%Y".to_string(),
            excerpt_chars: None,
        }
    }
}

/// State of one list region.
#[derive(Debug, Clone)]
pub struct ListState {
    items: Vec<Record>,
    transform: ViewTransform,
    working: Vec<Record>,
    /// 1-based page counter. Rendering reveals `page * per_page` items.
    page: usize,
    options: ViewOptions,
}

impl ListState {
    #[must_use]
    pub fn new(options: ViewOptions) -> Self {
        Self {
            items: Vec::new(),
            transform: ViewTransform::None,
            working: Vec::new(),
            page: 1,
            options,
        }
    }

    /// Replaces the full collection and clears the transform.
    pub fn set_items(&mut self, items: Vec<Record>) {
        self.items = items;
        self.transform = ViewTransform::None;
        self.working = self.items.clone();
        self.page = 1;
    }

    /// Puts `transform` in the slot, recomputes the working collection and
    /// returns to the first page.
    pub fn apply_transform(&mut self, transform: ViewTransform) {
        self.working = transform.apply(&self.items);
        self.transform = transform;
        self.page = 1;

        tracing::debug!(
            transform = self.transform.kind(),
            working = self.working.len(),
            total = self.items.len(),
            "view transform applied"
        );
    }

    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    #[must_use]
    pub fn items(&self) -> &[Record] {
        &self.items
    }

    #[must_use]
    pub const fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    #[must_use]
    pub fn working(&self) -> &[Record] {
        &self.working
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn options(&self) -> &ViewOptions {
        &self.options
    }

    /// The slice of the working collection that is rendered.
    #[must_use]
    pub fn visible(&self) -> &[Record] {
        let end = self.page.saturating_mul(self.options.per_page);
        &self.working[..end.min(self.working.len())]
    }

    /// Builds the display model for the visible slice.
    #[must_use]
    pub fn compute_viewmodel(&self) -> ListViewModel {
        if self.working.is_empty() {
            return ListViewModel {
                items: Vec::new(),
                empty_state: Some(EmptyState::default()),
            };
        }

        ListViewModel {
            items: self.visible().iter().map(|r| self.card(r)).collect(),
            empty_state: None,
        }
    }

    fn card(&self, record: &Record) -> ItemCard {
        ItemCard {
            image: record.image().map(str::to_string),
            title: record.title_or_empty().to_string(),
            author: record.author().unwrap_or_default().to_string(),
            date: record
                .published_date()
                .map(|raw| format_date(record.published_at(), raw, &self.options.date_format)),
            reading_time: record.reading_time().map(|rt| rt.label()),
            excerpt: excerpt(record.content().unwrap_or_default(), self.options.excerpt_chars),
            tags: record
                .tags_or_empty()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::SortKey;
    use serde_json::json;

    fn numbered(n: usize) -> Vec<Record> {
        (1..=n)
            .map(|i| Record::default().with_field("title", format!("post {i}")))
            .collect()
    }

    #[test]
    fn visible_is_capped_at_one_page() {
        let mut state = ListState::new(ViewOptions::default());
        state.set_items(numbered(12));

        assert_eq!(state.working().len(), 12);
        assert_eq!(state.visible().len(), 10);
        assert_eq!(state.compute_viewmodel().items.len(), 10);
    }

    #[test]
    fn short_collections_show_everything() {
        let mut state = ListState::new(ViewOptions {
            per_page: 5,
            ..ViewOptions::default()
        });
        state.set_items(numbered(3));
        assert_eq!(state.visible().len(), 3);
    }

    #[test]
    fn transforms_replace_each_other() {
        let mut state = ListState::new(ViewOptions::default());
        state.set_items(
            serde_json::from_value(json!([
                {"title": "b", "category": "x"},
                {"title": "a", "category": "y"}
            ]))
            .unwrap(),
        );

        state.apply_transform(ViewTransform::Filtered("x".into()));
        assert_eq!(state.working().len(), 1);

        state.apply_transform(ViewTransform::Sorted(SortKey::Category));
        assert_eq!(state.working().len(), 2, "sort discards the earlier filter");
        assert_eq!(state.transform(), &ViewTransform::Sorted(SortKey::Category));
    }

    #[test]
    fn new_items_clear_the_slot() {
        let mut state = ListState::new(ViewOptions::default());
        state.set_items(numbered(3));
        state.apply_transform(ViewTransform::Searched("post 2".into()));
        assert_eq!(state.working().len(), 1);

        state.set_items(numbered(4));
        assert_eq!(state.transform(), &ViewTransform::None);
        assert_eq!(state.working().len(), 4);
    }

    #[test]
    fn cards_carry_formatted_fields() {
        let mut state = ListState::new(ViewOptions {
            excerpt_chars: Some(4),
            ..ViewOptions::default()
        });
        state.set_items(
            serde_json::from_value(json!([{
                "title": "T",
                "author": "A",
                "content": "abcdefgh",
                "published_date": "2024-12-25",
                "reading_time": 6.0,
                "tags": ["x"]
            }, {
                "title": "U",
                "published_date": "soon",
                "reading_time": "3 min"
            }]))
            .unwrap(),
        );

        let vm = state.compute_viewmodel();
        assert_eq!(vm.items[0].date.as_deref(), Some("12/25/2024"));
        assert_eq!(vm.items[0].reading_time.as_deref(), Some("6"));
        assert_eq!(vm.items[0].excerpt, "abcd…");
        assert_eq!(vm.items[1].date.as_deref(), Some("soon"));
        assert_eq!(vm.items[1].reading_time.as_deref(), Some("3 min"));
        assert_eq!(vm.items[1].author, "");
    }

    #[test]
    fn mistyped_fields_still_render() {
        let mut state = ListState::new(ViewOptions::default());
        state.set_items(
            serde_json::from_value(json!([
                {"title": 42, "tags": "rust", "author": null, "reading_time": true},
                {"title": "fine", "tags": ["a", 7]}
            ]))
            .unwrap(),
        );

        let vm = state.compute_viewmodel();
        assert_eq!(vm.items.len(), 2);
        assert_eq!(vm.items[0].title, "");
        assert!(vm.items[0].tags.is_empty());
        assert_eq!(vm.items[0].author, "");
        assert_eq!(vm.items[0].reading_time, None);
        assert_eq!(vm.items[1].tags, vec!["a".to_string()]);
    }
}
