//! List markup rendering.
//!
//! ```text
//! ListState → compute_viewmodel → ListViewModel → render_list → HTML string
//! ```
//!
//! The controller writes the result into `.blog-list-content` in one
//! `innerHTML` assignment.

use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ListViewModel;

/// Renders the list region's inner markup.
///
/// # Example
///
/// ```rust
/// use blogfront::ui::{render_list, EmptyState, ListViewModel, Theme};
///
/// let vm = ListViewModel { items: vec![], empty_state: Some(EmptyState::default()) };
/// let html = render_list(&vm, &Theme::default());
/// assert_eq!(html, "<p class=\"no-results text-gray-600\">No blogs found</p>");
/// ```
#[must_use]
pub fn render_list(vm: &ListViewModel, theme: &Theme) -> String {
    let mut html = String::new();

    if let Some(empty) = &vm.empty_state {
        components::render_empty_state(&mut html, empty, &theme.list);
        return html;
    }

    for card in &vm.items {
        components::render_card(&mut html, card, &theme.list);
    }
    html
}
