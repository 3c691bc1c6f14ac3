//! Empty state component.

use crate::ui::helpers::{class_attr, escape_html};
use crate::ui::theme::ListClasses;
use crate::ui::viewmodel::EmptyState;

/// Appends the `.no-results` placeholder paragraph to `out`.
///
/// Shown in place of the cards whenever the working collection is empty, whether
/// because the feed was empty or because a filter or search matched nothing.
pub fn render_empty_state(out: &mut String, empty: &EmptyState, classes: &ListClasses) {
    out.push_str("<p class=\"");
    out.push_str(&class_attr("no-results", &classes.no_results));
    out.push_str("\">");
    out.push_str(&escape_html(&empty.message));
    out.push_str("</p>");
}
