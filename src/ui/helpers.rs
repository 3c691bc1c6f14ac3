//! Text helpers shared by the view model and the components.

use chrono::{DateTime, Utc};
use std::fmt::Write as _;

/// Escapes text for use in element content and double-quoted attributes.
///
/// # Example
///
/// ```rust
/// use blogfront::ui::helpers::escape_html;
///
/// assert_eq!(escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
///     "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
/// ```
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Formats a publication instant with a `chrono` format string.
///
/// Falls back to `raw` when the instant is unknown or `format` holds an
/// invalid specifier.
#[must_use]
pub fn format_date(parsed: Option<DateTime<Utc>>, raw: &str, format: &str) -> String {
    let Some(instant) = parsed else {
        return raw.to_string();
    };

    let mut out = String::new();
    if write!(out, "{}", instant.format(format)).is_err() {
        tracing::debug!(format, "invalid date format, showing raw value");
        return raw.to_string();
    }
    out
}

/// Truncates `content` to `budget` characters, ending in an ellipsis.
///
/// `None` means no truncation. Trailing whitespace before the ellipsis is
/// dropped.
#[must_use]
pub fn excerpt(content: &str, budget: Option<usize>) -> String {
    let Some(budget) = budget else {
        return content.to_string();
    };
    if content.chars().count() <= budget {
        return content.to_string();
    }

    let cut: String = content.chars().take(budget).collect();
    format!("{}…", cut.trim_end())
}

/// Joins a fixed hook class with optional theme classes.
pub(crate) fn class_attr(hook: &str, styling: &str) -> String {
    let styling = styling.trim();
    if styling.is_empty() {
        escape_html(hook)
    } else {
        escape_html(&format!("{hook} {styling}"))
    }
}
