//! CSS class sets.
//!
//! Markup structure and hook classes (`blog-item`, `tag`, `no-results`, ...) are
//! fixed. Everything presentational comes from a [`Theme`]: the list styling
//! classes, drag affordances, the active-link highlight and the open-menu layout.
//!
//! # Built-in Themes
//!
//! - `tailwind`: Tailwind utility classes (default)
//! - `plain`: semantic state classes only, for a hand-written stylesheet
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//! hidden = "hidden"
//!
//! [list]
//! item = "card"
//! tag = "chip"
//!
//! [drag]
//! dragging = "lifted"
//! zone_hover = "drop-target"
//!
//! [nav]
//! active_link = "current"
//! menu_open = "open"
//! ```
//!
//! Every class field is a whitespace-separated list and may be omitted or empty.

use crate::domain::error::{BlogfrontError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Class sets for every styled element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    /// Class toggled to show and hide the loading indicator, error region and
    /// mobile menu.
    #[serde(default = "default_hidden")]
    pub hidden: String,
    #[serde(default)]
    pub list: ListClasses,
    #[serde(default)]
    pub drag: DragClasses,
    #[serde(default)]
    pub nav: NavClasses,
}

fn default_hidden() -> String {
    "hidden".to_string()
}

/// Styling added after the fixed hook class of each list element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ListClasses {
    pub item: String,
    pub image: String,
    pub content: String,
    pub title: String,
    pub meta: String,
    pub excerpt: String,
    pub tags: String,
    pub tag: String,
    pub no_results: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DragClasses {
    /// Applied to the item being dragged.
    pub dragging: String,
    /// Applied to a drop zone while something hovers over it.
    pub zone_hover: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NavClasses {
    pub active_link: String,
    /// Added to the nav list while the mobile menu is open.
    pub menu_open: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use blogfront::ui::Theme;
    ///
    /// let theme = Theme::from_name("tailwind").unwrap();
    /// assert_eq!(theme.drag.dragging, "opacity-50 scale-95");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "tailwind" => include_str!("../../themes/tailwind.toml"),
            "plain" => include_str!("../../themes/plain.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Parses a theme from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`BlogfrontError::Config`] if the text is not a valid theme.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| BlogfrontError::Config(format!("failed to parse theme TOML: {e}")))
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

impl Default for Theme {
    /// The `tailwind` theme.
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse (should never occur).
    fn default() -> Self {
        Self::from_name("tailwind").expect("Built-in tailwind theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtins_parse() {
        let tailwind = Theme::default();
        assert_eq!(tailwind.name, "tailwind");
        assert_eq!(tailwind.nav.active_link, "bg-blue-600 text-white");
        assert_eq!(tailwind.nav.menu_open, "flex flex-col gap-4 mt-4");
        assert_eq!(tailwind.drag.zone_hover, "border-blue-400 bg-blue-50");

        let plain = Theme::from_name("plain").unwrap();
        assert_eq!(plain.hidden, "hidden");
        assert!(plain.list.item.is_empty());
    }

    #[test]
    fn omitted_sections_default_to_empty() {
        let theme = Theme::from_toml_str("name = \"bare\"").unwrap();
        assert_eq!(theme.hidden, "hidden");
        assert_eq!(theme.list, ListClasses::default());
        assert_eq!(theme.drag, DragClasses::default());
    }

    #[test]
    fn from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"custom\"\nhidden = \"is-hidden\"\n[drag]\ndragging = \"lifted\"").unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.hidden, "is-hidden");
        assert_eq!(theme.drag.dragging, "lifted");
    }

    #[test]
    fn from_file_reports_missing_and_invalid_files() {
        assert!(matches!(
            Theme::from_file("/definitely/not/here.toml"),
            Err(BlogfrontError::Io(_))
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = 3").unwrap();
        assert!(matches!(
            Theme::from_file(file.path()),
            Err(BlogfrontError::Config(_))
        ));
    }
}
