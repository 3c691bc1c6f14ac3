//! The view-transform slot.
//!
//! Sort, filter and search do not compose: each one is applied to the full
//! collection and replaces whatever was applied before. [`ViewTransform`] makes
//! that explicit as a single slot, and the working collection is always
//! `slot.apply(full)`.
//!
//! # Example
//!
//! ```rust
//! use blogfront::app::modes::{SortKey, ViewTransform};
//!
//! let slot = ViewTransform::Filtered("rust".to_string());
//! // A later sort replaces the filter rather than refining it.
//! let slot = match SortKey::from_value("date") {
//!     Some(key) => ViewTransform::Sorted(key),
//!     None => slot,
//! };
//! assert_eq!(slot, ViewTransform::Sorted(SortKey::Date));
//! ```

use crate::domain::Record;
use std::cmp::Reverse;

/// Orderings offered by the sort control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Newest first. Records without a parseable date go last.
    Date,
    /// Shortest first. Records without a numeric reading time go last.
    ReadingTime,
    /// Byte-wise ascending on category; a missing category sorts as `""`.
    Category,
}

impl SortKey {
    /// Maps a sort control value (`date`, `reading_time`, `category`).
    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "date" => Some(Self::Date),
            "reading_time" => Some(Self::ReadingTime),
            "category" => Some(Self::Category),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::ReadingTime => "reading_time",
            Self::Category => "category",
        }
    }

    /// Sorts `records` in place. The sort is stable.
    pub fn sort(self, records: &mut [Record]) {
        match self {
            Self::Date => records.sort_by_cached_key(|r| {
                let at = r.published_at();
                (at.is_none(), Reverse(at))
            }),
            Self::ReadingTime => records.sort_by_cached_key(|r| {
                let minutes = r.reading_minutes();
                (minutes.is_none(), minutes)
            }),
            Self::Category => records.sort_by(|a, b| a.category_or_empty().cmp(b.category_or_empty())),
        }
    }
}

/// The single transform applied to the full collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewTransform {
    /// Full collection in fetch order.
    #[default]
    None,
    Sorted(SortKey),
    /// Category equals the value or tags contain it. Empty value keeps everything.
    Filtered(String),
    /// Case-insensitive substring match on the title. Empty query keeps everything.
    Searched(String),
}

impl ViewTransform {
    /// Derives the working collection from the full one.
    #[must_use]
    pub fn apply(&self, full: &[Record]) -> Vec<Record> {
        match self {
            Self::None => full.to_vec(),
            Self::Sorted(key) => {
                let mut sorted = full.to_vec();
                key.sort(&mut sorted);
                sorted
            }
            Self::Filtered(value) if value.is_empty() => full.to_vec(),
            Self::Filtered(value) => full
                .iter()
                .filter(|r| r.matches_selection(value))
                .cloned()
                .collect(),
            Self::Searched(query) => {
                let needle = query.to_lowercase();
                full.iter()
                    .filter(|r| r.title_or_empty().to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
        }
    }

    /// Short label for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sorted(_) => "sorted",
            Self::Filtered(_) => "filtered",
            Self::Searched(_) => "searched",
        }
    }
}
