//! Blog post record model.
//!
//! A [`Record`] is one object of the remote JSON array, kept exactly as it was
//! decoded. The list controller treats records as opaque values: it reorders and
//! subsets collections of them but never edits a field. Typed views are computed
//! on read and fall back to empty values when a field is missing or has an
//! unexpected type, so one odd entry never rejects the collection and a record
//! written back to the cache serializes to the same JSON value it came from.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Reading-time estimate as it appears on the wire.
///
/// The feed is not consistent about this field: some entries carry a number,
/// others a string such as `"7"` or `"7 min"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadingTime {
    Number(Number),
    Text(String),
}

impl ReadingTime {
    /// Reads a wire value. Anything other than a number or a string is `None`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(Self::Number(n.clone())),
            Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    /// Whole minutes, read the way `parseInt` reads a value.
    ///
    /// Numbers are truncated toward zero. Strings contribute their leading integer
    /// (after whitespace and an optional sign); a string with no leading digits
    /// yields `None`.
    #[must_use]
    pub fn minutes(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64().or_else(|| {
                n.as_u64()
                    .map(|u| i64::try_from(u).unwrap_or(i64::MAX))
                    .or_else(|| {
                        #[allow(clippy::cast_possible_truncation)]
                        n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)
                    })
            }),
            Self::Text(s) => parse_leading_int(s),
        }
    }

    /// Text shown on the card. Whole-valued floats drop their fraction, so
    /// `7.0` reads as `7`.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Number(n) if n.is_f64() => {
                n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
            }
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(digits.len(), |(i, _)| i);

    if end == 0 {
        return None;
    }

    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// One blog post from the remote feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl Record {
    /// Returns the record with `key` set to `value`.
    #[must_use]
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Raw wire value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// All fields as decoded.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Title, or the empty string when it is missing or not a string.
    #[must_use]
    pub fn title_or_empty(&self) -> &str {
        self.text("title").unwrap_or("")
    }

    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.text("content")
    }

    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.text("author")
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.text("category")
    }

    /// Category, or the empty string when it is missing or not a string.
    #[must_use]
    pub fn category_or_empty(&self) -> &str {
        self.category().unwrap_or("")
    }

    /// Image URL shown beside the post.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.text("image")
    }

    /// Publication timestamp as sent. See [`Record::published_at`].
    #[must_use]
    pub fn published_date(&self) -> Option<&str> {
        self.text("published_date")
    }

    /// String tags. A `tags` value that is not an array yields no tags, and
    /// non-string entries are skipped.
    #[must_use]
    pub fn tags_or_empty(&self) -> Vec<&str> {
        self.0
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| tags.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn reading_time(&self) -> Option<ReadingTime> {
        self.0.get("reading_time").and_then(ReadingTime::from_value)
    }

    /// Reading time in whole minutes, if the field is present and numeric-ish.
    #[must_use]
    pub fn reading_minutes(&self) -> Option<i64> {
        self.reading_time().as_ref().and_then(ReadingTime::minutes)
    }

    /// Parsed publication instant.
    ///
    /// Accepts RFC 3339 (`2024-03-01T10:00:00Z`), a bare date (`2024-03-01`,
    /// midnight UTC) and a naive date-time (`2024-03-01T10:00:00`, read as UTC).
    /// Anything else yields `None`.
    #[must_use]
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.published_date()?.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Whether the record belongs to `selection` by category or by tag.
    #[must_use]
    pub fn matches_selection(&self, selection: &str) -> bool {
        self.category() == Some(selection) || self.tags_or_empty().contains(&selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn reading_time_follows_parse_int() {
        let cases = [
            (json!(7), Some(7)),
            (json!(7.9), Some(7)),
            (json!("12"), Some(12)),
            (json!("  5 min read"), Some(5)),
            (json!("-3"), Some(-3)),
            (json!("about 4"), None),
            (json!(""), None),
        ];

        for (wire, expected) in cases {
            let rt = ReadingTime::from_value(&wire).unwrap();
            assert_eq!(rt.minutes(), expected, "wire value {wire}");
        }
    }

    #[test]
    fn reading_time_labels_drop_a_zero_fraction() {
        let label = |v: Value| ReadingTime::from_value(&v).map(|rt| rt.label());

        assert_eq!(label(json!(7)), Some("7".to_string()));
        assert_eq!(label(json!(7.0)), Some("7".to_string()));
        assert_eq!(label(json!(7.5)), Some("7.5".to_string()));
        assert_eq!(label(json!("3 min")), Some("3 min".to_string()));
        assert_eq!(label(json!(true)), None);
    }

    #[test]
    fn published_at_accepts_common_shapes() {
        let at = |raw: &str| {
            Record::default()
                .with_field("published_date", raw)
                .published_at()
                .map(|d| d.to_rfc3339())
        };

        assert_eq!(at("2024-03-01"), Some("2024-03-01T00:00:00+00:00".to_string()));
        assert_eq!(
            at("2024-03-01T10:30:00+02:00"),
            Some("2024-03-01T08:30:00+00:00".to_string())
        );
        assert!(at("2024-03-01T10:30:00").is_some());
        assert!(at("last tuesday").is_none());
    }

    #[test]
    fn fields_survive_a_round_trip() {
        let wire = json!({
            "id": 42,
            "title": "Borrowing without tears",
            "author": null,
            "image": null,
            "tags": ["rust", "ownership"],
            "reading_time": "6",
            "slug": "borrowing"
        });

        let record = record(wire.clone());
        assert_eq!(record.title_or_empty(), "Borrowing without tears");
        assert!(record.author().is_none());
        assert_eq!(record.get("slug"), Some(&Value::from("borrowing")));

        assert_eq!(serde_json::to_value(&record).unwrap(), wire);
    }

    #[test]
    fn mistyped_fields_read_as_empty() {
        let odd = record(json!({
            "title": 42,
            "tags": "rust",
            "category": ["x"],
            "reading_time": true,
            "published_date": 20240101
        }));

        assert_eq!(odd.title_or_empty(), "");
        assert!(odd.tags_or_empty().is_empty());
        assert_eq!(odd.category_or_empty(), "");
        assert_eq!(odd.reading_minutes(), None);
        assert_eq!(odd.published_at(), None);

        let mixed = record(json!({"tags": ["a", 1, null, "b"]}));
        assert_eq!(mixed.tags_or_empty(), vec!["a", "b"]);
    }

    #[test]
    fn selection_matches_category_or_tag() {
        let record = record(json!({"category": "Frontend", "tags": ["css", "a11y"]}));

        assert!(record.matches_selection("Frontend"));
        assert!(record.matches_selection("a11y"));
        assert!(!record.matches_selection("frontend"));
        assert!(!record.matches_selection("Backend"));
    }
}
