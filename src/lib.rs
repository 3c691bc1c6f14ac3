//! Blogfront: browser-side behaviours for a static blog site.
//!
//! Three independent controllers, each driven by DOM events:
//!
//! - a post list that loads records through a cache with retrying fetch, then
//!   sorts, filters, searches and paginates them
//! - drag-to-rearrange of `.draggable-item` elements into `.drop-zone`s
//! - a navigation bar with smooth anchor scrolling, scroll spy, a mobile menu
//!   and arrow-key focus traversal

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Browser Shim (web/, wasm32 only)                   │  ← Entry point
//! │  - web-sys ports, event listeners, IntersectionObs. │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ List (app/)   │   │ Drag (drag/)  │   │ Nav (nav/)    │
//! │ - Events      │   │ - Pointer     │   │ - Keys        │
//! │ - Actions     │   │   unification │   │ - Scroll spy  │
//! │ - View model  │   │               │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI (ui/)      │   │ Fetch/Storage │   │ DOM/Schedule  │
//! │ - Rendering   │   │ - Retry loop  │   │ - Dom port    │
//! │ - Theming     │   │ - Record cache│   │ - Debouncer   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) and Observability (observability/)│
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Everything above the shim talks to the browser through ports (`Dom`,
//! `KeyValueStore`, `DataSource`, `Sleeper`, `Scheduler`), so the same
//! controllers run natively against in-memory doubles.
//!
//! # Configuration
//!
//! A page tunes the list through `data-*` attributes on the first
//! `.blog-list` container:
//!
//! ```html
//! <div class="blog-list"
//!      data-api-url="/blogsData.json"
//!      data-per-page="6"
//!      data-theme="plain"
//!      data-trace-level="debug">
//! ```
//!
//! # Example
//!
//! ```rust
//! use blogfront::app::ListController;
//! use blogfront::dom::MemoryDom;
//! use blogfront::fetch::{DataSource, HttpResponse, NoDelay};
//! use blogfront::storage::MemoryStore;
//! use blogfront::{resolve_theme, Config};
//! use futures_util::future::LocalBoxFuture;
//!
//! struct Static;
//!
//! impl DataSource for Static {
//!     fn fetch<'a>(&'a self, _url: &'a str) -> LocalBoxFuture<'a, blogfront::Result<HttpResponse>> {
//!         Box::pin(async { Ok(HttpResponse::new(200, r#"[{"title":"Hello"}]"#)) })
//!     }
//! }
//!
//! let dom = MemoryDom::new();
//! let list = dom.append(dom.root(), "div", &[("class", "blog-list")]);
//! let content = dom.append(list, "div", &[("class", "blog-list-content")]);
//!
//! let config = Config::default();
//! let mut controller = ListController::new(
//!     &dom,
//!     list,
//!     config.view_options(),
//!     config.load_request(),
//!     resolve_theme(&config),
//! );
//!
//! let loaded = futures_util::FutureExt::now_or_never(
//!     controller.init(MemoryStore::default(), &Static, &NoDelay),
//! );
//! assert_eq!(loaded, Some(true));
//! assert!(dom.inner_html(content).contains("Hello"));
//! ```

pub mod app;
pub mod dom;
pub mod domain;
pub mod drag;
pub mod fetch;
pub mod nav;
pub mod schedule;
pub mod storage;

pub mod ui;

pub mod observability;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::{handle_event, Action, Event, ListController, ListState, SortKey, ViewTransform};
pub use domain::{BlogfrontError, Record, Result};
pub use ui::Theme;

use app::ViewOptions;
use fetch::{LoadRequest, RetryPolicy};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Page-level settings.
///
/// Every field has a compiled-in default; a page overrides individual keys
/// through `data-*` attributes or a TOML file.
///
/// ```toml
/// api_url = "/blogsData.json"
/// cache_key = "blogs_cache_v1"
/// max_retries = 2
/// retry_delay_ms = 500
/// per_page = 10
/// search_debounce_ms = 250
/// excerpt_chars = 160
/// date_format = "%-m/%-d/%Y"
/// header_offset_px = 8.0
/// theme = "tailwind"
/// trace_level = "info"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Endpoint returning a JSON array of records.
    pub api_url: String,

    /// Storage key for the cached collection.
    pub cache_key: String,

    /// Retries after the first fetch attempt. Default: 2
    pub max_retries: u32,

    /// Pause between fetch attempts. Default: 500
    pub retry_delay_ms: u32,

    /// Items per page. Default: 10
    pub per_page: usize,

    /// Quiescence window for the search box. Default: 250
    pub search_debounce_ms: u32,

    /// Excerpt length in characters; unset shows the full content.
    pub excerpt_chars: Option<usize>,

    /// `chrono` format for publication dates.
    pub date_format: String,

    /// Gap kept between the sticky header and a scrolled-to section.
    pub header_offset_px: f64,

    /// Built-in theme name (`tailwind`, `plain`). Ignored if `theme_file` is set.
    #[serde(rename = "theme")]
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme. Takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directives. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "https://frontend-blog-lyart.vercel.app/blogsData.json".to_string(),
            cache_key: "blogs_cache_v1".to_string(),
            max_retries: 2,
            retry_delay_ms: 500,
            per_page: 10,
            search_debounce_ms: 250,
            excerpt_chars: None,
            date_format: "%-m/%-d/%Y".to_string(),
            header_offset_px: 8.0,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses settings from an element's dataset.
    ///
    /// Keys are the camel-cased names the browser exposes for `data-*`
    /// attributes (`data-api-url` → `apiUrl`). Missing, empty or unparsable
    /// values keep their default.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use blogfront::Config;
    ///
    /// let mut dataset = BTreeMap::new();
    /// dataset.insert("perPage".to_string(), "6".to_string());
    /// dataset.insert("maxRetries".to_string(), "lots".to_string());
    ///
    /// let config = Config::from_dataset(&dataset);
    /// assert_eq!(config.per_page, 6);
    /// assert_eq!(config.max_retries, 2);
    /// ```
    #[must_use]
    pub fn from_dataset(dataset: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            dataset
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        Self {
            api_url: text("apiUrl").unwrap_or(defaults.api_url),
            cache_key: text("cacheKey").unwrap_or(defaults.cache_key),
            max_retries: parse_or(dataset, "maxRetries", defaults.max_retries),
            retry_delay_ms: parse_or(dataset, "retryDelayMs", defaults.retry_delay_ms),
            per_page: parse_or(dataset, "perPage", defaults.per_page).max(1),
            search_debounce_ms: parse_or(dataset, "searchDebounceMs", defaults.search_debounce_ms),
            excerpt_chars: text("excerptChars").and_then(|s| s.parse().ok()),
            date_format: text("dateFormat").unwrap_or(defaults.date_format),
            header_offset_px: parse_or(dataset, "headerOffsetPx", defaults.header_offset_px),
            theme_name: text("theme"),
            theme_file: None,
            trace_level: text("traceLevel"),
        }
    }

    /// Parses settings from TOML. Absent keys keep their default.
    ///
    /// # Errors
    ///
    /// Returns [`BlogfrontError::Config`] for malformed TOML or mistyped values.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| BlogfrontError::Config(e.to_string()))
    }

    /// Reads and parses a TOML settings file.
    ///
    /// # Errors
    ///
    /// Returns [`BlogfrontError::Io`] if the file cannot be read, or
    /// [`BlogfrontError::Config`] if it does not parse.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Presentation settings for a list controller.
    #[must_use]
    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            per_page: self.per_page.max(1),
            date_format: self.date_format.clone(),
            excerpt_chars: self.excerpt_chars,
        }
    }

    /// The load a list controller performs on start.
    #[must_use]
    pub fn load_request(&self) -> LoadRequest {
        LoadRequest {
            url: self.api_url.clone(),
            cache_key: self.cache_key.clone(),
            policy: RetryPolicy {
                max_retries: self.max_retries,
                delay_ms: self.retry_delay_ms,
            },
        }
    }
}

fn parse_or<T: std::str::FromStr>(dataset: &BTreeMap<String, String>, key: &str, default: T) -> T {
    dataset
        .get(key)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Resolves the theme: `theme_file`, then `theme_name`, then the default.
///
/// A theme that fails to load is logged and replaced by the default.
pub fn resolve_theme(config: &Config) -> Theme {
    config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    )
}
