//! Rendering layer for the list region.
//!
//! Transforms list state into HTML through small composable components, with
//! styling classes supplied by a [`Theme`].
//!
//! # Architecture
//!
//! ```text
//! ListState → compute_viewmodel → ListViewModel → render_list → innerHTML
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready card data
//! - [`renderer`]: top-level [`render_list`]
//! - [`components`]: card and empty-state markup
//! - [`helpers`]: escaping, date formatting, excerpt truncation
//! - [`theme`]: CSS class sets, built-in and TOML-loaded

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render_list;
pub use theme::Theme;
pub use viewmodel::{EmptyState, ItemCard, ListViewModel};
