//! Markup components for the list region.
//!
//! - [`card`]: one `<article class="blog-item">` per record
//! - [`empty`]: the `No blogs found` placeholder
//!
//! Components append to a caller-owned `String` and escape every interpolated
//! value themselves.

pub mod card;
pub mod empty;

pub use card::render_card;
pub use empty::render_empty_state;
