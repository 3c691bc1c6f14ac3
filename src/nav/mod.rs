//! Responsive navigation: anchor scrolling, scroll spy, mobile menu toggle and
//! keyboard traversal.
//!
//! - `keys`: [`NavKey`] decoding and ring traversal
//! - `spy`: [`RootMargin`](spy::RootMargin) and intersection geometry
//! - `controller`: [`NavController`]

pub mod controller;
pub mod keys;
pub mod spy;

pub use controller::{has_navigation, NavController};
pub use keys::NavKey;
pub use spy::{RootMargin, SectionRect, SectionVisibility};
