//! Domain layer: the record model and the crate error type.
//!
//! Nothing in here touches the DOM, the network or storage. The list pipeline,
//! the cache and the renderer all speak in terms of these types.
//!
//! - [`error`]: Error types and result alias
//! - [`record`]: Blog post record model
//!
//! # Examples
//!
//! ```
//! use blogfront::domain::{Record, Result};
//!
//! fn decode(json: &str) -> Result<Vec<Record>> {
//!     serde_json::from_str(json)
//!         .map_err(|e| blogfront::BlogfrontError::UnexpectedResponse(e.to_string()))
//! }
//!
//! let records = decode(r#"[{"title":"Hello"}]"#)?;
//! assert_eq!(records[0].title_or_empty(), "Hello");
//! # Ok::<(), blogfront::BlogfrontError>(())
//! ```

pub mod error;
pub mod record;

pub use error::{BlogfrontError, Result};
pub use record::{ReadingTime, Record};
