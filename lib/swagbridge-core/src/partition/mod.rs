//! Visibility partitioning of API documents.
//!
//! Operations are tagged with a vendor extension (`x-visibility: public` or
//! `x-visibility: private` by default). A partition keeps the operations of its visibility
//! plus every untagged operation, and only the schema definitions those operations can
//! reach through `$ref`s. Both dialects implement [`Partitionable`].
//!
//! # Example
//!
//! ```rust
//! use swagbridge_core::partition::Partitionable;
//! use swagbridge_core::spec::{ApiDocument, v3};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let document = v3::OpenApi::from_value(serde_json::json!({
//!     "openapi": "3.1.0",
//!     "info": { "title": "Pets", "version": "1.0.0" },
//!     "paths": {
//!         "/pets": { "get": { "responses": { "200": { "description": "list" } } } },
//!         "/admin": {
//!             "delete": {
//!                 "x-visibility": "private",
//!                 "responses": { "204": { "description": "purged" } }
//!             }
//!         }
//!     }
//! }))?;
//!
//! let partitions = document.split_by_visibility().ok_or("tagged document")?;
//!
//! assert_eq!(partitions.public.paths.len(), 1);
//! assert_eq!(partitions.private.paths.len(), 2);
//! # Ok(())
//! # }
//! ```

mod documents;
mod partitioner;
mod reachability;
mod visibility;

pub use self::partitioner::{Partitionable, VisibilityPartitions};
pub use self::visibility::{DEFAULT_EXTENSION_KEY, UnknownVisibility, Visibility, VisibilityFilter};
