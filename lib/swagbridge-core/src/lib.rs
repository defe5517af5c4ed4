//! # Swagbridge Core
//!
//! Convert API descriptions between OpenAPI 3.x and Swagger 2.0, and split them by
//! operation visibility.
//!
//! This crate provides:
//! - **[`Converter`]** - Bidirectional conversion, returning the converted document with the
//!   [`Warnings`] recorded for every lossy transformation
//! - **[`partition`]** - Public and private views of one document, pruned to the schemas
//!   their operations use
//! - **[`spec`]** - `serde` models of both dialects
//!
//! ## Quick Start
//!
//! ```rust
//! use swagbridge_core::Converter;
//! use swagbridge_core::spec::{ApiDocument, v2};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let legacy = v2::Swagger::from_value(serde_json::json!({
//!     "swagger": "2.0",
//!     "info": { "title": "Pets", "version": "1.0.0" },
//!     "host": "api.example.com",
//!     "basePath": "/v1",
//!     "schemes": ["https"],
//!     "paths": {
//!         "/pets": {
//!             "get": {
//!                 "produces": ["application/json"],
//!                 "responses": {
//!                     "200": { "description": "pets", "schema": { "$ref": "#/definitions/Pet" } }
//!                 }
//!             }
//!         }
//!     },
//!     "definitions": { "Pet": { "type": "object" } }
//! }))?;
//!
//! let converter = Converter::default();
//! let upgraded = converter.to_v3(&legacy)?;
//! assert_eq!(upgraded.document.servers[0].url, "https://api.example.com/v1");
//!
//! let (downgraded, warnings) = converter.to_v2(&upgraded.document)?.into_parts();
//! assert_eq!(downgraded.host.as_deref(), Some("api.example.com"));
//! assert!(downgraded.definitions.contains_key("Pet"));
//! assert!(warnings.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Warnings
//!
//! Conversions never fail on content the target dialect cannot express: cookie parameters,
//! links, callbacks, multiple servers or OAuth2 flows, `tsv` collections... Each dropped or
//! approximated construct is recorded as a [`Warning`] whose pointer locates it in the
//! source document.
//!
//! ```rust
//! use swagbridge_core::Converter;
//! use swagbridge_core::spec::v3;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut source = v3::OpenApi::new("Pets", "1.0.0");
//! source.servers.push(v3::Server::new("https://eu.example.com"));
//! source.servers.push(v3::Server::new("https://us.example.com"));
//!
//! let conversion = Converter::default().to_v2(&source)?;
//!
//! assert_eq!(conversion.document.host.as_deref(), Some("eu.example.com"));
//! assert_eq!(conversion.warnings.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `utoipa` (default): import documents generated by [`utoipa`](https://docs.rs/utoipa)
//! - `yaml`: read and write YAML with [`serde-saphyr`](https://docs.rs/serde-saphyr)
//!
//! ## Error Handling
//!
//! [`ConversionError`] is only returned for a missing source document, an invalid
//! configuration, or a document that cannot be read.

mod error;

pub mod convert;
pub mod partition;
pub mod spec;

#[cfg(feature = "utoipa")]
mod interop;

#[cfg(feature = "yaml")]
pub mod yaml;

pub use self::convert::{Conversion, Converter, ConverterBuilder, Warning, Warnings};
pub use self::error::ConversionError;
pub use self::partition::{Partitionable, Visibility, VisibilityFilter, VisibilityPartitions};
pub use self::spec::{AnyDocument, ApiDocument, Dialect};

#[cfg(feature = "yaml")]
pub use self::yaml::ToYaml;
