//! YAML support using serde-saphyr.
//!
//! Only available with the `yaml` feature. The converter itself works on in-memory models;
//! these helpers read and write the YAML text most API descriptions are kept in.
//!
//! # Example
//!
//! ```rust
//! use swagbridge_core::yaml::{ToYaml, parse_yaml};
//! use swagbridge_core::{AnyDocument, Converter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = parse_yaml(
//!     r#"
//! swagger: "2.0"
//! info:
//!   title: Pets
//!   version: 1.0.0
//! host: api.example.com
//! paths: {}
//! "#,
//! )?;
//! let AnyDocument::V2(source) = source else {
//!     return Err("expected a Swagger 2.0 document".into());
//! };
//!
//! let conversion = Converter::default().to_v3(&source)?;
//! let yaml = conversion.document.to_yaml()?;
//!
//! assert!(yaml.contains("api.example.com"));
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ConversionError;
use crate::spec::AnyDocument;

/// Error type for YAML serialization operations.
pub type YamlError = serde_saphyr::ser_error::Error;

/// Extension trait for serializing types to YAML.
///
/// Implemented for every [`Serialize`] type, documents of both dialects included.
pub trait ToYaml: Serialize + Sized {
    /// Serializes this value to a YAML string.
    ///
    /// # Errors
    ///
    /// Returns a [`YamlError`] if serialization fails.
    fn to_yaml(&self) -> Result<String, YamlError> {
        serde_saphyr::to_string(self)
    }
}

impl<T: Serialize + Sized> ToYaml for T {}

/// Reads a document of a known dialect from YAML.
///
/// # Errors
///
/// Returns [`ConversionError::InvalidDocument`] when the text is not valid YAML or does not
/// match the model.
pub fn from_yaml<D: DeserializeOwned>(text: &str) -> Result<D, ConversionError> {
    serde_saphyr::from_str(text).map_err(|error| ConversionError::InvalidDocument {
        reason: format!("invalid YAML: {error}"),
    })
}

/// Reads a document from YAML, detecting its dialect.
///
/// # Errors
///
/// Returns [`ConversionError::InvalidDocument`] for unreadable YAML and
/// [`ConversionError::UnknownDialect`] when neither version key is present.
pub fn parse_yaml(text: &str) -> Result<AnyDocument, ConversionError> {
    let value: Value = from_yaml(text)?;
    AnyDocument::try_from(value)
}
