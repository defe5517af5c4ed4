//! In-memory models for both API description dialects.
//!
//! The [`v3`] module models OpenAPI 3.x documents and the [`v2`] module models Swagger 2.0
//! documents. Both share the building blocks defined here: [`RefOr`] for nodes that may be
//! replaced by a `$ref`, [`AdditionalProperties`] for the boolean-or-schema keyword, and
//! [`Extensions`] for `x-` vendor keys.
//!
//! Every model is a plain `serde` type, so a document can be read from any format serde
//! supports. Maps are [`IndexMap`]s: document order is kept, which makes every
//! "first entry" rule of the converter deterministic.
//!
//! # Example
//!
//! ```rust
//! use swagbridge_core::spec::{AnyDocument, Dialect};
//!
//! let value = serde_json::json!({
//!     "swagger": "2.0",
//!     "info": { "title": "Pets", "version": "1.0.0" },
//!     "paths": {}
//! });
//! let document = AnyDocument::try_from(value)?;
//! assert_eq!(document.dialect(), Dialect::Swagger2);
//! # Ok::<(), swagbridge_core::ConversionError>(())
//! ```

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::ConversionError;

pub mod v2;
pub mod v3;

/// Prefix shared by every vendor extension key.
pub const EXTENSION_PREFIX: &str = "x-";

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// The two supported dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Dialect {
    /// Swagger 2.0, the legacy dialect.
    #[display("Swagger 2.0")]
    Swagger2,
    /// OpenAPI 3.x, the richer dialect.
    #[display("OpenAPI 3.x")]
    OpenApi3,
}

/// A `$ref` pointer to a reusable component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    /// The pointer, e.g. `#/components/schemas/Pet`.
    #[serde(rename = "$ref")]
    pub ref_location: String,
}

impl Reference {
    /// Creates a reference to the given location.
    pub fn new(ref_location: impl Into<String>) -> Self {
        Self {
            ref_location: ref_location.into(),
        }
    }
}

/// A node that is either a `$ref` or an inline value.
///
/// A reference node ignores every sibling key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    /// A `$ref` to a named component.
    Ref(Reference),
    /// An inline definition.
    T(T),
}

impl<T> RefOr<T> {
    /// Creates a reference node.
    pub fn reference(ref_location: impl Into<String>) -> Self {
        Self::Ref(Reference::new(ref_location))
    }

    /// Returns the `$ref` pointer when this node is a reference.
    pub fn ref_location(&self) -> Option<&str> {
        match self {
            Self::Ref(reference) => Some(&reference.ref_location),
            Self::T(_) => None,
        }
    }

    /// Returns the inline value when this node is not a reference.
    pub fn as_inline(&self) -> Option<&T> {
        match self {
            Self::Ref(_) => None,
            Self::T(value) => Some(value),
        }
    }
}

impl<T> From<T> for RefOr<T> {
    fn from(value: T) -> Self {
        Self::T(value)
    }
}

/// The `additionalProperties` keyword: either a boolean or a nested schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties<S> {
    /// `true` or `false`.
    Allowed(bool),
    /// A schema every additional property must match.
    Schema(Box<RefOr<S>>),
}

/// Vendor extensions (`x-` keys) of an extensible object.
///
/// Flattened into the owning object; keys that do not start with `x-` are dropped while
/// parsing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, derive_more::Deref, derive_more::DerefMut)]
#[serde(transparent)]
pub struct Extensions(IndexMap<String, Value>);

impl Extensions {
    /// Returns `true` when no extension is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` when the extension is set to the boolean `true`.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.0.get(key), Some(Value::Bool(true)))
    }

    /// Removes the extension and reports whether it was the boolean `true`.
    pub fn take_flag(&mut self, key: &str) -> bool {
        matches!(self.0.shift_remove(key), Some(Value::Bool(true)))
    }

    /// Returns the extension as a string, if it is one.
    pub fn string(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl<'de> Deserialize<'de> for Extensions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = IndexMap::<String, Value>::deserialize(deserializer)?;
        let extensions = entries
            .into_iter()
            .filter(|(key, _)| key.starts_with(EXTENSION_PREFIX))
            .collect();
        Ok(Self(extensions))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Extensions {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(key, value)| (key.into(), value)).collect())
    }
}

/// Contact information, identical in both dialects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Contact name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// A link to external documentation, identical in both dialects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalDocs {
    /// Target URL.
    pub url: String,
    /// Short description of the target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// A tag declaration, identical in both dialects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Tag description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Additional documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// XML serialization hints of a schema, identical in both dialects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Xml {
    /// Element or attribute name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Namespace URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Namespace prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Serialize as an attribute.
    #[serde(default, skip_serializing_if = "is_false")]
    pub attribute: bool,
    /// Wrap array items.
    #[serde(default, skip_serializing_if = "is_false")]
    pub wrapped: bool,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Common surface of both document roots.
pub trait ApiDocument: Serialize + DeserializeOwned {
    /// The dialect of this document type.
    const DIALECT: Dialect;

    /// The `info` object type of this dialect.
    type Info;

    /// The dialect version string (`swagger` or `openapi` field).
    fn version(&self) -> &str;

    /// The document `info` object.
    fn info(&self) -> &Self::Info;

    /// The API title.
    fn title(&self) -> &str;

    /// The API version (`info.version`).
    fn api_version(&self) -> &str;

    /// Returns `true` when the dialect version string is acceptable for this dialect.
    fn supports_version(version: &str) -> bool;

    /// Checks the few fields both dialects require.
    ///
    /// This is not a full semantic validation: only the version string, `info.title` and
    /// `info.version` are checked.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::InvalidDocument`] describing the first failed check.
    fn validate(&self) -> Result<(), ConversionError> {
        let version = self.version();
        if !Self::supports_version(version) {
            return Err(ConversionError::InvalidDocument {
                reason: format!("unsupported {} version '{version}'", Self::DIALECT),
            });
        }
        if self.title().trim().is_empty() {
            return Err(ConversionError::InvalidDocument {
                reason: "info.title is required".to_owned(),
            });
        }
        if self.api_version().trim().is_empty() {
            return Err(ConversionError::InvalidDocument {
                reason: "info.version is required".to_owned(),
            });
        }
        Ok(())
    }

    /// Deserializes a document from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::Json`] when the value does not match the model.
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        let document = serde_json::from_value(value)?;
        Ok(document)
    }

    /// Serializes the document to a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::Json`] when serialization fails.
    fn to_value(&self) -> Result<Value, ConversionError> {
        let value = serde_json::to_value(self)?;
        Ok(value)
    }
}

/// A document of either dialect, detected from its version key.
#[derive(Debug, Clone, PartialEq, Serialize, derive_more::From)]
#[serde(untagged)]
pub enum AnyDocument {
    /// A Swagger 2.0 document.
    V2(v2::Swagger),
    /// An OpenAPI 3.x document.
    V3(v3::OpenApi),
}

impl AnyDocument {
    /// The dialect of the wrapped document.
    pub fn dialect(&self) -> Dialect {
        match self {
            Self::V2(_) => Dialect::Swagger2,
            Self::V3(_) => Dialect::OpenApi3,
        }
    }

    /// The dialect version string of the wrapped document.
    pub fn version(&self) -> &str {
        match self {
            Self::V2(document) => document.version(),
            Self::V3(document) => document.version(),
        }
    }

    /// Runs [`ApiDocument::validate`] on the wrapped document.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::InvalidDocument`] when a required field is missing.
    pub fn validate(&self) -> Result<(), ConversionError> {
        match self {
            Self::V2(document) => document.validate(),
            Self::V3(document) => document.validate(),
        }
    }
}

impl TryFrom<Value> for AnyDocument {
    type Error = ConversionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        if value.get("swagger").is_some() {
            v2::Swagger::from_value(value).map(Self::V2)
        } else if value.get("openapi").is_some() {
            v3::OpenApi::from_value(value).map(Self::V3)
        } else {
            Err(ConversionError::UnknownDialect)
        }
    }
}
