//! Bidirectional conversion between OpenAPI 3.x and Swagger 2.0.
//!
//! Every conversion returns the converted document together with the [`Warnings`] recorded
//! while converting it. Constructs that have no equivalent in the target dialect are dropped
//! or approximated, never rejected.
//!
//! # Example
//!
//! ```rust
//! use swagbridge_core::Converter;
//! use swagbridge_core::spec::v3;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut source = v3::OpenApi::new("Pets", "1.0.0");
//! source.servers.push(v3::Server::new("https://api.example.com/v1"));
//!
//! let converter = Converter::default();
//! let conversion = converter.to_v2(&source)?;
//!
//! assert_eq!(conversion.document.host.as_deref(), Some("api.example.com"));
//! assert_eq!(conversion.document.base_path.as_deref(), Some("/v1"));
//! assert!(conversion.warnings.is_empty());
//! # Ok(())
//! # }
//! ```

use tracing::{error, info};

use crate::ConversionError;
use crate::spec::{ApiDocument, Dialect, v2, v3};

mod bodies;
mod media;
mod parameters;
mod refs;
mod schema;
mod security;
mod server;
mod to_v2;
mod to_v3;
mod warnings;

pub(crate) use self::refs::{V2_DEFINITIONS, V2_PARAMETERS, V2_RESPONSES, V3_HEADERS};
pub(crate) use self::refs::{V3_PARAMETERS, V3_REQUEST_BODIES, V3_RESPONSES, V3_SCHEMAS, local_name};
pub use self::refs::{schema_name, to_v2_ref, to_v3_ref};
pub use self::warnings::{Warning, Warnings};

/// A converted document and the warnings recorded while converting it.
#[derive(Debug, Clone)]
pub struct Conversion<D> {
    /// The converted document.
    pub document: D,
    /// Lossy transformations, in the order they happened.
    pub warnings: Warnings,
}

impl<D> Conversion<D> {
    /// Splits the pair.
    pub fn into_parts(self) -> (D, Warnings) {
        (self.document, self.warnings)
    }

    /// Returns `true` when the conversion was lossy.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Converts documents in both directions.
///
/// A converter holds configuration only: warnings are returned with each [`Conversion`], so
/// one instance can be shared between threads and reused for any number of documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converter {
    openapi_version: String,
}

impl Default for Converter {
    fn default() -> Self {
        Self {
            openapi_version: v3::DEFAULT_VERSION.to_owned(),
        }
    }
}

impl Converter {
    /// Creates a converter writing OpenAPI [`3.1.0`](v3::DEFAULT_VERSION).
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the configuration of a converter.
    pub fn builder() -> ConverterBuilder {
        ConverterBuilder::default()
    }

    /// The `openapi` version written by [`Converter::to_v3`].
    pub fn openapi_version(&self) -> &str {
        &self.openapi_version
    }

    /// Converts an OpenAPI 3.x document to Swagger 2.0.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::MissingDocument`] when no document is given.
    pub fn to_v2<'a>(
        &self,
        source: impl Into<Option<&'a v3::OpenApi>>,
    ) -> Result<Conversion<v2::Swagger>, ConversionError> {
        let Some(source) = source.into() else {
            error!("no OpenAPI 3.x document to convert");
            return Err(ConversionError::MissingDocument {
                dialect: Dialect::OpenApi3,
            });
        };

        let (document, warnings) = to_v2::convert(source);
        info!(
            title = document.title(),
            from = %source.openapi,
            operations = document.operations().count(),
            definitions = document.definitions.len(),
            warnings = warnings.len(),
            "converted to Swagger 2.0"
        );
        Ok(Conversion { document, warnings })
    }

    /// Converts a Swagger 2.0 document to OpenAPI 3.x.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::MissingDocument`] when no document is given.
    pub fn to_v3<'a>(
        &self,
        source: impl Into<Option<&'a v2::Swagger>>,
    ) -> Result<Conversion<v3::OpenApi>, ConversionError> {
        let Some(source) = source.into() else {
            error!("no Swagger 2.0 document to convert");
            return Err(ConversionError::MissingDocument {
                dialect: Dialect::Swagger2,
            });
        };

        let (document, warnings) = to_v3::convert(source, &self.openapi_version);
        info!(
            title = document.title(),
            to = %document.openapi,
            operations = document.operations().count(),
            schemas = document.components.as_ref().map_or(0, |components| components.schemas.len()),
            warnings = warnings.len(),
            "converted to OpenAPI 3.x"
        );
        Ok(Conversion { document, warnings })
    }
}

/// Builder for [`Converter`].
///
/// # Example
///
/// ```rust
/// use swagbridge_core::Converter;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let converter = Converter::builder()
///     .with_openapi_version("3.0.3")
///     .build()?;
///
/// assert_eq!(converter.openapi_version(), "3.0.3");
/// assert!(Converter::builder().with_openapi_version("2.0").build().is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConverterBuilder {
    openapi_version: Option<String>,
}

impl ConverterBuilder {
    /// Sets the `openapi` version written by [`Converter::to_v3`].
    ///
    /// Versions starting with `3.0` keep boolean exclusive bounds; later versions write
    /// numeric ones.
    #[must_use]
    pub fn with_openapi_version(mut self, version: impl Into<String>) -> Self {
        self.openapi_version = Some(version.into());
        self
    }

    /// Builds the converter.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::UnsupportedVersion`] when the version is not a 3.x version.
    pub fn build(self) -> Result<Converter, ConversionError> {
        let Some(version) = self.openapi_version else {
            return Ok(Converter::default());
        };
        if !v3::OpenApi::supports_version(&version) {
            return Err(ConversionError::UnsupportedVersion { version });
        }
        Ok(Converter {
            openapi_version: version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_reject_missing_documents() {
        let converter = Converter::new();

        let to_v2 = converter.to_v2(None::<&v3::OpenApi>);
        let to_v3 = converter.to_v3(None::<&v2::Swagger>);

        assert!(matches!(
            to_v2,
            Err(ConversionError::MissingDocument {
                dialect: Dialect::OpenApi3
            })
        ));
        assert_eq!(
            to_v3.map(|_| ()).map_err(|error| error.to_string()),
            Err("Missing Swagger 2.0 source document".to_owned())
        );
    }

    #[test]
    fn should_default_to_latest_stable_version() {
        let converter = Converter::builder().build().expect("default is valid");

        assert_eq!(converter.openapi_version(), "3.1.0");
        assert_eq!(converter, Converter::default());
    }

    #[test]
    fn should_reject_non_v3_output_version() {
        let result = Converter::builder().with_openapi_version("2.0").build();

        assert!(matches!(
            result,
            Err(ConversionError::UnsupportedVersion { version }) if version == "2.0"
        ));
    }

    #[test]
    fn should_write_configured_version() {
        let converter = Converter::builder()
            .with_openapi_version("3.0.3")
            .build()
            .expect("valid version");
        let source = v2::Swagger::new("Pets", "1.0.0");

        let conversion = converter.to_v3(&source).expect("converted");

        assert_eq!(conversion.document.openapi, "3.0.3");
        assert!(!conversion.has_warnings());
    }

    #[test]
    fn should_not_share_warnings_between_calls() {
        let converter = Converter::new();
        let mut noisy = v3::OpenApi::new("Pets", "1.0.0");
        noisy.info.summary = Some("dropped".to_owned());
        let quiet = v3::OpenApi::new("Pets", "1.0.0");

        let first = converter.to_v2(&noisy).expect("converted");
        let second = converter.to_v2(&quiet).expect("converted");

        assert_eq!(first.warnings.len(), 1);
        assert!(second.warnings.is_empty());
    }
}
