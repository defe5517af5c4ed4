use crate::spec::Dialect;

/// Errors that stop a conversion.
///
/// Lossy conversions are never errors: they are reported as [`Warning`](crate::Warning)s
/// next to the converted document. Only a missing source document or an unusable
/// configuration fails a call.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum ConversionError {
    /// No source document was given.
    #[display("Missing {dialect} source document")]
    #[from(skip)]
    MissingDocument {
        /// Dialect of the expected source document.
        dialect: Dialect,
    },

    /// The configured output version is not an OpenAPI 3.x version.
    #[display("Unsupported OpenAPI output version '{version}', expected 3.x")]
    #[from(skip)]
    UnsupportedVersion {
        /// The rejected version string.
        version: String,
    },

    /// The value has neither a `swagger` nor an `openapi` key.
    #[display("Cannot detect the document dialect: expected a 'swagger' or 'openapi' key")]
    #[from(skip)]
    UnknownDialect,

    /// JSON serialization or deserialization failure.
    Json(serde_json::Error),

    /// A document from another library does not match the model.
    #[display("Failed to import document at '{path}': {error}")]
    #[from(skip)]
    Import {
        /// Location of the failing value inside the document.
        path: String,
        /// The underlying error.
        error: serde_json::Error,
    },

    /// A required field is missing or has an unexpected value.
    #[display("Invalid document: {reason}")]
    #[from(skip)]
    InvalidDocument {
        /// Description of the failed check.
        reason: String,
    },
}
