//! Import of [`utoipa`] documents.
//!
//! Only available with the `utoipa` feature (enabled by default). A document generated by
//! utoipa can be fed to the converter to publish a Swagger 2.0 version of the same API.
//!
//! # Example
//!
//! ```rust
//! use swagbridge_core::Converter;
//! use swagbridge_core::spec::v3;
//! use utoipa::openapi::{InfoBuilder, OpenApiBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let generated = OpenApiBuilder::new()
//!     .info(InfoBuilder::new().title("Pets").version("1.0.0").build())
//!     .build();
//!
//! let document = v3::OpenApi::try_from(&generated)?;
//! let conversion = Converter::default().to_v2(&document)?;
//!
//! assert_eq!(conversion.document.info.title, "Pets");
//! # Ok(())
//! # }
//! ```

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::ConversionError;
use crate::spec::v3;

fn reshape<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, ConversionError> {
    serde_path_to_error::deserialize(value).map_err(|err| ConversionError::Import {
        path: err.path().to_string(),
        error: err.into_inner(),
    })
}

impl TryFrom<&utoipa::openapi::OpenApi> for v3::OpenApi {
    type Error = ConversionError;

    fn try_from(source: &utoipa::openapi::OpenApi) -> Result<Self, Self::Error> {
        let value = serde_json::to_value(source)?;
        let document: Self = reshape(value)?;
        debug!(
            title = %document.info.title,
            paths = document.paths.len(),
            "imported utoipa document"
        );
        Ok(document)
    }
}

impl TryFrom<utoipa::openapi::OpenApi> for v3::OpenApi {
    type Error = ConversionError;

    fn try_from(source: utoipa::openapi::OpenApi) -> Result<Self, Self::Error> {
        Self::try_from(&source)
    }
}
