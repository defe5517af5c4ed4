//! Swagger 2.0 document model.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    AdditionalProperties, ApiDocument, Contact, Dialect, Extensions, ExternalDocs, RefOr, Tag,
    Xml, is_false,
};

/// The only accepted `swagger` version string.
pub const VERSION: &str = "2.0";

/// Security scheme names mapped to required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Root of a Swagger 2.0 document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Swagger {
    /// Always `2.0`.
    pub swagger: String,
    /// API metadata.
    pub info: Info,
    /// Host, with an optional port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Base path, relative to the host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    /// Transfer protocols.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,
    /// Default request media types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    /// Default response media types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,
    /// Available paths and operations.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    /// Named schemas.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, RefOr<Schema>>,
    /// Named parameters.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, Parameter>,
    /// Named responses.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, Response>,
    /// Named security schemes.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub security_definitions: IndexMap<String, SecurityScheme>,
    /// Document-wide security requirements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,
    /// Tag declarations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    /// Additional documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Swagger {
    /// Creates an empty document.
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            swagger: VERSION.to_owned(),
            info: Info {
                title: title.into(),
                version: version.into(),
                ..Info::default()
            },
            ..Self::default()
        }
    }

    /// Iterates over every operation with its path template and method.
    pub fn operations(&self) -> impl Iterator<Item = (&str, &'static str, &Operation)> {
        self.paths.iter().flat_map(|(path, item)| {
            item.operations()
                .map(move |(method, operation)| (path.as_str(), method, operation))
        })
    }
}

impl ApiDocument for Swagger {
    const DIALECT: Dialect = Dialect::Swagger2;

    type Info = Info;

    fn version(&self) -> &str {
        &self.swagger
    }

    fn info(&self) -> &Info {
        &self.info
    }

    fn title(&self) -> &str {
        &self.info.title
    }

    fn api_version(&self) -> &str {
        &self.info.version
    }

    fn supports_version(version: &str) -> bool {
        version == VERSION
    }
}

/// API metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    /// API title.
    pub title: String,
    /// API description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Terms of service URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    /// Contact information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    /// License information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    /// API version.
    pub version: String,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// License information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct License {
    /// License name.
    pub name: String,
    /// License URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Operations available on one path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// External definition of this path item.
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub ref_location: Option<String>,
    /// `GET` operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// `PUT` operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// `POST` operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// `DELETE` operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// `OPTIONS` operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    /// `HEAD` operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    /// `PATCH` operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    /// Parameters shared by every operation of this path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<RefOr<Parameter>>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl PathItem {
    /// Iterates over the defined operations with their lowercase method name.
    pub fn operations(&self) -> impl Iterator<Item = (&'static str, &Operation)> {
        [
            ("get", self.get.as_ref()),
            ("put", self.put.as_ref()),
            ("post", self.post.as_ref()),
            ("delete", self.delete.as_ref()),
            ("options", self.options.as_ref()),
            ("head", self.head.as_ref()),
            ("patch", self.patch.as_ref()),
        ]
        .into_iter()
        .filter_map(|(method, operation)| operation.map(|operation| (method, operation)))
    }

    /// Removes every operation for which `keep` returns `false`.
    pub fn retain_operations(&mut self, mut keep: impl FnMut(&Operation) -> bool) {
        let slots = [
            &mut self.get,
            &mut self.put,
            &mut self.post,
            &mut self.delete,
            &mut self.options,
            &mut self.head,
            &mut self.patch,
        ];
        for slot in slots {
            if slot.as_ref().is_some_and(|operation| !keep(operation)) {
                *slot = None;
            }
        }
    }

    /// Returns `true` when no operation is defined.
    pub fn has_no_operation(&self) -> bool {
        self.operations().next().is_none()
    }
}

/// One API operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Grouping tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Short summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Additional documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
    /// Unique operation identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Request media types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    /// Response media types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,
    /// Operation parameters, including the body.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<RefOr<Parameter>>,
    /// Responses by status code or `default`.
    #[serde(default)]
    pub responses: IndexMap<String, RefOr<Response>>,
    /// Transfer protocols.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,
    /// Deprecation flag.
    #[serde(default, skip_serializing_if = "is_false")]
    pub deprecated: bool,
    /// Security requirements; an explicit empty list disables security.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Location of a parameter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
pub enum ParameterIn {
    /// Query string.
    #[default]
    #[serde(rename = "query")]
    #[display("query")]
    Query,
    /// Request header.
    #[serde(rename = "header")]
    #[display("header")]
    Header,
    /// Path segment.
    #[serde(rename = "path")]
    #[display("path")]
    Path,
    /// Form field.
    #[serde(rename = "formData")]
    #[display("formData")]
    FormData,
    /// Request body.
    #[serde(rename = "body")]
    #[display("body")]
    Body,
}

/// Array serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum CollectionFormat {
    /// Comma separated.
    #[display("csv")]
    Csv,
    /// Space separated.
    #[display("ssv")]
    Ssv,
    /// Tab separated.
    #[display("tsv")]
    Tsv,
    /// Pipe separated.
    #[display("pipes")]
    Pipes,
    /// Repeated parameter.
    #[display("multi")]
    Multi,
}

/// The primitive type description shared by non-body parameters, `items` and headers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleSchema {
    /// Primitive type name.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Format hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Array item description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SimpleSchema>>,
    /// Array serialization format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_format: Option<CollectionFormat>,
    /// Default value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Inclusive upper bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// Makes `maximum` exclusive.
    #[serde(default, skip_serializing_if = "is_false")]
    pub exclusive_maximum: bool,
    /// Inclusive lower bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Makes `minimum` exclusive.
    #[serde(default, skip_serializing_if = "is_false")]
    pub exclusive_minimum: bool,
    /// Maximum string length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// Minimum string length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// String pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Maximum array length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    /// Minimum array length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    /// Array items must be unique.
    #[serde(default, skip_serializing_if = "is_false")]
    pub unique_items: bool,
    /// Allowed values.
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    /// Numeric divisor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,
}

impl SimpleSchema {
    /// Creates a description of a single primitive type.
    pub fn of_type(name: &str) -> Self {
        Self {
            schema_type: Some(name.to_owned()),
            ..Self::default()
        }
    }
}

/// One operation parameter.
///
/// Body parameters carry a [`Schema`]; every other location is described by the flattened
/// [`SimpleSchema`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParameterIn,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Required flag.
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    /// Body schema, only for `in: body`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<RefOr<Schema>>,
    /// Allow sending the parameter with an empty value.
    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_empty_value: bool,
    /// Type description of non-body parameters.
    #[serde(flatten)]
    pub simple: SimpleSchema,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// One response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Description, required.
    #[serde(default)]
    pub description: String,
    /// Payload schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<RefOr<Schema>>,
    /// Response headers.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, Header>,
    /// Example payloads by media type.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, Value>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// A response header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Type description.
    #[serde(flatten)]
    pub simple: SimpleSchema,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// A JSON schema node, draft 4 flavour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Type name.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Format hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Object properties.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, RefOr<Schema>>,
    /// Required property names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Schema of properties not listed in `properties`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<AdditionalProperties<Schema>>,
    /// Array item schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<RefOr<Schema>>>,
    /// Must match all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<RefOr<Schema>>,
    /// Name of the property holding the concrete type name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    /// Allowed values.
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    /// Default value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Example value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// Numeric divisor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,
    /// Inclusive upper bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// Makes `maximum` exclusive.
    #[serde(default, skip_serializing_if = "is_false")]
    pub exclusive_maximum: bool,
    /// Inclusive lower bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Makes `minimum` exclusive.
    #[serde(default, skip_serializing_if = "is_false")]
    pub exclusive_minimum: bool,
    /// Maximum string length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// Minimum string length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// String pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Maximum array length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    /// Minimum array length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    /// Array items must be unique.
    #[serde(default, skip_serializing_if = "is_false")]
    pub unique_items: bool,
    /// Maximum number of properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_properties: Option<u64>,
    /// Minimum number of properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<u64>,
    /// Only sent in responses.
    #[serde(default, skip_serializing_if = "is_false")]
    pub read_only: bool,
    /// XML hints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml: Option<Xml>,
    /// Additional documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Schema {
    /// Creates a schema of a single type.
    pub fn of_type(name: &str) -> Self {
        Self {
            schema_type: Some(name.to_owned()),
            ..Self::default()
        }
    }

    /// Creates an array schema.
    pub fn array_of(items: impl Into<RefOr<Schema>>) -> Self {
        Self {
            items: Some(Box::new(items.into())),
            ..Self::of_type("array")
        }
    }

    /// Adds a property.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, schema: impl Into<RefOr<Schema>>) -> Self {
        self.properties.insert(name.into(), schema.into());
        self
    }
}

/// Kind of a security scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum SecuritySchemeType {
    /// HTTP basic authentication.
    #[serde(rename = "basic")]
    #[display("basic")]
    Basic,
    /// API key in a query or header.
    #[serde(rename = "apiKey")]
    #[display("apiKey")]
    ApiKey,
    /// OAuth 2.0.
    #[serde(rename = "oauth2")]
    #[display("oauth2")]
    Oauth2,
}

/// Location of an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    /// Query string.
    #[display("query")]
    Query,
    /// Request header.
    #[display("header")]
    Header,
}

/// The single OAuth 2.0 flow of a scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum OAuthFlowKind {
    /// Implicit grant.
    #[serde(rename = "implicit")]
    #[display("implicit")]
    Implicit,
    /// Resource owner password grant.
    #[serde(rename = "password")]
    #[display("password")]
    Password,
    /// Client credentials grant.
    #[serde(rename = "application")]
    #[display("application")]
    Application,
    /// Authorization code grant.
    #[serde(rename = "accessCode")]
    #[display("accessCode")]
    AccessCode,
}

/// A security scheme definition.
///
/// `scheme_type` is optional so that a scheme the converter could not map still
/// keeps its other fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScheme {
    /// Scheme kind.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub scheme_type: Option<SecuritySchemeType>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// API key name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// API key location.
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<ApiKeyLocation>,
    /// OAuth 2.0 flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<OAuthFlowKind>,
    /// Authorization endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,
    /// Token endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
    /// Available scopes with their description.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub scopes: IndexMap<String, String>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}
