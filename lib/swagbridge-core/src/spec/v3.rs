//! OpenAPI 3.x document model.
//!
//! Covers 3.0 and 3.1 documents plus the few 3.2 additions the converter needs to report
//! (`query` operations, device authorization flows, `oauth2MetadataUrl`, deprecated security
//! schemes).

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    AdditionalProperties, ApiDocument, Contact, Dialect, Extensions, ExternalDocs, RefOr, Tag,
    Xml, is_false,
};

/// Default OpenAPI version written by the converter.
pub const DEFAULT_VERSION: &str = "3.1.0";

/// Path templates mapped to their path items.
pub type Paths = IndexMap<String, PathItem>;

/// Security scheme names mapped to required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Root of an OpenAPI 3.x document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenApi {
    /// The OpenAPI version, e.g. `3.1.0`.
    pub openapi: String,
    /// API metadata.
    pub info: Info,
    /// Default `$schema` for schema objects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_schema_dialect: Option<String>,
    /// Target servers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    /// Available paths and operations.
    #[serde(default)]
    pub paths: Paths,
    /// Incoming webhooks.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub webhooks: IndexMap<String, PathItem>,
    /// Reusable components.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
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

impl OpenApi {
    /// Creates an empty document with the [`DEFAULT_VERSION`].
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            openapi: DEFAULT_VERSION.to_owned(),
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

impl ApiDocument for OpenApi {
    const DIALECT: Dialect = Dialect::OpenApi3;

    type Info = Info;

    fn version(&self) -> &str {
        &self.openapi
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
        version.starts_with("3.")
    }
}

/// API metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    /// API title.
    pub title: String,
    /// Short summary (3.1+).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
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
    /// SPDX identifier (3.1+).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// License URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// A target server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Server {
    /// Server URL, possibly templated with `{variables}`.
    pub url: String,
    /// Server description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Template variables.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub variables: IndexMap<String, ServerVariable>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Server {
    /// Creates a server with only an URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// A server URL template variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerVariable {
    /// Allowed values.
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    /// Default value.
    pub default: String,
    /// Variable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Operations available on one path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// External definition of this path item.
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub ref_location: Option<String>,
    /// Short summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
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
    /// `TRACE` operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,
    /// `QUERY` operation (3.2).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Operation>,
    /// Alternative servers for this path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
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
            ("trace", self.trace.as_ref()),
            ("query", self.query.as_ref()),
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
            &mut self.trace,
            &mut self.query,
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
    /// Operation parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<RefOr<Parameter>>,
    /// Request body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RefOr<RequestBody>>,
    /// Responses by status code or `default`.
    #[serde(default)]
    pub responses: IndexMap<String, RefOr<Response>>,
    /// Out-of-band callbacks, kept opaque.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub callbacks: IndexMap<String, Value>,
    /// Deprecation flag.
    #[serde(default, skip_serializing_if = "is_false")]
    pub deprecated: bool,
    /// Security requirements; an explicit empty list disables security.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
    /// Alternative servers for this operation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Location of a parameter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ParameterIn {
    /// Query string.
    #[default]
    #[display("query")]
    Query,
    /// Request header.
    #[display("header")]
    Header,
    /// Path segment.
    #[display("path")]
    Path,
    /// Cookie.
    #[display("cookie")]
    Cookie,
}

/// Serialization style of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "camelCase")]
pub enum ParameterStyle {
    /// `;name=value`.
    #[display("matrix")]
    Matrix,
    /// `.value`.
    #[display("label")]
    Label,
    /// `name=value&name=value`.
    #[display("form")]
    Form,
    /// `value,value`.
    #[display("simple")]
    Simple,
    /// Space separated values.
    #[display("spaceDelimited")]
    SpaceDelimited,
    /// Pipe separated values.
    #[display("pipeDelimited")]
    PipeDelimited,
    /// Nested object notation.
    #[display("deepObject")]
    DeepObject,
}

/// One operation parameter.
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
    /// Required flag, always `true` for path parameters.
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    /// Deprecation flag.
    #[serde(default, skip_serializing_if = "is_false")]
    pub deprecated: bool,
    /// Allow sending the parameter with an empty value.
    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_empty_value: bool,
    /// Serialization style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ParameterStyle>,
    /// Explode arrays and objects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,
    /// Allow reserved characters.
    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_reserved: bool,
    /// Value schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<RefOr<Schema>>,
    /// Example value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// Named examples.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, RefOr<Example>>,
    /// Media-type based representation, exclusive with `schema`.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// A request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Media types mapped to their representation.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
    /// Required flag.
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// One media-type representation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaType {
    /// Payload schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<RefOr<Schema>>,
    /// Example payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// Named examples.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, RefOr<Example>>,
    /// Multipart/form encodings, kept opaque.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub encoding: IndexMap<String, Value>,
    /// Streaming item schema (3.2), kept opaque.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_schema: Option<Value>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl MediaType {
    /// Creates a media type carrying only a schema.
    pub fn with_schema(schema: impl Into<RefOr<Schema>>) -> Self {
        Self {
            schema: Some(schema.into()),
            ..Self::default()
        }
    }

    /// The direct example, else the first named example carrying an inline value.
    pub fn representative_example(&self) -> Option<&Value> {
        self.example.as_ref().or_else(|| {
            self.examples
                .values()
                .filter_map(RefOr::as_inline)
                .find_map(|example| example.value.as_ref())
        })
    }
}

/// One response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Description, required.
    #[serde(default)]
    pub description: String,
    /// Response headers.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, RefOr<Header>>,
    /// Media types mapped to their representation.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
    /// Links, kept opaque.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub links: IndexMap<String, Value>,
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
    /// Required flag.
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    /// Deprecation flag.
    #[serde(default, skip_serializing_if = "is_false")]
    pub deprecated: bool,
    /// Value schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<RefOr<Schema>>,
    /// Example value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// A named example.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    /// Short summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Inline value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// URL of an external value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_value: Option<String>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// The `type` keyword: one type name or a set of type names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    /// A single type, e.g. `"string"`.
    Single(String),
    /// A type set, e.g. `["string", "null"]`.
    Multiple(Vec<String>),
}

impl SchemaType {
    /// The type name marking a nullable schema.
    pub const NULL: &'static str = "null";

    /// All type names of this keyword.
    pub fn names(&self) -> &[String] {
        match self {
            Self::Single(name) => std::slice::from_ref(name),
            Self::Multiple(names) => names,
        }
    }

    /// Returns `true` when the set contains `"null"`.
    pub fn is_nullable(&self) -> bool {
        self.names().iter().any(|name| name == Self::NULL)
    }

    /// Type names other than `"null"`, in declaration order.
    pub fn non_null(&self) -> impl Iterator<Item = &str> {
        self.names()
            .iter()
            .map(String::as_str)
            .filter(|name| *name != Self::NULL)
    }
}

impl From<&str> for SchemaType {
    fn from(name: &str) -> Self {
        Self::Single(name.to_owned())
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(name) => write!(formatter, "{name}"),
            Self::Multiple(names) => write!(formatter, "[{}]", names.join(", ")),
        }
    }
}

/// An exclusive bound: boolean in draft 4 (3.0), numeric in 2020-12 (3.1+).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExclusiveBound {
    /// Makes `maximum`/`minimum` exclusive.
    Flag(bool),
    /// The exclusive limit itself.
    Value(f64),
}

/// A JSON schema node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Type name or type set.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    /// Format hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// 3.0 nullability keyword.
    #[serde(default, skip_serializing_if = "is_false")]
    pub nullable: bool,
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
    /// Tuple item schemas.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prefix_items: Vec<RefOr<Schema>>,
    /// Must match all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<RefOr<Schema>>,
    /// Must match exactly one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<RefOr<Schema>>,
    /// Must match at least one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<RefOr<Schema>>,
    /// Must not match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<RefOr<Schema>>>,
    /// Polymorphism discriminator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Discriminator>,
    /// Allowed values.
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    /// Single allowed value.
    #[serde(rename = "const", skip_serializing_if = "Option::is_none")]
    pub const_value: Option<Value>,
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
    /// Exclusive upper bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<ExclusiveBound>,
    /// Inclusive lower bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Exclusive lower bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<ExclusiveBound>,
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
    /// Only sent in requests.
    #[serde(default, skip_serializing_if = "is_false")]
    pub write_only: bool,
    /// Deprecation flag.
    #[serde(default, skip_serializing_if = "is_false")]
    pub deprecated: bool,
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
            schema_type: Some(SchemaType::from(name)),
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

/// Polymorphism discriminator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discriminator {
    /// Property holding the concrete type name.
    pub property_name: String,
    /// Property values mapped to schema references.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub mapping: IndexMap<String, String>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Reusable components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    /// Named schemas.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, RefOr<Schema>>,
    /// Named responses.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, RefOr<Response>>,
    /// Named parameters.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, RefOr<Parameter>>,
    /// Named examples.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, RefOr<Example>>,
    /// Named request bodies.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub request_bodies: IndexMap<String, RefOr<RequestBody>>,
    /// Named headers.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, RefOr<Header>>,
    /// Named security schemes.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub security_schemes: IndexMap<String, RefOr<SecurityScheme>>,
    /// Named links, kept opaque.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub links: IndexMap<String, Value>,
    /// Named callbacks, kept opaque.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub callbacks: IndexMap<String, Value>,
    /// Named path items (3.1+).
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub path_items: IndexMap<String, PathItem>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Kind of a security scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display)]
pub enum SecuritySchemeType {
    /// API key in a query, header or cookie.
    #[default]
    #[serde(rename = "apiKey")]
    #[display("apiKey")]
    ApiKey,
    /// HTTP authentication (basic, bearer, ...).
    #[serde(rename = "http")]
    #[display("http")]
    Http,
    /// OAuth 2.0.
    #[serde(rename = "oauth2")]
    #[display("oauth2")]
    Oauth2,
    /// OpenID Connect discovery.
    #[serde(rename = "openIdConnect")]
    #[display("openIdConnect")]
    OpenIdConnect,
    /// Mutual TLS.
    #[serde(rename = "mutualTLS")]
    #[display("mutualTLS")]
    MutualTls,
    /// Any other kind, kept verbatim.
    #[serde(untagged)]
    #[display("{_0}")]
    Other(String),
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
    /// Cookie.
    #[display("cookie")]
    Cookie,
}

/// A security scheme definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScheme {
    /// Scheme kind.
    #[serde(rename = "type")]
    pub scheme_type: SecuritySchemeType,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// API key name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// API key location.
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<ApiKeyLocation>,
    /// HTTP authorization scheme, e.g. `basic` or `bearer`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// Bearer token format hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_format: Option<String>,
    /// OAuth 2.0 flows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flows: Option<OAuthFlows>,
    /// OpenID Connect discovery URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_id_connect_url: Option<String>,
    /// OAuth 2.0 authorization server metadata URL (3.2).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth2_metadata_url: Option<String>,
    /// Deprecation flag (3.2).
    #[serde(default, skip_serializing_if = "is_false")]
    pub deprecated: bool,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// OAuth 2.0 flows of a security scheme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlows {
    /// Implicit flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit: Option<OAuthFlow>,
    /// Resource owner password flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<OAuthFlow>,
    /// Client credentials flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_credentials: Option<OAuthFlow>,
    /// Authorization code flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<OAuthFlow>,
    /// Device authorization flow (3.2).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_authorization: Option<OAuthFlow>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl OAuthFlows {
    /// Number of defined flows.
    pub fn count(&self) -> usize {
        [
            &self.implicit,
            &self.password,
            &self.client_credentials,
            &self.authorization_code,
            &self.device_authorization,
        ]
        .into_iter()
        .filter(|flow| flow.is_some())
        .count()
    }
}

/// One OAuth 2.0 flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlow {
    /// Authorization endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,
    /// Device authorization endpoint (3.2).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_authorization_url: Option<String>,
    /// Token endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
    /// Refresh endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,
    /// Available scopes with their description.
    #[serde(default)]
    pub scopes: IndexMap<String, String>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: Extensions,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn should_parse_type_sets() {
        let schema: Schema = serde_json::from_value(json!({
            "type": ["string", "null"],
            "maxLength": 0
        }))
        .expect("valid schema");

        let schema_type = schema.schema_type.expect("type is set");
        assert!(schema_type.is_nullable());
        assert_eq!(schema_type.non_null().collect::<Vec<_>>(), ["string"]);
        assert_eq!(schema.max_length, Some(0));
    }

    #[test]
    fn should_parse_both_exclusive_bound_encodings() {
        let draft4: Schema =
            serde_json::from_value(json!({ "maximum": 10, "exclusiveMaximum": true }))
                .expect("valid schema");
        let draft2020: Schema =
            serde_json::from_value(json!({ "exclusiveMaximum": 10 })).expect("valid schema");

        assert_eq!(draft4.exclusive_maximum, Some(ExclusiveBound::Flag(true)));
        assert_eq!(draft2020.exclusive_maximum, Some(ExclusiveBound::Value(10.0)));
    }

    #[test]
    fn should_iterate_operations_in_method_order() {
        let item = PathItem {
            post: Some(Operation::default()),
            get: Some(Operation::default()),
            query: Some(Operation::default()),
            ..PathItem::default()
        };

        let methods = item.operations().map(|(method, _)| method).collect::<Vec<_>>();

        assert_eq!(methods, ["get", "post", "query"]);
    }

    #[test]
    fn should_retain_operations() {
        let mut item = PathItem {
            get: Some(Operation {
                operation_id: Some("keep".to_owned()),
                ..Operation::default()
            }),
            delete: Some(Operation::default()),
            ..PathItem::default()
        };

        item.retain_operations(|operation| operation.operation_id.is_some());

        assert!(item.get.is_some());
        assert!(item.delete.is_none());
        assert!(!item.has_no_operation());
    }

    #[test]
    fn should_keep_explicit_empty_security() {
        let operation: Operation =
            serde_json::from_value(json!({ "security": [], "responses": {} })).expect("valid");

        assert_eq!(operation.security, Some(vec![]));
        let value = serde_json::to_value(&operation).expect("serializable");
        assert_eq!(value["security"], json!([]));
    }

    #[test]
    fn should_pick_representative_example() {
        let media: MediaType = serde_json::from_value(json!({
            "examples": {
                "external": { "externalValue": "https://example.com/pet.json" },
                "inline": { "value": { "name": "Rex" } }
            }
        }))
        .expect("valid media type");

        assert_eq!(media.representative_example(), Some(&json!({ "name": "Rex" })));
    }

    #[test]
    fn should_parse_security_scheme_kinds() {
        let scheme: SecurityScheme =
            serde_json::from_value(json!({ "type": "mutualTLS" })).expect("valid scheme");

        assert_eq!(scheme.scheme_type, SecuritySchemeType::MutualTls);
        assert_eq!(scheme.scheme_type.to_string(), "mutualTLS");
    }

    #[test]
    fn should_keep_documents_with_custom_security_kinds() {
        let document: OpenApi = serde_json::from_value(json!({
            "openapi": "3.1.0",
            "info": { "title": "Signed", "version": "1.0.0" },
            "paths": {},
            "components": { "securitySchemes": { "signature": { "type": "custom" } } }
        }))
        .expect("valid document");

        let scheme = document
            .components
            .as_ref()
            .and_then(|components| components.security_schemes["signature"].as_inline())
            .expect("inline scheme");
        assert_eq!(scheme.scheme_type, SecuritySchemeType::Other("custom".to_owned()));
        assert_eq!(serde_json::to_value(scheme).expect("serializable"), json!({ "type": "custom" }));
    }
}
