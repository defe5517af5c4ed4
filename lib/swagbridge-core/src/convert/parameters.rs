//! Parameter and header mapping.
//!
//! Swagger 2.0 describes non-body parameters and headers with a flat primitive type
//! ([`SimpleSchema`]) where OpenAPI 3.x uses a full schema. References to component schemas
//! are resolved and inlined while flattening.

use std::collections::HashSet;

use serde_json::Value;

use super::Warnings;
use super::media;
use super::refs::{V3_HEADERS, V3_SCHEMAS, local_name, resolve, to_v2_ref, to_v3_ref};
use super::schema::{BoundStyle, X_DEPRECATED, X_NULLABLE, legacy_bound, legacy_type, richer_bound};
use crate::spec::v2::{CollectionFormat, SimpleSchema};
use crate::spec::v3::{ParameterStyle, SchemaType};
use crate::spec::{Extensions, RefOr, v2, v3};

const OBJECT: &str = "object";
const ARRAY: &str = "array";

/// Resolves a schema against the component schemas.
pub(crate) fn resolve_schema<'a>(
    schema: &'a RefOr<v3::Schema>,
    components: Option<&'a v3::Components>,
) -> Option<&'a v3::Schema> {
    resolve(schema, components.map(|components| &components.schemas), V3_SCHEMAS)
}

/// Flattens a schema into a primitive type description.
///
/// Also returns whether the schema was nullable.
pub(crate) fn to_simple_schema(
    schema: &RefOr<v3::Schema>,
    components: Option<&v3::Components>,
    warnings: &mut Warnings,
) -> (SimpleSchema, bool) {
    flatten(schema, components, &mut HashSet::new(), warnings)
}

/// `visiting` holds the component names on the current `items` chain.
fn flatten<'a>(
    schema: &'a RefOr<v3::Schema>,
    components: Option<&'a v3::Components>,
    visiting: &mut HashSet<&'a str>,
    warnings: &mut Warnings,
) -> (SimpleSchema, bool) {
    let name = schema
        .ref_location()
        .and_then(|reference| local_name(reference, V3_SCHEMAS));
    let Some(inline) = resolve_schema(schema, components) else {
        warnings.push(format!(
            "schema reference '{}' cannot be resolved: the type was dropped",
            schema.ref_location().unwrap_or_default()
        ));
        return (SimpleSchema::default(), false);
    };

    let (schema_type, nullable) = legacy_type(inline, warnings);
    if schema_type.as_deref() == Some(OBJECT) {
        warnings.push("object schemas are only supported on Swagger 2.0 body parameters");
    }
    let (maximum, exclusive_maximum) = legacy_bound(
        inline.maximum,
        inline.exclusive_maximum.as_ref(),
        |limit, bound| limit <= bound,
    );
    let (minimum, exclusive_minimum) = legacy_bound(
        inline.minimum,
        inline.exclusive_minimum.as_ref(),
        |limit, bound| limit >= bound,
    );
    if let Some(name) = name {
        visiting.insert(name);
    }
    let items = inline.items.as_deref().and_then(|items| {
        warnings.at("items", |warnings| {
            let recursive = items
                .ref_location()
                .and_then(|reference| local_name(reference, V3_SCHEMAS))
                .filter(|item_name| visiting.contains(item_name));
            if let Some(item_name) = recursive {
                warnings.push(format!(
                    "recursive schema '{item_name}' cannot be flattened: the items type was dropped"
                ));
                return None;
            }
            Some(Box::new(flatten(items, components, visiting, warnings).0))
        })
    });
    if let Some(name) = name {
        visiting.remove(name);
    }

    let simple = SimpleSchema {
        schema_type,
        format: inline.format.clone(),
        items,
        collection_format: None,
        default: inline.default.clone(),
        maximum,
        exclusive_maximum,
        minimum,
        exclusive_minimum,
        max_length: inline.max_length,
        min_length: inline.min_length,
        pattern: inline.pattern.clone(),
        max_items: inline.max_items,
        min_items: inline.min_items,
        unique_items: inline.unique_items,
        enum_values: inline.enum_values.clone(),
        multiple_of: inline.multiple_of,
    };
    (simple, nullable)
}

/// Expands a primitive type description into a schema.
pub(crate) fn simple_to_v3(simple: &SimpleSchema, bounds: BoundStyle) -> v3::Schema {
    let (schema_type, format) = match simple.schema_type.as_deref() {
        Some("file") => (Some(SchemaType::from("string")), Some("binary".to_owned())),
        other => (other.map(SchemaType::from), simple.format.clone()),
    };
    let (maximum, exclusive_maximum) = richer_bound(simple.maximum, simple.exclusive_maximum, bounds);
    let (minimum, exclusive_minimum) = richer_bound(simple.minimum, simple.exclusive_minimum, bounds);

    v3::Schema {
        schema_type,
        format,
        items: simple
            .items
            .as_deref()
            .map(|items| Box::new(RefOr::T(simple_to_v3(items, bounds)))),
        default: simple.default.clone(),
        maximum,
        exclusive_maximum,
        minimum,
        exclusive_minimum,
        max_length: simple.max_length,
        min_length: simple.min_length,
        pattern: simple.pattern.clone(),
        max_items: simple.max_items,
        min_items: simple.min_items,
        unique_items: simple.unique_items,
        enum_values: simple.enum_values.clone(),
        multiple_of: simple.multiple_of,
        ..v3::Schema::default()
    }
}

pub(crate) fn parameter_to_v2(
    parameter: &RefOr<v3::Parameter>,
    components: Option<&v3::Components>,
    warnings: &mut Warnings,
) -> Option<RefOr<v2::Parameter>> {
    match parameter {
        RefOr::Ref(reference) => Some(RefOr::reference(to_v2_ref(&reference.ref_location))),
        RefOr::T(parameter) => inline_parameter_to_v2(parameter, components, warnings).map(RefOr::T),
    }
}

/// Converts one inline parameter; cookie parameters have no Swagger 2.0 location and yield
/// `None`.
pub(crate) fn inline_parameter_to_v2(
    parameter: &v3::Parameter,
    components: Option<&v3::Components>,
    warnings: &mut Warnings,
) -> Option<v2::Parameter> {
    let location = match parameter.location {
        v3::ParameterIn::Query => v2::ParameterIn::Query,
        v3::ParameterIn::Header => v2::ParameterIn::Header,
        v3::ParameterIn::Path => v2::ParameterIn::Path,
        v3::ParameterIn::Cookie => {
            warnings.push(format!(
                "cookie parameter '{}' is not supported in Swagger 2.0 and was dropped",
                parameter.name
            ));
            return None;
        }
    };

    let schema = parameter.schema.as_ref().or_else(|| {
        let (media_type, media) = media::select(&parameter.content)?;
        warnings.push(format!(
            "parameter '{}' uses content: only the '{media_type}' schema is converted",
            parameter.name
        ));
        media.schema.as_ref()
    });
    let (mut simple, nullable) = schema
        .map(|schema| {
            warnings.at("schema", |warnings| to_simple_schema(schema, components, warnings))
        })
        .unwrap_or_default();
    if simple.schema_type.as_deref() == Some(ARRAY) {
        simple.collection_format = collection_format(parameter, warnings);
    }
    if parameter.example.is_some() || !parameter.examples.is_empty() {
        warnings.push(format!(
            "examples of parameter '{}' are not supported in Swagger 2.0 and were dropped",
            parameter.name
        ));
    }

    let mut extensions = parameter.extensions.clone();
    if nullable {
        extensions.insert(X_NULLABLE.to_owned(), Value::Bool(true));
    }
    if parameter.deprecated {
        extensions.insert(X_DEPRECATED.to_owned(), Value::Bool(true));
    }

    Some(v2::Parameter {
        name: parameter.name.clone(),
        location,
        description: parameter.description.clone(),
        required: parameter.required || location == v2::ParameterIn::Path,
        schema: None,
        allow_empty_value: parameter.allow_empty_value,
        simple,
        extensions,
    })
}

/// `csv` is the Swagger 2.0 default and is left implicit.
fn collection_format(parameter: &v3::Parameter, warnings: &mut Warnings) -> Option<CollectionFormat> {
    let style = parameter.style.unwrap_or(match parameter.location {
        v3::ParameterIn::Query | v3::ParameterIn::Cookie => ParameterStyle::Form,
        v3::ParameterIn::Path | v3::ParameterIn::Header => ParameterStyle::Simple,
    });
    let explode = parameter.explode.unwrap_or(style == ParameterStyle::Form);

    match style {
        ParameterStyle::Form if explode => Some(CollectionFormat::Multi),
        ParameterStyle::Form | ParameterStyle::Simple => None,
        ParameterStyle::SpaceDelimited => Some(CollectionFormat::Ssv),
        ParameterStyle::PipeDelimited => Some(CollectionFormat::Pipes),
        ParameterStyle::Matrix | ParameterStyle::Label | ParameterStyle::DeepObject => {
            warnings.push(format!(
                "style '{style}' of parameter '{}' is not supported in Swagger 2.0",
                parameter.name
            ));
            None
        }
    }
}

pub(crate) fn parameter_to_v3(
    parameter: &RefOr<v2::Parameter>,
    bounds: BoundStyle,
    warnings: &mut Warnings,
) -> Option<RefOr<v3::Parameter>> {
    match parameter {
        RefOr::Ref(reference) => Some(RefOr::reference(to_v3_ref(&reference.ref_location))),
        RefOr::T(parameter) => inline_parameter_to_v3(parameter, bounds, warnings).map(RefOr::T),
    }
}

/// Converts one non-body parameter; `body` and `formData` parameters yield `None`.
pub(crate) fn inline_parameter_to_v3(
    parameter: &v2::Parameter,
    bounds: BoundStyle,
    warnings: &mut Warnings,
) -> Option<v3::Parameter> {
    let location = match parameter.location {
        v2::ParameterIn::Query => v3::ParameterIn::Query,
        v2::ParameterIn::Header => v3::ParameterIn::Header,
        v2::ParameterIn::Path => v3::ParameterIn::Path,
        v2::ParameterIn::FormData | v2::ParameterIn::Body => return None,
    };
    let mut extensions = parameter.extensions.clone();
    let deprecated = extensions.take_flag(X_DEPRECATED);
    let (style, explode) = if parameter.simple.schema_type.as_deref() == Some(ARRAY) {
        parameter_style(parameter, location, warnings)
    } else {
        (None, None)
    };

    Some(v3::Parameter {
        name: parameter.name.clone(),
        location,
        description: parameter.description.clone(),
        required: parameter.required,
        deprecated,
        allow_empty_value: parameter.allow_empty_value,
        style,
        explode,
        schema: Some(RefOr::T(simple_to_v3(&parameter.simple, bounds))),
        extensions,
        ..v3::Parameter::default()
    })
}

fn parameter_style(
    parameter: &v2::Parameter,
    location: v3::ParameterIn,
    warnings: &mut Warnings,
) -> (Option<ParameterStyle>, Option<bool>) {
    let format = parameter.simple.collection_format.unwrap_or(CollectionFormat::Csv);
    match (format, location) {
        (CollectionFormat::Csv, v3::ParameterIn::Query) => (Some(ParameterStyle::Form), Some(false)),
        (CollectionFormat::Multi, v3::ParameterIn::Query) => (Some(ParameterStyle::Form), Some(true)),
        (CollectionFormat::Csv, _) => (None, None),
        (CollectionFormat::Ssv, _) => (Some(ParameterStyle::SpaceDelimited), None),
        (CollectionFormat::Pipes, _) => (Some(ParameterStyle::PipeDelimited), None),
        (CollectionFormat::Multi | CollectionFormat::Tsv, _) => {
            warnings.push(format!(
                "collectionFormat '{format}' of {location} parameter '{}' has no OpenAPI 3.x equivalent",
                parameter.name
            ));
            (None, None)
        }
    }
}

/// Converts a header, resolving references to component headers.
pub(crate) fn header_to_v2(
    header: &RefOr<v3::Header>,
    components: Option<&v3::Components>,
    warnings: &mut Warnings,
) -> Option<v2::Header> {
    let Some(header) = resolve(
        header,
        components.map(|components| &components.headers),
        V3_HEADERS,
    ) else {
        warnings.push(format!(
            "header reference '{}' cannot be resolved and was dropped",
            header.ref_location().unwrap_or_default()
        ));
        return None;
    };

    let (simple, nullable) = header
        .schema
        .as_ref()
        .map(|schema| {
            warnings.at("schema", |warnings| to_simple_schema(schema, components, warnings))
        })
        .unwrap_or_default();
    let mut extensions = header.extensions.clone();
    if nullable {
        extensions.insert(X_NULLABLE.to_owned(), Value::Bool(true));
    }
    if header.deprecated {
        extensions.insert(X_DEPRECATED.to_owned(), Value::Bool(true));
    }

    Some(v2::Header {
        description: header.description.clone(),
        simple,
        extensions,
    })
}

pub(crate) fn header_to_v3(header: &v2::Header, bounds: BoundStyle) -> v3::Header {
    let mut extensions = header.extensions.clone();
    let deprecated = extensions.take_flag(X_DEPRECATED);
    v3::Header {
        description: header.description.clone(),
        deprecated,
        schema: Some(RefOr::T(simple_to_v3(&header.simple, bounds))),
        extensions,
        ..v3::Header::default()
    }
}

/// Splits an object schema into `formData` parameters, one per property.
///
/// Returns `None` when the schema is not an object with properties.
pub(crate) fn form_parameters(
    schema: &RefOr<v3::Schema>,
    components: Option<&v3::Components>,
    warnings: &mut Warnings,
) -> Option<Vec<v2::Parameter>> {
    let object = resolve_schema(schema, components).filter(|object| !object.properties.is_empty())?;

    let parameters = object
        .properties
        .iter()
        .map(|(name, property)| {
            let (mut simple, nullable) = warnings.at("properties", |warnings| {
                warnings.at(name, |warnings| to_simple_schema(property, components, warnings))
            });
            if simple.schema_type.as_deref() == Some("string") && simple.format.as_deref() == Some("binary") {
                simple.schema_type = Some("file".to_owned());
                simple.format = None;
            }
            let mut extensions = Extensions::default();
            if nullable {
                extensions.insert(X_NULLABLE.to_owned(), Value::Bool(true));
            }
            v2::Parameter {
                name: name.clone(),
                location: v2::ParameterIn::FormData,
                description: resolve_schema(property, components)
                    .and_then(|property| property.description.clone()),
                required: object.required.contains(name),
                simple,
                extensions,
                ..v2::Parameter::default()
            }
        })
        .collect();
    Some(parameters)
}

/// Gathers `formData` parameters into one object schema.
pub(crate) fn form_schema(parameters: &[&v2::Parameter], bounds: BoundStyle) -> v3::Schema {
    let mut schema = v3::Schema::of_type(OBJECT);
    for parameter in parameters {
        let mut property = simple_to_v3(&parameter.simple, bounds);
        property.description.clone_from(&parameter.description);
        schema
            .properties
            .insert(parameter.name.clone(), RefOr::T(property));
        if parameter.required {
            schema.required.push(parameter.name.clone());
        }
    }
    schema
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn components() -> v3::Components {
        serde_json::from_value(json!({
            "schemas": {
                "Limit": { "type": "integer", "minimum": 0, "maximum": 100 },
                "Status": { "type": "string", "enum": ["available", "sold"] },
                "Tree": { "type": "array", "items": { "$ref": "#/components/schemas/Tree" } }
            },
            "headers": {
                "RateLimit": { "schema": { "type": "integer" }, "description": "Remaining calls" }
            }
        }))
        .expect("valid components")
    }

    fn v3_parameter(value: Value) -> RefOr<v3::Parameter> {
        serde_json::from_value(value).expect("valid 3.x parameter")
    }

    fn to_v2(value: Value) -> (Option<Value>, Warnings) {
        let mut warnings = Warnings::new();
        let components = components();
        let parameter = parameter_to_v2(&v3_parameter(value), Some(&components), &mut warnings);
        let value = parameter.map(|parameter| serde_json::to_value(parameter).expect("serializable"));
        (value, warnings)
    }

    fn to_v3(value: Value) -> (Option<Value>, Warnings) {
        let mut warnings = Warnings::new();
        let parameter: RefOr<v2::Parameter> = serde_json::from_value(value).expect("valid 2.0 parameter");
        let parameter = parameter_to_v3(&parameter, BoundStyle::Value, &mut warnings);
        let value = parameter.map(|parameter| serde_json::to_value(parameter).expect("serializable"));
        (value, warnings)
    }

    #[test]
    fn should_flatten_referenced_schema() {
        let (parameter, warnings) = to_v2(json!({
            "name": "limit",
            "in": "query",
            "schema": { "$ref": "#/components/schemas/Limit" }
        }));

        assert!(warnings.is_empty());
        assert_eq!(
            parameter,
            Some(json!({
                "name": "limit",
                "in": "query",
                "type": "integer",
                "maximum": 100.0,
                "minimum": 0.0
            }))
        );
    }

    #[test]
    fn should_warn_on_unresolvable_schema() {
        let (parameter, warnings) = to_v2(json!({
            "name": "status",
            "in": "query",
            "schema": { "$ref": "#/components/schemas/Missing" }
        }));

        assert_eq!(parameter, Some(json!({ "name": "status", "in": "query" })));
        assert_eq!(
            warnings.iter().next().map(ToString::to_string).as_deref(),
            Some("/schema: schema reference '#/components/schemas/Missing' cannot be resolved: the type was dropped")
        );
    }

    #[test]
    fn should_stop_flattening_recursive_items() {
        let (parameter, warnings) = to_v2(json!({
            "name": "tree",
            "in": "query",
            "schema": { "$ref": "#/components/schemas/Tree" }
        }));

        let parameter = parameter.expect("query parameters are kept");
        assert_eq!(parameter["type"], "array");
        assert!(parameter.get("items").is_none());
        assert_eq!(
            warnings.iter().map(ToString::to_string).collect::<Vec<_>>(),
            ["/schema/items: recursive schema 'Tree' cannot be flattened: the items type was dropped"]
        );
    }

    #[test]
    fn should_drop_cookie_parameters() {
        let (parameter, warnings) = to_v2(json!({
            "name": "session",
            "in": "cookie",
            "schema": { "type": "string" }
        }));

        assert!(parameter.is_none());
        assert_eq!(
            warnings.messages(),
            ["cookie parameter 'session' is not supported in Swagger 2.0 and was dropped"]
        );
    }

    #[test]
    fn should_relocate_deprecated_and_nullable() {
        let (parameter, _) = to_v2(json!({
            "name": "q",
            "in": "query",
            "deprecated": true,
            "schema": { "type": ["string", "null"] }
        }));
        let parameter = parameter.expect("converted");

        assert_eq!(parameter["x-deprecated"], json!(true));
        assert_eq!(parameter["x-nullable"], json!(true));
        assert_eq!(parameter["type"], "string");
    }

    #[test]
    fn should_force_path_parameters_required() {
        let (parameter, _) = to_v2(json!({ "name": "id", "in": "path", "schema": { "type": "string" } }));

        assert_eq!(parameter.expect("converted")["required"], json!(true));
    }

    #[test]
    fn should_map_array_styles() {
        let exploded = to_v2(json!({
            "name": "tags", "in": "query",
            "schema": { "type": "array", "items": { "type": "string" } }
        }))
        .0
        .expect("converted");
        let piped = to_v2(json!({
            "name": "tags", "in": "query", "style": "pipeDelimited",
            "schema": { "type": "array", "items": { "type": "string" } }
        }))
        .0
        .expect("converted");
        let (deep, warnings) = to_v2(json!({
            "name": "filter", "in": "query", "style": "deepObject",
            "schema": { "type": "array", "items": { "type": "string" } }
        }));

        assert_eq!(exploded["collectionFormat"], "multi");
        assert_eq!(exploded["items"], json!({ "type": "string" }));
        assert_eq!(piped["collectionFormat"], "pipes");
        assert!(deep.expect("converted").get("collectionFormat").is_none());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn should_use_content_schema() {
        let (parameter, warnings) = to_v2(json!({
            "name": "filter",
            "in": "query",
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Status" } } }
        }));

        assert_eq!(parameter.expect("converted")["enum"], json!(["available", "sold"]));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn should_rewrite_parameter_reference() {
        let (parameter, _) = to_v2(json!({ "$ref": "#/components/parameters/limit" }));

        assert_eq!(parameter, Some(json!({ "$ref": "#/parameters/limit" })));
    }

    #[test]
    fn should_expand_simple_parameter() {
        let (parameter, warnings) = to_v3(json!({
            "name": "ids",
            "in": "query",
            "required": true,
            "type": "array",
            "items": { "type": "integer", "format": "int64" },
            "x-deprecated": true
        }));

        assert!(warnings.is_empty());
        assert_eq!(
            parameter,
            Some(json!({
                "name": "ids",
                "in": "query",
                "required": true,
                "deprecated": true,
                "style": "form",
                "explode": false,
                "schema": { "type": "array", "items": { "type": "integer", "format": "int64" } }
            }))
        );
    }

    #[test]
    fn should_warn_on_tsv() {
        let (parameter, warnings) = to_v3(json!({
            "name": "ids",
            "in": "header",
            "type": "array",
            "items": { "type": "string" },
            "collectionFormat": "tsv"
        }));

        assert!(parameter.expect("converted").get("style").is_none());
        assert_eq!(
            warnings.messages(),
            ["collectionFormat 'tsv' of header parameter 'ids' has no OpenAPI 3.x equivalent"]
        );
    }

    #[test]
    fn should_skip_body_and_form_parameters() {
        assert!(to_v3(json!({ "name": "body", "in": "body", "schema": {} })).0.is_none());
        assert!(to_v3(json!({ "name": "file", "in": "formData", "type": "file" })).0.is_none());
    }

    #[test]
    fn should_resolve_header_reference() {
        let mut warnings = Warnings::new();
        let components = components();
        let header = RefOr::reference("#/components/headers/RateLimit");

        let header = header_to_v2(&header, Some(&components), &mut warnings).expect("resolved");

        assert_eq!(header.description.as_deref(), Some("Remaining calls"));
        assert_eq!(header.simple.schema_type.as_deref(), Some("integer"));
    }

    #[test]
    fn should_split_form_object() {
        let mut warnings = Warnings::new();
        let schema: RefOr<v3::Schema> = serde_json::from_value(json!({
            "type": "object",
            "required": ["file"],
            "properties": {
                "file": { "type": "string", "format": "binary" },
                "comment": { "type": "string", "description": "Free text" }
            }
        }))
        .expect("valid schema");

        let parameters = form_parameters(&schema, None, &mut warnings).expect("object schema");

        assert_eq!(parameters.len(), 2);
        let file = parameters.first().expect("file parameter");
        assert_eq!(file.location, v2::ParameterIn::FormData);
        assert_eq!(file.simple.schema_type.as_deref(), Some("file"));
        assert!(file.required);
        let comment = parameters.get(1).expect("comment parameter");
        assert_eq!(comment.description.as_deref(), Some("Free text"));
        assert!(!comment.required);
    }

    #[test]
    fn should_gather_form_parameters() {
        let file = v2::Parameter {
            name: "file".to_owned(),
            location: v2::ParameterIn::FormData,
            required: true,
            simple: SimpleSchema::of_type("file"),
            ..v2::Parameter::default()
        };

        let schema = form_schema(&[&file], BoundStyle::Value);

        assert_eq!(
            serde_json::to_value(schema).expect("serializable"),
            json!({
                "type": "object",
                "properties": { "file": { "type": "string", "format": "binary" } },
                "required": ["file"]
            })
        );
    }
}
