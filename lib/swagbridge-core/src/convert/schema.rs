//! Recursive schema mapping between both dialects.

use serde_json::Value;

use super::Warnings;
use super::refs::{to_v2_ref, to_v3_ref};
use crate::spec::v3::{Discriminator, ExclusiveBound, SchemaType};
use crate::spec::{AdditionalProperties, RefOr, v2, v3};

pub(crate) const X_NULLABLE: &str = "x-nullable";
pub(crate) const X_DEPRECATED: &str = "x-deprecated";

/// How exclusive bounds are written in the OpenAPI 3.x output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BoundStyle {
    /// `exclusiveMaximum: true` next to `maximum` (3.0).
    Flag,
    /// `exclusiveMaximum: <limit>` alone (3.1+).
    Value,
}

impl BoundStyle {
    pub(crate) fn for_version(version: &str) -> Self {
        if version.starts_with("3.0") {
            Self::Flag
        } else {
            Self::Value
        }
    }
}

pub(crate) fn schema_to_v2(schema: &RefOr<v3::Schema>, warnings: &mut Warnings) -> RefOr<v2::Schema> {
    match schema {
        RefOr::Ref(reference) => RefOr::reference(to_v2_ref(&reference.ref_location)),
        RefOr::T(schema) => RefOr::T(inline_schema_to_v2(schema, warnings)),
    }
}

fn inline_schema_to_v2(schema: &v3::Schema, warnings: &mut Warnings) -> v2::Schema {
    warn_unsupported(schema, warnings);

    let mut extensions = schema.extensions.clone();
    let (schema_type, nullable) = legacy_type(schema, warnings);
    if nullable {
        extensions.insert(X_NULLABLE.to_owned(), Value::Bool(true));
    }
    if schema.deprecated {
        extensions.insert(X_DEPRECATED.to_owned(), Value::Bool(true));
    }

    let discriminator = schema.discriminator.as_ref().map(|discriminator| {
        if !discriminator.mapping.is_empty() {
            warnings.push("discriminator mapping is not supported in Swagger 2.0 and was dropped");
        }
        discriminator.property_name.clone()
    });

    let (maximum, exclusive_maximum) = legacy_bound(
        schema.maximum,
        schema.exclusive_maximum.as_ref(),
        |limit, bound| limit <= bound,
    );
    let (minimum, exclusive_minimum) = legacy_bound(
        schema.minimum,
        schema.exclusive_minimum.as_ref(),
        |limit, bound| limit >= bound,
    );

    let properties = schema
        .properties
        .iter()
        .map(|(name, property)| {
            let property = warnings.at("properties", |warnings| {
                warnings.at(name, |warnings| schema_to_v2(property, warnings))
            });
            (name.clone(), property)
        })
        .collect();
    let items = schema.items.as_deref().map(|items| {
        Box::new(warnings.at("items", |warnings| schema_to_v2(items, warnings)))
    });
    let all_of = warnings.at("allOf", |warnings| {
        schema
            .all_of
            .iter()
            .enumerate()
            .map(|(index, member)| warnings.at(index, |warnings| schema_to_v2(member, warnings)))
            .collect()
    });
    let additional_properties = schema
        .additional_properties
        .as_ref()
        .map(|additional| map_additional(additional, warnings, schema_to_v2));

    v2::Schema {
        title: schema.title.clone(),
        description: schema.description.clone(),
        schema_type,
        format: schema.format.clone(),
        properties,
        required: schema.required.clone(),
        additional_properties,
        items,
        all_of,
        discriminator,
        enum_values: schema.enum_values.clone(),
        default: schema.default.clone(),
        example: schema.example.clone(),
        multiple_of: schema.multiple_of,
        maximum,
        exclusive_maximum,
        minimum,
        exclusive_minimum,
        max_length: schema.max_length,
        min_length: schema.min_length,
        pattern: schema.pattern.clone(),
        max_items: schema.max_items,
        min_items: schema.min_items,
        unique_items: schema.unique_items,
        max_properties: schema.max_properties,
        min_properties: schema.min_properties,
        read_only: schema.read_only,
        xml: schema.xml.clone(),
        external_docs: schema.external_docs.clone(),
        extensions,
    }
}

fn warn_unsupported(schema: &v3::Schema, warnings: &mut Warnings) {
    if !schema.one_of.is_empty() {
        warnings.push("oneOf is not supported in Swagger 2.0 and was dropped");
    }
    if !schema.any_of.is_empty() {
        warnings.push("anyOf is not supported in JSON Schema draft 4 (Swagger 2.0) and was dropped");
    }
    if schema.not.is_some() {
        warnings.push("not is not supported in Swagger 2.0 and was dropped");
    }
    if !schema.prefix_items.is_empty() {
        warnings.push("prefixItems is not supported in JSON Schema draft 4 (Swagger 2.0) and was dropped");
    }
    if schema.write_only {
        warnings.push("writeOnly is not supported in Swagger 2.0 and was dropped");
    }
    if schema.const_value.is_some() {
        warnings.push("const is not supported in Swagger 2.0 and was dropped");
    }
    if schema.deprecated {
        warnings.push("deprecated is not supported on Swagger 2.0 schemas, converted to x-deprecated");
    }
}

/// Returns the legacy type name and whether the schema is nullable.
pub(crate) fn legacy_type(schema: &v3::Schema, warnings: &mut Warnings) -> (Option<String>, bool) {
    let Some(types) = &schema.schema_type else {
        return (None, schema.nullable);
    };

    let mut concrete = types.non_null();
    let first = concrete.next().map(str::to_owned);
    if concrete.next().is_some()
        && let Some(kept) = &first
    {
        warnings.push(format!(
            "type set {types} is not supported in Swagger 2.0: only '{kept}' is kept"
        ));
    }
    (first, schema.nullable || types.is_nullable())
}

/// Folds an OpenAPI 3.x exclusive bound into the legacy `bound` + boolean pair.
///
/// A numeric exclusive limit replaces the inclusive bound when it is at least as tight.
pub(crate) fn legacy_bound(
    inclusive: Option<f64>,
    exclusive: Option<&ExclusiveBound>,
    tighter: impl Fn(f64, f64) -> bool,
) -> (Option<f64>, bool) {
    match exclusive {
        None => (inclusive, false),
        Some(ExclusiveBound::Flag(flag)) => (inclusive, *flag),
        Some(ExclusiveBound::Value(limit)) => match inclusive {
            Some(bound) if !tighter(*limit, bound) => (Some(bound), false),
            _ => (Some(*limit), true),
        },
    }
}

pub(crate) fn schema_to_v3(
    schema: &RefOr<v2::Schema>,
    style: BoundStyle,
    warnings: &mut Warnings,
) -> RefOr<v3::Schema> {
    match schema {
        RefOr::Ref(reference) => RefOr::reference(to_v3_ref(&reference.ref_location)),
        RefOr::T(schema) => RefOr::T(inline_schema_to_v3(schema, style, warnings)),
    }
}

fn inline_schema_to_v3(schema: &v2::Schema, style: BoundStyle, warnings: &mut Warnings) -> v3::Schema {
    let mut extensions = schema.extensions.clone();
    let deprecated = extensions.take_flag(X_DEPRECATED);

    let (schema_type, format) = match schema.schema_type.as_deref() {
        Some("file") => (Some(SchemaType::from("string")), Some("binary".to_owned())),
        other => (other.map(SchemaType::from), schema.format.clone()),
    };

    let (maximum, exclusive_maximum) = richer_bound(schema.maximum, schema.exclusive_maximum, style);
    let (minimum, exclusive_minimum) = richer_bound(schema.minimum, schema.exclusive_minimum, style);

    let properties = schema
        .properties
        .iter()
        .map(|(name, property)| {
            let property = warnings.at("properties", |warnings| {
                warnings.at(name, |warnings| schema_to_v3(property, style, warnings))
            });
            (name.clone(), property)
        })
        .collect();
    let items = schema.items.as_deref().map(|items| {
        Box::new(warnings.at("items", |warnings| schema_to_v3(items, style, warnings)))
    });
    let all_of = warnings.at("allOf", |warnings| {
        schema
            .all_of
            .iter()
            .enumerate()
            .map(|(index, member)| {
                warnings.at(index, |warnings| schema_to_v3(member, style, warnings))
            })
            .collect()
    });
    let additional_properties = schema.additional_properties.as_ref().map(|additional| {
        map_additional(additional, warnings, |inner, warnings| {
            schema_to_v3(inner, style, warnings)
        })
    });

    v3::Schema {
        title: schema.title.clone(),
        description: schema.description.clone(),
        schema_type,
        format,
        properties,
        required: schema.required.clone(),
        additional_properties,
        items,
        all_of,
        discriminator: schema.discriminator.as_ref().map(|property_name| Discriminator {
            property_name: property_name.clone(),
            ..Discriminator::default()
        }),
        enum_values: schema.enum_values.clone(),
        default: schema.default.clone(),
        example: schema.example.clone(),
        multiple_of: schema.multiple_of,
        maximum,
        exclusive_maximum,
        minimum,
        exclusive_minimum,
        max_length: schema.max_length,
        min_length: schema.min_length,
        pattern: schema.pattern.clone(),
        max_items: schema.max_items,
        min_items: schema.min_items,
        unique_items: schema.unique_items,
        max_properties: schema.max_properties,
        min_properties: schema.min_properties,
        read_only: schema.read_only,
        deprecated,
        xml: schema.xml.clone(),
        external_docs: schema.external_docs.clone(),
        extensions,
        ..v3::Schema::default()
    }
}

/// Expands the legacy `bound` + boolean pair for the requested output draft.
pub(crate) fn richer_bound(
    bound: Option<f64>,
    exclusive: bool,
    style: BoundStyle,
) -> (Option<f64>, Option<ExclusiveBound>) {
    match (style, bound, exclusive) {
        (_, _, false) | (_, None, true) => (bound, None),
        (BoundStyle::Flag, Some(bound), true) => (Some(bound), Some(ExclusiveBound::Flag(true))),
        (BoundStyle::Value, Some(bound), true) => (None, Some(ExclusiveBound::Value(bound))),
    }
}

fn map_additional<S, T>(
    additional: &AdditionalProperties<S>,
    warnings: &mut Warnings,
    map: impl FnOnce(&RefOr<S>, &mut Warnings) -> RefOr<T>,
) -> AdditionalProperties<T> {
    match additional {
        AdditionalProperties::Allowed(allowed) => AdditionalProperties::Allowed(*allowed),
        AdditionalProperties::Schema(inner) => AdditionalProperties::Schema(Box::new(
            warnings.at("additionalProperties", |warnings| map(inner, warnings)),
        )),
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use serde_json::json;

    use super::*;

    fn v3_schema(value: Value) -> RefOr<v3::Schema> {
        serde_json::from_value(value).expect("valid 3.x schema")
    }

    fn v2_schema(value: Value) -> RefOr<v2::Schema> {
        serde_json::from_value(value).expect("valid 2.0 schema")
    }

    fn to_v2_value(value: Value) -> (Value, Warnings) {
        let mut warnings = Warnings::new();
        let schema = schema_to_v2(&v3_schema(value), &mut warnings);
        (serde_json::to_value(schema).expect("serializable"), warnings)
    }

    fn to_v3_value(value: Value, style: BoundStyle) -> Value {
        let mut warnings = Warnings::new();
        let schema = schema_to_v3(&v2_schema(value), style, &mut warnings);
        assert!(warnings.is_empty());
        serde_json::to_value(schema).expect("serializable")
    }

    #[test]
    fn should_rewrite_nested_references() {
        let (schema, warnings) = to_v2_value(json!({
            "type": "object",
            "properties": {
                "owner": { "$ref": "#/components/schemas/Owner" },
                "tags": { "type": "array", "items": { "$ref": "#/components/schemas/Tag" } }
            },
            "additionalProperties": { "$ref": "#/components/schemas/Extra" },
            "allOf": [{ "$ref": "#/components/schemas/Base" }]
        }));

        assert!(warnings.is_empty());
        assert_eq!(schema["properties"]["owner"]["$ref"], "#/definitions/Owner");
        assert_eq!(schema["properties"]["tags"]["items"]["$ref"], "#/definitions/Tag");
        assert_eq!(schema["additionalProperties"]["$ref"], "#/definitions/Extra");
        assert_eq!(schema["allOf"][0]["$ref"], "#/definitions/Base");
    }

    #[test]
    fn should_keep_zero_constraints() {
        let (schema, _) = to_v2_value(json!({
            "type": "integer",
            "minimum": 0,
            "maxLength": 0,
            "minItems": 0
        }));

        assert_eq!(schema["minimum"], json!(0.0));
        assert_eq!(schema["maxLength"], json!(0));
        assert_eq!(schema["minItems"], json!(0));
        assert!(schema.get("maximum").is_none());
    }

    #[test]
    fn should_flag_nullable_type_sets() {
        let (schema, warnings) = to_v2_value(json!({ "type": ["null", "string"] }));

        assert!(warnings.is_empty());
        assert_eq!(schema, json!({ "type": "string", "x-nullable": true }));
    }

    #[test]
    fn should_flag_nullable_keyword() {
        let (schema, _) = to_v2_value(json!({ "type": "integer", "nullable": true }));

        assert_eq!(schema["x-nullable"], json!(true));
    }

    #[test]
    fn should_warn_on_multiple_concrete_types() {
        let (schema, warnings) = to_v2_value(json!({ "type": ["string", "integer"] }));

        assert_eq!(schema["type"], "string");
        assert_snapshot!(warnings, @"type set [string, integer] is not supported in Swagger 2.0: only 'string' is kept");
    }

    #[test]
    fn should_warn_once_per_unsupported_feature() {
        let (_, warnings) = to_v2_value(json!({
            "oneOf": [{ "type": "string" }],
            "anyOf": [{ "type": "string" }],
            "not": { "type": "integer" },
            "prefixItems": [{ "type": "string" }],
            "writeOnly": true
        }));

        assert_snapshot!(warnings, @r"
        oneOf is not supported in Swagger 2.0 and was dropped
        anyOf is not supported in JSON Schema draft 4 (Swagger 2.0) and was dropped
        not is not supported in Swagger 2.0 and was dropped
        prefixItems is not supported in JSON Schema draft 4 (Swagger 2.0) and was dropped
        writeOnly is not supported in Swagger 2.0 and was dropped
        ");
    }

    #[test]
    fn should_point_nested_warnings() {
        let (_, warnings) = to_v2_value(json!({
            "properties": { "pet": { "anyOf": [{ "type": "string" }] } }
        }));

        assert_eq!(
            warnings.iter().next().map(ToString::to_string).as_deref(),
            Some("/properties/pet: anyOf is not supported in JSON Schema draft 4 (Swagger 2.0) and was dropped")
        );
    }

    #[test]
    fn should_collapse_discriminator() {
        let (schema, warnings) = to_v2_value(json!({
            "discriminator": {
                "propertyName": "kind",
                "mapping": { "dog": "#/components/schemas/Dog" }
            }
        }));

        assert_eq!(schema["discriminator"], "kind");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn should_relocate_deprecated() {
        let (schema, warnings) = to_v2_value(json!({ "type": "string", "deprecated": true }));

        assert_eq!(schema["x-deprecated"], json!(true));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn should_translate_numeric_exclusive_bounds() {
        let (schema, _) = to_v2_value(json!({
            "exclusiveMaximum": 10,
            "minimum": 5,
            "exclusiveMinimum": 1
        }));

        assert_eq!(schema["maximum"], json!(10.0));
        assert_eq!(schema["exclusiveMaximum"], json!(true));
        assert_eq!(schema["minimum"], json!(5.0));
        assert!(schema.get("exclusiveMinimum").is_none());
    }

    #[test]
    fn should_keep_boolean_exclusive_bounds() {
        let (schema, _) = to_v2_value(json!({ "maximum": 3, "exclusiveMaximum": true }));

        assert_eq!(schema["maximum"], json!(3.0));
        assert_eq!(schema["exclusiveMaximum"], json!(true));
    }

    #[test]
    fn should_write_exclusive_bounds_per_draft() {
        let legacy = json!({ "type": "number", "maximum": 10, "exclusiveMaximum": true });

        let draft4 = to_v3_value(legacy.clone(), BoundStyle::Flag);
        let draft2020 = to_v3_value(legacy, BoundStyle::Value);

        assert_eq!(draft4["maximum"], json!(10.0));
        assert_eq!(draft4["exclusiveMaximum"], json!(true));
        assert!(draft2020.get("maximum").is_none());
        assert_eq!(draft2020["exclusiveMaximum"], json!(10.0));
    }

    #[test]
    fn should_convert_file_type() {
        let schema = to_v3_value(json!({ "type": "file" }), BoundStyle::Value);

        assert_eq!(schema, json!({ "type": "string", "format": "binary" }));
    }

    #[test]
    fn should_not_reconstruct_nullability() {
        let schema = to_v3_value(json!({ "type": "string", "x-nullable": true }), BoundStyle::Value);

        assert_eq!(schema, json!({ "type": "string", "x-nullable": true }));
    }

    #[test]
    fn should_expand_discriminator_and_deprecation() {
        let schema = to_v3_value(
            json!({ "discriminator": "kind", "x-deprecated": true, "minLength": 0 }),
            BoundStyle::Value,
        );

        assert_eq!(
            schema,
            json!({ "discriminator": { "propertyName": "kind" }, "minLength": 0, "deprecated": true })
        );
    }

    #[test]
    fn should_keep_additional_properties_flag() {
        let schema = to_v3_value(
            json!({ "type": "object", "additionalProperties": false }),
            BoundStyle::Value,
        );

        assert_eq!(schema["additionalProperties"], json!(false));
    }

    #[test]
    fn should_pick_bound_style_from_version() {
        assert_eq!(BoundStyle::for_version("3.0.3"), BoundStyle::Flag);
        assert_eq!(BoundStyle::for_version("3.1.0"), BoundStyle::Value);
        assert_eq!(BoundStyle::for_version("3.2.0"), BoundStyle::Value);
    }
}
