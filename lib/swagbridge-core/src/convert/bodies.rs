//! Request bodies and responses.
//!
//! OpenAPI 3.x request bodies become one `body` parameter (or `formData` parameters for form
//! media types); Swagger 2.0 bodies and responses are expanded into one content entry per
//! consumed or produced media type.

use indexmap::IndexMap;

use super::media::{self, FORM_URLENCODED, MULTIPART_FORM_DATA};
use super::parameters::{form_parameters, form_schema, header_to_v2, header_to_v3};
use super::refs::{V3_REQUEST_BODIES, resolve, to_v2_ref, to_v3_ref};
use super::schema::{BoundStyle, schema_to_v2, schema_to_v3};
use super::Warnings;
use crate::spec::{RefOr, v2, v3};

/// Name given to the body parameter of converted request bodies.
pub(crate) const BODY_PARAMETER: &str = "body";

/// Swagger 2.0 view of a request body.
#[derive(Debug, Default)]
pub(crate) struct LegacyBody {
    pub(crate) parameters: Vec<v2::Parameter>,
    pub(crate) consumes: Vec<String>,
}

pub(crate) fn request_body_to_v2(
    body: &RefOr<v3::RequestBody>,
    components: Option<&v3::Components>,
    warnings: &mut Warnings,
) -> LegacyBody {
    let Some(body) = resolve(
        body,
        components.map(|components| &components.request_bodies),
        V3_REQUEST_BODIES,
    ) else {
        warnings.push(format!(
            "request body reference '{}' cannot be resolved and was dropped",
            body.ref_location().unwrap_or_default()
        ));
        return LegacyBody::default();
    };

    let consumes = body.content.keys().cloned().collect();
    let Some((media_type, media)) = media::select_reporting(&body.content, "requestBody", warnings)
    else {
        return LegacyBody {
            parameters: vec![],
            consumes,
        };
    };

    warnings.at("content", |warnings| {
        warnings.at(media_type, |warnings| {
            if media.item_schema.is_some() {
                warnings.push("itemSchema is not supported in Swagger 2.0 and was dropped");
            }
            if media.example.is_some() || !media.examples.is_empty() {
                warnings.push("request body examples are not supported in Swagger 2.0 and were dropped");
            }
        });
    });

    let Some(schema) = &media.schema else {
        warnings.push(format!(
            "request body '{media_type}' has no schema: no body parameter is emitted"
        ));
        return LegacyBody {
            parameters: vec![],
            consumes,
        };
    };

    if media::is_form(media_type)
        && let Some(parameters) = warnings.at("content", |warnings| {
            warnings.at(media_type, |warnings| {
                warnings.at("schema", |warnings| form_parameters(schema, components, warnings))
            })
        })
    {
        return LegacyBody {
            parameters,
            consumes,
        };
    }

    let schema = warnings.at("content", |warnings| {
        warnings.at(media_type, |warnings| {
            warnings.at("schema", |warnings| schema_to_v2(schema, warnings))
        })
    });
    let parameter = v2::Parameter {
        name: BODY_PARAMETER.to_owned(),
        location: v2::ParameterIn::Body,
        description: body.description.clone(),
        required: body.required,
        schema: Some(schema),
        extensions: body.extensions.clone(),
        ..v2::Parameter::default()
    };
    LegacyBody {
        parameters: vec![parameter],
        consumes,
    }
}

pub(crate) fn response_to_v2(
    response: &RefOr<v3::Response>,
    components: Option<&v3::Components>,
    warnings: &mut Warnings,
) -> RefOr<v2::Response> {
    match response {
        RefOr::Ref(reference) => RefOr::reference(to_v2_ref(&reference.ref_location)),
        RefOr::T(response) => RefOr::T(inline_response_to_v2(response, components, warnings)),
    }
}

/// Converts an inline response.
///
/// The schema comes from the selected media type; examples are gathered from every media type.
pub(crate) fn inline_response_to_v2(
    response: &v3::Response,
    components: Option<&v3::Components>,
    warnings: &mut Warnings,
) -> v2::Response {
    let schema = media::select_reporting(&response.content, "response", warnings).and_then(
        |(media_type, media)| {
            let schema = media.schema.as_ref()?;
            Some(warnings.at("content", |warnings| {
                warnings.at(media_type, |warnings| {
                    warnings.at("schema", |warnings| schema_to_v2(schema, warnings))
                })
            }))
        },
    );
    let examples = response
        .content
        .iter()
        .filter_map(|(media_type, media)| {
            media
                .representative_example()
                .map(|example| (media_type.clone(), example.clone()))
        })
        .collect();
    let headers = warnings.at("headers", |warnings| {
        response
            .headers
            .iter()
            .filter_map(|(name, header)| {
                warnings
                    .at(name, |warnings| header_to_v2(header, components, warnings))
                    .map(|header| (name.clone(), header))
            })
            .collect()
    });
    if !response.links.is_empty() {
        warnings.push("response links are not supported in Swagger 2.0 and were dropped");
    }

    v2::Response {
        description: response.description.clone(),
        schema,
        headers,
        examples,
        extensions: response.extensions.clone(),
    }
}

pub(crate) fn response_to_v3(
    response: &RefOr<v2::Response>,
    produces: &[&str],
    bounds: BoundStyle,
    warnings: &mut Warnings,
) -> RefOr<v3::Response> {
    match response {
        RefOr::Ref(reference) => RefOr::reference(to_v3_ref(&reference.ref_location)),
        RefOr::T(response) => RefOr::T(inline_response_to_v3(response, produces, bounds, warnings)),
    }
}

/// Expands a response into one content entry per produced media type.
///
/// Examples keyed by a media type that is not produced get an entry of their own.
pub(crate) fn inline_response_to_v3(
    response: &v2::Response,
    produces: &[&str],
    bounds: BoundStyle,
    warnings: &mut Warnings,
) -> v3::Response {
    let schema = response
        .schema
        .as_ref()
        .map(|schema| warnings.at("schema", |warnings| schema_to_v3(schema, bounds, warnings)));

    let mut content = IndexMap::<String, v3::MediaType>::new();
    if let Some(schema) = &schema {
        for media_type in produces {
            content.insert((*media_type).to_owned(), v3::MediaType::with_schema(schema.clone()));
        }
    }
    for (media_type, example) in &response.examples {
        content.entry(media_type.clone()).or_default().example = Some(example.clone());
    }

    v3::Response {
        description: response.description.clone(),
        headers: response
            .headers
            .iter()
            .map(|(name, header)| (name.clone(), RefOr::T(header_to_v3(header, bounds))))
            .collect(),
        content,
        links: IndexMap::new(),
        extensions: response.extensions.clone(),
    }
}

/// Expands a body parameter into one content entry per consumed media type.
pub(crate) fn body_to_v3(
    parameter: &v2::Parameter,
    consumes: &[&str],
    bounds: BoundStyle,
    warnings: &mut Warnings,
) -> v3::RequestBody {
    let schema = parameter
        .schema
        .as_ref()
        .map(|schema| warnings.at("schema", |warnings| schema_to_v3(schema, bounds, warnings)));
    if schema.is_none() {
        warnings.push(format!("body parameter '{}' has no schema", parameter.name));
    }

    let content = consumes
        .iter()
        .map(|media_type| {
            let media = v3::MediaType {
                schema: schema.clone(),
                ..v3::MediaType::default()
            };
            ((*media_type).to_owned(), media)
        })
        .collect();

    v3::RequestBody {
        description: parameter.description.clone(),
        content,
        required: parameter.required,
        extensions: parameter.extensions.clone(),
    }
}

/// Gathers `formData` parameters into one request body.
///
/// `multipart/form-data` is used when the operation consumes it, URL encoding otherwise.
pub(crate) fn form_body_to_v3(
    parameters: &[&v2::Parameter],
    consumes: &[&str],
    bounds: BoundStyle,
) -> v3::RequestBody {
    let media_type = consumes
        .iter()
        .copied()
        .find(|media_type| media::has_essence(media_type, MULTIPART_FORM_DATA))
        .unwrap_or(FORM_URLENCODED);
    let schema = form_schema(parameters, bounds);

    v3::RequestBody {
        description: None,
        content: [(media_type.to_owned(), v3::MediaType::with_schema(schema))]
            .into_iter()
            .collect(),
        required: parameters.iter().any(|parameter| parameter.required),
        extensions: Default::default(),
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use serde_json::{Value, json};

    use super::*;

    fn request_body(value: Value) -> RefOr<v3::RequestBody> {
        serde_json::from_value(value).expect("valid request body")
    }

    fn v3_response(value: Value) -> v3::Response {
        serde_json::from_value(value).expect("valid 3.x response")
    }

    fn v2_response(value: Value) -> v2::Response {
        serde_json::from_value(value).expect("valid 2.0 response")
    }

    #[test]
    fn should_convert_json_body_to_parameter() {
        let mut warnings = Warnings::new();
        let body = request_body(json!({
            "description": "Pet to add",
            "required": true,
            "content": {
                "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } }
            }
        }));

        let legacy = request_body_to_v2(&body, None, &mut warnings);

        assert!(warnings.is_empty());
        assert_eq!(legacy.consumes, ["application/json"]);
        assert_eq!(
            serde_json::to_value(&legacy.parameters).expect("serializable"),
            json!([{
                "name": "body",
                "in": "body",
                "description": "Pet to add",
                "required": true,
                "schema": { "$ref": "#/definitions/Pet" }
            }])
        );
    }

    #[test]
    fn should_report_dropped_content_types() {
        let mut warnings = Warnings::new();
        let body = request_body(json!({
            "content": {
                "application/xml": { "schema": { "type": "string" } },
                "application/json": { "schema": { "type": "object" } },
                "text/plain": { "schema": { "type": "string" } }
            }
        }));

        let legacy = warnings.at("requestBody", |warnings| request_body_to_v2(&body, None, warnings));

        assert_eq!(legacy.consumes, ["application/xml", "application/json", "text/plain"]);
        let parameter = legacy.parameters.first().expect("body parameter");
        assert_eq!(
            parameter.schema.as_ref().and_then(RefOr::as_inline).and_then(|schema| schema.schema_type.as_deref()),
            Some("object")
        );
        assert_snapshot!(warnings, @"/requestBody: requestBody has 3 content types: only 'application/json' is converted");
    }

    #[test]
    fn should_resolve_request_body_reference() {
        let mut warnings = Warnings::new();
        let components: v3::Components = serde_json::from_value(json!({
            "requestBodies": {
                "NewPet": {
                    "required": true,
                    "content": { "application/json": { "schema": { "type": "object" } } }
                }
            }
        }))
        .expect("valid components");
        let body = RefOr::reference("#/components/requestBodies/NewPet");

        let legacy = request_body_to_v2(&body, Some(&components), &mut warnings);

        assert!(warnings.is_empty());
        assert!(legacy.parameters.first().is_some_and(|parameter| parameter.required));
    }

    #[test]
    fn should_warn_on_unresolvable_request_body() {
        let mut warnings = Warnings::new();
        let body = RefOr::reference("#/components/requestBodies/Missing");

        let legacy = request_body_to_v2(&body, None, &mut warnings);

        assert!(legacy.parameters.is_empty());
        assert!(warnings.contains("cannot be resolved"));
    }

    #[test]
    fn should_split_form_body() {
        let mut warnings = Warnings::new();
        let body = request_body(json!({
            "content": {
                "multipart/form-data": {
                    "schema": {
                        "type": "object",
                        "properties": {
                            "file": { "type": "string", "format": "binary" },
                            "name": { "type": "string" }
                        }
                    }
                }
            }
        }));

        let legacy = request_body_to_v2(&body, None, &mut warnings);

        let names = legacy
            .parameters
            .iter()
            .map(|parameter| format!("{}:{}", parameter.location, parameter.name))
            .collect::<Vec<_>>();
        assert_eq!(names, ["formData:file", "formData:name"]);
        assert_eq!(legacy.consumes, ["multipart/form-data"]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn should_warn_on_missing_body_schema() {
        let mut warnings = Warnings::new();
        let body = request_body(json!({
            "content": { "application/octet-stream": {} }
        }));

        let legacy = request_body_to_v2(&body, None, &mut warnings);

        assert!(legacy.parameters.is_empty());
        assert_eq!(
            warnings.messages(),
            ["request body 'application/octet-stream' has no schema: no body parameter is emitted"]
        );
    }

    #[test]
    fn should_fold_response_examples() {
        let mut warnings = Warnings::new();
        let response = v3_response(json!({
            "description": "A pet",
            "headers": { "X-Rate-Limit": { "schema": { "type": "integer" } } },
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/Pet" },
                    "example": { "name": "Rex" }
                },
                "application/xml": {
                    "examples": { "rex": { "value": "<pet>Rex</pet>" } }
                }
            },
            "links": { "owner": { "operationId": "getOwner" } }
        }));

        let response = inline_response_to_v2(&response, None, &mut warnings);

        assert_eq!(
            serde_json::to_value(&response).expect("serializable"),
            json!({
                "description": "A pet",
                "schema": { "$ref": "#/definitions/Pet" },
                "headers": { "X-Rate-Limit": { "type": "integer" } },
                "examples": {
                    "application/json": { "name": "Rex" },
                    "application/xml": "<pet>Rex</pet>"
                }
            })
        );
        assert_snapshot!(warnings, @r"
        response has 2 content types: only 'application/json' is converted
        response links are not supported in Swagger 2.0 and were dropped
        ");
    }

    #[test]
    fn should_expand_response_per_produced_type() {
        let mut warnings = Warnings::new();
        let response = v2_response(json!({
            "description": "A pet",
            "schema": { "$ref": "#/definitions/Pet" },
            "examples": { "application/json": { "name": "Rex" }, "text/csv": "name\nRex" }
        }));

        let response = inline_response_to_v3(
            &response,
            &["application/json", "application/xml"],
            BoundStyle::Value,
            &mut warnings,
        );

        assert_eq!(
            serde_json::to_value(&response).expect("serializable"),
            json!({
                "description": "A pet",
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Pet" },
                        "example": { "name": "Rex" }
                    },
                    "application/xml": { "schema": { "$ref": "#/components/schemas/Pet" } },
                    "text/csv": { "example": "name\nRex" }
                }
            })
        );
    }

    #[test]
    fn should_keep_empty_response_without_content() {
        let mut warnings = Warnings::new();
        let response = v2_response(json!({ "description": "Deleted" }));

        let response = inline_response_to_v3(&response, &["application/json"], BoundStyle::Value, &mut warnings);

        assert!(response.content.is_empty());
        assert_eq!(response.description, "Deleted");
    }

    #[test]
    fn should_expand_body_per_consumed_type() {
        let mut warnings = Warnings::new();
        let parameter: v2::Parameter = serde_json::from_value(json!({
            "name": "pet",
            "in": "body",
            "required": true,
            "schema": { "$ref": "#/definitions/Pet" }
        }))
        .expect("valid parameter");

        let body = body_to_v3(&parameter, &["application/json", "application/xml"], BoundStyle::Value, &mut warnings);

        assert!(body.required);
        assert_eq!(
            body.content.keys().map(String::as_str).collect::<Vec<_>>(),
            ["application/json", "application/xml"]
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn should_pick_form_media_type() {
        let file = v2::Parameter {
            name: "file".to_owned(),
            location: v2::ParameterIn::FormData,
            simple: v2::SimpleSchema::of_type("file"),
            ..v2::Parameter::default()
        };

        let multipart = form_body_to_v3(&[&file], &["multipart/form-data"], BoundStyle::Value);
        let encoded = form_body_to_v3(&[&file], &["application/json"], BoundStyle::Value);

        assert!(multipart.content.contains_key(MULTIPART_FORM_DATA));
        assert!(encoded.content.contains_key(FORM_URLENCODED));
        assert!(!encoded.required);
    }
}
