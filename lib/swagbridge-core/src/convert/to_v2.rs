//! OpenAPI 3.x → Swagger 2.0.

use indexmap::IndexMap;

use super::Warnings;
use super::bodies::{inline_response_to_v2, request_body_to_v2, response_to_v2};
use super::media;
use super::parameters::{inline_parameter_to_v2, parameter_to_v2};
use super::refs::{V3_PARAMETERS, V3_RESPONSES, V3_SECURITY_SCHEMES, resolve, to_v2_ref};
use super::schema::schema_to_v2;
use super::security::scheme_to_v2;
use super::server::to_location;
use crate::spec::{RefOr, v2, v3};

pub(crate) fn convert(source: &v3::OpenApi) -> (v2::Swagger, Warnings) {
    let mut warnings = Warnings::new();
    let components = source.components.as_ref();

    let location = warnings.at("servers", |warnings| to_location(&source.servers, warnings));
    if !source.webhooks.is_empty() {
        warnings.at("webhooks", |warnings| {
            warnings.push("webhooks are not supported in Swagger 2.0 and were ignored");
        });
    }
    if source.json_schema_dialect.is_some() {
        warnings.at("jsonSchemaDialect", |warnings| {
            warnings.push("jsonSchemaDialect is not supported in Swagger 2.0 and was ignored");
        });
    }

    let info = warnings.at("info", |warnings| info_to_v2(&source.info, warnings));
    let paths = warnings.at("paths", |warnings| {
        source
            .paths
            .iter()
            .map(|(path, item)| {
                let item = warnings.at(path, |warnings| path_item_to_v2(item, components, warnings));
                (path.clone(), item)
            })
            .collect()
    });

    let mut document = v2::Swagger {
        swagger: v2::VERSION.to_owned(),
        info,
        host: location.host,
        base_path: location.base_path,
        schemes: location.schemes,
        paths,
        security: source.security.clone(),
        tags: source.tags.clone(),
        external_docs: source.external_docs.clone(),
        extensions: source.extensions.clone(),
        ..v2::Swagger::default()
    };
    if let Some(components) = components {
        warnings.at("components", |warnings| {
            components_to_v2(components, &mut document, warnings);
        });
    }

    (document, warnings)
}

fn info_to_v2(info: &v3::Info, warnings: &mut Warnings) -> v2::Info {
    if info.summary.is_some() {
        warnings.push("info.summary is not supported in Swagger 2.0 and was ignored");
    }
    let license = info.license.as_ref().map(|license| {
        if license.identifier.is_some() {
            warnings.push("license.identifier is not supported in Swagger 2.0, only license.url is used");
        }
        v2::License {
            name: license.name.clone(),
            url: license.url.clone(),
            extensions: license.extensions.clone(),
        }
    });

    v2::Info {
        title: info.title.clone(),
        description: info.description.clone(),
        terms_of_service: info.terms_of_service.clone(),
        contact: info.contact.clone(),
        license,
        version: info.version.clone(),
        extensions: info.extensions.clone(),
    }
}

fn path_item_to_v2(
    item: &v3::PathItem,
    components: Option<&v3::Components>,
    warnings: &mut Warnings,
) -> v2::PathItem {
    if item.summary.is_some() {
        warnings.push("path item summary is not supported in Swagger 2.0 and was ignored");
    }
    if item.description.is_some() {
        warnings.push("path item description is not supported in Swagger 2.0 and was ignored");
    }
    if !item.servers.is_empty() {
        warnings.push("path-level servers are not supported in Swagger 2.0 and were ignored");
    }

    let parameters = warnings.at("parameters", |warnings| {
        parameters_to_v2(&item.parameters, components, warnings)
    });
    let operation = |method: &str, operation: Option<&v3::Operation>, warnings: &mut Warnings| {
        operation.map(|operation| {
            warnings.at(method, |warnings| operation_to_v2(operation, components, warnings))
        })
    };
    let converted = v2::PathItem {
        ref_location: item.ref_location.as_deref().map(to_v2_ref),
        get: operation("get", item.get.as_ref(), warnings),
        put: operation("put", item.put.as_ref(), warnings),
        post: operation("post", item.post.as_ref(), warnings),
        delete: operation("delete", item.delete.as_ref(), warnings),
        options: operation("options", item.options.as_ref(), warnings),
        head: operation("head", item.head.as_ref(), warnings),
        patch: operation("patch", item.patch.as_ref(), warnings),
        parameters,
        extensions: item.extensions.clone(),
    };

    // Converted only for the warnings of their content.
    for (method, dropped) in [("trace", &item.trace), ("query", &item.query)] {
        if let Some(dropped) = dropped {
            warnings.at(method, |warnings| {
                warnings.push(format!(
                    "{} operations are not supported in Swagger 2.0 and were ignored",
                    method.to_uppercase()
                ));
                operation_to_v2(dropped, components, warnings);
            });
        }
    }

    converted
}

fn parameters_to_v2(
    parameters: &[RefOr<v3::Parameter>],
    components: Option<&v3::Components>,
    warnings: &mut Warnings,
) -> Vec<RefOr<v2::Parameter>> {
    parameters
        .iter()
        .enumerate()
        .filter_map(|(index, parameter)| {
            warnings.at(index, |warnings| parameter_to_v2(parameter, components, warnings))
        })
        .collect()
}

fn operation_to_v2(
    operation: &v3::Operation,
    components: Option<&v3::Components>,
    warnings: &mut Warnings,
) -> v2::Operation {
    let mut parameters = warnings.at("parameters", |warnings| {
        parameters_to_v2(&operation.parameters, components, warnings)
    });

    let mut consumes = vec![];
    if let Some(body) = &operation.request_body {
        let body = warnings.at("requestBody", |warnings| request_body_to_v2(body, components, warnings));
        parameters.extend(body.parameters.into_iter().map(RefOr::T));
        consumes = body.consumes;
    }

    let produces = media::union(operation.responses.values().flat_map(|response| {
        resolve(
            response,
            components.map(|components| &components.responses),
            V3_RESPONSES,
        )
        .into_iter()
        .flat_map(|response| response.content.keys())
    }));
    let responses = warnings.at("responses", |warnings| {
        operation
            .responses
            .iter()
            .map(|(status, response)| {
                let response =
                    warnings.at(status, |warnings| response_to_v2(response, components, warnings));
                (status.clone(), response)
            })
            .collect()
    });

    let label = operation.operation_id.as_deref().unwrap_or_default();
    if !operation.callbacks.is_empty() {
        warnings.at("callbacks", |warnings| {
            warnings.push(format!(
                "operation '{label}': callbacks are not supported in Swagger 2.0 and were ignored"
            ));
        });
    }
    if !operation.servers.is_empty() {
        warnings.at("servers", |warnings| {
            warnings.push(format!(
                "operation '{label}': operation-level servers are not supported in Swagger 2.0 and were ignored"
            ));
        });
    }

    v2::Operation {
        tags: operation.tags.clone(),
        summary: operation.summary.clone(),
        description: operation.description.clone(),
        external_docs: operation.external_docs.clone(),
        operation_id: operation.operation_id.clone(),
        consumes,
        produces,
        parameters,
        responses,
        schemes: vec![],
        deprecated: operation.deprecated,
        security: operation.security.clone(),
        extensions: operation.extensions.clone(),
    }
}

fn components_to_v2(
    components: &v3::Components,
    document: &mut v2::Swagger,
    warnings: &mut Warnings,
) {
    document.definitions = warnings.at("schemas", |warnings| {
        components
            .schemas
            .iter()
            .map(|(name, schema)| {
                let schema = warnings.at(name, |warnings| schema_to_v2(schema, warnings));
                (name.clone(), schema)
            })
            .collect()
    });

    document.parameters = warnings.at("parameters", |warnings| {
        named_inline(&components.parameters, V3_PARAMETERS, warnings, |parameter, warnings| {
            inline_parameter_to_v2(parameter, Some(components), warnings)
        })
    });
    document.responses = warnings.at("responses", |warnings| {
        named_inline(&components.responses, V3_RESPONSES, warnings, |response, warnings| {
            Some(inline_response_to_v2(response, Some(components), warnings))
        })
    });
    document.security_definitions = warnings.at("securitySchemes", |warnings| {
        named_inline(
            &components.security_schemes,
            V3_SECURITY_SCHEMES,
            warnings,
            |scheme, warnings| Some(scheme_to_v2(scheme, warnings)),
        )
    });

    let inlined = [
        ("requestBodies", components.request_bodies.len()),
        ("headers", components.headers.len()),
    ];
    for (section, count) in inlined {
        if count > 0 {
            warnings.at(section, |warnings| {
                warnings.push(format!(
                    "{section} components have no Swagger 2.0 equivalent: references to them are inlined"
                ));
            });
        }
    }
    let dropped = [
        ("examples", components.examples.len()),
        ("links", components.links.len()),
        ("callbacks", components.callbacks.len()),
        ("pathItems", components.path_items.len()),
    ];
    for (section, count) in dropped {
        if count > 0 {
            warnings.at(section, |warnings| {
                warnings.push(format!(
                    "{section} components are not supported in Swagger 2.0 and were ignored"
                ));
            });
        }
    }
}

/// Converts a named component section whose Swagger 2.0 counterpart only holds inline values.
///
/// Aliases (a component that is itself a `$ref`) are resolved within the same section.
fn named_inline<T, U>(
    section: &IndexMap<String, RefOr<T>>,
    prefix: &str,
    warnings: &mut Warnings,
    mut convert: impl FnMut(&T, &mut Warnings) -> Option<U>,
) -> IndexMap<String, U> {
    section
        .iter()
        .filter_map(|(name, entry)| {
            warnings.at(name, |warnings| {
                let Some(inline) = resolve(entry, Some(section), prefix) else {
                    warnings.push(format!(
                        "reference '{}' cannot be resolved and was dropped",
                        entry.ref_location().unwrap_or_default()
                    ));
                    return None;
                };
                convert(inline, warnings).map(|converted| (name.clone(), converted))
            })
        })
        .collect()
}
