//! Swagger 2.0 → OpenAPI 3.x.

use indexmap::IndexMap;

use super::Warnings;
use super::bodies::{body_to_v3, form_body_to_v3, inline_response_to_v3, response_to_v3};
use super::media;
use super::parameters::{inline_parameter_to_v3, parameter_to_v3};
use super::refs::{V2_PARAMETERS, V3_REQUEST_BODIES, local_name, to_v3_ref};
use super::schema::{BoundStyle, schema_to_v3};
use super::security::scheme_to_v3;
use super::server::to_servers;
use crate::spec::{RefOr, v2, v3};

/// Everything an operation conversion needs from the source document.
struct Scope<'a> {
    source: &'a v2::Swagger,
    bounds: BoundStyle,
}

/// A Swagger 2.0 parameter sorted by what it becomes in OpenAPI 3.x.
enum Classified<'a> {
    /// A body parameter, with its definition name when given by reference.
    Body(&'a v2::Parameter, Option<&'a str>),
    /// A form field, folded into the request body.
    Form(&'a v2::Parameter),
    /// Any other parameter, or a reference that cannot be resolved.
    Other(&'a RefOr<v2::Parameter>),
}

impl<'a> Scope<'a> {
    fn classify(&self, parameter: &'a RefOr<v2::Parameter>) -> Classified<'a> {
        let (inline, name) = match parameter {
            RefOr::T(inline) => (Some(inline), None),
            RefOr::Ref(reference) => {
                let name = local_name(&reference.ref_location, V2_PARAMETERS);
                (name.and_then(|name| self.source.parameters.get(name)), name)
            }
        };
        match inline {
            Some(inline) if inline.location == v2::ParameterIn::Body => Classified::Body(inline, name),
            Some(inline) if inline.location == v2::ParameterIn::FormData => Classified::Form(inline),
            _ => Classified::Other(parameter),
        }
    }
}

pub(crate) fn convert(source: &v2::Swagger, version: &str) -> (v3::OpenApi, Warnings) {
    let mut warnings = Warnings::new();
    let scope = Scope {
        source,
        bounds: BoundStyle::for_version(version),
    };

    let servers = warnings.at("schemes", |warnings| {
        to_servers(
            source.host.as_deref(),
            source.base_path.as_deref(),
            &source.schemes,
            warnings,
        )
    });
    if !source.consumes.is_empty() || !source.produces.is_empty() {
        warnings.push(
            "global consumes/produces are not directly supported in OpenAPI 3.x, applied to operations where missing",
        );
    }

    let paths = warnings.at("paths", |warnings| {
        source
            .paths
            .iter()
            .map(|(path, item)| {
                let item = warnings.at(path, |warnings| path_item_to_v3(item, &scope, warnings));
                (path.clone(), item)
            })
            .collect()
    });
    let components = components_to_v3(&scope, &mut warnings);

    let document = v3::OpenApi {
        openapi: version.to_owned(),
        info: info_to_v3(&source.info),
        servers,
        paths,
        components,
        security: source.security.clone(),
        tags: source.tags.clone(),
        external_docs: source.external_docs.clone(),
        extensions: source.extensions.clone(),
        ..v3::OpenApi::default()
    };
    (document, warnings)
}

fn info_to_v3(info: &v2::Info) -> v3::Info {
    v3::Info {
        title: info.title.clone(),
        summary: None,
        description: info.description.clone(),
        terms_of_service: info.terms_of_service.clone(),
        contact: info.contact.clone(),
        license: info.license.as_ref().map(|license| v3::License {
            name: license.name.clone(),
            identifier: None,
            url: license.url.clone(),
            extensions: license.extensions.clone(),
        }),
        version: info.version.clone(),
        extensions: info.extensions.clone(),
    }
}

fn path_item_to_v3(item: &v2::PathItem, scope: &Scope<'_>, warnings: &mut Warnings) -> v3::PathItem {
    let mut inherited = vec![];
    let parameters = warnings.at("parameters", |warnings| {
        item.parameters
            .iter()
            .enumerate()
            .filter_map(|(index, parameter)| match scope.classify(parameter) {
                Classified::Other(parameter) => warnings
                    .at(index, |warnings| parameter_to_v3(parameter, scope.bounds, warnings)),
                classified => {
                    inherited.push(classified);
                    None
                }
            })
            .collect()
    });

    let operation = |method: &str, operation: Option<&v2::Operation>, warnings: &mut Warnings| {
        operation.map(|operation| {
            warnings.at(method, |warnings| operation_to_v3(operation, &inherited, scope, warnings))
        })
    };
    v3::PathItem {
        ref_location: item.ref_location.as_deref().map(to_v3_ref),
        get: operation("get", item.get.as_ref(), warnings),
        put: operation("put", item.put.as_ref(), warnings),
        post: operation("post", item.post.as_ref(), warnings),
        delete: operation("delete", item.delete.as_ref(), warnings),
        options: operation("options", item.options.as_ref(), warnings),
        head: operation("head", item.head.as_ref(), warnings),
        patch: operation("patch", item.patch.as_ref(), warnings),
        parameters,
        extensions: item.extensions.clone(),
        ..v3::PathItem::default()
    }
}

/// Request body sources found on an operation; path-level ones come first.
///
/// An operation-level body overrides an inherited one.
#[derive(Default)]
struct BodySources<'a> {
    body: Option<(Option<usize>, &'a v2::Parameter, Option<&'a str>)>,
    body_count: usize,
    form: Vec<&'a v2::Parameter>,
}

impl<'a> BodySources<'a> {
    fn add(&mut self, index: Option<usize>, classified: &Classified<'a>) {
        match *classified {
            Classified::Body(parameter, name) => {
                if index.is_some() && matches!(self.body, Some((None, _, _))) {
                    self.body_count = 0;
                }
                self.body = Some((index, parameter, name));
                self.body_count += 1;
            }
            Classified::Form(parameter) => self.form.push(parameter),
            Classified::Other(_) => {}
        }
    }
}

fn operation_to_v3(
    operation: &v2::Operation,
    inherited: &[Classified<'_>],
    scope: &Scope<'_>,
    warnings: &mut Warnings,
) -> v3::Operation {
    let source = scope.source;
    let consumes = media::effective(&operation.consumes, &source.consumes);
    let produces = media::effective(&operation.produces, &source.produces);

    let mut sources = BodySources::default();
    for classified in inherited {
        sources.add(None, classified);
    }
    let parameters = warnings.at("parameters", |warnings| {
        operation
            .parameters
            .iter()
            .enumerate()
            .filter_map(|(index, parameter)| match scope.classify(parameter) {
                Classified::Other(parameter) => warnings
                    .at(index, |warnings| parameter_to_v3(parameter, scope.bounds, warnings)),
                classified => {
                    sources.add(Some(index), &classified);
                    None
                }
            })
            .collect()
    });

    if sources.body_count > 1 {
        warnings.push("multiple body parameters detected: only the last one is converted");
    }
    if sources.body.is_some() && !sources.form.is_empty() {
        warnings.push("body and formData parameters cannot be combined: formData parameters were dropped");
    }
    let request_body = match sources.body {
        Some((_, _, Some(name))) => Some(RefOr::reference(format!("{V3_REQUEST_BODIES}{name}"))),
        Some((index, parameter, None)) => {
            let convert = |warnings: &mut Warnings| body_to_v3(parameter, &consumes, scope.bounds, warnings);
            let body = match index {
                Some(index) => warnings.at("parameters", |warnings| warnings.at(index, convert)),
                None => convert(warnings),
            };
            Some(RefOr::T(body))
        }
        None if !sources.form.is_empty() => Some(RefOr::T(form_body_to_v3(
            &sources.form,
            &consumes,
            scope.bounds,
        ))),
        None => None,
    };

    let responses = warnings.at("responses", |warnings| {
        operation
            .responses
            .iter()
            .map(|(status, response)| {
                let response = warnings.at(status, |warnings| {
                    response_to_v3(response, &produces, scope.bounds, warnings)
                });
                (status.clone(), response)
            })
            .collect()
    });
    if !operation.schemes.is_empty() {
        warnings.at("schemes", |warnings| {
            warnings.push("operation-level schemes are not supported in OpenAPI 3.x and were ignored");
        });
    }

    v3::Operation {
        tags: operation.tags.clone(),
        summary: operation.summary.clone(),
        description: operation.description.clone(),
        external_docs: operation.external_docs.clone(),
        operation_id: operation.operation_id.clone(),
        parameters,
        request_body,
        responses,
        callbacks: IndexMap::new(),
        deprecated: operation.deprecated,
        security: operation.security.clone(),
        servers: vec![],
        extensions: operation.extensions.clone(),
    }
}

fn components_to_v3(scope: &Scope<'_>, warnings: &mut Warnings) -> Option<v3::Components> {
    let source = scope.source;
    let mut components = v3::Components::default();

    components.schemas = warnings.at("definitions", |warnings| {
        source
            .definitions
            .iter()
            .map(|(name, schema)| {
                let schema = warnings.at(name, |warnings| schema_to_v3(schema, scope.bounds, warnings));
                (name.clone(), schema)
            })
            .collect()
    });

    let consumes = media::effective(&[], &source.consumes);
    warnings.at("parameters", |warnings| {
        for (name, parameter) in &source.parameters {
            warnings.at(name, |warnings| match parameter.location {
                v2::ParameterIn::Body => {
                    let body = body_to_v3(parameter, &consumes, scope.bounds, warnings);
                    components.request_bodies.insert(name.clone(), RefOr::T(body));
                }
                v2::ParameterIn::FormData => warnings.push(format!(
                    "formData parameter '{name}' has no OpenAPI 3.x component equivalent: it is inlined at its use sites"
                )),
                _ => {
                    if let Some(parameter) = inline_parameter_to_v3(parameter, scope.bounds, warnings) {
                        components.parameters.insert(name.clone(), RefOr::T(parameter));
                    }
                }
            });
        }
    });

    let produces = media::effective(&[], &source.produces);
    components.responses = warnings.at("responses", |warnings| {
        source
            .responses
            .iter()
            .map(|(name, response)| {
                let response = warnings.at(name, |warnings| {
                    inline_response_to_v3(response, &produces, scope.bounds, warnings)
                });
                (name.clone(), RefOr::T(response))
            })
            .collect()
    });
    components.security_schemes = warnings.at("securityDefinitions", |warnings| {
        source
            .security_definitions
            .iter()
            .map(|(name, scheme)| {
                let scheme = warnings.at(name, |warnings| scheme_to_v3(scheme, warnings));
                (name.clone(), RefOr::T(scheme))
            })
            .collect()
    });

    (components != v3::Components::default()).then_some(components)
}
