use std::collections::BTreeSet;

use indexmap::IndexMap;

use super::partitioner::Partitionable;
use super::reachability::{SchemaRefs, collect_node, reachable};
use super::visibility::{VisibilityFilter, is_tagged};
use crate::convert::{V2_DEFINITIONS, V2_PARAMETERS, V2_RESPONSES, V3_HEADERS};
use crate::convert::{V3_PARAMETERS, V3_REQUEST_BODIES, V3_RESPONSES, V3_SCHEMAS, local_name};
use crate::spec::{RefOr, v2, v3};

/// Everything the kept operations point at.
#[derive(Debug, Default)]
struct Usage {
    schema_refs: Vec<String>,
    parameters: BTreeSet<String>,
    responses: BTreeSet<String>,
    request_bodies: BTreeSet<String>,
    headers: BTreeSet<String>,
}

impl Usage {
    fn schema<S: SchemaRefs>(&mut self, node: &RefOr<S>) {
        let mut refs = Vec::new();
        collect_node(node, &mut refs);
        self.schema_refs.extend(refs.into_iter().map(str::to_owned));
    }
}

/// Marks the component named by `reference` and returns it on first visit.
fn follow<'c, T>(
    marked: &mut BTreeSet<String>,
    reference: &str,
    prefix: &str,
    named: Option<&'c IndexMap<String, T>>,
) -> Option<&'c T> {
    let name = local_name(reference, prefix)?;
    if !marked.insert(name.to_owned()) {
        return None;
    }
    named?.get(name)
}

struct V3Usage<'a> {
    components: &'a v3::Components,
    usage: Usage,
}

impl<'a> V3Usage<'a> {
    fn new(components: &'a v3::Components) -> Self {
        Self {
            components,
            usage: Usage::default(),
        }
    }

    fn path_item(&mut self, item: &v3::PathItem) {
        for parameter in &item.parameters {
            self.parameter(parameter);
        }
        for (_, operation) in item.operations() {
            for parameter in &operation.parameters {
                self.parameter(parameter);
            }
            if let Some(body) = &operation.request_body {
                self.request_body(body);
            }
            for response in operation.responses.values() {
                self.response(response);
            }
        }
    }

    fn parameter(&mut self, node: &RefOr<v3::Parameter>) {
        match node {
            RefOr::Ref(reference) => {
                let components = self.components;
                let named = Some(&components.parameters);
                if let Some(target) =
                    follow(&mut self.usage.parameters, &reference.ref_location, V3_PARAMETERS, named)
                {
                    self.parameter(target);
                }
            }
            RefOr::T(parameter) => {
                if let Some(schema) = &parameter.schema {
                    self.usage.schema(schema);
                }
                self.content(&parameter.content);
            }
        }
    }

    fn request_body(&mut self, node: &RefOr<v3::RequestBody>) {
        match node {
            RefOr::Ref(reference) => {
                let components = self.components;
                let named = Some(&components.request_bodies);
                if let Some(target) = follow(
                    &mut self.usage.request_bodies,
                    &reference.ref_location,
                    V3_REQUEST_BODIES,
                    named,
                ) {
                    self.request_body(target);
                }
            }
            RefOr::T(body) => self.content(&body.content),
        }
    }

    fn response(&mut self, node: &RefOr<v3::Response>) {
        match node {
            RefOr::Ref(reference) => {
                let components = self.components;
                let named = Some(&components.responses);
                if let Some(target) =
                    follow(&mut self.usage.responses, &reference.ref_location, V3_RESPONSES, named)
                {
                    self.response(target);
                }
            }
            RefOr::T(response) => {
                self.content(&response.content);
                for header in response.headers.values() {
                    self.header(header);
                }
            }
        }
    }

    fn header(&mut self, node: &RefOr<v3::Header>) {
        match node {
            RefOr::Ref(reference) => {
                let components = self.components;
                let named = Some(&components.headers);
                if let Some(target) =
                    follow(&mut self.usage.headers, &reference.ref_location, V3_HEADERS, named)
                {
                    self.header(target);
                }
            }
            RefOr::T(header) => {
                if let Some(schema) = &header.schema {
                    self.usage.schema(schema);
                }
            }
        }
    }

    fn content(&mut self, content: &IndexMap<String, v3::MediaType>) {
        for schema in content.values().filter_map(|media| media.schema.as_ref()) {
            self.usage.schema(schema);
        }
    }
}

impl Partitionable for v3::OpenApi {
    fn has_visibility_tags(&self, key: &str) -> bool {
        self.operations()
            .any(|(_, _, operation)| is_tagged(&operation.extensions, key))
    }

    fn partition(&self, filter: &VisibilityFilter) -> Self {
        let mut document = self.clone();
        document.paths.retain(|_, item| {
            item.retain_operations(|operation| filter.matches(&operation.extensions));
            !item.has_no_operation()
        });

        let Some(components) = &self.components else {
            return document;
        };
        let mut visitor = V3Usage::new(components);
        for item in document.paths.values() {
            visitor.path_item(item);
        }
        let usage = visitor.usage;
        let schemas = reachable(&usage.schema_refs, &components.schemas, V3_SCHEMAS);

        if let Some(kept) = &mut document.components {
            kept.schemas.retain(|name, _| schemas.contains(name));
            kept.parameters.retain(|name, _| usage.parameters.contains(name));
            kept.responses.retain(|name, _| usage.responses.contains(name));
            kept.request_bodies
                .retain(|name, _| usage.request_bodies.contains(name));
            kept.headers.retain(|name, _| usage.headers.contains(name));
        }
        document
    }

    fn operation_count(&self) -> usize {
        self.operations().count()
    }

    fn definition_count(&self) -> usize {
        self.components
            .as_ref()
            .map_or(0, |components| components.schemas.len())
    }
}

struct V2Usage<'a> {
    source: &'a v2::Swagger,
    usage: Usage,
}

impl V2Usage<'_> {
    fn path_item(&mut self, item: &v2::PathItem) {
        for parameter in &item.parameters {
            self.parameter(parameter);
        }
        for (_, operation) in item.operations() {
            for parameter in &operation.parameters {
                self.parameter(parameter);
            }
            for response in operation.responses.values() {
                self.response(response);
            }
        }
    }

    fn parameter(&mut self, node: &RefOr<v2::Parameter>) {
        let parameter = match node {
            RefOr::Ref(reference) => {
                let source = self.source;
                let named = Some(&source.parameters);
                let marked = &mut self.usage.parameters;
                let Some(parameter) = follow(marked, &reference.ref_location, V2_PARAMETERS, named)
                else {
                    return;
                };
                parameter
            }
            RefOr::T(parameter) => parameter,
        };
        if let Some(schema) = &parameter.schema {
            self.usage.schema(schema);
        }
    }

    fn response(&mut self, node: &RefOr<v2::Response>) {
        let response = match node {
            RefOr::Ref(reference) => {
                let source = self.source;
                let named = Some(&source.responses);
                let marked = &mut self.usage.responses;
                let Some(response) = follow(marked, &reference.ref_location, V2_RESPONSES, named)
                else {
                    return;
                };
                response
            }
            RefOr::T(response) => response,
        };
        if let Some(schema) = &response.schema {
            self.usage.schema(schema);
        }
    }
}

impl Partitionable for v2::Swagger {
    fn has_visibility_tags(&self, key: &str) -> bool {
        self.operations()
            .any(|(_, _, operation)| is_tagged(&operation.extensions, key))
    }

    fn partition(&self, filter: &VisibilityFilter) -> Self {
        let mut document = self.clone();
        document.paths.retain(|_, item| {
            item.retain_operations(|operation| filter.matches(&operation.extensions));
            !item.has_no_operation()
        });

        let mut visitor = V2Usage {
            source: self,
            usage: Usage::default(),
        };
        for item in document.paths.values() {
            visitor.path_item(item);
        }
        let usage = visitor.usage;
        let definitions = reachable(&usage.schema_refs, &self.definitions, V2_DEFINITIONS);

        document.definitions.retain(|name, _| definitions.contains(name));
        document.parameters.retain(|name, _| usage.parameters.contains(name));
        document.responses.retain(|name, _| usage.responses.contains(name));
        document
    }

    fn operation_count(&self) -> usize {
        self.operations().count()
    }

    fn definition_count(&self) -> usize {
        self.definitions.len()
    }
}
