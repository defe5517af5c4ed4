//! Mark phase of the partitioner: which named definitions a set of `$ref`s can reach.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::convert::local_name;
use crate::spec::{AdditionalProperties, RefOr, v2, v3};

/// Schema models whose nested `$ref`s can be listed.
pub(crate) trait SchemaRefs {
    /// Appends every `$ref` of this schema and its inline subschemas.
    fn collect_refs<'a>(&'a self, refs: &mut Vec<&'a str>);
}

/// Appends the `$ref` of `node`, or the nested ones of its inline schema.
pub(crate) fn collect_node<'a, S: SchemaRefs>(node: &'a RefOr<S>, refs: &mut Vec<&'a str>) {
    match node {
        RefOr::Ref(reference) => refs.push(&reference.ref_location),
        RefOr::T(schema) => schema.collect_refs(refs),
    }
}

fn collect_additional<'a, S: SchemaRefs>(
    additional: Option<&'a AdditionalProperties<S>>,
    refs: &mut Vec<&'a str>,
) {
    if let Some(AdditionalProperties::Schema(schema)) = additional {
        collect_node(schema, refs);
    }
}

impl SchemaRefs for v3::Schema {
    fn collect_refs<'a>(&'a self, refs: &mut Vec<&'a str>) {
        let children = self
            .properties
            .values()
            .chain(self.items.as_deref())
            .chain(&self.prefix_items)
            .chain(&self.all_of)
            .chain(&self.one_of)
            .chain(&self.any_of)
            .chain(self.not.as_deref());
        for child in children {
            collect_node(child, refs);
        }
        collect_additional(self.additional_properties.as_ref(), refs);
    }
}

impl SchemaRefs for v2::Schema {
    fn collect_refs<'a>(&'a self, refs: &mut Vec<&'a str>) {
        let children = self
            .properties
            .values()
            .chain(self.items.as_deref())
            .chain(&self.all_of);
        for child in children {
            collect_node(child, refs);
        }
        collect_additional(self.additional_properties.as_ref(), refs);
    }
}

/// Names of the definitions reachable from `roots`.
///
/// `roots` are `$ref` strings; only local ones under `prefix` are followed. A definition is
/// visited once, so cyclic schema graphs terminate. Dangling references are ignored.
pub(crate) fn reachable<S: SchemaRefs>(
    roots: &[String],
    definitions: &IndexMap<String, RefOr<S>>,
    prefix: &str,
) -> BTreeSet<String> {
    let mut visited = BTreeSet::new();
    let mut worklist: Vec<&str> = roots.iter().map(String::as_str).collect();

    while let Some(reference) = worklist.pop() {
        let Some(name) = local_name(reference, prefix) else {
            continue;
        };
        if visited.contains(name) {
            continue;
        }
        let Some(definition) = definitions.get(name) else {
            continue;
        };
        visited.insert(name.to_owned());
        collect_node(definition, &mut worklist);
    }

    visited
}
