//! `$ref` rewriting between the component namespaces of both dialects.
//!
//! Only the first occurrence of a known prefix is rewritten; a file path in front of the
//! fragment and anything after the prefix pass through untouched.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::spec::{Dialect, RefOr};

pub(crate) const V3_SCHEMAS: &str = "#/components/schemas/";
pub(crate) const V3_PARAMETERS: &str = "#/components/parameters/";
pub(crate) const V3_RESPONSES: &str = "#/components/responses/";
pub(crate) const V3_SECURITY_SCHEMES: &str = "#/components/securitySchemes/";
pub(crate) const V3_REQUEST_BODIES: &str = "#/components/requestBodies/";
pub(crate) const V3_HEADERS: &str = "#/components/headers/";

pub(crate) const V2_DEFINITIONS: &str = "#/definitions/";
pub(crate) const V2_PARAMETERS: &str = "#/parameters/";
pub(crate) const V2_RESPONSES: &str = "#/responses/";
pub(crate) const V2_SECURITY_DEFINITIONS: &str = "#/securityDefinitions/";

const NAMESPACES: [(&str, &str); 4] = [
    (V3_SCHEMAS, V2_DEFINITIONS),
    (V3_PARAMETERS, V2_PARAMETERS),
    (V3_RESPONSES, V2_RESPONSES),
    (V3_SECURITY_SCHEMES, V2_SECURITY_DEFINITIONS),
];

/// Rewrites an OpenAPI 3.x reference into the Swagger 2.0 namespace.
///
/// ```rust
/// use swagbridge_core::convert::to_v2_ref;
///
/// assert_eq!(to_v2_ref("#/components/schemas/Pet"), "#/definitions/Pet");
/// assert_eq!(to_v2_ref("pets.yaml#/components/schemas/Pet"), "pets.yaml#/definitions/Pet");
/// assert_eq!(to_v2_ref(""), "");
/// ```
pub fn to_v2_ref(reference: &str) -> String {
    rewrite(reference, NAMESPACES.iter().map(|(v3, v2)| (*v3, *v2)))
}

/// Rewrites a Swagger 2.0 reference into the OpenAPI 3.x namespace.
///
/// ```rust
/// use swagbridge_core::convert::to_v3_ref;
///
/// assert_eq!(to_v3_ref("#/definitions/Pet"), "#/components/schemas/Pet");
/// assert_eq!(to_v3_ref("#/parameters/limit"), "#/components/parameters/limit");
/// ```
pub fn to_v3_ref(reference: &str) -> String {
    rewrite(reference, NAMESPACES.iter().map(|(v3, v2)| (*v2, *v3)))
}

fn rewrite<'a>(reference: &str, table: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    for (from, to) in table {
        if reference.contains(from) {
            return reference.replacen(from, to, 1);
        }
    }
    reference.to_owned()
}

/// Extracts the local definition name of a schema reference.
///
/// External-file references yield `None`.
///
/// ```rust
/// use swagbridge_core::convert::schema_name;
/// use swagbridge_core::spec::Dialect;
///
/// assert_eq!(schema_name("#/definitions/Pet", Dialect::Swagger2), Some("Pet"));
/// assert_eq!(schema_name("#/components/schemas/Pet", Dialect::OpenApi3), Some("Pet"));
/// assert_eq!(schema_name("other.yaml#/definitions/Pet", Dialect::Swagger2), None);
/// ```
pub fn schema_name(reference: &str, dialect: Dialect) -> Option<&str> {
    let prefix = match dialect {
        Dialect::Swagger2 => V2_DEFINITIONS,
        Dialect::OpenApi3 => V3_SCHEMAS,
    };
    local_name(reference, prefix)
}

/// Extracts the component name of a local reference under `prefix`.
pub(crate) fn local_name<'a>(reference: &'a str, prefix: &str) -> Option<&'a str> {
    reference
        .strip_prefix(prefix)
        .filter(|name| !name.is_empty())
}

/// Follows local references under `prefix` until an inline value is found.
///
/// Returns `None` for external references, missing names and reference cycles.
pub(crate) fn resolve<'a, T>(
    node: &'a RefOr<T>,
    named: Option<&'a IndexMap<String, RefOr<T>>>,
    prefix: &str,
) -> Option<&'a T> {
    let mut current = node;
    let mut seen = HashSet::new();
    loop {
        match current {
            RefOr::T(value) => return Some(value),
            RefOr::Ref(reference) => {
                let name = local_name(&reference.ref_location, prefix)?;
                if !seen.insert(name) {
                    return None;
                }
                current = named?.get(name)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_rewrite_every_namespace() {
        assert_eq!(to_v2_ref("#/components/schemas/Pet"), "#/definitions/Pet");
        assert_eq!(to_v2_ref("#/components/parameters/limit"), "#/parameters/limit");
        assert_eq!(to_v2_ref("#/components/responses/NotFound"), "#/responses/NotFound");
        assert_eq!(
            to_v2_ref("#/components/securitySchemes/oauth"),
            "#/securityDefinitions/oauth"
        );
    }

    #[test]
    fn should_pass_through_unknown_fragments() {
        assert_eq!(to_v2_ref("#/components/examples/Pet"), "#/components/examples/Pet");
        assert_eq!(to_v3_ref("https://example.com/pet.json"), "https://example.com/pet.json");
        assert_eq!(to_v3_ref(""), "");
    }

    #[test]
    fn should_rewrite_only_first_occurrence() {
        assert_eq!(
            to_v3_ref("#/definitions/#/definitions/Pet"),
            "#/components/schemas/#/definitions/Pet"
        );
    }

    #[test]
    fn should_round_trip_legacy_references() {
        for reference in [
            "#/definitions/Pet",
            "#/parameters/limit",
            "#/responses/NotFound",
            "#/securityDefinitions/apiKey",
            "common.yaml#/definitions/Error",
        ] {
            assert_eq!(to_v2_ref(&to_v3_ref(reference)), reference);
        }
    }

    #[test]
    fn should_not_confuse_nested_prefixes() {
        assert_eq!(
            to_v3_ref("#/components/parameters/limit"),
            "#/components/parameters/limit"
        );
    }

    #[test]
    fn should_extract_schema_name() {
        assert_eq!(schema_name("#/definitions/Pet", Dialect::Swagger2), Some("Pet"));
        assert_eq!(schema_name("#/definitions/", Dialect::Swagger2), None);
        assert_eq!(schema_name("#/definitions/Pet", Dialect::OpenApi3), None);
    }

    #[test]
    fn should_resolve_reference_chains() {
        let named: IndexMap<String, RefOr<u8>> = [
            ("Alias".to_owned(), RefOr::reference("#/definitions/Value")),
            ("Value".to_owned(), RefOr::T(42)),
            ("Loop".to_owned(), RefOr::reference("#/definitions/Loop")),
        ]
        .into_iter()
        .collect();

        let alias = RefOr::reference("#/definitions/Alias");
        let cycle = RefOr::reference("#/definitions/Loop");
        let missing = RefOr::reference("#/definitions/Missing");

        assert_eq!(resolve(&alias, Some(&named), V2_DEFINITIONS), Some(&42));
        assert_eq!(resolve(&cycle, Some(&named), V2_DEFINITIONS), None);
        assert_eq!(resolve(&missing, Some(&named), V2_DEFINITIONS), None);
        assert_eq!(resolve(&alias, None, V2_DEFINITIONS), None);
    }
}
