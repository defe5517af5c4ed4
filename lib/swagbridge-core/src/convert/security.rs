//! Security scheme mapping.
//!
//! | OpenAPI 3.x | Swagger 2.0 |
//! |---|---|
//! | `http` + `basic` | `basic` |
//! | `http` + `bearer` | `apiKey` in the `Authorization` header, format kept in `x-bearer-format` |
//! | `apiKey` | `apiKey` |
//! | `oauth2` | `oauth2` with a single flow |
//! | `openIdConnect` | `oauth2` without flow (warning) |
//!
//! The `x-bearer-format` extension is always written for bearer schemes, so the reverse
//! direction can rebuild `http` + `bearer` from it.

use serde_json::Value;

use super::Warnings;
use super::schema::X_DEPRECATED;
use crate::spec::v2::{self, OAuthFlowKind};
use crate::spec::v3::{self, OAuthFlow, OAuthFlows};

pub(crate) const X_BEARER_FORMAT: &str = "x-bearer-format";
const AUTHORIZATION: &str = "Authorization";
const BASIC: &str = "basic";
const BEARER: &str = "bearer";

pub(crate) fn scheme_to_v2(scheme: &v3::SecurityScheme, warnings: &mut Warnings) -> v2::SecurityScheme {
    let mut target = v2::SecurityScheme {
        description: scheme.description.clone(),
        extensions: scheme.extensions.clone(),
        ..v2::SecurityScheme::default()
    };

    match &scheme.scheme_type {
        v3::SecuritySchemeType::ApiKey => {
            target.scheme_type = Some(v2::SecuritySchemeType::ApiKey);
            target.name.clone_from(&scheme.name);
            target.location = match scheme.location {
                Some(v3::ApiKeyLocation::Query) => Some(v2::ApiKeyLocation::Query),
                Some(v3::ApiKeyLocation::Header) => Some(v2::ApiKeyLocation::Header),
                Some(v3::ApiKeyLocation::Cookie) => {
                    warnings.push("apiKey in cookie is not supported in Swagger 2.0: the location was dropped");
                    None
                }
                None => None,
            };
        }
        v3::SecuritySchemeType::Http => {
            let http_scheme = scheme.scheme.as_deref().map(str::to_ascii_lowercase);
            match http_scheme.as_deref() {
                Some(BASIC) => target.scheme_type = Some(v2::SecuritySchemeType::Basic),
                Some(BEARER) => {
                    target.scheme_type = Some(v2::SecuritySchemeType::ApiKey);
                    target.name = Some(AUTHORIZATION.to_owned());
                    target.location = Some(v2::ApiKeyLocation::Header);
                    let format = scheme.bearer_format.clone().unwrap_or_default();
                    target
                        .extensions
                        .insert(X_BEARER_FORMAT.to_owned(), Value::String(format));
                }
                other => warnings.push(format!(
                    "http scheme '{}' is not directly supported in Swagger 2.0",
                    other.unwrap_or_default()
                )),
            }
        }
        v3::SecuritySchemeType::Oauth2 => {
            target.scheme_type = Some(v2::SecuritySchemeType::Oauth2);
            if let Some(flows) = &scheme.flows {
                warnings.at("flows", |warnings| select_flow(flows, &mut target, warnings));
            }
            if scheme.oauth2_metadata_url.is_some() {
                warnings.push("oauth2MetadataUrl is not supported in Swagger 2.0 and was ignored");
            }
        }
        v3::SecuritySchemeType::OpenIdConnect => {
            warnings.push("openIdConnect is not supported in Swagger 2.0, converted to oauth2");
            target.scheme_type = Some(v2::SecuritySchemeType::Oauth2);
        }
        v3::SecuritySchemeType::MutualTls | v3::SecuritySchemeType::Other(_) => {
            warnings.push(format!(
                "security scheme type '{}' is not supported in Swagger 2.0",
                scheme.scheme_type
            ));
        }
    }

    if scheme.deprecated {
        target.extensions.insert(X_DEPRECATED.to_owned(), Value::Bool(true));
        warnings.push("deprecated security schemes are not supported in Swagger 2.0, converted to x-deprecated");
    }

    target
}

/// Keeps the highest priority flow: implicit, password, client credentials, then
/// authorization code.
fn select_flow(flows: &OAuthFlows, target: &mut v2::SecurityScheme, warnings: &mut Warnings) {
    let candidates = [
        (OAuthFlowKind::Implicit, &flows.implicit),
        (OAuthFlowKind::Password, &flows.password),
        (OAuthFlowKind::Application, &flows.client_credentials),
        (OAuthFlowKind::AccessCode, &flows.authorization_code),
    ];
    if let Some((kind, flow)) = candidates
        .into_iter()
        .find_map(|(kind, flow)| flow.as_ref().map(|flow| (kind, flow)))
    {
        target.flow = Some(kind);
        target.scopes.clone_from(&flow.scopes);
        if matches!(kind, OAuthFlowKind::Implicit | OAuthFlowKind::AccessCode) {
            target.authorization_url.clone_from(&flow.authorization_url);
        }
        if matches!(
            kind,
            OAuthFlowKind::Password | OAuthFlowKind::Application | OAuthFlowKind::AccessCode
        ) {
            target.token_url.clone_from(&flow.token_url);
        }
        if flow.refresh_url.is_some() {
            warnings.push("refreshUrl is not supported in Swagger 2.0 and was ignored");
        }
    }

    if flows.device_authorization.is_some() {
        warnings.push("deviceAuthorization OAuth2 flow is not supported in Swagger 2.0 and was ignored");
    }
    if flows.count() > 1 {
        warnings.push("multiple OAuth2 flows detected: Swagger 2.0 supports only one flow per security scheme");
    }
}

pub(crate) fn scheme_to_v3(scheme: &v2::SecurityScheme, warnings: &mut Warnings) -> v3::SecurityScheme {
    let mut extensions = scheme.extensions.clone();
    let deprecated = extensions.take_flag(X_DEPRECATED);
    let mut target = v3::SecurityScheme {
        description: scheme.description.clone(),
        deprecated,
        ..v3::SecurityScheme::default()
    };

    match scheme.scheme_type {
        Some(v2::SecuritySchemeType::Basic) => {
            target.scheme_type = v3::SecuritySchemeType::Http;
            target.scheme = Some(BASIC.to_owned());
        }
        Some(v2::SecuritySchemeType::ApiKey) => {
            if let Some(Value::String(format)) = extensions.shift_remove(X_BEARER_FORMAT) {
                target.scheme_type = v3::SecuritySchemeType::Http;
                target.scheme = Some(BEARER.to_owned());
                target.bearer_format = Some(format).filter(|format| !format.is_empty());
            } else {
                target.scheme_type = v3::SecuritySchemeType::ApiKey;
                target.name.clone_from(&scheme.name);
                target.location = scheme.location.map(|location| match location {
                    v2::ApiKeyLocation::Query => v3::ApiKeyLocation::Query,
                    v2::ApiKeyLocation::Header => v3::ApiKeyLocation::Header,
                });
            }
        }
        Some(v2::SecuritySchemeType::Oauth2) => {
            target.scheme_type = v3::SecuritySchemeType::Oauth2;
            target.flows = Some(rebuild_flows(scheme));
        }
        None => warnings.push("security definition has no type: converted as apiKey"),
    }

    target.extensions = extensions;
    target
}

fn rebuild_flows(scheme: &v2::SecurityScheme) -> OAuthFlows {
    let flow = OAuthFlow {
        scopes: scheme.scopes.clone(),
        ..OAuthFlow::default()
    };
    let mut flows = OAuthFlows::default();
    match scheme.flow {
        Some(OAuthFlowKind::Implicit) => {
            flows.implicit = Some(OAuthFlow {
                authorization_url: scheme.authorization_url.clone(),
                ..flow
            });
        }
        Some(OAuthFlowKind::Password) => {
            flows.password = Some(OAuthFlow {
                token_url: scheme.token_url.clone(),
                ..flow
            });
        }
        Some(OAuthFlowKind::Application) => {
            flows.client_credentials = Some(OAuthFlow {
                token_url: scheme.token_url.clone(),
                ..flow
            });
        }
        Some(OAuthFlowKind::AccessCode) => {
            flows.authorization_code = Some(OAuthFlow {
                authorization_url: scheme.authorization_url.clone(),
                token_url: scheme.token_url.clone(),
                ..flow
            });
        }
        None => {}
    }
    flows
}
