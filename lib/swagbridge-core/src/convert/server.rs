//! Server URL ↔ `host` / `basePath` / `schemes`.

use tracing::warn;
use url::Url;

use super::Warnings;
use crate::spec::v3::Server;

const DEFAULT_SCHEME: &str = "https";
const ROOT_PATH: &str = "/";

/// Where a Swagger 2.0 document is served from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Location {
    pub(crate) host: Option<String>,
    pub(crate) base_path: Option<String>,
    pub(crate) schemes: Vec<String>,
}

/// Derives the legacy location from the first server.
///
/// Template variables are not substituted: the braces are removed and the variable names
/// stay in the URL.
pub(crate) fn to_location(servers: &[Server], warnings: &mut Warnings) -> Location {
    let Some(server) = servers.first() else {
        return Location::default();
    };
    if servers.len() > 1 {
        warnings.push(format!(
            "{} servers declared: only '{}' is converted to host/basePath/schemes in Swagger 2.0",
            servers.len(),
            server.url
        ));
    }

    let raw = server.url.replace(['{', '}'], "");
    if raw.starts_with('/') {
        return Location {
            base_path: Some(raw),
            ..Location::default()
        };
    }

    match Url::parse(&raw) {
        Ok(url) => {
            let host = url.host_str().map(|host| match url.port() {
                Some(port) => format!("{host}:{port}"),
                None => host.to_owned(),
            });
            let base_path = match url.path() {
                "" => ROOT_PATH.to_owned(),
                path => path.to_owned(),
            };
            Location {
                host,
                base_path: Some(base_path),
                schemes: vec![url.scheme().to_owned()],
            }
        }
        Err(error) => {
            warn!(url = %server.url, %error, "unparsable server URL");
            warnings.push(format!("failed to parse server URL '{}': {error}", server.url));
            Location::default()
        }
    }
}

/// Rebuilds one server from the legacy location.
///
/// Only the first scheme is used; without a scheme `https` is assumed.
pub(crate) fn to_servers(
    host: Option<&str>,
    base_path: Option<&str>,
    schemes: &[String],
    warnings: &mut Warnings,
) -> Vec<Server> {
    let base_path = base_path.filter(|path| !path.is_empty());
    let Some(host) = host.filter(|host| !host.is_empty()) else {
        return base_path.map(Server::new).into_iter().collect();
    };

    if schemes.len() > 1 {
        warnings.push(format!(
            "{} schemes declared: only '{}' is used for the server URL",
            schemes.len(),
            schemes.first().map_or(DEFAULT_SCHEME, String::as_str)
        ));
    }
    let scheme = schemes.first().map_or(DEFAULT_SCHEME, String::as_str);
    let path = base_path.filter(|path| *path != ROOT_PATH).unwrap_or_default();

    vec![Server::new(format!("{scheme}://{host}{path}"))]
}
