//! Scheduler endpoint normalization.
//!
//! Users hand over anything from a bare host name to a full URL. The scheduler only serves its
//! API over http(s) at `/api`, so every address is brought into `scheme://host:port/api` form
//! here and later RPC code can use the result as-is.
use std::borrow::Cow;

use tracing::debug;
use url::{Position, Url};

use crate::error::EndpointError;

/// Port assumed when the address does not carry one.
pub const DEFAULT_PORT: u16 = 8081;

/// The only path the scheduler API is served on.
pub const API_PATH: &str = "/api";

/// Normalize a scheduler address into `scheme://host:port/api`.
///
/// Missing pieces are filled in: `http://` when no scheme is given, `/api` when there is no
/// path, and port 8081 when there is no port. The result always spells out the port, so
/// validating it again returns the same string.
pub fn validate_address(address: &str) -> Result<String, EndpointError> {
    let address = if address.contains("://") {
        Cow::Borrowed(address)
    } else {
        Cow::Owned(format!("http://{address}"))
    };

    let mut url = Url::parse(&address)?;
    let (authority, has_path) = split_authority(&address);

    if !has_path {
        url.set_path(API_PATH);
    }

    // Host-less schemes such as `file` cannot take a port, so the scheme is checked first.
    if !matches!(url.scheme(), "http" | "https") {
        return Err(EndpointError::UnsupportedScheme(url.scheme().to_string()));
    }

    if !has_explicit_port(authority) {
        url.set_port(Some(DEFAULT_PORT))
            .map_err(|_| EndpointError::MissingHost(address.to_string()))?;
    }

    if url.path() != API_PATH {
        return Err(EndpointError::UnexpectedPath(url.path().to_string()));
    }

    let endpoint = render(&url);
    debug!(input = %address, endpoint = %endpoint, "scheduler endpoint normalized");
    Ok(endpoint)
}

/// Returns the authority of `address` and whether a path follows it.
///
/// Parsed URLs with http(s) schemes always report at least `/` as their path, so the raw
/// text decides whether a path was given at all.
fn split_authority(address: &str) -> (&str, bool) {
    let rest = address.split_once("://").map_or(address, |(_, rest)| rest);
    match rest.find(['/', '?', '#']) {
        Some(i) => (&rest[..i], rest[i..].starts_with('/')),
        None => (rest, false),
    }
}

fn has_explicit_port(authority: &str) -> bool {
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);
    // IPv6 literals carry colons inside the brackets.
    let after_host = match host_port.strip_prefix('[') {
        Some(v6) => v6.split_once(']').map_or("", |(_, rest)| rest),
        None => host_port,
    };
    after_host
        .rsplit_once(':')
        .is_some_and(|(_, port)| !port.is_empty())
}

/// Serialize `url`, keeping the port even when it is the scheme's default.
fn render(url: &Url) -> String {
    match url.port_or_known_default() {
        Some(port) if url.port().is_none() => format!(
            "{}:{port}{}",
            &url[..Position::AfterHost],
            &url[Position::BeforePath..]
        ),
        _ => url.to_string(),
    }
}
