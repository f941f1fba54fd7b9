use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, HeaderMap},
};

/// Bucket shared by every client whose address cannot be determined.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Rate-limit identity of the caller.
///
/// Resolution order: first hop of `X-Forwarded-For`, then `X-Real-IP`, then
/// the socket peer address (only when the server was started with connect
/// info), then [`UNKNOWN_CLIENT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientKey(pub String);

impl ClientKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn resolve(headers: &HeaderMap, peer: Option<SocketAddr>) -> Self {
        if let Some(ip) = header_value(headers, "x-forwarded-for")
            .and_then(|v| v.split(',').next().map(str::trim).map(str::to_string))
            .filter(|v| !v.is_empty())
        {
            return ClientKey(ip);
        }

        if let Some(ip) = header_value(headers, "x-real-ip") {
            return ClientKey(ip);
        }

        match peer {
            Some(addr) => ClientKey(addr.ip().to_string()),
            None => ClientKey(UNKNOWN_CLIENT.to_string()),
        }
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientKey
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        Ok(ClientKey::resolve(&parts.headers, peer))
    }
}
