//! Request extractors shared by the endpoint modules.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{header, request::Parts},
};

use crate::config::CONFIG;
use crate::error::AppError;
use crate::middleware::AuthenticatedAdmin;
use crate::services::ClientInfo;

/// Hostname of the page the viewer is on, used as the clip embed `parent`.
/// Taken from the `Host` header with any port removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHost(pub String);

impl<S> FromRequestParts<S> for PageHost
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .map(strip_port)
            .filter(|h| !h.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| CONFIG.server.public_host.clone());

        Ok(PageHost(host))
    }
}

/// Drop a trailing `:port`, leaving bracketed IPv6 literals intact
pub fn strip_port(host: &str) -> &str {
    let host = host.trim();
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}

/// User agent and client address for session bookkeeping
pub struct ClientMeta(pub ClientInfo);

impl<S> FromRequestParts<S> for ClientMeta
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let ip_address = forwarded.or_else(|| {
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        });

        Ok(ClientMeta(ClientInfo {
            user_agent,
            ip_address,
        }))
    }
}

/// The signed-in admin, placed in request extensions by the session middleware
pub struct CurrentAdmin(pub AuthenticatedAdmin);

impl<S> FromRequestParts<S> for CurrentAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedAdmin>()
            .cloned()
            .map(CurrentAdmin)
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}
