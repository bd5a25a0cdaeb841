//! Session middleware for the admin routes
//!
//! Reads the session cookie, resolves it through the session service and
//! stores the signed-in admin in request extensions.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::{admin, admin_session};
use crate::state::AppState;

pub const SESSION_COOKIE_NAME: &str = "tracker_session";

/// Authenticated admin stored in request extensions
#[derive(Clone, Debug)]
pub struct AuthenticatedAdmin {
    pub admin: admin::Model,
    pub session: admin_session::Model,
}

/// Rejects the request with 401 unless it carries a live admin session
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let session_id = match session_id_from_headers(req.headers()) {
        Some(id) => id,
        None => return unauthorized_response("Authentication required"),
    };

    let (admin, session) = match state.sessions.authenticate(&session_id).await {
        Ok(found) => found,
        Err(e) => {
            tracing::debug!("Rejected admin session: {}", e);
            return unauthorized_response("Invalid or expired session");
        }
    };

    req.extensions_mut()
        .insert(AuthenticatedAdmin { admin, session });

    next.run(req).await
}

/// Extract the session id from the cookie header
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    let prefix = format!("{}=", SESSION_COOKIE_NAME);
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(prefix.as_str()))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Create a 401 Unauthorized JSON response
fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "detail": message
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_session_id_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; tracker_session=abc-123; other=1"),
        );
        assert_eq!(session_id_from_headers(&headers).as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_missing_or_empty_cookie() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_id_from_headers(&headers), None);

        headers.insert(header::COOKIE, HeaderValue::from_static("tracker_session="));
        assert_eq!(session_id_from_headers(&headers), None);
    }
}
