use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::config::CONFIG;
use crate::endpoints::extractors::{ClientMeta, CurrentAdmin};
use crate::error::Result;
use crate::middleware::{require_admin, session_id_from_headers, SESSION_COOKIE_NAME};
use crate::schemas::{AdminResponse, LoginRequest, SessionResponse};
use crate::state::AppState;

/// Create auth routes for session management
pub fn auth_routes(state: AppState) -> Router {
    let session_routes = Router::new()
        .route("/session", get(current_session))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ));

    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .merge(session_routes)
        .with_state(state)
}

// ============================================================================
// Session Cookie Helpers
// ============================================================================

/// Create a session cookie with the given id
fn create_session_cookie(session_id: &str, max_age_secs: i64, secure: bool) -> HeaderValue {
    let cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}{}",
        SESSION_COOKIE_NAME,
        session_id,
        max_age_secs,
        if secure { "; Secure" } else { "" }
    );
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
}

/// Create a cookie that clears the session
fn clear_session_cookie() -> HeaderValue {
    let cookie = format!(
        "{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0",
        SESSION_COOKIE_NAME
    );
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
}

// ============================================================================
// Session Management Endpoints
// ============================================================================

/// Sign in with email and password, returns session cookie
async fn login(
    State(state): State<AppState>,
    ClientMeta(client): ClientMeta,
    Json(request): Json<LoginRequest>,
) -> Result<Response> {
    let (admin, session) = state
        .sessions
        .sign_in(&request.email, &request.password, client)
        .await?;

    let body = SessionResponse {
        admin: AdminResponse::from(admin),
        expires_at: session.expires_at,
    };

    Ok((
        [(
            header::SET_COOKIE,
            create_session_cookie(
                &session.id,
                state.sessions.ttl_secs(),
                CONFIG.auth.secure_cookies,
            ),
        )],
        Json(body),
    )
        .into_response())
}

/// Revoke the current session (if any) and clear the cookie
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    if let Some(session_id) = session_id_from_headers(&headers) {
        state.sessions.sign_out(&session_id).await?;
    }

    Ok((
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(serde_json::json!({"message": "Logged out"})),
    )
        .into_response())
}

/// Who is signed in, for the admin page guard
async fn current_session(CurrentAdmin(current): CurrentAdmin) -> Json<SessionResponse> {
    Json(SessionResponse {
        expires_at: current.session.expires_at,
        admin: AdminResponse::from(current.admin),
    })
}
