//! HTTP security headers middleware
//!
//! Adds standard security headers to every response. Framing is limited to
//! the same origin, and the only third-party frame source allowed is the
//! Twitch clip player.

use axum::{extract::Request, middleware::Next, response::Response};
use http::HeaderValue;

const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; script-src 'self'; \
     style-src 'self' 'unsafe-inline'; frame-src https://clips.twitch.tv; \
     connect-src 'self' ws: wss:";

pub async fn security_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert("x-frame-options", HeaderValue::from_static("SAMEORIGIN"));
    headers.insert(
        "x-content-type-options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        "referrer-policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        "content-security-policy",
        HeaderValue::from_static(CONTENT_SECURITY_POLICY),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, middleware, routing::get, Router};
    use http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn dummy_handler() -> &'static str {
        "ok"
    }

    async fn send() -> axum::response::Response {
        Router::new()
            .route("/test", get(dummy_handler))
            .layer(middleware::from_fn(security_headers))
            .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_basic_headers_present() {
        let response = send().await;

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers.get("x-frame-options").unwrap(), "SAMEORIGIN");
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(
            headers.get("referrer-policy").unwrap(),
            "strict-origin-when-cross-origin"
        );
    }

    #[tokio::test]
    async fn test_csp_allows_twitch_clip_frames() {
        let response = send().await;

        let csp = response
            .headers()
            .get("content-security-policy")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(csp.contains("default-src 'self'"));
        assert!(csp.contains("frame-src https://clips.twitch.tv"));
    }
}
