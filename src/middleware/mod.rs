pub mod auth;
pub mod security_headers;

pub use auth::{require_admin, session_id_from_headers, AuthenticatedAdmin, SESSION_COOKIE_NAME};
pub use security_headers::security_headers;
