use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::admin;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminResponse {
    pub admin_id: i64,
    pub email: String,
}

impl From<admin::Model> for AdminResponse {
    fn from(admin: admin::Model) -> Self {
        Self {
            admin_id: admin.id,
            email: admin.email,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub admin: AdminResponse,
    pub expires_at: DateTime<Utc>,
}
