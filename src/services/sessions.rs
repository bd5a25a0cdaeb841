//! Admin sign-in and the sessions backing the dashboard cookie.

use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set,
};

use crate::db::DbConn;
use crate::error::{AppError, Result};
use crate::models::prelude::*;
use crate::services::security::{
    generate_session_id, hash_password, normalize_email, verify_password,
};

/// Message shown inline on the login form for any credential problem
pub const INVALID_CREDENTIALS: &str = "Invalid login credentials";

/// Request metadata recorded alongside a new session
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

#[derive(Clone)]
pub struct SessionService {
    db: DbConn,
    ttl: Duration,
}

impl SessionService {
    pub fn new(db: DbConn, ttl_secs: i64) -> Self {
        Self {
            db,
            ttl: Duration::seconds(ttl_secs),
        }
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Check email/password and open a new session
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
        client: ClientInfo,
    ) -> Result<(admin::Model, admin_session::Model)> {
        let found = Admin::find()
            .filter(admin::Column::Email.eq(normalize_email(email)))
            .one(&self.db)
            .await?;

        let found = match found {
            Some(a) if a.is_active && verify_password(password, &a.hashed_password) => a,
            _ => {
                tracing::warn!("Failed admin login for {}", email);
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };

        let now = Utc::now();
        let session = admin_session::ActiveModel {
            id: Set(generate_session_id()),
            admin_id: Set(found.id),
            user_agent: Set(client.user_agent),
            ip_address: Set(client.ip_address),
            created_at: Set(now),
            expires_at: Set(now + self.ttl),
            last_accessed_at: Set(now),
            is_revoked: Set(false),
        }
        .insert(&self.db)
        .await?;

        tracing::info!("Admin {} signed in", found.email);
        Ok((found, session))
    }

    /// Resolve a session id to its admin, touching `last_accessed_at`
    pub async fn authenticate(
        &self,
        session_id: &str,
    ) -> Result<(admin::Model, admin_session::Model)> {
        let now = Utc::now();

        let (session, found) = AdminSession::find_by_id(session_id.to_string())
            .find_also_related(Admin)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Session not found".to_string()))?;

        if !session.is_valid_at(now) {
            return Err(AppError::Unauthorized("Session expired".to_string()));
        }

        let found = found
            .filter(|a| a.is_active)
            .ok_or_else(|| AppError::Unauthorized("Admin not found or inactive".to_string()))?;

        let mut touched = session.into_active_model();
        touched.last_accessed_at = Set(now);
        let session = touched.update(&self.db).await?;

        Ok((found, session))
    }

    /// Revoke a session. Unknown ids are ignored so sign-out always succeeds.
    pub async fn sign_out(&self, session_id: &str) -> Result<()> {
        if let Some(session) = AdminSession::find_by_id(session_id.to_string())
            .one(&self.db)
            .await?
        {
            let mut revoked = session.into_active_model();
            revoked.is_revoked = Set(true);
            revoked.update(&self.db).await?;
            tracing::info!("Admin session revoked");
        }
        Ok(())
    }

    /// Create the admin account if no account with that email exists yet
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<admin::Model> {
        let email = normalize_email(email);
        if let Some(existing) = Admin::find()
            .filter(admin::Column::Email.eq(email.as_str()))
            .one(&self.db)
            .await?
        {
            return Ok(existing);
        }

        let now = Utc::now();
        let created = admin::ActiveModel {
            email: Set(email),
            hashed_password: Set(hash_password(password)?),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!("Created admin account {}", created.email);
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::create_test_db;

    async fn service() -> SessionService {
        let db = create_test_db().await;
        let service = SessionService::new(db, 3600);
        service.ensure_admin("Admin@Example.com", "correct horse").await.unwrap();
        service
    }

    #[tokio::test]
    async fn test_sign_in_and_authenticate() {
        let service = service().await;
        let (found, session) = service
            .sign_in("admin@example.com", "correct horse", ClientInfo::default())
            .await
            .unwrap();
        assert_eq!(found.email, "admin@example.com");
        assert!(session.expires_at > session.created_at);

        let (again, _) = service.authenticate(&session.id).await.unwrap();
        assert_eq!(again.id, found.id);
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let service = service().await;
        let result = service
            .sign_in("admin@example.com", "wrong", ClientInfo::default())
            .await;
        match result {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, INVALID_CREDENTIALS),
            other => panic!("expected unauthorized, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_unknown_email_is_unauthorized() {
        let service = service().await;
        let result = service
            .sign_in("nobody@example.com", "correct horse", ClientInfo::default())
            .await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_sign_out_revokes() {
        let service = service().await;
        let (_, session) = service
            .sign_in("admin@example.com", "correct horse", ClientInfo::default())
            .await
            .unwrap();

        service.sign_out(&session.id).await.unwrap();
        assert!(matches!(
            service.authenticate(&session.id).await,
            Err(AppError::Unauthorized(_))
        ));
        // Second sign-out of the same or unknown session is fine
        service.sign_out(&session.id).await.unwrap();
        service.sign_out("missing").await.unwrap();
    }

    #[tokio::test]
    async fn test_ensure_admin_is_idempotent() {
        let service = service().await;
        let first = service.ensure_admin("admin@example.com", "other").await.unwrap();
        let second = service.ensure_admin("ADMIN@example.com", "other").await.unwrap();
        assert_eq!(first.id, second.id);
    }
}
