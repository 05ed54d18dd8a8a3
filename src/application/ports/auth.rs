use crate::domain::entities::Session;
use crate::shared::error::AppError;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// External auth collaborator. Session lifecycle (refresh, expiry, email
/// confirmation) lives entirely behind this port.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Returns the current session, if one is established.
    async fn check_auth(&self) -> Result<Option<Session>, AppError>;
    /// May return `None` when email confirmation is still pending.
    async fn sign_up(
        &self,
        credentials: &Credentials,
        nickname: &str,
    ) -> Result<Option<Session>, AppError>;
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AppError>;
    async fn forgot_password(&self, email: &str) -> Result<(), AppError>;
    async fn sign_out(&self) -> Result<(), AppError>;
}

/// Read-only view of the current bearer token, consumed by the API client.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Option<String>;
}
