use crate::application::ports::auth::{AccessTokenProvider, AuthGateway, Credentials};
use crate::domain::entities::{AuthStatus, Session, SessionUser};
use crate::shared::error::AppError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

struct SessionState {
    session: Option<Session>,
    status: AuthStatus,
    is_signing_up: bool,
    is_signing_in: bool,
    is_requesting_reset: bool,
    error: Option<String>,
    notice: Option<String>,
}

/// The auth session store. Holds the current session and the transient
/// loading/error/notice state of each auth flow; doubles as the token
/// source for authenticated API calls.
pub struct SessionService {
    gateway: Arc<dyn AuthGateway>,
    state: RwLock<SessionState>,
}

impl SessionService {
    pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
        Self {
            gateway,
            state: RwLock::new(SessionState {
                session: None,
                status: AuthStatus::Idle,
                is_signing_up: false,
                is_signing_in: false,
                is_requesting_reset: false,
                error: None,
                notice: None,
            }),
        }
    }

    /// Restores an existing session at startup, if the auth collaborator
    /// still has one. A missing session is not an error.
    pub async fn check_auth(&self) -> Result<(), AppError> {
        {
            let mut state = self.state.write().await;
            state.status = AuthStatus::Loading;
            state.error = None;
        }

        match self.gateway.check_auth().await {
            Ok(session) => {
                let mut state = self.state.write().await;
                state.status = AuthStatus::Succeeded;
                state.session = session;
                Ok(())
            }
            Err(err) => {
                let mut state = self.state.write().await;
                state.status = AuthStatus::Failed;
                state.session = None;
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub async fn sign_up(&self, credentials: Credentials, nickname: &str) -> Result<(), AppError> {
        {
            let mut state = self.state.write().await;
            state.is_signing_up = true;
            state.error = None;
            state.notice = None;
        }

        match self.gateway.sign_up(&credentials, nickname).await {
            Ok(session) => {
                let mut state = self.state.write().await;
                state.is_signing_up = false;
                state.notice = Some(
                    "Account created! Please check your email for verification.".to_string(),
                );
                if session.is_some() {
                    state.status = AuthStatus::Succeeded;
                    state.session = session;
                }
                Ok(())
            }
            Err(err) => {
                let mut state = self.state.write().await;
                state.is_signing_up = false;
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub async fn sign_in(&self, credentials: Credentials) -> Result<(), AppError> {
        {
            let mut state = self.state.write().await;
            state.is_signing_in = true;
            state.error = None;
            state.notice = None;
        }

        match self.gateway.sign_in(&credentials).await {
            Ok(session) => {
                info!(user_id = %session.user.id, "signed in");
                let mut state = self.state.write().await;
                state.is_signing_in = false;
                state.status = AuthStatus::Succeeded;
                state.session = Some(session);
                state.notice = Some("Successfully signed in!".to_string());
                Ok(())
            }
            Err(err) => {
                let mut state = self.state.write().await;
                state.is_signing_in = false;
                state.status = AuthStatus::Failed;
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub async fn forgot_password(&self, email: &str) -> Result<(), AppError> {
        {
            let mut state = self.state.write().await;
            state.is_requesting_reset = true;
            state.error = None;
            state.notice = None;
        }

        match self.gateway.forgot_password(email).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                state.is_requesting_reset = false;
                state.notice =
                    Some("Password reset email sent! Please check your inbox.".to_string());
                Ok(())
            }
            Err(err) => {
                let mut state = self.state.write().await;
                state.is_requesting_reset = false;
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Signs out and drops the local session. The local session is cleared
    /// even when the remote call fails.
    pub async fn sign_out(&self) -> Result<(), AppError> {
        let result = self.gateway.sign_out().await;
        if let Err(err) = &result {
            warn!(error = %err, "remote sign-out failed, clearing local session anyway");
        }

        let mut state = self.state.write().await;
        state.session = None;
        state.status = AuthStatus::Idle;
        state.error = None;
        state.notice = None;
        result
    }

    /// Installs a session delivered out of band, e.g. by an auth redirect.
    pub async fn set_session(&self, session: Session) {
        let mut state = self.state.write().await;
        state.status = AuthStatus::Succeeded;
        state.session = Some(session);
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    pub async fn clear_notice(&self) {
        self.state.write().await.notice = None;
    }

    // Selectors

    pub async fn session(&self) -> Option<Session> {
        self.state.read().await.session.clone()
    }

    pub async fn current_user(&self) -> Option<SessionUser> {
        self.state.read().await.session.as_ref().map(|s| s.user.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.session.is_some()
    }

    pub async fn status(&self) -> AuthStatus {
        self.state.read().await.status
    }

    pub async fn is_signing_up(&self) -> bool {
        self.state.read().await.is_signing_up
    }

    pub async fn is_signing_in(&self) -> bool {
        self.state.read().await.is_signing_in
    }

    pub async fn is_requesting_reset(&self) -> bool {
        self.state.read().await.is_requesting_reset
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn notice(&self) -> Option<String> {
        self.state.read().await.notice.clone()
    }
}

#[async_trait]
impl AccessTokenProvider for SessionService {
    async fn access_token(&self) -> Option<String> {
        self.state
            .read()
            .await
            .session
            .as_ref()
            .map(|s| s.access_token.clone())
    }
}
