use crate::application::ports::auth::AccessTokenProvider;
use crate::shared::config::ApiConfig;
use crate::shared::error::AppError;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Shared HTTP client for the Surfdesk backend. Adds the `x-api-key` header
/// to every request; bearer auth is added per-request for the operations
/// that need it.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    api_key: String,
    session: Arc<dyn AccessTokenProvider>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: Arc<dyn AccessTokenProvider>) -> Result<Self, AppError> {
        url::Url::parse(&config.base_url)?;
        Ok(Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.url(path)).header("x-api-key", &self.api_key)
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.url(path)).header("x-api-key", &self.api_key)
    }

    pub fn put(&self, path: &str) -> RequestBuilder {
        self.http.put(self.url(path)).header("x-api-key", &self.api_key)
    }

    /// Attaches the current bearer token, when a session exists. The token
    /// is only ever read here; its lifecycle is the auth collaborator's.
    pub async fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.access_token().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

/// Fails non-2xx responses with the body text, then deserializes the rest.
pub(crate) async fn expect_json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(AppError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.json::<T>().await?)
}
