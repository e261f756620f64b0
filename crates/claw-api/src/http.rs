//! HTTP implementation of [`ControllerApi`].
//!
//! Speaks JSON to the controller backend:
//! `POST /api/agents/generate`, `POST /api/agents`, `GET /api/models`.

use crate::error::ApiError;
use crate::traits::ControllerApi;
use crate::types::{AgentDraft, GenerateRequest, GeneratedProfile, ModelInfo, ModelList};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::Value;

const API_KEY_HEADER: &str = "X-API-Key";

/// Connection settings for the controller backend.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Backend root, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Key sent in the `X-API-Key` header when present.
    pub api_key: Option<String>,
}

/// A [`ControllerApi`] backed by the controller's REST endpoints.
pub struct HttpControllerApi {
    config: HttpConfig,
    client: Client,
}

impl HttpControllerApi {
    pub fn new(config: HttpConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Join the base URL and an absolute API path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.config.api_key.as_deref() {
            Some(key) if !key.is_empty() => builder.header(API_KEY_HEADER, key),
            _ => builder,
        }
    }

    /// Send a request and turn non-success statuses into [`ApiError`]s.
    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = builder.send().await.map_err(ApiError::Http)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = parse_error_detail(&body);
        tracing::debug!(%status, ?detail, "controller rejected request");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Auth(
                detail.unwrap_or_else(|| "invalid or missing API key".to_string()),
            ));
        }
        Err(ApiError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}

/// Extract a human-readable reason from an error body.
///
/// Understands `{"detail": "..."}`, `{"message": "..."}` and validation
/// lists of the form `{"detail": [{"msg": "..."}]}`.
fn parse_error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let field = value.get("detail").or_else(|| value.get("message"))?;
    match field {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Array(items) => {
            let messages = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect::<Vec<_>>();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

#[async_trait]
impl ControllerApi for HttpControllerApi {
    fn endpoint(&self) -> &str {
        &self.config.base_url
    }

    async fn models(&self) -> Result<Vec<ModelInfo>, ApiError> {
        let response = self.send(self.request(Method::GET, "/api/models")).await?;
        let bytes = response.bytes().await.map_err(ApiError::Http)?;
        let list: ModelList = serde_json::from_slice(&bytes)?;
        Ok(list.into())
    }

    async fn generate(&self, description: &str) -> Result<GeneratedProfile, ApiError> {
        let body = GenerateRequest { description };
        let response = self
            .send(self.request(Method::POST, "/api/agents/generate").json(&body))
            .await?;
        let bytes = response.bytes().await.map_err(ApiError::Http)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn create(&self, draft: &AgentDraft) -> Result<(), ApiError> {
        self.send(self.request(Method::POST, "/api/agents").json(draft))
            .await?;
        Ok(())
    }
}
