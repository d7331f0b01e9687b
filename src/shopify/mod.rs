// src/shopify/mod.rs
// Shopify Admin API transport: one GraphQL primitive, one REST primitive.
// Everything above this layer works in terms of `AdminTransport` so the
// pipeline can be exercised against an in-memory fake.

pub mod gid;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::config::RunConfig;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

#[derive(Debug, thiserror::Error)]
pub enum ShopifyError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response. `body` carries the parsed error payload when the
    /// response body was JSON, otherwise the raw text.
    #[error("Shopify API error {status}: {body}")]
    Status { status: StatusCode, body: Value },

    /// The GraphQL envelope itself reported structured errors.
    #[error("GraphQL errors: {0}")]
    Protocol(Value),

    #[error("invalid response payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ShopifyError {
    /// True for the idempotent-conflict response Shopify returns when an
    /// inventory level is already connected or already disconnected.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            ShopifyError::Status { status, .. } if *status == StatusCode::UNPROCESSABLE_ENTITY
        )
    }
}

/// The two request primitives the reconciliation pipeline needs.
#[async_trait]
pub trait AdminTransport: Send + Sync {
    /// POST a GraphQL query and return the `data` payload. Envelope-level
    /// `errors` surface as [`ShopifyError::Protocol`].
    async fn graphql(&self, query: &str, variables: Value) -> Result<Value, ShopifyError>;

    /// Issue a REST call against `admin/api/{version}/{path}` and return the
    /// parsed response body (`Null` when the body is empty).
    async fn rest(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ShopifyError>;
}

/// Reqwest-backed Admin API client.
pub struct AdminClient {
    client: reqwest::Client,
    store_domain: String,
    api_version: String,
    access_token: String,
}

impl AdminClient {
    pub fn new(config: &RunConfig) -> Result<Self, ShopifyError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            store_domain: config.store_domain.clone(),
            api_version: config.api_version.clone(),
            access_token: config.access_token.clone(),
        })
    }

    fn graphql_url(&self) -> String {
        format!(
            "https://{}/admin/api/{}/graphql.json",
            self.store_domain, self.api_version
        )
    }

    fn rest_url(&self, path: &str) -> String {
        format!(
            "https://{}/admin/api/{}/{}",
            self.store_domain, self.api_version, path
        )
    }

    /// Check the status line and decode the body. Error bodies are parsed as
    /// JSON when possible so callers see the structured payload.
    async fn decode_response(response: reqwest::Response) -> Result<Value, ShopifyError> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
            return Err(ShopifyError::Status { status, body });
        }

        if text.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl AdminTransport for AdminClient {
    async fn graphql(&self, query: &str, variables: Value) -> Result<Value, ShopifyError> {
        debug!("GraphQL request to {}", self.graphql_url());

        let response = self
            .client
            .post(self.graphql_url())
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let payload = Self::decode_response(response).await?;

        if let Some(errors) = payload.get("errors") {
            return Err(ShopifyError::Protocol(errors.clone()));
        }
        Ok(payload.get("data").cloned().unwrap_or(Value::Null))
    }

    async fn rest(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ShopifyError> {
        debug!("{} {}", method, path);

        let mut request = self
            .client
            .request(method, self.rest_url(path))
            .header(ACCESS_TOKEN_HEADER, &self.access_token);
        if let Some(body) = body {
            request = request.json(&body);
        }

        Self::decode_response(request.send().await?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(code: u16) -> ShopifyError {
        ShopifyError::Status {
            status: StatusCode::from_u16(code).unwrap(),
            body: Value::Null,
        }
    }

    #[test]
    fn test_conflict_is_only_422() {
        assert!(status_error(422).is_conflict());
        assert!(!status_error(404).is_conflict());
        assert!(!status_error(500).is_conflict());
        assert!(!ShopifyError::Protocol(Value::Null).is_conflict());
    }

    #[test]
    fn test_urls_embed_version_and_domain() {
        let config = RunConfig {
            store_domain: "example.myshopify.com".to_string(),
            access_token: "token".to_string(),
            api_version: "2023-10".to_string(),
            product_query: String::new(),
            target_location: String::new(),
            source_locations: vec![],
            page_size: 50,
            request_timeout_secs: 30,
            dry_run: false,
        };
        let client = AdminClient::new(&config).unwrap();
        assert_eq!(
            client.graphql_url(),
            "https://example.myshopify.com/admin/api/2023-10/graphql.json"
        );
        assert_eq!(
            client.rest_url("locations.json"),
            "https://example.myshopify.com/admin/api/2023-10/locations.json"
        );
    }
}
