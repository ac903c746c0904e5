//! REST client for the society directory API.

use std::time::Duration;

use gate_config::ApiConfig;
use gate_core::session::SessionContext;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::http::read_envelope;

/// HTTP client bound to one API base URL.
///
/// Holds no credential of its own: every call reads the bearer token from the
/// [`SessionContext`] it is given and clears it on a 401.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from the `api` config section.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Client`] if the underlying `reqwest::Client` fails to build.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("gatepass/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn request(&self, ctx: &SessionContext, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, self.url(path))
            .header(reqwest::header::ACCEPT, "application/json");
        match ctx.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) async fn send(
        &self,
        ctx: &mut SessionContext,
        builder: RequestBuilder,
    ) -> ApiResult<Value> {
        let resp = builder.send().await.map_err(|error| {
            tracing::debug!(%error, "api request failed");
            ApiError::Network(error)
        })?;
        read_envelope(ctx, resp).await
    }

    pub(crate) async fn get(&self, ctx: &mut SessionContext, path: &str) -> ApiResult<Value> {
        tracing::debug!(path, "GET");
        let builder = self.request(ctx, Method::GET, path);
        self.send(ctx, builder).await
    }

    pub(crate) async fn post_json<B: Serialize + Sync>(
        &self,
        ctx: &mut SessionContext,
        path: &str,
        body: &B,
    ) -> ApiResult<Value> {
        tracing::debug!(path, "POST");
        let builder = self.request(ctx, Method::POST, path).json(body);
        self.send(ctx, builder).await
    }

    pub(crate) async fn post_empty(&self, ctx: &mut SessionContext, path: &str) -> ApiResult<Value> {
        tracing::debug!(path, "POST");
        let builder = self.request(ctx, Method::POST, path);
        self.send(ctx, builder).await
    }

    pub(crate) async fn put_json<B: Serialize + Sync>(
        &self,
        ctx: &mut SessionContext,
        path: &str,
        body: &B,
    ) -> ApiResult<Value> {
        tracing::debug!(path, "PUT");
        let builder = self.request(ctx, Method::PUT, path).json(body);
        self.send(ctx, builder).await
    }

    pub(crate) async fn delete(&self, ctx: &mut SessionContext, path: &str) -> ApiResult<Value> {
        tracing::debug!(path, "DELETE");
        let builder = self.request(ctx, Method::DELETE, path);
        self.send(ctx, builder).await
    }

    pub(crate) async fn post_form(
        &self,
        ctx: &mut SessionContext,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> ApiResult<Value> {
        tracing::debug!(path, "POST multipart");
        let builder = self.request(ctx, Method::POST, path).multipart(form);
        self.send(ctx, builder).await
    }
}
