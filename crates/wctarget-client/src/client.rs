//! HTTP client for the WooCommerce REST API.
//!
//! Wraps `reqwest` with URL construction under `<site>/wp-json/<version>/`
//! and consumer key/secret authentication. Status codes are passed back
//! untouched in [`ApiResponse`]; deciding what counts as a rejection is the
//! caller's business. No retries are attempted.

use std::time::Duration;

use reqwest::{Client, Method, Url};
use serde::Serialize;
use wctarget_core::TargetConfig;

use crate::api::{ApiResponse, WooApi};
use crate::error::ClientError;

/// Client for one WooCommerce site.
pub struct WooCommerceClient {
    client: Client,
    api_base: Url,
    consumer_key: String,
    consumer_secret: String,
    query_string_auth: bool,
}

impl WooCommerceClient {
    /// Creates a client for the site named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidSiteUrl`] if the site
    /// URL and API version do not form a valid base URL.
    pub fn new(config: &TargetConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.as_str())
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()?;

        let api_base = Self::api_base(&config.site_url, &config.api_version)?;

        Ok(Self {
            client,
            api_base,
            consumer_key: config.consumer_key.clone(),
            consumer_secret: config.consumer_secret.clone(),
            query_string_auth: config.query_string_auth,
        })
    }

    /// Builds `<site_url>/wp-json/<api_version>/`, always ending in exactly
    /// one slash so relative resource paths join beneath it.
    fn api_base(site_url: &str, api_version: &str) -> Result<Url, ClientError> {
        let raw = format!(
            "{}/wp-json/{}/",
            site_url.trim_end_matches('/'),
            api_version.trim_matches('/')
        );
        let url = Url::parse(&raw).map_err(|e| ClientError::InvalidSiteUrl {
            site_url: site_url.to_owned(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(ClientError::InvalidSiteUrl {
                site_url: site_url.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }
        Ok(url)
    }

    /// Resolves a resource path (optionally with a query string) against the
    /// API base, appending credentials when query-string auth is enabled.
    fn endpoint_url(&self, path: &str) -> Result<Url, ClientError> {
        let mut url = self
            .api_base
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::InvalidSiteUrl {
                site_url: self.api_base.to_string(),
                reason: format!("cannot join path '{path}': {e}"),
            })?;

        if self.query_string_auth {
            url.query_pairs_mut()
                .append_pair("consumer_key", &self.consumer_key)
                .append_pair("consumer_secret", &self.consumer_secret);
        }

        Ok(url)
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<ApiResponse, ClientError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.endpoint_url(path)?;
        let mut request = self
            .client
            .request(method.clone(), url)
            .header(reqwest::header::ACCEPT, "application/json");

        if !self.query_string_auth {
            request = request.basic_auth(&self.consumer_key, Some(&self.consumer_secret));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(%method, path, status, "woocommerce request completed");

        Ok(ApiResponse { status, body })
    }
}

impl WooApi for WooCommerceClient {
    async fn get(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.send::<()>(Method::GET, path, None).await
    }

    async fn post<B>(&self, path: &str, body: &B) -> Result<ApiResponse, ClientError>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn put<B>(&self, path: &str, body: &B) -> Result<ApiResponse, ClientError>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.send(Method::PUT, path, Some(body)).await
    }
}
