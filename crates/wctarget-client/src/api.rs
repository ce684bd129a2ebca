//! The remote API capability used by the uploader.
//!
//! Anything that can issue `get`/`post`/`put` against WooCommerce resource
//! paths and hand back the raw status and body satisfies [`WooApi`]. The
//! production implementation is [`WooCommerceClient`](crate::WooCommerceClient);
//! tests substitute an in-memory recorder.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientError;

/// Raw outcome of one API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `true` for any status below 400.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status < 400
    }

    /// Deserializes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Human-readable reason for a rejected call.
    ///
    /// WooCommerce error bodies look like
    /// `{"code": "...", "message": "...", "data": {"status": 400}}`; the
    /// `message` field is returned verbatim. Bodies without one fall back to
    /// the raw text, and empty bodies to `"HTTP <status>"`.
    #[must_use]
    pub fn error_message(&self) -> String {
        let from_json = serde_json::from_str::<serde_json::Value>(&self.body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_owned)
            });

        match from_json {
            Some(message) => message,
            None if !self.body.trim().is_empty() => self.body.trim().to_string(),
            None => format!("HTTP {}", self.status),
        }
    }
}

/// Capability set the uploader needs from the remote platform.
///
/// Paths are relative to the versioned REST root, e.g. `products` or
/// `products/42/variations`, and may carry a query string.
pub trait WooApi {
    fn get(&self, path: &str) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send;

    fn post<B>(
        &self,
        path: &str,
        body: &B,
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send
    where
        B: Serialize + Sync + ?Sized;

    fn put<B>(
        &self,
        path: &str,
        body: &B,
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send
    where
        B: Serialize + Sync + ?Sized;
}

/// Resource paths used by the uploader.
pub mod endpoints {
    pub const PRODUCTS: &str = "products";
    pub const CATEGORIES: &str = "products/categories";

    #[must_use]
    pub fn categories_page(page: u32, per_page: u32) -> String {
        format!("{CATEGORIES}?per_page={per_page}&page={page}")
    }

    #[must_use]
    pub fn product(product_id: i64) -> String {
        format!("{PRODUCTS}/{product_id}")
    }

    #[must_use]
    pub fn variations(product_id: i64) -> String {
        format!("{PRODUCTS}/{product_id}/variations")
    }
}
