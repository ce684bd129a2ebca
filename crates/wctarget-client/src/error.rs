use thiserror::Error;

/// Errors returned by the WooCommerce REST client.
///
/// A response with an error status is not a `ClientError`; it comes back as
/// an [`ApiResponse`](crate::ApiResponse) for the caller to judge.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid site URL \"{site_url}\": {reason}")]
    InvalidSiteUrl { site_url: String, reason: String },
}
