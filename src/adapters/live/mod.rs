//! Live HTTP bindings for the meme engine's web API.
//!
//! - `legacy` — engine versions before `0.2.0`
//! - `current` — engine versions `0.2.0` and later

pub mod current;
pub mod legacy;

use crate::error::MemeError;

/// Read a successful response body as raw bytes, mapping error statuses to
/// [`MemeError::Api`].
pub(crate) async fn expect_bytes(response: reqwest::Response) -> Result<Vec<u8>, MemeError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await?;
        return Err(MemeError::Api { status: status.as_u16(), message });
    }
    Ok(response.bytes().await?.to_vec())
}

/// Discard a successful response body, mapping error statuses to
/// [`MemeError::Api`].
pub(crate) async fn expect_success(response: reqwest::Response) -> Result<(), MemeError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await?;
        return Err(MemeError::Api { status: status.as_u16(), message });
    }
    Ok(())
}

/// Build an HTTP client with the configured request timeout.
pub(crate) fn build_client(timeout: std::time::Duration) -> Result<reqwest::Client, MemeError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}
