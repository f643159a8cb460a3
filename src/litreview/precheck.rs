//! Start-up checks run before any stage.
//!
//! [`validate_credential`] is a pure format check; [`probe_endpoint`] lists the endpoint's
//! models with the configured credential as a lightweight liveness test.

use crate::litreview::clients::http_pool::get_http_client;
use crate::litreview::config::ModelConfig;
use crate::litreview::error::ReviewError;

/// The credential must be present and carry `prefix`.
///
/// ```
/// use litreview::precheck::validate_credential;
///
/// assert!(validate_credential("gsk_abc123", "gsk_").is_ok());
/// assert!(validate_credential("sk-abc123", "gsk_").is_err());
/// assert!(validate_credential("", "gsk_").is_err());
/// ```
pub fn validate_credential(key: &str, prefix: &str) -> Result<(), ReviewError> {
    if key.is_empty() {
        return Err(ReviewError::Config("API key is missing".to_string()));
    }
    if !key.starts_with(prefix) {
        return Err(ReviewError::Config(format!(
            "API key is invalid: expected it to start with '{}'",
            prefix
        )));
    }
    Ok(())
}

/// `GET {endpoint}/models` with bearer auth; any transport failure or non-success status is
/// a [`ReviewError::Connectivity`].
pub async fn probe_endpoint(config: &ModelConfig) -> Result<(), ReviewError> {
    let base = config.endpoint.trim_end_matches('/');
    let url = format!("{}/models", base);

    let response = get_http_client(base)
        .get(&url)
        .bearer_auth(&config.api_key)
        .send()
        .await
        .map_err(|e| ReviewError::Connectivity(format!("{} unreachable: {}", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ReviewError::Connectivity(format!(
            "{} answered HTTP {}",
            url, status
        )));
    }
    log::debug!("probe_endpoint(): {} answered {}", url, status);
    Ok(())
}

/// Credential check followed by the endpoint probe.
pub async fn run_precheck(config: &ModelConfig, credential_prefix: &str) -> Result<(), ReviewError> {
    validate_credential(&config.api_key, credential_prefix)?;
    probe_endpoint(config).await
}
