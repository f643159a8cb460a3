//! HTTP client pool keeping one persistent `reqwest::Client` per base URL.
//!
//! Every model wrapper, the endpoint probe and the paper source go through
//! [`get_http_client`], so connections, DNS lookups and TLS sessions are reused across the
//! many sequential turns of a review run.
//!
//! The clients keep idle connections for 90 seconds (at most 10 per host), send TCP
//! keepalives every 60 seconds and give up on a request after 300 seconds.

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

lazy_static! {
    static ref HTTP_CLIENT_POOL: Mutex<HashMap<String, reqwest::Client>> =
        Mutex::new(HashMap::new());
}

/// Get or create the shared HTTP client for `base_url`.
pub fn get_http_client(base_url: &str) -> reqwest::Client {
    let mut pool = HTTP_CLIENT_POOL
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(client) = pool.get(base_url) {
        return client.clone();
    }

    let client = match reqwest::ClientBuilder::new()
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .pool_max_idle_per_host(10)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .timeout(Duration::from_secs(300))
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            log::warn!(
                "litreview::clients::http_pool::get_http_client({}): falling back to default client: {}",
                base_url,
                err
            );
            reqwest::Client::new()
        }
    };

    pool.insert(base_url.to_string(), client.clone());
    client
}

/// Whether a client for `base_url` has already been created.
pub fn is_pooled(base_url: &str) -> bool {
    HTTP_CLIENT_POOL
        .lock()
        .map(|pool| pool.contains_key(base_url))
        .unwrap_or(false)
}
