//! Model client factory and the [`ClientWrapper`](crate::client_wrapper::ClientWrapper)
//! implementations behind it.

pub mod common;
pub mod groq;
pub mod http_pool;
pub mod openai_compatible;

use crate::litreview::client_wrapper::ClientWrapper;
use crate::litreview::config::ModelConfig;
use openai_compatible::OpenAICompatibleClient;
use std::sync::Arc;

/// Build a shareable handle to the chat-completion endpoint described by `config`.
pub fn build_client(config: &ModelConfig) -> Arc<dyn ClientWrapper> {
    log::info!(
        "litreview::clients::build_client(...): {} at {}",
        config.model,
        config.endpoint
    );
    Arc::new(OpenAICompatibleClient::new(config))
}
