//! The `OpenAICompatibleClient` struct implements `ClientWrapper` for any endpoint that speaks
//! the OpenAI Chat Completions protocol (Groq, OpenAI, local gateways), capturing both the
//! assistant response and the token usage reported for each call.
//!
//! # Example
//!
//! ```rust,no_run
//! use litreview::clients::openai_compatible::OpenAICompatibleClient;
//! use litreview::client_wrapper::{ClientWrapper, Message, Role};
//! use litreview::ModelConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let config = ModelConfig {
//!         api_key: std::env::var("GROQ_API_KEY")?,
//!         ..ModelConfig::default()
//!     };
//!     let client = OpenAICompatibleClient::new(&config);
//!
//!     let resp = client
//!         .send_message(&[
//!             Message::new(Role::System, "You are an assistant."),
//!             Message::new(Role::User, "Hello!"),
//!         ])
//!         .await?;
//!     println!("Assistant: {}", resp.content);
//!
//!     if let Some(usage) = client.get_last_usage().await {
//!         println!("Tokens: {} in, {} out", usage.input_tokens, usage.output_tokens);
//!     }
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use openai_rust2 as openai_rust;
use tokio::sync::Mutex;

use crate::litreview::client_wrapper::{ClientError, ClientWrapper, Message, Role, TokenUsage};
use crate::litreview::clients::common::{send_and_track, to_chat_messages};
use crate::litreview::clients::http_pool::get_http_client;
use crate::litreview::config::{ModelConfig, ModelInfo};

/// Absolute request path of the chat-completions route under `endpoint`.
///
/// The wire client resolves request paths against its base URL, so the endpoint's own path
/// (`/openai/v1` for Groq) must be repeated in front of the route.
///
/// ```
/// use litreview::clients::openai_compatible::chat_completions_path;
///
/// assert_eq!(
///     chat_completions_path("https://api.groq.com/openai/v1"),
///     "/openai/v1/chat/completions"
/// );
/// assert_eq!(chat_completions_path("http://localhost:8080"), "/chat/completions");
/// ```
pub fn chat_completions_path(endpoint: &str) -> String {
    match reqwest::Url::parse(endpoint) {
        Ok(url) => format!("{}/chat/completions", url.path().trim_end_matches('/')),
        Err(err) => {
            log::warn!(
                "chat_completions_path({}): not a valid URL ({}), using the bare route",
                endpoint,
                err
            );
            "/chat/completions".to_string()
        }
    }
}

/// Client wrapper for an OpenAI compatible chat-completion endpoint.
///
/// Holds the model identifier, its capability flags and a [`TokenUsage`] slot so callers can
/// inspect how many tokens each request consumed. The HTTP connection comes from the shared
/// pool in [`crate::clients::http_pool`].
pub struct OpenAICompatibleClient {
    client: openai_rust::Client,
    endpoint: String,
    url_path: String,
    model: String,
    info: ModelInfo,
    token_usage: Mutex<Option<TokenUsage>>,
}

impl OpenAICompatibleClient {
    /// Build a client from a [`ModelConfig`].
    pub fn new(config: &ModelConfig) -> Self {
        let endpoint = config.endpoint.trim_end_matches('/').to_string();
        OpenAICompatibleClient {
            client: openai_rust::Client::new_with_client_and_base_url(
                &config.api_key,
                get_http_client(&endpoint),
                &endpoint,
            ),
            url_path: chat_completions_path(&endpoint),
            endpoint,
            model: config.model.clone(),
            info: config.info.clone(),
            token_usage: Mutex::new(None),
        }
    }

    /// Base URL this client sends requests to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ClientWrapper for OpenAICompatibleClient {
    async fn send_message(&self, messages: &[Message]) -> Result<Message, ClientError> {
        let result = send_and_track(
            &self.client,
            &self.model,
            to_chat_messages(messages),
            Some(self.url_path.clone()),
            &self.token_usage,
        )
        .await;

        match result {
            Ok(content) => Ok(Message::new(Role::Assistant, content)),
            Err(err) => {
                if log::log_enabled!(log::Level::Error) {
                    log::error!(
                        "OpenAICompatibleClient::send_message(...): {} via {}: {}",
                        self.model,
                        self.endpoint,
                        err
                    );
                }
                Err(err)
            }
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn model_info(&self) -> Option<&ModelInfo> {
        Some(&self.info)
    }

    fn usage_slot(&self) -> Option<&Mutex<Option<TokenUsage>>> {
        Some(&self.token_usage)
    }
}
