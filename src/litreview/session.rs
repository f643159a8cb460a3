//! The `session` module keeps one participant's view of a conversation: its instruction,
//! the messages routed to it so far, and the token usage its client reported.
//!
//! **Key features:**
//! - **Routed history**: the conversation driver injects every message the participant has
//!   not seen yet before asking it to speak.
//! - **Automatic context trimming**: oldest messages are dropped once the reported token
//!   count exceeds `max_tokens`.
//! - **Token tracking**: accumulates input and output tokens across turns.
//!
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use litreview::client_wrapper::{ClientError, ClientWrapper, Message, Role};
//! use litreview::session::ParticipantSession;
//!
//! struct Echo;
//!
//! #[async_trait]
//! impl ClientWrapper for Echo {
//!     async fn send_message(&self, messages: &[Message]) -> Result<Message, ClientError> {
//!         Ok(Message::new(Role::Assistant, format!("saw {} messages", messages.len())))
//!     }
//!     fn model_name(&self) -> &str {
//!         "echo"
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mut session = ParticipantSession::new(Arc::new(Echo), "You summarize papers.", 8_192);
//! session.inject_message(Role::User, "Summarize: ...");
//! let reply = session.generate().await.unwrap();
//! // system instruction + one routed message
//! assert_eq!(&*reply.content, "saw 2 messages");
//! assert_eq!(session.history().len(), 2);
//! # }
//! ```

use crate::litreview::client_wrapper::{ClientError, ClientWrapper, Message, Role, TokenUsage};
use std::sync::Arc;

/// One participant's conversation state:
///
/// - `client`: the `ClientWrapper` that produces its turns.
/// - `system_prompt`: the participant instruction, sent first on every call.
/// - `conversation_history`: routed messages and the participant's own replies.
/// - `max_tokens`: the configured context window size.
/// - `total_*`: token usage accumulated across turns.
pub struct ParticipantSession {
    client: Arc<dyn ClientWrapper>,
    system_prompt: Message,
    conversation_history: Vec<Message>,
    max_tokens: usize,
    total_input_tokens: usize,
    total_output_tokens: usize,
    total_token_count: usize,
}

impl ParticipantSession {
    pub fn new(client: Arc<dyn ClientWrapper>, system_prompt: &str, max_tokens: usize) -> Self {
        ParticipantSession {
            client,
            system_prompt: Message::new(Role::System, system_prompt),
            conversation_history: Vec::new(),
            max_tokens,
            total_input_tokens: 0,
            total_output_tokens: 0,
            total_token_count: 0,
        }
    }

    /// Append a message to the history without calling the model.
    pub fn inject_message(&mut self, role: Role, content: impl AsRef<str>) {
        self.conversation_history.push(Message::new(role, content));
    }

    /// Ask the model for the next turn given the current history and
    /// automatically:
    /// 1. Sends the system prompt followed by the history
    /// 2. Pulls real token usage via `client.get_last_usage()`
    /// 3. Prunes oldest messages if the reported total exceeds `max_tokens`
    /// 4. Appends the reply to the history as an assistant message
    ///
    /// Returns the assistant reply; call `token_usage()` for cumulative usage.
    pub async fn generate(&mut self) -> Result<Message, ClientError> {
        let mut request = Vec::with_capacity(self.conversation_history.len() + 1);
        request.push(self.system_prompt.clone());
        request.extend(self.conversation_history.iter().cloned());

        let response = self.client.send_message(&request).await?;

        if let Some(usage) = self.client.get_last_usage().await {
            self.total_input_tokens += usage.input_tokens;
            self.total_output_tokens += usage.output_tokens;
            self.total_token_count += usage.total_tokens;

            if usage.total_tokens > self.max_tokens {
                // How many tokens we're over by
                let mut excess = usage.total_tokens - self.max_tokens;

                // Remove the oldest messages until we've cleared at least `excess` tokens
                while excess > 0 && !self.conversation_history.is_empty() {
                    let msg = self.conversation_history.remove(0);
                    excess = excess.saturating_sub(estimate_message_token_count(&msg));
                }
                log::debug!(
                    "ParticipantSession::generate(): trimmed history to {} messages",
                    self.conversation_history.len()
                );
            }
        }

        self.conversation_history.push(Message {
            role: Role::Assistant,
            content: response.content.clone(),
        });

        Ok(Message {
            role: Role::Assistant,
            content: response.content,
        })
    }

    pub fn history(&self) -> &[Message] {
        &self.conversation_history
    }

    pub fn system_prompt_text(&self) -> &str {
        &self.system_prompt.content
    }

    pub fn client(&self) -> &Arc<dyn ClientWrapper> {
        &self.client
    }

    /// Cumulative token usage across every turn of this session.
    pub fn token_usage(&self) -> TokenUsage {
        TokenUsage {
            input_tokens: self.total_input_tokens,
            output_tokens: self.total_output_tokens,
            total_tokens: self.total_token_count,
        }
    }

    pub fn get_max_tokens(&self) -> usize {
        self.max_tokens
    }
}

/// Estimates the number of tokens in a string.
/// Uses an approximate formula: one token per 4 characters.
pub fn estimate_token_count(text: &str) -> usize {
    (text.len() / 4).max(1)
}

/// Estimates the number of tokens in a Message, counting one token for the role.
pub fn estimate_message_token_count(message: &Message) -> usize {
    1 + estimate_token_count(&message.content)
}
