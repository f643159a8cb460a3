//! The contract every chat-completion backend implements.
//!
//! A [`ClientWrapper`] performs exactly one request/response round-trip per call: it takes
//! the ordered messages of a participant's view of the conversation (system instruction
//! first) and returns one assistant [`Message`]. It keeps no conversation state of its own;
//! that lives in [`ParticipantSession`](crate::session::ParticipantSession).
//!
//! ```rust
//! use litreview::client_wrapper::{Message, Role};
//!
//! let msg = Message::new(Role::User, "Summarize these papers");
//! assert_eq!(msg.role, Role::User);
//! assert_eq!(&*msg.content, "Summarize these papers");
//! ```

use crate::litreview::config::ModelInfo;
use async_trait::async_trait;
use std::error::Error;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Represents the possible roles for a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Role {
    /// Participant instruction, always sent first.
    System,
    // the task text and other participants' turns
    User,
    // this participant's own earlier turns
    Assistant,
}

impl Role {
    /// Wire name used by OpenAI compatible chat APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// How many tokens were spent on prompt vs. completion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: usize,
    pub output_tokens: usize,
    pub total_tokens: usize,
}

/// Represents a generic message to be sent to an LLM.
#[derive(Clone, Debug)]
pub struct Message {
    /// The role associated with the message.
    pub role: Role,
    /// The actual content of the message. `Arc<str>` keeps clones of long drafts cheap.
    pub content: Arc<str>,
}

impl Message {
    pub fn new(role: Role, content: impl AsRef<str>) -> Self {
        Message {
            role,
            content: Arc::from(content.as_ref()),
        }
    }
}

/// Error type returned across the client seam.
pub type ClientError = Box<dyn Error + Send + Sync>;

/// Trait defining the interface to interact with chat-completion services.
#[async_trait]
pub trait ClientWrapper: Send + Sync {
    /// Send the messages to the LLM and get one response back.
    async fn send_message(&self, messages: &[Message]) -> Result<Message, ClientError>;

    /// Model identifier injected into each request.
    fn model_name(&self) -> &str;

    /// Capability flags of the configured model, when the wrapper knows them.
    fn model_info(&self) -> Option<&ModelInfo> {
        None
    }

    /// Hook to retrieve usage from the *last* send_message() call.
    /// Default impl reads [`ClientWrapper::usage_slot`] so wrappers only expose the slot.
    async fn get_last_usage(&self) -> Option<TokenUsage> {
        match self.usage_slot() {
            Some(slot) => slot.lock().await.clone(),
            None => None,
        }
    }

    /// Wrappers that track [`TokenUsage`] return the slot they write to.
    fn usage_slot(&self) -> Option<&Mutex<Option<TokenUsage>>> {
        None
    }
}
