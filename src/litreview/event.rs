//! Conversation and workflow event system.
//!
//! Provides a callback-based observability layer for the review pipeline. Implement
//! [`EventHandler`] to receive real-time notifications about:
//!
//! - **Conversation lifecycle**: run start, every appended message, participant failures,
//!   and the reason a conversation stopped
//! - **Workflow progress**: stage boundaries and fetched papers
//!
//! Both handler methods have default no-op implementations, so you only override what you
//! care about. [`ConsoleEventHandler`] prints the live transcript to stdout.
//!
//! # Example
//!
//! ```rust,no_run
//! use litreview::event::{ConversationEvent, EventHandler};
//! use async_trait::async_trait;
//!
//! struct TurnCounter;
//!
//! #[async_trait]
//! impl EventHandler for TurnCounter {
//!     async fn on_conversation_event(&self, event: &ConversationEvent) {
//!         if let ConversationEvent::MessageAppended { sender, turn, .. } = event {
//!             println!("turn {} by {}", turn, sender);
//!         }
//!     }
//! }
//! ```

use crate::litreview::termination::StopReason;
use async_trait::async_trait;

/// Events emitted by [`RoundRobinChat::run`](crate::conversation::RoundRobinChat::run).
///
/// Every variant carries the `conversation_id` of the run so interleaved logs can be
/// grouped.
#[derive(Debug, Clone)]
pub enum ConversationEvent {
    /// The task message was appended and the first turn is about to start.
    RunStarted {
        conversation_id: String,
        /// Name given to the conversation, e.g. `"summarize"`.
        name: String,
        /// Participant names in turn order.
        participants: Vec<String>,
    },

    /// A message (the task, or a participant's turn) was appended to the transcript.
    MessageAppended {
        conversation_id: String,
        /// `"task"` or the participant name.
        sender: String,
        content: String,
        /// 0 for the task message, then 1-based participant turns.
        turn: usize,
    },

    /// A participant's model call failed; the run stops after this event.
    ParticipantFailed {
        conversation_id: String,
        participant: String,
        error: String,
    },

    /// A termination condition fired.
    RunTerminated {
        conversation_id: String,
        reason: StopReason,
        message_count: usize,
    },
}

/// Events emitted by the [`LiteratureReviewWorkflow`](crate::workflow::LiteratureReviewWorkflow).
#[derive(Debug, Clone)]
pub enum WorkflowEvent {
    StageStarted { stage: String },
    /// A paper search returned a hit; `link` is the placeholder when absent.
    PaperFetched { title: String, link: String },
    /// A title produced no search hit and was skipped.
    PaperMissing { query: String },
    StageCompleted { stage: String, output_length: usize },
    /// A stage fell back to the raw last message because the markers were absent.
    RawFallbackUsed { stage: String },
}

/// Trait for receiving conversation and workflow events.
///
/// Handlers are shared as `Arc<dyn EventHandler>` between the workflow and each
/// conversation it starts.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn on_conversation_event(&self, _event: &ConversationEvent) {}

    async fn on_workflow_event(&self, _event: &WorkflowEvent) {}
}

/// Prints each appended message framed by its sender, and workflow progress lines.
pub struct ConsoleEventHandler;

#[async_trait]
impl EventHandler for ConsoleEventHandler {
    async fn on_conversation_event(&self, event: &ConversationEvent) {
        match event {
            ConversationEvent::MessageAppended {
                sender, content, ..
            } => {
                println!("---------- {} ----------", sender);
                println!("{}", content);
            }
            ConversationEvent::ParticipantFailed {
                participant, error, ..
            } => {
                println!("---------- {} (failed) ----------", participant);
                println!("{}", error);
            }
            ConversationEvent::RunTerminated { reason, .. } => {
                println!("---------- stopped: {} ----------", reason);
            }
            ConversationEvent::RunStarted { .. } => {}
        }
    }

    async fn on_workflow_event(&self, event: &WorkflowEvent) {
        match event {
            WorkflowEvent::StageStarted { stage } => println!("\n- running {} stage", stage),
            WorkflowEvent::PaperFetched { link, .. } => println!("   + {}", link),
            WorkflowEvent::PaperMissing { query } => println!("   ! no result for '{}'", query),
            WorkflowEvent::RawFallbackUsed { stage } => println!(
                "- {} stage: output markers missing, using the raw last message",
                stage
            ),
            WorkflowEvent::StageCompleted { .. } => {}
        }
    }
}

/// Discards every event.
pub struct NoopEventHandler;

impl EventHandler for NoopEventHandler {}
