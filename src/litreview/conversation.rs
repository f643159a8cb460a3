//! Round-robin multi-participant conversations.
//!
//! A [`RoundRobinChat`] runs an ordered list of [`Participant`]s in fixed cyclic order. Each
//! participant keeps its own [`ParticipantSession`]; the chat acts as a hub that routes every
//! transcript message a participant has not seen yet into its session right before its
//! turn. A per-participant cursor tracks what was already routed, so nothing is injected
//! twice.
//!
//! The loop is an explicit state machine. State is the turn index, the message count and
//! the stop reason; a transition runs the next participant, appends its message and
//! re-evaluates the [`TerminationCondition`]. The task message counts toward message limits.
//!
//! ```text
//! task ──▶ [writer] ──▶ [editor] ──▶ [writer] ──▶ ... until MaxMessages | TextMention
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use litreview::conversation::{Participant, RoundRobinChat};
//! use litreview::termination::TerminationCondition;
//! use litreview::clients::build_client;
//! use litreview::ModelConfig;
//!
//! # async {
//! let client = build_client(&ModelConfig::default());
//! let mut chat = RoundRobinChat::new(
//!     "draft",
//!     TerminationCondition::text_mention("TERMINATE") | TerminationCondition::max_messages(8),
//! );
//! chat.add_participant(Participant::new("writer", "You write reviews.", client.clone()))?;
//! chat.add_participant(Participant::new("editor", "You critique reviews.", client))?;
//!
//! let outcome = chat.run("Write a review of diffusion models").await?;
//! println!("stopped after {} turns: {}", outcome.turns, outcome.stop_reason);
//! # Ok::<(), litreview::ReviewError>(())
//! # };
//! ```

use crate::litreview::client_wrapper::{ClientWrapper, Role};
use crate::litreview::error::ReviewError;
use crate::litreview::event::{ConversationEvent, EventHandler};
use crate::litreview::session::ParticipantSession;
use crate::litreview::termination::{StopReason, TerminationCondition};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

/// Token budget given to each participant session.
const PARTICIPANT_MAX_TOKENS: usize = 128_000;

/// Who produced a transcript message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sender {
    /// The initial task text handed to the conversation.
    Task,
    Participant(String),
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::Task => write!(f, "task"),
            Sender::Participant(name) => write!(f, "{}", name),
        }
    }
}

/// One entry of a conversation transcript.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn task(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::Task,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn from_participant(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            sender: Sender::Participant(name.into()),
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A named, instruction-bearing conversational role backed by a model client.
pub struct Participant {
    pub name: String,
    /// Short description of the role, used in logs only.
    pub description: Option<String>,
    session: ParticipantSession,
}

impl Participant {
    pub fn new(
        name: impl Into<String>,
        instruction: &str,
        client: Arc<dyn ClientWrapper>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            session: ParticipantSession::new(client, instruction, PARTICIPANT_MAX_TOKENS),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn instruction(&self) -> &str {
        self.session.system_prompt_text()
    }

    pub fn session(&self) -> &ParticipantSession {
        &self.session
    }

    /// Feed a transcript message into this participant's session.
    ///
    /// Its own replies are already in the session as assistant messages; the task becomes a
    /// user message; other participants' turns become user messages tagged with their name.
    fn route(&mut self, msg: &ChatMessage) {
        match &msg.sender {
            Sender::Task => self.session.inject_message(Role::User, &msg.content),
            Sender::Participant(name) if *name == self.name => {}
            Sender::Participant(name) => self
                .session
                .inject_message(Role::User, format!("[{}]: {}", name, msg.content)),
        }
    }
}

/// The transcript and bookkeeping of one finished conversation.
#[derive(Debug, Clone)]
pub struct ConversationOutcome {
    pub conversation_id: String,
    /// Every message in append order, the task first.
    pub messages: Vec<ChatMessage>,
    pub stop_reason: StopReason,
    /// Number of participant turns taken.
    pub turns: usize,
    /// Total tokens reported by the participants' clients; zero when none report usage.
    pub total_tokens_used: usize,
}

impl ConversationOutcome {
    /// The only message inspected for output extraction.
    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}

/// Round-robin conversation driver.
pub struct RoundRobinChat {
    pub name: String,
    participants: Vec<Participant>,
    termination: TerminationCondition,
    /// Per-participant index of the first transcript message not yet routed to it.
    cursors: Vec<usize>,
    event_handler: Option<Arc<dyn EventHandler>>,
}

impl RoundRobinChat {
    pub fn new(name: impl Into<String>, termination: TerminationCondition) -> Self {
        Self {
            name: name.into(),
            participants: Vec::new(),
            termination,
            cursors: Vec::new(),
            event_handler: None,
        }
    }

    pub fn with_event_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    /// Append a participant; insertion order is turn order. Names must be unique.
    pub fn add_participant(&mut self, participant: Participant) -> Result<(), ReviewError> {
        if self.participants.iter().any(|p| p.name == participant.name) {
            return Err(ReviewError::Config(format!(
                "participant '{}' already exists in conversation '{}'",
                participant.name, self.name
            )));
        }
        self.participants.push(participant);
        self.cursors.push(0);
        Ok(())
    }

    /// Participant names in turn order.
    pub fn participant_names(&self) -> Vec<&str> {
        self.participants.iter().map(|p| p.name.as_str()).collect()
    }

    /// Run the conversation to termination and return the full transcript.
    ///
    /// Consumes the chat: the transcript and participant sessions belong to this one run.
    ///
    /// # Errors
    ///
    /// [`ReviewError::NoParticipants`] when no participant was added, and
    /// [`ReviewError::Generation`] as soon as any participant's model call fails. There is
    /// no retry.
    pub async fn run(mut self, task: &str) -> Result<ConversationOutcome, ReviewError> {
        if self.participants.is_empty() {
            return Err(ReviewError::NoParticipants);
        }
        if self.termination.message_bound().is_none() {
            log::warn!(
                "RoundRobinChat::run(): conversation '{}' has no message bound",
                self.name
            );
        }

        let conversation_id = uuid::Uuid::new_v4().to_string();
        let handler = self.event_handler.clone();

        emit(
            &handler,
            ConversationEvent::RunStarted {
                conversation_id: conversation_id.clone(),
                name: self.name.clone(),
                participants: self.participants.iter().map(|p| p.name.clone()).collect(),
            },
        )
        .await;

        let mut messages = vec![ChatMessage::task(task)];
        emit(
            &handler,
            ConversationEvent::MessageAppended {
                conversation_id: conversation_id.clone(),
                sender: Sender::Task.to_string(),
                content: task.to_string(),
                turn: 0,
            },
        )
        .await;

        let mut turns = 0usize;

        let stop_reason = loop {
            if let Some(reason) = self.termination.check(&messages) {
                break reason;
            }

            let idx = turns % self.participants.len();
            let participant = &mut self.participants[idx];

            for msg in &messages[self.cursors[idx]..] {
                participant.route(msg);
            }

            log::debug!(
                "RoundRobinChat::run(): '{}' turn {} -> {}",
                self.name,
                turns + 1,
                participant.name
            );

            let reply = match participant.session.generate().await {
                Ok(reply) => reply,
                Err(err) => {
                    let participant_name = participant.name.clone();
                    log::error!(
                        "RoundRobinChat::run(): participant '{}' failed: {}",
                        participant_name,
                        err
                    );
                    emit(
                        &handler,
                        ConversationEvent::ParticipantFailed {
                            conversation_id: conversation_id.clone(),
                            participant: participant_name.clone(),
                            error: err.to_string(),
                        },
                    )
                    .await;
                    return Err(ReviewError::Generation {
                        participant: participant_name,
                        message: err.to_string(),
                    });
                }
            };

            let name = participant.name.clone();
            messages.push(ChatMessage::from_participant(
                name.clone(),
                reply.content.to_string(),
            ));
            self.cursors[idx] = messages.len();
            turns += 1;

            emit(
                &handler,
                ConversationEvent::MessageAppended {
                    conversation_id: conversation_id.clone(),
                    sender: name,
                    content: reply.content.to_string(),
                    turn: turns,
                },
            )
            .await;
        };

        log::info!(
            "RoundRobinChat::run(): '{}' stopped after {} turns ({})",
            self.name,
            turns,
            stop_reason
        );
        emit(
            &handler,
            ConversationEvent::RunTerminated {
                conversation_id: conversation_id.clone(),
                reason: stop_reason.clone(),
                message_count: messages.len(),
            },
        )
        .await;

        let total_tokens_used = self
            .participants
            .iter()
            .map(|p| p.session.token_usage().total_tokens)
            .sum();

        Ok(ConversationOutcome {
            conversation_id,
            messages,
            stop_reason,
            turns,
            total_tokens_used,
        })
    }
}

async fn emit(handler: &Option<Arc<dyn EventHandler>>, event: ConversationEvent) {
    if let Some(handler) = handler {
        handler.on_conversation_event(&event).await;
    }
}
