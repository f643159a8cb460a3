//! Termination conditions for round-robin conversations.
//!
//! A condition is evaluated after every appended message and either lets the conversation
//! continue (`None`) or stops it with a [`StopReason`]. Conditions compose by logical OR
//! with `|`:
//!
//! ```
//! use litreview::termination::TerminationCondition;
//!
//! let stop = TerminationCondition::text_mention("TERMINATE") | TerminationCondition::max_messages(8);
//! assert_eq!(stop.message_bound(), Some(8));
//! ```

use crate::litreview::conversation::{ChatMessage, Sender};
use std::fmt;
use std::ops::BitOr;

/// Why a conversation stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The transcript reached `limit` messages (the task message included).
    MaxMessages { limit: usize },
    /// A participant message contained `keyword`.
    TextMention { keyword: String },
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::MaxMessages { limit } => write!(f, "maximum of {} messages reached", limit),
            StopReason::TextMention { keyword } => write!(f, "'{}' mentioned", keyword),
        }
    }
}

/// Predicate over the growing transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationCondition {
    /// Stop once the transcript holds at least this many messages.
    MaxMessages(usize),
    /// Stop when the latest participant message contains this literal keyword.
    TextMention(String),
    /// Stop when any inner condition fires; earlier conditions win ties.
    Any(Vec<TerminationCondition>),
}

impl TerminationCondition {
    pub fn max_messages(limit: usize) -> Self {
        TerminationCondition::MaxMessages(limit)
    }

    pub fn text_mention(keyword: impl Into<String>) -> Self {
        TerminationCondition::TextMention(keyword.into())
    }

    /// Evaluate against the transcript as it stands after the latest append.
    pub fn check(&self, transcript: &[ChatMessage]) -> Option<StopReason> {
        match self {
            TerminationCondition::MaxMessages(limit) => {
                if transcript.len() >= *limit {
                    Some(StopReason::MaxMessages { limit: *limit })
                } else {
                    None
                }
            }
            TerminationCondition::TextMention(keyword) => match transcript.last() {
                // the task text never terminates its own conversation
                Some(msg) if msg.sender != Sender::Task && msg.content.contains(keyword.as_str()) => {
                    Some(StopReason::TextMention {
                        keyword: keyword.clone(),
                    })
                }
                _ => None,
            },
            TerminationCondition::Any(conditions) => {
                conditions.iter().find_map(|c| c.check(transcript))
            }
        }
    }

    /// Smallest message-count bound in this condition, if it has one.
    pub fn message_bound(&self) -> Option<usize> {
        match self {
            TerminationCondition::MaxMessages(limit) => Some(*limit),
            TerminationCondition::TextMention(_) => None,
            TerminationCondition::Any(conditions) => {
                conditions.iter().filter_map(|c| c.message_bound()).min()
            }
        }
    }
}

impl BitOr for TerminationCondition {
    type Output = TerminationCondition;

    fn bitor(self, rhs: TerminationCondition) -> TerminationCondition {
        let mut conditions = Vec::new();
        for side in vec![self, rhs] {
            match side {
                TerminationCondition::Any(inner) => conditions.extend(inner),
                other => conditions.push(other),
            }
        }
        TerminationCondition::Any(conditions)
    }
}
