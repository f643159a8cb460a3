//! Delimited output protocol.
//!
//! Participants wrap the "real" answer of a stage between two literal marker lines inside an
//! otherwise free-form reply. [`extract_payload`] pulls it out; [`Extraction`] records which
//! of the three possible outcomes happened so each stage can apply its own policy.
//!
//! ```
//! use litreview::conversation::ChatMessage;
//! use litreview::extraction::{extract_payload, Extraction, OutputMarkers};
//!
//! let markers = OutputMarkers::default();
//! let msg = ChatMessage::from_participant(
//!     "writer",
//!     "Here it is.\nOUTPUT : STARTS\n  Final review.\nOUTPUT : ENDS\nTERMINATE",
//! );
//! assert_eq!(extract_payload(Some(&msg), &markers).as_deref(), Some("Final review."));
//!
//! let plain = ChatMessage::from_participant("writer", "no markers here");
//! assert_eq!(
//!     Extraction::from_message(Some(&plain), &markers),
//!     Extraction::RawFallback("no markers here".to_string())
//! );
//! assert_eq!(Extraction::from_message(None, &markers), Extraction::Missing);
//! ```

use crate::litreview::conversation::ChatMessage;
use crate::litreview::error::ReviewError;

/// The two literal strings framing a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputMarkers {
    pub start: String,
    pub end: String,
}

impl Default for OutputMarkers {
    fn default() -> Self {
        Self {
            start: "OUTPUT : STARTS".to_string(),
            end: "OUTPUT : ENDS".to_string(),
        }
    }
}

/// Text strictly between the first `start` marker and the first `end` marker after it,
/// trimmed. Newlines inside the payload are kept.
pub fn extract_between<'a>(content: &'a str, markers: &OutputMarkers) -> Option<&'a str> {
    let start = content.find(markers.start.as_str())? + markers.start.len();
    let len = content[start..].find(markers.end.as_str())?;
    Some(content[start..start + len].trim())
}

/// Payload of `message`, or `None` when the message is absent or carries no marker pair.
pub fn extract_payload(message: Option<&ChatMessage>, markers: &OutputMarkers) -> Option<String> {
    message
        .and_then(|msg| extract_between(&msg.content, markers))
        .map(str::to_string)
}

/// Outcome of looking for a payload in a stage's final message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Both markers were present.
    Payload(String),
    /// A message exists but has no marker pair; holds its raw content.
    RawFallback(String),
    /// There was no message to inspect.
    Missing,
}

impl Extraction {
    pub fn from_message(message: Option<&ChatMessage>, markers: &OutputMarkers) -> Self {
        match message {
            None => Extraction::Missing,
            Some(msg) => match extract_between(&msg.content, markers) {
                Some(payload) => Extraction::Payload(payload.to_string()),
                None => Extraction::RawFallback(msg.content.clone()),
            },
        }
    }

    /// Strict policy: only a delimited payload is accepted.
    pub fn require_payload(self, stage: &str) -> Result<String, ReviewError> {
        match self {
            Extraction::Payload(text) => Ok(text),
            Extraction::RawFallback(_) | Extraction::Missing => Err(ReviewError::MissingPayload {
                stage: stage.to_string(),
            }),
        }
    }

    /// Lenient policy: the payload, else the raw message content.
    pub fn payload_or_raw(self, stage: &str) -> Result<String, ReviewError> {
        match self {
            Extraction::Payload(text) | Extraction::RawFallback(text) => Ok(text),
            Extraction::Missing => Err(ReviewError::MissingPayload {
                stage: stage.to_string(),
            }),
        }
    }

    pub fn is_payload(&self) -> bool {
        matches!(self, Extraction::Payload(_))
    }
}
