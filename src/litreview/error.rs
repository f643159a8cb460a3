//! Error taxonomy for the review pipeline.
//!
//! Every fallible operation past the client seam returns [`ReviewError`]. The binary maps
//! each variant to a printed diagnostic and a non-zero exit status.
//!
//! ```
//! use litreview::ReviewError;
//!
//! let err = ReviewError::MissingPayload { stage: "summarize".into() };
//! assert_eq!(
//!     err.to_string(),
//!     "Stage 'summarize' produced no delimited output"
//! );
//! ```

use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ReviewError {
    /// Missing or malformed configuration, e.g. a credential without the expected prefix.
    Config(String),

    /// The model endpoint could not be reached or rejected the credential.
    Connectivity(String),

    /// A stage that requires a delimited payload did not get one.
    MissingPayload { stage: String },

    /// A participant's model call failed mid-conversation.
    Generation { participant: String, message: String },

    /// The academic search service failed or returned an unreadable body.
    PaperSource(String),

    /// Reading interactive feedback failed.
    Input(String),

    /// A conversation was started without participants.
    NoParticipants,
}

impl fmt::Display for ReviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ReviewError::Connectivity(msg) => write!(f, "Connectivity error: {}", msg),
            ReviewError::MissingPayload { stage } => {
                write!(f, "Stage '{}' produced no delimited output", stage)
            }
            ReviewError::Generation {
                participant,
                message,
            } => write!(f, "Participant '{}' failed to respond: {}", participant, message),
            ReviewError::PaperSource(msg) => write!(f, "Paper source error: {}", msg),
            ReviewError::Input(msg) => write!(f, "Input error: {}", msg),
            ReviewError::NoParticipants => write!(f, "No participants in conversation"),
        }
    }
}

impl Error for ReviewError {}

impl From<std::io::Error> for ReviewError {
    fn from(err: std::io::Error) -> Self {
        ReviewError::Input(err.to_string())
    }
}
