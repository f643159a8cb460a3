//! # litreview
//!
//! litreview writes a literature review with a small team of LLM-backed participants that
//! take turns in fixed round-robin conversations.
//!
//! The crate provides layered abstractions for:
//!
//! * **Model access**: the [`ClientWrapper`] trait and an OpenAI-compatible implementation
//!   built by [`clients::build_client`] from a [`ModelConfig`] (Groq by default)
//! * **Participant state**: [`session::ParticipantSession`] keeps each participant's
//!   instruction, routed history and token usage
//! * **Conversations**: [`conversation::RoundRobinChat`] runs participants in cyclic order
//!   until a [`termination::TerminationCondition`] fires
//! * **Delimited output**: [`extraction`] pulls the payload framed by
//!   `OUTPUT : STARTS` / `OUTPUT : ENDS` out of a participant's last message
//! * **The pipeline**: [`workflow::LiteratureReviewWorkflow`] chains the summarize, filter,
//!   draft and revise stages over papers from a [`papers::PaperSource`]
//! * **Evaluation**: [`scoring::calculate_rouge_score`] compares the result with a
//!   human-written review
//!
//! ## Getting Started
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use litreview::clients::build_client;
//! use litreview::feedback::ScriptedFeedback;
//! use litreview::papers::SemanticScholarSource;
//! use litreview::workflow::LiteratureReviewWorkflow;
//! use litreview::ReviewConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     litreview::init_logger();
//!
//!     let config = ReviewConfig::from_env()?;
//!     let workflow = LiteratureReviewWorkflow::new(
//!         config.clone(),
//!         build_client(&config.model),
//!         Arc::new(SemanticScholarSource::new(&config.papers)),
//!     );
//!
//!     // no interactive revisions
//!     let review = workflow
//!         .run(&config.topic, &config.paper_titles, &ScriptedFeedback::new(vec!["exit"]))
//!         .await?;
//!     println!("{}", review);
//!     Ok(())
//! }
//! ```

use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialise the global [`env_logger`] subscriber exactly once.
///
/// `RUST_LOG` controls verbosity.
///
/// ```rust
/// litreview::init_logger();
/// log::info!("Logger is ready");
/// ```
pub fn init_logger() {
    INIT_LOGGER.call_once(|| {
        env_logger::init();
    });
}

// Import the top-level `litreview` module.
pub mod litreview;

// Re-exporting key items for easier external access.
pub use crate::litreview::client_wrapper;
pub use crate::litreview::client_wrapper::{ClientWrapper, Message, Role, TokenUsage};
pub use crate::litreview::clients;
pub use crate::litreview::config;
pub use crate::litreview::config::{ModelConfig, ModelInfo, PaperSourceConfig, ReviewConfig, StageLimits};
pub use crate::litreview::conversation;
pub use crate::litreview::error::ReviewError;
pub use crate::litreview::event;
pub use crate::litreview::event::{EventHandler, ConversationEvent, WorkflowEvent};
pub use crate::litreview::extraction;
pub use crate::litreview::feedback;
pub use crate::litreview::papers;
pub use crate::litreview::precheck;
pub use crate::litreview::prompts;
pub use crate::litreview::reference;
pub use crate::litreview::scoring;
pub use crate::litreview::session;
pub use crate::litreview::termination;
pub use crate::litreview::workflow;
