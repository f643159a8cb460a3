//! The four-stage literature review pipeline.
//!
//! ```text
//! titles ──▶ summarize ──▶ filter ──▶ draft ──▶ revise ──▶ final review
//!           (1 agent)    (1 agent)  (writer,    (editor,
//!                                    editor)     writer) × feedback lines
//! ```
//!
//! Each stage runs its own [`RoundRobinChat`] and hands the extracted payload of its last
//! message to the next stage. Summarize and filter insist on a delimited payload; draft and
//! revise fall back to the raw last message.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use litreview::clients::build_client;
//! use litreview::event::ConsoleEventHandler;
//! use litreview::feedback::StdinFeedback;
//! use litreview::papers::SemanticScholarSource;
//! use litreview::workflow::LiteratureReviewWorkflow;
//! use litreview::ReviewConfig;
//!
//! # async {
//! let config = ReviewConfig::from_env()?;
//! let workflow = LiteratureReviewWorkflow::new(
//!     config.clone(),
//!     build_client(&config.model),
//!     Arc::new(SemanticScholarSource::new(&config.papers)),
//! )
//! .with_event_handler(Arc::new(ConsoleEventHandler));
//!
//! let review = workflow
//!     .run(&config.topic, &config.paper_titles, &StdinFeedback::new())
//!     .await?;
//! println!("{}", review);
//! # Ok::<(), litreview::ReviewError>(())
//! # };
//! ```

use crate::litreview::client_wrapper::ClientWrapper;
use crate::litreview::config::ReviewConfig;
use crate::litreview::conversation::{ConversationOutcome, Participant, RoundRobinChat};
use crate::litreview::error::ReviewError;
use crate::litreview::event::{EventHandler, WorkflowEvent};
use crate::litreview::extraction::Extraction;
use crate::litreview::feedback::{is_exit, FeedbackSource};
use crate::litreview::papers::{Paper, PaperSource};
use crate::litreview::prompts;
use crate::litreview::termination::TerminationCondition;
use std::sync::Arc;

pub const SUMMARIZE_STAGE: &str = "summarize";
pub const FILTER_STAGE: &str = "filter";
pub const DRAFT_STAGE: &str = "draft";
pub const REVISE_STAGE: &str = "revise";

/// Drives the summarize, filter, draft and revise stages with one shared model client.
pub struct LiteratureReviewWorkflow {
    config: ReviewConfig,
    client: Arc<dyn ClientWrapper>,
    paper_source: Arc<dyn PaperSource>,
    event_handler: Option<Arc<dyn EventHandler>>,
}

impl LiteratureReviewWorkflow {
    pub fn new(
        config: ReviewConfig,
        client: Arc<dyn ClientWrapper>,
        paper_source: Arc<dyn PaperSource>,
    ) -> Self {
        Self {
            config,
            client,
            paper_source,
            event_handler: None,
        }
    }

    /// Receive stage progress and, through every stage conversation, the live transcript.
    pub fn with_event_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    /// Run all four stages and return the final review.
    pub async fn run(
        &self,
        topic: &str,
        paper_titles: &[String],
        feedback: &dyn FeedbackSource,
    ) -> Result<String, ReviewError> {
        log::info!(
            "LiteratureReviewWorkflow::run(): topic '{}', {} title(s)",
            topic,
            paper_titles.len()
        );
        let summaries = self.summarize(paper_titles).await?;
        let filtered = self.filter(topic, &summaries).await?;
        let draft = self.draft(topic, &filtered).await?;
        self.revise(&draft, feedback).await
    }

    /// Look up each title and keep its first hit. Titles without a hit are skipped.
    pub async fn fetch_papers(&self, paper_titles: &[String]) -> Result<Vec<Paper>, ReviewError> {
        let mut papers = Vec::with_capacity(paper_titles.len());
        for title in paper_titles {
            let hits = self
                .paper_source
                .search(title, self.config.results_per_title)
                .await
                .map_err(|e| ReviewError::PaperSource(format!("search for '{}': {}", title, e)))?;

            match hits.into_iter().next() {
                Some(paper) => {
                    log::info!("fetched paper: {}", paper.link);
                    self.notify(WorkflowEvent::PaperFetched {
                        title: paper.title.clone(),
                        link: paper.link.clone(),
                    })
                    .await;
                    papers.push(paper);
                }
                None => {
                    log::warn!("no search result for '{}'", title);
                    self.notify(WorkflowEvent::PaperMissing {
                        query: title.clone(),
                    })
                    .await;
                }
            }
        }
        if papers.is_empty() {
            log::warn!("LiteratureReviewWorkflow::fetch_papers(): no paper found for any title");
        }
        Ok(papers)
    }

    /// Fetch the papers and have a single agent summarize them.
    pub async fn summarize(&self, paper_titles: &[String]) -> Result<String, ReviewError> {
        self.stage_started(SUMMARIZE_STAGE).await;
        let papers = self.fetch_papers(paper_titles).await?;

        let instruction =
            prompts::summarizer_instruction(self.config.summary_word_count, &self.config.markers);
        let mut chat = self.chat(SUMMARIZE_STAGE, self.config.limits.summarize);
        chat.add_participant(self.participant(prompts::SUMMARIZER_NAME, &instruction))?;

        let outcome = chat.run(&prompts::summarize_task(&papers)).await?;
        let summaries = self.extract(&outcome).require_payload(SUMMARIZE_STAGE)?;
        self.stage_completed(SUMMARIZE_STAGE, &summaries).await;
        Ok(summaries)
    }

    /// Drop papers whose summaries are irrelevant to `topic`.
    pub async fn filter(&self, topic: &str, summaries: &str) -> Result<String, ReviewError> {
        self.stage_started(FILTER_STAGE).await;

        let mut chat = self.chat(FILTER_STAGE, self.config.limits.filter);
        chat.add_participant(self.participant(prompts::FILTER_NAME, &prompts::filter_instruction()))?;

        let task = prompts::filter_task(summaries, topic, &self.config.markers);
        let outcome = chat.run(&task).await?;
        let filtered = self.extract(&outcome).require_payload(FILTER_STAGE)?;
        self.stage_completed(FILTER_STAGE, &filtered).await;
        Ok(filtered)
    }

    /// Writer and editor iterate on a first draft of the review.
    pub async fn draft(&self, topic: &str, filtered: &str) -> Result<String, ReviewError> {
        self.stage_started(DRAFT_STAGE).await;
        let words = self.config.review_word_count;

        let writer = self
            .participant(
                prompts::WRITER_NAME,
                &prompts::writer_instruction(words, &self.config.sentinel, &self.config.markers),
            )
            .with_description("Writes the literature review; speaks first.");
        let editor = self
            .participant(prompts::EDITOR_NAME, &prompts::editor_instruction())
            .with_description("Critiques and approves the draft; speaks second.");

        let mut chat = self.chat(DRAFT_STAGE, self.config.limits.draft);
        chat.add_participant(writer)?;
        chat.add_participant(editor)?;

        let task = prompts::draft_task(topic, words, filtered, &self.config.markers);
        let outcome = chat.run(&task).await?;
        let draft = self.extract_lenient(&outcome, DRAFT_STAGE).await?;
        self.stage_completed(DRAFT_STAGE, &draft).await;
        Ok(draft)
    }

    /// Apply human feedback to `draft` until the source says `exit` or runs dry.
    ///
    /// Each feedback line gets a fresh editor-then-writer conversation over the current
    /// draft; its extracted result becomes the new current draft.
    pub async fn revise(
        &self,
        draft: &str,
        feedback: &dyn FeedbackSource,
    ) -> Result<String, ReviewError> {
        self.stage_started(REVISE_STAGE).await;
        let mut current = draft.to_string();
        let mut rounds = 0usize;

        loop {
            let request = match feedback.next_feedback().await? {
                Some(line) if !is_exit(&line) => line,
                _ => {
                    log::info!(
                        "LiteratureReviewWorkflow::revise(): no further changes requested after {} round(s)",
                        rounds
                    );
                    break;
                }
            };
            rounds += 1;

            let words = self.config.review_word_count;
            let editor = self.participant(
                prompts::EDITOR_NAME,
                &prompts::revise_editor_instruction(words),
            );
            let writer = self.participant(
                prompts::WRITER_NAME,
                &prompts::revise_writer_instruction(words, &self.config.sentinel, &self.config.markers),
            );

            let mut chat = self.chat(REVISE_STAGE, self.config.limits.revise);
            chat.add_participant(editor)?;
            chat.add_participant(writer)?;

            let outcome = chat
                .run(&prompts::revise_task(request.trim(), &current))
                .await?;
            current = self.extract_lenient(&outcome, REVISE_STAGE).await?;
        }

        self.stage_completed(REVISE_STAGE, &current).await;
        Ok(current)
    }

    fn participant(&self, name: &str, instruction: &str) -> Participant {
        Participant::new(name, instruction, self.client.clone())
    }

    fn chat(&self, name: &str, message_limit: usize) -> RoundRobinChat {
        let termination = TerminationCondition::text_mention(self.config.sentinel.as_str())
            | TerminationCondition::max_messages(message_limit);
        let chat = RoundRobinChat::new(name, termination);
        match &self.event_handler {
            Some(handler) => chat.with_event_handler(handler.clone()),
            None => chat,
        }
    }

    fn extract(&self, outcome: &ConversationOutcome) -> Extraction {
        Extraction::from_message(outcome.last_message(), &self.config.markers)
    }

    async fn extract_lenient(
        &self,
        outcome: &ConversationOutcome,
        stage: &str,
    ) -> Result<String, ReviewError> {
        let extraction = self.extract(outcome);
        if let Extraction::RawFallback(_) = extraction {
            log::warn!(
                "LiteratureReviewWorkflow: {} stage output has no markers, using the raw last message",
                stage
            );
            self.notify(WorkflowEvent::RawFallbackUsed {
                stage: stage.to_string(),
            })
            .await;
        }
        extraction.payload_or_raw(stage)
    }

    async fn stage_started(&self, stage: &str) {
        log::info!("LiteratureReviewWorkflow: {} stage started", stage);
        self.notify(WorkflowEvent::StageStarted {
            stage: stage.to_string(),
        })
        .await;
    }

    async fn stage_completed(&self, stage: &str, output: &str) {
        log::info!(
            "LiteratureReviewWorkflow: {} stage completed ({} chars)",
            stage,
            output.len()
        );
        self.notify(WorkflowEvent::StageCompleted {
            stage: stage.to_string(),
            output_length: output.len(),
        })
        .await;
    }

    async fn notify(&self, event: WorkflowEvent) {
        if let Some(handler) = &self.event_handler {
            handler.on_workflow_event(&event).await;
        }
    }
}
