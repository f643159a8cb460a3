mod common;

use common::{delimited, MockPaperSource, RecordingHandler, ScriptedClient};
use litreview::event::WorkflowEvent;
use litreview::feedback::ScriptedFeedback;
use litreview::papers::Paper;
use litreview::workflow::LiteratureReviewWorkflow;
use litreview::{ReviewConfig, ReviewError};
use std::sync::Arc;

fn paper(title: &str) -> Paper {
    Paper::from_parts(
        title,
        Some(format!("Abstract of {}", title)),
        Some(format!("https://papers.example/{}", title.replace(' ', "-"))),
    )
}

fn workflow(client: Arc<ScriptedClient>, source: Arc<MockPaperSource>) -> LiteratureReviewWorkflow {
    LiteratureReviewWorkflow::new(ReviewConfig::default(), client, source)
}

fn titles(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

/// Content of the task message a conversation opened with.
fn task_of(call: &[litreview::Message]) -> String {
    call[1].content.to_string()
}

#[tokio::test]
async fn test_summarize_lists_found_papers_and_skips_missing_ones() {
    let client = ScriptedClient::new(&[&*delimited("1. Paper A: about A")]);
    let source = MockPaperSource::new(vec![("Paper A", paper("Paper A"))]);
    let handler = Arc::new(RecordingHandler::default());
    let wf = workflow(client.clone(), source.clone()).with_event_handler(handler.clone());

    let summaries = wf
        .summarize(&titles(&["Paper A", "Unknown paper"]))
        .await
        .unwrap();

    assert_eq!(summaries, "1. Paper A: about A");
    assert_eq!(
        source.queries(),
        vec![("Paper A".to_string(), 1), ("Unknown paper".to_string(), 1)]
    );
    assert_eq!(
        task_of(&client.calls()[0]),
        "Give summarization of following papers :\n\n\
         1 : Title : Paper A\nDescription : Abstract of Paper A\nLINK : https://papers.example/Paper-A\n\n"
    );
    let system = client.calls()[0][0].content.to_string();
    assert!(system.contains("in 100 words"));

    let events = handler.workflow.lock().unwrap();
    assert!(events.iter().any(|e| matches!(
        e,
        WorkflowEvent::PaperFetched { link, .. } if link == "https://papers.example/Paper-A"
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        WorkflowEvent::PaperMissing { query } if query == "Unknown paper"
    )));
}

#[tokio::test]
async fn test_summarize_without_markers_is_a_missing_payload() {
    let client = ScriptedClient::new(&["I forgot the template"]);
    let source = MockPaperSource::new(vec![("Paper A", paper("Paper A"))]);

    let err = workflow(client, source)
        .summarize(&titles(&["Paper A"]))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ReviewError::MissingPayload {
            stage: "summarize".to_string()
        }
    );
}

#[tokio::test]
async fn test_paper_source_failure_is_reported() {
    let client = ScriptedClient::new(&[]);
    let err = workflow(client.clone(), MockPaperSource::failing())
        .summarize(&titles(&["Paper A"]))
        .await
        .unwrap_err();

    assert!(matches!(err, ReviewError::PaperSource(_)));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_filter_embeds_topic_and_requires_payload() {
    let client = ScriptedClient::new(&[&*delimited("only the relevant paper")]);
    let wf = workflow(client.clone(), MockPaperSource::new(vec![]));

    let filtered = wf.filter("Generative AI", "paper list").await.unwrap();

    assert_eq!(filtered, "only the relevant paper");
    let task = task_of(&client.calls()[0]);
    assert!(task.contains("paper list"));
    assert!(task.contains("**Generative AI**"));

    let client = ScriptedClient::new(&["no markers"]);
    let err = workflow(client, MockPaperSource::new(vec![]))
        .filter("Generative AI", "paper list")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ReviewError::MissingPayload {
            stage: "filter".to_string()
        }
    );
}

#[tokio::test]
async fn test_draft_takes_the_payload_after_editor_approval() {
    let final_reply = format!("{}\nTERMINATE", delimited("The review."));
    let client = ScriptedClient::new(&["first attempt", "approved, wrap it up", &*final_reply]);
    let wf = workflow(client.clone(), MockPaperSource::new(vec![]));

    let draft = wf.draft("Generative AI", "filtered papers").await.unwrap();

    assert_eq!(draft, "The review.");
    assert_eq!(client.call_count(), 3);
    assert!(task_of(&client.calls()[0])
        .starts_with("Write a literature review on Generative AI in 500 words."));
}

#[tokio::test]
async fn test_draft_falls_back_to_the_raw_last_message() {
    let client = ScriptedClient::new(&["A review without markers. TERMINATE"]);
    let handler = Arc::new(RecordingHandler::default());
    let wf = workflow(client, MockPaperSource::new(vec![])).with_event_handler(handler.clone());

    let draft = wf.draft("Generative AI", "filtered papers").await.unwrap();

    assert_eq!(draft, "A review without markers. TERMINATE");
    assert!(handler
        .workflow
        .lock()
        .unwrap()
        .iter()
        .any(|e| matches!(e, WorkflowEvent::RawFallbackUsed { stage } if stage == "draft")));
}

#[tokio::test]
async fn test_revise_applies_feedback_then_exits() {
    let writer_reply = format!("{}\nTERMINATE", delimited("Shorter review."));
    let client = ScriptedClient::new(&["Writer, please shorten it.", &*writer_reply]);
    let wf = workflow(client.clone(), MockPaperSource::new(vec![]));
    let feedback = ScriptedFeedback::new(vec!["make it shorter", "  Exit "]);

    let revised = wf.revise("Long review.", &feedback).await.unwrap();

    assert_eq!(revised, "Shorter review.");
    let calls = client.calls();
    assert_eq!(calls.len(), 2);
    // the editor opens the revise conversation
    assert!(calls[0][0].content.contains("You are an editor"));
    assert_eq!(
        task_of(&calls[0]),
        "Please make the changes to the draft\nUser Change request : make it shorter\nDraft to edit :\nLong review."
    );
}

#[tokio::test]
async fn test_revise_rounds_build_on_the_previous_revision() {
    let client = ScriptedClient::new(&[
        "shorten",
        &*format!("{} TERMINATE", delimited("v2")),
        "add a conclusion",
        &*format!("{} TERMINATE", delimited("v3")),
    ]);
    let wf = workflow(client.clone(), MockPaperSource::new(vec![]));
    let feedback = ScriptedFeedback::new(vec!["shorter", "conclusion please"]);

    let revised = wf.revise("v1", &feedback).await.unwrap();

    assert_eq!(revised, "v3");
    assert!(task_of(&client.calls()[2]).ends_with("Draft to edit :\nv2"));
}

#[tokio::test]
async fn test_revise_with_immediate_exit_returns_the_input_draft() {
    let client = ScriptedClient::new(&[]);
    let wf = workflow(client.clone(), MockPaperSource::new(vec![]));

    let revised = wf
        .revise("Untouched.", &ScriptedFeedback::new(vec!["exit"]))
        .await
        .unwrap();
    assert_eq!(revised, "Untouched.");

    let revised = wf
        .revise("Untouched.", &ScriptedFeedback::new(Vec::<String>::new()))
        .await
        .unwrap();
    assert_eq!(revised, "Untouched.");
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_full_run_chains_every_stage() {
    let client = ScriptedClient::new(&[
        &*delimited("summaries of A and B"),
        &*delimited("summary of A"),
        &*format!("{} TERMINATE", delimited("Draft review.")),
        "make the writer add citations",
        &*format!("{} TERMINATE", delimited("Final review.")),
    ]);
    let source = MockPaperSource::new(vec![("Paper A", paper("Paper A")), ("Paper B", paper("Paper B"))]);
    let handler = Arc::new(RecordingHandler::default());
    let wf = workflow(client.clone(), source).with_event_handler(handler.clone());

    let review = wf
        .run(
            "Generative AI",
            &titles(&["Paper A", "Paper B"]),
            &ScriptedFeedback::new(vec!["add citations", "exit"]),
        )
        .await
        .unwrap();

    assert_eq!(review, "Final review.");
    let calls = client.calls();
    assert!(task_of(&calls[1]).contains("summaries of A and B"));
    assert!(task_of(&calls[2]).contains("summary of A"));
    assert!(task_of(&calls[3]).contains("Draft review."));

    let stages: Vec<String> = handler
        .workflow
        .lock()
        .unwrap()
        .iter()
        .filter_map(|e| match e {
            WorkflowEvent::StageCompleted { stage, .. } => Some(stage.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(stages, vec!["summarize", "filter", "draft", "revise"]);
}

#[tokio::test]
async fn test_generation_failure_aborts_the_pipeline() {
    let client = ScriptedClient::with_results(vec![Err("upstream 503")]);
    let source = MockPaperSource::new(vec![("Paper A", paper("Paper A"))]);

    let err = workflow(client, source)
        .run(
            "Generative AI",
            &titles(&["Paper A"]),
            &ScriptedFeedback::new(vec!["exit"]),
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ReviewError::Generation {
            participant: "summarization_agent".to_string(),
            message: "upstream 503".to_string(),
        }
    );
}
