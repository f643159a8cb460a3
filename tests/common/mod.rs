#![allow(dead_code)]

use async_trait::async_trait;
use litreview::client_wrapper::{ClientError, ClientWrapper, Message, Role, TokenUsage};
use litreview::event::{ConversationEvent, EventHandler, WorkflowEvent};
use litreview::papers::{Paper, PaperSource};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Replies from a fixed script and records every request it receives.
pub struct ScriptedClient {
    name: String,
    replies: Mutex<VecDeque<Result<String, String>>>,
    calls: Mutex<Vec<Vec<Message>>>,
    usage_per_call: Option<TokenUsage>,
    usage: tokio::sync::Mutex<Option<TokenUsage>>,
}

impl ScriptedClient {
    pub fn new(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self::build(replies.iter().map(|r| Ok(r.to_string())).collect(), None))
    }

    pub fn with_results(replies: Vec<Result<&str, &str>>) -> Arc<Self> {
        Arc::new(Self::build(
            replies
                .into_iter()
                .map(|r| r.map(String::from).map_err(String::from))
                .collect(),
            None,
        ))
    }

    pub fn with_usage(replies: &[&str], usage: TokenUsage) -> Arc<Self> {
        Arc::new(Self::build(
            replies.iter().map(|r| Ok(r.to_string())).collect(),
            Some(usage),
        ))
    }

    fn build(replies: VecDeque<Result<String, String>>, usage_per_call: Option<TokenUsage>) -> Self {
        ScriptedClient {
            name: "scripted".to_string(),
            replies: Mutex::new(replies),
            calls: Mutex::new(Vec::new()),
            usage_per_call,
            usage: tokio::sync::Mutex::new(None),
        }
    }

    /// Every request received so far, oldest first.
    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ClientWrapper for ScriptedClient {
    async fn send_message(&self, messages: &[Message]) -> Result<Message, ClientError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        let next = self.replies.lock().unwrap().pop_front();
        *self.usage.lock().await = self.usage_per_call.clone();
        match next {
            Some(Ok(text)) => Ok(Message::new(Role::Assistant, text)),
            Some(Err(err)) => Err(err.into()),
            None => Err("script exhausted".into()),
        }
    }

    fn model_name(&self) -> &str {
        &self.name
    }

    fn usage_slot(&self) -> Option<&tokio::sync::Mutex<Option<TokenUsage>>> {
        Some(&self.usage)
    }
}

/// Role and content of a request, for compact assertions.
pub fn summarize_request(messages: &[Message]) -> Vec<(Role, String)> {
    messages
        .iter()
        .map(|m| (m.role.clone(), m.content.to_string()))
        .collect()
}

/// Answers searches from a title -> papers table and records the queries.
pub struct MockPaperSource {
    papers: HashMap<String, Vec<Paper>>,
    fail: bool,
    queries: Mutex<Vec<(String, usize)>>,
}

impl MockPaperSource {
    pub fn new(entries: Vec<(&str, Paper)>) -> Arc<Self> {
        let mut papers: HashMap<String, Vec<Paper>> = HashMap::new();
        for (query, paper) in entries {
            papers.entry(query.to_string()).or_default().push(paper);
        }
        Arc::new(MockPaperSource {
            papers,
            fail: false,
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(MockPaperSource {
            papers: HashMap::new(),
            fail: true,
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaperSource for MockPaperSource {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<Paper>, ClientError> {
        self.queries
            .lock()
            .unwrap()
            .push((query.to_string(), max_results));
        if self.fail {
            return Err("service unavailable".into());
        }
        let mut hits = self.papers.get(query).cloned().unwrap_or_default();
        hits.truncate(max_results);
        Ok(hits)
    }
}

/// Keeps every event it receives.
#[derive(Default)]
pub struct RecordingHandler {
    pub conversation: Mutex<Vec<ConversationEvent>>,
    pub workflow: Mutex<Vec<WorkflowEvent>>,
}

#[async_trait]
impl EventHandler for RecordingHandler {
    async fn on_conversation_event(&self, event: &ConversationEvent) {
        self.conversation.lock().unwrap().push(event.clone());
    }

    async fn on_workflow_event(&self, event: &WorkflowEvent) {
        self.workflow.lock().unwrap().push(event.clone());
    }
}

pub fn delimited(payload: &str) -> String {
    format!("Here you go.\nOUTPUT : STARTS\n{}\nOUTPUT : ENDS", payload)
}
