//! Sources of human feedback for the revise stage.
//!
//! A [`FeedbackSource`] yields one line per call. `Ok(None)` means the input ended, which
//! the revise loop treats the same as the `exit` command (see [`is_exit`]).

use crate::litreview::error::ReviewError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

pub const FEEDBACK_PROMPT: &str = "Enter your feedback (type 'exit' to leave): ";

/// `true` when `line` is the command that ends the revise loop.
pub fn is_exit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("exit")
}

#[async_trait]
pub trait FeedbackSource: Send + Sync {
    /// Next feedback line, without its line terminator, or `None` at end of input.
    async fn next_feedback(&self) -> Result<Option<String>, ReviewError>;
}

/// Prompts on stdout and reads lines from stdin.
pub struct StdinFeedback {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl StdinFeedback {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

impl Default for StdinFeedback {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedbackSource for StdinFeedback {
    async fn next_feedback(&self) -> Result<Option<String>, ReviewError> {
        print!("{}", FEEDBACK_PROMPT);
        std::io::stdout().flush()?;
        let mut lines = self.lines.lock().await;
        Ok(lines.next_line().await?)
    }
}

/// Replays a fixed list of lines, then reports end of input.
pub struct ScriptedFeedback {
    lines: Mutex<VecDeque<String>>,
}

impl ScriptedFeedback {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: Mutex::new(lines.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl FeedbackSource for ScriptedFeedback {
    async fn next_feedback(&self) -> Result<Option<String>, ReviewError> {
        Ok(self.lines.lock().await.pop_front())
    }
}
