//! Mock model client for running without an API key and for tests.
//!
//! Returns a canned schedule, or a scripted reply / error, without network calls.

use crate::domain::{GeneratedSchedule, ModelError, ScheduledDay, WEEKDAYS};
use crate::ports::{ModelClient, SchemaHint};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::info;

enum Script {
    Canned,
    Reply(String),
    Fail(ModelError),
}

/// Mock model client.
///
/// Simulates network latency with a configurable delay and counts calls.
pub struct MockAiAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
    script: Script,
    calls: AtomicUsize,
}

impl MockAiAdapter {
    /// Create a new mock adapter with default delay (100ms) and canned replies.
    pub fn new() -> Self {
        Self::with_delay(100)
    }

    /// Create a canned-reply mock adapter with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            script: Script::Canned,
            calls: AtomicUsize::new(0),
        }
    }

    /// Always reply with `text`, verbatim.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            delay_ms: 0,
            script: Script::Reply(text.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fail with `error`.
    pub fn failing(error: ModelError) -> Self {
        Self {
            delay_ms: 0,
            script: Script::Fail(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `complete` calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Canned schedule sized to the "exactly N workout days" request in the prompt.
    fn canned_reply(prompt: &str) -> String {
        let days = prompt
            .split("exactly ")
            .nth(1)
            .and_then(|rest| rest.split_whitespace().next())
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(3)
            .min(WEEKDAYS.len());

        let schedule = GeneratedSchedule {
            days: WEEKDAYS[..days]
                .iter()
                .enumerate()
                .map(|(i, day)| ScheduledDay {
                    day: day.to_string(),
                    title: format!("[MOCK] Session {}", i + 1),
                    activities: vec![
                        "[MOCK] Warm-up: 5 minutes".to_string(),
                        "[MOCK] Configure a real AI API key for generated workouts".to_string(),
                    ],
                })
                .collect(),
        };
        serde_json::to_string(&schedule).unwrap_or_default()
    }
}

impl Default for MockAiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ModelClient for MockAiAdapter {
    async fn complete(&self, prompt: &str, schema_hint: &SchemaHint) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        info!(
            prompt_len = prompt.len(),
            schema = schema_hint.name,
            "[MOCK] Simulating model completion"
        );

        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        match &self.script {
            Script::Canned => Ok(Self::canned_reply(prompt)),
            Script::Reply(text) => Ok(text.clone()),
            Script::Fail(error) => Err(error.clone()),
        }
    }
}
