//! Mock message source for unit testing.
//!
//! Answers fetches from a scripted response queue and records how often it
//! was called. An optional delay keeps a fetch in flight so overlap
//! behavior can be exercised under paused test time.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::fetch::MessageSource;
use crate::types::error::InboxError;
use crate::types::EmailMessage;

/// Mock implementation of `MessageSource` for testing.
pub struct MockMessageSource {
    responses: Mutex<VecDeque<Result<Vec<EmailMessage>, InboxError>>>,
    delay: Mutex<Option<Duration>>,
    calls: AtomicUsize,
}

impl Default for MockMessageSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMessageSource {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            delay: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queue a successful response.
    pub fn with_messages(self, messages: Vec<EmailMessage>) -> Self {
        self.push(Ok(messages));
        self
    }

    /// Queue a failed response.
    pub fn with_failure(self) -> Self {
        self.push(Err(InboxError::Status(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        )));
        self
    }

    /// Delay every fetch by the given duration.
    pub fn with_delay(self, delay: Duration) -> Self {
        match self.delay.lock() {
            Ok(mut d) => *d = Some(delay),
            Err(poisoned) => *poisoned.into_inner() = Some(delay),
        }
        self
    }

    /// Number of fetches issued against this source.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn push(&self, response: Result<Vec<EmailMessage>, InboxError>) {
        match self.responses.lock() {
            Ok(mut queue) => queue.push_back(response),
            Err(poisoned) => poisoned.into_inner().push_back(response),
        }
    }
}

#[async_trait]
impl MessageSource for MockMessageSource {
    async fn fetch_messages(&self) -> Result<Vec<EmailMessage>, InboxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let delay = match self.delay.lock() {
            Ok(d) => *d,
            Err(poisoned) => *poisoned.into_inner(),
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let next = match self.responses.lock() {
            Ok(mut queue) => queue.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        };

        // An exhausted script answers with an empty list
        next.unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Build a minimal message record for tests.
pub fn test_message(id: &str) -> EmailMessage {
    EmailMessage {
        id: id.to_string(),
        sender: format!("{}@example.com", id),
        subject: format!("Subject {}", id),
        body: None,
        snippet: None,
        date: None,
        is_read: false,
    }
}
