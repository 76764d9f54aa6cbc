//! Message retrieval: the data-source seam and the fetch controller
//!
//! `MessageSource` is the async boundary to the remote API; implementations
//! run against the HTTP adapter in production or a scripted mock in tests.
//! `FetchController` drives at most one retrieval at a time: an atomic
//! in-flight guard coalesces overlapping refreshes, and a request-generation
//! counter discards stale completions.

pub mod mock;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::adapters::HttpMessageSource;
use crate::config::InboxConfig;
use crate::types::error::InboxError;
use crate::types::EmailMessage;

/// A source of message records
///
/// Implementations can call the remote HTTP API or be mocked for testing.
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Fetch the current message list, in the order the server supplies it
    async fn fetch_messages(&self) -> Result<Vec<EmailMessage>, InboxError>;
}

/// Outcome of one `refresh()` call
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// A new message list arrived, superseding the previous one
    Success(Vec<EmailMessage>),
    /// The request or its payload failed; detail went to the logs
    Failed,
    /// Another fetch was already in flight; this call was coalesced
    AlreadyInFlight,
    /// The completion was stale and has been discarded
    Superseded,
}

/// Drives at most one message fetch at a time
pub struct FetchController {
    source: Arc<dyn MessageSource>,
    in_flight: AtomicBool,
    generation: AtomicU64,
    latest: RwLock<Vec<EmailMessage>>,
}

impl FetchController {
    pub fn new(source: Arc<dyn MessageSource>) -> Self {
        Self {
            source,
            in_flight: AtomicBool::new(false),
            generation: AtomicU64::new(0),
            latest: RwLock::new(Vec::new()),
        }
    }

    /// Create a controller fetching over HTTP as described by the config
    pub fn from_config(config: &InboxConfig) -> Result<Self, InboxError> {
        Ok(Self::new(Arc::new(HttpMessageSource::new(config)?)))
    }

    /// Whether a fetch is currently outstanding
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// The most recently fetched message list
    pub async fn latest_messages(&self) -> Vec<EmailMessage> {
        self.latest.read().await.clone()
    }

    /// Fetch the message list once
    ///
    /// A call while a fetch is pending coalesces into it and returns
    /// `AlreadyInFlight` without touching the source. The in-flight flag is
    /// cleared unconditionally on completion, success or failure, so no
    /// caller is ever left stuck in a loading indication. Failures are not
    /// retried here; retry is another `refresh()`.
    pub async fn refresh(&self) -> FetchOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Refresh requested while a fetch is in flight, coalescing");
            return FetchOutcome::AlreadyInFlight;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Starting message fetch (generation {})", generation);

        let result = self.source.fetch_messages().await;

        let outcome = if self.generation.load(Ordering::SeqCst) != generation {
            warn!(
                "Discarding superseded fetch completion (generation {})",
                generation
            );
            FetchOutcome::Superseded
        } else {
            match result {
                Ok(messages) => {
                    debug!("Fetched {} messages", messages.len());
                    *self.latest.write().await = messages.clone();
                    FetchOutcome::Success(messages)
                }
                Err(e) => {
                    warn!("Message fetch failed: {}", e);
                    FetchOutcome::Failed
                }
            }
        };

        self.in_flight.store(false, Ordering::SeqCst);
        outcome
    }
}
