//! Inbox view model
//!
//! Owns the inbox state machine (Idle → Loading → Loaded/Failed) and the
//! local selection, drives fetches through `FetchController`, and notifies
//! subscribers of every state change. The presentation layer reads state
//! through the accessors (or `snapshot`) and mutates only through
//! `refresh`, `select`, and `clear_selection`.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::InboxConfig;
use crate::fetch::{FetchController, FetchOutcome, MessageSource};
use crate::types::error::InboxError;
use crate::types::EmailMessage;

/// Message shown when a fetch fails, whatever the cause
pub const FETCH_FAILED_MESSAGE: &str = "Could not load emails. Is the backend running?";

/// Fetch lifecycle state of the inbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle
    }
}

/// Inbox state for the presentation layer
///
/// A fetch failure never clears `messages`; the previous list stays
/// usable next to the error. `selected_id`, when present, always names an
/// id in `messages`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InboxState {
    pub phase: Phase,
    pub messages: Vec<EmailMessage>,
    pub error: Option<String>,
    pub selected_id: Option<String>,
    pub last_refreshed: Option<DateTime<Utc>>,
}

/// Event emitted by the view model on state changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InboxEvent {
    PhaseChanged { phase: Phase },
    MessagesUpdated { count: usize },
    SelectionChanged { selected_id: Option<String> },
}

/// The inbox view model
pub struct InboxViewModel {
    controller: FetchController,
    state: RwLock<InboxState>,
    subscribers: Mutex<Vec<flume::Sender<InboxEvent>>>,
}

impl InboxViewModel {
    pub fn new(controller: FetchController) -> Self {
        Self {
            controller,
            state: RwLock::new(InboxState::default()),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Create a view model over the given message source
    pub fn with_source(source: Arc<dyn MessageSource>) -> Self {
        Self::new(FetchController::new(source))
    }

    /// Create a view model fetching over HTTP as described by the config
    pub fn from_config(config: &InboxConfig) -> Result<Self, InboxError> {
        Ok(Self::new(FetchController::from_config(config)?))
    }

    // ------------------------------------------------------------------
    // Read-only surface
    // ------------------------------------------------------------------

    /// The whole current state as one value
    pub async fn snapshot(&self) -> InboxState {
        self.state.read().await.clone()
    }

    pub async fn phase(&self) -> Phase {
        self.state.read().await.phase
    }

    pub async fn messages(&self) -> Vec<EmailMessage> {
        self.state.read().await.messages.clone()
    }

    pub async fn message_count(&self) -> usize {
        self.state.read().await.messages.len()
    }

    pub async fn error_message(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn selected_id(&self) -> Option<String> {
        self.state.read().await.selected_id.clone()
    }

    /// Full record of the selected message, for the detail pane
    pub async fn selected_message(&self) -> Option<EmailMessage> {
        let state = self.state.read().await;
        let id = state.selected_id.as_deref()?;
        state.messages.iter().find(|m| m.id == id).cloned()
    }

    /// Whether this is the first fetch, with nothing to show yet
    ///
    /// Distinguishes the initial skeleton from the "no emails" empty state.
    pub async fn is_initial_loading(&self) -> bool {
        let state = self.state.read().await;
        state.phase == Phase::Loading && state.messages.is_empty()
    }

    /// Subscribe to state-change events
    ///
    /// Every subscriber gets every event; receivers that were dropped are
    /// pruned on the next emit.
    pub fn subscribe(&self) -> flume::Receiver<InboxEvent> {
        let (tx, rx) = flume::unbounded();
        match self.subscribers.lock() {
            Ok(mut subs) => subs.push(tx),
            Err(poisoned) => poisoned.into_inner().push(tx),
        }
        rx
    }

    // ------------------------------------------------------------------
    // Mutating entry points
    // ------------------------------------------------------------------

    /// Fetch the message list and apply the outcome
    ///
    /// Entering `Loading` clears a previous error but keeps the previous
    /// messages visible. Success replaces the list wholesale and
    /// re-validates the selection; failure keeps the list and sets the
    /// user-facing error. A call while a fetch is pending is a no-op.
    pub async fn refresh(&self) {
        if self.controller.is_in_flight() {
            debug!("Refresh requested while loading, ignoring");
            return;
        }

        self.update_state(|s| {
            s.phase = Phase::Loading;
            s.error = None;
        })
        .await;
        self.emit_event(InboxEvent::PhaseChanged {
            phase: Phase::Loading,
        });

        match self.controller.refresh().await {
            FetchOutcome::Success(messages) => {
                let (count, selection_cleared) = {
                    let mut s = self.state.write().await;
                    s.messages = messages;
                    s.phase = Phase::Loaded;
                    s.error = None;
                    s.last_refreshed = Some(Utc::now());

                    let mut cleared = false;
                    if let Some(id) = s.selected_id.clone() {
                        if !s.messages.iter().any(|m| m.id == id) {
                            debug!("Selected message {} no longer present, clearing selection", id);
                            s.selected_id = None;
                            cleared = true;
                        }
                    }
                    (s.messages.len(), cleared)
                };

                info!("Inbox loaded with {} messages", count);
                self.emit_event(InboxEvent::PhaseChanged {
                    phase: Phase::Loaded,
                });
                self.emit_event(InboxEvent::MessagesUpdated { count });
                if selection_cleared {
                    self.emit_event(InboxEvent::SelectionChanged { selected_id: None });
                }
            }
            FetchOutcome::Failed => {
                warn!("Inbox refresh failed");
                self.update_state(|s| {
                    s.phase = Phase::Failed;
                    s.error = Some(FETCH_FAILED_MESSAGE.to_string());
                })
                .await;
                self.emit_event(InboxEvent::PhaseChanged {
                    phase: Phase::Failed,
                });
            }
            FetchOutcome::AlreadyInFlight | FetchOutcome::Superseded => {
                // The pending fetch owns the next transition
            }
        }
    }

    /// Toggle the selection for a message id
    ///
    /// Selecting the already selected id clears the selection; selecting
    /// another id in the list replaces it; an id not in the list is
    /// ignored. Purely local, distinct from a record's own read flag.
    pub async fn select(&self, id: &str) {
        let update = {
            let mut s = self.state.write().await;
            if !s.messages.iter().any(|m| m.id == id) {
                debug!("Ignoring selection of unknown message {}", id);
                None
            } else if s.selected_id.as_deref() == Some(id) {
                s.selected_id = None;
                Some(None)
            } else {
                s.selected_id = Some(id.to_string());
                Some(Some(id.to_string()))
            }
        };

        if let Some(selected_id) = update {
            self.emit_event(InboxEvent::SelectionChanged { selected_id });
        }
    }

    /// Drop the selection, if any
    pub async fn clear_selection(&self) {
        let had_selection = {
            let mut s = self.state.write().await;
            let had = s.selected_id.is_some();
            s.selected_id = None;
            had
        };

        if had_selection {
            self.emit_event(InboxEvent::SelectionChanged { selected_id: None });
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    async fn update_state<F>(&self, update_fn: F)
    where
        F: FnOnce(&mut InboxState),
    {
        let mut state = self.state.write().await;
        update_fn(&mut state);
    }

    fn emit_event(&self, event: InboxEvent) {
        let mut subs = match self.subscribers.lock() {
            Ok(subs) => subs,
            Err(poisoned) => poisoned.into_inner(),
        };
        subs.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
