//! compos-inbox - Headless inbox engine
//!
//! State machine and display derivations behind an email inbox view. The
//! crate fetches a message list from a remote API, tracks the
//! loading/loaded/failed lifecycle and the local selection, and derives
//! display-ready values from raw records. A presentation layer of any kind
//! renders what this crate exposes; none is included here.
//!
//! ## Module Organization
//!
//! - `adapters/`: HTTP implementation of the message source
//! - `config/`: Endpoint and timeout configuration
//! - `display/`: Pure display derivations (sender, timestamp, links)
//! - `fetch/`: Data-source seam and single-flight fetch controller
//! - `inbox/`: The view model and its state machine
//! - `types/`: Message record and error types

pub mod adapters;
pub mod config;
pub mod display;
pub mod fetch;
pub mod inbox;
pub mod types;

pub use adapters::HttpMessageSource;
pub use config::InboxConfig;
pub use display::{
    body_text, display_name, display_timestamp, linkify, sender_initial, BodySegment,
    NO_BODY_PLACEHOLDER, UNKNOWN_SENDER,
};
pub use fetch::{FetchController, FetchOutcome, MessageSource};
pub use inbox::{InboxEvent, InboxState, InboxViewModel, Phase, FETCH_FAILED_MESSAGE};
pub use types::error::{InboxError, Result};
pub use types::EmailMessage;
