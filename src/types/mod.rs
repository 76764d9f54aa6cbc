pub mod error;

use serde::{Deserialize, Serialize};

use crate::display;
use crate::display::BodySegment;

/// One email message as returned by the remote API
///
/// Received verbatim and never mutated; each fetch replaces the whole list.
/// Only the identifier is structurally required — every other field is
/// tolerated missing so that one sparse record cannot sink the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub id: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub is_read: bool,
}

impl EmailMessage {
    /// Human-readable sender name for the list row
    pub fn display_name(&self) -> String {
        display::display_name(&self.sender)
    }

    /// Uppercased first character of the display name, for the avatar glyph
    pub fn sender_initial(&self) -> String {
        display::sender_initial(&self.sender)
    }

    /// Short time for today's messages, short month/day otherwise
    pub fn display_timestamp(&self) -> String {
        display::display_timestamp(self.date.as_deref())
    }

    /// Body text with snippet/placeholder fallback
    pub fn body_text(&self) -> &str {
        display::body_text(self.body.as_deref(), self.snippet.as_deref())
    }

    /// Body text split into plain-text and link segments
    pub fn body_segments(&self) -> Vec<BodySegment> {
        display::linkify(self.body_text())
    }
}
