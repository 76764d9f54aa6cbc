//! Pure display derivations for message records
//!
//! Everything here is a pure function of record data. Malformed input
//! degrades to a placeholder or an empty string, never an error, so a
//! single bad record cannot keep the rest of the list from rendering.

mod linkify;
mod sender;
mod timestamp;

pub use linkify::{body_text, linkify, BodySegment, NO_BODY_PLACEHOLDER};
pub use sender::{display_name, sender_initial, UNKNOWN_SENDER};
pub use timestamp::display_timestamp;
