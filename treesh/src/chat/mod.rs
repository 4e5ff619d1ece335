//! PIN-gated chat threads opened by matches.
//!
//! Each match owns a [`ChatThread`]. The [`ChatGate`] decides whether the
//! current view may read or write it: a thread is `Locked` until the exact
//! PIN is supplied, failed attempts are throttled, and the unlock lasts only
//! until the view is closed.

pub mod errors;
pub mod gate;
pub mod models;

pub use errors::{ChatError, ChatResult};
pub use gate::{ChatGate, GateState};
pub use models::{ChatMessage, ChatPin, ChatSummary, ChatThread, MessageSender, PIN_LENGTH};
