//! Events that can occur in a conversation

use crate::reply_generator::Reply;

/// Events that trigger state transitions.
///
/// Timestamps are captured by the caller so transitions stay pure.
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    UserMessage { text: String, time: String },
    Clear,

    // Generator events
    ReplyReady { reply: Reply, time: String },
}
