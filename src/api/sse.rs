//! Server-Sent Events support

use crate::runtime::{SessionEvent, SessionSnapshot};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Stream an `init` snapshot followed by live session events
pub fn sse_stream(
    snapshot: SessionSnapshot,
    broadcast_rx: tokio::sync::broadcast::Receiver<SessionEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let init = futures::stream::once(async move { Ok(init_event(&snapshot)) });

    let broadcasts = BroadcastStream::new(broadcast_rx).filter_map(|result| match result {
        Ok(event) => Some(Ok(session_event_to_axum(event))),
        Err(_) => None, // Skip lagged messages
    });

    Sse::new(init.chain(broadcasts)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn init_event(snapshot: &SessionSnapshot) -> Event {
    let data = json!({
        "type": "init",
        "session": snapshot,
    });
    Event::default().event("init").data(data.to_string())
}

fn session_event_to_axum(event: SessionEvent) -> Event {
    let name = event.name();
    let data = session_event_json(event);
    Event::default().event(name).data(data.to_string())
}

fn session_event_json(event: SessionEvent) -> serde_json::Value {
    match event {
        SessionEvent::StateChange { state } => json!({
            "type": "state_change",
            "state": state,
        }),
        SessionEvent::Message { message } => json!({
            "type": "message",
            "message": message,
        }),
        SessionEvent::Cleared => json!({ "type": "cleared" }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::Mood;
    use crate::store::Message;

    #[test]
    fn test_event_payloads() {
        let state = session_event_json(SessionEvent::StateChange { state: "processing" });
        assert_eq!(state["type"], "state_change");
        assert_eq!(state["state"], "processing");

        let message = session_event_json(SessionEvent::Message {
            message: Message::user_at("I'm tired", Mood::Negative, "21:05"),
        });
        assert_eq!(message["message"]["role"], "user");
        assert_eq!(message["message"]["mood"], "negative");
        assert_eq!(message["message"]["time"], "21:05");

        assert_eq!(session_event_json(SessionEvent::Cleared)["type"], "cleared");
    }
}
