//! Runtime for live conversations
//!
//! Each session owns an isolated [`ConversationController`]; the
//! [`SessionManager`] maps session ids to them.

mod controller;
pub mod traits;

#[cfg(test)]
pub mod testing;

#[allow(unused_imports)] // Public API re-exports
pub use controller::{
    CompletedTurn, ConversationController, MoodJourney, MoodPanel, SessionSnapshot,
};
pub use traits::*;

use crate::reply_generator::ReplyGenerator;
use crate::store::Message;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Idle sessions with no open stream are dropped after this long
pub const SESSION_TTL: Duration = Duration::from_secs(30 * 60);

/// How often the reaper looks for expired sessions
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Controller type used by the server
pub type SessionController = ConversationController<Arc<dyn CompletionClient>>;

/// Events pushed to connected clients
#[derive(Debug, Clone)]
pub enum SessionEvent {
    StateChange { state: &'static str },
    Message { message: Message },
    Cleared,
}

impl SessionEvent {
    /// SSE event name
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::StateChange { .. } => "state_change",
            SessionEvent::Message { .. } => "message",
            SessionEvent::Cleared => "cleared",
        }
    }
}

/// Manager for all live sessions
pub struct SessionManager {
    client: Arc<dyn CompletionClient>,
    sessions: RwLock<HashMap<String, Arc<SessionController>>>,
}

impl SessionManager {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Start a fresh session with an empty transcript
    pub async fn create_session(&self) -> Arc<SessionController> {
        let id = uuid::Uuid::new_v4().to_string();
        let controller = Arc::new(ConversationController::new(
            id.clone(),
            ReplyGenerator::new(self.client.clone()),
        ));

        self.sessions.write().await.insert(id.clone(), controller.clone());
        let sessions = self.session_count().await;
        tracing::info!(
            session_id = %id,
            model = %self.client.model_id(),
            sessions,
            "Session created"
        );
        controller
    }

    pub async fn get(&self, id: &str) -> Option<Arc<SessionController>> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Drop a session. Returns false if it did not exist.
    pub async fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            tracing::info!(session_id = %id, "Session removed");
        }
        removed
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop every session that [`ConversationController::is_expired`] allows.
    /// Returns how many were removed.
    pub async fn prune_expired(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(ttl));
        let removed = before - sessions.len();

        if removed > 0 {
            tracing::info!(removed, remaining = sessions.len(), "Expired idle sessions");
        }
        removed
    }

    /// Start the background task that prunes expired sessions every `every`
    pub fn spawn_reaper(self: &Arc<Self>, ttl: Duration, every: Duration) -> JoinHandle<()> {
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                manager.prune_expired(ttl).await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MockCompletionClient;
    use super::*;
    use crate::llm::LlmResponse;

    fn manager() -> (Arc<MockCompletionClient>, SessionManager) {
        let client = Arc::new(MockCompletionClient::new("mock-model"));
        (client.clone(), SessionManager::new(client))
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let (_, manager) = manager();
        let session = manager.create_session().await;

        let found = manager.get(session.session_id()).await.unwrap();
        assert_eq!(found.session_id(), session.session_id());
        assert_eq!(manager.session_count().await, 1);
        assert!(manager.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let (client, manager) = manager();
        client.queue_response(LlmResponse::text("glad to hear"));
        let first = manager.create_session().await;
        let second = manager.create_session().await;

        first.submit("I feel great").await.unwrap();

        assert_eq!(first.transcript().len(), 2);
        assert!(second.transcript().is_empty());
        assert!(second.current_mood().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_prune_drops_only_expired_sessions() {
        let (_, manager) = manager();
        let ttl = Duration::from_secs(60);
        let stale = manager.create_session().await;
        let watched = manager.create_session().await;
        let _stream = watched.subscribe();

        tokio::time::advance(Duration::from_secs(45)).await;
        let fresh = manager.create_session().await;
        tokio::time::advance(Duration::from_secs(30)).await;

        assert_eq!(manager.prune_expired(ttl).await, 1);
        assert!(manager.get(stale.session_id()).await.is_none());
        assert!(manager.get(watched.session_id()).await.is_some());
        assert!(manager.get(fresh.session_id()).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_evicts_idle_sessions() {
        let (_, manager) = manager();
        let manager = Arc::new(manager);
        let ttl = Duration::from_secs(120);
        let reaper = manager.spawn_reaper(ttl, Duration::from_secs(30));

        let session = manager.create_session().await;
        let id = session.session_id().to_string();
        drop(session);

        tokio::time::sleep(Duration::from_secs(100)).await;
        assert_eq!(manager.session_count().await, 1);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(manager.session_count().await, 0);
        assert!(manager.get(&id).await.is_none());

        reaper.abort();
    }

    #[tokio::test]
    async fn test_remove() {
        let (_, manager) = manager();
        let session = manager.create_session().await;
        let id = session.session_id().to_string();

        assert!(manager.remove(&id).await);
        assert!(!manager.remove(&id).await);
        assert_eq!(manager.session_count().await, 0);
    }
}
