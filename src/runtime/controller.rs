//! Per-session conversation controller
//!
//! Drives one turn at a time through the state machine and executes the
//! resulting effects. State and store locks are never held across an await;
//! the reply request is the only suspension point.

use super::traits::CompletionClient;
use super::SessionEvent;
use crate::mood::{Mood, OverallMood};
use crate::reply_generator::ReplyGenerator;
use crate::state_machine::{transition, ConvState, Effect, Event, TransitionError};
use crate::store::{clock_time, ConversationStore, Message};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::Instant;

/// The two messages committed by a completed turn
#[derive(Debug, Clone, Serialize)]
pub struct CompletedTurn {
    pub user: Message,
    pub reply: Message,
}

/// Current mood panel, derived from the latest user message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodPanel {
    pub mood: Mood,
    pub title: &'static str,
    pub emoji: &'static str,
    pub gauge_level: u8,
    pub tip: &'static str,
}

impl From<Mood> for MoodPanel {
    fn from(mood: Mood) -> Self {
        Self {
            mood,
            title: mood.title(),
            emoji: mood.emoji(),
            gauge_level: mood.gauge_level(),
            tip: mood.tip(),
        }
    }
}

/// Running mood summary across the session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodJourney {
    pub average: f64,
    /// Average formatted to two decimals
    pub average_display: String,
    pub overall: OverallMood,
    pub caption: &'static str,
    pub turns: usize,
}

impl MoodJourney {
    fn from_store(store: &ConversationStore) -> Self {
        let average = store.average_mood();
        let overall = OverallMood::from_average(average);
        Self {
            average,
            average_display: format!("{average:.2}"),
            overall,
            caption: overall.caption(),
            turns: store.mood_history().len(),
        }
    }
}

/// Everything the UI needs to render a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub state: &'static str,
    pub busy: bool,
    pub messages: Vec<Message>,
    pub current_mood: Option<MoodPanel>,
    pub journey: MoodJourney,
}

/// One isolated conversation: its own state, store and event channel
pub struct ConversationController<L: CompletionClient> {
    session_id: String,
    state: Mutex<ConvState>,
    store: Mutex<ConversationStore>,
    generator: ReplyGenerator<L>,
    broadcast_tx: broadcast::Sender<SessionEvent>,
    last_active: Mutex<Instant>,
}

impl<L: CompletionClient> ConversationController<L> {
    pub fn new(session_id: impl Into<String>, generator: ReplyGenerator<L>) -> Self {
        let (broadcast_tx, _) = broadcast::channel(64);
        Self {
            session_id: session_id.into(),
            state: Mutex::new(ConvState::Idle),
            store: Mutex::new(ConversationStore::new()),
            generator,
            broadcast_tx,
            last_active: Mutex::new(Instant::now()),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Run one full turn for `text`.
    ///
    /// Rejects the message with [`TransitionError::Busy`] while another turn
    /// is in flight. Reply failures never surface here; they arrive as
    /// fallback text in the committed reply.
    pub async fn submit(&self, text: &str) -> Result<CompletedTurn, TransitionError> {
        let mut events = vec![Event::UserMessage {
            text: text.to_string(),
            time: clock_time(),
        }];
        let mut completed = None;
        let mut guard: Option<TurnGuard<'_>> = None;

        while let Some(event) = events.pop() {
            let (effects, committed) = self.step(event)?;
            if committed.is_some() {
                completed = committed;
            }

            for effect in effects {
                match effect {
                    Effect::RequestReply { text, mood } => {
                        guard = Some(TurnGuard::new(&self.state, &self.broadcast_tx));
                        tracing::debug!(
                            session_id = %self.session_id,
                            mood = %mood,
                            model = %self.generator.model_id(),
                            "Requesting reply"
                        );
                        let reply = self.generator.generate(&text, mood).await;
                        tracing::debug!(
                            session_id = %self.session_id,
                            success = reply.is_success(),
                            "Reply ready"
                        );
                        events.push(Event::ReplyReady {
                            reply,
                            time: clock_time(),
                        });
                    }
                    Effect::NotifyClient(event) => self.notify(event),
                    Effect::PersistTurn { .. } | Effect::ClearStore => {}
                }
            }
        }

        if let Some(guard) = guard {
            guard.disarm();
        }

        let turn = completed.ok_or_else(|| {
            TransitionError::InvalidTransition("turn finished without a reply".to_string())
        })?;
        tracing::info!(
            session_id = %self.session_id,
            mood = ?turn.user.mood,
            "Turn completed"
        );
        Ok(turn)
    }

    /// Wipe the transcript and mood history. Rejected while a turn is in flight.
    pub fn clear(&self) -> Result<(), TransitionError> {
        let (effects, _) = self.step(Event::Clear)?;
        for effect in effects {
            if let Effect::NotifyClient(event) = effect {
                self.notify(event);
            }
        }
        tracing::info!(session_id = %self.session_id, "Session cleared");
        Ok(())
    }

    /// Apply one event. Store effects run while the state lock is held so
    /// readers never see a state that disagrees with the store; the rest are
    /// returned for the caller to execute.
    fn step(
        &self,
        event: Event,
    ) -> Result<(Vec<Effect>, Option<CompletedTurn>), TransitionError> {
        self.touch();
        let mut state = lock(&self.state);
        let result = transition(&state, event)?;

        let mut deferred = Vec::with_capacity(result.effects.len());
        let mut committed = None;
        {
            let mut store = lock(&self.store);
            for effect in result.effects {
                match effect {
                    Effect::PersistTurn {
                        user,
                        score,
                        assistant,
                    } => {
                        committed = Some(CompletedTurn {
                            user: user.clone(),
                            reply: assistant.clone(),
                        });
                        store.record_turn(user, score, assistant);
                    }
                    Effect::ClearStore => store.clear(),
                    other => deferred.push(other),
                }
            }
        }

        *state = result.new_state;
        Ok((deferred, committed))
    }

    fn notify(&self, event: SessionEvent) {
        // No subscribers is fine
        let _ = self.broadcast_tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.touch();
        self.broadcast_tx.subscribe()
    }

    // ============================================================
    // Activity
    // ============================================================

    fn touch(&self) {
        *lock(&self.last_active) = Instant::now();
    }

    /// Time since the session was last read or written
    pub fn idle_for(&self) -> Duration {
        lock(&self.last_active).elapsed()
    }

    /// Safe to drop: no turn in flight, no open stream, idle for at least `ttl`
    pub fn is_expired(&self, ttl: Duration) -> bool {
        !lock(&self.state).is_working()
            && self.broadcast_tx.receiver_count() == 0
            && self.idle_for() >= ttl
    }

    // ============================================================
    // Read views
    // ============================================================

    #[allow(dead_code)] // Used in tests
    pub fn is_busy(&self) -> bool {
        lock(&self.state).is_working()
    }

    /// Full transcript, oldest first
    #[allow(dead_code)] // Used in tests
    pub fn transcript(&self) -> Vec<Message> {
        lock(&self.store).transcript().to_vec()
    }

    /// Mood of the most recent user message, if any
    #[allow(dead_code)] // Used in tests
    pub fn current_mood(&self) -> Option<Mood> {
        lock(&self.store)
            .latest_user_message()
            .and_then(|m| m.mood)
    }

    #[allow(dead_code)] // Used in tests
    pub fn average_mood(&self) -> f64 {
        lock(&self.store).average_mood()
    }

    #[allow(dead_code)] // Used in tests
    pub fn mood_history(&self) -> Vec<f64> {
        lock(&self.store).mood_history().to_vec()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.touch();
        let state = lock(&self.state);
        let store = lock(&self.store);

        SessionSnapshot {
            session_id: self.session_id.clone(),
            state: state.name(),
            busy: state.is_working(),
            messages: store.transcript().to_vec(),
            current_mood: store
                .latest_user_message()
                .and_then(|m| m.mood)
                .map(MoodPanel::from),
            journey: MoodJourney::from_store(&store),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Returns the session to Idle if a turn is abandoned mid-flight, dropping
/// the staged user message so nothing half-finished reaches the store.
struct TurnGuard<'a> {
    state: &'a Mutex<ConvState>,
    broadcast_tx: &'a broadcast::Sender<SessionEvent>,
    armed: bool,
}

impl<'a> TurnGuard<'a> {
    fn new(state: &'a Mutex<ConvState>, broadcast_tx: &'a broadcast::Sender<SessionEvent>) -> Self {
        Self {
            state,
            broadcast_tx,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = lock(self.state);
        if state.is_working() {
            tracing::warn!("Turn abandoned before reply, discarding pending message");
            *state = ConvState::Idle;
            let _ = self.broadcast_tx.send(SessionEvent::StateChange { state: "idle" });
        }
    }
}
