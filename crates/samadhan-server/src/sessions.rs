//! In-memory chat session log.

use crate::api::ApiError;
use crate::AppState;
use axum::extract::{Extension, Json, Path};
use samadhan_types::ChatTurn;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

/// Sessions kept before the oldest one is evicted.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Turns kept per session; older turns are dropped first.
pub const DEFAULT_MAX_TURNS_PER_SESSION: usize = 200;

#[derive(Debug, Default)]
struct Sessions {
    turns: HashMap<Uuid, Vec<ChatTurn>>,
    /// Session ids in creation order, oldest first.
    order: VecDeque<Uuid>,
}

/// Bounded turn log keyed by session id.
///
/// Uses `std::sync::RwLock`: every acquisition is a short map operation that
/// never spans an `.await`.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<Sessions>>,
    max_sessions: usize,
    max_turns: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_limits(DEFAULT_MAX_SESSIONS, DEFAULT_MAX_TURNS_PER_SESSION)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding at most `max_sessions` sessions of at most
    /// `max_turns` turns each. Zero limits are raised to one.
    pub fn with_limits(max_sessions: usize, max_turns: usize) -> Self {
        Self {
            inner: Arc::default(),
            max_sessions: max_sessions.max(1),
            max_turns: max_turns.max(1),
        }
    }

    /// Appends `turns` to the session, creating it if needed, and returns
    /// the session id. A `None` id starts a fresh session.
    ///
    /// Creating a session at capacity evicts the oldest one. A session over
    /// its turn limit loses its oldest turns.
    pub fn append(
        &self,
        session_id: Option<Uuid>,
        turns: impl IntoIterator<Item = ChatTurn>,
    ) -> Uuid {
        let id = session_id.unwrap_or_else(Uuid::new_v4);
        let mut sessions = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        if !sessions.turns.contains_key(&id) {
            while sessions.turns.len() >= self.max_sessions {
                let Some(oldest) = sessions.order.pop_front() else {
                    break;
                };
                sessions.turns.remove(&oldest);
                tracing::debug!(session_id = %oldest, "evicted oldest session");
            }
            sessions.order.push_back(id);
        }

        let log = sessions.turns.entry(id).or_default();
        log.extend(turns);
        if log.len() > self.max_turns {
            let excess = log.len() - self.max_turns;
            log.drain(..excess);
        }
        id
    }

    /// Returns a snapshot of the session's turns in insertion order.
    pub fn turns(&self, session_id: &Uuid) -> Option<Vec<ChatTurn>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .turns
            .get(session_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .turns
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Response body for `GET /api/sessions/{sessionId}/turns`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTurnsResponse {
    pub session_id: Uuid,
    pub turns: Vec<ChatTurn>,
}

/// Handler for `GET /api/sessions/{sessionId}/turns`.
pub async fn session_turns_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionTurnsResponse>, ApiError> {
    let not_found = || ApiError::NotFound(format!("session {}", session_id));
    let id = Uuid::parse_str(&session_id).map_err(|_| not_found())?;
    let turns = state.sessions.turns(&id).ok_or_else(not_found)?;
    Ok(Json(SessionTurnsResponse {
        session_id: id,
        turns,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turns_keep_insertion_order() {
        let store = SessionStore::new();
        let id = store.append(
            None,
            [
                ChatTurn::user("road broken", Some("en".into())),
                ChatTurn::bot("noted", None),
            ],
        );
        store.append(Some(id), [ChatTurn::user("any update?", None)]);

        let turns = store.turns(&id).unwrap();
        let texts: Vec<_> = turns.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["road broken", "noted", "any update?"]);
        assert!(turns[0].is_user);
        assert!(!turns[1].is_user);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn sessions_are_isolated() {
        let store = SessionStore::new();
        let a = store.append(None, [ChatTurn::user("a", None)]);
        let b = store.append(None, [ChatTurn::user("b", None)]);
        assert_ne!(a, b);
        assert_eq!(store.turns(&a).unwrap().len(), 1);
        assert!(store.turns(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn oldest_session_is_evicted_at_capacity() {
        let store = SessionStore::with_limits(2, 10);
        let first = store.append(None, [ChatTurn::user("first", None)]);
        let second = store.append(None, [ChatTurn::user("second", None)]);
        store.append(Some(first), [ChatTurn::user("again", None)]);
        assert_eq!(store.len(), 2);

        let third = store.append(None, [ChatTurn::user("third", None)]);
        assert_eq!(store.len(), 2);
        assert!(store.turns(&first).is_none());
        assert!(store.turns(&second).is_some());
        assert!(store.turns(&third).is_some());
    }

    #[test]
    fn long_sessions_keep_latest_turns() {
        let store = SessionStore::with_limits(4, 3);
        let id = store.append(
            None,
            (0..5).map(|i| ChatTurn::user(format!("turn {i}"), None)),
        );
        store.append(Some(id), [ChatTurn::bot("reply", None)]);

        let turns = store.turns(&id).unwrap();
        let texts: Vec<_> = turns.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["turn 3", "turn 4", "reply"]);
    }
}
