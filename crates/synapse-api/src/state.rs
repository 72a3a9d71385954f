//! Application state shared across all route handlers.
//!
//! AppState holds the configuration, the answer judge and the table of
//! running sessions. It is passed to handlers via axum's State extractor.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use chrono::{DateTime, Utc};
use synapse_core::config::SynapseConfig;
use synapse_script::{build_judge, AnswerJudge, Presentation, ScriptKind, SessionMode};
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;

/// One running presentation.
#[derive(Debug)]
pub struct SessionEntry {
    pub presentation: Presentation,
    pub script: ScriptKind,
    pub mode: SessionMode,
    pub started_at: DateTime<Utc>,
    seq: u64,
}

/// Bounded table of sessions keyed by id.
///
/// Inserting at capacity evicts the session that was started first.
#[derive(Debug)]
pub struct SessionStore {
    entries: HashMap<Uuid, SessionEntry>,
    capacity: usize,
    next_seq: u64,
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            next_seq: 0,
        }
    }

    /// Store a new session and return its id.
    pub fn insert(
        &mut self,
        presentation: Presentation,
        script: ScriptKind,
        mode: SessionMode,
    ) -> Uuid {
        while self.entries.len() >= self.capacity {
            self.evict_oldest();
        }

        let id = Uuid::new_v4();
        self.entries.insert(
            id,
            SessionEntry {
                presentation,
                script,
                mode,
                started_at: Utc::now(),
                seq: self.next_seq,
            },
        );
        self.next_seq += 1;
        id
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.seq)
            .map(|(id, _)| *id);
        if let Some(id) = oldest {
            self.entries.remove(&id);
            info!(session_id = %id, "Session limit reached, evicted oldest session");
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<&SessionEntry> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut SessionEntry> {
        self.entries.get_mut(id)
    }

    pub fn remove(&mut self, id: &Uuid) -> Option<SessionEntry> {
        self.entries.remove(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<SynapseConfig>,
    /// Grades free-text answers for prompts.
    pub judge: Arc<dyn AnswerJudge>,
    /// Running sessions.
    pub sessions: Arc<Mutex<SessionStore>>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Create state with the judge selected in config.
    pub fn new(config: SynapseConfig) -> Self {
        let judge = build_judge(&config.judge, config.game.similarity_threshold);
        Self::with_judge(config, judge)
    }

    pub fn with_judge(config: SynapseConfig, judge: Arc<dyn AnswerJudge>) -> Self {
        let sessions = SessionStore::new(config.server.max_sessions);
        Self {
            config: Arc::new(config),
            judge,
            sessions: Arc::new(Mutex::new(sessions)),
            start_time: Instant::now(),
        }
    }

    /// Lock the session table.
    pub fn lock_sessions(&self) -> Result<MutexGuard<'_, SessionStore>, ApiError> {
        self.sessions
            .lock()
            .map_err(|_| ApiError::Internal("session table lock poisoned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synapse_core::config::GameConfig;
    use synapse_script::build_program;

    fn presentation() -> Presentation {
        let program = build_program(ScriptKind::Stage, SessionMode::Full, &GameConfig::default());
        Presentation::new(program, 0.85)
    }

    #[test]
    fn test_insert_and_remove() {
        let mut store = SessionStore::new(4);
        assert!(store.is_empty());
        let id = store.insert(presentation(), ScriptKind::Stage, SessionMode::Full);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).unwrap().script, ScriptKind::Stage);
        assert!(store.remove(&id).is_some());
        assert!(store.remove(&id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut store = SessionStore::new(2);
        let first = store.insert(presentation(), ScriptKind::Stage, SessionMode::Full);
        let second = store.insert(presentation(), ScriptKind::Session, SessionMode::Final);
        let third = store.insert(presentation(), ScriptKind::Session, SessionMode::Full);

        assert_eq!(store.len(), 2);
        assert!(store.get(&first).is_none());
        assert!(store.get(&second).is_some());
        assert!(store.get(&third).is_some());
    }

    #[test]
    fn test_zero_capacity_still_holds_one() {
        let mut store = SessionStore::new(0);
        let first = store.insert(presentation(), ScriptKind::Stage, SessionMode::Full);
        let second = store.insert(presentation(), ScriptKind::Stage, SessionMode::Full);
        assert_eq!(store.len(), 1);
        assert!(store.get(&first).is_none());
        assert!(store.get_mut(&second).is_some());
    }

    #[test]
    fn test_app_state_uses_local_judge_by_default() {
        let state = AppState::new(SynapseConfig::default());
        assert_eq!(state.judge.name(), "local");
        assert!(state.lock_sessions().unwrap().is_empty());
    }
}
