//! In-Memory Session Manager Implementation

use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;

use crate::application::ports::{
    GenerationRequest, ReadingSession, SessionError, SessionManagerPort, SessionPhase,
};

/// 内存阅读会话管理器
pub struct InMemorySessionManager {
    sessions: DashMap<String, ReadingSession>,
}

impl InMemorySessionManager {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for InMemorySessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManagerPort for InMemorySessionManager {
    fn create(&self, session: ReadingSession) -> Result<String, SessionError> {
        let session_id = session.id.clone();
        if self.sessions.contains_key(&session_id) {
            return Err(SessionError::AlreadyExists(session_id));
        }
        self.sessions.insert(session_id.clone(), session);
        tracing::info!(session_id = %session_id, "Session created");
        Ok(session_id)
    }

    fn get(&self, id: &str) -> Result<ReadingSession, SessionError> {
        self.sessions
            .get(id)
            .map(|s| s.clone())
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    fn begin_generation(&self, id: &str, request: GenerationRequest) -> Result<(), SessionError> {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        if matches!(session.phase, SessionPhase::Generating { .. }) {
            return Err(SessionError::GenerationInFlight(id.to_string()));
        }

        // 清掉上一部小说，索引归零
        session.phase = SessionPhase::Generating { request };
        session.current_chapter = 0;
        session.last_activity = Utc::now();
        tracing::debug!(session_id = %id, "Session entered generating phase");
        Ok(())
    }

    fn complete_generation(&self, id: &str, outcome: SessionPhase) -> Result<(), SessionError> {
        if !matches!(
            outcome,
            SessionPhase::Ready { .. } | SessionPhase::Failed { .. }
        ) {
            return Err(SessionError::InvalidState(format!(
                "Generation outcome must be ready or failed, got: {}",
                outcome.name()
            )));
        }

        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        if !matches!(session.phase, SessionPhase::Generating { .. }) {
            return Err(SessionError::InvalidState(format!(
                "Session is not generating: {}",
                session.phase.name()
            )));
        }

        tracing::debug!(session_id = %id, outcome = outcome.name(), "Generation completed");
        session.phase = outcome;
        session.current_chapter = 0;
        session.last_activity = Utc::now();
        Ok(())
    }

    fn update_chapter(&self, id: &str, index: usize) -> Result<usize, SessionError> {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        let chapter_count = session.chapter_count();
        if chapter_count == 0 {
            return Err(SessionError::InvalidState(format!(
                "Session has no chapters to navigate: {}",
                session.phase.name()
            )));
        }

        let effective = index.min(chapter_count - 1);
        session.current_chapter = effective;
        session.last_activity = Utc::now();
        tracing::debug!(session_id = %id, chapter = effective, "Session chapter updated");
        Ok(effective)
    }

    fn touch(&self, id: &str) {
        if let Some(mut session) = self.sessions.get_mut(id) {
            session.last_activity = Utc::now();
        }
    }

    fn close(&self, id: &str) -> Result<(), SessionError> {
        self.sessions
            .remove(id)
            .map(|_| {
                tracing::info!(session_id = %id, "Session closed");
            })
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    fn get_expired_sessions(&self, idle_timeout_secs: u64) -> Vec<String> {
        let now = Utc::now();
        let timeout = chrono::Duration::seconds(idle_timeout_secs as i64);

        self.sessions
            .iter()
            .filter_map(|entry| {
                let elapsed = now - entry.last_activity;
                if elapsed > timeout {
                    Some(entry.key().clone())
                } else {
                    None
                }
            })
            .collect()
    }

    fn list_all(&self) -> Vec<String> {
        self.sessions.iter().map(|e| e.key().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Genre;

    fn request() -> GenerationRequest {
        GenerationRequest::new(Genre::Fantasy, "opening", 3)
    }

    fn ready_phase() -> SessionPhase {
        SessionPhase::Ready {
            request: request(),
            novel: "## Chapter 1: A\nx\n## Chapter 2: B\ny".to_string(),
            title: "t".to_string(),
            chapters: vec![
                "## Chapter 1: A\nx".to_string(),
                "## Chapter 2: B\ny".to_string(),
            ],
        }
    }

    #[test]
    fn test_session_lifecycle() {
        let manager = InMemorySessionManager::new();
        let session = ReadingSession::new();
        let session_id = session.id.clone();

        // Create
        assert!(manager.create(session).is_ok());

        // Get
        let session = manager.get(&session_id).unwrap();
        assert_eq!(session.current_chapter, 0);
        assert!(matches!(session.phase, SessionPhase::Idle));

        // Generate → Ready
        manager.begin_generation(&session_id, request()).unwrap();
        manager
            .complete_generation(&session_id, ready_phase())
            .unwrap();
        assert_eq!(manager.get(&session_id).unwrap().chapter_count(), 2);

        // Close
        assert!(manager.close(&session_id).is_ok());
        assert!(manager.get(&session_id).is_err());
    }

    #[test]
    fn test_concurrent_generation_rejected() {
        let manager = InMemorySessionManager::new();
        let id = manager.create(ReadingSession::new()).unwrap();

        manager.begin_generation(&id, request()).unwrap();
        let second = manager.begin_generation(&id, request());

        assert!(matches!(second, Err(SessionError::GenerationInFlight(_))));
    }

    #[test]
    fn test_complete_requires_generating_phase() {
        let manager = InMemorySessionManager::new();
        let id = manager.create(ReadingSession::new()).unwrap();

        let result = manager.complete_generation(&id, ready_phase());
        assert!(matches!(result, Err(SessionError::InvalidState(_))));
    }

    #[test]
    fn test_update_chapter_clamps() {
        let manager = InMemorySessionManager::new();
        let id = manager.create(ReadingSession::new()).unwrap();
        manager.begin_generation(&id, request()).unwrap();
        manager.complete_generation(&id, ready_phase()).unwrap();

        assert_eq!(manager.update_chapter(&id, 1).unwrap(), 1);
        assert_eq!(manager.update_chapter(&id, 99).unwrap(), 1);
        assert_eq!(manager.update_chapter(&id, 0).unwrap(), 0);
    }

    #[test]
    fn test_update_chapter_on_idle_session_fails() {
        let manager = InMemorySessionManager::new();
        let id = manager.create(ReadingSession::new()).unwrap();

        assert!(matches!(
            manager.update_chapter(&id, 0),
            Err(SessionError::InvalidState(_))
        ));
    }

    #[test]
    fn test_expired_sessions_detected() {
        let manager = InMemorySessionManager::new();
        let mut session = ReadingSession::new();
        session.last_activity = Utc::now() - chrono::Duration::seconds(120);
        let old_id = session.id.clone();
        manager.sessions.insert(old_id.clone(), session);
        manager.create(ReadingSession::new()).unwrap();

        let expired = manager.get_expired_sessions(60);
        assert_eq!(expired, vec![old_id]);
    }
}
