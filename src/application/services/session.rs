//! Build sessions keyed by token, so independent builds never share state.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, instrument};
use uuid::Uuid;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{BuildSession, StepReport, TreeArena};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(Uuid);

impl SessionToken {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: HashMap<SessionToken, BuildSession>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn start(&mut self, name: &str, fanout: usize, root: &str) -> ApplicationResult<SessionToken> {
        let session = BuildSession::start(name, fanout, root)?;
        let token = SessionToken::generate();
        debug!("session {} started for '{}'", token, name);
        self.sessions.insert(token, session);
        Ok(token)
    }

    pub fn get(&self, token: SessionToken) -> ApplicationResult<&BuildSession> {
        self.sessions
            .get(&token)
            .ok_or_else(|| ApplicationError::SessionNotFound(token.to_string()))
    }

    #[instrument(level = "debug", skip(self, values))]
    pub fn add_children<S: AsRef<str>>(&mut self, token: SessionToken, values: &[S]) -> ApplicationResult<StepReport> {
        let session = self
            .sessions
            .get_mut(&token)
            .ok_or_else(|| ApplicationError::SessionNotFound(token.to_string()))?;
        session
            .add_children(values)
            .ok_or_else(|| ApplicationError::NothingPending(session.name().to_string()))
    }

    /// Removes a completed session and hands over its tree.
    #[instrument(level = "debug", skip(self))]
    pub fn finish(&mut self, token: SessionToken) -> ApplicationResult<(String, TreeArena)> {
        let session = self
            .sessions
            .remove(&token)
            .ok_or_else(|| ApplicationError::SessionNotFound(token.to_string()))?;
        session.finish().map_err(|session| {
            let err = ApplicationError::SessionIncomplete {
                name: session.name().to_string(),
                remaining: session.remaining(),
            };
            self.sessions.insert(token, session);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions_are_independent() {
        let mut manager = SessionManager::new();
        let first = manager.start("one", 2, "R1").unwrap();
        let second = manager.start("two", 2, "R2").unwrap();

        manager.add_children(first, &["A"]).unwrap();
        assert_eq!(manager.get(first).unwrap().pending(), Some("A"));
        assert_eq!(manager.get(second).unwrap().pending(), Some("R2"));
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_finish_keeps_incomplete_session() {
        let mut manager = SessionManager::new();
        let token = manager.start("t", 1, "R").unwrap();
        assert!(matches!(
            manager.finish(token),
            Err(ApplicationError::SessionIncomplete { remaining: 1, .. })
        ));
        manager.add_children::<&str>(token, &[]).unwrap();
        let (name, tree) = manager.finish(token).unwrap();
        assert_eq!(name, "t");
        assert_eq!(tree.len(), 1);
        assert!(manager.is_empty());
    }
}
