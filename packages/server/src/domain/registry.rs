//! Session registry: the authoritative set of active sessions.
//!
//! The registry is a plain owned value. It is held by the hub task alone, so inserts,
//! removals and broadcast iteration are ordered by construction and no lock is needed.

use std::collections::HashMap;

use super::{
    entity::Session,
    error::RegistryError,
    prompt::{Prompt, bracket},
    value_object::{SessionId, Username},
};

#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }

    /// Case-sensitive exact match against every active name.
    pub fn is_name_taken(&self, name: &Username) -> bool {
        self.sessions.values().any(|session| &session.name == name)
    }

    /// Insert a newly negotiated session.
    ///
    /// # Errors
    ///
    /// * `RegistryError::NameTaken` - another active session uses the same name
    /// * `RegistryError::DuplicateSession` - the id is already registered
    pub fn insert(&mut self, session: Session) -> Result<(), RegistryError> {
        if self.sessions.contains_key(&session.id) {
            return Err(RegistryError::DuplicateSession(session.id));
        }
        if self.is_name_taken(&session.name) {
            return Err(RegistryError::NameTaken(session.name));
        }
        self.sessions.insert(session.id, session);
        Ok(())
    }

    /// Remove a session. Returns `None` if it was already removed.
    pub fn remove(&mut self, id: &SessionId) -> Option<Session> {
        self.sessions.remove(id)
    }

    pub fn get(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    /// Active names, sorted for stable output.
    pub fn names(&self) -> Vec<&Username> {
        let mut names: Vec<&Username> = self.sessions.values().map(|s| &s.name).collect();
        names.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        names
    }

    /// Inject `body` into every session except `exclude`, bracketed by each peer's prompt.
    ///
    /// Each peer gets `erase(last prompt) + body + fresh prompt`, and its last prompt is
    /// updated to the fresh one. Peers whose writer has stopped are left untouched and
    /// returned so the caller can route them to the departure path.
    pub fn broadcast(
        &mut self,
        exclude: Option<&SessionId>,
        body: &str,
        timestamp_millis: i64,
    ) -> Vec<SessionId> {
        let mut failed = Vec::new();

        for session in self.sessions.values_mut() {
            if Some(&session.id) == exclude {
                continue;
            }

            let next = Prompt::render(&session.name, timestamp_millis);
            let payload = bracket(&session.last_prompt, body, &next);
            match session.push(payload) {
                Ok(()) => session.last_prompt = next,
                Err(e) => {
                    tracing::warn!("Dropping '{}' from broadcast: {}", session.name, e);
                    failed.push(session.id);
                }
            }
        }

        failed
    }
}
