//! Visual extension sessions
//!
//! The host opens a session per displayed submodel and refers to it by an
//! opaque id in later actions.

use dashmap::DashMap;
use super::action::SessionId;
use super::error::{PluginError, PluginResult};

#[derive(Debug)]
pub struct SessionRegistry<S> {
    sessions: DashMap<SessionId, S>,
}

impl<S> SessionRegistry<S> {
    pub fn new() -> Self {
        Self { sessions: DashMap::new() }
    }

    /// Open or reopen a session; returns the state it replaced
    pub fn create(&self, id: SessionId, state: S) -> Option<S> {
        self.sessions.insert(id, state)
    }

    /// Mutate a session in place
    pub fn update<R, F>(&self, id: &str, f: F) -> PluginResult<R>
    where
        F: FnOnce(&mut S) -> R,
    {
        let mut entry = self.sessions.get_mut(id).ok_or_else(|| PluginError::session_not_found(id))?;
        Ok(f(entry.value_mut()))
    }

    pub fn remove(&self, id: &str) -> PluginResult<S> {
        self.sessions
            .remove(id)
            .map(|(_, state)| state)
            .ok_or_else(|| PluginError::session_not_found(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl<S: Clone> SessionRegistry<S> {
    pub fn get(&self, id: &str) -> Option<S> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }
}

impl<S> Default for SessionRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}
