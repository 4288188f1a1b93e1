//! Session persistence adapter.
//!
//! Wraps a key-value store with the combat session's persistence contract:
//! the whole session serializes to one JSON document after every mutation,
//! and loading degrades to a fresh default session when the document is
//! missing, unreadable, malformed, or from a newer schema version. A failed
//! save is logged and swallowed; the in-memory state it mirrored stands.

use crate::core::session::combat::{CombatSession, SESSION_VERSION};

use super::KeyValueStore;

/// Default storage key for the combat session document.
pub const SESSION_KEY: &str = "combat_session";

#[derive(Debug)]
pub struct SessionStore<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: SESSION_KEY.to_string(),
        }
    }

    /// Persist under a different key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Fire-and-forget save. Failures are logged and swallowed.
    pub fn save(&mut self, session: &CombatSession) {
        let json = match serde_json::to_string(session) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize combat session: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(&self.key, &json) {
            log::warn!("Failed to persist combat session to '{}': {}", self.key, e);
        }
    }

    /// Load the persisted session. Never fails: a missing, unreadable,
    /// malformed, or newer-versioned document yields a default session and
    /// a diagnostic log line.
    pub fn load(&self) -> CombatSession {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::debug!("No combat session under '{}', starting fresh", self.key);
                return CombatSession::default();
            }
            Err(e) => {
                log::warn!(
                    "Failed to read combat session from '{}': {}, starting fresh",
                    self.key,
                    e
                );
                return CombatSession::default();
            }
        };

        match serde_json::from_str::<CombatSession>(&raw) {
            Ok(mut session) if session.version <= SESSION_VERSION => {
                session.normalize();
                session
            }
            Ok(session) => {
                log::warn!(
                    "Combat session version {} is newer than supported {}, starting fresh",
                    session.version,
                    SESSION_VERSION
                );
                CombatSession::default()
            }
            Err(e) => {
                log::warn!(
                    "Malformed combat session under '{}': {}, starting fresh",
                    self.key,
                    e
                );
                CombatSession::default()
            }
        }
    }

    /// Delete the persisted document. Failures are logged and swallowed.
    pub fn reset(&mut self) {
        if let Err(e) = self.store.remove(&self.key) {
            log::warn!("Failed to remove combat session '{}': {}", self.key, e);
        }
    }
}
