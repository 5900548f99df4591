//! In-process conversational session state (C7).
//!
//! Sessions are created on demand and held only for the lifetime of the
//! process; nothing here is persisted across restarts.

use std::sync::Arc;

use dashmap::DashMap;
use photolib_domain::entities::{ScoredImageRef, Session, SessionEntry};
use photolib_domain::value_objects::SessionId;

/// Concurrent map of live sessions, keyed by id.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<SessionId, Session>,
}

impl SessionStore {
    /// Builds an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session for `id`, creating it with `user_id` if absent.
    pub fn get_or_create(&self, id: SessionId, user_id: Option<String>) -> Session {
        self.sessions
            .entry(id)
            .or_insert_with(|| Session::new(id, user_id))
            .clone()
    }

    /// Returns a snapshot of `id`'s session, if it exists.
    #[must_use]
    pub fn get(&self, id: SessionId) -> Option<Session> {
        self.sessions.get(&id).map(|entry| entry.clone())
    }

    /// Appends `entry` to `id`'s transcript. No-op if the session doesn't exist.
    pub fn append(&self, id: SessionId, entry: SessionEntry) {
        if let Some(mut session) = self.sessions.get_mut(&id) {
            session.push(entry);
        }
    }

    /// Replaces `id`'s `last_images`, grounding later pronoun-like references.
    pub fn set_last_images(&self, id: SessionId, images: Vec<ScoredImageRef>) {
        if let Some(mut session) = self.sessions.get_mut(&id) {
            session.set_last_images(images);
        }
    }

    /// Number of live sessions, exposed for diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if no sessions are currently held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photolib_domain::entities::SessionRole;

    #[test]
    fn get_or_create_is_idempotent() {
        let store = SessionStore::new();
        let id = SessionId::new();
        let first = store.get_or_create(id, Some("alice".to_owned()));
        let second = store.get_or_create(id, None);
        assert_eq!(first.id, second.id);
        assert_eq!(second.user_id.as_deref(), Some("alice"));
    }

    #[test]
    fn append_grows_history_only_for_existing_sessions() {
        let store = SessionStore::new();
        let id = SessionId::new();
        store.append(id, SessionEntry::turn(SessionRole::User, "hello"));
        assert!(store.get(id).is_none());

        store.get_or_create(id, None);
        store.append(id, SessionEntry::turn(SessionRole::User, "hello"));
        assert_eq!(store.get(id).unwrap().history.len(), 1);
    }

    #[test]
    fn set_last_images_replaces_prior_value() {
        let store = SessionStore::new();
        let id = SessionId::new();
        store.get_or_create(id, None);
        let img = ScoredImageRef {
            id: photolib_domain::value_objects::ImageId::new(),
            score: Some(0.9),
            metadata: None,
        };
        store.set_last_images(id, vec![img.clone()]);
        assert_eq!(store.get(id).unwrap().last_images.len(), 1);
        store.set_last_images(id, vec![]);
        assert!(store.get(id).unwrap().last_images.is_empty());
    }
}
