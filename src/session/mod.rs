use crate::models::{Profile, Session};
use crate::storage::{load_json_from_storage, remove_from_storage, save_json_to_storage, SESSION_KEY};
use leptos::prelude::*;

/// Source of truth for the current credential + profile.
///
/// Every navigation guard decision and every outgoing request reads from
/// here. Writes go through the operations below only; each one persists to
/// localStorage so the session survives reloads. A storage failure is not
/// distinguishable from absence and degrades to "unauthenticated".
#[derive(Clone, Copy)]
pub(crate) struct SessionStore {
    current: RwSignal<Option<Session>>,
}

impl SessionStore {
    pub fn load() -> Self {
        Self {
            current: RwSignal::new(load_json_from_storage(SESSION_KEY)),
        }
    }

    #[cfg(test)]
    pub fn empty() -> Self {
        Self {
            current: RwSignal::new(None),
        }
    }

    /// Overwrites credential and profile as one unit and persists the record.
    pub fn set_session(&self, token: String, profile: Profile) {
        let session = Session { token, profile };
        save_json_to_storage(SESSION_KEY, &session);
        self.current.set(Some(session));
    }

    /// Removes both fields and the persisted record.
    pub fn clear_session(&self) {
        remove_from_storage(SESSION_KEY);
        self.current.set(None);
    }

    /// Replaces only the profile, leaving the credential untouched.
    /// No-op when unauthenticated.
    pub fn update_profile(&self, profile: Profile) {
        self.current.update(|s| {
            if let Some(session) = s {
                session.profile = profile;
                save_json_to_storage(SESSION_KEY, session);
            }
        });
    }

    /// Present snapshot, tracked (views re-render on session changes).
    pub fn current_session(&self) -> Option<Session> {
        self.current.get()
    }

    /// Untracked snapshot for request-time credential reads.
    pub fn current_session_untracked(&self) -> Option<Session> {
        self.current.get_untracked()
    }

    pub fn token(&self) -> Option<String> {
        self.current.get_untracked().map(|s| s.token)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            id: "u1".to_string(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
        }
    }

    #[test]
    fn test_set_then_current_returns_exact_pair() {
        let store = SessionStore::empty();
        store.set_session("tok-1".to_string(), profile());

        let session = store.current_session().expect("session present");
        assert_eq!(session.token, "tok-1");
        assert_eq!(session.profile, profile());
    }

    #[test]
    fn test_clear_removes_both_fields() {
        let store = SessionStore::empty();
        store.set_session("tok-1".to_string(), profile());
        store.clear_session();
        assert!(store.current_session().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_update_profile_keeps_credential() {
        let store = SessionStore::empty();
        store.set_session("tok-1".to_string(), profile());

        let renamed = Profile {
            name: "Asha K".to_string(),
            ..profile()
        };
        store.update_profile(renamed.clone());

        let session = store.current_session().expect("session present");
        assert_eq!(session.token, "tok-1");
        assert_eq!(session.profile, renamed);
    }

    #[test]
    fn test_update_profile_without_session_is_noop() {
        let store = SessionStore::empty();
        store.update_profile(profile());
        assert!(store.current_session().is_none());
    }
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` +
// wasm-bindgen-test-runner): localStorage persistence round-trips.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_session_storage_roundtrip() {
        remove_from_storage(SESSION_KEY);

        let store = SessionStore::load();
        assert!(store.current_session().is_none());

        store.set_session(
            "t1".to_string(),
            Profile {
                id: "u1".to_string(),
                name: "U".to_string(),
                email: "u@example.com".to_string(),
            },
        );

        let reloaded = SessionStore::load();
        let session = reloaded.current_session().expect("persisted session");
        assert_eq!(session.token, "t1");
        assert_eq!(session.profile.email, "u@example.com");

        store.clear_session();
        assert!(SessionStore::load().current_session().is_none());
    }

    #[wasm_bindgen_test]
    fn test_profile_update_persists_under_same_key() {
        remove_from_storage(SESSION_KEY);

        let store = SessionStore::load();
        store.set_session(
            "t1".to_string(),
            Profile {
                id: "u1".to_string(),
                name: "U".to_string(),
                email: "u@example.com".to_string(),
            },
        );
        store.update_profile(Profile {
            id: "u1".to_string(),
            name: "V".to_string(),
            email: "v@example.com".to_string(),
        });

        let session = SessionStore::load().current_session().expect("session");
        assert_eq!(session.token, "t1");
        assert_eq!(session.profile.name, "V");

        remove_from_storage(SESSION_KEY);
    }
}
