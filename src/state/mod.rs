pub mod catalog;
pub mod lifecycle;
pub mod matches;

use crate::api::{ApiClient, ApiError, ApiErrorKind};
use crate::notify::Notifier;
use crate::session::SessionStore;

/// Shared application state: the session store, the single HTTP gateway,
/// and the notification queue. Controllers receive a clone of the context
/// at construction; nothing reads ambient globals.
#[derive(Clone)]
pub(crate) struct AppState {
    pub session: SessionStore,
    pub api_client: ApiClient,
    pub notify: Notifier,
}

impl AppState {
    pub fn new() -> Self {
        let session = SessionStore::load();
        Self {
            session,
            api_client: ApiClient::from_env(session),
            notify: Notifier::new(),
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        let session = SessionStore::empty();
        Self {
            session,
            api_client: ApiClient::new("http://test.invalid/api".to_string(), session),
            notify: Notifier::new(),
        }
    }

    /// Shared failure path for controller operations. An expired credential
    /// clears the session immediately; the route guard then bounces the
    /// user to login on its next evaluation.
    pub fn handle_api_error(&self, e: &ApiError) {
        self.notify.error(e.to_string());
        if e.kind == ApiErrorKind::Auth {
            self.session.clear_session();
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Profile;

    #[test]
    fn test_auth_error_clears_session() {
        let app = AppState::for_tests();
        app.session.set_session(
            "tok".to_string(),
            Profile {
                id: "u1".to_string(),
                name: "A".to_string(),
                email: "a@example.com".to_string(),
            },
        );

        let e = ApiError {
            kind: ApiErrorKind::Auth,
            status: Some(401),
            message: "Invalid token".to_string(),
        };
        app.handle_api_error(&e);

        assert!(app.session.current_session().is_none());
        assert_eq!(app.notify.toasts().get_untracked().len(), 1);
    }

    #[test]
    fn test_non_auth_error_keeps_session() {
        let app = AppState::for_tests();
        app.session.set_session(
            "tok".to_string(),
            Profile {
                id: "u1".to_string(),
                name: "A".to_string(),
                email: "a@example.com".to_string(),
            },
        );

        let e = ApiError {
            kind: ApiErrorKind::Network,
            status: None,
            message: "timed out".to_string(),
        };
        app.handle_api_error(&e);

        assert!(app.session.current_session().is_some());
    }
}
