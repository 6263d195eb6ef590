use crate::models::Session;
use crate::state::AppContext;
use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectToDashboard,
}

// Routes requiring a session. `/items/{id}` is covered by prefix.
fn requires_auth(path: &str) -> bool {
    matches!(
        path,
        "/dashboard" | "/report-lost" | "/report-found" | "/my-items" | "/profile" | "/matches"
    ) || path.starts_with("/items/")
}

// Routes only reachable while logged out.
fn requires_guest(path: &str) -> bool {
    matches!(path, "/login" | "/register")
}

/// Pure navigation decision. Re-evaluated on every navigation attempt;
/// carries no memory of prior decisions.
pub(crate) fn decide(path: &str, session: Option<&Session>) -> GuardDecision {
    if requires_auth(path) && session.is_none() {
        return GuardDecision::RedirectToLogin;
    }
    if requires_guest(path) && session.is_some() {
        return GuardDecision::RedirectToDashboard;
    }
    GuardDecision::Allow
}

/// Wraps a route that needs authentication; redirects to login otherwise.
#[component]
pub fn Guarded(children: ChildrenFn) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let location = use_location();

    // Store children so the view closure sees an `Fn` (not an `FnOnce`).
    let children = StoredValue::new(children);

    move || {
        let path = location.pathname.get();
        let session = app_state.0.session.current_session();
        match decide(&path, session.as_ref()) {
            GuardDecision::Allow => children.with_value(|c| c()).into_any(),
            GuardDecision::RedirectToLogin => view! { <Redirect path="/login" /> }.into_any(),
            GuardDecision::RedirectToDashboard => {
                view! { <Redirect path="/dashboard" /> }.into_any()
            }
        }
    }
}

/// Wraps login/register; bounces an already-authenticated user to the
/// default landing view.
#[component]
pub fn PublicOnly(children: ChildrenFn) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let location = use_location();

    let children = StoredValue::new(children);

    move || {
        let path = location.pathname.get();
        let session = app_state.0.session.current_session();
        match decide(&path, session.as_ref()) {
            GuardDecision::RedirectToDashboard => {
                view! { <Redirect path="/dashboard" /> }.into_any()
            }
            GuardDecision::RedirectToLogin => view! { <Redirect path="/login" /> }.into_any(),
            GuardDecision::Allow => children.with_value(|c| c()).into_any(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Profile;

    fn session() -> Session {
        Session {
            token: "tok".to_string(),
            profile: Profile {
                id: "u1".to_string(),
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
            },
        }
    }

    #[test]
    fn test_protected_route_without_session_redirects_to_login() {
        for path in [
            "/dashboard",
            "/my-items",
            "/matches",
            "/profile",
            "/report-lost",
            "/report-found",
            "/items/abc-123",
        ] {
            assert_eq!(decide(path, None), GuardDecision::RedirectToLogin, "{path}");
        }
    }

    #[test]
    fn test_guest_route_with_session_redirects_to_dashboard() {
        let s = session();
        assert_eq!(decide("/login", Some(&s)), GuardDecision::RedirectToDashboard);
        assert_eq!(decide("/register", Some(&s)), GuardDecision::RedirectToDashboard);
    }

    #[test]
    fn test_open_routes_always_allow() {
        let s = session();
        for path in ["/", "/about", "/privacy"] {
            assert_eq!(decide(path, None), GuardDecision::Allow, "{path}");
            assert_eq!(decide(path, Some(&s)), GuardDecision::Allow, "{path}");
        }
    }

    #[test]
    fn test_protected_route_with_session_allows() {
        let s = session();
        assert_eq!(decide("/dashboard", Some(&s)), GuardDecision::Allow);
        assert_eq!(decide("/items/xyz", Some(&s)), GuardDecision::Allow);
    }

    #[test]
    fn test_guest_route_without_session_allows() {
        assert_eq!(decide("/login", None), GuardDecision::Allow);
        assert_eq!(decide("/register", None), GuardDecision::Allow);
    }
}
