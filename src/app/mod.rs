use crate::guard::{Guarded, PublicOnly};
use crate::notify::Toaster;
use crate::pages::{
    AboutPage, DashboardPage, ItemDetailPage, LandingPage, LoginPage, MatchesPage, MyItemsPage,
    PrivacyPage, ProfilePage, RegisterPage, ReportFoundPage, ReportLostPage,
};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    let notify = state.notify;
    provide_context(AppContext(state));

    // `use_location()`/router hooks require a <Router> context; the guards
    // re-evaluate on every navigation and on session changes.
    view! {
        <Router>
            <Toaster notifier=notify />
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("") view=LandingPage />
                <Route path=path!("about") view=AboutPage />
                <Route path=path!("privacy") view=PrivacyPage />

                <Route
                    path=path!("login")
                    view=|| view! { <PublicOnly><LoginPage /></PublicOnly> }
                />
                <Route
                    path=path!("register")
                    view=|| view! { <PublicOnly><RegisterPage /></PublicOnly> }
                />

                <Route
                    path=path!("dashboard")
                    view=|| view! { <Guarded><DashboardPage /></Guarded> }
                />
                <Route
                    path=path!("items/:id")
                    view=|| view! { <Guarded><ItemDetailPage /></Guarded> }
                />
                <Route
                    path=path!("my-items")
                    view=|| view! { <Guarded><MyItemsPage /></Guarded> }
                />
                <Route
                    path=path!("report-lost")
                    view=|| view! { <Guarded><ReportLostPage /></Guarded> }
                />
                <Route
                    path=path!("report-found")
                    view=|| view! { <Guarded><ReportFoundPage /></Guarded> }
                />
                <Route
                    path=path!("matches")
                    view=|| view! { <Guarded><MatchesPage /></Guarded> }
                />
                <Route
                    path=path!("profile")
                    view=|| view! { <Guarded><ProfilePage /></Guarded> }
                />
            </Routes>
        </Router>
    }
}
