use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

const NAV_ITEMS: [(&str, &str); 4] = [
    ("Dashboard", "/dashboard"),
    ("My Items", "/my-items"),
    ("Matches", "/matches"),
    ("Profile", "/profile"),
];

#[component]
pub fn Navbar() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let location = use_location();
    let navigate = StoredValue::new(use_navigate());

    let on_logout = move |_| {
        app_state.0.session.clear_session();
        app_state.0.notify.success("Logged out successfully");
        navigate.with_value(|nav| nav("/login", Default::default()));
    };

    view! {
        <nav class="border-b bg-background">
            <div class="mx-auto flex w-full max-w-[1080px] items-center justify-between px-4 py-3">
                <div class="flex items-center gap-6">
                    <a href="/dashboard" class="text-sm font-semibold text-foreground">
                        "SmartLOFO"
                    </a>

                    <div class="hidden items-center gap-1 md:flex">
                        {NAV_ITEMS
                            .into_iter()
                            .map(|(label, path)| {
                                let active = move || location.pathname.get() == path;
                                view! {
                                    <Button
                                        variant=ButtonVariant::Ghost
                                        size=ButtonSize::Sm
                                        href=path
                                        class="data-[active=true]:bg-accent data-[active=true]:text-accent-foreground"
                                        attr:data-active=move || active().to_string()
                                    >
                                        {label}
                                    </Button>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>

                <div class="flex items-center gap-2">
                    <Button size=ButtonSize::Sm href="/report-lost">
                        "Report Lost"
                    </Button>
                    <Button size=ButtonSize::Sm variant=ButtonVariant::Secondary href="/report-found">
                        "Report Found"
                    </Button>
                    <Button
                        size=ButtonSize::Sm
                        variant=ButtonVariant::Outline
                        on:click=on_logout
                    >
                        "Sign out"
                    </Button>
                </div>
            </div>
        </nav>
    }
}
