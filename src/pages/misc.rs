use crate::components::ui::{Button, ButtonSize, ButtonVariant, Card, CardContent};
use crate::state::AppContext;
use leptos::prelude::*;

#[component]
fn PublicShell(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-background">
            <nav class="border-b bg-background">
                <div class="mx-auto flex w-full max-w-[1080px] items-center justify-between px-4 py-3">
                    <a href="/" class="text-sm font-semibold text-foreground">"SmartLOFO"</a>
                    <div class="flex items-center gap-2">
                        <Button size=ButtonSize::Sm variant=ButtonVariant::Ghost href="/about">
                            "About"
                        </Button>
                        <Button size=ButtonSize::Sm variant=ButtonVariant::Outline href="/login">
                            "Sign in"
                        </Button>
                    </div>
                </div>
            </nav>
            {children()}
            <footer class="border-t">
                <div class="mx-auto flex w-full max-w-[1080px] items-center justify-between px-4 py-4 text-xs text-muted-foreground">
                    <span>"SmartLOFO"</span>
                    <div class="flex items-center gap-4">
                        <a href="/about" class="hover:underline">"About"</a>
                        <a href="/privacy" class="hover:underline">"Privacy"</a>
                    </div>
                </div>
            </footer>
        </div>
    }
}

#[component]
pub fn LandingPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let session = app_state.0.session;

    view! {
        <PublicShell>
            <div class="mx-auto flex w-full max-w-[1080px] flex-col items-center px-4 py-24 text-center">
                <h1 class="max-w-xl text-3xl font-semibold tracking-tight">
                    "Lost something? Found something?"
                </h1>
                <p class="mt-3 max-w-md text-sm text-muted-foreground">
                    "Report items in seconds and let AI pair lost reports with found ones."
                </p>
                <div class="mt-6 flex items-center gap-2">
                    <Show
                        when=move || session.is_authenticated()
                        fallback=|| {
                            view! {
                                <Button href="/register">"Get started"</Button>
                                <Button variant=ButtonVariant::Outline href="/login">
                                    "Sign in"
                                </Button>
                            }
                        }
                    >
                        <Button href="/dashboard">"Go to dashboard"</Button>
                    </Show>
                </div>

                <div class="mt-16 grid w-full max-w-3xl grid-cols-1 gap-3 md:grid-cols-3">
                    <Card class="gap-2 py-4">
                        <CardContent class="flex flex-col gap-1 text-left">
                            <span class="text-sm font-semibold">"Report"</span>
                            <p class="text-xs text-muted-foreground">
                                "Describe the item, add a photo and a location."
                            </p>
                        </CardContent>
                    </Card>
                    <Card class="gap-2 py-4">
                        <CardContent class="flex flex-col gap-1 text-left">
                            <span class="text-sm font-semibold">"Match"</span>
                            <p class="text-xs text-muted-foreground">
                                "AI compares reports and scores how well they fit."
                            </p>
                        </CardContent>
                    </Card>
                    <Card class="gap-2 py-4">
                        <CardContent class="flex flex-col gap-1 text-left">
                            <span class="text-sm font-semibold">"Recover"</span>
                            <p class="text-xs text-muted-foreground">
                                "Review matches and reconnect with your belongings."
                            </p>
                        </CardContent>
                    </Card>
                </div>
            </div>
        </PublicShell>
    }
}

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <PublicShell>
            <div class="mx-auto w-full max-w-2xl px-4 py-16">
                <h1 class="text-xl font-semibold">"About SmartLOFO"</h1>
                <div class="mt-4 space-y-3 text-sm text-muted-foreground">
                    <p>
                        "SmartLOFO is a community lost-and-found board. Anyone with an account "
                        "can report items they lost or found, and the matching service compares "
                        "new reports against existing ones to suggest likely pairs."
                    </p>
                    <p>
                        "Every match carries a confidence score. When a report changes or you "
                        "think the score is off, a re-match asks the service to score that pair "
                        "again."
                    </p>
                </div>
            </div>
        </PublicShell>
    }
}

#[component]
pub fn PrivacyPage() -> impl IntoView {
    view! {
        <PublicShell>
            <div class="mx-auto w-full max-w-2xl px-4 py-16">
                <h1 class="text-xl font-semibold">"Privacy"</h1>
                <div class="mt-4 space-y-3 text-sm text-muted-foreground">
                    <p>
                        "Reports you submit, including photos and locations, are visible to "
                        "other signed-in users so they can recognize their belongings."
                    </p>
                    <p>
                        "Your session is stored only in this browser. Signing out removes it; "
                        "nothing about your account is kept on this device afterwards."
                    </p>
                </div>
            </div>
        </PublicShell>
    }
}
