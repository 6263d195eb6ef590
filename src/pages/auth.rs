use crate::components::navbar::Navbar;
use crate::components::ui::{
    Button, ButtonSize, Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle,
    Input, Label, Spinner,
};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

#[component]
pub fn LoginPage() -> impl IntoView {
    let email: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let loading: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let email_val = email.get();
        let password_val = password.get();
        let app = app_state.clone();

        loading.set(true);

        spawn_local(async move {
            match app.0.api_client.login(&email_val, &password_val).await {
                Ok(response) => {
                    app.0.session.set_session(response.token, response.user);
                    app.0.notify.success("Welcome back!");
                    navigate.with_value(|nav| nav("/dashboard", Default::default()));
                }
                Err(e) => {
                    app.0.notify.error(e.to_string());
                }
            }
            loading.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-sm flex-col justify-center px-4 py-10">
                <div class="mb-6 flex items-center justify-center">
                    <a href="/" class="text-sm font-medium text-foreground">"SmartLOFO"</a>
                </div>

                <Card>
                    <CardHeader>
                        <CardTitle class="text-lg">"Welcome back"</CardTitle>
                        <CardDescription class="text-xs">
                            "Sign in to continue to SmartLOFO."
                        </CardDescription>
                    </CardHeader>

                    <CardContent>
                        <form class="flex flex-col gap-3" on:submit=on_submit>
                            <div class="flex flex-col gap-1.5">
                                <Label html_for="email" class="text-xs">"Email"</Label>
                                <Input
                                    id="email"
                                    r#type="email"
                                    placeholder="you@example.com"
                                    bind_value=email
                                    required=true
                                    class="h-8 text-sm"
                                />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="password" class="text-xs">"Password"</Label>
                                <Input
                                    id="password"
                                    r#type="password"
                                    placeholder="••••••••"
                                    bind_value=password
                                    required=true
                                    class="h-8 text-sm"
                                />
                            </div>

                            <Button
                                class="w-full"
                                size=ButtonSize::Sm
                                attr:disabled=move || loading.get()
                            >
                                <span class="inline-flex items-center gap-2">
                                    <Show when=move || loading.get() fallback=|| ().into_view()>
                                        <Spinner />
                                    </Show>
                                    {move || if loading.get() { "Signing in..." } else { "Sign in" }}
                                </span>
                            </Button>

                            <div class="pt-1 text-xs text-muted-foreground">
                                "No account? "
                                <a class="text-primary underline underline-offset-4" href="/register">
                                    "Create one"
                                </a>
                            </div>
                        </form>
                    </CardContent>
                </Card>
            </div>
        </div>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let name: RwSignal<String> = RwSignal::new(String::new());
    let email: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let confirm_password: RwSignal<String> = RwSignal::new(String::new());
    let loading: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let name_val = name.get();
        let email_val = email.get();
        let password_val = password.get();
        let confirm_val = confirm_password.get();
        let app = app_state.clone();

        // Local checks; nothing leaves the client until they pass.
        if password_val != confirm_val {
            app.0.notify.error("Passwords do not match");
            return;
        }
        if password_val.len() < 6 {
            app.0.notify.error("Password must be at least 6 characters");
            return;
        }

        loading.set(true);

        spawn_local(async move {
            match app
                .0
                .api_client
                .register(&name_val, &email_val, &password_val)
                .await
            {
                Ok(response) => {
                    // Registration logs the user straight in.
                    app.0.session.set_session(response.token, response.user);
                    app.0.notify.success("Account created!");
                    navigate.with_value(|nav| nav("/dashboard", Default::default()));
                }
                Err(e) => {
                    app.0.notify.error(e.to_string());
                }
            }
            loading.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-sm flex-col justify-center px-4 py-10">
                <div class="mb-6 flex items-center justify-center">
                    <a href="/" class="text-sm font-medium text-foreground">"SmartLOFO"</a>
                </div>

                <Card>
                    <CardHeader>
                        <CardTitle class="text-lg">"Create account"</CardTitle>
                        <CardDescription class="text-xs">
                            "Join to report items and review matches."
                        </CardDescription>
                    </CardHeader>

                    <CardContent>
                        <form class="flex flex-col gap-3" on:submit=on_submit>
                            <div class="flex flex-col gap-1.5">
                                <Label html_for="name" class="text-xs">"Full name"</Label>
                                <Input
                                    id="name"
                                    placeholder="Your name"
                                    bind_value=name
                                    required=true
                                    class="h-8 text-sm"
                                />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="email" class="text-xs">"Email"</Label>
                                <Input
                                    id="email"
                                    r#type="email"
                                    placeholder="you@example.com"
                                    bind_value=email
                                    required=true
                                    class="h-8 text-sm"
                                />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="password" class="text-xs">"Password"</Label>
                                <Input
                                    id="password"
                                    r#type="password"
                                    placeholder="••••••••"
                                    bind_value=password
                                    required=true
                                    class="h-8 text-sm"
                                />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="confirm_password" class="text-xs">"Confirm password"</Label>
                                <Input
                                    id="confirm_password"
                                    r#type="password"
                                    placeholder="••••••••"
                                    bind_value=confirm_password
                                    required=true
                                    class="h-8 text-sm"
                                />
                            </div>

                            <Button
                                class="w-full"
                                size=ButtonSize::Sm
                                attr:disabled=move || loading.get()
                            >
                                <span class="inline-flex items-center gap-2">
                                    <Show when=move || loading.get() fallback=|| ().into_view()>
                                        <Spinner />
                                    </Show>
                                    {move || if loading.get() { "Creating..." } else { "Create account" }}
                                </span>
                            </Button>
                        </form>
                    </CardContent>

                    <CardFooter class="justify-between">
                        <div class="text-xs text-muted-foreground">
                            "Already have an account? "
                            <a class="text-primary underline underline-offset-4" href="/login">"Sign in"</a>
                        </div>
                    </CardFooter>
                </Card>
            </div>
        </div>
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    // Pre-fill from the stored profile.
    let stored = app_state.0.session.current_session_untracked();
    let name: RwSignal<String> = RwSignal::new(
        stored.as_ref().map(|s| s.profile.name.clone()).unwrap_or_default(),
    );
    let email: RwSignal<String> = RwSignal::new(
        stored.as_ref().map(|s| s.profile.email.clone()).unwrap_or_default(),
    );
    let loading: RwSignal<bool> = RwSignal::new(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let name_val = name.get();
        let email_val = email.get();
        let app = app_state.clone();

        loading.set(true);

        spawn_local(async move {
            match app.0.api_client.update_profile(&name_val, &email_val).await {
                Ok(profile) => {
                    // The credential stays; only the profile half changes.
                    app.0.session.update_profile(profile);
                    app.0.notify.success("Profile updated successfully");
                }
                Err(e) => {
                    app.0.notify.error(e.to_string());
                }
            }
            loading.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-background">
            <Navbar />
            <div class="mx-auto w-full max-w-2xl px-4 py-8">
                <div class="mb-6 space-y-1">
                    <h1 class="text-xl font-semibold">"Profile settings"</h1>
                    <p class="text-xs text-muted-foreground">"Manage your account information"</p>
                </div>

                <Card>
                    <CardContent>
                        <form class="flex flex-col gap-3" on:submit=on_submit>
                            <div class="flex flex-col gap-1.5">
                                <Label html_for="name" class="text-xs">"Full name"</Label>
                                <Input
                                    id="name"
                                    bind_value=name
                                    required=true
                                    class="h-8 text-sm"
                                />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="email" class="text-xs">"Email address"</Label>
                                <Input
                                    id="email"
                                    r#type="email"
                                    bind_value=email
                                    required=true
                                    class="h-8 text-sm"
                                />
                            </div>

                            <Button
                                class="w-full"
                                size=ButtonSize::Sm
                                attr:disabled=move || loading.get()
                            >
                                <span class="inline-flex items-center gap-2">
                                    <Show when=move || loading.get() fallback=|| ().into_view()>
                                        <Spinner />
                                    </Show>
                                    {move || if loading.get() { "Saving..." } else { "Save changes" }}
                                </span>
                            </Button>
                        </form>
                    </CardContent>
                </Card>
            </div>
        </div>
    }
}
