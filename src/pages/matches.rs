use crate::components::navbar::Navbar;
use crate::components::ui::{
    Alert, AlertDescription, Badge, Button, ButtonSize, ButtonVariant, Card, CardContent, Spinner,
};
use crate::models::{ItemRecord, MatchRecord};
use crate::state::matches::MatchReviewController;
use crate::state::AppContext;
use crate::util::{format_date, percent};
use leptos::prelude::*;

fn confidence_badge_class(score: f64) -> &'static str {
    if score >= 0.8 {
        "border-transparent bg-primary/10 text-primary"
    } else if score >= 0.5 {
        "border-transparent bg-amber-500/10 text-amber-600"
    } else {
        "border-border text-muted-foreground"
    }
}

#[component]
fn MatchedItemSummary(label: &'static str, item: ItemRecord) -> impl IntoView {
    let detail_href = format!("/items/{}", item.id);

    view! {
        <div class="flex min-w-0 flex-1 flex-col gap-1 rounded-md border p-3">
            <span class="text-[10px] font-medium uppercase tracking-wide text-muted-foreground">
                {label}
            </span>
            <a href=detail_href class="truncate text-sm font-semibold hover:underline">
                {item.title.clone()}
            </a>
            <span class="truncate text-xs text-muted-foreground">{item.location.clone()}</span>
        </div>
    }
}

#[component]
pub fn MatchesPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let review = MatchReviewController::new(app_state);

    {
        let review = review.clone();
        Effect::new(move |_| {
            review.refresh();
        });
    }

    let matches = review.matches;
    let loading = review.loading;
    let error = review.error;
    let review = StoredValue::new(review);

    view! {
        <div class="min-h-screen bg-background">
            <Navbar />
            <div class="mx-auto w-full max-w-3xl px-4 py-8">
                <div class="mb-6 space-y-1">
                    <h1 class="text-xl font-semibold">"Matches"</h1>
                    <p class="text-xs text-muted-foreground">
                        "Potential pairings between lost and found reports"
                    </p>
                </div>

                <Show when=move || error.get().is_some()>
                    <Alert class="mb-4 border-destructive/30 text-destructive">
                        <AlertDescription>
                            {move || error.get().unwrap_or_default()}
                        </AlertDescription>
                    </Alert>
                </Show>

                <Show
                    when=move || !loading.get()
                    fallback=|| {
                        view! {
                            <div class="flex items-center justify-center py-16">
                                <Spinner class="size-5" />
                            </div>
                        }
                    }
                >
                    <Show
                        when=move || !matches.get().is_empty()
                        fallback=|| {
                            view! {
                                <div class="py-16 text-center text-sm text-muted-foreground">
                                    "No matches yet. They appear here once the AI pairs reports."
                                </div>
                            }
                        }
                    >
                        <div class="flex flex-col gap-3">
                            <For
                                each=move || matches.get()
                                key=|m| (m.id.clone(), m.similarity_score.to_bits())
                                children={
                                    move |m: MatchRecord| {
                                        let review = review.get_value();
                                        let id = m.id.clone();
                                        let score = m.similarity_score;
                                        let created = format_date(&m.created_at);

                                        let busy = Signal::derive({
                                            let review = review.clone();
                                            let id = id.clone();
                                            move || review.is_rematching(&id)
                                        });
                                        let on_rematch = {
                                            let review = review.clone();
                                            let id = id.clone();
                                            move |_: web_sys::MouseEvent| {
                                                review.request_rematch(id.clone());
                                            }
                                        };

                                        view! {
                                            <Card class="gap-3 py-4">
                                                <CardContent class="flex flex-col gap-3">
                                                    <div class="flex items-center justify-between gap-2">
                                                        <Badge class=confidence_badge_class(score)>
                                                            {format!("{} match", percent(score))}
                                                        </Badge>
                                                        <span class="text-xs text-muted-foreground">{created}</span>
                                                    </div>

                                                    <div class="flex flex-col gap-2 md:flex-row">
                                                        <MatchedItemSummary label="Lost" item=m.lost_item.clone() />
                                                        <MatchedItemSummary label="Found" item=m.found_item.clone() />
                                                    </div>

                                                    <div class="flex justify-end">
                                                        <Button
                                                            size=ButtonSize::Sm
                                                            variant=ButtonVariant::Outline
                                                            attr:disabled=busy
                                                            on:click=on_rematch
                                                        >
                                                            <Show when=move || busy.get() fallback=|| ().into_view()>
                                                                <Spinner />
                                                            </Show>
                                                            "Re-match"
                                                        </Button>
                                                    </div>
                                                </CardContent>
                                            </Card>
                                        }
                                    }
                                }
                            />
                        </div>
                    </Show>
                </Show>
            </div>
        </div>
    }
}
