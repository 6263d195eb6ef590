use crate::components::navbar::Navbar;
use crate::components::ui::{
    Alert, AlertDescription, Badge, Button, ButtonSize, ButtonVariant, Card, CardContent, Input,
    Select, SelectOption, Spinner,
};
use crate::models::{
    Category, CategoryFilter, FilterCriteria, ItemRecord, ItemType, TypeFilter,
};
use crate::state::catalog::{fetch_item_detail, CatalogScope, ItemCatalogController};
use crate::state::AppContext;
use crate::util::format_date;
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params};
use leptos_router::params::Params;

fn type_badge_class(item_type: ItemType) -> &'static str {
    match item_type {
        ItemType::Lost => "border-transparent bg-destructive/10 text-destructive",
        ItemType::Found => "border-transparent bg-primary/10 text-primary",
    }
}

/// Card shown in both the shared catalog and the owned list.
#[component]
pub fn ItemCard(item: ItemRecord, children: Children) -> impl IntoView {
    let detail_href = format!("/items/{}", item.id);
    let type_class = type_badge_class(item.item_type);
    let type_label = item.item_type.label();
    let category = item.category.to_string();
    let created = format_date(&item.created_at);
    let title = item.title;
    let description = item.description;
    let has_description = !description.is_empty();
    let location = item.location;

    view! {
        <Card class="gap-3 py-4">
            <CardContent class="flex flex-col gap-2">
                <div class="flex items-center justify-between gap-2">
                    <div class="flex items-center gap-2">
                        <Badge class=type_class>{type_label}</Badge>
                        <Badge class="border-border text-muted-foreground">{category}</Badge>
                    </div>
                    <span class="text-xs text-muted-foreground">{created}</span>
                </div>

                <a href=detail_href class="text-sm font-semibold hover:underline">
                    {title}
                </a>

                <Show when=move || has_description>
                    <p class="line-clamp-2 text-xs text-muted-foreground">
                        {description.clone()}
                    </p>
                </Show>

                <div class="flex items-center justify-between gap-2 pt-1">
                    <span class="truncate text-xs text-muted-foreground">{location}</span>
                    {children()}
                </div>
            </CardContent>
        </Card>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let catalog = ItemCatalogController::new(app_state, CatalogScope::Shared);

    // Raw select values; folded into criteria on every change.
    let type_value: RwSignal<String> = RwSignal::new("all".to_string());
    let category_value: RwSignal<String> = RwSignal::new("all".to_string());
    let search_value: RwSignal<String> = RwSignal::new(String::new());

    let apply_filters = {
        let catalog = catalog.clone();
        move || {
            let type_filter = match type_value.get_untracked().as_str() {
                "lost" => TypeFilter::Only(ItemType::Lost),
                "found" => TypeFilter::Only(ItemType::Found),
                _ => TypeFilter::All,
            };
            let category_filter = match Category::parse(&category_value.get_untracked()) {
                Some(c) => CategoryFilter::Only(c),
                None => CategoryFilter::All,
            };
            catalog.criteria.set(FilterCriteria {
                type_filter,
                category_filter,
                search_term: search_value.get_untracked().trim().to_string(),
            });
            catalog.refresh();
        }
    };

    // Initial load.
    {
        let catalog = catalog.clone();
        Effect::new(move |_| {
            catalog.refresh();
        });
    }

    // Select changes apply immediately; search waits for submit.
    {
        let apply = apply_filters.clone();
        Effect::new(move |prev: Option<()>| {
            let _ = type_value.get();
            let _ = category_value.get();
            if prev.is_some() {
                apply();
            }
        });
    }

    let on_search = {
        let apply = apply_filters.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            apply();
        }
    };

    let items = catalog.items;
    let loading = catalog.loading;
    let error = catalog.error;

    view! {
        <div class="min-h-screen bg-background">
            <Navbar />
            <div class="mx-auto w-full max-w-[1080px] px-4 py-8">
                <div class="mb-6 space-y-1">
                    <h1 class="text-xl font-semibold">"Browse items"</h1>
                    <p class="text-xs text-muted-foreground">
                        "Recently reported lost and found items"
                    </p>
                </div>

                <div class="mb-6 flex flex-col gap-2 md:flex-row md:items-center">
                    <form class="flex flex-1 items-center gap-2" on:submit=on_search>
                        <Input
                            placeholder="Search by title or description..."
                            bind_value=search_value
                            class="h-8 text-sm"
                        />
                        <Button size=ButtonSize::Sm variant=ButtonVariant::Secondary>
                            "Search"
                        </Button>
                    </form>

                    <div class="flex items-center gap-2">
                        <Select bind_value=type_value class="h-8 w-28 text-sm">
                            <SelectOption value="all">"All types"</SelectOption>
                            <SelectOption value="lost">"Lost"</SelectOption>
                            <SelectOption value="found">"Found"</SelectOption>
                        </Select>
                        <Select bind_value=category_value class="h-8 w-36 text-sm">
                            <SelectOption value="all">"All categories"</SelectOption>
                            {Category::ALL
                                .into_iter()
                                .map(|c| {
                                    view! {
                                        <SelectOption value=c.as_ref()>{c.to_string()}</SelectOption>
                                    }
                                })
                                .collect_view()}
                        </Select>
                    </div>
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
                        when=move || !items.get().is_empty()
                        fallback=|| {
                            view! {
                                <div class="py-16 text-center text-sm text-muted-foreground">
                                    "No items match your filters."
                                </div>
                            }
                        }
                    >
                        <div class="grid grid-cols-1 gap-3 md:grid-cols-2 lg:grid-cols-3">
                            <For
                                each=move || items.get()
                                key=|item| item.id.clone()
                                children=move |item: ItemRecord| {
                                    view! {
                                        <ItemCard item=item>
                                            <span></span>
                                        </ItemCard>
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

#[derive(Params, PartialEq, Clone, Debug)]
pub struct ItemRouteParams {
    pub id: Option<String>,
}

#[component]
pub fn ItemDetailPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let params = use_params::<ItemRouteParams>();
    let navigate = StoredValue::new(use_navigate());

    let item: RwSignal<Option<ItemRecord>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(true);

    let on_unresolvable = Callback::new(move |_| {
        navigate.with_value(|nav| nav("/dashboard", Default::default()));
    });

    // Params are reactive; a route change to another item re-fetches.
    {
        let app = app_state.clone();
        Effect::new(move |_| {
            let id = params.get().ok().and_then(|p| p.id).unwrap_or_default();
            if id.is_empty() {
                on_unresolvable.run(());
                return;
            }
            fetch_item_detail(app.clone(), id, item, loading, on_unresolvable);
        });
    }

    view! {
        <div class="min-h-screen bg-background">
            <Navbar />
            <div class="mx-auto w-full max-w-2xl px-4 py-8">
                <div class="mb-4">
                    <Button size=ButtonSize::Sm variant=ButtonVariant::Ghost href="/dashboard">
                        "Back to dashboard"
                    </Button>
                </div>

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
                    {move || {
                        item.get()
                            .map(|record| {
                                let type_class = type_badge_class(record.item_type);
                                let type_label = record.item_type.label();
                                let category = record.category.to_string();
                                let created = format_date(&record.created_at);
                                let title = record.title;
                                let image_src = record
                                    .image_base64
                                    .map(|b64| format!("data:image/jpeg;base64,{b64}"));
                                let description = record.description;
                                let has_description = !description.is_empty();
                                let location_line = format!("Location: {}", record.location);
                                let coords_line = record
                                    .gps_coords
                                    .map(|c| format!("Coordinates: {:.4}, {:.4}", c.lat, c.lng));
                                let reporter_line = (!record.user_name.is_empty())
                                    .then(|| format!("Reported by: {}", record.user_name));
                                let features = record.ai_extracted_features;

                                view! {
                                    <Card>
                                        <CardContent class="flex flex-col gap-4">
                                            <div class="flex items-center justify-between gap-2">
                                                <div class="flex items-center gap-2">
                                                    <Badge class=type_class>{type_label}</Badge>
                                                    <Badge class="border-border text-muted-foreground">
                                                        {category}
                                                    </Badge>
                                                </div>
                                                <span class="text-xs text-muted-foreground">{created}</span>
                                            </div>

                                            <h1 class="text-lg font-semibold">{title}</h1>

                                            {image_src
                                                .map(|src| {
                                                    view! {
                                                        <img
                                                            src=src
                                                            alt="Item photo"
                                                            class="max-h-80 w-full rounded-md border object-contain"
                                                        />
                                                    }
                                                })}

                                            <Show when=move || has_description>
                                                <p class="text-sm text-muted-foreground">
                                                    {description.clone()}
                                                </p>
                                            </Show>

                                            <div class="flex flex-col gap-1 text-xs text-muted-foreground">
                                                <span>{location_line}</span>
                                                {coords_line.map(|line| view! { <span>{line}</span> })}
                                                {reporter_line.map(|line| view! { <span>{line}</span> })}
                                            </div>

                                            {features
                                                .map(|features| {
                                                    view! {
                                                        <Alert class="border-primary/30">
                                                            <AlertDescription class="text-xs">
                                                                <span class="font-medium">"AI-extracted features: "</span>
                                                                {features}
                                                            </AlertDescription>
                                                        </Alert>
                                                    }
                                                })}
                                        </CardContent>
                                    </Card>
                                }
                            })
                    }}
                </Show>
            </div>
        </div>
    }
}
