use crate::components::navbar::Navbar;
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent,
    CardDescription, CardHeader, CardTitle, Input, Label, Select, SelectOption, Spinner, Textarea,
};
use crate::models::{Category, GpsCoords, ItemDraft, ItemRecord, ItemType};
use crate::pages::catalog::ItemCard;
use crate::state::catalog::{CatalogScope, ItemCatalogController};
use crate::state::lifecycle::{encode_image, ItemLifecycleController};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

#[component]
pub fn MyItemsPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let catalog = ItemCatalogController::new(app_state.clone(), CatalogScope::Owned);
    let lifecycle = ItemLifecycleController::for_list(app_state, catalog.items);

    // Item pending the user's confirmation before any request is sent.
    let confirm_delete: RwSignal<Option<(String, String)>> = RwSignal::new(None);

    {
        let catalog = catalog.clone();
        Effect::new(move |_| {
            catalog.refresh();
        });
    }

    let items = catalog.items;
    let loading = catalog.loading;
    let error = catalog.error;
    let deleting = lifecycle.deleting;

    let on_confirm = {
        let lifecycle = lifecycle.clone();
        Callback::new(move |_: web_sys::MouseEvent| {
            if let Some((id, _)) = confirm_delete.get_untracked() {
                confirm_delete.set(None);
                lifecycle.remove(id);
            }
        })
    };

    view! {
        <div class="min-h-screen bg-background">
            <Navbar />
            <div class="mx-auto w-full max-w-[1080px] px-4 py-8">
                <div class="mb-6 flex items-center justify-between">
                    <div class="space-y-1">
                        <h1 class="text-xl font-semibold">"My items"</h1>
                        <p class="text-xs text-muted-foreground">"Reports you have submitted"</p>
                    </div>
                    <Button size=ButtonSize::Sm href="/report-lost">
                        "Report an item"
                    </Button>
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
                                    "You have not reported any items yet."
                                </div>
                            }
                        }
                    >
                        <div class="grid grid-cols-1 gap-3 md:grid-cols-2 lg:grid-cols-3">
                            <For
                                each=move || items.get()
                                key=|item| item.id.clone()
                                children=move |item: ItemRecord| {
                                    let id = item.id.clone();
                                    let title = item.title.clone();
                                    let busy = Signal::derive({
                                        let id = id.clone();
                                        move || deleting.get().as_deref() == Some(id.as_str())
                                    });
                                    let ask = move |_: web_sys::MouseEvent| {
                                        confirm_delete.set(Some((id.clone(), title.clone())));
                                    };
                                    view! {
                                        <ItemCard item=item>
                                            <Button
                                                size=ButtonSize::Sm
                                                variant=ButtonVariant::Destructive
                                                attr:disabled=busy
                                                on:click=ask
                                            >
                                                <Show when=move || busy.get() fallback=|| ().into_view()>
                                                    <Spinner />
                                                </Show>
                                                "Delete"
                                            </Button>
                                        </ItemCard>
                                    }
                                }
                            />
                        </div>
                    </Show>
                </Show>
            </div>

            <Show when=move || confirm_delete.get().is_some()>
                <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/40 p-4">
                    <Card class="w-full max-w-sm">
                        <CardHeader>
                            <CardTitle class="text-base">"Delete this item?"</CardTitle>
                            <CardDescription class="text-xs">
                                {move || {
                                    confirm_delete
                                        .get()
                                        .map(|(_, title)| {
                                            format!("\"{title}\" will be removed permanently.")
                                        })
                                        .unwrap_or_default()
                                }}
                            </CardDescription>
                        </CardHeader>
                        <CardContent class="flex justify-end gap-2">
                            <Button
                                size=ButtonSize::Sm
                                variant=ButtonVariant::Outline
                                on:click=move |_| confirm_delete.set(None)
                            >
                                "Cancel"
                            </Button>
                            <Button
                                size=ButtonSize::Sm
                                variant=ButtonVariant::Destructive
                                on:click=move |ev: web_sys::MouseEvent| on_confirm.run(ev)
                            >
                                "Delete"
                            </Button>
                        </CardContent>
                    </Card>
                </div>
            </Show>
        </div>
    }
}

#[component]
pub fn ReportLostPage() -> impl IntoView {
    view! { <ReportItemForm item_type=ItemType::Lost /> }
}

#[component]
pub fn ReportFoundPage() -> impl IntoView {
    view! { <ReportItemForm item_type=ItemType::Found /> }
}

/// Shared report form. The only difference between the two report pages is
/// the item type stamped onto the submission.
#[component]
fn ReportItemForm(item_type: ItemType) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let lifecycle = ItemLifecycleController::new(app_state.clone());
    let notify = app_state.0.notify;
    let navigate = StoredValue::new(use_navigate());

    let title: RwSignal<String> = RwSignal::new(String::new());
    let description: RwSignal<String> = RwSignal::new(String::new());
    let category: RwSignal<String> = RwSignal::new(String::new());
    let location: RwSignal<String> = RwSignal::new(String::new());
    let gps: RwSignal<Option<GpsCoords>> = RwSignal::new(None);
    let image: RwSignal<Option<String>> = RwSignal::new(None);
    let locating: RwSignal<bool> = RwSignal::new(false);

    let creating = lifecycle.creating;

    let on_file_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|list| list.get(0)) else {
            return;
        };
        let Ok(reader) = web_sys::FileReader::new() else {
            return;
        };

        let reader_for_load = reader.clone();
        let onload = Closure::once_into_js(move |_ev: web_sys::ProgressEvent| {
            let Ok(buffer) = reader_for_load.result() else {
                notify.error("Could not read the selected file");
                return;
            };
            let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
            match encode_image(&bytes) {
                Ok(encoded) => image.set(Some(encoded)),
                Err(e) => notify.error(e.to_string()),
            }
        });
        reader.set_onload(Some(onload.unchecked_ref()));
        if reader.read_as_array_buffer(&file).is_err() {
            notify.error("Could not read the selected file");
        }
    };

    let on_capture_location = {
        let lifecycle = lifecycle.clone();
        // Not a submit button; stop the click from submitting the form.
        move |ev: web_sys::MouseEvent| {
            ev.prevent_default();
            lifecycle.capture_location(location, gps, locating);
        }
    };

    let on_submit = {
        let lifecycle = lifecycle.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();

            let draft = ItemDraft {
                title: title.get_untracked(),
                description: description.get_untracked(),
                category: category.get_untracked(),
                location: location.get_untracked(),
                gps_coords: gps.get_untracked(),
                image_base64: image.get_untracked(),
            };

            let on_created = Callback::new(move |_item: ItemRecord| {
                navigate.with_value(|nav| nav("/my-items", Default::default()));
            });
            lifecycle.create(draft, item_type, on_created);
        }
    };

    let heading = match item_type {
        ItemType::Lost => "Report a lost item",
        ItemType::Found => "Report a found item",
    };
    let subheading = match item_type {
        ItemType::Lost => "Describe what you lost and where you last saw it.",
        ItemType::Found => "Describe what you found and where you picked it up.",
    };

    view! {
        <div class="min-h-screen bg-background">
            <Navbar />
            <div class="mx-auto w-full max-w-2xl px-4 py-8">
                <div class="mb-6 space-y-1">
                    <h1 class="text-xl font-semibold">{heading}</h1>
                    <p class="text-xs text-muted-foreground">{subheading}</p>
                </div>

                <Card>
                    <CardContent>
                        <form class="flex flex-col gap-3" on:submit=on_submit>
                            <div class="flex flex-col gap-1.5">
                                <Label html_for="title" class="text-xs">"Title"</Label>
                                <Input
                                    id="title"
                                    placeholder="e.g. Black leather wallet"
                                    bind_value=title
                                    required=true
                                    class="h-8 text-sm"
                                />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="description" class="text-xs">"Description"</Label>
                                <Textarea
                                    id="description"
                                    placeholder="Color, brand, identifying marks..."
                                    bind_value=description
                                />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="category" class="text-xs">"Category"</Label>
                                <Select id="category" bind_value=category class="h-8 text-sm">
                                    <SelectOption value="">"Select a category"</SelectOption>
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

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="location" class="text-xs">"Location"</Label>
                                <div class="flex items-center gap-2">
                                    <Input
                                        id="location"
                                        placeholder="e.g. Central Library, 2nd floor"
                                        bind_value=location
                                        required=true
                                        class="h-8 text-sm"
                                    />
                                    <Button
                                        size=ButtonSize::Sm
                                        variant=ButtonVariant::Outline
                                        attr:disabled=move || locating.get()
                                        on:click=on_capture_location
                                    >
                                        <Show when=move || locating.get() fallback=|| ().into_view()>
                                            <Spinner />
                                        </Show>
                                        "Use my location"
                                    </Button>
                                </div>
                                {move || {
                                    gps.get()
                                        .map(|c| {
                                            view! {
                                                <span class="text-xs text-muted-foreground">
                                                    {format!("Captured: {:.4}, {:.4}", c.lat, c.lng)}
                                                </span>
                                            }
                                        })
                                }}
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="photo" class="text-xs">"Photo (optional, up to 5MB)"</Label>
                                <input
                                    id="photo"
                                    type="file"
                                    accept="image/*"
                                    class="text-xs text-muted-foreground file:mr-2 file:rounded-md file:border file:bg-transparent file:px-2 file:py-1 file:text-xs"
                                    on:change=on_file_change
                                />
                                <Show when=move || image.get().is_some()>
                                    <div class="flex items-center gap-2">
                                        <img
                                            src=move || {
                                                image
                                                    .get()
                                                    .map(|b64| format!("data:image/jpeg;base64,{b64}"))
                                                    .unwrap_or_default()
                                            }
                                            alt="Preview"
                                            class="max-h-32 rounded-md border object-contain"
                                        />
                                        <Button
                                            size=ButtonSize::Sm
                                            variant=ButtonVariant::Ghost
                                            on:click=move |ev: web_sys::MouseEvent| {
                                                ev.prevent_default();
                                                image.set(None);
                                            }
                                        >
                                            "Remove"
                                        </Button>
                                    </div>
                                </Show>
                            </div>

                            <Button
                                class="w-full"
                                size=ButtonSize::Sm
                                attr:disabled=move || creating.get()
                            >
                                <span class="inline-flex items-center gap-2">
                                    <Show when=move || creating.get() fallback=|| ().into_view()>
                                        <Spinner />
                                    </Show>
                                    {move || if creating.get() { "Submitting..." } else { "Submit report" }}
                                </span>
                            </Button>
                        </form>
                    </CardContent>
                </Card>
            </div>
        </div>
    }
}
