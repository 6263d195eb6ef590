use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

/// Native `<select>` wired the same way as [`super::Input`]: manual
/// two-way binding over an `RwSignal<String>` holding the option value.
#[component]
pub fn Select(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] id: String,
    #[prop(optional)] disabled: bool,
    #[prop(optional)] required: bool,
    #[prop(into)] bind_value: RwSignal<String>,
    children: Children,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "border-input flex h-9 w-full min-w-0 appearance-none rounded-md border bg-transparent px-3 py-1 text-base shadow-xs outline-none disabled:pointer-events-none disabled:cursor-not-allowed disabled:opacity-50 md:text-sm",
        "focus-visible:border-ring focus-visible:ring-ring/50 focus-visible:ring-2",
        class
    );

    let on_change = move |ev: web_sys::Event| {
        if let Some(target) = ev.target() {
            if let Some(select) = target.dyn_ref::<web_sys::HtmlSelectElement>() {
                bind_value.set(select.value());
            }
        }
    };

    view! {
        <select
            data-name="Select"
            class=merged_class
            id=id
            disabled=disabled
            required=required
            prop:value=move || bind_value.get()
            on:change=on_change
        >
            {children()}
        </select>
    }
    .into_any()
}

#[component]
pub fn SelectOption(
    #[prop(into)] value: String,
    children: Children,
) -> impl IntoView {
    view! { <option value=value>{children()}</option> }
}
