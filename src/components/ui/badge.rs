use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Badge, span, "inline-flex items-center rounded-full border px-2.5 py-0.5 text-xs font-medium whitespace-nowrap"}
}

pub use components::*;
