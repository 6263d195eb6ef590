use leptos::prelude::*;

#[cfg(target_arch = "wasm32")]
const TOAST_DISMISS_MS: u64 = 4000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ToastKind {
    Success,
    Error,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Lightweight, non-blocking notification queue. Every error class in the
/// app surfaces here; nothing is fatal and the UI stays interactive.
#[derive(Clone, Copy)]
pub(crate) struct Notifier {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(0),
        }
    }

    pub fn toasts(&self) -> RwSignal<Vec<Toast>> {
        self.toasts
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(ToastKind::Warning, message.into());
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|list| list.retain(|t| t.id != id));
    }

    fn push(&self, kind: ToastKind, message: String) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);

        self.toasts.update(|list| list.push(Toast { id, kind, message }));

        // Auto-dismiss. Timers only exist in the browser; host test builds
        // keep the toast until dismissed explicitly.
        #[cfg(target_arch = "wasm32")]
        {
            let toasts = self.toasts;
            let _ = leptos_dom::helpers::set_timeout_with_handle(
                move || toasts.update(|list| list.retain(|t| t.id != id)),
                std::time::Duration::from_millis(TOAST_DISMISS_MS),
            );
        }
    }
}

#[component]
pub fn Toaster(notifier: Notifier) -> impl IntoView {
    let toasts = notifier.toasts();

    view! {
        <div class="pointer-events-none fixed right-4 top-4 z-50 flex w-80 flex-col gap-2">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let border = match toast.kind {
                        ToastKind::Success => "border-emerald-500/40 text-emerald-700",
                        ToastKind::Error => "border-destructive/40 text-destructive",
                        ToastKind::Warning => "border-amber-500/40 text-amber-700",
                    };
                    let id = toast.id;
                    view! {
                        <div
                            class=format!(
                                "pointer-events-auto flex items-start justify-between gap-2 rounded-md border bg-background px-3 py-2 text-sm shadow-md {border}"
                            )
                            role="status"
                        >
                            <span>{toast.message}</span>
                            <button
                                class="text-muted-foreground hover:text-foreground"
                                aria-label="Dismiss"
                                on:click=move |_| notifier.dismiss(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_increasing_ids() {
        let n = Notifier::new();
        n.success("one");
        n.error("two");

        let toasts = n.toasts().get_untracked();
        assert_eq!(toasts.len(), 2);
        assert!(toasts[0].id < toasts[1].id);
        assert_eq!(toasts[0].kind, ToastKind::Success);
        assert_eq!(toasts[1].kind, ToastKind::Error);
    }

    #[test]
    fn test_dismiss_removes_only_target() {
        let n = Notifier::new();
        n.success("one");
        n.warning("two");

        let first_id = n.toasts().get_untracked()[0].id;
        n.dismiss(first_id);

        let toasts = n.toasts().get_untracked();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].message, "two");
    }
}
