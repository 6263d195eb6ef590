use crate::api::ApiResult;
use crate::models::{FilterCriteria, ItemRecord};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CatalogScope {
    /// Every item visible to authenticated users, filtered server-side.
    Shared,
    /// Only the caller's own reports; no filter criteria accepted.
    Owned,
}

/// Retrieval state machine for the item catalog.
///
/// Concurrent `refresh` calls are not cancelled; each carries a
/// monotonically increasing token and completions with a stale token are
/// discarded, so the last-issued request wins regardless of completion
/// order. Responses arriving after the owning view is torn down are
/// dropped via the alive flag.
#[derive(Clone)]
pub(crate) struct ItemCatalogController {
    app: AppContext,
    scope: CatalogScope,

    pub items: RwSignal<Vec<ItemRecord>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub criteria: RwSignal<FilterCriteria>,

    request_seq: RwSignal<u64>,
    alive: Arc<AtomicBool>,
}

impl ItemCatalogController {
    pub fn new(app: AppContext, scope: CatalogScope) -> Self {
        let alive = Arc::new(AtomicBool::new(true));
        {
            let alive = alive.clone();
            on_cleanup(move || alive.store(false, Ordering::Relaxed));
        }

        Self {
            app,
            scope,
            items: RwSignal::new(Vec::new()),
            loading: RwSignal::new(true),
            error: RwSignal::new(None),
            criteria: RwSignal::new(FilterCriteria::default()),
            request_seq: RwSignal::new(0),
            alive,
        }
    }

    /// Issues a retrieval request for the current criteria (shared scope)
    /// or the caller's own items (owned scope).
    pub fn refresh(&self) {
        let seq = self.begin_refresh();
        let api = self.app.0.api_client.clone();
        let scope = self.scope;
        let criteria = self.criteria.get_untracked();

        let s = self.clone();
        spawn_local(async move {
            let result = match scope {
                CatalogScope::Shared => api.list_items(&criteria).await,
                CatalogScope::Owned => api.my_items().await,
            };
            s.apply_refresh(seq, result);
        });
    }

    pub(crate) fn begin_refresh(&self) -> u64 {
        let seq = self.request_seq.get_untracked() + 1;
        self.request_seq.set(seq);
        self.loading.set(true);
        seq
    }

    /// Applies one completed retrieval. Stale tokens and completions after
    /// teardown are ignored; failures keep the previous items visible.
    pub(crate) fn apply_refresh(&self, seq: u64, result: ApiResult<Vec<ItemRecord>>) {
        if !self.alive.load(Ordering::Relaxed) {
            return;
        }
        if self.request_seq.get_untracked() != seq {
            return;
        }

        match result {
            Ok(items) => {
                self.items.set(items);
                self.error.set(None);
            }
            Err(e) => {
                self.error.set(Some(e.to_string()));
                self.app.0.handle_api_error(&e);
            }
        }
        self.loading.set(false);
    }
}

/// One-shot detail fetch. A failure means the item is no longer resolvable;
/// the caller-provided callback must navigate away from the detail view.
pub(crate) fn fetch_item_detail(
    app: AppContext,
    item_id: String,
    into: RwSignal<Option<ItemRecord>>,
    loading: RwSignal<bool>,
    on_unresolvable: Callback<()>,
) {
    loading.set(true);
    let api = app.0.api_client.clone();

    spawn_local(async move {
        match api.get_item(&item_id).await {
            Ok(item) => {
                into.set(Some(item));
            }
            Err(e) => {
                app.0.handle_api_error(&e);
                on_unresolvable.run(());
            }
        }
        loading.set(false);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ApiErrorKind};
    use crate::models::{Category, ItemType};
    use crate::state::AppState;

    fn item(id: &str, title: &str) -> ItemRecord {
        ItemRecord {
            id: id.to_string(),
            item_type: ItemType::Lost,
            title: title.to_string(),
            description: String::new(),
            category: Category::Other,
            location: "somewhere".to_string(),
            gps_coords: None,
            image_base64: None,
            ai_extracted_features: None,
            user_name: "A".to_string(),
            created_at: "2024-05-01T10:00:00Z".to_string(),
        }
    }

    fn controller() -> ItemCatalogController {
        ItemCatalogController::new(AppContext(AppState::for_tests()), CatalogScope::Shared)
    }

    #[test]
    fn test_refresh_success_replaces_items() {
        let c = controller();
        let seq = c.begin_refresh();
        assert!(c.loading.get_untracked());

        c.apply_refresh(seq, Ok(vec![item("1", "Backpack")]));

        assert!(!c.loading.get_untracked());
        assert!(c.error.get_untracked().is_none());
        assert_eq!(c.items.get_untracked().len(), 1);
    }

    #[test]
    fn test_last_issued_wins_over_completion_order() {
        // Two overlapping refreshes; the first-issued response arrives last
        // and must be discarded.
        let c = controller();
        let first = c.begin_refresh();
        let second = c.begin_refresh();

        c.apply_refresh(second, Ok(vec![item("2", "found-result")]));
        c.apply_refresh(first, Ok(vec![item("1", "lost-result")]));

        let items = c.items.get_untracked();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "found-result");
    }

    #[test]
    fn test_failure_preserves_previous_items() {
        let c = controller();
        let seq = c.begin_refresh();
        c.apply_refresh(seq, Ok(vec![item("1", "Backpack"), item("2", "Wallet")]));

        let before = c.items.get_untracked();
        let seq = c.begin_refresh();
        c.apply_refresh(
            seq,
            Err(ApiError {
                kind: ApiErrorKind::Network,
                status: None,
                message: "unreachable".to_string(),
            }),
        );

        assert_eq!(c.items.get_untracked(), before);
        assert!(c.error.get_untracked().is_some());
        assert!(!c.loading.get_untracked());
    }

    #[test]
    fn test_stale_error_is_discarded() {
        let c = controller();
        let stale = c.begin_refresh();
        let current = c.begin_refresh();

        c.apply_refresh(current, Ok(vec![item("1", "Backpack")]));
        c.apply_refresh(
            stale,
            Err(ApiError {
                kind: ApiErrorKind::Network,
                status: None,
                message: "unreachable".to_string(),
            }),
        );

        assert!(c.error.get_untracked().is_none());
        assert_eq!(c.items.get_untracked().len(), 1);
    }

    #[test]
    fn test_completion_after_teardown_is_dropped() {
        let c = controller();
        let seq = c.begin_refresh();
        c.alive.store(false, Ordering::Relaxed);

        c.apply_refresh(seq, Ok(vec![item("1", "Backpack")]));
        assert!(c.items.get_untracked().is_empty());
    }
}
