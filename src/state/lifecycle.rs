use crate::api::{ApiError, ApiResult, CreateItemRequest};
use crate::models::{Category, GpsCoords, ItemDraft, ItemRecord, ItemType};
use crate::state::AppContext;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub(crate) const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Checks a draft client-side. Invalid drafts never reach the network.
pub(crate) fn validate_draft(draft: &ItemDraft) -> ApiResult<Category> {
    if draft.title.trim().is_empty() {
        return Err(ApiError::validation("Please enter a title"));
    }
    if draft.location.trim().is_empty() {
        return Err(ApiError::validation("Please enter a location"));
    }
    Category::parse(&draft.category)
        .ok_or_else(|| ApiError::validation("Please select a category"))
}

/// Base64-encodes raw image bytes for the create payload, enforcing the
/// size cap before encoding.
pub(crate) fn encode_image(bytes: &[u8]) -> ApiResult<String> {
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ApiError::validation("Image size should be less than 5MB"));
    }
    Ok(STANDARD.encode(bytes))
}

/// Human-readable stand-in for an empty location field.
pub(crate) fn fallback_location_label(coords: GpsCoords) -> String {
    format!("Lat: {:.4}, Lng: {:.4}", coords.lat, coords.lng)
}

fn remove_item_by_id(items: &mut Vec<ItemRecord>, item_id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id != item_id);
    items.len() != before
}

/// Create/delete controller. Deletion is optimistic-after-success: the
/// owned list is only mutated once the server acknowledges, and only the
/// entry matching the id is removed.
#[derive(Clone)]
pub(crate) struct ItemLifecycleController {
    app: AppContext,

    /// Locally held owned-items list; shared with the owned-scope catalog
    /// on the My Items view.
    pub owned_items: RwSignal<Vec<ItemRecord>>,

    pub creating: RwSignal<bool>,
    pub deleting: RwSignal<Option<String>>,

    alive: Arc<AtomicBool>,
}

impl ItemLifecycleController {
    pub fn new(app: AppContext) -> Self {
        Self::for_list(app, RwSignal::new(Vec::new()))
    }

    pub fn for_list(app: AppContext, owned_items: RwSignal<Vec<ItemRecord>>) -> Self {
        let alive = Arc::new(AtomicBool::new(true));
        {
            let alive = alive.clone();
            on_cleanup(move || alive.store(false, Ordering::Relaxed));
        }

        Self {
            app,
            owned_items,
            creating: RwSignal::new(false),
            deleting: RwSignal::new(None),
            alive,
        }
    }

    /// Submits a new report. On success the created record is handed to the
    /// caller (who navigates to the owned view; no cached list is touched).
    /// On failure the caller's form state is left alone so the user can
    /// retry without re-entering anything.
    pub fn create(&self, draft: ItemDraft, item_type: ItemType, on_created: Callback<ItemRecord>) {
        let category = match validate_draft(&draft) {
            Ok(category) => category,
            Err(e) => {
                self.app.0.notify.error(e.to_string());
                return;
            }
        };

        self.creating.set(true);
        let api = self.app.0.api_client.clone();
        let req = CreateItemRequest::from_draft(&draft, category, item_type);

        let s = self.clone();
        spawn_local(async move {
            let result = api.create_item(&req).await;
            if !s.alive.load(Ordering::Relaxed) {
                return;
            }
            s.creating.set(false);
            match result {
                Ok(item) => {
                    s.app
                        .0
                        .notify
                        .success("Item reported successfully! AI is finding matches...");
                    on_created.run(item);
                }
                Err(e) => s.app.0.handle_api_error(&e),
            }
        });
    }

    /// Deletes an owned item. Confirmation is the caller's responsibility;
    /// this only fires after it was given.
    pub fn remove(&self, item_id: String) {
        self.deleting.set(Some(item_id.clone()));
        let api = self.app.0.api_client.clone();

        let s = self.clone();
        spawn_local(async move {
            let result = api.delete_item(&item_id).await;
            s.apply_remove(&item_id, result);
        });
    }

    pub(crate) fn apply_remove(&self, item_id: &str, result: ApiResult<()>) {
        if !self.alive.load(Ordering::Relaxed) {
            return;
        }
        self.deleting.set(None);

        match result {
            Ok(()) => {
                self.owned_items
                    .update(|items| {
                        remove_item_by_id(items, item_id);
                    });
                self.app.0.notify.success("Item deleted successfully");
            }
            Err(e) => self.app.0.handle_api_error(&e),
        }
    }

    /// Best-effort geolocation enrichment: fills `gps` and, only when the
    /// location field is empty, a readable coordinate label. Never blocks
    /// or gates `create`.
    pub fn capture_location(
        &self,
        location: RwSignal<String>,
        gps: RwSignal<Option<GpsCoords>>,
        busy: RwSignal<bool>,
    ) {
        let notify = self.app.0.notify;

        let Some(geolocation) = web_sys::window().and_then(|w| w.navigator().geolocation().ok())
        else {
            notify.error("Geolocation is not supported by your browser");
            return;
        };

        busy.set(true);

        let on_success = Closure::once_into_js(move |pos: web_sys::GeolocationPosition| {
            let c = pos.coords();
            let coords = GpsCoords {
                lat: c.latitude(),
                lng: c.longitude(),
            };
            gps.set(Some(coords));
            if location.get_untracked().is_empty() {
                location.set(fallback_location_label(coords));
            }
            notify.success("Location captured successfully");
            busy.set(false);
        });
        let on_error = Closure::once_into_js(move |_err: web_sys::GeolocationPositionError| {
            notify.error("Unable to get location. Please enter manually.");
            busy.set(false);
        });

        if geolocation
            .get_current_position_with_error_callback(
                on_success.unchecked_ref(),
                Some(on_error.unchecked_ref()),
            )
            .is_err()
        {
            busy.set(false);
            notify.error("Unable to get location. Please enter manually.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiErrorKind;
    use crate::state::AppState;

    fn item(id: &str) -> ItemRecord {
        ItemRecord {
            id: id.to_string(),
            item_type: ItemType::Found,
            title: format!("item-{id}"),
            description: String::new(),
            category: Category::Other,
            location: "desk".to_string(),
            gps_coords: None,
            image_base64: None,
            ai_extracted_features: None,
            user_name: "A".to_string(),
            created_at: "2024-05-01T10:00:00Z".to_string(),
        }
    }

    fn controller_with(items: Vec<ItemRecord>) -> ItemLifecycleController {
        ItemLifecycleController::for_list(
            AppContext(AppState::for_tests()),
            RwSignal::new(items),
        )
    }

    #[test]
    fn test_validate_draft_requires_known_category() {
        let draft = ItemDraft {
            title: "Backpack".to_string(),
            location: "Library".to_string(),
            category: "Gadgets".to_string(),
            ..ItemDraft::default()
        };
        let e = validate_draft(&draft).expect_err("unknown category must be rejected");
        assert_eq!(e.kind, ApiErrorKind::Validation);

        let draft = ItemDraft {
            category: "Bags".to_string(),
            ..draft
        };
        assert_eq!(validate_draft(&draft).expect("valid"), Category::Bags);
    }

    #[test]
    fn test_validate_draft_requires_title_and_location() {
        let draft = ItemDraft {
            category: "Bags".to_string(),
            location: "Library".to_string(),
            ..ItemDraft::default()
        };
        assert!(validate_draft(&draft).is_err());

        let draft = ItemDraft {
            title: "Backpack".to_string(),
            category: "Bags".to_string(),
            ..ItemDraft::default()
        };
        assert!(validate_draft(&draft).is_err());
    }

    #[test]
    fn test_invalid_draft_never_spawns_a_request() {
        // spawn_local panics on the host, so reaching the network here
        // would fail this test by itself.
        let c = controller_with(Vec::new());
        c.create(
            ItemDraft::default(),
            ItemType::Lost,
            Callback::new(|_| panic!("must not be called")),
        );

        assert!(!c.creating.get_untracked());
        let toasts = c.app.0.notify.toasts().get_untracked();
        assert_eq!(toasts.len(), 1);
    }

    #[test]
    fn test_encode_image_rejects_oversized_input() {
        let six_mib = vec![0u8; 6 * 1024 * 1024];
        let e = encode_image(&six_mib).expect_err("6 MiB must be rejected");
        assert_eq!(e.kind, ApiErrorKind::Validation);

        let ok = encode_image(&[104, 105]).expect("small input encodes");
        assert_eq!(ok, "aGk=");
    }

    #[test]
    fn test_encode_image_accepts_exact_cap() {
        let at_cap = vec![0u8; MAX_IMAGE_BYTES];
        assert!(encode_image(&at_cap).is_ok());
    }

    #[test]
    fn test_remove_success_drops_exactly_one_entry_in_order() {
        let c = controller_with(vec![item("a"), item("b"), item("c")]);
        c.apply_remove("b", Ok(()));

        let ids: Vec<String> = c
            .owned_items
            .get_untracked()
            .iter()
            .map(|i| i.id.clone())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(c.deleting.get_untracked().is_none());
    }

    #[test]
    fn test_remove_failure_leaves_list_untouched() {
        let c = controller_with(vec![item("a"), item("b")]);
        let before = c.owned_items.get_untracked();

        c.apply_remove(
            "a",
            Err(ApiError {
                kind: ApiErrorKind::Http,
                status: Some(500),
                message: "server error".to_string(),
            }),
        );

        assert_eq!(c.owned_items.get_untracked(), before);
    }

    #[test]
    fn test_fallback_location_label_uses_four_decimals() {
        let label = fallback_location_label(GpsCoords {
            lat: 12.97161234,
            lng: 77.59462789,
        });
        assert_eq!(label, "Lat: 12.9716, Lng: 77.5946");
    }
}