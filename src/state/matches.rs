use crate::api::{ApiResult, RematchResponse};
use crate::models::MatchRecord;
use crate::state::AppContext;
use crate::util::percent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Overwrites the targeted entry's confidence, located by id. Returns false
/// when the id is no longer present (e.g. after a concurrent refresh).
fn apply_rematch_score(matches: &mut [MatchRecord], match_id: &str, score: f64) -> bool {
    match matches.iter_mut().find(|m| m.id == match_id) {
        Some(m) => {
            m.similarity_score = score;
            true
        }
        None => false,
    }
}

/// Match list + re-evaluation controller. Matches are read-only except for
/// the confidence overwrite performed here after a rematch round trip.
#[derive(Clone)]
pub(crate) struct MatchReviewController {
    app: AppContext,

    pub matches: RwSignal<Vec<MatchRecord>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,

    /// In-flight rematch ids. A set, so unrelated matches stay
    /// independently actionable while one is being re-evaluated.
    rematching: RwSignal<Vec<String>>,

    request_seq: RwSignal<u64>,
    alive: Arc<AtomicBool>,
}

impl MatchReviewController {
    pub fn new(app: AppContext) -> Self {
        let alive = Arc::new(AtomicBool::new(true));
        {
            let alive = alive.clone();
            on_cleanup(move || alive.store(false, Ordering::Relaxed));
        }

        Self {
            app,
            matches: RwSignal::new(Vec::new()),
            loading: RwSignal::new(true),
            error: RwSignal::new(None),
            rematching: RwSignal::new(Vec::new()),
            request_seq: RwSignal::new(0),
            alive,
        }
    }

    pub fn refresh(&self) {
        let seq = self.request_seq.get_untracked() + 1;
        self.request_seq.set(seq);
        self.loading.set(true);

        let api = self.app.0.api_client.clone();
        let s = self.clone();
        spawn_local(async move {
            let result = api.list_matches().await;
            s.apply_refresh(seq, result);
        });
    }

    pub(crate) fn apply_refresh(&self, seq: u64, result: ApiResult<Vec<MatchRecord>>) {
        if !self.alive.load(Ordering::Relaxed) || self.request_seq.get_untracked() != seq {
            return;
        }

        match result {
            Ok(matches) => {
                self.matches.set(matches);
                self.error.set(None);
            }
            Err(e) => {
                self.error.set(Some(e.to_string()));
                self.app.0.handle_api_error(&e);
            }
        }
        self.loading.set(false);
    }

    /// Tracked; drives the per-entry spinner and disabled state.
    pub fn is_rematching(&self, match_id: &str) -> bool {
        self.rematching.get().iter().any(|id| id == match_id)
    }

    /// Asks the matching service to recompute one match's confidence.
    /// A second request for the same id while one is outstanding is
    /// ignored; other ids are unaffected.
    pub fn request_rematch(&self, match_id: String) {
        if self
            .rematching
            .get_untracked()
            .iter()
            .any(|id| id == &match_id)
        {
            return;
        }
        self.rematching.update(|ids| ids.push(match_id.clone()));

        let api = self.app.0.api_client.clone();
        let s = self.clone();
        spawn_local(async move {
            let result = api.rematch(&match_id).await;
            s.apply_rematch(&match_id, result);
        });
    }

    pub(crate) fn apply_rematch(&self, match_id: &str, result: ApiResult<RematchResponse>) {
        if !self.alive.load(Ordering::Relaxed) {
            return;
        }

        // Re-armable in both outcomes.
        self.rematching.update(|ids| ids.retain(|id| id != match_id));

        match result {
            Ok(r) => {
                let mut updated = false;
                self.matches.update(|list| {
                    updated = apply_rematch_score(list, match_id, r.new_confidence);
                });
                if updated {
                    self.app.0.notify.success(format!(
                        "Match confidence updated to {}",
                        percent(r.new_confidence)
                    ));
                } else {
                    self.app
                        .0
                        .notify
                        .warning("That match is no longer listed; its new score was not applied");
                }
            }
            Err(e) => self.app.0.handle_api_error(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ApiErrorKind};
    use crate::models::{Category, ItemRecord, ItemType};
    use crate::notify::ToastKind;
    use crate::state::AppState;

    fn record(id: &str, score: f64) -> MatchRecord {
        let item = |iid: &str, t: ItemType| ItemRecord {
            id: iid.to_string(),
            item_type: t,
            title: format!("item-{iid}"),
            description: "desc".to_string(),
            category: Category::Other,
            location: "loc".to_string(),
            gps_coords: None,
            image_base64: None,
            ai_extracted_features: None,
            user_name: "A".to_string(),
            created_at: "2024-05-01T10:00:00Z".to_string(),
        };
        MatchRecord {
            id: id.to_string(),
            lost_item: item(&format!("{id}-l"), ItemType::Lost),
            found_item: item(&format!("{id}-f"), ItemType::Found),
            similarity_score: score,
            created_at: "2024-05-02T10:00:00Z".to_string(),
        }
    }

    fn controller_with(matches: Vec<MatchRecord>) -> MatchReviewController {
        let c = MatchReviewController::new(AppContext(AppState::for_tests()));
        c.matches.set(matches);
        c
    }

    #[test]
    fn test_rematch_success_updates_only_target_score() {
        let c = controller_with(vec![record("m1", 0.5), record("m2", 0.6)]);
        let before = c.matches.get_untracked();

        c.rematching.update(|ids| ids.push("m1".to_string()));
        c.apply_rematch("m1", Ok(RematchResponse { new_confidence: 0.9 }));

        let after = c.matches.get_untracked();
        assert!((after[0].similarity_score - 0.9).abs() < 1e-9);
        // Everything else byte-for-byte identical.
        assert_eq!(after[0].lost_item, before[0].lost_item);
        assert_eq!(after[0].found_item, before[0].found_item);
        assert_eq!(after[1], before[1]);
        assert!(c.rematching.get_untracked().is_empty());
    }

    #[test]
    fn test_rematch_failure_leaves_list_identical() {
        let c = controller_with(vec![record("m1", 0.5), record("m2", 0.6)]);
        let before = c.matches.get_untracked();

        c.rematching.update(|ids| ids.push("m2".to_string()));
        c.apply_rematch(
            "m2",
            Err(ApiError {
                kind: ApiErrorKind::Network,
                status: None,
                message: "unreachable".to_string(),
            }),
        );

        assert_eq!(c.matches.get_untracked(), before);
        // Marker cleared on failure too, so the action is re-armable.
        assert!(c.rematching.get_untracked().is_empty());
    }

    #[test]
    fn test_rematch_for_vanished_id_is_noop_with_warning() {
        let c = controller_with(vec![record("m1", 0.5)]);
        let before = c.matches.get_untracked();

        c.rematching.update(|ids| ids.push("gone".to_string()));
        c.apply_rematch("gone", Ok(RematchResponse { new_confidence: 0.9 }));

        assert_eq!(c.matches.get_untracked(), before);
        let toasts = c.app.0.notify.toasts().get_untracked();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Warning);
    }

    #[test]
    fn test_duplicate_rematch_for_same_id_is_ignored() {
        // spawn_local panics on the host; the duplicate path must bail out
        // before spawning.
        let c = controller_with(vec![record("m1", 0.5)]);
        c.rematching.update(|ids| ids.push("m1".to_string()));
        c.request_rematch("m1".to_string());
        assert_eq!(c.rematching.get_untracked().len(), 1);
    }

    #[test]
    fn test_refresh_failure_preserves_matches() {
        let c = controller_with(vec![record("m1", 0.5)]);
        let before = c.matches.get_untracked();

        let seq = 1;
        c.request_seq.set(seq);
        c.apply_refresh(
            seq,
            Err(ApiError {
                kind: ApiErrorKind::Http,
                status: Some(500),
                message: "server error".to_string(),
            }),
        );

        assert_eq!(c.matches.get_untracked(), before);
        assert!(c.error.get_untracked().is_some());
    }
}
