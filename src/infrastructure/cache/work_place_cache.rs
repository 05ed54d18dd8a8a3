use crate::domain::entities::{Rating, WorkPlace, WorkPlaceKind};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory cache of the workplaces loaded for one spot, bucketed by kind.
#[derive(Clone)]
pub struct WorkPlaceCacheService {
    state: Arc<RwLock<WorkPlaceCacheState>>,
}

struct WorkPlaceCacheState {
    places: HashMap<WorkPlaceKind, HashMap<String, WorkPlace>>,
    is_loading: bool,
    failed_to_load: bool,
    is_creating: bool,
    failed_to_create: bool,
    is_submitting_rating: bool,
    failed_to_submit_rating: bool,
}

impl WorkPlaceCacheService {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(WorkPlaceCacheState {
                places: empty_buckets(),
                is_loading: false,
                failed_to_load: false,
                is_creating: false,
                failed_to_create: false,
                is_submitting_rating: false,
                failed_to_submit_rating: false,
            })),
        }
    }

    pub async fn begin_load(&self) {
        let mut state = self.state.write().await;
        state.is_loading = true;
        state.failed_to_load = false;
    }

    pub async fn fail_load(&self) {
        let mut state = self.state.write().await;
        state.is_loading = false;
        state.failed_to_load = true;
    }

    /// Replaces all buckets with a freshly loaded set.
    pub async fn complete_load(&self, places: Vec<WorkPlace>) {
        let mut state = self.state.write().await;
        state.is_loading = false;
        state.failed_to_load = false;

        let mut buckets = empty_buckets();
        for place in places {
            buckets
                .entry(place.kind)
                .or_default()
                .insert(place.id.clone(), place);
        }
        state.places = buckets;
    }

    pub async fn begin_create(&self) {
        let mut state = self.state.write().await;
        state.is_creating = true;
        state.failed_to_create = false;
    }

    pub async fn fail_create(&self) {
        let mut state = self.state.write().await;
        state.is_creating = false;
        state.failed_to_create = true;
    }

    pub async fn complete_create(&self, place: WorkPlace) {
        let mut state = self.state.write().await;
        state.is_creating = false;
        state.failed_to_create = false;
        state
            .places
            .entry(place.kind)
            .or_default()
            .insert(place.id.clone(), place);
    }

    pub async fn begin_rating(&self) {
        let mut state = self.state.write().await;
        state.is_submitting_rating = true;
        state.failed_to_submit_rating = false;
    }

    pub async fn fail_rating(&self) {
        let mut state = self.state.write().await;
        state.is_submitting_rating = false;
        state.failed_to_submit_rating = true;
    }

    /// Applies a confirmed rating to the cached workplace. A workplace no
    /// longer in the cache is silently skipped.
    pub async fn complete_rating(
        &self,
        kind: WorkPlaceKind,
        work_place_id: &str,
        rating: Rating,
        edit: bool,
    ) {
        let mut state = self.state.write().await;
        state.is_submitting_rating = false;
        state.failed_to_submit_rating = false;

        match state
            .places
            .get_mut(&kind)
            .and_then(|bucket| bucket.get_mut(work_place_id))
        {
            Some(place) => place.upsert_rating(rating, edit),
            None => debug!(work_place_id, "rating for a workplace no longer in the cache, skipping"),
        }
    }

    // Selectors

    pub async fn get(&self, kind: WorkPlaceKind, id: &str) -> Option<WorkPlace> {
        self.state
            .read()
            .await
            .places
            .get(&kind)
            .and_then(|bucket| bucket.get(id))
            .cloned()
    }

    /// Workplaces of one kind, best-rated first. NaN averages sort last.
    pub async fn by_kind_sorted(&self, kind: WorkPlaceKind) -> Vec<WorkPlace> {
        let state = self.state.read().await;
        let mut places: Vec<WorkPlace> = state
            .places
            .get(&kind)
            .map(|bucket| bucket.values().cloned().collect())
            .unwrap_or_default();
        places.sort_by(|a, b| {
            b.average_rating
                .partial_cmp(&a.average_rating)
                .unwrap_or_else(|| rank_nan(a.average_rating).cmp(&rank_nan(b.average_rating)))
        });
        places
    }

    /// Every bucket at once, for the map screen.
    pub async fn all(&self) -> HashMap<WorkPlaceKind, Vec<WorkPlace>> {
        let state = self.state.read().await;
        WorkPlaceKind::ALL
            .iter()
            .map(|kind| {
                let places = state
                    .places
                    .get(kind)
                    .map(|bucket| bucket.values().cloned().collect())
                    .unwrap_or_default();
                (*kind, places)
            })
            .collect()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    pub async fn failed_to_load(&self) -> bool {
        self.state.read().await.failed_to_load
    }

    pub async fn is_creating(&self) -> bool {
        self.state.read().await.is_creating
    }

    pub async fn failed_to_create(&self) -> bool {
        self.state.read().await.failed_to_create
    }

    pub async fn is_submitting_rating(&self) -> bool {
        self.state.read().await.is_submitting_rating
    }

    pub async fn failed_to_submit_rating(&self) -> bool {
        self.state.read().await.failed_to_submit_rating
    }
}

impl Default for WorkPlaceCacheService {
    fn default() -> Self {
        Self::new()
    }
}

fn empty_buckets() -> HashMap<WorkPlaceKind, HashMap<String, WorkPlace>> {
    WorkPlaceKind::ALL
        .iter()
        .map(|kind| (*kind, HashMap::new()))
        .collect()
}

fn rank_nan(value: f64) -> u8 {
    u8::from(value.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::work_place::RawWorkPlace;

    fn test_place(id: &str, kind: &str, average_rating: f64) -> WorkPlace {
        let mut place = WorkPlace::from_raw(RawWorkPlace {
            id: id.to_string(),
            name: format!("Place {id}"),
            kind: kind.to_string(),
            spot_id: "spot-1".to_string(),
            ..RawWorkPlace::default()
        })
        .expect("known kind");
        place.average_rating = average_rating;
        place
    }

    #[tokio::test]
    async fn load_buckets_by_kind() {
        let cache = WorkPlaceCacheService::new();
        cache
            .complete_load(vec![
                test_place("a", "café", 4.0),
                test_place("b", "coworking", 3.0),
                test_place("c", "café", 5.0),
            ])
            .await;

        assert_eq!(cache.by_kind_sorted(WorkPlaceKind::Cafe).await.len(), 2);
        assert_eq!(cache.by_kind_sorted(WorkPlaceKind::Coworking).await.len(), 1);
        assert!(cache.by_kind_sorted(WorkPlaceKind::Coliving).await.is_empty());
    }

    #[tokio::test]
    async fn sorted_by_descending_average() {
        let cache = WorkPlaceCacheService::new();
        cache
            .complete_load(vec![
                test_place("a", "café", 3.5),
                test_place("b", "café", 4.8),
                test_place("c", "café", f64::NAN),
            ])
            .await;

        let cafes = cache.by_kind_sorted(WorkPlaceKind::Cafe).await;
        assert_eq!(cafes[0].id, "b");
        assert_eq!(cafes[1].id, "a");
        assert_eq!(cafes[2].id, "c");
    }

    #[tokio::test]
    async fn rating_updates_cached_place() {
        let cache = WorkPlaceCacheService::new();
        cache.complete_load(vec![test_place("a", "café", 0.0)]).await;

        cache
            .complete_rating(
                WorkPlaceKind::Cafe,
                "a",
                Rating {
                    user_id: "u1".to_string(),
                    rating: 4,
                    comment: None,
                },
                false,
            )
            .await;

        let place = cache.get(WorkPlaceKind::Cafe, "a").await.expect("cached");
        assert_eq!(place.total_ratings, 1);
        assert_eq!(place.average_rating, 4.0);
    }

    #[tokio::test]
    async fn rating_for_missing_place_is_skipped() {
        let cache = WorkPlaceCacheService::new();
        cache
            .complete_rating(
                WorkPlaceKind::Cafe,
                "nope",
                Rating {
                    user_id: "u1".to_string(),
                    rating: 4,
                    comment: None,
                },
                false,
            )
            .await;
        assert!(!cache.failed_to_submit_rating().await);
    }

    #[tokio::test]
    async fn all_returns_every_bucket() {
        let cache = WorkPlaceCacheService::new();
        cache.complete_load(vec![test_place("a", "coliving", 2.0)]).await;

        let all = cache.all().await;
        assert_eq!(all.len(), 3);
        assert_eq!(all[&WorkPlaceKind::Coliving].len(), 1);
        assert!(all[&WorkPlaceKind::Cafe].is_empty());
    }
}
