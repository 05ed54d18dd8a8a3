use crate::application::ports::gateways::{LikeAction, LikeOutcome, SpotFilters, SpotPage};
use crate::domain::entities::Spot;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Tab-lifetime cache of the spots returned for the current filter set,
/// plus the derived client-side pagination state.
///
/// Pagination is a reveal of a prefix of one fully-fetched result set; the
/// backend is never asked for page cursors. Every operation's effect is
/// applied atomically under one write guard, in response-arrival order.
#[derive(Clone)]
pub struct SpotCacheService {
    state: Arc<RwLock<SpotCacheState>>,
}

struct SpotCacheState {
    spots: HashMap<String, Spot>,
    displayed_count: usize,
    page_size: usize,
    total_count: usize,
    has_more: bool,
    current_filters: SpotFilters,

    is_loading: bool,
    failed_to_load: bool,
    is_loading_more: bool,
    is_creating: bool,
    failed_to_create: bool,
    is_liking: bool,
    failed_to_like: bool,

    /// Bumped whenever the spots map changes; keys the sorted-view memo.
    revision: u64,
    sorted: Option<(u64, Vec<Spot>)>,
}

impl SpotCacheService {
    pub fn new(page_size: usize) -> Self {
        Self {
            state: Arc::new(RwLock::new(SpotCacheState {
                spots: HashMap::new(),
                displayed_count: 0,
                page_size,
                total_count: 0,
                has_more: false,
                current_filters: SpotFilters::default(),
                is_loading: false,
                failed_to_load: false,
                is_loading_more: false,
                is_creating: false,
                failed_to_create: false,
                is_liking: false,
                failed_to_like: false,
                revision: 0,
                sorted: None,
            })),
        }
    }

    /// Discards all cached results so stale spots are never shown under a
    /// new filter set. Idempotent.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        state.spots.clear();
        state.displayed_count = 0;
        state.total_count = 0;
        state.has_more = false;
        state.revision += 1;
    }

    /// Replaces the retained filter set. Does not fetch.
    pub async fn set_filters(&self, filters: SpotFilters) {
        let mut state = self.state.write().await;
        state.current_filters = filters;
    }

    pub async fn current_filters(&self) -> SpotFilters {
        self.state.read().await.current_filters.clone()
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

    /// Wholesale replacement with a freshly fetched result set; a load
    /// always supersedes prior results, never merges.
    pub async fn complete_load(&self, page: SpotPage) {
        let mut state = self.state.write().await;
        state.is_loading = false;
        state.failed_to_load = false;

        state.spots = page
            .spots
            .into_iter()
            .map(|spot| (spot.id.clone(), spot))
            .collect();
        state.total_count = page.total_count;
        state.displayed_count = state.page_size.min(state.total_count);
        state.has_more = state.displayed_count < state.total_count;
        state.revision += 1;
    }

    pub async fn begin_reveal_more(&self) {
        let mut state = self.state.write().await;
        state.is_loading_more = true;
    }

    pub async fn fail_reveal_more(&self) {
        let mut state = self.state.write().await;
        state.is_loading_more = false;
    }

    /// Reveals the next page of already-cached spots. Operates against
    /// whatever state is current at apply time, not a dispatch-time
    /// snapshot; `displayed_count` is clamped so it never exceeds
    /// `total_count`.
    pub async fn complete_reveal_more(&self) {
        let mut state = self.state.write().await;
        state.is_loading_more = false;
        state.displayed_count = (state.displayed_count + state.page_size).min(state.total_count);
        state.has_more = state.displayed_count < state.spots.len();
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

    /// Inserts one newly created spot. `displayed_count` is untouched, so
    /// the new spot is not guaranteed to be immediately visible.
    pub async fn complete_create(&self, spot: Spot) {
        let mut state = self.state.write().await;
        state.is_creating = false;
        state.failed_to_create = false;
        state.spots.insert(spot.id.clone(), spot);
        state.total_count += 1;
        state.has_more = state.displayed_count < state.spots.len();
        state.revision += 1;
    }

    pub async fn begin_like(&self) {
        let mut state = self.state.write().await;
        state.is_liking = true;
        state.failed_to_like = false;
    }

    pub async fn fail_like(&self) {
        let mut state = self.state.write().await;
        state.is_liking = false;
        state.failed_to_like = true;
    }

    /// Applies a server-confirmed like outcome. A spot evicted by an
    /// intervening reload is silently skipped.
    pub async fn complete_like(&self, spot_id: &str, outcome: LikeOutcome) {
        let mut state = self.state.write().await;
        state.is_liking = false;
        state.failed_to_like = false;

        match state.spots.get_mut(spot_id) {
            Some(spot) => {
                match outcome.action {
                    LikeAction::Liked => spot.apply_like(&outcome.user_id),
                    LikeAction::Removed => spot.apply_unlike(&outcome.user_id),
                }
                state.revision += 1;
            }
            None => {
                debug!(spot_id, "like outcome for a spot no longer in the cache, skipping");
            }
        }
    }

    // Selectors

    pub async fn get(&self, id: &str) -> Option<Spot> {
        self.state.read().await.spots.get(id).cloned()
    }

    /// Spots ordered by descending total likes, ties in map-iteration
    /// order. Memoized per cache revision so unchanged caches never
    /// re-sort.
    pub async fn sorted_by_likes(&self) -> Vec<Spot> {
        {
            let state = self.state.read().await;
            if let Some((revision, sorted)) = &state.sorted {
                if *revision == state.revision {
                    return sorted.clone();
                }
            }
        }

        let mut state = self.state.write().await;
        let memo_revision = state.sorted.as_ref().map(|(revision, _)| *revision);
        if memo_revision != Some(state.revision) {
            let mut sorted: Vec<Spot> = state.spots.values().cloned().collect();
            sorted.sort_by(|a, b| b.total_likes.cmp(&a.total_likes));
            state.sorted = Some((state.revision, sorted));
        }
        state
            .sorted
            .as_ref()
            .map(|(_, sorted)| sorted.clone())
            .unwrap_or_default()
    }

    /// The currently revealed prefix of the sorted view.
    pub async fn displayed(&self) -> Vec<Spot> {
        let mut sorted = self.sorted_by_likes().await;
        let displayed_count = self.state.read().await.displayed_count;
        sorted.truncate(displayed_count);
        sorted
    }

    pub async fn size(&self) -> usize {
        self.state.read().await.spots.len()
    }

    pub async fn displayed_count(&self) -> usize {
        self.state.read().await.displayed_count
    }

    pub async fn total_count(&self) -> usize {
        self.state.read().await.total_count
    }

    pub async fn has_more(&self) -> bool {
        self.state.read().await.has_more
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    pub async fn failed_to_load(&self) -> bool {
        self.state.read().await.failed_to_load
    }

    pub async fn is_loading_more(&self) -> bool {
        self.state.read().await.is_loading_more
    }

    pub async fn is_creating(&self) -> bool {
        self.state.read().await.is_creating
    }

    pub async fn failed_to_create(&self) -> bool {
        self.state.read().await.failed_to_create
    }

    pub async fn is_liking(&self) -> bool {
        self.state.read().await.is_liking
    }

    pub async fn failed_to_like(&self) -> bool {
        self.state.read().await.failed_to_like
    }

    /// Advisory caller-side guard for reveal-more; the cache itself never
    /// rejects an overlapping reveal.
    pub async fn can_reveal_more(&self) -> bool {
        let state = self.state.read().await;
        state.has_more && !state.is_loading_more && !state.is_loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::spot::RawSpot;

    fn test_spot(id: &str, total_likes: u32) -> Spot {
        let mut spot = Spot::from(RawSpot {
            id: id.to_string(),
            name: format!("Spot {id}"),
            country: "Portugal".to_string(),
            ..RawSpot::default()
        });
        spot.total_likes = total_likes;
        spot
    }

    fn page(count: usize) -> SpotPage {
        let spots = (0..count).map(|i| test_spot(&format!("s{i}"), 0)).collect();
        SpotPage {
            spots,
            total_count: count,
        }
    }

    #[tokio::test]
    async fn initial_load_reveals_one_page() {
        let cache = SpotCacheService::new(15);
        cache.complete_load(page(40)).await;

        assert_eq!(cache.size().await, 40);
        assert_eq!(cache.total_count().await, 40);
        assert_eq!(cache.displayed_count().await, 15);
        assert!(cache.has_more().await);
    }

    #[tokio::test]
    async fn load_smaller_than_page_reveals_everything() {
        let cache = SpotCacheService::new(15);
        cache.complete_load(page(7)).await;

        assert_eq!(cache.displayed_count().await, 7);
        assert!(!cache.has_more().await);
    }

    #[tokio::test]
    async fn serial_reveals_are_monotonic_and_clamped() {
        let cache = SpotCacheService::new(15);
        cache.complete_load(page(40)).await;

        let mut previous = cache.displayed_count().await;
        for _ in 0..5 {
            cache.begin_reveal_more().await;
            cache.complete_reveal_more().await;
            let current = cache.displayed_count().await;
            assert!(current >= previous);
            assert!(current <= cache.total_count().await);
            previous = current;
        }
        assert_eq!(cache.displayed_count().await, 40);
    }

    #[tokio::test]
    async fn full_reveal_then_guard_reports_no_more() {
        let cache = SpotCacheService::new(15);
        cache.complete_load(page(40)).await;

        cache.begin_reveal_more().await;
        cache.complete_reveal_more().await;
        assert_eq!(cache.displayed_count().await, 30);
        assert!(cache.has_more().await);

        cache.begin_reveal_more().await;
        cache.complete_reveal_more().await;
        assert_eq!(cache.displayed_count().await, 40);
        assert!(!cache.has_more().await);
        assert!(!cache.can_reveal_more().await);
    }

    #[tokio::test]
    async fn guard_is_false_while_loading() {
        let cache = SpotCacheService::new(15);
        cache.complete_load(page(40)).await;
        assert!(cache.can_reveal_more().await);

        cache.begin_load().await;
        assert!(!cache.can_reveal_more().await);
    }

    #[tokio::test]
    async fn reset_is_idempotent() {
        let cache = SpotCacheService::new(15);
        cache.complete_load(page(20)).await;

        cache.reset().await;
        let after_one = (
            cache.size().await,
            cache.displayed_count().await,
            cache.total_count().await,
            cache.has_more().await,
        );
        cache.reset().await;
        let after_two = (
            cache.size().await,
            cache.displayed_count().await,
            cache.total_count().await,
            cache.has_more().await,
        );

        assert_eq!(after_one, (0, 0, 0, false));
        assert_eq!(after_one, after_two);
    }

    #[tokio::test]
    async fn filter_change_discards_prior_results() {
        let cache = SpotCacheService::new(15);
        cache.complete_load(page(20)).await;

        cache.reset().await;
        cache
            .set_filters(SpotFilters {
                country: Some("Portugal".to_string()),
                ..SpotFilters::default()
            })
            .await;
        cache
            .complete_load(SpotPage {
                spots: vec![],
                total_count: 0,
            })
            .await;

        assert_eq!(cache.size().await, 0);
        assert_eq!(cache.total_count().await, 0);
        assert_eq!(cache.displayed_count().await, 0);
        assert_eq!(
            cache.current_filters().await.country.as_deref(),
            Some("Portugal")
        );
    }

    #[tokio::test]
    async fn load_replaces_rather_than_merges() {
        let cache = SpotCacheService::new(15);
        cache.complete_load(page(10)).await;
        cache
            .complete_load(SpotPage {
                spots: vec![test_spot("other", 3)],
                total_count: 1,
            })
            .await;

        assert_eq!(cache.size().await, 1);
        assert!(cache.get("s0").await.is_none());
        assert!(cache.get("other").await.is_some());
    }

    #[tokio::test]
    async fn like_then_unlike_round_trips() {
        let cache = SpotCacheService::new(15);
        cache
            .complete_load(SpotPage {
                spots: vec![test_spot("s1", 0)],
                total_count: 1,
            })
            .await;

        cache
            .complete_like(
                "s1",
                LikeOutcome {
                    action: LikeAction::Liked,
                    user_id: "u1".to_string(),
                },
            )
            .await;
        let liked = cache.get("s1").await.expect("spot cached");
        assert_eq!(liked.like_user_ids, vec!["u1"]);
        assert_eq!(liked.total_likes, 1);

        cache
            .complete_like(
                "s1",
                LikeOutcome {
                    action: LikeAction::Removed,
                    user_id: "u1".to_string(),
                },
            )
            .await;
        let unliked = cache.get("s1").await.expect("spot cached");
        assert!(unliked.like_user_ids.is_empty());
        assert_eq!(unliked.total_likes, 0);
    }

    #[tokio::test]
    async fn like_for_evicted_spot_is_skipped() {
        let cache = SpotCacheService::new(15);
        cache.complete_load(page(2)).await;
        cache
            .complete_like(
                "gone",
                LikeOutcome {
                    action: LikeAction::Liked,
                    user_id: "u1".to_string(),
                },
            )
            .await;

        assert!(!cache.failed_to_like().await);
        assert_eq!(cache.size().await, 2);
    }

    #[tokio::test]
    async fn create_does_not_force_visibility() {
        let cache = SpotCacheService::new(15);
        cache.complete_load(page(15)).await;
        assert!(!cache.has_more().await);

        cache.complete_create(test_spot("new", 0)).await;

        assert_eq!(cache.total_count().await, 16);
        assert_eq!(cache.displayed_count().await, 15);
        assert!(cache.has_more().await);
    }

    #[tokio::test]
    async fn sorted_view_orders_by_descending_likes() {
        let cache = SpotCacheService::new(15);
        cache
            .complete_load(SpotPage {
                spots: vec![test_spot("a", 2), test_spot("b", 9), test_spot("c", 5)],
                total_count: 3,
            })
            .await;

        let sorted = cache.sorted_by_likes().await;
        let likes: Vec<u32> = sorted.iter().map(|s| s.total_likes).collect();
        assert_eq!(likes, vec![9, 5, 2]);
    }

    #[tokio::test]
    async fn sorted_view_tracks_like_mutations() {
        let cache = SpotCacheService::new(15);
        cache
            .complete_load(SpotPage {
                spots: vec![test_spot("a", 1), test_spot("b", 1)],
                total_count: 2,
            })
            .await;

        // Warm the memo, then mutate.
        let _ = cache.sorted_by_likes().await;
        cache
            .complete_like(
                "b",
                LikeOutcome {
                    action: LikeAction::Liked,
                    user_id: "u1".to_string(),
                },
            )
            .await;

        let sorted = cache.sorted_by_likes().await;
        assert_eq!(sorted[0].id, "b");
        assert_eq!(sorted[0].total_likes, 2);
    }

    #[tokio::test]
    async fn displayed_is_a_prefix_of_the_sorted_view() {
        let cache = SpotCacheService::new(2);
        cache
            .complete_load(SpotPage {
                spots: vec![test_spot("a", 1), test_spot("b", 7), test_spot("c", 4)],
                total_count: 3,
            })
            .await;

        let displayed = cache.displayed().await;
        assert_eq!(displayed.len(), 2);
        assert_eq!(displayed[0].id, "b");
        assert_eq!(displayed[1].id, "c");
    }

    #[tokio::test]
    async fn flag_transitions_are_canonical() {
        let cache = SpotCacheService::new(15);

        cache.begin_load().await;
        assert!(cache.is_loading().await);
        assert!(!cache.failed_to_load().await);

        cache.fail_load().await;
        assert!(!cache.is_loading().await);
        assert!(cache.failed_to_load().await);

        cache.begin_load().await;
        assert!(!cache.failed_to_load().await);
        cache.complete_load(page(1)).await;
        assert!(!cache.is_loading().await);
        assert!(!cache.failed_to_load().await);
    }
}
