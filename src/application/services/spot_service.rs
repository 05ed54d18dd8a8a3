use crate::application::ports::gateways::{
    CreateSpotRequest, LikeOutcome, SpotFilters, SpotGateway,
};
use crate::application::ports::image_store::{ImageFile, ImageKind, ImageStore};
use crate::domain::entities::Spot;
use crate::infrastructure::cache::SpotCacheService;
use crate::shared::error::AppError;
use crate::shared::slug;
use std::sync::Arc;
use tracing::{info, warn};

/// Input for the create-spot flow; the image, when present, is uploaded to
/// the storage collaborator before the backend request.
#[derive(Debug, Clone)]
pub struct NewSpot {
    pub name: String,
    pub country: String,
    pub wifi_quality: u8,
    pub has_coworking: bool,
    pub has_coliving: bool,
    pub image: Option<ImageFile>,
}

/// The spot store: the single injected object through which all spot state
/// is mutated and read. Operations are async request/response pairs; their
/// effects land on the cache in response-arrival order.
pub struct SpotService {
    gateway: Arc<dyn SpotGateway>,
    image_store: Arc<dyn ImageStore>,
    cache: SpotCacheService,
}

impl SpotService {
    pub fn new(
        gateway: Arc<dyn SpotGateway>,
        image_store: Arc<dyn ImageStore>,
        page_size: usize,
    ) -> Self {
        Self {
            gateway,
            image_store,
            cache: SpotCacheService::new(page_size),
        }
    }

    /// Applies a new filter set and loads the matching spots in one step,
    /// so callers cannot mis-sequence reset/set-filters/load. Prior results
    /// are discarded up front; stale spots are never shown under new
    /// filters.
    pub async fn load_with_filters(&self, filters: SpotFilters) -> Result<(), AppError> {
        self.cache.reset().await;
        self.cache.set_filters(filters.clone()).await;
        self.cache.begin_load().await;

        match self.gateway.load_spots(&filters).await {
            Ok(page) => {
                info!(total = page.total_count, "loaded spots");
                self.cache.complete_load(page).await;
                Ok(())
            }
            Err(err) => {
                self.cache.fail_load().await;
                Err(err)
            }
        }
    }

    /// Reloads the full result set for the retained filter set.
    pub async fn reload(&self) -> Result<(), AppError> {
        let filters = self.cache.current_filters().await;
        self.cache.begin_load().await;

        match self.gateway.load_spots(&filters).await {
            Ok(page) => {
                self.cache.complete_load(page).await;
                Ok(())
            }
            Err(err) => {
                self.cache.fail_load().await;
                Err(err)
            }
        }
    }

    /// Reveals the next page of already-cached spots. Purely local; no
    /// request is issued.
    pub async fn load_more(&self) {
        self.cache.begin_reveal_more().await;
        self.cache.complete_reveal_more().await;
    }

    /// Advisory guard callers should check before dispatching `load_more`.
    pub async fn can_load_more(&self) -> bool {
        self.cache.can_reveal_more().await
    }

    pub async fn create_spot(&self, new_spot: NewSpot) -> Result<Spot, AppError> {
        self.cache.begin_create().await;

        let image_link = self.resolve_image(&new_spot).await;
        let request = CreateSpotRequest {
            name: new_spot.name,
            country: new_spot.country,
            image_link,
            wifi_quality: new_spot.wifi_quality,
            has_coworking: new_spot.has_coworking,
            has_coliving: new_spot.has_coliving,
        };

        match self.gateway.create_spot(&request).await {
            Ok(spot) => {
                self.cache.complete_create(spot.clone()).await;
                Ok(spot)
            }
            Err(err) => {
                self.cache.fail_create().await;
                Err(err)
            }
        }
    }

    /// Likes or unlikes the spot; the server decides which, and the local
    /// mutation is applied only from its response.
    pub async fn toggle_like(&self, spot_id: &str) -> Result<LikeOutcome, AppError> {
        self.cache.begin_like().await;

        match self.gateway.like_spot(spot_id).await {
            Ok(outcome) => {
                self.cache.complete_like(spot_id, outcome.clone()).await;
                Ok(outcome)
            }
            Err(err) => {
                self.cache.fail_like().await;
                Err(err)
            }
        }
    }

    // Upload failures degrade to a spot without an image, as the create
    // flow must not be blocked by the storage collaborator.
    async fn resolve_image(&self, new_spot: &NewSpot) -> Option<String> {
        let file = new_spot.image.as_ref()?;
        let file_name = slug::storage_file_name(
            ImageKind::Spot.label(),
            &file.file_name,
            &new_spot.name,
            &new_spot.country,
        );
        let object_path = format!("public/{file_name}");

        match self.image_store.upload(ImageKind::Spot, &object_path, file).await {
            Ok(url) => Some(url),
            Err(err) => {
                warn!(error = %err, "spot image upload failed, continuing without an image");
                None
            }
        }
    }

    // Selectors

    pub async fn sorted_spots(&self) -> Vec<Spot> {
        self.cache.sorted_by_likes().await
    }

    pub async fn displayed_spots(&self) -> Vec<Spot> {
        self.cache.displayed().await
    }

    pub async fn spot(&self, id: &str) -> Option<Spot> {
        self.cache.get(id).await
    }

    pub async fn current_filters(&self) -> SpotFilters {
        self.cache.current_filters().await
    }

    pub async fn has_more(&self) -> bool {
        self.cache.has_more().await
    }

    pub async fn displayed_count(&self) -> usize {
        self.cache.displayed_count().await
    }

    pub async fn total_count(&self) -> usize {
        self.cache.total_count().await
    }

    pub async fn is_loading(&self) -> bool {
        self.cache.is_loading().await
    }

    pub async fn failed_to_load(&self) -> bool {
        self.cache.failed_to_load().await
    }

    pub async fn is_loading_more(&self) -> bool {
        self.cache.is_loading_more().await
    }

    pub async fn is_creating(&self) -> bool {
        self.cache.is_creating().await
    }

    pub async fn failed_to_create(&self) -> bool {
        self.cache.failed_to_create().await
    }

    pub async fn is_liking(&self) -> bool {
        self.cache.is_liking().await
    }

    pub async fn failed_to_like(&self) -> bool {
        self.cache.failed_to_like().await
    }
}
