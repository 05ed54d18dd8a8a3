use crate::application::ports::gateways::{
    CreateWorkPlaceRequest, SubmitRatingRequest, WorkPlaceGateway,
};
use crate::application::ports::image_store::{ImageFile, ImageKind, ImageStore};
use crate::domain::entities::{Rating, WorkPlace, WorkPlaceKind};
use crate::infrastructure::cache::WorkPlaceCacheService;
use crate::shared::error::AppError;
use crate::shared::slug;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Input for the create-workplace flow. `spot_name` only feeds the storage
/// object name; the backend identifies the spot by `spot_id`.
#[derive(Debug, Clone)]
pub struct NewWorkPlace {
    pub google_id: Option<String>,
    pub name: String,
    pub kind: WorkPlaceKind,
    pub spot_id: String,
    pub spot_name: String,
    pub address: Option<String>,
    pub rating: u8,
    pub comment: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
    pub image: Option<ImageFile>,
}

/// The workplace store for the currently open destination.
pub struct WorkPlaceService {
    gateway: Arc<dyn WorkPlaceGateway>,
    image_store: Arc<dyn ImageStore>,
    cache: WorkPlaceCacheService,
}

impl WorkPlaceService {
    pub fn new(gateway: Arc<dyn WorkPlaceGateway>, image_store: Arc<dyn ImageStore>) -> Self {
        Self {
            gateway,
            image_store,
            cache: WorkPlaceCacheService::new(),
        }
    }

    /// Loads the workplaces of one spot, replacing whatever destination was
    /// cached before.
    pub async fn load_for_spot(&self, spot_id: &str) -> Result<(), AppError> {
        self.cache.begin_load().await;

        match self.gateway.load_work_places(spot_id).await {
            Ok(places) => {
                self.cache.complete_load(places).await;
                Ok(())
            }
            Err(err) => {
                self.cache.fail_load().await;
                Err(err)
            }
        }
    }

    pub async fn create_work_place(&self, new_place: NewWorkPlace) -> Result<WorkPlace, AppError> {
        self.cache.begin_create().await;

        let image_link = self.resolve_image(&new_place).await;
        let request = CreateWorkPlaceRequest {
            google_id: new_place.google_id,
            name: new_place.name,
            kind: new_place.kind,
            spot_id: new_place.spot_id,
            image_link,
            adress: new_place.address,
            rating: new_place.rating,
            comment: new_place.comment,
            longitude: new_place.longitude,
            latitude: new_place.latitude,
        };

        match self.gateway.create_work_place(&request).await {
            Ok(place) => {
                self.cache.complete_create(place.clone()).await;
                Ok(place)
            }
            Err(err) => {
                self.cache.fail_create().await;
                Err(err)
            }
        }
    }

    /// Submits a new rating, or replaces the caller's existing one when
    /// `edit` is set.
    pub async fn submit_rating(
        &self,
        request: SubmitRatingRequest,
        edit: bool,
    ) -> Result<Rating, AppError> {
        self.cache.begin_rating().await;

        match self
            .gateway
            .submit_rating(&request.work_place_id, &request, edit)
            .await
        {
            Ok(rating) => {
                self.cache
                    .complete_rating(request.kind, &request.work_place_id, rating.clone(), edit)
                    .await;
                Ok(rating)
            }
            Err(err) => {
                self.cache.fail_rating().await;
                Err(err)
            }
        }
    }

    async fn resolve_image(&self, new_place: &NewWorkPlace) -> Option<String> {
        let file = new_place.image.as_ref()?;
        let file_name = slug::storage_file_name(
            ImageKind::WorkPlace.label(),
            &file.file_name,
            &new_place.name,
            &new_place.spot_name,
        );
        let object_path = format!("public/{file_name}");

        match self
            .image_store
            .upload(ImageKind::WorkPlace, &object_path, file)
            .await
        {
            Ok(url) => Some(url),
            Err(err) => {
                warn!(error = %err, "workplace image upload failed, continuing without an image");
                None
            }
        }
    }

    // Selectors

    pub async fn by_kind(&self, kind: WorkPlaceKind) -> Vec<WorkPlace> {
        self.cache.by_kind_sorted(kind).await
    }

    pub async fn all(&self) -> HashMap<WorkPlaceKind, Vec<WorkPlace>> {
        self.cache.all().await
    }

    pub async fn work_place(&self, kind: WorkPlaceKind, id: &str) -> Option<WorkPlace> {
        self.cache.get(kind, id).await
    }

    pub async fn is_loading(&self) -> bool {
        self.cache.is_loading().await
    }

    pub async fn failed_to_load(&self) -> bool {
        self.cache.failed_to_load().await
    }

    pub async fn is_creating(&self) -> bool {
        self.cache.is_creating().await
    }

    pub async fn failed_to_create(&self) -> bool {
        self.cache.failed_to_create().await
    }

    pub async fn is_submitting_rating(&self) -> bool {
        self.cache.is_submitting_rating().await
    }

    pub async fn failed_to_submit_rating(&self) -> bool {
        self.cache.failed_to_submit_rating().await
    }
}
