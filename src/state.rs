use crate::application::ports::auth::{AccessTokenProvider, AuthGateway};
use crate::application::ports::image_store::ImageStore;
use crate::application::services::{CommentService, SessionService, SpotService, WorkPlaceService};
use crate::infrastructure::api::{ApiClient, CommentApi, SpotApi, WorkPlaceApi};
use crate::shared::config::AppConfig;
use crate::shared::error::AppError;
use std::sync::Arc;

/// Application state shared across the embedding frontend. Each service is
/// the injected store for its slice of state.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub session: Arc<SessionService>,
    pub spots: Arc<SpotService>,
    pub work_places: Arc<WorkPlaceService>,
    pub comments: Arc<CommentService>,
}

impl AppState {
    /// Wires the full service graph. The auth and image collaborators are
    /// injected; everything else is built from the config.
    pub fn new(
        config: AppConfig,
        auth: Arc<dyn AuthGateway>,
        images: Arc<dyn ImageStore>,
    ) -> Result<Self, AppError> {
        config.validate().map_err(AppError::Configuration)?;

        let session = Arc::new(SessionService::new(auth));
        let token_provider: Arc<dyn AccessTokenProvider> = session.clone();
        let client = ApiClient::new(&config.api, token_provider)?;

        let spots = Arc::new(SpotService::new(
            Arc::new(SpotApi::new(client.clone())),
            images.clone(),
            config.pagination.spots_per_page,
        ));
        let work_places = Arc::new(WorkPlaceService::new(
            Arc::new(WorkPlaceApi::new(client.clone())),
            images,
        ));
        let comments = Arc::new(CommentService::new(Arc::new(CommentApi::new(
            client,
            config.pagination.comments_page_limit,
        ))));

        Ok(Self {
            config,
            session,
            spots,
            work_places,
            comments,
        })
    }
}
