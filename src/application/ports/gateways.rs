use crate::domain::entities::{Comment, Rating, Spot, WorkPlace, WorkPlaceKind};
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde::Serialize;

/// Filter set for the spots collection. Every field is independently
/// omittable; absent or falsy fields are never sent on the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpotFilters {
    pub country: Option<String>,
    pub wifi_quality: Option<u8>,
    pub life_cost: Option<u8>,
    pub has_coworking: bool,
    pub has_coliving: bool,
    pub surf_season: Vec<String>,
}

impl SpotFilters {
    pub fn is_empty(&self) -> bool {
        *self == SpotFilters::default()
    }
}

/// The full filtered result set for one load, already normalized.
#[derive(Debug, Clone)]
pub struct SpotPage {
    pub spots: Vec<Spot>,
    pub total_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeAction {
    Liked,
    Removed,
}

/// Outcome of a like request. The HTTP status code is the semantic channel:
/// 201 means a like was added, 200 means it was removed.
#[derive(Debug, Clone)]
pub struct LikeOutcome {
    pub action: LikeAction,
    pub user_id: String,
}

/// Creation body for `POST /spots`, serialized with the backend's
/// snake_case field names.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSpotRequest {
    pub name: String,
    pub country: String,
    pub image_link: Option<String>,
    pub wifi_quality: u8,
    pub has_coworking: bool,
    pub has_coliving: bool,
}

/// Creation body for `POST /workplaces`. `id` carries the Google place id
/// when the entry came from a places lookup.
#[derive(Debug, Clone, Serialize)]
pub struct CreateWorkPlaceRequest {
    #[serde(rename = "id")]
    pub google_id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: WorkPlaceKind,
    pub spot_id: String,
    pub image_link: Option<String>,
    pub adress: Option<String>,
    pub rating: u8,
    pub comment: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitRatingRequest {
    #[serde(rename = "type")]
    pub kind: WorkPlaceKind,
    pub work_place_id: String,
    pub rating: u8,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCommentRequest {
    pub content: String,
    pub spot_id: String,
    pub creator_name: Option<String>,
    pub rating: u8,
    pub date: String,
}

#[async_trait]
pub trait SpotGateway: Send + Sync {
    /// One GET against the spots collection; never retried.
    async fn load_spots(&self, filters: &SpotFilters) -> Result<SpotPage, AppError>;
    async fn create_spot(&self, request: &CreateSpotRequest) -> Result<Spot, AppError>;
    async fn like_spot(&self, spot_id: &str) -> Result<LikeOutcome, AppError>;
}

#[async_trait]
pub trait WorkPlaceGateway: Send + Sync {
    async fn load_work_places(&self, spot_id: &str) -> Result<Vec<WorkPlace>, AppError>;
    async fn create_work_place(
        &self,
        request: &CreateWorkPlaceRequest,
    ) -> Result<WorkPlace, AppError>;
    /// POST for a new rating, PUT when editing an existing one.
    async fn submit_rating(
        &self,
        work_place_id: &str,
        request: &SubmitRatingRequest,
        edit: bool,
    ) -> Result<Rating, AppError>;
}

#[async_trait]
pub trait CommentGateway: Send + Sync {
    async fn load_comments(&self, spot_id: &str) -> Result<Vec<Comment>, AppError>;
    async fn create_comment(&self, request: &CreateCommentRequest) -> Result<Comment, AppError>;
}
