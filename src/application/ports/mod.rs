pub mod auth;
pub mod gateways;
pub mod image_store;

pub use auth::{AccessTokenProvider, AuthGateway, Credentials};
pub use gateways::{
    CommentGateway, CreateCommentRequest, CreateSpotRequest, CreateWorkPlaceRequest, LikeAction,
    LikeOutcome, SpotFilters, SpotGateway, SpotPage, SubmitRatingRequest, WorkPlaceGateway,
};
pub use image_store::{ImageFile, ImageKind, ImageStore};
