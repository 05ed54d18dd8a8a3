pub mod client;
pub mod comment_api;
pub mod spot_api;
pub mod work_place_api;

pub use client::ApiClient;
pub use comment_api::CommentApi;
pub use spot_api::SpotApi;
pub use work_place_api::WorkPlaceApi;
