pub mod comment_cache;
pub mod spot_cache;
pub mod work_place_cache;

pub use comment_cache::CommentCacheService;
pub use spot_cache::SpotCacheService;
pub use work_place_cache::WorkPlaceCacheService;
