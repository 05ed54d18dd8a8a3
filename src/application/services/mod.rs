pub mod comment_service;
pub mod session_service;
pub mod spot_service;
pub mod work_place_service;

pub use comment_service::CommentService;
pub use session_service::SessionService;
pub use spot_service::{NewSpot, SpotService};
pub use work_place_service::{NewWorkPlace, WorkPlaceService};
