pub mod comment;
pub mod session;
pub mod spot;
pub mod work_place;
pub(crate) mod wire;

pub use comment::{Comment, RawComment};
pub use session::{AuthStatus, Session, SessionUser};
pub use spot::{RawSpot, Spot};
pub use work_place::{RawWorkPlace, Rating, WorkPlace, WorkPlaceKind};
