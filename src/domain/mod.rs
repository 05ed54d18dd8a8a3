pub mod entities;

pub use entities::{Comment, Session, SessionUser, Spot, WorkPlace, WorkPlaceKind};
