//! Type definitions

pub mod camp;
pub mod geo;
pub mod messages;
pub mod user;

pub use camp::*;
pub use geo::*;
pub use messages::*;
pub use user::*;
