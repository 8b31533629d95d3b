//! Data models for VlogSnap

mod user;
mod video;

pub use user::*;
pub use video::*;
