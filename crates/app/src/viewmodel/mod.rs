//! View models for the front end
//!
//! Screen-level logic kept out of the stores: form checks, the messages
//! shown to the user, and display formatting.

mod auth;
mod feed;

pub use auth::{AuthViewModel, RegisterForm};
pub use feed::{FeedViewModel, UploadDraft, VideoCard};

/// Alert shown after a user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice::Success(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice::Error(message.into())
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::Success(message) => write!(f, "{}", message),
            Notice::Error(message) => write!(f, "Error: {}", message),
        }
    }
}
