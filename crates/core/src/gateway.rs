//! Remote gateway traits
//!
//! The async boundary between the stores and whatever backend serves
//! accounts and the feed. Production code plugs in a real client; tests
//! plug in deterministic fakes.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Credentials, Registration, User, Video};

/// Account operations
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for the account they belong to
    async fn sign_in(&self, credentials: &Credentials) -> Result<User>;

    /// Create an account and return it signed in
    async fn sign_up(&self, registration: &Registration) -> Result<User>;
}

/// Feed operations
#[async_trait]
pub trait FeedGateway: Send + Sync {
    /// Fetch the viewer's feed, newest first
    async fn fetch_feed(&self) -> Result<Vec<Video>>;
}
