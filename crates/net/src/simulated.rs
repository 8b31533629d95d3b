//! Simulated backend
//!
//! Stands in for the real service: waits a configured delay, then answers
//! with canned data. Failures can be injected for exercising error paths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;
use vlogsnap_core::{
    AuthGateway, Credentials, Error, FeedGateway, GatewayConfig, Registration, Result, User,
    Video, DEFAULT_AVATAR,
};

use crate::fixtures::{demo_user, seed_videos};

pub const NEW_CREATOR_BIO: &str = "New VlogSnap creator!";

pub struct SimulatedGateway {
    config: GatewayConfig,
    offline: AtomicBool,
}

impl SimulatedGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            offline: AtomicBool::new(false),
        }
    }

    /// Zero-latency gateway for tests and scripted runs
    pub fn instant() -> Self {
        Self::new(GatewayConfig::instant())
    }

    /// While offline every call fails after its delay
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn is_offline(&self) -> bool {
        self.offline.load(Ordering::SeqCst)
    }

    async fn round_trip(&self, call: &'static str, delay: Duration) -> Result<()> {
        debug!(call, delay_ms = delay.as_millis() as u64, "Simulated request");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.is_offline() {
            return Err(Error::OperationFailed(format!("{}: backend unreachable", call)));
        }
        Ok(())
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(GatewayConfig::default())
    }
}

#[async_trait]
impl AuthGateway for SimulatedGateway {
    async fn sign_in(&self, credentials: &Credentials) -> Result<User> {
        self.round_trip("sign_in", self.config.login_delay()).await?;
        Ok(demo_user(&credentials.email))
    }

    async fn sign_up(&self, registration: &Registration) -> Result<User> {
        self.round_trip("sign_up", self.config.register_delay()).await?;
        Ok(User {
            id: Utc::now().timestamp_millis().to_string(),
            username: registration.username.clone(),
            email: registration.email.clone(),
            full_name: registration.full_name.clone(),
            avatar: Some(DEFAULT_AVATAR.to_string()),
            bio: Some(NEW_CREATOR_BIO.to_string()),
            followers: 0,
            following: 0,
            videos: 0,
        })
    }
}

#[async_trait]
impl FeedGateway for SimulatedGateway {
    async fn fetch_feed(&self) -> Result<Vec<Video>> {
        self.round_trip("fetch_feed", self.config.feed_delay()).await?;
        Ok(seed_videos())
    }
}
