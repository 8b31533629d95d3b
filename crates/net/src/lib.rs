//! VlogSnap Network Library
//!
//! Backend adapters implementing the core gateway traits. Only the
//! simulated backend exists today: fixed delays, a canned profile and a
//! three-video seed feed.
//!
//! # Usage
//!
//! ```ignore
//! let gateway = Arc::new(SimulatedGateway::new(config.gateway.clone()));
//! let session = SessionStore::new(gateway.clone());
//! let content = ContentStore::new(gateway);
//! content.load_videos().await;
//! ```

pub mod fixtures;
pub mod simulated;

pub use simulated::SimulatedGateway;
