//! Content store
//!
//! In-memory feed, newest first. Not persisted; `load_videos` replaces
//! the whole sequence from the feed gateway.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::gateway::FeedGateway;
use crate::models::{NewVideo, Video};
use crate::observe::{StateCell, StateObserver, SubscriptionId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentState {
    pub videos: Vec<Video>,
    /// Selected video; an independent copy, not kept in sync with `videos`
    pub current_video: Option<Video>,
    pub is_loading: bool,
}

/// Time-based id, bumped until unique within `videos`
fn next_video_id(videos: &[Video], now: DateTime<Utc>) -> String {
    let mut candidate = now.timestamp_millis();
    loop {
        let id = candidate.to_string();
        if !videos.iter().any(|v| v.id == id) {
            return id;
        }
        candidate += 1;
    }
}

pub struct ContentStore {
    state: StateCell<ContentState>,
    gateway: Arc<dyn FeedGateway>,
}

impl ContentStore {
    pub fn new(gateway: Arc<dyn FeedGateway>) -> Self {
        Self {
            state: StateCell::new(ContentState::default()),
            gateway,
        }
    }

    pub fn subscribe(&self, observer: Arc<dyn StateObserver<ContentState>>) -> SubscriptionId {
        self.state.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    pub fn watch(&self) -> watch::Receiver<ContentState> {
        self.state.watch()
    }

    pub fn snapshot(&self) -> ContentState {
        self.state.snapshot()
    }

    pub fn videos(&self) -> Vec<Video> {
        self.state.read(|s| s.videos.clone())
    }

    pub fn len(&self) -> usize {
        self.state.read(|s| s.videos.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_loading(&self) -> bool {
        self.state.read(|s| s.is_loading)
    }

    pub fn current_video(&self) -> Option<Video> {
        self.state.read(|s| s.current_video.clone())
    }

    /// Replace the feed from the gateway; on failure the feed is kept
    pub async fn load_videos(&self) {
        if self.is_loading() {
            warn!("Feed load started while another is in flight");
        }
        self.state.update(|s| s.is_loading = true);

        match self.gateway.fetch_feed().await {
            Ok(videos) => {
                info!(count = videos.len(), "Feed loaded");
                self.state.update(|s| {
                    s.videos = videos;
                    s.is_loading = false;
                });
            }
            Err(e) => {
                warn!(error = %e, "Feed load failed");
                self.state.update(|s| s.is_loading = false);
            }
        }
    }

    /// Prepend a new video and return the stored record.
    ///
    /// Field contents are the caller's responsibility.
    pub fn add_video(&self, new: NewVideo) -> Video {
        let video = self.state.update(|s| {
            let now = Utc::now();
            let video = Video::from_new(next_video_id(&s.videos, now), new, now);
            s.videos.insert(0, video.clone());
            video
        });
        info!(video_id = %video.id, title = %video.title, "Video added");
        video
    }

    /// Toggle the like flag and counter; no-op for unknown ids
    pub fn like_video(&self, id: &str) {
        let found = self.state.update_if(|s| match s.videos.iter_mut().find(|v| v.id == id) {
            Some(video) => {
                video.toggle_like();
                true
            }
            None => false,
        });
        if !found {
            debug!(video_id = id, "like_video: unknown id");
        }
    }

    /// Toggle the bookmark flag; no-op for unknown ids
    pub fn bookmark_video(&self, id: &str) {
        let found = self.state.update_if(|s| match s.videos.iter_mut().find(|v| v.id == id) {
            Some(video) => {
                video.toggle_bookmark();
                true
            }
            None => false,
        });
        if !found {
            debug!(video_id = id, "bookmark_video: unknown id");
        }
    }

    pub fn set_current_video(&self, video: Option<Video>) {
        self.state.update(|s| s.current_video = video);
    }

    pub fn video(&self, id: &str) -> Option<Video> {
        self.state
            .read(|s| s.videos.iter().find(|v| v.id == id).cloned())
    }

    /// Videos matching `query` in title, creator or hashtags
    pub fn search(&self, query: &str) -> Vec<Video> {
        self.filtered(|v| v.matches(query))
    }

    pub fn with_hashtag(&self, tag: &str) -> Vec<Video> {
        self.filtered(|v| v.has_hashtag(tag))
    }

    pub fn bookmarked(&self) -> Vec<Video> {
        self.filtered(|v| v.is_bookmarked)
    }

    pub fn by_username(&self, username: &str) -> Vec<Video> {
        self.filtered(|v| v.username == username)
    }

    fn filtered(&self, keep: impl Fn(&Video) -> bool) -> Vec<Video> {
        self.state
            .read(|s| s.videos.iter().filter(|v| keep(v)).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio::sync::Notify;

    struct FakeFeed {
        fail: AtomicBool,
    }

    impl FakeFeed {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                fail: AtomicBool::new(false),
            })
        }
    }

    fn video(id: &str, likes: u64, tags: &[&str]) -> Video {
        Video {
            id: id.to_string(),
            title: format!("Video {}", id),
            username: format!("creator{}", id),
            views: 1_000,
            likes,
            comments: 10,
            thumbnail: "https://example.com/t.jpg".to_string(),
            video_url: "https://example.com/v.mp4".to_string(),
            duration: "1:00".to_string(),
            description: None,
            hashtags: Some(tags.iter().map(|t| t.to_string()).collect()),
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
            is_liked: false,
            is_bookmarked: false,
        }
    }

    #[async_trait]
    impl FeedGateway for FakeFeed {
        async fn fetch_feed(&self) -> Result<Vec<Video>> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(Error::OperationFailed("feed unavailable".to_string()));
            }
            Ok(vec![
                video("1", 8_500, &["#travel", "#bali"]),
                video("2", 6_200, &["#cooking"]),
                video("3", 15_600, &["#magic"]),
            ])
        }
    }

    /// First fetch waits on `gate` and returns a single stale video; later
    /// fetches return the full feed at once
    struct GatedFeed {
        calls: AtomicUsize,
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl FeedGateway for GatedFeed {
        async fn fetch_feed(&self) -> Result<Vec<Video>> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                self.gate.notified().await;
                return Ok(vec![video("stale", 1, &[])]);
            }
            FakeFeed::ok().fetch_feed().await
        }
    }

    async fn loaded() -> ContentStore {
        let store = ContentStore::new(FakeFeed::ok());
        store.load_videos().await;
        store
    }

    fn upload(title: &str) -> NewVideo {
        NewVideo {
            title: title.to_string(),
            username: "creativemind".to_string(),
            thumbnail: "https://example.com/t.jpg".to_string(),
            video_url: "https://example.com/v.mp4".to_string(),
            duration: "0:30".to_string(),
            ..NewVideo::default()
        }
    }

    #[tokio::test]
    async fn test_load_replaces_empty_sequence() {
        let store = ContentStore::new(FakeFeed::ok());
        assert!(store.is_empty());

        store.load_videos().await;

        assert_eq!(store.len(), 3);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_load_failure_keeps_sequence() {
        let feed = FakeFeed::ok();
        let store = ContentStore::new(feed.clone());
        store.load_videos().await;
        store.like_video("1");

        feed.fail.store(true, Ordering::SeqCst);
        store.load_videos().await;

        assert_eq!(store.len(), 3);
        assert!(store.video("1").unwrap().is_liked);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_like_increments_and_flags() {
        let store = loaded().await;

        store.like_video("2");

        let liked = store.video("2").unwrap();
        assert_eq!(liked.likes, 6_201);
        assert!(liked.is_liked);
    }

    #[tokio::test]
    async fn test_like_twice_restores() {
        let store = loaded().await;
        let before = store.video("3").unwrap();

        store.like_video("3");
        store.like_video("3");

        let after = store.video("3").unwrap();
        assert_eq!(after.likes, before.likes);
        assert_eq!(after.is_liked, before.is_liked);
    }

    #[tokio::test]
    async fn test_like_only_touches_target() {
        let store = loaded().await;
        store.like_video("1");
        assert_eq!(store.video("2").unwrap().likes, 6_200);
        assert!(!store.video("3").unwrap().is_liked);
    }

    #[tokio::test]
    async fn test_bookmark_toggles_without_counters() {
        let store = loaded().await;

        store.bookmark_video("1");
        let marked = store.video("1").unwrap();
        assert!(marked.is_bookmarked);
        assert_eq!(marked.likes, 8_500);
        assert_eq!(store.bookmarked().len(), 1);

        store.bookmark_video("1");
        assert!(store.bookmarked().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_id_leaves_sequence_unchanged() {
        let store = loaded().await;
        let before = store.snapshot();
        let mut rx = store.watch();
        rx.borrow_and_update();

        store.bookmark_video("missing");
        store.like_video("missing");

        assert_eq!(store.snapshot(), before);
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_add_video_prepends() {
        let store = loaded().await;

        let added = store.add_video(upload("Sunset timelapse"));

        let videos = store.videos();
        assert_eq!(videos.len(), 4);
        assert_eq!(videos[0].id, added.id);
        assert_eq!(videos[0].title, "Sunset timelapse");
        assert!(!videos[0].is_liked);
        assert!(!videos[0].is_bookmarked);
    }

    #[test]
    fn test_rapid_adds_get_unique_ids() {
        let store = ContentStore::new(FakeFeed::ok());
        for i in 0..20 {
            store.add_video(upload(&format!("clip {}", i)));
        }

        let mut ids: Vec<String> = store.videos().into_iter().map(|v| v.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_next_video_id_skips_taken() {
        let now = Utc::now();
        let taken = now.timestamp_millis().to_string();
        let videos = vec![video(&taken, 0, &[])];
        assert_eq!(
            next_video_id(&videos, now),
            (now.timestamp_millis() + 1).to_string()
        );
    }

    #[tokio::test]
    async fn test_current_video_is_independent() {
        let store = loaded().await;
        let selected = store.video("2");

        store.set_current_video(selected);
        store.like_video("2");

        let current = store.current_video().unwrap();
        assert_eq!(current.likes, 6_200);
        assert_eq!(store.len(), 3);

        store.set_current_video(None);
        assert!(store.current_video().is_none());
    }

    #[tokio::test]
    async fn test_queries() {
        let store = loaded().await;

        assert_eq!(store.search("bali").len(), 1);
        assert_eq!(store.search("creator").len(), 3);
        assert_eq!(store.with_hashtag("cooking")[0].id, "2");
        assert_eq!(store.by_username("creator3").len(), 1);
        assert!(store.by_username("nobody").is_empty());
    }

    #[tokio::test]
    async fn test_overlapping_loads_last_resolution_wins() {
        let gate = Arc::new(Notify::new());
        let store = Arc::new(ContentStore::new(Arc::new(GatedFeed {
            calls: AtomicUsize::new(0),
            gate: gate.clone(),
        })));

        let slow = {
            let store = store.clone();
            tokio::spawn(async move { store.load_videos().await })
        };
        while !store.is_loading() {
            tokio::task::yield_now().await;
        }

        store.load_videos().await;
        assert_eq!(store.len(), 3);
        assert!(!store.is_loading());

        gate.notify_one();
        slow.await.unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.videos()[0].id, "stale");
        assert!(!store.is_loading());
    }
}
