//! Feed, detail, saved and upload view model

use std::sync::Arc;

use vlogsnap_core::validation::validate_title;
use vlogsnap_core::{
    format_count, parse_hashtags, ContentStore, NewVideo, SessionStore, Video,
};

use super::Notice;

/// One row of the feed as the screen draws it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoCard {
    pub id: String,
    pub title: String,
    pub username: String,
    pub duration: String,
    pub views: String,
    pub likes: String,
    pub comments: String,
    pub hashtags: Vec<String>,
    pub is_liked: bool,
    pub is_bookmarked: bool,
}

impl From<&Video> for VideoCard {
    fn from(video: &Video) -> Self {
        Self {
            id: video.id.clone(),
            title: video.title.clone(),
            username: video.username.clone(),
            duration: video.duration.clone(),
            views: format!("{} views", format_count(video.views)),
            likes: format_count(video.likes),
            comments: format_count(video.comments),
            hashtags: video.hashtags.clone().unwrap_or_default(),
            is_liked: video.is_liked,
            is_bookmarked: video.is_bookmarked,
        }
    }
}

/// Upload screen fields; `hashtags` is the free-text box
#[derive(Debug, Clone, Default)]
pub struct UploadDraft {
    pub title: String,
    pub description: String,
    pub hashtags: String,
    pub video_url: String,
    pub thumbnail: String,
    pub duration: String,
}

pub struct FeedViewModel {
    content: Arc<ContentStore>,
    session: Arc<SessionStore>,
}

impl FeedViewModel {
    pub fn new(content: Arc<ContentStore>, session: Arc<SessionStore>) -> Self {
        Self { content, session }
    }

    pub async fn refresh(&self) {
        self.content.load_videos().await;
    }

    pub fn is_loading(&self) -> bool {
        self.content.is_loading()
    }

    pub fn cards(&self) -> Vec<VideoCard> {
        Self::to_cards(&self.content.videos())
    }

    pub fn search(&self, query: &str) -> Vec<VideoCard> {
        Self::to_cards(&self.content.search(query))
    }

    pub fn saved(&self) -> Vec<VideoCard> {
        Self::to_cards(&self.content.bookmarked())
    }

    /// Select a video for the detail screen
    pub fn open(&self, id: &str) -> Option<VideoCard> {
        let video = self.content.video(id)?;
        let card = VideoCard::from(&video);
        self.content.set_current_video(Some(video));
        Some(card)
    }

    pub fn close(&self) {
        self.content.set_current_video(None);
    }

    pub fn toggle_like(&self, id: &str) -> Option<VideoCard> {
        self.content.like_video(id);
        self.content.video(id).as_ref().map(VideoCard::from)
    }

    pub fn toggle_bookmark(&self, id: &str) -> Option<VideoCard> {
        self.content.bookmark_video(id);
        self.content.video(id).as_ref().map(VideoCard::from)
    }

    /// Publish as the signed-in user
    pub fn publish(&self, draft: UploadDraft) -> Notice {
        if let Err(e) = validate_title(&draft.title) {
            return Notice::error(e.to_string());
        }
        let Some(user) = self.session.user() else {
            return Notice::error("Please log in to upload videos");
        };

        let hashtags = parse_hashtags(&draft.hashtags);
        let description = draft.description.trim();
        self.content.add_video(NewVideo {
            title: draft.title.trim().to_string(),
            username: user.username,
            thumbnail: draft.thumbnail,
            video_url: draft.video_url,
            duration: draft.duration,
            description: (!description.is_empty()).then(|| description.to_string()),
            hashtags: (!hashtags.is_empty()).then_some(hashtags),
            ..NewVideo::default()
        });
        Notice::success("Video uploaded successfully!")
    }

    fn to_cards(videos: &[Video]) -> Vec<VideoCard> {
        videos.iter().map(VideoCard::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vlogsnap_net::SimulatedGateway;

    async fn loaded() -> (FeedViewModel, Arc<SessionStore>) {
        let gateway = Arc::new(SimulatedGateway::instant());
        let session = Arc::new(SessionStore::new(gateway.clone()));
        let vm = FeedViewModel::new(Arc::new(ContentStore::new(gateway)), session.clone());
        vm.refresh().await;
        (vm, session)
    }

    #[tokio::test]
    async fn test_cards_are_formatted() {
        let (vm, _) = loaded().await;

        let cards = vm.cards();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].views, "125.0K views");
        assert_eq!(cards[1].likes, "6.2K");
        assert_eq!(cards[2].comments, "891");
        assert!(!vm.is_loading());
    }

    #[tokio::test]
    async fn test_toggle_like_and_bookmark() {
        let (vm, _) = loaded().await;

        let card = vm.toggle_like("2").unwrap();
        assert!(card.is_liked);

        let card = vm.toggle_bookmark("3").unwrap();
        assert!(card.is_bookmarked);
        assert_eq!(vm.saved().len(), 1);

        assert!(vm.toggle_like("missing").is_none());
    }

    #[tokio::test]
    async fn test_open_and_close() {
        let (vm, _) = loaded().await;

        let card = vm.open("1").unwrap();
        assert_eq!(card.username, "traveljunkie");
        vm.close();
        assert!(vm.open("nope").is_none());
    }

    #[tokio::test]
    async fn test_publish_requires_title_and_login() {
        let (vm, session) = loaded().await;

        let draft = UploadDraft {
            title: "Night market".to_string(),
            ..UploadDraft::default()
        };
        assert_eq!(
            vm.publish(UploadDraft::default()),
            Notice::error("Please enter a title for your video")
        );
        assert!(matches!(vm.publish(draft.clone()), Notice::Error(_)));

        session.login("alex@example.com", "pw").await;
        let notice = vm.publish(UploadDraft {
            hashtags: "food #night food".to_string(),
            ..draft
        });
        assert_eq!(notice, Notice::success("Video uploaded successfully!"));

        let cards = vm.cards();
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].title, "Night market");
        assert_eq!(cards[0].username, "creativemind");
        assert_eq!(cards[0].hashtags, vec!["#food", "#night"]);
    }

    #[tokio::test]
    async fn test_search() {
        let (vm, _) = loaded().await;
        assert_eq!(vm.search("pasta").len(), 1);
        assert_eq!(vm.search("#magic")[0].id, "3");
        assert_eq!(vm.search("").len(), 3);
    }
}
