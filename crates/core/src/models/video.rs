//! Video model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A published video as seen by the current viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    pub username: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub thumbnail: String,
    pub video_url: String,
    /// Display duration, e.g. "3:45"
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub is_bookmarked: bool,
}

impl Video {
    /// Build a stored record from upload input
    pub fn from_new(id: String, new: NewVideo, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            username: new.username,
            views: new.views,
            likes: new.likes,
            comments: new.comments,
            thumbnail: new.thumbnail,
            video_url: new.video_url,
            duration: new.duration,
            description: new.description,
            hashtags: new.hashtags,
            created_at,
            is_liked: false,
            is_bookmarked: false,
        }
    }

    /// Flip the like flag and move the counter with it
    pub fn toggle_like(&mut self) {
        if self.is_liked {
            self.likes = self.likes.saturating_sub(1);
        } else {
            self.likes += 1;
        }
        self.is_liked = !self.is_liked;
    }

    pub fn toggle_bookmark(&mut self) {
        self.is_bookmarked = !self.is_bookmarked;
    }

    pub fn has_hashtag(&self, tag: &str) -> bool {
        let wanted = tag.trim_start_matches('#');
        self.hashtags
            .iter()
            .flatten()
            .any(|t| t.trim_start_matches('#').eq_ignore_ascii_case(wanted))
    }

    /// Case-insensitive match over title, creator and hashtags
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&query)
            || self.username.to_lowercase().contains(&query)
            || self
                .hashtags
                .iter()
                .flatten()
                .any(|t| t.to_lowercase().contains(&query))
    }
}

/// Upload input: everything except the generated id, timestamp and viewer flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVideo {
    pub title: String,
    pub username: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    pub thumbnail: String,
    pub video_url: String,
    pub duration: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hashtags: Option<Vec<String>>,
}
